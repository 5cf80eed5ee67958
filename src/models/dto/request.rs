use async_graphql::InputObject;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Deserialize;
use validator::{Validate, ValidationError};

static DISPLAY_NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\p{L}\p{N}][\p{L}\p{N} _.'-]*$")
        .expect("DISPLAY_NAME_REGEX is a valid regex pattern")
});

/// Decoded attachment bytes are capped at 10 MB; the base64 text is roughly
/// a third larger than the payload it carries.
pub const MAX_ATTACHMENT_BYTES: usize = 10 * 1024 * 1024;

const ALLOWED_ATTACHMENT_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "text/plain",
    "video/mp4",
    "video/webm",
    "video/quicktime",
];

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct LoginRequest {
    #[validate(length(min = 1, max = 60))]
    #[validate(regex(
        path = *DISPLAY_NAME_REGEX,
        message = "Display name may only contain letters, digits, spaces and _.'-"
    ))]
    pub display_name: String,
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct RefreshRequest {
    #[validate(length(min = 10))]
    pub refresh_token: String,
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct AttachmentInput {
    /// Base64 payload, sent onward to the model as a data URL. Never decoded
    /// server-side.
    #[validate(length(min = 1))]
    #[validate(custom(function = validate_attachment_size))]
    pub data: String,

    #[validate(custom(function = validate_attachment_mime))]
    pub mime_type: String,
}

impl AttachmentInput {
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.data)
    }
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct CreateCurriculumRequest {
    #[validate(length(max = 200))]
    pub topic: Option<String>,

    #[validate(length(max = 200000))]
    pub source_text: Option<String>,

    #[validate(nested)]
    pub attachment: Option<AttachmentInput>,
}

impl CreateCurriculumRequest {
    pub fn has_material(&self) -> bool {
        self.source_text
            .as_ref()
            .is_some_and(|text| !text.trim().is_empty())
            || self.attachment.is_some()
    }
}

/// Study material rides along on every chapter start because generated
/// curricula do not store the raw upload.
#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct StartSessionRequest {
    #[validate(length(max = 200000))]
    pub source_text: Option<String>,

    #[validate(nested)]
    pub attachment: Option<AttachmentInput>,
}

impl StartSessionRequest {
    pub fn has_material(&self) -> bool {
        self.source_text
            .as_ref()
            .is_some_and(|text| !text.trim().is_empty())
            || self.attachment.is_some()
    }
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct SubmitAnswerRequest {
    #[validate(length(min = 1, max = 500))]
    pub answer: String,
}

#[derive(Debug, Clone, Deserialize, Validate, InputObject)]
pub struct PaginationParams {
    #[validate(range(min = 0))]
    pub offset: Option<i64>,

    #[validate(range(min = 1, max = 100))]
    pub limit: Option<i64>,
}

impl Default for PaginationParams {
    fn default() -> Self {
        Self {
            offset: Some(0),
            limit: Some(20),
        }
    }
}

impl PaginationParams {
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(20).min(100)
    }
}

fn validate_attachment_mime(mime_type: &str) -> Result<(), ValidationError> {
    if ALLOWED_ATTACHMENT_MIME_TYPES.contains(&mime_type) {
        Ok(())
    } else {
        Err(ValidationError::new("unsupported_mime_type"))
    }
}

fn validate_attachment_size(data: &str) -> Result<(), ValidationError> {
    // Estimate decoded size without decoding: four base64 chars per three bytes.
    let decoded_estimate = data.len() / 4 * 3;
    if decoded_estimate > MAX_ATTACHMENT_BYTES {
        Err(ValidationError::new("attachment_too_large"))
    } else {
        Ok(())
    }
}
