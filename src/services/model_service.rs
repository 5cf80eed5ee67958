use async_openai::{config::OpenAIConfig, Client};
use schemars::schema_for;
use secrecy::ExposeSecret;
use serde_json::{json, Value};

use crate::config::Config;
use crate::constants::prompts::{
    CURRICULUM_ARCHITECT_PROMPT, LEVEL_DESIGNER_PROMPT, MAX_SOURCE_CHARS,
};
use crate::errors::{AppError, AppResult};
use crate::models::domain::curriculum::Chapter;
use crate::models::dto::generated::{GeneratedCurriculum, GeneratedLevel, GeneratedLevelList};
use crate::models::dto::request::AttachmentInput;

/// Adapter over an OpenAI-compatible chat-completions endpoint. All requests
/// carry a response schema so the model answers in the documented JSON shape.
pub struct ModelService {
    client: Client<OpenAIConfig>,
    model_name: String,
}

impl ModelService {
    pub fn from_config(config: &Config) -> Self {
        let mut openai_config =
            OpenAIConfig::new().with_api_key(config.model_api_key.expose_secret());
        if let Some(api_base) = &config.model_api_base {
            openai_config = openai_config.with_api_base(api_base);
        }

        Self {
            client: Client::with_config(openai_config),
            model_name: config.model_name.clone(),
        }
    }

    pub async fn generate_curriculum(
        &self,
        topic: &str,
        source_text: &str,
        attachment: Option<&AttachmentInput>,
    ) -> AppResult<GeneratedCurriculum> {
        let user_prompt = format!(
            "Analyze the study material on \"{}\". Design 3 inspiring educational chapters from it.\n\nMaterial:\n{}",
            topic,
            clip_source(source_text)
        );
        let schema = schema_value(schema_for!(GeneratedCurriculum))?;
        let body = self.request_body(
            CURRICULUM_ARCHITECT_PROMPT,
            &user_prompt,
            attachment,
            "curriculum",
            schema,
        );

        let content = self.complete(body).await?;
        let generated: GeneratedCurriculum = serde_json::from_str(strip_code_fences(&content))
            .map_err(|e| {
                AppError::GenerationError(format!("model returned an unreadable curriculum: {}", e))
            })?;
        generated.validate_shape()?;

        log::info!(
            "Generated curriculum '{}' with {} chapters",
            generated.topic,
            generated.chapters.len()
        );
        Ok(generated)
    }

    pub async fn generate_levels(
        &self,
        topic: &str,
        chapter: &Chapter,
        source_text: &str,
        attachment: Option<&AttachmentInput>,
    ) -> AppResult<Vec<GeneratedLevel>> {
        let user_prompt = format!(
            "Build the 5-level escape challenge for the chapter \"{}\" of the subject \"{}\".\nChapter summary: {}\nChapter topics: {}\n\nMaterial:\n{}",
            chapter.title,
            topic,
            chapter.description,
            chapter.topics.join(", "),
            clip_source(source_text)
        );
        let schema = schema_value(schema_for!(GeneratedLevelList))?;
        let body = self.request_body(
            LEVEL_DESIGNER_PROMPT,
            &user_prompt,
            attachment,
            "levels",
            schema,
        );

        let content = self.complete(body).await?;
        let levels = parse_levels(&content)?;
        for level in &levels {
            level.validate_shape()?;
        }

        log::info!(
            "Generated {} levels for chapter '{}'",
            levels.len(),
            chapter.title
        );
        Ok(levels)
    }

    fn request_body(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        attachment: Option<&AttachmentInput>,
        schema_name: &str,
        schema: Value,
    ) -> Value {
        let mut user_content = vec![json!({ "type": "text", "text": user_prompt })];
        if let Some(attachment) = attachment {
            user_content.push(json!({
                "type": "file",
                "file": {
                    "filename": "study-material",
                    "file_data": attachment.to_data_url(),
                }
            }));
        }

        json!({
            "model": self.model_name,
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": user_content }
            ],
            "response_format": {
                "type": "json_schema",
                "json_schema": {
                    "name": schema_name,
                    "schema": schema
                }
            }
        })
    }

    async fn complete(&self, body: Value) -> AppResult<String> {
        let response: Value = self.client.chat().create_byot(body).await?;

        let content = response["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                AppError::GenerationError("model response carried no content".to_string())
            })?;

        Ok(content.to_string())
    }
}

/// The response contract is "a list of levels", but schema-constrained
/// endpoints answer with the object wrapper they were asked for. Accept both.
fn parse_levels(content: &str) -> AppResult<Vec<GeneratedLevel>> {
    let cleaned = strip_code_fences(content);

    let levels = if let Ok(list) = serde_json::from_str::<GeneratedLevelList>(cleaned) {
        list.levels
    } else {
        serde_json::from_str::<Vec<GeneratedLevel>>(cleaned).map_err(|e| {
            AppError::GenerationError(format!("model returned unreadable levels: {}", e))
        })?
    };

    if levels.is_empty() {
        return Err(AppError::GenerationError(
            "model returned no levels".to_string(),
        ));
    }
    Ok(levels)
}

fn clip_source(source: &str) -> String {
    source.chars().take(MAX_SOURCE_CHARS).collect()
}

fn strip_code_fences(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(inner) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let inner = inner.strip_prefix("json").unwrap_or(inner);
    let inner = inner.strip_suffix("```").unwrap_or(inner);
    inner.trim()
}

fn schema_value(schema: schemars::Schema) -> AppResult<Value> {
    serde_json::to_value(schema)
        .map_err(|e| AppError::InternalError(format!("Failed to build response schema: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_code_fences() {
        assert_eq!(strip_code_fences("{\"a\":1}"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), "{\"a\":1}");
        assert_eq!(strip_code_fences("```\n[1,2]\n```"), "[1,2]");
        assert_eq!(strip_code_fences("  {\"a\":1}  "), "{\"a\":1}");
    }

    #[test]
    fn test_clip_source_counts_characters_not_bytes() {
        let source = "ñ".repeat(MAX_SOURCE_CHARS + 100);
        let clipped = clip_source(&source);
        assert_eq!(clipped.chars().count(), MAX_SOURCE_CHARS);
    }

    #[test]
    fn test_parse_levels_accepts_wrapped_object() {
        let level = GeneratedLevel::test_generated(1, "A dome");
        let wrapped = serde_json::to_string(&GeneratedLevelList {
            levels: vec![level.clone()],
        })
        .unwrap();

        let parsed = parse_levels(&wrapped).unwrap();
        assert_eq!(parsed, vec![level]);
    }

    #[test]
    fn test_parse_levels_accepts_bare_array() {
        let level = GeneratedLevel::test_generated(2, "A dome");
        let array = serde_json::to_string(&vec![level.clone()]).unwrap();

        let parsed = parse_levels(&array).unwrap();
        assert_eq!(parsed, vec![level]);
    }

    #[test]
    fn test_parse_levels_rejects_empty_and_junk() {
        assert!(matches!(
            parse_levels("{\"levels\": []}"),
            Err(AppError::GenerationError(_))
        ));
        assert!(matches!(
            parse_levels("the model rambled instead of answering"),
            Err(AppError::GenerationError(_))
        ));
    }

    #[test]
    fn test_request_body_shape() {
        let config = Config::test_config();
        let service = ModelService::from_config(&config);
        let attachment = AttachmentInput {
            data: "AAAA".to_string(),
            mime_type: "application/pdf".to_string(),
        };

        let schema = schema_value(schema_for!(GeneratedCurriculum)).unwrap();
        let body = service.request_body("system", "user", Some(&attachment), "curriculum", schema);

        assert_eq!(body["model"], "gpt-4o-mini");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"][0]["type"], "text");
        assert_eq!(body["messages"][1]["content"][1]["type"], "file");
        assert_eq!(
            body["messages"][1]["content"][1]["file"]["file_data"],
            "data:application/pdf;base64,AAAA"
        );
        assert_eq!(body["response_format"]["type"], "json_schema");
        assert_eq!(body["response_format"]["json_schema"]["name"], "curriculum");
    }

    #[test]
    fn test_request_body_without_attachment_has_single_part() {
        let config = Config::test_config();
        let service = ModelService::from_config(&config);

        let schema = schema_value(schema_for!(GeneratedLevelList)).unwrap();
        let body = service.request_body("system", "user", None, "levels", schema);

        assert_eq!(
            body["messages"][1]["content"]
                .as_array()
                .map(|parts| parts.len()),
            Some(1)
        );
    }
}
