use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct UserProfile {
    pub id: String,
    pub display_name: String,
    pub guest: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,
}

impl UserProfile {
    pub fn new(display_name: &str) -> Self {
        UserProfile {
            id: Uuid::new_v4().to_string(),
            display_name: display_name.to_string(),
            guest: false,
            created_at: Some(Utc::now()),
            modified_at: Some(Utc::now()),
        }
    }

    pub fn new_guest() -> Self {
        let suffix = &Uuid::new_v4().to_string()[..8];
        UserProfile {
            id: Uuid::new_v4().to_string(),
            display_name: format!("Guest-{}", suffix),
            guest: true,
            created_at: Some(Utc::now()),
            modified_at: Some(Utc::now()),
        }
    }
}

#[cfg(test)]
impl UserProfile {
    pub fn test_profile(display_name: &str) -> Self {
        UserProfile::new(display_name)
    }
}
