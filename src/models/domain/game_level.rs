use async_graphql::SimpleObject;
use serde::{Deserialize, Serialize};

use crate::models::domain::curriculum::SourceRef;

/// One puzzle room in a chapter's escape sequence. Levels 1 and 2 are
/// general-culture hooks; levels 3 to 5 are bound to the study material.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, SimpleObject)]
pub struct GameLevel {
    pub id: i32,
    pub category: String,
    pub riddle: String,
    pub scenic_description: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub hints: Vec<String>,
    pub explanation: String,
    pub knowledge_snippet: String,
    pub congratulation_message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<SourceRef>>,
}

impl GameLevel {
    pub fn is_correct(&self, option: &str) -> bool {
        self.correct_answer == option
    }
}

#[cfg(test)]
impl GameLevel {
    pub fn test_level(id: i32, correct_answer: &str) -> Self {
        GameLevel {
            id,
            category: "General culture".to_string(),
            riddle: format!("Riddle for room {}", id),
            scenic_description: "A dim archive lined with locked drawers".to_string(),
            options: vec![
                correct_answer.to_string(),
                "Wrong A".to_string(),
                "Wrong B".to_string(),
                "Wrong C".to_string(),
            ],
            correct_answer: correct_answer.to_string(),
            hints: vec![
                "First hint".to_string(),
                "Second hint".to_string(),
                "Third hint".to_string(),
            ],
            explanation: "Because the archive says so".to_string(),
            knowledge_snippet: "Archives predate filing cabinets".to_string(),
            congratulation_message: "The drawer clicks open".to_string(),
            sources: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_answer_matching_is_exact() {
        let level = GameLevel::test_level(1, "Mitochondria");

        assert!(level.is_correct("Mitochondria"));
        assert!(!level.is_correct("mitochondria"));
        assert!(!level.is_correct("Wrong A"));
    }
}
