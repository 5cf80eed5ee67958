use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::errors::{AppError, AppResult};
use crate::models::domain::curriculum::{Chapter, ChapterStatus};
use crate::models::domain::game_level::GameLevel;
use crate::models::domain::play_session::HINT_LIMIT;

/// Chapter outline as the model returns it. Field names stay camelCase on the
/// wire; the schema derived from these types is sent with every request.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GeneratedChapter {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub topics: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GeneratedCurriculum {
    pub topic: String,
    pub chapters: Vec<GeneratedChapter>,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GeneratedLevel {
    pub id: i32,
    pub category: String,
    pub scenic_description: String,
    pub riddle: String,
    pub options: Vec<String>,
    pub correct_answer: String,
    pub hints: Vec<String>,
    pub explanation: String,
    pub knowledge_snippet: String,
    pub congratulation_message: String,
}

/// Structured-output endpoints want an object at the schema root, so level
/// batches travel wrapped even though the contract is "a list of levels".
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct GeneratedLevelList {
    pub levels: Vec<GeneratedLevel>,
}

impl GeneratedCurriculum {
    pub fn validate_shape(&self) -> AppResult<()> {
        if self.chapters.is_empty() {
            return Err(AppError::GenerationError(
                "model returned a curriculum with no chapters".into(),
            ));
        }
        for chapter in &self.chapters {
            if chapter.title.trim().is_empty() {
                return Err(AppError::GenerationError(
                    "model returned a chapter without a title".into(),
                ));
            }
        }
        Ok(())
    }

    pub fn into_chapters(self) -> Vec<Chapter> {
        self.chapters
            .into_iter()
            .map(|generated| Chapter {
                id: generated.id,
                title: generated.title,
                description: generated.description,
                status: ChapterStatus::Locked,
                topics: generated.topics,
                sources: None,
            })
            .collect()
    }
}

impl GeneratedLevel {
    pub fn validate_shape(&self) -> AppResult<()> {
        if self.options.len() < 2 {
            return Err(AppError::GenerationError(format!(
                "level {} has fewer than two options",
                self.id
            )));
        }
        if !self.options.iter().any(|o| o == &self.correct_answer) {
            return Err(AppError::GenerationError(format!(
                "level {} lists a correct answer that is not among its options",
                self.id
            )));
        }
        if self.riddle.trim().is_empty() {
            return Err(AppError::GenerationError(format!(
                "level {} has an empty riddle",
                self.id
            )));
        }
        Ok(())
    }
}

impl From<GeneratedLevel> for GameLevel {
    fn from(generated: GeneratedLevel) -> Self {
        let mut hints = generated.hints;
        hints.truncate(HINT_LIMIT);

        GameLevel {
            id: generated.id,
            category: generated.category,
            riddle: generated.riddle,
            scenic_description: generated.scenic_description,
            options: generated.options,
            correct_answer: generated.correct_answer,
            hints,
            explanation: generated.explanation,
            knowledge_snippet: generated.knowledge_snippet,
            congratulation_message: generated.congratulation_message,
            sources: None,
        }
    }
}

#[cfg(test)]
impl GeneratedLevel {
    pub fn test_generated(id: i32, correct_answer: &str) -> Self {
        GeneratedLevel {
            id,
            category: "General culture".to_string(),
            scenic_description: "A locked observatory".to_string(),
            riddle: "What turns but never moves?".to_string(),
            options: vec![
                correct_answer.to_string(),
                "A door".to_string(),
                "A key".to_string(),
            ],
            correct_answer: correct_answer.to_string(),
            hints: vec!["Look up".to_string(), "It is above you".to_string()],
            explanation: "The dome turns in place".to_string(),
            knowledge_snippet: "Observatory domes rotate on rails".to_string(),
            congratulation_message: "The dome grinds open".to_string(),
        }
    }
}
