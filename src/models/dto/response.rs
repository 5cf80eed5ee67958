use async_graphql::SimpleObject;
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::curriculum::{Chapter, Curriculum, SourceRef};
use crate::models::domain::game_level::GameLevel;
use crate::models::domain::play_session::PlaySession;
use crate::models::domain::profile::UserProfile;

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct ProfileDto {
    pub id: String,
    pub display_name: String,
    pub guest: bool,
    #[graphql(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<UserProfile> for ProfileDto {
    fn from(profile: UserProfile) -> Self {
        ProfileDto {
            id: profile.id,
            display_name: profile.display_name,
            guest: profile.guest,
            created_at: profile.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub profile: ProfileDto,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct CurriculumDto {
    pub id: String,
    pub topic: String,
    pub chapters: Vec<Chapter>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sources: Option<Vec<SourceRef>>,
    pub demo: bool,
    #[graphql(skip)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl From<Curriculum> for CurriculumDto {
    fn from(curriculum: Curriculum) -> Self {
        CurriculumDto {
            id: curriculum.id,
            topic: curriculum.topic,
            chapters: curriculum.chapters,
            sources: curriculum.sources,
            demo: curriculum.demo,
            created_at: curriculum.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct PaginationMetadata {
    pub offset: i64,
    pub limit: i64,
    pub total: i64,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct PaginatedCurriculumsResponse {
    pub data: Vec<CurriculumDto>,
    pub pagination: PaginationMetadata,
}

/// What the player is allowed to see of an unsolved level. The answer,
/// explanation and reward text stay server-side until the level is solved.
#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct LevelView {
    pub id: i32,
    pub category: String,
    pub scenic_description: String,
    pub riddle: String,
    pub options: Vec<String>,
}

impl From<&GameLevel> for LevelView {
    fn from(level: &GameLevel) -> Self {
        LevelView {
            id: level.id,
            category: level.category.clone(),
            scenic_description: level.scenic_description.clone(),
            riddle: level.riddle.clone(),
            options: level.options.clone(),
        }
    }
}

/// Revealed only on a correct answer.
#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct RewardView {
    pub correct_answer: String,
    pub explanation: String,
    pub knowledge_snippet: String,
    pub congratulation_message: String,
}

impl From<&GameLevel> for RewardView {
    fn from(level: &GameLevel) -> Self {
        RewardView {
            correct_answer: level.correct_answer.clone(),
            explanation: level.explanation.clone(),
            knowledge_snippet: level.knowledge_snippet.clone(),
            congratulation_message: level.congratulation_message.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct SessionStateResponse {
    pub session_id: String,
    pub curriculum_id: String,
    pub chapter_id: i32,
    pub level_number: i32,
    pub total_levels: i32,
    pub solved: bool,
    pub finished: bool,
    pub hints_revealed: Vec<String>,
    pub hints_remaining: i32,
    pub level: Option<LevelView>,
}

impl SessionStateResponse {
    pub fn from_session(session: &PlaySession) -> Self {
        let level = session.current_level();
        let hints_revealed = level
            .map(|l| l.hints[..session.hints_revealed.min(l.hints.len())].to_vec())
            .unwrap_or_default();

        SessionStateResponse {
            session_id: session.id.clone(),
            curriculum_id: session.curriculum_id.clone(),
            chapter_id: session.chapter_id,
            level_number: (session.current_index + 1) as i32,
            total_levels: session.levels.len() as i32,
            solved: session.solved,
            finished: session.finished,
            hints_revealed,
            hints_remaining: session.hints_remaining() as i32,
            level: level.map(LevelView::from),
        }
    }
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct AnswerResponse {
    pub correct: bool,
    pub reward: Option<RewardView>,
}

#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct HintResponse {
    pub hint: String,
    pub hints_remaining: i32,
}

/// Result of moving past a solved level. While the session is still running
/// `session` carries the next room; once the chapter finishes `curriculum`
/// carries the refreshed unlock state instead.
#[derive(Debug, Clone, Serialize, SimpleObject)]
pub struct AdvanceResponse {
    pub finished: bool,
    pub session: Option<SessionStateResponse>,
    pub curriculum: Option<CurriculumDto>,
}

#[derive(Debug, Serialize, SimpleObject)]
pub struct DeleteSessionResponse {
    pub message: String,
}
