use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{AppError, AppResult};
use crate::models::domain::game_level::GameLevel;

/// Hints a player may reveal per level, regardless of how many the model wrote.
pub const HINT_LIMIT: usize = 3;

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize, Copy)]
pub enum AnswerOutcome {
    Correct,
    Incorrect,
}

/// One in-flight chapter attempt. Lives only in memory: abandoning the
/// session (or the process) costs nothing but the run itself.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PlaySession {
    pub id: String,
    pub profile_id: String,
    pub curriculum_id: String,
    pub chapter_id: i32,
    pub levels: Vec<GameLevel>,
    pub current_index: usize,
    pub hints_revealed: usize,
    pub solved: bool,
    pub finished: bool,
    pub started_at: DateTime<Utc>,
}

impl PlaySession {
    pub fn new(
        profile_id: &str,
        curriculum_id: &str,
        chapter_id: i32,
        levels: Vec<GameLevel>,
    ) -> Self {
        PlaySession {
            id: Uuid::new_v4().to_string(),
            profile_id: profile_id.to_string(),
            curriculum_id: curriculum_id.to_string(),
            chapter_id,
            levels,
            current_index: 0,
            hints_revealed: 0,
            solved: false,
            finished: false,
            started_at: Utc::now(),
        }
    }

    pub fn current_level(&self) -> Option<&GameLevel> {
        if self.finished {
            None
        } else {
            self.levels.get(self.current_index)
        }
    }

    fn require_active_level(&self) -> AppResult<&GameLevel> {
        if self.finished {
            return Err(AppError::BadRequest("session is already finished".into()));
        }
        self.levels
            .get(self.current_index)
            .ok_or_else(|| AppError::InternalError("session has no current level".into()))
    }

    /// Checks the chosen option against the current level. Wrong answers cost
    /// nothing and may be retried without limit.
    pub fn submit_answer(&mut self, option: &str) -> AppResult<AnswerOutcome> {
        let level = self.require_active_level()?;
        if self.solved {
            return Err(AppError::BadRequest(
                "level is already solved, advance to continue".into(),
            ));
        }
        if !level.options.iter().any(|o| o == option) {
            return Err(AppError::BadRequest(
                "answer is not one of the level's options".into(),
            ));
        }

        if level.is_correct(option) {
            self.solved = true;
            Ok(AnswerOutcome::Correct)
        } else {
            Ok(AnswerOutcome::Incorrect)
        }
    }

    /// Reveals the next hint, in the order the model wrote them.
    pub fn reveal_hint(&mut self) -> AppResult<String> {
        let level = self.require_active_level()?;
        if self.solved {
            return Err(AppError::BadRequest(
                "level is already solved, no hint needed".into(),
            ));
        }
        let available = level.hints.len().min(HINT_LIMIT);
        if self.hints_revealed >= available {
            return Err(AppError::BadRequest(
                "no hints left for this level".into(),
            ));
        }

        let hint = level.hints[self.hints_revealed].clone();
        self.hints_revealed += 1;
        Ok(hint)
    }

    pub fn hints_remaining(&self) -> usize {
        match self.current_level() {
            Some(level) => level.hints.len().min(HINT_LIMIT) - self.hints_revealed,
            None => 0,
        }
    }

    /// Moves past a solved level. Returns true when that was the last level
    /// and the session is now finished.
    pub fn advance(&mut self) -> AppResult<bool> {
        self.require_active_level()?;
        if !self.solved {
            return Err(AppError::BadRequest(
                "current level is not solved yet".into(),
            ));
        }

        if self.current_index + 1 >= self.levels.len() {
            self.finished = true;
            return Ok(true);
        }

        self.current_index += 1;
        self.hints_revealed = 0;
        self.solved = false;
        Ok(false)
    }
}

#[cfg(test)]
impl PlaySession {
    pub fn test_session(levels: Vec<GameLevel>) -> Self {
        PlaySession::new("profile-1", "curriculum-1", 1, levels)
    }
}
