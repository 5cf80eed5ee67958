use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    constants::demo::demo_levels,
    errors::{AppError, AppResult},
    models::{
        domain::{AnswerOutcome, ChapterStatus, Curriculum, GameLevel, PlaySession},
        dto::request::StartSessionRequest,
    },
    services::model_service::ModelService,
};

/// What advancing past a solved level led to. `Finished` means the session
/// was consumed and chapter completion bookkeeping should run.
pub enum AdvanceOutcome {
    Continued(PlaySession),
    Finished {
        curriculum_id: String,
        chapter_id: i32,
    },
}

/// Owns the in-flight chapter attempts. Sessions are deliberately ephemeral:
/// nothing here survives a restart, only completed chapters do.
pub struct SessionService {
    sessions: RwLock<HashMap<String, PlaySession>>,
    model_service: Arc<ModelService>,
}

impl SessionService {
    pub fn new(model_service: Arc<ModelService>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            model_service,
        }
    }

    /// Opens a play session on an unlocked chapter, generating its five
    /// levels (or reusing the canned demo set). A previous session of the
    /// same profile on the same chapter is discarded.
    pub async fn start_session(
        &self,
        profile_id: &str,
        curriculum: &Curriculum,
        chapter_id: i32,
        request: StartSessionRequest,
    ) -> AppResult<PlaySession> {
        let chapter = curriculum.chapter(chapter_id).ok_or_else(|| {
            AppError::NotFound(format!(
                "Chapter {} not found in curriculum '{}'",
                chapter_id, curriculum.id
            ))
        })?;

        if chapter.status == ChapterStatus::Locked {
            return Err(AppError::Forbidden(format!(
                "Chapter {} is still locked",
                chapter_id
            )));
        }

        let levels: Vec<GameLevel> = if curriculum.demo {
            demo_levels()
        } else {
            if !request.has_material() {
                return Err(AppError::BadRequest(
                    "Resend the chapter's study material to start a session".to_string(),
                ));
            }
            let source_text = request.source_text.unwrap_or_default();
            self.model_service
                .generate_levels(
                    &curriculum.topic,
                    chapter,
                    &source_text,
                    request.attachment.as_ref(),
                )
                .await?
                .into_iter()
                .map(GameLevel::from)
                .collect()
        };

        let session = PlaySession::new(profile_id, &curriculum.id, chapter_id, levels);

        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, s| {
            !(s.profile_id == profile_id
                && s.curriculum_id == curriculum.id
                && s.chapter_id == chapter_id)
        });
        sessions.insert(session.id.clone(), session.clone());

        log::info!(
            "Session '{}' opened on chapter {} of curriculum '{}'",
            session.id,
            chapter_id,
            curriculum.id
        );
        Ok(session)
    }

    pub async fn get_session(&self, session_id: &str, profile_id: &str) -> AppResult<PlaySession> {
        let sessions = self.sessions.read().await;
        let session = sessions.get(session_id).ok_or_else(|| {
            AppError::NotFound(format!("Session with id '{}' not found", session_id))
        })?;
        require_session_owner(session, profile_id)?;
        Ok(session.clone())
    }

    /// On a correct answer the solved level rides along so the caller can
    /// reveal its reward fields.
    pub async fn submit_answer(
        &self,
        session_id: &str,
        profile_id: &str,
        answer: &str,
    ) -> AppResult<(AnswerOutcome, Option<GameLevel>)> {
        let mut sessions = self.sessions.write().await;
        let session = require_owned(&mut sessions, session_id, profile_id)?;

        let outcome = session.submit_answer(answer)?;
        let solved_level = match outcome {
            AnswerOutcome::Correct => session.current_level().cloned(),
            AnswerOutcome::Incorrect => None,
        };
        Ok((outcome, solved_level))
    }

    pub async fn reveal_hint(
        &self,
        session_id: &str,
        profile_id: &str,
    ) -> AppResult<(String, usize)> {
        let mut sessions = self.sessions.write().await;
        let session = require_owned(&mut sessions, session_id, profile_id)?;

        let hint = session.reveal_hint()?;
        Ok((hint, session.hints_remaining()))
    }

    /// Moves to the next level, or consumes the session when the last level
    /// was solved.
    pub async fn advance(&self, session_id: &str, profile_id: &str) -> AppResult<AdvanceOutcome> {
        let mut sessions = self.sessions.write().await;
        let session = require_owned(&mut sessions, session_id, profile_id)?;

        if session.advance()? {
            let finished = sessions
                .remove(session_id)
                .ok_or_else(|| AppError::InternalError("finished session vanished".to_string()))?;
            log::info!(
                "Session '{}' finished chapter {} of curriculum '{}'",
                finished.id,
                finished.chapter_id,
                finished.curriculum_id
            );
            return Ok(AdvanceOutcome::Finished {
                curriculum_id: finished.curriculum_id,
                chapter_id: finished.chapter_id,
            });
        }

        Ok(AdvanceOutcome::Continued(session.clone()))
    }

    /// Back to the map: the run is simply dropped.
    pub async fn abandon(&self, session_id: &str, profile_id: &str) -> AppResult<()> {
        let mut sessions = self.sessions.write().await;
        require_owned(&mut sessions, session_id, profile_id)?;
        sessions.remove(session_id);
        Ok(())
    }
}

fn require_session_owner(session: &PlaySession, profile_id: &str) -> AppResult<()> {
    if session.profile_id != profile_id {
        return Err(AppError::Forbidden(
            "You can only play your own sessions".to_string(),
        ));
    }
    Ok(())
}

fn require_owned<'a>(
    sessions: &'a mut HashMap<String, PlaySession>,
    session_id: &str,
    profile_id: &str,
) -> AppResult<&'a mut PlaySession> {
    let session = sessions.get_mut(session_id).ok_or_else(|| {
        AppError::NotFound(format!("Session with id '{}' not found", session_id))
    })?;
    require_session_owner(session, profile_id)?;
    Ok(session)
}
