use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use secrecy::SecretString;
use tokio::sync::RwLock;

use eduescape_server::{
    config::Config,
    errors::{AppError, AppResult},
    models::{
        domain::{AnswerOutcome, ChapterStatus, Curriculum, PlaySession},
        dto::request::StartSessionRequest,
    },
    repositories::CurriculumRepository,
    services::{AdvanceOutcome, CurriculumService, ModelService, SessionService},
};

struct InMemoryCurriculumRepository {
    curriculums: Arc<RwLock<HashMap<String, Curriculum>>>,
}

impl InMemoryCurriculumRepository {
    fn new() -> Self {
        Self {
            curriculums: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl CurriculumRepository for InMemoryCurriculumRepository {
    async fn create(&self, curriculum: Curriculum) -> AppResult<Curriculum> {
        let mut curriculums = self.curriculums.write().await;
        curriculums.insert(curriculum.id.clone(), curriculum.clone());
        Ok(curriculum)
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Curriculum>> {
        let curriculums = self.curriculums.read().await;
        Ok(curriculums.get(id).cloned())
    }

    async fn list_by_owner(
        &self,
        owner_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Curriculum>, i64)> {
        let curriculums = self.curriculums.read().await;
        let items: Vec<_> = curriculums
            .values()
            .filter(|c| c.owner_id == owner_id)
            .cloned()
            .collect();

        let total = items.len() as i64;
        let start = offset.max(0) as usize;
        let page = items.into_iter().skip(start).take(limit.max(0) as usize);

        Ok((page.collect(), total))
    }

    async fn update(&self, curriculum: Curriculum) -> AppResult<Curriculum> {
        let mut curriculums = self.curriculums.write().await;
        if !curriculums.contains_key(&curriculum.id) {
            return Err(AppError::NotFound(format!(
                "Curriculum with id '{}' not found",
                curriculum.id
            )));
        }
        curriculums.insert(curriculum.id.clone(), curriculum.clone());
        Ok(curriculum)
    }

    async fn ensure_indexes(&self) -> AppResult<()> {
        Ok(())
    }
}

fn offline_config() -> Config {
    Config {
        mongo_conn_string: "mongodb://localhost:27017".to_string(),
        mongo_db_name: "eduescape-test".to_string(),
        curriculums_collection: "curriculums".to_string(),
        profiles_collection: "profiles".to_string(),
        web_server_host: "127.0.0.1".to_string(),
        web_server_port: 8080,
        cors_allowed_origin: "http://localhost:5173".to_string(),
        jwt_secret: SecretString::from("test_jwt_secret_key".to_string()),
        jwt_expiration_hours: 1,
        refresh_expiration_hours: 24,
        model_api_key: SecretString::from("test_model_key".to_string()),
        model_api_base: None,
        model_name: "gpt-4o-mini".to_string(),
    }
}

struct TestHarness {
    curriculum_service: CurriculumService,
    session_service: SessionService,
}

fn harness() -> TestHarness {
    let model_service = Arc::new(ModelService::from_config(&offline_config()));
    let repository = Arc::new(InMemoryCurriculumRepository::new());

    TestHarness {
        curriculum_service: CurriculumService::new(repository, model_service.clone()),
        session_service: SessionService::new(model_service),
    }
}

fn blank_request() -> StartSessionRequest {
    StartSessionRequest {
        source_text: None,
        attachment: None,
    }
}

/// Answers every level of an open session correctly and advances past it,
/// returning the finished outcome of the final advance.
async fn play_through(
    harness: &TestHarness,
    session: &PlaySession,
    profile_id: &str,
) -> AdvanceOutcome {
    let answers: Vec<String> = session
        .levels
        .iter()
        .map(|l| l.correct_answer.clone())
        .collect();

    let mut last = None;
    for answer in &answers {
        let (outcome, _) = harness
            .session_service
            .submit_answer(&session.id, profile_id, answer)
            .await
            .expect("answer should be accepted");
        assert_eq!(outcome, AnswerOutcome::Correct);

        last = Some(
            harness
                .session_service
                .advance(&session.id, profile_id)
                .await
                .expect("advance should work"),
        );
    }

    last.expect("session had no levels")
}

#[tokio::test]
async fn demo_chapter_play_through_unlocks_the_next_chapter() {
    let harness = harness();

    let curriculum = harness
        .curriculum_service
        .create_demo_curriculum("player-1")
        .await
        .expect("demo curriculum");
    assert!(curriculum.demo);
    assert_eq!(curriculum.chapters[0].status, ChapterStatus::Available);

    let session = harness
        .session_service
        .start_session("player-1", &curriculum, 1, blank_request())
        .await
        .expect("start session");
    assert_eq!(session.levels.len(), 5);

    let outcome = play_through(&harness, &session, "player-1").await;
    let (curriculum_id, chapter_id) = match outcome {
        AdvanceOutcome::Finished {
            curriculum_id,
            chapter_id,
        } => (curriculum_id, chapter_id),
        AdvanceOutcome::Continued(_) => panic!("expected the chapter run to finish"),
    };

    let updated = harness
        .curriculum_service
        .complete_chapter(&curriculum_id, "player-1", chapter_id)
        .await
        .expect("complete chapter");

    assert_eq!(updated.chapters[0].status, ChapterStatus::Completed);
    assert_eq!(updated.chapters[1].status, ChapterStatus::Available);
    assert_eq!(updated.chapters[2].status, ChapterStatus::Locked);
}

#[tokio::test]
async fn finishing_every_chapter_finishes_the_curriculum() {
    let harness = harness();

    let mut curriculum = harness
        .curriculum_service
        .create_demo_curriculum("player-1")
        .await
        .expect("demo curriculum");

    let chapter_count = curriculum.chapters.len() as i32;
    for chapter_id in 1..=chapter_count {
        let session = harness
            .session_service
            .start_session("player-1", &curriculum, chapter_id, blank_request())
            .await
            .expect("start session");

        match play_through(&harness, &session, "player-1").await {
            AdvanceOutcome::Finished { .. } => {}
            AdvanceOutcome::Continued(_) => panic!("chapter {} did not finish", chapter_id),
        }

        curriculum = harness
            .curriculum_service
            .complete_chapter(&curriculum.id, "player-1", chapter_id)
            .await
            .expect("complete chapter");
    }

    assert!(curriculum.is_finished());
}

#[tokio::test]
async fn locked_chapters_cannot_be_started() {
    let harness = harness();

    let curriculum = harness
        .curriculum_service
        .create_demo_curriculum("player-1")
        .await
        .expect("demo curriculum");

    let locked = harness
        .session_service
        .start_session("player-1", &curriculum, 2, blank_request())
        .await;
    assert!(matches!(locked, Err(AppError::Forbidden(_))));
}

#[tokio::test]
async fn curriculums_are_private_to_their_owner() {
    let harness = harness();

    let curriculum = harness
        .curriculum_service
        .create_demo_curriculum("player-1")
        .await
        .expect("demo curriculum");

    let foreign = harness
        .curriculum_service
        .get_curriculum(&curriculum.id, "player-2")
        .await;
    assert!(matches!(foreign, Err(AppError::Forbidden(_))));

    let own = harness
        .curriculum_service
        .get_curriculum(&curriculum.id, "player-1")
        .await;
    assert!(own.is_ok());
}

#[tokio::test]
async fn wrong_answers_and_hints_do_not_end_the_run() {
    let harness = harness();

    let curriculum = harness
        .curriculum_service
        .create_demo_curriculum("player-1")
        .await
        .expect("demo curriculum");

    let session = harness
        .session_service
        .start_session("player-1", &curriculum, 1, blank_request())
        .await
        .expect("start session");

    let level = &session.levels[0];
    let wrong = level
        .options
        .iter()
        .find(|o| **o != level.correct_answer)
        .cloned()
        .expect("demo level should have a wrong option");

    let (outcome, reward) = harness
        .session_service
        .submit_answer(&session.id, "player-1", &wrong)
        .await
        .expect("wrong answer is not an error");
    assert_eq!(outcome, AnswerOutcome::Incorrect);
    assert!(reward.is_none());

    for _ in 0..level.hints.len() {
        harness
            .session_service
            .reveal_hint(&session.id, "player-1")
            .await
            .expect("hint should be available");
    }
    let exhausted = harness
        .session_service
        .reveal_hint(&session.id, "player-1")
        .await;
    assert!(matches!(exhausted, Err(AppError::BadRequest(_))));

    let (outcome, reward) = harness
        .session_service
        .submit_answer(&session.id, "player-1", &level.correct_answer)
        .await
        .expect("correct answer");
    assert_eq!(outcome, AnswerOutcome::Correct);
    assert!(reward.is_some());

    let advancing_twice = harness
        .session_service
        .advance(&session.id, "player-1")
        .await
        .expect("advance to level two");
    match advancing_twice {
        AdvanceOutcome::Continued(next) => assert_eq!(next.current_index, 1),
        AdvanceOutcome::Finished { .. } => panic!("first level should not finish the run"),
    }

    let unsolved_advance = harness
        .session_service
        .advance(&session.id, "player-1")
        .await;
    assert!(matches!(unsolved_advance, Err(AppError::BadRequest(_))));
}
