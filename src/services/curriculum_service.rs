use std::sync::Arc;

use crate::{
    constants::demo::{demo_chapters, DEMO_TOPIC},
    errors::{AppError, AppResult},
    models::{
        domain::Curriculum,
        dto::{generated::GeneratedCurriculum, request::CreateCurriculumRequest},
    },
    repositories::CurriculumRepository,
    services::model_service::ModelService,
};

/// Topic used when the upload carries no usable name.
const DEFAULT_TOPIC: &str = "Untitled lesson";

pub struct CurriculumService {
    repository: Arc<dyn CurriculumRepository>,
    model_service: Arc<ModelService>,
}

impl CurriculumService {
    pub fn new(repository: Arc<dyn CurriculumRepository>, model_service: Arc<ModelService>) -> Self {
        Self {
            repository,
            model_service,
        }
    }

    pub async fn create_curriculum(
        &self,
        owner_id: &str,
        request: CreateCurriculumRequest,
    ) -> AppResult<Curriculum> {
        if !request.has_material() {
            return Err(AppError::BadRequest(
                "Provide source text or an attachment to generate a curriculum".to_string(),
            ));
        }

        let requested_topic = requested_topic(request.topic.as_deref());
        let source_text = request.source_text.unwrap_or_default();

        let generated = self
            .model_service
            .generate_curriculum(&requested_topic, &source_text, request.attachment.as_ref())
            .await?;

        let curriculum = Self::assemble(owner_id, &requested_topic, generated);
        self.repository.create(curriculum).await
    }

    /// Built-in sample content, playable without a model key.
    pub async fn create_demo_curriculum(&self, owner_id: &str) -> AppResult<Curriculum> {
        let curriculum = Curriculum::new(owner_id, DEMO_TOPIC, demo_chapters(), None, true);
        self.repository.create(curriculum).await
    }

    pub async fn get_curriculum(&self, id: &str, requester_id: &str) -> AppResult<Curriculum> {
        let curriculum = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Curriculum with id '{}' not found", id)))?;

        if curriculum.owner_id != requester_id {
            return Err(AppError::Forbidden(
                "You can only access your own curriculums".to_string(),
            ));
        }

        Ok(curriculum)
    }

    pub async fn list_curriculums(
        &self,
        owner_id: &str,
        offset: i64,
        limit: i64,
    ) -> AppResult<(Vec<Curriculum>, i64)> {
        self.repository.list_by_owner(owner_id, offset, limit).await
    }

    /// Marks the chapter completed, unlocks the next one and persists the
    /// new unlock state.
    pub async fn complete_chapter(
        &self,
        curriculum_id: &str,
        requester_id: &str,
        chapter_id: i32,
    ) -> AppResult<Curriculum> {
        let mut curriculum = self.get_curriculum(curriculum_id, requester_id).await?;

        if !curriculum.complete_chapter(chapter_id) {
            return Err(AppError::NotFound(format!(
                "Chapter {} not found in curriculum '{}'",
                chapter_id, curriculum_id
            )));
        }

        self.repository.update(curriculum).await
    }

    fn assemble(
        owner_id: &str,
        requested_topic: &str,
        generated: GeneratedCurriculum,
    ) -> Curriculum {
        let topic = if generated.topic.trim().is_empty() {
            requested_topic.to_string()
        } else {
            generated.topic.clone()
        };

        Curriculum::new(owner_id, &topic, generated.into_chapters(), None, false)
    }
}

fn requested_topic(topic: Option<&str>) -> String {
    match topic.map(str::trim) {
        Some(t) if !t.is_empty() => t.to_string(),
        _ => DEFAULT_TOPIC.to_string(),
    }
}
