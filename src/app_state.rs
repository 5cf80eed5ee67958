use std::sync::Arc;

use crate::{
    auth::JwtService,
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{
        CurriculumRepository, MongoCurriculumRepository, MongoProfileRepository, ProfileRepository,
    },
    services::{CurriculumService, ModelService, ProfileService, SessionService},
};

#[derive(Clone)]
pub struct AppState {
    pub profile_service: Arc<ProfileService>,
    pub curriculum_service: Arc<CurriculumService>,
    pub session_service: Arc<SessionService>,
    pub jwt_service: Arc<JwtService>,
    pub db: Database,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let profile_repository = Arc::new(MongoProfileRepository::new(
            &db,
            &config.profiles_collection,
        ));
        profile_repository.ensure_indexes().await?;
        let profile_service = Arc::new(ProfileService::new(profile_repository));

        let curriculum_repository = Arc::new(MongoCurriculumRepository::new(
            &db,
            &config.curriculums_collection,
        ));
        curriculum_repository.ensure_indexes().await?;

        let model_service = Arc::new(ModelService::from_config(&config));
        let curriculum_service = Arc::new(CurriculumService::new(
            curriculum_repository,
            model_service.clone(),
        ));
        let session_service = Arc::new(SessionService::new(model_service));

        let jwt_service = Arc::new(JwtService::new(
            &config.jwt_secret,
            config.jwt_expiration_hours,
            config.refresh_expiration_hours,
        ));

        Ok(Self {
            profile_service,
            curriculum_service,
            session_service,
            jwt_service,
            db,
            config: Arc::new(config),
        })
    }
}
