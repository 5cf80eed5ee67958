use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::domain::UserProfile,
    repositories::ProfileRepository,
};

pub struct ProfileService {
    repository: Arc<dyn ProfileRepository>,
}

impl ProfileService {
    pub fn new(repository: Arc<dyn ProfileRepository>) -> Self {
        Self { repository }
    }

    /// Name-based login: an unknown display name registers a new profile,
    /// a known one resumes it.
    pub async fn login(&self, display_name: &str) -> AppResult<UserProfile> {
        let display_name = display_name.trim();
        if display_name.is_empty() {
            return Err(AppError::ValidationError(
                "Display name cannot be empty".to_string(),
            ));
        }

        if let Some(existing) = self.repository.find_by_display_name(display_name).await? {
            log::info!("Profile '{}' resumed", existing.id);
            return Ok(existing);
        }

        let profile = self.repository.create(UserProfile::new(display_name)).await?;
        log::info!("Profile '{}' registered", profile.id);
        Ok(profile)
    }

    /// Throwaway profile for demo mode.
    pub async fn create_guest(&self) -> AppResult<UserProfile> {
        let profile = self.repository.create(UserProfile::new_guest()).await?;
        log::info!("Guest profile '{}' created", profile.id);
        Ok(profile)
    }

    pub async fn get_profile(&self, id: &str) -> AppResult<UserProfile> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Profile with id '{}' not found", id)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repositories::profile_repository::MockProfileRepository;

    #[actix_rt::test]
    async fn test_login_registers_unknown_name() {
        let mut repository = MockProfileRepository::new();
        repository
            .expect_find_by_display_name()
            .withf(|name| name == "Dana")
            .returning(|_| Ok(None));
        repository
            .expect_create()
            .withf(|profile| profile.display_name == "Dana" && !profile.guest)
            .returning(|profile| Ok(profile));

        let service = ProfileService::new(Arc::new(repository));
        let profile = service.login("  Dana  ").await.unwrap();

        assert_eq!(profile.display_name, "Dana");
    }

    #[actix_rt::test]
    async fn test_login_resumes_existing_profile() {
        let existing = UserProfile::new("Dana");
        let existing_id = existing.id.clone();

        let mut repository = MockProfileRepository::new();
        repository
            .expect_find_by_display_name()
            .returning(move |_| Ok(Some(existing.clone())));
        repository.expect_create().never();

        let service = ProfileService::new(Arc::new(repository));
        let profile = service.login("Dana").await.unwrap();

        assert_eq!(profile.id, existing_id);
    }

    #[actix_rt::test]
    async fn test_login_rejects_blank_name() {
        let repository = MockProfileRepository::new();
        let service = ProfileService::new(Arc::new(repository));

        let result = service.login("   ").await;
        assert!(matches!(result, Err(AppError::ValidationError(_))));
    }

    #[actix_rt::test]
    async fn test_get_profile_not_found() {
        let mut repository = MockProfileRepository::new();
        repository.expect_find_by_id().returning(|_| Ok(None));

        let service = ProfileService::new(Arc::new(repository));
        let result = service.get_profile("missing").await;

        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[actix_rt::test]
    async fn test_create_guest_is_flagged() {
        let mut repository = MockProfileRepository::new();
        repository
            .expect_create()
            .withf(|profile| profile.guest)
            .returning(|profile| Ok(profile));

        let service = ProfileService::new(Arc::new(repository));
        let profile = service.create_guest().await.unwrap();

        assert!(profile.guest);
    }
}
