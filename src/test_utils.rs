#[cfg(test)]
pub mod fixtures {
    use crate::models::domain::{Chapter, Curriculum, GameLevel, UserProfile};

    /// Creates a standard test profile
    pub fn test_profile() -> UserProfile {
        UserProfile::test_profile("Test Player")
    }

    /// Creates a three-chapter curriculum owned by the given profile
    pub fn test_curriculum(owner_id: &str) -> Curriculum {
        Curriculum::new(
            owner_id,
            "Cell Biology",
            vec![
                Chapter::test_chapter("The Cell Membrane"),
                Chapter::test_chapter("Organelles at Work"),
                Chapter::test_chapter("Division and Renewal"),
            ],
            None,
            false,
        )
    }

    /// Creates a full five-level set for play-session tests
    pub fn test_levels() -> Vec<GameLevel> {
        (1..=5)
            .map(|id| GameLevel::test_level(id, &format!("Answer {}", id)))
            .collect()
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::models::domain::ChapterStatus;

    #[test]
    fn test_fixtures_test_profile() {
        let profile = test_profile();
        assert_eq!(profile.display_name, "Test Player");
        assert!(!profile.guest);
    }

    #[test]
    fn test_fixtures_test_curriculum() {
        let curriculum = test_curriculum("profile-1");
        assert_eq!(curriculum.chapters.len(), 3);
        assert_eq!(curriculum.chapters[0].status, ChapterStatus::Available);
        assert_eq!(curriculum.chapters[1].status, ChapterStatus::Locked);
    }

    #[test]
    fn test_fixtures_test_levels() {
        let levels = test_levels();
        assert_eq!(levels.len(), 5);
        assert_eq!(levels[0].correct_answer, "Answer 1");
        assert_eq!(levels[4].id, 5);
    }
}
