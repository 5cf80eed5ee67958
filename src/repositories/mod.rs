pub mod curriculum_repository;
pub mod profile_repository;

pub use curriculum_repository::{CurriculumRepository, MongoCurriculumRepository};
pub use profile_repository::{MongoProfileRepository, ProfileRepository};
