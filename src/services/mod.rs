pub mod curriculum_service;
pub mod model_service;
pub mod profile_service;
pub mod session_service;

pub use curriculum_service::CurriculumService;
pub use model_service::ModelService;
pub use profile_service::ProfileService;
pub use session_service::{AdvanceOutcome, SessionService};
