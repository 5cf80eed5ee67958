pub mod auth_handler;
pub mod curriculum_handler;
pub mod profile_handler;
pub mod session_handler;

pub use auth_handler::{guest_login, login, refresh_token};
pub use curriculum_handler::{
    create_curriculum, create_demo_curriculum, get_curriculum, list_curriculums,
};
pub use profile_handler::{get_me, health_check, health_check_live, health_check_ready};
pub use session_handler::{
    abandon_session, advance_session, get_session, reveal_hint, start_session, submit_answer,
};
