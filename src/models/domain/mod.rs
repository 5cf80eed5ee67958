pub mod curriculum;
pub mod game_level;
pub mod play_session;
pub mod profile;

pub use curriculum::{Chapter, ChapterStatus, Curriculum, SourceRef};
pub use game_level::GameLevel;
pub use play_session::{AnswerOutcome, PlaySession, HINT_LIMIT};
pub use profile::UserProfile;
