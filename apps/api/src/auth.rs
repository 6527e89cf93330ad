mod password;
mod session;

pub use password::forgot_password_handler;
pub use session::{logout_handler, me_handler, open_session_handler};

pub const SESSION_USER_KEY: &str = "user_identity";
/// Absolute session creation timestamp.
pub const SESSION_CREATED_AT_KEY: &str = "session_created_at";
