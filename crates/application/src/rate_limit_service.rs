//! Fixed-window rate limiting ports and application service.
//!
//! Attempts are counted per `(subject, scope)` inside wall-clock aligned
//! windows. Only admitted attempts are recorded, so a caller hammering a
//! denied action does not extend its own lockout.

mod config;
mod ports;
mod service;

pub use config::{
    DEFAULT_PASSWORD_RESET_MAX_ATTEMPTS, DEFAULT_PASSWORD_RESET_WINDOW_SECONDS, RateLimitRule,
};
pub use ports::RateLimitRepository;
pub use service::{RateLimitDecision, RateLimitService};
