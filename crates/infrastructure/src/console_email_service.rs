//! Console email sender for development. Writes messages to tracing output.

use async_trait::async_trait;
use fintrack_application::EmailService;
use fintrack_core::AppResult;
use tracing::info;

/// Email sender that logs messages instead of delivering them.
#[derive(Clone, Default)]
pub struct ConsoleEmailService;

impl ConsoleEmailService {
    /// Creates a new console email sender.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EmailService for ConsoleEmailService {
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        text_body: &str,
        html_body: Option<&str>,
    ) -> AppResult<()> {
        info!(
            to,
            subject,
            has_html = html_body.is_some(),
            "--- EMAIL (console) ---\n{text_body}\n--- END EMAIL ---"
        );

        Ok(())
    }
}
