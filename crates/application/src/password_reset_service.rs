//! Rate-limited password reset requests.

use std::sync::Arc;

use async_trait::async_trait;

use fintrack_core::AppResult;
use fintrack_domain::EmailAddress;

use crate::rate_limit_service::{RateLimitRule, RateLimitService};

/// Port for sending emails. Infrastructure provides the console implementation.
#[async_trait]
pub trait EmailService: Send + Sync {
    /// Sends a plain-text or HTML email.
    async fn send_email(
        &self,
        to: &str,
        subject: &str,
        text_body: &str,
        html_body: Option<&str>,
    ) -> AppResult<()>;
}

/// Application service for the forgot-password flow.
#[derive(Clone)]
pub struct PasswordResetService {
    rate_limit_service: RateLimitService,
    rule: RateLimitRule,
    email_service: Arc<dyn EmailService>,
    frontend_url: String,
}

impl PasswordResetService {
    /// Creates a new password reset service.
    #[must_use]
    pub fn new(
        rate_limit_service: RateLimitService,
        rule: RateLimitRule,
        email_service: Arc<dyn EmailService>,
        frontend_url: String,
    ) -> Self {
        Self {
            rate_limit_service,
            rule,
            email_service,
            frontend_url,
        }
    }

    /// Sends a reset email to `email` unless the address is rate limited.
    ///
    /// The outcome is the same whether or not an account exists for the
    /// address. Denials surface as [`fintrack_core::AppError::RateLimited`].
    pub async fn request_password_reset(&self, email: &str) -> AppResult<()> {
        let email = EmailAddress::new(email)?;

        self.rate_limit_service
            .check_and_record(&self.rule, email.as_str())
            .await
            .into_result()?;

        let reset_url = format!("{}/reset-password", self.frontend_url.trim_end_matches('/'));
        let subject = "Reset your Fintrack password";
        let text_body = format!(
            "We received a request to reset the password for this address.\n\n\
             If you have an account, open the link below to choose a new password:\n{reset_url}\n\n\
             If you did not request this, you can safely ignore this email."
        );

        self.email_service
            .send_email(email.as_str(), subject, &text_body, None)
            .await?;

        tracing::info!("password reset email dispatched");
        Ok(())
    }
}
