use std::sync::Arc;

use fintrack_application::EmailService;
use fintrack_infrastructure::ConsoleEmailService;

use crate::api_config::{ApiConfig, EmailProviderConfig};

pub(super) fn build_email_service(config: &ApiConfig) -> Arc<dyn EmailService> {
    match config.email_provider {
        EmailProviderConfig::Console => Arc::new(ConsoleEmailService::new()),
    }
}
