use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;

use fintrack_application::{
    DEFAULT_PASSWORD_RESET_MAX_ATTEMPTS, DEFAULT_PASSWORD_RESET_WINDOW_SECONDS,
};
use fintrack_core::AppError;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmailProviderConfig {
    Console,
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub database_url: String,
    pub frontend_url: String,
    pub bootstrap_token: String,
    pub _session_secret: String,
    pub api_host: String,
    pub api_port: u16,
    pub cookie_secure: bool,
    pub password_reset_max_attempts: i64,
    pub password_reset_window_seconds: i64,
    pub email_provider: EmailProviderConfig,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let migrate_only = env::args().nth(1).as_deref() == Some("migrate");

        let database_url = required_env("DATABASE_URL")?;
        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());
        let bootstrap_token = required_non_empty_env("AUTH_BOOTSTRAP_TOKEN")?;
        let session_secret = required_env("SESSION_SECRET")?;
        if session_secret.len() < 32 {
            return Err(AppError::Validation(
                "SESSION_SECRET must be at least 32 characters".to_owned(),
            ));
        }

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3001);

        let cookie_secure = env::var("SESSION_COOKIE_SECURE")
            .unwrap_or_else(|_| "false".to_owned())
            .eq_ignore_ascii_case("true");

        let password_reset_max_attempts = optional_i64_env(
            "PASSWORD_RESET_MAX_ATTEMPTS",
            DEFAULT_PASSWORD_RESET_MAX_ATTEMPTS,
        )?;
        let password_reset_window_seconds = optional_i64_env(
            "PASSWORD_RESET_WINDOW_SECONDS",
            DEFAULT_PASSWORD_RESET_WINDOW_SECONDS,
        )?;

        let email_provider = match env::var("EMAIL_PROVIDER")
            .unwrap_or_else(|_| "console".to_owned())
            .as_str()
        {
            "console" => EmailProviderConfig::Console,
            other => {
                return Err(AppError::Validation(format!(
                    "EMAIL_PROVIDER must be 'console', got '{other}'"
                )));
            }
        };

        Ok(Self {
            migrate_only,
            database_url,
            frontend_url,
            bootstrap_token,
            _session_secret: session_secret,
            api_host,
            api_port,
            cookie_secure,
            password_reset_max_attempts,
            password_reset_window_seconds,
            email_provider,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}

fn required_non_empty_env(name: &str) -> Result<String, AppError> {
    let value = required_env(name)?;
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{name} must not be empty")));
    }

    Ok(value)
}

fn optional_i64_env(name: &str, default: i64) -> Result<i64, AppError> {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => parse_i64_setting(name, value.as_str()),
        _ => Ok(default),
    }
}

fn parse_i64_setting(name: &str, value: &str) -> Result<i64, AppError> {
    value
        .trim()
        .parse::<i64>()
        .map_err(|error| AppError::Validation(format!("invalid {name}: {error}")))
}

#[cfg(test)]
mod tests {
    use super::parse_i64_setting;

    #[test]
    fn integer_settings_accept_surrounding_whitespace() {
        let value = parse_i64_setting("PASSWORD_RESET_MAX_ATTEMPTS", " 5 ");
        assert_eq!(value.unwrap_or_else(|_| unreachable!()), 5);
    }

    #[test]
    fn integer_settings_reject_garbage() {
        let result = parse_i64_setting("PASSWORD_RESET_WINDOW_SECONDS", "half an hour");
        assert!(result.is_err());
    }
}
