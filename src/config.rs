use std::env;
use secrecy::SecretString;

use crate::errors::{AppError, AppResult};

const DEFAULT_LLM_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/openai";
const DEFAULT_LLM_MODEL: &str = "gemini-1.5-flash-latest";
const DEFAULT_IDENTITY_BASE_URL: &str = "https://identitytoolkit.googleapis.com/v1";
const DEFAULT_JWT_SECRET: &str = "dev_secret_key_change_in_production";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

#[derive(Clone, Debug)]
pub struct Config {
    pub app_env: String,
    pub llm_api_key: SecretString,
    pub llm_api_base: String,
    pub llm_model: String,
    pub identity_api_key: SecretString,
    pub identity_base_url: String,
    pub web_server_host: String,
    pub web_server_port: u16,
    pub jwt_secret: SecretString,
    pub jwt_expiration_hours: i64,
    pub max_upload_bytes: usize,
    pub cors_allowed_origin: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            app_env: env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
            llm_api_key: SecretString::from(
                env::var("LLM_API_KEY")
                    .or_else(|_| env::var("GEMINI_API_KEY"))
                    .unwrap_or_else(|_| "llm_api_key".to_string()),
            ),
            llm_api_base: env::var("LLM_API_BASE")
                .unwrap_or_else(|_| DEFAULT_LLM_API_BASE.to_string()),
            llm_model: env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_LLM_MODEL.to_string()),
            identity_api_key: SecretString::from(
                env::var("IDENTITY_API_KEY").unwrap_or_else(|_| "identity_api_key".to_string()),
            ),
            identity_base_url: env::var("IDENTITY_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_IDENTITY_BASE_URL.to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            jwt_secret: SecretString::from(
                env::var("JWT_SECRET").unwrap_or_else(|_| DEFAULT_JWT_SECRET.to_string()),
            ),
            jwt_expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                .ok()
                .and_then(|h| h.parse().ok())
                .unwrap_or(24),
            max_upload_bytes: env::var("MAX_UPLOAD_BYTES")
                .ok()
                .and_then(|b| b.parse().ok())
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            cors_allowed_origin: env::var("CORS_ALLOWED_ORIGIN")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
        }
    }

    pub fn is_production(&self) -> bool {
        self.app_env.eq_ignore_ascii_case("production")
    }

    /// Rejects default or weak secrets before serving real traffic.
    pub fn validate_for_production(&self) -> AppResult<()> {
        use secrecy::ExposeSecret;

        let jwt_secret = self.jwt_secret.expose_secret();

        if jwt_secret == DEFAULT_JWT_SECRET {
            return Err(AppError::InternalError(
                "JWT_SECRET is using its default value".to_string(),
            ));
        }

        if jwt_secret.len() < 32 {
            return Err(AppError::InternalError(format!(
                "JWT_SECRET is too short ({}), at least 32 characters are required",
                jwt_secret.len()
            )));
        }

        if self.llm_api_key.expose_secret() == "llm_api_key" {
            return Err(AppError::InternalError(
                "LLM_API_KEY (or GEMINI_API_KEY) is not set".to_string(),
            ));
        }

        if self.identity_api_key.expose_secret() == "identity_api_key" {
            return Err(AppError::InternalError(
                "IDENTITY_API_KEY is not set".to_string(),
            ));
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            app_env: "test".to_string(),
            llm_api_key: SecretString::from("test_llm_key".to_string()),
            llm_api_base: "http://127.0.0.1:9/v1".to_string(),
            llm_model: "test-model".to_string(),
            identity_api_key: SecretString::from("test_identity_key".to_string()),
            identity_base_url: "http://127.0.0.1:9/v1".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
            jwt_secret: SecretString::from("test_jwt_secret_key".to_string()),
            jwt_expiration_hours: 1,
            max_upload_bytes: 1024 * 1024,
            cors_allowed_origin: "http://localhost:3000".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env_with_defaults() {
        let config = Config::from_env();

        assert!(!config.llm_api_base.is_empty());
        assert!(!config.llm_model.is_empty());
        assert!(config.max_upload_bytes > 0);
    }

    #[test]
    fn test_test_config() {
        let config = Config::test_config();

        assert_eq!(config.llm_model, "test-model");
        assert_eq!(config.jwt_expiration_hours, 1);
        assert!(!config.is_production());
    }

    #[test]
    fn test_validate_for_production_rejects_short_secret() {
        let config = Config::test_config();
        let result = config.validate_for_production();

        assert!(matches!(result, Err(AppError::InternalError(msg)) if msg.contains("too short")));
    }

    #[test]
    fn test_validate_for_production_accepts_strong_secrets() {
        let mut config = Config::test_config();
        config.jwt_secret =
            SecretString::from("a-very-long-production-secret-value-1234".to_string());

        assert!(config.validate_for_production().is_ok());
    }
}
