use actix_web::{http::StatusCode, HttpResponse, ResponseError};
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Model provider error: {0}")]
    ProviderError(String),

    #[error("{0}")]
    EmptyOutput(String),

    #[error("Malformed model output: {0}")]
    MalformedOutput(String),

    #[error("Internal server error: {0}")]
    InternalError(String),
}

impl AppError {
    fn error_code(&self) -> &'static str {
        match self {
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::Unauthorized(_) => "UNAUTHORIZED",
            AppError::ProviderError(_) => "PROVIDER_ERROR",
            AppError::EmptyOutput(_) => "EMPTY_OUTPUT",
            AppError::MalformedOutput(_) => "MALFORMED_OUTPUT",
            AppError::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Message safe to show to a student. Provider and internal details stay in the logs.
    pub fn public_message(&self) -> String {
        match self {
            AppError::ValidationError(msg) | AppError::NotFound(msg) => msg.clone(),
            AppError::Unauthorized(_) => "Authentication required.".to_string(),
            AppError::EmptyOutput(msg) => msg.clone(),
            AppError::ProviderError(_) => {
                "The AI service is unavailable right now. Please try again.".to_string()
            }
            AppError::MalformedOutput(_) => "The AI model returned an invalid response.".to_string(),
            AppError::InternalError(_) => "An unexpected error occurred.".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: &'static str,
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::ProviderError(_)
            | AppError::EmptyOutput(_)
            | AppError::MalformedOutput(_) => StatusCode::BAD_GATEWAY,
            AppError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorResponse {
            error: self.public_message(),
            code: self.error_code(),
        })
    }
}

impl AppError {
    /// Reports the first failing field, checking `field_order` first and then the
    /// remaining fields alphabetically.
    pub fn from_validation(errors: &validator::ValidationErrors, field_order: &[&str]) -> Self {
        let field_errors = errors.field_errors();

        let mut remaining: Vec<&str> = field_errors
            .keys()
            .map(|key| &**key)
            .filter(|key| !field_order.contains(key))
            .collect();
        remaining.sort_unstable();

        let message = field_order
            .iter()
            .copied()
            .chain(remaining)
            .filter_map(|field| field_errors.get(field))
            .flat_map(|errs| errs.iter())
            .find_map(|err| err.message.as_ref().map(|m| m.to_string()));

        AppError::ValidationError(message.unwrap_or_else(|| errors.to_string()))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::from_validation(&err, &[])
    }
}
impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::MalformedOutput(format!("JSON error: {}", err))
    }
}
impl From<async_openai::error::OpenAIError> for AppError {
    fn from(err: async_openai::error::OpenAIError) -> Self {
        AppError::ProviderError(err.to_string())
    }
}
impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::ProviderError(format!("HTTP error: {}", err))
    }
}
impl From<actix_multipart::MultipartError> for AppError {
    fn from(err: actix_multipart::MultipartError) -> Self {
        AppError::ValidationError(format!("Invalid form submission: {}", err))
    }
}

pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(
            AppError::NotFound("test".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::ValidationError("test".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::EmptyOutput("test".into()).status_code(),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            AppError::InternalError("test".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_error_messages() {
        let err = AppError::NotFound("subject".into());
        assert_eq!(err.to_string(), "Not found: subject");
    }

    #[test]
    fn test_public_message_hides_provider_details() {
        let err = AppError::ProviderError("quota exceeded for key AIza...".into());
        assert!(!err.public_message().contains("AIza"));

        let err = AppError::EmptyOutput("Failed to generate quiz. The AI model returned no output.".into());
        assert_eq!(
            err.public_message(),
            "Failed to generate quiz. The AI model returned no output."
        );
    }

    #[test]
    fn test_from_validation_respects_field_order() {
        let mut errors = validator::ValidationErrors::new();
        errors.add(
            "topic",
            validator::ValidationError::new("length").with_message("The topic is too short.".into()),
        );
        errors.add(
            "subject",
            validator::ValidationError::new("length").with_message("Please select a subject.".into()),
        );

        match AppError::from_validation(&errors, &["subject", "topic"]) {
            AppError::ValidationError(msg) => assert_eq!(msg, "Please select a subject."),
            other => panic!("expected ValidationError, got {:?}", other),
        }
        match AppError::from(errors) {
            AppError::ValidationError(msg) => assert_eq!(msg, "Please select a subject."),
            other => panic!("expected ValidationError, got {:?}", other),
        }
    }
}
