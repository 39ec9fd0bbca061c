use actix_web::{http::StatusCode, HttpResponse};
use serde::Serialize;
use serde_json::Value;

use crate::errors::AppError;

pub const UNEXPECTED_ERROR: &str = "An unexpected error occurred.";

/// How an action ended. Only drives the HTTP status, the body shape is always
/// `{data, error}`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ActionOutcome {
    #[default]
    Success,
    Invalid,
    Failed,
    Unexpected,
}

impl ActionOutcome {
    pub fn status_code(self) -> StatusCode {
        match self {
            ActionOutcome::Success => StatusCode::OK,
            ActionOutcome::Invalid => StatusCode::BAD_REQUEST,
            ActionOutcome::Failed => StatusCode::BAD_GATEWAY,
            ActionOutcome::Unexpected => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<&AppError> for ActionOutcome {
    fn from(err: &AppError) -> Self {
        match err {
            AppError::ValidationError(_) | AppError::NotFound(_) | AppError::Unauthorized(_) => {
                ActionOutcome::Invalid
            }
            AppError::ProviderError(_) | AppError::EmptyOutput(_) | AppError::MalformedOutput(_) => {
                ActionOutcome::Failed
            }
            AppError::InternalError(_) => ActionOutcome::Unexpected,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ActionResponse<T> {
    pub data: Option<T>,
    pub error: Option<String>,
    #[serde(skip)]
    pub outcome: ActionOutcome,
}

impl<T> ActionResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
            outcome: ActionOutcome::Success,
        }
    }

    pub fn failure(outcome: ActionOutcome, error: impl Into<String>) -> Self {
        Self {
            data: None,
            error: Some(error.into()),
            outcome,
        }
    }

    pub fn is_success(&self) -> bool {
        self.outcome == ActionOutcome::Success
    }
}

impl<T: Serialize> ActionResponse<T> {
    pub fn into_http_response(self) -> HttpResponse {
        HttpResponse::build(self.outcome.status_code()).json(self)
    }

    /// Erases the payload type so every action can share one handler.
    pub fn into_json(self) -> ActionResponse<Value> {
        match self.data.as_ref().map(serde_json::to_value).transpose() {
            Ok(data) => ActionResponse {
                data,
                error: self.error,
                outcome: self.outcome,
            },
            Err(e) => {
                log::error!("Failed to serialize action payload: {}", e);
                ActionResponse::failure(ActionOutcome::Unexpected, UNEXPECTED_ERROR)
            }
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionResult {
    pub question: String,
    pub user_answer: Option<String>,
    pub correct_answer: String,
    pub explanation: String,
    pub is_correct: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizScoreResponse {
    pub score: usize,
    pub total: usize,
    pub percentage: u8,
    pub results: Vec<QuestionResult>,
}
