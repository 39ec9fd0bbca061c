use actix_multipart::Multipart;
use actix_web::{post, web, HttpResponse};
use serde_json::Value;

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::{
        form::SubmittedForm,
        response::{ActionOutcome, ActionResponse},
    },
    services::action_service::ActionKind,
};

/// Runs one of the named actions on a multipart form. Only an unknown action is an
/// HTTP error; everything else answers with `{data, error}`.
#[post("/actions/{action}")]
pub async fn run_action(
    state: web::Data<AppState>,
    action: web::Path<String>,
    payload: Multipart,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let kind = ActionKind::from_name(&action)
        .ok_or_else(|| AppError::NotFound(format!("Unknown action '{}'", action)))?;

    let form = match SubmittedForm::from_multipart(payload, state.config.max_upload_bytes).await {
        Ok(form) => form,
        Err(err) => {
            log::warn!("Unreadable {} submission: {}", kind.name(), err);
            return Ok(
                ActionResponse::<Value>::failure(ActionOutcome::from(&err), err.public_message())
                    .into_http_response(),
            );
        }
    };

    log::info!("User {} requested {}", auth.0.sub, kind.name());
    Ok(state
        .action_service
        .dispatch(kind, &form)
        .await
        .into_http_response())
}
