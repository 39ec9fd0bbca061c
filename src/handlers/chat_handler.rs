use actix_multipart::Multipart;
use actix_web::{delete, get, post, web, HttpResponse};
use serde::Serialize;

use crate::{
    app_state::AppState,
    auth::AuthenticatedUser,
    errors::AppError,
    models::{
        domain::ChatMessage,
        dto::{
            artifacts::AnswerOutput,
            form::SubmittedForm,
            response::{ActionOutcome, ActionResponse},
        },
    },
};

#[derive(Debug, Serialize)]
pub struct ConversationResponse {
    pub messages: Vec<ChatMessage>,
}

#[get("/chat")]
pub async fn get_conversation(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let conversation = state.conversations.conversation(&auth.0.sub)?;
    let messages = conversation.lock().await.messages().to_vec();
    Ok(HttpResponse::Ok().json(ConversationResponse { messages }))
}

/// Same form and response shape as the `ask-question` action; the exchange is
/// appended to the user's conversation.
#[post("/chat")]
pub async fn post_message(
    state: web::Data<AppState>,
    payload: Multipart,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let form = match SubmittedForm::from_multipart(payload, state.config.max_upload_bytes).await {
        Ok(form) => form,
        Err(err) => {
            log::warn!("Unreadable chat submission: {}", err);
            return Ok(ActionResponse::<AnswerOutput>::failure(
                ActionOutcome::from(&err),
                err.public_message(),
            )
            .into_http_response());
        }
    };

    let conversation = state.conversations.conversation(&auth.0.sub)?;
    let mut conversation = conversation.lock().await;
    let reply = state
        .action_service
        .ask_in_conversation(&mut conversation, &form)
        .await;

    log::debug!(
        "User {} conversation now has {} messages",
        auth.0.sub,
        conversation.messages().len()
    );
    Ok(reply.into_http_response())
}

#[delete("/chat")]
pub async fn clear_conversation(
    state: web::Data<AppState>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    state.conversations.clear(&auth.0.sub)?;
    Ok(HttpResponse::NoContent().finish())
}
