pub mod action_handler;
pub mod auth_handler;
pub mod chat_handler;
pub mod export_handler;
pub mod health_handler;
pub mod quiz_handler;
pub mod revision_handler;
pub mod subject_handler;

use actix_web::web;

use crate::{auth::AuthMiddleware, errors::AppError};

pub use action_handler::run_action;
pub use auth_handler::{session, sign_in, sign_out};
pub use chat_handler::{clear_conversation, get_conversation, post_message};
pub use export_handler::export_artifact;
pub use health_handler::health_check;
pub use quiz_handler::score_quiz;
pub use revision_handler::starter_deck;
pub use subject_handler::{get_subject, list_subjects};

/// Public routes first, then everything else under `/api` behind [`AuthMiddleware`].
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _req| {
        AppError::ValidationError(format!("Invalid JSON body: {}", err)).into()
    }))
    .service(health_check)
    .service(sign_in)
    .service(sign_out)
    .service(session)
    .service(
        web::scope("/api")
            .wrap(AuthMiddleware)
            .service(list_subjects)
            .service(get_subject)
            .service(run_action)
            .service(get_conversation)
            .service(post_message)
            .service(clear_conversation)
            .service(score_quiz)
            .service(export_artifact)
            .service(starter_deck),
    );
}
