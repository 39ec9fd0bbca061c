use actix_web::{post, web, HttpResponse};
use validator::Validate;

use crate::{
    auth::AuthenticatedUser,
    errors::AppError,
    models::dto::request::ScoreQuizRequest,
    services::quiz_scoring::score_submission,
};

#[post("/quizzes/score")]
pub async fn score_quiz(
    request: web::Json<ScoreQuizRequest>,
    auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let scored = score_submission(request.questions, request.answers)?;
    log::info!(
        "User {} scored {}/{} on a quiz",
        auth.0.sub,
        scored.score,
        scored.total
    );
    Ok(HttpResponse::Ok().json(scored))
}
