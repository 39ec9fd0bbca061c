use actix_web::{get, web, HttpResponse};

use crate::{auth::AuthenticatedUser, errors::AppError, models::domain::Subject};

#[get("/subjects")]
pub async fn list_subjects(_auth: AuthenticatedUser) -> HttpResponse {
    HttpResponse::Ok().json(Subject::all())
}

#[get("/subjects/{slug}")]
pub async fn get_subject(
    slug: web::Path<String>,
    _auth: AuthenticatedUser,
) -> Result<HttpResponse, AppError> {
    let subject = Subject::find_by_slug(&slug)
        .ok_or_else(|| AppError::NotFound(format!("Subject '{}' not found", slug)))?;
    Ok(HttpResponse::Ok().json(subject))
}
