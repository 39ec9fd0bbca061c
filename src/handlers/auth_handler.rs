use actix_web::{get, post, web, HttpResponse};
use serde::Serialize;
use validator::Validate;

use crate::{
    app_state::AppState,
    auth::{Claims, CurrentUser},
    errors::AppError,
    models::dto::request::SignInRequest,
};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub uid: String,
    pub email: String,
    pub display_name: Option<String>,
}

impl From<Claims> for SessionUser {
    fn from(claims: Claims) -> Self {
        Self {
            uid: claims.sub,
            email: claims.email,
            display_name: claims.display_name,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    pub token: String,
    pub expires_in: i64,
    pub user: SessionUser,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: Option<SessionUser>,
}

#[post("/api/auth/sign-in")]
pub async fn sign_in(
    state: web::Data<AppState>,
    request: web::Json<SignInRequest>,
) -> Result<HttpResponse, AppError> {
    request
        .validate()
        .map_err(|e| AppError::from_validation(&e, &["email", "password"]))?;

    let user = state
        .identity_provider
        .sign_in(&request.email, &request.password)
        .await?;

    let token = state.jwt_service.create_token(&user)?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        token,
        expires_in: state.jwt_service.expiration_hours() * 3600,
        user: SessionUser {
            uid: user.local_id,
            email: user.email,
            display_name: user.display_name,
        },
    }))
}

/// Tokens are stateless, so signing out only means the client drops its token.
#[post("/api/auth/sign-out")]
pub async fn sign_out(current: CurrentUser) -> HttpResponse {
    if let Some(claims) = current.0 {
        log::info!("User {} signed out", claims.sub);
    }
    HttpResponse::NoContent().finish()
}

#[get("/api/auth/session")]
pub async fn session(current: CurrentUser) -> HttpResponse {
    HttpResponse::Ok().json(SessionResponse {
        user: current.0.map(SessionUser::from),
    })
}
