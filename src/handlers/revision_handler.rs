use actix_web::{get, HttpResponse};

use crate::{auth::AuthenticatedUser, models::domain::RevisionDeck};

#[get("/revision/starter")]
pub async fn starter_deck(_auth: AuthenticatedUser) -> HttpResponse {
    HttpResponse::Ok().json(RevisionDeck::starter())
}
