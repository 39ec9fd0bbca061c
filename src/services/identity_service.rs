use async_trait::async_trait;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::{
    config::Config,
    errors::{AppError, AppResult},
};

/// The account an email/password pair resolved to.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IdentityUser {
    pub local_id: String,
    pub email: String,
    #[serde(default)]
    pub display_name: Option<String>,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> AppResult<IdentityUser>;
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct SignInWithPasswordBody<'a> {
    email: &'a str,
    password: &'a str,
    return_secure_token: bool,
}

#[derive(Debug, Deserialize)]
struct IdentityErrorEnvelope {
    error: IdentityErrorDetail,
}

#[derive(Debug, Deserialize)]
struct IdentityErrorDetail {
    #[serde(default)]
    message: String,
}

/// Email/password sign-in against the Identity Toolkit REST API.
pub struct FirebaseIdentityProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: SecretString,
}

impl FirebaseIdentityProvider {
    pub fn new(config: &Config) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: config.identity_base_url.trim_end_matches('/').to_string(),
            api_key: config.identity_api_key.clone(),
        }
    }
}

/// Maps a rejected sign-in to an error. Credential problems never reveal which
/// part was wrong.
fn sign_in_error(status: StatusCode, body: &str) -> AppError {
    let code = serde_json::from_str::<IdentityErrorEnvelope>(body)
        .map(|envelope| envelope.error.message)
        .unwrap_or_default();

    // Codes may carry a detail suffix, e.g. "TOO_MANY_ATTEMPTS_TRY_LATER : ..."
    let code = code.split(':').next().unwrap_or_default().trim();

    match code {
        "EMAIL_NOT_FOUND"
        | "INVALID_PASSWORD"
        | "INVALID_LOGIN_CREDENTIALS"
        | "INVALID_EMAIL"
        | "USER_DISABLED" => AppError::Unauthorized("Invalid email or password".to_string()),
        "TOO_MANY_ATTEMPTS_TRY_LATER" => AppError::Unauthorized(
            "Too many sign-in attempts. Please try again later.".to_string(),
        ),
        _ if status == StatusCode::BAD_REQUEST => {
            AppError::Unauthorized("Invalid email or password".to_string())
        }
        _ => AppError::ProviderError(format!("Identity provider returned {}: {}", status, code)),
    }
}

#[async_trait]
impl IdentityProvider for FirebaseIdentityProvider {
    async fn sign_in(&self, email: &str, password: &str) -> AppResult<IdentityUser> {
        let url = format!("{}/accounts:signInWithPassword", self.base_url);

        let response = self
            .client
            .post(&url)
            .query(&[("key", self.api_key.expose_secret())])
            .json(&SignInWithPasswordBody {
                email,
                password,
                return_secure_token: true,
            })
            .send()
            .await
            .map_err(|e| {
                log::error!("Failed to reach identity provider: {}", e);
                AppError::from(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let err = sign_in_error(status, &body);
            log::warn!("Sign-in rejected with status {}", status);
            return Err(err);
        }

        let user: IdentityUser = response.json().await?;
        log::info!("User {} signed in", user.local_id);
        Ok(user)
    }
}
