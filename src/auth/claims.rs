use chrono::{Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::services::identity_service::IdentityUser;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // Identity provider's local id
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub exp: usize,
    pub iat: usize,
}

impl Claims {
    pub fn new(user: &IdentityUser, expiration_hours: i64) -> Self {
        let now = Utc::now();
        let exp = now + Duration::hours(expiration_hours);

        Self {
            sub: user.local_id.clone(),
            email: user.email.clone(),
            display_name: user.display_name.clone(),
            iat: now.timestamp() as usize,
            exp: exp.timestamp() as usize,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::test_identity_user;

    #[test]
    fn test_claims_creation() {
        let claims = Claims::new(&test_identity_user(), 24);

        assert_eq!(claims.sub, "local-123");
        assert_eq!(claims.email, "eleve@example.com");
        assert_eq!(claims.display_name.as_deref(), Some("Awa Koné"));
        assert!(claims.exp > claims.iat);
    }
}
