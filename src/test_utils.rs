use crate::{models::dto::artifacts::QuizQuestion, services::identity_service::IdentityUser};

#[cfg(test)]
pub mod fixtures {
    use super::*;

    /// The signed-in student used across auth tests
    pub fn test_identity_user() -> IdentityUser {
        IdentityUser {
            local_id: "local-123".to_string(),
            email: "eleve@example.com".to_string(),
            display_name: Some("Awa Koné".to_string()),
        }
    }

    pub fn test_quiz_question(question: &str, correct_answer: &str) -> QuizQuestion {
        QuizQuestion {
            question: question.to_string(),
            options: vec![
                "1".to_string(),
                "2".to_string(),
                "3".to_string(),
                "4".to_string(),
            ],
            correct_answer: correct_answer.to_string(),
            explanation: format!("La réponse attendue est {}.", correct_answer),
        }
    }

    /// A short arithmetic quiz whose answers are "2", "3" and "4"
    pub fn test_quiz() -> Vec<QuizQuestion> {
        vec![
            test_quiz_question("1 + 1 = ?", "2"),
            test_quiz_question("1 + 2 = ?", "3"),
            test_quiz_question("2 + 2 = ?", "4"),
        ]
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::test_helpers::*;
    use actix_web::http::StatusCode;
    use validator::Validate;

    #[test]
    fn test_fixtures_identity_user() {
        let user = test_identity_user();
        assert_eq!(user.local_id, "local-123");
        assert_eq!(user.display_name.as_deref(), Some("Awa Koné"));
    }

    #[test]
    fn test_fixtures_quiz_is_valid() {
        let quiz = test_quiz();
        assert_eq!(quiz.len(), 3);
        assert!(quiz.iter().all(|q| q.validate().is_ok()));
    }

    #[test]
    fn test_status_helpers() {
        assert_success_status(StatusCode::NO_CONTENT);
        assert_error_status(StatusCode::BAD_GATEWAY);
    }
}
