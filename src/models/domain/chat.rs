use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::dto::{artifacts::AnswerOutput, response::ActionResponse};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatMessage {
    pub id: Uuid,
    pub role: ChatRole,
    pub content: String,
    pub sent_at: DateTime<Utc>,
}

impl ChatMessage {
    fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            role,
            content: content.into(),
            sent_at: Utc::now(),
        }
    }
}

/// Append-only Q&A transcript.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn push_user(&mut self, content: impl Into<String>) -> &ChatMessage {
        self.push(ChatMessage::new(ChatRole::User, content))
    }

    /// Appends the assistant's side of an exchange: the answer, or an apology
    /// carrying the error.
    pub fn record_reply(&mut self, reply: &ActionResponse<AnswerOutput>) -> &ChatMessage {
        let content = match (&reply.data, &reply.error) {
            (Some(output), _) => output.answer.clone(),
            (None, Some(error)) => format!("Désolé, une erreur est survenue: {}", error),
            (None, None) => "Désolé, une erreur est survenue.".to_string(),
        };
        self.push(ChatMessage::new(ChatRole::Assistant, content))
    }

    fn push(&mut self, message: ChatMessage) -> &ChatMessage {
        self.messages.push(message);
        &self.messages[self.messages.len() - 1]
    }
}
