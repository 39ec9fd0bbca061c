use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use futures::lock::Mutex as AsyncMutex;

use crate::{
    errors::{AppError, AppResult},
    models::domain::Conversation,
};

/// In-memory chat transcripts, one per signed-in user. Dropped on restart.
#[derive(Default)]
pub struct ConversationStore {
    conversations: Mutex<HashMap<String, Arc<AsyncMutex<Conversation>>>>,
}

impl ConversationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The user's conversation, created empty on first use. Callers hold the async
    /// lock for the whole exchange so replies stay paired with their questions.
    pub fn conversation(&self, user_id: &str) -> AppResult<Arc<AsyncMutex<Conversation>>> {
        let mut conversations = self
            .conversations
            .lock()
            .map_err(|_| AppError::InternalError("Conversation store is poisoned".to_string()))?;
        Ok(Arc::clone(
            conversations
                .entry(user_id.to_string())
                .or_insert_with(|| Arc::new(AsyncMutex::new(Conversation::new()))),
        ))
    }

    pub fn clear(&self, user_id: &str) -> AppResult<()> {
        self.conversations
            .lock()
            .map_err(|_| AppError::InternalError("Conversation store is poisoned".to_string()))?
            .remove(user_id);
        Ok(())
    }
}
