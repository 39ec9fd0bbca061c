pub mod chat;
pub mod revision;
pub mod subject;

pub use chat::{ChatMessage, ChatRole, Conversation};
pub use revision::{RevisionCard, RevisionDeck};
pub use subject::Subject;
