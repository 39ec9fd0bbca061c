pub mod action_service;
pub mod conversation_store;
pub mod data_uri;
pub mod export_service;
pub mod flows;
pub mod identity_service;
pub mod model_service;
pub mod quiz_scoring;
