use std::sync::Arc;

use crate::{
    auth::JwtService,
    config::Config,
    errors::AppResult,
    services::{
        action_service::ActionService,
        conversation_store::ConversationStore,
        flows::FlowRunner,
        identity_service::{FirebaseIdentityProvider, IdentityProvider},
        model_service::{ModelProvider, OpenAiCompatibleProvider},
    },
};

#[derive(Clone)]
pub struct AppState {
    pub action_service: Arc<ActionService>,
    pub conversations: Arc<ConversationStore>,
    pub identity_provider: Arc<dyn IdentityProvider>,
    pub jwt_service: Arc<JwtService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> AppResult<Self> {
        if config.is_production() {
            config.validate_for_production()?;
        }

        let model_provider = Arc::new(OpenAiCompatibleProvider::new(&config));
        let identity_provider = Arc::new(FirebaseIdentityProvider::new(&config));

        log::info!(
            "Using model {} at {}",
            config.llm_model,
            config.llm_api_base
        );

        Ok(Self::with_providers(config, model_provider, identity_provider))
    }

    /// Wires the state around already-built providers.
    pub fn with_providers(
        config: Config,
        model_provider: Arc<dyn ModelProvider>,
        identity_provider: Arc<dyn IdentityProvider>,
    ) -> Self {
        let flows = FlowRunner::new(model_provider, config.llm_model.clone());
        let jwt_service = JwtService::new(&config.jwt_secret, config.jwt_expiration_hours);

        Self {
            action_service: Arc::new(ActionService::new(flows)),
            conversations: Arc::new(ConversationStore::new()),
            identity_provider,
            jwt_service: Arc::new(jwt_service),
            config: Arc::new(config),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_app_state_is_cloneable() {
        fn assert_clone<T: Clone>() {}
        assert_clone::<AppState>();
    }

    #[test]
    fn test_app_state_builds_from_test_config() {
        let state = AppState::new(Config::test_config()).expect("state should build");
        assert_eq!(state.config.llm_model, "test-model");
        assert_eq!(state.jwt_service.expiration_hours(), state.config.jwt_expiration_hours);
    }
}
