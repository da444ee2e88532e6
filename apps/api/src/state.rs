use std::sync::Arc;

use crate::config::Config;
use crate::llm_client::AiGateway;

/// Shared application state injected into all route handlers via Axum extractors.
/// Nothing here is mutable: requests share only the gateway client and config.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable AI gateway. Production uses `GroqClient`; tests swap in mocks.
    pub gateway: Arc<dyn AiGateway>,
    pub config: Config,
}
