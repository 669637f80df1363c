use std::sync::Arc;

use tokio::sync::watch;

use crate::interview::random::RandomSource;
use crate::llm_client::CompletionClient;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Completion backend. Default: OpenAiClient.
    pub completion: Arc<dyn CompletionClient>,
    /// Random source for the diversity profile and shuffling. Default: OsRandom.
    pub rng: Arc<dyn RandomSource>,
    /// Flips to `true` on shutdown; in-flight generations are cancelled.
    pub shutdown: watch::Receiver<bool>,
}
