use std::sync::Arc;

use crate::ai::{AnswerService, ModelInvoker};
use crate::core::AppConfig;
use crate::gemini::GenerationClient;
use crate::search::SimilarityIndex;

/// Everything here is read-only after startup and shared by all
/// requests.
pub struct AppState {
    pub config: AppConfig,
    pub answers: AnswerService,
}

impl AppState {
    pub fn new(
        config: AppConfig,
        index: Arc<dyn SimilarityIndex>,
        client: Arc<dyn GenerationClient>,
    ) -> Self {
        let invoker = ModelInvoker::new(
            config.model_candidates.clone(),
            config.retry_policy.clone(),
        );
        let answers = AnswerService::new(index, client, invoker, config.genai_api_key.clone())
            .with_top_k(config.top_k);
        Self { config, answers }
    }
}
