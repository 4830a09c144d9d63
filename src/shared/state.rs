use std::sync::Arc;

use crate::config::AppConfig;
use crate::llm::LlmProvider;
use crate::policies::PolicyCatalog;
use crate::retrieval::RetrievalStrategy;
use crate::tickets::store::{TicketStore, TriageLogStore};

/// Process-wide state threaded through every handler as `Arc<AppState>`.
pub struct AppState {
    pub config: AppConfig,
    pub store: TicketStore,
    pub triage_log: TriageLogStore,
    pub policies: PolicyCatalog,
    pub retriever: Arc<dyn RetrievalStrategy>,
    pub llm_provider: Arc<dyn LlmProvider>,
}
