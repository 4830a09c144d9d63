use axum::{extract::State, routing::post, Json, Router};
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::llm;
use crate::policies::Policy;
use crate::prompts;
use crate::shared::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    pub ticket_id: Option<i64>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
    pub relevant_policies: Vec<Policy>,
    pub similar_cases: usize,
    pub timestamp: DateTime<Utc>,
}

/// Chat orchestration: ground the message in matching policies and prior
/// resolved tickets, assemble the chat prompt, and return the completion
/// with retrieval metadata. Stateless across calls; grounding is re-derived
/// from the full store on every message.
pub async fn answer_chat(state: &AppState, message: &str) -> ChatResponse {
    let relevant_policies = state.retriever.match_policies(message, state.policies.all());

    let tickets = state.store.all().await;
    let similar = state.retriever.match_resolved_tickets(message, &tickets);

    let messages = prompts::chat_messages(message, &relevant_policies, &similar);
    let response = llm::complete_with_fallback(state.llm_provider.as_ref(), &messages).await;

    ChatResponse {
        response,
        relevant_policies,
        // Total match count, even though the prompt embeds at most three.
        similar_cases: similar.len(),
        timestamp: Utc::now(),
    }
}

pub async fn chat_with_agent(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ChatRequest>,
) -> Json<ChatResponse> {
    info!("Chat message (ticket: {:?})", req.ticket_id);
    Json(answer_chat(&state, &req.message).await)
}

pub fn configure_chat_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/chat", post(chat_with_agent))
}
