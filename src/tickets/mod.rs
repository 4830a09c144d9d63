pub mod store;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, patch},
    Json, Router,
};
use chrono::{DateTime, Utc};
use log::{error, info};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::llm;
use crate::prompts;
use crate::shared::state::AppState;
use store::StoreError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Ticket {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub user_email: String,
    pub priority: String,
    pub status: String,
    pub assigned_to: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub resolution: Option<String>,
    pub ai_analysis: Option<String>,
}

/// One triage call's chain-of-thought record. Appended to the triage log
/// after every ticket creation; the consulted-policy list is derived from
/// keyword retrieval over the ticket text.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TriageLog {
    pub ticket_id: i64,
    pub timestamp: DateTime<Utc>,
    pub reasoning: String,
    pub policies_consulted: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CreateTicketRequest {
    pub title: String,
    pub description: String,
    pub user_email: String,
    #[serde(default = "default_priority")]
    pub priority: String,
}

fn default_priority() -> String {
    "medium".to_string()
}

#[derive(Debug, Default, Deserialize)]
pub struct UpdateTicketRequest {
    pub status: Option<String>,
    pub assigned_to: Option<String>,
    pub resolution: Option<String>,
}

/// Triage orchestration: analyze the raw ticket text with the
/// chain-of-thought template, store the completed ticket, then append the
/// reasoning record. Gateway failures degrade into the fallback analysis
/// text; the ticket is created either way.
pub async fn triage_ticket(
    state: &AppState,
    req: CreateTicketRequest,
) -> Result<Ticket, StoreError> {
    let messages = prompts::triage_messages(&req.title, &req.description);
    let analysis = llm::complete_with_fallback(state.llm_provider.as_ref(), &messages).await;

    let consulted: Vec<String> = state
        .retriever
        .match_policies(
            &format!("{} {}", req.title, req.description),
            state.policies.all(),
        )
        .into_iter()
        .map(|policy| policy.title)
        .collect();

    let ticket = state.store.append(req, analysis.clone()).await?;

    let record = TriageLog {
        ticket_id: ticket.id,
        timestamp: Utc::now(),
        reasoning: analysis,
        policies_consulted: consulted,
    };
    if let Err(e) = state.triage_log.append(record).await {
        // The ticket itself is already durable at this point.
        error!("Failed to persist triage log for ticket {}: {e}", ticket.id);
    }

    Ok(ticket)
}

pub async fn list_tickets(State(state): State<Arc<AppState>>) -> Json<Vec<Ticket>> {
    Json(state.store.all().await)
}

pub async fn create_ticket(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CreateTicketRequest>,
) -> Result<Json<Ticket>, (StatusCode, String)> {
    info!("New ticket from {}: {}", req.user_email, req.title);
    let ticket = triage_ticket(&state, req)
        .await
        .map_err(|e| (StatusCode::INTERNAL_SERVER_ERROR, format!("Storage error: {e}")))?;
    Ok(Json(ticket))
}

pub async fn update_ticket(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    Json(req): Json<UpdateTicketRequest>,
) -> Result<Json<Ticket>, (StatusCode, String)> {
    match state.store.update(id, req).await {
        Ok(ticket) => Ok(Json(ticket)),
        Err(StoreError::NotFound(_)) => {
            Err((StatusCode::NOT_FOUND, "Ticket not found".to_string()))
        }
        Err(e) => Err((StatusCode::INTERNAL_SERVER_ERROR, format!("Storage error: {e}"))),
    }
}

pub async fn get_ticket_reasoning(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> Result<Json<Vec<TriageLog>>, (StatusCode, String)> {
    if state.store.find(id).await.is_none() {
        return Err((StatusCode::NOT_FOUND, "Ticket not found".to_string()));
    }
    Ok(Json(state.triage_log.for_ticket(id).await))
}

pub fn configure_tickets_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/tickets", get(list_tickets).post(create_ticket))
        .route("/api/tickets/:id", patch(update_ticket))
        .route("/api/tickets/:id/reasoning", get(get_ticket_reasoning))
}
