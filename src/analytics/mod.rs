use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;

use crate::shared::state::AppState;

#[derive(Debug, Serialize)]
pub struct AnalyticsSummary {
    pub total_tickets: usize,
    pub status_distribution: HashMap<String, usize>,
    pub priority_distribution: HashMap<String, usize>,
}

pub async fn get_analytics(State(state): State<Arc<AppState>>) -> Json<AnalyticsSummary> {
    let tickets = state.store.all().await;

    let mut status_distribution: HashMap<String, usize> = HashMap::new();
    let mut priority_distribution: HashMap<String, usize> = HashMap::new();
    for ticket in &tickets {
        *status_distribution.entry(ticket.status.clone()).or_default() += 1;
        *priority_distribution
            .entry(ticket.priority.clone())
            .or_default() += 1;
    }

    Json(AnalyticsSummary {
        total_tickets: tickets.len(),
        status_distribution,
        priority_distribution,
    })
}

pub fn configure_analytics_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/analytics", get(get_analytics))
}
