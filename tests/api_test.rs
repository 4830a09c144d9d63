//! Route-level tests for the HTTP surface.

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use deskserver::api_router::configure_api_routes;
use deskserver::config::AppConfig;
use deskserver::llm::{ChatMessage, LlmProvider};
use deskserver::policies::PolicyCatalog;
use deskserver::retrieval::KeywordRetriever;
use deskserver::shared::state::AppState;
use deskserver::tickets::store::{TicketStore, TriageLogStore};
use deskserver::tickets::{CreateTicketRequest, UpdateTicketRequest};

struct FailingProvider;

#[async_trait]
impl LlmProvider for FailingProvider {
    async fn complete(
        &self,
        _messages: &[ChatMessage],
    ) -> Result<String, Box<dyn std::error::Error + Send + Sync>> {
        Err("simulated network error".into())
    }
}

async fn seeded_app(dir: &tempfile::TempDir) -> axum::Router {
    let state = AppState {
        config: AppConfig::from_env(),
        store: TicketStore::open(dir.path().join("tickets.json")).unwrap(),
        triage_log: TriageLogStore::open(dir.path().join("triage_log.json")).unwrap(),
        policies: PolicyCatalog::builtin(),
        retriever: Arc::new(KeywordRetriever),
        llm_provider: Arc::new(FailingProvider),
    };

    // 2 new + 1 resolved; 2 medium + 1 high.
    for (title, priority) in [
        ("VPN down", "medium"),
        ("Printer jam", "medium"),
        ("Email outage", "high"),
    ] {
        state
            .store
            .append(
                CreateTicketRequest {
                    title: title.to_string(),
                    description: "broken".to_string(),
                    user_email: "user@example.com".to_string(),
                    priority: priority.to_string(),
                },
                "analysis".to_string(),
            )
            .await
            .unwrap();
    }
    state
        .store
        .update(
            1,
            UpdateTicketRequest {
                status: Some("resolved".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    configure_api_routes().with_state(Arc::new(state))
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn patch_on_unknown_id_is_404() {
    let dir = tempfile::tempdir().unwrap();
    let app = seeded_app(&dir).await;

    let response = app
        .oneshot(
            Request::builder()
                .method("PATCH")
                .uri("/api/tickets/42")
                .header("content-type", "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn analytics_reports_exact_distributions() {
    let dir = tempfile::tempdir().unwrap();
    let app = seeded_app(&dir).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/analytics")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let summary = body_json(response).await;
    assert_eq!(summary["total_tickets"], 3);
    assert_eq!(summary["status_distribution"]["new"], 2);
    assert_eq!(summary["status_distribution"]["resolved"], 1);
    assert_eq!(summary["priority_distribution"]["medium"], 2);
    assert_eq!(summary["priority_distribution"]["high"], 1);
}

#[tokio::test]
async fn policies_endpoint_lists_the_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let app = seeded_app(&dir).await;

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/policies")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let policies = body_json(response).await;
    assert_eq!(policies.as_array().unwrap().len(), 3);
    assert_eq!(policies[0]["title"], "Password Reset Policy");
}

#[tokio::test]
async fn chat_returns_200_with_fallback_under_outage() {
    let dir = tempfile::tempdir().unwrap();
    let app = seeded_app(&dir).await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/chat")
                .header("content-type", "application/json")
                .body(Body::from(r#"{"message": "vpn problem"}"#))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let reply = body_json(response).await;
    assert!(reply["response"]
        .as_str()
        .unwrap()
        .starts_with("AI service temporarily unavailable:"));
    assert_eq!(reply["relevant_policies"][0]["title"], "VPN Troubleshooting");
    assert_eq!(reply["similar_cases"], 1);
    assert!(reply["timestamp"].is_string());
}

#[tokio::test]
async fn create_ticket_returns_complete_record_under_outage() {
    let dir = tempfile::tempdir().unwrap();
    let app = seeded_app(&dir).await;

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/tickets")
                .header("content-type", "application/json")
                .body(Body::from(
                    r#"{"title": "Laptop battery", "description": "Drains fast", "user_email": "user@example.com"}"#,
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let ticket = body_json(response).await;
    assert_eq!(ticket["id"], 4);
    assert_eq!(ticket["priority"], "medium");
    assert_eq!(ticket["status"], "new");
    assert!(ticket["ai_analysis"]
        .as_str()
        .unwrap()
        .starts_with("AI service temporarily unavailable:"));
}
