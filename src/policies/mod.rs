use axum::{extract::State, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::shared::state::AppState;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Policy {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub category: String,
}

/// Static, read-only set of support policies. Loaded once at startup and
/// never mutated by any request.
pub struct PolicyCatalog {
    policies: Vec<Policy>,
}

impl PolicyCatalog {
    pub fn builtin() -> Self {
        Self {
            policies: vec![
                Policy {
                    id: 1,
                    title: "Password Reset Policy".to_string(),
                    content: "Users can reset passwords using self-service portal. \
                              For admin accounts, manager approval required."
                        .to_string(),
                    category: "authentication".to_string(),
                },
                Policy {
                    id: 2,
                    title: "VPN Troubleshooting".to_string(),
                    content: "1. Check internet connection 2. Restart VPN client \
                              3. Clear DNS cache 4. Contact IT if issues persist"
                        .to_string(),
                    category: "network".to_string(),
                },
                Policy {
                    id: 3,
                    title: "Software Installation".to_string(),
                    content: "Standard software can be installed via company portal. \
                              Custom software requires IT approval."
                        .to_string(),
                    category: "software".to_string(),
                },
            ],
        }
    }

    pub fn all(&self) -> &[Policy] {
        &self.policies
    }
}

pub async fn list_policies(State(state): State<Arc<AppState>>) -> Json<Vec<Policy>> {
    Json(state.policies.all().to_vec())
}

pub fn configure_policies_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/policies", get(list_policies))
}
