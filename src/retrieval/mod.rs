//! Keyword retrieval over the policy catalog and prior resolved tickets.
//!
//! Token-substring matching is a deliberate, cheap stand-in for semantic
//! search. Both directions must stay symmetric: case-folded text on one side,
//! whitespace-split case-folded tokens on the other.

use serde::Serialize;

use crate::policies::Policy;
use crate::tickets::Ticket;

/// Condensed view of a prior resolved ticket, embedded into chat prompts.
#[derive(Debug, Clone, Serialize)]
pub struct SimilarCase {
    pub title: String,
    pub resolution: String,
    pub ai_analysis: String,
}

pub trait RetrievalStrategy: Send + Sync {
    fn match_policies(&self, text: &str, catalog: &[Policy]) -> Vec<Policy>;
    fn match_resolved_tickets(&self, text: &str, tickets: &[Ticket]) -> Vec<SimilarCase>;
}

pub struct KeywordRetriever;

impl RetrievalStrategy for KeywordRetriever {
    /// A policy matches when any whitespace token of its title occurs as a
    /// substring of the input text. Results keep catalog order.
    fn match_policies(&self, text: &str, catalog: &[Policy]) -> Vec<Policy> {
        let text = text.to_lowercase();
        catalog
            .iter()
            .filter(|policy| {
                policy
                    .title
                    .to_lowercase()
                    .split_whitespace()
                    .any(|keyword| text.contains(keyword))
            })
            .cloned()
            .collect()
    }

    /// A resolved ticket matches when any whitespace token of the input text
    /// occurs as a substring of the ticket title. Returns every match in
    /// creation order; callers decide how many to embed in a prompt.
    fn match_resolved_tickets(&self, text: &str, tickets: &[Ticket]) -> Vec<SimilarCase> {
        let text = text.to_lowercase();
        tickets
            .iter()
            .filter(|ticket| ticket.status == "resolved")
            .filter(|ticket| {
                let title = ticket.title.to_lowercase();
                text.split_whitespace().any(|word| title.contains(word))
            })
            .map(|ticket| SimilarCase {
                title: ticket.title.clone(),
                resolution: ticket
                    .resolution
                    .clone()
                    .unwrap_or_else(|| "No resolution recorded".to_string()),
                ai_analysis: ticket
                    .ai_analysis
                    .as_deref()
                    .unwrap_or("")
                    .chars()
                    .take(200)
                    .collect(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policies::PolicyCatalog;
    use chrono::Utc;

    fn ticket(id: i64, title: &str, status: &str, resolution: Option<&str>) -> Ticket {
        let now = Utc::now();
        Ticket {
            id,
            title: title.to_string(),
            description: String::new(),
            user_email: "user@example.com".to_string(),
            priority: "medium".to_string(),
            status: status.to_string(),
            assigned_to: None,
            created_at: now,
            updated_at: now,
            resolution: resolution.map(|r| r.to_string()),
            ai_analysis: None,
        }
    }

    #[test]
    fn policy_matching_is_case_insensitive_and_token_based() {
        let catalog = PolicyCatalog::builtin();
        let retriever = KeywordRetriever;

        let matched = retriever.match_policies("I need a VPN fix", catalog.all());
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].title, "VPN Troubleshooting");

        // No literal token overlap with any policy title.
        let matched = retriever.match_policies("virtual private network", catalog.all());
        assert!(matched.is_empty());
    }

    #[test]
    fn resolved_tickets_only() {
        let retriever = KeywordRetriever;
        let tickets = vec![
            ticket(1, "VPN connection issue", "resolved", Some("Restarted client")),
            ticket(2, "VPN keeps dropping", "new", None),
        ];

        let cases = retriever.match_resolved_tickets("vpn problem again", &tickets);
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].title, "VPN connection issue");
        assert_eq!(cases[0].resolution, "Restarted client");
    }

    #[test]
    fn missing_resolution_gets_placeholder() {
        let retriever = KeywordRetriever;
        let tickets = vec![ticket(1, "Printer jam", "resolved", None)];

        let cases = retriever.match_resolved_tickets("printer is broken", &tickets);
        assert_eq!(cases.len(), 1);
        assert_eq!(cases[0].resolution, "No resolution recorded");
        assert_eq!(cases[0].ai_analysis, "");
    }

    #[test]
    fn analysis_excerpt_is_capped_at_200_chars() {
        let retriever = KeywordRetriever;
        let mut t = ticket(1, "Email outage", "resolved", Some("Fixed"));
        t.ai_analysis = Some("x".repeat(500));

        let cases = retriever.match_resolved_tickets("email down", &[t]);
        assert_eq!(cases[0].ai_analysis.chars().count(), 200);
    }
}
