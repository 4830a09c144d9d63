//! Prompt templates for ticket triage and grounded chat.
//!
//! The instructional text is a contract with prompt-tuned behavior; the step
//! headings and the three status tokens must survive any rewording.

use crate::llm::ChatMessage;
use crate::policies::Policy;
use crate::retrieval::SimilarCase;

/// Maximum number of historical cases embedded into a chat prompt.
const MAX_PROMPT_CASES: usize = 3;

const TRIAGE_SYSTEM_PROMPT: &str = "You are an IT support agent. Analyze the ticket using Chain of Thought reasoning:

STEP 1: CATEGORIZATION - What type of IT issue is this?
STEP 2: SEVERITY ASSESSMENT - How urgent/critical is this issue?
STEP 3: POLICY CONSULTATION - Which policies apply to this situation?
STEP 4: TROUBLESHOOTING STEPS - What are the recommended actions?
STEP 5: APPROVAL STATUS - Is this allowed/denied/requires approval?

Provide your analysis following this exact format.";

/// Triage template: the fixed chain-of-thought instruction plus the raw
/// ticket fields. No retrieval context is included at triage time.
pub fn triage_messages(title: &str, description: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage::system(TRIAGE_SYSTEM_PROMPT),
        ChatMessage::user(format!("Ticket: {}\nDescription: {}", title, description)),
    ]
}

/// Chat template: strict behavioral rules plus interpolated policy and
/// historical-case context. At most three cases are embedded even when
/// retrieval found more.
pub fn chat_messages(message: &str, policies: &[Policy], cases: &[SimilarCase]) -> Vec<ChatMessage> {
    let policy_context = policies
        .iter()
        .map(|p| format!("Policy: {} - {}", p.title, p.content))
        .collect::<Vec<_>>()
        .join("\n");

    let history_context = cases
        .iter()
        .take(MAX_PROMPT_CASES)
        .map(|c| format!("Previous Case: {} - Resolution: {}", c.title, c.resolution))
        .collect::<Vec<_>>()
        .join("\n");

    let system = format!(
        "You are an IT support agent. Follow these rules STRICTLY:
1. Always consult official policies before responding
2. Learn from previous similar cases to improve responses
3. Provide step-by-step instructions as a numbered checklist
4. MUST include one of these statements: \"ACTION ALLOWED\", \"ACTION DENIED\", or \"REQUIRES APPROVAL\"
5. Include policy citations for every recommendation
6. Be transparent about your reasoning process

Available Policies:
{}

Previous Similar Cases:
{}

Response Format:
1. [Step-by-step checklist]
2. STATUS: [ALLOWED/DENIED/REQUIRES APPROVAL]
3. POLICY CITATION: [Reference to specific policy]
4. REASONING: [Explain decision process]
5. HISTORICAL CONTEXT: [Reference similar past cases if relevant]",
        policy_context, history_context
    );

    vec![ChatMessage::system(system), ChatMessage::user(message)]
}
