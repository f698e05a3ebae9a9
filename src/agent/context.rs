//! Discussion transcript
//!
//! Append-only record of a query session. Every prompt in the session is built
//! from it, and it is never truncated.

/// Append-only transcript of one `process_query` session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    text: String,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the coordinator's guidance for a round (1-based)
    pub fn push_coordinator(&mut self, round: usize, reply: &str) {
        self.text
            .push_str(&format!("\nラウンド {} - コーディネーター: {}", round, reply));
    }

    /// Record an agent's contribution
    pub fn push_contribution(&mut self, name: &str, reply: &str) {
        self.text.push_str(&format!("\n{}: {}", name, reply));
    }

    /// Record the round summary and the proposed next question
    pub fn push_summary(&mut self, summary: &str, next_question: &str) {
        self.text.push_str(&format!(
            "\n\nサマリー: {}\n次の質問: {}",
            summary, next_question
        ));
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn len(&self) -> usize {
        self.text.len()
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn into_string(self) -> String {
        self.text
    }
}

impl std::fmt::Display for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.text)
    }
}
