//! Human confirmation gates
//!
//! Action approval and the stop/continue prompts all go through `Confirm`, so
//! the console can be swapped for another answer source.

use async_trait::async_trait;

use crate::core::Result;

/// Yes/no prompt answered by an operator
#[async_trait]
pub trait Confirm: Send + Sync {
    /// Ask `prompt`; `Ok(true)` means affirmative
    async fn confirm(&self, prompt: &str) -> Result<bool>;
}

/// Always gives the same answer
#[derive(Debug, Clone, Copy)]
pub struct FixedConfirm(pub bool);

#[async_trait]
impl Confirm for FixedConfirm {
    async fn confirm(&self, prompt: &str) -> Result<bool> {
        log::debug!("auto-answering {:?} with {}", prompt, self.0);
        Ok(self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_confirm() {
        let answer = tokio_test::block_on(FixedConfirm(false).confirm("continue?"));
        assert!(!answer.unwrap());
    }
}
