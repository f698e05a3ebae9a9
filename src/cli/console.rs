//! Terminal input shared by the read loop and the confirmation prompts
//!
//! There is a single buffered reader over the input so that a confirmation
//! answer can never be swallowed by the query prompt's buffer.

use async_trait::async_trait;
use std::io::Write;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tokio::sync::Mutex;

use crate::agent::Confirm;
use crate::core::Result;

/// Answers accepted as "yes", compared after trimming and lowercasing
pub const AFFIRMATIVE: [&str; 3] = ["はい", "y", "yes"];

/// True for an affirmative answer
pub fn is_affirmative(answer: &str) -> bool {
    let answer = answer.trim().to_lowercase();
    AFFIRMATIVE.iter().any(|token| *token == answer)
}

type LineSource = Box<dyn AsyncBufRead + Send + Unpin>;

/// Line-oriented input reader, stdin unless built from another source
pub struct Console {
    lines: Mutex<Lines<LineSource>>,
}

impl Console {
    pub fn new() -> Self {
        Self::from_reader(BufReader::new(tokio::io::stdin()))
    }

    /// Read lines from `reader` instead of stdin
    pub fn from_reader(reader: impl AsyncBufRead + Send + Unpin + 'static) -> Self {
        let source: LineSource = Box::new(reader);
        Self {
            lines: Mutex::new(source.lines()),
        }
    }

    /// Print `prompt` and read one line; `None` on end of input
    pub async fn read_line(&self, prompt: &str) -> Result<Option<String>> {
        print!("{}", prompt);
        std::io::stdout().flush()?;

        let mut lines = self.lines.lock().await;
        Ok(lines.next_line().await?)
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Confirm for Console {
    /// End of input counts as a negative answer
    async fn confirm(&self, prompt: &str) -> Result<bool> {
        let answer = self
            .read_line(&format!("\n{} (はい/いいえ): ", prompt))
            .await?;
        Ok(answer.map(|a| is_affirmative(&a)).unwrap_or(false))
    }
}
