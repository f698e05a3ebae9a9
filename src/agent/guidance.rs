//! Coordinator guidance parser
//!
//! Extracts `トピック: <topic>` and `次の発言者: <name>` from the coordinator's
//! free-text reply. A marker may appear anywhere on its line, so list
//! decoration such as `- トピック: X` still matches. Missing markers yield empty
//! strings; the speaker name is checked against the roster later, not here.

use crate::agent::prompts::{NEXT_SPEAKER_MARKER, TOPIC_MARKER};

/// Topic and optional next speaker named by the coordinator
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Guidance {
    pub topic: String,
    pub next_speaker: String,
}

impl Guidance {
    /// Named next speaker, if any
    pub fn speaker(&self) -> Option<&str> {
        if self.next_speaker.is_empty() {
            None
        } else {
            Some(&self.next_speaker)
        }
    }
}

/// Value after the first occurrence of `marker` on the first line carrying it
fn marker_value(text: &str, marker: &str) -> String {
    text.lines()
        .find_map(|line| line.split_once(marker))
        .map(|(_, value)| value.split(marker).next().unwrap_or("").trim().to_string())
        .unwrap_or_default()
}

/// Parse the coordinator's reply
pub fn parse_guidance(response: &str) -> Guidance {
    Guidance {
        topic: marker_value(response, TOPIC_MARKER),
        next_speaker: marker_value(response, NEXT_SPEAKER_MARKER),
    }
}
