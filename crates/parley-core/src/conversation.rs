//! Conversation log types.
//!
//! This module contains the append-only record of a chat session: who said
//! what, in order, plus the backward lookups the tool handlers rely on.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Represents the speaker of a turn in a conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Speaker {
    /// Turn spoken by the user.
    User,
    /// Turn spoken by the agent.
    Agent,
}

impl fmt::Display for Speaker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Speaker::User => write!(f, "user"),
            Speaker::Agent => write!(f, "agent"),
        }
    }
}

/// A single recorded utterance in a conversation.
///
/// Turns are immutable once stored; insertion order is conversation order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    /// Who spoke this turn.
    pub speaker: Speaker,
    /// What was said.
    pub text: String,
}

/// Append-only ordered record of a single session's turns.
///
/// The log is owned by exactly one session, grows monotonically, and is
/// never truncated while the session lives. Lookups are O(n) backward
/// scans, which is fine: the log is bounded by conversation length.
#[derive(Debug, Clone, Default)]
pub struct ConversationLog {
    turns: Vec<Turn>,
}

impl ConversationLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a turn to the log. Never fails.
    pub fn store(&mut self, speaker: Speaker, text: impl Into<String>) {
        self.turns.push(Turn {
            speaker,
            text: text.into(),
        });
    }

    /// Returns the text of the most recent user turn.
    ///
    /// With `skip_current = true` the scan skips one user turn and returns
    /// the second-most-recent instead. That mode exists because the session
    /// stores the in-flight input before dispatching, so a handler looking
    /// back mid-turn would otherwise find the very message it is answering.
    ///
    /// Returns `None` if no such turn exists.
    pub fn last_user_message(&self, skip_current: bool) -> Option<&str> {
        let mut to_skip = usize::from(skip_current);
        for turn in self.turns.iter().rev() {
            if turn.speaker == Speaker::User {
                if to_skip == 0 {
                    return Some(&turn.text);
                }
                to_skip -= 1;
            }
        }
        None
    }

    /// Returns the text of the most recent agent turn, or `None`.
    pub fn last_agent_message(&self) -> Option<&str> {
        self.turns
            .iter()
            .rev()
            .find(|turn| turn.speaker == Speaker::Agent)
            .map(|turn| turn.text.as_str())
    }

    /// Ordered read access to every recorded turn.
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// Number of recorded turns.
    pub fn len(&self) -> usize {
        self.turns.len()
    }

    /// Whether the log has no turns yet.
    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }
}
