//! Parley core: the intent-classification + memory + dispatch loop behind
//! the `parley` chat binary, plus the standalone legacy data importer.

pub mod config;
pub mod conversation;
pub mod dispatch;
pub mod error;
pub mod eval;
pub mod intent;
pub mod legacy;
pub mod session;

// Re-export the types a frontend needs to drive a session.
pub use config::ChatConfig;
pub use conversation::{ConversationLog, Speaker, Turn};
pub use error::ParleyError;
pub use intent::Intent;
pub use session::{ChatSession, SessionState, TurnOutcome};
