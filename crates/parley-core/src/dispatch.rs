//! Tool dispatch: one simulated handler per intent.
//!
//! Handlers are side-effect-free except for reading the conversation log.
//! Search performs no real network call and Calculate goes through the
//! sandboxed evaluator in [`crate::eval`]; every failure path resolves to
//! a fixed user-facing string, never an error.

use crate::conversation::ConversationLog;
use crate::eval::{self, EvalError};
use crate::intent::Intent;

/// The fixed response strings, public so tests and frontends can assert
/// against them instead of copying literals around.
pub mod responses {
    /// Greeting handler response.
    pub const GREETING: &str = "Hello! \u{1F44B} How can I help you today?";
    /// Help handler capability summary.
    pub const HELP: &str = "I can respond to greetings, simulate search, \
                            calculate simple expressions, or repeat what you \
                            said earlier.";
    /// Calculate handler apology for any evaluation failure.
    pub const CALC_APOLOGY: &str =
        "Sorry, I couldn't calculate that. Please check your expression.";
    /// Repeat handler response when the log holds no prior user turn.
    pub const CANT_RECALL: &str = "I can't recall you saying anything yet.";
    /// Fallback for unclassified input.
    pub const UNKNOWN: &str = "I'm still learning. Try saying 'help' to see what I can do.";
}

/// Produces the agent's response for one classified turn.
///
/// `raw_text` is the user's original (untrimmed, case-preserved) input;
/// the command handlers strip their own prefix token from it so queries
/// keep their original casing.
pub fn respond(intent: Intent, raw_text: &str, log: &ConversationLog) -> String {
    match intent {
        Intent::Greeting => responses::GREETING.to_string(),
        Intent::Help => responses::HELP.to_string(),
        Intent::Search => {
            let query = strip_command_prefix(raw_text, "search");
            format!("\u{1F50D} Searching the web for: '{query}'... (simulated)")
        }
        Intent::Calculate => {
            let expression = strip_command_prefix(raw_text, "calculate");
            match eval::evaluate(expression) {
                Ok(value) => format!("The result is: {}", eval::format_number(value)),
                Err(err) => {
                    log_eval_failure(expression, &err);
                    responses::CALC_APOLOGY.to_string()
                }
            }
        }
        Intent::Repeat => match log.last_user_message(true) {
            Some(prior) => format!("You said: \"{prior}\""),
            None => responses::CANT_RECALL.to_string(),
        },
        Intent::Unknown => responses::UNKNOWN.to_string(),
    }
}

/// Strips a leading command token (case-insensitively) and trims the rest.
///
/// Falls back to the whole trimmed input when the token is absent, so the
/// handlers stay usable on directly-supplied text in tests.
fn strip_command_prefix<'a>(raw_text: &'a str, command: &str) -> &'a str {
    let trimmed = raw_text.trim();
    if trimmed.len() >= command.len()
        && trimmed.is_char_boundary(command.len())
        && trimmed[..command.len()].eq_ignore_ascii_case(command)
    {
        trimmed[command.len()..].trim()
    } else {
        trimmed
    }
}

fn log_eval_failure(expression: &str, err: &EvalError) {
    tracing::warn!(%err, expression, "expression evaluation failed");
}
