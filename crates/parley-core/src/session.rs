//! Chat session: the per-turn orchestration state machine.

use serde::{Deserialize, Serialize};

use crate::conversation::{ConversationLog, Speaker};
use crate::dispatch;
use crate::intent;

/// The lifecycle state of a chat session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    /// The session accepts input.
    Running,
    /// The session has ended; further input is refused.
    Terminated,
}

/// The result of feeding one input line to a session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TurnOutcome {
    /// The agent produced a response for this turn.
    Reply(String),
    /// The session has terminated; no turn was recorded for this input.
    Terminated,
}

/// A single-user chat session.
///
/// Owns the conversation log exclusively and drives one turn at a time:
/// store the user turn, classify, dispatch, store the agent turn. Exactly
/// one turn is ever in flight, so between turns the log always holds an
/// even number of entries, alternating User then Agent.
#[derive(Debug, Clone)]
pub struct ChatSession {
    log: ConversationLog,
    exit_keyword: String,
    state: SessionState,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    /// Creates a session with the default exit keyword (`exit`).
    pub fn new() -> Self {
        Self::with_exit_keyword("exit")
    }

    /// Creates a session terminated by the given keyword.
    pub fn with_exit_keyword(exit_keyword: impl Into<String>) -> Self {
        Self {
            log: ConversationLog::new(),
            exit_keyword: exit_keyword.into(),
            state: SessionState::Running,
        }
    }

    /// Handles one line of user input.
    ///
    /// A trimmed line that case-insensitively equals the exit keyword
    /// terminates the session without recording a turn. Any other input
    /// records exactly two turns: the user's, then the agent's response.
    pub fn handle_line(&mut self, line: &str) -> TurnOutcome {
        if self.state == SessionState::Terminated {
            return TurnOutcome::Terminated;
        }

        let text = line.trim();
        if text.eq_ignore_ascii_case(&self.exit_keyword) {
            self.state = SessionState::Terminated;
            return TurnOutcome::Terminated;
        }

        self.log.store(Speaker::User, text);
        let intent = intent::classify(text);
        tracing::debug!(?intent, input = text, "classified user input");
        let reply = dispatch::respond(intent, text, &self.log);
        self.log.store(Speaker::Agent, &reply);

        TurnOutcome::Reply(reply)
    }

    /// Terminates the session from the transport side (e.g. end of input).
    pub fn terminate(&mut self) {
        self.state = SessionState::Terminated;
    }

    /// The session's lifecycle state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Read access to the conversation log.
    pub fn log(&self) -> &ConversationLog {
        &self.log
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatch::responses;

    #[test]
    fn each_input_records_user_then_agent_turn() {
        let mut session = ChatSession::new();
        let outcome = session.handle_line("hello");

        assert_eq!(outcome, TurnOutcome::Reply(responses::GREETING.to_string()));
        let turns = session.log().turns();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0].speaker, Speaker::User);
        assert_eq!(turns[0].text, "hello");
        assert_eq!(turns[1].speaker, Speaker::Agent);
        assert_eq!(turns[1].text, responses::GREETING);
    }

    #[test]
    fn exit_keyword_terminates_without_recording() {
        let mut session = ChatSession::new();
        session.handle_line("hi");

        assert_eq!(session.handle_line("exit"), TurnOutcome::Terminated);
        assert_eq!(session.state(), SessionState::Terminated);
        assert_eq!(session.log().len(), 2);
    }

    #[test]
    fn exit_keyword_is_case_insensitive_and_trimmed() {
        let mut session = ChatSession::new();
        assert_eq!(session.handle_line("  EXIT  "), TurnOutcome::Terminated);
        assert!(session.log().is_empty());
    }

    #[test]
    fn custom_exit_keyword() {
        let mut session = ChatSession::with_exit_keyword("quit");
        assert_eq!(
            session.handle_line("exit"),
            TurnOutcome::Reply(responses::UNKNOWN.to_string())
        );
        assert_eq!(session.handle_line("quit"), TurnOutcome::Terminated);
    }

    #[test]
    fn terminated_session_refuses_further_input() {
        let mut session = ChatSession::new();
        session.handle_line("exit");

        assert_eq!(session.handle_line("hello"), TurnOutcome::Terminated);
        assert!(session.log().is_empty());
    }

    #[test]
    fn transport_termination_behaves_like_exit() {
        let mut session = ChatSession::new();
        session.handle_line("hi");
        session.terminate();

        assert_eq!(session.state(), SessionState::Terminated);
        assert_eq!(session.handle_line("hello"), TurnOutcome::Terminated);
        assert_eq!(session.log().len(), 2);
    }

    #[test]
    fn repeat_sees_the_turn_before_the_in_flight_input() {
        let mut session = ChatSession::new();
        session.handle_line("hi");
        let outcome = session.handle_line("what did i just say");

        assert_eq!(outcome, TurnOutcome::Reply("You said: \"hi\"".to_string()));
    }

    #[test]
    fn repeat_with_no_history_cannot_recall() {
        let mut session = ChatSession::new();
        let outcome = session.handle_line("repeat");

        assert_eq!(
            outcome,
            TurnOutcome::Reply(responses::CANT_RECALL.to_string())
        );
    }
}
