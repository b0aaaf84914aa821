//! Intent classification.
//!
//! Maps raw user input to one symbolic [`Intent`] via ordered rule
//! matching. The rule set of record: substring containment for greeting
//! detection, space-trimmed prefixes for the command-style intents, and
//! both "what did i say" phrasings for repeat. First match wins; there is
//! no longest-match or most-specific resolution.

use serde::{Deserialize, Serialize};

/// The classified purpose of a user utterance.
///
/// A closed set: adding a variant is a compile-time exhaustiveness concern
/// for every handler, not a string-comparison chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Intent {
    /// The user greeted the agent.
    Greeting,
    /// The user asked what the agent can do.
    Help,
    /// The user asked for a (simulated) web search.
    Search,
    /// The user asked for an arithmetic calculation.
    Calculate,
    /// The user asked the agent to repeat their previous message.
    Repeat,
    /// Anything the rules above did not claim.
    Unknown,
}

/// Greeting words matched exactly against the whole normalized input.
const GREETING_WORDS: [&str; 3] = ["hi", "hello", "hey"];

/// Classifies input text into an [`Intent`].
///
/// Deterministic, pure function of the normalized (trimmed, lower-cased)
/// text. Rule order defines precedence, so overlapping triggers like
/// "help me calculate" resolve to the earlier rule (Help).
pub fn classify(text: &str) -> Intent {
    let normalized = text.trim().to_lowercase();

    if GREETING_WORDS.contains(&normalized.as_str())
        || normalized.contains("hello")
        || normalized.contains("hi")
    {
        return Intent::Greeting;
    }
    if normalized.contains("help") {
        return Intent::Help;
    }
    if normalized.starts_with("search") {
        return Intent::Search;
    }
    if normalized.starts_with("calculate") {
        return Intent::Calculate;
    }
    if normalized.contains("repeat")
        || normalized.contains("what did i say")
        || normalized.contains("what did i just say")
    {
        return Intent::Repeat;
    }

    Intent::Unknown
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn greeting_words_match_exactly() {
        assert_eq!(classify("hi"), Intent::Greeting);
        assert_eq!(classify("hello"), Intent::Greeting);
        assert_eq!(classify("hey"), Intent::Greeting);
    }

    #[test]
    fn greeting_matches_by_substring() {
        assert_eq!(classify("well hello there"), Intent::Greeting);
        assert_eq!(classify("HELLO!"), Intent::Greeting);
        // Substring containment is the policy of record, quirks included:
        // "this" contains "hi".
        assert_eq!(classify("this"), Intent::Greeting);
    }

    #[test]
    fn classification_normalizes_case_and_whitespace() {
        assert_eq!(classify("  Hey  "), Intent::Greeting);
        assert_eq!(classify("HELP"), Intent::Help);
        assert_eq!(classify("  Search rust  "), Intent::Search);
    }

    #[test]
    fn help_matches_anywhere() {
        assert_eq!(classify("help"), Intent::Help);
        assert_eq!(classify("please help me out"), Intent::Help);
    }

    #[test]
    fn search_and_calculate_match_by_prefix_only() {
        assert_eq!(classify("search rust repl"), Intent::Search);
        assert_eq!(classify("calculate 2+2"), Intent::Calculate);
        // Not a prefix, and claimed by no earlier rule either.
        assert_eq!(classify("can you calculate 2+2"), Intent::Unknown);
    }

    #[test]
    fn bare_prefix_without_arguments_still_classifies() {
        assert_eq!(classify("search"), Intent::Search);
        assert_eq!(classify("calculate"), Intent::Calculate);
    }

    #[test]
    fn repeat_matches_keyword_and_phrases() {
        assert_eq!(classify("repeat"), Intent::Repeat);
        assert_eq!(classify("could you repeat yourself"), Intent::Repeat);
        assert_eq!(classify("what did i say"), Intent::Repeat);
        assert_eq!(classify("what did i just say"), Intent::Repeat);
    }

    #[test]
    fn overlapping_triggers_resolve_by_rule_order() {
        // "help" is checked before "calculate".
        assert_eq!(classify("help me calculate 2+2"), Intent::Help);
        // "hi" substring is checked before everything else.
        assert_eq!(classify("hi, search cats"), Intent::Greeting);
    }

    #[test]
    fn unmatched_input_is_unknown() {
        assert_eq!(classify("tell me a joke"), Intent::Unknown);
        assert_eq!(classify(""), Intent::Unknown);
        assert_eq!(classify("   "), Intent::Unknown);
    }
}
