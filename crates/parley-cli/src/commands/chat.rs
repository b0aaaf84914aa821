//! Interactive chat REPL.

use std::borrow::Cow::{self, Borrowed, Owned};
use std::path::Path;

use anyhow::Result;
use colored::Colorize;
use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};

use parley_core::{ChatConfig, ChatSession, Speaker, TurnOutcome};

/// Command words the classifier reacts to, offered as completions.
const COMMAND_WORDS: [&str; 5] = ["help", "search ", "calculate ", "repeat", "exit"];

/// CLI helper for rustyline that provides completion, highlighting, and hints.
#[derive(Clone)]
struct CliHelper {
    commands: Vec<String>,
}

impl CliHelper {
    fn new() -> Self {
        Self {
            commands: COMMAND_WORDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Helper for CliHelper {}

impl Completer for CliHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let line = &line[..pos];

        // Only complete the leading command word.
        if line.is_empty() || line.contains(' ') {
            return Ok((0, vec![]));
        }

        let candidates: Vec<Pair> = self
            .commands
            .iter()
            .filter(|cmd| cmd.starts_with(line))
            .map(|cmd| Pair {
                display: cmd.trim_end().to_string(),
                replacement: cmd.clone(),
            })
            .collect();
        Ok((0, candidates))
    }
}

impl Highlighter for CliHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        let word = line.split_whitespace().next().unwrap_or("");
        if self
            .commands
            .iter()
            .any(|cmd| cmd.trim_end() == word.to_lowercase())
        {
            Owned(line.bright_cyan().to_string())
        } else {
            Borrowed(line)
        }
    }

    fn highlight_char(&self, _line: &str, _pos: usize, _forced: bool) -> bool {
        true
    }
}

impl Hinter for CliHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> Option<String> {
        let line = &line[..pos];

        if line.is_empty() || line.contains(' ') {
            return None;
        }

        self.commands
            .iter()
            .find(|cmd| cmd.starts_with(line) && cmd.len() > line.len())
            .map(|cmd| cmd[line.len()..].to_string())
    }
}

impl Validator for CliHelper {}

/// Runs the interactive chat loop until the exit keyword or end of input,
/// then dumps the conversation log.
pub fn run() -> Result<()> {
    let config = ChatConfig::load_or_default(Path::new("parley.toml"))?;
    let mut session = ChatSession::with_exit_keyword(&config.exit_keyword);

    let mut rl = Editor::new()?;
    rl.set_helper(Some(CliHelper::new()));

    println!("{}", "=== Parley ===".bright_magenta().bold());
    println!(
        "{}",
        format!(
            "Say 'hello', ask for 'help', or type '{}' to quit.",
            config.exit_keyword
        )
        .bright_black()
    );
    println!();

    loop {
        match rl.readline(&config.prompt) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }

                let _ = rl.add_history_entry(&line);

                match session.handle_line(trimmed) {
                    TurnOutcome::Reply(reply) => {
                        println!("{}", format!("Parley: {reply}").bright_blue());
                    }
                    TurnOutcome::Terminated => {
                        println!("{}", "Goodbye!".bright_green());
                        break;
                    }
                }
            }
            Err(rustyline::error::ReadlineError::Interrupted) => {
                println!(
                    "{}",
                    format!("CTRL-C detected. Type '{}' to quit.", config.exit_keyword).yellow()
                );
            }
            Err(rustyline::error::ReadlineError::Eof) => {
                // End of input is fatal for the transport; same as exiting.
                session.terminate();
                println!("{}", "Goodbye!".bright_green());
                break;
            }
            Err(err) => {
                session.terminate();
                eprintln!("{}", format!("Input error: {err:?}").red());
                break;
            }
        }
    }

    dump_transcript(&session);
    Ok(())
}

/// Prints the full conversation log as `<speaker>: <text>`.
fn dump_transcript(session: &ChatSession) {
    if session.log().is_empty() {
        return;
    }

    println!();
    println!("{}", "Conversation log:".bright_magenta().bold());
    for turn in session.log().turns() {
        let line = format!("{}: {}", turn.speaker, turn.text);
        match turn.speaker {
            Speaker::User => println!("{}", line.green()),
            Speaker::Agent => println!("{}", line.bright_blue()),
        }
    }
}
