//! Interactive console loop.
//!
//! Reads one line at a time from stdin, parses it, and hands commands to the
//! dispatcher. One command is fully handled (catalog lookup and session
//! mutation included) before the next line is read; there are no in-flight
//! commands. The loop runs while the session reports liveness, ends
//! gracefully on Ctrl-C or closed stdin, and ends immediately when `exit`
//! is dispatched.

use anyhow::Result;
use log::info;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::catalog::CosmeticResolver;
use super::command::{CommandParser, ParsedLine};
use super::dispatcher::CommandDispatcher;
use super::session::PartySession;

/// Why the command loop stopped.
#[derive(Debug, PartialEq, Eq)]
pub enum LoopEnd {
    /// Loop guard saw `is_active()` go false (e.g. after `leave`).
    SessionEnded,
    /// Ctrl-C, or stdin reached end of input.
    Interrupted,
    /// Explicit `exit` command; terminates regardless of session state.
    ExitRequested,
}

pub struct CommandInterpreter<R: CosmeticResolver, S: PartySession> {
    parser: CommandParser,
    dispatcher: CommandDispatcher<R, S>,
    prompt: String,
}

impl<R: CosmeticResolver, S: PartySession> CommandInterpreter<R, S> {
    pub fn new(parser: CommandParser, dispatcher: CommandDispatcher<R, S>, status: &str) -> Self {
        Self {
            parser,
            dispatcher,
            prompt: format!("{} > ", status),
        }
    }

    /// Blocking read-dispatch loop. Per-line failures are absorbed below the
    /// dispatch boundary; only stdout/stdin transport errors propagate.
    pub async fn run(&mut self) -> Result<LoopEnd> {
        let stdin = BufReader::new(tokio::io::stdin());
        let mut lines = stdin.lines();

        while self.dispatcher.session().is_active() {
            self.show_prompt()?;

            let raw = tokio::select! {
                line = lines.next_line() => match line? {
                    Some(line) => line,
                    None => {
                        info!("console input closed");
                        println!();
                        return Ok(LoopEnd::Interrupted);
                    }
                },
                _ = tokio::signal::ctrl_c() => {
                    info!("received shutdown signal");
                    println!("\nShutting down...");
                    return Ok(LoopEnd::Interrupted);
                }
            };

            match self.parser.parse(&raw) {
                ParsedLine::Empty => continue,
                ParsedLine::Ignored => {
                    let m = self.parser.marker();
                    println!("Commands start with '{}'. Try {}help", m, m);
                }
                ParsedLine::Command(cmd) => {
                    let reply = self.dispatcher.dispatch(&cmd).await;
                    if !reply.text.is_empty() {
                        println!("{}", reply.text);
                    }
                    if reply.exit {
                        return Ok(LoopEnd::ExitRequested);
                    }
                }
            }
        }

        info!("session no longer active, leaving command loop");
        Ok(LoopEnd::SessionEnded)
    }

    fn show_prompt(&self) -> Result<()> {
        let mut out = std::io::stdout();
        write!(out, "\n{}", self.prompt)?;
        out.flush()?;
        Ok(())
    }
}

/// Clear the terminal. Platform-dependent and best-effort; a failure here is
/// cosmetic only.
pub fn clear_screen() {
    #[cfg(windows)]
    let _ = std::process::Command::new("cmd").args(["/C", "cls"]).status();
    #[cfg(not(windows))]
    let _ = std::process::Command::new("clear").status();
}
