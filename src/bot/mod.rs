//! # Bot Core Module
//!
//! The command-driven cosmetic resolution and session-action pipeline.
//!
//! ## Components
//!
//! - [`console`] - interactive read loop, prompt, and termination handling
//! - [`command`] - marker-prefixed line parsing into commands
//! - [`dispatcher`] - routing of parsed commands to handlers
//! - [`catalog`] - display-name to cosmetic-id resolution over HTTP
//! - [`cosmetics`] - the closed registry of cosmetic slots
//! - [`session`] - the party session seam and in-memory backend
//! - [`auth`] - session construction from credentials or interactive prompt
//!
//! ## Data flow
//!
//! ```text
//! raw line -> CommandParser -> CommandDispatcher -> [CatalogClient] -> PartySession
//!                                      |
//!                                   Reply text back to the console
//! ```
//!
//! Per-command failures are absorbed at the dispatch boundary; only the
//! `exit` command, an interrupt, or lost session liveness ends the loop.

pub mod auth;
pub mod catalog;
pub mod command;
pub mod console;
pub mod cosmetics;
pub mod dispatcher;
pub mod session;

pub use console::CommandInterpreter;
pub use dispatcher::CommandDispatcher;
