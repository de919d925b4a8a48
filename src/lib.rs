//! # Partybot - Interactive Console Bot for Party Sessions
//!
//! Partybot drives an authenticated game-account session from a console
//! prompt: cosmetic items are resolved from human display names to backend
//! ids through an external catalog service and equipped on the session, and
//! another account's party can be joined by identity.
//!
//! ## Features
//!
//! - **Marker-Prefixed Commands**: `!outfit <name>`, `!join <user>`, `!leave`,
//!   `!clear`, `!help`, `!exit`, with a configurable marker character.
//! - **Catalog Resolution**: One HTTP lookup per command with a first-match
//!   policy; all resolution failures are soft and keep the loop alive.
//! - **Session Lifecycle**: The loop runs only while the party session is
//!   live; `leave` ends the loop on the next guard check, `exit` and Ctrl-C
//!   end it immediately.
//! - **Default Loadout**: Configured cosmetic ids and banner are equipped as
//!   soon as the session comes up.
//! - **Async Design**: Built with Tokio; one command is fully handled before
//!   the next line is read.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use partybot::bot::catalog::CatalogClient;
//! use partybot::bot::command::CommandParser;
//! use partybot::bot::{auth, CommandDispatcher, CommandInterpreter};
//! use partybot::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("partybot.toml").await?;
//!     config.validate()?;
//!
//!     let session = auth::build_session(&config)?;
//!     let catalog = CatalogClient::new(config.catalog.clone());
//!     let parser = CommandParser::new(config.bot.marker_char());
//!     let dispatcher = CommandDispatcher::new(catalog, session, config.bot.marker_char());
//!
//!     let mut console =
//!         CommandInterpreter::new(parser, dispatcher, &config.bot.status_message);
//!     console.run().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! - [`bot`] - command parsing, dispatch, catalog resolution, and the session
//! - [`config`] - configuration loading and validation
//! - [`logutil`] - log sanitization helpers

pub mod bot;
pub mod config;
pub mod logutil;
