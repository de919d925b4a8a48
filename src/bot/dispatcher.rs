//! Command routing and execution.
//!
//! The primary entrypoint is [`CommandDispatcher::dispatch`], which maps a
//! parsed command name to exactly one handler and returns a fully rendered
//! [`Reply`] for the console loop to print. Nothing below this boundary is
//! allowed to escape: handler failures are logged and converted to soft,
//! user-visible text, so one bad command never ends the loop.
//!
//! Routing table:
//!
//! | name | action |
//! |---|---|
//! | `clear`, `cls` | clear the console display |
//! | cosmetic slot names | resolve item name via catalog, equip on session |
//! | `join` | resolve identity, check peer, join their party |
//! | `leave` | leave the current party |
//! | `help` | static command reference |
//! | `exit` | terminate the process unconditionally |
//! | anything else | "unknown command" warning |

use anyhow::Result;
use log::{debug, info, warn};

use super::catalog::CosmeticResolver;
use super::command::ParsedCommand;
use super::console;
use super::cosmetics::CosmeticSlot;
use super::session::PartySession;
use crate::logutil::escape_log;

/// Rendered outcome of one dispatched command.
#[derive(Debug, PartialEq, Eq)]
pub struct Reply {
    /// Text to show the user; empty for silent side effects like `clear`.
    pub text: String,
    /// True only for `exit`, which terminates regardless of session state.
    pub exit: bool,
}

impl Reply {
    fn text(text: impl Into<String>) -> Self {
        Reply {
            text: text.into(),
            exit: false,
        }
    }

    fn silent() -> Self {
        Reply {
            text: String::new(),
            exit: false,
        }
    }

    fn exit() -> Self {
        Reply {
            text: String::new(),
            exit: true,
        }
    }
}

/// Routes parsed commands to handlers against a resolver and a session.
pub struct CommandDispatcher<R: CosmeticResolver, S: PartySession> {
    resolver: R,
    session: S,
    marker: char,
}

impl<R: CosmeticResolver, S: PartySession> CommandDispatcher<R, S> {
    pub fn new(resolver: R, session: S, marker: char) -> Self {
        Self {
            resolver,
            session,
            marker,
        }
    }

    pub fn session(&self) -> &S {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut S {
        &mut self.session
    }

    pub async fn dispatch(&mut self, cmd: &ParsedCommand) -> Reply {
        match cmd.name.as_str() {
            "clear" | "cls" => {
                console::clear_screen();
                Reply::silent()
            }
            "help" => Reply::text(self.help_text()),
            "exit" => {
                info!("exit requested");
                Reply::exit()
            }
            "leave" => match self.session.leave().await {
                Ok(()) => Reply::text("Left the party"),
                Err(e) => {
                    warn!("leave failed: {}", e);
                    Reply::text(format!("Error: {}", e))
                }
            },
            "join" => self.join(&cmd.arg_text()).await,
            name if name.parse::<CosmeticSlot>().is_ok() => {
                self.equip(name, &cmd.arg_text()).await
            }
            other => {
                warn!("unknown command: {}", escape_log(other));
                Reply::text(format!("Unknown: {}{}", self.marker, other))
            }
        }
    }

    /// Equip-cosmetic action: resolve the display name through the catalog,
    /// then apply the id to the session. A missing identifier and a missing
    /// session share one "not found" message; the log line tells them apart.
    pub async fn equip(&mut self, slot_name: &str, item_name: &str) -> Reply {
        let slot = match slot_name.parse::<CosmeticSlot>() {
            Ok(slot) => slot,
            Err(e) => {
                warn!("{}", e);
                return Reply::text(e.to_string());
            }
        };

        match self.resolver.resolve(item_name, slot).await {
            Some(id) if self.session.is_active() => match self.session.equip(slot, &id).await {
                Ok(()) => Reply::text(format!("Equipped: {}", item_name)),
                Err(e) => {
                    warn!("equip {} failed: {}", slot, e);
                    Reply::text(format!("Error: {}", e))
                }
            },
            Some(id) => {
                debug!("resolved {} to {} but session is not active", slot, id);
                Reply::text(format!("Couldn't find: {}", item_name))
            }
            None => Reply::text(format!("Couldn't find: {}", item_name)),
        }
    }

    /// Social join action: identity -> profile -> known peer -> join. Every
    /// failure along the way is soft.
    pub async fn join(&mut self, identity: &str) -> Reply {
        match self.try_join(identity).await {
            Ok(text) => Reply::text(text),
            Err(e) => {
                warn!("join error for '{}': {}", escape_log(identity), e);
                Reply::text(format!("Join error: {}", e))
            }
        }
    }

    async fn try_join(&mut self, identity: &str) -> Result<String> {
        let Some(profile) = self.session.fetch_profile(identity).await? else {
            return Ok(format!("User not found: {}", identity));
        };
        let Some(peer) = self.session.known_peer(&profile.account_id).await? else {
            return Ok(format!("Not friends with: {}", identity));
        };
        self.session.join_peer(&peer).await?;
        Ok(format!("Joined {}'s party", identity))
    }

    fn help_text(&self) -> String {
        let m = self.marker;
        let mut out = String::from("Commands:\n");
        for slot in CosmeticSlot::ALL {
            out.push_str(&format!(
                "{}{:<9} <name> - Change {}\n",
                m,
                slot.command_name(),
                slot.command_name()
            ));
        }
        out.push_str(&format!("{}join <user>      - Join someone's party\n", m));
        out.push_str(&format!("{}leave            - Leave current party\n", m));
        out.push_str(&format!("{m}clear / {m}cls     - Clean console\n"));
        out.push_str(&format!("{}help             - Show commands\n", m));
        out.push_str(&format!("{}exit             - Quit", m));
        out
    }
}
