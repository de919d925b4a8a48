//! Session construction.
//!
//! When all three stored device-credential fields are present the session is
//! built directly from them. Otherwise we fall back to an interactive
//! authorization-code prompt (read without echo). The authentication wire
//! protocol itself is out of scope; this builder validates its inputs, logs,
//! and produces the [`LocalParty`] the command loop drives.

use anyhow::{bail, Result};
use log::info;

use super::session::LocalParty;
use crate::config::Config;

/// Build the party session from config, prompting interactively when the
/// stored credentials are incomplete.
pub fn build_session(config: &Config) -> Result<LocalParty> {
    if config.auth.has_device_credentials() {
        info!(
            "authenticating with stored device credentials for account {}",
            config.auth.account_id
        );
    } else {
        info!("device credentials incomplete, falling back to interactive authorization");
        println!("Stored credentials are incomplete.");
        let code = rpassword::prompt_password("Authorization code: ")?;
        if code.trim().is_empty() {
            bail!("authorization code must not be empty");
        }
    }

    let session = LocalParty::new(
        config.bot.status_message.clone(),
        config.party.accept_friend_requests,
        &config.party.roster,
    );
    info!("Logged in as {}", session.display_name());
    Ok(session)
}
