//! # Party Session Management
//!
//! The party session is the only mutable state the console core touches. It
//! is owned by whoever built it (see [`crate::bot::auth`]) and handed into
//! the dispatcher for the lifetime of the process; the core never creates or
//! destroys one mid-run.
//!
//! ## Lifecycle
//!
//! A session moves through three states:
//! 1. **NoSession** - before authentication, or after `leave` / lost liveness
//! 2. **ActiveSession** - the command loop runs only while this holds
//! 3. **Terminated** - `exit` command or interrupt; no further commands
//!
//! The loop guard re-checks [`PartySession::is_active`] at the top of every
//! iteration, so a successful `leave` ends the loop on the next pass without
//! ending the process.
//!
//! [`PartySession`] is the seam to the externally-owned party object; the
//! backend wire protocol is out of scope here. [`LocalParty`] is the
//! in-memory implementation the binary runs with: it tracks the equipped
//! loadout, the banner, and a roster of known accounts seeded from config.

use anyhow::{bail, Result};
use async_trait::async_trait;
use log::{debug, info};
use std::collections::HashMap;

use super::cosmetics::CosmeticSlot;
use crate::config::{DefaultLoadout, RosterEntry};

/// A resolved public identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub account_id: String,
    pub display_name: String,
}

/// A joinable mutual connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeerRef {
    pub account_id: String,
    pub display_name: String,
}

/// Operations the command core needs from the party backend. Mutators may
/// fail; failures are converted to soft user-visible text at the dispatch
/// boundary and never end the command loop.
#[async_trait]
pub trait PartySession: Send {
    /// Liveness check driving the command loop guard.
    fn is_active(&self) -> bool;

    async fn equip(&mut self, slot: CosmeticSlot, cosmetic_id: &str) -> Result<()>;

    async fn set_banner(&mut self, icon: &str, color: &str) -> Result<()>;

    /// Leave the current party. Flips liveness off.
    async fn leave(&mut self) -> Result<()>;

    /// Resolve a public identity string to a profile, if one exists.
    async fn fetch_profile(&self, display_name: &str) -> Result<Option<UserProfile>>;

    /// Look up whether an account is a known peer (mutual connection).
    async fn known_peer(&self, account_id: &str) -> Result<Option<PeerRef>>;

    async fn join_peer(&mut self, peer: &PeerRef) -> Result<()>;
}

/// In-memory party backend used by the binary and as reference behavior for
/// tests. Directory lookups are case-insensitive on display name.
#[derive(Debug)]
pub struct LocalParty {
    display_name: String,
    active: bool,
    accept_friend_requests: bool,
    loadout: HashMap<CosmeticSlot, String>,
    banner: Option<(String, String)>,
    directory: Vec<UserProfile>,
    friends: Vec<PeerRef>,
    joined_party: Option<String>,
}

impl LocalParty {
    pub fn new(display_name: String, accept_friend_requests: bool, roster: &[RosterEntry]) -> Self {
        let directory = roster
            .iter()
            .map(|entry| UserProfile {
                account_id: entry.account_id.clone(),
                display_name: entry.display_name.clone(),
            })
            .collect();
        let friends = roster
            .iter()
            .filter(|entry| entry.friend)
            .map(|entry| PeerRef {
                account_id: entry.account_id.clone(),
                display_name: entry.display_name.clone(),
            })
            .collect();

        Self {
            display_name,
            active: true,
            accept_friend_requests,
            loadout: HashMap::new(),
            banner: None,
            directory,
            friends,
            joined_party: None,
        }
    }

    pub fn display_name(&self) -> &str {
        &self.display_name
    }

    pub fn accepts_friend_requests(&self) -> bool {
        self.accept_friend_requests
    }

    /// Currently equipped id for a slot, if any.
    pub fn equipped(&self, slot: CosmeticSlot) -> Option<&str> {
        self.loadout.get(&slot).map(|s| s.as_str())
    }

    pub fn banner(&self) -> Option<(&str, &str)> {
        self.banner
            .as_ref()
            .map(|(icon, color)| (icon.as_str(), color.as_str()))
    }

    /// Account id of the party joined via `join`, if any.
    pub fn joined_party(&self) -> Option<&str> {
        self.joined_party.as_deref()
    }
}

#[async_trait]
impl PartySession for LocalParty {
    fn is_active(&self) -> bool {
        self.active
    }

    async fn equip(&mut self, slot: CosmeticSlot, cosmetic_id: &str) -> Result<()> {
        if !self.active {
            bail!("no active session");
        }
        debug!("equip {} = {}", slot, cosmetic_id);
        self.loadout.insert(slot, cosmetic_id.to_string());
        Ok(())
    }

    async fn set_banner(&mut self, icon: &str, color: &str) -> Result<()> {
        if !self.active {
            bail!("no active session");
        }
        self.banner = Some((icon.to_string(), color.to_string()));
        Ok(())
    }

    async fn leave(&mut self) -> Result<()> {
        if !self.active {
            bail!("no active session");
        }
        info!("{} left the party", self.display_name);
        self.joined_party = None;
        self.active = false;
        Ok(())
    }

    async fn fetch_profile(&self, display_name: &str) -> Result<Option<UserProfile>> {
        Ok(self
            .directory
            .iter()
            .find(|p| p.display_name.eq_ignore_ascii_case(display_name))
            .cloned())
    }

    async fn known_peer(&self, account_id: &str) -> Result<Option<PeerRef>> {
        Ok(self
            .friends
            .iter()
            .find(|f| f.account_id == account_id)
            .cloned())
    }

    async fn join_peer(&mut self, peer: &PeerRef) -> Result<()> {
        if !self.active {
            bail!("no active session");
        }
        info!("joining {}'s party ({})", peer.display_name, peer.account_id);
        self.joined_party = Some(peer.account_id.clone());
        Ok(())
    }
}

/// Equip the configured default cosmetics and banner once the session is up.
/// Each applied default is logged; an individual failure aborts the rest,
/// which only happens when the session has already lost liveness.
pub async fn apply_default_loadout<S: PartySession>(
    session: &mut S,
    defaults: &DefaultLoadout,
) -> Result<()> {
    let slots = [
        (CosmeticSlot::Outfit, &defaults.outfit),
        (CosmeticSlot::Emote, &defaults.emote),
        (CosmeticSlot::Backpack, &defaults.backpack),
        (CosmeticSlot::Pickaxe, &defaults.pickaxe),
        (CosmeticSlot::Sidekick, &defaults.sidekick),
        (CosmeticSlot::Shoes, &defaults.shoes),
        (CosmeticSlot::Glider, &defaults.glider),
        (CosmeticSlot::Contrail, &defaults.contrail),
    ];

    for (slot, id) in slots {
        if let Some(id) = id {
            session.equip(slot, id).await?;
            info!("default {}: {}", slot, id);
        }
    }

    if let Some(banner) = &defaults.banner {
        let color = banner.color.as_deref().unwrap_or("DefaultColor");
        session.set_banner(&banner.icon, color).await?;
        info!("default banner: {} ({})", banner.icon, color);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster() -> Vec<RosterEntry> {
        vec![
            RosterEntry {
                account_id: "acc-1".into(),
                display_name: "Alice".into(),
                friend: true,
            },
            RosterEntry {
                account_id: "acc-2".into(),
                display_name: "Bob".into(),
                friend: false,
            },
        ]
    }

    #[tokio::test]
    async fn profile_lookup_is_case_insensitive() {
        let party = LocalParty::new("bot".into(), true, &roster());
        let profile = party.fetch_profile("alice").await.unwrap().unwrap();
        assert_eq!(profile.account_id, "acc-1");
        assert!(party.fetch_profile("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn non_friend_is_in_directory_but_not_a_peer() {
        let party = LocalParty::new("bot".into(), true, &roster());
        assert!(party.fetch_profile("Bob").await.unwrap().is_some());
        assert!(party.known_peer("acc-2").await.unwrap().is_none());
        assert!(party.known_peer("acc-1").await.unwrap().is_some());
    }

    #[tokio::test]
    async fn leave_flips_liveness_and_blocks_mutators() {
        let mut party = LocalParty::new("bot".into(), true, &[]);
        assert!(party.is_active());
        party.leave().await.unwrap();
        assert!(!party.is_active());
        assert!(party.equip(CosmeticSlot::Outfit, "CID_X").await.is_err());
        assert!(party.leave().await.is_err());
    }

    #[tokio::test]
    async fn join_records_target_party() {
        let mut party = LocalParty::new("bot".into(), true, &roster());
        let peer = party.known_peer("acc-1").await.unwrap().unwrap();
        party.join_peer(&peer).await.unwrap();
        assert_eq!(party.joined_party(), Some("acc-1"));
        party.leave().await.unwrap();
        assert_eq!(party.joined_party(), None);
    }
}
