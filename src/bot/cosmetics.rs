//! Cosmetic slot registry.
//!
//! Each console cosmetic command maps to exactly one [`CosmeticSlot`]. The
//! slot carries the backend type code the catalog service expects and doubles
//! as the dispatch key for the session mutator, so the mapping is fixed at
//! compile time instead of being looked up by name at runtime.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CosmeticSlot {
    Outfit,
    Emote,
    Backpack,
    Pickaxe,
    Sidekick,
    Shoes,
    Glider,
    Contrail,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown cosmetic type: {0}")]
pub struct UnknownCosmetic(pub String);

impl CosmeticSlot {
    pub const ALL: [CosmeticSlot; 8] = [
        CosmeticSlot::Outfit,
        CosmeticSlot::Emote,
        CosmeticSlot::Backpack,
        CosmeticSlot::Pickaxe,
        CosmeticSlot::Sidekick,
        CosmeticSlot::Shoes,
        CosmeticSlot::Glider,
        CosmeticSlot::Contrail,
    ];

    /// Type code the catalog service expects in the `backendType` parameter.
    pub fn backend_type(&self) -> &'static str {
        match self {
            CosmeticSlot::Outfit => "AthenaCharacter",
            CosmeticSlot::Emote => "AthenaDance",
            CosmeticSlot::Backpack => "AthenaBackpack",
            CosmeticSlot::Pickaxe => "AthenaPickaxe",
            CosmeticSlot::Sidekick => "AthenaPet",
            CosmeticSlot::Shoes => "AthenaShoes",
            CosmeticSlot::Glider => "AthenaGlider",
            CosmeticSlot::Contrail => "AthenaContrail",
        }
    }

    /// Console command name for this slot (also its TOML key in `[defaults]`).
    pub fn command_name(&self) -> &'static str {
        match self {
            CosmeticSlot::Outfit => "outfit",
            CosmeticSlot::Emote => "emote",
            CosmeticSlot::Backpack => "backpack",
            CosmeticSlot::Pickaxe => "pickaxe",
            CosmeticSlot::Sidekick => "sidekick",
            CosmeticSlot::Shoes => "shoes",
            CosmeticSlot::Glider => "glider",
            CosmeticSlot::Contrail => "contrail",
        }
    }
}

impl fmt::Display for CosmeticSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.command_name())
    }
}

impl FromStr for CosmeticSlot {
    type Err = UnknownCosmetic;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "outfit" => Ok(CosmeticSlot::Outfit),
            "emote" => Ok(CosmeticSlot::Emote),
            "backpack" => Ok(CosmeticSlot::Backpack),
            "pickaxe" => Ok(CosmeticSlot::Pickaxe),
            "sidekick" => Ok(CosmeticSlot::Sidekick),
            "shoes" => Ok(CosmeticSlot::Shoes),
            "glider" => Ok(CosmeticSlot::Glider),
            "contrail" => Ok(CosmeticSlot::Contrail),
            other => Err(UnknownCosmetic(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_slot_roundtrips_through_its_command_name() {
        for slot in CosmeticSlot::ALL {
            assert_eq!(slot.command_name().parse::<CosmeticSlot>(), Ok(slot));
            assert!(!slot.backend_type().is_empty());
        }
    }

    #[test]
    fn unknown_name_is_rejected() {
        let err = "hat".parse::<CosmeticSlot>().unwrap_err();
        assert_eq!(err.to_string(), "unknown cosmetic type: hat");
    }

    #[test]
    fn parsing_is_case_sensitive_lowercase() {
        // Command names are lower-cased before routing, so only lowercase parses.
        assert!("Outfit".parse::<CosmeticSlot>().is_err());
    }
}
