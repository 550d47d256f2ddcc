//! Parsing of user supplied profile references.
//!
//! Accepted forms:
//! - a raw steamid (`76561198000000000`)
//! - a profile URL (`https://steamcommunity.com/profiles/76561198000000000/`
//!   or `https://steamcommunity.com/id/gabelogannewell`)
//! - a bare vanity name (`gabelogannewell`)

use crate::error::{LobbyError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProfileReference {
    /// Already numeric, usable without a lookup.
    SteamId(String),
    /// Custom profile name that must go through ResolveVanityURL.
    Vanity(String),
}

/// Reduce a reference to its final path segment and classify it.
pub fn parse_reference(reference: &str) -> Result<ProfileReference> {
    let trimmed = reference.trim();
    let candidate = if trimmed.contains('/') {
        let path = trimmed.strip_suffix('/').unwrap_or(trimmed);
        path.rsplit('/').next().unwrap_or_default()
    } else {
        trimmed
    };

    if candidate.is_empty() {
        return Err(LobbyError::InvalidReference(reference.to_string()));
    }

    if is_steamid(candidate) {
        Ok(ProfileReference::SteamId(candidate.to_string()))
    } else {
        Ok(ProfileReference::Vanity(candidate.to_string()))
    }
}

/// Decimal digits only.
pub fn is_steamid(value: &str) -> bool {
    !value.is_empty() && value.chars().all(|c| c.is_ascii_digit())
}
