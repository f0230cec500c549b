//! Guild permission sets

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};

bitflags::bitflags! {
    /// Guild-wide permissions held by a member
    ///
    /// Bit positions follow the platform's permission integer. Plain serde
    /// reads flag names (`"MANAGE_CHANNELS | MOVE_MEMBERS"`); use
    /// [`deserialize_lenient`] where the raw integer may show up instead.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
    pub struct GuildPermissions: u64 {
        /// Every permission, overrides all channel restrictions
        const ADMINISTRATOR = 1 << 3;
        /// Create, edit and delete channels
        const MANAGE_CHANNELS = 1 << 4;
        /// Edit guild settings
        const MANAGE_GUILD = 1 << 5;
        /// Server-mute members in voice channels
        const MUTE_MEMBERS = 1 << 22;
        /// Server-deafen members in voice channels
        const DEAFEN_MEMBERS = 1 << 23;
        /// Move members between voice channels
        const MOVE_MEMBERS = 1 << 24;
        /// Manage roles below the member's highest role
        const MANAGE_ROLES = 1 << 28;
    }
}

impl GuildPermissions {
    /// Permissions that bypass channel locks unless configured otherwise
    pub const DEFAULT_BYPASS: Self = Self::MANAGE_CHANNELS.union(Self::MOVE_MEMBERS);

    /// Check if this set lets a member bypass a locked channel
    ///
    /// `ADMINISTRATOR` always does; otherwise the member needs at least
    /// one permission from `bypass`.
    pub fn bypasses_lock(self, bypass: GuildPermissions) -> bool {
        self.contains(Self::ADMINISTRATOR) || self.intersects(bypass)
    }
}

/// Permission value as the platform may send it
#[derive(Deserialize)]
#[serde(untagged)]
enum RawPermissions {
    Bits(u64),
    Text(String),
}

/// Read permissions from a raw integer, a decimal string or flag names
///
/// Bits with no named flag are dropped. Meant for
/// `#[serde(deserialize_with = "...")]` on fields fed by the platform.
pub fn deserialize_lenient<'de, D>(deserializer: D) -> Result<GuildPermissions, D::Error>
where
    D: Deserializer<'de>,
{
    match RawPermissions::deserialize(deserializer)? {
        RawPermissions::Bits(bits) => Ok(GuildPermissions::from_bits_truncate(bits)),
        RawPermissions::Text(text) => match text.trim().parse::<u64>() {
            Ok(bits) => Ok(GuildPermissions::from_bits_truncate(bits)),
            Err(_) => bitflags::parser::from_str(&text).map_err(D::Error::custom),
        },
    }
}
