//! Platform identifiers
//!
//! Channels and users are named by 64-bit snowflakes. They arrive as
//! decimal strings from the platform, so both types parse from text.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::GateError;

macro_rules! snowflake_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub u64);

        impl $name {
            /// Create an id from its raw value
            pub const fn new(id: u64) -> Self {
                Self(id)
            }

            /// Get the raw value
            pub const fn get(self) -> u64 {
                self.0
            }
        }

        impl From<u64> for $name {
            fn from(id: u64) -> Self {
                Self(id)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = GateError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                s.trim()
                    .parse::<u64>()
                    .map(Self)
                    .map_err(|_| GateError::InvalidId(s.to_string()))
            }
        }
    };
}

snowflake_id! {
    /// Identity of a channel (voice or text)
    ChannelId
}

snowflake_id! {
    /// Identity of a user
    UserId
}

snowflake_id! {
    /// Identity of a guild
    GuildId
}
