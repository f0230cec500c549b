//! Caller context - resolved facts about a single command invocation

use serde::{Deserialize, Serialize};

use super::ids::{ChannelId, UserId};

/// Everything the gate needs to know about who invoked the command and where
///
/// Built fresh by the dispatcher (or `KaraokePrecondition`) for every
/// invocation and dropped once the verdict is out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallerContext {
    /// Voice channel the caller currently occupies, if any
    pub caller_voice_channel: Option<ChannelId>,

    /// Channel the command text was issued in
    pub invocation_channel: ChannelId,

    /// The invoking user
    pub caller: UserId,

    /// Whether the caller holds a guild-wide permission that bypasses channel locks
    #[serde(default)]
    pub has_elevated_permission: bool,
}

impl CallerContext {
    /// Create a context for a caller without elevated permission
    pub fn new(
        caller_voice_channel: Option<ChannelId>,
        invocation_channel: ChannelId,
        caller: UserId,
    ) -> Self {
        Self {
            caller_voice_channel,
            invocation_channel,
            caller,
            has_elevated_permission: false,
        }
    }

    /// Set the elevated permission flag
    pub fn with_elevated_permission(mut self, elevated: bool) -> Self {
        self.has_elevated_permission = elevated;
        self
    }

    /// Check if the caller is connected to any voice channel
    pub fn in_voice_channel(&self) -> bool {
        self.caller_voice_channel.is_some()
    }
}
