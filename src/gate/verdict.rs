//! Gate verdict types
//!
//! - `Verdict` - allow/deny outcome of one authorization check
//! - `AllowReason` / `DenyReason` - which rule decided it

use serde::{Deserialize, Serialize};

/// Why an invocation was allowed
///
/// Serialized names match `code()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AllowReason {
    /// The caller's voice channel is not locked
    #[serde(rename = "allow_unlocked")]
    Unlocked,
    /// The caller is the admin of the locked channel
    #[serde(rename = "allow_channel_admin")]
    ChannelAdmin,
    /// The caller holds a guild permission that bypasses locks
    #[serde(rename = "allow_elevated_permission")]
    ElevatedPermission,
}

impl AllowReason {
    /// Stable reason code for logs and audit records
    pub fn code(self) -> &'static str {
        match self {
            AllowReason::Unlocked => "allow_unlocked",
            AllowReason::ChannelAdmin => "allow_channel_admin",
            AllowReason::ElevatedPermission => "allow_elevated_permission",
        }
    }
}

/// Why an invocation was denied
///
/// Serialized names match `code()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DenyReason {
    /// The caller is not connected to any voice channel
    #[serde(rename = "deny_not_in_voice_channel")]
    NotInVoiceChannel,
    /// The command was not issued from the caller's voice channel
    #[serde(rename = "deny_wrong_channel")]
    WrongChannel,
    /// The channel is locked and the caller may not bypass it
    #[serde(rename = "deny_channel_locked")]
    ChannelLocked,
}

impl DenyReason {
    /// Stable reason code for logs and audit records
    pub fn code(self) -> &'static str {
        match self {
            DenyReason::NotInVoiceChannel => "deny_not_in_voice_channel",
            DenyReason::WrongChannel => "deny_wrong_channel",
            DenyReason::ChannelLocked => "deny_channel_locked",
        }
    }

    /// Text the dispatcher can show the caller
    pub fn message(self) -> &'static str {
        match self {
            DenyReason::NotInVoiceChannel => "You must be in a voice channel to use this command.",
            DenyReason::WrongChannel => {
                "This command must be used in the text chat of your current voice channel."
            }
            DenyReason::ChannelLocked => "This voice channel is locked by its admin.",
        }
    }
}

/// Outcome of an authorization check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "decision", content = "reason", rename_all = "snake_case")]
pub enum Verdict {
    /// Proceed with the command
    Allow(AllowReason),
    /// Reject the command
    Deny(DenyReason),
}

impl Verdict {
    /// Check if the command may proceed
    pub fn is_allowed(&self) -> bool {
        matches!(self, Verdict::Allow(_))
    }

    /// Stable reason code of the deciding rule
    pub fn reason_code(&self) -> &'static str {
        match self {
            Verdict::Allow(reason) => reason.code(),
            Verdict::Deny(reason) => reason.code(),
        }
    }

    /// Get the denial reason, if denied
    pub fn deny_reason(&self) -> Option<DenyReason> {
        match self {
            Verdict::Allow(_) => None,
            Verdict::Deny(reason) => Some(*reason),
        }
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Allow(_) => write!(f, "Allowed ({})", self.reason_code()),
            Verdict::Deny(reason) => write!(f, "Denied: {}", reason.message()),
        }
    }
}
