//! Per-voice-channel lock state

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use serde::{Deserialize, Serialize};

use crate::core::UserId;

/// Raw admin value meaning "no admin assigned"
///
/// Platform snowflakes are never zero, so no real caller can match it.
const NO_ADMIN: u64 = 0;

/// Mutable lock state for one voice channel
///
/// Both fields are atomics so lock/unlock handlers can flip them while the
/// gate reads them. Each field is read on its own; there is no cross-field
/// transaction.
#[derive(Debug, Default)]
pub struct ChannelStatus {
    admin: AtomicU64,
    locked: AtomicBool,
}

impl ChannelStatus {
    /// Create an unlocked status with no admin
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the channel is locked
    pub fn is_locked(&self) -> bool {
        self.locked.load(Ordering::Acquire)
    }

    /// Lock the channel. Returns true if it was unlocked before.
    pub fn lock(&self) -> bool {
        !self.locked.swap(true, Ordering::AcqRel)
    }

    /// Unlock the channel. Returns true if it was locked before.
    pub fn unlock(&self) -> bool {
        self.locked.swap(false, Ordering::AcqRel)
    }

    /// Set the lock flag directly
    pub fn set_locked(&self, locked: bool) {
        self.locked.store(locked, Ordering::Release);
    }

    /// Get the channel admin, if one is assigned
    pub fn admin(&self) -> Option<UserId> {
        match self.admin.load(Ordering::Acquire) {
            NO_ADMIN => None,
            id => Some(UserId(id)),
        }
    }

    /// Assign the channel admin
    ///
    /// `UserId(0)` is the unset sentinel, so assigning it clears the admin.
    pub fn set_admin(&self, admin: UserId) {
        self.admin.store(admin.get(), Ordering::Release);
    }

    /// Remove the channel admin
    pub fn clear_admin(&self) {
        self.admin.store(NO_ADMIN, Ordering::Release);
    }

    /// Check if `user` is this channel's admin
    ///
    /// Always false while no admin is assigned.
    pub fn is_admin(&self, user: UserId) -> bool {
        self.admin() == Some(user)
    }

    /// Take a plain copy of the current state
    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            locked: self.is_locked(),
            admin: self.admin(),
        }
    }
}

/// Point-in-time copy of a `ChannelStatus`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    /// Whether the channel was locked
    pub locked: bool,
    /// The admin at the time, if any
    pub admin: Option<UserId>,
}
