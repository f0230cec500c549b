//! Channel status registry
//!
//! Tracks, per voice channel, whether the karaoke queue is locked and who
//! the channel admin is. Lookups never miss: an unknown channel gets a
//! fresh unlocked entry with no admin.
//!
//! ## Example
//!
//! ```rust,ignore
//! use karaoke_lock::core::{ChannelId, UserId};
//! use karaoke_lock::registry::ChannelRegistry;
//!
//! let registry = ChannelRegistry::new();
//! let status = registry.get(ChannelId(1));
//! status.set_admin(UserId(7));
//! status.lock();
//!
//! assert!(registry.get(ChannelId(1)).is_locked());
//! ```

mod status;
mod store;

pub use status::{ChannelStatus, StatusSnapshot};
pub use store::ChannelRegistry;
