//! Guild permissions
//!
//! Members carry a guild-wide permission set. A configurable subset of it
//! (plus `ADMINISTRATOR`, always) lets a member bypass any channel lock.
//!
//! ## Example
//!
//! ```rust,ignore
//! use karaoke_lock::permissions::GuildPermissions;
//!
//! let held = GuildPermissions::MOVE_MEMBERS;
//! assert!(held.bypasses_lock(GuildPermissions::DEFAULT_BYPASS));
//! ```

mod guild;

pub use guild::{deserialize_lenient, GuildPermissions};
