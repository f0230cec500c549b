//! Karaoke access gate
//!
//! Decides whether a caller may run a karaoke queue command.
//!
//! # Overview
//!
//! A voice channel can be locked by its admin. While it is locked, only the
//! admin or a member with an elevated guild permission may drive the queue,
//! and always from the voice channel's own text chat.
//!
//! # Example
//!
//! ```ignore
//! use karaoke_lock::core::{CallerContext, ChannelId, UserId};
//! use karaoke_lock::gate::{authorize, DenyReason, Verdict};
//! use karaoke_lock::registry::ChannelRegistry;
//!
//! let registry = ChannelRegistry::new();
//! let status = registry.get(ChannelId(1));
//! status.set_admin(UserId(7));
//! status.lock();
//!
//! let ctx = CallerContext::new(Some(ChannelId(1)), ChannelId(1), UserId(9));
//! assert_eq!(authorize(&ctx, &registry), Verdict::Deny(DenyReason::ChannelLocked));
//! ```
//!
//! # Rules
//!
//! | Check | Verdict |
//! |-------|---------|
//! | Caller not in a voice channel | `deny_not_in_voice_channel` |
//! | Invocation channel != voice channel | `deny_wrong_channel` |
//! | Channel unlocked | `allow_unlocked` |
//! | Caller is channel admin | `allow_channel_admin` |
//! | Caller has elevated permission | `allow_elevated_permission` |
//! | Anything else | `deny_channel_locked` |

mod engine;
mod precondition;
mod verdict;

pub use engine::authorize;
pub use precondition::{GuildContext, Invocation, KaraokePrecondition, MemberSnapshot, StaticGuild};
pub use verdict::{AllowReason, DenyReason, Verdict};
