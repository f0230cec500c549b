//! Core types for the karaoke gate
//!
//! This module provides the fundamental types used throughout the crate:
//! - `ChannelId` / `UserId` / `GuildId` - Platform snowflakes
//! - `CallerContext` - Resolved facts about one command invocation
//! - `GateError` - Error types

pub mod context;
pub mod error;
pub mod ids;

pub use context::CallerContext;
pub use error::{GateError, GateResult};
pub use ids::{ChannelId, GuildId, UserId};
