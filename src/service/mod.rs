//! Karaoke service module
//!
//! Hosts the process-wide channel registry:
//!
//! - `KaraokeService` - Owns the registry, runs gate checks, applies lock changes

mod karaoke;

pub use karaoke::KaraokeService;
