//! Access decision engine
//!
//! Turns a `CallerContext` into a `Verdict` by reading the channel
//! registry. Rules are checked in order and the first match decides:
//!
//! 1. Caller not in a voice channel -> deny
//! 2. Command issued outside the caller's voice channel -> deny
//! 3. Channel unlocked -> allow
//! 4. Caller is the channel admin -> allow
//! 5. Caller holds an elevated guild permission -> allow
//! 6. Otherwise -> deny

use crate::core::CallerContext;
use crate::registry::ChannelRegistry;

use super::verdict::{AllowReason, DenyReason, Verdict};

/// Decide whether the caller may run the gated command
///
/// Never writes to the registry beyond the default entry `get` creates for
/// a channel seen for the first time, and never blocks on I/O.
pub fn authorize(ctx: &CallerContext, registry: &ChannelRegistry) -> Verdict {
    let Some(voice_channel) = ctx.caller_voice_channel else {
        return Verdict::Deny(DenyReason::NotInVoiceChannel);
    };

    // Voice channels double as their own text chat, so the ids must match
    if ctx.invocation_channel != voice_channel {
        return Verdict::Deny(DenyReason::WrongChannel);
    }

    let status = registry.get(voice_channel);

    if !status.is_locked() {
        return Verdict::Allow(AllowReason::Unlocked);
    }

    if status.is_admin(ctx.caller) {
        return Verdict::Allow(AllowReason::ChannelAdmin);
    }

    if ctx.has_elevated_permission {
        return Verdict::Allow(AllowReason::ElevatedPermission);
    }

    Verdict::Deny(DenyReason::ChannelLocked)
}

/// Log a verdict with the context that produced it
pub(crate) fn log_verdict(ctx: &CallerContext, verdict: &Verdict) {
    let voice_channel = ctx
        .caller_voice_channel
        .map(|id| id.to_string())
        .unwrap_or_else(|| "none".to_string());

    if verdict.is_allowed() {
        tracing::debug!(
            caller = %ctx.caller,
            voice_channel = %voice_channel,
            invocation_channel = %ctx.invocation_channel,
            reason = verdict.reason_code(),
            "Karaoke command allowed"
        );
    } else {
        tracing::info!(
            caller = %ctx.caller,
            voice_channel = %voice_channel,
            invocation_channel = %ctx.invocation_channel,
            elevated = ctx.has_elevated_permission,
            reason = verdict.reason_code(),
            "Karaoke command denied"
        );
    }
}
