//! Karaoke precondition - resolves the caller and runs the gate
//!
//! The dispatcher hands over raw ids for an invocation. The precondition
//! asks the platform (through `GuildContext`) where the member currently is
//! and what they may do, then feeds the result to `authorize`.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::GateConfig;
use crate::core::{CallerContext, ChannelId, GateError, GateResult, GuildId, UserId};
use crate::permissions::{self, GuildPermissions};
use crate::registry::ChannelRegistry;

use super::engine::{authorize, log_verdict};
use super::verdict::Verdict;

/// Raw facts about a command invocation, as received from the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invocation {
    /// Guild the command was issued in
    pub guild: GuildId,
    /// Channel the command text was issued in
    pub channel: ChannelId,
    /// The invoking user
    pub user: UserId,
}

impl Invocation {
    /// Create a new invocation record
    pub fn new(guild: GuildId, channel: ChannelId, user: UserId) -> Self {
        Self {
            guild,
            channel,
            user,
        }
    }
}

/// What the platform reports about a guild member
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberSnapshot {
    /// Voice channel the member is connected to
    #[serde(default)]
    pub voice_channel: Option<ChannelId>,

    /// Guild-wide permissions, as flag names or the platform's raw integer
    #[serde(default, deserialize_with = "permissions::deserialize_lenient")]
    pub permissions: GuildPermissions,
}

impl MemberSnapshot {
    /// Create a snapshot for a member in `voice_channel`
    pub fn new(voice_channel: Option<ChannelId>, permissions: GuildPermissions) -> Self {
        Self {
            voice_channel,
            permissions,
        }
    }
}

/// Platform lookups the precondition needs
#[async_trait]
pub trait GuildContext: Send + Sync {
    /// Fetch the current state of a guild member
    async fn member(&self, guild: GuildId, user: UserId) -> GateResult<MemberSnapshot>;
}

/// In-memory `GuildContext` backed by a member table
///
/// Used by the demo binary and tests in place of a live platform client.
#[derive(Debug, Clone, Default)]
pub struct StaticGuild {
    members: HashMap<(GuildId, UserId), MemberSnapshot>,
}

impl StaticGuild {
    /// Create an empty member table
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a member
    pub fn with_member(mut self, guild: GuildId, user: UserId, member: MemberSnapshot) -> Self {
        self.insert(guild, user, member);
        self
    }

    /// Add or replace a member in place
    pub fn insert(&mut self, guild: GuildId, user: UserId, member: MemberSnapshot) {
        self.members.insert((guild, user), member);
    }
}

#[async_trait]
impl GuildContext for StaticGuild {
    async fn member(&self, guild: GuildId, user: UserId) -> GateResult<MemberSnapshot> {
        self.members.get(&(guild, user)).copied().ok_or_else(|| {
            GateError::context_unavailable(format!("member {} not found in guild {}", user, guild))
        })
    }
}

/// Gate for the karaoke commands
#[derive(Debug, Clone, Default)]
pub struct KaraokePrecondition {
    config: GateConfig,
}

impl KaraokePrecondition {
    /// Create a precondition with the given configuration
    pub fn new(config: GateConfig) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Build the caller context for an invocation
    pub async fn resolve(
        &self,
        invocation: &Invocation,
        guild: &dyn GuildContext,
    ) -> GateResult<CallerContext> {
        let member = guild.member(invocation.guild, invocation.user).await?;
        let elevated = member
            .permissions
            .bypasses_lock(self.config.bypass_permissions);

        Ok(
            CallerContext::new(member.voice_channel, invocation.channel, invocation.user)
                .with_elevated_permission(elevated),
        )
    }

    /// Resolve the caller and decide whether the command may run
    pub async fn check(
        &self,
        invocation: &Invocation,
        guild: &dyn GuildContext,
        registry: &ChannelRegistry,
    ) -> GateResult<Verdict> {
        let ctx = self.resolve(invocation, guild).await?;
        Ok(self.decide(&ctx, registry))
    }

    /// Run the gate on an already resolved context
    pub fn decide(&self, ctx: &CallerContext, registry: &ChannelRegistry) -> Verdict {
        let verdict = authorize(ctx, registry);
        if self.config.log_decisions {
            log_verdict(ctx, &verdict);
        }
        verdict
    }
}
