//! KaraokeService - owns the channel registry and serves gate checks
//!
//! The `KaraokeService` is responsible for:
//! - Owning the single `ChannelRegistry` for the process
//! - Running gate checks for incoming invocations
//! - Applying lock, unlock and admin changes from other commands

use std::sync::Arc;

use futures::future::join_all;

use crate::config::GateConfig;
use crate::core::{CallerContext, ChannelId, GateError, GateResult, UserId};
use crate::gate::{GuildContext, Invocation, KaraokePrecondition, Verdict};
use crate::registry::{ChannelRegistry, StatusSnapshot};

/// Shared handle to the karaoke gate
///
/// Built once at startup. Clones share the same registry, so a lock set
/// through one clone is seen by every handler.
#[derive(Clone)]
pub struct KaraokeService {
    /// Lock state for every voice channel seen so far
    registry: Arc<ChannelRegistry>,
    /// Gate configured for this service
    precondition: Arc<KaraokePrecondition>,
}

impl KaraokeService {
    /// Create a service with an empty registry
    pub fn new(config: GateConfig) -> Self {
        Self::with_registry(Arc::new(ChannelRegistry::new()), config)
    }

    /// Create a service around an existing registry
    pub fn with_registry(registry: Arc<ChannelRegistry>, config: GateConfig) -> Self {
        Self {
            registry,
            precondition: Arc::new(KaraokePrecondition::new(config)),
        }
    }

    /// Get a reference to the channel registry
    pub fn registry(&self) -> &Arc<ChannelRegistry> {
        &self.registry
    }

    /// Get the gate configuration
    pub fn config(&self) -> &GateConfig {
        self.precondition.config()
    }

    /// Run the gate on an already resolved caller context
    pub fn authorize(&self, ctx: &CallerContext) -> Verdict {
        self.precondition.decide(ctx, &self.registry)
    }

    /// Resolve the caller through the platform and run the gate
    pub async fn check(
        &self,
        invocation: &Invocation,
        guild: &dyn GuildContext,
    ) -> GateResult<Verdict> {
        self.precondition
            .check(invocation, guild, &self.registry)
            .await
    }

    /// Check a batch of invocations concurrently
    ///
    /// Each invocation runs on its own task. Results come back in input order.
    pub async fn dispatch_all<G>(
        &self,
        guild: Arc<G>,
        invocations: Vec<Invocation>,
    ) -> Vec<GateResult<Verdict>>
    where
        G: GuildContext + 'static,
    {
        let tasks = invocations.into_iter().map(|invocation| {
            let service = self.clone();
            let guild = guild.clone();
            tokio::spawn(async move { service.check(&invocation, guild.as_ref()).await })
        });

        join_all(tasks)
            .await
            .into_iter()
            .map(|joined| match joined {
                Ok(result) => result,
                Err(e) => {
                    tracing::error!(error = %e, "Gate check task failed");
                    Err(GateError::other(format!("gate check task failed: {}", e)))
                }
            })
            .collect()
    }

    /// Lock a voice channel. Returns true if it was unlocked before.
    pub fn lock(&self, channel: ChannelId) -> bool {
        let changed = self.registry.get(channel).lock();
        if changed {
            tracing::info!(channel = %channel, "Voice channel locked");
        }
        changed
    }

    /// Unlock a voice channel. Returns true if it was locked before.
    pub fn unlock(&self, channel: ChannelId) -> bool {
        let changed = self.registry.get(channel).unlock();
        if changed {
            tracing::info!(channel = %channel, "Voice channel unlocked");
        }
        changed
    }

    /// Make `user` the admin of a voice channel
    pub fn assign_admin(&self, channel: ChannelId, user: UserId) {
        self.registry.get(channel).set_admin(user);
        tracing::info!(channel = %channel, admin = %user, "Voice channel admin assigned");
    }

    /// Get the current state of a voice channel
    pub fn status(&self, channel: ChannelId) -> StatusSnapshot {
        self.registry.get(channel).snapshot()
    }
}

impl Default for KaraokeService {
    fn default() -> Self {
        Self::new(GateConfig::default())
    }
}

impl std::fmt::Debug for KaraokeService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KaraokeService")
            .field("channels", &self.registry.len())
            .field("config", self.config())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::GuildId;
    use crate::gate::{AllowReason, DenyReason, MemberSnapshot, StaticGuild};
    use crate::permissions::GuildPermissions;

    const GUILD: GuildId = GuildId(100);
    const V1: ChannelId = ChannelId(1);
    const V2: ChannelId = ChannelId(2);
    const ADMIN: UserId = UserId(7);
    const USER: UserId = UserId(9);

    #[test]
    fn test_lock_unlock() {
        let service = KaraokeService::default();

        assert!(service.lock(V1));
        assert!(!service.lock(V1));
        assert!(service.status(V1).locked);

        assert!(service.unlock(V1));
        assert!(!service.status(V1).locked);
    }

    #[test]
    fn test_clones_share_registry() {
        let service1 = KaraokeService::default();
        let service2 = service1.clone();

        service1.assign_admin(V1, ADMIN);
        service1.lock(V1);

        assert_eq!(
            service2.status(V1),
            StatusSnapshot {
                locked: true,
                admin: Some(ADMIN),
            }
        );
        assert!(Arc::ptr_eq(service1.registry(), service2.registry()));
    }

    #[test]
    fn test_authorize_follows_lock_changes() {
        let service = KaraokeService::default();
        service.assign_admin(V1, ADMIN);
        let ctx = CallerContext::new(Some(V1), V1, USER);

        assert!(service.authorize(&ctx).is_allowed());

        service.lock(V1);
        assert_eq!(
            service.authorize(&ctx),
            Verdict::Deny(DenyReason::ChannelLocked)
        );

        // Denial is terminal for that call only; retry after unlock succeeds
        service.unlock(V1);
        assert_eq!(
            service.authorize(&ctx),
            Verdict::Allow(AllowReason::Unlocked)
        );
    }

    #[tokio::test]
    async fn test_check_through_guild() {
        let service = KaraokeService::default();
        service.assign_admin(V1, ADMIN);
        service.lock(V1);

        let guild = StaticGuild::new()
            .with_member(GUILD, ADMIN, MemberSnapshot::new(Some(V1), GuildPermissions::empty()))
            .with_member(GUILD, USER, MemberSnapshot::new(Some(V1), GuildPermissions::empty()));

        let verdict = service
            .check(&Invocation::new(GUILD, V1, ADMIN), &guild)
            .await
            .unwrap();
        assert_eq!(verdict, Verdict::Allow(AllowReason::ChannelAdmin));

        let verdict = service
            .check(&Invocation::new(GUILD, V1, USER), &guild)
            .await
            .unwrap();
        assert_eq!(verdict, Verdict::Deny(DenyReason::ChannelLocked));
    }

    #[tokio::test]
    async fn test_dispatch_all_keeps_order() {
        let service = KaraokeService::default();
        service.assign_admin(V1, ADMIN);
        service.lock(V1);

        let guild = Arc::new(
            StaticGuild::new()
                .with_member(GUILD, ADMIN, MemberSnapshot::new(Some(V1), GuildPermissions::empty()))
                .with_member(GUILD, USER, MemberSnapshot::new(Some(V1), GuildPermissions::empty())),
        );

        let invocations = vec![
            Invocation::new(GUILD, V1, ADMIN),
            Invocation::new(GUILD, V1, USER),
            Invocation::new(GUILD, V2, USER),
            Invocation::new(GUILD, V1, UserId(404)),
        ];

        let results = service.dispatch_all(guild, invocations).await;
        assert_eq!(results.len(), 4);
        assert_eq!(
            *results[0].as_ref().unwrap(),
            Verdict::Allow(AllowReason::ChannelAdmin)
        );
        assert_eq!(
            *results[1].as_ref().unwrap(),
            Verdict::Deny(DenyReason::ChannelLocked)
        );
        assert_eq!(
            *results[2].as_ref().unwrap(),
            Verdict::Deny(DenyReason::WrongChannel)
        );
        assert!(matches!(results[3], Err(GateError::ContextUnavailable(_))));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_first_access_shares_entry() {
        let service = KaraokeService::default();
        let channel = ChannelId(555);

        let guild = Arc::new((0..64u64).fold(StaticGuild::new(), |guild, i| {
            guild.with_member(
                GUILD,
                UserId(1000 + i),
                MemberSnapshot::new(Some(channel), GuildPermissions::empty()),
            )
        }));
        let invocations = (0..64u64)
            .map(|i| Invocation::new(GUILD, channel, UserId(1000 + i)))
            .collect();

        let results = service.dispatch_all(guild, invocations).await;
        assert!(results
            .iter()
            .all(|r| matches!(r, Ok(Verdict::Allow(AllowReason::Unlocked)))));
        assert_eq!(service.registry().len(), 1);

        service.lock(channel);
        assert!(service.registry().get(channel).is_locked());
    }
}
