//=========================================================================
// Lifecycle Hooks
//=========================================================================
//
// Owner-side hooks that keep registry membership in step with an
// instance's lifetime.
//
//   spawn ──on_spawn()──> registered ──on_despawn()──> not registered
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{ScoreInstance, ScoreKeeper, ScoreRegistry};

//=== ScoreLifecycle Trait ================================================

/// Registration hooks invoked by an instance's owner.
///
/// Call [`on_spawn`](Self::on_spawn) once the instance can report its
/// position and group, and [`on_despawn`](Self::on_despawn) exactly once
/// when it is destroyed or disabled. The registry cannot detect a missed
/// `on_despawn`; the stale instance keeps showing up in lookups.
///
/// Both hooks have default implementations; override them to add
/// owner-side bookkeeping, and call through to the registry.
pub trait ScoreLifecycle: ScoreInstance {
    /// Called when the owner becomes active.
    fn on_spawn(&self, registry: &mut ScoreRegistry<Self>) {
        registry.register(self.clone());
    }

    /// Called when the owner is destroyed or permanently disabled.
    fn on_despawn(&self, registry: &mut ScoreRegistry<Self>) {
        registry.unregister(self);
    }
}

impl ScoreLifecycle for ScoreKeeper {}

//=========================================================================
// Tests
//=========================================================================
