//=========================================================================
// Score System
//=========================================================================
//
// Registry of live score instances with nearest-instance lookup.
//
// Architecture:
//   ScoreRegistry<H>
//     ├─ members: BTreeMap<seq, Member<H>>     (full set, registration order)
//     ├─ by_id:   HashMap<InstanceId, seq>     (identity index)
//     ├─ groups:  HashMap<String, BTreeSet<seq>>
//     └─ subscribers: Vec<Sender<RegistryEvent>>
//
// Flow:
//   on_spawn() → register() ──┐
//                             ├─→ find_closest*() / members()
//   on_despawn() → unregister()┘
//
//=========================================================================

//=== Module Declarations =================================================

mod event;
mod keeper;
mod lifecycle;
mod lookup;
mod members;
mod registry;

//=== Internal Dependencies ===============================================

use crate::core::spatial::Position;

//=== Public API ==========================================================

pub use event::RegistryEvent;
pub use keeper::ScoreKeeper;
pub use lifecycle::ScoreLifecycle;
pub use members::Members;
pub use registry::ScoreRegistry;

//=== Instance Identity ===================================================

/// Unique identity of a score instance.
///
/// Registry membership is keyed by this value, never by instance contents:
/// two instances at the same position in the same group are still distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(u64);

impl InstanceId {
    /// Wraps a raw id. Callers are responsible for uniqueness; prefer
    /// [`InstanceIdAllocator::next_id`].
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw numeric id.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for InstanceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Hands out unique [`InstanceId`]s.
///
/// Owned by [`crate::Services`]; there is no process-wide counter.
#[derive(Debug, Default)]
pub struct InstanceIdAllocator {
    next: u64,
}

impl InstanceIdAllocator {
    pub fn new() -> Self {
        Self { next: 0 }
    }

    /// Returns a fresh id, never handed out before by this allocator.
    pub fn next_id(&mut self) -> InstanceId {
        let id = InstanceId(self.next);
        self.next += 1;
        id
    }
}

//=== ScoreInstance Trait =================================================

/// A score-tracking entity that can live in a [`ScoreRegistry`].
///
/// Implementors are handles: cloning one must yield another handle to the
/// same entity (same [`id`](Self::id)), typically by wrapping shared state
/// in an `Rc`.
///
/// # Minimal Implementation
///
/// ```rust
/// # use minigame_registry::prelude::*;
/// #[derive(Clone)]
/// struct Beacon {
///     id: InstanceId,
///     at: Position,
/// }
///
/// impl ScoreInstance for Beacon {
///     fn id(&self) -> InstanceId { self.id }
///     fn position(&self) -> Position { self.at }
/// }
/// ```
pub trait ScoreInstance: Clone {
    /// Identity used for registry membership.
    fn id(&self) -> InstanceId;

    /// Current world position. Read fresh on every lookup.
    fn position(&self) -> Position;

    /// Group key this instance belongs to.
    ///
    /// Read once at registration. `None` and `Some("")` both mean
    /// "ungrouped". Default implementation returns `None`.
    fn group_id(&self) -> Option<&str> {
        None
    }
}

//--- Internal Helpers ----------------------------------------------------

/// Normalizes an optional group key: empty strings count as absent.
pub(crate) fn non_empty(group: Option<&str>) -> Option<&str> {
    group.filter(|g| !g.is_empty())
}

//=========================================================================
// Tests
//=========================================================================
