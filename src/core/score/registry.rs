//=========================================================================
// Score Registry
//=========================================================================
//
// Registry store: full set of live score instances plus a group index.
//
// Every registration receives a sequence number. The full set and every
// group subset are keyed by it, which gives all iteration (and therefore
// lookup tie-breaks) a stable registration order.
//
// Invariants:
//   - every seq in `groups` is a key of `members`
//   - `by_id` and `members` hold the same instances
//   - no group entry maps to an empty set
//
//=========================================================================

//=== External Dependencies ===============================================

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crossbeam_channel::Receiver;
use log::{debug, info};

//=== Internal Dependencies ===============================================

use super::event::{EventFanout, RegistryEvent};
use super::members::Members;
use super::{non_empty, InstanceId, ScoreInstance};

//=== Member ==============================================================

/// A registered instance together with the group captured at registration.
#[derive(Debug)]
pub(super) struct Member<H> {
    pub(super) instance: H,
    pub(super) group: Option<String>,
}

//=== ScoreRegistry =======================================================

/// Registry of live score instances.
///
/// Instance owners call [`register`](Self::register) once the instance is
/// active and [`unregister`](Self::unregister) when it goes away. Both are
/// total: duplicates and unknown instances are no-ops.
///
/// The registry never polls instances for liveness. An instance left
/// registered after its owner is gone is still returned by lookups.
///
/// # Examples
///
/// ```rust
/// use minigame_registry::prelude::*;
///
/// let mut ids = InstanceIdAllocator::new();
/// let mut registry = ScoreRegistry::new();
///
/// let keeper = ScoreKeeper::new(ids.next_id(), Some("quiz"), position(0.0, 0.0, 0.0));
/// registry.register(keeper.clone());
///
/// assert!(registry.contains(keeper.id()));
/// assert_eq!(registry.group_len("quiz"), 1);
///
/// registry.unregister(&keeper);
/// assert!(registry.is_empty());
/// assert!(!registry.has_group("quiz"));
/// ```
#[derive(Debug)]
pub struct ScoreRegistry<H: ScoreInstance> {
    pub(super) members: BTreeMap<u64, Member<H>>,
    by_id: HashMap<InstanceId, u64>,
    pub(super) groups: HashMap<String, BTreeSet<u64>>,
    next_seq: u64,
    events: EventFanout,
}

impl<H: ScoreInstance> ScoreRegistry<H> {
    //--- Construction -----------------------------------------------------

    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty registry whose identity index is preallocated for
    /// `capacity` instances. The ordered member map and the group index
    /// grow on demand.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            members: BTreeMap::new(),
            by_id: HashMap::with_capacity(capacity),
            groups: HashMap::new(),
            next_seq: 0,
            events: EventFanout::new(),
        }
    }

    //--- Registration -----------------------------------------------------

    /// Adds `instance` to the registry.
    ///
    /// The instance's group key is read here and captured; later changes
    /// on the instance side are not observed. Returns `true` if the
    /// instance was newly added, `false` if it was already registered (in
    /// which case nothing changes, including its group).
    pub fn register(&mut self, instance: H) -> bool {
        let id = instance.id();
        if self.by_id.contains_key(&id) {
            debug!(target: "scores", "Instance {} already registered, skipping", id);
            return false;
        }

        let seq = self.next_seq;
        self.next_seq += 1;

        let group = non_empty(instance.group_id()).map(str::to_owned);
        if let Some(key) = &group {
            self.groups.entry(key.clone()).or_default().insert(seq);
        }

        debug!(target: "scores", "Registered instance {} (group: {:?})", id, group);

        self.by_id.insert(id, seq);
        self.members.insert(
            seq,
            Member {
                instance,
                group: group.clone(),
            },
        );
        self.events.publish(RegistryEvent::Registered { id, group });
        true
    }

    /// Like [`register`](Self::register), but a `None` handle is a no-op.
    pub fn register_opt(&mut self, instance: Option<H>) -> bool {
        instance.map_or(false, |instance| self.register(instance))
    }

    /// Removes `instance` from the registry and from its group.
    ///
    /// Returns `true` if it was registered. Unregistering twice is safe.
    pub fn unregister(&mut self, instance: &H) -> bool {
        self.unregister_id(instance.id())
    }

    /// Like [`unregister`](Self::unregister), but a `None` handle is a no-op.
    pub fn unregister_opt(&mut self, instance: Option<&H>) -> bool {
        instance.map_or(false, |instance| self.unregister(instance))
    }

    /// Removes the instance with identity `id`, if registered.
    pub fn unregister_id(&mut self, id: InstanceId) -> bool {
        let Some(seq) = self.by_id.remove(&id) else {
            debug!(target: "scores", "Instance {} not registered, skipping removal", id);
            return false;
        };

        let Some(member) = self.members.remove(&seq) else {
            return false;
        };

        if let Some(key) = &member.group {
            self.remove_from_group(key, seq);
        }

        debug!(target: "scores", "Unregistered instance {} (group: {:?})", id, member.group);

        self.events.publish(RegistryEvent::Unregistered {
            id,
            group: member.group,
        });
        true
    }

    /// Removes every instance and group entry.
    ///
    /// Used at teardown. Subscribers stay connected and receive a single
    /// [`RegistryEvent::Cleared`].
    pub fn clear(&mut self) {
        let removed = self.members.len();

        self.members.clear();
        self.by_id.clear();
        self.groups.clear();

        info!(target: "scores", "Score registry cleared ({} instances removed)", removed);
        self.events.publish(RegistryEvent::Cleared { removed });
    }

    //--- Events -----------------------------------------------------------

    /// Subscribes to membership changes.
    ///
    /// The returned receiver buffers up to `capacity` events; events
    /// published while it is full are lost for that subscriber only.
    /// Dropping the receiver unsubscribes.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn subscribe(&mut self, capacity: usize) -> Receiver<RegistryEvent> {
        self.events.subscribe(capacity)
    }

    /// Number of live subscriptions (disconnected ones are pruned lazily,
    /// on the next publish).
    pub fn subscriber_count(&self) -> usize {
        self.events.subscriber_count()
    }

    //--- Query API --------------------------------------------------------

    /// Number of registered instances.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Returns `true` if an instance with identity `id` is registered.
    pub fn contains(&self, id: InstanceId) -> bool {
        self.by_id.contains_key(&id)
    }

    /// Returns `true` if `group` currently has at least one member.
    pub fn has_group(&self, group: &str) -> bool {
        self.groups.contains_key(group)
    }

    /// Number of instances registered under `group` (0 if none).
    pub fn group_len(&self, group: &str) -> usize {
        self.groups.get(group).map_or(0, BTreeSet::len)
    }

    /// Iterates over all non-empty group keys, in no particular order.
    pub fn group_ids(&self) -> impl Iterator<Item = &str> {
        self.groups.keys().map(String::as_str)
    }

    /// Returns the group captured for `id` at registration.
    pub fn group_of(&self, id: InstanceId) -> Option<&str> {
        let seq = self.by_id.get(&id)?;
        self.members.get(seq)?.group.as_deref()
    }

    /// Live, read-only view over every registered instance.
    ///
    /// The view borrows the registry, so it always reflects the current
    /// state and cannot outlive a later mutation.
    pub fn members(&self) -> Members<'_, H> {
        Members::new(&self.members, &self.by_id)
    }

    //--- Internal Helpers -------------------------------------------------

    fn remove_from_group(&mut self, key: &str, seq: u64) {
        let now_empty = match self.groups.get_mut(key) {
            Some(set) => {
                set.remove(&seq);
                set.is_empty()
            }
            None => false,
        };

        if now_empty {
            debug!(target: "scores", "Group {:?} is empty, removing", key);
            self.groups.remove(key);
        }
    }
}

//--- Trait Implementations -----------------------------------------------

impl<H: ScoreInstance> Default for ScoreRegistry<H> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Tests
//=========================================================================
