//=========================================================================
// Minigame Services
//
// Explicitly constructed container for the runtime's shared managers.
//
// Architecture:
// ```text
//     ServicesBuilder  ──build()──>  Services<H>  ──teardown()──>  [empty]
//         │                            │
//         ├─ with_initial_capacity()   ├─ scores: ScoreRegistry<H>
//         └─ with_event_capacity()     └─ ids: InstanceIdAllocator
// ```
//
// One `Services` is built at process start and handed by reference to
// whatever needs it. Nothing here is reachable through a global.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::Receiver;
use log::info;

//=== Internal Dependencies ===============================================

use crate::core::score::{
    InstanceId, InstanceIdAllocator, RegistryEvent, ScoreInstance, ScoreKeeper, ScoreLifecycle,
    ScoreRegistry,
};
use crate::core::spatial::Position;

//=== ServicesBuilder =====================================================

/// Builder for configuring and constructing [`Services`].
///
/// # Default Values
///
/// - **Initial capacity**: 32 instances
/// - **Event capacity**: 64 events per subscriber
///
/// # Examples
///
/// ```rust
/// use minigame_registry::prelude::*;
///
/// let services = ServicesBuilder::new()
///     .with_initial_capacity(128)
///     .with_event_capacity(16)
///     .build::<ScoreKeeper>();
///
/// assert!(services.scores.is_empty());
/// ```
#[derive(Debug, Clone)]
pub struct ServicesBuilder {
    initial_capacity: usize,
    event_capacity: usize,
}

impl ServicesBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            initial_capacity: 32,
            event_capacity: 64,
        }
    }

    /// Sets how many score instances the registry's identity index is
    /// preallocated for. Other registry storage grows on demand.
    ///
    /// Default: 32
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_initial_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Initial capacity must be positive");
        self.initial_capacity = capacity;
        self
    }

    /// Sets the channel size used by [`Services::subscribe_scores`].
    ///
    /// Subscribers that fall further behind than this lose events.
    ///
    /// Default: 64
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn with_event_capacity(mut self, capacity: usize) -> Self {
        assert!(capacity > 0, "Event capacity must be positive");
        self.event_capacity = capacity;
        self
    }

    /// Builds the services container.
    pub fn build<H: ScoreInstance>(self) -> Services<H> {
        info!(
            "Building services (capacity: {}, event capacity: {})",
            self.initial_capacity, self.event_capacity
        );

        Services {
            scores: ScoreRegistry::with_capacity(self.initial_capacity),
            ids: InstanceIdAllocator::new(),
            event_capacity: self.event_capacity,
        }
    }
}

impl Default for ServicesBuilder {
    fn default() -> Self {
        Self::new()
    }
}

//=== Services ============================================================

/// Shared managers for one minigame runtime.
///
/// Create via [`ServicesBuilder`]; pass `&Services` / `&mut Services` to
/// consumers.
#[derive(Debug)]
pub struct Services<H: ScoreInstance> {
    /// Registry of live score instances.
    pub scores: ScoreRegistry<H>,

    ids: InstanceIdAllocator,
    event_capacity: usize,
}

impl<H: ScoreInstance> Services<H> {
    /// Returns a fresh instance id.
    pub fn next_instance_id(&mut self) -> InstanceId {
        self.ids.next_id()
    }

    /// Subscribes to score registry changes using the configured capacity.
    pub fn subscribe_scores(&mut self) -> Receiver<RegistryEvent> {
        self.scores.subscribe(self.event_capacity)
    }

    /// Releases all shared state.
    ///
    /// Instance ids keep counting up, so ids handed out before teardown are
    /// never reused.
    pub fn teardown(&mut self) {
        info!("Tearing down services");
        self.scores.clear();
    }
}

impl Services<ScoreKeeper> {
    /// Creates a keeper with a fresh id and runs its spawn hook.
    ///
    /// The returned handle is what the owner keeps; pass it to
    /// [`ScoreLifecycle::on_despawn`] when the owner goes away.
    pub fn spawn_keeper(&mut self, group: Option<&str>, position: Position) -> ScoreKeeper {
        let keeper = ScoreKeeper::new(self.next_instance_id(), group, position);
        keeper.on_spawn(&mut self.scores);
        keeper
    }

    /// Adds `points` to the keeper in `group` nearest to `origin`.
    ///
    /// Returns the keeper's new total, or `None` if no keeper matched.
    pub fn award_closest(
        &self,
        group: Option<&str>,
        origin: Option<Position>,
        points: u32,
    ) -> Option<u32> {
        self.scores
            .find_closest_in_group(group, origin)
            .map(|keeper| keeper.add_points(points))
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
