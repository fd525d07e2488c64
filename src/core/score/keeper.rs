//=========================================================================
// Score Keeper
//=========================================================================
//
// Concrete score instance: shared handle over an id, a fixed group key,
// a movable position and a point total.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::cell::Cell;
use std::rc::Rc;

//=== Internal Dependencies ===============================================

use super::{non_empty, InstanceId, ScoreInstance};
use crate::core::spatial::Position;

//=== ScoreKeeper =========================================================

/// Shared handle to one minigame's score tracker.
///
/// Clones share identity and state, so the owner can keep moving the
/// keeper and awarding points while the registry holds another clone.
/// `Rc`-based: the keeper (and any registry holding it) stays on one
/// thread.
#[derive(Debug, Clone)]
pub struct ScoreKeeper {
    inner: Rc<KeeperState>,
}

#[derive(Debug)]
struct KeeperState {
    id: InstanceId,
    group: Option<String>,
    position: Cell<Position>,
    points: Cell<u32>,
}

impl ScoreKeeper {
    //--- Construction -----------------------------------------------------

    /// Creates a keeper with zero points.
    ///
    /// An empty `group` is stored as ungrouped.
    pub fn new(id: InstanceId, group: Option<&str>, position: Position) -> Self {
        Self {
            inner: Rc::new(KeeperState {
                id,
                group: non_empty(group).map(str::to_owned),
                position: Cell::new(position),
                points: Cell::new(0),
            }),
        }
    }

    //--- Position ---------------------------------------------------------

    /// Moves the keeper. Subsequent lookups see the new position.
    pub fn set_position(&self, position: Position) {
        self.inner.position.set(position);
    }

    //--- Scoring ----------------------------------------------------------

    /// Current point total.
    pub fn points(&self) -> u32 {
        self.inner.points.get()
    }

    /// Adds points (saturating) and returns the new total.
    pub fn add_points(&self, points: u32) -> u32 {
        let total = self.inner.points.get().saturating_add(points);
        self.inner.points.set(total);
        total
    }

    /// Resets the total to zero, returning the previous value.
    pub fn reset_points(&self) -> u32 {
        self.inner.points.replace(0)
    }
}

//--- Trait Implementations -----------------------------------------------

impl ScoreInstance for ScoreKeeper {
    fn id(&self) -> InstanceId {
        self.inner.id
    }

    fn position(&self) -> Position {
        self.inner.position.get()
    }

    fn group_id(&self) -> Option<&str> {
        self.inner.group.as_deref()
    }
}

//=========================================================================
// Tests
//=========================================================================
