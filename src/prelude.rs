//=========================================================================
// Prelude
//=========================================================================
//
// Convenience module that re-exports commonly used types and traits.
//
// Usage:
//   use minigame_registry::prelude::*;
//
//=========================================================================

//=== Public API ==========================================================

// Services container
pub use crate::services::{Services, ServicesBuilder};

// Score registry
pub use crate::core::score::{
    InstanceId, InstanceIdAllocator, Members, RegistryEvent, ScoreInstance, ScoreKeeper,
    ScoreLifecycle, ScoreRegistry,
};

// Spatial primitives
pub use crate::core::spatial::{position, squared_distance, Position};
