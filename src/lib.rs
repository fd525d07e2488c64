//=========================================================================
// Minigame Registry: Library Root
//
// This crate defines the public API surface of the minigame score
// services.
//
// Responsibilities:
// - Expose the services container (`Services`, `ServicesBuilder`)
// - Expose the score registry and its lookup API through `core`
// - Keep construction explicit: no global manager instances
//
// Typical usage:
// ```rust
// use minigame_registry::prelude::*;
//
// let mut services = ServicesBuilder::new().build::<ScoreKeeper>();
// let keeper = services.spawn_keeper(Some("quiz"), position(0.0, 0.0, 0.0));
// services.award_closest(Some("quiz"), None, 10);
// assert_eq!(keeper.points(), 10);
// ```
//
//=========================================================================

//--- Public Modules ------------------------------------------------------
//
// `core` contains the subsystems (score registry, spatial primitives).
// It is public so hosts can use the registry directly with their own
// instance types.
//
pub mod core;
pub mod prelude;

//--- Internal Modules ----------------------------------------------------
//
// `services` defines the container and its builder.
//
mod services;

//--- Public Exports ------------------------------------------------------

pub use services::{Services, ServicesBuilder};
