//=========================================================================
// Core Systems
//=========================================================================
//
// Subsystems owned by the services container.
//
// Architecture:
//   spatial: Position type + squared-distance metric
//   score:   ScoreRegistry (store, lookup, lifecycle hooks, events)
//
// Everything here runs on the thread that owns `Services`. Only
// `RegistryEvent` values leave it, over crossbeam channels.
//
//=========================================================================

//=== Module Declarations =================================================

pub mod score;
pub mod spatial;
