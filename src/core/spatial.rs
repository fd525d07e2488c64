//=========================================================================
// Spatial Primitives
//=========================================================================
//
// Position type shared by every score instance, plus the distance metric
// used by the lookup engine.
//
// Distances are compared squared. Ordering matches true Euclidean
// ordering, so the square root is never taken.
//
//=========================================================================

//=== External Dependencies ===============================================

use nalgebra::Vector3;

//=== Public API ==========================================================

/// World-space position reported by a score instance.
pub type Position = Vector3<f32>;

/// Builds a [`Position`] from its components.
pub fn position(x: f32, y: f32, z: f32) -> Position {
    Vector3::new(x, y, z)
}

/// Squared Euclidean distance between two positions.
pub fn squared_distance(a: &Position, b: &Position) -> f32 {
    (a - b).norm_squared()
}

//=========================================================================
// Tests
//=========================================================================
