//! Circle-circle collision predicate.
//!
//! All combat entities in Duskhorde collide as circles: a projectile, an
//! enemy, and the player each carry a radius, and two entities interact when
//! their circles overlap. This module provides the single geometric test the
//! damage sweep is built on.
//!
//! # Boundary Semantics
//!
//! Touching circles count as a hit: the test is inclusive, so a distance
//! exactly equal to the combined radius overlaps. Callers that need an
//! exclusive test must shrink the radius themselves.
//!
//! # Example
//!
//! ```
//! use duskhorde_core::collision::circles_overlap;
//! use glam::Vec2;
//!
//! // Distance 10 against combined radius 11: hit.
//! assert!(circles_overlap(Vec2::ZERO, Vec2::new(10.0, 0.0), 11.0));
//!
//! // Exactly touching: still a hit.
//! assert!(circles_overlap(Vec2::ZERO, Vec2::new(10.0, 0.0), 10.0));
//!
//! // Just beyond: miss.
//! assert!(!circles_overlap(Vec2::ZERO, Vec2::new(10.0, 0.0), 9.99));
//! ```

use glam::Vec2;

/// Returns `true` if two circles with the given combined radius overlap.
///
/// The comparison is performed on squared distances, so no square root is
/// taken. The boundary is inclusive.
///
/// # Arguments
///
/// * `a` - Center of the first circle
/// * `b` - Center of the second circle
/// * `combined_radius` - Sum of both circle radii
#[must_use]
pub fn circles_overlap(a: Vec2, b: Vec2, combined_radius: f32) -> bool {
    a.distance_squared(b) <= combined_radius * combined_radius
}

// =============================================================================
// Tests
// =============================================================================
