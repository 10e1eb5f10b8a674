//! Player state consumed by the combat sweep.
//!
//! The combat core never owns the player. It reads a single piece of player
//! state, the current world position, and publishes contact damage as
//! events. The origin doubles as an "unset" sentinel: until the host writes
//! a real position, the contact pass skips the player entirely.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Collision radius of the player, in world units.
///
/// Fixed at compile time; unlike the projectile and enemy radii this value
/// is not a reloadable balance tunable.
pub const PLAYER_RADIUS: f32 = 4.0;

/// The player's combat-relevant state.
///
/// # Example
///
/// ```
/// use duskhorde_core::player::PlayerState;
/// use glam::Vec2;
///
/// let mut player = PlayerState::default();
/// assert!(player.is_unset());
///
/// player.set_position(Vec2::new(100.0, 100.0));
/// assert!(!player.is_unset());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PlayerState {
    position: Vec2,
}

impl PlayerState {
    /// Creates player state at the given position.
    #[must_use]
    pub const fn at(position: Vec2) -> Self {
        Self { position }
    }

    /// Returns the current position.
    #[must_use]
    pub const fn position(&self) -> Vec2 {
        self.position
    }

    /// Writes the current position.
    pub fn set_position(&mut self, position: Vec2) {
        self.position = position;
    }

    /// Returns `true` while the position still holds the unset sentinel.
    ///
    /// The sentinel is the exact origin. A player legitimately standing on
    /// (0, 0) is indistinguishable from unset; hosts that spawn the player
    /// there should nudge the position off the origin.
    #[must_use]
    pub fn is_unset(&self) -> bool {
        self.position == Vec2::ZERO
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_unset() {
        assert!(PlayerState::default().is_unset());
    }

    #[test]
    fn set_position_clears_sentinel() {
        let mut player = PlayerState::default();
        player.set_position(Vec2::new(1.0, 0.0));
        assert!(!player.is_unset());
        assert_eq!(player.position(), Vec2::new(1.0, 0.0));
    }

    #[test]
    fn exact_origin_reads_as_unset() {
        let player = PlayerState::at(Vec2::ZERO);
        assert!(player.is_unset());
    }
}
