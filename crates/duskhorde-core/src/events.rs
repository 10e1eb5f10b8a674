//! Combat events published for the host to consume.
//!
//! The combat core never talks to UI, audio, or networking directly. Things
//! that happened during a tick are recorded as [`CombatEvent`]s on an
//! [`EventQueue`]; the host drains the queue once per frame and fans the
//! events out to whoever cares. Within a queue, events appear in publication
//! order, which is deterministic because the tick itself is.
//!
//! # Example
//!
//! ```
//! use duskhorde_core::events::{CombatEvent, EventQueue};
//!
//! let mut queue = EventQueue::default();
//! queue.publish(CombatEvent::PlayerDamaged { amount: 1 });
//!
//! let drained = queue.drain();
//! assert_eq!(drained.len(), 1);
//! assert!(queue.is_empty());
//! ```

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Something that happened during a combat tick.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CombatEvent {
    /// The player took contact damage. At most one of these is published
    /// per tick, regardless of how many enemies overlap the player.
    PlayerDamaged {
        /// Damage amount in whole points.
        amount: u32,
    },
    /// Damage was applied to a ledger entity.
    DamageDealt {
        /// Ledger id of the damaged entity.
        target: String,
        /// Damage amount.
        amount: f32,
        /// What dealt the damage, e.g. `"projectile"`.
        source: String,
        /// Category tags attached to the hit, e.g. `["projectile", "basic_attack"]`.
        categories: Vec<String>,
    },
    /// A ledger entity ran out of hit points.
    EntityDestroyed {
        /// Ledger id of the destroyed entity.
        id: String,
        /// Last known position, usable as a drop or effect spawn point.
        position: Vec2,
    },
}

/// In-process queue of combat events, drained by the host each frame.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EventQueue {
    events: Vec<CombatEvent>,
}

impl EventQueue {
    /// Creates an empty queue.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an event to the queue.
    pub fn publish(&mut self, event: CombatEvent) {
        self.events.push(event);
    }

    /// Removes and returns all queued events, oldest first.
    pub fn drain(&mut self) -> Vec<CombatEvent> {
        std::mem::take(&mut self.events)
    }

    /// Returns the queued events without removing them.
    #[must_use]
    pub fn events(&self) -> &[CombatEvent] {
        &self.events
    }

    /// Returns the number of queued events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.len()
    }

    /// Returns `true` if no events are queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
