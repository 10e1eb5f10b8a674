//! Authoritative damage ledger.
//!
//! The ledger is the single authority on hit points and death. Gameplay
//! pools track positions and alive flags for the per-tick sweep, but every
//! point of damage flows through [`DamageLedger::apply_damage`], which owns
//! hp bookkeeping, death detection, and the resulting events. Callers never
//! mutate ledger hp directly and never need to inspect the outcome of a
//! damage application.
//!
//! # Destruction Handling
//!
//! When an entry's hp reaches 0 the `DESTROYED` flag is set and an
//! [`CombatEvent::EntityDestroyed`] is published. The entry is not removed;
//! the host removes it when it consumes the event. Damage applied to a
//! missing or destroyed entry is absorbed silently (it is logged at debug
//! level, but it is not a fault: the world simply moved on).
//!
//! # Storage
//!
//! Entries live in a `BTreeMap` keyed by string id, so iteration order and
//! serialization are deterministic.

use std::collections::BTreeMap;

use bitflags::bitflags;
use glam::Vec2;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::events::{CombatEvent, EventQueue};

bitflags! {
    /// Status flags carried by a ledger entry.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct EntryFlags: u8 {
        /// The entry ran out of hit points.
        const DESTROYED = 1 << 0;
    }
}

/// One entity tracked by the ledger.
///
/// `hp` mirrors the gameplay entity only at registration time. Afterward the
/// ledger value is authoritative and the two may drift.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    /// Entity type tag, e.g. `"enemy"`.
    pub kind: String,
    /// Current hit points.
    pub hp: f32,
    /// Maximum hit points.
    pub max_hp: f32,
    /// Status flags.
    pub flags: EntryFlags,
    /// Last known world position.
    pub position: Vec2,
}

impl LedgerEntry {
    /// Creates a live entry.
    #[must_use]
    pub fn new(kind: &str, hp: f32, max_hp: f32, position: Vec2) -> Self {
        Self {
            kind: kind.to_string(),
            hp,
            max_hp,
            flags: EntryFlags::empty(),
            position,
        }
    }

    /// Returns `true` while the entry has not been destroyed.
    #[must_use]
    pub fn alive(&self) -> bool {
        !self.flags.contains(EntryFlags::DESTROYED)
    }
}

/// Registry of damageable entities keyed by string id.
///
/// # Example
///
/// ```
/// use duskhorde_core::events::EventQueue;
/// use duskhorde_core::ledger::{DamageLedger, LedgerEntry};
/// use glam::Vec2;
///
/// let mut ledger = DamageLedger::new();
/// let mut events = EventQueue::new();
///
/// ledger.register("enemy_0", LedgerEntry::new("enemy", 30.0, 30.0, Vec2::ZERO));
/// ledger.apply_damage("enemy_0", 10.0, "projectile", &["projectile"], &mut events);
///
/// assert_eq!(ledger.get("enemy_0").unwrap().hp, 20.0);
/// assert!(ledger.is_alive("enemy_0"));
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DamageLedger {
    entries: BTreeMap<String, LedgerEntry>,
}

impl DamageLedger {
    /// Creates an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` if an entry exists under `id` and is alive.
    #[must_use]
    pub fn is_alive(&self, id: &str) -> bool {
        self.entries.get(id).is_some_and(LedgerEntry::alive)
    }

    /// Returns the entry under `id`, if any.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&LedgerEntry> {
        self.entries.get(id)
    }

    /// Registers an entry under `id`.
    ///
    /// Registration is idempotent with respect to live entries: if a live
    /// entry already exists under `id`, the call is a no-op and returns
    /// `false`. A destroyed entry may be replaced.
    pub fn register(&mut self, id: &str, entry: LedgerEntry) -> bool {
        if self.is_alive(id) {
            return false;
        }
        self.entries.insert(id.to_string(), entry);
        true
    }

    /// Removes the entry under `id`, typically after the host consumed its
    /// `EntityDestroyed` event.
    pub fn remove(&mut self, id: &str) -> Option<LedgerEntry> {
        self.entries.remove(id)
    }

    /// Applies damage to the entry under `id`.
    ///
    /// Publishes [`CombatEvent::DamageDealt`] for the hit, clamps hp at 0,
    /// and on death sets the `DESTROYED` flag and publishes
    /// [`CombatEvent::EntityDestroyed`]. Damage to a missing or destroyed
    /// entry is absorbed.
    pub fn apply_damage(
        &mut self,
        id: &str,
        amount: f32,
        source: &str,
        categories: &[&str],
        events: &mut EventQueue,
    ) {
        let Some(entry) = self.entries.get_mut(id) else {
            debug!(id, amount, "damage absorbed: no ledger entry");
            return;
        };
        if !entry.alive() {
            debug!(id, amount, "damage absorbed: entry already destroyed");
            return;
        }

        entry.hp -= amount;
        events.publish(CombatEvent::DamageDealt {
            target: id.to_string(),
            amount,
            source: source.to_string(),
            categories: categories.iter().map(ToString::to_string).collect(),
        });

        if entry.hp <= 0.0 {
            entry.hp = 0.0;
            entry.flags.insert(EntryFlags::DESTROYED);
            events.publish(CombatEvent::EntityDestroyed {
                id: id.to_string(),
                position: entry.position,
            });
        }
    }

    /// Returns the number of entries, destroyed ones included.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if the ledger holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// Tests
// =============================================================================
