//! Fixed-capacity, slot-reused entity pools.
//!
//! Duskhorde never allocates combat entities during play. Projectiles and
//! enemies live in pools of preallocated slots, each with an alive flag:
//! spawning claims the first dead slot, dying flips the flag, and the slot
//! is recycled by a later spawn. A slot index is therefore only meaningful
//! together with evidence that the slot still holds the entity you think it
//! does.
//!
//! # Snapshot Views
//!
//! The damage sweep works on snapshot views ([`ProjectileView`],
//! [`EnemyView`]) captured once at the start of a tick. Each view embeds the
//! slot index it was captured from as a stable handle. Before acting on a
//! view, callers run it back through [`ProjectilePool::resolve`] /
//! [`EnemyPool::resolve`], which re-checks the slot's alive flag and its
//! identity: the enemy id for enemies, the recorded position for
//! projectiles. A slot that died or was recycled since the snapshot fails
//! resolution instead of silently aliasing a different entity.
//!
//! # Example
//!
//! ```
//! use duskhorde_core::pool::EnemyPool;
//! use glam::Vec2;
//!
//! let mut enemies = EnemyPool::new(8);
//! let slot = enemies.spawn(Vec2::new(40.0, 0.0), 30.0).unwrap();
//!
//! let snapshot = enemies.alive_enemies();
//! assert_eq!(snapshot.len(), 1);
//!
//! // The handle resolves while the slot is untouched...
//! assert_eq!(enemies.resolve(&snapshot[0]), Some(slot));
//!
//! // ...and stops resolving once the enemy dies.
//! enemies.kill(slot);
//! assert_eq!(enemies.resolve(&snapshot[0]), None);
//! ```

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Enemy Identity
// =============================================================================

/// Stable identity for an enemy, distinct from its pool slot.
///
/// Slot indices are recycled; enemy ids never are. Two enemies occupying the
/// same slot at different times (or the same position at the same time) are
/// distinguishable by id.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EnemyId(u64);

impl EnemyId {
    /// Creates an `EnemyId` from a raw `u64` value.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw `u64` value of this identifier.
    #[must_use]
    pub const fn as_u64(self) -> u64 {
        self.0
    }
}

impl fmt::Debug for EnemyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EnemyId({})", self.0)
    }
}

impl fmt::Display for EnemyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// =============================================================================
// Slots
// =============================================================================

/// One projectile slot: a position and an alive flag.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ProjectileSlot {
    /// World position of the projectile.
    pub position: Vec2,
    /// Whether the slot currently holds a live projectile.
    pub alive: bool,
}

/// One enemy slot: identity, position, hit points, and an alive flag.
///
/// `hp` stays above zero while `alive` is set; [`EnemyPool::kill`] is the
/// only way a slot goes dead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemySlot {
    /// Stable identity, assigned at spawn and never reused.
    pub id: EnemyId,
    /// World position of the enemy.
    pub position: Vec2,
    /// Current hit points.
    pub hp: f32,
    /// Whether the slot currently holds a live enemy.
    pub alive: bool,
}

// =============================================================================
// Snapshot Views
// =============================================================================

/// Read-only snapshot of one alive projectile, taken at the start of a tick.
///
/// The `slot` field is the handle used by [`ProjectilePool::resolve`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    /// Pool slot the view was captured from.
    pub slot: usize,
    /// Position at capture time.
    pub position: Vec2,
}

/// Read-only snapshot of one alive enemy, taken at the start of a tick.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    /// Pool slot the view was captured from.
    pub slot: usize,
    /// Stable identity at capture time.
    pub id: EnemyId,
    /// Position at capture time.
    pub position: Vec2,
    /// Hit points at capture time.
    pub hp: f32,
}

// =============================================================================
// Projectile Pool
// =============================================================================

/// Fixed-capacity pool of projectile slots.
///
/// # Example
///
/// ```
/// use duskhorde_core::pool::ProjectilePool;
/// use glam::Vec2;
///
/// let mut pool = ProjectilePool::new(2);
/// let a = pool.spawn(Vec2::ZERO).unwrap();
/// let b = pool.spawn(Vec2::new(1.0, 0.0)).unwrap();
///
/// // Saturated: no free slot.
/// assert!(pool.spawn(Vec2::new(2.0, 0.0)).is_none());
///
/// // Retiring frees the slot for reuse.
/// pool.retire(a);
/// assert_eq!(pool.spawn(Vec2::new(3.0, 0.0)), Some(a));
/// assert_eq!(pool.live_count(), 2);
/// # let _ = b;
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectilePool {
    slots: Vec<ProjectileSlot>,
}

impl ProjectilePool {
    /// Creates a pool with `capacity` dead slots.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![ProjectileSlot::default(); capacity],
        }
    }

    /// Returns the fixed slot capacity of the pool.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of currently alive projectiles.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|s| s.alive).count()
    }

    /// Spawns a projectile in the first dead slot.
    ///
    /// Returns the claimed slot index, or `None` when the pool is saturated.
    pub fn spawn(&mut self, position: Vec2) -> Option<usize> {
        let slot = self.slots.iter().position(|s| !s.alive)?;
        self.slots[slot] = ProjectileSlot {
            position,
            alive: true,
        };
        Some(slot)
    }

    /// Marks a slot dead. Out-of-range or already-dead slots are a no-op.
    pub fn retire(&mut self, slot: usize) {
        if let Some(s) = self.slots.get_mut(slot) {
            s.alive = false;
        }
    }

    /// Returns `true` if the slot index is in range and alive.
    #[must_use]
    pub fn is_slot_alive(&self, slot: usize) -> bool {
        self.slots.get(slot).is_some_and(|s| s.alive)
    }

    /// Returns the slot contents, if the index is in range.
    #[must_use]
    pub fn get(&self, slot: usize) -> Option<&ProjectileSlot> {
        self.slots.get(slot)
    }

    /// Moves an alive projectile. Dead or out-of-range slots are a no-op.
    pub fn set_position(&mut self, slot: usize, position: Vec2) {
        if let Some(s) = self.slots.get_mut(slot) {
            if s.alive {
                s.position = position;
            }
        }
    }

    /// Captures a snapshot of all currently alive projectiles, in slot order.
    #[must_use]
    pub fn alive_projectiles(&self) -> Vec<ProjectileView> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, s)| s.alive)
            .map(|(slot, s)| ProjectileView {
                slot,
                position: s.position,
            })
            .collect()
    }

    /// Validates a snapshot view against the current pool state.
    ///
    /// Returns the slot index if the slot is still alive and still holds the
    /// position recorded in the view. A slot that was retired, or recycled
    /// into a projectile somewhere else, fails to resolve.
    #[must_use]
    pub fn resolve(&self, view: &ProjectileView) -> Option<usize> {
        let slot = self.slots.get(view.slot)?;
        (slot.alive && slot.position == view.position).then_some(view.slot)
    }

    /// Kills every slot in the pool.
    pub fn clear(&mut self) {
        for s in &mut self.slots {
            s.alive = false;
        }
    }
}

// =============================================================================
// Enemy Pool
// =============================================================================

/// Fixed-capacity pool of enemy slots with stable per-enemy identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyPool {
    slots: Vec<Option<EnemySlot>>,
    /// Monotonically increasing id counter; never reset by slot reuse.
    next_id: u64,
}

impl EnemyPool {
    /// Creates a pool with `capacity` empty slots.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            slots: vec![None; capacity],
            next_id: 0,
        }
    }

    /// Returns the fixed slot capacity of the pool.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of currently alive enemies.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.slots
            .iter()
            .filter(|s| s.as_ref().is_some_and(|e| e.alive))
            .count()
    }

    /// Spawns an enemy in the first free slot and assigns it a fresh id.
    ///
    /// `hp` must be positive; an enemy is alive exactly while its hp is
    /// above zero. Returns the claimed slot index, or `None` when the pool
    /// is saturated.
    pub fn spawn(&mut self, position: Vec2, hp: f32) -> Option<usize> {
        let slot = self
            .slots
            .iter()
            .position(|s| !s.as_ref().is_some_and(|e| e.alive))?;
        let id = EnemyId::new(self.next_id);
        self.next_id += 1;
        self.slots[slot] = Some(EnemySlot {
            id,
            position,
            hp,
            alive: true,
        });
        Some(slot)
    }

    /// Marks a slot dead. Out-of-range or already-dead slots are a no-op.
    pub fn kill(&mut self, slot: usize) {
        if let Some(Some(e)) = self.slots.get_mut(slot) {
            e.alive = false;
        }
    }

    /// Returns `true` if the slot index is in range and alive.
    #[must_use]
    pub fn is_slot_alive(&self, slot: usize) -> bool {
        self.slots
            .get(slot)
            .is_some_and(|s| s.as_ref().is_some_and(|e| e.alive))
    }

    /// Returns the slot contents, if the index is in range and occupied.
    #[must_use]
    pub fn get(&self, slot: usize) -> Option<&EnemySlot> {
        self.slots.get(slot)?.as_ref()
    }

    /// Moves an alive enemy. Dead or out-of-range slots are a no-op.
    pub fn set_position(&mut self, slot: usize, position: Vec2) {
        if let Some(Some(e)) = self.slots.get_mut(slot) {
            if e.alive {
                e.position = position;
            }
        }
    }

    /// Captures a snapshot of all currently alive enemies, in slot order.
    #[must_use]
    pub fn alive_enemies(&self) -> Vec<EnemyView> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(slot, s)| {
                s.as_ref().filter(|e| e.alive).map(|e| EnemyView {
                    slot,
                    id: e.id,
                    position: e.position,
                    hp: e.hp,
                })
            })
            .collect()
    }

    /// Validates a snapshot view against the current pool state.
    ///
    /// Returns the slot index if the slot is still alive and still holds the
    /// enemy identity recorded in the view. A slot that died, or was
    /// recycled into a different enemy, fails to resolve.
    #[must_use]
    pub fn resolve(&self, view: &EnemyView) -> Option<usize> {
        let e = self.slots.get(view.slot)?.as_ref()?;
        (e.alive && e.id == view.id).then_some(view.slot)
    }

    /// Kills every slot in the pool. The id counter is not reset.
    pub fn clear(&mut self) {
        for s in self.slots.iter_mut().flatten() {
            s.alive = false;
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
