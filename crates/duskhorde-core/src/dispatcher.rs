//! Damage dispatcher: the per-tick combat sweep.
//!
//! Once per fixed tick the dispatcher walks every (projectile, enemy) pair,
//! turns overlaps into ledger damage, retires projectiles on their first
//! confirmed hit, and applies the flat contact penalty from enemies to the
//! player. It owns no entities itself: pools own existence, the ledger owns
//! hit points, and the dispatcher only owns the transient per-tick snapshot
//! and the mapping from pool slots to ledger ids.
//!
//! # Tick Phases
//!
//! [`DamageDispatcher::run_tick`] executes four phases:
//!
//! 1. **TUNING**: refresh the balance snapshot if the table version changed.
//!    Reloads only ever take effect at a tick boundary, never mid-sweep.
//! 2. **SNAPSHOT**: capture read-only views of all alive projectiles and
//!    enemies. Later mutation within the tick cannot invalidate the views;
//!    every view is re-validated against the pool before it is acted on.
//! 3. **SWEEP**: brute-force pairwise overlap test in slot order. A hit
//!    registers the enemy in the ledger if needed, applies `base_damage`,
//!    and retires the projectile. Projectiles are single-hit: the alive
//!    flag is re-checked per pair, so a retired projectile cannot damage a
//!    second enemy in the same tick.
//! 4. **CONTACT**: scan alive enemies against the player position and
//!    publish at most one [`CombatEvent::PlayerDamaged`] per tick.
//!
//! # Failure Model
//!
//! Nothing in a tick panics or propagates an error. Unwired pools make the
//! tick a no-op; a snapshot view that no longer matches its pool slot is
//! logged and skipped; a duplicate ledger registration is an idempotent
//! skip. The next tick re-evaluates the world from scratch, so nothing is
//! retried.

use serde::{Deserialize, Serialize};
use tracing::{debug, trace, warn};

use crate::balance::{defaults, keys, BalanceTable};
use crate::collision::circles_overlap;
use crate::events::{CombatEvent, EventQueue};
use crate::ledger::{DamageLedger, LedgerEntry};
use crate::player::{PlayerState, PLAYER_RADIUS};
use crate::pool::{EnemyPool, EnemyView, ProjectilePool, ProjectileView};

/// Contact damage per tick, in whole points.
///
/// Deliberately flat: three enemies standing on the player still cost 1
/// point per tick, not 3.
pub const PLAYER_CONTACT_DAMAGE: u32 = 1;

/// Ledger type tag for auto-registered enemies.
const ENEMY_KIND: &str = "enemy";
/// Damage source tag for projectile hits.
const DAMAGE_SOURCE: &str = "projectile";
/// Category tags for projectile hits.
const DAMAGE_CATEGORIES: &[&str] = &["projectile", "basic_attack"];

/// Derives the ledger id shadowing an enemy pool slot.
///
/// The mapping is deterministic, so the same slot always lands on the same
/// id within a pool's lifetime.
#[must_use]
pub fn enemy_ledger_id(slot: usize) -> String {
    format!("enemy_{slot}")
}

// =============================================================================
// World
// =============================================================================

/// Wiring container for everything the sweep reads and writes.
///
/// Pools start unwired (`None`); until both are installed, `run_tick` is a
/// safe no-op. This models the window during host startup where combat
/// systems exist but entity pools have not been handed over yet. It is a
/// state, not an error.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct World {
    projectiles: Option<ProjectilePool>,
    enemies: Option<EnemyPool>,
    player: PlayerState,
}

impl World {
    /// Creates an unwired world.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs the projectile pool.
    pub fn install_projectiles(&mut self, pool: ProjectilePool) {
        self.projectiles = Some(pool);
    }

    /// Installs the enemy pool.
    pub fn install_enemies(&mut self, pool: EnemyPool) {
        self.enemies = Some(pool);
    }

    /// Returns the projectile pool, if wired.
    #[must_use]
    pub fn projectiles(&self) -> Option<&ProjectilePool> {
        self.projectiles.as_ref()
    }

    /// Returns the projectile pool mutably, if wired.
    pub fn projectiles_mut(&mut self) -> Option<&mut ProjectilePool> {
        self.projectiles.as_mut()
    }

    /// Returns the enemy pool, if wired.
    #[must_use]
    pub fn enemies(&self) -> Option<&EnemyPool> {
        self.enemies.as_ref()
    }

    /// Returns the enemy pool mutably, if wired.
    pub fn enemies_mut(&mut self) -> Option<&mut EnemyPool> {
        self.enemies.as_mut()
    }

    /// Returns the player state.
    #[must_use]
    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    /// Returns the player state mutably.
    pub fn player_mut(&mut self) -> &mut PlayerState {
        &mut self.player
    }

    /// Splits out both pools for one sweep, or `None` while either is
    /// unwired. The enemy pool is read-only during a sweep.
    fn split_pools_mut(&mut self) -> Option<(&mut ProjectilePool, &EnemyPool)> {
        match (&mut self.projectiles, &self.enemies) {
            (Some(p), Some(e)) => Some((p, e)),
            _ => None,
        }
    }
}

// =============================================================================
// Tuning
// =============================================================================

/// Balance snapshot the dispatcher works from during a tick.
///
/// Captured from a [`BalanceTable`] together with the table version, and
/// only replaced wholesale when the version changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    /// Collision radius of a projectile.
    pub projectile_radius: f32,
    /// Collision radius of an enemy.
    pub enemy_radius: f32,
    /// Damage applied per projectile hit.
    pub base_damage: f32,
    version: u64,
}

impl Tuning {
    /// Reads a snapshot from the balance table, falling back to compiled-in
    /// defaults for missing keys.
    #[must_use]
    pub fn read_from(balance: &BalanceTable) -> Self {
        Self {
            projectile_radius: balance.get_or(keys::PROJECTILE_RADIUS, defaults::PROJECTILE_RADIUS),
            enemy_radius: balance.get_or(keys::ENEMY_RADIUS, defaults::ENEMY_RADIUS),
            base_damage: balance.get_or(keys::BASE_DAMAGE, defaults::BASE_DAMAGE),
            version: balance.version(),
        }
    }
}

// =============================================================================
// Dispatcher
// =============================================================================

/// Orchestrates collision sweeps and damage resolution, one tick at a time.
///
/// # Example
///
/// ```
/// use duskhorde_core::balance::BalanceTable;
/// use duskhorde_core::dispatcher::{DamageDispatcher, World};
/// use duskhorde_core::events::EventQueue;
/// use duskhorde_core::ledger::DamageLedger;
/// use duskhorde_core::pool::{EnemyPool, ProjectilePool};
/// use glam::Vec2;
///
/// let balance = BalanceTable::default();
/// let mut dispatcher = DamageDispatcher::new(&balance);
/// let mut world = World::new();
/// let mut ledger = DamageLedger::new();
/// let mut events = EventQueue::new();
///
/// // Unwired pools: the tick is a safe no-op.
/// dispatcher.run_tick(&mut world, &balance, &mut ledger, &mut events);
/// assert!(ledger.is_empty());
///
/// world.install_projectiles(ProjectilePool::new(64));
/// world.install_enemies(EnemyPool::new(64));
/// dispatcher.run_tick(&mut world, &balance, &mut ledger, &mut events);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct DamageDispatcher {
    tuning: Tuning,
}

impl DamageDispatcher {
    /// Creates a dispatcher with an initial balance snapshot.
    #[must_use]
    pub fn new(balance: &BalanceTable) -> Self {
        Self {
            tuning: Tuning::read_from(balance),
        }
    }

    /// Returns the tuning snapshot currently in effect.
    #[must_use]
    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    /// Runs one combat tick. Must be invoked exactly once per fixed tick,
    /// from a single thread; the sweep assumes a stable snapshot for its
    /// whole duration.
    pub fn run_tick(
        &mut self,
        world: &mut World,
        balance: &BalanceTable,
        ledger: &mut DamageLedger,
        events: &mut EventQueue,
    ) {
        // PHASE 1: TUNING - reloads land at tick boundaries only
        if balance.version() != self.tuning.version {
            self.tuning = Tuning::read_from(balance);
            debug!(version = self.tuning.version, "balance snapshot refreshed");
        }

        let player = *world.player();
        let Some((projectiles, enemies)) = world.split_pools_mut() else {
            trace!("combat tick skipped: pools not wired");
            return;
        };

        // PHASE 2: SNAPSHOT - read-only views, stable for the whole tick
        let projectile_views = projectiles.alive_projectiles();
        let enemy_views = enemies.alive_enemies();

        // PHASE 3: SWEEP
        self.sweep_projectiles(
            projectiles,
            enemies,
            &projectile_views,
            &enemy_views,
            ledger,
            events,
        );

        // PHASE 4: CONTACT
        self.player_contact(enemies, &enemy_views, player, events);
    }

    /// Brute-force pairwise sweep in slot order.
    fn sweep_projectiles(
        &self,
        projectiles: &mut ProjectilePool,
        enemies: &EnemyPool,
        projectile_views: &[ProjectileView],
        enemy_views: &[EnemyView],
        ledger: &mut DamageLedger,
        events: &mut EventQueue,
    ) {
        let combined = self.tuning.projectile_radius + self.tuning.enemy_radius;

        for pv in projectile_views {
            for ev in enemy_views {
                // Re-check the projectile every pair: once it hits and is
                // retired it must not damage a second enemy this tick.
                if !projectiles.is_slot_alive(pv.slot) {
                    break;
                }
                // An enemy that died earlier in this sweep is skipped, never
                // damaged.
                if !enemies.is_slot_alive(ev.slot) {
                    continue;
                }
                if !circles_overlap(pv.position, ev.position, combined) {
                    continue;
                }

                let Some(projectile_slot) = projectiles.resolve(pv) else {
                    warn!(slot = pv.slot, "hit dropped: projectile slot no longer matches snapshot");
                    continue;
                };
                let Some(enemy_slot) = enemies.resolve(ev) else {
                    warn!(slot = ev.slot, "hit dropped: enemy slot no longer matches snapshot");
                    continue;
                };

                let id = enemy_ledger_id(enemy_slot);
                // Lazy cross-registration: the ledger learns about an enemy
                // on its first hit, mirroring pool hp at that instant. A
                // destroyed entry still present under this id keeps
                // absorbing hits until the host clears it.
                if !ledger.is_alive(&id) && ledger.get(&id).is_none() {
                    ledger.register(&id, LedgerEntry::new(ENEMY_KIND, ev.hp, ev.hp, ev.position));
                }

                ledger.apply_damage(
                    &id,
                    self.tuning.base_damage,
                    DAMAGE_SOURCE,
                    DAMAGE_CATEGORIES,
                    events,
                );
                // Single-hit projectile: retired on first contact.
                projectiles.retire(projectile_slot);
            }
        }
    }

    /// Publishes at most one player contact event per tick.
    fn player_contact(
        &self,
        enemies: &EnemyPool,
        enemy_views: &[EnemyView],
        player: PlayerState,
        events: &mut EventQueue,
    ) {
        if player.is_unset() {
            return;
        }
        let combined = self.tuning.enemy_radius + PLAYER_RADIUS;

        for ev in enemy_views {
            if !enemies.is_slot_alive(ev.slot) {
                continue;
            }
            if circles_overlap(ev.position, player.position(), combined) {
                events.publish(CombatEvent::PlayerDamaged {
                    amount: PLAYER_CONTACT_DAMAGE,
                });
                // Flat per-tick cap: the first overlapping enemy ends the scan.
                break;
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
