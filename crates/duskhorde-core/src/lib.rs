//! # Duskhorde Core
//!
//! Fixed-tick combat core for Duskhorde.
//!
//! This crate implements the collision and damage-resolution loop of a
//! top-down horde game: pooled projectiles against pooled enemies, an
//! authoritative damage ledger, and a flat per-tick contact penalty against
//! the player, all driven at a fixed 30 Hz independent of rendering.
//!
//! ## Architecture
//!
//! - **Pools** ([`pool`]): fixed-capacity, slot-reused projectile and enemy
//!   storage with alive flags and snapshot views.
//! - **Ledger** ([`ledger`]): the single authority on hit points, death
//!   detection, and the resulting events.
//! - **Dispatcher** ([`dispatcher`]): the per-tick sweep that turns circle
//!   overlaps into ledger damage and projectile retirement.
//! - **Balance** ([`balance`]): versioned, reloadable tuning values, applied
//!   at tick boundaries only.
//! - **Events** ([`events`]): what happened this tick, drained by the host.
//! - **Ticker** ([`ticker`]): frame time to fixed combat steps.
//!
//! ## Usage
//!
//! ```rust
//! use duskhorde_core::{
//!     BalanceTable, DamageDispatcher, DamageLedger, EnemyPool, EventQueue,
//!     FixedTicker, ProjectilePool, World,
//! };
//!
//! let balance = BalanceTable::default();
//! let mut dispatcher = DamageDispatcher::new(&balance);
//! let mut ticker = FixedTicker::new();
//!
//! let mut world = World::new();
//! world.install_projectiles(ProjectilePool::new(256));
//! world.install_enemies(EnemyPool::new(128));
//!
//! let mut ledger = DamageLedger::new();
//! let mut events = EventQueue::new();
//!
//! // Host frame loop: frame time in, due combat steps out.
//! let frame_dt = 1.0 / 60.0;
//! for _ in 0..ticker.advance(frame_dt) {
//!     dispatcher.run_tick(&mut world, &balance, &mut ledger, &mut events);
//! }
//! for event in events.drain() {
//!     // Fan out to UI, audio, drops...
//!     let _ = event;
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod balance;
pub mod collision;
pub mod dispatcher;
pub mod events;
pub mod ledger;
pub mod player;
pub mod pool;
pub mod ticker;

#[cfg(test)]
mod tests;

pub use balance::BalanceTable;
pub use dispatcher::{DamageDispatcher, World};
pub use events::{CombatEvent, EventQueue};
pub use ledger::DamageLedger;
pub use player::PlayerState;
pub use pool::{EnemyPool, ProjectilePool};
pub use ticker::FixedTicker;
