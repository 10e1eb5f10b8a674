//! Test helper functions for setting up combat worlds.
//!
//! This module provides a small rig bundling everything a combat tick needs,
//! so integration tests read as scenarios instead of plumbing.

use glam::Vec2;

use crate::balance::BalanceTable;
use crate::dispatcher::{DamageDispatcher, World};
use crate::events::EventQueue;
use crate::ledger::DamageLedger;
use crate::pool::{EnemyPool, ProjectilePool};

/// Everything one combat tick touches, wired together.
pub struct CombatRig {
    pub dispatcher: DamageDispatcher,
    pub world: World,
    pub balance: BalanceTable,
    pub ledger: DamageLedger,
    pub events: EventQueue,
}

impl CombatRig {
    /// A rig with both pools installed at the given capacities.
    pub fn wired(projectile_capacity: usize, enemy_capacity: usize) -> Self {
        let mut rig = Self::unwired();
        rig.world
            .install_projectiles(ProjectilePool::new(projectile_capacity));
        rig.world.install_enemies(EnemyPool::new(enemy_capacity));
        rig
    }

    /// A rig whose world has no pools installed yet.
    pub fn unwired() -> Self {
        let balance = BalanceTable::default();
        Self {
            dispatcher: DamageDispatcher::new(&balance),
            world: World::new(),
            balance,
            ledger: DamageLedger::new(),
            events: EventQueue::new(),
        }
    }

    /// Runs one combat tick.
    pub fn tick(&mut self) {
        self.dispatcher.run_tick(
            &mut self.world,
            &self.balance,
            &mut self.ledger,
            &mut self.events,
        );
    }

    /// Spawns a projectile, panicking if the pool is unwired or saturated.
    pub fn spawn_projectile(&mut self, position: Vec2) -> usize {
        self.world
            .projectiles_mut()
            .expect("projectile pool not wired")
            .spawn(position)
            .expect("projectile pool saturated")
    }

    /// Spawns an enemy, panicking if the pool is unwired or saturated.
    pub fn spawn_enemy(&mut self, position: Vec2, hp: f32) -> usize {
        self.world
            .enemies_mut()
            .expect("enemy pool not wired")
            .spawn(position, hp)
            .expect("enemy pool saturated")
    }
}
