//! Reloadable balance values.
//!
//! Combat tuning in Duskhorde lives outside the code: designers edit a flat
//! table of named `f32` values and push it to a running game. The
//! [`BalanceTable`] holds the current values and a version counter that is
//! bumped on every mutation. Systems that cache tunables (the damage
//! dispatcher caches the two radii and the base damage) compare versions at
//! tick boundaries and re-read the whole snapshot when it changed, so a
//! reload can never take effect halfway through a sweep.
//!
//! Reading the table from disk or the network is the host's job; this module
//! only parses an already-loaded JSON document.
//!
//! # Example
//!
//! ```
//! use duskhorde_core::balance::{keys, BalanceTable};
//!
//! let mut table = BalanceTable::default();
//! let before = table.version();
//!
//! table.load_json_str(r#"{ "projectile_radius": 7.5, "enemy_radius": 6.0 }"#).unwrap();
//! assert_eq!(table.get(keys::PROJECTILE_RADIUS), Some(7.5));
//! assert!(table.version() > before);
//! ```

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Names of the balance values the combat core reads.
pub mod keys {
    /// Collision radius of a projectile.
    pub const PROJECTILE_RADIUS: &str = "projectile_radius";
    /// Collision radius of an enemy.
    pub const ENEMY_RADIUS: &str = "enemy_radius";
    /// Damage applied per projectile hit.
    pub const BASE_DAMAGE: &str = "base_damage";
}

/// Compiled-in fallbacks, used when a key is missing from the table.
pub mod defaults {
    /// Fallback for [`super::keys::PROJECTILE_RADIUS`].
    pub const PROJECTILE_RADIUS: f32 = 5.0;
    /// Fallback for [`super::keys::ENEMY_RADIUS`].
    pub const ENEMY_RADIUS: f32 = 6.0;
    /// Fallback for [`super::keys::BASE_DAMAGE`].
    pub const BASE_DAMAGE: f32 = 10.0;
}

/// Error raised when a balance document cannot be applied.
#[derive(Debug, Error)]
pub enum BalanceError {
    /// The document was not a JSON object of numeric values.
    #[error("malformed balance document: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Versioned table of named balance values.
///
/// Values are stored in a `BTreeMap` so iteration and serialization are
/// deterministic. The version starts at 0 and increases on every `set` or
/// reload; it never decreases or repeats within one table's lifetime.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BalanceTable {
    values: BTreeMap<String, f32>,
    version: u64,
}

impl Default for BalanceTable {
    /// A table preloaded with the compiled-in defaults at version 0.
    fn default() -> Self {
        let mut values = BTreeMap::new();
        values.insert(keys::PROJECTILE_RADIUS.to_string(), defaults::PROJECTILE_RADIUS);
        values.insert(keys::ENEMY_RADIUS.to_string(), defaults::ENEMY_RADIUS);
        values.insert(keys::BASE_DAMAGE.to_string(), defaults::BASE_DAMAGE);
        Self { values, version: 0 }
    }
}

impl BalanceTable {
    /// Returns the value under `name`, if present.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<f32> {
        self.values.get(name).copied()
    }

    /// Returns the value under `name`, or `default` when absent.
    #[must_use]
    pub fn get_or(&self, name: &str, default: f32) -> f32 {
        self.get(name).unwrap_or(default)
    }

    /// Writes one value and bumps the version.
    pub fn set(&mut self, name: &str, value: f32) {
        self.values.insert(name.to_string(), value);
        self.version += 1;
    }

    /// Replaces the whole table from a JSON object and bumps the version.
    ///
    /// Keys absent from the document fall back to their compiled-in defaults
    /// through [`BalanceTable::get_or`] at read time.
    ///
    /// # Errors
    ///
    /// Returns [`BalanceError::Malformed`] when the document is not a JSON
    /// object of numbers; the table is left untouched in that case.
    pub fn load_json_str(&mut self, document: &str) -> Result<(), BalanceError> {
        let values: BTreeMap<String, f32> = serde_json::from_str(document)?;
        self.values = values;
        self.version += 1;
        Ok(())
    }

    /// Returns the current table version.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_table_holds_known_keys() {
        let table = BalanceTable::default();
        assert_eq!(table.get(keys::PROJECTILE_RADIUS), Some(defaults::PROJECTILE_RADIUS));
        assert_eq!(table.get(keys::ENEMY_RADIUS), Some(defaults::ENEMY_RADIUS));
        assert_eq!(table.get(keys::BASE_DAMAGE), Some(defaults::BASE_DAMAGE));
        assert_eq!(table.version(), 0);
    }

    #[test]
    fn set_bumps_version() {
        let mut table = BalanceTable::default();
        table.set(keys::BASE_DAMAGE, 12.0);
        assert_eq!(table.get(keys::BASE_DAMAGE), Some(12.0));
        assert_eq!(table.version(), 1);
    }

    #[test]
    fn get_or_falls_back_for_missing_keys() {
        let table = BalanceTable::default();
        assert_eq!(table.get("no_such_key"), None);
        assert_eq!(table.get_or("no_such_key", 3.5), 3.5);
    }

    #[test]
    fn load_replaces_values_and_bumps_version() {
        let mut table = BalanceTable::default();
        table
            .load_json_str(r#"{ "projectile_radius": 9.0 }"#)
            .unwrap();

        assert_eq!(table.get(keys::PROJECTILE_RADIUS), Some(9.0));
        // The reload replaced the table; dropped keys fall back at read time.
        assert_eq!(table.get(keys::ENEMY_RADIUS), None);
        assert_eq!(
            table.get_or(keys::ENEMY_RADIUS, defaults::ENEMY_RADIUS),
            defaults::ENEMY_RADIUS
        );
        assert_eq!(table.version(), 1);
    }

    #[test]
    fn malformed_document_leaves_table_untouched() {
        let mut table = BalanceTable::default();
        table.set(keys::BASE_DAMAGE, 42.0);

        let err = table.load_json_str("not json").unwrap_err();
        assert!(matches!(err, BalanceError::Malformed(_)));
        assert_eq!(table.get(keys::BASE_DAMAGE), Some(42.0));
        assert_eq!(table.version(), 1);
    }

    #[test]
    fn serialization_roundtrip() {
        let mut table = BalanceTable::default();
        table.set(keys::ENEMY_RADIUS, 8.25);

        let json = serde_json::to_string(&table).unwrap();
        let restored: BalanceTable = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, table);
    }
}
