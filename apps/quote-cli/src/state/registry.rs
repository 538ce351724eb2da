//! # Unit Registry State
//!
//! Session-wide unit registry shared by every command.
//!
//! ## Thread Safety
//! Custom units are appended while quotations are being priced, so the
//! registry sits behind `Arc<Mutex<T>>`: appends are exclusive and a pricing
//! pass sees a consistent set of units. One `RegistryState` per session keeps
//! custom units from leaking between sessions.

use std::sync::{Arc, Mutex, MutexGuard};

use quote_core::units::{CustomUnit, UnitFamily, UnitRegistry};
use quote_core::validation::validate_custom_unit;
use quote_core::ValidationError;
use tracing::warn;

/// Session-managed unit registry.
#[derive(Debug, Clone, Default)]
pub struct RegistryState {
    registry: Arc<Mutex<UnitRegistry>>,
}

impl RegistryState {
    /// Creates a state holding only the built-in units.
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes a function with read access to the registry.
    ///
    /// ## Usage
    /// ```rust
    /// use quote_cli_lib::state::RegistryState;
    /// use quote_core::UnitFamily;
    ///
    /// let state = RegistryState::new();
    /// let count = state.with_registry(|r| r.all_units(UnitFamily::Length).len());
    /// assert_eq!(count, 5);
    /// ```
    pub fn with_registry<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&UnitRegistry) -> R,
    {
        f(&self.lock())
    }

    /// Appends a custom unit. Fire-and-forget, duplicates included.
    pub fn add_custom_unit(&self, family: UnitFamily, name: &str, factor: f64) {
        self.lock().add_custom_unit(family, name, factor);
    }

    /// Appends a custom unit after the strict boundary checks.
    ///
    /// Check and append happen under one lock so two sessions racing on the
    /// same name cannot both pass.
    pub fn add_custom_unit_strict(
        &self,
        family: UnitFamily,
        name: &str,
        factor: f64,
    ) -> Result<(), ValidationError> {
        let mut registry = self.lock();
        validate_custom_unit(&registry, family, name, factor)?;
        registry.add_custom_unit(family, name, factor);
        Ok(())
    }

    /// Registers the custom units of a quotation document, in order.
    pub fn register_all(&self, units: &[CustomUnit], strict: bool) -> Result<(), ValidationError> {
        for unit in units {
            if strict {
                self.add_custom_unit_strict(unit.family, &unit.name, unit.conversion_factor)?;
            } else {
                self.add_custom_unit(unit.family, &unit.name, unit.conversion_factor);
            }
        }
        Ok(())
    }

    fn lock(&self) -> MutexGuard<'_, UnitRegistry> {
        // The registry is append-only; a panic mid-append leaves it usable.
        self.registry.lock().unwrap_or_else(|poisoned| {
            warn!("unit registry mutex poisoned, recovering");
            poisoned.into_inner()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_custom_units_visible_to_readers() {
        let state = RegistryState::new();
        state.add_custom_unit(UnitFamily::Length, "yard", 0.9144);

        let meters = state
            .with_registry(|r| r.convert(2.0, "yard", "m", UnitFamily::Length))
            .unwrap();
        assert!((meters - 1.8288).abs() < 1e-9);
    }

    #[test]
    fn test_lenient_add_keeps_duplicates() {
        let state = RegistryState::new();
        state.add_custom_unit(UnitFamily::Length, "cm", 5.0);

        assert_eq!(state.with_registry(|r| r.all_units(UnitFamily::Length).len()), 6);
        assert_eq!(state.with_registry(|r| r.factor(UnitFamily::Length, "cm")), 0.01);
    }

    #[test]
    fn test_strict_add_rejects_duplicates() {
        let state = RegistryState::new();
        assert!(state
            .add_custom_unit_strict(UnitFamily::Length, "yard", 0.9144)
            .is_ok());
        assert!(state
            .add_custom_unit_strict(UnitFamily::Length, "yard", 0.91)
            .is_err());
        assert_eq!(state.with_registry(|r| r.custom_units(UnitFamily::Length).len()), 1);
    }

    #[test]
    fn test_register_all_stops_at_first_strict_failure() {
        let state = RegistryState::new();
        let units = vec![
            CustomUnit {
                family: UnitFamily::Weight,
                name: "lb".to_string(),
                conversion_factor: 0.45359237,
            },
            CustomUnit {
                family: UnitFamily::Weight,
                name: "bad".to_string(),
                conversion_factor: 0.0,
            },
        ];

        assert!(state.register_all(&units, true).is_err());
        assert!(state.with_registry(|r| r.contains(UnitFamily::Weight, "lb")));
        assert!(!state.with_registry(|r| r.contains(UnitFamily::Weight, "bad")));
    }

    #[test]
    fn test_concurrent_appends_are_all_kept() {
        let state = RegistryState::new();
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let state = state.clone();
                thread::spawn(move || {
                    state.add_custom_unit(UnitFamily::Length, &format!("u{}", i), 1.0 + i as f64);
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(state.with_registry(|r| r.custom_units(UnitFamily::Length).len()), 8);
    }
}
