//! # Unit Registry
//!
//! Conversion factors for the three unit families an item can be measured in.
//!
//! ## Families and Base Units
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Family           Base unit    Built-ins                                │
//! │  ───────────────  ──────────   ───────────────────────────────────────  │
//! │  Length           m            m, cm, mm, in, ft                        │
//! │  Weight           kg           g, kg, ton, metric-ton                   │
//! │  WeightPerArea    kg/m²        kg/m², g/m² (GSM), oz/yd²                │
//! │                                                                         │
//! │  value_in_to = value_in_from × (from_factor / to_factor)               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lookup Rules
//! - Built-ins are scanned first, then custom units in the order they were added.
//! - First match wins. Adding a name twice leaves the later entry unreachable.
//! - Unknown names resolve to factor `1` (treated as already in the base unit).
//!
//! ## Usage
//! ```rust
//! use quote_core::units::{UnitFamily, UnitRegistry};
//!
//! let mut registry = UnitRegistry::new();
//! registry.add_custom_unit(UnitFamily::Length, "yard", 0.9144);
//!
//! let meters = registry.convert(1.0, "yard", "m", UnitFamily::Length).unwrap();
//! assert!((meters - 0.9144).abs() < 1e-12);
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};

/// Canonical base unit names, one per family.
pub const BASE_LENGTH_UNIT: &str = "m";
pub const BASE_WEIGHT_UNIT: &str = "kg";
pub const BASE_WEIGHT_PER_AREA_UNIT: &str = "kg/m²";

const LENGTH_UNITS: &[(&str, f64)] = &[
    ("m", 1.0),
    ("cm", 0.01),
    ("mm", 0.001),
    ("in", 0.0254),
    ("ft", 0.3048),
];

const WEIGHT_UNITS: &[(&str, f64)] = &[
    ("g", 0.001),
    ("kg", 1.0),
    ("ton", 1000.0),
    ("metric-ton", 1000.0),
];

const WEIGHT_PER_AREA_UNITS: &[(&str, f64)] = &[
    ("kg/m²", 1.0),
    ("g/m²", 0.001),
    ("oz/yd²", 0.0339057),
];

const WEIGHT_UNIT_LABELS: &[(&str, &str)] = &[
    ("g", "Grams (g)"),
    ("kg", "Kilograms (kg)"),
    ("ton", "Tons (噸)"),
    ("metric-ton", "Metric Tons (公噸)"),
];

// =============================================================================
// Unit Family
// =============================================================================

/// One of the three independent unit families.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub enum UnitFamily {
    Length,
    Weight,
    WeightPerArea,
}

impl UnitFamily {
    /// All families, in display order.
    pub const ALL: [UnitFamily; 3] = [
        UnitFamily::Length,
        UnitFamily::Weight,
        UnitFamily::WeightPerArea,
    ];

    /// The family's base unit name.
    pub const fn base_unit(&self) -> &'static str {
        match self {
            UnitFamily::Length => BASE_LENGTH_UNIT,
            UnitFamily::Weight => BASE_WEIGHT_UNIT,
            UnitFamily::WeightPerArea => BASE_WEIGHT_PER_AREA_UNIT,
        }
    }

    /// Wire name, matching the serde representation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            UnitFamily::Length => "length",
            UnitFamily::Weight => "weight",
            UnitFamily::WeightPerArea => "weightPerArea",
        }
    }

    fn builtins(&self) -> &'static [(&'static str, f64)] {
        match self {
            UnitFamily::Length => LENGTH_UNITS,
            UnitFamily::Weight => WEIGHT_UNITS,
            UnitFamily::WeightPerArea => WEIGHT_PER_AREA_UNITS,
        }
    }

    const fn slot(&self) -> usize {
        match self {
            UnitFamily::Length => 0,
            UnitFamily::Weight => 1,
            UnitFamily::WeightPerArea => 2,
        }
    }
}

impl fmt::Display for UnitFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts the wire name plus a few spellings typed at a terminal.
impl FromStr for UnitFamily {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "length" => Ok(UnitFamily::Length),
            "weight" => Ok(UnitFamily::Weight),
            "weightperarea" | "weight-per-area" | "weight_per_area" => {
                Ok(UnitFamily::WeightPerArea)
            }
            _ => Err(ValidationError::InvalidFormat {
                field: "unit family".to_string(),
                reason: format!("'{}' is not one of length, weight, weightPerArea", s),
            }),
        }
    }
}

// =============================================================================
// Unit
// =============================================================================

/// A named unit and the multiplier that takes it to its family's base unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub name: String,
    pub conversion_factor: f64,
}

impl Unit {
    pub fn new(name: impl Into<String>, conversion_factor: f64) -> Self {
        Unit {
            name: name.into(),
            conversion_factor,
        }
    }
}

/// A custom unit as it appears in a quotation document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CustomUnit {
    pub family: UnitFamily,
    pub name: String,
    pub conversion_factor: f64,
}

// =============================================================================
// Unit Registry
// =============================================================================

/// Built-in units plus append-only custom units, per family.
///
/// ## Ownership
/// The registry is an ordinary value. Callers that want custom units shared
/// across a session construct one registry and hand out references (or wrap
/// it in a lock when several threads append).
#[derive(Debug, Clone, Default)]
pub struct UnitRegistry {
    custom: [Vec<Unit>; 3],
}

impl UnitRegistry {
    /// Creates a registry holding only the built-in units.
    pub fn new() -> Self {
        Self::default()
    }

    /// All units of a family: built-ins first, then custom units in addition order.
    pub fn all_units(&self, family: UnitFamily) -> Vec<Unit> {
        family
            .builtins()
            .iter()
            .map(|(name, factor)| Unit::new(*name, *factor))
            .chain(self.custom_units(family).iter().cloned())
            .collect()
    }

    /// Custom units of a family, in addition order.
    pub fn custom_units(&self, family: UnitFamily) -> &[Unit] {
        &self.custom[family.slot()]
    }

    /// Appends a custom unit to a family.
    ///
    /// No de-duplication: a name that already exists is appended anyway and
    /// stays shadowed by the earlier entry.
    pub fn add_custom_unit(&mut self, family: UnitFamily, name: impl Into<String>, factor: f64) {
        let unit = Unit::new(name, factor);
        debug!(%family, unit = %unit.name, factor, "custom unit added");
        self.custom[family.slot()].push(unit);
    }

    /// Looks up a unit's factor, first match wins.
    pub fn lookup(&self, family: UnitFamily, name: &str) -> Option<f64> {
        family
            .builtins()
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, factor)| *factor)
            .or_else(|| {
                self.custom_units(family)
                    .iter()
                    .find(|u| u.name == name)
                    .map(|u| u.conversion_factor)
            })
    }

    /// Whether a unit name is known in a family.
    pub fn contains(&self, family: UnitFamily, name: &str) -> bool {
        self.lookup(family, name).is_some()
    }

    /// Factor for a unit, defaulting to `1` when the name is unknown.
    pub fn factor(&self, family: UnitFamily, name: &str) -> f64 {
        match self.lookup(family, name) {
            Some(factor) => factor,
            None => {
                debug!(%family, unit = %name, "unknown unit, using base factor 1");
                1.0
            }
        }
    }

    /// Converts `value` from one unit to another within a family.
    ///
    /// ## Errors
    /// `CoreError::InvalidConversionFactor` when either resolved factor is zero
    /// or not finite. Unknown names are not an error.
    ///
    /// ## Example
    /// ```rust
    /// use quote_core::units::{UnitFamily, UnitRegistry};
    ///
    /// let registry = UnitRegistry::new();
    /// let kg_per_m2 = registry
    ///     .convert(80.0, "g/m²", "kg/m²", UnitFamily::WeightPerArea)
    ///     .unwrap();
    /// assert!((kg_per_m2 - 0.08).abs() < 1e-12);
    /// ```
    pub fn convert(
        &self,
        value: f64,
        from_unit: &str,
        to_unit: &str,
        family: UnitFamily,
    ) -> CoreResult<f64> {
        let from_factor = self.checked_factor(family, from_unit)?;
        let to_factor = self.checked_factor(family, to_unit)?;
        Ok(value * (from_factor / to_factor))
    }

    /// Converts `value` into the family's base unit.
    pub fn to_base(&self, value: f64, unit: &str, family: UnitFamily) -> CoreResult<f64> {
        self.convert(value, unit, family.base_unit(), family)
    }

    /// Display label for a unit. Weight units carry descriptive labels,
    /// everything else displays its own name.
    pub fn unit_label(&self, family: UnitFamily, name: &str) -> String {
        if family == UnitFamily::Weight {
            if let Some((_, label)) = WEIGHT_UNIT_LABELS.iter().find(|(n, _)| *n == name) {
                return (*label).to_string();
            }
        }
        name.to_string()
    }

    fn checked_factor(&self, family: UnitFamily, name: &str) -> CoreResult<f64> {
        let factor = self.factor(family, name);
        if factor == 0.0 || !factor.is_finite() {
            return Err(CoreError::InvalidConversionFactor {
                family,
                unit: name.to_string(),
                factor,
            });
        }
        Ok(factor)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
