//! # Cost Calculator
//!
//! Turns one item's attributes into a weight and a monetary cost in the
//! item's own currency.
//!
//! ## Costing Modes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Item ──Fixed──────► cost = unit_cost × quantity                        │
//! │                                                                         │
//! │  Item ──WeightBased► weight_kg = length_m × width_m                     │
//! │                                  × weight_per_area_kg/m² × quantity     │
//! │                      price_per_kg = convert(price, weight_unit → kg)    │
//! │                      cost = weight_kg × price_per_kg                    │
//! │                                                                         │
//! │  include_tax ──────► cost += cost × (tax_rate / 100)                    │
//! │                                                                         │
//! │  Tax is charged in the item's currency, before any display conversion. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use quote_core::cost::CostCalculator;
//! use quote_core::item::Item;
//! use quote_core::units::UnitRegistry;
//!
//! let units = UnitRegistry::new();
//! let calc = CostCalculator::new(&units);
//!
//! let item = Item::fixed("1", "Die cutting", 5.0, 10.0, "USD").with_tax(10.0);
//! let cost = calc.item_cost(&item).unwrap();
//! assert!((cost - 55.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreResult;
use crate::item::{Item, Pricing, WeightBasedCost};
use crate::units::{UnitFamily, UnitRegistry, BASE_WEIGHT_UNIT};

// =============================================================================
// Cost Breakdown
// =============================================================================

/// Weight and cost of one item, in the item's own currency.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    /// Total weight in kilograms. `0` for fixed-cost items.
    pub weight_kg: f64,
    /// Cost before tax.
    pub base_cost: f64,
    /// Tax surcharge, `0` when the item excludes tax.
    pub tax: f64,
    /// `base_cost + tax`.
    pub total: f64,
}

/// Tax surcharge on `amount` at `rate_pct` percent.
#[inline]
pub fn tax_amount(amount: f64, rate_pct: f64) -> f64 {
    amount * (rate_pct / 100.0)
}

// =============================================================================
// Cost Calculator
// =============================================================================

/// Computes item weights and costs against a unit registry.
///
/// Holds only a shared borrow; every method is pure.
#[derive(Debug, Clone, Copy)]
pub struct CostCalculator<'a> {
    units: &'a UnitRegistry,
}

impl<'a> CostCalculator<'a> {
    pub fn new(units: &'a UnitRegistry) -> Self {
        CostCalculator { units }
    }

    /// Total weight of an item in kilograms.
    ///
    /// Fixed-cost items have no dimensions and weigh `0`.
    ///
    /// ## Example
    /// ```rust
    /// use quote_core::cost::CostCalculator;
    /// use quote_core::item::{Dimension, Dimensions, Item, PricePerWeight};
    /// use quote_core::units::UnitRegistry;
    ///
    /// let units = UnitRegistry::new();
    /// let item = Item::weight_based(
    ///     "1",
    ///     "Board",
    ///     3.0,
    ///     Dimensions {
    ///         length: Dimension::new(2.0, "m"),
    ///         width: Dimension::new(1.0, "m"),
    ///         weight_per_area: Dimension::new(100.0, "g/m²"),
    ///     },
    ///     PricePerWeight::default(),
    ///     "USD",
    /// );
    /// let kg = CostCalculator::new(&units).item_weight(&item).unwrap();
    /// assert!((kg - 0.6).abs() < 1e-9);
    /// ```
    pub fn item_weight(&self, item: &Item) -> CoreResult<f64> {
        match &item.pricing {
            Pricing::Fixed(_) => Ok(0.0),
            Pricing::WeightBased(w) => self.weight_of(w, item.quantity),
        }
    }

    /// Cost before tax.
    ///
    /// For weight-based items the quoted price is passed through the weight
    /// family conversion `weight_unit → kg` exactly like a quantity would be,
    /// i.e. it is multiplied by the unit's factor.
    pub fn base_cost(&self, item: &Item) -> CoreResult<f64> {
        match &item.pricing {
            Pricing::Fixed(f) => Ok(f.unit_cost * item.quantity),
            Pricing::WeightBased(w) => {
                let weight = self.weight_of(w, item.quantity)?;
                let price = &w.price_per_weight;
                let price_per_kg = self.units.convert(
                    price.value,
                    &price.weight_unit,
                    BASE_WEIGHT_UNIT,
                    UnitFamily::Weight,
                )?;
                Ok(weight * price_per_kg)
            }
        }
    }

    /// Cost including tax when the item asks for it.
    pub fn item_cost(&self, item: &Item) -> CoreResult<f64> {
        Ok(self.item_breakdown(item)?.total)
    }

    /// Weight, base cost, tax and total of an item.
    pub fn item_breakdown(&self, item: &Item) -> CoreResult<CostBreakdown> {
        let weight_kg = self.item_weight(item)?;
        let base_cost = self.base_cost(item)?;
        let tax = if item.include_tax {
            tax_amount(base_cost, item.tax_rate)
        } else {
            0.0
        };

        Ok(CostBreakdown {
            weight_kg,
            base_cost,
            tax,
            total: base_cost + tax,
        })
    }

    fn weight_of(&self, w: &WeightBasedCost, quantity: f64) -> CoreResult<f64> {
        let dims = &w.dimensions;
        let length = self
            .units
            .to_base(dims.length.value, &dims.length.unit, UnitFamily::Length)?;
        let width = self
            .units
            .to_base(dims.width.value, &dims.width.unit, UnitFamily::Length)?;
        let density = self.units.to_base(
            dims.weight_per_area.value,
            &dims.weight_per_area.unit,
            UnitFamily::WeightPerArea,
        )?;

        Ok(length * width * density * quantity)
    }
}

/// The per-unit price shown on a line: `unit_cost` for fixed items,
/// the quoted price per weight otherwise.
pub fn unit_price(item: &Item) -> f64 {
    match &item.pricing {
        Pricing::Fixed(f) => f.unit_cost,
        Pricing::WeightBased(w) => w.price_per_weight.value,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::item::{Dimension, Dimensions, PricePerWeight};

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn board(quantity: f64, price: f64, weight_unit: &str) -> Item {
        Item::weight_based(
            "board",
            "Grey board",
            quantity,
            Dimensions {
                length: Dimension::new(2.0, "m"),
                width: Dimension::new(1.0, "m"),
                weight_per_area: Dimension::new(100.0, "g/m²"),
            },
            PricePerWeight {
                value: price,
                weight_unit: weight_unit.to_string(),
                currency: "USD".to_string(),
            },
            "USD",
        )
    }

    #[test]
    fn test_fixed_cost() {
        let units = UnitRegistry::new();
        let calc = CostCalculator::new(&units);
        let item = Item::fixed("1", "Setup", 5.0, 10.0, "USD");

        assert!(approx(calc.item_cost(&item).unwrap(), 50.0));
        assert_eq!(calc.item_weight(&item).unwrap(), 0.0);
    }

    #[test]
    fn test_fixed_cost_with_tax() {
        let units = UnitRegistry::new();
        let calc = CostCalculator::new(&units);
        let item = Item::fixed("1", "Setup", 5.0, 10.0, "USD").with_tax(10.0);

        let b = calc.item_breakdown(&item).unwrap();
        assert!(approx(b.base_cost, 50.0));
        assert!(approx(b.tax, 5.0));
        assert!(approx(b.total, 55.0));
        assert!(approx(calc.item_cost(&item).unwrap(), 55.0));
    }

    #[test]
    fn test_weight_from_dimensions() {
        let units = UnitRegistry::new();
        let calc = CostCalculator::new(&units);

        assert!(approx(calc.item_weight(&board(3.0, 2.0, "kg")).unwrap(), 0.6));
    }

    #[test]
    fn test_weight_based_cost() {
        let units = UnitRegistry::new();
        let calc = CostCalculator::new(&units);

        assert!(approx(calc.item_cost(&board(3.0, 2.0, "kg")).unwrap(), 1.2));
    }

    #[test]
    fn test_price_per_weight_scales_by_unit_factor() {
        let units = UnitRegistry::new();
        let calc = CostCalculator::new(&units);

        // convert(2, ton -> kg) = 2000, times 0.6 kg
        assert!(approx(calc.item_cost(&board(3.0, 2.0, "ton")).unwrap(), 1200.0));
        // convert(2000, g -> kg) = 2, times 0.6 kg
        assert!(approx(calc.item_cost(&board(3.0, 2000.0, "g")).unwrap(), 1.2));
    }

    #[test]
    fn test_mixed_length_units() {
        let units = UnitRegistry::new();
        let calc = CostCalculator::new(&units);
        let item = Item::weight_based(
            "sheet",
            "Sheet",
            10.0,
            Dimensions {
                length: Dimension::new(100.0, "cm"),
                width: Dimension::new(500.0, "mm"),
                weight_per_area: Dimension::new(0.2, "kg/m²"),
            },
            PricePerWeight::default(),
            "USD",
        );

        // 1 m × 0.5 m × 0.2 kg/m² × 10
        assert!(approx(calc.item_weight(&item).unwrap(), 1.0));
    }

    #[test]
    fn test_zero_quantity_costs_nothing() {
        let units = UnitRegistry::new();
        let calc = CostCalculator::new(&units);

        let fixed = Item::fixed("1", "Setup", 0.0, 10.0, "USD").with_tax(10.0);
        assert_eq!(calc.item_cost(&fixed).unwrap(), 0.0);
        assert_eq!(calc.item_cost(&board(0.0, 2.0, "kg")).unwrap(), 0.0);
    }

    #[test]
    fn test_negative_values_propagate() {
        let units = UnitRegistry::new();
        let calc = CostCalculator::new(&units);
        let item = Item::fixed("1", "Credit", -2.0, 10.0, "USD").with_tax(10.0);

        assert!(approx(calc.item_cost(&item).unwrap(), -22.0));
    }

    #[test]
    fn test_custom_units_are_used() {
        let mut units = UnitRegistry::new();
        units.add_custom_unit(UnitFamily::Weight, "lb", 0.45359237);
        let calc = CostCalculator::new(&units);

        // convert(1, lb -> kg) = 0.45359237, times 0.6 kg
        let cost = calc.item_cost(&board(3.0, 1.0, "lb")).unwrap();
        assert!(approx(cost, 0.6 * 0.45359237));
    }

    #[test]
    fn test_degenerate_unit_surfaces_error() {
        let mut units = UnitRegistry::new();
        units.add_custom_unit(UnitFamily::Weight, "nothing", 0.0);
        let calc = CostCalculator::new(&units);

        let err = calc.item_cost(&board(3.0, 1.0, "nothing")).unwrap_err();
        assert!(matches!(err, CoreError::InvalidConversionFactor { .. }));
    }

    #[test]
    fn test_unit_price() {
        assert_eq!(unit_price(&Item::fixed("1", "Setup", 5.0, 10.0, "USD")), 10.0);
        assert_eq!(unit_price(&board(1.0, 2.5, "kg")), 2.5);
    }
}
