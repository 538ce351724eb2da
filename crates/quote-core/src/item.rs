//! # Item Types
//!
//! The priceable line of a quotation and the quotation document itself.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Item Model                                      │
//! │                                                                         │
//! │  ┌─────────────────┐                                                    │
//! │  │      Item       │      pricing: Pricing                              │
//! │  │  ─────────────  │      ┌──────────────────┬─────────────────────┐    │
//! │  │  id, name       │ ───► │ Fixed            │ WeightBased         │    │
//! │  │  quantity       │      │  unit_cost       │  dimensions         │    │
//! │  │  include_tax    │      │                  │   length, width     │    │
//! │  │  tax_rate (%)   │      │                  │   weight_per_area   │    │
//! │  │  currency       │      │                  │  price_per_weight   │    │
//! │  └─────────────────┘      └──────────────────┴─────────────────────┘    │
//! │                                                                         │
//! │  Only the fields of the active pricing mode exist, so a fixed-cost     │
//! │  item can never carry stray dimensions and vice versa.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Wire Format
//! ```json
//! {
//!   "id": "1", "name": "Kraft paper", "quantity": 3,
//!   "includeTax": true, "taxRate": 5, "currency": "USD",
//!   "pricing": {
//!     "mode": "weightBased",
//!     "dimensions": {
//!       "length": { "value": 2, "unit": "m" },
//!       "width": { "value": 1, "unit": "m" },
//!       "weightPerArea": { "value": 100, "unit": "g/m²" }
//!     },
//!     "pricePerWeight": { "value": 2, "weightUnit": "kg", "currency": "USD" }
//!   }
//! }
//! ```
//! Missing numeric fields default to `0`, missing strings to `""`.

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

/// Generates a fresh item id for callers that do not assign their own.
pub fn generate_item_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Dimensions
// =============================================================================

/// A scalar tagged with a unit name from one family.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct Dimension {
    pub value: f64,
    pub unit: String,
}

impl Dimension {
    pub fn new(value: f64, unit: impl Into<String>) -> Self {
        Dimension {
            value,
            unit: unit.into(),
        }
    }
}

/// Physical description of a weight-based item.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct Dimensions {
    /// Length family.
    pub length: Dimension,
    /// Length family.
    pub width: Dimension,
    /// Weight-per-area family (GSM or kg/m²).
    pub weight_per_area: Dimension,
}

/// Price quoted per unit of weight.
///
/// `currency` records what the supplier quoted in. Cost figures are always
/// taken to be in the item's own `currency`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct PricePerWeight {
    pub value: f64,
    pub weight_unit: String,
    pub currency: String,
}

// =============================================================================
// Pricing
// =============================================================================

/// Fixed pricing: `unit_cost` per unit of quantity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct FixedCost {
    pub unit_cost: f64,
}

/// Weight pricing: weight from dimensions times price per weight.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct WeightBasedCost {
    pub dimensions: Dimensions,
    pub price_per_weight: PricePerWeight,
}

/// Costing mode of an item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum Pricing {
    Fixed(FixedCost),
    WeightBased(WeightBasedCost),
}

impl Pricing {
    /// Whether this is the fixed-cost mode.
    pub fn is_fixed_cost(&self) -> bool {
        matches!(self, Pricing::Fixed(_))
    }

    /// Dimensions, present only for weight-based pricing.
    pub fn dimensions(&self) -> Option<&Dimensions> {
        match self {
            Pricing::Fixed(_) => None,
            Pricing::WeightBased(w) => Some(&w.dimensions),
        }
    }

    /// Every number the cost formula reads, labelled for error messages.
    pub fn numeric_fields(&self) -> Vec<(&'static str, f64)> {
        match self {
            Pricing::Fixed(f) => vec![("unit cost", f.unit_cost)],
            Pricing::WeightBased(w) => vec![
                ("length", w.dimensions.length.value),
                ("width", w.dimensions.width.value),
                ("weight per area", w.dimensions.weight_per_area.value),
                ("price per weight", w.price_per_weight.value),
            ],
        }
    }
}

impl Default for Pricing {
    fn default() -> Self {
        Pricing::Fixed(FixedCost::default())
    }
}

// =============================================================================
// Item
// =============================================================================

/// One priceable line of a quotation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct Item {
    /// Caller-assigned, unique within a quotation.
    pub id: String,
    pub name: String,
    pub quantity: f64,
    pub pricing: Pricing,
    pub include_tax: bool,
    /// Percent. Not clamped.
    pub tax_rate: f64,
    /// Currency the item's cost figures are denominated in.
    pub currency: String,
}

impl Item {
    /// Creates a fixed-cost item without tax.
    pub fn fixed(
        id: impl Into<String>,
        name: impl Into<String>,
        quantity: f64,
        unit_cost: f64,
        currency: impl Into<String>,
    ) -> Self {
        Item {
            id: id.into(),
            name: name.into(),
            quantity,
            pricing: Pricing::Fixed(FixedCost { unit_cost }),
            include_tax: false,
            tax_rate: 0.0,
            currency: currency.into(),
        }
    }

    /// Creates a weight-based item without tax.
    pub fn weight_based(
        id: impl Into<String>,
        name: impl Into<String>,
        quantity: f64,
        dimensions: Dimensions,
        price_per_weight: PricePerWeight,
        currency: impl Into<String>,
    ) -> Self {
        Item {
            id: id.into(),
            name: name.into(),
            quantity,
            pricing: Pricing::WeightBased(WeightBasedCost {
                dimensions,
                price_per_weight,
            }),
            include_tax: false,
            tax_rate: 0.0,
            currency: currency.into(),
        }
    }

    /// Turns on tax at `rate` percent.
    pub fn with_tax(mut self, rate: f64) -> Self {
        self.include_tax = true;
        self.tax_rate = rate;
        self
    }

    #[inline]
    pub fn is_fixed_cost(&self) -> bool {
        self.pricing.is_fixed_cost()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_item_from_json() {
        let json = r#"{
            "id": "1", "name": "Setup", "quantity": 5, "currency": "USD",
            "pricing": { "mode": "fixed", "unitCost": 10 }
        }"#;
        let item: Item = serde_json::from_str(json).unwrap();

        assert!(item.is_fixed_cost());
        assert_eq!(item.pricing, Pricing::Fixed(FixedCost { unit_cost: 10.0 }));
        assert!(!item.include_tax);
        assert_eq!(item.tax_rate, 0.0);
    }

    #[test]
    fn test_weight_based_item_from_json() {
        let json = r#"{
            "id": "2", "name": "Kraft", "quantity": 3, "currency": "USD",
            "includeTax": true, "taxRate": 5,
            "pricing": {
                "mode": "weightBased",
                "dimensions": {
                    "length": { "value": 2, "unit": "m" },
                    "width": { "value": 1, "unit": "m" },
                    "weightPerArea": { "value": 100, "unit": "g/m²" }
                },
                "pricePerWeight": { "value": 2, "weightUnit": "kg", "currency": "USD" }
            }
        }"#;
        let item: Item = serde_json::from_str(json).unwrap();

        let dims = item.pricing.dimensions().unwrap();
        assert_eq!(dims.weight_per_area, Dimension::new(100.0, "g/m²"));
        assert!(item.include_tax);
        assert_eq!(item.tax_rate, 5.0);
    }

    #[test]
    fn test_missing_fields_default() {
        let item: Item = serde_json::from_str(r#"{ "id": "x" }"#).unwrap();
        assert_eq!(item.quantity, 0.0);
        assert_eq!(item.currency, "");
        assert_eq!(item.pricing, Pricing::default());

        let json = r#"{ "id": "y", "pricing": { "mode": "weightBased" } }"#;
        let item: Item = serde_json::from_str(json).unwrap();
        assert_eq!(item.pricing.dimensions(), Some(&Dimensions::default()));
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let a = generate_item_id();
        let b = generate_item_id();
        assert_ne!(a, b);
        assert_eq!(a.len(), 36);
    }

    #[test]
    fn test_with_tax() {
        let item = Item::fixed("1", "Setup", 1.0, 100.0, "EUR").with_tax(20.0);
        assert!(item.include_tax);
        assert_eq!(item.tax_rate, 20.0);
    }
}
