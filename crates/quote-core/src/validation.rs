//! # Validation Module
//!
//! Opt-in input validation for the quotation engine.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation (quote-cli)                                     │
//! │  ├── Document parsing (serde)                                          │
//! │  └── THIS MODULE at the boundary (custom units, rates, items)          │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Engine (units, currency, cost, quotation)                    │
//! │  ├── Lenient: unknown names resolve to factor 1                        │
//! │  └── Only degenerate factors/rates are rejected                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Apart from the validity window checked by `QuotationHeader::issue`, nothing
//! in the engine calls these rules on its own. They exist for callers that want
//! to reject bad input before it reaches the lenient conversion paths, without
//! changing how lookups behave.
//!
//! ## Usage
//! ```rust
//! use quote_core::units::{UnitFamily, UnitRegistry};
//! use quote_core::validation::validate_custom_unit;
//!
//! let registry = UnitRegistry::new();
//! assert!(validate_custom_unit(&registry, UnitFamily::Length, "yard", 0.9144).is_ok());
//! assert!(validate_custom_unit(&registry, UnitFamily::Length, "cm", 0.01).is_err());
//! ```

use crate::error::ValidationError;
use crate::item::Item;
use crate::quotation::MAX_VALIDITY_DAYS;
use crate::units::{UnitFamily, UnitRegistry};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Longest accepted unit name.
pub const MAX_UNIT_NAME_LEN: usize = 32;

/// Longest accepted currency code.
pub const MAX_CURRENCY_CODE_LEN: usize = 10;

// =============================================================================
// Units
// =============================================================================

/// Validates a unit name.
///
/// ## Rules
/// - Must not be empty
/// - At most 32 characters
pub fn validate_unit_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "unit name".to_string(),
        });
    }

    if name.chars().count() > MAX_UNIT_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "unit name".to_string(),
            max: MAX_UNIT_NAME_LEN,
        });
    }

    Ok(())
}

/// Validates a conversion factor: finite and strictly positive.
pub fn validate_conversion_factor(factor: f64) -> ValidationResult<()> {
    if !factor.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "conversion factor".to_string(),
        });
    }

    if factor <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "conversion factor".to_string(),
        });
    }

    Ok(())
}

/// Strict check before [`UnitRegistry::add_custom_unit`].
///
/// Rejects names that already resolve in the family, so that a new unit is
/// never silently shadowed. The registry's own lookup order is unaffected.
pub fn validate_custom_unit(
    registry: &UnitRegistry,
    family: UnitFamily,
    name: &str,
    factor: f64,
) -> ValidationResult<()> {
    validate_unit_name(name)?;
    validate_conversion_factor(factor)?;

    if registry.contains(family, name) {
        return Err(ValidationError::Duplicate {
            field: format!("{} unit", family),
            value: name.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Currencies
// =============================================================================

/// Validates a currency code.
///
/// ## Rules
/// - Must not be empty
/// - At most 10 characters
/// - Letters and digits only
///
/// ## Example
/// ```rust
/// use quote_core::validation::validate_currency_code;
///
/// assert!(validate_currency_code("JPY").is_ok());
/// assert!(validate_currency_code("").is_err());
/// assert!(validate_currency_code("US D").is_err());
/// ```
pub fn validate_currency_code(code: &str) -> ValidationResult<()> {
    if code.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "currency code".to_string(),
        });
    }

    if code.len() > MAX_CURRENCY_CODE_LEN {
        return Err(ValidationError::TooLong {
            field: "currency code".to_string(),
            max: MAX_CURRENCY_CODE_LEN,
        });
    }

    if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(ValidationError::InvalidFormat {
            field: "currency code".to_string(),
            reason: "must contain only letters and digits".to_string(),
        });
    }

    Ok(())
}

/// Validates an exchange rate: finite and strictly positive.
pub fn validate_rate(rate: f64) -> ValidationResult<()> {
    if !rate.is_finite() {
        return Err(ValidationError::NotFinite {
            field: "exchange rate".to_string(),
        });
    }

    if rate <= 0.0 {
        return Err(ValidationError::MustBePositive {
            field: "exchange rate".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Items
// =============================================================================

/// Validates the fields of an item that would otherwise poison totals.
///
/// ## Rules
/// - `id` must not be empty
/// - `quantity`, `tax_rate` and every price/dimension value must be finite
///
/// Negative values pass and propagate algebraically.
pub fn validate_item(item: &Item) -> ValidationResult<()> {
    if item.id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "item id".to_string(),
        });
    }

    let mut numbers = vec![("quantity", item.quantity), ("tax rate", item.tax_rate)];
    numbers.extend(item.pricing.numeric_fields());

    for (field, value) in numbers {
        if !value.is_finite() {
            return Err(ValidationError::NotFinite {
                field: format!("{} of item {}", field, item.id),
            });
        }
    }

    Ok(())
}

/// Validates a percentage used for quotation-level discount or tax.
pub fn validate_percentage(field: &str, pct: f64) -> ValidationResult<()> {
    if !pct.is_finite() {
        return Err(ValidationError::NotFinite {
            field: field.to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Quotation
// =============================================================================

/// Validates how many days a quotation stays valid.
///
/// ## Rules
/// - Between 0 and `MAX_VALIDITY_DAYS` inclusive
pub fn validate_validity_days(days: i64) -> ValidationResult<()> {
    if !(0..=MAX_VALIDITY_DAYS).contains(&days) {
        return Err(ValidationError::OutOfRange {
            field: "validity days".to_string(),
            min: 0,
            max: MAX_VALIDITY_DAYS,
        });
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::item::Pricing;

    #[test]
    fn test_validate_unit_name() {
        assert!(validate_unit_name("yard").is_ok());
        assert!(validate_unit_name("lb/ft²").is_ok());

        assert!(validate_unit_name("").is_err());
        assert!(validate_unit_name("   ").is_err());
        assert!(validate_unit_name(&"u".repeat(40)).is_err());
    }

    #[test]
    fn test_validate_conversion_factor() {
        assert!(validate_conversion_factor(0.9144).is_ok());

        assert!(validate_conversion_factor(0.0).is_err());
        assert!(validate_conversion_factor(-1.0).is_err());
        assert!(validate_conversion_factor(f64::INFINITY).is_err());
        assert!(validate_conversion_factor(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_custom_unit_rejects_shadowed_names() {
        let mut registry = UnitRegistry::new();
        registry.add_custom_unit(UnitFamily::Weight, "lb", 0.45359237);

        assert!(validate_custom_unit(&registry, UnitFamily::Weight, "oz", 0.0283495).is_ok());
        assert!(matches!(
            validate_custom_unit(&registry, UnitFamily::Weight, "lb", 0.45),
            Err(ValidationError::Duplicate { .. })
        ));
        assert!(matches!(
            validate_custom_unit(&registry, UnitFamily::Weight, "kg", 1.0),
            Err(ValidationError::Duplicate { .. })
        ));
        // Same name in another family is fine
        assert!(validate_custom_unit(&registry, UnitFamily::Length, "lb", 1.0).is_ok());
    }

    #[test]
    fn test_validate_currency_code() {
        assert!(validate_currency_code("USD").is_ok());
        assert!(validate_currency_code("").is_err());
        assert!(validate_currency_code("U-S").is_err());
        assert!(validate_currency_code("ABCDEFGHIJK").is_err());
    }

    #[test]
    fn test_validate_rate() {
        assert!(validate_rate(7.19).is_ok());
        assert!(validate_rate(0.0).is_err());
        assert!(validate_rate(-0.5).is_err());
        assert!(validate_rate(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_item() {
        let item = Item::fixed("a", "Setup fee", 1.0, 250.0, "USD");
        assert!(validate_item(&item).is_ok());

        let mut missing_id = item.clone();
        missing_id.id = String::new();
        assert!(validate_item(&missing_id).is_err());

        let mut bad_price = item.clone();
        bad_price.pricing = Pricing::Fixed(crate::item::FixedCost {
            unit_cost: f64::NAN,
        });
        assert!(matches!(
            validate_item(&bad_price),
            Err(ValidationError::NotFinite { .. })
        ));

        let mut negative = item;
        negative.quantity = -2.0;
        assert!(validate_item(&negative).is_ok());
    }

    #[test]
    fn test_validate_validity_days() {
        assert!(validate_validity_days(0).is_ok());
        assert!(validate_validity_days(30).is_ok());
        assert!(validate_validity_days(MAX_VALIDITY_DAYS).is_ok());

        assert!(matches!(
            validate_validity_days(-1),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(validate_validity_days(MAX_VALIDITY_DAYS + 1).is_err());
        assert!(validate_validity_days(100_000_000).is_err());
    }
}
