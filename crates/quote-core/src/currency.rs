//! # Currency Table
//!
//! Exchange rates relative to a single reference currency (USD in the
//! defaults) and conversion between any two codes in the table.
//!
//! ## Conversion
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Rates are "units of CODE per 1 reference unit":                       │
//! │                                                                         │
//! │    USD 1.00   EUR 0.92   CNY 7.19   HKD 7.82   TWD 31.2                │
//! │                                                                         │
//! │  amount_in_to = amount_in_from × (to_rate / from_rate)                 │
//! │                                                                         │
//! │  100 EUR → CNY  =  100 × (7.19 / 0.92)  =  781.52...                   │
//! │                                                                         │
//! │  No rounding happens here. Formatting to 2 decimals is the             │
//! │  presentation layer's job.                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Codes missing from the table convert at rate `1`, i.e. they are treated as
//! pegged to the reference currency.

use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::error::{CoreError, CoreResult, ValidationError};
use crate::validation::{validate_currency_code, validate_rate, ValidationResult};

/// Reference currency of the default rate table.
pub const REFERENCE_CURRENCY: &str = "USD";

// =============================================================================
// Currency Rate
// =============================================================================

/// One row of the rate table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyRate {
    /// ISO 4217 style code, e.g. "EUR".
    pub code: String,
    /// Human readable name, e.g. "Euro".
    pub name: String,
    /// Units of this currency per one unit of the reference currency.
    pub rate: f64,
}

impl CurrencyRate {
    pub fn new(code: impl Into<String>, name: impl Into<String>, rate: f64) -> Self {
        CurrencyRate {
            code: code.into(),
            name: name.into(),
            rate,
        }
    }
}

/// The rates a fresh session starts with.
pub fn default_currency_rates() -> Vec<CurrencyRate> {
    vec![
        CurrencyRate::new("USD", "US Dollar", 1.0),
        CurrencyRate::new("EUR", "Euro", 0.92),
        CurrencyRate::new("CNY", "Chinese Yuan", 7.19),
        CurrencyRate::new("HKD", "Hong Kong Dollar", 7.82),
        CurrencyRate::new("TWD", "Taiwan Dollar", 31.2),
    ]
}

// =============================================================================
// Conversion
// =============================================================================

/// Rate for `code`, defaulting to `1` when the code is absent. First match wins.
pub fn rate_for(code: &str, rates: &[CurrencyRate]) -> f64 {
    match rates.iter().find(|r| r.code == code) {
        Some(r) => r.rate,
        None => {
            debug!(code = %code, "currency not in rate table, using rate 1");
            1.0
        }
    }
}

/// Converts an amount between two currencies of a rate table.
///
/// ## Errors
/// `CoreError::InvalidRate` when a resolved rate is zero or not finite.
/// Unknown codes are not an error.
///
/// ## Example
/// ```rust
/// use quote_core::currency::{convert_currency, default_currency_rates};
///
/// let rates = default_currency_rates();
/// let eur = convert_currency(100.0, "USD", "EUR", &rates).unwrap();
/// assert!((eur - 92.0).abs() < 1e-9);
///
/// // Unknown codes are pegged 1:1 to USD
/// let same = convert_currency(100.0, "XYZ", "USD", &rates).unwrap();
/// assert!((same - 100.0).abs() < 1e-9);
/// ```
pub fn convert_currency(
    amount: f64,
    from_code: &str,
    to_code: &str,
    rates: &[CurrencyRate],
) -> CoreResult<f64> {
    let from_rate = checked_rate(from_code, rates)?;
    let to_rate = checked_rate(to_code, rates)?;
    Ok(amount * (to_rate / from_rate))
}

fn checked_rate(code: &str, rates: &[CurrencyRate]) -> CoreResult<f64> {
    let rate = rate_for(code, rates);
    if rate == 0.0 || !rate.is_finite() {
        return Err(CoreError::InvalidRate {
            code: code.to_string(),
            rate,
        });
    }
    Ok(rate)
}

// =============================================================================
// Rate Table
// =============================================================================

/// An ordered, editable list of currency rates.
///
/// Serializes as a plain JSON array of [`CurrencyRate`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RateTable {
    rates: Vec<CurrencyRate>,
}

impl RateTable {
    pub fn new(rates: Vec<CurrencyRate>) -> Self {
        RateTable { rates }
    }

    /// Rows in table order.
    pub fn rates(&self) -> &[CurrencyRate] {
        &self.rates
    }

    /// Codes in table order.
    pub fn codes(&self) -> Vec<&str> {
        self.rates.iter().map(|r| r.code.as_str()).collect()
    }

    pub fn get(&self, code: &str) -> Option<&CurrencyRate> {
        self.rates.iter().find(|r| r.code == code)
    }

    /// Rate for `code`, `1` if absent.
    pub fn rate(&self, code: &str) -> f64 {
        rate_for(code, &self.rates)
    }

    /// See [`convert_currency`].
    pub fn convert(&self, amount: f64, from_code: &str, to_code: &str) -> CoreResult<f64> {
        convert_currency(amount, from_code, to_code, &self.rates)
    }

    /// Updates the rate of an existing currency in place.
    pub fn set_rate(&mut self, code: &str, rate: f64) -> ValidationResult<()> {
        validate_rate(rate)?;
        let row = self
            .rates
            .iter_mut()
            .find(|r| r.code == code)
            .ok_or_else(|| ValidationError::NotFound {
                field: "currency".to_string(),
                value: code.to_string(),
            })?;
        debug!(code = %code, old = row.rate, new = rate, "exchange rate updated");
        row.rate = rate;
        Ok(())
    }

    /// Appends a new currency.
    ///
    /// ## Rules
    /// - Code and name must be non-empty
    /// - Rate must be finite and positive
    /// - Code must not already be in the table
    pub fn add_rate(&mut self, rate: CurrencyRate) -> ValidationResult<()> {
        validate_currency_code(&rate.code)?;
        if rate.name.trim().is_empty() {
            return Err(ValidationError::Required {
                field: "currency name".to_string(),
            });
        }
        validate_rate(rate.rate)?;
        if self.get(&rate.code).is_some() {
            return Err(ValidationError::Duplicate {
                field: "currency".to_string(),
                value: rate.code,
            });
        }
        debug!(code = %rate.code, rate = rate.rate, "currency added");
        self.rates.push(rate);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

impl Default for RateTable {
    fn default() -> Self {
        RateTable::new(default_currency_rates())
    }
}

impl From<Vec<CurrencyRate>> for RateTable {
    fn from(rates: Vec<CurrencyRate>) -> Self {
        RateTable::new(rates)
    }
}

impl AsRef<[CurrencyRate]> for RateTable {
    fn as_ref(&self) -> &[CurrencyRate] {
        &self.rates
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn test_convert_between_table_currencies() {
        let rates = default_currency_rates();
        let cny = convert_currency(92.0, "EUR", "CNY", &rates).unwrap();
        assert!(approx(cny, 719.0));
    }

    #[test]
    fn test_round_trip_all_pairs() {
        let rates = default_currency_rates();
        for a in &rates {
            for b in &rates {
                let there = convert_currency(1234.5, &a.code, &b.code, &rates).unwrap();
                let back = convert_currency(there, &b.code, &a.code, &rates).unwrap();
                assert!(approx(back, 1234.5), "{} -> {} gave {}", a.code, b.code, back);
            }
        }
    }

    #[test]
    fn test_unknown_currency_is_rate_one() {
        let rates = default_currency_rates();
        assert_eq!(rate_for("JPY", &rates), 1.0);

        let value = convert_currency(10.0, "JPY", "EUR", &rates).unwrap();
        assert!(approx(value, 9.2));

        let value = convert_currency(10.0, "JPY", "GBP", &rates).unwrap();
        assert!(approx(value, 10.0));
    }

    #[test]
    fn test_zero_rate_is_invalid() {
        let rates = vec![CurrencyRate::new("USD", "US Dollar", 1.0), CurrencyRate::new("BAD", "Broken", 0.0)];
        let err = convert_currency(5.0, "BAD", "USD", &rates).unwrap_err();
        assert!(matches!(err, CoreError::InvalidRate { ref code, .. } if code == "BAD"));
    }

    #[test]
    fn test_set_rate() {
        let mut table = RateTable::default();
        table.set_rate("EUR", 0.9).unwrap();
        assert_eq!(table.rate("EUR"), 0.9);

        assert!(table.set_rate("GBP", 0.8).is_err());
        assert!(table.set_rate("EUR", 0.0).is_err());
        assert!(table.set_rate("EUR", f64::NAN).is_err());
    }

    #[test]
    fn test_add_rate() {
        let mut table = RateTable::default();
        table
            .add_rate(CurrencyRate::new("JPY", "Japanese Yen", 151.3))
            .unwrap();
        assert_eq!(table.codes(), vec!["USD", "EUR", "CNY", "HKD", "TWD", "JPY"]);

        // Duplicate code
        assert!(table
            .add_rate(CurrencyRate::new("JPY", "Yen again", 150.0))
            .is_err());
        // Missing name
        assert!(table.add_rate(CurrencyRate::new("GBP", "", 0.79)).is_err());
        // Zero rate
        assert!(table
            .add_rate(CurrencyRate::new("GBP", "Pound", 0.0))
            .is_err());
        assert_eq!(table.len(), 6);
    }

    #[test]
    fn test_table_serializes_as_array() {
        let table = RateTable::new(vec![CurrencyRate::new("USD", "US Dollar", 1.0)]);
        let json = serde_json::to_string(&table).unwrap();
        assert_eq!(json, r#"[{"code":"USD","name":"US Dollar","rate":1.0}]"#);
    }
}
