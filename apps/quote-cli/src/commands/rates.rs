//! # Rate Commands
//!
//! `quote rates list` and `quote rates convert`, both run against the
//! default table after any `--set`/`--add` edits.

use tabled::{settings::Style, Table, Tabled};
use tracing::debug;

use crate::cli::RateEdits;
use crate::error::CliError;
use crate::state::{ConfigState, RatesState};

#[derive(Tabled)]
struct RateRow {
    #[tabled(rename = "Code")]
    code: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Rate")]
    rate: String,
}

/// Applies rate edits in order: updates first, then additions.
pub fn apply_edits(rates: &RatesState, edits: &RateEdits) -> Result<(), CliError> {
    for (code, rate) in &edits.set {
        rates.set_rate(code, *rate)?;
    }
    for rate in &edits.add {
        rates.add_rate(rate.clone())?;
    }
    Ok(())
}

/// Lists the rate table in table order.
pub fn list_rates(rates: &RatesState, edits: &RateEdits) -> Result<String, CliError> {
    debug!("rates list command");
    apply_edits(rates, edits)?;

    let rows: Vec<RateRow> = rates
        .snapshot()
        .into_iter()
        .map(|r| RateRow {
            code: r.code,
            name: r.name,
            rate: r.rate.to_string(),
        })
        .collect();

    Ok(Table::new(rows).with(Style::rounded()).to_string())
}

/// Converts an amount and prints both sides formatted per currency.
pub fn convert_amount(
    amount: f64,
    from: &str,
    to: &str,
    rates: &RatesState,
    edits: &RateEdits,
    config: &ConfigState,
) -> Result<String, CliError> {
    debug!(amount, from = %from, to = %to, "rates convert command");
    apply_edits(rates, edits)?;

    let converted = rates.with_rates(|t| t.convert(amount, from, to))?;
    Ok(format!(
        "{} = {}",
        config.format_currency(amount, from),
        config.format_currency(converted, to)
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use quote_core::CurrencyRate;

    #[test]
    fn test_list_defaults() {
        let table = list_rates(&RatesState::new(), &RateEdits::default()).unwrap();
        assert!(table.contains("Hong Kong Dollar"));
        assert!(table.contains("31.2"));
    }

    #[test]
    fn test_list_with_edits() {
        let edits = RateEdits {
            set: vec![("EUR".to_string(), 0.95)],
            add: vec![CurrencyRate::new("JPY", "Japanese Yen", 151.0)],
        };
        let table = list_rates(&RatesState::new(), &edits).unwrap();
        assert!(table.contains("0.95"));
        assert!(!table.contains("0.92"));
        assert!(table.contains("Japanese Yen"));
    }

    #[test]
    fn test_convert() {
        let out = convert_amount(
            100.0,
            "USD",
            "EUR",
            &RatesState::new(),
            &RateEdits::default(),
            &ConfigState::default(),
        )
        .unwrap();
        assert_eq!(out, "$100.00 = €92.00");
    }

    #[test]
    fn test_convert_unknown_code_is_one_to_one() {
        let out = convert_amount(
            5.0,
            "USD",
            "XYZ",
            &RatesState::new(),
            &RateEdits::default(),
            &ConfigState::default(),
        )
        .unwrap();
        assert_eq!(out, "$5.00 = XYZ 5.00");
    }

    #[test]
    fn test_invalid_edit_is_rejected() {
        let edits = RateEdits {
            set: Vec::new(),
            add: vec![CurrencyRate::new("EUR", "Euro again", 1.0)],
        };
        let err = list_rates(&RatesState::new(), &edits).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }
}
