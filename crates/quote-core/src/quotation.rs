//! # Quotation Aggregator
//!
//! Sums per-item costs into quotation totals in a chosen display currency.
//!
//! ## Aggregation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Quotation Totals                                   │
//! │                                                                         │
//! │  for each item (insertion order):                                      │
//! │     item_cost (native currency, item tax included)                     │
//! │          │                                                              │
//! │          ▼                                                              │
//! │     convert(item.currency → display_currency)                          │
//! │          │                                                              │
//! │          ▼                                                              │
//! │  subtotal = Σ converted costs                                          │
//! │          │                                                              │
//! │          ▼                                                              │
//! │  after_discount = subtotal × (1 − discount_rate / 100)                 │
//! │          │                                                              │
//! │          ▼                                                              │
//! │  total = after_discount × (1 + tax_rate / 100)                         │
//! │                                                                         │
//! │  Discount always precedes the overall tax, and both apply to the       │
//! │  converted subtotal, never to native per-item amounts.                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::cost::{unit_price, CostCalculator};
use crate::currency::{convert_currency, CurrencyRate, REFERENCE_CURRENCY};
use crate::error::{CoreResult, ValidationError};
use crate::item::Item;
use crate::units::UnitRegistry;
use crate::validation::validate_validity_days;

/// Days a quotation stays valid unless configured otherwise.
pub const DEFAULT_VALIDITY_DAYS: i64 = 30;

/// Longest accepted validity window, about ten years.
pub const MAX_VALIDITY_DAYS: i64 = 3650;

/// Terms printed under every quotation.
pub const STANDARD_TERMS: &[&str] = &[
    "Validity: 30 days from the date of quotation",
    "Payment Terms: 50% advance, 50% before delivery",
    "Delivery Time: 2-3 weeks after order confirmation",
    "Prices are subject to change without prior notice",
];

// =============================================================================
// Quotation Data
// =============================================================================

/// Who the quotation is addressed to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default)]
pub struct Customer {
    pub name: String,
    pub email: String,
}

/// Quotation-level percentages applied on top of the subtotal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct Adjustments {
    /// Percent taken off the subtotal.
    pub discount_rate: f64,
    /// Percent added after the discount.
    pub tax_rate: f64,
}

/// A quotation as entered by the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(default, rename_all = "camelCase")]
pub struct QuotationData {
    pub customer: Customer,
    /// Display order.
    pub items: Vec<Item>,
    pub base_currency: String,
    pub display_currency: String,
    pub adjustments: Adjustments,
}

impl Default for QuotationData {
    fn default() -> Self {
        QuotationData {
            customer: Customer::default(),
            items: Vec::new(),
            base_currency: REFERENCE_CURRENCY.to_string(),
            display_currency: REFERENCE_CURRENCY.to_string(),
            adjustments: Adjustments::default(),
        }
    }
}

// =============================================================================
// Summary Types
// =============================================================================

/// One priced row of the line-item table, in the display currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct LineSummary {
    pub id: String,
    pub name: String,
    pub quantity: f64,
    pub is_fixed_cost: bool,
    /// Kilograms; `None` for fixed-cost items.
    pub weight_kg: Option<f64>,
    pub unit_price: f64,
    pub base_cost: f64,
    /// Item tax; `None` when the item excludes tax.
    pub tax: Option<f64>,
    pub tax_rate: f64,
    pub total: f64,
}

/// Totals of a whole quotation, in `display_currency`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuotationSummary {
    pub display_currency: String,
    pub lines: Vec<LineSummary>,
    /// Sum of line totals (item tax included).
    pub subtotal: f64,
    /// Portion of `subtotal` that is item tax.
    pub item_tax: f64,
    /// Quotation-level discount amount.
    pub discount: f64,
    /// Quotation-level tax amount.
    pub overall_tax: f64,
    pub total: f64,
}

// =============================================================================
// Aggregator
// =============================================================================

/// Aggregates quotations against a unit registry and a rate table.
///
/// The rate table is an input here, not part of the quotation: callers keep
/// it consistent with the currencies their items use.
#[derive(Debug, Clone, Copy)]
pub struct QuotationAggregator<'a> {
    calculator: CostCalculator<'a>,
    rates: &'a [CurrencyRate],
}

impl<'a> QuotationAggregator<'a> {
    pub fn new(units: &'a UnitRegistry, rates: &'a [CurrencyRate]) -> Self {
        QuotationAggregator {
            calculator: CostCalculator::new(units),
            rates,
        }
    }

    /// Sum of converted item costs.
    pub fn subtotal(&self, quotation: &QuotationData) -> CoreResult<f64> {
        let mut subtotal = 0.0;
        for item in &quotation.items {
            let cost = self.calculator.item_cost(item)?;
            subtotal += self.to_display(cost, item, &quotation.display_currency)?;
        }
        Ok(subtotal)
    }

    /// Prices one item in the display currency.
    pub fn line(&self, item: &Item, display_currency: &str) -> CoreResult<LineSummary> {
        let breakdown = self.calculator.item_breakdown(item)?;

        Ok(LineSummary {
            id: item.id.clone(),
            name: item.name.clone(),
            quantity: item.quantity,
            is_fixed_cost: item.is_fixed_cost(),
            weight_kg: (!item.is_fixed_cost()).then_some(breakdown.weight_kg),
            unit_price: self.to_display(unit_price(item), item, display_currency)?,
            base_cost: self.to_display(breakdown.base_cost, item, display_currency)?,
            tax: if item.include_tax {
                Some(self.to_display(breakdown.tax, item, display_currency)?)
            } else {
                None
            },
            tax_rate: item.tax_rate,
            total: self.to_display(breakdown.total, item, display_currency)?,
        })
    }

    /// Prices every line and derives the quotation totals.
    ///
    /// ## Example
    /// ```rust
    /// use quote_core::currency::default_currency_rates;
    /// use quote_core::item::Item;
    /// use quote_core::quotation::{QuotationAggregator, QuotationData};
    /// use quote_core::units::UnitRegistry;
    ///
    /// let units = UnitRegistry::new();
    /// let rates = default_currency_rates();
    /// let quotation = QuotationData {
    ///     items: vec![Item::fixed("1", "Setup", 5.0, 10.0, "USD")],
    ///     display_currency: "EUR".to_string(),
    ///     ..QuotationData::default()
    /// };
    ///
    /// let summary = QuotationAggregator::new(&units, &rates)
    ///     .summarize(&quotation)
    ///     .unwrap();
    /// assert!((summary.total - 46.0).abs() < 1e-9);
    /// ```
    pub fn summarize(&self, quotation: &QuotationData) -> CoreResult<QuotationSummary> {
        let display_code = quotation.display_currency.as_str();
        let lines = quotation
            .items
            .iter()
            .map(|item| self.line(item, display_code))
            .collect::<CoreResult<Vec<_>>>()?;

        let subtotal: f64 = lines.iter().map(|l| l.total).sum();
        let item_tax: f64 = lines.iter().filter_map(|l| l.tax).sum();

        let adj = quotation.adjustments;
        let after_discount = subtotal * (1.0 - adj.discount_rate / 100.0);
        let total = after_discount * (1.0 + adj.tax_rate / 100.0);

        debug!(
            items = lines.len(),
            display_currency = %display_code,
            subtotal,
            total,
            "quotation summarized"
        );

        Ok(QuotationSummary {
            display_currency: quotation.display_currency.clone(),
            lines,
            subtotal,
            item_tax,
            discount: subtotal - after_discount,
            overall_tax: total - after_discount,
            total,
        })
    }

    fn to_display(&self, amount: f64, item: &Item, display_currency: &str) -> CoreResult<f64> {
        convert_currency(amount, &item.currency, display_currency, self.rates)
    }
}

// =============================================================================
// Header
// =============================================================================

/// Number and dates printed at the top of a quotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct QuotationHeader {
    /// `QT-` followed by the last six digits of the issue time in milliseconds.
    pub number: String,
    #[ts(as = "String")]
    pub issued_on: NaiveDate,
    #[ts(as = "String")]
    pub valid_until: NaiveDate,
}

impl QuotationHeader {
    /// Issues a header at `now`. The clock is passed in, not read.
    ///
    /// ## Errors
    /// `validity_days` outside `0..=MAX_VALIDITY_DAYS`, or a `valid_until`
    /// past the last representable date.
    pub fn issue(now: DateTime<Utc>, validity_days: i64) -> CoreResult<Self> {
        validate_validity_days(validity_days)?;

        let millis = now.timestamp_millis().rem_euclid(1_000_000);
        let issued_on = now.date_naive();
        let valid_until = issued_on
            .checked_add_signed(Duration::days(validity_days))
            .ok_or_else(|| ValidationError::OutOfRange {
                field: "validity days".to_string(),
                min: 0,
                max: (NaiveDate::MAX - issued_on).num_days(),
            })?;

        Ok(QuotationHeader {
            number: format!("QT-{:06}", millis),
            issued_on,
            valid_until,
        })
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
