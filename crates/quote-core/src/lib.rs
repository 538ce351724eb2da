//! # quote-core: Pure Pricing Logic for Quotations
//!
//! This crate is the unit-conversion and cost-aggregation engine behind the
//! `quote` tool. It contains all pricing logic as pure functions with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Quotation Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    quote-cli (presentation)                     │   │
//! │  │   Load document ──► Session state ──► Render line-item table   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ quote-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   units   │  │ currency  │  │   cost    │  │ quotation │  │   │
//! │  │   │ Registry  │  │ RateTable │  │Calculator │  │Aggregator │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO GLOBAL STATE • PURE FUNCTIONS                    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`units`] - Unit families, built-in and custom units, conversion
//! - [`currency`] - Currency rates and conversion
//! - [`item`] - Items, dimensions and pricing modes
//! - [`cost`] - Item weight and cost
//! - [`quotation`] - Quotation documents, totals and header
//! - [`validation`] - Opt-in input validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, inputs are never mutated
//! 2. **Explicit Registry**: custom units live in a [`UnitRegistry`] value the
//!    caller owns, not in process-wide state
//! 3. **Fail Open**: unknown units and currencies resolve to factor `1`
//! 4. **No NaN in Totals**: zero or non-finite factors/rates are typed errors
//!
//! ## Example Usage
//!
//! ```rust
//! use quote_core::currency::default_currency_rates;
//! use quote_core::item::Item;
//! use quote_core::quotation::{QuotationAggregator, QuotationData};
//! use quote_core::units::UnitRegistry;
//!
//! let units = UnitRegistry::new();
//! let rates = default_currency_rates();
//!
//! let quotation = QuotationData {
//!     items: vec![Item::fixed("1", "Plate making", 5.0, 10.0, "USD").with_tax(10.0)],
//!     ..QuotationData::default()
//! };
//!
//! let summary = QuotationAggregator::new(&units, &rates)
//!     .summarize(&quotation)
//!     .unwrap();
//! assert!((summary.subtotal - 55.0).abs() < 1e-9);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cost;
pub mod currency;
pub mod error;
pub mod item;
pub mod quotation;
pub mod units;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use quote_core::UnitRegistry` instead of
// `use quote_core::units::UnitRegistry`

pub use cost::{CostBreakdown, CostCalculator};
pub use currency::{convert_currency, default_currency_rates, CurrencyRate, RateTable};
pub use error::{CoreError, CoreResult, ValidationError};
pub use item::{Dimension, Dimensions, FixedCost, Item, PricePerWeight, Pricing, WeightBasedCost};
pub use quotation::{
    Adjustments, Customer, LineSummary, QuotationAggregator, QuotationData, QuotationHeader,
    QuotationSummary,
};
pub use units::{CustomUnit, Unit, UnitFamily, UnitRegistry};
