//! # Quote Draft
//!
//! The quotation being priced by the current command.
//!
//! ## Draft Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Draft Operations                                     │
//! │                                                                         │
//! │  Source                    Call                    Draft Change         │
//! │  ──────                    ────                    ────────────         │
//! │                                                                         │
//! │  Loaded document ────────► from_quotation() ─────► checked items       │
//! │                                                                         │
//! │  --discount / --tax ─────► set_adjustments() ────► adjustments         │
//! │                                                                         │
//! │  --display-currency ─────► set_display_currency() ► display currency   │
//! │                                                                         │
//! │  Render ─────────────────► summarize() ──────────► (read only)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! A draft lives for one command, so it is a plain value rather than shared
//! state behind a mutex.

use quote_core::currency::CurrencyRate;
use quote_core::item::generate_item_id;
use quote_core::validation::{validate_item, validate_percentage};
use quote_core::{
    Adjustments, CoreResult, Item, QuotationAggregator, QuotationData, QuotationSummary,
    UnitRegistry, ValidationError,
};
use tracing::debug;

/// A quotation that passed the boundary checks.
///
/// ## Invariants
/// - Item ids are unique within the draft
/// - Every item passed `validate_item` on the way in
/// - Items keep insertion order
#[derive(Debug, Clone)]
pub struct QuoteDraft {
    pub quotation: QuotationData,
}

impl QuoteDraft {
    /// Starts a draft from a loaded quotation, re-checking every item.
    pub fn from_quotation(quotation: QuotationData) -> Result<Self, ValidationError> {
        let QuotationData {
            customer,
            items,
            base_currency,
            display_currency,
            adjustments,
        } = quotation;

        let mut draft = QuoteDraft {
            quotation: QuotationData {
                customer,
                items: Vec::with_capacity(items.len()),
                base_currency,
                display_currency,
                adjustments: Adjustments::default(),
            },
        };
        draft.set_adjustments(adjustments)?;

        for item in items {
            draft.add_item(item)?;
        }
        Ok(draft)
    }

    /// Appends an item, assigning a fresh id when it has none.
    fn add_item(&mut self, mut item: Item) -> Result<(), ValidationError> {
        if item.id.trim().is_empty() {
            item.id = generate_item_id();
        }
        validate_item(&item)?;

        if self.quotation.items.iter().any(|i| i.id == item.id) {
            return Err(ValidationError::Duplicate {
                field: "item id".to_string(),
                value: item.id,
            });
        }

        debug!(id = %item.id, name = %item.name, "item added to draft");
        self.quotation.items.push(item);
        Ok(())
    }

    /// Sets quotation-level discount and tax percentages.
    pub fn set_adjustments(&mut self, adjustments: Adjustments) -> Result<(), ValidationError> {
        validate_percentage("discount rate", adjustments.discount_rate)?;
        validate_percentage("tax rate", adjustments.tax_rate)?;
        self.quotation.adjustments = adjustments;
        Ok(())
    }

    pub fn set_display_currency(&mut self, code: impl Into<String>) {
        self.quotation.display_currency = code.into();
    }

    pub fn items(&self) -> &[Item] {
        &self.quotation.items
    }

    /// Prices the draft.
    pub fn summarize(
        &self,
        units: &UnitRegistry,
        rates: &[CurrencyRate],
    ) -> CoreResult<QuotationSummary> {
        QuotationAggregator::new(units, rates).summarize(&self.quotation)
    }
}
