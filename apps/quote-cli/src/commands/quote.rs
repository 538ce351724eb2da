//! # Quote Commands
//!
//! `quote render`: load a document, price it, print it.
//!
//! ## Display Currency Precedence
//! 1. `--display-currency`
//! 2. `displayCurrency` from the config (`QUOTE_DISPLAY_CURRENCY`)
//! 3. `displayCurrency` from the document

use chrono::{DateTime, Utc};
use quote_core::QuotationHeader;
use tracing::{debug, info};

use crate::cli::RenderArgs;
use crate::document::QuotationDocument;
use crate::error::CliError;
use crate::render::{render_text, RenderedQuotation};
use crate::state::{ConfigState, QuoteDraft, RatesState, RegistryState};

/// Renders the quotation document named by `args.file`.
pub fn render(
    args: &RenderArgs,
    config: &ConfigState,
    registry: &RegistryState,
) -> Result<String, CliError> {
    debug!(file = %args.file.display(), "render command");
    let document = QuotationDocument::load(&args.file)?;
    render_document(document, args, config, registry, Utc::now())
}

/// Prices and formats an already loaded document.
///
/// Custom units from the document are appended to the session registry
/// before any item is priced.
pub fn render_document(
    document: QuotationDocument,
    args: &RenderArgs,
    config: &ConfigState,
    registry: &RegistryState,
    now: DateTime<Utc>,
) -> Result<String, CliError> {
    registry.register_all(&document.custom_units, args.strict)?;
    let rates = RatesState::from_rates(document.rates_or_default());

    let mut adjustments = document.quotation.adjustments;
    if let Some(discount) = args.discount {
        adjustments.discount_rate = discount;
    }
    if let Some(tax) = args.tax {
        adjustments.tax_rate = tax;
    }

    let display_currency = args
        .display_currency
        .clone()
        .or_else(|| config.display_currency.clone());

    let mut draft = QuoteDraft::from_quotation(document.quotation)?;
    draft.set_adjustments(adjustments)?;
    if let Some(code) = display_currency {
        draft.set_display_currency(code);
    }

    let snapshot = rates.snapshot();
    let summary = registry.with_registry(|units| draft.summarize(units, &snapshot))?;

    info!(
        items = summary.lines.len(),
        display_currency = %summary.display_currency,
        total = summary.total,
        "quotation priced"
    );

    let header = QuotationHeader::issue(now, config.validity_days)?;
    let rendered = RenderedQuotation::new(
        config,
        header,
        draft.quotation.customer.clone(),
        adjustments,
        summary,
    );

    if args.json {
        return Ok(serde_json::to_string_pretty(&rendered)?);
    }
    Ok(registry.with_registry(|units| render_text(&rendered, draft.items(), units, config)))
}
