//! # Quotation Document
//!
//! The JSON file `quote render` reads: a quotation plus the optional rate
//! table and custom units it was priced with.
//!
//! ```json
//! {
//!   "customer": { "name": "Acme", "email": "buyer@acme.test" },
//!   "items": [ { "id": "1", "name": "Setup", "quantity": 5,
//!                "pricing": { "mode": "fixed", "unitCost": 10 },
//!                "currency": "USD" } ],
//!   "baseCurrency": "USD",
//!   "displayCurrency": "EUR",
//!   "rates": [ { "code": "USD", "name": "US Dollar", "rate": 1 } ],
//!   "customUnits": [ { "family": "length", "name": "yard", "conversionFactor": 0.9144 } ]
//! }
//! ```
//!
//! `rates` falls back to the default table when absent.

use std::path::Path;

use quote_core::currency::{default_currency_rates, CurrencyRate};
use quote_core::{CustomUnit, QuotationData};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::CliError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationDocument {
    #[serde(flatten)]
    pub quotation: QuotationData,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rates: Option<Vec<CurrencyRate>>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_units: Vec<CustomUnit>,
}

impl QuotationDocument {
    /// Reads and parses a document file.
    pub fn load(path: &Path) -> Result<Self, CliError> {
        let text = std::fs::read_to_string(path).map_err(|e| CliError::io(path, e))?;
        let document = Self::parse(&text).map_err(|e| CliError::parse(path, e))?;

        debug!(
            path = %path.display(),
            items = document.quotation.items.len(),
            custom_units = document.custom_units.len(),
            "quotation document loaded"
        );
        Ok(document)
    }

    pub fn parse(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Rates shipped with the document, else the default table.
    pub fn rates_or_default(&self) -> Vec<CurrencyRate> {
        self.rates.clone().unwrap_or_else(default_currency_rates)
    }
}
