//! # Rates State
//!
//! The session's editable currency rate table.
//!
//! Starts from the default table (or the rates a document ships with) and
//! supports the two edits the rate editor offers: change an existing rate,
//! add a new currency.

use std::sync::{Arc, Mutex, MutexGuard};

use quote_core::currency::{CurrencyRate, RateTable};
use quote_core::ValidationError;
use tracing::warn;

/// Session-managed rate table.
#[derive(Debug, Clone, Default)]
pub struct RatesState {
    table: Arc<Mutex<RateTable>>,
}

impl RatesState {
    /// Default rates (USD, EUR, CNY, HKD, TWD).
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_rates(rates: Vec<CurrencyRate>) -> Self {
        RatesState {
            table: Arc::new(Mutex::new(RateTable::new(rates))),
        }
    }

    /// Executes a function with read access to the table.
    pub fn with_rates<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&RateTable) -> R,
    {
        f(&self.lock())
    }

    /// Copy of the current rows, for pricing outside the lock.
    pub fn snapshot(&self) -> Vec<CurrencyRate> {
        self.lock().rates().to_vec()
    }

    pub fn set_rate(&self, code: &str, rate: f64) -> Result<(), ValidationError> {
        self.lock().set_rate(code, rate)
    }

    pub fn add_rate(&self, rate: CurrencyRate) -> Result<(), ValidationError> {
        self.lock().add_rate(rate)
    }

    fn lock(&self) -> MutexGuard<'_, RateTable> {
        self.table.lock().unwrap_or_else(|poisoned| {
            warn!("rate table mutex poisoned, recovering");
            poisoned.into_inner()
        })
    }
}
