//! # State Module
//!
//! Session state for the `quote` binary.
//!
//! ## Why Multiple State Types?
//! Instead of a single `AppState` struct containing everything, each concern
//! has its own state type. Commands declare exactly what they read, and
//! independent states don't block each other.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────┐ ┌──────────────┐   │
//! │  │RegistryState │ │  RatesState  │ │  QuoteDraft  │ │ ConfigState  │   │
//! │  │              │ │              │ │              │ │              │   │
//! │  │ Arc<Mutex<   │ │ Arc<Mutex<   │ │ checked      │ │ company_name │   │
//! │  │ UnitRegistry │ │  RateTable   │ │ QuotationData│ │ decimals     │   │
//! │  │ >>           │ │ >>           │ │ (one command)│ │ validity     │   │
//! │  └──────────────┘ └──────────────┘ └──────────────┘ └──────────────┘   │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • Registry, rates: Arc<Mutex<T>> for exclusive writes                 │
//! │  • QuoteDraft: owned by the render command, never shared               │
//! │  • ConfigState: read-only after startup                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod draft;
mod rates;
mod registry;

pub use config::{currency_symbol, ConfigError, ConfigState};
pub use draft::QuoteDraft;
pub use rates::RatesState;
pub use registry::RegistryState;
