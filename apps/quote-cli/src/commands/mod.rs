//! # Commands Module
//!
//! One function per `quote` subcommand.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── quote.rs    ◄─── render a quotation document
//! ├── units.rs    ◄─── list and convert units
//! └── rates.rs    ◄─── list and convert currencies
//! ```
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  main.rs ──► lib::run()                                                 │
//! │                 │                                                       │
//! │                 │ Cli::parse(), ConfigState::load()                     │
//! │                 ▼                                                       │
//! │  fn render(                                                             │
//! │      args: &RenderArgs,          ◄── From argv                          │
//! │      config: &ConfigState,       ◄── Loaded once at startup             │
//! │      registry: &RegistryState,   ◄── Session unit registry              │
//! │  ) -> Result<String, CliError>                                          │
//! │                 │                                                       │
//! │                 ▼                                                       │
//! │  Ok(text) ──► stdout          Err(e) ──► stderr, exit_code()            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands return their output instead of printing it, so tests can assert
//! on it directly.

pub mod quote;
pub mod rates;
pub mod units;
