//! # Quote Entry Point
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                           quote                                         │
//! │                                                                         │
//! │  argv ──► clap ──► ConfigState ──► command ──► quote-core               │
//! │                                       │                                 │
//! │                                       ▼                                 │
//! │                              stdout / stderr + exit code                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The actual setup is in lib.rs for better testability.

fn main() {
    std::process::exit(quote_cli_lib::run());
}
