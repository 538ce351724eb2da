//! # Quote CLI Library
//!
//! Library behind the `quote` binary: session state, commands and rendering.
//! `main.rs` only calls [`run`].
//!
//! ## Module Organization
//! ```text
//! quote_cli_lib/
//! ├── lib.rs          ◄─── You are here (logging, dispatch)
//! ├── cli.rs          ◄─── Clap argument definitions
//! ├── document.rs     ◄─── Quotation document loading
//! ├── render.rs       ◄─── Line-item table and JSON output
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── config.rs   ◄─── Configuration (file + QUOTE_* env)
//! │   ├── registry.rs ◄─── Session unit registry
//! │   ├── rates.rs    ◄─── Editable rate table
//! │   └── draft.rs    ◄─── Quotation being priced
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── quote.rs    ◄─── render
//! │   ├── units.rs    ◄─── units list / convert
//! │   └── rates.rs    ◄─── rates list / convert
//! └── error.rs        ◄─── CLI error type and exit codes
//! ```

pub mod cli;
pub mod commands;
pub mod document;
pub mod error;
pub mod render;
pub mod state;

use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command, RatesCommand, UnitsCommand};
use error::CliError;
use state::{ConfigState, RatesState, RegistryState};

/// Runs the `quote` binary and returns the process exit code.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │                       Command Startup                                   │
/// │                                                                         │
/// │  1. Parse Arguments ──────────────────────────────────────────────────► │
/// │     • clap exits on --help / --version / usage errors                   │
/// │                                                                         │
/// │  2. Initialize Logging ───────────────────────────────────────────────► │
/// │     • tracing-subscriber with env filter, to stderr                     │
/// │     • Level from -v count, RUST_LOG overrides                           │
/// │                                                                         │
/// │  3. Load Configuration ───────────────────────────────────────────────► │
/// │     • Defaults, then config file, then QUOTE_* variables                │
/// │                                                                         │
/// │  4. Initialize State Objects ─────────────────────────────────────────► │
/// │     • RegistryState: built-in units, custom units appended per command  │
/// │     • RatesState: default rate table                                    │
/// │                                                                         │
/// │  5. Dispatch ─────────────────────────────────────────────────────────► │
/// │     • Ok: print to stdout, exit 0                                       │
/// │     • Err: print to stderr, exit with the error's code                  │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> i32 {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let json_errors = matches!(&cli.command, Command::Render(args) if args.json);

    match ConfigState::load()
        .map_err(CliError::from)
        .and_then(|config| dispatch(&cli.command, &config))
    {
        Ok(output) => {
            println!("{}", output);
            0
        }
        Err(err) => {
            error!(code = ?err.code(), "{}", err.message);
            if json_errors {
                match serde_json::to_string_pretty(&err) {
                    Ok(json) => eprintln!("{}", json),
                    Err(_) => eprintln!("error: {}", err.message),
                }
            } else {
                eprintln!("error: {}", err.message);
            }
            err.exit_code()
        }
    }
}

/// Runs one parsed command against fresh session state.
pub fn dispatch(command: &Command, config: &ConfigState) -> Result<String, CliError> {
    let registry = RegistryState::new();
    debug!(?command, "dispatching command");

    match command {
        Command::Render(args) => commands::quote::render(args, config, &registry),
        Command::Units(UnitsCommand::List { family }) => {
            Ok(commands::units::list_units(*family, &registry))
        }
        Command::Units(UnitsCommand::Convert(args)) => {
            commands::units::convert_unit(args, &registry)
        }
        Command::Rates(RatesCommand::List { edits }) => {
            commands::rates::list_rates(&RatesState::new(), edits)
        }
        Command::Rates(RatesCommand::Convert {
            amount,
            from,
            to,
            edits,
        }) => commands::rates::convert_amount(*amount, from, to, &RatesState::new(), edits, config),
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - no `-v`: warnings and errors
/// - `-v`: info, `-vv`: debug, `-vvv`: trace
/// - `RUST_LOG=quote_core=debug` overrides the flag
fn init_tracing(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    // Output goes to stdout, so logs go to stderr.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
