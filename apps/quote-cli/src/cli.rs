//! # Command Line
//!
//! Clap derive structures for the `quote` binary.
//!
//! ```text
//! quote [-v...] render <FILE> [--display-currency CODE] [--discount PCT] [--tax PCT] [--json] [--strict]
//! quote [-v...] units list [--family F]
//! quote [-v...] units convert <VALUE> <FROM> <TO> --family F [--custom NAME=FACTOR]...
//! quote [-v...] rates list [--set CODE=RATE]... [--add CODE:NAME:RATE]...
//! quote [-v...] rates convert <AMOUNT> <FROM> <TO> [--set CODE=RATE]... [--add CODE:NAME:RATE]...
//! ```

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use quote_core::{CurrencyRate, UnitFamily};

// =============================================================================
// Top Level
// =============================================================================

/// quote -- price quotations across units and currencies
#[derive(Debug, Parser)]
#[command(
    name = "quote",
    version,
    about = "Price quotations across units and currencies",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Price a quotation document and print the line-item table
    Render(RenderArgs),

    /// List and convert measurement units
    #[command(subcommand)]
    Units(UnitsCommand),

    /// List and convert currencies
    #[command(subcommand)]
    Rates(RatesCommand),
}

// =============================================================================
// Render
// =============================================================================

#[derive(Debug, Args)]
pub struct RenderArgs {
    /// Quotation document (JSON)
    pub file: PathBuf,

    /// Display currency (overrides the document and config)
    #[arg(long, value_name = "CODE")]
    pub display_currency: Option<String>,

    /// Quotation-level discount in percent
    #[arg(long, value_name = "PCT", allow_negative_numbers = true)]
    pub discount: Option<f64>,

    /// Quotation-level tax in percent
    #[arg(long, value_name = "PCT", allow_negative_numbers = true)]
    pub tax: Option<f64>,

    /// Print the priced quotation as JSON
    #[arg(long)]
    pub json: bool,

    /// Reject custom units that are invalid or already defined
    #[arg(long)]
    pub strict: bool,
}

// =============================================================================
// Units
// =============================================================================

#[derive(Debug, Subcommand)]
pub enum UnitsCommand {
    /// List units, built-ins first
    List {
        /// Only this family (length, weight, weightPerArea)
        #[arg(long, short = 'f', value_parser = parse_family)]
        family: Option<UnitFamily>,
    },

    /// Convert a value between two units of one family
    Convert(ConvertUnitArgs),
}

#[derive(Debug, Args)]
pub struct ConvertUnitArgs {
    #[arg(allow_negative_numbers = true)]
    pub value: f64,

    pub from: String,

    pub to: String,

    /// Unit family (length, weight, weightPerArea)
    #[arg(long, short = 'f', value_parser = parse_family)]
    pub family: UnitFamily,

    /// Register a custom unit first, e.g. --custom yard=0.9144
    #[arg(long, value_name = "NAME=FACTOR", value_parser = parse_custom_unit)]
    pub custom: Vec<(String, f64)>,
}

// =============================================================================
// Rates
// =============================================================================

#[derive(Debug, Subcommand)]
pub enum RatesCommand {
    /// List the rate table
    List {
        #[command(flatten)]
        edits: RateEdits,
    },

    /// Convert an amount between two currencies
    Convert {
        #[arg(allow_negative_numbers = true)]
        amount: f64,

        from: String,

        to: String,

        #[command(flatten)]
        edits: RateEdits,
    },
}

/// Edits applied to the default rate table before the command runs.
#[derive(Debug, Clone, Default, Args)]
pub struct RateEdits {
    /// Change an existing rate, e.g. --set EUR=0.95
    #[arg(long, value_name = "CODE=RATE", value_parser = parse_rate_update)]
    pub set: Vec<(String, f64)>,

    /// Add a currency, e.g. --add "JPY:Japanese Yen:151.3"
    #[arg(long, value_name = "CODE:NAME:RATE", value_parser = parse_new_rate)]
    pub add: Vec<CurrencyRate>,
}

// =============================================================================
// Value Parsers
// =============================================================================

fn parse_family(s: &str) -> Result<UnitFamily, String> {
    s.parse::<UnitFamily>().map_err(|e| e.to_string())
}

fn parse_custom_unit(s: &str) -> Result<(String, f64), String> {
    let (name, factor) = s
        .rsplit_once('=')
        .ok_or_else(|| format!("expected NAME=FACTOR, got '{}'", s))?;
    let factor: f64 = factor
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", factor))?;
    Ok((name.trim().to_string(), factor))
}

fn parse_rate_update(s: &str) -> Result<(String, f64), String> {
    let (code, rate) = s
        .split_once('=')
        .ok_or_else(|| format!("expected CODE=RATE, got '{}'", s))?;
    let rate: f64 = rate
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", rate))?;
    Ok((code.trim().to_string(), rate))
}

fn parse_new_rate(s: &str) -> Result<CurrencyRate, String> {
    let mut parts = s.splitn(3, ':');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(code), Some(name), Some(rate)) => {
            let rate: f64 = rate
                .trim()
                .parse()
                .map_err(|_| format!("'{}' is not a number", rate))?;
            Ok(CurrencyRate::new(code.trim(), name.trim(), rate))
        }
        _ => Err(format!("expected CODE:NAME:RATE, got '{}'", s)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_render() {
        let cli = Cli::try_parse_from([
            "quote",
            "-vv",
            "render",
            "q.json",
            "--display-currency",
            "EUR",
            "--discount",
            "10",
            "--json",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        match cli.command {
            Command::Render(args) => {
                assert_eq!(args.file, PathBuf::from("q.json"));
                assert_eq!(args.display_currency.as_deref(), Some("EUR"));
                assert_eq!(args.discount, Some(10.0));
                assert_eq!(args.tax, None);
                assert!(args.json);
                assert!(!args.strict);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_units_convert_with_custom() {
        let cli = Cli::try_parse_from([
            "quote", "units", "convert", "-2", "yard", "m", "--family", "length", "--custom",
            "yard=0.9144",
        ])
        .unwrap();

        match cli.command {
            Command::Units(UnitsCommand::Convert(args)) => {
                assert_eq!(args.value, -2.0);
                assert_eq!(args.family, UnitFamily::Length);
                assert_eq!(args.custom, vec![("yard".to_string(), 0.9144)]);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_rejects_bad_family() {
        assert!(Cli::try_parse_from(["quote", "units", "list", "--family", "volume"]).is_err());
    }

    #[test]
    fn test_parse_rates_convert_with_edits() {
        let cli = Cli::try_parse_from([
            "quote",
            "rates",
            "convert",
            "100",
            "USD",
            "JPY",
            "--set",
            "EUR=0.95",
            "--add",
            "JPY:Japanese Yen:151",
        ])
        .unwrap();

        match cli.command {
            Command::Rates(RatesCommand::Convert { amount, edits, .. }) => {
                assert_eq!(amount, 100.0);
                assert_eq!(edits.set, vec![("EUR".to_string(), 0.95)]);
                assert_eq!(edits.add, vec![CurrencyRate::new("JPY", "Japanese Yen", 151.0)]);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_new_rate() {
        assert!(parse_new_rate("JPY:151").is_err());
        assert!(parse_new_rate("JPY:Yen:lots").is_err());
        assert_eq!(parse_new_rate("CHF:Swiss Franc:0.88").unwrap().name, "Swiss Franc");
    }

    #[test]
    fn test_parse_custom_unit() {
        assert_eq!(parse_custom_unit("lb=0.45359237").unwrap().0, "lb");
        assert!(parse_custom_unit("lb").is_err());
        assert!(parse_custom_unit("lb=heavy").is_err());
    }
}
