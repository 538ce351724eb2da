//! # Unit Commands
//!
//! `quote units list` and `quote units convert`.

use quote_core::UnitFamily;
use tabled::{settings::Style, Table, Tabled};
use tracing::debug;

use crate::cli::ConvertUnitArgs;
use crate::error::CliError;
use crate::state::RegistryState;

#[derive(Tabled)]
struct UnitRow {
    #[tabled(rename = "Family")]
    family: String,
    #[tabled(rename = "Unit")]
    name: String,
    #[tabled(rename = "Label")]
    label: String,
    #[tabled(rename = "Factor")]
    factor: String,
    #[tabled(rename = "Source")]
    source: &'static str,
}

/// Lists units of one family, or of all families.
///
/// ## Order
/// Built-ins first, then custom units in the order they were added.
pub fn list_units(family: Option<UnitFamily>, registry: &RegistryState) -> String {
    debug!(?family, "units list command");

    let families: Vec<UnitFamily> = match family {
        Some(f) => vec![f],
        None => UnitFamily::ALL.to_vec(),
    };

    let rows: Vec<UnitRow> = registry.with_registry(|r| {
        families
            .iter()
            .flat_map(|&family| {
                let units = r.all_units(family);
                let builtin_count = units.len() - r.custom_units(family).len();
                units
                    .into_iter()
                    .enumerate()
                    .map(move |(i, unit)| UnitRow {
                        family: family.to_string(),
                        label: r.unit_label(family, &unit.name),
                        factor: unit.conversion_factor.to_string(),
                        name: unit.name,
                        source: if i < builtin_count { "built-in" } else { "custom" },
                    })
                    .collect::<Vec<_>>()
            })
            .collect()
    });

    Table::new(rows).with(Style::rounded()).to_string()
}

/// Converts a value, after registering any `--custom` units.
///
/// `--custom` goes through the strict checks: a name that already resolves
/// in the family, or a zero factor, is rejected rather than silently shadowed.
pub fn convert_unit(args: &ConvertUnitArgs, registry: &RegistryState) -> Result<String, CliError> {
    debug!(
        value = args.value,
        from = %args.from,
        to = %args.to,
        family = %args.family,
        "units convert command"
    );

    for (name, factor) in &args.custom {
        registry.add_custom_unit_strict(args.family, name, *factor)?;
    }

    let result = registry
        .with_registry(|r| r.convert(args.value, &args.from, &args.to, args.family))?;

    Ok(format!("{} {} = {} {}", args.value, args.from, result, args.to))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn convert_args(value: f64, from: &str, to: &str, family: UnitFamily) -> ConvertUnitArgs {
        ConvertUnitArgs {
            value,
            from: from.to_string(),
            to: to.to_string(),
            family,
            custom: Vec::new(),
        }
    }

    #[test]
    fn test_list_all_families() {
        let table = list_units(None, &RegistryState::new());

        assert!(table.contains("metric-ton"));
        assert!(table.contains("Metric Tons (公噸)"));
        assert!(table.contains("oz/yd²"));
        assert!(!table.contains("custom"));
    }

    #[test]
    fn test_list_one_family_marks_custom() {
        let registry = RegistryState::new();
        registry.add_custom_unit(UnitFamily::Length, "yard", 0.9144);

        let table = list_units(Some(UnitFamily::Length), &registry);
        assert!(table.contains("yard"));
        assert!(table.contains("custom"));
        assert!(!table.contains("kg"));
    }

    #[test]
    fn test_convert_builtin() {
        let out = convert_unit(
            &convert_args(80.0, "g/m²", "kg/m²", UnitFamily::WeightPerArea),
            &RegistryState::new(),
        )
        .unwrap();
        assert_eq!(out, "80 g/m² = 0.08 kg/m²");
    }

    #[test]
    fn test_convert_with_custom_unit() {
        let args = ConvertUnitArgs {
            custom: vec![("yard".to_string(), 0.9144)],
            ..convert_args(1.0, "yard", "m", UnitFamily::Length)
        };
        let out = convert_unit(&args, &RegistryState::new()).unwrap();
        assert_eq!(out, "1 yard = 0.9144 m");
    }

    #[test]
    fn test_convert_rejects_shadowing_custom_unit() {
        let args = ConvertUnitArgs {
            custom: vec![("cm".to_string(), 5.0)],
            ..convert_args(1.0, "cm", "m", UnitFamily::Length)
        };
        let err = convert_unit(&args, &RegistryState::new()).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_convert_unknown_unit_is_lenient() {
        let out = convert_unit(
            &convert_args(3.0, "furlong", "m", UnitFamily::Length),
            &RegistryState::new(),
        )
        .unwrap();
        assert_eq!(out, "3 furlong = 3 m");
    }
}
