//! # Error Types
//!
//! Domain-specific error types for quote-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  quote-core errors (this file)                                         │
//! │  ├── CoreError        - Conversion failures, wrapped validation        │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  quote-cli errors (in app)                                             │
//! │  └── CliError         - What the terminal sees (code + exit status)    │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CliError → stderr                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Lenient Lookups
//! Unknown unit names and currency codes are NOT errors. They resolve to a
//! factor of `1`. The only conversion failures are degenerate factors/rates
//! (zero, NaN, infinite) which would otherwise leak NaN or ∞ into totals.

use thiserror::Error;

use crate::units::UnitFamily;

// =============================================================================
// Core Error
// =============================================================================

/// Core pricing errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A currency in the rate table has a rate that cannot be divided by or
    /// multiplied with safely.
    ///
    /// ## When This Occurs
    /// - Rate edited to `0` in the rate table
    /// - Rate deserialized as NaN / infinity
    #[error("Invalid exchange rate for {code}: {rate}")]
    InvalidRate { code: String, rate: f64 },

    /// A registered unit has a degenerate conversion factor.
    #[error("Invalid conversion factor for {family} unit '{unit}': {factor}")]
    InvalidConversionFactor {
        family: UnitFamily,
        unit: String,
        factor: f64,
    },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These are raised only by the opt-in validation layer and by rate-table
/// editing; the conversion paths themselves never validate names.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Value must be a finite number.
    #[error("{field} must be a finite number")]
    NotFinite { field: String },

    /// Number outside the accepted range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Invalid format (e.g., lowercase currency code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g., duplicate unit name or currency code).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// Referenced value does not exist.
    #[error("{field} '{value}' not found")]
    NotFound { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::InvalidRate {
            code: "EUR".to_string(),
            rate: 0.0,
        };
        assert_eq!(err.to_string(), "Invalid exchange rate for EUR: 0");

        let err = CoreError::InvalidConversionFactor {
            family: UnitFamily::Length,
            unit: "yard".to_string(),
            factor: 0.0,
        };
        assert_eq!(
            err.to_string(),
            "Invalid conversion factor for length unit 'yard': 0"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "code".to_string(),
        };
        assert_eq!(err.to_string(), "code is required");

        let err = ValidationError::Duplicate {
            field: "unit".to_string(),
            value: "cm".to_string(),
        };
        assert_eq!(err.to_string(), "unit 'cm' already exists");

        let err = ValidationError::OutOfRange {
            field: "validity days".to_string(),
            min: 0,
            max: 3650,
        };
        assert_eq!(err.to_string(), "validity days must be between 0 and 3650");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
