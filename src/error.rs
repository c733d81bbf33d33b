// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Error types for calendar computations.
//!
//! | Variant | Raised when | Cause |
//! |---------|-------------|-------|
//! | [`InvalidDate`](CalendarError::InvalidDate) | before any astronomy runs | caller input |
//! | [`UnsupportedRange`](CalendarError::UnsupportedRange) | an instant leaves the validated ephemeris window | caller input |
//! | [`ConvergenceFailure`](CalendarError::ConvergenceFailure) | a bounded search exhausts its budget | internal |
//! | [`InconsistentYear`](CalendarError::InconsistentYear) | month or term bookkeeping of a year breaks | internal |
//! | [`Config`](CalendarError::Config) | the configuration fails validation | caller setup |
//!
//! None of them is recovered inside the crate: an approximate date would be a
//! wrong date.

use thiserror::Error;

/// Unified error type for conversions and solar-term queries.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalendarError {
    /// Malformed Gregorian or lunisolar input (e.g. April 31, leap month 5 in
    /// a year without one).
    #[error("invalid date {year}-{month:02}-{day:02}: {reason}")]
    InvalidDate {
        year: i32,
        month: u32,
        day: u32,
        reason: &'static str,
    },

    /// The instant lies outside the window the astronomical model is
    /// validated for.
    #[error("JD {jd:.5} is outside the supported years {first_year}..={last_year}")]
    UnsupportedRange {
        jd: f64,
        first_year: i32,
        last_year: i32,
    },

    /// A bounded numerical search ran out of iterations.
    #[error("{search} did not converge within {iterations} iterations")]
    ConvergenceFailure {
        search: &'static str,
        iterations: u32,
    },

    /// Months between two winter solstices, or the solar terms of a year,
    /// broke an invariant of the calendar.
    #[error("year {year} is inconsistent: {reason}")]
    InconsistentYear { year: i32, reason: String },

    /// The configuration a query ran under is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Convenience alias for `Result<T, CalendarError>`.
pub type CalendarResult<T> = Result<T, CalendarError>;

impl CalendarError {
    /// Creates an [`InvalidDate`](Self::InvalidDate) error.
    pub fn invalid_date(year: i32, month: u32, day: u32, reason: &'static str) -> Self {
        Self::InvalidDate {
            year,
            month,
            day,
            reason,
        }
    }

    /// Creates an [`UnsupportedRange`](Self::UnsupportedRange) error.
    pub fn unsupported_range(jd: f64, first_year: i32, last_year: i32) -> Self {
        Self::UnsupportedRange {
            jd,
            first_year,
            last_year,
        }
    }

    /// Creates a [`ConvergenceFailure`](Self::ConvergenceFailure) error.
    pub fn convergence_failure(search: &'static str, iterations: u32) -> Self {
        Self::ConvergenceFailure { search, iterations }
    }

    /// Creates an [`InconsistentYear`](Self::InconsistentYear) error.
    pub fn inconsistent_year(year: i32, reason: impl Into<String>) -> Self {
        Self::InconsistentYear {
            year,
            reason: reason.into(),
        }
    }

    /// `true` for failures caused by the caller's input rather than by the
    /// numerical machinery.
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            Self::InvalidDate { .. } | Self::UnsupportedRange { .. }
        )
    }
}

/// Errors raised while building or installing a [`Config`](crate::Config).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// A global configuration was already installed.
    #[error("a global calendar configuration is already installed")]
    AlreadyInstalled,

    /// UTC offset outside ±14 h.
    #[error("UTC offset of {minutes} minutes is outside ±14 h")]
    InvalidOffset { minutes: i32 },

    /// Supported years are empty or exceed what the models cover.
    #[error("supported years {first}..={last} must be ordered and within {min}..={max}")]
    InvalidRange {
        first: i32,
        last: i32,
        min: i32,
        max: i32,
    },

    /// Iteration budget or tolerance is not usable.
    #[error("search budget is invalid: {reason}")]
    InvalidBudget { reason: &'static str },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_input() {
        let e = CalendarError::invalid_date(2023, 4, 31, "day out of range for month");
        assert_eq!(
            e.to_string(),
            "invalid date 2023-04-31: day out of range for month"
        );

        let e = CalendarError::convergence_failure("solar longitude crossing", 32);
        assert!(e.to_string().contains("32 iterations"));
    }

    #[test]
    fn input_errors_are_classified() {
        assert!(CalendarError::invalid_date(1, 2, 30, "x").is_input_error());
        assert!(CalendarError::unsupported_range(0.0, 1800, 2200).is_input_error());
        assert!(!CalendarError::convergence_failure("x", 1).is_input_error());
        assert!(!CalendarError::inconsistent_year(2017, "x").is_input_error());
    }

    #[test]
    fn config_errors_convert() {
        let e: CalendarError = ConfigError::InvalidOffset { minutes: 900 }.into();
        assert_eq!(e.to_string(), "UTC offset of 900 minutes is outside ±14 h");
        assert!(!e.is_input_error());
    }
}
