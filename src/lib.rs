// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Chinese lunisolar calendar
//!
//! Converts Gregorian dates to the traditional Chinese lunisolar calendar,
//! labels years and days with the sexagenary cycle and the zodiac, and
//! computes the twenty-four solar terms.  Everything is derived from a
//! built-in solar and lunar ephemeris; there are no precomputed tables.
//!
//! ```
//! use lunisolar::{nearest_terms, to_lunisolar, year_label, GregorianDate};
//!
//! let date = GregorianDate::new(2024, 12, 21).unwrap();
//!
//! let lunar = to_lunisolar(date).unwrap();
//! assert_eq!(lunar.to_string(), "2024-11-21");
//!
//! let (label, animal) = year_label(lunar.year());
//! assert_eq!((label.to_string().as_str(), animal.chinese()), ("甲辰", "龙"));
//!
//! let terms = nearest_terms(date).unwrap();
//! assert_eq!(terms.previous.name.chinese(), "冬至");
//! assert_eq!((terms.days_since, terms.days_until), (0, 15));
//! ```
//!
//! # Core types
//!
//! - [`GregorianDate`]: validated proleptic Gregorian date, the input of every query.
//! - [`LunisolarDate`]: year, month, leap flag and day of the lunisolar calendar.
//! - [`LunisolarYear`] / [`LunarMonth`]: the months of a lunisolar year.
//! - [`SexagenaryLabel`] / [`ZodiacAnimal`]: stem-branch labels.
//! - [`SolarTermTable`] / [`SolarTerm`] / [`NearestTerms`]: the solar terms.
//! - [`Calendar`]: all queries under one explicit [`Config`].
//! - [`Time<S>`]: instant parameterised by a [`TimeScale`] marker; [`JulianDate`] is `Time<JD>`.
//!
//! # Time reference
//!
//! Astronomy runs on Terrestrial Time.  Calendar days are civil days at one
//! fixed UTC offset, UTC+08:00 unless configured otherwise: a solar term or
//! a new moon falls on the day its offset-local clock reads.  The difference
//! **ΔT = TT − UT** is applied by the [`UT`] scale, see
//! [`Time::<UT>::delta_t()`](Time::delta_t).
//!
//! # Configuration
//!
//! The crate-root functions read [`Config::global`], which is the default
//! configuration unless [`Config::install`] published another one.  Use
//! [`Calendar::new`] to work with several configurations side by side.
//!
//! # Logging
//!
//! Diagnostics go through [`tracing`]: `trace` for each refinement step,
//! `debug` for computed tables and solstice years, `warn` for every failure
//! returned to the caller.  The crate installs no subscriber.

mod calendar;
pub mod config;
mod date;
mod delta_t;
pub mod ephemeris;
mod error;
pub(crate) mod instant;
mod julian_date_ext;
mod lunisolar;
mod period;
pub(crate) mod scales;
mod search;
pub mod sexagenary;
mod solar_term;

// ── Re-exports ────────────────────────────────────────────────────────────

pub use calendar::{Calendar, DayInfo};
pub use config::Config;
pub use date::GregorianDate;
pub use ephemeris::SolarModel;
pub use error::{CalendarError, CalendarResult, ConfigError};
pub use instant::{Time, TimeScale};
pub use lunisolar::{LunarMonth, LunisolarDate, LunisolarYear};
pub use period::Period;
pub use scales::{JD, TT, UT};
pub use sexagenary::{EarthlyBranch, HeavenlyStem, SexagenaryLabel, ZodiacAnimal};
pub use solar_term::{NearestTerms, SolarTerm, SolarTermName, SolarTermTable};

/// Julian Date on the Terrestrial Time axis.
///
/// This is a type alias for [`Time<JD>`].
pub type JulianDate = Time<JD>;

/// Universal Time, the Earth-rotation scale civil days are reckoned on.
///
/// This is a type alias for [`Time<UT>`].
pub type UniversalTime = Time<UT>;

// ── Crate-root queries under the global configuration ────────────────────

/// Converts a Gregorian date to the lunisolar calendar.
pub fn to_lunisolar(date: GregorianDate) -> CalendarResult<LunisolarDate> {
    Calendar::global()?.to_lunisolar(date)
}

/// Stem-branch label and zodiac animal of a lunisolar year.
pub fn year_label(lunisolar_year: i32) -> (SexagenaryLabel, ZodiacAnimal) {
    sexagenary::year_label(lunisolar_year, Config::global().sexagenary_epoch)
}

/// The 24 solar terms of a Gregorian year, Minor Cold first.
pub fn compute_year_terms(year: i32) -> CalendarResult<SolarTermTable> {
    Calendar::global()?.compute_year_terms(year)
}

/// The solar terms on either side of a date and the day distances to them.
pub fn nearest_terms(date: GregorianDate) -> CalendarResult<NearestTerms> {
    Calendar::global()?.nearest_terms(date)
}
