// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! The twenty-four solar terms (节气).
//!
//! A solar term is the instant the Sun's apparent longitude reaches a
//! multiple of 15°.  The terms at multiples of 30° are the major terms
//! (中气) that number the lunar months.  A Gregorian year holds exactly one
//! occurrence of each, from Minor Cold (小寒, 285°, early January) to the
//! Winter Solstice (冬至, 270°, late December).
//!
//! ```
//! use lunisolar::{compute_year_terms, GregorianDate, SolarTermName};
//!
//! let table = compute_year_terms(2024).unwrap();
//! let equinox = table.get(SolarTermName::SpringEquinox);
//! assert_eq!(equinox.date, GregorianDate::new(2024, 3, 20).unwrap());
//! ```

use std::fmt;

use chrono::FixedOffset;
use qtty::{Days, Degrees};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::date::GregorianDate;
use crate::ephemeris::Ephemeris;
use crate::error::{CalendarError, CalendarResult};
use crate::{JulianDate, Period, JD};

/// Mean tropical year in days.
const TROPICAL_YEAR: f64 = 365.242_2;

/// Longitude of the first term of a Gregorian year.
const FIRST_TERM_LONGITUDE: u32 = 285;

/// Name of a solar term, in Gregorian-year order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum SolarTermName {
    MinorCold,
    MajorCold,
    StartOfSpring,
    RainWater,
    AwakeningOfInsects,
    SpringEquinox,
    PureBrightness,
    GrainRain,
    StartOfSummer,
    GrainBuds,
    GrainInEar,
    SummerSolstice,
    MinorHeat,
    MajorHeat,
    StartOfAutumn,
    EndOfHeat,
    WhiteDew,
    AutumnEquinox,
    ColdDew,
    FrostsDescent,
    StartOfWinter,
    MinorSnow,
    MajorSnow,
    WinterSolstice,
}

impl SolarTermName {
    /// All terms, Minor Cold first.
    pub const ALL: [SolarTermName; 24] = [
        Self::MinorCold,
        Self::MajorCold,
        Self::StartOfSpring,
        Self::RainWater,
        Self::AwakeningOfInsects,
        Self::SpringEquinox,
        Self::PureBrightness,
        Self::GrainRain,
        Self::StartOfSummer,
        Self::GrainBuds,
        Self::GrainInEar,
        Self::SummerSolstice,
        Self::MinorHeat,
        Self::MajorHeat,
        Self::StartOfAutumn,
        Self::EndOfHeat,
        Self::WhiteDew,
        Self::AutumnEquinox,
        Self::ColdDew,
        Self::FrostsDescent,
        Self::StartOfWinter,
        Self::MinorSnow,
        Self::MajorSnow,
        Self::WinterSolstice,
    ];

    const CHINESE: [&'static str; 24] = [
        "小寒", "大寒", "立春", "雨水", "惊蛰", "春分", "清明", "谷雨", "立夏", "小满", "芒种", "夏至",
        "小暑", "大暑", "立秋", "处暑", "白露", "秋分", "寒露", "霜降", "立冬", "小雪", "大雪", "冬至",
    ];

    const ENGLISH: [&'static str; 24] = [
        "Minor Cold",
        "Major Cold",
        "Start of Spring",
        "Rain Water",
        "Awakening of Insects",
        "Spring Equinox",
        "Pure Brightness",
        "Grain Rain",
        "Start of Summer",
        "Grain Buds",
        "Grain in Ear",
        "Summer Solstice",
        "Minor Heat",
        "Major Heat",
        "Start of Autumn",
        "End of Heat",
        "White Dew",
        "Autumn Equinox",
        "Cold Dew",
        "Frost's Descent",
        "Start of Winter",
        "Minor Snow",
        "Major Snow",
        "Winter Solstice",
    ];

    /// Position in Gregorian-year order, 0 for Minor Cold.
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Ecliptic longitude the Sun reaches at this term, whole degrees.
    pub fn longitude_degrees(self) -> u32 {
        (FIRST_TERM_LONGITUDE + 15 * self.index() as u32) % 360
    }

    /// Ecliptic longitude the Sun reaches at this term.
    pub fn longitude(self) -> Degrees {
        Degrees::new(f64::from(self.longitude_degrees()))
    }

    /// Term at a longitude, `None` unless it is a multiple of 15°.
    pub fn from_longitude(degrees: u32) -> Option<Self> {
        let degrees = degrees % 360;
        if degrees % 15 != 0 {
            return None;
        }
        let steps = (degrees + 360 - FIRST_TERM_LONGITUDE) % 360 / 15;
        Self::from_index(steps as usize)
    }

    /// Whether this is a major term (中气), at a multiple of 30°.
    pub fn is_major(self) -> bool {
        self.longitude_degrees() % 30 == 0
    }

    pub fn chinese(self) -> &'static str {
        Self::CHINESE[self.index()]
    }

    pub fn english(self) -> &'static str {
        Self::ENGLISH[self.index()]
    }

    /// The following term, wrapping from Winter Solstice to Minor Cold.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % 24]
    }

    /// The preceding term, wrapping from Minor Cold to Winter Solstice.
    pub fn previous(self) -> Self {
        Self::ALL[(self.index() + 23) % 24]
    }
}

impl fmt::Display for SolarTermName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.chinese())
    }
}

/// One occurrence of a solar term.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolarTerm {
    pub name: SolarTermName,
    /// Instant of the crossing (TT).
    pub instant: JulianDate,
    /// Civil day of the crossing at the configured offset.
    pub date: GregorianDate,
}

impl fmt::Display for SolarTerm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.date)
    }
}

/// The 24 solar terms of one Gregorian year, in time order.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SolarTermTable {
    year: i32,
    terms: Vec<SolarTerm>,
}

impl SolarTermTable {
    pub fn year(&self) -> i32 {
        self.year
    }

    /// Terms from Minor Cold to Winter Solstice.
    pub fn terms(&self) -> &[SolarTerm] {
        &self.terms
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SolarTerm> {
        self.terms.iter()
    }

    pub fn get(&self, name: SolarTermName) -> &SolarTerm {
        &self.terms[name.index()]
    }

    /// The twelve major terms, Major Cold first.
    pub fn major_terms(&self) -> impl Iterator<Item = &SolarTerm> + '_ {
        self.terms.iter().filter(|term| term.name.is_major())
    }

    /// Minor Cold of this year.
    pub fn first(&self) -> &SolarTerm {
        self.get(SolarTermName::MinorCold)
    }

    /// Winter Solstice of this year.
    pub fn last(&self) -> &SolarTerm {
        self.get(SolarTermName::WinterSolstice)
    }

    /// From Minor Cold to the Winter Solstice.
    pub fn span(&self) -> Period<JD> {
        Period::new(self.first().instant, self.last().instant)
    }

    /// The term falling on `date`, if any.
    pub fn on(&self, date: GregorianDate) -> Option<&SolarTerm> {
        self.terms.iter().find(|term| term.date == date)
    }
}

impl<'a> IntoIterator for &'a SolarTermTable {
    type Item = &'a SolarTerm;
    type IntoIter = std::slice::Iter<'a, SolarTerm>;

    fn into_iter(self) -> Self::IntoIter {
        self.terms.iter()
    }
}

/// The solar terms around a date.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct NearestTerms {
    /// Last term whose civil day is on or before the date.
    pub previous: SolarTerm,
    /// Whole days from `previous` to the date, `0` on a term day.
    pub days_since: i64,
    /// First term whose civil day is after the date.
    pub next: SolarTerm,
    /// Whole days from the date to `next`, at least `1`.
    pub days_until: i64,
}

/// Computes the solar terms of Gregorian `year`.
///
/// Each crossing is seeded from the mean motion of the Sun counted from
/// January 6 and refined against the ephemeris.
pub(crate) fn compute_year_terms(
    ephemeris: &Ephemeris,
    offset: FixedOffset,
    year: i32,
) -> CalendarResult<SolarTermTable> {
    let anchor = GregorianDate::new(year, 1, 6)?.midnight(offset)? + Days::new(0.5);
    let mut terms = Vec::with_capacity(24);
    for name in SolarTermName::ALL {
        let estimate = anchor + Days::new(name.index() as f64 * TROPICAL_YEAR / 24.0);
        let instant = ephemeris.sun_longitude_crossing(name.longitude(), estimate)?;
        let date = GregorianDate::containing(instant, offset)
            .ok_or_else(|| CalendarError::unsupported_range(instant.value(), year, year))?;
        terms.push(SolarTerm {
            name,
            instant,
            date,
        });
    }

    let ordered = terms.windows(2).all(|pair| pair[0].instant < pair[1].instant);
    let in_year = terms.iter().all(|term| term.date.year() == year);
    if !(ordered && in_year) {
        warn!(year, ordered, in_year, "solar-term table failed its checks");
        return Err(CalendarError::inconsistent_year(
            year,
            "solar terms are not 24 ordered crossings within the year",
        ));
    }
    debug!(
        year,
        minor_cold = %terms[0].date,
        winter_solstice = %terms[23].date,
        "computed solar-term table"
    );
    Ok(SolarTermTable { year, terms })
}

/// Finds the terms around `date`, reaching into the neighbouring years'
/// tables at either end of the year.
pub(crate) fn nearest_terms(
    ephemeris: &Ephemeris,
    offset: FixedOffset,
    date: GregorianDate,
) -> CalendarResult<NearestTerms> {
    let table = compute_year_terms(ephemeris, offset, date.year())?;
    let (previous, next) = if date < table.first().date {
        let before = compute_year_terms(ephemeris, offset, date.year() - 1)?;
        (*before.last(), *table.first())
    } else if date >= table.last().date {
        let after = compute_year_terms(ephemeris, offset, date.year() + 1)?;
        (*table.last(), *after.first())
    } else {
        let split = table.terms.partition_point(|term| term.date <= date);
        (table.terms[split - 1], table.terms[split])
    };
    Ok(NearestTerms {
        previous,
        days_since: date.days_since(previous.date),
        next,
        days_until: next.date.days_since(date),
    })
}

/// The term that falls on `date`, if any.
pub(crate) fn term_on(
    ephemeris: &Ephemeris,
    offset: FixedOffset,
    date: GregorianDate,
) -> CalendarResult<Option<SolarTerm>> {
    let table = compute_year_terms(ephemeris, offset, date.year())?;
    Ok(table.on(date).copied())
}
