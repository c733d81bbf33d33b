// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Proleptic Gregorian calendar date.
//!
//! [`GregorianDate`] is the input of every query.  It is validated on
//! construction, so an out-of-calendar date never reaches the ephemeris.
//! Civil days are tied to instants through a fixed UTC offset: an instant
//! belongs to the day its offset-local clock reads, and a day starts at its
//! offset-local midnight.

use std::fmt;

use chrono::{Datelike, FixedOffset, NaiveDate, NaiveTime, Utc};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{CalendarError, CalendarResult};
use crate::{JulianDate, Time, TimeScale};

/// Julian Day Number of 0001-01-01 minus one: `jdn = days_from_ce + this`.
const JDN_CE_OFFSET: i64 = 1_721_425;

/// A valid date of the proleptic Gregorian calendar.
///
/// ```
/// use lunisolar::GregorianDate;
///
/// let date = GregorianDate::new(2000, 1, 1).unwrap();
/// assert_eq!(2_451_545, date.jdn());
/// assert_eq!("2000-01-01", date.to_string());
/// assert!(GregorianDate::new(2023, 2, 29).is_err());
/// ```
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct GregorianDate(NaiveDate);

impl GregorianDate {
    /// Builds a date, rejecting month 13, April 31, February 29 of a common
    /// year and so on with [`CalendarError::InvalidDate`].
    pub fn new(year: i32, month: u32, day: u32) -> CalendarResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::invalid_date(
                year,
                month,
                day,
                "month out of range 1..=12",
            ));
        }
        NaiveDate::from_ymd_opt(year, month, day).map(Self).ok_or_else(|| {
            let reason = if NaiveDate::from_ymd_opt(year, 1, 1).is_some() {
                "day out of range for month"
            } else {
                "year outside the representable range"
            };
            CalendarError::invalid_date(year, month, day, reason)
        })
    }

    /// Date with the given Julian Day Number.
    pub fn from_jdn(jdn: i64) -> CalendarResult<Self> {
        i32::try_from(jdn - JDN_CE_OFFSET)
            .ok()
            .and_then(NaiveDate::from_num_days_from_ce_opt)
            .map(Self)
            .ok_or(CalendarError::invalid_date(
                0,
                0,
                0,
                "julian day number outside the representable range",
            ))
    }

    pub fn year(&self) -> i32 {
        self.0.year()
    }

    pub fn month(&self) -> u32 {
        self.0.month()
    }

    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// `(year, month, day)`.
    pub fn ymd(&self) -> (i32, u32, u32) {
        (self.year(), self.month(), self.day())
    }

    /// Julian Day Number, the count of the civil day the date names.
    pub fn jdn(&self) -> i64 {
        i64::from(self.0.num_days_from_ce()) + JDN_CE_OFFSET
    }

    /// The underlying chrono date.
    pub fn naive(&self) -> NaiveDate {
        self.0
    }

    /// Date `days` later (earlier when negative).
    pub fn add_days(&self, days: i64) -> CalendarResult<Self> {
        Self::from_jdn(self.jdn() + days)
    }

    /// Whole days from `earlier` to `self`, negative when `self` comes first.
    pub fn days_since(&self, earlier: GregorianDate) -> i64 {
        self.jdn() - earlier.jdn()
    }

    /// Whether the year is a Gregorian leap year.
    pub fn is_leap_year(&self) -> bool {
        self.0.leap_year()
    }

    /// The instant at which this civil day begins at `offset`.
    pub fn midnight(&self, offset: FixedOffset) -> CalendarResult<JulianDate> {
        let (year, month, day) = self.ymd();
        self.0
            .and_time(NaiveTime::MIN)
            .and_local_timezone(offset)
            .single()
            .map(|local| JulianDate::from_utc(local.with_timezone(&Utc)))
            .ok_or(CalendarError::invalid_date(
                year,
                month,
                day,
                "midnight not representable at this offset",
            ))
    }

    /// The civil day, at `offset`, on which `instant` falls.
    ///
    /// Returns `None` when the instant cannot be expressed as a UTC
    /// timestamp.
    pub fn containing<S: TimeScale>(instant: Time<S>, offset: FixedOffset) -> Option<Self> {
        instant
            .to_utc()
            .map(|utc| Self(utc.with_timezone(&offset).date_naive()))
    }
}

impl From<NaiveDate> for GregorianDate {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl From<GregorianDate> for NaiveDate {
    fn from(date: GregorianDate) -> Self {
        date.0
    }
}

impl fmt::Display for GregorianDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year(), self.month(), self.day())
    }
}
