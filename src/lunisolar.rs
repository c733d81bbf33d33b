// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Lunisolar dates.
//!
//! Months are numbered within a *solstice year* (歲): the span from the
//! month holding one winter solstice to the month holding the next.  That
//! month is always month 11.  A solstice year has 12 or 13 months; with 13,
//! the first month that holds no major term is a leap month and repeats the
//! number of the month before it.  A lunisolar year then runs from month 1
//! to the next month 1, so months 11 and 12 at the head of a solstice year
//! belong to the previous lunisolar year.
//!
//! Comparisons are made on civil days at the configured offset: a month
//! begins on the day of its new moon, and a new moon on the solstice day
//! opens month 11.

use std::fmt;

use chrono::FixedOffset;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::date::GregorianDate;
use crate::ephemeris::Ephemeris;
use crate::error::{CalendarError, CalendarResult};
use crate::solar_term::compute_year_terms;
use crate::Period;

/// Solstice years tried by [`to_lunisolar`] before giving up; a date always
/// lies in the solstice year of its Gregorian year or the next one.
const SOLSTICE_YEAR_PROBES: u32 = 3;

/// A date of the Chinese lunisolar calendar.
///
/// ```
/// use lunisolar::LunisolarDate;
///
/// let date = LunisolarDate::new(2017, 6, 29, true).unwrap();
/// assert_eq!(date.to_string(), "2017-闰06-29");
/// assert!(LunisolarDate::new(2017, 13, 1, false).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LunisolarDate {
    year: i32,
    month: u32,
    is_leap_month: bool,
    day: u32,
}

impl LunisolarDate {
    /// Builds a date with `month` in `1..=12` and `day` in `1..=30`.
    ///
    /// Whether the month exists in that year, or has 30 days, depends on the
    /// astronomy and is only checked by
    /// [`Calendar::to_gregorian`](crate::Calendar::to_gregorian).
    pub fn new(year: i32, month: u32, day: u32, is_leap_month: bool) -> CalendarResult<Self> {
        if !(1..=12).contains(&month) {
            return Err(CalendarError::invalid_date(
                year,
                month,
                day,
                "lunar month out of range 1..=12",
            ));
        }
        if !(1..=30).contains(&day) {
            return Err(CalendarError::invalid_date(
                year,
                month,
                day,
                "lunar day out of range 1..=30",
            ));
        }
        Ok(Self {
            year,
            month,
            is_leap_month,
            day,
        })
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    pub fn is_leap_month(&self) -> bool {
        self.is_leap_month
    }
}

impl fmt::Display for LunisolarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let leap = if self.is_leap_month { "闰" } else { "" };
        write!(f, "{}-{}{:02}-{:02}", self.year, leap, self.month, self.day)
    }
}

/// One lunar month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LunarMonth {
    /// Lunisolar year the month belongs to.
    pub year: i32,
    /// Month number, `1..=12`.
    pub number: u32,
    pub is_leap: bool,
    /// Civil day of the new moon that opens the month.
    pub first_day: GregorianDate,
    /// 29 or 30.
    pub length: u32,
}

impl LunarMonth {
    pub fn last_day(&self) -> CalendarResult<GregorianDate> {
        self.first_day.add_days(i64::from(self.length) - 1)
    }

    pub fn contains(&self, date: GregorianDate) -> bool {
        let offset = date.days_since(self.first_day);
        (0..i64::from(self.length)).contains(&offset)
    }

    /// Lunisolar date of `date`, which must lie in this month.
    fn date_of(&self, date: GregorianDate) -> LunisolarDate {
        LunisolarDate {
            year: self.year,
            month: self.number,
            is_leap_month: self.is_leap,
            day: (date.days_since(self.first_day) + 1) as u32,
        }
    }
}

/// The months of one lunisolar year, month 1 first.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LunisolarYear {
    year: i32,
    months: Vec<LunarMonth>,
}

impl LunisolarYear {
    pub fn year(&self) -> i32 {
        self.year
    }

    /// 12 or 13 months in order.
    pub fn months(&self) -> &[LunarMonth] {
        &self.months
    }

    /// Number of the leap month, if the year has one.
    pub fn leap_month(&self) -> Option<u32> {
        self.months.iter().find(|m| m.is_leap).map(|m| m.number)
    }

    /// The month with the given number and leap flag.
    pub fn month(&self, number: u32, is_leap: bool) -> Option<&LunarMonth> {
        self.months
            .iter()
            .find(|m| m.number == number && m.is_leap == is_leap)
    }

    /// Gregorian date of New Year's Day (正月初一).
    pub fn new_year_day(&self) -> Option<GregorianDate> {
        self.months.first().map(|m| m.first_day)
    }

    /// Total number of days, 353 to 385.
    pub fn length_in_days(&self) -> u32 {
        self.months.iter().map(|m| m.length).sum()
    }
}

/// The months of one solstice year, month 11 first.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct SolsticeYear {
    months: Vec<LunarMonth>,
    end: GregorianDate,
}

impl SolsticeYear {
    /// Numbers the months between the winter solstices of `sui − 1` and
    /// `sui`.
    pub(crate) fn compute(
        ephemeris: &Ephemeris,
        offset: FixedOffset,
        sui: i32,
    ) -> CalendarResult<Self> {
        let previous_terms = compute_year_terms(ephemeris, offset, sui - 1)?;
        let terms = compute_year_terms(ephemeris, offset, sui)?;
        let opening_solstice = previous_terms.last().date;
        let closing_solstice = terms.last().date;

        // Major terms the months must hold in turn, starting with the
        // solstice of month 11.
        let major_terms: Vec<GregorianDate> = std::iter::once(opening_solstice)
            .chain(terms.major_terms().map(|term| term.date))
            .collect();

        let window = Period::new(
            opening_solstice.add_days(-31)?.midnight(offset)?,
            closing_solstice.add_days(1)?.midnight(offset)?,
        );
        let new_moon_days = ephemeris
            .new_moons_within(window)?
            .into_iter()
            .map(|t| {
                GregorianDate::containing(t, offset).ok_or_else(|| {
                    CalendarError::unsupported_range(t.value(), sui - 1, sui)
                })
            })
            .collect::<CalendarResult<Vec<_>>>()?;

        let inconsistent = |reason: String| {
            warn!(sui, %reason, "solstice year failed its checks");
            CalendarError::inconsistent_year(sui, reason)
        };

        let first = new_moon_days
            .partition_point(|day| *day <= opening_solstice)
            .checked_sub(1)
            .ok_or_else(|| inconsistent("no new moon before the opening solstice".into()))?;
        let last = new_moon_days
            .partition_point(|day| *day <= closing_solstice)
            .checked_sub(1)
            .ok_or_else(|| inconsistent("no new moon before the closing solstice".into()))?;

        let count = last.saturating_sub(first);
        let mut needs_leap = match count {
            12 => false,
            13 => true,
            n => return Err(inconsistent(format!("{n} months between winter solstices"))),
        };

        let mut months = Vec::with_capacity(count);
        let mut number = 10;
        let mut term = 0;
        for i in first..last {
            let start = new_moon_days[i];
            let next = new_moon_days[i + 1];
            let length = next.days_since(start) as u32;
            let expected_term = major_terms.get(term).copied().ok_or_else(|| {
                inconsistent("more months than major terms without a leap month".into())
            })?;
            let is_leap = needs_leap && next <= expected_term;
            if is_leap {
                needs_leap = false;
            } else {
                number = number % 12 + 1;
                term += 1;
            }
            months.push(LunarMonth {
                year: if number >= 11 { sui - 1 } else { sui },
                number,
                is_leap,
                first_day: start,
                length,
            });
        }
        if needs_leap {
            return Err(inconsistent(
                "thirteen months but every month holds a major term".into(),
            ));
        }

        let end = new_moon_days[last];
        debug!(
            sui,
            months = months.len(),
            start = %new_moon_days[first],
            end = %end,
            leap = ?months.iter().find(|m| m.is_leap).map(|m| m.number),
            "numbered solstice year"
        );
        Ok(Self { months, end })
    }

    fn start(&self) -> Option<GregorianDate> {
        self.months.first().map(|m| m.first_day)
    }

    fn month_containing(&self, date: GregorianDate) -> Option<&LunarMonth> {
        self.months.iter().rev().find(|m| m.first_day <= date)
    }
}

/// Converts a Gregorian date to the lunisolar calendar.
pub(crate) fn to_lunisolar(
    ephemeris: &Ephemeris,
    offset: FixedOffset,
    date: GregorianDate,
) -> CalendarResult<LunisolarDate> {
    let mut sui = date.year();
    for _ in 0..SOLSTICE_YEAR_PROBES {
        let year = SolsticeYear::compute(ephemeris, offset, sui)?;
        match year.start() {
            Some(start) if date < start => sui -= 1,
            _ if date >= year.end => sui += 1,
            _ => {
                if let Some(month) = year.month_containing(date) {
                    return Ok(month.date_of(date));
                }
                break;
            }
        }
    }
    warn!(%date, "no solstice year contains the date");
    Err(CalendarError::convergence_failure(
        "solstice year search",
        SOLSTICE_YEAR_PROBES,
    ))
}

/// The months of lunisolar `year`.
pub(crate) fn lunisolar_year(
    ephemeris: &Ephemeris,
    offset: FixedOffset,
    year: i32,
) -> CalendarResult<LunisolarYear> {
    let head = SolsticeYear::compute(ephemeris, offset, year)?;
    let tail = SolsticeYear::compute(ephemeris, offset, year + 1)?;
    let months: Vec<LunarMonth> = head
        .months
        .iter()
        .chain(tail.months.iter())
        .filter(|m| m.year == year)
        .copied()
        .collect();
    if !(12..=13).contains(&months.len()) || months.first().map(|m| m.number) != Some(1) {
        warn!(year, months = months.len(), "lunisolar year failed its checks");
        return Err(CalendarError::inconsistent_year(
            year,
            format!("{} months from month 1 to month 1", months.len()),
        ));
    }
    Ok(LunisolarYear { year, months })
}

/// Converts a lunisolar date back to the Gregorian calendar.
pub(crate) fn to_gregorian(
    ephemeris: &Ephemeris,
    offset: FixedOffset,
    date: LunisolarDate,
) -> CalendarResult<GregorianDate> {
    let invalid = |reason| CalendarError::invalid_date(date.year, date.month, date.day, reason);
    // Months 11 and 12 of year Y open solstice year Y + 1.
    let sui = if date.month >= 11 { date.year + 1 } else { date.year };
    let year = SolsticeYear::compute(ephemeris, offset, sui)?;
    let month = year
        .months
        .iter()
        .find(|m| {
            m.year == date.year && m.number == date.month && m.is_leap == date.is_leap_month
        })
        .ok_or_else(|| invalid("the year has no such leap month"))?;
    if date.day > month.length {
        return Err(invalid("day beyond the end of a 29-day month"));
    }
    month.first_day.add_days(i64::from(date.day) - 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Config;

    fn setup() -> (Ephemeris, FixedOffset) {
        let config = Config::default();
        (
            Ephemeris::new(&config).unwrap(),
            config.utc_offset().unwrap(),
        )
    }

    fn date(y: i32, m: u32, d: u32) -> GregorianDate {
        GregorianDate::new(y, m, d).unwrap()
    }

    fn convert(y: i32, m: u32, d: u32) -> (i32, u32, u32, bool) {
        let (e, offset) = setup();
        let l = to_lunisolar(&e, offset, date(y, m, d)).unwrap();
        (l.year(), l.month(), l.day(), l.is_leap_month())
    }

    #[test]
    fn validates_ranges() {
        assert!(LunisolarDate::new(2024, 0, 1, false).is_err());
        assert!(LunisolarDate::new(2024, 1, 31, false).is_err());
        assert!(LunisolarDate::new(2024, 1, 0, false).is_err());
        assert!(LunisolarDate::new(2024, 12, 30, true).is_ok());
    }

    #[test]
    fn display() {
        let d = LunisolarDate::new(1999, 11, 25, false).unwrap();
        assert_eq!(d.to_string(), "1999-11-25");
    }

    #[test]
    fn solstice_year_2017_has_leap_six() {
        let (e, offset) = setup();
        let sui = SolsticeYear::compute(&e, offset, 2017).unwrap();
        let expected = [
            (11, false, (2016, 11, 29)),
            (12, false, (2016, 12, 29)),
            (1, false, (2017, 1, 28)),
            (2, false, (2017, 2, 26)),
            (3, false, (2017, 3, 28)),
            (4, false, (2017, 4, 26)),
            (5, false, (2017, 5, 26)),
            (6, false, (2017, 6, 24)),
            (6, true, (2017, 7, 23)),
            (7, false, (2017, 8, 22)),
            (8, false, (2017, 9, 20)),
            (9, false, (2017, 10, 20)),
            (10, false, (2017, 11, 18)),
        ];
        assert_eq!(sui.months.len(), expected.len());
        for (month, &(number, is_leap, (y, m, d))) in sui.months.iter().zip(&expected) {
            assert_eq!((month.number, month.is_leap), (number, is_leap));
            assert_eq!(month.first_day, date(y, m, d), "month {number}");
        }
        assert_eq!(sui.end, date(2017, 12, 18));
        assert_eq!(sui.months[0].year, 2016);
        assert_eq!(sui.months[2].year, 2017);
    }

    #[test]
    fn solstice_year_2000_has_no_leap() {
        let (e, offset) = setup();
        let sui = SolsticeYear::compute(&e, offset, 2000).unwrap();
        let starts: Vec<_> = sui.months.iter().map(|m| m.first_day.ymd()).collect();
        assert_eq!(
            starts,
            vec![
                (1999, 12, 8),
                (2000, 1, 7),
                (2000, 2, 5),
                (2000, 3, 6),
                (2000, 4, 5),
                (2000, 5, 4),
                (2000, 6, 2),
                (2000, 7, 2),
                (2000, 7, 31),
                (2000, 8, 29),
                (2000, 9, 28),
                (2000, 10, 27),
            ]
        );
        assert!(sui.months.iter().all(|m| !m.is_leap));
        assert_eq!(sui.end, date(2000, 11, 26));
    }

    #[test]
    fn known_conversions() {
        assert_eq!(convert(2000, 1, 1), (1999, 11, 25, false));
        assert_eq!(convert(2017, 7, 22), (2017, 6, 29, false));
        assert_eq!(convert(2017, 7, 23), (2017, 6, 1, true));
        assert_eq!(convert(2017, 1, 27), (2016, 12, 30, false));
        assert_eq!(convert(2017, 1, 28), (2017, 1, 1, false));
        assert_eq!(convert(2024, 2, 9), (2023, 12, 30, false));
        assert_eq!(convert(2024, 2, 10), (2024, 1, 1, false));
        assert_eq!(convert(2023, 3, 21), (2023, 2, 30, false));
        assert_eq!(convert(2023, 3, 22), (2023, 2, 1, true));
    }

    #[test]
    fn late_december_belongs_to_the_next_solstice_year() {
        // 2017-12-18 opens month 11 of solstice year 2018.
        assert_eq!(convert(2017, 12, 18), (2017, 11, 1, false));
        assert_eq!(convert(2017, 12, 31), (2017, 11, 14, false));
    }

    #[test]
    fn year_2017_months() {
        let (e, offset) = setup();
        let year = lunisolar_year(&e, offset, 2017).unwrap();
        assert_eq!(year.months().len(), 13);
        assert_eq!(year.leap_month(), Some(6));
        assert_eq!(year.new_year_day(), Some(date(2017, 1, 28)));
        let last = year.months().last().unwrap();
        assert_eq!((last.number, last.is_leap), (12, false));
        assert!((383..=385).contains(&year.length_in_days()));
    }

    #[test]
    fn inverse_conversion() {
        let (e, offset) = setup();
        let leap = LunisolarDate::new(2017, 6, 1, true).unwrap();
        assert_eq!(to_gregorian(&e, offset, leap).unwrap(), date(2017, 7, 23));

        let missing_leap = LunisolarDate::new(2024, 6, 1, true).unwrap();
        assert!(matches!(
            to_gregorian(&e, offset, missing_leap),
            Err(CalendarError::InvalidDate { .. })
        ));

        // Leap 6 of 2017 runs 2017-07-23 .. 2017-08-21: 30 days.
        let last_day = LunisolarDate::new(2017, 6, 30, true).unwrap();
        assert_eq!(to_gregorian(&e, offset, last_day).unwrap(), date(2017, 8, 21));
    }

    #[test]
    fn inverse_conversion_needs_one_solstice_year() {
        let (e, offset) = setup();
        // Month 11 of 2017 and leap 11 of 2033 both open the following solstice year.
        let month_11 = LunisolarDate::new(2017, 11, 1, false).unwrap();
        assert_eq!(to_gregorian(&e, offset, month_11).unwrap(), date(2017, 12, 18));
        let leap_11 = LunisolarDate::new(2033, 11, 1, true).unwrap();
        let start = to_gregorian(&e, offset, leap_11).unwrap();
        assert_eq!(
            to_lunisolar(&e, offset, start).unwrap(),
            leap_11
        );
    }

    #[test]
    fn day_thirty_of_a_short_month_is_rejected() {
        let (e, offset) = setup();
        let year = lunisolar_year(&e, offset, 2024).unwrap();
        let short = year.months().iter().find(|m| m.length == 29).unwrap();
        let date = LunisolarDate::new(2024, short.number, 30, short.is_leap).unwrap();
        assert!(matches!(
            to_gregorian(&e, offset, date),
            Err(CalendarError::InvalidDate { .. })
        ));
    }
}
