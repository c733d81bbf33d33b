// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! The calendar façade.
//!
//! A [`Calendar`] binds a validated [`Config`] to an [`Ephemeris`] and
//! answers every date query.  It is a small `Copy` value without interior
//! state, so it can be shared freely between threads.
//!
//! ```
//! use lunisolar::{Calendar, Config, GregorianDate};
//!
//! let calendar = Calendar::new(Config::default()).unwrap();
//! let date = GregorianDate::new(2024, 2, 10).unwrap();
//!
//! let lunar = calendar.to_lunisolar(date).unwrap();
//! assert_eq!((lunar.year(), lunar.month(), lunar.day()), (2024, 1, 1));
//!
//! let (label, animal) = calendar.year_label(lunar.year());
//! assert_eq!(format!("{label} {}", animal.english()), "甲辰 Dragon");
//! ```

use chrono::FixedOffset;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::date::GregorianDate;
use crate::ephemeris::Ephemeris;
use crate::error::{CalendarError, CalendarResult, ConfigError};
use crate::lunisolar::{self, LunisolarDate, LunisolarYear};
use crate::sexagenary::{self, SexagenaryLabel, ZodiacAnimal};
use crate::solar_term::{self, NearestTerms, SolarTerm, SolarTermTable};
use crate::Config;

/// Everything a calendar page shows for one day.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DayInfo {
    pub date: GregorianDate,
    pub lunisolar: LunisolarDate,
    /// Label of the lunisolar year.
    pub year_label: SexagenaryLabel,
    pub zodiac: ZodiacAnimal,
    /// Label of the day itself.
    pub day_label: SexagenaryLabel,
    pub nearest_terms: NearestTerms,
    /// The term falling on this day, if any.
    pub solar_term: Option<SolarTerm>,
}

/// Calendar computations under one configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Calendar {
    config: Config,
    offset: FixedOffset,
    ephemeris: Ephemeris,
}

impl Calendar {
    /// Validates `config` and builds a calendar for it.
    pub fn new(config: Config) -> Result<Self, ConfigError> {
        let ephemeris = Ephemeris::new(&config)?;
        Ok(Self {
            config,
            offset: config.utc_offset()?,
            ephemeris,
        })
    }

    /// Calendar for the process-wide [`Config::global`].
    pub fn global() -> CalendarResult<Self> {
        Ok(Self::new(*Config::global())?)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn ephemeris(&self) -> &Ephemeris {
        &self.ephemeris
    }

    /// Offset of the civil day from UTC.
    pub fn utc_offset(&self) -> FixedOffset {
        self.offset
    }

    /// Gregorian date → lunisolar date.
    pub fn to_lunisolar(&self, date: GregorianDate) -> CalendarResult<LunisolarDate> {
        self.ensure_year(date.year())?;
        lunisolar::to_lunisolar(&self.ephemeris, self.offset, date)
    }

    /// Lunisolar date → Gregorian date.
    ///
    /// Fails with [`CalendarError::InvalidDate`] for a leap month the year
    /// does not have or for day 30 of a 29-day month.
    pub fn to_gregorian(&self, date: LunisolarDate) -> CalendarResult<GregorianDate> {
        // The first supported January falls in the year before it.
        if date.year() != self.config.first_year - 1 {
            self.ensure_year(date.year())?;
        }
        let gregorian = lunisolar::to_gregorian(&self.ephemeris, self.offset, date)?;
        self.ensure_year(gregorian.year())?;
        Ok(gregorian)
    }

    /// The months of lunisolar `year`.
    pub fn lunisolar_year(&self, year: i32) -> CalendarResult<LunisolarYear> {
        self.ensure_year(year)?;
        lunisolar::lunisolar_year(&self.ephemeris, self.offset, year)
    }

    /// Stem-branch label and zodiac animal of a lunisolar year.
    pub fn year_label(&self, lunisolar_year: i32) -> (SexagenaryLabel, ZodiacAnimal) {
        sexagenary::year_label(lunisolar_year, self.config.sexagenary_epoch)
    }

    /// Stem-branch label of a civil day.
    pub fn day_label(&self, date: GregorianDate) -> SexagenaryLabel {
        sexagenary::day_label(date)
    }

    /// The 24 solar terms of Gregorian `year`.
    pub fn compute_year_terms(&self, year: i32) -> CalendarResult<SolarTermTable> {
        self.ensure_year(year)?;
        solar_term::compute_year_terms(&self.ephemeris, self.offset, year)
    }

    /// The solar terms on either side of `date`.
    pub fn nearest_terms(&self, date: GregorianDate) -> CalendarResult<NearestTerms> {
        self.ensure_year(date.year())?;
        solar_term::nearest_terms(&self.ephemeris, self.offset, date)
    }

    /// The solar term falling on `date`, if any.
    pub fn term_on(&self, date: GregorianDate) -> CalendarResult<Option<SolarTerm>> {
        self.ensure_year(date.year())?;
        solar_term::term_on(&self.ephemeris, self.offset, date)
    }

    /// All calendar facts about `date` at once.
    pub fn day_info(&self, date: GregorianDate) -> CalendarResult<DayInfo> {
        let lunisolar = self.to_lunisolar(date)?;
        let (year_label, zodiac) = self.year_label(lunisolar.year());
        let nearest_terms = self.nearest_terms(date)?;
        let solar_term = (nearest_terms.days_since == 0).then_some(nearest_terms.previous);
        Ok(DayInfo {
            date,
            lunisolar,
            year_label,
            zodiac,
            day_label: self.day_label(date),
            nearest_terms,
            solar_term,
        })
    }

    fn ensure_year(&self, year: i32) -> CalendarResult<()> {
        let (first_year, last_year) = (self.config.first_year, self.config.last_year);
        if (first_year..=last_year).contains(&year) {
            return Ok(());
        }
        warn!(year, first_year, last_year, "year outside the supported range");
        let jd = GregorianDate::new(year, 1, 1)
            .and_then(|date| date.midnight(self.offset))
            .map(|t| t.value())
            .unwrap_or(f64::NAN);
        Err(CalendarError::unsupported_range(jd, first_year, last_year))
    }
}
