// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Astronomical positions: the Sun's apparent longitude and new moons.
//!
//! [`Ephemeris`] is the only gate to the series in [`earth`], [`sun`] and
//! [`moon`].  It refuses any instant outside the window its configuration
//! validates (the supported Gregorian years padded by one year on each side)
//! with [`CalendarError::UnsupportedRange`], and bounds every refinement loop
//! by the configured budget.
//!
//! ```
//! use lunisolar::{Config, JulianDate};
//! use lunisolar::ephemeris::Ephemeris;
//!
//! let ephemeris = Ephemeris::new(&Config::default()).unwrap();
//! let lon = ephemeris.sun_apparent_longitude(JulianDate::J2000).unwrap();
//! assert!((lon.value() - 280.37).abs() < 0.02);
//! ```

pub mod earth;
pub mod moon;
pub mod sun;

use chrono::{NaiveDate, NaiveTime};
use qtty::{Days, Degrees};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{CalendarError, CalendarResult, ConfigError};
use crate::search::{find_angle_crossing, SearchBudget};
use crate::{Config, JulianDate, Period, JD};

/// Model of the Sun's apparent longitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SolarModel {
    /// Truncated VSOP87 with FK5, nutation and aberration (≈ 1″).
    #[default]
    Vsop87,
    /// Mean longitude plus equation of centre (≈ 0.01°).
    EquationOfCenter,
}

/// Gate to the solar and lunar series for one configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ephemeris {
    model: SolarModel,
    window: Period<JD>,
    first_year: i32,
    last_year: i32,
    budget: SearchBudget,
}

impl Ephemeris {
    /// Builds the ephemeris a configuration describes.
    pub fn new(config: &Config) -> Result<Self, ConfigError> {
        config.validate()?;
        let invalid_range = || ConfigError::InvalidRange {
            first: config.first_year,
            last: config.last_year,
            min: crate::config::MODEL_YEAR_LIMITS.0,
            max: crate::config::MODEL_YEAR_LIMITS.1,
        };
        let start = new_year_utc(config.first_year - 1).ok_or_else(invalid_range)?;
        let end = new_year_utc(config.last_year + 2).ok_or_else(invalid_range)?;
        Ok(Self {
            model: config.solar_model,
            window: Period::new(start, end),
            first_year: config.first_year,
            last_year: config.last_year,
            budget: SearchBudget::new(config.max_iterations, config.tolerance_seconds),
        })
    }

    pub fn model(&self) -> SolarModel {
        self.model
    }

    /// Instants the series are trusted for.
    pub fn window(&self) -> Period<JD> {
        self.window
    }

    /// Checks that `t` lies inside [`Ephemeris::window`].
    pub fn ensure_supported(&self, t: JulianDate) -> CalendarResult<()> {
        if self.window.contains(t) {
            Ok(())
        } else {
            Err(self.out_of_range(t))
        }
    }

    fn out_of_range(&self, t: JulianDate) -> CalendarError {
        warn!(
            jd = t.value(),
            first_year = self.first_year,
            last_year = self.last_year,
            "instant outside the validated ephemeris window"
        );
        CalendarError::unsupported_range(t.value(), self.first_year, self.last_year)
    }

    /// Apparent geocentric ecliptic longitude of the Sun, in `[0°, 360°)`.
    pub fn sun_apparent_longitude(&self, t: JulianDate) -> CalendarResult<Degrees> {
        self.sun_longitude_degrees(t).map(Degrees::new)
    }

    fn sun_longitude_degrees(&self, t: JulianDate) -> CalendarResult<f64> {
        self.ensure_supported(t)?;
        Ok(sun::apparent_longitude(self.model, t))
    }

    /// Instant near `estimate` at which the Sun's apparent longitude reaches
    /// `target`.
    ///
    /// `estimate` should be within a few days of the crossing; the longitude
    /// advances about a degree a day, so a guess off by a week still lands
    /// on the intended crossing.
    pub fn sun_longitude_crossing(
        &self,
        target: Degrees,
        estimate: JulianDate,
    ) -> CalendarResult<JulianDate> {
        let crossing = find_angle_crossing(
            "solar longitude crossing",
            |t| self.sun_longitude_degrees(t),
            target.value(),
            sun::MEAN_MOTION_DEG_PER_DAY,
            estimate,
            self.budget,
        )?;
        self.ensure_supported(crossing)?;
        Ok(crossing)
    }

    /// True new moon of lunation `k` (k = 0 is the new moon of 2000-01-06).
    pub fn new_moon(&self, k: i64) -> CalendarResult<JulianDate> {
        let t = moon::true_new_moon(k);
        self.ensure_supported(t)?;
        Ok(t)
    }

    /// Lunation in progress at `t`: `new_moon(k) <= t < new_moon(k + 1)`.
    pub fn lunation_at(&self, t: JulianDate) -> CalendarResult<i64> {
        self.ensure_supported(t)?;
        let mut k = moon::mean_lunation_at(t);
        for _ in 0..self.budget.max_iterations {
            if moon::true_new_moon(k) > t {
                k -= 1;
            } else if moon::true_new_moon(k + 1) <= t {
                k += 1;
            } else {
                return Ok(k);
            }
        }
        warn!(
            jd = t.value(),
            iterations = self.budget.max_iterations,
            "lunation search exhausted its budget"
        );
        Err(CalendarError::convergence_failure(
            "lunation search",
            self.budget.max_iterations,
        ))
    }

    /// The new moon closest to `t`, before or after it.
    ///
    /// Fails with [`CalendarError::UnsupportedRange`] when the closer one lies
    /// outside the window.
    pub fn new_moon_nearest(&self, t: JulianDate) -> CalendarResult<JulianDate> {
        let k = self.lunation_at(t)?;
        let before = self.new_moon(k)?;
        let after = moon::true_new_moon(k + 1);
        if after - t >= t - before {
            Ok(before)
        } else if self.window.contains(after) {
            Ok(after)
        } else {
            Err(self.out_of_range(after))
        }
    }

    /// Every new moon in `window`, in time order.
    pub fn new_moons_within(&self, window: Period<JD>) -> CalendarResult<Vec<JulianDate>> {
        if window.is_empty() {
            return Ok(Vec::new());
        }
        self.ensure_supported(window.start)?;
        if window.end > self.window.end {
            return Err(self.out_of_range(window.end));
        }

        let mut k = self.lunation_at(window.start)?;
        let mut moons = Vec::new();
        loop {
            let t = moon::true_new_moon(k);
            if t >= window.end {
                break;
            }
            if window.contains(t) {
                moons.push(t);
            }
            k += 1;
        }
        debug!(window = %window, count = moons.len(), "collected new moons");
        Ok(moons)
    }

    /// Days elapsed since the new moon preceding `t`.
    pub fn lunar_age(&self, t: JulianDate) -> CalendarResult<Days> {
        let k = self.lunation_at(t)?;
        Ok(t - moon::true_new_moon(k))
    }
}

/// 0h UTC of January 1 of `year`.
fn new_year_utc(year: i32) -> Option<JulianDate> {
    NaiveDate::from_ymd_opt(year, 1, 1)
        .map(|date| JulianDate::from_utc(date.and_time(NaiveTime::MIN).and_utc()))
}
