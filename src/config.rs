// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Calendar configuration.
//!
//! Every knob that silently shifts results lives here: the civil UTC offset
//! that decides which day an instant falls on, the sexagenary epoch, the
//! years the astronomical model is trusted for, the solar model and the
//! search budget.
//!
//! A [`Config`] is a plain value.  It can be handed to
//! [`Calendar::new`](crate::Calendar::new) directly, or published once for the
//! whole process with [`Config::install`]; the crate-root functions
//! ([`to_lunisolar`](crate::to_lunisolar) and friends) read
//! [`Config::global`].  Once published it is never mutated.
//!
//! ```
//! use lunisolar::{Config, SolarModel};
//!
//! let config = Config::default()
//!     .with_utc_offset_minutes(9 * 60)
//!     .with_solar_model(SolarModel::Vsop87);
//! assert!(config.validate().is_ok());
//! ```

use std::sync::OnceLock;

use chrono::FixedOffset;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::ephemeris::SolarModel;
use crate::error::ConfigError;

/// UTC+08:00, China Standard Time: the reference of the modern Chinese
/// calendar.
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 8 * 60;

/// A year whose sexagenary label is 甲子 (stem 甲, branch 子).
///
/// 4 CE opens a cycle, as do 1924, 1984 and 2044.  Every label is counted
/// from this year, so an off-by-one here shifts every result.
pub const DEFAULT_SEXAGENARY_EPOCH: i32 = 4;

/// First Gregorian year answered by default.
pub const DEFAULT_FIRST_YEAR: i32 = 1800;

/// Last Gregorian year answered by default.
pub const DEFAULT_LAST_YEAR: i32 = 2200;

/// Outer bounds the solar and lunar series are usable within.
pub const MODEL_YEAR_LIMITS: (i32, i32) = (1000, 3000);

const MAX_UTC_OFFSET_MINUTES: i32 = 14 * 60;

static GLOBAL: OnceLock<Config> = OnceLock::new();

/// Calendar configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Config {
    /// Offset of the civil day from UTC, in minutes east.
    pub utc_offset_minutes: i32,
    /// A 甲子 year, see [`DEFAULT_SEXAGENARY_EPOCH`].
    pub sexagenary_epoch: i32,
    /// First Gregorian year accepted by date queries.
    pub first_year: i32,
    /// Last Gregorian year accepted by date queries.
    pub last_year: i32,
    /// Model of the Sun's apparent longitude.
    pub solar_model: SolarModel,
    /// Iteration cap shared by every refinement loop.
    pub max_iterations: u32,
    /// Convergence threshold of instant searches, in seconds.
    pub tolerance_seconds: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}

impl Config {
    /// The default configuration: UTC+8, epoch 4 CE, years 1800–2200,
    /// VSOP87, 32 iterations, 0.1 s.
    pub const fn new() -> Self {
        Self {
            utc_offset_minutes: DEFAULT_UTC_OFFSET_MINUTES,
            sexagenary_epoch: DEFAULT_SEXAGENARY_EPOCH,
            first_year: DEFAULT_FIRST_YEAR,
            last_year: DEFAULT_LAST_YEAR,
            solar_model: SolarModel::Vsop87,
            max_iterations: 32,
            tolerance_seconds: 0.1,
        }
    }

    pub fn with_utc_offset_minutes(mut self, minutes: i32) -> Self {
        self.utc_offset_minutes = minutes;
        self
    }

    pub fn with_sexagenary_epoch(mut self, epoch: i32) -> Self {
        self.sexagenary_epoch = epoch;
        self
    }

    pub fn with_supported_years(mut self, first_year: i32, last_year: i32) -> Self {
        self.first_year = first_year;
        self.last_year = last_year;
        self
    }

    pub fn with_solar_model(mut self, model: SolarModel) -> Self {
        self.solar_model = model;
        self
    }

    pub fn with_search_budget(mut self, max_iterations: u32, tolerance_seconds: f64) -> Self {
        self.max_iterations = max_iterations;
        self.tolerance_seconds = tolerance_seconds;
        self
    }

    /// Checks every field, returning the first problem found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.utc_offset()?;
        let (min, max) = MODEL_YEAR_LIMITS;
        if self.first_year > self.last_year || self.first_year < min || self.last_year > max {
            return Err(ConfigError::InvalidRange {
                first: self.first_year,
                last: self.last_year,
                min,
                max,
            });
        }
        if self.max_iterations == 0 {
            return Err(ConfigError::InvalidBudget {
                reason: "max_iterations must be at least 1",
            });
        }
        if !(self.tolerance_seconds.is_finite() && self.tolerance_seconds > 0.0) {
            return Err(ConfigError::InvalidBudget {
                reason: "tolerance_seconds must be positive and finite",
            });
        }
        if self.tolerance_seconds > 60.0 {
            return Err(ConfigError::InvalidBudget {
                reason: "tolerance_seconds above one minute cannot place a day boundary",
            });
        }
        Ok(())
    }

    /// The civil offset as a chrono [`FixedOffset`].
    pub fn utc_offset(&self) -> Result<FixedOffset, ConfigError> {
        let minutes = self.utc_offset_minutes;
        if minutes.abs() > MAX_UTC_OFFSET_MINUTES {
            return Err(ConfigError::InvalidOffset { minutes });
        }
        FixedOffset::east_opt(minutes * 60).ok_or(ConfigError::InvalidOffset { minutes })
    }

    /// Publishes this configuration for the whole process.
    ///
    /// Succeeds once; any later call, or a call after [`Config::global`] has
    /// already fallen back to the default, returns
    /// [`ConfigError::AlreadyInstalled`].
    pub fn install(self) -> Result<&'static Config, ConfigError> {
        self.validate()?;
        let mut installed = false;
        let config = GLOBAL.get_or_init(|| {
            installed = true;
            self
        });
        if installed {
            info!(
                utc_offset_minutes = config.utc_offset_minutes,
                first_year = config.first_year,
                last_year = config.last_year,
                "installed global calendar configuration"
            );
            Ok(config)
        } else {
            Err(ConfigError::AlreadyInstalled)
        }
    }

    /// The process-wide configuration, the default one if none was installed.
    pub fn global() -> &'static Config {
        GLOBAL.get_or_init(Config::new)
    }
}
