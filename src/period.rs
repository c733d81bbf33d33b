// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Time windows.
//!
//! A [`Period<S>`] is the half-open span `[start, end)` on a time scale.  The
//! ephemeris uses it to ask for the new moons inside a window; the solar-term
//! table reports the span it covers.

use super::{Time, TimeScale};
use qtty::Days;
use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A half-open time window `[start, end)` on time scale `S`.
///
/// # Examples
///
/// ```
/// use lunisolar::{JulianDate, Period};
/// use qtty::Days;
///
/// let window = Period::new(JulianDate::new(2_451_545.0), JulianDate::new(2_451_575.0));
/// assert_eq!(window.duration(), Days::new(30.0));
/// assert!(window.contains(JulianDate::new(2_451_550.0)));
/// assert!(!window.contains(JulianDate::new(2_451_575.0)));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(bound = ""))]
pub struct Period<S: TimeScale> {
    pub start: Time<S>,
    pub end: Time<S>,
}

impl<S: TimeScale> Period<S> {
    /// Creates a window between two instants.
    pub fn new(start: Time<S>, end: Time<S>) -> Self {
        Period { start, end }
    }

    /// Window of `length` starting at `start`.
    pub fn starting_at(start: Time<S>, length: Days) -> Self {
        Period::new(start, start + length)
    }

    /// Length of the window, `end − start`.
    pub fn duration(&self) -> Days {
        self.end - self.start
    }

    /// Whether `start <= instant < end`.
    pub fn contains(&self, instant: Time<S>) -> bool {
        self.start <= instant && instant < self.end
    }

    /// `true` when the window has no positive length.
    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }
}

impl<S: TimeScale> fmt::Display for Period<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} to {}", self.start, self.end)
    }
}
