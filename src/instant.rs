// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Instants tagged with their time scale.
//!
//! Solar longitudes, new moons and solar-term crossings are all computed on
//! `Time<JD>`, a Julian Day on the Terrestrial Time axis.  A civil date is
//! only read off an instant through [`Time::to_utc`], which goes through the
//! [`UT`](super::UT) scale and therefore removes ΔT first.  Mixing the two
//! axes is a type error.

use chrono::{DateTime, Utc};
use qtty::*;
use std::marker::PhantomData;
use std::ops::{Add, AddAssign, Sub};

#[cfg(feature = "serde")]
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A time scale: a label plus the mapping of its day count onto JD(TT).
///
/// The mapping is the identity for [`JD`](super::JD) and [`TT`](super::TT);
/// [`UT`](super::UT) adds ΔT.
pub trait TimeScale: Copy + Clone + std::fmt::Debug + PartialEq + PartialOrd + 'static {
    const LABEL: &'static str;

    /// Day count on this scale → JD(TT).
    fn to_jd_tt(value: Days) -> Days;

    /// JD(TT) → day count on this scale.
    fn from_jd_tt(jd_tt: Days) -> Days;
}

/// A point on time scale `S`, stored as a day count.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct Time<S: TimeScale> {
    quantity: Days,
    _scale: PhantomData<S>,
}

/// JD of the Unix epoch (1970-01-01T00:00:00Z) on the UT axis.
const UNIX_EPOCH_JD: Days = Days::new(2_440_587.5);

impl<S: TimeScale> Time<S> {
    #[inline]
    pub const fn new(value: f64) -> Self {
        Self {
            quantity: Days::new(value),
            _scale: PhantomData,
        }
    }

    #[inline]
    pub const fn from_days(days: Days) -> Self {
        Self {
            quantity: days,
            _scale: PhantomData,
        }
    }

    #[inline]
    pub const fn quantity(&self) -> Days {
        self.quantity
    }

    /// Raw day count.
    #[inline]
    pub const fn value(&self) -> f64 {
        self.quantity.value()
    }

    /// The same instant on scale `T`.
    #[inline]
    pub fn to<T: TimeScale>(&self) -> Time<T> {
        Time::<T>::from_days(T::from_jd_tt(S::to_jd_tt(self.quantity)))
    }

    /// Civil timestamp of this instant, UTC taken as UT.
    ///
    /// `None` for non-finite values or instants chrono cannot represent.
    pub fn to_utc(&self) -> Option<DateTime<Utc>> {
        use super::scales::UT;
        let jd_ut = self.to::<UT>().quantity();
        let seconds_since_epoch = (jd_ut - UNIX_EPOCH_JD).to::<Second>().value();
        if !seconds_since_epoch.is_finite() {
            return None;
        }
        let secs = seconds_since_epoch.floor();
        let nanos = ((seconds_since_epoch - secs) * 1e9).min(999_999_999.0) as u32;
        DateTime::<Utc>::from_timestamp(secs as i64, nanos)
    }

    /// Instant of a civil timestamp, read as UT and moved onto scale `S`.
    pub fn from_utc(datetime: DateTime<Utc>) -> Self {
        use super::scales::UT;
        let seconds_since_epoch = Seconds::new(datetime.timestamp() as f64);
        let nanos = Seconds::new(datetime.timestamp_subsec_nanos() as f64 / 1e9);
        let jd_ut = UNIX_EPOCH_JD + (seconds_since_epoch + nanos).to::<Day>();
        Time::<UT>::from_days(jd_ut).to::<S>()
    }
}

impl<S: TimeScale> std::fmt::Display for Time<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", S::LABEL, self.quantity)
    }
}

#[cfg(feature = "serde")]
impl<S: TimeScale> Serialize for Time<S> {
    fn serialize<Ser>(&self, serializer: Ser) -> Result<Ser::Ok, Ser::Error>
    where
        Ser: Serializer,
    {
        serializer.serialize_f64(self.value())
    }
}

#[cfg(feature = "serde")]
impl<'de, S: TimeScale> Deserialize<'de> for Time<S> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let v = f64::deserialize(deserializer)?;
        Ok(Self::new(v))
    }
}

impl<S: TimeScale> Add<Days> for Time<S> {
    type Output = Self;
    #[inline]
    fn add(self, rhs: Days) -> Self::Output {
        Self::from_days(self.quantity + rhs)
    }
}

impl<S: TimeScale> AddAssign<Days> for Time<S> {
    #[inline]
    fn add_assign(&mut self, rhs: Days) {
        self.quantity += rhs;
    }
}

impl<S: TimeScale> Sub<Days> for Time<S> {
    type Output = Self;
    #[inline]
    fn sub(self, rhs: Days) -> Self::Output {
        Self::from_days(self.quantity - rhs)
    }
}

impl<S: TimeScale> Sub for Time<S> {
    type Output = Days;
    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.quantity - rhs.quantity
    }
}

#[cfg(test)]
mod tests {
    use super::super::scales::{JD, UT};
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn utc_round_trip_through_tt() {
        let solstice = Utc.with_ymd_and_hms(2024, 12, 21, 9, 20, 0).unwrap();
        let back = Time::<JD>::from_utc(solstice).to_utc().expect("in range");
        assert!((back - solstice).num_milliseconds().abs() < 1);
    }

    #[test]
    fn tt_runs_ahead_of_utc_by_delta_t() {
        // 2000-01-01T12:00:00Z is JD 2451545.0 on the UT axis.
        let jd = Time::<JD>::from_utc(DateTime::from_timestamp(946_728_000, 0).unwrap());
        let ahead = (jd.quantity() - Days::new(2_451_545.0)).to::<Second>();
        assert!((ahead - Seconds::new(63.83)).abs() < Seconds::new(0.5), "{ahead}");
    }

    #[test]
    fn ut_day_count_maps_to_midnight() {
        let utc = Time::<UT>::new(2_460_350.5).to_utc().expect("in range");
        let expected = Utc.with_ymd_and_hms(2024, 2, 10, 0, 0, 0).unwrap();
        assert!((utc - expected).num_milliseconds().abs() < 1);
    }

    #[test]
    fn non_finite_instant_has_no_utc() {
        assert!(Time::<JD>::new(f64::NAN).to_utc().is_none());
    }

    #[test]
    fn arithmetic_and_ordering() {
        let mut t = Time::<JD>::new(2_451_545.0);
        t += Days::new(29.5);
        assert_eq!(t - Time::<JD>::new(2_451_545.0), Days::new(29.5));
        assert_eq!((t - Days::new(0.5)).value(), 2_451_574.0);
        assert!(Time::<JD>::new(0.0) < t);
        assert!(format!("{t}").starts_with("Julian Day"));
    }
}
