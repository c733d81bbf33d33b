// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Time-scale markers.
//!
//! | Marker | Axis | Used for |
//! |--------|------|----------|
//! | [`JD`] | TT | every solar and lunar series, term and new-moon instants |
//! | [`TT`] | TT | same axis, labelled as Terrestrial Time |
//! | [`UT`] | UT | civil days; ΔT applied on conversion |
//!
//! TDB is taken equal to TT: the ≈1.7 ms periodic difference cannot move a
//! calendar day.

use qtty::{Day, Days};

use super::delta_t::delta_t_seconds_from_ut;
use super::instant::{Time, TimeScale};

macro_rules! uniform_scale {
    ($(#[$meta:meta])* $name:ident, $label:literal) => {
        $(#[$meta])*
        #[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
        pub struct $name;

        impl TimeScale for $name {
            const LABEL: &'static str = $label;

            #[inline(always)]
            fn to_jd_tt(value: Days) -> Days {
                value
            }

            #[inline(always)]
            fn from_jd_tt(jd_tt: Days) -> Days {
                jd_tt
            }
        }
    };
}

uniform_scale! {
    /// Julian Day on the TT axis.
    JD, "Julian Day:"
}

uniform_scale! {
    /// Terrestrial Time.
    TT, "TT"
}

/// Universal Time, tied to Earth's rotation.
///
/// Converting to JD(TT) adds ΔT; the inverse solves `ut + ΔT(ut) = tt` by
/// fixed-point iteration, which settles after a couple of steps because ΔT
/// changes by well under a second per day.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd)]
pub struct UT;

impl TimeScale for UT {
    const LABEL: &'static str = "UT";

    #[inline]
    fn to_jd_tt(ut: Days) -> Days {
        ut + delta_t_seconds_from_ut(Time::from_days(ut)).to::<Day>()
    }

    #[inline]
    fn from_jd_tt(jd_tt: Days) -> Days {
        let mut ut = jd_tt;
        for _ in 0..3 {
            ut = jd_tt - delta_t_seconds_from_ut(Time::from_days(ut)).to::<Day>();
        }
        ut
    }
}

impl From<Time<UT>> for Time<JD> {
    #[inline]
    fn from(t: Time<UT>) -> Self {
        t.to()
    }
}

impl From<Time<JD>> for Time<UT> {
    #[inline]
    fn from(t: Time<JD>) -> Self {
        t.to()
    }
}
