// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Julian Date (`Time<JD>`) specific extensions: the time arguments of the
//! solar and lunar series.

use qtty::*;

use super::instant::Time;
use super::scales::JD;

impl Time<JD> {
    /// J2000.0 epoch: 2000-01-01T12:00:00 TT  (JD 2 451 545.0).
    pub const J2000: Self = Self::new(2_451_545.0);

    /// One Julian century expressed in days.
    pub const JULIAN_CENTURY: Days = Days::new(36_525.0);

    /// One Julian millennium expressed in days.
    pub const JULIAN_MILLENNIUM: Days = Days::new(365_250.0);

    /// Julian millennia since J2000.0, the argument τ of VSOP87.
    #[inline]
    pub fn julian_millennias(&self) -> Millennia {
        Millennia::new(
            ((*self - Self::J2000) / Self::JULIAN_MILLENNIUM)
                .simplify()
                .value(),
        )
    }

    /// Julian centuries since J2000.0 (nutation, mean elements, FK5 frame).
    #[inline]
    pub fn julian_centuries(&self) -> Centuries {
        Centuries::new(
            ((*self - Self::J2000) / Self::JULIAN_CENTURY)
                .simplify()
                .value(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn j2000_is_origin() {
        assert_eq!(Time::<JD>::J2000.julian_centuries(), Centuries::new(0.0));
        assert_eq!(Time::<JD>::J2000.julian_millennias(), Millennia::new(0.0));
    }

    #[test]
    fn centuries_and_millennia_agree() {
        let jd = Time::<JD>::J2000 + Days::new(365_250.0);
        assert!((jd.julian_millennias() - Millennia::new(1.0)).abs() < Millennia::new(1e-12));
        assert!((jd.julian_centuries() - Centuries::new(10.0)).abs() < Centuries::new(1e-12));
    }

    #[test]
    fn meeus_example_epoch() {
        // 1992 October 13.0 TD (Meeus, example 25.a)
        let jd = Time::<JD>::new(2_448_908.5);
        let t = jd.julian_centuries().value();
        assert!((t - (-0.072_183_436)).abs() < 1e-9);
    }
}
