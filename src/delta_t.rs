// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! # ΔT (Delta T): the UT↔TT correction
//!
//! Piecewise model for **ΔT = TT − UT**.  Solar-term and new-moon instants
//! come out of the ephemeris on the uniform TT axis; ΔT is what moves them
//! onto the civil day they are reckoned by, so near midnight it decides the
//! date of a term or of a month's first day.
//!
//! | Span (UT) | Model |
//! |-----------|-------|
//! | < 1620 | Stephenson & Houlden (1986) parabola about 1850 |
//! | 1620–1992 | Meeus biennial table, interpolated |
//! | 1992–2005 | Meeus 1990/2000/2010 estimates, interpolated |
//! | 2005–2050 | Espenak & Meeus (2006) polynomial |
//! | 2050–2150 | Espenak & Meeus (2006) bridge |
//! | > 2150 | Morrison & Stephenson (2004) parabola |
//!
//! The correction is applied automatically by the [`UT`](super::UT) scale.
//!
//! ```rust
//! use lunisolar::{Time, JD, UT};
//!
//! let ut = Time::<UT>::new(2_451_545.0);
//! let jd_tt = ut.to::<JD>();
//! let offset_seconds = (jd_tt.value() - ut.value()) * 86_400.0;
//! assert!((offset_seconds - 63.83).abs() < 0.5);
//! assert!((ut.delta_t().value() - 63.83).abs() < 0.5);
//! ```
//!
//! ## Uncertainty
//! Minutes before 1600, a few seconds through the nineteenth century, under
//! a second today, and minutes again toward 2200.  A term or new moon that
//! close to local midnight has an uncertain civil date.

use super::instant::Time;
use super::scales::UT;
use super::JulianDate;
use qtty::{Days, Seconds, Simplify};

/// Total number of tabulated terms (biennial 1620–1992).
const TERMS: usize = 187;

/// Biennial ΔT table from 1620 to 1992 (in seconds), compiled by J. Meeus.
#[rustfmt::skip]
const DELTA_T: [Seconds; TERMS] = qtty::qtty_vec!(
    Seconds;
    124.0,115.0,106.0, 98.0, 91.0, 85.0, 79.0, 74.0, 70.0, 65.0,
     62.0, 58.0, 55.0, 53.0, 50.0, 48.0, 46.0, 44.0, 42.0, 40.0,
     37.0, 35.0, 33.0, 31.0, 28.0, 26.0, 24.0, 22.0, 20.0, 18.0,
     16.0, 14.0, 13.0, 12.0, 11.0, 10.0,  9.0,  9.0,  9.0,  9.0,
      9.0,  9.0,  9.0,  9.0, 10.0, 10.0, 10.0, 10.0, 10.0, 11.0,
     11.0, 11.0, 11.0, 11.0, 11.0, 11.0, 12.0, 12.0, 12.0, 12.0,
     12.0, 12.0, 13.0, 13.0, 13.0, 13.0, 14.0, 14.0, 14.0, 15.0,
     15.0, 15.0, 15.0, 16.0, 16.0, 16.0, 16.0, 16.0, 17.0, 17.0,
     17.0, 17.0, 17.0, 17.0, 17.0, 17.0, 16.0, 16.0, 15.0, 14.0,
     13.7, 13.1, 12.7, 12.5, 12.5, 12.5, 12.5, 12.5, 12.5, 12.3,
     12.0, 11.4, 10.6,  9.6,  8.6,  7.5,  6.6,  6.0,  5.7,  5.6,
      5.7,  5.9,  6.2,  6.5,  6.8,  7.1,  7.3,  7.5,  7.7,  7.8,
      7.9,  7.5,  6.4,  5.4,  2.9,  1.6, -1.0, -2.7, -3.6, -4.7,
     -5.4, -5.2, -5.5, -5.6, -5.8, -5.9, -6.2, -6.4, -6.1, -4.7,
     -2.7,  0.0,  2.6,  5.4,  7.7, 10.5, 13.4, 16.0, 18.2, 20.2,
     21.2, 22.4, 23.5, 23.9, 24.3, 24.0, 23.9, 23.9, 23.7, 24.0,
     24.3, 25.3, 26.2, 27.3, 28.2, 29.1, 30.0, 30.7, 31.4, 32.2,
     33.1, 34.0, 35.0, 36.5, 38.3, 40.2, 42.2, 44.5, 46.5, 48.5,
     50.5, 52.2, 53.8, 54.9, 55.8, 56.9, 58.3,
);

// ------------------------------------------------------------------------------------
// ΔT Approximation Sections by Time Interval
// ------------------------------------------------------------------------------------

/// **Years before 1620**
/// Parabola about 1850 from Stephenson & Houlden (1986).
#[inline]
fn delta_t_medieval(jd: JulianDate) -> Seconds {
    const JD_EPOCH_1850_UT: JulianDate = JulianDate::new(2_396_758.5);
    const DT_A2_S: Seconds = Seconds::new(22.5);

    let c = days_ratio(jd - JD_EPOCH_1850_UT, JulianDate::JULIAN_CENTURY);
    DT_A2_S * c * c
}

/// **Years 1620–1992**
/// Bicubic interpolation from the biennial `DELTA_T` table.
#[inline]
fn delta_t_table(jd: JulianDate) -> Seconds {
    const JD_TABLE_START_1620: JulianDate = JulianDate::new(2_312_752.5);
    const BIENNIAL_STEP_D: Days = Days::new(730.5);

    let x = days_ratio(jd - JD_TABLE_START_1620, BIENNIAL_STEP_D).max(0.0);
    let i = (x as usize).min(TERMS - 3);
    let a: Seconds = DELTA_T[i + 1] - DELTA_T[i];
    let b: Seconds = DELTA_T[i + 2] - DELTA_T[i + 1];
    let c: Seconds = b - a;
    // Three-point interpolation about the middle entry, so n ∈ [-1, 0) inside the table.
    let n = x - (i + 1) as f64;
    DELTA_T[i + 1] + n / 2.0 * (a + b + n * c)
}

/// **Years 1992–2005**
/// Interpolation from Meeus's estimated ΔT for 1990, 2000, and 2010.
#[inline]
fn delta_t_recent(jd: JulianDate) -> Seconds {
    const DT: [Seconds; 3] = [Seconds::new(56.86), Seconds::new(63.83), Seconds::new(70.0)];
    const JD_YEAR_2000_UT: JulianDate = JulianDate::new(2_451_544.5);
    const DECADE_D: Days = Days::new(3_652.5);

    let a = DT[1] - DT[0];
    let b = DT[2] - DT[1];
    let c = b - a;
    let n = days_ratio(jd - JD_YEAR_2000_UT, DECADE_D);
    DT[1] + n / 2.0 * (a + b + n * c)
}

/// **Years 2005–2050**
/// Espenak & Meeus (2006) polynomial fitted to observed ΔT.
#[inline]
fn delta_t_modern(jd: JulianDate) -> Seconds {
    let t = decimal_year(jd) - 2_000.0;
    Seconds::new(62.92 + 0.322_17 * t + 0.005_589 * t * t)
}

/// **Years 2050–2150**
/// Espenak & Meeus (2006) bridge toward the long-term parabola.
#[inline]
fn delta_t_bridge(jd: JulianDate) -> Seconds {
    let y = decimal_year(jd);
    let u = (y - 1_820.0) / 100.0;
    Seconds::new(-20.0 + 32.0 * u * u - 0.5628 * (2_150.0 - y))
}

/// **Years > 2150**
/// Long-term parabola of Morrison & Stephenson (2004).
#[inline]
fn delta_t_long_term(jd: JulianDate) -> Seconds {
    let u = (decimal_year(jd) - 1_820.0) / 100.0;
    Seconds::new(-20.0 + 32.0 * u * u)
}

/// Decimal Gregorian year of a UT Julian Day.
#[inline]
fn decimal_year(jd: JulianDate) -> f64 {
    const JD_YEAR_2000_UT: JulianDate = JulianDate::new(2_451_544.5);
    const GREGORIAN_YEAR_D: Days = Days::new(365.2425);
    2_000.0 + days_ratio(jd - JD_YEAR_2000_UT, GREGORIAN_YEAR_D)
}

#[inline]
fn days_ratio(num: Days, den: Days) -> f64 {
    (num / den).simplify().value()
}

/// Returns **ΔT** in seconds for a Julian Day on the **UT** axis.
#[inline]
pub(crate) fn delta_t_seconds_from_ut(jd_ut: JulianDate) -> Seconds {
    match jd_ut {
        jd if jd < JulianDate::new(2_312_752.5) => delta_t_medieval(jd),
        jd if jd < JulianDate::new(2_448_622.5) => delta_t_table(jd),
        jd if jd <= JulianDate::new(2_453_371.5) => delta_t_recent(jd),
        jd if jd < JulianDate::new(2_469_807.5) => delta_t_modern(jd),
        jd if jd < JulianDate::new(2_506_331.5) => delta_t_bridge(jd),
        _ => delta_t_long_term(jd_ut),
    }
}

// ── Time<UT> convenience method ───────────────────────────────────────────

impl Time<UT> {
    /// Returns **ΔT = TT − UT** in seconds for this UT epoch.
    ///
    /// This is a convenience accessor; the same correction is applied
    /// automatically when converting to any TT-based scale (`.to::<JD>()`).
    #[inline]
    pub fn delta_t(&self) -> Seconds {
        delta_t_seconds_from_ut(JulianDate::from_days(self.quantity()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use qtty::{Day, Days};

    fn at(jd: f64) -> Seconds {
        delta_t_seconds_from_ut(JulianDate::new(jd))
    }

    #[test]
    fn matches_published_values() {
        // (JD UT, ΔT seconds, tolerance)
        for (jd, expected, tol) in [
            (2_378_496.5, 13.7, 0.01), // 1800-01-01
            (2_415_020.5, -2.7, 0.5),  // 1900-01-01
            (2_433_282.5, 29.1, 0.5),  // 1950-01-01
            (2_451_545.0, 63.83, 0.5), // J2000
            (2_457_000.0, 68.98, 0.01), // 2014-12-09
        ] {
            let dt = at(jd);
            assert!(
                (dt - Seconds::new(expected)).abs() < Seconds::new(tol),
                "ΔT at JD {jd} = {dt}"
            );
        }
    }

    #[test]
    fn table_edges_are_clamped() {
        assert!((at(2_312_752.5) - Seconds::new(124.0)).abs() < Seconds::new(1e-6));
        assert!((at(2_313_483.0) - Seconds::new(115.0)).abs() < Seconds::new(1e-6));
        assert!((delta_t_table(JulianDate::new(2_448_622.5)) - Seconds::new(58.3)).abs() < Seconds::new(1e-6));
    }

    #[test]
    fn medieval_branch_is_a_parabola_about_1850() {
        assert!((at(2_100_000.0) - Seconds::new(1_485.280_240_204_242_3)).abs() < Seconds::new(1e-6));
        assert!(at(2_000_000.0) > at(2_100_000.0));
    }

    #[test]
    fn no_jumps_between_segments() {
        for jd in [2_312_752.5, 2_448_622.5, 2_469_807.5, 2_506_331.5] {
            let below = at(jd - 1e-6);
            let above = at(jd);
            assert!(
                (below - above).abs() < Seconds::new(6.0),
                "discontinuity at JD {jd}: {below} vs {above}"
            );
        }
    }

    #[test]
    fn grows_toward_the_end_of_the_window() {
        // 2100 and 2200
        assert!((at(2_488_069.5) - Seconds::new(202.742)).abs() < Seconds::new(1e-2));
        assert!(at(2_524_593.5) > at(2_488_069.5));
    }

    #[test]
    fn ut_scale_uses_the_same_correction() {
        let ut = Time::<UT>::new(2_451_545.0);
        let offset = ut.to::<crate::JD>() - JulianDate::new(2_451_545.0);
        assert!((offset - ut.delta_t().to::<Day>()).abs() < Days::new(1e-9));

        let back: JulianDate = JulianDate::new(2_460_350.5).to::<UT>().to::<crate::JD>();
        assert!((back - JulianDate::new(2_460_350.5)).abs() < Days::new(1e-12));
    }
}
