// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! True new moons.
//!
//! Meeus, *Astronomical Algorithms*, ch. 49: the mean conjunction of
//! lunation `k` corrected by the solar and lunar anomalies, the Moon's
//! argument of latitude, the node and fourteen planetary arguments.  The
//! error against a modern lunar theory stays below a minute of time over
//! several centuries around J2000.

use qtty::Days;

use crate::JulianDate;

/// Mean synodic month in days.
pub const MEAN_SYNODIC_MONTH: Days = Days::new(29.530_588_861);

/// JDE of the mean new moon of lunation 0 (2000-01-06).
const LUNATION_ZERO_JDE: f64 = 2_451_550.097_66;

/// Periodic terms of the new-moon correction.
///
/// `(coefficient, power of E, n M', n M, n F)`; the Ω term is applied apart.
const PERIODIC_TERMS: &[(f64, i32, f64, f64, f64)] = &[
    (-0.407_20, 0, 1.0, 0.0, 0.0),
    (0.172_41, 1, 0.0, 1.0, 0.0),
    (0.016_08, 0, 2.0, 0.0, 0.0),
    (0.010_39, 0, 0.0, 0.0, 2.0),
    (0.007_39, 1, 1.0, -1.0, 0.0),
    (-0.005_14, 1, 1.0, 1.0, 0.0),
    (0.002_08, 2, 0.0, 2.0, 0.0),
    (-0.001_11, 0, 1.0, 0.0, -2.0),
    (-0.000_57, 0, 1.0, 0.0, 2.0),
    (0.000_56, 1, 2.0, 1.0, 0.0),
    (-0.000_42, 0, 3.0, 0.0, 0.0),
    (0.000_42, 1, 0.0, 1.0, 2.0),
    (0.000_38, 1, 0.0, 1.0, -2.0),
    (-0.000_24, 1, 2.0, -1.0, 0.0),
    (-0.000_07, 0, 1.0, 2.0, 0.0),
    (0.000_04, 0, 2.0, 0.0, -2.0),
    (0.000_04, 0, 0.0, 3.0, 0.0),
    (0.000_03, 0, 1.0, 1.0, -2.0),
    (0.000_03, 0, 2.0, 0.0, 2.0),
    (-0.000_03, 0, 1.0, 1.0, 2.0),
    (0.000_03, 0, 1.0, -1.0, 2.0),
    (-0.000_02, 0, 1.0, -1.0, -2.0),
    (-0.000_02, 0, 3.0, 1.0, 0.0),
    (0.000_02, 0, 4.0, 0.0, 0.0),
];

/// Planetary arguments `(A₀, dA/dk, coefficient)`; A1 also carries a T² term.
const PLANETARY_TERMS: [(f64, f64, f64); 14] = [
    (299.77, 0.107_408, 0.000_325),
    (251.88, 0.016_321, 0.000_165),
    (251.83, 26.651_886, 0.000_164),
    (349.42, 36.412_478, 0.000_126),
    (84.66, 18.206_239, 0.000_110),
    (141.74, 53.303_771, 0.000_062),
    (207.14, 2.453_732, 0.000_060),
    (154.84, 7.306_860, 0.000_056),
    (34.52, 27.261_239, 0.000_047),
    (207.19, 0.121_824, 0.000_042),
    (291.34, 1.844_379, 0.000_040),
    (161.72, 24.198_154, 0.000_037),
    (239.56, 25.513_099, 0.000_035),
    (331.55, 3.592_518, 0.000_023),
];

/// Instant of the mean new moon of lunation `k`.
pub fn mean_new_moon(k: i64) -> JulianDate {
    let k = k as f64;
    let t = k / 1_236.85;
    JulianDate::new(
        LUNATION_ZERO_JDE + MEAN_SYNODIC_MONTH.value() * k + 0.000_154_37 * t.powi(2)
            - 0.000_000_150 * t.powi(3)
            + 0.000_000_000_73 * t.powi(4),
    )
}

/// Instant of the true new moon of lunation `k` (TT).
///
/// Lunation 0 is the new moon of 2000-01-06; lunation numbers grow by one per
/// synodic month and are negative before that date.
pub fn true_new_moon(k: i64) -> JulianDate {
    let mean = mean_new_moon(k);
    let k = k as f64;
    let t = k / 1_236.85;
    let (t2, t3, t4) = (t * t, t * t * t, t * t * t * t);

    let e = 1.0 - 0.002_516 * t - 0.000_007_4 * t2;
    let sun_anomaly = (2.553_4 + 29.105_356_70 * k - 0.000_001_4 * t2 - 0.000_000_11 * t3)
        .to_radians();
    let moon_anomaly = (201.564_3 + 385.816_935_28 * k + 0.010_758_2 * t2 + 0.000_012_38 * t3
        - 0.000_000_058 * t4)
        .to_radians();
    let latitude_arg = (160.710_8 + 390.670_502_84 * k - 0.001_611_8 * t2
        - 0.000_002_27 * t3
        + 0.000_000_011 * t4)
        .to_radians();
    let node = (124.774_6 - 1.563_755_88 * k + 0.002_067_2 * t2 + 0.000_002_15 * t3)
        .to_radians();

    let periodic: f64 = PERIODIC_TERMS
        .iter()
        .map(|&(coefficient, e_power, n_moon, n_sun, n_lat)| {
            coefficient
                * e.powi(e_power)
                * (n_moon * moon_anomaly + n_sun * sun_anomaly + n_lat * latitude_arg).sin()
        })
        .sum::<f64>()
        - 0.000_17 * node.sin();

    let planetary: f64 = PLANETARY_TERMS
        .iter()
        .enumerate()
        .map(|(i, &(a0, rate, coefficient))| {
            let mut argument = a0 + rate * k;
            if i == 0 {
                argument -= 0.009_173 * t2;
            }
            coefficient * argument.to_radians().sin()
        })
        .sum();

    mean + Days::new(periodic + planetary)
}

/// Lunation whose mean new moon is the last one at or before `jd`.
pub fn mean_lunation_at(jd: JulianDate) -> i64 {
    ((jd.value() - LUNATION_ZERO_JDE) / MEAN_SYNODIC_MONTH.value()).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn meeus_example_49a() {
        // New moon of 1977 February: k = −283, JDE 2443192.65118.
        let jde = true_new_moon(-283);
        assert!((jde.value() - 2_443_192.651_18).abs() < 1e-4, "{jde}");
    }

    #[test]
    fn lunation_zero_is_january_2000() {
        // 2000-01-06 18:14 UT, plus ΔT ≈ 64 s.
        let jde = true_new_moon(0);
        let expected = 2_451_550.259_7;
        assert!((jde.value() - expected).abs() < 0.002, "{jde}");
    }

    #[test]
    fn true_stays_close_to_mean() {
        for k in -2_500..2_500 {
            let offset = true_new_moon(k) - mean_new_moon(k);
            assert!(offset.abs() < Days::new(0.75), "k = {k}: {offset}");
        }
    }

    #[test]
    fn consecutive_new_moons_are_a_lunation_apart() {
        for k in (-2_000..2_000).step_by(7) {
            let gap = (true_new_moon(k + 1) - true_new_moon(k)).value();
            assert!((29.2..29.9).contains(&gap), "k = {k}: {gap}");
        }
    }

    #[test]
    fn mean_lunation_index() {
        assert_eq!(mean_lunation_at(JulianDate::new(LUNATION_ZERO_JDE)), 0);
        assert_eq!(mean_lunation_at(JulianDate::new(LUNATION_ZERO_JDE - 0.01)), -1);
        assert_eq!(mean_lunation_at(JulianDate::new(LUNATION_ZERO_JDE + 29.6)), 1);
    }
}
