// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Apparent geocentric ecliptic longitude of the Sun.
//!
//! Two models:
//!
//! - [`SolarModel::Vsop87`]: Earth from the truncated VSOP87 series, turned
//!   geocentric, rotated to FK5, then corrected for nutation in longitude and
//!   annual aberration (Meeus ch. 25, "higher accuracy").  About 1″.
//! - [`SolarModel::EquationOfCenter`]: mean longitude plus the equation of
//!   centre, with the single-term nutation and aberration correction
//!   (Meeus ch. 25, "low accuracy").  About 0.01°.
//!
//! All angles here are `f64` degrees unless a name says radians.

use super::earth::heliocentric_position;
use super::SolarModel;
use crate::search::normalize_to_360;
use crate::JulianDate;

/// Mean motion of the Sun in longitude, degrees per day.
pub const MEAN_MOTION_DEG_PER_DAY: f64 = 360.0 / 365.242_189_6;

const ARCSEC: f64 = 1.0 / 3_600.0;

/// Apparent longitude of the Sun at `jd` (TT), in `[0, 360)` degrees.
pub fn apparent_longitude(model: SolarModel, jd: JulianDate) -> f64 {
    match model {
        SolarModel::Vsop87 => vsop87_apparent_longitude(jd),
        SolarModel::EquationOfCenter => equation_of_center_apparent_longitude(jd),
    }
}

fn vsop87_apparent_longitude(jd: JulianDate) -> f64 {
    let earth = heliocentric_position(jd);
    let t = jd.julian_centuries().value();

    // Geocentric: the Sun seen from the Earth.
    let theta = earth.longitude.to_degrees() + 180.0;

    // FK5 correction in longitude (Meeus 25.9).
    let fk5 = theta - 0.090_33 * ARCSEC;

    let aberration = -20.4898 * ARCSEC / earth.radius;
    normalize_to_360(fk5 + nutation_in_longitude(t) + aberration)
}

/// Nutation in longitude Δψ in degrees, the four dominant terms
/// (Meeus ch. 22, accurate to 0.5″).
pub fn nutation_in_longitude(t: f64) -> f64 {
    let omega = (125.044_52 - 1_934.136_261 * t).to_radians();
    let sun = (280.466_5 + 36_000.769_8 * t).to_radians();
    let moon = (218.316_5 + 481_267.881_3 * t).to_radians();
    (-17.20 * omega.sin() - 1.32 * (2.0 * sun).sin() - 0.23 * (2.0 * moon).sin()
        + 0.21 * (2.0 * omega).sin())
        * ARCSEC
}

fn equation_of_center_apparent_longitude(jd: JulianDate) -> f64 {
    let t = jd.julian_centuries().value();
    let l0 = 280.466_46 + 36_000.769_83 * t + 0.000_303_2 * t * t;
    let m = (357.529_11 + 35_999.050_29 * t - 0.000_153_7 * t * t).to_radians();

    let c = (1.914_602 - 0.004_817 * t - 0.000_014 * t * t) * m.sin()
        + (0.019_993 - 0.000_101 * t) * (2.0 * m).sin()
        + 0.000_289 * (3.0 * m).sin();

    let omega = (125.04 - 1_934.136 * t).to_radians();
    normalize_to_360(l0 + c - 0.005_69 - 0.004_78 * omega.sin())
}
