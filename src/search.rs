// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Bounded iterative refinement of angular events.
//!
//! Solar terms are the instants at which an angle (the Sun's apparent
//! longitude) reaches a target.  The angle grows almost linearly, so a
//! Newton step with a constant mean rate converges in three or four
//! iterations; the wrapped residual keeps the step sane across 0°/360°.

use qtty::{Days, Second};
use tracing::{trace, warn};

use crate::error::{CalendarError, CalendarResult};
use crate::JulianDate;

/// Iteration cap and convergence threshold of one search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SearchBudget {
    pub max_iterations: u32,
    pub tolerance: Days,
}

impl SearchBudget {
    pub fn new(max_iterations: u32, tolerance_seconds: f64) -> Self {
        Self {
            max_iterations,
            tolerance: qtty::Seconds::new(tolerance_seconds).to::<qtty::Day>(),
        }
    }
}

/// Wraps an angle in degrees to `[-180, 180)`.
#[inline]
pub fn normalize_to_pm180(degrees: f64) -> f64 {
    (degrees + 180.0).rem_euclid(360.0) - 180.0
}

/// Wraps an angle in degrees to `[0, 360)`.
#[inline]
pub fn normalize_to_360(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs.
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

/// Finds the instant near `estimate` at which `angle(t)` equals `target_deg`.
///
/// `rate_deg_per_day` is the mean angular speed used as the Newton slope.
/// Fails with [`CalendarError::ConvergenceFailure`] when the step is still
/// above the tolerance after `budget.max_iterations` evaluations.
pub fn find_angle_crossing<F>(
    search: &'static str,
    mut angle: F,
    target_deg: f64,
    rate_deg_per_day: f64,
    estimate: JulianDate,
    budget: SearchBudget,
) -> CalendarResult<JulianDate>
where
    F: FnMut(JulianDate) -> CalendarResult<f64>,
{
    let mut t = estimate;
    for iteration in 1..=budget.max_iterations {
        let residual = normalize_to_pm180(target_deg - angle(t)?);
        let step = Days::new(residual / rate_deg_per_day);
        t += step;
        trace!(
            search,
            iteration,
            jd = t.value(),
            step_s = step.to::<Second>().value(),
            "refining angle crossing"
        );
        if step.abs() < budget.tolerance {
            return Ok(t);
        }
    }
    warn!(
        search,
        target_deg,
        estimate = estimate.value(),
        iterations = budget.max_iterations,
        "angle crossing search exhausted its budget"
    );
    Err(CalendarError::convergence_failure(
        search,
        budget.max_iterations,
    ))
}
