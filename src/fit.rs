//! Ordinary least-squares fitting.
//!
//! The experiment plots 4L against the period T for each accepted trial;
//! the slope of the fitted line is the measured speed of sound.
//! Non-finite points are dropped, and an unusable point set (fewer than
//! two valid points, or zero x-variance) yields `None`, never an error
//! or a non-finite result.

use serde::{Deserialize, Serialize};

/// A generic 2-D sample. For the speed-of-sound plot, `x` is the period
/// T in seconds and `y` is 4L in meters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplePoint {
    pub x: f64,
    pub y: f64,
}

/// A fitted line with its goodness of fit. Only ever produced from at
/// least two valid points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitResult {
    pub slope: f64,
    pub intercept: f64,
    pub r2: f64,
    pub count: usize,
}

impl FitResult {
    /// Evaluate the fitted line at `x`. The UI uses this to draw the
    /// line across the graph's x-extent.
    pub fn predict(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Below this denominator magnitude the point set is treated as
/// degenerate (zero x-variance) and no slope is reported.
const DEGENERATE_EPSILON: f64 = 1e-12;

/// Ordinary least-squares fit over the finite points in `points`.
///
/// Returns `None` when fewer than two finite points remain or when the
/// x-values are (numerically) all identical; both are expected states,
/// not errors. The result never contains infinities or NaN: degenerate
/// geometry is caught before the division, and `r2` is defined as 1 when
/// the response has zero variance (a perfect, trivial fit).
pub fn linear_fit(points: &[SamplePoint]) -> Option<FitResult> {
    let valid: Vec<&SamplePoint> = points
        .iter()
        .filter(|p| p.x.is_finite() && p.y.is_finite())
        .collect();

    if valid.len() < 2 {
        return None;
    }

    let n = valid.len() as f64;
    let mut sum_x = 0.0;
    let mut sum_y = 0.0;
    let mut sum_xy = 0.0;
    let mut sum_xx = 0.0;
    for p in &valid {
        sum_x += p.x;
        sum_y += p.y;
        sum_xy += p.x * p.y;
        sum_xx += p.x * p.x;
    }

    let denominator = n * sum_xx - sum_x * sum_x;
    if denominator.abs() < DEGENERATE_EPSILON {
        return None;
    }

    let slope = (n * sum_xy - sum_x * sum_y) / denominator;
    let intercept = (sum_y - slope * sum_x) / n;

    let mean_y = sum_y / n;
    let mut ss_residual = 0.0;
    let mut ss_total = 0.0;
    for p in &valid {
        let residual = p.y - (slope * p.x + intercept);
        let centered = p.y - mean_y;
        ss_residual += residual * residual;
        ss_total += centered * centered;
    }

    Some(FitResult {
        slope,
        intercept,
        r2: if ss_total == 0.0 {
            1.0
        } else {
            1.0 - ss_residual / ss_total
        },
        count: valid.len(),
    })
}
