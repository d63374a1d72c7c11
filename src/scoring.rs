//! Resonance scoring.
//!
//! Converts the deviation between an observed column length and the
//! predicted resonant length into a bounded proximity score, a discrete
//! quality label, and an acceptance decision. The score drives both the
//! UI loudness meter and the oscillator gain in the host application.

use serde::{Deserialize, Serialize};

use crate::error::PhysicsError;
use crate::formulas;

/// Fallback score tolerance (meters) when a caller passes a non-positive
/// tolerance.
pub const DEFAULT_SCORE_TOLERANCE_M: f64 = 0.02;

/// Default acceptance threshold. Shares the value of the Good quality
/// boundary but is an independent constant; tuning one does not move the
/// other.
pub const DEFAULT_ACCEPT_THRESHOLD: f64 = 0.75;

/// Gaussian proximity score in [0, 1]: `exp(−(Δ/τ)²)` where `Δ` is the
/// absolute deviation from the resonant length and `τ` the tolerance.
///
/// Exactly 1 at resonance, symmetric, monotonically decreasing with the
/// deviation. A non-positive `tolerance_m` falls back to
/// [`DEFAULT_SCORE_TOLERANCE_M`].
pub fn resonance_strength(observed_length_m: f64, resonant_length_m: f64, tolerance_m: f64) -> f64 {
    let tolerance = if tolerance_m > 0.0 {
        tolerance_m
    } else {
        DEFAULT_SCORE_TOLERANCE_M
    };
    let delta = (observed_length_m - resonant_length_m).abs();
    let normalized = delta / tolerance;
    (-(normalized * normalized)).exp().clamp(0.0, 1.0)
}

/// Discrete quality of a resonance observation.
///
/// Serializes as the capitalized label the UI renders; [`css_class`]
/// gives the lowercase form used for styling.
///
/// [`css_class`]: QualityLabel::css_class
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QualityLabel {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl QualityLabel {
    /// Map a strength score to its label. Boundaries are inclusive on
    /// their lower bound: ≥0.90 Excellent, ≥0.75 Good, ≥0.50 Fair.
    pub fn from_strength(strength: f64) -> Self {
        if strength >= 0.9 {
            QualityLabel::Excellent
        } else if strength >= 0.75 {
            QualityLabel::Good
        } else if strength >= 0.5 {
            QualityLabel::Fair
        } else {
            QualityLabel::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            QualityLabel::Excellent => "Excellent",
            QualityLabel::Good => "Good",
            QualityLabel::Fair => "Fair",
            QualityLabel::Poor => "Poor",
        }
    }

    /// Lowercase form for the UI's `quality-*` CSS classes.
    pub fn css_class(&self) -> &'static str {
        match self {
            QualityLabel::Excellent => "excellent",
            QualityLabel::Good => "good",
            QualityLabel::Fair => "fair",
            QualityLabel::Poor => "poor",
        }
    }
}

impl std::fmt::Display for QualityLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Whether a strength score meets the acceptance threshold
/// (default [`DEFAULT_ACCEPT_THRESHOLD`]).
pub fn is_accepted(strength: f64, threshold: Option<f64>) -> bool {
    strength >= threshold.unwrap_or(DEFAULT_ACCEPT_THRESHOLD)
}

/// How resonant one tube configuration is: the predicted resonant length
/// together with the proximity score and its label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ResonanceReading {
    pub resonant_length_m: f64,
    pub strength: f64,
    pub quality: QualityLabel,
}

/// Score an observed column length against the resonant length predicted
/// for the given speed, frequency, and tube diameter.
pub fn evaluate_resonance(
    speed_m_s: f64,
    frequency_hz: f64,
    diameter_m: f64,
    observed_length_m: f64,
    tolerance_m: f64,
) -> Result<ResonanceReading, PhysicsError> {
    let resonant_length_m = formulas::resonant_length(speed_m_s, frequency_hz, diameter_m)?;
    let strength = resonance_strength(observed_length_m, resonant_length_m, tolerance_m);
    Ok(ResonanceReading {
        resonant_length_m,
        strength,
        quality: QualityLabel::from_strength(strength),
    })
}

/// Everything the UI displays for a live configuration: the resonance
/// reading plus the acceptance decision and the derived quantities
/// (period, 4L, speed estimate) shown in the readouts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObservationSummary {
    pub resonant_length_m: f64,
    pub strength: f64,
    pub quality: QualityLabel,
    pub accepted: bool,
    pub period: f64,
    pub four_l: f64,
    pub speed_estimate: f64,
}

/// Evaluate a live configuration in one call.
///
/// `threshold` of `None` uses the default acceptance threshold.
pub fn observe(
    speed_m_s: f64,
    frequency_hz: f64,
    diameter_m: f64,
    observed_length_m: f64,
    tolerance_m: f64,
    threshold: Option<f64>,
) -> Result<ObservationSummary, PhysicsError> {
    let reading = evaluate_resonance(
        speed_m_s,
        frequency_hz,
        diameter_m,
        observed_length_m,
        tolerance_m,
    )?;
    Ok(ObservationSummary {
        resonant_length_m: reading.resonant_length_m,
        strength: reading.strength,
        quality: reading.quality,
        accepted: is_accepted(reading.strength, threshold),
        period: formulas::period(frequency_hz)?,
        four_l: formulas::four_times_length(observed_length_m)?,
        speed_estimate: formulas::speed_of_sound(frequency_hz, observed_length_m, diameter_m)?,
    })
}
