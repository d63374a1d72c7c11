//! Trial records and session statistics.
//!
//! The UI owns the trial list; this module only derives new records from
//! observations, summarizes a list it is handed, and (de)serializes a
//! session so the host can export or restore one. Nothing here holds
//! state between calls.

use serde::{Deserialize, Serialize};

use crate::error::PhysicsError;
use crate::fit::SamplePoint;
use crate::formulas;
use crate::scoring::{self, QualityLabel, ResonanceReading};

// ── Trial Record ────────────────────────────────────────────

/// One recorded experimental trial, immutable once created.
///
/// Built only through [`TrialRecord::record`] so `quality`, `accepted`,
/// and the derived quantities always come from the same observation;
/// a record can never claim an acceptance its own score would not grant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialRecord {
    /// 1-based position in the session.
    pub id: u32,
    pub frequency_hz: f64,
    pub length_m: f64,
    pub quality: QualityLabel,
    pub accepted: bool,
    /// 4L in meters, the y-value on the speed-of-sound plot.
    pub four_l: f64,
    /// Period T in seconds, the x-value on the speed-of-sound plot.
    pub period: f64,
    /// Speed of sound implied by this trial alone.
    pub speed_estimate: f64,
}

impl TrialRecord {
    /// Derive a trial record from a scored observation.
    ///
    /// `threshold` of `None` uses the default acceptance threshold.
    pub fn record(
        id: u32,
        frequency_hz: f64,
        length_m: f64,
        diameter_m: f64,
        reading: &ResonanceReading,
        threshold: Option<f64>,
    ) -> Result<Self, PhysicsError> {
        Ok(TrialRecord {
            id,
            frequency_hz,
            length_m,
            quality: reading.quality,
            accepted: scoring::is_accepted(reading.strength, threshold),
            four_l: formulas::four_times_length(length_m)?,
            period: formulas::period(frequency_hz)?,
            speed_estimate: formulas::speed_of_sound(frequency_hz, length_m, diameter_m)?,
        })
    }
}

// ── Aggregation ─────────────────────────────────────────────

/// Summary of a trial session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateStats {
    pub accepted_count: usize,
    pub total_count: usize,
    /// Mean of the accepted trials' speed estimates, or `None` when no
    /// trial qualifies. Never a sentinel zero or NaN.
    pub mean_speed: Option<f64>,
}

/// Count and average the trials that qualify as experimental data:
/// accepted, with a finite speed estimate. Everything else is silently
/// excluded; `total_count` still reflects the full input.
pub fn accepted_stats(trials: &[TrialRecord]) -> AggregateStats {
    let qualifying: Vec<f64> = trials
        .iter()
        .filter(|t| t.accepted && t.speed_estimate.is_finite())
        .map(|t| t.speed_estimate)
        .collect();

    let mean_speed = if qualifying.is_empty() {
        None
    } else {
        Some(qualifying.iter().sum::<f64>() / qualifying.len() as f64)
    };

    AggregateStats {
        accepted_count: qualifying.len(),
        total_count: trials.len(),
        mean_speed,
    }
}

/// Project the accepted trials onto the speed-of-sound plot:
/// `x = period, y = 4L`, in recording order.
pub fn fit_points(trials: &[TrialRecord]) -> Vec<SamplePoint> {
    trials
        .iter()
        .filter(|t| t.accepted)
        .map(|t| SamplePoint {
            x: t.period,
            y: t.four_l,
        })
        .collect()
}

// ── Session import/export ───────────────────────────────────

/// Serialize a session's trial list to JSON for export.
pub fn trials_to_json(trials: &[TrialRecord]) -> Result<String, PhysicsError> {
    Ok(serde_json::to_string(trials)?)
}

/// Restore a trial list from exported JSON.
pub fn trials_from_json(json: &str) -> Result<Vec<TrialRecord>, PhysicsError> {
    Ok(serde_json::from_str(json)?)
}
