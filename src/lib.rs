pub mod assessment;
pub mod error;
pub mod fit;
pub mod formulas;
pub mod scoring;
pub mod trials;

use rand::SeedableRng;
use rand::rngs::SmallRng;
use wasm_bindgen::prelude::*;

use crate::assessment::{Challenge, ChallengeKind};
use crate::fit::SamplePoint;
use crate::trials::TrialRecord;

/// The crate version, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// WASM-exposed: return the resotube-core version string.
#[wasm_bindgen]
pub fn core_version() -> String {
    VERSION.to_string()
}

/// WASM-exposed: score the live tube configuration and derive every
/// display quantity (resonant length, strength, quality, acceptance,
/// period, 4L, speed estimate) in one call.
#[wasm_bindgen]
pub fn evaluate_observation(
    speed_m_s: f64,
    frequency_hz: f64,
    diameter_m: f64,
    length_m: f64,
    tolerance_m: f64,
) -> Result<JsValue, JsValue> {
    let summary = scoring::observe(
        speed_m_s,
        frequency_hz,
        diameter_m,
        length_m,
        tolerance_m,
        None,
    )
    .map_err(|e| JsValue::from_str(&format!("{e}")))?;
    serde_wasm_bindgen::to_value(&summary).map_err(|e| JsValue::from_str(&format!("{e}")))
}

/// WASM-exposed: derive an immutable trial record from the current
/// configuration. The record's acceptance always matches the scorer's
/// decision for the same observation.
#[wasm_bindgen]
pub fn record_trial(
    id: u32,
    speed_m_s: f64,
    frequency_hz: f64,
    diameter_m: f64,
    length_m: f64,
    tolerance_m: f64,
) -> Result<JsValue, JsValue> {
    let reading =
        scoring::evaluate_resonance(speed_m_s, frequency_hz, diameter_m, length_m, tolerance_m)
            .map_err(|e| JsValue::from_str(&format!("{e}")))?;
    let trial = TrialRecord::record(id, frequency_hz, length_m, diameter_m, &reading, None)
        .map_err(|e| JsValue::from_str(&format!("{e}")))?;
    serde_wasm_bindgen::to_value(&trial).map_err(|e| JsValue::from_str(&format!("{e}")))
}

/// WASM-exposed: summarize a trial session (acceptance counts and mean
/// speed estimate). `meanSpeed` is absent when no trial qualifies.
#[wasm_bindgen]
pub fn session_stats(trials: JsValue) -> Result<JsValue, JsValue> {
    let trials: Vec<TrialRecord> =
        serde_wasm_bindgen::from_value(trials).map_err(|e| JsValue::from_str(&format!("{e}")))?;
    let stats = trials::accepted_stats(&trials);
    serde_wasm_bindgen::to_value(&stats).map_err(|e| JsValue::from_str(&format!("{e}")))
}

/// WASM-exposed: fit the speed-of-sound line (4L against T) through a
/// session's accepted trials. Resolves to `null`/`undefined` when fewer
/// than two usable points exist or the geometry is degenerate.
#[wasm_bindgen]
pub fn fit_session(trials: JsValue) -> Result<JsValue, JsValue> {
    let trials: Vec<TrialRecord> =
        serde_wasm_bindgen::from_value(trials).map_err(|e| JsValue::from_str(&format!("{e}")))?;
    let result = fit::linear_fit(&trials::fit_points(&trials));
    serde_wasm_bindgen::to_value(&result).map_err(|e| JsValue::from_str(&format!("{e}")))
}

/// WASM-exposed: ordinary least-squares fit over raw `{x, y}` points.
#[wasm_bindgen]
pub fn fit_line(points: JsValue) -> Result<JsValue, JsValue> {
    let points: Vec<SamplePoint> =
        serde_wasm_bindgen::from_value(points).map_err(|e| JsValue::from_str(&format!("{e}")))?;
    let result = fit::linear_fit(&points);
    serde_wasm_bindgen::to_value(&result).map_err(|e| JsValue::from_str(&format!("{e}")))
}

/// WASM-exposed: generate an assessment challenge. `kind` is
/// `"lengthFromFrequency"`, `"frequencyFromLength"`, or `null` for a
/// random pick; `seed` drives the whole draw, so equal seeds yield equal
/// challenges.
#[wasm_bindgen]
pub fn new_challenge(kind: JsValue, seed: u64) -> Result<JsValue, JsValue> {
    let kind: Option<ChallengeKind> =
        serde_wasm_bindgen::from_value(kind).map_err(|e| JsValue::from_str(&format!("{e}")))?;
    let mut rng = SmallRng::seed_from_u64(seed);
    let challenge = assessment::generate_challenge(kind, &mut rng)
        .map_err(|e| JsValue::from_str(&format!("{e}")))?;
    serde_wasm_bindgen::to_value(&challenge).map_err(|e| JsValue::from_str(&format!("{e}")))
}

/// WASM-exposed: grade a guess against a previously generated challenge.
/// A `null` challenge yields the `noChallenge` outcome and a non-finite
/// guess the `invalidGuess` outcome; neither is an error.
#[wasm_bindgen]
pub fn grade_challenge(challenge: JsValue, guess: f64) -> Result<JsValue, JsValue> {
    let outcome = if challenge.is_null() || challenge.is_undefined() {
        assessment::grade_answer(None, guess)
    } else {
        let challenge: Challenge = serde_wasm_bindgen::from_value(challenge)
            .map_err(|e| JsValue::from_str(&format!("{e}")))?;
        assessment::grade_answer(Some(&challenge), guess)
    };
    serde_wasm_bindgen::to_value(&outcome).map_err(|e| JsValue::from_str(&format!("{e}")))
}

/// WASM-exposed: serialize a trial session to JSON for export.
#[wasm_bindgen]
pub fn export_session(trials: JsValue) -> Result<String, JsValue> {
    let trials: Vec<TrialRecord> =
        serde_wasm_bindgen::from_value(trials).map_err(|e| JsValue::from_str(&format!("{e}")))?;
    trials::trials_to_json(&trials).map_err(|e| JsValue::from_str(&format!("{e}")))
}

/// WASM-exposed: restore a trial session from exported JSON.
#[wasm_bindgen]
pub fn import_session(json: &str) -> Result<JsValue, JsValue> {
    let trials = trials::trials_from_json(json).map_err(|e| JsValue::from_str(&format!("{e}")))?;
    serde_wasm_bindgen::to_value(&trials).map_err(|e| JsValue::from_str(&format!("{e}")))
}
