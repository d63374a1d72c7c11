//! Randomized self-check challenges.
//!
//! Generates inverse problems from the formula library (predict the
//! resonant length for a frequency, or the frequency for a length) and
//! grades a numeric answer against a fixed absolute tolerance.
//!
//! Randomness is always an explicit `Rng` parameter so the same seed
//! reproduces the same challenge; the engine never touches a global
//! source.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::error::PhysicsError;
use crate::formulas::{frequency_from_length, resonant_length};

// ── Fixed challenge parameters ──────────────────────────────

/// The tuning forks on the virtual rack.
pub const PRESET_FREQUENCIES_HZ: [f64; 7] = [256.0, 288.0, 320.0, 341.0, 384.0, 426.0, 480.0];

/// Speed of sound the challenges assume, m/s.
pub const TRUE_SPEED_M_S: f64 = 343.0;

/// Tube diameter the challenges assume, m.
pub const TUBE_DIAMETER_M: f64 = 0.05;

/// Absolute tolerance on a predicted length, m.
pub const LENGTH_TOLERANCE_M: f64 = 0.015;

/// Absolute tolerance on a predicted frequency, Hz.
pub const FREQUENCY_TOLERANCE_HZ: f64 = 8.0;

// ── Challenge types ─────────────────────────────────────────

/// The two inverse problems. Serialized in the camelCase the UI's
/// challenge selector uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChallengeKind {
    LengthFromFrequency,
    FrequencyFromLength,
}

/// Unit of a challenge's expected answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AnswerUnit {
    #[serde(rename = "m")]
    Meters,
    #[serde(rename = "Hz")]
    Hertz,
}

impl AnswerUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnswerUnit::Meters => "m",
            AnswerUnit::Hertz => "Hz",
        }
    }
}

/// A generated challenge. Superseded, never mutated: grading reads it
/// but leaves it intact, and a new challenge simply replaces it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    pub kind: ChallengeKind,
    pub answer: f64,
    pub tolerance: f64,
    pub unit: AnswerUnit,
    pub prompt: String,
}

/// Result of grading an answer. The two failure cases are expected
/// states, not errors: callers branch on the variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum GradeOutcome {
    Graded { correct: bool, error: f64 },
    /// The guess was not a finite number.
    InvalidGuess,
    /// No challenge was active to grade against.
    NoChallenge,
}

// ── Generation and grading ──────────────────────────────────

/// Generate a challenge of the given kind, or of a uniformly random kind
/// when `kind` is `None`.
///
/// Length-from-frequency draws a preset fork frequency with an integer
/// jitter in [-3, 3]. Frequency-from-length draws a length uniformly
/// from [0.2, 1.0) and rounds it to 3 decimals before computing the
/// answer, so the prompted value is exactly the one the answer is
/// derived from.
pub fn generate_challenge<R: Rng + ?Sized>(
    kind: Option<ChallengeKind>,
    rng: &mut R,
) -> Result<Challenge, PhysicsError> {
    let kind = kind.unwrap_or_else(|| {
        if rng.gen_bool(0.5) {
            ChallengeKind::LengthFromFrequency
        } else {
            ChallengeKind::FrequencyFromLength
        }
    });

    match kind {
        ChallengeKind::LengthFromFrequency => {
            let preset = PRESET_FREQUENCIES_HZ[rng.gen_range(0..PRESET_FREQUENCIES_HZ.len())];
            let frequency = preset + rng.gen_range(-3..=3) as f64;
            let answer = resonant_length(TRUE_SPEED_M_S, frequency, TUBE_DIAMETER_M)?;
            Ok(Challenge {
                kind,
                answer,
                tolerance: LENGTH_TOLERANCE_M,
                unit: AnswerUnit::Meters,
                prompt: format!(
                    "Given frequency f = {frequency:.1} Hz, predict first-harmonic resonant L (m)."
                ),
            })
        }
        ChallengeKind::FrequencyFromLength => {
            let drawn: f64 = rng.gen_range(0.2..1.0);
            let length = (drawn * 1000.0).round() / 1000.0;
            let answer = frequency_from_length(TRUE_SPEED_M_S, length, TUBE_DIAMETER_M)?;
            Ok(Challenge {
                kind,
                answer,
                tolerance: FREQUENCY_TOLERANCE_HZ,
                unit: AnswerUnit::Hertz,
                prompt: format!(
                    "Given resonant length L = {length:.3} m, predict frequency f (Hz)."
                ),
            })
        }
    }
}

/// Grade a guess against the active challenge, if any.
///
/// Pure and idempotent: the challenge is read, never consumed, so the
/// same guess can be graded any number of times.
pub fn grade_answer(challenge: Option<&Challenge>, guess: f64) -> GradeOutcome {
    let Some(challenge) = challenge else {
        return GradeOutcome::NoChallenge;
    };
    if !guess.is_finite() {
        return GradeOutcome::InvalidGuess;
    }
    let error = (guess - challenge.answer).abs();
    GradeOutcome::Graded {
        correct: error <= challenge.tolerance,
        error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    #[test]
    fn same_seed_same_challenge() {
        let a = generate_challenge(None, &mut SmallRng::seed_from_u64(42)).unwrap();
        let b = generate_challenge(None, &mut SmallRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn length_challenges_stay_near_a_preset_fork() {
        for seed in 0..50 {
            let c = generate_challenge(
                Some(ChallengeKind::LengthFromFrequency),
                &mut SmallRng::seed_from_u64(seed),
            )
            .unwrap();
            assert_eq!(c.unit, AnswerUnit::Meters);
            assert_eq!(c.tolerance, LENGTH_TOLERANCE_M);

            // Recover the prompted frequency from the answer and check it
            // is an integer within the jitter window of some preset.
            let frequency = TRUE_SPEED_M_S / (4.0 * (c.answer + 0.3 * TUBE_DIAMETER_M));
            assert!(
                (frequency - frequency.round()).abs() < 1e-9,
                "Jittered frequency should be integral, got {frequency}"
            );
            assert!(
                PRESET_FREQUENCIES_HZ
                    .iter()
                    .any(|p| (frequency.round() - p).abs() <= 3.0),
                "Frequency {frequency} not within ±3 Hz of any preset"
            );
        }
    }

    #[test]
    fn frequency_challenges_prompt_the_rounded_length() {
        for seed in 0..50 {
            let c = generate_challenge(
                Some(ChallengeKind::FrequencyFromLength),
                &mut SmallRng::seed_from_u64(seed),
            )
            .unwrap();
            assert_eq!(c.unit, AnswerUnit::Hertz);
            assert_eq!(c.tolerance, FREQUENCY_TOLERANCE_HZ);

            // The answer must come from the rounded length, not the raw draw
            let length = TRUE_SPEED_M_S / (4.0 * c.answer) - 0.3 * TUBE_DIAMETER_M;
            assert!(
                (length - (length * 1000.0).round() / 1000.0).abs() < 1e-9,
                "Answer derives from an unrounded length: {length}"
            );
            assert!(
                length > 0.2 - 1e-9 && length < 1.0 + 1e-9,
                "Length out of range: {length}"
            );
        }
    }

    #[test]
    fn grading_against_tolerance() {
        let c = Challenge {
            kind: ChallengeKind::FrequencyFromLength,
            answer: 320.0,
            tolerance: 8.0,
            unit: AnswerUnit::Hertz,
            prompt: String::new(),
        };
        assert_eq!(
            grade_answer(Some(&c), 326.0),
            GradeOutcome::Graded {
                correct: true,
                error: 6.0
            }
        );
        assert_eq!(
            grade_answer(Some(&c), 328.0),
            GradeOutcome::Graded {
                correct: true,
                error: 8.0
            }
        );
        assert_eq!(
            grade_answer(Some(&c), 330.0),
            GradeOutcome::Graded {
                correct: false,
                error: 10.0
            }
        );
    }

    #[test]
    fn bad_guess_and_missing_challenge_are_outcomes_not_panics() {
        let c = Challenge {
            kind: ChallengeKind::LengthFromFrequency,
            answer: 0.25,
            tolerance: 0.015,
            unit: AnswerUnit::Meters,
            prompt: String::new(),
        };
        assert_eq!(grade_answer(Some(&c), f64::NAN), GradeOutcome::InvalidGuess);
        assert_eq!(
            grade_answer(Some(&c), f64::INFINITY),
            GradeOutcome::InvalidGuess
        );
        assert_eq!(grade_answer(None, 0.25), GradeOutcome::NoChallenge);
    }

    #[test]
    fn grading_does_not_consume_the_challenge() {
        let mut rng = SmallRng::seed_from_u64(7);
        let c = generate_challenge(Some(ChallengeKind::LengthFromFrequency), &mut rng).unwrap();
        let first = grade_answer(Some(&c), c.answer);
        let second = grade_answer(Some(&c), c.answer);
        assert_eq!(first, second);
        assert_eq!(
            first,
            GradeOutcome::Graded {
                correct: true,
                error: 0.0
            }
        );
    }

    #[test]
    fn kinds_serialize_in_ui_form() {
        assert_eq!(
            serde_json::to_string(&ChallengeKind::LengthFromFrequency).unwrap(),
            "\"lengthFromFrequency\""
        );
        assert_eq!(serde_json::to_string(&AnswerUnit::Hertz).unwrap(), "\"Hz\"");
        assert_eq!(
            serde_json::to_string(&GradeOutcome::NoChallenge).unwrap(),
            "{\"status\":\"noChallenge\"}"
        );
    }
}
