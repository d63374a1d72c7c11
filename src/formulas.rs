//! Quarter-wave acoustics formulas.
//!
//! Closed-form relationships for a closed-end resonance tube: the air
//! column resonates when its effective length (physical length plus an
//! end correction proportional to tube diameter) equals a quarter of the
//! sound wavelength, or an odd multiple of it.
//!
//! All functions are pure and validate their domain up front. Bad input
//! yields a [`PhysicsError`] instead of a NaN that would silently poison
//! downstream statistics. The equations invert each other exactly:
//! `frequency_from_length(speed_of_sound(f, l, d)?, l, d)? == f` up to
//! floating-point tolerance.

use crate::error::PhysicsError;

/// End-correction factor: the effective acoustic length of the tube
/// exceeds the physical air column by roughly 0.3 tube diameters.
pub const END_CORRECTION_FACTOR: f64 = 0.3;

fn check_frequency(frequency_hz: f64) -> Result<(), PhysicsError> {
    if frequency_hz <= 0.0 {
        return Err(PhysicsError::NonPositiveFrequency { value: frequency_hz });
    }
    Ok(())
}

fn check_speed(speed_m_s: f64) -> Result<(), PhysicsError> {
    if speed_m_s <= 0.0 {
        return Err(PhysicsError::NonPositiveSpeed { value: speed_m_s });
    }
    Ok(())
}

fn check_length(length_m: f64) -> Result<(), PhysicsError> {
    if length_m < 0.0 {
        return Err(PhysicsError::NegativeLength { value: length_m });
    }
    Ok(())
}

fn check_diameter(diameter_m: f64) -> Result<(), PhysicsError> {
    if diameter_m < 0.0 {
        return Err(PhysicsError::NegativeDiameter { value: diameter_m });
    }
    Ok(())
}

/// Speed of sound implied by a first-harmonic resonant configuration:
/// `4·f·(L + k·d)`.
pub fn speed_of_sound(
    frequency_hz: f64,
    length_m: f64,
    diameter_m: f64,
) -> Result<f64, PhysicsError> {
    check_frequency(frequency_hz)?;
    check_length(length_m)?;
    check_diameter(diameter_m)?;
    Ok(4.0 * frequency_hz * (length_m + END_CORRECTION_FACTOR * diameter_m))
}

/// First-harmonic frequency of a column of the given length:
/// `v / (4·(L + k·d))`.
pub fn frequency_from_length(
    speed_m_s: f64,
    length_m: f64,
    diameter_m: f64,
) -> Result<f64, PhysicsError> {
    check_speed(speed_m_s)?;
    check_length(length_m)?;
    check_diameter(diameter_m)?;

    let denominator = 4.0 * (length_m + END_CORRECTION_FACTOR * diameter_m);
    if denominator <= 0.0 {
        return Err(PhysicsError::NonPositiveDenominator { value: denominator });
    }
    Ok(speed_m_s / denominator)
}

/// Physical column length that resonates at the given frequency:
/// `v/(4·f) − k·d`, clamped at zero so a large end correction never
/// produces a negative length.
pub fn resonant_length(
    speed_m_s: f64,
    frequency_hz: f64,
    diameter_m: f64,
) -> Result<f64, PhysicsError> {
    check_speed(speed_m_s)?;
    check_frequency(frequency_hz)?;
    check_diameter(diameter_m)?;
    Ok((speed_m_s / (4.0 * frequency_hz) - END_CORRECTION_FACTOR * diameter_m).max(0.0))
}

/// Resonant column length for a higher odd harmonic: `n·v/(4·f) − k·d`.
///
/// `mode` must be a positive odd integer (1 = first harmonic, 3 = third,
/// and so on); a closed tube has no even modes.
pub fn resonant_length_for_mode(
    speed_m_s: f64,
    frequency_hz: f64,
    diameter_m: f64,
    mode: u32,
) -> Result<f64, PhysicsError> {
    if mode == 0 || mode % 2 == 0 {
        return Err(PhysicsError::InvalidHarmonicMode { mode });
    }
    check_speed(speed_m_s)?;
    check_frequency(frequency_hz)?;
    check_diameter(diameter_m)?;
    Ok(
        (mode as f64 * speed_m_s / (4.0 * frequency_hz) - END_CORRECTION_FACTOR * diameter_m)
            .max(0.0),
    )
}

/// Oscillation period `T = 1/f`.
pub fn period(frequency_hz: f64) -> Result<f64, PhysicsError> {
    check_frequency(frequency_hz)?;
    Ok(1.0 / frequency_hz)
}

/// Four times the column length, the quantity plotted against the period
/// when deriving the speed of sound graphically.
pub fn four_times_length(length_m: f64) -> Result<f64, PhysicsError> {
    check_length(length_m)?;
    Ok(4.0 * length_m)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn speed_of_sound_first_harmonic() {
        let speed = speed_of_sound(320.0, 0.25, 0.05).unwrap();
        assert!(
            (speed - 339.2).abs() < 1e-12,
            "Expected 339.2 m/s, got {speed}"
        );
    }

    #[test]
    fn resonant_length_inverts_quarter_wave_relation() {
        let length = resonant_length(343.0, 320.0, 0.05).unwrap();
        assert!(
            (length - 0.25296875).abs() < 1e-12,
            "Expected 0.25296875 m, got {length}"
        );
    }

    #[test]
    fn speed_and_frequency_round_trip() {
        for &(f, l, d) in &[
            (256.0, 0.33, 0.05),
            (320.0, 0.25, 0.05),
            (341.0, 0.2, 0.0),
            (480.0, 0.171, 0.04),
            (182.5, 0.95, 0.08),
        ] {
            let speed = speed_of_sound(f, l, d).unwrap();
            let back = frequency_from_length(speed, l, d).unwrap();
            assert!(
                (back - f).abs() < 1e-9,
                "Round trip failed for f={f}: got {back}"
            );
        }
    }

    #[test]
    fn resonant_length_clamps_to_zero() {
        // Tiny speed with a huge diameter would go negative without the clamp
        let length = resonant_length(1.0, 500.0, 1.0).unwrap();
        assert_eq!(length, 0.0);
    }

    #[test]
    fn first_mode_matches_plain_resonant_length() {
        let plain = resonant_length(343.0, 320.0, 0.05).unwrap();
        let mode1 = resonant_length_for_mode(343.0, 320.0, 0.05, 1).unwrap();
        assert_eq!(plain, mode1);
    }

    #[test]
    fn third_mode_is_three_quarter_waves() {
        let mode3 = resonant_length_for_mode(343.0, 320.0, 0.05, 3).unwrap();
        let expected = 3.0 * 343.0 / (4.0 * 320.0) - 0.3 * 0.05;
        assert!((mode3 - expected).abs() < 1e-12, "got {mode3}");
    }

    #[test]
    fn even_and_zero_modes_are_rejected() {
        assert_eq!(
            resonant_length_for_mode(343.0, 320.0, 0.05, 2),
            Err(PhysicsError::InvalidHarmonicMode { mode: 2 })
        );
        assert_eq!(
            resonant_length_for_mode(343.0, 320.0, 0.05, 0),
            Err(PhysicsError::InvalidHarmonicMode { mode: 0 })
        );
    }

    #[test]
    fn out_of_domain_inputs_fail_fast() {
        assert_eq!(
            speed_of_sound(0.0, 0.25, 0.05),
            Err(PhysicsError::NonPositiveFrequency { value: 0.0 })
        );
        assert_eq!(
            speed_of_sound(320.0, -0.1, 0.05),
            Err(PhysicsError::NegativeLength { value: -0.1 })
        );
        assert_eq!(
            speed_of_sound(320.0, 0.25, -0.01),
            Err(PhysicsError::NegativeDiameter { value: -0.01 })
        );
        assert_eq!(
            resonant_length(-343.0, 320.0, 0.05),
            Err(PhysicsError::NonPositiveSpeed { value: -343.0 })
        );
        assert_eq!(
            period(0.0),
            Err(PhysicsError::NonPositiveFrequency { value: 0.0 })
        );
        assert_eq!(
            four_times_length(-1.0),
            Err(PhysicsError::NegativeLength { value: -1.0 })
        );
    }

    #[test]
    fn zero_effective_length_has_no_frequency() {
        assert_eq!(
            frequency_from_length(343.0, 0.0, 0.0),
            Err(PhysicsError::NonPositiveDenominator { value: 0.0 })
        );
    }

    #[test]
    fn period_and_four_l() {
        let t = period(320.0).unwrap();
        assert!((t - 0.003125).abs() < 1e-15, "got {t}");
        let four_l = four_times_length(0.25).unwrap();
        assert!((four_l - 1.0).abs() < 1e-15, "got {four_l}");
    }
}
