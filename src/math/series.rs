//! Geometric dose series.
//!
//! A dilution experiment usually tests doses that shrink by a constant ratio:
//!
//! ```text
//! dose[i] = start / coefficient^i
//! ```
//!
//! The series is a pure function of its three inputs. Callers re-derive it
//! whenever one of them changes; nothing here is cached.

use crate::domain::SeriesSpec;
use crate::error::KarberError;

/// Relative tolerance used when checking that explicit doses form a geometric series.
pub const GEOMETRIC_RTOL: f64 = 1e-6;

/// Generate `count` doses starting at `start_dose`, each `coefficient` times smaller.
pub fn generate_dose_series(start_dose: f64, coefficient: f64, count: usize) -> Result<Vec<f64>, KarberError> {
    if !(start_dose.is_finite() && start_dose > 0.0) {
        return Err(KarberError::invalid("start dose", start_dose));
    }
    if !(coefficient.is_finite() && coefficient > 0.0) {
        return Err(KarberError::invalid("dose coefficient", coefficient));
    }
    if count < 2 {
        return Err(KarberError::InsufficientDoses { found: count });
    }

    let mut out = Vec::with_capacity(count);
    for i in 0..count {
        let dose = start_dose / coefficient.powi(i as i32);
        // An extreme coefficient underflows to 0 or overflows to inf.
        if !(dose.is_finite() && dose > 0.0) {
            return Err(KarberError::invalid("dose coefficient", coefficient));
        }
        out.push(dose);
    }
    Ok(out)
}

/// Generate the series described by a [`SeriesSpec`].
pub fn series_from_spec(spec: &SeriesSpec) -> Result<Vec<f64>, KarberError> {
    generate_dose_series(spec.start_dose, spec.coefficient, spec.count)
}

/// Return the common ratio `dose[i] / dose[i+1]` if the doses form a geometric series.
///
/// Returns `None` for fewer than two doses, non-positive doses, or ratios that
/// differ by more than [`GEOMETRIC_RTOL`] (relative).
pub fn geometric_ratio(doses: &[f64]) -> Option<f64> {
    if doses.len() < 2 || doses.iter().any(|&d| !(d.is_finite() && d > 0.0)) {
        return None;
    }
    let ratio = doses[0] / doses[1];
    let uniform = doses
        .windows(2)
        .all(|w| ((w[0] / w[1]) - ratio).abs() <= GEOMETRIC_RTOL * ratio.abs());
    uniform.then_some(ratio)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_series_is_powers_of_ten() {
        let v = generate_dose_series(1_000_000.0, 10.0, 8).unwrap();
        let expected = [1_000_000.0, 100_000.0, 10_000.0, 1_000.0, 100.0, 10.0, 1.0, 0.1];
        assert_eq!(v.len(), expected.len());
        for (got, want) in v.iter().zip(expected) {
            assert!((got - want).abs() <= 1e-6 * want, "got {got}, want {want}");
        }
    }

    #[test]
    fn first_dose_is_start_dose() {
        let v = generate_dose_series(250.0, 2.0, 3).unwrap();
        assert_eq!(v, vec![250.0, 125.0, 62.5]);
    }

    #[test]
    fn rejects_bad_parameters() {
        assert_eq!(
            generate_dose_series(0.0, 10.0, 8),
            Err(KarberError::InvalidParameter { name: "start dose", value: 0.0 })
        );
        assert!(matches!(
            generate_dose_series(1.0, -2.0, 8),
            Err(KarberError::InvalidParameter { name: "dose coefficient", .. })
        ));
        assert_eq!(
            generate_dose_series(1.0, 10.0, 1),
            Err(KarberError::InsufficientDoses { found: 1 })
        );
    }

    #[test]
    fn rejects_coefficients_that_leave_the_float_range() {
        // 1 / 1e400 underflows to 0.
        assert_eq!(
            generate_dose_series(1.0, 1e200, 3),
            Err(KarberError::InvalidParameter { name: "dose coefficient", value: 1e200 })
        );
        // 1 / 1e-400 overflows to inf.
        assert_eq!(
            generate_dose_series(1.0, 1e-200, 3),
            Err(KarberError::InvalidParameter { name: "dose coefficient", value: 1e-200 })
        );
    }

    #[test]
    fn geometric_ratio_detects_uniform_spacing() {
        let v = generate_dose_series(1_000.0, 3.0, 6).unwrap();
        let ratio = geometric_ratio(&v).unwrap();
        assert!((ratio - 3.0).abs() < 1e-12);

        assert_eq!(geometric_ratio(&[1000.0, 100.0, 50.0]), None);
        assert_eq!(geometric_ratio(&[1000.0]), None);
    }
}
