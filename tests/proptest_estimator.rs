//! Property-based tests for the estimator invariants.
//!
//! Uses `proptest` to verify that the series generator, the Kärber estimators
//! and the curve projector keep their mathematical invariants across random
//! experiments.

use proptest::prelude::*;

use karber_ld50::domain::Mode;
use karber_ld50::estimate::{
    estimate_median_dose_log_trapezoid, estimate_median_dose_log_uniform, estimate_median_dose_trapezoid,
};
use karber_ld50::math::{generate_dose_series, geometric_ratio};
use karber_ld50::report::project_response_curve;

/// A geometric series plus one outcome per dose.
fn experiment() -> impl Strategy<Value = (f64, f64, u32, Vec<u32>)> {
    (1.0f64..1e6, 1.5f64..10.0, 1u32..=20, 2usize..=8).prop_flat_map(|(start, coef, max, count)| {
        (
            Just(start),
            Just(coef),
            Just(max),
            prop::collection::vec(0..=max, count),
        )
    })
}

// ── Series Properties ───────────────────────────────────────

proptest! {
    /// The series starts at the start dose and keeps a constant ratio.
    #[test]
    fn series_is_geometric(start in 1e-3f64..1e9, coef in 1.1f64..100.0, count in 2usize..=12) {
        let doses = generate_dose_series(start, coef, count).unwrap();
        prop_assert_eq!(doses.len(), count);
        prop_assert_eq!(doses[0], start);
        let ratio = geometric_ratio(&doses).unwrap();
        prop_assert!((ratio - coef).abs() <= 1e-6 * coef, "ratio {} vs {}", ratio, coef);
    }
}

// ── Estimator Properties ────────────────────────────────────

proptest! {
    /// More responders at any single dose strictly lowers the trapezoid estimate.
    #[test]
    fn trapezoid_decreases_with_more_responders(
        (start, coef, max, outcomes) in experiment(),
        pick in any::<prop::sample::Index>(),
    ) {
        let doses = generate_dose_series(start, coef, outcomes.len()).unwrap();
        let i = pick.index(outcomes.len());
        prop_assume!(outcomes[i] < max);

        let mut bumped = outcomes.clone();
        bumped[i] += 1;

        let before = estimate_median_dose_trapezoid(&doses, &outcomes, max).unwrap();
        let after = estimate_median_dose_trapezoid(&doses, &bumped, max).unwrap();
        prop_assert!(after < before, "before={before}, after={after}");
    }

    /// The same holds for the closed form when the series decreases.
    #[test]
    fn closed_form_decreases_with_more_responders(
        (start, coef, max, outcomes) in experiment(),
        pick in any::<prop::sample::Index>(),
    ) {
        let i = pick.index(outcomes.len());
        prop_assume!(outcomes[i] < max);

        let mut bumped = outcomes.clone();
        bumped[i] += 1;

        let before = estimate_median_dose_log_uniform(start, coef, &outcomes, max).unwrap();
        let after = estimate_median_dose_log_uniform(start, coef, &bumped, max).unwrap();
        prop_assert!(after < before, "before={before}, after={after}");
    }

    /// No responders: the estimate is not below the lowest tested dose.
    /// All responding: the estimate is not above the highest tested dose.
    #[test]
    fn boundary_outcomes_bound_the_estimate((start, coef, max, outcomes) in experiment()) {
        let n = outcomes.len();
        let doses = generate_dose_series(start, coef, n).unwrap();
        let lowest = doses[n - 1];
        let highest = doses[0];

        let none = vec![0; n];
        let all = vec![max; n];

        let t_none = estimate_median_dose_trapezoid(&doses, &none, max).unwrap();
        let t_all = estimate_median_dose_trapezoid(&doses, &all, max).unwrap();
        prop_assert!(t_none >= lowest);
        prop_assert!(t_all <= highest * (1.0 + 1e-12));

        let c_none = estimate_median_dose_log_uniform(start, coef, &none, max).unwrap();
        let c_all = estimate_median_dose_log_uniform(start, coef, &all, max).unwrap();
        prop_assert!(c_none >= lowest);
        prop_assert!(c_all <= highest);
    }

    /// On a bracketed geometric series the closed form is the log-spaced trapezoid.
    #[test]
    fn closed_form_agrees_with_log_trapezoid((start, coef, max, mut outcomes) in experiment()) {
        let n = outcomes.len();
        outcomes[0] = 0;
        outcomes[n - 1] = max;
        let doses = generate_dose_series(start, coef, n).unwrap();

        let closed = estimate_median_dose_log_uniform(start, coef, &outcomes, max).unwrap();
        let trap = estimate_median_dose_log_trapezoid(&doses, &outcomes, max).unwrap();
        prop_assert!(((trap - closed) / closed).abs() < 1e-6, "trap={trap}, closed={closed}");
    }
}

// ── Projection Properties ───────────────────────────────────

proptest! {
    /// Percentages stay in [0, 100] and the two modes are complements.
    #[test]
    fn projection_modes_are_complementary((start, coef, max, outcomes) in experiment()) {
        let doses = generate_dose_series(start, coef, outcomes.len()).unwrap();
        let ld = project_response_curve(&doses, &outcomes, max, Mode::Ld50, None).unwrap();
        let ed = project_response_curve(&doses, &outcomes, max, Mode::Ed50, None).unwrap();

        for (a, b) in ld.points.iter().zip(&ed.points) {
            prop_assert!((0.0..=100.0).contains(&a.response_percent));
            prop_assert!((0.0..=100.0).contains(&b.response_percent));
            prop_assert!((a.response_percent + b.response_percent - 100.0).abs() < 1e-9);
            prop_assert_eq!(a.dose, b.dose);
        }
    }
}
