use std::f64::consts::FRAC_1_SQRT_2;

/// Standard normal CDF.
///
/// Uses the complementary error function so the lower tail keeps its
/// precision; the `0.5 * (1 + erf(..))` form cancels badly for x << 0.
#[inline]
pub(crate) fn normal_cdf(x: f64) -> f64 {
    0.5 * libm::erfc(-x * FRAC_1_SQRT_2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn check_symmetry(x in -8f64..8f64) {
            prop_assert!((normal_cdf(x) + normal_cdf(-x) - 1.0).abs() < 1e-12);
        }

        #[test]
        fn check_monotone(x in -8f64..8f64, step in 1e-3f64..1f64) {
            prop_assert!(normal_cdf(x + step) >= normal_cdf(x));
        }
    }

    #[test]
    fn check_known_values() {
        assert_abs_diff_eq!(normal_cdf(0.0), 0.5, epsilon = 1e-15);
        assert_abs_diff_eq!(normal_cdf(1.959963984540054), 0.975, epsilon = 1e-9);
        assert_abs_diff_eq!(normal_cdf(-1.959963984540054), 0.025, epsilon = 1e-9);
        assert_eq!(normal_cdf(f64::NEG_INFINITY), 0.0);
        assert_eq!(normal_cdf(f64::INFINITY), 1.0);
        assert!(normal_cdf(-40.0) >= 0.0);
        assert!(normal_cdf(40.0) <= 1.0);
    }
}
