//! Exact fraction reduction.
//!
//! The one shared routine for putting `numerator / denominator` pairs into
//! lowest terms with a positive denominator. The rational branch, the
//! irrational branch and the distractor models all go through here.

/// Greatest common divisor of `|a|` and `|b|`, with `gcd(x, 0) = |x|`.
pub fn gcd(a: i64, b: i64) -> i64 {
    let (mut a, mut b) = (a.unsigned_abs(), b.unsigned_abs());
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    // Only gcd(i64::MIN, 0) or gcd(i64::MIN, i64::MIN) exceed i64::MAX.
    i64::try_from(a).unwrap_or(i64::MAX)
}

/// Reduce `numerator / denominator` to lowest terms.
///
/// The returned denominator is always positive and `gcd(|num|, den) = 1`.
/// A zero numerator reduces to `0 / 1`.
///
/// # Panics
///
/// Panics if `denominator` is zero. Every caller in this crate derives the
/// denominator from `2a` with `a ≠ 0` already checked.
pub fn reduce(numerator: i64, denominator: i64) -> (i64, i64) {
    assert!(denominator != 0, "reduce called with zero denominator");

    let g = gcd(numerator, denominator).max(1);
    let (num, den) = (numerator / g, denominator / g);

    if den < 0 {
        (-num, -den)
    } else {
        (num, den)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn gcd_basics() {
        assert_eq!(gcd(12, 18), 6);
        assert_eq!(gcd(-12, 18), 6);
        assert_eq!(gcd(7, 0), 7);
        assert_eq!(gcd(0, -7), 7);
        assert_eq!(gcd(0, 0), 0);
    }

    #[test]
    fn reduce_moves_sign_to_numerator() {
        assert_eq!(reduce(6, -4), (-3, 2));
        assert_eq!(reduce(-6, -4), (3, 2));
        assert_eq!(reduce(-10, 2), (-5, 1));
    }

    #[test]
    fn reduce_zero_numerator() {
        assert_eq!(reduce(0, -8), (0, 1));
        assert_eq!(reduce(0, 3), (0, 1));
    }

    #[test]
    #[should_panic(expected = "zero denominator")]
    fn reduce_rejects_zero_denominator() {
        reduce(1, 0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(512))]

        #[test]
        fn reduced_form_is_canonical_and_equal(
            num in -100_000i64..100_000,
            den in (-100_000i64..100_000).prop_filter("non-zero", |d| *d != 0),
        ) {
            let (n, d) = reduce(num, den);
            prop_assert!(d > 0);
            prop_assert_eq!(gcd(n, d), 1);
            // n/d == num/den  <=>  n*den == num*d
            prop_assert_eq!(n as i128 * den as i128, num as i128 * d as i128);
        }
    }
}
