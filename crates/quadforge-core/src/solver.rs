//! Exact solution of `ax² + bx + c = 0`.
//!
//! Both roots come back as canonical [`RootValue`]s: reduced fractions when
//! the discriminant is a perfect square, simplified radicals otherwise.

use crate::discriminant::{classify, classify_value, DiscriminantKind};
use crate::error::SolveError;
use crate::fraction::gcd;
use crate::model::{Coefficients, RootValue, SolutionPair};
use crate::radical::simplify;

/// Solve `ax² + bx + c = 0` exactly.
///
/// ```
/// use quadforge_core::solver::solve;
///
/// let pair = solve(1, 4, 1).unwrap();
/// assert_eq!(pair.format(), ("-2-√3".to_string(), "-2+√3".to_string()));
/// ```
pub fn solve(a: i64, b: i64, c: i64) -> Result<SolutionPair, SolveError> {
    let coefficients = Coefficients::new(a, b, c);
    let d = classify(coefficients)?;
    solve_discriminant(a, b, d.value)
}

/// Both canonical renderings of a pair, ascending.
pub fn format(pair: &SolutionPair) -> (String, String) {
    pair.format()
}

/// Build the roots `(−b ± √D) / 2a` from `a`, `b` and a known `D ≥ 0`.
///
/// The distractor models call this with altered inputs, so `a` is checked
/// again here.
pub fn solve_discriminant(a: i64, b: i64, d: u64) -> Result<SolutionPair, SolveError> {
    if a == 0 {
        return Err(SolveError::InvalidCoefficient);
    }
    let two_a = a
        .checked_mul(2)
        .ok_or(SolveError::Overflow("doubling the leading coefficient"))?;

    match classify_value(d).kind {
        DiscriminantKind::PerfectSquare { root } => rational_roots(b, root, two_a),
        DiscriminantKind::Irrational => irrational_roots(b, d, two_a),
    }
}

fn rational_roots(b: i64, s: u64, two_a: i64) -> Result<SolutionPair, SolveError> {
    let to_i64 = |v: i128| {
        i64::try_from(v).map_err(|_| SolveError::Overflow("forming the root numerators"))
    };
    let n1 = to_i64(-(b as i128) - s as i128)?;
    let n2 = to_i64(-(b as i128) + s as i128)?;

    Ok(SolutionPair::new(
        RootValue::rational(n1, two_a),
        RootValue::rational(n2, two_a),
    ))
}

fn irrational_roots(b: i64, d: u64, two_a: i64) -> Result<SolutionPair, SolveError> {
    let (outside, radicand) = simplify(d);
    if radicand <= 1 {
        return Err(SolveError::InvariantViolation(format!(
            "discriminant {d} classified irrational but simplified to radicand {radicand}"
        )));
    }
    let outside = i64::try_from(outside)
        .map_err(|_| SolveError::Overflow("extracting the radical coefficient"))?;
    let neg_b = b
        .checked_neg()
        .ok_or(SolveError::Overflow("negating the linear coefficient"))?;

    let g = match gcd(gcd(b, outside), two_a) {
        0 => 1,
        g => g,
    };
    let (mut constant, mut coef, mut den) = (neg_b / g, outside / g, two_a / g);
    if den < 0 {
        constant = -constant;
        coef = -coef;
        den = -den;
    }

    let root = |coef: i64| RootValue::Radical {
        constant,
        coef,
        radicand,
        den,
    };
    Ok(SolutionPair::new(root(-coef), root(coef)))
}
