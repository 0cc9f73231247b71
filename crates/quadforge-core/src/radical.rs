//! Square-root simplification.
//!
//! Factors perfect squares out of a radicand so that `√n = outside·√rest`
//! with `rest` squarefree. Every radical the engine renders comes from here.

/// Decompose `n` into `(outside, radicand)` with `n = outside² · radicand`
/// and `radicand` squarefree.
///
/// Trial division by increasing `i` while `i² ≤ n`; each time `i²` divides
/// the remaining radicand, `i` moves outside.
///
/// ```
/// use quadforge_core::radical::simplify;
///
/// assert_eq!(simplify(12), (2, 3));
/// assert_eq!(simplify(72), (6, 2));
/// assert_eq!(simplify(49), (7, 1));
/// ```
pub fn simplify(mut n: u64) -> (u64, u64) {
    let mut outside = 1u64;
    let mut i = 2u64;

    while let Some(square) = i.checked_mul(i) {
        if square > n {
            break;
        }
        while n % square == 0 {
            outside *= i;
            n /= square;
        }
        i += 1;
    }

    (outside, n)
}

/// Returns `Some(s)` when `n = s²`.
pub fn perfect_square_root(n: u64) -> Option<u64> {
    let s = n.isqrt();
    (s * s == n).then_some(s)
}

/// Returns `true` if no `k > 1` has `k²` dividing `n`.
pub fn is_squarefree(n: u64) -> bool {
    let mut k = 2u64;
    while let Some(square) = k.checked_mul(k) {
        if square > n {
            return true;
        }
        if n % square == 0 {
            return false;
        }
        k += 1;
    }
    true
}
