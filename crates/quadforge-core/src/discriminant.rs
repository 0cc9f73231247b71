//! Discriminant computation and classification.

use serde::{Deserialize, Serialize};

use crate::error::SolveError;
use crate::model::Coefficients;
use crate::radical::perfect_square_root;

/// Which formatting branch a discriminant selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum DiscriminantKind {
    /// `D = s²`, so both roots are rational.
    PerfectSquare { root: u64 },
    /// `D` is not a perfect square, so both roots carry a radical.
    Irrational,
}

impl DiscriminantKind {
    /// Short label used in CLI output and reports.
    pub fn label(&self) -> &'static str {
        match self {
            DiscriminantKind::PerfectSquare { .. } => "perfect square",
            DiscriminantKind::Irrational => "irrational",
        }
    }
}

/// A checked, non-negative discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discriminant {
    pub value: u64,
    pub kind: DiscriminantKind,
}

/// Compute `b² − 4ac` without overflow.
pub fn discriminant(coefficients: Coefficients) -> Result<i64, SolveError> {
    let Coefficients { a, b, c } = coefficients;
    let d = (b as i128) * (b as i128) - 4 * (a as i128) * (c as i128);
    i64::try_from(d).map_err(|_| SolveError::Overflow("computing the discriminant"))
}

/// Validate the coefficients and classify their discriminant.
///
/// Fails with [`SolveError::InvalidCoefficient`] when `a = 0` and with
/// [`SolveError::NoRealSolution`] when `D < 0`.
pub fn classify(coefficients: Coefficients) -> Result<Discriminant, SolveError> {
    if coefficients.a == 0 {
        return Err(SolveError::InvalidCoefficient);
    }
    let d = discriminant(coefficients)?;
    if d < 0 {
        return Err(SolveError::NoRealSolution { discriminant: d });
    }
    Ok(classify_value(d.unsigned_abs()))
}

/// Classify an already non-negative discriminant.
pub fn classify_value(value: u64) -> Discriminant {
    let kind = match perfect_square_root(value) {
        Some(root) => DiscriminantKind::PerfectSquare { root },
        None => DiscriminantKind::Irrational,
    };
    Discriminant { value, kind }
}
