//! Mistake-model distractor generation.
//!
//! Each distractor is produced by one named transformation that models a
//! specific student error. Transformations alter the inputs (or the already
//! solved roots) and then go back through the exact solver, so every wrong
//! answer is still a well-formed canonical expression in ascending order.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SolveError;
use crate::model::SolutionPair;
use crate::solver::solve_discriminant;

/// A named student misconception.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "model")]
pub enum MistakeModel {
    /// Used `+b` instead of `−b` in the numerator.
    SignFlipOnB,
    /// Applied the sign change to only one of the two roots.
    SingleRootSignFlip,
    /// Slipped by one on `b` when the roots coincide.
    DegenerateRootNudge,
    /// Took the square root and discarded the sign.
    CollapsedToPositiveRoot,
    /// Divided by `a` instead of `2a`.
    HalfDenominator,
    /// Mis-copied `b` by a growing offset.
    EscalatingNudge { step: u32 },
}

impl MistakeModel {
    pub fn description(&self) -> &'static str {
        match self {
            MistakeModel::SignFlipOnB => "wrong sign on b when completing the square",
            MistakeModel::SingleRootSignFlip => "changed the sign of only one root",
            MistakeModel::DegenerateRootNudge => "arithmetic slip on b for a repeated root",
            MistakeModel::CollapsedToPositiveRoot => "discarded the ± after taking the square root",
            MistakeModel::HalfDenominator => "divided by a instead of 2a",
            MistakeModel::EscalatingNudge { .. } => "mis-copied the linear coefficient",
        }
    }
}

impl fmt::Display for MistakeModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MistakeModel::SignFlipOnB => write!(f, "sign-flip-on-b"),
            MistakeModel::SingleRootSignFlip => write!(f, "single-root-sign-flip"),
            MistakeModel::DegenerateRootNudge => write!(f, "degenerate-root-nudge"),
            MistakeModel::CollapsedToPositiveRoot => write!(f, "collapsed-to-positive-root"),
            MistakeModel::HalfDenominator => write!(f, "half-denominator"),
            MistakeModel::EscalatingNudge { step } => write!(f, "escalating-nudge-{step}"),
        }
    }
}

/// A wrong answer and the misconception that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Distractor {
    pub model: MistakeModel,
    pub pair: SolutionPair,
}

impl Distractor {
    pub fn format(&self) -> (String, String) {
        self.pair.format()
    }
}

/// The three primary distractors for `(a, b, D)` as canonical string pairs.
///
/// Same models and slot order as [`primary_distractors`].
pub fn generate_distractors(
    a: i64,
    b: i64,
    d: u64,
    correct: &SolutionPair,
) -> Result<[(String, String); 3], SolveError> {
    Ok(primary_distractors(a, b, d, correct)?.map(|distractor| distractor.format()))
}

/// The three primary distractors for `(a, b, D)` and its correct roots.
///
/// Slots, in order: sign-flip-on-b, single-root-sign-flip, and then either
/// the degenerate-root nudge (when `D = 0`) or the collapsed-to-positive-root
/// mistake. Distinctness is not guaranteed here; the choice assembler checks
/// it and draws from [`fallback_distractors`] on collision.
pub fn primary_distractors(
    a: i64,
    b: i64,
    d: u64,
    correct: &SolutionPair,
) -> Result<[Distractor; 3], SolveError> {
    let third = if d == 0 {
        Distractor {
            model: MistakeModel::DegenerateRootNudge,
            pair: nudge_b(a, b, d, 1)?,
        }
    } else {
        collapsed_to_positive_root(correct)
    };

    Ok([sign_flip_on_b(a, b, d)?, single_root_sign_flip(correct), third])
}

/// Replacement candidates, in the order the assembler should try them.
///
/// The sequence is unbounded; the caller caps how many it consumes.
pub fn fallback_distractors(
    a: i64,
    b: i64,
    d: u64,
) -> impl Iterator<Item = Result<Distractor, SolveError>> {
    let half = std::iter::once_with(move || {
        Ok(Distractor {
            model: MistakeModel::HalfDenominator,
            pair: half_denominator(a, b, d)?,
        })
    });
    let nudges = (1u32..).map(move |step| {
        Ok(Distractor {
            model: MistakeModel::EscalatingNudge { step },
            pair: nudge_b(a, b, d, step)?,
        })
    });
    half.chain(nudges)
}

/// Re-solve with `b` negated. `D` is unchanged because it depends on `b²`.
pub fn sign_flip_on_b(a: i64, b: i64, d: u64) -> Result<Distractor, SolveError> {
    let neg_b = b
        .checked_neg()
        .ok_or(SolveError::Overflow("negating the linear coefficient"))?;
    Ok(Distractor {
        model: MistakeModel::SignFlipOnB,
        pair: solve_discriminant(a, neg_b, d)?,
    })
}

/// Toggle the leading sign of one root and leave the other alone.
///
/// The larger root is flipped unless that changes nothing (a zero root), in
/// which case the smaller one is.
pub fn single_root_sign_flip(correct: &SolutionPair) -> Distractor {
    let flipped_x2 = correct.x2.flip_leading_sign();
    let pair = if flipped_x2 != correct.x2 {
        SolutionPair::new(correct.x1, flipped_x2)
    } else {
        SolutionPair::new(correct.x1.flip_leading_sign(), correct.x2)
    };
    Distractor {
        model: MistakeModel::SingleRootSignFlip,
        pair,
    }
}

/// Both slots hold the absolute value of the larger-magnitude root.
pub fn collapsed_to_positive_root(correct: &SolutionPair) -> Distractor {
    let (abs1, abs2) = (correct.x1.abs(), correct.x2.abs());
    let larger = if abs1.compare(&abs2).is_gt() {
        abs1
    } else {
        abs2
    };
    Distractor {
        model: MistakeModel::CollapsedToPositiveRoot,
        pair: SolutionPair::new(larger, larger),
    }
}

/// Divide by `a` instead of `2a`: `(−b ± √D)/a = (−2b ± √4D)/2a`.
pub fn half_denominator(a: i64, b: i64, d: u64) -> Result<SolutionPair, SolveError> {
    let two_b = b
        .checked_mul(2)
        .ok_or(SolveError::Overflow("doubling the linear coefficient"))?;
    let four_d = d
        .checked_mul(4)
        .ok_or(SolveError::Overflow("scaling the discriminant"))?;
    solve_discriminant(a, two_b, four_d)
}

/// Re-solve with `b' = b + step·δ`, keeping `a` and `c` fixed.
///
/// `δ` takes the sign of `b` (or `+1` when `b = 0`), which makes the new
/// discriminant `D + step·δ(2b + step·δ)` no smaller than `D`.
pub fn nudge_b(a: i64, b: i64, d: u64, step: u32) -> Result<SolutionPair, SolveError> {
    let delta: i128 = if b < 0 { -(step as i128) } else { step as i128 };
    let nudged_b = b as i128 + delta;
    let nudged_d = d as i128 + delta * (2 * b as i128 + delta);

    let nudged_b =
        i64::try_from(nudged_b).map_err(|_| SolveError::Overflow("nudging the linear coefficient"))?;
    let nudged_d =
        u64::try_from(nudged_d).map_err(|_| SolveError::Overflow("nudging the discriminant"))?;
    solve_discriminant(a, nudged_b, nudged_d)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discriminant::classify;
    use crate::model::Coefficients;
    use crate::solver::solve;

    fn texts(distractors: &[Distractor]) -> Vec<String> {
        distractors.iter().map(|d| d.pair.choice_text()).collect()
    }

    fn primary(a: i64, b: i64, c: i64) -> [Distractor; 3] {
        let d = classify(Coefficients::new(a, b, c)).unwrap().value;
        let correct = solve(a, b, c).unwrap();
        primary_distractors(a, b, d, &correct).unwrap()
    }

    #[test]
    fn string_pairs_match_primary_models() {
        // x² + 4x + 1 = 0  ->  -2 ± √3
        let correct = solve(1, 4, 1).unwrap();
        let pairs = generate_distractors(1, 4, 12, &correct).unwrap();
        assert_eq!(
            pairs,
            [
                ("2-√3".to_string(), "2+√3".to_string()),
                ("-2-√3".to_string(), "2+√3".to_string()),
                ("2+√3".to_string(), "2+√3".to_string()),
            ]
        );
        assert_eq!(pairs, primary(1, 4, 1).map(|d| d.format()));
    }

    #[test]
    fn string_pairs_reject_invalid_coefficients() {
        let correct = solve(1, 4, 1).unwrap();
        assert_eq!(
            generate_distractors(0, 4, 12, &correct),
            Err(SolveError::InvalidCoefficient)
        );
    }

    #[test]
    fn distinct_roots_use_collapse_model() {
        // x² + 6x + 5 = 0  ->  -5, -1
        let set = primary(1, 6, 5);
        assert_eq!(set[0].model, MistakeModel::SignFlipOnB);
        assert_eq!(set[1].model, MistakeModel::SingleRootSignFlip);
        assert_eq!(set[2].model, MistakeModel::CollapsedToPositiveRoot);
        assert_eq!(
            texts(&set),
            vec!["x = 1 or x = 5", "x = -5 or x = 1", "x = 5"]
        );
    }

    #[test]
    fn double_root_uses_nudge_model() {
        // x² - 6x + 9 = 0  ->  3 (double)
        let set = primary(1, -6, 9);
        assert_eq!(set[2].model, MistakeModel::DegenerateRootNudge);
        // b' = -7, D' = 13  ->  (7 ± √13)/2
        assert_eq!(set[2].format(), ("(7-√13)/2".into(), "(7+√13)/2".into()));
        assert_eq!(set[0].pair.choice_text(), "x = -3");
    }

    #[test]
    fn irrational_single_flip_changes_constant() {
        // x² + 4x + 1 = 0  ->  -2 ± √3
        let set = primary(1, 4, 1);
        assert_eq!(set[0].format(), ("2-√3".into(), "2+√3".into()));
        assert_eq!(set[1].format(), ("-2-√3".into(), "2+√3".into()));
        assert_eq!(set[2].format(), ("2+√3".into(), "2+√3".into()));
    }

    #[test]
    fn single_flip_skips_zero_root() {
        // x² - 3x = 0  ->  0, 3
        let correct = solve(1, -3, 0).unwrap();
        let d = single_root_sign_flip(&correct);
        assert_eq!(d.format(), ("-3".into(), "0".into()));

        // x² + 3x = 0  ->  -3, 0: x2 is zero so x1 flips
        let correct = solve(1, 3, 0).unwrap();
        let d = single_root_sign_flip(&correct);
        assert_eq!(d.format(), ("0".into(), "3".into()));
    }

    #[test]
    fn collapse_prefers_larger_magnitude() {
        // 2x² - x - 1 = 0  ->  -1/2, 1
        let correct = solve(2, -1, -1).unwrap();
        assert_eq!(collapsed_to_positive_root(&correct).pair.choice_text(), "x = 1");
        // x² + 2x - 3 = 0  ->  -3, 1
        let correct = solve(1, 2, -3).unwrap();
        assert_eq!(collapsed_to_positive_root(&correct).pair.choice_text(), "x = 3");
    }

    #[test]
    fn distractors_stay_ascending() {
        for (a, b, c) in [(1, 6, 5), (-1, 4, -1), (2, 0, -5), (-3, 1, 2), (1, -6, 9)] {
            for distractor in primary(a, b, c) {
                assert!(
                    distractor.pair.x1.to_f64() <= distractor.pair.x2.to_f64(),
                    "{} out of order for ({a}, {b}, {c})",
                    distractor.model
                );
            }
        }
    }

    #[test]
    fn half_denominator_doubles_roots() {
        // x² - 4x + 3 = 0 -> 1, 3  ->  2, 6
        let pair = half_denominator(1, -4, 4).unwrap();
        assert_eq!(pair.format(), ("2".into(), "6".into()));
    }

    #[test]
    fn nudge_keeps_discriminant_non_negative() {
        for b in [-5, -1, 0, 1, 5] {
            for step in 1..5 {
                assert!(nudge_b(1, b, 0, step).is_ok(), "b={b} step={step}");
            }
        }
    }

    #[test]
    fn fallbacks_start_with_half_denominator() {
        let mut fallbacks = fallback_distractors(1, 0, 0);
        let first = fallbacks.next().unwrap().unwrap();
        assert_eq!(first.model, MistakeModel::HalfDenominator);
        let second = fallbacks.next().unwrap().unwrap();
        assert_eq!(second.model, MistakeModel::EscalatingNudge { step: 1 });
        // b' = 1, D' = 1 -> roots -1 and 0
        assert_eq!(second.format(), ("-1".into(), "0".into()));
    }

    #[test]
    fn model_display_names() {
        assert_eq!(MistakeModel::SignFlipOnB.to_string(), "sign-flip-on-b");
        assert_eq!(
            MistakeModel::EscalatingNudge { step: 3 }.to_string(),
            "escalating-nudge-3"
        );
    }
}
