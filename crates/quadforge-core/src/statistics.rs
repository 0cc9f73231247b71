//! Batch statistics: answer-position balance and mistake-model usage.
//!
//! The position check is a chi-square goodness-of-fit test against the
//! uniform distribution over the four slots.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::discriminant::DiscriminantKind;
use crate::engine::Question;
use crate::model::Letter;

/// χ² critical value for 3 degrees of freedom at p = 0.001.
pub const CHI_SQUARE_CRITICAL_3DOF: f64 = 16.266;

/// Pearson's χ² statistic of `counts` against a uniform expectation.
///
/// Returns 0.0 for an empty or all-zero input.
pub fn chi_square_uniform(counts: &[u64]) -> f64 {
    let total: u64 = counts.iter().sum();
    if counts.is_empty() || total == 0 {
        return 0.0;
    }
    let expected = total as f64 / counts.len() as f64;
    counts
        .iter()
        .map(|&observed| {
            let diff = observed as f64 - expected;
            diff * diff / expected
        })
        .sum()
}

/// Where the correct answer landed across a batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionStats {
    /// Correct-answer count per slot, A through D.
    pub counts: [u64; 4],
    /// χ² against uniform.
    pub chi_square: f64,
}

impl PositionStats {
    pub fn from_letters<I: IntoIterator<Item = Letter>>(letters: I) -> Self {
        let mut counts = [0u64; 4];
        for letter in letters {
            counts[letter.index()] += 1;
        }
        Self {
            counts,
            chi_square: chi_square_uniform(&counts),
        }
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Whether the layout is skewed at the 0.001 level.
    ///
    /// Fewer than 20 samples are never reported as biased; the χ²
    /// approximation is meaningless there.
    pub fn is_biased(&self) -> bool {
        self.total() >= 20 && self.chi_square > CHI_SQUARE_CRITICAL_3DOF
    }
}

/// Aggregate statistics for a generated batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchStats {
    /// Correct-answer position balance.
    pub positions: PositionStats,
    /// How often each mistake model supplied a distractor.
    pub model_usage: HashMap<String, u64>,
    /// Questions whose roots are rational.
    pub rational_count: u64,
    /// Questions whose roots carry a radical.
    pub irrational_count: u64,
    /// Questions with a repeated root.
    pub double_root_count: u64,
    /// Questions that needed a fallback distractor.
    pub fallback_count: u64,
}

/// Compute aggregate statistics from generated questions.
pub fn compute_batch_stats(questions: &[Question]) -> BatchStats {
    let positions = PositionStats::from_letters(questions.iter().map(|q| q.choices.correct));

    let mut model_usage: HashMap<String, u64> = HashMap::new();
    for model in questions.iter().flat_map(|q| q.slot_models.iter().flatten()) {
        *model_usage.entry(model.to_string()).or_default() += 1;
    }

    let irrational_count = questions
        .iter()
        .filter(|q| q.discriminant.kind == DiscriminantKind::Irrational)
        .count() as u64;

    BatchStats {
        positions,
        model_usage,
        rational_count: questions.len() as u64 - irrational_count,
        irrational_count,
        double_root_count: questions
            .iter()
            .filter(|q| q.solution.is_double_root())
            .count() as u64,
        fallback_count: questions.iter().filter(|q| q.distractor_attempts > 3).count() as u64,
    }
}
