//! Batch report types with JSON persistence and answer-drift detection.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::engine::Question;
use crate::model::Coefficients;
use crate::statistics::BatchStats;

/// The output of generating one item set.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuizReport {
    /// Unique report identifier.
    pub id: Uuid,
    /// When the report was created.
    pub created_at: DateTime<Utc>,
    /// Summary of the item set.
    pub item_set: ItemSetSummary,
    /// Seed that reproduces every choice layout in this report.
    pub seed: u64,
    /// Generated questions, in item order.
    pub questions: Vec<Question>,
    /// Items that could not be generated.
    #[serde(default)]
    pub failures: Vec<ItemFailure>,
    /// Aggregate statistics.
    pub stats: BatchStats,
    /// Total wall-clock duration in milliseconds.
    pub duration_ms: u64,
}

/// Summary of an item set (without the items themselves).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemSetSummary {
    pub id: String,
    pub name: String,
    pub item_count: usize,
}

/// An item that failed to generate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemFailure {
    pub item_id: String,
    pub coefficients: Coefficients,
    pub error: String,
    /// Whether drawing new coefficients would fix it.
    pub resample: bool,
}

impl QuizReport {
    /// Save the report as JSON to a file.
    pub fn save_json(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self).context("failed to serialize report")?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, json)
            .with_context(|| format!("failed to write report to {}", path.display()))?;
        Ok(())
    }

    /// Load a report from a JSON file.
    pub fn load_json(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report from {}", path.display()))?;
        let report: QuizReport =
            serde_json::from_str(&content).context("failed to parse report JSON")?;
        Ok(report)
    }

    /// Compare the correct answers in this report against a baseline.
    ///
    /// Questions are matched by item id. Any item whose canonical roots
    /// differ is reported as drift; choice layouts are ignored since they
    /// depend on the seed.
    pub fn compare(&self, baseline: &QuizReport) -> DriftReport {
        let answers = |report: &QuizReport| -> HashMap<String, (String, String)> {
            report
                .questions
                .iter()
                .filter_map(|q| q.item_id.clone().map(|id| (id, q.roots())))
                .collect()
        };

        let baseline_answers = answers(baseline);
        let current_answers = answers(self);

        let mut drifted = Vec::new();
        let mut unchanged = 0usize;
        let mut new_items = 0usize;

        for (item_id, current) in &current_answers {
            match baseline_answers.get(item_id) {
                Some(base) if base == current => unchanged += 1,
                Some(base) => drifted.push(AnswerDrift {
                    item_id: item_id.clone(),
                    baseline: base.clone(),
                    current: current.clone(),
                }),
                None => new_items += 1,
            }
        }
        drifted.sort_by(|x, y| x.item_id.cmp(&y.item_id));

        let removed_items = baseline_answers
            .keys()
            .filter(|k| !current_answers.contains_key(*k))
            .count();

        DriftReport {
            drifted,
            unchanged,
            new_items,
            removed_items,
        }
    }
}

/// Result of comparing two reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DriftReport {
    /// Items whose correct answer changed.
    pub drifted: Vec<AnswerDrift>,
    /// Items with identical answers.
    pub unchanged: usize,
    /// Items in current but not baseline.
    pub new_items: usize,
    /// Items in baseline but not current.
    pub removed_items: usize,
}

/// One item whose canonical roots changed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerDrift {
    pub item_id: String,
    pub baseline: (String, String),
    pub current: (String, String),
}

impl DriftReport {
    pub fn has_drift(&self) -> bool {
        !self.drifted.is_empty()
    }
}
