//! Question generation pipeline.
//!
//! Runs solve → distractors → choice assembly for a single equation or for
//! every item in an item set. Generation is synchronous and all randomness
//! comes from the generator handle passed in by the caller.

use std::time::{Duration, Instant};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::choices::{assemble_unique, DEFAULT_MAX_ATTEMPTS};
use crate::discriminant::{classify, Discriminant};
use crate::distractor::{fallback_distractors, primary_distractors, MistakeModel};
use crate::equation::render_equation;
use crate::error::QuestionError;
use crate::model::{ChoiceSet, Coefficients, Item, ItemSet, SolutionPair, DEFAULT_PROMPT};
use crate::report::{ItemFailure, ItemSetSummary, QuizReport};
use crate::solver::solve_discriminant;
use crate::statistics::compute_batch_stats;

/// Configuration for the question generator.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Cap on distractor candidates examined per question.
    pub max_choice_attempts: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            max_choice_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

/// A complete multiple-choice question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Question {
    /// Identifier drawn from the generator, so it is reproducible too.
    pub id: Uuid,
    /// The item this question was generated from, if any.
    #[serde(default)]
    pub item_id: Option<String>,
    pub coefficients: Coefficients,
    /// Rendered equation, e.g. `x² + 6x + 5 = 0`.
    pub equation: String,
    pub prompt: String,
    pub discriminant: Discriminant,
    /// Exact roots, ascending.
    pub solution: SolutionPair,
    pub choices: ChoiceSet,
    /// Mistake model behind each slot; `None` marks the correct one.
    pub slot_models: [Option<MistakeModel>; 4],
    /// Distractor candidates examined.
    pub distractor_attempts: usize,
}

impl Question {
    /// Canonical renderings of the two roots.
    pub fn roots(&self) -> (String, String) {
        self.solution.format()
    }
}

/// Progress reporting trait.
pub trait ProgressReporter {
    fn on_item_complete(&self, question: &Question);
    fn on_item_error(&self, item_id: &str, error: &QuestionError);
    fn on_set_complete(&self, total: usize, completed: usize, failed: usize, elapsed: Duration);
}

/// No-op progress reporter.
pub struct NoopReporter;

impl ProgressReporter for NoopReporter {
    fn on_item_complete(&self, _: &Question) {}
    fn on_item_error(&self, _: &str, _: &QuestionError) {}
    fn on_set_complete(&self, _: usize, _: usize, _: usize, _: Duration) {}
}

/// Builds questions from coefficients.
#[derive(Debug, Clone, Default)]
pub struct QuestionGenerator {
    config: GeneratorConfig,
}

impl QuestionGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    /// Generate one question for `ax² + bx + c = 0`.
    ///
    /// Fails before producing any output if the coefficients have no real
    /// roots or no distinct distractors can be found.
    pub fn generate<R: Rng + ?Sized>(
        &self,
        coefficients: Coefficients,
        rng: &mut R,
    ) -> Result<Question, QuestionError> {
        self.build(coefficients, None, None, rng)
    }

    /// Generate the question for one item of an item set.
    pub fn generate_item<R: Rng + ?Sized>(
        &self,
        item: &Item,
        rng: &mut R,
    ) -> Result<Question, QuestionError> {
        self.build(
            item.coefficients,
            Some(item.id.clone()),
            item.prompt.clone(),
            rng,
        )
    }

    fn build<R: Rng + ?Sized>(
        &self,
        coefficients: Coefficients,
        item_id: Option<String>,
        prompt: Option<String>,
        rng: &mut R,
    ) -> Result<Question, QuestionError> {
        let Coefficients { a, b, .. } = coefficients;
        let discriminant = classify(coefficients)?;
        let solution = solve_discriminant(a, b, discriminant.value)?;
        let primary = primary_distractors(a, b, discriminant.value, &solution)?;

        let assembly = assemble_unique(
            &solution,
            primary,
            fallback_distractors(a, b, discriminant.value),
            self.config.max_choice_attempts,
            rng,
        )?;

        let id = uuid::Builder::from_random_bytes(rng.gen()).into_uuid();
        tracing::debug!(
            %coefficients,
            discriminant = discriminant.value,
            kind = discriminant.kind.label(),
            correct = %assembly.choices.correct,
            "generated question"
        );

        Ok(Question {
            id,
            item_id,
            coefficients,
            equation: render_equation(coefficients),
            prompt: prompt.unwrap_or_else(|| DEFAULT_PROMPT.to_string()),
            discriminant,
            solution,
            choices: assembly.choices,
            slot_models: assembly.slot_models,
            distractor_attempts: assembly.attempts,
        })
    }

    /// Generate every item of `item_set` with a generator seeded by `seed`.
    ///
    /// Items are processed in order. A failing item is logged, reported and
    /// recorded in the report; it does not stop the batch.
    pub fn generate_set(
        &self,
        item_set: &ItemSet,
        seed: u64,
        progress: &dyn ProgressReporter,
    ) -> QuizReport {
        let start = Instant::now();
        let mut rng = ChaCha20Rng::seed_from_u64(seed);

        let mut questions = Vec::with_capacity(item_set.items.len());
        let mut failures = Vec::new();

        for item in &item_set.items {
            match self.generate_item(item, &mut rng) {
                Ok(question) => {
                    progress.on_item_complete(&question);
                    questions.push(question);
                }
                Err(e) => {
                    tracing::error!("item {} {} failed: {e}", item.id, item.coefficients);
                    progress.on_item_error(&item.id, &e);
                    failures.push(ItemFailure {
                        item_id: item.id.clone(),
                        coefficients: item.coefficients,
                        error: e.to_string(),
                        resample: e.is_resample(),
                    });
                }
            }
        }

        let elapsed = start.elapsed();
        progress.on_set_complete(
            item_set.items.len(),
            questions.len(),
            failures.len(),
            elapsed,
        );

        let stats = compute_batch_stats(&questions);

        QuizReport {
            id: Uuid::new_v4(),
            created_at: chrono::Utc::now(),
            item_set: ItemSetSummary {
                id: item_set.id.clone(),
                name: item_set.name.clone(),
                item_count: item_set.items.len(),
            },
            seed,
            questions,
            failures,
            stats,
            duration_ms: elapsed.as_millis() as u64,
        }
    }
}
