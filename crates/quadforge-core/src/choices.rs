//! Multiple-choice assembly.
//!
//! Places the correct answer and three distractors into slots A–D with a
//! uniform permutation drawn from a caller-supplied generator, so the same
//! seed always yields the same layout.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::distractor::{Distractor, MistakeModel};
use crate::error::{ChoiceError, SolveError};
use crate::model::{choice_text, ChoiceSet, Letter, SolutionPair};

/// Default cap on how many distractor candidates are examined per question.
pub const DEFAULT_MAX_ATTEMPTS: usize = 16;

/// Assembled options plus the mistake model behind every wrong slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assembly {
    pub choices: ChoiceSet,
    /// `None` marks the correct slot.
    pub slot_models: [Option<MistakeModel>; 4],
    /// Candidates examined before three distinct distractors were found.
    pub attempts: usize,
}

/// Shuffle the correct pair and three distractor pairs into slots A–D.
///
/// Each pair is rendered as option text first. Fails with
/// [`ChoiceError::DuplicateChoice`] if any two options read the same.
pub fn assemble_choices<R: Rng + ?Sized>(
    correct: &(String, String),
    distractors: &[(String, String); 3],
    rng: &mut R,
) -> Result<(Letter, [String; 4]), ChoiceError> {
    let option = |(x1, x2): &(String, String)| choice_text(x1, x2);
    let texts = [
        option(correct),
        option(&distractors[0]),
        option(&distractors[1]),
        option(&distractors[2]),
    ];
    ensure_distinct(&texts)?;
    let (choices, order) = shuffle_slots(texts, rng);
    Ok((correct_letter(&order), choices))
}

/// Assemble choices, replacing colliding distractors from `fallbacks`.
///
/// Candidates are examined in order (the three primary distractors first)
/// and any whose text matches the correct answer or an already accepted
/// distractor is skipped. At most `max_attempts` candidates are examined.
pub fn assemble_unique<R, I>(
    correct: &SolutionPair,
    primary: [Distractor; 3],
    fallbacks: I,
    max_attempts: usize,
    rng: &mut R,
) -> Result<Assembly, ChoiceError>
where
    R: Rng + ?Sized,
    I: IntoIterator<Item = Result<Distractor, SolveError>>,
{
    let correct_text = correct.choice_text();
    let mut seen = HashSet::from([correct_text.clone()]);
    let mut accepted: Vec<(String, MistakeModel)> = Vec::with_capacity(3);
    let mut attempts = 0usize;

    let candidates = primary.into_iter().map(Ok).chain(fallbacks);
    for candidate in candidates {
        if accepted.len() == 3 || attempts >= max_attempts {
            break;
        }
        attempts += 1;

        match candidate {
            Ok(distractor) => {
                let text = distractor.pair.choice_text();
                if seen.insert(text.clone()) {
                    accepted.push((text, distractor.model));
                } else {
                    tracing::debug!(
                        model = %distractor.model,
                        %text,
                        "distractor collides with an existing choice"
                    );
                }
            }
            Err(e) => {
                tracing::warn!("skipping distractor candidate: {e}");
            }
        }
    }

    let [(t1, m1), (t2, m2), (t3, m3)]: [(String, MistakeModel); 3] = accepted
        .try_into()
        .map_err(|_| ChoiceError::Exhausted { attempts })?;

    if attempts > 3 {
        tracing::debug!(
            attempts,
            correct = %correct_text,
            "needed fallback distractors to reach 3 distinct choices"
        );
    }

    let models = [None, Some(m1), Some(m2), Some(m3)];
    let (choices, order) = shuffle_slots([correct_text, t1, t2, t3], rng);

    Ok(Assembly {
        choices: ChoiceSet {
            correct: correct_letter(&order),
            choices,
        },
        slot_models: order.map(|original| models[original]),
        attempts,
    })
}

fn ensure_distinct(texts: &[String; 4]) -> Result<(), ChoiceError> {
    let mut seen = HashSet::new();
    for text in texts {
        if !seen.insert(text.as_str()) {
            return Err(ChoiceError::DuplicateChoice(text.clone()));
        }
    }
    Ok(())
}

/// Fisher–Yates permutation of the four texts. `order[slot]` is the index
/// the slot's text had before shuffling; index 0 is the correct answer.
fn shuffle_slots<R: Rng + ?Sized>(texts: [String; 4], rng: &mut R) -> ([String; 4], [usize; 4]) {
    let mut order = [0usize, 1, 2, 3];
    order.shuffle(rng);
    let choices = order.map(|original| texts[original].clone());
    (choices, order)
}

fn correct_letter(order: &[usize; 4]) -> Letter {
    order
        .iter()
        .position(|&original| original == 0)
        .and_then(Letter::from_index)
        .unwrap_or(Letter::A)
}
