//! quadforge-core: exact-form quadratic solving and multiple-choice assembly.
//!
//! This crate turns integer coefficients `(a, b, c)` into exact canonical
//! roots, misconception-based distractors and a shuffled, lettered answer
//! key. Everything is pure and synchronous; the only randomness is the
//! choice permutation, drawn from a generator the caller supplies.

pub mod choices;
pub mod config;
pub mod discriminant;
pub mod distractor;
pub mod engine;
pub mod equation;
pub mod error;
pub mod evaluate;
pub mod fraction;
pub mod model;
pub mod parser;
pub mod radical;
pub mod report;
pub mod solver;
pub mod statistics;

pub use choices::{assemble_choices, assemble_unique};
pub use distractor::{generate_distractors, primary_distractors};
pub use error::{ChoiceError, QuestionError, SolveError};
pub use model::{ChoiceSet, Coefficients, Letter, RootValue, SolutionPair};
pub use solver::{format, solve};
