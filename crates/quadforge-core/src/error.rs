//! Engine error types.
//!
//! These errors are local to a single question-generation call. None of them
//! is process-fatal: the caller decides whether to re-sample coefficients.

use thiserror::Error;

/// Errors that can occur while solving `ax² + bx + c = 0` exactly.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SolveError {
    /// The leading coefficient is zero, so the equation is not quadratic.
    #[error("invalid coefficient: a must be non-zero")]
    InvalidCoefficient,

    /// The discriminant is negative, so there are no real roots.
    #[error("no real solution: discriminant {discriminant} is negative")]
    NoRealSolution { discriminant: i64 },

    /// An intermediate value does not fit in 64 bits.
    #[error("arithmetic overflow while {0}")]
    Overflow(&'static str),

    /// A canonical-form invariant was broken internally.
    #[error("internal invariant violated: {0}")]
    InvariantViolation(String),
}

impl SolveError {
    /// Returns `true` if the caller should draw new coefficients and retry.
    pub fn is_resample(&self) -> bool {
        matches!(
            self,
            SolveError::InvalidCoefficient
                | SolveError::NoRealSolution { .. }
                | SolveError::Overflow(_)
        )
    }
}

/// Errors raised while assembling the four multiple-choice options.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChoiceError {
    /// Two of the four options render to the same text.
    #[error("duplicate choice text: {0}")]
    DuplicateChoice(String),

    /// No set of distinct distractors was found within the attempt budget.
    #[error("could not find 3 distinct distractors after {attempts} attempts")]
    Exhausted { attempts: usize },
}

/// Any failure while building one complete question.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuestionError {
    #[error(transparent)]
    Solve(#[from] SolveError),

    #[error(transparent)]
    Choice(#[from] ChoiceError),
}

impl QuestionError {
    /// Returns `true` if new coefficients should be drawn.
    pub fn is_resample(&self) -> bool {
        match self {
            QuestionError::Solve(e) => e.is_resample(),
            QuestionError::Choice(_) => false,
        }
    }
}

/// Errors from evaluating a rendered root expression.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// The input ended where a value was expected.
    #[error("unexpected end of expression")]
    UnexpectedEnd,

    /// A character that does not belong in a root rendering.
    #[error("unexpected '{found}' at position {position}")]
    UnexpectedChar { found: char, position: usize },

    /// A digit run that does not fit in 64 bits.
    #[error("number too large at position {0}")]
    NumberTooLarge(usize),

    /// Division by zero or the square root of a negative number.
    #[error("expression has no real value")]
    Undefined,
}
