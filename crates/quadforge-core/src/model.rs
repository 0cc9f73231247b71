//! Core data model types for quadforge.
//!
//! Coefficients go in, exact roots and lettered choices come out. Every
//! value here is immutable and lives only for the call that produced it.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::fraction::reduce;

/// Integer coefficients of `ax² + bx + c = 0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Coefficients {
    pub a: i64,
    pub b: i64,
    pub c: i64,
}

impl Coefficients {
    pub fn new(a: i64, b: i64, c: i64) -> Self {
        Self { a, b, c }
    }
}

impl fmt::Display for Coefficients {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(a={}, b={}, c={})", self.a, self.b, self.c)
    }
}

/// An exact real root in lowest terms.
///
/// The variant is decided once, at construction, so rendering never has to
/// guess which shape it is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RootValue {
    /// A whole number.
    Integer(i64),
    /// `num / den` with `den > 1` and `gcd(|num|, den) = 1`.
    Fraction { num: i64, den: i64 },
    /// `(constant + coef·√radicand) / den`.
    ///
    /// `den > 0`, `radicand > 1` and squarefree, `coef ≠ 0`, and
    /// `gcd(|constant|, |coef|, den) = 1`. The sign of the radical term lives
    /// on `coef`.
    Radical {
        constant: i64,
        coef: i64,
        radicand: u64,
        den: i64,
    },
}

impl RootValue {
    /// Build a rational root from an unreduced `num / den`.
    pub fn rational(num: i64, den: i64) -> Self {
        match reduce(num, den) {
            (n, 1) => RootValue::Integer(n),
            (n, d) => RootValue::Fraction { num: n, den: d },
        }
    }

    /// Numeric value, for ordering and for checking renderings.
    pub fn to_f64(&self) -> f64 {
        match *self {
            RootValue::Integer(n) => n as f64,
            RootValue::Fraction { num, den } => num as f64 / den as f64,
            RootValue::Radical {
                constant,
                coef,
                radicand,
                den,
            } => (constant as f64 + coef as f64 * (radicand as f64).sqrt()) / den as f64,
        }
    }

    pub fn is_negative(&self) -> bool {
        match *self {
            RootValue::Integer(n) => n < 0,
            RootValue::Fraction { num, .. } => num < 0,
            RootValue::Radical { .. } => self.to_f64() < 0.0,
        }
    }

    /// The additive inverse, still in lowest terms.
    pub fn negate(&self) -> Self {
        match *self {
            RootValue::Integer(n) => RootValue::Integer(-n),
            RootValue::Fraction { num, den } => RootValue::Fraction { num: -num, den },
            RootValue::Radical {
                constant,
                coef,
                radicand,
                den,
            } => RootValue::Radical {
                constant: -constant,
                coef: -coef,
                radicand,
                den,
            },
        }
    }

    pub fn abs(&self) -> Self {
        if self.is_negative() {
            self.negate()
        } else {
            *self
        }
    }

    /// Toggle the sign of the leading rendered term only.
    ///
    /// For rational roots that is the whole value. For radicals it is the
    /// constant term, or the radical term when the constant is zero:
    /// `-2+√3` becomes `2+√3`, `-√5/2` becomes `√5/2`.
    pub fn flip_leading_sign(&self) -> Self {
        match *self {
            RootValue::Radical {
                constant: 0,
                coef,
                radicand,
                den,
            } => RootValue::Radical {
                constant: 0,
                coef: -coef,
                radicand,
                den,
            },
            RootValue::Radical {
                constant,
                coef,
                radicand,
                den,
            } => RootValue::Radical {
                constant: -constant,
                coef,
                radicand,
                den,
            },
            rational => rational.negate(),
        }
    }

    /// Numeric comparison, exact wherever both sides allow it.
    pub fn compare(&self, other: &Self) -> Ordering {
        if let (Some((n1, d1)), Some((n2, d2))) = (self.as_ratio(), other.as_ratio()) {
            return (n1 as i128 * d2 as i128).cmp(&(n2 as i128 * d1 as i128));
        }
        if let (
            RootValue::Radical {
                constant: c1,
                coef: k1,
                radicand: r1,
                den: d1,
            },
            RootValue::Radical {
                constant: c2,
                coef: k2,
                radicand: r2,
                den: d2,
            },
        ) = (self, other)
        {
            // Conjugates: only the radical term differs.
            if c1 == c2 && r1 == r2 && d1 == d2 {
                return k1.cmp(k2);
            }
        }
        self.to_f64().total_cmp(&other.to_f64())
    }

    fn as_ratio(&self) -> Option<(i64, i64)> {
        match *self {
            RootValue::Integer(n) => Some((n, 1)),
            RootValue::Fraction { num, den } => Some((num, den)),
            RootValue::Radical { .. } => None,
        }
    }
}

impl fmt::Display for RootValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            RootValue::Integer(n) => write!(f, "{n}"),
            RootValue::Fraction { num, den } => write!(f, "{num}/{den}"),
            RootValue::Radical {
                constant,
                coef,
                radicand,
                den,
            } => {
                let term = if coef.unsigned_abs() == 1 {
                    format!("√{radicand}")
                } else {
                    format!("{}√{radicand}", coef.unsigned_abs())
                };
                let sign = if coef < 0 { "-" } else { "+" };
                match (constant, den) {
                    (0, 1) if coef < 0 => write!(f, "-{term}"),
                    (0, 1) => write!(f, "{term}"),
                    (0, _) if coef < 0 => write!(f, "-{term}/{den}"),
                    (0, _) => write!(f, "{term}/{den}"),
                    (_, 1) => write!(f, "{constant}{sign}{term}"),
                    _ => write!(f, "({constant}{sign}{term})/{den}"),
                }
            }
        }
    }
}

/// The two roots of one equation, smaller first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SolutionPair {
    pub x1: RootValue,
    pub x2: RootValue,
}

impl SolutionPair {
    /// Order two roots so that `x1 ≤ x2` numerically.
    pub fn new(r1: RootValue, r2: RootValue) -> Self {
        if r1.compare(&r2) == Ordering::Greater {
            Self { x1: r2, x2: r1 }
        } else {
            Self { x1: r1, x2: r2 }
        }
    }

    pub fn is_double_root(&self) -> bool {
        self.x1 == self.x2
    }

    /// The two canonical renderings, ascending.
    pub fn format(&self) -> (String, String) {
        (self.x1.to_string(), self.x2.to_string())
    }

    /// Text shown as a multiple-choice option.
    pub fn choice_text(&self) -> String {
        let (x1, x2) = self.format();
        choice_text(&x1, &x2)
    }
}

/// Join two rendered roots into option text: `x = r1 or x = r2`, or `x = r`
/// when both renderings agree.
pub fn choice_text(x1: &str, x2: &str) -> String {
    if x1 == x2 {
        format!("x = {x1}")
    } else {
        format!("x = {x1} or x = {x2}")
    }
}

impl fmt::Display for SolutionPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x1, self.x2)
    }
}

/// A multiple-choice option letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Letter {
    A,
    B,
    C,
    D,
}

impl Letter {
    pub const ALL: [Letter; 4] = [Letter::A, Letter::B, Letter::C, Letter::D];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Letter> {
        Self::ALL.get(index).copied()
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Letter::A => write!(f, "A"),
            Letter::B => write!(f, "B"),
            Letter::C => write!(f, "C"),
            Letter::D => write!(f, "D"),
        }
    }
}

impl FromStr for Letter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "A" => Ok(Letter::A),
            "B" => Ok(Letter::B),
            "C" => Ok(Letter::C),
            "D" => Ok(Letter::D),
            other => Err(format!("unknown choice letter: {other}")),
        }
    }
}

/// Four lettered options with exactly one correct slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceSet {
    pub correct: Letter,
    pub choices: [String; 4],
}

impl ChoiceSet {
    pub fn text(&self, letter: Letter) -> &str {
        &self.choices[letter.index()]
    }

    pub fn correct_text(&self) -> &str {
        self.text(self.correct)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Letter, &str)> {
        Letter::ALL
            .into_iter()
            .zip(self.choices.iter().map(String::as_str))
    }
}

/// One practice item requested by a template generator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    /// Unique identifier within its item set.
    pub id: String,
    /// The equation to solve.
    pub coefficients: Coefficients,
    /// Question text shown above the equation.
    #[serde(default)]
    pub prompt: Option<String>,
    /// Tags for filtering items.
    #[serde(default)]
    pub tags: Vec<String>,
}

/// A collection of items generated together.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSet {
    /// Unique identifier for this item set.
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Description of this item set.
    #[serde(default)]
    pub description: String,
    /// Seed for reproducible choice layouts.
    #[serde(default)]
    pub seed: Option<u64>,
    /// The items in this set.
    #[serde(default)]
    pub items: Vec<Item>,
}

/// Prompt used when an item does not carry its own.
pub const DEFAULT_PROMPT: &str = "Solve the equation. Give both roots in exact form.";
