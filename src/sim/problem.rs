//! Arithmetic problem generation
//!
//! Problems are a pure function of the level, the ruleset and the random
//! source. Operands are bounded so every result fits comfortably in an i64.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Largest base an exponentiation problem may use
pub const MAX_POW_BASE: i64 = 10;
/// Largest exponent an exponentiation problem may use
pub const MAX_POW_EXPONENT: i64 = 3;

/// Arithmetic operators a challenge can use
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    Add,
    Sub,
    Mul,
    Div,
    Rem,
    Pow,
}

impl Operator {
    pub fn symbol(&self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Sub => "-",
            Operator::Mul => "*",
            Operator::Div => "/",
            Operator::Rem => "%",
            Operator::Pow => "^",
        }
    }

    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "+" => Some(Operator::Add),
            "-" => Some(Operator::Sub),
            "*" => Some(Operator::Mul),
            "/" => Some(Operator::Div),
            "%" => Some(Operator::Rem),
            "^" => Some(Operator::Pow),
            _ => None,
        }
    }

    /// Compute `lhs op rhs`.
    ///
    /// Division truncates toward zero. Division and remainder treat a zero
    /// divisor as 1, and exponentiation treats a negative exponent as 0, so
    /// this never panics on the operands the generator produces.
    pub fn apply(&self, lhs: i64, rhs: i64) -> i64 {
        match self {
            Operator::Add => lhs + rhs,
            Operator::Sub => lhs - rhs,
            Operator::Mul => lhs * rhs,
            Operator::Div => lhs / nonzero(rhs),
            Operator::Rem => lhs % nonzero(rhs),
            Operator::Pow => lhs.pow(rhs.max(0) as u32),
        }
    }

    /// Points awarded for a correct answer
    pub fn reward(&self) -> u32 {
        match self {
            Operator::Add | Operator::Sub => 5,
            Operator::Mul | Operator::Div => 10,
            Operator::Rem | Operator::Pow => 15,
        }
    }

    /// Health lost for a wrong answer
    pub fn penalty(&self) -> u32 {
        5 + self.reward() / 2
    }

    /// Whether a correct answer earns the screen-wide bonus burst
    pub fn is_bonus(&self) -> bool {
        matches!(self, Operator::Rem | Operator::Pow)
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[inline]
fn nonzero(n: i64) -> i64 {
    if n == 0 { 1 } else { n }
}

/// Which operators the generator may pick from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OperatorSet {
    /// + - * /
    Basic,
    /// + - * / % ^
    #[default]
    Extended,
}

impl OperatorSet {
    pub fn operators(&self) -> &'static [Operator] {
        match self {
            OperatorSet::Basic => &[Operator::Add, Operator::Sub, Operator::Mul, Operator::Div],
            OperatorSet::Extended => &[
                Operator::Add,
                Operator::Sub,
                Operator::Mul,
                Operator::Div,
                Operator::Rem,
                Operator::Pow,
            ],
        }
    }
}

/// How operand magnitude relates to the level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum OperandRange {
    /// Always [1, 10]
    Fixed,
    /// [1, 5 + level * 5]
    #[default]
    Scaled,
}

impl OperandRange {
    /// Inclusive upper bound for operands at this level
    pub fn max_operand(&self, level: u32) -> i64 {
        match self {
            OperandRange::Fixed => 10,
            OperandRange::Scaled => 5 + level.max(1) as i64 * 5,
        }
    }
}

/// Generator configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProblemRules {
    #[serde(default)]
    pub operators: OperatorSet,
    #[serde(default)]
    pub operands: OperandRange,
}

/// A single arithmetic challenge
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    pub operator: Operator,
    pub lhs: i64,
    pub rhs: i64,
    pub answer: i64,
    pub reward: u32,
    pub penalty: u32,
}

impl Problem {
    /// Build a problem from its operands, applying the operand guards
    pub fn new(operator: Operator, lhs: i64, rhs: i64) -> Self {
        let (lhs, rhs) = match operator {
            Operator::Div | Operator::Rem => (lhs, nonzero(rhs)),
            Operator::Pow => (lhs.min(MAX_POW_BASE), rhs.clamp(0, MAX_POW_EXPONENT)),
            _ => (lhs, rhs),
        };
        Self {
            operator,
            lhs,
            rhs,
            answer: operator.apply(lhs, rhs),
            reward: operator.reward(),
            penalty: operator.penalty(),
        }
    }

    /// Question text shown to the player
    pub fn question(&self) -> String {
        format!("{} {} {} = ?", self.lhs, self.operator, self.rhs)
    }

    /// Check a raw answer. Anything that is not an integer is wrong.
    pub fn is_correct(&self, raw: &str) -> bool {
        raw.trim().parse::<i64>().is_ok_and(|n| n == self.answer)
    }
}

/// Generate a random problem for the given level
pub fn generate<R: Rng + ?Sized>(level: u32, rules: &ProblemRules, rng: &mut R) -> Problem {
    let ops = rules.operators.operators();
    let operator = ops[rng.random_range(0..ops.len())];

    let max = rules.operands.max_operand(level);
    let lhs = rng.random_range(1..=max);
    let rhs = rng.random_range(1..=max);

    Problem::new(operator, lhs, rhs)
}
