use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{QuadError, Result};
use crate::expr::Expression;

use super::partition::Partition;

/// Area of one subinterval `[x, x + delta_x]` under `f`.
pub type Contribution = fn(f64, &Expression, f64) -> Result<f64>;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Rule {
    #[serde(alias = "left-riemann")]
    Left,
    #[serde(alias = "right-riemann")]
    Right,
    Midpoint,
    #[serde(alias = "trapezoid")]
    Trapezoidal,
    #[serde(alias = "simpsons")]
    Simpson,
}

impl Rule {
    pub const ALL: [Rule; 5] = [
        Rule::Left,
        Rule::Right,
        Rule::Midpoint,
        Rule::Trapezoidal,
        Rule::Simpson,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Rule::Left => "left",
            Rule::Right => "right",
            Rule::Midpoint => "midpoint",
            Rule::Trapezoidal => "trapezoidal",
            Rule::Simpson => "simpson",
        }
    }

    /// Reject interval counts the rule cannot work with.
    pub fn validate(self, intervals: usize) -> Result<()> {
        if intervals == 0 {
            return Err(QuadError::configuration(format!(
                "{} rule needs a positive interval count",
                self.name()
            )));
        }
        if self == Rule::Simpson && intervals % 2 != 0 {
            return Err(QuadError::configuration(format!(
                "simpson rule needs an even interval count, got {intervals}"
            )));
        }
        Ok(())
    }

    /// The per-subinterval formula, or `None` for Simpson's rule, which
    /// weights partition points across neighbouring subintervals.
    pub fn contribution(self) -> Option<Contribution> {
        match self {
            Rule::Left => Some(left),
            Rule::Right => Some(right),
            Rule::Midpoint => Some(midpoint),
            Rule::Trapezoidal => Some(trapezoidal),
            Rule::Simpson => None,
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Rule {
    type Err = QuadError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "left" | "left-riemann" => Ok(Rule::Left),
            "right" | "right-riemann" => Ok(Rule::Right),
            "midpoint" => Ok(Rule::Midpoint),
            "trapezoidal" | "trapezoid" => Ok(Rule::Trapezoidal),
            "simpson" | "simpsons" => Ok(Rule::Simpson),
            other => Err(QuadError::UnknownRule(other.to_string())),
        }
    }
}

fn left(x: f64, f: &Expression, delta_x: f64) -> Result<f64> {
    Ok(f.evaluate(x)? * delta_x)
}

fn right(x: f64, f: &Expression, delta_x: f64) -> Result<f64> {
    Ok(f.evaluate(x + delta_x)? * delta_x)
}

fn midpoint(x: f64, f: &Expression, delta_x: f64) -> Result<f64> {
    Ok(f.evaluate(x + delta_x / 2.0)? * delta_x)
}

fn trapezoidal(x: f64, f: &Expression, delta_x: f64) -> Result<f64> {
    Ok((f.evaluate(x)? + f.evaluate(x + delta_x)?) * delta_x / 2.0)
}

/// Composite Simpson sum `(f(x_0) + 4 * odd + 2 * even interior + f(x_n)) * delta_x / 3`.
///
/// The interval count must already be validated as even.
pub(super) fn composite_simpson(partition: Partition, f: &Expression) -> Result<f64> {
    let n = partition.intervals();
    let delta_x = partition.delta_x();
    let last = partition.point(n);
    let ends = finite_at(f.evaluate(partition.point(0))? + f.evaluate(last)?, last)?;

    let mut odd = 0.0;
    let mut even = 0.0;
    for (i, x) in partition.enumerate().skip(1) {
        if i % 2 == 1 {
            odd = finite_at(odd + f.evaluate(x)?, x)?;
        } else {
            even = finite_at(even + f.evaluate(x)?, x)?;
        }
    }

    finite_at((ends + 4.0 * odd + 2.0 * even) * delta_x / 3.0, last)
}

/// Reject a partial sum that overflowed while accumulating at `x`.
pub(super) fn finite_at(value: f64, x: f64) -> Result<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(QuadError::Overflow { x })
    }
}
