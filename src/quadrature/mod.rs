//! Fixed-step quadrature over `[start, end]`.
//!
//! Every rule shares one driver: validate, partition the interval into equal
//! subintervals, and add up a per-subinterval contribution in index order.
//! Simpson's rule couples neighbouring subintervals and sums its weighted
//! points separately over the same partition.

mod partition;
mod rule;

use crate::error::{QuadError, Result};
use crate::expr::Expression;

pub use partition::Partition;
pub use rule::{Contribution, Rule};

/// Integrate `f` over `[start, end]` with `intervals` subintervals.
///
/// `start > end` is allowed and flips the sign of the result.
pub fn integrate(
    rule: Rule,
    start: f64,
    end: f64,
    intervals: usize,
    f: &Expression,
) -> Result<f64> {
    validate(rule, start, end, intervals)?;
    let partition = Partition::new(start, end, intervals);
    log::debug!(
        "integrating {f} with {rule} rule over [{start}, {end}], n = {intervals}, dx = {}",
        partition.delta_x()
    );
    match rule.contribution() {
        Some(contribution) => sum_contributions(partition, f, contribution),
        None => rule::composite_simpson(partition, f),
    }
}

/// Sum `contribution(x_i, f, delta_x)` over the partition, low index first.
///
/// The first failing evaluation aborts the sum, and so does a running sum
/// that overflows.
pub fn sum_contributions<C>(
    mut partition: Partition,
    f: &Expression,
    contribution: C,
) -> Result<f64>
where
    C: Fn(f64, &Expression, f64) -> Result<f64>,
{
    let delta_x = partition.delta_x();
    partition.try_fold(0.0, |sum, x| {
        rule::finite_at(sum + contribution(x, f, delta_x)?, x)
    })
}

fn validate(rule: Rule, start: f64, end: f64, intervals: usize) -> Result<()> {
    if !start.is_finite() || !end.is_finite() {
        return Err(QuadError::configuration(format!(
            "bounds must be finite, got [{start}, {end}]"
        )));
    }
    rule.validate(intervals)?;
    if !(end - start).is_finite() {
        return Err(QuadError::configuration(format!(
            "interval [{start}, {end}] is too wide"
        )));
    }
    Ok(())
}

/// A rule bound to a formula and integration parameters.
///
/// Parameters are validated on construction, so an `Integrator` for
/// Simpson's rule with an odd interval count can never exist. The instance
/// holds no state between calls and may be reused.
#[derive(Clone, Debug)]
pub struct Integrator {
    rule: Rule,
    start: f64,
    end: f64,
    intervals: usize,
    expression: Expression,
}

impl Integrator {
    pub fn new(
        rule: Rule,
        start: f64,
        end: f64,
        intervals: usize,
        expression: Expression,
    ) -> Result<Self> {
        validate(rule, start, end, intervals)?;
        Ok(Integrator {
            rule,
            start,
            end,
            intervals,
            expression,
        })
    }

    pub fn from_formula(
        rule: Rule,
        start: f64,
        end: f64,
        intervals: usize,
        formula: &str,
    ) -> Result<Self> {
        Integrator::new(rule, start, end, intervals, Expression::parse(formula)?)
    }

    pub fn integrate(&self) -> Result<f64> {
        integrate(
            self.rule,
            self.start,
            self.end,
            self.intervals,
            &self.expression,
        )
    }

    /// Integrate the same formula with the same rule over other parameters.
    pub fn integrate_over(&self, start: f64, end: f64, intervals: usize) -> Result<f64> {
        integrate(self.rule, start, end, intervals, &self.expression)
    }

    pub fn rule(&self) -> Rule {
        self.rule
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn intervals(&self) -> usize {
        self.intervals
    }

    pub fn expression(&self) -> &Expression {
        &self.expression
    }
}
