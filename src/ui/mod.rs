//! String-based helpers for quick usage and rendering.

mod integration;

use crate::error::Result;
use crate::expr::Expression;
use crate::quadrature::{Integrator, Rule};

pub use integration::integration_summary;

pub fn parse(input: &str) -> Result<Expression> {
    Expression::parse(input)
}

pub fn evaluate(input: &str, x: f64) -> Result<f64> {
    parse(input)?.evaluate(x)
}

pub fn integrate(rule: Rule, input: &str, start: f64, end: f64, intervals: usize) -> Result<f64> {
    Integrator::from_formula(rule, start, end, intervals, input)?.integrate()
}

pub fn inte(rule: &str, input: &str, start: f64, end: f64, intervals: usize) -> Result<String> {
    let integrator = Integrator::from_formula(rule.parse()?, start, end, intervals, input)?;
    let value = integrator.integrate()?;
    Ok(integration_summary(&integrator, value))
}

/// Every rule applied to the same job, in [`Rule::ALL`] order.
pub fn integrate_all(
    input: &str,
    start: f64,
    end: f64,
    intervals: usize,
) -> Result<Vec<(Rule, Result<f64>)>> {
    let expression = parse(input)?;
    Ok(Rule::ALL
        .into_iter()
        .map(|rule| {
            let value = Integrator::new(rule, start, end, intervals, expression.clone())
                .and_then(|integrator| integrator.integrate());
            (rule, value)
        })
        .collect())
}
