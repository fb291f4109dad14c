use crate::error::{QuadError, Result};
use crate::quadrature::Integrator;

/// Render an integration and its outcome into human-friendly lines.
pub fn pretty_integration_result(integrator: &Integrator, result: &Result<f64>) -> Vec<String> {
    let mut lines = vec![
        format!("integrand: {}", integrator.expression()),
        format!(
            "rule: {} over [{}, {}] with {} intervals",
            integrator.rule(),
            integrator.start(),
            integrator.end(),
            integrator.intervals()
        ),
    ];
    match result {
        Ok(value) => lines.push(format!("value: {value}")),
        Err(err) => {
            lines.push("not computed".to_string());
            lines.push(format!("reason: {}", describe_error(err)));
        }
    }
    lines
}

fn describe_error(err: &QuadError) -> String {
    format!("{:?}: {err}", err.kind())
}
