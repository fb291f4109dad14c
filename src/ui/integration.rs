use crate::quadrature::Integrator;

/// Render a computed integral into a single-line summary.
pub fn integration_summary(integrator: &Integrator, value: f64) -> String {
    format!(
        "integral of {} from {} to {} ({}, n = {}) = {value}",
        integrator.expression(),
        integrator.start(),
        integrator.end(),
        integrator.rule(),
        integrator.intervals()
    )
}
