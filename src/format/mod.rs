//! Formatting helpers for rendering expressions and integration output.

pub mod expr;
pub mod integrate;

pub use expr::pretty;
pub use integrate::pretty_integration_result;
