//! String-based convenience API for quick experimentation.

pub use crate::ui::{evaluate, inte, integrate, integrate_all, integration_summary, parse};
