//! Numerical integration of single-variable formulas.
//!
//! A formula such as `"2*x^3 - 5*x^2 - 4"` is parsed once into an
//! [`Expression`] and integrated with one of the fixed-step [`Rule`]s:
//! left and right Riemann sums, the midpoint and trapezoidal rules, and
//! composite Simpson's rule.
//!
//! ```
//! use rquad::{Integrator, Rule};
//!
//! let simpson = Integrator::from_formula(Rule::Simpson, 4.0, 6.0, 4, "(x^4) + x").unwrap();
//! assert!((simpson.integrate().unwrap() - 1360.4167).abs() < 1e-3);
//! ```

pub mod config;
pub mod error;
pub mod eval;
pub mod expr;
pub mod format;
pub mod parser;
pub mod prelude;
pub mod quadrature;
mod ui;

pub use config::IntegrationConfig;
pub use error::{ErrorKind, QuadError, Result};
pub use expr::{BinaryOp, Expr, Expression, Function, add, call, div, mul, neg, pow, sub};
pub use format::{pretty, pretty_integration_result};
pub use parser::parse_expr;
pub use quadrature::{Contribution, Integrator, Partition, Rule, integrate, sum_contributions};
