use std::f64::consts::E;

use crate::error::{QuadError, Result};
use crate::expr::{BinaryOp, Expr, Function};

/// Evaluate `expr` with the integration variable bound to `x`.
///
/// Undefined points are reported as errors instead of NaN or infinity.
pub fn evaluate(expr: &Expr, x: f64) -> Result<f64> {
    Evaluator { x }.eval(expr)
}

struct Evaluator {
    x: f64,
}

impl Evaluator {
    fn eval(&self, expr: &Expr) -> Result<f64> {
        match expr {
            Expr::Literal(value) => Ok(*value),
            Expr::Euler => Ok(E),
            Expr::Variable => Ok(self.x),
            Expr::Neg(a) => Ok(-self.eval(a)?),
            Expr::Binary(op, a, b) => {
                let lhs = self.eval(a)?;
                let rhs = self.eval(b)?;
                self.binary(*op, lhs, rhs)
            }
            Expr::Call(function, a) => {
                let arg = self.eval(a)?;
                self.call(*function, arg)
            }
        }
    }

    fn binary(&self, op: BinaryOp, lhs: f64, rhs: f64) -> Result<f64> {
        let value = match op {
            BinaryOp::Add => lhs + rhs,
            BinaryOp::Sub => lhs - rhs,
            BinaryOp::Mul => lhs * rhs,
            BinaryOp::Div => {
                if rhs == 0.0 {
                    return Err(QuadError::DivisionByZero { x: self.x });
                }
                lhs / rhs
            }
            BinaryOp::Pow => {
                if lhs == 0.0 && rhs < 0.0 {
                    return Err(QuadError::DivisionByZero { x: self.x });
                }
                let value = lhs.powf(rhs);
                if value.is_nan() {
                    return Err(QuadError::Domain {
                        function: "^",
                        argument: lhs,
                        x: self.x,
                    });
                }
                value
            }
        };
        self.finite(value)
    }

    fn call(&self, function: Function, arg: f64) -> Result<f64> {
        let value = match function {
            Function::Ln => {
                self.require(function, arg, arg > 0.0)?;
                arg.ln()
            }
            Function::Sqrt => {
                self.require(function, arg, arg >= 0.0)?;
                arg.sqrt()
            }
            Function::Exp => arg.exp(),
            Function::Sin => arg.sin(),
            Function::Cos => arg.cos(),
            Function::Tan => arg.tan(),
            Function::Abs => arg.abs(),
        };
        self.finite(value)
    }

    fn require(&self, function: Function, argument: f64, holds: bool) -> Result<()> {
        if holds {
            Ok(())
        } else {
            Err(QuadError::Domain {
                function: function.name(),
                argument,
                x: self.x,
            })
        }
    }

    // Operands are always finite here, so a non-finite result is an overflow.
    fn finite(&self, value: f64) -> Result<f64> {
        if value.is_finite() {
            Ok(value)
        } else {
            Err(QuadError::Overflow { x: self.x })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{call, div, pow, sub};

    #[test]
    fn zero_to_negative_power_is_division_by_zero() {
        let expr = pow(Expr::Variable, Expr::Literal(-1.0));
        assert!(matches!(
            evaluate(&expr, 0.0),
            Err(QuadError::DivisionByZero { .. })
        ));
        assert_eq!(evaluate(&expr, 4.0).unwrap(), 0.25);
    }

    #[test]
    fn fractional_power_of_negative_base_is_domain_error() {
        let expr = pow(Expr::Variable, Expr::Literal(0.5));
        match evaluate(&expr, -4.0) {
            Err(QuadError::Domain { function, argument, x }) => {
                assert_eq!(function, "^");
                assert_eq!(argument, -4.0);
                assert_eq!(x, -4.0);
            }
            other => panic!("expected domain error, got {other:?}"),
        }
    }

    #[test]
    fn overflow_is_reported() {
        let expr = call(Function::Exp, Expr::Variable);
        assert!(matches!(
            evaluate(&expr, 1000.0),
            Err(QuadError::Overflow { .. })
        ));
    }

    #[test]
    fn nan_from_nested_division_never_escapes() {
        let expr = div(Expr::Literal(1.0), sub(Expr::Variable, Expr::Variable));
        assert!(evaluate(&expr, 3.0).is_err());
    }
}
