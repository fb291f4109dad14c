use crate::expr::{BinaryOp, Expr};

// Binding strength of each printed form; higher binds tighter.
const SUM: u8 = 1;
const PRODUCT: u8 = 2;
const UNARY: u8 = 3;
const POWER: u8 = 4;
const ATOM: u8 = 5;

/// Render `expr` as infix text that parses back to the same tree.
pub fn pretty(expr: &Expr) -> String {
    fn pp(ctx: u8, expr: &Expr) -> String {
        match expr {
            Expr::Variable => "x".to_string(),
            Expr::Euler => "e".to_string(),
            Expr::Literal(v) if *v < 0.0 => bracket(ctx, UNARY, format!("-{}", -v)),
            Expr::Literal(v) => format!("{v}"),

            Expr::Binary(op @ (BinaryOp::Add | BinaryOp::Sub), a, b) => bracket(
                ctx,
                SUM,
                format!("{} {} {}", pp(SUM, a), op.symbol(), pp(PRODUCT, b)),
            ),

            Expr::Binary(op @ (BinaryOp::Mul | BinaryOp::Div), a, b) => bracket(
                ctx,
                PRODUCT,
                format!("{}{}{}", pp(PRODUCT, a), op.symbol(), pp(UNARY, b)),
            ),

            Expr::Binary(BinaryOp::Pow, a, b) => {
                bracket(ctx, POWER, format!("{}^{}", pp(ATOM, a), pp(UNARY, b)))
            }

            Expr::Neg(a) => bracket(ctx, UNARY, format!("-{}", pp(UNARY, a))),

            Expr::Call(function, a) => format!("{}({})", function.name(), pp(0, a)),
        }
    }

    pp(0, expr)
}

fn bracket(ctx: u8, prec: u8, body: String) -> String {
    if prec < ctx {
        format!("({body})")
    } else {
        body
    }
}
