//! Expression tree definitions and helpers.

use std::fmt;
use std::str::FromStr;

use crate::error::{QuadError, Result};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum BinaryOp {
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

impl BinaryOp {
    pub fn symbol(self) -> char {
        match self {
            BinaryOp::Add => '+',
            BinaryOp::Sub => '-',
            BinaryOp::Mul => '*',
            BinaryOp::Div => '/',
            BinaryOp::Pow => '^',
        }
    }
}

/// Named single-argument functions accepted in formulas.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Function {
    Ln,
    Exp,
    Sqrt,
    Sin,
    Cos,
    Tan,
    Abs,
}

impl Function {
    pub const ALL: [Function; 7] = [
        Function::Ln,
        Function::Exp,
        Function::Sqrt,
        Function::Sin,
        Function::Cos,
        Function::Tan,
        Function::Abs,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Function::Ln => "ln",
            Function::Exp => "exp",
            Function::Sqrt => "sqrt",
            Function::Sin => "sin",
            Function::Cos => "cos",
            Function::Tan => "tan",
            Function::Abs => "abs",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Function::ALL.into_iter().find(|f| f.name() == name)
    }
}

#[derive(Clone, PartialEq, Debug)]
pub enum Expr {
    Literal(f64),
    /// Euler's number `e`.
    Euler,
    /// The integration variable `x`.
    Variable,
    Neg(Box<Expr>),
    Binary(BinaryOp, Box<Expr>, Box<Expr>),
    Call(Function, Box<Expr>),
}

impl Expr {
    pub fn boxed(self) -> Box<Self> {
        Box::new(self)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", crate::format::pretty(self))
    }
}

pub fn add(a: Expr, b: Expr) -> Expr {
    Expr::Binary(BinaryOp::Add, a.boxed(), b.boxed())
}

pub fn sub(a: Expr, b: Expr) -> Expr {
    Expr::Binary(BinaryOp::Sub, a.boxed(), b.boxed())
}

pub fn mul(a: Expr, b: Expr) -> Expr {
    Expr::Binary(BinaryOp::Mul, a.boxed(), b.boxed())
}

pub fn div(a: Expr, b: Expr) -> Expr {
    Expr::Binary(BinaryOp::Div, a.boxed(), b.boxed())
}

pub fn pow(base: Expr, exp: Expr) -> Expr {
    Expr::Binary(BinaryOp::Pow, base.boxed(), exp.boxed())
}

pub fn neg(a: Expr) -> Expr {
    Expr::Neg(a.boxed())
}

pub fn call(function: Function, arg: Expr) -> Expr {
    Expr::Call(function, arg.boxed())
}

/// A parsed formula in `x`, built once and evaluated many times.
///
/// Evaluation borrows the tree immutably, so one `Expression` can be shared
/// across threads and integrators without synchronisation.
#[derive(Clone, PartialEq, Debug)]
pub struct Expression {
    source: String,
    tree: Expr,
}

impl Expression {
    pub fn parse(text: &str) -> Result<Self> {
        let tree = crate::parser::parse_expr(text)?;
        log::debug!("parsed formula {text:?} as {tree}");
        Ok(Expression {
            source: text.to_string(),
            tree,
        })
    }

    /// Wrap an already built tree. The source text is its pretty-printed form.
    pub fn from_tree(tree: Expr) -> Self {
        Expression {
            source: crate::format::pretty(&tree),
            tree,
        }
    }

    pub fn evaluate(&self, x: f64) -> Result<f64> {
        crate::eval::evaluate(&self.tree, x)
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn tree(&self) -> &Expr {
        &self.tree
    }
}

impl FromStr for Expression {
    type Err = QuadError;

    fn from_str(s: &str) -> Result<Self> {
        Expression::parse(s)
    }
}

impl fmt::Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.tree, f)
    }
}
