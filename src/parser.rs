use std::cell::Cell;
use std::thread_local;

use crate::error::{QuadError, Result};
use crate::expr::{BinaryOp, Expr, Function};
use nom::IResult;
use nom::branch::alt;
use nom::character::complete::{alpha1, alphanumeric0, char, digit0, digit1, multispace0};
use nom::combinator::{all_consuming, cut, opt, recognize};
use nom::error::{ErrorKind, VerboseError, VerboseErrorKind, context};
use nom::sequence::{delimited, pair, terminated};

type ParseResult<'a, O> = IResult<&'a str, O, VerboseError<&'a str>>;
type Step<'a, O> = std::result::Result<O, nom::Err<VerboseError<&'a str>>>;

/// A parsed subtree together with its height (a leaf has height 1).
type Node = (Expr, usize);

const UNKNOWN_IDENTIFIER: &str = "unknown identifier";
const UNBALANCED: &str = "unbalanced parentheses";
const TOO_DEEP: &str = "expression nested too deeply";

/// Bound on both parser recursion and the height of the resulting tree, so
/// that parsing, evaluation and printing never exhaust the stack.
pub const MAX_DEPTH: usize = 128;

thread_local! {
    static NESTING: Cell<usize> = const { Cell::new(0) };
}

/// One level of parser recursion, released when dropped.
struct Nesting;

impl Nesting {
    fn enter(at: &str) -> Step<'_, Nesting> {
        let depth = NESTING.with(|nesting| {
            let depth = nesting.get() + 1;
            nesting.set(depth);
            depth
        });
        let guard = Nesting;
        if depth > MAX_DEPTH {
            return Err(failure(at, TOO_DEEP));
        }
        Ok(guard)
    }
}

impl Drop for Nesting {
    fn drop(&mut self) {
        NESTING.with(|nesting| nesting.set(nesting.get() - 1));
    }
}

/// Parse a formula in `x` into an expression tree.
///
/// Precedence from loosest to tightest: `+ -`, `* /`, unary minus, `^`.
/// `^` is right-associative and its exponent may carry a unary minus.
/// Formulas nested deeper than [`MAX_DEPTH`] are rejected.
pub fn parse_expr(input: &str) -> Result<Expr> {
    if input.trim().is_empty() {
        return Err(QuadError::Parse {
            offset: 0,
            message: "empty expression".to_string(),
        });
    }
    match all_consuming(ws(parse_add_sub))(input) {
        Ok((_, (expr, _))) => Ok(expr),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(describe(input, &e)),
        Err(nom::Err::Incomplete(_)) => Err(QuadError::Parse {
            offset: input.len(),
            message: "unexpected end of input".to_string(),
        }),
    }
}

fn parse_add_sub(input: &str) -> ParseResult<'_, Node> {
    parse_chain(input, ('+', BinaryOp::Add), ('-', BinaryOp::Sub), parse_mul_div)
}

fn parse_mul_div(input: &str) -> ParseResult<'_, Node> {
    parse_chain(input, ('*', BinaryOp::Mul), ('/', BinaryOp::Div), parse_unary)
}

// Left-associative run of `operand (op operand)*`. The spine grows one level
// per operator, so its height is checked as it is folded.
fn parse_chain<'a>(
    input: &'a str,
    first: (char, BinaryOp),
    second: (char, BinaryOp),
    operand: fn(&'a str) -> ParseResult<'a, Node>,
) -> ParseResult<'a, Node> {
    let (mut rest, mut acc) = operand(input)?;
    loop {
        let (after_op, symbol) = match ws(alt((char(first.0), char(second.0))))(rest) {
            Ok(found) => found,
            Err(nom::Err::Error(_)) => return Ok((rest, acc)),
            Err(e) => return Err(e),
        };
        let op = if symbol == first.0 { first.1 } else { second.1 };
        let (next, rhs) = cut(operand)(after_op)?;
        acc = binary(rest, op, acc, rhs)?;
        rest = next;
    }
}

// Unary minus sits below `^` so that `-x^2` reads as `-(x^2)`.
fn parse_unary(input: &str) -> ParseResult<'_, Node> {
    match ws(char('-'))(input) {
        Ok((rest, _)) => {
            let _nesting = Nesting::enter(input)?;
            let (rest, (expr, height)) = cut(parse_unary)(rest)?;
            Ok((rest, (Expr::Neg(expr.boxed()), taller(input, height)?)))
        }
        Err(nom::Err::Error(_)) => parse_pow(input),
        Err(e) => Err(e),
    }
}

fn parse_pow(input: &str) -> ParseResult<'_, Node> {
    let (rest, base) = parse_primary(input)?;
    let after_caret = match ws(char('^'))(rest) {
        Ok((after_caret, _)) => after_caret,
        Err(nom::Err::Error(_)) => return Ok((rest, base)),
        Err(e) => return Err(e),
    };
    let _nesting = Nesting::enter(rest)?;
    let (next, exp) = cut(parse_unary)(after_caret)?;
    let node = binary(rest, BinaryOp::Pow, base, exp)?;
    Ok((next, node))
}

fn parse_primary(input: &str) -> ParseResult<'_, Node> {
    context(
        "expected operand",
        alt((parse_parens, parse_number, parse_name)),
    )(input)
}

fn parse_parens(input: &str) -> ParseResult<'_, Node> {
    let (rest, _) = ws(char('('))(input)?;
    let _nesting = Nesting::enter(input)?;
    cut(terminated(parse_add_sub, closing_paren))(rest)
}

fn closing_paren(input: &str) -> ParseResult<'_, char> {
    context(UNBALANCED, ws(char(')')))(input)
}

fn binary<'a>(at: &'a str, op: BinaryOp, (lhs, l): Node, (rhs, r): Node) -> Step<'a, Node> {
    let height = taller(at, l.max(r))?;
    Ok((Expr::Binary(op, lhs.boxed(), rhs.boxed()), height))
}

// Height of a node sitting on top of a subtree of height `below`.
fn taller(at: &str, below: usize) -> Step<'_, usize> {
    if below >= MAX_DEPTH {
        return Err(failure(at, TOO_DEEP));
    }
    Ok(below + 1)
}

fn parse_number(input: &str) -> ParseResult<'_, Node> {
    let (start, _) = blank(input)?;
    let (rest, digits) = terminated(decimal, multispace0)(start)?;
    match digits.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok((rest, (Expr::Literal(value), 1))),
        _ => Err(failure(start, "numeric literal out of range")),
    }
}

// `x`, `e`, or a function call such as `ln(x + 1)`.
fn parse_name(input: &str) -> ParseResult<'_, Node> {
    let (start, _) = blank(input)?;
    let (rest, name) = terminated(identifier, multispace0)(start)?;
    match name {
        "x" => Ok((rest, (Expr::Variable, 1))),
        "e" => Ok((rest, (Expr::Euler, 1))),
        _ => match Function::from_name(name) {
            Some(function) => {
                let (rest, (arg, height)) = cut(parse_argument)(rest)?;
                Ok((rest, (Expr::Call(function, arg.boxed()), taller(start, height)?)))
            }
            None => Err(failure(start, UNKNOWN_IDENTIFIER)),
        },
    }
}

fn parse_argument(input: &str) -> ParseResult<'_, Node> {
    let (rest, _) = context("expected '(' after function name", ws(char('(')))(input)?;
    let _nesting = Nesting::enter(input)?;
    terminated(parse_add_sub, closing_paren)(rest)
}

fn decimal(input: &str) -> ParseResult<'_, &str> {
    recognize(alt((
        recognize(pair(digit1, opt(pair(char('.'), digit0)))),
        recognize(pair(char('.'), digit1)),
    )))(input)
}

fn identifier(input: &str) -> ParseResult<'_, &str> {
    recognize(pair(alpha1, alphanumeric0))(input)
}

fn blank(input: &str) -> ParseResult<'_, &str> {
    multispace0(input)
}

fn failure<'a>(at: &'a str, message: &'static str) -> nom::Err<VerboseError<&'a str>> {
    nom::Err::Failure(VerboseError {
        errors: vec![(at, VerboseErrorKind::Context(message))],
    })
}

fn ws<'a, F, O>(inner: F) -> impl FnMut(&'a str) -> ParseResult<'a, O>
where
    F: FnMut(&'a str) -> ParseResult<'a, O>,
{
    delimited(multispace0, inner, multispace0)
}

fn describe(input: &str, error: &VerboseError<&str>) -> QuadError {
    let remaining = error.errors.first().map_or(input, |(rest, _)| *rest);
    let offset = input.len() - remaining.len();
    let innermost_context = error.errors.iter().find_map(|(_, kind)| match kind {
        VerboseErrorKind::Context(ctx) => Some(*ctx),
        _ => None,
    });

    let message = match innermost_context {
        Some(UNKNOWN_IDENTIFIER) => {
            format!("{UNKNOWN_IDENTIFIER} '{}'", leading_token(remaining))
        }
        Some(ctx) => ctx.to_string(),
        None => match error.errors.first().map(|(_, kind)| kind) {
            Some(VerboseErrorKind::Nom(ErrorKind::Eof)) if remaining.starts_with(')') => {
                UNBALANCED.to_string()
            }
            Some(VerboseErrorKind::Char(c)) => format!("expected '{c}'"),
            _ => format!("unexpected input '{}'", leading_token(remaining)),
        },
    };

    QuadError::Parse { offset, message }
}

fn leading_token(rest: &str) -> &str {
    let word_end = rest
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(rest.len());
    if word_end > 0 {
        &rest[..word_end]
    } else {
        rest.chars().next().map_or("", |c| &rest[..c.len_utf8()])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_error(input: &str) -> (usize, String) {
        match parse_expr(input) {
            Err(QuadError::Parse { offset, message }) => (offset, message),
            other => panic!("expected parse error for {input:?}, got {other:?}"),
        }
    }

    #[test]
    fn reports_offset_of_unknown_identifier() {
        let (offset, message) = parse_error("x + foo(x)");
        assert_eq!(offset, 4);
        assert_eq!(message, "unknown identifier 'foo'");
    }

    #[test]
    fn reports_unbalanced_parentheses_both_ways() {
        assert_eq!(parse_error("(x + 1").1, UNBALANCED);
        assert_eq!(parse_error("x + 1)"), (5, UNBALANCED.to_string()));
    }

    #[test]
    fn reports_missing_operand_after_operator() {
        let (offset, message) = parse_error("x + * 2");
        assert_eq!(offset, 4);
        assert_eq!(message, "expected operand");
    }

    #[test]
    fn leading_token_takes_whole_word_or_single_char() {
        assert_eq!(leading_token("abc+1"), "abc");
        assert_eq!(leading_token("$x"), "$");
        assert_eq!(leading_token(""), "");
    }

    #[test]
    fn nesting_counter_unwinds_on_success_and_failure() {
        parse_expr("-(ln(x^-(2)))").unwrap();
        assert_eq!(NESTING.with(Cell::get), 0);
        let (_, message) = parse_error(&format!("{}x", "(".repeat(MAX_DEPTH + 1)));
        assert_eq!(message, TOO_DEEP);
        assert_eq!(NESTING.with(Cell::get), 0);
    }

    #[test]
    fn reports_offset_where_nesting_limit_is_crossed() {
        let input = format!("{}x{}", "(".repeat(MAX_DEPTH + 1), ")".repeat(MAX_DEPTH + 1));
        assert_eq!(parse_error(&input), (MAX_DEPTH, TOO_DEEP.to_string()));
    }
}
