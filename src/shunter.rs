use crate::lexer::{Lexeme, Span, Token};
use crate::node::Node;
use crate::op::Operator;
use crate::parse_error::{ParseErrorCause, ShuntError};
use tracing::{debug, trace};

/// Build an expression tree from a lexeme stream, using an operator stack and a node stack. For
/// example, `1 + 2 * 3` becomes `(+ 1 (* 2 3))`.
///
/// When an operator arrives, every stacked operator with strictly greater precedence is resolved
/// into a node first. Operators of equal precedence are left on the stack, so chains like
/// `1 + 2 + 3` group to the right: `(+ 1 (+ 2 3))`.
///
/// Each node on the stack is paired with the span it covers, for error reporting.
pub(crate) fn shunt(lexemes: impl IntoIterator<Item = Lexeme>) -> Result<Node, ShuntError> {
    let mut ops = Vec::<(Operator, Span)>::new();
    let mut nodes = Vec::<(Node, Span)>::new();
    for lexeme in lexemes {
        trace!(token = %lexeme.token, span = ?lexeme.span, "shunt");
        match lexeme.token {
            Token::Op(op) => {
                loop {
                    match ops.last() {
                        Some(&(top, top_span)) if top.prec() > op.prec() => {
                            ops.pop();
                            combine(&mut nodes, top, top_span)?;
                        }
                        _ => break,
                    }
                }
                ops.push((op, lexeme.span));
            }
            Token::Digit(digit) => nodes.push((Node::leaf(digit), lexeme.span)),
            Token::LexError(ch) => {
                return Err(ShuntError::new(
                    ParseErrorCause::Unrecognized(ch),
                    Some(lexeme.span),
                ))
            }
        }
    }
    while let Some((op, op_span)) = ops.pop() {
        combine(&mut nodes, op, op_span)?;
    }

    let mut nodes = nodes.into_iter();
    match (nodes.next(), nodes.next()) {
        (None, _) => Err(ShuntError::new(ParseErrorCause::Empty, None)),
        (Some((root, _)), None) => Ok(root),
        (Some(_), Some((_, extra_span))) => Err(ShuntError::new(
            ParseErrorCause::MissingOperator,
            Some(extra_span),
        )),
    }
}

/// Pop the right and then the left operand of `op`, and push the combined node.
fn combine(nodes: &mut Vec<(Node, Span)>, op: Operator, op_span: Span) -> Result<(), ShuntError> {
    let missing = || ShuntError::new(ParseErrorCause::MissingOperand(op), Some(op_span));
    let (right, right_span) = nodes.pop().ok_or_else(missing)?;
    let (left, left_span) = nodes.pop().ok_or_else(missing)?;
    debug!(%op, left = ?left_span, right = ?right_span, "combine");
    nodes.push((Node::binary(op, left, right), (left_span.0, right_span.1)));
    Ok(())
}
