//! Stages B and C of the expression pipeline.
//!
//! Stage B walks the balanced tree and decides what every paren/bracket
//! group and `.` token means from its context: function call, index access,
//! member access, or plain grouped sub-expression. Chains (`f(x)[0].y`) are
//! consumed greedily into a single composite node.
//!
//! Stage C runs a shunting-yard pass over the disambiguated atom/operator
//! sequence, honoring precedence and associativity, and produces the final
//! expression tree.

use crate::{
    ast::expressions::Expression,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position,
};

use super::balance::{balance, ExprNode};

/// Operator binding power, lowest to highest. Assignment and exponent are
/// right-associative; everything else associates left.
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Copy, Debug)]
pub enum BindingPower {
    Assignment,
    LogicalOr,
    LogicalAnd,
    Equality,
    Relational,
    Coalesce,
    Additive,
    Multiplicative,
    Exponent,
    Unary,
}

fn binding_power(kind: TokenKind) -> Option<BindingPower> {
    match kind {
        TokenKind::Assignment => Some(BindingPower::Assignment),
        TokenKind::Or => Some(BindingPower::LogicalOr),
        TokenKind::And => Some(BindingPower::LogicalAnd),
        TokenKind::Equals | TokenKind::NotEquals => Some(BindingPower::Equality),
        TokenKind::Less
        | TokenKind::LessEquals
        | TokenKind::Greater
        | TokenKind::GreaterEquals => Some(BindingPower::Relational),
        TokenKind::Coalesce => Some(BindingPower::Coalesce),
        TokenKind::Plus | TokenKind::Dash => Some(BindingPower::Additive),
        TokenKind::Star | TokenKind::Slash | TokenKind::Percent => {
            Some(BindingPower::Multiplicative)
        }
        TokenKind::Power => Some(BindingPower::Exponent),
        _ => None,
    }
}

fn is_right_associative(kind: TokenKind) -> bool {
    matches!(kind, TokenKind::Assignment | TokenKind::Power)
}

/// Parses a raw token span through the full pipeline: balancing,
/// disambiguation, precedence resolution.
pub fn parse_expression(tokens: &[Token], fallback: &Position) -> Result<Expression, Error> {
    if tokens.is_empty() {
        return Err(Error::eof(fallback.clone()));
    }
    let nodes = balance(tokens)?;
    resolve_nodes(&nodes, fallback)
}

fn resolve_nodes(nodes: &[ExprNode], fallback: &Position) -> Result<Expression, Error> {
    let items = disambiguate(nodes, fallback)?;
    shunting_yard(items, fallback)
}

/// A node of the disambiguated sequence fed to the shunting-yard pass:
/// either a fully resolved sub-expression or a still-plain token.
enum Item {
    Expr(Expression),
    Token(Token),
}

/// Could this node begin a call/index/access application?
fn is_candidate(node: &ExprNode) -> bool {
    match node {
        ExprNode::Group { opening, .. } => {
            matches!(opening.kind, TokenKind::OpenParen | TokenKind::OpenBracket)
        }
        ExprNode::Leaf(token) => token.kind == TokenKind::Dot,
    }
}

fn leaf_item(node: &ExprNode) -> Result<Item, Error> {
    match node {
        ExprNode::Leaf(token) => Ok(Item::Token(token.clone())),
        ExprNode::Group { opening, .. } => Err(Error::unexpected(opening, vec![])),
    }
}

/// Stage B: scans for the first application candidate and decides its
/// meaning from context, emitting composite nodes for whole chains.
fn disambiguate(nodes: &[ExprNode], fallback: &Position) -> Result<Vec<Item>, Error> {
    let Some(index) = nodes.iter().position(is_candidate) else {
        // No call/access chain at this level; only plain leaves remain.
        return nodes.iter().map(leaf_item).collect();
    };

    if index == 0 {
        return match &nodes[0] {
            ExprNode::Group { opening, children } if opening.kind == TokenKind::OpenParen => {
                let grouped = resolve_nodes(children, &opening.location)?;
                if nodes.len() > 1 && is_candidate(&nodes[1]) {
                    // A leading group directly followed by another candidate
                    // is the target of a chain: (f)(x), (a + b).x
                    let (expr, consumed) = consume_chain(grouped, &nodes[1..])?;
                    let mut items = vec![Item::Expr(expr)];
                    items.extend(disambiguate(&nodes[1 + consumed..], fallback)?);
                    Ok(items)
                } else {
                    // Plain parenthesized sub-expression, not a call.
                    let mut items = vec![Item::Expr(grouped)];
                    items.extend(disambiguate(&nodes[1..], fallback)?);
                    Ok(items)
                }
            }
            ExprNode::Group { opening, .. } => Err(Error::unexpected(opening, vec![])),
            ExprNode::Leaf(token) => {
                Err(Error::unexpected(token, vec![TokenKind::Identifier]))
            }
        };
    }

    match &nodes[index - 1] {
        ExprNode::Leaf(token) if token.kind == TokenKind::Identifier => {
            let mut items = nodes[..index - 1]
                .iter()
                .map(leaf_item)
                .collect::<Result<Vec<Item>, Error>>()?;
            let target = Expression::Symbol {
                token: token.clone(),
            };
            let (expr, consumed) = consume_chain(target, &nodes[index..])?;
            items.push(Item::Expr(expr));
            items.extend(disambiguate(&nodes[index + consumed..], fallback)?);
            Ok(items)
        }
        ExprNode::Leaf(token) if token.kind.is_operator() => match &nodes[index] {
            ExprNode::Group { opening, children } if opening.kind == TokenKind::OpenParen => {
                // Operator before the group: grouped sub-expression.
                let mut items = nodes[..index]
                    .iter()
                    .map(leaf_item)
                    .collect::<Result<Vec<Item>, Error>>()?;
                items.push(Item::Expr(resolve_nodes(children, &opening.location)?));
                items.extend(disambiguate(&nodes[index + 1..], fallback)?);
                Ok(items)
            }
            node => Err(Error::new(
                ErrorImpl::UnexpectedToken {
                    token: node_text(node),
                    expected: vec![TokenKind::OpenParen],
                },
                node.location().clone(),
            )),
        },
        ExprNode::Leaf(token) => Err(Error::unexpected(token, vec![TokenKind::Identifier])),
        ExprNode::Group { opening, .. } => Err(Error::unexpected(opening, vec![])),
    }
}

fn node_text(node: &ExprNode) -> String {
    match node {
        ExprNode::Leaf(token) => token.value.clone(),
        ExprNode::Group { opening, .. } => opening.value.clone(),
    }
}

/// Consumes adjacent call parens, index brackets, and `.name` accesses into
/// one composite expression, returning it and how many nodes were used.
fn consume_chain(target: Expression, rest: &[ExprNode]) -> Result<(Expression, usize), Error> {
    let mut expr = target;
    let mut consumed = 0;

    loop {
        match rest.get(consumed) {
            Some(ExprNode::Group { opening, children })
                if opening.kind == TokenKind::OpenParen =>
            {
                let arguments = split_arguments(children)
                    .into_iter()
                    .map(|segment| resolve_nodes(segment, &opening.location))
                    .collect::<Result<Vec<Expression>, Error>>()?;
                expr = Expression::Call {
                    callee: Box::new(expr),
                    arguments,
                };
                consumed += 1;
            }
            Some(ExprNode::Group { opening, children })
                if opening.kind == TokenKind::OpenBracket =>
            {
                let index = resolve_nodes(children, &opening.location)?;
                expr = Expression::Index {
                    target: Box::new(expr),
                    index: Box::new(index),
                };
                consumed += 1;
            }
            Some(ExprNode::Leaf(token)) if token.kind == TokenKind::Dot => {
                match rest.get(consumed + 1) {
                    Some(ExprNode::Leaf(property)) if property.kind == TokenKind::Identifier => {
                        expr = Expression::Member {
                            target: Box::new(expr),
                            property: property.clone(),
                        };
                        consumed += 2;
                    }
                    Some(node) => {
                        return Err(Error::new(
                            ErrorImpl::UnexpectedToken {
                                token: node_text(node),
                                expected: vec![TokenKind::Identifier],
                            },
                            node.location().clone(),
                        ));
                    }
                    None => return Err(Error::eof(token.end_location())),
                }
            }
            _ => break,
        }
    }

    Ok((expr, consumed))
}

/// Splits a call group's children at its top-level commas. Commas inside
/// nested groups are already buried in their group node.
fn split_arguments(children: &[ExprNode]) -> Vec<&[ExprNode]> {
    if children.is_empty() {
        return vec![];
    }

    let mut segments = vec![];
    let mut start = 0;
    for (index, node) in children.iter().enumerate() {
        if let ExprNode::Leaf(token) = node {
            if token.kind == TokenKind::Comma {
                segments.push(&children[start..index]);
                start = index + 1;
            }
        }
    }
    segments.push(&children[start..]);
    segments
}

enum StackOp {
    Binary(Token, BindingPower),
    Unary(Token),
}

impl StackOp {
    fn power(&self) -> BindingPower {
        match self {
            StackOp::Binary(_, power) => *power,
            StackOp::Unary(_) => BindingPower::Unary,
        }
    }
}

/// Stage C: precedence resolution over the disambiguated sequence.
fn shunting_yard(items: Vec<Item>, fallback: &Position) -> Result<Expression, Error> {
    let mut operands: Vec<Expression> = vec![];
    let mut operators: Vec<StackOp> = vec![];
    let mut expect_operand = true;

    for item in items {
        match item {
            Item::Expr(expr) => {
                if !expect_operand {
                    return Err(Error::new(
                        ErrorImpl::UnexpectedToken {
                            token: String::from("expression"),
                            expected: vec![],
                        },
                        expr.location().clone(),
                    ));
                }
                operands.push(expr);
                expect_operand = false;
            }
            Item::Token(token) => {
                if expect_operand {
                    match token.kind {
                        TokenKind::Number => operands.push(Expression::Number { token }),
                        TokenKind::String => operands.push(Expression::String { token }),
                        TokenKind::True | TokenKind::False => {
                            operands.push(Expression::Bool { token })
                        }
                        TokenKind::Null => operands.push(Expression::Null { token }),
                        TokenKind::Identifier => operands.push(Expression::Symbol { token }),
                        TokenKind::Plus | TokenKind::Dash | TokenKind::Not => {
                            operators.push(StackOp::Unary(token));
                            continue;
                        }
                        _ => {
                            return Err(Error::unexpected(
                                &token,
                                vec![
                                    TokenKind::Number,
                                    TokenKind::String,
                                    TokenKind::True,
                                    TokenKind::False,
                                    TokenKind::Null,
                                    TokenKind::Identifier,
                                    TokenKind::OpenParen,
                                ],
                            ));
                        }
                    }
                    expect_operand = false;
                } else {
                    let Some(power) = binding_power(token.kind) else {
                        return Err(Error::unexpected(&token, vec![]));
                    };
                    while let Some(top) = operators.last() {
                        let should_pop = if is_right_associative(token.kind) {
                            top.power() > power
                        } else {
                            top.power() >= power
                        };
                        if !should_pop {
                            break;
                        }
                        let op = operators
                            .pop()
                            .ok_or_else(|| Error::eof(fallback.clone()))?;
                        apply(op, &mut operands)?;
                    }
                    operators.push(StackOp::Binary(token, power));
                    expect_operand = true;
                }
            }
        }
    }

    if expect_operand {
        return Err(Error::eof(fallback.clone()));
    }

    while let Some(op) = operators.pop() {
        apply(op, &mut operands)?;
    }

    let result = operands
        .pop()
        .ok_or_else(|| Error::eof(fallback.clone()))?;
    if let Some(extra) = operands.pop() {
        return Err(Error::new(
            ErrorImpl::UnexpectedToken {
                token: String::from("expression"),
                expected: vec![],
            },
            extra.location().clone(),
        ));
    }
    Ok(result)
}

fn apply(op: StackOp, operands: &mut Vec<Expression>) -> Result<(), Error> {
    match op {
        StackOp::Unary(token) => {
            let operand = operands
                .pop()
                .ok_or_else(|| Error::eof(token.end_location()))?;
            operands.push(Expression::Prefix {
                operator: token,
                operand: Box::new(operand),
            });
        }
        StackOp::Binary(token, _) => {
            let right = operands
                .pop()
                .ok_or_else(|| Error::eof(token.end_location()))?;
            let left = operands
                .pop()
                .ok_or_else(|| Error::eof(token.end_location()))?;

            if token.kind == TokenKind::Assignment {
                // The assignment target must be a plain identifier.
                match left {
                    Expression::Symbol { token: target } => {
                        operands.push(Expression::Assignment {
                            target,
                            value: Box::new(right),
                        });
                    }
                    other => {
                        return Err(Error::new(
                            ErrorImpl::UnexpectedToken {
                                token: token.value.clone(),
                                expected: vec![TokenKind::Identifier],
                            },
                            other.location().clone(),
                        ));
                    }
                }
            } else {
                operands.push(Expression::Binary {
                    operator: token,
                    left: Box::new(left),
                    right: Box::new(right),
                });
            }
        }
    }
    Ok(())
}
