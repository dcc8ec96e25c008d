//! Stage A of the expression pipeline: bracket balancing.
//!
//! A flat token span becomes a tree of leaves and groups before any
//! operator or call/access interpretation happens. Matching uses a nesting
//! counter for the opening bracket's kind only; a mismatched closer of a
//! different kind inside a group is not detected here and surfaces later
//! when the inner span is parsed.

use crate::{
    errors::errors::Error,
    lexer::tokens::{Token, TokenKind},
    Position,
};

#[derive(Debug, Clone)]
pub enum ExprNode {
    Leaf(Token),
    Group {
        opening: Token,
        children: Vec<ExprNode>,
    },
}

impl ExprNode {
    pub fn location(&self) -> &Position {
        match self {
            ExprNode::Leaf(token) => &token.location,
            ExprNode::Group { opening, .. } => &opening.location,
        }
    }
}

fn matching_close(open: TokenKind) -> TokenKind {
    match open {
        TokenKind::OpenParen => TokenKind::CloseParen,
        TokenKind::OpenBracket => TokenKind::CloseBracket,
        _ => TokenKind::CloseCurly,
    }
}

/// Extracts the balanced group opened at `open_pos`, returning the inner
/// span and the index just past the closing token.
pub fn extract_group(
    tokens: &[Token],
    open_pos: usize,
    open: TokenKind,
) -> Result<(&[Token], usize), Error> {
    let close = matching_close(open);
    let mut depth = 1;
    let mut pos = open_pos + 1;

    while pos < tokens.len() {
        let kind = tokens[pos].kind;
        if kind == open {
            depth += 1;
        } else if kind == close {
            depth -= 1;
            if depth == 0 {
                return Ok((&tokens[open_pos + 1..pos], pos + 1));
            }
        }
        pos += 1;
    }

    Err(Error::eof(tokens[open_pos].location.clone()))
}

/// Builds the balanced-expression tree for a flat token span.
pub fn balance(tokens: &[Token]) -> Result<Vec<ExprNode>, Error> {
    let mut nodes = vec![];
    let mut pos = 0;

    while pos < tokens.len() {
        let token = &tokens[pos];
        match token.kind {
            TokenKind::OpenParen | TokenKind::OpenBracket | TokenKind::OpenCurly => {
                let (inner, after) = extract_group(tokens, pos, token.kind)?;
                nodes.push(ExprNode::Group {
                    opening: token.clone(),
                    children: balance(inner)?,
                });
                pos = after;
            }
            TokenKind::CloseParen | TokenKind::CloseBracket | TokenKind::CloseCurly => {
                return Err(Error::unexpected(token, vec![]));
            }
            _ => {
                nodes.push(ExprNode::Leaf(token.clone()));
                pos += 1;
            }
        }
    }

    Ok(nodes)
}
