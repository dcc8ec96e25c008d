//! Type-expression parsing.
//!
//! The grammar is intentionally narrow: identifiers, `.`-qualified names,
//! and `Name[Arg, ...]` generic instantiation. No operators, no calls, no
//! literals. The same entry point parses both single annotations and
//! comma-joined outer lists (generic arguments, trait refinements).
//!
//! Parsing maintains a stack of slots seeded with one empty slot: an
//! identifier fills the open slot, `.` and `[` refine a filled slot, and
//! `,` opens a new one. Every slot must be filled by the end.

use crate::{
    ast::types::TypeExpr,
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position,
};

use super::balance::extract_group;

pub fn parse_type_list(tokens: &[Token], fallback: &Position) -> Result<Vec<TypeExpr>, Error> {
    let mut slots: Vec<Option<TypeExpr>> = vec![None];
    let mut pos = 0;

    while pos < tokens.len() {
        let token = &tokens[pos];
        match token.kind {
            TokenKind::Identifier => {
                let slot = last_slot(&mut slots);
                if slot.is_some() {
                    return Err(Error::unexpected(
                        token,
                        vec![TokenKind::Dot, TokenKind::OpenBracket, TokenKind::Comma],
                    ));
                }
                *slot = Some(TypeExpr::Symbol {
                    name: token.value.clone(),
                    location: token.location.clone(),
                });
                pos += 1;
            }
            TokenKind::Dot => {
                let slot = last_slot(&mut slots);
                let base = match slot.take() {
                    Some(base) => base,
                    None => {
                        return Err(Error::unexpected(token, vec![TokenKind::Identifier]));
                    }
                };
                let name = match tokens.get(pos + 1) {
                    Some(next) if next.kind == TokenKind::Identifier => next.value.clone(),
                    Some(next) => {
                        return Err(Error::unexpected(next, vec![TokenKind::Identifier]));
                    }
                    None => return Err(Error::eof(token.end_location())),
                };
                *slot = Some(TypeExpr::Property {
                    base: Box::new(base),
                    name,
                });
                pos += 2;
            }
            TokenKind::OpenBracket => {
                let slot = last_slot(&mut slots);
                let base = match slot.take() {
                    Some(base) => base,
                    None => {
                        return Err(Error::unexpected(token, vec![TokenKind::Identifier]));
                    }
                };
                let (inner, after) = extract_group(tokens, pos, TokenKind::OpenBracket)?;
                let arguments = parse_type_list(inner, &token.location)?;
                *slot = Some(TypeExpr::Generic {
                    base: Box::new(base),
                    arguments,
                });
                pos = after;
            }
            TokenKind::Comma => {
                slots.push(None);
                pos += 1;
            }
            _ => {
                return Err(Error::unexpected(
                    token,
                    vec![
                        TokenKind::Identifier,
                        TokenKind::Dot,
                        TokenKind::OpenBracket,
                        TokenKind::Comma,
                    ],
                ));
            }
        }
    }

    slots
        .into_iter()
        .map(|slot| slot.ok_or_else(|| Error::eof(fallback.clone())))
        .collect()
}

/// Parses a span that must contain exactly one type expression.
pub fn parse_single_type(tokens: &[Token], fallback: &Position) -> Result<TypeExpr, Error> {
    let mut types = parse_type_list(tokens, fallback)?;
    if types.len() > 1 {
        return Err(Error::new(
            ErrorImpl::UnexpectedToken {
                token: String::from(","),
                expected: vec![],
            },
            types[1].location().clone(),
        ));
    }
    types
        .pop()
        .ok_or_else(|| Error::eof(fallback.clone()))
}

fn last_slot(slots: &mut Vec<Option<TypeExpr>>) -> &mut Option<TypeExpr> {
    if slots.is_empty() {
        slots.push(None);
    }
    let index = slots.len() - 1;
    &mut slots[index]
}
