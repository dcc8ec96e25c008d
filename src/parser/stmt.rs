//! Statement parsing.
//!
//! Pass 1 (skeletonizing) dispatches on the leading keyword of each
//! statement and extracts bracket-balanced raw spans for its sub-parts,
//! without interpreting expressions. Brace bodies are recursively
//! skeletonized. Finalization then runs every raw span through the
//! expression and type grammars, producing fully parsed statements.

use std::rc::Rc;

use crate::{
    ast::{
        statements::{ElseBranch, Statement},
        types::TypeExpr,
    },
    errors::errors::Error,
    lexer::tokens::{Token, TokenKind},
    Position,
};

use super::{
    expr::parse_expression,
    parser::Parser,
    types::{parse_single_type, parse_type_list},
};

/// A statement after pass 1: sub-parts are raw token spans, brace bodies
/// are already skeletonized statement lists.
#[derive(Debug, Clone)]
pub enum PartialStmt {
    While {
        location: Position,
        condition: Vec<Token>,
        body: Vec<PartialStmt>,
    },
    If {
        location: Position,
        condition: Vec<Token>,
        body: Vec<PartialStmt>,
        else_branch: Option<PartialElse>,
    },
    Trait {
        location: Position,
        name: Token,
        refinements: Vec<Token>,
        body: Vec<PartialStmt>,
    },
    Struct {
        location: Position,
        name: Token,
        body: Vec<PartialStmt>,
    },
    Impl {
        location: Position,
        target: Token,
        traits: Vec<Token>,
        body: Vec<PartialStmt>,
    },
    Enum {
        location: Position,
        name: Token,
        cases: Vec<Token>,
    },
    Func {
        location: Position,
        name: Token,
        parameters: Vec<Token>,
        return_clause: Vec<Token>,
        body: Vec<PartialStmt>,
    },
    Var {
        location: Position,
        name: Token,
        type_clause: Vec<Token>,
        initializer: Option<Vec<Token>>,
    },
    Return {
        location: Position,
        value: Vec<Token>,
    },
    Expression {
        tokens: Vec<Token>,
    },
}

#[derive(Debug, Clone)]
pub enum PartialElse {
    If(Box<PartialStmt>),
    Block(Vec<PartialStmt>),
}

/// Token kinds that may legally begin a statement. Everything else (binary
/// operators, `else`, closing brackets, stray punctuation) is reported as
/// unexpected, with this set as the expectation.
fn statement_start_kinds() -> Vec<TokenKind> {
    vec![
        TokenKind::While,
        TokenKind::Trait,
        TokenKind::Struct,
        TokenKind::Impl,
        TokenKind::Enum,
        TokenKind::Func,
        TokenKind::Var,
        TokenKind::If,
        TokenKind::Return,
        TokenKind::Identifier,
        TokenKind::Number,
        TokenKind::String,
        TokenKind::True,
        TokenKind::False,
        TokenKind::Null,
        TokenKind::OpenParen,
        TokenKind::Plus,
        TokenKind::Dash,
        TokenKind::Not,
    ]
}

fn can_start_statement(kind: TokenKind) -> bool {
    statement_start_kinds().contains(&kind)
}

/// Pass 1: splits a token stream into partially parsed statements.
pub fn skeletonize(tokens: Vec<Token>, file: Rc<String>) -> Result<Vec<PartialStmt>, Error> {
    let mut parser = Parser::new(tokens, file);
    let mut statements = vec![];

    while !parser.at_end() {
        statements.push(parse_partial_stmt(&mut parser)?);
    }

    Ok(statements)
}

fn sub_skeletonize(parser: &Parser, tokens: Vec<Token>) -> Result<Vec<PartialStmt>, Error> {
    skeletonize(tokens, Rc::clone(parser.get_file()))
}

fn parse_partial_stmt(parser: &mut Parser) -> Result<PartialStmt, Error> {
    let token = match parser.peek() {
        Some(token) => token.clone(),
        None => return Err(parser.eof_error()),
    };

    match token.kind {
        TokenKind::While => parse_while_stmt(parser),
        TokenKind::If => parse_if_stmt(parser),
        TokenKind::Trait => parse_trait_stmt(parser),
        TokenKind::Struct => parse_struct_stmt(parser),
        TokenKind::Impl => parse_impl_stmt(parser),
        TokenKind::Enum => parse_enum_stmt(parser),
        TokenKind::Func => parse_func_stmt(parser),
        TokenKind::Var => parse_var_stmt(parser),
        TokenKind::Return => parse_return_stmt(parser),
        kind if !can_start_statement(kind) => {
            Err(Error::unexpected(&token, statement_start_kinds()))
        }
        _ => {
            // Anything else is an expression statement, collected raw up to
            // its terminating semicolon.
            let tokens = parser.collect_until_semicolon()?;
            Ok(PartialStmt::Expression { tokens })
        }
    }
}

fn parse_while_stmt(parser: &mut Parser) -> Result<PartialStmt, Error> {
    let keyword = parser.expect(TokenKind::While)?;
    let condition = parser.paren_group()?;
    let body_tokens = parser.brace_group()?;
    let body = sub_skeletonize(parser, body_tokens)?;

    Ok(PartialStmt::While {
        location: keyword.location,
        condition,
        body,
    })
}

fn parse_if_stmt(parser: &mut Parser) -> Result<PartialStmt, Error> {
    let keyword = parser.expect(TokenKind::If)?;
    let condition = parser.paren_group()?;
    let body_tokens = parser.brace_group()?;
    let body = sub_skeletonize(parser, body_tokens)?;

    let else_branch = if parser.peek_kind() == Some(TokenKind::Else) {
        parser.advance();
        match parser.peek_kind() {
            Some(TokenKind::If) => Some(PartialElse::If(Box::new(parse_if_stmt(parser)?))),
            Some(TokenKind::OpenCurly) => {
                let block_tokens = parser.brace_group()?;
                Some(PartialElse::Block(sub_skeletonize(parser, block_tokens)?))
            }
            Some(_) => {
                return Err(match parser.peek() {
                    Some(token) => {
                        Error::unexpected(token, vec![TokenKind::If, TokenKind::OpenCurly])
                    }
                    None => parser.eof_error(),
                });
            }
            None => return Err(parser.eof_error()),
        }
    } else {
        None
    };

    Ok(PartialStmt::If {
        location: keyword.location,
        condition,
        body,
        else_branch,
    })
}

fn parse_trait_stmt(parser: &mut Parser) -> Result<PartialStmt, Error> {
    let keyword = parser.expect(TokenKind::Trait)?;
    let name = parser.expect(TokenKind::Identifier)?;
    let refinements = parser.clause(TokenKind::Colon, &[TokenKind::OpenCurly])?;
    let body_tokens = parser.brace_group()?;
    let body = sub_skeletonize(parser, body_tokens)?;

    Ok(PartialStmt::Trait {
        location: keyword.location,
        name,
        refinements,
        body,
    })
}

fn parse_struct_stmt(parser: &mut Parser) -> Result<PartialStmt, Error> {
    let keyword = parser.expect(TokenKind::Struct)?;
    let name = parser.expect(TokenKind::Identifier)?;
    let body_tokens = parser.brace_group()?;
    let body = sub_skeletonize(parser, body_tokens)?;

    Ok(PartialStmt::Struct {
        location: keyword.location,
        name,
        body,
    })
}

fn parse_impl_stmt(parser: &mut Parser) -> Result<PartialStmt, Error> {
    let keyword = parser.expect(TokenKind::Impl)?;
    let target = parser.expect(TokenKind::Identifier)?;
    let traits = parser.clause(TokenKind::Colon, &[TokenKind::OpenCurly])?;
    let body_tokens = parser.brace_group()?;
    let body = sub_skeletonize(parser, body_tokens)?;

    Ok(PartialStmt::Impl {
        location: keyword.location,
        target,
        traits,
        body,
    })
}

fn parse_enum_stmt(parser: &mut Parser) -> Result<PartialStmt, Error> {
    let keyword = parser.expect(TokenKind::Enum)?;
    let name = parser.expect(TokenKind::Identifier)?;
    let cases = parser.brace_group()?;

    Ok(PartialStmt::Enum {
        location: keyword.location,
        name,
        cases,
    })
}

fn parse_func_stmt(parser: &mut Parser) -> Result<PartialStmt, Error> {
    let keyword = parser.expect(TokenKind::Func)?;
    let name = parser.expect(TokenKind::Identifier)?;
    let parameters = parser.paren_group()?;
    let return_clause = parser.clause(TokenKind::Colon, &[TokenKind::OpenCurly])?;
    let body_tokens = parser.brace_group()?;
    let body = sub_skeletonize(parser, body_tokens)?;

    Ok(PartialStmt::Func {
        location: keyword.location,
        name,
        parameters,
        return_clause,
        body,
    })
}

fn parse_var_stmt(parser: &mut Parser) -> Result<PartialStmt, Error> {
    let keyword = parser.expect(TokenKind::Var)?;
    let name = parser.expect(TokenKind::Identifier)?;
    let type_clause = parser.clause(
        TokenKind::Colon,
        &[TokenKind::Assignment, TokenKind::Semicolon],
    )?;

    let initializer = match parser.peek_kind() {
        Some(TokenKind::Assignment) => {
            parser.advance();
            Some(parser.collect_until_semicolon()?)
        }
        Some(TokenKind::Semicolon) => {
            parser.advance();
            None
        }
        Some(_) => {
            return Err(match parser.peek() {
                Some(token) => Error::unexpected(
                    token,
                    vec![
                        TokenKind::Colon,
                        TokenKind::Assignment,
                        TokenKind::Semicolon,
                    ],
                ),
                None => parser.eof_error(),
            });
        }
        None => return Err(parser.eof_error()),
    };

    Ok(PartialStmt::Var {
        location: keyword.location,
        name,
        type_clause,
        initializer,
    })
}

fn parse_return_stmt(parser: &mut Parser) -> Result<PartialStmt, Error> {
    let keyword = parser.expect(TokenKind::Return)?;
    let value = parser.collect_until_semicolon()?;

    Ok(PartialStmt::Return {
        location: keyword.location,
        value,
    })
}

/// Pass 2: resolves every raw span of a partially parsed statement through
/// the expression and type grammars.
pub fn finalize_stmt(partial: PartialStmt) -> Result<Statement, Error> {
    match partial {
        PartialStmt::While {
            location,
            condition,
            body,
        } => Ok(Statement::While {
            condition: parse_expression(&condition, &location)?,
            body: finalize_body(body)?,
            location,
        }),
        PartialStmt::If {
            location,
            condition,
            body,
            else_branch,
        } => Ok(Statement::If {
            condition: parse_expression(&condition, &location)?,
            body: finalize_body(body)?,
            else_branch: match else_branch {
                Some(PartialElse::If(nested)) => {
                    Some(ElseBranch::If(Box::new(finalize_stmt(*nested)?)))
                }
                Some(PartialElse::Block(body)) => Some(ElseBranch::Block(finalize_body(body)?)),
                None => None,
            },
            location,
        }),
        PartialStmt::Trait {
            location,
            name,
            refinements,
            body,
        } => Ok(Statement::TraitDecl {
            refinements: finalize_type_list(&refinements, &name.location)?,
            body: finalize_body(body)?,
            name: name.value,
            location,
        }),
        PartialStmt::Struct {
            location,
            name,
            body,
        } => Ok(Statement::StructDecl {
            body: finalize_body(body)?,
            name: name.value,
            location,
        }),
        PartialStmt::Impl {
            location,
            target,
            traits,
            body,
        } => Ok(Statement::ImplBlock {
            traits: finalize_type_list(&traits, &target.location)?,
            body: finalize_body(body)?,
            target: target.value,
            location,
        }),
        PartialStmt::Enum {
            location,
            name,
            cases,
        } => Ok(Statement::EnumDecl {
            cases: parse_enum_cases(&cases)?,
            name: name.value,
            location,
        }),
        PartialStmt::Func {
            location,
            name,
            parameters,
            return_clause,
            body,
        } => Ok(Statement::FuncDecl {
            parameters: parse_parameter_list(&parameters)?,
            return_type: if return_clause.is_empty() {
                TypeExpr::symbol("Void", Position::null())
            } else {
                parse_single_type(&return_clause, &name.location)?
            },
            body: finalize_body(body)?,
            name: name.value,
            location,
        }),
        PartialStmt::Var {
            location,
            name,
            type_clause,
            initializer,
        } => Ok(Statement::VarDecl {
            explicit_type: if type_clause.is_empty() {
                None
            } else {
                Some(parse_single_type(&type_clause, &name.location)?)
            },
            value: match initializer {
                Some(tokens) => Some(parse_expression(&tokens, &name.location)?),
                None => None,
            },
            name: name.value,
            location,
        }),
        PartialStmt::Return { location, value } => Ok(Statement::Return {
            value: if value.is_empty() {
                None
            } else {
                Some(parse_expression(&value, &location)?)
            },
            location,
        }),
        PartialStmt::Expression { tokens } => {
            let fallback = tokens
                .first()
                .map(|token| token.location.clone())
                .unwrap_or_else(Position::null);
            Ok(Statement::Expression {
                expression: parse_expression(&tokens, &fallback)?,
            })
        }
    }
}

fn finalize_body(body: Vec<PartialStmt>) -> Result<Vec<Statement>, Error> {
    body.into_iter().map(finalize_stmt).collect()
}

fn finalize_type_list(tokens: &[Token], fallback: &Position) -> Result<Vec<TypeExpr>, Error> {
    if tokens.is_empty() {
        return Ok(vec![]);
    }
    parse_type_list(tokens, fallback)
}

/// Enum cases are bare identifiers separated by commas, with a trailing
/// comma permitted.
fn parse_enum_cases(tokens: &[Token]) -> Result<Vec<String>, Error> {
    let mut cases = vec![];
    let mut iter = tokens.iter();

    while let Some(token) = iter.next() {
        if token.kind != TokenKind::Identifier {
            return Err(Error::unexpected(token, vec![TokenKind::Identifier]));
        }
        cases.push(token.value.clone());

        match iter.next() {
            None => break,
            Some(separator) if separator.kind == TokenKind::Comma => {}
            Some(separator) => {
                return Err(Error::unexpected(separator, vec![TokenKind::Comma]));
            }
        }
    }

    Ok(cases)
}

/// Parses a raw `name: Type, name: Type` parameter span. Type spans are
/// delimited by top-level commas; commas nested in generic brackets belong
/// to the type.
fn parse_parameter_list(tokens: &[Token]) -> Result<Vec<(String, TypeExpr)>, Error> {
    let mut parameters = vec![];
    let mut pos = 0;

    while pos < tokens.len() {
        let name = &tokens[pos];
        if name.kind != TokenKind::Identifier {
            return Err(Error::unexpected(name, vec![TokenKind::Identifier]));
        }
        pos += 1;

        match tokens.get(pos) {
            Some(token) if token.kind == TokenKind::Colon => pos += 1,
            Some(token) => return Err(Error::unexpected(token, vec![TokenKind::Colon])),
            None => return Err(Error::eof(name.end_location())),
        }

        let start = pos;
        let mut depth = 0;
        while pos < tokens.len() {
            match tokens[pos].kind {
                TokenKind::OpenBracket => depth += 1,
                TokenKind::CloseBracket => depth -= 1,
                TokenKind::Comma if depth == 0 => break,
                _ => {}
            }
            pos += 1;
        }

        let ty = parse_single_type(&tokens[start..pos], &name.location)?;
        parameters.push((name.value.clone(), ty));

        if pos < tokens.len() {
            pos += 1;
        }
    }

    Ok(parameters)
}
