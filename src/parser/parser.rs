//! Token cursor and group-extraction primitives.
//!
//! The `Parser` owns a token stream and a position. Grammar-level passes
//! never see trivia: the cursor skips whitespace and comment tokens when
//! peeking or advancing. Group extraction tracks nesting depth only for the
//! bracket kind that opened the group; other bracket kinds inside are
//! passed through uninspected.

use std::rc::Rc;

use crate::{
    ast::statements::Statement,
    errors::errors::Error,
    lexer::tokens::{Token, TokenKind},
    Position,
};

use super::stmt::{finalize_stmt, skeletonize};

pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    file: Rc<String>,
}

impl Parser {
    pub fn new(tokens: Vec<Token>, file: Rc<String>) -> Self {
        Parser {
            tokens,
            pos: 0,
            file,
        }
    }

    pub fn get_file(&self) -> &Rc<String> {
        &self.file
    }

    fn skip_trivia(&mut self) {
        while self
            .tokens
            .get(self.pos)
            .is_some_and(|token| token.kind.is_trivia())
        {
            self.pos += 1;
        }
    }

    /// Returns the next significant token without consuming it.
    pub fn peek(&mut self) -> Option<&Token> {
        self.skip_trivia();
        self.tokens.get(self.pos)
    }

    pub fn peek_kind(&mut self) -> Option<TokenKind> {
        self.peek().map(|token| token.kind)
    }

    /// Consumes and returns the next significant token.
    pub fn advance(&mut self) -> Option<Token> {
        self.skip_trivia();
        let token = self.tokens.get(self.pos).cloned();
        if token.is_some() {
            self.pos += 1;
        }
        token
    }

    pub fn at_end(&mut self) -> bool {
        self.peek().is_none()
    }

    /// The position just past the final token, used for end-of-input errors.
    pub fn eof_position(&self) -> Position {
        match self.tokens.last() {
            Some(token) => token.end_location(),
            None => Position::new(1, 1, Rc::clone(&self.file)),
        }
    }

    pub fn eof_error(&self) -> Error {
        Error::eof(self.eof_position())
    }

    pub fn expect(&mut self, expected_kind: TokenKind) -> Result<Token, Error> {
        self.skip_trivia();
        match self.tokens.get(self.pos) {
            Some(token) if token.kind == expected_kind => {
                let token = token.clone();
                self.pos += 1;
                Ok(token)
            }
            Some(token) => Err(Error::unexpected(token, vec![expected_kind])),
            None => Err(self.eof_error()),
        }
    }

    /// Extracts a balanced group introduced by `open`, tracking depth only
    /// for that bracket kind. The opening and closing tokens are consumed
    /// and not part of the returned span.
    pub fn group(&mut self, open: TokenKind, close: TokenKind) -> Result<Vec<Token>, Error> {
        self.expect(open)?;

        let mut collected = vec![];
        let mut depth = 1;

        loop {
            match self.advance() {
                None => return Err(self.eof_error()),
                Some(token) if token.kind == open => {
                    depth += 1;
                    collected.push(token);
                }
                Some(token) if token.kind == close => {
                    depth -= 1;
                    if depth == 0 {
                        return Ok(collected);
                    }
                    collected.push(token);
                }
                Some(token) => collected.push(token),
            }
        }
    }

    pub fn paren_group(&mut self) -> Result<Vec<Token>, Error> {
        self.group(TokenKind::OpenParen, TokenKind::CloseParen)
    }

    pub fn brace_group(&mut self) -> Result<Vec<Token>, Error> {
        self.group(TokenKind::OpenCurly, TokenKind::CloseCurly)
    }

    /// Reads an optional non-nested clause. If the next token is `start`,
    /// collects tokens until one of `terminators` appears (the terminator is
    /// left for the caller); otherwise nothing is consumed and the result is
    /// empty.
    pub fn clause(
        &mut self,
        start: TokenKind,
        terminators: &[TokenKind],
    ) -> Result<Vec<Token>, Error> {
        if self.peek_kind() != Some(start) {
            return Ok(vec![]);
        }
        self.advance();

        let mut collected = vec![];
        loop {
            match self.peek_kind() {
                None => return Err(self.eof_error()),
                Some(kind) if terminators.contains(&kind) => return Ok(collected),
                Some(_) => {
                    if let Some(token) = self.advance() {
                        collected.push(token);
                    }
                }
            }
        }
    }

    /// Collects tokens up to the next `;`. The semicolon is consumed but not
    /// included; running out of input first is an error.
    pub fn collect_until_semicolon(&mut self) -> Result<Vec<Token>, Error> {
        let mut collected = vec![];
        loop {
            match self.advance() {
                None => return Err(self.eof_error()),
                Some(token) if token.kind == TokenKind::Semicolon => return Ok(collected),
                Some(token) => collected.push(token),
            }
        }
    }
}

/// Parses a stream of tokens into a statement sequence.
///
/// This is the main entry point for parsing: pass 1 skeletonizes the stream
/// into partially parsed statements, then every raw sub-span is run through
/// the expression and type grammars.
pub fn parse(tokens: Vec<Token>) -> Result<Vec<Statement>, Error> {
    let file = tokens
        .first()
        .map(|token| Rc::clone(&token.location.file))
        .unwrap_or_else(|| Rc::new(String::from("shell")));

    let partials = skeletonize(tokens, file)?;
    partials.into_iter().map(finalize_stmt).collect()
}
