use std::rc::Rc;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position, MK_TOKEN,
};

use super::tokens::{Token, TokenKind, RULES};

pub struct Lexer {
    tokens: Vec<Token>,
    source: String,
    pos: usize,
    line: u32,
    column: u32,
    file: Rc<String>,
}

impl Lexer {
    pub fn new(source: String, file: Option<String>) -> Lexer {
        let file_name = if let Some(file) = file {
            Rc::new(file)
        } else {
            Rc::new(String::from("shell"))
        };

        Lexer {
            tokens: vec![],
            source,
            pos: 0,
            line: 1,
            column: 1,
            file: file_name,
        }
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
    }

    pub fn location(&self) -> Position {
        Position::new(self.line, self.column, Rc::clone(&self.file))
    }

    pub fn remainder(&self) -> &str {
        &self.source[self.pos..]
    }

    pub fn at_eof(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Consumes `text` from the front of the remaining input, keeping the
    /// line/column cursor in step.
    pub fn advance(&mut self, text: &str) {
        self.pos += text.len();

        for c in text.chars() {
            if c == '\n' {
                self.line += 1;
                self.column = 1;
            } else {
                self.column += 1;
            }
        }
    }
}

/// Converts source text into an ordered token sequence.
///
/// Every rule in the ordered table is tried against the prefix of the
/// remaining input; the first match wins. No input is ever dropped:
/// whitespace and comments come back as trivia tokens, so concatenating the
/// values of the result reconstructs the source exactly.
pub fn lex(source: String, file: Option<String>) -> Result<Vec<Token>, Error> {
    let mut lexer = Lexer::new(source, file);

    while !lexer.at_eof() {
        let mut matched: Option<(TokenKind, String)> = None;

        for rule in RULES.iter() {
            if let Some(found) = rule.regex.find(lexer.remainder()) {
                matched = Some((rule.kind, found.as_str().to_string()));
                break;
            }
        }

        match matched {
            Some((kind, text)) => {
                let location = lexer.location();
                lexer.advance(&text);
                lexer.push(MK_TOKEN!(kind, text, location));
            }
            None => {
                let token = lexer
                    .remainder()
                    .chars()
                    .next()
                    .map(|c| c.to_string())
                    .unwrap_or_default();
                return Err(Error::new(
                    ErrorImpl::UnrecognisedToken { token },
                    lexer.location(),
                ));
            }
        }
    }

    Ok(lexer.tokens)
}
