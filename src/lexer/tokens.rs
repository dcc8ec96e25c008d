use std::fmt::Display;
use std::rc::Rc;

use lazy_static::lazy_static;
use regex::Regex;
use serde::Serialize;

use crate::{Position, MK_RULE};

#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize)]
pub enum TokenKind {
    // Trivia, kept in the stream so the source can be reconstructed exactly
    Whitespace,
    LineComment,
    BlockComment,

    Number,
    String,
    Identifier,

    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    OpenParen,
    CloseParen,

    Assignment, // =
    Equals,     // ==
    Not,        // !
    NotEquals,  // !=

    Less,
    LessEquals,
    Greater,
    GreaterEquals,

    Or,
    And,
    Coalesce, // ??

    Dot,
    Semicolon,
    Colon,
    Comma,

    Plus,
    Dash,
    Slash,
    Star,
    Percent,
    Power, // **

    // Reserved
    While,
    Trait,
    Struct,
    Impl,
    Enum,
    Func,
    Var,
    If,
    Else,
    Return,
    True,
    False,
    Null,
}

impl TokenKind {
    pub fn is_trivia(&self) -> bool {
        matches!(
            self,
            TokenKind::Whitespace | TokenKind::LineComment | TokenKind::BlockComment
        )
    }

    /// Binary and unary operator symbols, plus assignment. Used by the
    /// expression pipeline when deciding what a bracket group means.
    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            TokenKind::Assignment
                | TokenKind::Equals
                | TokenKind::Not
                | TokenKind::NotEquals
                | TokenKind::Less
                | TokenKind::LessEquals
                | TokenKind::Greater
                | TokenKind::GreaterEquals
                | TokenKind::Or
                | TokenKind::And
                | TokenKind::Coalesce
                | TokenKind::Plus
                | TokenKind::Dash
                | TokenKind::Slash
                | TokenKind::Star
                | TokenKind::Percent
                | TokenKind::Power
        )
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

pub struct TokenRule {
    pub regex: Regex,
    pub kind: TokenKind,
}

lazy_static! {
    /// The ordered token-rule table. Order is semantic: the first rule whose
    /// pattern matches a non-empty prefix of the remaining input wins, so
    /// keywords (word-boundary anchored) sit before the identifier rule and
    /// multi-character operators before their single-character prefixes.
    pub static ref RULES: Vec<TokenRule> = vec![
        MK_RULE!("^\\s+", TokenKind::Whitespace),
        MK_RULE!("^//[^\\n]*", TokenKind::LineComment),
        MK_RULE!("^/\\*(?s:.)*?\\*/", TokenKind::BlockComment),
        MK_RULE!("^while\\b", TokenKind::While),
        MK_RULE!("^trait\\b", TokenKind::Trait),
        MK_RULE!("^struct\\b", TokenKind::Struct),
        MK_RULE!("^impl\\b", TokenKind::Impl),
        MK_RULE!("^enum\\b", TokenKind::Enum),
        MK_RULE!("^func\\b", TokenKind::Func),
        MK_RULE!("^var\\b", TokenKind::Var),
        MK_RULE!("^if\\b", TokenKind::If),
        MK_RULE!("^else\\b", TokenKind::Else),
        MK_RULE!("^return\\b", TokenKind::Return),
        MK_RULE!("^true\\b", TokenKind::True),
        MK_RULE!("^false\\b", TokenKind::False),
        MK_RULE!("^null\\b", TokenKind::Null),
        MK_RULE!(
            "^[+-]?(0x[0-9a-fA-F]+(\\.[0-9a-fA-F]+)?(p[+-]?[0-9]+)?|0b[01]+|[0-9]+(\\.[0-9]+)?)",
            TokenKind::Number
        ),
        MK_RULE!("^\"(\\\\.|[^\"\\\\])*\"", TokenKind::String),
        MK_RULE!("^[a-zA-Z_][a-zA-Z0-9_]*", TokenKind::Identifier),
        MK_RULE!("^\\(", TokenKind::OpenParen),
        MK_RULE!("^\\)", TokenKind::CloseParen),
        MK_RULE!("^\\[", TokenKind::OpenBracket),
        MK_RULE!("^\\]", TokenKind::CloseBracket),
        MK_RULE!("^\\{", TokenKind::OpenCurly),
        MK_RULE!("^\\}", TokenKind::CloseCurly),
        MK_RULE!("^==", TokenKind::Equals),
        MK_RULE!("^!=", TokenKind::NotEquals),
        MK_RULE!("^!", TokenKind::Not),
        MK_RULE!("^=", TokenKind::Assignment),
        MK_RULE!("^<=", TokenKind::LessEquals),
        MK_RULE!("^<", TokenKind::Less),
        MK_RULE!("^>=", TokenKind::GreaterEquals),
        MK_RULE!("^>", TokenKind::Greater),
        MK_RULE!("^\\|\\|", TokenKind::Or),
        MK_RULE!("^&&", TokenKind::And),
        MK_RULE!("^\\?\\?", TokenKind::Coalesce),
        MK_RULE!("^\\.", TokenKind::Dot),
        MK_RULE!("^;", TokenKind::Semicolon),
        MK_RULE!("^:", TokenKind::Colon),
        MK_RULE!("^,", TokenKind::Comma),
        MK_RULE!("^\\*\\*", TokenKind::Power),
        MK_RULE!("^\\+", TokenKind::Plus),
        MK_RULE!("^-", TokenKind::Dash),
        MK_RULE!("^/", TokenKind::Slash),
        MK_RULE!("^\\*", TokenKind::Star),
        MK_RULE!("^%", TokenKind::Percent),
    ];
}

#[derive(Debug, Clone, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub value: String,
    pub location: Position,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Token {{\nkind: {},\nvalue: {}}}", self.kind, self.value)
    }
}

impl Token {
    /// The location one past the last character of the token, derived by
    /// scanning the matched text for newlines.
    pub fn end_location(&self) -> Position {
        let mut line = self.location.line;
        let mut column = self.location.column;

        for c in self.value.chars() {
            if c == '\n' {
                line += 1;
                column = 1;
            } else {
                column += 1;
            }
        }

        Position::new(line, column, Rc::clone(&self.location.file))
    }
}
