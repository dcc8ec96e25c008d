use std::fmt::Display;

use thiserror::Error;

use crate::lexer::tokens::{Token, TokenKind};
use crate::Position;

#[derive(Debug, Clone)]
pub struct Error {
    internal_error: ErrorImpl,
    position: Position,
}

impl Error {
    pub fn new(error_impl: ErrorImpl, position: Position) -> Self {
        Error {
            internal_error: error_impl,
            position,
        }
    }

    /// Shorthand for the most common error: the parser saw `token` where it
    /// expected one of `expected`.
    pub fn unexpected(token: &Token, expected: Vec<TokenKind>) -> Self {
        Error::new(
            ErrorImpl::UnexpectedToken {
                token: token.value.clone(),
                expected,
            },
            token.location.clone(),
        )
    }

    /// Input ended while a construct was still open.
    pub fn eof(position: Position) -> Self {
        Error::new(
            ErrorImpl::UnexpectedEof {
                file: Some((*position.file).clone()),
            },
            position,
        )
    }

    pub fn get_position(&self) -> &Position {
        &self.position
    }

    pub fn get_error(&self) -> &ErrorImpl {
        &self.internal_error
    }

    pub fn get_error_name(&self) -> &str {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => "UnrecognisedToken",
            ErrorImpl::UnexpectedToken { .. } => "UnexpectedToken",
            ErrorImpl::UnexpectedEof { .. } => "UnexpectedEof",
            ErrorImpl::UnexpectedStatement => "UnexpectedStatement",
            ErrorImpl::DuplicateDeclaration { .. } => "DuplicateDeclaration",
            ErrorImpl::UnresolvedType { .. } => "UnresolvedType",
            ErrorImpl::TypeMismatch { .. } => "TypeMismatch",
            ErrorImpl::UnimplementedFeature { .. } => "UnimplementedFeature",
        }
    }

    pub fn get_tip(&self) -> ErrorTip {
        match &self.internal_error {
            ErrorImpl::UnrecognisedToken { .. } => ErrorTip::None,
            ErrorImpl::UnexpectedToken { token, expected } => {
                if expected.is_empty() {
                    ErrorTip::Suggestion(format!(
                        "Unexpected token: `{}`, did you miss a semicolon?",
                        token
                    ))
                } else {
                    ErrorTip::Suggestion(format!(
                        "Unexpected token: `{}`, expected one of: {}",
                        token,
                        expected
                            .iter()
                            .map(|kind| kind.to_string())
                            .collect::<Vec<String>>()
                            .join(", ")
                    ))
                }
            }
            ErrorImpl::UnexpectedEof { .. } => {
                ErrorTip::Suggestion(String::from("Input ended before the construct was closed"))
            }
            ErrorImpl::UnexpectedStatement => ErrorTip::Suggestion(String::from(
                "Only declarations are allowed in this position",
            )),
            ErrorImpl::DuplicateDeclaration { name } => {
                ErrorTip::Suggestion(format!("`{}` is already declared in this scope", name))
            }
            ErrorImpl::UnresolvedType { name } => ErrorTip::Suggestion(format!(
                "The type of `{}` could not be determined",
                name
            )),
            ErrorImpl::TypeMismatch { expected, received } => ErrorTip::Suggestion(format!(
                "Expected type `{}`, received `{}`",
                expected, received
            )),
            ErrorImpl::UnimplementedFeature { feature } => ErrorTip::Suggestion(format!(
                "{} is not supported yet",
                feature
            )),
        }
    }
}

pub enum ErrorTip {
    None,
    Suggestion(String),
}

impl Display for ErrorTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorTip::None => write!(f, ""),
            ErrorTip::Suggestion(suggestion) => write!(f, "{}", suggestion),
        }
    }
}

#[derive(Error, Debug, Clone)]
pub enum ErrorImpl {
    #[error("unrecognised token: {token:?}")]
    UnrecognisedToken { token: String },
    #[error("unexpected token: {token:?}")]
    UnexpectedToken {
        token: String,
        expected: Vec<TokenKind>,
    },
    #[error("unexpected end of input")]
    UnexpectedEof { file: Option<String> },
    #[error("unexpected statement")]
    UnexpectedStatement,
    #[error("declaration {name:?} already exists")]
    DuplicateDeclaration { name: String },
    #[error("unresolved type for {name:?}")]
    UnresolvedType { name: String },
    #[error("types do not match: expected {expected:?}, received {received:?}")]
    TypeMismatch { expected: String, received: String },
    #[error("unimplemented feature: {feature}")]
    UnimplementedFeature { feature: String },
}
