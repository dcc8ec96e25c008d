//! Unit tests for error handling.
//!
//! This module contains tests for error types and error reporting.

use crate::errors::errors::{Error, ErrorImpl, ErrorTip};
use crate::lexer::tokens::TokenKind;
use crate::Position;
use std::rc::Rc;

fn test_position() -> Position {
    Position::new(3, 7, Rc::new("test.sb".to_string()))
}

#[test]
fn test_error_creation() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        test_position(),
    );

    assert_eq!(error.get_error_name(), "UnrecognisedToken");
}

#[test]
fn test_error_position() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "identifier".to_string(),
            expected: vec![],
        },
        test_position(),
    );

    assert_eq!(error.get_position().line, 3);
    assert_eq!(error.get_position().column, 7);
    assert_eq!(*error.get_position().file, "test.sb");
}

#[test]
fn test_unexpected_token_error() {
    let error = Error::new(
        ErrorImpl::UnexpectedToken {
            token: "}".to_string(),
            expected: vec![TokenKind::Identifier],
        },
        test_position(),
    );

    assert_eq!(error.get_error_name(), "UnexpectedToken");
    match error.get_tip() {
        ErrorTip::Suggestion(tip) => assert!(tip.contains("Identifier")),
        _ => panic!("Expected suggestion tip"),
    }
}

#[test]
fn test_unexpected_eof_error() {
    let error = Error::new(
        ErrorImpl::UnexpectedEof {
            file: Some("test.sb".to_string()),
        },
        test_position(),
    );

    assert_eq!(error.get_error_name(), "UnexpectedEof");
}

#[test]
fn test_duplicate_declaration_error() {
    let error = Error::new(
        ErrorImpl::DuplicateDeclaration {
            name: "Point".to_string(),
        },
        test_position(),
    );

    assert_eq!(error.get_error_name(), "DuplicateDeclaration");
}

#[test]
fn test_unresolved_type_error() {
    let error = Error::new(
        ErrorImpl::UnresolvedType {
            name: "x".to_string(),
        },
        test_position(),
    );

    assert_eq!(error.get_error_name(), "UnresolvedType");
}

#[test]
fn test_type_mismatch_error() {
    let error = Error::new(
        ErrorImpl::TypeMismatch {
            expected: "Bool".to_string(),
            received: "Number".to_string(),
        },
        test_position(),
    );

    assert_eq!(error.get_error_name(), "TypeMismatch");
}

#[test]
fn test_unimplemented_feature_error() {
    let error = Error::new(
        ErrorImpl::UnimplementedFeature {
            feature: "index access typing".to_string(),
        },
        test_position(),
    );

    assert_eq!(error.get_error_name(), "UnimplementedFeature");
}

#[test]
fn test_error_tip_none() {
    let error = Error::new(
        ErrorImpl::UnrecognisedToken {
            token: "@".to_string(),
        },
        test_position(),
    );

    assert!(matches!(error.get_tip(), ErrorTip::None));
}

#[test]
fn test_error_tip_display() {
    let tip = ErrorTip::Suggestion("Try this instead".to_string());
    assert_eq!(tip.to_string(), "Try this instead");

    let tip = ErrorTip::None;
    assert_eq!(tip.to_string(), "");
}
