//! Utility macros for the front end.
//!
//! This module defines helper macros used throughout the lexer:
//!
//! - `MK_TOKEN!` - Creates a Token instance
//! - `MK_RULE!` - Creates an entry of the ordered token-rule table
//!
//! These macros reduce boilerplate in the lexer implementation.

/// Creates a Token instance.
///
/// # Arguments
///
/// * `$kind` - The TokenKind
/// * `$value` - The token's matched text
/// * `$location` - The source location of the first character
///
/// # Example
///
/// ```ignore
/// let token = MK_TOKEN!(TokenKind::Number, "42".to_string(), location);
/// ```
#[macro_export]
macro_rules! MK_TOKEN {
    ($kind:expr, $value:expr, $location:expr) => {
        Token {
            kind: $kind,
            value: $value,
            location: $location,
        }
    };
}

/// Creates an entry of the token-rule table.
///
/// The pattern is anchored to the start of the remaining input; rules are
/// tried in table order and the first non-empty prefix match wins.
///
/// # Example
///
/// ```ignore
/// MK_RULE!("^while\\b", TokenKind::While)
/// ```
#[macro_export]
macro_rules! MK_RULE {
    ($pattern:literal, $kind:expr) => {
        TokenRule {
            regex: Regex::new($pattern).unwrap(),
            kind: $kind,
        }
    };
}
