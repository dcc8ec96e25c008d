#![allow(clippy::module_inception)]

use std::rc::Rc;

use serde::Serialize;

use crate::errors::errors::{Error, ErrorTip};

pub mod assembler;
pub mod ast;
pub mod errors;
pub mod lexer;
pub mod macros;
pub mod parser;

extern crate regex;

/// A location in a source file, 1-based in both line and column.
#[derive(Debug, Clone, Serialize)]
pub struct Position {
    pub line: u32,
    pub column: u32,
    pub file: Rc<String>,
}

impl Position {
    pub fn new(line: u32, column: u32, file: Rc<String>) -> Self {
        Position { line, column, file }
    }

    /// Position for synthetic nodes (builtin and meta types) that exist in
    /// no source file.
    pub fn null() -> Self {
        Position {
            line: 0,
            column: 0,
            file: Rc::new(String::from("<null>")),
        }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

pub fn get_source_line(source: &str, line: u32) -> String {
    source
        .lines()
        .nth(line.saturating_sub(1) as usize)
        .unwrap_or("")
        .to_string()
}

pub fn display_error(error: &Error, source: &str) {
    /*
        Error: message
        -> final.sb:20:9
           |
        20 | var a = #;
           | --------^
    */

    let position = error.get_position();
    let line_text = get_source_line(source, position.line);

    let line_string = position.line.to_string();
    let padding = line_string.len() + 2;

    if let ErrorTip::None = error.get_tip() {
        println!("Error: {}", error.get_error_name());
    } else {
        println!("Error: {} ({})", error.get_error_name(), error.get_tip());
    }
    println!("-> {}", position);
    println!("{:>padding$}", "|");

    let (line_text_removed, removed_whitespace) = remove_starting_whitespace(&line_text);
    println!("{} | {}", line_string, line_text_removed.trim_end());

    let arrows = (position.column.max(1) as usize)
        .saturating_sub(removed_whitespace)
        .max(1);

    println!("{:>padding$} {:->arrows$}", "|", "^");
}

fn remove_starting_whitespace(string: &str) -> (String, usize) {
    let mut start = 0;
    for c in string.chars() {
        if c == ' ' {
            start += 1;
        } else {
            break;
        }
    }

    (String::from(&string[start..]), start)
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_get_source_line() {
        let source = "Hello, world!\nThis is a test\n\nTesting { }\n";

        assert_eq!(super::get_source_line(source, 1), "Hello, world!");
        assert_eq!(super::get_source_line(source, 4), "Testing { }");
        assert_eq!(super::get_source_line(source, 9), "");
    }

    #[test]
    fn test_remove_starting_whitespace() {
        let (text, removed) = super::remove_starting_whitespace("    var x;");
        assert_eq!(text, "var x;");
        assert_eq!(removed, 4);
    }
}
