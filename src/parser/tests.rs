//! Unit tests for the parser module.
//!
//! This module contains tests for parsing various language constructs
//! including:
//! - Declarations (var, func, struct, trait, enum, impl)
//! - Control flow statements
//! - Call/index/member disambiguation
//! - Operator precedence and associativity
//! - Type expressions
//! - Error cases

use crate::ast::expressions::Expression;
use crate::ast::statements::{ElseBranch, Statement};
use crate::ast::types::TypeExpr;
use crate::errors::errors::Error;
use crate::lexer::lexer::lex;
use crate::lexer::tokens::TokenKind;

use super::parser::parse;

fn parse_source(source: &str) -> Result<Vec<Statement>, Error> {
    let tokens = lex(source.to_string(), Some("test.sb".to_string())).unwrap();
    parse(tokens)
}

fn parse_expression_stmt(source: &str) -> Expression {
    let statements = parse_source(source).unwrap();
    assert_eq!(statements.len(), 1);
    match statements.into_iter().next() {
        Some(Statement::Expression { expression }) => expression,
        other => panic!("expected expression statement, got {:?}", other),
    }
}

#[test]
fn test_parse_variable_declaration() {
    let statements = parse_source("var x = 42;").unwrap();

    match &statements[0] {
        Statement::VarDecl {
            name,
            explicit_type,
            value,
            ..
        } => {
            assert_eq!(name, "x");
            assert!(explicit_type.is_none());
            assert!(matches!(value, Some(Expression::Number { .. })));
        }
        other => panic!("expected var declaration, got {:?}", other),
    }
}

#[test]
fn test_parse_variable_with_annotation() {
    let statements = parse_source("var x: Number;").unwrap();

    match &statements[0] {
        Statement::VarDecl {
            explicit_type: Some(ty),
            value,
            ..
        } => {
            assert!(ty.is_named("Number"));
            assert!(value.is_none());
        }
        other => panic!("expected annotated var declaration, got {:?}", other),
    }
}

#[test]
fn test_parse_generic_type_annotation() {
    let statements = parse_source("var m: Map[String, Number];").unwrap();

    match &statements[0] {
        Statement::VarDecl {
            explicit_type: Some(TypeExpr::Generic { base, arguments }),
            ..
        } => {
            assert!(base.is_named("Map"));
            assert_eq!(arguments.len(), 2);
            assert!(arguments[0].is_named("String"));
            assert!(arguments[1].is_named("Number"));
        }
        other => panic!("expected generic annotation, got {:?}", other),
    }
}

#[test]
fn test_parse_dotted_type_annotation() {
    let statements = parse_source("var d: Foo.Bar;").unwrap();

    match &statements[0] {
        Statement::VarDecl {
            explicit_type: Some(TypeExpr::Property { base, name }),
            ..
        } => {
            assert!(base.is_named("Foo"));
            assert_eq!(name, "Bar");
        }
        other => panic!("expected dotted annotation, got {:?}", other),
    }
}

#[test]
fn test_parse_function_declaration() {
    let statements = parse_source("func add(a: Number, b: Number): Number { return a + b; }")
        .unwrap();

    match &statements[0] {
        Statement::FuncDecl {
            name,
            parameters,
            return_type,
            body,
            ..
        } => {
            assert_eq!(name, "add");
            assert_eq!(parameters.len(), 2);
            assert_eq!(parameters[0].0, "a");
            assert!(parameters[0].1.is_named("Number"));
            assert!(return_type.is_named("Number"));
            assert_eq!(body.len(), 1);
            assert!(matches!(body[0], Statement::Return { .. }));
        }
        other => panic!("expected func declaration, got {:?}", other),
    }
}

#[test]
fn test_parse_function_defaults_to_void_return() {
    let statements = parse_source("func noop() {}").unwrap();

    match &statements[0] {
        Statement::FuncDecl { return_type, .. } => assert!(return_type.is_named("Void")),
        other => panic!("expected func declaration, got {:?}", other),
    }
}

#[test]
fn test_parse_generic_parameter_type() {
    let statements = parse_source("func take(m: Map[String, Number], n: Number) {}").unwrap();

    match &statements[0] {
        Statement::FuncDecl { parameters, .. } => {
            assert_eq!(parameters.len(), 2);
            assert!(matches!(parameters[0].1, TypeExpr::Generic { .. }));
            assert!(parameters[1].1.is_named("Number"));
        }
        other => panic!("expected func declaration, got {:?}", other),
    }
}

#[test]
fn test_parse_struct_declaration() {
    let statements = parse_source("struct Point { var x: Number; var y: Number; }").unwrap();

    match &statements[0] {
        Statement::StructDecl { name, body, .. } => {
            assert_eq!(name, "Point");
            assert_eq!(body.len(), 2);
            assert!(matches!(body[0], Statement::VarDecl { .. }));
        }
        other => panic!("expected struct declaration, got {:?}", other),
    }
}

#[test]
fn test_parse_trait_with_refinements() {
    let statements = parse_source("trait Printable: Base, Other { func show() {} }").unwrap();

    match &statements[0] {
        Statement::TraitDecl {
            name, refinements, body, ..
        } => {
            assert_eq!(name, "Printable");
            assert_eq!(refinements.len(), 2);
            assert!(refinements[0].is_named("Base"));
            assert!(refinements[1].is_named("Other"));
            assert_eq!(body.len(), 1);
        }
        other => panic!("expected trait declaration, got {:?}", other),
    }
}

#[test]
fn test_parse_impl_block() {
    let statements = parse_source("impl Point: Printable { func show() {} }").unwrap();

    match &statements[0] {
        Statement::ImplBlock {
            target, traits, body, ..
        } => {
            assert_eq!(target, "Point");
            assert_eq!(traits.len(), 1);
            assert!(traits[0].is_named("Printable"));
            assert_eq!(body.len(), 1);
        }
        other => panic!("expected impl block, got {:?}", other),
    }
}

#[test]
fn test_parse_enum_declaration() {
    let statements = parse_source("enum Color { Red, Green, Blue, }").unwrap();

    match &statements[0] {
        Statement::EnumDecl { name, cases, .. } => {
            assert_eq!(name, "Color");
            assert_eq!(cases, &["Red", "Green", "Blue"]);
        }
        other => panic!("expected enum declaration, got {:?}", other),
    }
}

#[test]
fn test_parse_while_loop() {
    let statements = parse_source("while (x < 10) { x = x + 1; }").unwrap();

    match &statements[0] {
        Statement::While {
            condition, body, ..
        } => {
            assert!(matches!(condition, Expression::Binary { .. }));
            assert_eq!(body.len(), 1);
        }
        other => panic!("expected while loop, got {:?}", other),
    }
}

#[test]
fn test_parse_if_else_chain() {
    let statements =
        parse_source("if (a) { x = 1; } else if (b) { x = 2; } else { x = 3; }").unwrap();

    match &statements[0] {
        Statement::If { else_branch, .. } => match else_branch {
            Some(ElseBranch::If(nested)) => match &**nested {
                Statement::If { else_branch, .. } => {
                    assert!(matches!(else_branch, Some(ElseBranch::Block(_))));
                }
                other => panic!("expected nested if, got {:?}", other),
            },
            other => panic!("expected else-if branch, got {:?}", other),
        },
        other => panic!("expected if statement, got {:?}", other),
    }
}

#[test]
fn test_parse_call_expression() {
    let expression = parse_expression_stmt("f(x);");

    match expression {
        Expression::Call { callee, arguments } => {
            assert!(matches!(*callee, Expression::Symbol { .. }));
            assert_eq!(arguments.len(), 1);
        }
        other => panic!("expected call, got {:?}", other),
    }
}

#[test]
fn test_parse_grouped_atom_is_not_a_call() {
    let expression = parse_expression_stmt("(x);");
    assert!(matches!(expression, Expression::Symbol { .. }));
}

#[test]
fn test_parse_grouped_callee() {
    let expression = parse_expression_stmt("(f)(x);");

    match expression {
        Expression::Call { callee, arguments } => {
            match *callee {
                Expression::Symbol { token } => assert_eq!(token.value, "f"),
                other => panic!("expected grouped symbol callee, got {:?}", other),
            }
            assert_eq!(arguments.len(), 1);
        }
        other => panic!("expected call, got {:?}", other),
    }
}

#[test]
fn test_parse_empty_argument_list() {
    let expression = parse_expression_stmt("f();");

    match expression {
        Expression::Call { arguments, .. } => assert!(arguments.is_empty()),
        other => panic!("expected call, got {:?}", other),
    }
}

#[test]
fn test_parse_nested_call_arguments() {
    let expression = parse_expression_stmt("f(g(a, b), c);");

    match expression {
        Expression::Call { arguments, .. } => {
            assert_eq!(arguments.len(), 2);
            match &arguments[0] {
                Expression::Call { arguments, .. } => assert_eq!(arguments.len(), 2),
                other => panic!("expected nested call, got {:?}", other),
            }
        }
        other => panic!("expected call, got {:?}", other),
    }
}

#[test]
fn test_parse_access_chain() {
    let expression = parse_expression_stmt("f(x)[0].y;");

    match expression {
        Expression::Member { target, property } => {
            assert_eq!(property.value, "y");
            match *target {
                Expression::Index { target, .. } => {
                    assert!(matches!(*target, Expression::Call { .. }));
                }
                other => panic!("expected index access, got {:?}", other),
            }
        }
        other => panic!("expected member access, got {:?}", other),
    }
}

#[test]
fn test_parse_member_access() {
    let expression = parse_expression_stmt("point.x;");

    match expression {
        Expression::Member { target, property } => {
            assert!(matches!(*target, Expression::Symbol { .. }));
            assert_eq!(property.value, "x");
        }
        other => panic!("expected member access, got {:?}", other),
    }
}

#[test]
fn test_parse_grouped_subexpression_after_operator() {
    let expression = parse_expression_stmt("a + (b * c);");

    match expression {
        Expression::Binary {
            operator, right, ..
        } => {
            assert_eq!(operator.kind, TokenKind::Plus);
            assert!(matches!(*right, Expression::Binary { .. }));
        }
        other => panic!("expected binary expression, got {:?}", other),
    }
}

#[test]
fn test_parse_multiplication_binds_tighter_than_addition() {
    let expression = parse_expression_stmt("1 + 2 * 3;");

    match expression {
        Expression::Binary {
            operator,
            left,
            right,
        } => {
            assert_eq!(operator.kind, TokenKind::Plus);
            assert!(matches!(*left, Expression::Number { .. }));
            match *right {
                Expression::Binary { operator, .. } => {
                    assert_eq!(operator.kind, TokenKind::Star)
                }
                other => panic!("expected multiplication, got {:?}", other),
            }
        }
        other => panic!("expected binary expression, got {:?}", other),
    }
}

#[test]
fn test_parse_exponent_is_right_associative() {
    let expression = parse_expression_stmt("2 ** 3 ** 4;");

    match expression {
        Expression::Binary {
            operator,
            left,
            right,
        } => {
            assert_eq!(operator.kind, TokenKind::Power);
            assert!(matches!(*left, Expression::Number { .. }));
            assert!(matches!(*right, Expression::Binary { .. }));
        }
        other => panic!("expected binary expression, got {:?}", other),
    }
}

#[test]
fn test_parse_logical_precedence() {
    // `a || b && c` groups as `a || (b && c)`
    let expression = parse_expression_stmt("a || b && c;");

    match expression {
        Expression::Binary {
            operator, right, ..
        } => {
            assert_eq!(operator.kind, TokenKind::Or);
            match *right {
                Expression::Binary { operator, .. } => assert_eq!(operator.kind, TokenKind::And),
                other => panic!("expected logical and, got {:?}", other),
            }
        }
        other => panic!("expected binary expression, got {:?}", other),
    }
}

#[test]
fn test_parse_assignment_expression() {
    let expression = parse_expression_stmt("x = 1 + 2;");

    match expression {
        Expression::Assignment { target, value } => {
            assert_eq!(target.value, "x");
            assert!(matches!(*value, Expression::Binary { .. }));
        }
        other => panic!("expected assignment, got {:?}", other),
    }
}

#[test]
fn test_parse_assignment_target_must_be_identifier() {
    let error = parse_source("1 = 2;").unwrap_err();
    assert_eq!(error.get_error_name(), "UnexpectedToken");
}

#[test]
fn test_parse_prefix_expressions() {
    let expression = parse_expression_stmt("!a;");
    match expression {
        Expression::Prefix { operator, .. } => assert_eq!(operator.kind, TokenKind::Not),
        other => panic!("expected prefix expression, got {:?}", other),
    }

    let expression = parse_expression_stmt("- x;");
    match expression {
        Expression::Prefix { operator, .. } => assert_eq!(operator.kind, TokenKind::Dash),
        other => panic!("expected prefix expression, got {:?}", other),
    }
}

#[test]
fn test_parse_coalesce_operator() {
    let expression = parse_expression_stmt("a ?? b;");
    match expression {
        Expression::Binary { operator, .. } => assert_eq!(operator.kind, TokenKind::Coalesce),
        other => panic!("expected binary expression, got {:?}", other),
    }
}

#[test]
fn test_parse_return_without_value() {
    let statements = parse_source("func f() { return; }").unwrap();

    match &statements[0] {
        Statement::FuncDecl { body, .. } => match &body[0] {
            Statement::Return { value, .. } => assert!(value.is_none()),
            other => panic!("expected return, got {:?}", other),
        },
        other => panic!("expected func declaration, got {:?}", other),
    }
}

#[test]
fn test_parse_missing_semicolon_is_eof() {
    let error = parse_source("var x = 5").unwrap_err();
    assert_eq!(error.get_error_name(), "UnexpectedEof");
}

#[test]
fn test_parse_unclosed_group_is_eof() {
    let error = parse_source("(a;").unwrap_err();
    assert_eq!(error.get_error_name(), "UnexpectedEof");
}

#[test]
fn test_parse_unclosed_struct_body_is_eof() {
    let error = parse_source("struct P {").unwrap_err();
    assert_eq!(error.get_error_name(), "UnexpectedEof");
}

#[test]
fn test_parse_operator_cannot_start_statement() {
    let error = parse_source("* 5;").unwrap_err();
    assert_eq!(error.get_error_name(), "UnexpectedToken");
    match error.get_error() {
        crate::errors::errors::ErrorImpl::UnexpectedToken { expected, .. } => {
            assert!(expected.contains(&TokenKind::Var));
            assert!(expected.contains(&TokenKind::Identifier));
            assert!(!expected.contains(&TokenKind::Star));
        }
        other => panic!("expected UnexpectedToken payload, got {:?}", other),
    }
}

#[test]
fn test_parse_else_requires_if_or_block() {
    let error = parse_source("if (x) {} else var y = 1;").unwrap_err();
    assert_eq!(error.get_error_name(), "UnexpectedToken");
}

#[test]
fn test_parse_two_identifiers_in_type_is_error() {
    let error = parse_source("var x: A B;").unwrap_err();
    assert_eq!(error.get_error_name(), "UnexpectedToken");
}

#[test]
fn test_parse_empty_generic_argument_is_error() {
    let error = parse_source("var x: Map[];").unwrap_err();
    assert_eq!(error.get_error_name(), "UnexpectedEof");
}

#[test]
fn test_parse_empty_program() {
    let statements = parse_source("").unwrap();
    assert!(statements.is_empty());
}

#[test]
fn test_parse_multiple_statements() {
    let statements = parse_source("var x = 10; var y = 20; x = x + y;").unwrap();
    assert_eq!(statements.len(), 3);
}

#[test]
fn test_parse_comments_are_ignored_by_grammar() {
    let statements = parse_source("var x /* inline */ = 5; // done").unwrap();
    assert_eq!(statements.len(), 1);
    assert!(matches!(statements[0], Statement::VarDecl { .. }));
}
