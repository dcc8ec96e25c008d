//! The structural type evaluator.
//!
//! Inference is deliberately minimal: it computes a static type for the
//! right-hand side of top-level assignments so that `var x = 5;` can be
//! declared as a Number without an annotation. Struct and enum names
//! evaluate to the reflective meta-type `Type[Name]`; function names to
//! `Func[Param..., Return]`. Both meta-types are ordinary generic type
//! nodes, which lets calls type-check constructors and functions the same
//! way.

use crate::{
    ast::{expressions::Expression, statements::Statement, types::TypeExpr},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::TokenKind,
    Position,
};

use super::program::{Declaration, Namespace};

const TYPE_META: &str = "Type";
const FUNC_META: &str = "Func";

fn builtin(name: &str) -> TypeExpr {
    TypeExpr::symbol(name, Position::null())
}

/// `Type[Name]`: the type of a type name itself.
pub fn meta_type(name: &str) -> TypeExpr {
    TypeExpr::Generic {
        base: Box::new(builtin(TYPE_META)),
        arguments: vec![builtin(name)],
    }
}

/// `Func[Param..., Return]`: the type of a callable.
pub fn func_type(parameters: &[(String, TypeExpr)], return_type: &TypeExpr) -> TypeExpr {
    let mut arguments: Vec<TypeExpr> = parameters.iter().map(|(_, ty)| ty.clone()).collect();
    arguments.push(return_type.clone());
    TypeExpr::Generic {
        base: Box::new(builtin(FUNC_META)),
        arguments,
    }
}

/// Scans the executable prelude for `identifier = expr` assignments whose
/// target is a variable declared without a type, and backfills the
/// declaration with the evaluated type of the right-hand side. Statements
/// are visited in order, so later assignments see earlier results.
pub fn resolve_types(namespace: &mut Namespace, statements: &[Statement]) -> Result<(), Error> {
    for statement in statements {
        let Statement::Expression {
            expression: Expression::Assignment { target, value },
        } = statement
        else {
            continue;
        };

        let untyped = matches!(
            namespace.get(&target.value),
            Some(Declaration::Variable { ty: None, .. })
        );
        if !untyped {
            continue;
        }

        let inferred = evaluate_type(value, namespace)?;
        if let Some(Declaration::Variable { ty, .. }) = namespace.get_mut(&target.value) {
            *ty = Some(inferred);
        }
    }
    Ok(())
}

/// Computes the static type of an expression against the namespace.
pub fn evaluate_type(expression: &Expression, namespace: &Namespace) -> Result<TypeExpr, Error> {
    match expression {
        Expression::Number { .. } => Ok(builtin("Number")),
        Expression::String { .. } => Ok(builtin("String")),
        Expression::Bool { .. } => Ok(builtin("Bool")),
        Expression::Null { token } => Err(Error::new(
            ErrorImpl::UnimplementedFeature {
                feature: String::from("typing of null literals"),
            },
            token.location.clone(),
        )),
        Expression::Symbol { token } => resolve_name(&token.value, namespace, &token.location),
        Expression::Assignment { .. } => Ok(builtin("Void")),
        Expression::Prefix { operator, operand } => {
            let operand_type = evaluate_type(operand, namespace)?;
            let required = match operator.kind {
                TokenKind::Not => "Bool",
                _ => "Number",
            };
            if !operand_type.is_named(required) {
                return Err(Error::new(
                    ErrorImpl::TypeMismatch {
                        expected: required.to_string(),
                        received: operand_type.to_string(),
                    },
                    operand.location().clone(),
                ));
            }
            Ok(operand_type)
        }
        Expression::Binary {
            operator, right, ..
        } => match operator.kind {
            TokenKind::Equals
            | TokenKind::NotEquals
            | TokenKind::Less
            | TokenKind::LessEquals
            | TokenKind::Greater
            | TokenKind::GreaterEquals
            | TokenKind::Or
            | TokenKind::And => Ok(builtin("Bool")),
            TokenKind::Coalesce => evaluate_type(right, namespace),
            TokenKind::Plus
            | TokenKind::Dash
            | TokenKind::Star
            | TokenKind::Slash
            | TokenKind::Percent
            | TokenKind::Power => Ok(builtin("Number")),
            _ => Err(Error::unexpected(operator, vec![])),
        },
        Expression::Member { target, property } => {
            let base = evaluate_type(target, namespace)?;
            let Some(struct_name) = meta_target(&base) else {
                return Err(Error::new(
                    ErrorImpl::TypeMismatch {
                        expected: String::from("a struct type"),
                        received: base.to_string(),
                    },
                    target.location().clone(),
                ));
            };

            let Some(Declaration::Struct { members, .. }) = namespace.get(struct_name) else {
                return Err(Error::new(
                    ErrorImpl::TypeMismatch {
                        expected: String::from("a struct type"),
                        received: base.to_string(),
                    },
                    target.location().clone(),
                ));
            };

            match members.get(&property.value) {
                Some(Declaration::Variable { ty: Some(ty), .. }) => Ok(ty.clone()),
                Some(Declaration::Function {
                    parameters,
                    return_type,
                    ..
                }) => Ok(func_type(parameters, return_type)),
                _ => Err(Error::new(
                    ErrorImpl::UnresolvedType {
                        name: property.value.clone(),
                    },
                    property.location.clone(),
                )),
            }
        }
        Expression::Call { callee, .. } => {
            let callee_type = evaluate_type(callee, namespace)?;
            match &callee_type {
                TypeExpr::Generic { base, arguments } if base.is_named(FUNC_META) => arguments
                    .last()
                    .cloned()
                    .ok_or_else(|| {
                        Error::new(
                            ErrorImpl::TypeMismatch {
                                expected: String::from("a callable type"),
                                received: callee_type.to_string(),
                            },
                            callee.location().clone(),
                        )
                    }),
                TypeExpr::Generic { base, arguments } if base.is_named(TYPE_META) => {
                    // A constructor call yields the constructed type.
                    arguments.first().cloned().ok_or_else(|| {
                        Error::new(
                            ErrorImpl::TypeMismatch {
                                expected: String::from("a callable type"),
                                received: callee_type.to_string(),
                            },
                            callee.location().clone(),
                        )
                    })
                }
                other => Err(Error::new(
                    ErrorImpl::TypeMismatch {
                        expected: String::from("a callable type"),
                        received: other.to_string(),
                    },
                    callee.location().clone(),
                )),
            }
        }
        Expression::Index { target, .. } => Err(Error::new(
            ErrorImpl::UnimplementedFeature {
                feature: String::from("typing of index access"),
            },
            target.location().clone(),
        )),
    }
}

fn resolve_name(
    name: &str,
    namespace: &Namespace,
    location: &Position,
) -> Result<TypeExpr, Error> {
    match namespace.get(name) {
        Some(Declaration::Builtin { name })
        | Some(Declaration::Struct { name, .. })
        | Some(Declaration::Trait { name, .. })
        | Some(Declaration::Enum { name, .. }) => Ok(meta_type(name)),
        Some(Declaration::Function {
            parameters,
            return_type,
            ..
        }) => Ok(func_type(parameters, return_type)),
        Some(Declaration::Variable { ty: Some(ty), .. }) => Ok(ty.clone()),
        _ => Err(Error::new(
            ErrorImpl::UnresolvedType {
                name: name.to_string(),
            },
            location.clone(),
        )),
    }
}

/// If `ty` is the meta-type `Type[Name]`, returns `Name`.
fn meta_target(ty: &TypeExpr) -> Option<&str> {
    if let TypeExpr::Generic { base, arguments } = ty {
        if base.is_named(TYPE_META) && arguments.len() == 1 {
            if let TypeExpr::Symbol { name, .. } = &arguments[0] {
                return Some(name);
            }
        }
    }
    None
}
