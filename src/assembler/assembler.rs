use crate::{
    ast::{expressions::Expression, statements::Statement},
    errors::errors::{Error, ErrorImpl},
    lexer::tokens::{Token, TokenKind},
    Position, MK_TOKEN,
};

use super::{
    infer::resolve_types,
    program::{builtin_namespace, Declaration, ImplRecord, Namespace, Program},
};

/// Folds a statement sequence into a program.
///
/// Top-level declarations are merged into the builtin-seeded namespace;
/// while/if/expression statements become the executable prelude; `impl`
/// blocks are recorded structurally. A `var` initializer is desugared into
/// an assignment appended to the prelude, which is what the inference pass
/// scans afterwards to backfill omitted variable types.
pub fn assemble(statements: Vec<Statement>) -> Result<Program, Error> {
    let mut declarations = builtin_namespace();
    let mut run_list = vec![];
    let mut impls = vec![];

    for statement in statements {
        match statement {
            Statement::VarDecl {
                location,
                name,
                explicit_type,
                value,
            } => {
                declare(
                    &mut declarations,
                    name.clone(),
                    Declaration::Variable {
                        name: name.clone(),
                        ty: explicit_type,
                        location: location.clone(),
                    },
                    &location,
                )?;

                if let Some(value) = value {
                    let target = MK_TOKEN!(TokenKind::Identifier, name, location);
                    run_list.push(Statement::Expression {
                        expression: Expression::Assignment {
                            target,
                            value: Box::new(value),
                        },
                    });
                }
            }
            Statement::TraitDecl { .. }
            | Statement::StructDecl { .. }
            | Statement::EnumDecl { .. }
            | Statement::FuncDecl { .. } => {
                fold_declaration(&mut declarations, statement)?;
            }
            Statement::ImplBlock {
                target,
                traits,
                body,
                ..
            } => {
                impls.push(ImplRecord {
                    target,
                    traits,
                    members: merge_body(body)?,
                });
            }
            Statement::Return { location, .. } => {
                return Err(Error::new(ErrorImpl::UnexpectedStatement, location));
            }
            other => run_list.push(other),
        }
    }

    resolve_types(&mut declarations, &run_list)?;
    check_resolved(&declarations)?;

    Ok(Program {
        declarations,
        statements: run_list,
        impls,
    })
}

fn declare(
    namespace: &mut Namespace,
    name: String,
    declaration: Declaration,
    location: &Position,
) -> Result<(), Error> {
    if namespace.contains_key(&name) {
        return Err(Error::new(
            ErrorImpl::DuplicateDeclaration { name },
            location.clone(),
        ));
    }
    namespace.insert(name, declaration);
    Ok(())
}

/// Merges one declaration statement into a namespace. Only declarations are
/// accepted here; callers handle the statements that are legal elsewhere.
fn fold_declaration(namespace: &mut Namespace, statement: Statement) -> Result<(), Error> {
    match statement {
        Statement::TraitDecl {
            location,
            name,
            refinements,
            body,
        } => {
            let members = merge_body(body)?;
            declare(
                namespace,
                name.clone(),
                Declaration::Trait {
                    name,
                    refinements,
                    members,
                },
                &location,
            )
        }
        Statement::StructDecl {
            location,
            name,
            body,
        } => {
            let members = merge_body(body)?;
            declare(
                namespace,
                name.clone(),
                Declaration::Struct { name, members },
                &location,
            )
        }
        Statement::EnumDecl {
            location,
            name,
            cases,
        } => declare(
            namespace,
            name.clone(),
            Declaration::Enum { name, cases },
            &location,
        ),
        Statement::FuncDecl {
            location,
            name,
            parameters,
            return_type,
            body,
        } => declare(
            namespace,
            name.clone(),
            Declaration::Function {
                name,
                parameters,
                return_type,
                body,
            },
            &location,
        ),
        Statement::VarDecl {
            location,
            name,
            explicit_type,
            // Member initializers are not recorded: nested namespaces model
            // declared types only, and inference never runs inside bodies.
            value: _,
        } => declare(
            namespace,
            name.clone(),
            Declaration::Variable {
                name,
                ty: explicit_type,
                location: location.clone(),
            },
            &location,
        ),
        other => Err(Error::new(
            ErrorImpl::UnexpectedStatement,
            other.location().clone(),
        )),
    }
}

/// Builds the member namespace of a struct, trait, or impl body. Anything
/// that is not a declaration is rejected.
fn merge_body(body: Vec<Statement>) -> Result<Namespace, Error> {
    let mut members = Namespace::new();
    for statement in body {
        fold_declaration(&mut members, statement)?;
    }
    Ok(members)
}

/// After inference, every variable must have a type.
fn check_resolved(namespace: &Namespace) -> Result<(), Error> {
    for declaration in namespace.values() {
        match declaration {
            Declaration::Variable {
                name,
                ty: None,
                location,
            } => {
                return Err(Error::new(
                    ErrorImpl::UnresolvedType { name: name.clone() },
                    location.clone(),
                ));
            }
            Declaration::Struct { members, .. } | Declaration::Trait { members, .. } => {
                check_resolved(members)?;
            }
            _ => {}
        }
    }
    Ok(())
}
