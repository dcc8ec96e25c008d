use serde::Serialize;

use crate::Position;

use super::{expressions::Expression, types::TypeExpr};

/// A fully parsed statement. Declaration variants keep their bodies as
/// nested statement lists; the assembler decides which statements are legal
/// where and folds declarations into namespaces.
#[derive(Debug, Clone, Serialize)]
pub enum Statement {
    While {
        location: Position,
        condition: Expression,
        body: Vec<Statement>,
    },
    If {
        location: Position,
        condition: Expression,
        body: Vec<Statement>,
        else_branch: Option<ElseBranch>,
    },
    Return {
        location: Position,
        value: Option<Expression>,
    },
    Expression {
        expression: Expression,
    },
    TraitDecl {
        location: Position,
        name: String,
        refinements: Vec<TypeExpr>,
        body: Vec<Statement>,
    },
    StructDecl {
        location: Position,
        name: String,
        body: Vec<Statement>,
    },
    EnumDecl {
        location: Position,
        name: String,
        cases: Vec<String>,
    },
    FuncDecl {
        location: Position,
        name: String,
        parameters: Vec<(String, TypeExpr)>,
        return_type: TypeExpr,
        body: Vec<Statement>,
    },
    VarDecl {
        location: Position,
        name: String,
        explicit_type: Option<TypeExpr>,
        value: Option<Expression>,
    },
    ImplBlock {
        location: Position,
        target: String,
        traits: Vec<TypeExpr>,
        body: Vec<Statement>,
    },
}

#[derive(Debug, Clone, Serialize)]
pub enum ElseBranch {
    If(Box<Statement>),
    Block(Vec<Statement>),
}

impl Statement {
    pub fn location(&self) -> &Position {
        match self {
            Statement::While { location, .. }
            | Statement::If { location, .. }
            | Statement::Return { location, .. }
            | Statement::TraitDecl { location, .. }
            | Statement::StructDecl { location, .. }
            | Statement::EnumDecl { location, .. }
            | Statement::FuncDecl { location, .. }
            | Statement::VarDecl { location, .. }
            | Statement::ImplBlock { location, .. } => location,
            Statement::Expression { expression } => expression.location(),
        }
    }
}
