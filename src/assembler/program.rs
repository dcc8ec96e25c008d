use std::collections::HashMap;

use serde::Serialize;

use crate::{
    ast::{statements::Statement, types::TypeExpr},
    Position,
};

pub type Namespace = HashMap<String, Declaration>;

/// A named declaration in a namespace. Struct and trait bodies nest their
/// own member namespaces; variables carry `None` until inference resolves
/// them.
#[derive(Debug, Clone, Serialize)]
pub enum Declaration {
    Builtin {
        name: String,
    },
    Struct {
        name: String,
        members: Namespace,
    },
    Trait {
        name: String,
        refinements: Vec<TypeExpr>,
        members: Namespace,
    },
    Enum {
        name: String,
        cases: Vec<String>,
    },
    Function {
        name: String,
        parameters: Vec<(String, TypeExpr)>,
        return_type: TypeExpr,
        body: Vec<Statement>,
    },
    Variable {
        name: String,
        ty: Option<TypeExpr>,
        location: Position,
    },
}

/// Structural record of an `impl` block. Trait conformance is not checked.
#[derive(Debug, Clone, Serialize)]
pub struct ImplRecord {
    pub target: String,
    pub traits: Vec<TypeExpr>,
    pub members: Namespace,
}

/// The assembled program: a flat global namespace, the executable prelude,
/// and the recorded impl blocks.
#[derive(Debug, Serialize)]
pub struct Program {
    pub declarations: Namespace,
    pub statements: Vec<Statement>,
    pub impls: Vec<ImplRecord>,
}

pub const BUILTIN_TYPES: [&str; 4] = ["Void", "Number", "String", "Bool"];

/// A fresh namespace seeded with the builtin types. Every assembly gets its
/// own copy; the seed is never a shared singleton.
pub fn builtin_namespace() -> Namespace {
    let mut namespace = HashMap::new();
    for name in BUILTIN_TYPES {
        namespace.insert(
            name.to_string(),
            Declaration::Builtin {
                name: name.to_string(),
            },
        );
    }
    namespace
}
