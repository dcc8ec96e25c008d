use std::fmt::Display;

use serde::Serialize;

use crate::Position;

/// A type expression. The grammar is deliberately narrow: identifiers,
/// `.`-qualified names, and `Name[Arg, ...]` generic instantiations.
#[derive(Debug, Clone, Serialize)]
pub enum TypeExpr {
    Symbol {
        name: String,
        location: Position,
    },
    Property {
        base: Box<TypeExpr>,
        name: String,
    },
    Generic {
        base: Box<TypeExpr>,
        arguments: Vec<TypeExpr>,
    },
}

impl TypeExpr {
    pub fn symbol(name: &str, location: Position) -> TypeExpr {
        TypeExpr::Symbol {
            name: name.to_string(),
            location,
        }
    }

    pub fn location(&self) -> &Position {
        match self {
            TypeExpr::Symbol { location, .. } => location,
            TypeExpr::Property { base, .. } => base.location(),
            TypeExpr::Generic { base, .. } => base.location(),
        }
    }

    pub fn is_named(&self, name: &str) -> bool {
        matches!(self, TypeExpr::Symbol { name: n, .. } if n == name)
    }
}

// Equality is structural; source locations never participate.
impl PartialEq for TypeExpr {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (TypeExpr::Symbol { name: a, .. }, TypeExpr::Symbol { name: b, .. }) => a == b,
            (
                TypeExpr::Property { base: a, name: an },
                TypeExpr::Property { base: b, name: bn },
            ) => an == bn && a == b,
            (
                TypeExpr::Generic {
                    base: a,
                    arguments: aa,
                },
                TypeExpr::Generic {
                    base: b,
                    arguments: ba,
                },
            ) => a == b && aa == ba,
            _ => false,
        }
    }
}

impl Display for TypeExpr {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TypeExpr::Symbol { name, .. } => write!(f, "{}", name),
            TypeExpr::Property { base, name } => write!(f, "{}.{}", base, name),
            TypeExpr::Generic { base, arguments } => {
                write!(f, "{}[", base)?;
                for (index, argument) in arguments.iter().enumerate() {
                    if index > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", argument)?;
                }
                write!(f, "]")
            }
        }
    }
}
