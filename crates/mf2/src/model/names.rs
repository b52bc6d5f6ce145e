//! Names, literals and operands.

use std::fmt::{Display, Formatter, Result as FmtResult};

use serde::{Deserialize, Serialize};

/// A possibly namespaced name, written `name` or `namespace:name`.
///
/// Serializes as its source form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub struct Identifier {
    pub namespace: Option<String>,
    pub name: String,
}

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            name: name.into(),
        }
    }

    pub fn namespaced(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            name: name.into(),
        }
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match &self.namespace {
            Some(namespace) => write!(f, "{namespace}:{}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

impl From<Identifier> for String {
    fn from(identifier: Identifier) -> Self {
        identifier.to_string()
    }
}

impl From<String> for Identifier {
    fn from(source: String) -> Self {
        match source.split_once(':') {
            Some((namespace, name)) => Identifier::namespaced(namespace, name),
            None => Identifier::new(source),
        }
    }
}

/// The name of a variable, without its `$` sigil.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VariableName(pub String);

impl VariableName {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for VariableName {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "${}", self.0)
    }
}

/// The name of a function, without its `:` sigil.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FunctionName(pub Identifier);

impl Display for FunctionName {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, ":{}", self.0)
    }
}

/// A quoted (`|...|`) or unquoted literal. `value` has escapes resolved.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Literal {
    pub quoted: bool,
    pub value: String,
}

impl Literal {
    pub fn quoted(value: impl Into<String>) -> Self {
        Self {
            quoted: true,
            value: value.into(),
        }
    }

    pub fn unquoted(value: impl Into<String>) -> Self {
        Self {
            quoted: false,
            value: value.into(),
        }
    }
}

/// The subject of an expression or the value of an option.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operand {
    Literal(Literal),
    Variable(VariableName),
}

impl Operand {
    pub fn as_variable(&self) -> Option<&VariableName> {
        match self {
            Operand::Variable(name) => Some(name),
            Operand::Literal(_) => None,
        }
    }
}
