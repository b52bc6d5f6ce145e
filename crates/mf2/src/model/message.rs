//! Messages: declarations plus a pattern or matcher body.

use serde::{Deserialize, Serialize};

use super::expression::Expression;
use super::names::{Literal, VariableName};
use super::pattern::Pattern;

/// A variant key: a literal or the `*` wildcard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Literal(Literal),
    Wildcard,
}

/// The keys of one variant, one per selector.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SelectorKeys(pub Vec<Key>);

impl SelectorKeys {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// True if every key is `*`.
    pub fn is_fallback(&self) -> bool {
        self.0.iter().all(|key| matches!(key, Key::Wildcard))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    pub keys: SelectorKeys,
    pub pattern: Pattern,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Matcher {
    pub selectors: Vec<Expression>,
    pub variants: Vec<Variant>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Declaration {
    /// `.local $name = {expression}`
    Local {
        name: VariableName,
        value: Expression,
    },
    /// `.input {$name ...}`; `value.operand` is the variable `name`.
    Input {
        name: VariableName,
        value: Expression,
    },
    /// A statement with a reserved keyword, kept structurally.
    Unsupported {
        keyword: String,
        body: Option<String>,
        expressions: Vec<Expression>,
    },
}

impl Declaration {
    /// The variable bound by this declaration.
    pub fn variable(&self) -> Option<&VariableName> {
        match self {
            Declaration::Local { name, .. } | Declaration::Input { name, .. } => Some(name),
            Declaration::Unsupported { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Body {
    Pattern(Pattern),
    Matcher(Matcher),
}

impl Body {
    /// `"pattern"` or `"matcher"`.
    pub fn shape(&self) -> &'static str {
        match self {
            Body::Pattern(_) => "pattern",
            Body::Matcher(_) => "matcher",
        }
    }
}

/// A parsed message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MFDataModel {
    pub declarations: Vec<Declaration>,
    pub body: Body,
}

impl MFDataModel {
    pub fn pattern(&self) -> Option<&Pattern> {
        match &self.body {
            Body::Pattern(pattern) => Some(pattern),
            Body::Matcher(_) => None,
        }
    }

    pub fn matcher(&self) -> Option<&Matcher> {
        match &self.body {
            Body::Matcher(matcher) => Some(matcher),
            Body::Pattern(_) => None,
        }
    }
}
