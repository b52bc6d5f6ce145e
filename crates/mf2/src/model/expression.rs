//! Expressions, annotations, markup and their option/attribute receivers.

use std::collections::BTreeMap;
use std::collections::btree_map::Entry;

use serde::{Deserialize, Serialize};

use super::names::{FunctionName, Identifier, Operand};

/// Returned by a [`NamedSink`] that refuses a repeated name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DuplicateName(pub Identifier);

/// Receiver of `(name, value)` pairs from the option and attribute
/// routines of the parser. Each implementation decides its own policy for
/// repeated names.
pub trait NamedSink<V> {
    fn accept(&mut self, name: Identifier, value: V) -> Result<(), DuplicateName>;
}

/// Options of a function annotation or markup. Names are unique.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionMap(pub BTreeMap<Identifier, Operand>);

impl OptionMap {
    pub fn get(&self, name: &Identifier) -> Option<&Operand> {
        self.0.get(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Identifier, &Operand)> {
        self.0.iter()
    }
}

impl NamedSink<Operand> for OptionMap {
    fn accept(&mut self, name: Identifier, value: Operand) -> Result<(), DuplicateName> {
        match self.0.entry(name) {
            Entry::Occupied(entry) => Err(DuplicateName(entry.key().clone())),
            Entry::Vacant(entry) => {
                entry.insert(value);
                Ok(())
            }
        }
    }
}

/// `@name` or `@name=literal`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    pub name: Identifier,
    pub value: Option<Operand>,
}

/// Attributes in source order. Repeated names are kept.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attributes(pub Vec<Attribute>);

impl Attributes {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Attribute> {
        self.0.iter()
    }
}

impl NamedSink<Option<Operand>> for Attributes {
    fn accept(&mut self, name: Identifier, value: Option<Operand>) -> Result<(), DuplicateName> {
        self.0.push(Attribute { name, value });
        Ok(())
    }
}

/// A function call: `:name opt=value ...`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operator {
    pub name: FunctionName,
    pub options: OptionMap,
}

/// An annotation using a reserved or private-use sigil. Kept opaque.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservedAnnotation {
    pub sigil: char,
    pub body: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Annotation {
    Function(Operator),
    Reserved(ReservedAnnotation),
}

/// `{operand :function options @attributes}`; at least one of operand and
/// annotation is present.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expression {
    pub operand: Option<Operand>,
    pub annotation: Option<Annotation>,
    pub attributes: Attributes,
}

impl Expression {
    /// The function annotation, if the expression has one.
    pub fn operator(&self) -> Option<&Operator> {
        match &self.annotation {
            Some(Annotation::Function(operator)) => Some(operator),
            Some(Annotation::Reserved(_)) | None => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkupKind {
    Open,
    Close,
    Standalone,
}

/// `{#name ...}`, `{/name ...}` or `{#name .../}`. Close tags have no
/// options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Markup {
    pub kind: MarkupKind,
    pub name: Identifier,
    pub options: OptionMap,
    pub attributes: Attributes,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Literal, VariableName};

    fn literal(value: &str) -> Operand {
        Operand::Literal(Literal::unquoted(value))
    }

    #[test]
    fn test_option_map_rejects_duplicates() {
        let mut options = OptionMap::default();
        assert!(options.accept(Identifier::new("a"), literal("1")).is_ok());
        assert_eq!(
            options.accept(Identifier::new("a"), literal("2")),
            Err(DuplicateName(Identifier::new("a")))
        );
        assert_eq!(options.get(&Identifier::new("a")), Some(&literal("1")));
        assert_eq!(options.len(), 1);
    }

    #[test]
    fn test_option_map_namespaces_are_distinct() {
        let mut options = OptionMap::default();
        assert!(options.accept(Identifier::new("a"), literal("1")).is_ok());
        assert!(
            options
                .accept(Identifier::namespaced("u", "a"), literal("2"))
                .is_ok()
        );
        assert_eq!(options.len(), 2);
    }

    #[test]
    fn test_attributes_keep_duplicates_in_order() {
        let mut attributes = Attributes::default();
        assert!(attributes.accept(Identifier::new("a"), Some(literal("1"))).is_ok());
        assert!(attributes.accept(Identifier::new("a"), None).is_ok());
        let values: Vec<_> = attributes.iter().map(|a| a.value.clone()).collect();
        assert_eq!(values, vec![Some(literal("1")), None]);
    }

    #[test]
    fn test_operator_accessor() {
        let expression = Expression {
            operand: Some(Operand::Variable(VariableName("x".to_string()))),
            annotation: Some(Annotation::Reserved(ReservedAnnotation {
                sigil: '!',
                body: None,
            })),
            attributes: Attributes::default(),
        };
        assert!(expression.operator().is_none());
    }
}
