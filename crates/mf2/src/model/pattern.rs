//! Patterns: text interleaved with placeholders.

use serde::{Deserialize, Serialize};

use super::expression::{Expression, Markup};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Placeholder {
    Expression(Expression),
    Markup(Markup),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternPart {
    /// Literal text with escapes resolved.
    Text(String),
    Placeholder(Placeholder),
    /// Raw source of a malformed segment that was skipped during recovery.
    Error(String),
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pattern {
    pub parts: Vec<PatternPart>,
}

impl Pattern {
    /// Appends one character of text, extending the last text run.
    pub fn push_char(&mut self, c: char) {
        match self.parts.last_mut() {
            Some(PatternPart::Text(text)) => text.push(c),
            _ => self.parts.push(PatternPart::Text(c.to_string())),
        }
    }

    /// Appends text, extending the last text run.
    pub fn push_text(&mut self, s: &str) {
        if s.is_empty() {
            return;
        }
        match self.parts.last_mut() {
            Some(PatternPart::Text(text)) => text.push_str(s),
            _ => self.parts.push(PatternPart::Text(s.to_string())),
        }
    }

    pub fn push(&mut self, part: PatternPart) {
        match part {
            PatternPart::Text(text) => self.push_text(&text),
            other => self.parts.push(other),
        }
    }

    /// Concatenation of all text runs, placeholders and error nodes omitted.
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|part| match part {
                PatternPart::Text(text) => Some(text.as_str()),
                PatternPart::Placeholder(_) | PatternPart::Error(_) => None,
            })
            .collect()
    }

    pub fn placeholders(&self) -> impl Iterator<Item = &Placeholder> {
        self.parts.iter().filter_map(|part| match part {
            PatternPart::Placeholder(placeholder) => Some(placeholder),
            PatternPart::Text(_) | PatternPart::Error(_) => None,
        })
    }

    /// True if recovery replaced any part of this pattern.
    pub fn has_errors(&self) -> bool {
        self.parts
            .iter()
            .any(|part| matches!(part, PatternPart::Error(_)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjacent_text_merges() {
        let mut pattern = Pattern::default();
        pattern.push_text("ab");
        pattern.push_char('c');
        pattern.push(PatternPart::Error("}".to_string()));
        pattern.push_char('d');
        pattern.push_text("");
        assert_eq!(
            pattern.parts,
            vec![
                PatternPart::Text("abc".to_string()),
                PatternPart::Error("}".to_string()),
                PatternPart::Text("d".to_string()),
            ]
        );
        assert_eq!(pattern.text(), "abcd");
        assert!(pattern.has_errors());
    }
}
