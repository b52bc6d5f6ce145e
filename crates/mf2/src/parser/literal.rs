//! Literals, escapes, names, identifiers and variables.

use crate::builder::MessageBuilder;
use crate::model::{Identifier, Literal, VariableName};
use crate::parser::error::{ErrorKind, Expected, PResult};
use crate::parser::grammar::Parser;
use crate::parser::lexer;

impl<B: MessageBuilder + ?Sized> Parser<'_, B> {
    /// `quoted / unquoted`
    pub(super) fn literal(&mut self) -> PResult<Literal> {
        match self.cursor.peek() {
            Some('|') => self.quoted_literal(),
            Some(c) if self.classes.is_name_start(c) => {
                Ok(Literal::unquoted(self.lex(lexer::name, Expected::Name)?))
            }
            Some(c) if self.classes.is_unquoted_start(c) => {
                Ok(Literal::unquoted(self.lex(lexer::number, Expected::Number)?))
            }
            _ => Err(self.unexpected(Expected::Literal)),
        }
    }

    /// `"|" *(quoted-char / escaped-char) "|"`
    ///
    /// The normalized form escapes only `\` and `|`.
    pub(super) fn quoted_literal(&mut self) -> PResult<Literal> {
        self.bump();
        let mut value = String::new();
        loop {
            match self.cursor.peek() {
                None => return Err(self.fail(ErrorKind::UnterminatedLiteral)),
                Some('|') => {
                    self.bump();
                    break;
                }
                Some('\\') => value.push(self.escape()?),
                Some(c) if self.classes.is_quoted(c) => {
                    self.bump();
                    value.push(c);
                }
                Some(_) => return Err(self.unexpected(Expected::QuotedText)),
            }
        }

        self.emit_char('|');
        for c in value.chars() {
            if matches!(c, '\\' | '|') {
                self.emit_char('\\');
            }
            self.emit_char(c);
        }
        self.emit_char('|');
        Ok(Literal::quoted(value))
    }

    /// Consumes `\` and the escaped code point, returning the latter. Emits
    /// nothing.
    pub(super) fn escape(&mut self) -> PResult<char> {
        self.bump();
        match self.cursor.peek() {
            Some(c) if self.classes.is_escapable(c) => {
                self.bump();
                Ok(c)
            }
            found => Err(self.fail(ErrorKind::InvalidEscape { found })),
        }
    }

    /// `[bidi] name [bidi]`; the returned name excludes the marks.
    pub(super) fn name(&mut self) -> PResult<String> {
        self.optional_bidi();
        let name = self.lex(lexer::name, Expected::Name)?;
        self.optional_bidi();
        Ok(name)
    }

    /// `[namespace ":"] name`
    pub(super) fn identifier(&mut self) -> PResult<Identifier> {
        let first = self.name()?;
        let mut n = 1;
        while self.cursor.peek_at(n).is_some_and(|c| self.classes.is_bidi(c)) {
            n += 1;
        }
        if self.cursor.peek() == Some(':')
            && self
                .cursor
                .peek_at(n)
                .is_some_and(|c| self.classes.is_name_start(c))
        {
            self.bump_emit();
            let name = self.name()?;
            Ok(Identifier::namespaced(first, name))
        } else {
            Ok(Identifier::new(first))
        }
    }

    /// `"$" name`
    pub(super) fn variable(&mut self) -> PResult<VariableName> {
        self.expect_char('$', Expected::Variable)?;
        Ok(VariableName(self.name()?))
    }
}
