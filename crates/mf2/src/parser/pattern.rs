//! Pattern bodies.

use crate::builder::MessageBuilder;
use crate::model::{Pattern, PatternPart};
use crate::parser::error::{ErrorKind, Expected, PResult};
use crate::parser::grammar::Parser;

impl<B: MessageBuilder + ?Sized> Parser<'_, B> {
    /// The pattern of a simple message, running to end of input.
    pub(super) fn simple_pattern(&mut self) -> PResult<Pattern> {
        self.nested(|p| {
            let mut pattern = Pattern::default();
            while let Some(c) = p.cursor.peek() {
                p.pattern_part(&mut pattern, c)?;
            }
            Ok(pattern)
        })
    }

    /// `"{{" pattern "}}"`
    ///
    /// A code point that cannot appear in pattern text is reported as a
    /// recoverable error; the text from there up to the closing `}}` becomes
    /// a single [`PatternPart::Error`].
    pub(super) fn quoted_pattern(&mut self) -> PResult<Pattern> {
        self.nested(|p| {
            p.expect_token("{{")?;
            let mut pattern = Pattern::default();
            loop {
                match p.cursor.peek() {
                    None => return Err(p.fail(ErrorKind::UnterminatedPattern)),
                    Some('}') if p.cursor.next_is("}}") => break,
                    Some(c) if c == '{' || c == '\\' || p.classes.is_text(c) => {
                        p.pattern_part(&mut pattern, c)?;
                    }
                    Some(found) => p.recover(&mut pattern, found)?,
                }
            }
            p.expect_token("}}")?;
            Ok(pattern)
        })
    }

    /// One placeholder, escape or text code point.
    fn pattern_part(&mut self, pattern: &mut Pattern, c: char) -> PResult<()> {
        match c {
            '{' => {
                let placeholder = self.placeholder()?;
                pattern.push(PatternPart::Placeholder(placeholder));
            }
            '\\' => {
                let escaped = self.escape()?;
                self.emit_char('\\');
                self.emit_char(escaped);
                pattern.push_char(escaped);
            }
            c if self.classes.is_text(c) => {
                self.bump_emit();
                pattern.push_char(c);
            }
            _ => return Err(self.unexpected(Expected::PatternText)),
        }
        Ok(())
    }

    /// Skips to the closing `}}` of the current quoted pattern.
    fn recover(&mut self, pattern: &mut Pattern, found: char) -> PResult<()> {
        let at = self.mark();
        self.record(at, ErrorKind::InvalidPatternCharacter { found });
        let mut raw = String::new();
        while !self.cursor.next_is("}}") {
            match self.bump_emit() {
                Some(c) => raw.push(c),
                None => return Err(self.fail(ErrorKind::UnterminatedPattern)),
            }
        }
        pattern.push(PatternPart::Error(raw));
        Ok(())
    }
}
