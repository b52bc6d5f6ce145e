//! Parser state, shared helpers and the message-level grammar.

use std::collections::HashSet;

use crate::builder::MessageBuilder;
use crate::chars::{CharClasses, classes};
use crate::model::{
    Body, DuplicateName, Identifier, Key, Matcher, NamedSink, SelectorKeys, Variant,
};
use crate::parser::cursor::Cursor;
use crate::parser::error::{
    ErrorKind, ErrorReporter, Expected, Failure, Mark, PResult, ParseError,
};
use crate::parser::lexer::Lexer;
use crate::parser::options::ParseOptions;

/// What follows a run of whitespace and bidi marks, without consuming it.
#[derive(Debug, Clone, Copy)]
pub(super) struct Lookahead {
    pub saw_whitespace: bool,
    pub next: Option<char>,
    pub after_next: Option<char>,
}

impl Lookahead {
    /// True if the run is a valid `s` separator followed by a code point
    /// satisfying `start`.
    pub fn separated_then(&self, start: impl Fn(char) -> bool) -> bool {
        self.saw_whitespace && self.next.is_some_and(start)
    }

    /// True if the run is followed by `{` opening an expression rather than
    /// `{{` opening a quoted pattern.
    pub fn then_expression(&self) -> bool {
        self.next == Some('{') && self.after_next != Some('{')
    }
}

/// Recursive-descent parser for one message.
///
/// Owns the cursor and error reporter for the duration of a parse and
/// borrows the caller's builder and normalized-output buffer.
pub(crate) struct Parser<'a, B: MessageBuilder + ?Sized> {
    pub(super) cursor: Cursor<'a>,
    pub(super) classes: &'static CharClasses,
    reporter: ErrorReporter,
    normalized: &'a mut String,
    pub(super) builder: &'a mut B,
    options: &'a ParseOptions,
    depth: usize,
    pub(super) declared: HashSet<String>,
}

impl<'a, B: MessageBuilder + ?Sized> Parser<'a, B> {
    pub fn new(
        source: &'a [char],
        options: &'a ParseOptions,
        builder: &'a mut B,
        normalized: &'a mut String,
    ) -> Self {
        Self {
            cursor: Cursor::new(source),
            classes: classes(),
            reporter: ErrorReporter::new(),
            normalized,
            builder,
            options,
            depth: 0,
            declared: HashSet::new(),
        }
    }

    /// Translates the recoverable errors collected during the parse.
    pub fn finish(self) -> Vec<ParseError> {
        self.reporter
            .finish(self.cursor.source(), self.options.context_len)
    }

    // =========================================================================
    // Consumption and normalized output
    // =========================================================================

    /// Consumes one code point, keeping line tracking current.
    pub(super) fn bump(&mut self) -> Option<char> {
        let index = self.cursor.index();
        let c = self.cursor.advance()?;
        self.reporter.maybe_advance_line(c, index);
        Some(c)
    }

    /// Consumes one code point and copies it to the normalized output.
    pub(super) fn bump_emit(&mut self) -> Option<char> {
        let c = self.bump()?;
        self.normalized.push(c);
        Some(c)
    }

    pub(super) fn emit(&mut self, s: &str) {
        self.normalized.push_str(s);
    }

    pub(super) fn emit_char(&mut self, c: char) {
        self.normalized.push(c);
    }

    /// Length of the normalized output so far, for capturing a slice of it.
    pub(super) fn normalized_len(&self) -> usize {
        self.normalized.len()
    }

    pub(super) fn normalized_since(&self, start: usize) -> String {
        self.normalized[start..].to_string()
    }

    // =========================================================================
    // Errors
    // =========================================================================

    pub(super) fn mark(&self) -> Mark {
        self.reporter.mark(self.cursor.index())
    }

    pub(super) fn fail(&self, kind: ErrorKind) -> Failure {
        self.fail_at(self.mark(), kind)
    }

    pub(super) fn fail_at(&self, at: Mark, kind: ErrorKind) -> Failure {
        tracing::debug!(offset = at.offset, error = %kind, "fatal parse error");
        Failure { kind, at }
    }

    pub(super) fn record(&mut self, at: Mark, kind: ErrorKind) {
        self.reporter.record(kind, at);
    }

    /// Error for the code point under the cursor, or for end of input.
    pub(super) fn unexpected(&self, expected: Expected) -> Failure {
        match self.cursor.peek() {
            Some(found) => self.fail(ErrorKind::UnexpectedCharacter { found, expected }),
            None => self.fail(ErrorKind::UnexpectedEnd { expected }),
        }
    }

    pub(super) fn expect_char(&mut self, c: char, expected: Expected) -> PResult<()> {
        if self.cursor.peek() == Some(c) {
            self.bump_emit();
            Ok(())
        } else {
            Err(self.unexpected(expected))
        }
    }

    /// Consumes `token`, failing at the first code point that differs.
    pub(super) fn expect_token(&mut self, token: &'static str) -> PResult<()> {
        for c in token.chars() {
            self.expect_char(c, Expected::Token(token))?;
        }
        Ok(())
    }

    /// Runs a token recognizer at the cursor and consumes what it matched.
    pub(super) fn lex(&mut self, lexer: Lexer, expected: Expected) -> PResult<String> {
        let rest = self.cursor.rest();
        let mut input = rest;
        match lexer(&mut input) {
            Ok(matched) => {
                let text: String = matched.iter().collect();
                for _ in 0..matched.len() {
                    self.bump();
                }
                self.emit(&text);
                Ok(text)
            }
            Err(_) => {
                for _ in 0..rest.len() - input.len() {
                    self.bump();
                }
                Err(self.unexpected(expected))
            }
        }
    }

    /// Feeds `(name, value)` to `sink`, turning a refusal into a duplicate
    /// option error at `at`.
    pub(super) fn accept<V, S: NamedSink<V>>(
        &self,
        sink: &mut S,
        name: Identifier,
        value: V,
        at: Mark,
    ) -> PResult<()> {
        sink.accept(name, value).map_err(|DuplicateName(name)| {
            self.fail_at(
                at,
                ErrorKind::DuplicateOption {
                    name: name.to_string(),
                },
            )
        })
    }

    /// Runs `f` one nesting level deeper.
    pub(super) fn nested<T>(&mut self, f: impl FnOnce(&mut Self) -> PResult<T>) -> PResult<T> {
        if self.depth >= self.options.max_depth {
            return Err(self.fail(ErrorKind::NestingTooDeep {
                limit: self.options.max_depth,
            }));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    // =========================================================================
    // Whitespace
    // =========================================================================

    pub(super) fn lookahead(&self) -> Lookahead {
        let mut len = 0;
        let mut saw_whitespace = false;
        while let Some(c) = self.cursor.peek_at(len) {
            if self.classes.is_whitespace(c) {
                saw_whitespace = true;
            } else if !self.classes.is_bidi(c) {
                break;
            }
            len += 1;
        }
        Lookahead {
            saw_whitespace,
            next: self.cursor.peek_at(len),
            after_next: self.cursor.peek_at(len + 1),
        }
    }

    /// Consumes a run of whitespace and bidi marks. Bidi marks are emitted
    /// as written; the whitespace of the run becomes one space. Returns
    /// whether the run held any whitespace.
    pub(super) fn optional_ws(&mut self) -> bool {
        let mut saw_whitespace = false;
        while let Some(c) = self.cursor.peek() {
            if self.classes.is_whitespace(c) {
                self.bump();
                if !saw_whitespace {
                    self.emit_char(' ');
                    saw_whitespace = true;
                }
            } else if self.classes.is_bidi(c) {
                self.bump_emit();
            } else {
                break;
            }
        }
        saw_whitespace
    }

    /// Consumes and emits a run of bidi marks.
    pub(super) fn optional_bidi(&mut self) {
        while self.cursor.peek().is_some_and(|c| self.classes.is_bidi(c)) {
            self.bump_emit();
        }
    }

    pub(super) fn required_ws(&mut self) -> PResult<()> {
        if self.optional_ws() {
            Ok(())
        } else {
            Err(self.fail(ErrorKind::MissingWhitespace))
        }
    }

    // =========================================================================
    // Message
    // =========================================================================

    pub fn parse_message(&mut self) -> PResult<()> {
        if self.is_complex() {
            self.complex_message()
        } else {
            self.simple_message()
        }
    }

    /// A message is complex if its first code point after whitespace and
    /// bidi marks starts a declaration, a matcher or a quoted pattern.
    fn is_complex(&mut self) -> bool {
        let start = self.cursor.index();
        while self
            .cursor
            .peek()
            .is_some_and(|c| self.classes.is_whitespace(c) || self.classes.is_bidi(c))
        {
            self.cursor.advance();
        }
        let complex = self.cursor.peek() == Some('.') || self.cursor.next_is("{{");
        self.cursor.reset(start);
        complex
    }

    fn simple_message(&mut self) -> PResult<()> {
        self.emit("{{");
        let pattern = self.simple_pattern()?;
        self.emit("}}");
        tracing::debug!(parts = pattern.parts.len(), "parsed simple message");
        self.builder.set_body(Body::Pattern(pattern));
        Ok(())
    }

    fn complex_message(&mut self) -> PResult<()> {
        self.optional_ws();
        self.declarations()?;
        self.complex_body()?;
        self.optional_ws();
        if !self.cursor.all_consumed() {
            return Err(self.unexpected(Expected::EndOfInput));
        }
        Ok(())
    }

    fn complex_body(&mut self) -> PResult<()> {
        if self.cursor.next_is("{{") {
            let pattern = self.quoted_pattern()?;
            tracing::debug!(
                declarations = self.declared.len(),
                "parsed complex message with pattern body"
            );
            self.builder.set_body(Body::Pattern(pattern));
            Ok(())
        } else if self.cursor.next_is(".match") {
            let matcher = self.matcher()?;
            tracing::debug!(
                declarations = self.declared.len(),
                selectors = matcher.selectors.len(),
                variants = matcher.variants.len(),
                "parsed complex message with matcher body"
            );
            self.builder.set_body(Body::Matcher(matcher));
            Ok(())
        } else {
            Err(self.unexpected(Expected::Body))
        }
    }

    // =========================================================================
    // Matcher
    // =========================================================================

    fn matcher(&mut self) -> PResult<Matcher> {
        self.expect_token(".match")?;

        let mut selectors = Vec::new();
        while self.lookahead().then_expression() {
            self.optional_ws();
            selectors.push(self.expression()?);
        }
        if selectors.is_empty() {
            self.optional_ws();
            return Err(self.unexpected(Expected::Selector));
        }

        let mut variants = Vec::new();
        let mut variant_marks = Vec::new();
        while self
            .lookahead()
            .next
            .is_some_and(|c| self.classes.is_key_start(c))
        {
            self.optional_ws();
            variant_marks.push(self.mark());
            variants.push(self.variant()?);
        }
        if variants.is_empty() {
            self.optional_ws();
            return Err(self.unexpected(Expected::Key));
        }

        for (variant, at) in variants.iter().zip(variant_marks) {
            if variant.keys.len() != selectors.len() {
                return Err(self.fail_at(
                    at,
                    ErrorKind::VariantKeyMismatch {
                        expected: selectors.len(),
                        found: variant.keys.len(),
                    },
                ));
            }
        }
        if !variants.iter().any(|variant| variant.keys.is_fallback()) {
            return Err(self.fail(ErrorKind::MissingFallbackVariant));
        }

        Ok(Matcher {
            selectors,
            variants,
        })
    }

    /// `key *(s key) [s] quoted-pattern`
    fn variant(&mut self) -> PResult<Variant> {
        let mut keys = vec![self.key()?];
        while self
            .lookahead()
            .separated_then(|c| self.classes.is_key_start(c))
        {
            self.optional_ws();
            keys.push(self.key()?);
        }
        self.optional_ws();
        let pattern = self.quoted_pattern()?;
        Ok(Variant {
            keys: SelectorKeys(keys),
            pattern,
        })
    }

    fn key(&mut self) -> PResult<Key> {
        match self.cursor.peek() {
            Some('*') => {
                self.bump_emit();
                Ok(Key::Wildcard)
            }
            Some(c) if self.classes.is_literal_start(c) => Ok(Key::Literal(self.literal()?)),
            _ => Err(self.unexpected(Expected::Key)),
        }
    }
}
