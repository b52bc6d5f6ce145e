//! Placeholders: expressions, annotations, options, attributes and markup.

use crate::builder::MessageBuilder;
use crate::model::{
    Annotation, Attributes, Expression, FunctionName, Markup, MarkupKind, NamedSink, Operand,
    Operator, OptionMap, Placeholder, ReservedAnnotation,
};
use crate::parser::error::{ErrorKind, Expected, Mark, PResult};
use crate::parser::grammar::Parser;

impl<B: MessageBuilder + ?Sized> Parser<'_, B> {
    /// An expression or markup, chosen by the first code point after `{`
    /// and any whitespace.
    pub(super) fn placeholder(&mut self) -> PResult<Placeholder> {
        let mut n = 1;
        while self
            .cursor
            .peek_at(n)
            .is_some_and(|c| self.classes.is_whitespace(c) || self.classes.is_bidi(c))
        {
            n += 1;
        }
        match self.cursor.peek_at(n) {
            Some('#' | '/') => Ok(Placeholder::Markup(self.markup()?)),
            _ => Ok(Placeholder::Expression(self.expression()?)),
        }
    }

    pub(super) fn expression(&mut self) -> PResult<Expression> {
        self.expression_with_operand_mark()
            .map(|(expression, _)| expression)
    }

    /// `{ [s] ((operand [s annotation]) / annotation) *(s attribute) [s] }`
    ///
    /// Also returns the position of the operand, or of the annotation when
    /// there is no operand.
    pub(super) fn expression_with_operand_mark(&mut self) -> PResult<(Expression, Mark)> {
        self.nested(|p| {
            p.expect_char('{', Expected::Expression)?;
            p.optional_ws();
            let at = p.mark();

            let (operand, annotation) = match p.cursor.peek() {
                Some(c) if c == '$' || p.classes.is_literal_start(c) => {
                    let operand = p.operand()?;
                    let annotation = if p
                        .lookahead()
                        .separated_then(|c| p.classes.is_annotation_start(c))
                    {
                        p.optional_ws();
                        Some(p.annotation()?)
                    } else {
                        None
                    };
                    (Some(operand), annotation)
                }
                Some(c) if p.classes.is_annotation_start(c) => (None, Some(p.annotation()?)),
                _ => return Err(p.unexpected(Expected::OperandOrAnnotation)),
            };

            let mut attributes = Attributes::default();
            p.attributes(&mut attributes)?;
            p.optional_ws();
            p.expect_char('}', Expected::Token("}"))?;

            Ok((
                Expression {
                    operand,
                    annotation,
                    attributes,
                },
                at,
            ))
        })
    }

    /// `literal / variable`
    fn operand(&mut self) -> PResult<Operand> {
        match self.cursor.peek() {
            Some('$') => Ok(Operand::Variable(self.variable()?)),
            Some(c) if self.classes.is_literal_start(c) => Ok(Operand::Literal(self.literal()?)),
            _ => Err(self.unexpected(Expected::Operand)),
        }
    }

    /// `":" identifier *(s option)` or a reserved annotation.
    fn annotation(&mut self) -> PResult<Annotation> {
        match self.cursor.peek() {
            Some(':') => {
                self.bump_emit();
                let name = FunctionName(self.identifier()?);
                let mut options = OptionMap::default();
                self.options(&mut options)?;
                Ok(Annotation::Function(Operator { name, options }))
            }
            Some(sigil) if self.classes.is_annotation_start(sigil) => {
                let at = self.mark();
                self.bump_emit();
                self.record(at, ErrorKind::UnsupportedAnnotation { sigil });
                let body = if self
                    .lookahead()
                    .next
                    .is_some_and(|c| self.classes.is_reserved_part_start(c))
                {
                    self.optional_ws();
                    Some(self.reserved_body()?)
                } else {
                    None
                };
                Ok(Annotation::Reserved(ReservedAnnotation { sigil, body }))
            }
            _ => Err(self.unexpected(Expected::OperandOrAnnotation)),
        }
    }

    /// `*(s option)`, feeding each option to `sink`.
    fn options<S: NamedSink<Operand>>(&mut self, sink: &mut S) -> PResult<()> {
        while self
            .lookahead()
            .separated_then(|c| self.classes.is_name_start(c))
        {
            self.optional_ws();
            let at = self.mark();
            let name = self.identifier()?;
            self.optional_ws();
            self.expect_char('=', Expected::Token("="))?;
            self.optional_ws();
            let value = self.operand()?;
            self.accept(sink, name, value, at)?;
        }
        Ok(())
    }

    /// `*(s "@" identifier [[s] "=" [s] literal])`, feeding each attribute
    /// to `sink`.
    fn attributes<S: NamedSink<Option<Operand>>>(&mut self, sink: &mut S) -> PResult<()> {
        while self.lookahead().separated_then(|c| c == '@') {
            self.optional_ws();
            let at = self.mark();
            self.bump_emit();
            let name = self.identifier()?;
            let value = if self.lookahead().next == Some('=') {
                self.optional_ws();
                self.bump_emit();
                self.optional_ws();
                Some(Operand::Literal(self.literal()?))
            } else {
                None
            };
            self.accept(sink, name, value, at)?;
        }
        Ok(())
    }

    /// `{#name ...}`, `{#name .../}` or `{/name ...}`
    fn markup(&mut self) -> PResult<Markup> {
        self.nested(|p| {
            p.expect_char('{', Expected::Token("{"))?;
            p.optional_ws();
            let open = match p.cursor.peek() {
                Some('#') => true,
                Some('/') => false,
                _ => return Err(p.unexpected(Expected::MarkupSigil)),
            };
            p.bump_emit();
            let name = p.identifier()?;

            let mut options = OptionMap::default();
            if open {
                p.options(&mut options)?;
            } else if p
                .lookahead()
                .separated_then(|c| p.classes.is_name_start(c))
            {
                p.optional_ws();
                return Err(p.fail(ErrorKind::OptionsOnClose));
            }

            let mut attributes = Attributes::default();
            p.attributes(&mut attributes)?;
            p.optional_ws();

            let kind = if open && p.cursor.peek() == Some('/') {
                p.bump_emit();
                MarkupKind::Standalone
            } else if open {
                MarkupKind::Open
            } else {
                MarkupKind::Close
            };
            p.expect_char('}', Expected::Token("}"))?;

            Ok(Markup {
                kind,
                name,
                options,
                attributes,
            })
        })
    }

    /// `reserved-part *([s] reserved-part)`; returns the normalized body.
    pub(super) fn reserved_body(&mut self) -> PResult<String> {
        let start = self.normalized_len();
        self.reserved_part()?;
        while self
            .lookahead()
            .next
            .is_some_and(|c| self.classes.is_reserved_part_start(c))
        {
            self.optional_ws();
            self.reserved_part()?;
        }
        Ok(self.normalized_since(start))
    }

    /// Callers have already checked that a part starts at the cursor.
    fn reserved_part(&mut self) -> PResult<()> {
        match self.cursor.peek() {
            Some('\\') => {
                let c = self.escape()?;
                self.emit_char('\\');
                self.emit_char(c);
            }
            Some('|') => {
                self.quoted_literal()?;
            }
            _ => {
                self.bump_emit();
            }
        }
        Ok(())
    }
}
