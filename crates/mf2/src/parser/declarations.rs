//! `.local`, `.input` and reserved statements.

use crate::builder::MessageBuilder;
use crate::model::{Declaration, Operand, VariableName};
use crate::parser::error::{ErrorKind, Expected, Mark, PResult};
use crate::parser::grammar::Parser;
use crate::parser::lexer;

impl<B: MessageBuilder + ?Sized> Parser<'_, B> {
    /// `[declaration *(s declaration)]`, stopping before `.match` or the
    /// body. Whitespace after the last declaration is consumed.
    pub(super) fn declarations(&mut self) -> PResult<()> {
        let mut separated = true;
        while self.cursor.peek() == Some('.') {
            let keyword = self.peek_keyword();
            if keyword.as_deref() == Some("match") {
                break;
            }
            if !separated {
                return Err(self.fail(ErrorKind::MissingWhitespace));
            }
            let declaration = match keyword.as_deref() {
                Some("local") => self.local_declaration()?,
                Some("input") => self.input_declaration()?,
                _ => self.reserved_statement()?,
            };
            self.builder.add_declaration(declaration);
            separated = self.optional_ws();
        }
        Ok(())
    }

    /// The name following the `.` under the cursor, if any.
    fn peek_keyword(&self) -> Option<String> {
        let mut input = self.cursor.rest().get(1..)?;
        lexer::name(&mut input)
            .ok()
            .map(|matched| matched.iter().collect())
    }

    /// `.local s $name [s] = [s] expression`
    fn local_declaration(&mut self) -> PResult<Declaration> {
        self.expect_token(".local")?;
        self.required_ws()?;
        let at = self.mark();
        let name = self.variable()?;
        self.declare(&name, at)?;
        self.optional_ws();
        self.expect_char('=', Expected::Token("="))?;
        self.optional_ws();
        let value = self.expression()?;
        Ok(Declaration::Local { name, value })
    }

    /// `.input [s] {$name ...}`
    fn input_declaration(&mut self) -> PResult<Declaration> {
        self.expect_token(".input")?;
        self.optional_ws();
        let (value, at) = self.expression_with_operand_mark()?;
        let Some(name) = value.operand.as_ref().and_then(Operand::as_variable).cloned() else {
            return Err(self.fail_at(at, ErrorKind::InputWithoutVariable));
        };
        self.declare(&name, at)?;
        Ok(Declaration::Input { name, value })
    }

    fn declare(&mut self, name: &VariableName, at: Mark) -> PResult<()> {
        if self.declared.insert(name.as_str().to_string()) {
            Ok(())
        } else {
            Err(self.fail_at(
                at,
                ErrorKind::DuplicateDeclaration {
                    name: name.as_str().to_string(),
                },
            ))
        }
    }

    /// `.keyword [s reserved-body] 1*([s] expression)`
    fn reserved_statement(&mut self) -> PResult<Declaration> {
        let at = self.mark();
        self.expect_char('.', Expected::Token("."))?;
        let keyword = self.name()?;
        self.record(at, ErrorKind::unsupported_statement(&keyword));

        let body = if self
            .lookahead()
            .separated_then(|c| self.classes.is_reserved_part_start(c))
        {
            self.optional_ws();
            Some(self.reserved_body()?)
        } else {
            None
        };

        let mut expressions = Vec::new();
        while self.lookahead().then_expression() {
            self.optional_ws();
            expressions.push(self.expression()?);
        }
        if expressions.is_empty() {
            self.optional_ws();
            return Err(self.unexpected(Expected::Expression));
        }

        Ok(Declaration::Unsupported {
            keyword,
            body,
            expressions,
        })
    }
}
