//! Token recognizers for names and numbers.
//!
//! These run over the unconsumed `&[char]` remainder of the cursor. On
//! failure the input slice is left at the first code point that could not
//! be matched, which is where the grammar parser reports the error.

use winnow::combinator::{cut_err, opt, preceded};
use winnow::prelude::*;
use winnow::token::{one_of, take_while};

use crate::chars::classes;

/// Signature shared by every token recognizer.
pub(crate) type Lexer = for<'i> fn(&mut &'i [char]) -> ModalResult<&'i [char]>;

/// `name = name-start *name-char`
pub(crate) fn name<'i>(input: &mut &'i [char]) -> ModalResult<&'i [char]> {
    (
        one_of(|c: char| classes().is_name_start(c)),
        take_while(0.., |c: char| classes().is_name_char(c)),
    )
        .take()
        .parse_next(input)
}

/// `number = ["-"] 1*DIGIT ["." 1*DIGIT] [("e" / "E") ["-" / "+"] 1*DIGIT]`
pub(crate) fn number<'i>(input: &mut &'i [char]) -> ModalResult<&'i [char]> {
    (
        opt(one_of(['-'])),
        digits,
        opt(preceded(one_of(['.']), cut_err(digits))),
        opt((one_of(['e', 'E']), cut_err((opt(one_of(['+', '-'])), digits)))),
    )
        .take()
        .parse_next(input)
}

fn digits<'i>(input: &mut &'i [char]) -> ModalResult<&'i [char]> {
    take_while(1.., |c: char| classes().is_digit(c)).parse_next(input)
}
