//! Code-point classes used by the MessageFormat 2 grammar.
//!
//! The tables are built once per process behind a [`LazyLock`] and are
//! read-only afterwards, so any number of parses can share them.

use std::ops::RangeInclusive;
use std::sync::LazyLock;

static CLASSES: LazyLock<CharClasses> = LazyLock::new(CharClasses::build);

/// Returns the process-wide character classes.
pub fn classes() -> &'static CharClasses {
    &CLASSES
}

/// A set of code points stored as sorted, non-overlapping inclusive ranges.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodePointSet {
    ranges: Vec<RangeInclusive<u32>>,
}

impl CodePointSet {
    /// Builds a set from arbitrary (possibly overlapping) ranges.
    pub fn from_ranges(ranges: impl IntoIterator<Item = RangeInclusive<u32>>) -> Self {
        let mut ranges: Vec<RangeInclusive<u32>> =
            ranges.into_iter().filter(|r| !r.is_empty()).collect();
        ranges.sort_by_key(|r| *r.start());

        let mut merged: Vec<RangeInclusive<u32>> = Vec::with_capacity(ranges.len());
        for range in ranges {
            match merged.last_mut() {
                Some(last) if *range.start() <= last.end().saturating_add(1) => {
                    if range.end() > last.end() {
                        *last = *last.start()..=*range.end();
                    }
                }
                _ => merged.push(range),
            }
        }
        Self { ranges: merged }
    }

    /// Builds a set containing exactly the given characters.
    pub fn from_chars(chars: &[char]) -> Self {
        Self::from_ranges(chars.iter().map(|&c| u32::from(c)..=u32::from(c)))
    }

    /// Returns the union of two sets.
    pub fn union(&self, other: &CodePointSet) -> CodePointSet {
        Self::from_ranges(self.ranges.iter().chain(&other.ranges).cloned())
    }

    /// Returns the code points of `self` that are not in `other`.
    pub fn difference(&self, other: &CodePointSet) -> CodePointSet {
        let mut out = Vec::with_capacity(self.ranges.len());
        for range in &self.ranges {
            let mut start = *range.start();
            let end = *range.end();
            let mut exhausted = false;
            for cut in &other.ranges {
                if *cut.end() < start || *cut.start() > end {
                    continue;
                }
                if *cut.start() > start {
                    out.push(start..=*cut.start() - 1);
                }
                if *cut.end() >= end {
                    exhausted = true;
                    break;
                }
                start = *cut.end() + 1;
            }
            if !exhausted {
                out.push(start..=end);
            }
        }
        Self { ranges: out }
    }

    /// Returns true if `c` is a member of the set.
    pub fn contains(&self, c: char) -> bool {
        let cp = u32::from(c);
        let idx = self.ranges.partition_point(|r| *r.end() < cp);
        self.ranges.get(idx).is_some_and(|r| r.contains(&cp))
    }

    /// Number of disjoint ranges in the set.
    pub fn range_count(&self) -> usize {
        self.ranges.len()
    }
}

/// The primitive and derived code-point classes of the grammar.
#[derive(Debug)]
pub struct CharClasses {
    content: CodePointSet,
    whitespace: CodePointSet,
    bidi: CodePointSet,
    alpha: CodePointSet,
    digit: CodePointSet,
    name_start: CodePointSet,
    name_char: CodePointSet,
    text: CodePointSet,
    quoted: CodePointSet,
    escapable: CodePointSet,
    reserved_char: CodePointSet,
    annotation_sigil: CodePointSet,
    unquoted_start: CodePointSet,
    literal_start: CodePointSet,
    key_start: CodePointSet,
}

/// Sigils of reserved annotations.
pub const RESERVED_SIGILS: [char; 8] = ['!', '%', '*', '+', '<', '>', '?', '~'];

/// Sigils of private-use annotations.
pub const PRIVATE_USE_SIGILS: [char; 2] = ['^', '&'];

impl CharClasses {
    fn build() -> Self {
        let content = CodePointSet::from_ranges([
            0x01..=0x08,
            0x0B..=0x0C,
            0x0E..=0x1F,
            0x21..=0x2D,
            0x2F..=0x3F,
            0x41..=0x5B,
            0x5D..=0x7A,
            0x7E..=0x2FFF,
            0x3001..=0xD7FF,
            0xE000..=0x10FFFF,
        ]);
        let whitespace = CodePointSet::from_chars(&['\t', '\n', '\r', ' ', '\u{3000}']);
        let bidi = CodePointSet::from_ranges([0x061C..=0x061C, 0x200E..=0x200F, 0x2066..=0x2069]);
        let alpha = CodePointSet::from_ranges([0x41..=0x5A, 0x61..=0x7A]);
        let digit = CodePointSet::from_ranges([0x30..=0x39]);

        let name_start = alpha
            .union(&CodePointSet::from_ranges([
                0x5F..=0x5F,
                0xC0..=0xD6,
                0xD8..=0xF6,
                0xF8..=0x2FF,
                0x370..=0x37D,
                0x37F..=0x1FFF,
                0x200C..=0x200D,
                0x2070..=0x218F,
                0x2C00..=0x2FEF,
                0x3001..=0xD7FF,
                0xF900..=0xFDCF,
                0xFDF0..=0xFFFC,
                0x10000..=0xEFFFF,
            ]))
            .difference(&bidi);
        let name_char = name_start
            .union(&digit)
            .union(&CodePointSet::from_ranges([
                0x2D..=0x2E,
                0xB7..=0xB7,
                0x300..=0x36F,
                0x203F..=0x2040,
            ]))
            .difference(&bidi);

        let text = content
            .union(&whitespace)
            .union(&CodePointSet::from_chars(&['.', '@', '|']));
        let quoted = content
            .union(&whitespace)
            .union(&CodePointSet::from_chars(&['.', '@', '{', '}']));
        let escapable = CodePointSet::from_chars(&['\\', '{', '|', '}']);
        let reserved_char = content.union(&CodePointSet::from_chars(&['.']));
        let annotation_sigil = CodePointSet::from_chars(&RESERVED_SIGILS)
            .union(&CodePointSet::from_chars(&PRIVATE_USE_SIGILS))
            .union(&CodePointSet::from_chars(&[':']));

        let unquoted_start = name_start
            .union(&digit)
            .union(&CodePointSet::from_chars(&['-']));
        let literal_start = unquoted_start.union(&CodePointSet::from_chars(&['|']));
        let key_start = literal_start.union(&CodePointSet::from_chars(&['*']));

        Self {
            content,
            whitespace,
            bidi,
            alpha,
            digit,
            name_start,
            name_char,
            text,
            quoted,
            escapable,
            reserved_char,
            annotation_sigil,
            unquoted_start,
            literal_start,
            key_start,
        }
    }

    pub fn is_content(&self, c: char) -> bool {
        self.content.contains(c)
    }

    pub fn is_whitespace(&self, c: char) -> bool {
        self.whitespace.contains(c)
    }

    pub fn is_bidi(&self, c: char) -> bool {
        self.bidi.contains(c)
    }

    pub fn is_alpha(&self, c: char) -> bool {
        self.alpha.contains(c)
    }

    pub fn is_digit(&self, c: char) -> bool {
        self.digit.contains(c)
    }

    pub fn is_name_start(&self, c: char) -> bool {
        self.name_start.contains(c)
    }

    pub fn is_name_char(&self, c: char) -> bool {
        self.name_char.contains(c)
    }

    /// Characters allowed unescaped in pattern text.
    pub fn is_text(&self, c: char) -> bool {
        self.text.contains(c)
    }

    /// Characters allowed unescaped between `|` delimiters.
    pub fn is_quoted(&self, c: char) -> bool {
        self.quoted.contains(c)
    }

    /// Characters that may follow a backslash.
    pub fn is_escapable(&self, c: char) -> bool {
        self.escapable.contains(c)
    }

    pub fn is_reserved_char(&self, c: char) -> bool {
        self.reserved_char.contains(c)
    }

    /// `:` or any reserved / private-use annotation sigil.
    pub fn is_annotation_start(&self, c: char) -> bool {
        self.annotation_sigil.contains(c)
    }

    /// Start of one part of a reserved body: a reserved character, an escape
    /// or a quoted literal.
    pub fn is_reserved_part_start(&self, c: char) -> bool {
        c == '\\' || c == '|' || self.reserved_char.contains(c)
    }

    pub fn is_unquoted_start(&self, c: char) -> bool {
        self.unquoted_start.contains(c)
    }

    pub fn is_literal_start(&self, c: char) -> bool {
        self.literal_start.contains(c)
    }

    pub fn is_key_start(&self, c: char) -> bool {
        self.key_start.contains(c)
    }
}
