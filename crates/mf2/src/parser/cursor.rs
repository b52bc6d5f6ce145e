//! Code-point cursor over a message.

/// A forward-only reader over the code points of a message.
///
/// Positions are code-point indices, so a supplementary-plane character
/// occupies a single position. The cursor never backtracks on its own;
/// callers that need alternation save [`Cursor::index`] and
/// [`Cursor::reset`] to it.
#[derive(Debug, Clone)]
pub struct Cursor<'src> {
    source: &'src [char],
    index: usize,
}

impl<'src> Cursor<'src> {
    pub fn new(source: &'src [char]) -> Self {
        Self { source, index: 0 }
    }

    /// Current code-point index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Moves back (or forward) to a previously saved index.
    pub fn reset(&mut self, index: usize) {
        self.index = index.min(self.source.len());
    }

    /// The code point under the cursor, or `None` past the end of input.
    pub fn peek(&self) -> Option<char> {
        self.source.get(self.index).copied()
    }

    /// The code point `n` positions ahead of the cursor.
    pub fn peek_at(&self, n: usize) -> Option<char> {
        self.source.get(self.index + n).copied()
    }

    /// Consumes one code point and returns it. At end of input this is a
    /// no-op returning `None`.
    pub fn advance(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.index += 1;
        Some(c)
    }

    pub fn in_bounds(&self) -> bool {
        self.index < self.source.len()
    }

    pub fn in_bounds_at(&self, n: usize) -> bool {
        self.index + n < self.source.len()
    }

    pub fn all_consumed(&self) -> bool {
        self.index == self.source.len()
    }

    /// Returns true if the input at the cursor starts with `token`.
    pub fn next_is(&self, token: &str) -> bool {
        token
            .chars()
            .enumerate()
            .all(|(n, expected)| self.peek_at(n) == Some(expected))
    }

    /// The unconsumed remainder of the input.
    pub fn rest(&self) -> &'src [char] {
        &self.source[self.index..]
    }

    /// The whole input.
    pub fn source(&self) -> &'src [char] {
        self.source
    }
}
