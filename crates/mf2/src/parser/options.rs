//! Parser configuration.

use bon::Builder;

/// Limits and reporting knobs for a single parse.
///
/// # Example
///
/// ```
/// use mf2::ParseOptions;
///
/// let options = ParseOptions::builder().max_depth(8).max_length(1024).build();
/// assert_eq!(options.max_depth, 8);
/// assert_eq!(options.context_len, 15);
/// ```
#[derive(Debug, Clone, Builder)]
pub struct ParseOptions {
    /// Maximum nesting of patterns inside placeholders. A simple message
    /// with placeholders uses two levels; each variant pattern under
    /// `.match` also uses two.
    #[builder(default = 32)]
    pub max_depth: usize,

    /// Maximum message length in code points. Unlimited when `None`.
    pub max_length: Option<usize>,

    /// Maximum length, in code points, of the context snippets attached to
    /// a [`ParseError`](crate::ParseError).
    #[builder(default = 15)]
    pub context_len: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions::builder().build()
    }
}
