// Error type shared by every stage of the pipeline.
//
// All errors are fatal to the invocation: the map/body binding makes
// per-line recovery meaningless, so nothing here is retried or resumed.
// Binaries print the Display form as a one-line diagnostic on stderr.

/// Error raised by any WEFT tool.
#[derive(Debug, thiserror::Error)]
pub enum WeftError {
    /// Underlying I/O failure, reported without retry.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Invalid UTF-8, a stray CR, or other byte-level encoding fault.
    #[error("encoding error: {0}")]
    Encoding(String),

    /// The input does not start with the `%WEFT;` signature line.
    #[error("not a WEFT stream: {0}")]
    WeftSignature(String),

    /// The declaration line is not `N,M`.
    #[error("bad WEFT declaration: {0}")]
    WeftHeader(String),

    /// A map record line does not match the record grammar.
    #[error("bad map record: {0}")]
    MapSyntax(String),

    /// The map disagrees with the body: wrong record type at a position,
    /// or skip/read sums that do not add up to the line length.
    #[error("map does not match body: {0}")]
    MapMismatch(String),

    /// The stream ended before the declared content was complete.
    #[error("truncated input: {0}")]
    Truncated(String),

    /// An entity reference with an unknown or malformed name.
    #[error("unknown entity reference: {0}")]
    EntityUnknown(String),

    /// An entity reference that resolves outside the codepoint policy.
    #[error("entity resolves to invalid codepoint U+{0:04X}")]
    EntityInvalidCodepoint(u32),

    /// A raw `&` inside a tag, outside any quoted attribute value.
    #[error("raw '&' inside tag")]
    AmpersandInTag,

    /// A word contains a codepoint it must not (whitespace, grave accent),
    /// or a word-list entry violates the grave placement rules.
    #[error("bad word: {0}")]
    WordSyntax(String),

    /// A Woof table line does not match the table grammar, or an escape
    /// sequence in the input matches no table key.
    #[error("bad escape table: {0}")]
    WoofSyntax(String),

    /// Two Woof keys where one is a prefix of the other.
    #[error("ambiguous escape table: {0:?} conflicts with {1:?}")]
    WoofAmbiguous(String, String),

    /// A table file named on the command line does not exist.
    #[error("table not found: {0}")]
    TableMissing(String),

    /// Malformed or unknown command-line flag.
    #[error("bad argument: {0}")]
    Arg(String),
}
