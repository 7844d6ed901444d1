use thiserror::Error;

/// Result type for extraction operations
pub type Result<T> = std::result::Result<T, ExtractError>;

/// Errors that can occur while extracting chunks from a source unit
///
/// The comment-state variants indicate a scanner defect rather than
/// malformed input: the token grammar is constructed so neither can occur
/// for well-formed matches. Either aborts the current file's extraction
/// without touching chunks already finalized for other files.
#[derive(Error, Debug)]
pub enum ExtractError {
    /// Entered block-comment mode while one is still open
    #[error("block comment reopened at {line}:{pos} while one is still open")]
    CommentReopened { line: usize, pos: usize },

    /// Closed a block comment that was never opened
    #[error("block comment closed at {line}:{pos} but none is open")]
    CommentNotOpen { line: usize, pos: usize },

    /// A comment line starting with `..` that is not a `..name:: value` pair
    #[error("malformed directive at line {line}: {text:?}")]
    MalformedDirective { line: usize, text: String },

    /// IO error occurred reading a source
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ExtractError {
    /// Create a malformed directive error
    pub fn malformed_directive(line: usize, text: impl Into<String>) -> Self {
        Self::MalformedDirective {
            line,
            text: text.into(),
        }
    }
}
