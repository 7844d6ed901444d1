use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single numbered source line
///
/// Line numbers are 1-based and sequential. The text may or may not carry a
/// trailing line terminator; the tokenizer accepts both.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Line {
    /// 1-based line number
    pub line_num: usize,

    /// Raw line text
    pub text: String,
}

impl Line {
    /// Create a new numbered line
    pub fn new(line_num: usize, text: impl Into<String>) -> Self {
        Self {
            line_num,
            text: text.into(),
        }
    }
}

/// One lexical event emitted by the tokenizer
///
/// Atoms are immutable and ordered by emission order, which is monotonic
/// within a line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Atom {
    /// Line the event was scanned on (1-based)
    pub line_num: usize,

    /// Byte column of the event within its line
    pub pos: usize,

    /// What the event is, with its text payload where one exists
    pub kind: AtomKind,
}

impl Atom {
    pub fn new(line_num: usize, pos: usize, kind: AtomKind) -> Self {
        Self {
            line_num,
            pos,
            kind,
        }
    }
}

/// Kind of lexical event
///
/// Text-bearing kinds carry their span of source text. `Newline` records
/// whether the line it terminates ended in comment mode, captured before the
/// line-comment flag clears at end of line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AtomKind {
    /// Plain (non-comment) source text, up to and including any delimiter
    Content(String),
    /// A `//` or `/*` marker opened a comment
    CommentStart,
    /// A `*/` marker (or end of a `//` line) closed the comment
    CommentEnd,
    /// Text scanned while inside a comment, including the marker itself
    CommentToken(String),
    /// `{`
    BlockStart,
    /// `}`
    BlockEnd,
    /// `;`
    StmtEnd,
    /// `(`
    ExprGroupStart,
    /// `)`
    ExprGroupEnd,
    /// A whole `#`-prefixed directive line
    Macro(String),
    /// A trailing `\` continuation
    LineCont,
    /// End of line
    Newline { in_comment: bool },
}

impl AtomKind {
    /// Short tag for trace output
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Content(_) => "content",
            Self::CommentStart => "comment-start",
            Self::CommentEnd => "comment-end",
            Self::CommentToken(_) => "comment-token",
            Self::BlockStart => "block-start",
            Self::BlockEnd => "block-end",
            Self::StmtEnd => "stmt-end",
            Self::ExprGroupStart => "expr-group-start",
            Self::ExprGroupEnd => "expr-group-end",
            Self::Macro(_) => "macro",
            Self::LineCont => "line-cont",
            Self::Newline { .. } => "newline",
        }
    }

    /// The text payload, for the kinds that carry one
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Content(text) | Self::CommentToken(text) | Self::Macro(text) => Some(text),
            _ => None,
        }
    }
}

/// A finalized doc-comment + declaration pairing, ready for rendering
///
/// Only constructed when both the joined doc text and the joined code text
/// are non-empty after trimming; doc-only or code-only groupings are
/// discarded, never emitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Line of the first comment marker in the pairing (1-based)
    pub line_num: usize,

    /// `..name:: value` directives captured out of the comment text.
    /// Keys are lowercase identifier strings.
    pub directives: BTreeMap<String, String>,

    /// Justification-stripped, paragraph-folded documentation fragments
    pub docs: Vec<String>,

    /// Declaration text fragments, in source order
    pub code: Vec<String>,

    /// Full text of any `#`-prefixed lines in the pairing
    pub macros: Vec<String>,

    /// Classification tokens, append-ordered and not deduplicated
    /// (`struct`, `enum`, `class`, `typedef`, `macro`, `function`)
    pub types: Vec<String>,

    /// Declared identifiers, append-ordered; parameter-list identifiers
    /// are never included
    pub names: Vec<String>,
}

impl Chunk {
    /// The joined documentation text
    #[must_use]
    pub fn doc_text(&self) -> String {
        self.docs.concat()
    }

    /// The joined declaration text
    #[must_use]
    pub fn code_text(&self) -> String {
        self.code.concat()
    }

    #[must_use]
    pub fn is_typedef(&self) -> bool {
        self.types.iter().any(|t| t == "typedef")
    }

    #[must_use]
    pub fn is_macro(&self) -> bool {
        self.types.iter().any(|t| t == "macro")
    }

    #[must_use]
    pub fn is_function(&self) -> bool {
        self.types.iter().any(|t| t == "function")
    }

    /// Best display name for the chunk: the `class` or `name` directive if
    /// present, else the last classified identifier
    #[must_use]
    pub fn display_name(&self) -> Option<&str> {
        self.directives
            .get("class")
            .or_else(|| self.directives.get("name"))
            .map(String::as_str)
            .or_else(|| self.names.last().map(String::as_str))
    }
}
