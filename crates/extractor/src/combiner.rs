use crate::builder::ChunkBuilder;
use crate::error::Result;
use crate::stream::Stream;
use crate::types::{Atom, AtomKind, Chunk};

/// Stateful fold from an atom stream to a chunk stream
///
/// One builder is live at a time. A pairing is finalized when a statement
/// ends at brace depth zero, when a top-level block closes (unless the
/// pairing is a typedef, which absorbs its block and waits for the `;`),
/// when a new comment opens over pending code, or at end of stream. Builders
/// whose doc or code side is blank are dropped at that point, so stray
/// comments and undocumented declarations never publish.
pub struct Combiner {
    builder: ChunkBuilder,
    chunks: Stream<Chunk>,
    in_comment: bool,
    skip_marker: bool,
    doc_line: bool,
    in_expr_group: bool,
    block_level: i32,
    trace: bool,
}

impl Combiner {
    /// Create a combiner whose output stream carries the given source name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            builder: ChunkBuilder::new(),
            chunks: Stream::new(name),
            in_comment: false,
            skip_marker: false,
            doc_line: false,
            in_expr_group: false,
            block_level: 0,
            trace: false,
        }
    }

    /// Enable per-chunk trace logging
    #[must_use]
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// Fold a whole atom stream, then finalize
    pub fn process<'a>(&mut self, atoms: impl IntoIterator<Item = &'a Atom>) -> Result<()> {
        for atom in atoms {
            self.push(atom)?;
        }
        self.finalize();
        Ok(())
    }

    /// Fold one atom into the current state
    pub fn push(&mut self, atom: &Atom) -> Result<()> {
        match &atom.kind {
            AtomKind::CommentStart => {
                // A fresh comment over pending code closes the previous
                // pairing; consecutive comment lines keep accumulating.
                if self.builder.has_code() {
                    self.finish_chunk();
                }
                self.in_comment = true;
                self.skip_marker = true;
                self.builder.mark_line(atom.line_num);
            }
            AtomKind::CommentEnd => {
                self.in_comment = false;
            }
            AtomKind::CommentToken(text) => {
                // The first token after a start is the marker itself
                if self.skip_marker {
                    self.skip_marker = false;
                } else {
                    self.builder.add_doc(atom.line_num, text)?;
                    self.doc_line = true;
                }
            }
            AtomKind::Content(text) => {
                debug_assert!(!self.in_comment, "content atom while inside a comment");
                // Only top-level declaration starts classify: column 0 at
                // brace depth zero. Bodies and trailing fragments are code
                // text only.
                let classify = atom.pos == 0 && self.block_level == 0;
                self.builder
                    .add_code(atom.line_num, text, classify, self.in_expr_group);
                self.doc_line = false;
            }
            AtomKind::BlockStart => {
                self.block_level += 1;
            }
            AtomKind::BlockEnd => {
                if self.block_level == 0 {
                    log::warn!(
                        "{}: unbalanced closing brace at line {}",
                        self.chunks.name(),
                        atom.line_num
                    );
                } else {
                    self.block_level -= 1;
                    // A typedef absorbs its block; the trailing alias and
                    // `;` still belong to the chunk.
                    if self.block_level == 0 && !self.builder.is_typedef() {
                        self.finish_chunk();
                    }
                }
            }
            AtomKind::StmtEnd => {
                if self.block_level == 0 {
                    self.finish_chunk();
                }
            }
            AtomKind::ExprGroupStart => {
                self.in_expr_group = true;
            }
            AtomKind::ExprGroupEnd => {
                self.in_expr_group = false;
                // A closed top-level parenthesis group is the sole callable
                // signal; parens inside bodies never classify.
                if self.block_level == 0 && !self.builder.is_macro() {
                    self.builder.mark_function();
                }
            }
            AtomKind::Macro(text) => {
                self.builder.add_macro(atom.line_num, text);
                self.doc_line = false;
            }
            AtomKind::LineCont => {}
            AtomKind::Newline { in_comment } => {
                // The tokenizer closes line comments before the newline, so
                // the combiner's own comment state cannot classify the line.
                // A line whose last fragment was doc text gets a doc
                // newline even when the comment closed mid-line.
                if *in_comment || self.doc_line {
                    self.builder.add_doc_newline();
                } else {
                    self.builder.add_code_newline();
                }
                self.doc_line = false;
            }
        }
        Ok(())
    }

    /// Close out the pairing in progress, if it amounts to anything
    pub fn finalize(&mut self) {
        self.finish_chunk();
    }

    /// The chunk stream produced so far
    #[must_use]
    pub fn stream(&self) -> &Stream<Chunk> {
        &self.chunks
    }

    /// Consume the combiner, yielding its chunk stream
    #[must_use]
    pub fn into_stream(self) -> Stream<Chunk> {
        self.chunks
    }

    fn finish_chunk(&mut self) {
        let builder = std::mem::take(&mut self.builder);
        if let Some(chunk) = builder.build() {
            if self.trace {
                log::debug!(
                    "[{}:{}] chunk types={:?} names={:?}",
                    self.chunks.name(),
                    chunk.line_num,
                    chunk.types,
                    chunk.names
                );
            }
            self.chunks.append(chunk);
        }
    }
}
