//! Doc-comment extraction for C and C++ sources
//!
//! A two-stage pipeline, no AST involved. The [`Tokenizer`] scans numbered
//! lines against a fixed token set and emits a flat [`Atom`] stream; the
//! [`Combiner`] folds that stream into [`Chunk`]s, each pairing a comment
//! with the declaration that follows it. Anything unpaired is dropped.
//!
//! ```
//! use cxtract_extractor::{extract_str, TraceOptions};
//!
//! let chunks = extract_str(
//!     "demo.c",
//!     "/* answer */\nint answer = 42;\n",
//!     TraceOptions::default(),
//! )
//! .unwrap();
//! assert_eq!(chunks.len(), 1);
//! ```

pub mod builder;
pub mod combiner;
pub mod error;
pub mod source;
pub mod stream;
pub mod tokenizer;
pub mod types;

pub use builder::ChunkBuilder;
pub use combiner::Combiner;
pub use error::{ExtractError, Result};
pub use stream::Stream;
pub use tokenizer::Tokenizer;
pub use types::{Atom, AtomKind, Chunk, Line};

use std::path::Path;

/// Which pipeline stages log their events
#[derive(Debug, Clone, Copy, Default)]
pub struct TraceOptions {
    /// Log every atom the tokenizer emits
    pub atoms: bool,
    /// Log every chunk the combiner finalizes
    pub chunks: bool,
}

/// Run the full pipeline over numbered lines
pub fn extract_lines(
    name: &str,
    lines: impl IntoIterator<Item = Line>,
    trace: TraceOptions,
) -> Result<Stream<Chunk>> {
    let mut tokenizer = Tokenizer::new(name).with_trace(trace.atoms);
    tokenizer.process(lines)?;
    let atoms = tokenizer.into_stream();

    let mut combiner = Combiner::new(name).with_trace(trace.chunks);
    combiner.process(&atoms)?;
    Ok(combiner.into_stream())
}

/// Run the full pipeline over an in-memory buffer
pub fn extract_str(name: &str, text: &str, trace: TraceOptions) -> Result<Stream<Chunk>> {
    extract_lines(name, source::buffer_lines(text), trace)
}

/// Run the full pipeline over a file on disk
pub fn extract_file(path: &Path, trace: TraceOptions) -> Result<Stream<Chunk>> {
    let name = path.to_string_lossy().into_owned();
    let lines = source::read_lines(path)?;
    extract_lines(&name, lines, trace)
}
