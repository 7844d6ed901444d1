use cxtract_extractor::Chunk;

use crate::document::{FileDoc, ModuleDoc};
use crate::style::Style;

/// Flat README-style rendering
///
/// No module or file headings; each chunk becomes a `###` section titled by
/// its declared names, followed by the doc text and a fenced code block.
/// Suited to publishing a single README.md for a small library.
pub struct ReadmeStyle;

impl Style for ReadmeStyle {
    fn start_module(&self, _out: &mut String, _module: &ModuleDoc) {}

    fn end_module(&self, _out: &mut String, _module: &ModuleDoc) {}

    fn start_file(&self, _out: &mut String, _file: &FileDoc) {}

    fn end_file(&self, _out: &mut String, _file: &FileDoc) {}

    fn chunk(&self, out: &mut String, chunk: &Chunk) {
        if !chunk.names.is_empty() {
            out.push_str("### ");
            out.push_str(&chunk.names.join(" "));
            out.push_str("\n\n");
        }

        out.push_str(&chunk.doc_text());

        if !chunk.code.is_empty() {
            out.push_str("\n```c\n");
            out.push_str(chunk.code_text().trim_end());
            out.push_str("\n```\n\n");
        }
    }
}
