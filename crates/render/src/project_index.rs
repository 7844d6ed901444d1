use cxtract_extractor::Chunk;

use crate::document::{FileDoc, ModuleDoc};
use crate::style::Style;

const FOOTER_LINK: &str = "https://github.com/cxtract/cxtract";

fn md_link(name: &str, link: &str) -> String {
    format!(":link: [{name}]({link})")
}

/// Per-project index rendering
///
/// Module name as the top heading, one `###` section per source file with a
/// link back to the source, and a `####` entry per chunk naming it with its
/// classification. Suited to browsable docs for a larger tree.
pub struct ProjectIndexStyle;

impl Style for ProjectIndexStyle {
    fn start_module(&self, out: &mut String, module: &ModuleDoc) {
        out.push_str("# ");
        out.push_str(&module.name);
        out.push('\n');
    }

    fn end_module(&self, out: &mut String, _module: &ModuleDoc) {
        out.push_str(&format!(
            "\n\n_Generated by [{FOOTER_LINK}]({FOOTER_LINK})_\n"
        ));
    }

    fn start_file(&self, out: &mut String, file: &FileDoc) {
        out.push_str("### ");
        out.push_str(file.base_name());
        out.push_str("\n\n");
        out.push_str(&md_link(&file.rel_path, &file.rel_path));
        out.push_str("\n\n");
    }

    fn end_file(&self, _out: &mut String, _file: &FileDoc) {}

    fn chunk(&self, out: &mut String, chunk: &Chunk) {
        out.push_str("#### `");
        out.push_str(chunk.display_name().unwrap_or("(anonymous)"));
        out.push_str("` (");
        out.push_str(&chunk.types.join(" "));
        out.push_str(")\n\n");
        out.push_str(&chunk.doc_text());
        out.push('\n');

        let code = chunk.code_text();
        let trimmed = code.trim();
        if !trimmed.is_empty() {
            out.push_str("~~~c\n");
            out.push_str(trimmed);
            out.push_str("\n~~~\n\n");
        }
    }
}
