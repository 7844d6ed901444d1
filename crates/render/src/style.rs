use cxtract_extractor::Chunk;

use crate::document::{FileDoc, ModuleDoc};
use crate::project_index::ProjectIndexStyle;
use crate::readme::ReadmeStyle;

/// The registered style names, in registry order
pub const STYLE_NAMES: [&str; 2] = ["readme", "project_index"];

/// Style used when the project does not pick one
pub const DEFAULT_STYLE: &str = "readme";

/// A markdown rendering style
///
/// The exporter drives the hooks in document order: module start, then per
/// file a start/chunks/end sequence, then module end. Hooks append to the
/// output buffer; a hook with nothing to say appends nothing.
pub trait Style {
    fn start_module(&self, out: &mut String, module: &ModuleDoc);

    fn end_module(&self, out: &mut String, module: &ModuleDoc);

    fn start_file(&self, out: &mut String, file: &FileDoc);

    fn end_file(&self, out: &mut String, file: &FileDoc);

    fn chunk(&self, out: &mut String, chunk: &Chunk);
}

/// Look up a style by registry name
#[must_use]
pub fn get_style(name: &str) -> Option<Box<dyn Style>> {
    match name {
        "readme" => Some(Box::new(ReadmeStyle)),
        "project_index" => Some(Box::new(ProjectIndexStyle)),
        _ => None,
    }
}
