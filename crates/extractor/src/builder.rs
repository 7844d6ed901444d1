use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ExtractError, Result};
use crate::types::Chunk;

/// `..name:: value` on its own comment line, after justification stripping
static DIRECTIVE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^\.\.\s*([A-Za-z_][A-Za-z0-9_]*)\s*::\s*(.*)$").expect("directive pattern")
});

/// C-family identifier
static IDENT_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[A-Za-z_][A-Za-z0-9_]*").expect("identifier pattern"));

/// Keywords that classify a declaration rather than name it
const TYPE_KEYWORDS: [&str; 4] = ["enum", "struct", "class", "typedef"];

/// Accumulator for one doc/declaration pairing
///
/// The combiner feeds fragments in; [`build`](Self::build) decides whether
/// the accumulated state amounts to a publishable [`Chunk`]. Documentation
/// indentation is normalized against the first doc line: its leading
/// whitespace width becomes the justification, and at most that many leading
/// whitespace characters are stripped from every following line.
#[derive(Debug, Default)]
pub struct ChunkBuilder {
    line_num: Option<usize>,
    justification: Option<usize>,
    chunk: Chunk,
}

impl ChunkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the source line the pairing starts on; first call wins
    pub fn mark_line(&mut self, line_num: usize) {
        if self.line_num.is_none() {
            self.line_num = Some(line_num);
        }
    }

    /// Add one line's worth of comment text
    ///
    /// Directive lines are captured into the directive map instead of the
    /// doc text. A line that opens with `..` but is not a well-formed
    /// directive is an error.
    pub fn add_doc(&mut self, line_num: usize, text: &str) -> Result<()> {
        self.mark_line(line_num);
        // Trailing whitespace is lexical residue (the gap before a close
        // marker); it never carries meaning.
        let stripped = self.justify(text).trim_end().to_string();
        if stripped.trim_start().starts_with("..") {
            let trimmed = stripped.trim();
            let Some(caps) = DIRECTIVE_RE.captures(trimmed) else {
                return Err(ExtractError::malformed_directive(line_num, trimmed));
            };
            let key = caps[1].to_lowercase();
            let value = caps[2].trim().to_string();
            self.chunk.directives.insert(key, value);
            return Ok(());
        }
        if !stripped.is_empty() {
            self.chunk.docs.push(stripped);
        }
        Ok(())
    }

    /// End the current doc line
    ///
    /// Consecutive blank lines collapse: at most two newline fragments in a
    /// row, which renders as a single paragraph break.
    pub fn add_doc_newline(&mut self) {
        if self.chunk.docs.is_empty() {
            return;
        }
        let len = self.chunk.docs.len();
        if len >= 2 && self.chunk.docs[len - 1] == "\n" && self.chunk.docs[len - 2] == "\n" {
            return;
        }
        self.chunk.docs.push("\n".to_string());
    }

    /// Add declaration text
    ///
    /// When `classify` is set the text is scanned for classification
    /// keywords and declared names; `in_expr_group` suppresses the name
    /// side so parameter-list identifiers never reach `names`.
    pub fn add_code(&mut self, line_num: usize, text: &str, classify: bool, in_expr_group: bool) {
        if text.trim().is_empty() && self.chunk.code.is_empty() {
            return;
        }
        self.mark_line(line_num);
        if classify {
            self.scan_decl(text, in_expr_group);
        }
        self.chunk.code.push(text.to_string());
    }

    /// End the current code line
    ///
    /// Deliberately not a bare push: a newline before any code, or after
    /// another newline, is dropped so `code_text` never opens with blank
    /// lines and blank runs between statements fold to one.
    pub fn add_code_newline(&mut self) {
        match self.chunk.code.last() {
            None => {}
            Some(last) if last == "\n" => {}
            Some(_) => self.chunk.code.push("\n".to_string()),
        }
    }

    /// Add a whole `#`-prefixed line
    ///
    /// The line joins the code text so the rendered declaration is complete,
    /// and is also kept verbatim for styles that publish macros separately.
    pub fn add_macro(&mut self, line_num: usize, text: &str) {
        self.mark_line(line_num);
        if !self.chunk.types.iter().any(|t| t == "macro") {
            self.chunk.types.push("macro".to_string());
        }
        self.chunk.macros.push(text.to_string());
        self.chunk.code.push(text.to_string());
    }

    /// Classify the pairing as a function declaration; idempotent
    pub fn mark_function(&mut self) {
        if !self.chunk.types.iter().any(|t| t == "function") {
            self.chunk.types.push("function".to_string());
        }
    }

    #[must_use]
    pub fn has_code(&self) -> bool {
        !self.chunk.code.is_empty()
    }

    #[must_use]
    pub fn is_typedef(&self) -> bool {
        self.chunk.is_typedef()
    }

    #[must_use]
    pub fn is_macro(&self) -> bool {
        self.chunk.is_macro()
    }

    #[must_use]
    pub fn is_function(&self) -> bool {
        self.chunk.is_function()
    }

    /// Finalize the pairing
    ///
    /// Returns `None` when either side is blank after trimming; a comment
    /// with no declaration (or the reverse) is never published.
    pub fn build(self) -> Option<Chunk> {
        let mut chunk = self.chunk;
        if chunk.doc_text().trim().is_empty() || chunk.code_text().trim().is_empty() {
            return None;
        }
        chunk.line_num = self.line_num.unwrap_or(1);
        Some(chunk)
    }

    /// Strip up to the justification width of leading whitespace
    ///
    /// The first non-blank doc line fixes the width. Stripping stops at the
    /// first non-whitespace character, so shallower lines are unaffected.
    fn justify(&mut self, text: &str) -> String {
        let width = match self.justification {
            Some(width) => width,
            None => {
                if text.trim().is_empty() {
                    return String::new();
                }
                let width = text.chars().take_while(|c| c.is_whitespace()).count();
                self.justification = Some(width);
                width
            }
        };
        let mut chars = text.char_indices();
        let mut offset = text.len();
        let mut taken = 0;
        for (idx, ch) in chars.by_ref() {
            if taken >= width || !ch.is_whitespace() {
                offset = idx;
                break;
            }
            taken += 1;
        }
        text[offset..].to_string()
    }

    fn scan_decl(&mut self, text: &str, in_expr_group: bool) {
        for m in IDENT_RE.find_iter(text) {
            let ident = m.as_str();
            if TYPE_KEYWORDS.contains(&ident) {
                self.chunk.types.push(ident.to_string());
            } else if !in_expr_group {
                self.chunk.names.push(ident.to_string());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_justification_from_first_line() {
        let mut builder = ChunkBuilder::new();
        builder.add_doc(1, "  first line").unwrap();
        builder.add_doc(2, "  second line").unwrap();
        builder.add_doc(3, " shallower").unwrap();
        builder.add_code(4, "int x;", true, false);
        let chunk = builder.build().unwrap();
        assert_eq!(
            chunk.docs,
            vec!["first line", "second line", "shallower"]
        );
    }

    #[test]
    fn test_directive_capture() {
        let mut builder = ChunkBuilder::new();
        builder.add_doc(1, " ..class:: mxfunction").unwrap();
        builder.add_doc(2, " real doc text").unwrap();
        builder.add_code(3, "void f();", true, false);
        let chunk = builder.build().unwrap();
        assert_eq!(chunk.directives.get("class").unwrap(), "mxfunction");
        assert_eq!(chunk.docs, vec!["real doc text"]);
    }

    #[test]
    fn test_directive_key_is_lowercased() {
        let mut builder = ChunkBuilder::new();
        builder.add_doc(1, "..Name:: widget").unwrap();
        builder.add_doc(2, "doc").unwrap();
        builder.add_code(3, "int widget;", true, false);
        let chunk = builder.build().unwrap();
        assert_eq!(chunk.directives.get("name").unwrap(), "widget");
    }

    #[test]
    fn test_malformed_directive_is_error() {
        let mut builder = ChunkBuilder::new();
        let err = builder.add_doc(7, ".. not a directive").unwrap_err();
        assert!(matches!(
            err,
            ExtractError::MalformedDirective { line: 7, .. }
        ));
    }

    #[test]
    fn test_blank_doc_lines_collapse() {
        let mut builder = ChunkBuilder::new();
        builder.add_doc(1, "para one").unwrap();
        builder.add_doc_newline();
        builder.add_doc_newline();
        builder.add_doc_newline();
        builder.add_doc(5, "para two").unwrap();
        builder.add_code(6, "int x;", true, false);
        let chunk = builder.build().unwrap();
        assert_eq!(chunk.doc_text(), "para one\n\npara two");
    }

    #[test]
    fn test_code_newlines_collapse() {
        let mut builder = ChunkBuilder::new();
        builder.add_doc(1, "doc").unwrap();
        builder.add_code_newline();
        builder.add_code(3, "int a = 1", true, false);
        builder.add_code_newline();
        builder.add_code_newline();
        builder.add_code(6, "  + 2;", false, false);
        let chunk = builder.build().unwrap();
        assert_eq!(chunk.code_text(), "int a = 1\n  + 2;");
    }

    #[test]
    fn test_leading_newline_is_dropped() {
        let mut builder = ChunkBuilder::new();
        builder.add_doc_newline();
        builder.add_doc(2, "doc").unwrap();
        builder.add_code(3, "int x;", true, false);
        let chunk = builder.build().unwrap();
        assert_eq!(chunk.docs, vec!["doc"]);
    }

    #[test]
    fn test_decl_scan_separates_keywords_and_names() {
        let mut builder = ChunkBuilder::new();
        builder.add_doc(1, "doc").unwrap();
        builder.add_code(2, "typedef struct coord {", true, false);
        let chunk = builder.build().unwrap();
        assert_eq!(chunk.types, vec!["typedef", "struct"]);
        assert_eq!(chunk.names, vec!["coord"]);
    }

    #[test]
    fn test_expr_group_suppresses_names() {
        let mut builder = ChunkBuilder::new();
        builder.add_doc(1, "doc").unwrap();
        builder.add_code(2, "void f(", true, false);
        // A parameter list continued at column 0 still classifies keywords
        // but contributes no names
        builder.add_code(3, "struct opts o)", true, true);
        let chunk = builder.build().unwrap();
        assert_eq!(chunk.names, vec!["void", "f"]);
        assert_eq!(chunk.types, vec!["struct"]);
    }

    #[test]
    fn test_doc_only_builds_nothing() {
        let mut builder = ChunkBuilder::new();
        builder.add_doc(1, "orphan comment").unwrap();
        builder.add_doc_newline();
        assert!(builder.build().is_none());
    }

    #[test]
    fn test_code_only_builds_nothing() {
        let mut builder = ChunkBuilder::new();
        builder.add_code(1, "int undocumented;", true, false);
        assert!(builder.build().is_none());
    }

    #[test]
    fn test_macro_joins_code_and_macros() {
        let mut builder = ChunkBuilder::new();
        builder.add_doc(1, "guard macro").unwrap();
        builder.add_macro(2, "#define GUARD(x) ((x) != 0)");
        let chunk = builder.build().unwrap();
        assert!(chunk.is_macro());
        assert_eq!(chunk.macros, vec!["#define GUARD(x) ((x) != 0)"]);
        assert_eq!(chunk.code_text(), "#define GUARD(x) ((x) != 0)");
    }

    #[test]
    fn test_chunk_line_is_first_marked() {
        let mut builder = ChunkBuilder::new();
        builder.add_doc(4, "doc").unwrap();
        builder.add_code(6, "int x;", true, false);
        let chunk = builder.build().unwrap();
        assert_eq!(chunk.line_num, 4);
    }
}
