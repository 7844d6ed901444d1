use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{ExtractError, Result};
use crate::stream::Stream;
use crate::types::{Atom, AtomKind, Line};

/// The fixed token set, scanned left-to-right per line for non-overlapping
/// matches. The degenerate `/**/` form must come before the plain `/*`
/// opener so it closes in a single match; alternation is leftmost-first.
/// `^#` and `\$` anchor to the line, so a directive marker only matches at
/// column 0 and a continuation backslash only at end of line.
static TOKEN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\{|\}|;|\(|\)|^#|\\$|//+|/\*{2,}/|/\*+|\*+/").expect("token pattern")
});

/// Lexical scanner: turns numbered source lines into a stream of [`Atom`]s
///
/// Lines are processed strictly in order. The only state that survives a
/// line is `in_block_comment`; `in_line_comment` always clears at end of
/// line, and an implicit [`AtomKind::CommentEnd`] is emitted there so the
/// combiner never has to infer line-comment closure itself.
pub struct Tokenizer {
    atoms: Stream<Atom>,
    in_line_comment: bool,
    in_block_comment: bool,
    trace: bool,
}

impl Tokenizer {
    /// Create a tokenizer whose output stream carries the given source name
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            atoms: Stream::new(name),
            in_line_comment: false,
            in_block_comment: false,
            trace: false,
        }
    }

    /// Enable per-atom trace logging
    #[must_use]
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// Process a whole line sequence
    ///
    /// An unterminated block comment at end of input is not an error; it is
    /// logged and the state simply persists.
    pub fn process(&mut self, lines: impl IntoIterator<Item = Line>) -> Result<()> {
        for line in lines {
            self.process_line(&line)?;
        }
        if self.in_block_comment {
            log::warn!(
                "{}: end of input inside an unterminated block comment",
                self.atoms.name()
            );
        }
        Ok(())
    }

    /// Scan one line and emit its atoms
    pub fn process_line(&mut self, line: &Line) -> Result<()> {
        let text = line.text.trim_end_matches(['\n', '\r']);
        let num = line.line_num;

        let mut pos = 0;
        while pos <= text.len() {
            let Some(m) = TOKEN_RE.find_at(text, pos) else {
                break;
            };
            let token = m.as_str();
            let tok_pos = m.start();
            let in_comment = self.in_line_comment || self.in_block_comment;

            if !in_comment {
                match token {
                    "{" => {
                        self.emit_content(num, pos, &text[pos..=tok_pos]);
                        self.emit(num, tok_pos, AtomKind::BlockStart);
                    }
                    "}" => {
                        self.emit_content(num, pos, &text[pos..=tok_pos]);
                        self.emit(num, tok_pos, AtomKind::BlockEnd);
                    }
                    ";" => {
                        self.emit_content(num, pos, &text[pos..=tok_pos]);
                        self.emit(num, tok_pos, AtomKind::StmtEnd);
                    }
                    "(" => {
                        self.emit_content(num, pos, &text[pos..=tok_pos]);
                        self.emit(num, tok_pos, AtomKind::ExprGroupStart);
                    }
                    ")" => {
                        self.emit_content(num, pos, &text[pos..=tok_pos]);
                        self.emit(num, tok_pos, AtomKind::ExprGroupEnd);
                    }
                    "#" => {
                        // The whole directive line is one atom; nothing after
                        // the marker is lexed.
                        self.emit(num, tok_pos, AtomKind::Macro(text.to_string()));
                        pos = text.len();
                        break;
                    }
                    "\\" => {
                        self.emit_content(num, pos, &text[pos..=tok_pos]);
                        self.emit(num, tok_pos, AtomKind::LineCont);
                    }
                    _ if token.starts_with("//") => {
                        self.emit_content(num, pos, &text[pos..tok_pos]);
                        self.emit(num, tok_pos, AtomKind::CommentStart);
                        self.emit(num, tok_pos, AtomKind::CommentToken(token.to_string()));
                        self.in_line_comment = true;
                    }
                    _ if token.starts_with("/*") => {
                        if self.in_block_comment {
                            return Err(ExtractError::CommentReopened {
                                line: num,
                                pos: tok_pos,
                            });
                        }
                        self.emit_content(num, pos, &text[pos..tok_pos]);
                        self.emit(num, tok_pos, AtomKind::CommentStart);
                        self.emit(num, tok_pos, AtomKind::CommentToken(token.to_string()));
                        if token.ends_with("*/") {
                            // Degenerate /**/ form opens and closes in one
                            // match; no re-scan.
                            self.emit(num, tok_pos, AtomKind::CommentEnd);
                        } else {
                            self.in_block_comment = true;
                        }
                    }
                    _ => {
                        // A bare `*/` with no comment open
                        return Err(ExtractError::CommentNotOpen {
                            line: num,
                            pos: tok_pos,
                        });
                    }
                }
            } else if token.ends_with("*/") {
                if !self.in_block_comment {
                    return Err(ExtractError::CommentNotOpen {
                        line: num,
                        pos: tok_pos,
                    });
                }
                self.emit_comment(num, pos, &text[pos..tok_pos]);
                self.emit(num, tok_pos, AtomKind::CommentEnd);
                self.in_block_comment = false;
            } else if token == "\\" {
                self.emit_comment(num, pos, &text[pos..=tok_pos]);
                self.emit(num, tok_pos, AtomKind::LineCont);
            } else {
                // Stray markers inside a comment (including a leading `#`)
                // are plain comment text.
                self.emit_comment(num, pos, &text[pos..m.end()]);
            }
            pos = m.end();
        }

        // Remainder of the line, classified by the current comment state
        if pos < text.len() {
            if self.in_line_comment || self.in_block_comment {
                self.emit_comment(num, pos, &text[pos..]);
            } else {
                self.emit_content(num, pos, &text[pos..]);
            }
        }

        let ended_in_comment = self.in_line_comment || self.in_block_comment;
        if self.in_line_comment && !self.in_block_comment {
            self.emit(num, text.len(), AtomKind::CommentEnd);
        }
        self.emit(
            num,
            text.len(),
            AtomKind::Newline {
                in_comment: ended_in_comment,
            },
        );

        // Line comments never survive the line
        self.in_line_comment = false;
        Ok(())
    }

    /// The atom stream produced so far
    #[must_use]
    pub fn stream(&self) -> &Stream<Atom> {
        &self.atoms
    }

    /// Consume the tokenizer, yielding its atom stream
    #[must_use]
    pub fn into_stream(self) -> Stream<Atom> {
        self.atoms
    }

    /// True while a `/* ... */` comment spans past the last processed line
    #[must_use]
    pub const fn in_block_comment(&self) -> bool {
        self.in_block_comment
    }

    fn emit_content(&mut self, line_num: usize, pos: usize, capture: &str) {
        if capture.is_empty() {
            return;
        }
        self.emit(line_num, pos, AtomKind::Content(capture.to_string()));
    }

    fn emit_comment(&mut self, line_num: usize, pos: usize, capture: &str) {
        if capture.is_empty() {
            return;
        }
        self.emit(line_num, pos, AtomKind::CommentToken(capture.to_string()));
    }

    fn emit(&mut self, line_num: usize, pos: usize, kind: AtomKind) {
        if self.trace {
            log::debug!(
                "[{}:{}#{}] {} {:?}",
                self.atoms.name(),
                line_num,
                pos,
                kind.as_str(),
                kind.value().unwrap_or("")
            );
        }
        self.atoms.append(Atom::new(line_num, pos, kind));
    }
}
