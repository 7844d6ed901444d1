//! Markdown rendering for extracted chunks
//!
//! A [`Style`] turns a module's chunks into GitHub-flavored markdown; the
//! [`Exporter`] drives a style over a [`ModuleDoc`] and writes the result
//! either as one document or as one markdown file per source file. Styles
//! are looked up by name through [`get_style`].

pub mod document;
pub mod error;
pub mod exporter;
pub mod project_index;
pub mod readme;
pub mod style;

pub use document::{FileDoc, ModuleDoc};
pub use error::{RenderError, Result};
pub use exporter::{ExportOptions, Exporter};
pub use project_index::ProjectIndexStyle;
pub use readme::ReadmeStyle;
pub use style::{get_style, Style, DEFAULT_STYLE, STYLE_NAMES};
