use anyhow::Result;
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};

use cxtract_extractor::{extract_file, source, TraceOptions};
use cxtract_render::{FileDoc, ModuleDoc};

use crate::config::ProjectConfig;

/// Extensions treated as C or C++ sources
pub const SOURCE_EXTENSIONS: [&str; 9] =
    ["c", "h", "cc", "cpp", "cxx", "hpp", "hh", "hxx", "inl"];

/// The module name for a target path: its last path component
#[must_use]
pub fn module_name(path: &Path) -> String {
    path.components()
        .next_back()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .unwrap_or_else(|| "module".to_string())
}

/// Find every source file under `root`, gitignore-aware and sorted
///
/// A single-file target returns just that file. `include_paths` filters by
/// project-relative prefix when non-empty.
pub fn discover_sources(root: &Path, include_paths: &[String]) -> Vec<PathBuf> {
    if root.is_file() {
        return vec![root.to_path_buf()];
    }

    let mut sources = Vec::new();
    let walker = WalkBuilder::new(root)
        .hidden(true)
        .git_ignore(true)
        .git_global(true)
        .git_exclude(true)
        .build();

    for entry in walker.flatten() {
        let path = entry.path();
        if !path.is_file() || !has_source_extension(path) {
            continue;
        }
        let rel = source::project_relative_path(path, root);
        if !matches_include(&rel, include_paths) {
            log::debug!("skipping {rel}: outside include_paths");
            continue;
        }
        sources.push(path.to_path_buf());
    }

    sources.sort();
    sources
}

/// Extract every discovered source under `root` into a renderable module
///
/// A file that fails to extract is logged and skipped; it never aborts the
/// rest of the module.
pub fn build_module(root: &Path, config: &ProjectConfig, name: &str) -> Result<ModuleDoc> {
    let trace = TraceOptions {
        atoms: config.debug_atoms,
        chunks: config.debug_chunks,
    };
    let base = if root.is_file() {
        root.parent().unwrap_or(root)
    } else {
        root
    };

    let mut files = Vec::new();
    for path in discover_sources(root, &config.include_paths) {
        let rel = source::project_relative_path(&path, base);
        match extract_file(&path, trace) {
            Ok(chunks) => {
                log::debug!("{rel}: {} chunks", chunks.len());
                files.push(FileDoc::new(rel, chunks.into_items()));
            }
            Err(err) => {
                log::warn!("skipping {rel}: {err}");
            }
        }
    }
    log::info!("module {name}: {} source files", files.len());
    Ok(ModuleDoc::new(name, files))
}

fn has_source_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
}

/// Prefix match against normalized relative paths
fn matches_include(rel: &str, include_paths: &[String]) -> bool {
    if include_paths.is_empty() {
        return true;
    }
    include_paths.iter().any(|filter| {
        let filter = filter
            .replace('\\', "/")
            .trim_start_matches("./")
            .trim_end_matches('/')
            .to_string();
        rel == filter || rel.starts_with(&format!("{filter}/"))
    })
}
