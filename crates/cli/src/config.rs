use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Name of the per-project configuration file
pub const CONFIG_NAME: &str = ".cxtract.toml";

/// How many directory levels above the target to search for a config file
const MAX_SEARCH_DEPTH: usize = 5;

/// Per-project settings, read from `.cxtract.toml`
///
/// Everything is optional; command-line flags override whatever is set here.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Project name; defaults to the target directory's name
    pub name: Option<String>,

    /// Output directory, relative to the project root unless absolute
    pub output_dir: Option<PathBuf>,

    /// Rendering style name
    pub style: Option<String>,

    /// Render everything into the module document
    pub publish_single_file: bool,

    /// Override for the module document's file name
    pub output_file_name: Option<String>,

    /// File copied verbatim above the module document, relative to the
    /// project root
    pub project_header: Option<String>,

    /// When non-empty, only sources under these relative paths process
    pub include_paths: Vec<String>,

    /// Log every atom the tokenizer emits
    pub debug_atoms: bool,

    /// Log every chunk the combiner finalizes
    pub debug_chunks: bool,
}

impl ProjectConfig {
    /// Load the nearest config at or above `start`
    ///
    /// Walks up at most [`MAX_SEARCH_DEPTH`] levels. Returns the defaults
    /// when no config file exists; a file that exists but does not parse is
    /// an error.
    pub fn load(start: &Path) -> Result<Self> {
        let Some(path) = Self::find(start) else {
            log::debug!(
                "no {} found at or above {}",
                CONFIG_NAME,
                start.display()
            );
            return Ok(Self::default());
        };
        log::debug!("loading config from {}", path.display());
        let text = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("failed to parse {}", path.display()))
    }

    fn find(start: &Path) -> Option<PathBuf> {
        let mut dir = if start.is_dir() {
            start.to_path_buf()
        } else {
            start.parent()?.to_path_buf()
        };
        for _ in 0..=MAX_SEARCH_DEPTH {
            let candidate = dir.join(CONFIG_NAME);
            if candidate.is_file() {
                return Some(candidate);
            }
            if !dir.pop() {
                break;
            }
        }
        None
    }
}
