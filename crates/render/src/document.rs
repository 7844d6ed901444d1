use cxtract_extractor::Chunk;

/// Extraction results for one source file, ready to render
#[derive(Debug, Clone)]
pub struct FileDoc {
    /// Path relative to the project root, forward slashes
    pub rel_path: String,

    /// Chunks in source order
    pub chunks: Vec<Chunk>,
}

impl FileDoc {
    pub fn new(rel_path: impl Into<String>, chunks: Vec<Chunk>) -> Self {
        Self {
            rel_path: rel_path.into(),
            chunks,
        }
    }

    /// The file's base name, used as its section heading
    #[must_use]
    pub fn base_name(&self) -> &str {
        self.rel_path
            .rsplit('/')
            .next()
            .unwrap_or(&self.rel_path)
    }
}

/// A named group of extracted files, usually one source directory
#[derive(Debug, Clone)]
pub struct ModuleDoc {
    pub name: String,

    /// Files in discovery order
    pub files: Vec<FileDoc>,
}

impl ModuleDoc {
    pub fn new(name: impl Into<String>, files: Vec<FileDoc>) -> Self {
        Self {
            name: name.into(),
            files,
        }
    }

    /// Total chunks across all files
    #[must_use]
    pub fn chunk_count(&self) -> usize {
        self.files.iter().map(|f| f.chunks.len()).sum()
    }
}
