use std::fs;
use std::path::{Path, PathBuf};

use crate::document::{FileDoc, ModuleDoc};
use crate::error::{RenderError, Result};
use crate::style::{get_style, Style};

/// How and where a module's markdown gets written
#[derive(Debug, Clone)]
pub struct ExportOptions {
    /// Directory all output lands under; created if missing
    pub output_dir: PathBuf,

    /// Registry name of the rendering style
    pub style: String,

    /// Render every source file into the module document instead of one
    /// markdown file per source file
    pub single_file: bool,

    /// Override for the module document's file name
    pub output_file_name: Option<String>,

    /// File whose contents are copied verbatim above the module document
    pub project_header: Option<PathBuf>,
}

/// Writes rendered modules to disk
///
/// The module document always exists; in per-source mode it carries just the
/// module frame and each source file renders to its own markdown file,
/// mirroring the source tree under the output directory.
pub struct Exporter {
    options: ExportOptions,
    style: Box<dyn Style>,
}

impl Exporter {
    /// Create an exporter, resolving the configured style
    pub fn new(options: ExportOptions) -> Result<Self> {
        let style =
            get_style(&options.style).ok_or_else(|| RenderError::unknown_style(&options.style))?;
        Ok(Self { options, style })
    }

    /// Render and write one module, returning every path written with the
    /// module document first
    pub fn export_module(&self, module: &ModuleDoc) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.options.output_dir)?;

        let module_path = self.module_output_path(module);
        let mut written = vec![module_path.clone()];
        let mut out = String::new();

        if let Some(header) = &self.options.project_header {
            log::debug!("copying project header from {}", header.display());
            out.push_str(&fs::read_to_string(header)?);
            out.push_str("\n\n");
        }

        self.style.start_module(&mut out, module);
        for file in &module.files {
            if self.options.single_file {
                self.render_file(&mut out, file);
            } else {
                written.push(self.export_file(file)?);
            }
        }
        self.style.end_module(&mut out, module);

        log::info!("writing module {} to {}", module.name, module_path.display());
        fs::write(&module_path, out)?;
        Ok(written)
    }

    fn module_output_path(&self, module: &ModuleDoc) -> PathBuf {
        let name = match &self.options.output_file_name {
            Some(name) => name.clone(),
            None => format!("{}.md", module.name),
        };
        self.options.output_dir.join(name)
    }

    /// Write one source file's rendering to its own markdown file, placed
    /// at the source's relative path with the extension swapped
    fn export_file(&self, file: &FileDoc) -> Result<PathBuf> {
        let path = self
            .options
            .output_dir
            .join(Path::new(&file.rel_path).with_extension("md"));
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let mut out = String::new();
        self.render_file(&mut out, file);

        log::info!("writing source {} to {}", file.rel_path, path.display());
        fs::write(&path, out)?;
        Ok(path)
    }

    fn render_file(&self, out: &mut String, file: &FileDoc) {
        self.style.start_file(out, file);
        for chunk in &file.chunks {
            self.style.chunk(out, chunk);
        }
        self.style.end_file(out, file);
    }
}
