use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

use cxtract_extractor::{extract_file, TraceOptions};
use cxtract_render::{get_style, ExportOptions, Exporter, DEFAULT_STYLE, STYLE_NAMES};

mod config;
mod module;

use config::ProjectConfig;

#[derive(Parser)]
#[command(name = "cxtract")]
#[command(about = "Extract markdown docs from C/C++ comments", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Quiet mode: log only warnings/errors (stdout is reserved for output)
    #[arg(long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Extract a source tree and write markdown
    Generate {
        /// Directory or single source file to process
        path: PathBuf,

        /// Output directory (default: <path>/_output, or output_dir from
        /// the config file)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Rendering style
        #[arg(short, long)]
        style: Option<String>,

        /// Render everything into one markdown document
        #[arg(long)]
        single_file: bool,

        /// Module name (default: the target directory's name)
        #[arg(long)]
        name: Option<String>,
    },

    /// Extract one source file and print its chunks as JSON lines
    Chunks {
        /// Source file to process
        path: PathBuf,
    },

    /// List the registered rendering styles
    Styles,
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli);
    if let Err(err) = run(cli) {
        log::error!("{err:#}");
        std::process::exit(1);
    }
}

fn init_logging(cli: &Cli) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if cli.quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if cli.verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Generate {
            path,
            output,
            style,
            single_file,
            name,
        } => generate(&path, output, style, single_file, name),
        Commands::Chunks { path } => chunks(&path),
        Commands::Styles => {
            for name in STYLE_NAMES {
                println!("{name}");
            }
            Ok(())
        }
    }
}

fn generate(
    path: &Path,
    output: Option<PathBuf>,
    style: Option<String>,
    single_file: bool,
    name: Option<String>,
) -> Result<()> {
    if !path.exists() {
        bail!("no such path: {}", path.display());
    }
    let config = ProjectConfig::load(path)?;

    let style = style
        .or_else(|| config.style.clone())
        .unwrap_or_else(|| DEFAULT_STYLE.to_string());
    if get_style(&style).is_none() {
        bail!(
            "unknown style {:?}; available: {}",
            style,
            STYLE_NAMES.join(", ")
        );
    }

    let root = if path.is_file() {
        path.parent().unwrap_or(path)
    } else {
        path
    };
    let output_dir = output
        .or_else(|| config.output_dir.as_ref().map(|d| resolve(root, d)))
        .unwrap_or_else(|| root.join("_output"));
    let project_header = config
        .project_header
        .as_ref()
        .map(|h| resolve(root, Path::new(h)));

    let name = name
        .or_else(|| config.name.clone())
        .unwrap_or_else(|| module::module_name(root));

    let module = module::build_module(path, &config, &name)?;
    if module.chunk_count() == 0 {
        log::warn!("no documented declarations found under {}", path.display());
    }

    let exporter = Exporter::new(ExportOptions {
        output_dir,
        style,
        single_file: single_file || config.publish_single_file,
        output_file_name: config.output_file_name.clone(),
        project_header,
    })?;
    let written = exporter
        .export_module(&module)
        .context("failed to export module")?;
    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}

fn chunks(path: &Path) -> Result<()> {
    if !path.is_file() {
        bail!("not a file: {}", path.display());
    }
    let config = ProjectConfig::load(path)?;
    let trace = TraceOptions {
        atoms: config.debug_atoms,
        chunks: config.debug_chunks,
    };
    let stream = extract_file(path, trace)
        .with_context(|| format!("failed to extract {}", path.display()))?;
    for chunk in &stream {
        println!("{}", serde_json::to_string(chunk)?);
    }
    Ok(())
}

/// Resolve a config-relative path against the project root
fn resolve(root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        root.join(path)
    }
}
