//! CLI Tooling
//!
//! Command-line interface over the viewer session. Each invocation ingests a
//! selection, runs one operation against the resulting forest, and prints the
//! outcome; nothing is persisted between runs.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use dialoguer::Select;
use tracing::info;

use crate::captions::collect_video_paths;
use crate::config::{ConfigLoader, ReelConfig};
use crate::error::ViewerError;
use crate::logging::init_logging;
use crate::session::ViewerSession;
use crate::tooling::render;
use crate::tree::builder::scan_directory;
use crate::tree::filter::filter_forest;

/// Reel CLI - local folder media viewer
#[derive(Parser)]
#[command(name = "reel")]
#[command(about = "Browse a media folder, match captions, and inspect playback selections")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output is "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// How a folder selection is ingested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum IngestMode {
    /// Scan to a flat list and synthesize the hierarchy, like a
    /// directory-input selection.
    Flat,
    /// Walk the directory-entry graph recursively, like a dropped folder.
    Walk,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Ingest a folder and print its normalized file tree
    Tree {
        /// Folder to browse
        directory: PathBuf,

        /// Ingestion route
        #[arg(long, value_enum, default_value = "flat")]
        ingest: IngestMode,

        /// Only show entries whose name (or a descendant's) contains this term
        #[arg(long)]
        filter: Option<String>,

        /// Output format (text, json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Probe caption candidates for a video path within a folder
    Captions {
        /// Folder to browse
        directory: PathBuf,

        /// Forest path of the video, e.g. "Show/Episode.mp4"
        video: String,

        /// Output format (text, json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Select a video and print its playback metadata and handles
    Select {
        /// Folder to browse
        directory: PathBuf,

        /// Forest path of the video, e.g. "Show/Episode.mp4"
        video: String,

        /// Ingestion route
        #[arg(long, value_enum, default_value = "flat")]
        ingest: IngestMode,

        /// Output format (text, json)
        #[arg(long, default_value = "text")]
        format: String,
    },
    /// Interactively pick a video from a folder
    Pick {
        /// Folder to browse
        directory: PathBuf,
    },
}

/// CLI execution context: configuration, runtime, and the viewer session.
pub struct CliContext {
    session: ViewerSession,
    runtime: tokio::runtime::Runtime,
}

impl CliContext {
    /// Build a context from CLI arguments: load configuration, apply logging
    /// overrides, and initialize the session.
    pub fn new(cli: &Cli) -> Result<Self, ViewerError> {
        let mut config = match &cli.config {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => {
                let cwd = std::env::current_dir()
                    .map_err(|e| ViewerError::ConfigError(format!("Cannot resolve cwd: {}", e)))?;
                ConfigLoader::load(&cwd)?
            }
        };
        apply_logging_overrides(&mut config, cli);
        init_logging(Some(&config.logging))?;

        let runtime = tokio::runtime::Runtime::new()
            .map_err(|e| ViewerError::ConfigError(format!("Failed to start runtime: {}", e)))?;
        Ok(Self {
            session: ViewerSession::new(config),
            runtime,
        })
    }

    /// Build a context from an explicit configuration; no logging init.
    pub fn with_config(config: ReelConfig) -> Result<Self, ViewerError> {
        let runtime = tokio::runtime::Runtime::new()
            .map_err(|e| ViewerError::ConfigError(format!("Failed to start runtime: {}", e)))?;
        Ok(Self {
            session: ViewerSession::new(config),
            runtime,
        })
    }

    /// Execute a command and return its printable output.
    pub fn execute(&self, command: &Commands) -> Result<String, ViewerError> {
        match command {
            Commands::Tree {
                directory,
                ingest,
                filter,
                format,
            } => self.cmd_tree(directory, *ingest, filter.as_deref(), format),
            Commands::Captions {
                directory,
                video,
                format,
            } => self.cmd_captions(directory, video, format),
            Commands::Select {
                directory,
                video,
                ingest,
                format,
            } => self.cmd_select(directory, video, *ingest, format),
            Commands::Pick { directory } => self.cmd_pick(directory),
        }
    }

    fn ingest(&self, directory: &Path, mode: IngestMode) -> Result<(), ViewerError> {
        match mode {
            IngestMode::Flat => {
                let files = scan_directory(directory)?;
                self.session.load_flat(files)?;
            }
            IngestMode::Walk => {
                self.runtime.block_on(self.session.load_directory(directory))?;
            }
        }
        Ok(())
    }

    fn cmd_tree(
        &self,
        directory: &Path,
        mode: IngestMode,
        filter: Option<&str>,
        format: &str,
    ) -> Result<String, ViewerError> {
        self.ingest(directory, mode)?;
        let video_extension = self.session.config().captions.video_extension.clone();
        self.session.visit_forest(|forest| {
            let view = match filter {
                Some(term) => filter_forest(forest, term),
                None => forest.to_vec(),
            };
            match format {
                "json" => Ok(render::forest_to_json(&view).to_string()),
                _ => Ok(render::render_tree(&view, &video_extension)),
            }
        })
    }

    fn cmd_captions(
        &self,
        directory: &Path,
        video: &str,
        format: &str,
    ) -> Result<String, ViewerError> {
        self.ingest(directory, IngestMode::Flat)?;
        let captions = self.session.config().captions.clone();
        self.session.visit_forest(|forest| match format {
            "json" => Ok(render::caption_probe_to_json(
                forest,
                video,
                &captions.video_extension,
                &captions.variants,
            )
            .to_string()),
            _ => Ok(render::render_caption_probe(
                forest,
                video,
                &captions.video_extension,
                &captions.variants,
            )),
        })
    }

    fn cmd_select(
        &self,
        directory: &Path,
        video: &str,
        mode: IngestMode,
        format: &str,
    ) -> Result<String, ViewerError> {
        self.ingest(directory, mode)?;
        let selection = self.session.select(video)?;
        let live = self.session.live_handle_count();
        match format {
            "json" => Ok(render::selection_to_json(&selection, live).to_string()),
            _ => Ok(render::render_selection(&selection, live)),
        }
    }

    fn cmd_pick(&self, directory: &Path) -> Result<String, ViewerError> {
        self.ingest(directory, IngestMode::Flat)?;
        let video_extension = self.session.config().captions.video_extension.clone();
        let videos = self
            .session
            .visit_forest(|forest| collect_video_paths(forest, &video_extension));
        if videos.is_empty() {
            return Ok("No videos found in this folder.".to_string());
        }

        let choice = Select::new()
            .with_prompt("Pick a video")
            .items(&videos)
            .default(0)
            .interact()
            .map_err(|e| ViewerError::ConfigError(format!("Selection aborted: {}", e)))?;

        info!(video = %videos[choice], "Picked interactively");
        let selection = self.session.select(&videos[choice])?;
        let live = self.session.live_handle_count();
        Ok(render::render_selection(&selection, live))
    }
}

fn apply_logging_overrides(config: &mut ReelConfig, cli: &Cli) {
    if let Some(level) = &cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(format) = &cli.log_format {
        config.logging.format = format.clone();
    }
    if let Some(output) = &cli.log_output {
        config.logging.output = output.clone();
    }
    if let Some(file) = &cli.log_file {
        config.logging.file = Some(file.clone());
    }
}
