//! Tile pyramid and colormap command-line tool.
//!
//! `tiler pyramid` renders a slippy-map pyramid from a YAML configuration;
//! `tiler colormap ...` converts, previews and imports colormap files.

mod progress;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colormap::Colormap;
use progress::TerminalProgress;
use pyramid::{LogProgress, ProgressReporter, PyramidConfig, PyramidGenerator};
use renderer::TestPatternRenderer;
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tile_common::BoundingBox;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "tiler")]
#[command(about = "Tile pyramid generation and colormap tools")]
struct Cli {
    /// Log level
    #[arg(long, default_value = "info", global = true, env = "LOG_LEVEL")]
    log_level: String,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a tile pyramid with the test-pattern backend
    Pyramid {
        /// Pyramid configuration YAML
        #[arg(short, long)]
        config: PathBuf,

        /// Override the output directory
        #[arg(long)]
        out_dir: Option<PathBuf>,

        /// Override the first zoom level
        #[arg(long)]
        min_zoom: Option<u32>,

        /// Override the last zoom level
        #[arg(long)]
        max_zoom: Option<u32>,

        /// Override the region as "west,south,east,north"
        #[arg(long)]
        bbox: Option<String>,

        /// Override the number of render workers
        #[arg(short, long)]
        workers: Option<usize>,

        /// Report progress through the log instead of the terminal
        #[arg(long)]
        quiet: bool,
    },

    /// Colormap file tools
    Colormap {
        #[command(subcommand)]
        command: ColormapCommands,
    },
}

#[derive(Subcommand, Debug)]
enum ColormapCommands {
    /// Parse a colormap and write it back in canonical form
    Normalize {
        file: PathBuf,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write the GDAL color-relief table for a colormap
    Gdal {
        file: PathBuf,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Write the HTML legend for a colormap
    Legend {
        file: PathBuf,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Convert a Windy color scale (JSON) into a colormap
    ConvertWindy {
        /// Units label of the resulting colormap
        #[arg(short, long)]
        units: String,

        /// JSON input; stdin when omitted
        input: Option<PathBuf>,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render every colormap in a directory into one HTML page
    Preview {
        dir: PathBuf,

        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.log_json)?;

    match cli.command {
        Commands::Pyramid {
            config,
            out_dir,
            min_zoom,
            max_zoom,
            bbox,
            workers,
            quiet,
        } => {
            let mut config = PyramidConfig::from_file(&config)
                .with_context(|| format!("Failed to load {}", config.display()))?;

            if let Some(dir) = out_dir {
                config.out_dir = dir;
            }
            if let Some(z) = min_zoom {
                config.min_zoom = z;
            }
            if let Some(z) = max_zoom {
                config.max_zoom = z;
            }
            if let Some(text) = bbox {
                let parsed: BoundingBox = text.parse().context("Invalid --bbox")?;
                config.bbox = Some(parsed);
            }
            if let Some(w) = workers {
                config.workers = w;
            }

            run_pyramid(config, quiet)
        }
        Commands::Colormap { command } => run_colormap(command),
    }
}

/// `RUST_LOG` takes precedence; otherwise `--log-level` is used as the
/// filter directive.
fn log_filter(log_level: &str) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level))
}

fn init_tracing(log_level: &str, json: bool) -> Result<()> {
    let builder = tracing_subscriber::fmt()
        .with_env_filter(log_filter(log_level))
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr);

    if json {
        tracing::subscriber::set_global_default(builder.json().finish())?;
    } else {
        tracing::subscriber::set_global_default(builder.finish())?;
    }
    Ok(())
}

fn run_pyramid(config: PyramidConfig, quiet: bool) -> Result<()> {
    let legend = config
        .colormap
        .as_ref()
        .map(Colormap::read)
        .transpose()
        .context("Failed to load legend colormap")?;

    let progress: Arc<dyn ProgressReporter> = if quiet {
        Arc::new(LogProgress)
    } else {
        Arc::new(TerminalProgress)
    };

    let mut generator = PyramidGenerator::new(config)
        .context("Invalid pyramid configuration")?
        .with_progress(progress);
    if let Some(colormap) = legend {
        generator = generator.with_legend(Arc::new(colormap));
    }

    let summary = generator
        .generate_parallel(TestPatternRenderer::default)
        .context("Pyramid generation failed")?;

    info!(
        out_dir = %generator.config().out_dir.display(),
        tiles = summary.total_tiles(),
        elapsed_secs = format!("{:.2}", summary.elapsed.as_secs_f64()),
        "Done"
    );
    Ok(())
}

fn run_colormap(command: ColormapCommands) -> Result<()> {
    match command {
        ColormapCommands::Normalize { file, output } => {
            let cmap = read_colormap(&file)?;
            emit(&cmap.serialize(), output.as_deref())
        }
        ColormapCommands::Gdal { file, output } => {
            let cmap = read_colormap(&file)?;
            emit(&colormap::to_gdal_color_table(&cmap), output.as_deref())
        }
        ColormapCommands::Legend { file, output } => {
            let cmap = read_colormap(&file)?;
            emit(&colormap::html_legend(&cmap), output.as_deref())
        }
        ColormapCommands::ConvertWindy {
            units,
            input,
            output,
        } => {
            let json = match input {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read {}", path.display()))?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("Failed to read stdin")?;
                    buf
                }
            };
            let cmap = colormap::from_windy_json(&json, &units)
                .context("Failed to convert Windy color scale")?;
            emit(&cmap.serialize(), output.as_deref())
        }
        ColormapCommands::Preview { dir, output } => {
            if !dir.is_dir() {
                bail!("{} is not a directory", dir.display());
            }
            let maps = colormap::load_colormap_dir(&dir)?;
            let page = colormap::render_preview_page(&maps);
            std::fs::write(&output, page)
                .with_context(|| format!("Failed to write {}", output.display()))?;
            info!(colormaps = maps.len(), path = %output.display(), "Wrote colormap preview");
            Ok(())
        }
    }
}

fn read_colormap(path: &Path) -> Result<Colormap> {
    Ok(Colormap::read(path)?)
}

/// Write to `output`, or stdout when absent.
fn emit(text: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, text)
            .with_context(|| format!("Failed to write {}", path.display())),
        None => {
            print!("{}", text);
            Ok(())
        }
    }
}
