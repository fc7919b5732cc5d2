mod config;
mod error;
mod icon;
mod platform;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use config::AppConfig;
use icon::IconSpec;
use platform::Platform;

#[derive(Parser)]
#[command(name = "plateicon", about = "Generate plate-of-food app icons for mobile packaging")]
struct Cli {
    /// Config file (defaults to ~/.config/plateicon/config.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Project root to write into, overriding the config
    #[arg(long, global = true)]
    out_dir: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Write the SVG icon set
    Svg,
    /// Write the PNG icon set for one platform
    Platform {
        #[arg(value_enum)]
        platform: Platform,
    },
    /// Write the SVG set and both platform sets
    All,
    /// Render a single icon
    Render {
        #[arg(long)]
        size: u32,
        #[arg(long)]
        output: PathBuf,
        /// Output format; inferred from the file extension when omitted
        #[arg(long, value_enum)]
        format: Option<Format>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Svg,
    Png,
}

impl Format {
    fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("svg") => Format::Svg,
            _ => Format::Png,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(format!("plateicon={}", default_level).parse()?);
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)?,
        None => AppConfig::load(),
    };
    if let Some(out_dir) = cli.out_dir {
        config.output_root = out_dir;
    }

    match cli.command.unwrap_or(Command::All) {
        Command::Svg => {
            generate_svg(&config)?;
        }
        Command::Platform { platform } => {
            platform::generate_platform_set(platform, &config.output_root)
                .with_context(|| format!("{} icon set failed", platform.name()))?;
        }
        Command::All => {
            generate_svg(&config)?;
            for platform in [Platform::Ios, Platform::Android] {
                platform::generate_platform_set(platform, &config.output_root)
                    .with_context(|| format!("{} icon set failed", platform.name()))?;
            }
            info!("App icons generated successfully!");
        }
        Command::Render {
            size,
            output,
            format,
        } => {
            let spec = IconSpec::new(size, &output)?;
            match format.unwrap_or_else(|| Format::from_path(&output)) {
                Format::Svg => icon::svg::write_vector(&spec)?,
                Format::Png => icon::raster::write_raster(&spec)?,
            }
        }
    }

    Ok(())
}

fn generate_svg(config: &AppConfig) -> Result<()> {
    let dir = config.vector_output_dir();
    let written = platform::generate_vector_set(&dir).context("SVG icon set failed")?;
    info!("{} SVG icons written to {}", written.len(), dir.display());
    Ok(())
}
