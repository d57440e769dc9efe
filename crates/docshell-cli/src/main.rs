//! docshell CLI - renders HTML document shells from page files.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

mod assets;
mod commands;
mod config;
mod page;

#[derive(Parser)]
#[command(name = "docshell")]
#[command(about = "Render HTML document shells for server-side rendering")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to docshell.toml config file
    #[arg(short, long, default_value = "docshell.toml")]
    config: PathBuf,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Scaffold a config file and an example page
    Init {
        /// Overwrite existing files
        #[arg(short, long)]
        yes: bool,
    },

    /// Render a single page file
    Render {
        /// Page file to render
        page: PathBuf,

        /// Write to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Leave out the DOCTYPE declaration
        #[arg(long)]
        no_doctype: bool,

        /// Skip minification of inline styles
        #[arg(long)]
        no_minify: bool,
    },

    /// Render every page in the pages directory
    Build {
        /// Pages directory (defaults to config or "pages")
        #[arg(short, long)]
        pages: Option<PathBuf>,

        /// Output directory (defaults to config or "dist")
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Skip minification of inline styles
        #[arg(long)]
        no_minify: bool,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Init { yes } => {
            commands::init::run(&cli.config, yes)?;
        }
        Commands::Render {
            page,
            output,
            no_doctype,
            no_minify,
        } => {
            let file_config = config::load_config(&cli.config)?;
            let options = commands::render::RenderOptions {
                minify: !no_minify && file_config.build.minify,
                doctype: !no_doctype && file_config.build.doctype,
            };
            commands::render::run(&page, output.as_deref(), options)?;
        }
        Commands::Build {
            pages,
            output,
            no_minify,
        } => {
            let file_config = config::load_config(&cli.config)?;
            let minify = if no_minify { Some(false) } else { None };
            commands::build::run(&file_config, pages, output, minify)?;
        }
    }

    Ok(())
}
