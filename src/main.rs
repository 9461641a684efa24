use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;

mod assets;
mod build;
mod config;
mod generate;

#[derive(Parser)]
#[command(name = "mdsite", version, about = "Static site generator for a small Markdown subset")]
struct Cli {
    /// Suppress non-essential output
    #[arg(long, global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Copy static assets and render every content page
    Build {
        /// Path to mdsite.json (default: ./mdsite.json, or built-in defaults)
        #[arg(long)]
        config: Option<PathBuf>,

        /// Output directory (overrides publicDir)
        #[arg(long)]
        out: Option<PathBuf>,

        /// Show every copied directory and generated page
        #[arg(long)]
        verbose: bool,

        /// Rebuild whenever content, static files or the template change
        #[arg(long)]
        watch: bool,
    },

    /// Render a single Markdown file to an HTML fragment on stdout
    Render {
        /// Path to the .md file
        file: String,

        /// Print only the document title
        #[arg(long)]
        title: bool,
    },

    /// Convert Markdown file(s) without writing anything and report errors
    Check {
        /// Path to the .md file(s)
        files: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Build {
            config,
            out,
            verbose,
            watch,
        } => {
            let mut site = config::load_config(config.as_deref())?;
            if let Some(out) = out {
                site.public_dir = out;
            }
            let opts = build::BuildOpts {
                verbose,
                quiet: cli.quiet,
            };

            if watch {
                if let Err(e) = build::handle_build(&site, &opts) {
                    eprintln!("{} {:#}", "Build error:".red().bold(), e);
                }
                build::watch_and_rebuild(&site, &opts)?;
            } else {
                build::handle_build(&site, &opts)?;
            }
        }
        Commands::Render { file, title } => {
            handle_render(&file, title)?;
        }
        Commands::Check { files } => {
            handle_check(&files, cli.quiet)?;
        }
    }

    Ok(())
}

fn handle_render(file: &str, title_only: bool) -> Result<()> {
    let content =
        std::fs::read_to_string(file).with_context(|| format!("Failed to read '{}'", file))?;

    let output = if title_only {
        mdsite_parse::extract_title(&content)
    } else {
        mdsite_parse::markdown_to_html(&content)
    }
    .with_context(|| format!("Failed to convert '{}'", file))?;

    println!("{output}");
    Ok(())
}

fn handle_check(files: &[String], quiet: bool) -> Result<()> {
    let mut has_errors = false;

    for file in files {
        let content =
            std::fs::read_to_string(file).with_context(|| format!("Failed to read '{}'", file))?;

        let result = mdsite_parse::markdown_to_html(&content)
            .and_then(|_| mdsite_parse::extract_title(&content));

        match result {
            Ok(_) => {
                if !quiet {
                    println!("{}: {}", file, "OK".green());
                }
            }
            Err(e) => {
                has_errors = true;
                eprintln!("{}: {}: {}", file, "error".red().bold(), e);
            }
        }
    }

    if has_errors {
        std::process::exit(1);
    }

    Ok(())
}
