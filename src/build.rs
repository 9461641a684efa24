//! `mdsite build`: copy static assets and convert every content page.
//!
//! A page that fails to convert is reported and skipped; the remaining pages
//! are still written and the build fails at the end.

use anyhow::{Context, Result};
use colored::Colorize;
use notify::{EventKind, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crate::assets;
use crate::config::SiteConfig;
use crate::generate;

/// Options passed from CLI to the build pipeline.
pub struct BuildOpts {
    pub verbose: bool,
    pub quiet: bool,
}

/// Aggregate report from one build.
#[derive(Default)]
pub struct BuildReport {
    pub static_files: usize,
    pub pages: usize,
    pub failures: Vec<(PathBuf, String)>,
}

impl BuildReport {
    pub fn print_summary(&self, public_dir: &Path) {
        println!(
            "{} {} pages, {} static files → {}",
            "Built".green().bold(),
            self.pages,
            self.static_files,
            public_dir.display()
        );
    }

    pub fn print_failures(&self) {
        for (path, message) in &self.failures {
            eprintln!("{} {}: {}", "FAILED".red().bold(), path.display(), message);
        }
    }
}

/// Run the full build described by `config`.
pub fn run_build(config: &SiteConfig, opts: &BuildOpts) -> Result<BuildReport> {
    let mut report = BuildReport::default();

    check_output_dir(config)?;

    // 1. Static assets
    report.static_files = assets::copy_static(&config.static_dir, &config.public_dir)?;
    if opts.verbose && !opts.quiet {
        println!(
            "  {} {} → {} ({} files)",
            "copied".dimmed(),
            config.static_dir.display(),
            config.public_dir.display(),
            report.static_files
        );
    }

    // 2. Template
    let template = std::fs::read_to_string(&config.template)
        .with_context(|| format!("Failed to read template {}", config.template.display()))?;

    // 3. Content pages
    let pages = assets::content_files(&config.content_dir)?;
    if pages.is_empty() && !opts.quiet {
        println!(
            "  {} no Markdown files under {}",
            "[WARN]".yellow(),
            config.content_dir.display()
        );
    }

    for rel in &pages {
        let src = config.content_dir.join(rel);
        let dest = assets::page_path(&config.public_dir, rel);

        match generate::generate_page(&src, &template, &dest) {
            Ok(()) => {
                report.pages += 1;
                if opts.verbose && !opts.quiet {
                    println!("  {} {} → {}", "page".dimmed(), rel.display(), dest.display());
                }
            }
            Err(e) => {
                report.failures.push((rel.clone(), format!("{:#}", e)));
            }
        }
    }

    Ok(report)
}

/// Refuse to build into a directory that holds the site's own sources, since
/// the output directory is wiped before every build.
fn check_output_dir(config: &SiteConfig) -> Result<()> {
    let Ok(public_dir) = std::fs::canonicalize(&config.public_dir) else {
        // Nothing there yet, so nothing to wipe.
        return Ok(());
    };

    let sources = [
        ("content directory", &config.content_dir),
        ("static directory", &config.static_dir),
        ("template", &config.template),
    ];
    for (what, path) in sources {
        if let Ok(source) = std::fs::canonicalize(path) {
            if source.starts_with(&public_dir) {
                anyhow::bail!(
                    "Refusing to build into {}: it contains the {} {}",
                    config.public_dir.display(),
                    what,
                    path.display()
                );
            }
        }
    }

    Ok(())
}

/// Build once, print the summary and turn page failures into an error.
pub fn handle_build(config: &SiteConfig, opts: &BuildOpts) -> Result<()> {
    let report = run_build(config, opts)?;

    if !opts.quiet {
        report.print_summary(&config.public_dir);
    }
    report.print_failures();

    if !report.failures.is_empty() {
        anyhow::bail!(
            "{} of {} pages failed",
            report.failures.len(),
            report.failures.len() + report.pages
        );
    }

    Ok(())
}

/// Watch the content dir, static dir and template and rebuild on each change.
///
/// Debounces rapid events (e.g. editors that write in stages) with a 200ms window.
/// Ctrl+C exits cleanly.
pub fn watch_and_rebuild(config: &SiteConfig, opts: &BuildOpts) -> Result<()> {
    println!(
        "{} {} for changes (Ctrl+C to stop)",
        "Watching".cyan().bold(),
        config.content_dir.display()
    );

    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
        if let Ok(event) = res {
            let _ = tx.send(event);
        }
    })?;

    for dir in [&config.content_dir, &config.static_dir] {
        if dir.exists() {
            watcher.watch(dir, RecursiveMode::Recursive)?;
        }
    }
    watcher.watch(&config.template, RecursiveMode::NonRecursive)?;

    let public_dir = std::fs::canonicalize(&config.public_dir).ok();
    let mut last_rebuild = Instant::now();
    let debounce = Duration::from_millis(200);

    loop {
        match rx.recv_timeout(Duration::from_secs(1)) {
            Ok(event) => {
                let relevant = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );
                // Writes into the output tree must not retrigger a build.
                let outside_public = event.paths.iter().any(|p| match &public_dir {
                    Some(public) => !p.starts_with(public),
                    None => true,
                });

                if relevant && outside_public && last_rebuild.elapsed() > debounce {
                    // Small delay to let the editor finish writing
                    std::thread::sleep(Duration::from_millis(50));

                    if let Err(e) = handle_build(config, opts) {
                        eprintln!("{} {:#}", "Build error:".red().bold(), e);
                    }
                    last_rebuild = Instant::now();
                }
            }
            Err(mpsc::RecvTimeoutError::Timeout) => {
                // Keep looping
            }
            Err(mpsc::RecvTimeoutError::Disconnected) => {
                break;
            }
        }
    }

    Ok(())
}
