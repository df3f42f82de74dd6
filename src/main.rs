use std::{
    io::{self, Read},
    path::PathBuf,
};

use anyhow::bail;
use clap::Parser;
use rayon::prelude::*;
use tracing_subscriber::EnvFilter;
use twikiview::{
    FileSurface,
    OutputMode,
    PreviewSession,
    io::{html_path, render_file, write_preview},
};

#[derive(Parser)]
#[command(version, about = "Render TWiki markup as an HTML preview")]
struct Cli {
    /// Emit only the HTML fragment, without the document wrapper
    #[arg(long)]
    fragment: bool,
    /// Write `<name>.html` next to each file instead of printing
    #[arg(long, requires = "files")]
    write: bool,
    /// Keep the preview of a single file up to date as it changes
    #[arg(long, requires = "files", conflicts_with = "write")]
    watch: bool,
    /// Log progress at info level
    #[arg(short, long)]
    verbose: bool,
    /// TWiki files to render; standard input is read when none are given
    files: Vec<PathBuf>,
}

/// Send logs to stderr so stdout carries only HTML.
///
/// `--verbose` selects the `info` level; otherwise `RUST_LOG` applies,
/// falling back to `warn`.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn watch(files: &[PathBuf], mode: OutputMode) -> anyhow::Result<()> {
    let [source] = files else {
        bail!("--watch takes exactly one file, got {}", files.len());
    };
    let surface = FileSurface::new(html_path(source));
    let mut session = PreviewSession::open(source.clone(), mode, surface)?;
    let subscription = session.subscribe()?;
    tracing::info!(
        source = %source.display(),
        target = %session.surface().path().display(),
        "watching for changes; press Ctrl+C to stop"
    );
    session.watch(&subscription);
    Ok(())
}

/// Entry point for the command-line previewer.
///
/// With no files, standard input is rendered to standard output. Files are
/// rendered in parallel and printed in the order given, or written next to
/// their sources with `--write`.
///
/// # Examples
///
/// ```sh
/// # Print the preview document for a topic
/// twikiview WebHome.txt
///
/// # Write WebHome.html and rewrite it on every save
/// twikiview --watch WebHome.txt
///
/// # Render a fragment from standard input
/// cat WebHome.txt | twikiview --fragment
/// ```
fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let mode = if cli.fragment {
        OutputMode::Fragment
    } else {
        OutputMode::Document
    };

    if cli.watch {
        return watch(&cli.files, mode);
    }

    if cli.files.is_empty() {
        let mut input = String::new();
        io::stdin().read_to_string(&mut input)?;
        print!("{}", mode.render(&input));
        return Ok(());
    }

    if cli.write {
        cli.files
            .par_iter()
            .try_for_each(|path| write_preview(path, mode).map(|_| ()))?;
        return Ok(());
    }

    let rendered = cli
        .files
        .par_iter()
        .map(|path| render_file(path, mode))
        .collect::<Result<Vec<_>, _>>()?;
    for html in rendered {
        print!("{html}");
    }
    Ok(())
}
