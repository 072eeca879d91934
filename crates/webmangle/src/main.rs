use std::{path::PathBuf, process::ExitCode};

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use webmangle::{
    config::Config,
    files::{SourceFile, collect_sources, output_path, write_source},
    mangle_all,
    types::WebFile,
};

/// Shorten class names, ids, attributes and CSS variables across CSS, HTML
/// and JavaScript files
#[derive(Parser, Debug)]
#[command(name = "webmangle", version, about)]
struct Cli {
    /// Files or directories to mangle
    #[arg(required = true)]
    paths: Vec<PathBuf>,

    /// Configuration file (defaults to ./webmangle.toml, then the user config)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Write results into this directory instead of overwriting the inputs
    #[arg(short, long)]
    out_dir: Option<PathBuf>,

    /// Mangle but do not write anything
    #[arg(long)]
    dry_run: bool,

    /// Increase log verbosity (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .format_timestamp(None)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let cwd = std::env::current_dir().context("Failed to determine the working directory")?;
    let config = Config::load(cli.config.as_deref(), &cwd)?;
    let manglers = config.manglers();

    let mut sources = collect_sources(&cli.paths)?;
    if sources.is_empty() {
        info!("No supported files found");
        return Ok(());
    }

    let mut files: Vec<WebFile> = sources.iter().map(|source| source.file.clone()).collect();
    let applied = mangle_all(&mut files, &manglers)?;
    for (source, file) in sources.iter_mut().zip(files) {
        source.file = file;
    }

    let total: usize = applied.iter().map(|(_, map)| map.len()).sum();
    info!("Mangled {total} tokens in {} files", sources.len());

    if cli.dry_run {
        info!("Dry run, nothing written");
        return Ok(());
    }
    write_all(&sources, cli)
}

fn write_all(sources: &[SourceFile], cli: &Cli) -> Result<()> {
    for source in sources {
        let target = output_path(source, cli.out_dir.as_deref());
        write_source(source, &target)?;
    }
    Ok(())
}
