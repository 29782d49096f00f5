//! lzf - the Lazy Framework console

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;

use lazyfw::logging::init_logging;
use lazyfw::shell::{repl, Framework};
use lazyfw::starter::ensure_starter_modules;
use lazyfw::ui::Marquee;
use lazyfw::ShellConfig;

const STARTUP_TEXT: &str = "Starting the Lazy Framework console...";

#[derive(Parser, Debug)]
#[command(name = "lzf", version, about = "Modular interactive command shell")]
struct Cli {
    /// Configuration file (default: <base-dir>/lazyfw.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Base directory for module roots and banners (default: cwd)
    #[arg(long, value_name = "DIR")]
    base_dir: Option<PathBuf>,

    /// Skip the startup banner
    #[arg(long)]
    no_banner: bool,

    /// Skip the startup animation
    #[arg(short, long)]
    quiet: bool,

    /// Log filter (overrides the config file; RUST_LOG wins over both)
    #[arg(long, value_name = "FILTER")]
    log_filter: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let base_dir = match cli.base_dir {
        Some(dir) => dir,
        None => std::env::current_dir().context("failed to determine working directory")?,
    };
    let config_path = cli
        .config
        .unwrap_or_else(|| base_dir.join("lazyfw.toml"));
    let config = ShellConfig::load(&config_path)
        .with_context(|| format!("failed to load config from {:?}", config_path))?;

    init_logging(cli.log_filter.as_deref().or(config.log_filter.as_deref()));

    if config.marquee && !cli.quiet {
        Marquee::start(STARTUP_TEXT).wait();
    }

    // Seed starter modules into the examples root so a fresh install has
    // something to play with
    if let Some(examples) = config
        .resolved_roots(&base_dir)
        .iter()
        .find(|r| r.namespace == "examples")
    {
        ensure_starter_modules(&examples.dir)
            .with_context(|| format!("failed to seed starter modules in {:?}", examples.dir))?;
    }

    let mut fw = Framework::new(&config, &base_dir);

    println!("Lazy Framework type 'help' for commands");
    if !cli.no_banner {
        println!("{}", fw.banners().random());
    }

    repl::run(&mut fw)?;
    println!("Goodbye.");
    Ok(())
}
