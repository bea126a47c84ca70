use std::{io, path::PathBuf, process::ExitCode};

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use tips_terminal_ui::SessionOutcome;

mod commands;
mod config;
mod discovery;

use commands::Mode;
use config::AppConfig;

/// Exit status after Ctrl-C, as a shell reports SIGINT.
const INTERRUPTED_EXIT_CODE: u8 = 130;

#[derive(Parser, Debug)]
#[command(name = "tips")]
#[command(about = "Show tips", long_about = None)]
#[command(version)]
struct Cli {
    /// Show debug messages
    #[arg(short, long)]
    debug: bool,

    /// Print files instead of their contents
    #[arg(long)]
    files: bool,

    /// Show tips with interactive search
    #[arg(short, long)]
    interactive: bool,

    /// Additional directory to read tips markdown files from
    #[arg(long = "dir", value_name = "DIR")]
    dirs: Vec<PathBuf>,
}

impl Cli {
    fn mode(&self) -> Mode {
        if self.interactive {
            Mode::Interactive
        } else {
            Mode::Dump
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // RUST_LOG still wins over --debug.
    let env = if cli.debug {
        Env::default().default_filter_or("debug")
    } else {
        Env::default().default_filter_or("warn")
    };
    env_logger::Builder::from_env(env).init();

    match run(&cli) {
        Ok(code) => code,
        Err(err) => {
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<ExitCode> {
    let config = AppConfig::load();
    let dirs = discovery::tip_directories(&config.tips_dirs, &cli.dirs);
    let files = discovery::find_tip_files(&dirs);
    if files.is_empty() {
        log::error!("Cannot find any tips file");
        return Ok(ExitCode::FAILURE);
    }

    let mut stdout = io::stdout().lock();

    if cli.files {
        commands::list_files::run(&files, &mut stdout)?;
        return Ok(ExitCode::SUCCESS);
    }

    let documents = discovery::load_documents(&files)?;
    let outcome = commands::run(&documents, cli.mode(), config.palette, &mut stdout)?;

    match outcome {
        Some(outcome @ SessionOutcome::Confirmed(_)) => {
            commands::interactive::emit(&outcome, &mut stdout)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(SessionOutcome::Interrupted) => Ok(ExitCode::from(INTERRUPTED_EXIT_CODE)),
        None => Ok(ExitCode::SUCCESS),
    }
}
