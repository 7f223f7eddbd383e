use anyhow::anyhow;
use clap::Parser;
use stamp_bin::{
    cli::{Cli, Command},
    commands,
};
use stamp_log::LogConfig;
use std::io;

fn main() {
    if let Err(err) = main_inner() {
        // Manually print the error so we can control the format.
        eprintln!("{}", stamp_bin::exit_message(&err));
        std::process::exit(1);
    }
}

fn main_inner() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let _log_guard = stamp_log::init(LogConfig {
        log_file_path: cli.log_file,
    })
    .map_err(|err| anyhow!("failed to initialize logging: {err}"))?;

    // Build identity must be complete before any command runs
    let info = stamp::init().map_err(|err| {
        tracing::error!("{}", stamp::error_chain(&err));
        err
    })?;
    info.log_header();

    let mut stdout = io::stdout().lock();
    if cli.version {
        return commands::info::run(info, false, &mut stdout);
    }

    match cli.command {
        None => commands::info::run(info, false, &mut stdout),
        Some(Command::Info { json }) => commands::info::run(info, json, &mut stdout),
        Some(Command::Settings) => {
            commands::settings::run(stamp::BuildSettings::embedded().as_ref(), &mut stdout)
        },
    }
}
