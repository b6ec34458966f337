use clap::Parser;
use dv_enabler::command::Cli;
use dv_enabler::command::dispatcher::dispatch_command;
use dv_enabler::logging;
use dv_enabler::shared::config::load_settings;
use std::io;
use tracing::info;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = load_settings()?;
    logging::init(&settings.logging)?;

    info!("dv_enabler starting");
    let stdout = io::stdout();
    let mut out = stdout.lock();
    dispatch_command(&cli.command, &settings, &mut out)
}
