//! Weightloss Tracker
//!
//! Host binary for the weightloss tracker appliance. A controller task owns
//! the screens and renders 128x64 frames; a frontend task shows them and
//! forwards input. The two meet only at a pair of byte pipes.

mod channels;
mod collaborators;
mod config;
mod frontend;
mod link;
mod tasks;
#[cfg(test)]
mod testing;

use std::fs::File;
use std::path::{Path, PathBuf};
use std::process;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use embassy_executor::Spawner;
use embassy_time::Timer;
use env_logger::{Env, Target};
use log::info;

use weightloss_core::{build_screens, Controller};

use crate::channels::APP_EXIT;
use crate::config::{load_config, FrontendKind, EMBEDDED_CONFIG};

/// Time left to the frontend to present the final LED frame
const EXIT_GRACE_MS: u64 = 50;

/// Screen-cycling weightloss tracker
#[derive(Parser, Debug)]
#[command(name = "weightloss-tracker", version, about)]
struct Cli {
    /// Configuration file (defaults to the embedded configuration)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the frontend selected in the configuration
    #[arg(short, long, value_enum)]
    frontend: Option<FrontendKind>,

    /// Log destination while the terminal frontend owns the screen
    #[arg(long, default_value = "weightloss.log")]
    log_file: PathBuf,

    /// Print the embedded configuration and exit
    #[arg(long)]
    print_default_config: bool,
}

#[embassy_executor::main]
async fn main(spawner: Spawner) {
    let cli = Cli::parse();
    if cli.print_default_config {
        print!("{}", EMBEDDED_CONFIG);
        process::exit(0);
    }

    if let Err(e) = start(spawner, &cli) {
        frontend::restore_terminal();
        eprintln!("weightloss-tracker: {:#}", e);
        process::exit(1);
    }

    let reason = APP_EXIT.wait().await;
    Timer::after_millis(EXIT_GRACE_MS).await;
    frontend::restore_terminal();
    info!("exiting: {:?}", reason);
    process::exit(reason.code());
}

fn start(spawner: Spawner, cli: &Cli) -> Result<()> {
    let config = load_config(cli.config.as_deref()).context("loading configuration")?;
    let kind = cli.frontend.unwrap_or(config.gadget.frontend);
    init_logging(&config.gadget.log_level, kind, &cli.log_file)?;
    info!(
        "weightloss tracker starting: {} screen sections, {:?} frontend",
        config.screens.len(),
        kind
    );

    let mut collaborators =
        collaborators::build(&config.gadget).context("setting up collaborators")?;
    let screens =
        build_screens(&config.screens, &mut collaborators).context("building screens")?;
    let controller = Controller::new(screens, config.controller_settings())
        .context("starting controller")?;

    let backend = frontend::open_backend(kind).context("opening display")?;
    frontend::spawn_input(kind).context("starting input thread")?;

    spawner
        .spawn(tasks::controller_task(controller))
        .map_err(|e| anyhow!("spawning controller task: {:?}", e))?;
    spawner
        .spawn(tasks::frontend_task(backend))
        .map_err(|e| anyhow!("spawning frontend task: {:?}", e))?;
    Ok(())
}

/// `RUST_LOG` wins over the configured level. The terminal frontend owns
/// stdout, so its logs go to a file.
fn init_logging(level: &str, kind: FrontendKind, log_file: &Path) -> Result<()> {
    let mut builder = env_logger::Builder::from_env(Env::default().default_filter_or(level));
    if kind == FrontendKind::Terminal {
        let file = File::create(log_file)
            .with_context(|| format!("creating log file {}", log_file.display()))?;
        builder.target(Target::Pipe(Box::new(file)));
    }
    builder.init();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_frontend_override() {
        let cli = Cli::parse_from(["weightloss-tracker", "--frontend", "headless"]);
        assert_eq!(cli.frontend, Some(FrontendKind::Headless));
        assert_eq!(cli.log_file, PathBuf::from("weightloss.log"));
        assert!(cli.config.is_none());
    }

    #[test]
    fn test_embedded_config_builds_a_controller() {
        let controller = testing::controller_from(EMBEDDED_CONFIG);
        assert_eq!(controller.screens().len(), 5);
        assert_eq!(controller.current_index(), 0);
    }
}
