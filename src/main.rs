mod commands;
mod control;
mod notifier;
mod state;

use crate::commands::Cli;
use crate::control::CONTROL_HELP;
use crate::notifier::NotifierWorker;
use crate::state::app_settings::AppSettings;
use crate::state::messages::MonitorAction;
use crate::state::monitor::LiveMonitor;
use crate::state::scheduler::{MonitorScheduler, SchedulerHandle};
use log::{info, warn};
use lolesports_api::client::LolEsportsApi;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let Some(cli) = handle_cli_args() else {
        return Ok(());
    };

    better_panic::install();
    dotenv::dotenv().ok();
    init_logging();

    let settings = AppSettings::load()?;
    let api = LolEsportsApi::new(settings.api.clone());

    match cli {
        Cli::Query(query) => {
            let result = commands::run_query(&api, &settings, &query).await;
            println!("{}", commands::outcome_text(result));
        }
        Cli::Watch => watch(api, settings).await,
        Cli::Help | Cli::Version => {}
    }
    Ok(())
}

/// `None` when the arguments were fully handled here (help, version).
fn handle_cli_args() -> Option<Cli> {
    match commands::parse_args(std::env::args().skip(1)) {
        Ok(Cli::Help) => {
            println!("{}", usage_text());
            None
        }
        Ok(Cli::Version) => {
            println!("lolbot {}", env!("CARGO_PKG_VERSION"));
            None
        }
        Ok(cli) => Some(cli),
        Err(message) => {
            eprintln!("{message}\n\n{}", usage_text());
            std::process::exit(2);
        }
    }
}

fn usage_text() -> &'static str {
    "lolbot - LoL Esports live monitor and standings lookups

Usage:
  lolbot [watch]
  lolbot leagues [all|major|popular|primary]
  lolbot standings <REGION|major> <timeframe>
  lolbot team <code> <REGION> <timeframe>
  lolbot upnext [REGION]
  lolbot upnext <team> <REGION> <timeframe>
  lolbot schedule <REGION>
  lolbot --help
  lolbot --version

Environment:
  LOLBOT_API_BASE            Gateway base URL (required)
  LOLBOT_API_KEY             Gateway API key (required)
  LOLBOT_LOCALE              Response locale (default en-US)
  LOLBOT_POLL_SECS           Live poll interval in seconds (default 120)
  LOLBOT_REANNOUNCE          match | once (default match)
  LOLBOT_SEMI_LEAGUES        Comma-separated semi league names (default PCS,VCS)
  LOLBOT_MINOR_EXCLUSIONS    Comma-separated league names kept out of the minor tier
  LOLBOT_INTERNATIONAL_SLUG  Slug of the international league (default worlds)
  LOLBOT_UPNEXT_LEAGUES      Comma-separated league ids for upnext (default Worlds,MSI)
  RUST_LOG                   Log filter (default info)"
}

fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

async fn watch(api: LolEsportsApi, settings: AppSettings) {
    let (action_tx, action_rx) = mpsc::channel::<MonitorAction>(100);

    // Notifier thread
    let notifier_task = tokio::spawn(NotifierWorker::new(action_rx).run());

    // Monitor thread
    let monitor = LiveMonitor::new(api, settings.monitor.clone());
    let (scheduler, handle) = MonitorScheduler::new(monitor, settings.poll_interval, action_tx);
    let scheduler_task = tokio::spawn(scheduler.run());

    if handle.start().await.is_none() {
        warn!("monitor task exited before it started");
    }
    info!("watching for live events; {CONTROL_HELP}");

    control_loop(&handle).await;

    scheduler_task.abort();
    notifier_task.abort();
}

async fn control_loop(handle: &SchedulerHandle) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => {
                // stdin closed; keep watching until interrupted.
                let _ = tokio::signal::ctrl_c().await;
                return;
            }
            Err(e) => {
                warn!("failed to read control input: {e}");
                return;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let control = match control::parse_control(&line) {
            Ok(control) => control,
            Err(message) => {
                println!("{message}");
                continue;
            }
        };
        match control::execute(control, handle).await {
            Some(text) => println!("{text}"),
            None => return,
        }
    }
}
