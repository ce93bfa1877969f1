use clap::{ArgAction, Parser};
use nextup_config::PathManager;

mod daemon;
mod logging;

#[derive(Parser)]
#[command(name = "nextup")]
#[command(about = "nextup - keeps your TV watchlist ordered by what airs next")]
#[command(version)]
struct Cli {
    /// Enable verbose output (use multiple times for more verbosity: -v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long)]
    quiet: bool,

    /// Cron schedule override, seconds first (e.g. '0 0 */6 * * *' for every 6 hours)
    #[arg(long, value_name = "SCHEDULE")]
    schedule: Option<String>,

    /// Skip the refresh normally run at startup
    #[arg(long, action = ArgAction::SetTrue)]
    no_startup_refresh: bool,

    /// Write logs to the rotating daemon log file instead of stderr
    #[arg(long, action = ArgAction::SetTrue)]
    log_to_file: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let paths = PathManager::default();
    let log_file = cli.log_to_file.then(|| paths.daemon_log_file());
    logging::init_logging(cli.verbose, cli.quiet, log_file)?;

    daemon::run(paths, cli.schedule, cli.no_startup_refresh).await
}
