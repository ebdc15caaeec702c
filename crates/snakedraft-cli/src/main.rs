// Snake draft entry point.
//
// Startup sequence:
// 1. Parse command-line flags
// 2. Initialize tracing (log to file, not terminal)
// 3. Load config (copying defaults on first run)
// 4. Load the pool
// 5. Create the draft session (shuffling the order if asked)
// 6. Run the operator loop on stdin/stdout

use std::fs::OpenOptions;
use std::io::{self, Write};
use std::path::Path;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use snakedraft_cli::cli::Cli;
use snakedraft_cli::{render, repl};
use snakedraft_core::config;
use snakedraft_core::draft::session::DraftSession;
use snakedraft_core::pool::PoolIndex;

fn main() -> anyhow::Result<()> {
    // 1. Parse command-line flags
    let cli = Cli::parse();

    // 2. Initialize tracing (log to file, not terminal)
    init_tracing(&cli.base_dir)?;
    info!("snakedraft starting up in {}", cli.base_dir.display());

    // 3. Load config
    let config = config::load_config_with(&cli.base_dir, &cli.overrides())
        .context("failed to load configuration")?;
    info!(
        "Config loaded: league={}, {} coaches, budget {}, team size {}",
        config.league.name,
        config.league.coaches.len(),
        config.league.budget,
        config.league.team_size
    );

    // 4. Load the pool
    let pool_path = config.pool_path();
    let pool = PoolIndex::load(&pool_path)
        .with_context(|| format!("failed to load pool from {}", pool_path.display()))?;

    // 5. Create the draft session
    let mut session =
        DraftSession::from_config(&config, pool).context("failed to start draft session")?;
    if cli.shuffle {
        session.shuffle_order(&mut rand::thread_rng())?;
    }
    info!("Session started: {} turns", session.total_turns());

    // 6. Run the operator loop
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(
        out,
        "{}",
        render::banner(
            &config.league.name,
            session.coaches().len(),
            session.total_turns()
        )
    )?;
    let exit = repl::run(&mut session, stdin.lock(), &mut out)?;

    info!("snakedraft exiting ({:?})", exit);
    Ok(())
}

/// Append tracing output to `<base_dir>/logs/snakedraft.log`; the terminal
/// belongs to the operator.
fn init_tracing(base_dir: &Path) -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::EnvFilter;

    let log_dir = base_dir.join("logs");
    std::fs::create_dir_all(&log_dir)
        .with_context(|| format!("failed to create {}", log_dir.display()))?;

    let log_path = log_dir.join("snakedraft.log");
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("failed to open {}", log_path.display()))?;

    let subscriber = fmt::Subscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("snakedraft=info,warn")),
        )
        .with_writer(log_file)
        .with_ansi(false)
        .with_target(false)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")?;

    Ok(())
}
