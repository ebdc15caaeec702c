// Command-line arguments for the `snakedraft` binary.

use std::path::PathBuf;

use clap::Parser;
use snakedraft_core::config::ConfigOverrides;

/// Run a snake-order auction draft from the terminal.
#[derive(Debug, Parser)]
#[command(name = "snakedraft", version, about, long_about = None)]
pub struct Cli {
    /// Project directory holding defaults/, config/, data/ and logs/.
    #[arg(long, default_value = ".")]
    pub base_dir: PathBuf,

    /// Pool CSV to draft from (overrides data_paths.pool).
    #[arg(long)]
    pub pool: Option<String>,

    /// Comma-separated coach names in draft order (overrides league.coaches).
    #[arg(long, value_delimiter = ',')]
    pub coaches: Option<Vec<String>>,

    /// Starting budget per coach (overrides league.budget).
    #[arg(long)]
    pub budget: Option<u32>,

    /// Picks per coach (overrides league.team_size).
    #[arg(long)]
    pub team_size: Option<usize>,

    /// Randomize the draft order before the first pick.
    #[arg(long)]
    pub shuffle: bool,
}

impl Cli {
    /// Flags that take precedence over `config/league.toml`.
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            coaches: self.coaches.clone(),
            budget: self.budget,
            team_size: self.team_size,
            pool: self.pool.clone(),
        }
    }
}
