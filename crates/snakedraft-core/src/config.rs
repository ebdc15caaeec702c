// Configuration loading and parsing (league.toml plus command-line overrides).

use serde::Deserialize;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file not found: {path}")]
    FileNotFound { path: PathBuf },

    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("validation error for field `{field}`: {message}")]
    ValidationError { field: String, message: String },

    #[error("failed to initialize config from defaults: {message}")]
    DefaultsCopyError { message: String },
}

// ---------------------------------------------------------------------------
// Top-level assembled Config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Config {
    pub league: LeagueConfig,
    pub data_paths: DataPaths,
    /// Directory that relative data paths are resolved against.
    pub base_dir: PathBuf,
}

impl Config {
    /// Absolute (or base-relative) location of the pool CSV.
    pub fn pool_path(&self) -> PathBuf {
        let pool = Path::new(&self.data_paths.pool);
        if pool.is_absolute() {
            pool.to_path_buf()
        } else {
            self.base_dir.join(pool)
        }
    }

    /// Total number of turns in the draft (`coaches x team_size`).
    pub fn total_turns(&self) -> usize {
        self.league.coaches.len() * self.league.team_size
    }
}

// ---------------------------------------------------------------------------
// league.toml structs
// ---------------------------------------------------------------------------

/// Raw deserialization target for the entire league.toml file.
#[derive(Debug, Clone, Deserialize)]
struct LeagueFile {
    league: LeagueConfig,
    data_paths: DataPaths,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LeagueConfig {
    #[serde(default)]
    pub name: String,
    /// Coaches in registration order. Round 1 of the snake follows this order.
    pub coaches: Vec<String>,
    /// Starting budget shared by every coach.
    pub budget: u32,
    /// Picks per coach, which is also the number of snake rounds.
    pub team_size: usize,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataPaths {
    pub pool: String,
}

/// Values supplied on the command line that take precedence over league.toml.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub coaches: Option<Vec<String>>,
    pub budget: Option<u32>,
    pub team_size: Option<usize>,
    pub pool: Option<String>,
}

impl ConfigOverrides {
    fn apply(&self, config: &mut Config) {
        if let Some(coaches) = &self.coaches {
            config.league.coaches = coaches.clone();
        }
        if let Some(budget) = self.budget {
            config.league.budget = budget;
        }
        if let Some(team_size) = self.team_size {
            config.league.team_size = team_size;
        }
        if let Some(pool) = &self.pool {
            config.data_paths.pool = pool.clone();
        }
    }
}

// ---------------------------------------------------------------------------
// Loading logic
// ---------------------------------------------------------------------------

/// Load and validate configuration from `config/league.toml` relative to
/// `base_dir`.
///
/// This is the lower-level loading primitive that does not auto-copy defaults
/// and applies no overrides. Prefer `load_config_with()`.
pub fn load_config_from(base_dir: &Path) -> Result<Config, ConfigError> {
    let config = read_config(base_dir)?;
    finish(config)
}

/// Copy any missing defaults into `config/`, load `league.toml`, apply the
/// command-line overrides on top and validate the result.
pub fn load_config_with(
    base_dir: &Path,
    overrides: &ConfigOverrides,
) -> Result<Config, ConfigError> {
    if let Some(path) = ensure_league_file(base_dir)? {
        info!("Initialized {} from defaults", path.display());
    }

    let mut config = read_config(base_dir)?;
    overrides.apply(&mut config);
    finish(config)
}

fn read_config(base_dir: &Path) -> Result<Config, ConfigError> {
    let league_path = league_path(base_dir);
    let league_text = read_file(&league_path)?;
    let league_file: LeagueFile =
        toml::from_str(&league_text).map_err(|e| ConfigError::ParseError {
            path: league_path.clone(),
            source: e,
        })?;

    Ok(Config {
        league: league_file.league,
        data_paths: league_file.data_paths,
        base_dir: base_dir.to_path_buf(),
    })
}

fn finish(mut config: Config) -> Result<Config, ConfigError> {
    config.league.coaches = normalize_coaches(&config.league.coaches);
    validate(&config)?;
    Ok(config)
}

/// Make sure `config/league.toml` exists, seeding it from
/// `defaults/league.toml` on first run. An existing file is never touched.
///
/// Returns the path written, or `None` when the league file was already there.
pub fn ensure_league_file(base_dir: &Path) -> Result<Option<PathBuf>, ConfigError> {
    let target = league_path(base_dir);
    if target.exists() {
        return Ok(None);
    }

    let source = base_dir.join("defaults").join(LEAGUE_FILE);
    if !source.is_file() {
        return Err(ConfigError::DefaultsCopyError {
            message: format!(
                "no config/{LEAGUE_FILE} or defaults/{LEAGUE_FILE} in {}; \
                 run from the project root or pass --base-dir",
                base_dir.display()
            ),
        });
    }

    if let Some(dir) = target.parent() {
        std::fs::create_dir_all(dir).map_err(|e| ConfigError::DefaultsCopyError {
            message: format!("failed to create {}: {e}", dir.display()),
        })?;
    }
    std::fs::copy(&source, &target).map_err(|e| ConfigError::DefaultsCopyError {
        message: format!("failed to copy {} to {}: {e}", source.display(), target.display()),
    })?;

    Ok(Some(target))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

const LEAGUE_FILE: &str = "league.toml";

fn league_path(base_dir: &Path) -> PathBuf {
    base_dir.join("config").join(LEAGUE_FILE)
}

fn read_file(path: &Path) -> Result<String, ConfigError> {
    std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
        path: path.to_path_buf(),
    })
}

/// Trim coach names and drop blank entries, preserving order.
pub fn normalize_coaches(coaches: &[String]) -> Vec<String> {
    coaches
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty())
        .map(str::to_string)
        .collect()
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// A snake draft needs at least two coaches whose names differ ignoring case.
pub fn validate_coaches(coaches: &[String]) -> Result<(), ConfigError> {
    if coaches.len() < 2 {
        return Err(ConfigError::ValidationError {
            field: "league.coaches".into(),
            message: format!("need at least 2 coaches, got {}", coaches.len()),
        });
    }

    // Case-folded, so `team <coach>` lookups can never be ambiguous.
    let mut seen = HashSet::new();
    for coach in coaches {
        if !seen.insert(coach.to_lowercase()) {
            return Err(ConfigError::ValidationError {
                field: "league.coaches".into(),
                message: format!("duplicate coach name '{coach}'"),
            });
        }
    }

    Ok(())
}

fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_coaches(&config.league.coaches)?;

    if config.league.budget == 0 {
        return Err(ConfigError::ValidationError {
            field: "league.budget".into(),
            message: "must be greater than 0".into(),
        });
    }

    if config.data_paths.pool.trim().is_empty() {
        return Err(ConfigError::ValidationError {
            field: "data_paths.pool".into(),
            message: "must not be empty".into(),
        });
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
