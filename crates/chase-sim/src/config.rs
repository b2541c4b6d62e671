use chase_core::board::{AdjacencyBoard, LocationId};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const RUN_ID_ALLOWED: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._-";

/// Root scenario configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ScenarioConfig {
    pub run_id: String,
    pub board: BoardConfig,
    pub hunt: HuntConfig,
    #[serde(default)]
    pub seekers: SeekerConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl ScenarioConfig {
    /// Load a scenario from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let cfg: ScenarioConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the scenario without performing I/O.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_run_id(&self.run_id)?;
        self.board.validate()?;
        self.hunt.validate(&self.board)?;
        self.seekers.validate()?;
        self.logging.validate()?;
        Ok(())
    }
}

/// Board block: undirected links between location labels.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct BoardConfig {
    pub links: Vec<(String, String)>,
}

impl BoardConfig {
    pub fn build(&self) -> AdjacencyBoard {
        AdjacencyBoard::with_links(self.links.iter().map(|(a, b)| (a.as_str(), b.as_str())))
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.links.is_empty() {
            return Err(ValidationError::InvalidField {
                field: "board.links".to_string(),
                message: "the board needs at least one link".to_string(),
            });
        }
        for (a, b) in &self.links {
            if a.is_empty() || b.is_empty() {
                return Err(ValidationError::InvalidField {
                    field: "board.links".to_string(),
                    message: "location labels must not be empty".to_string(),
                });
            }
            if a == b {
                return Err(ValidationError::InvalidField {
                    field: "board.links".to_string(),
                    message: format!("{a} is linked to itself"),
                });
            }
        }
        Ok(())
    }

    fn contains(&self, label: &str) -> bool {
        self.links
            .iter()
            .any(|(a, b)| a == label || b == label)
    }
}

/// Hunt block: where the hider starts and how long the chase runs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct HuntConfig {
    pub start: String,
    pub turns: usize,
    pub seed: Option<u64>,
}

impl HuntConfig {
    pub fn start_location(&self) -> LocationId {
        LocationId::from(self.start.as_str())
    }

    fn validate(&self, board: &BoardConfig) -> Result<(), ValidationError> {
        if self.turns == 0 {
            return Err(ValidationError::InvalidField {
                field: "hunt.turns".to_string(),
                message: "the hunt must last at least one turn".to_string(),
            });
        }
        if !board.contains(&self.start) {
            return Err(ValidationError::InvalidField {
                field: "hunt.start".to_string(),
                message: format!("start location {} is not on the board", self.start),
            });
        }
        Ok(())
    }
}

/// Seeker block: how many posts are manned and how many clue searches
/// resolve per turn.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct SeekerConfig {
    pub count: usize,
    pub searches_per_turn: usize,
}

impl Default for SeekerConfig {
    fn default() -> Self {
        Self {
            count: 3,
            searches_per_turn: 3,
        }
    }
}

impl SeekerConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.searches_per_turn == 0 {
            return Err(ValidationError::InvalidField {
                field: "seekers.searches_per_turn".to_string(),
                message: "seekers must resolve at least one search per turn".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl LoggingConfig {
    pub fn level(&self) -> Option<Level> {
        self.level.parse().ok()
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.level().is_none() {
            return Err(ValidationError::InvalidField {
                field: "logging.level".to_string(),
                message: format!("{} is not a log level", self.level),
            });
        }
        Ok(())
    }
}

fn validate_run_id(run_id: &str) -> Result<(), ValidationError> {
    if run_id.is_empty() {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id must not be empty".to_string(),
        });
    }
    if let Some(bad) = run_id.chars().find(|c| !RUN_ID_ALLOWED.contains(*c)) {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: format!("character {bad:?} is not allowed"),
        });
    }
    Ok(())
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read scenario at {path}: {source}")]
    Read {
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse scenario at {path}: {source}")]
    Parse {
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid scenario at {path}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}
