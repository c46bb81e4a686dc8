use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const CONFIG_DIR: &str = "d86";
const CONFIG_FILE: &str = "config.toml";

const LEVELS: [Level; 5] = [
    Level::ERROR,
    Level::WARN,
    Level::INFO,
    Level::DEBUG,
    Level::TRACE,
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Could not read config file {} ({})", .0.display(), .1)]
    Read(PathBuf, #[source] std::io::Error),

    #[error("Could not parse config file {} ({})", .0.display(), .1)]
    Parse(PathBuf, #[source] toml::de::Error),

    #[error("Invalid log level \"{0}\"")]
    LogLevel(String),
}

#[derive(Debug, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Appended to the input file name to name the listing.
    pub output_suffix: String,
    pub log_level: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_suffix: String::from("_dec.asm"),
            log_level: String::from("info"),
        }
    }
}

impl Config {
    /// Loads the config from `path`, or from the default location if it exists. Without either
    /// the defaults are used.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let path = match path {
            Some(path) => path.to_path_buf(),
            None => match default_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };

        let text =
            std::fs::read_to_string(&path).map_err(|err| ConfigError::Read(path.clone(), err))?;

        Self::parse(&text).map_err(|err| ConfigError::Parse(path, err))
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// The configured log level, raised one step for every `verbosity`.
    pub fn log_level(&self, verbosity: u8) -> Result<Level, ConfigError> {
        let level: Level = self
            .log_level
            .parse()
            .map_err(|_| ConfigError::LogLevel(self.log_level.clone()))?;

        let index = LEVELS.iter().position(|l| *l == level).unwrap_or(2);

        Ok(LEVELS[(index + verbosity as usize).min(LEVELS.len() - 1)])
    }
}

pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
}
