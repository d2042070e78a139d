//! Configuration file discovery and loading.

use crate::config::schema::{Config, CONFIG_FILE_NAME};
use crate::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// A loaded configuration file with its precedence level.
///
/// Lower precedence values are overridden by higher ones.
#[derive(Debug, Clone)]
pub struct ConfigSource {
    /// Path to the configuration file.
    pub path: PathBuf,
    /// Precedence level (higher values take priority).
    pub precedence: u8,
    /// Parsed configuration.
    pub config: Config,
}

/// Loads configuration files.
///
/// # Examples
///
/// ```no_run
/// use seatbook::config::ConfigLoader;
/// use std::path::Path;
///
/// let sources = ConfigLoader::load_all(Some(Path::new("/tmp/seatbook"))).unwrap();
/// println!("found {} configuration file(s)", sources.len());
/// ```
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads every configuration file that applies, lowest precedence first.
    ///
    /// Currently that is `config.yaml` in the data directory, which is
    /// `data_dir` when given and the resolved default otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if a file exists but cannot be read or parsed, or if
    /// no data directory can be determined.
    pub fn load_all(data_dir: Option<&Path>) -> Result<Vec<ConfigSource>> {
        let dir = crate::database::resolve_data_dir(data_dir)?;
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            log::debug!("no configuration file at {}", path.display());
            return Ok(Vec::new());
        }

        let config = Self::load_file(&path)?;
        Ok(vec![ConfigSource {
            path,
            precedence: 1,
            config,
        }])
    }

    /// Loads and parses one YAML configuration file.
    ///
    /// A file holding only comments and blank lines yields the default
    /// configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or the YAML is invalid.
    pub fn load_file(path: &Path) -> Result<Config> {
        let contents = fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parses configuration YAML.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Configuration`] if the YAML is invalid or has
    /// unknown keys.
    pub fn parse(contents: &str) -> Result<Config> {
        let blank = contents.lines().all(|line| {
            let line = line.trim();
            line.is_empty() || line.starts_with('#')
        });
        if blank {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(contents)?)
    }
}
