use crate::error::{HbnbError, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_FILE_PATH: &str = "file.json";
const DEFAULT_PROMPT: &str = "(hbnb) ";

/// Shell configuration, stored as `config.json` in the config directory.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct HbnbConfig {
    /// Backing file for the object store, relative to the working directory
    #[serde(default = "default_file_path")]
    pub file_path: PathBuf,

    /// Prompt shown when the shell is attended
    #[serde(default = "default_prompt")]
    pub prompt: String,
}

fn default_file_path() -> PathBuf {
    PathBuf::from(DEFAULT_FILE_PATH)
}

fn default_prompt() -> String {
    DEFAULT_PROMPT.to_string()
}

impl Default for HbnbConfig {
    fn default() -> Self {
        Self {
            file_path: default_file_path(),
            prompt: default_prompt(),
        }
    }
}

impl HbnbConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(HbnbError::Io)?;
        serde_json::from_str(&content)
            .map_err(|e| HbnbError::Config(format!("{}: {}", config_path.display(), e)))
    }

    /// The backing file, with a command-line override taking precedence.
    pub fn resolve_file_path(&self, cli_override: Option<&Path>) -> PathBuf {
        cli_override
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.file_path.clone())
    }
}
