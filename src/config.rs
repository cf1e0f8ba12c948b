// config.rs

use color_eyre::eyre::{Result, WrapErr};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

/// Represents the full configuration of the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// The Ollama model to use. Falls back to `llama3.2:latest`.
    pub ollama_model: Option<String>,

    /// Directory where finished articles are written.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Path of the exported message log.
    #[serde(default = "default_log_path")]
    pub log_path: PathBuf,

    /// Debug mode flag (enables additional logging).
    #[serde(default)]
    pub debug: bool,

    /// Per-role generation parameters.
    #[serde(default)]
    pub agents: AgentsConfig,
}

/// Generation parameters for the three pipeline roles.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentsConfig {
    pub researcher: AgentProfile,
    pub writer: AgentProfile,
    pub editor: AgentProfile,
}

/// Defines the configuration of an individual agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentProfile {
    /// Sampling temperature (0.0 = deterministic, 1.0 = creative).
    pub temperature: f32,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("articles")
}

fn default_log_path() -> PathBuf {
    PathBuf::from("message_log.json")
}

impl Default for AgentsConfig {
    fn default() -> Self {
        // The researcher and editor stay close to the facts; the writer gets
        // a little more freedom.
        Self {
            researcher: AgentProfile { temperature: 0.3 },
            writer: AgentProfile { temperature: 0.4 },
            editor: AgentProfile { temperature: 0.2 },
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ollama_model: None,
            output_dir: default_output_dir(),
            log_path: default_log_path(),
            debug: false,
            agents: AgentsConfig::default(),
        }
    }
}

impl Config {
    /// Loads a configuration from a JSON file.
    ///
    /// # Arguments
    /// * `path` - The file path to load the configuration from.
    ///
    /// # Returns
    /// * `Ok(Config)` if the file is successfully read and parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let mut file =
            File::open(path).wrap_err_with(|| format!("cannot open {}", path.display()))?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;
        let config: Config = serde_json::from_str(&contents)
            .wrap_err_with(|| format!("invalid configuration in {}", path.display()))?;
        Ok(config)
    }

    /// Loads the configuration from `path`, or returns defaults when the
    /// file does not exist. A present-but-broken file is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Saves the current configuration to a JSON file.
    ///
    /// # Arguments
    /// * `path` - The file path to save the configuration to.
    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }
}
