use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::Deserialize;

use crate::error::Result;
use crate::flipflop::FlipFlopKind;

/// Default location of the optional configuration file.
pub const SETTINGS_FILE: &str = "digilogic.json";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub listen_address: String,
    /// `tracing_subscriber::EnvFilter` directive, `RUST_LOG` wins when set.
    pub log_filter: String,
    /// Render BCD and Excess-3 results as space separated 4-bit groups.
    pub group_nibbles: bool,
    pub max_input_length: usize,
    pub startup_script: Option<PathBuf>,
    pub initial_flip_flop: FlipFlopKind,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            listen_address: "127.0.0.1:8080".to_string(),
            log_filter: "info".to_string(),
            group_nibbles: false,
            max_input_length: 4096,
            startup_script: None,
            initial_flip_flop: FlipFlopKind::Jk,
        }
    }
}

impl Settings {
    /// Reads `path` if it exists, then `DIGILOGIC_*` environment variables on top.
    pub fn load(path: impl AsRef<Path>) -> Result<Settings> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()).required(false))
            .add_source(Environment::with_prefix("DIGILOGIC").try_parsing(true))
            .build()?
            .try_deserialize()?;
        Ok(settings)
    }
}
