//! Load configurations

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use crate::config::Config;
use crate::errors::ConfigLoadError;

fn try_load(path: &Path) -> Result<Option<Config>, ConfigLoadError> {
    let file = match fs::File::open(path) {
        Ok(f) => f,
        Err(err) => {
            if err.kind() == ErrorKind::NotFound {
                return Ok(None);
            }
            return Err(ConfigLoadError::Read(err));
        }
    };

    match serde_json::from_reader(file) {
        Ok(c) => Ok(Some(c)),
        Err(err) => Err(ConfigLoadError::Deserialize(err)),
    }
}

/// Load the config at `path`, or the defaults if there is no path or no file.
///
/// An unreadable or malformed file is an error.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigLoadError> {
    let Some(path) = path else {
        return Ok(Config::default());
    };

    let config = match try_load(path) {
        Ok(Some(config)) => config,
        Ok(None) => {
            tracing::warn!(config.path =? path, message_id = "Ue3vPq8a", "config file not found, using defaults");
            Config::default()
        }
        Err(error) => {
            tracing::error!(?error, config.path =? path, message_id = "Kx2rTe9w", "Failed to load config.");
            return Err(error);
        }
    };

    config.validate()?;
    Ok(config)
}
