//! Engine configuration loading from YAML files.

use std::fs;
use std::path::Path;

use super::schema::EngineConfig;
use super::validate::validate_config;
use crate::error::Error;

/// Load, parse and validate an engine configuration file.
pub fn load_config<P: AsRef<Path>>(config_path: P) -> Result<EngineConfig, Error> {
    let path = config_path.as_ref();
    if !path.exists() {
        return Err(Error::ConfigNotFound { path: path.to_path_buf() });
    }

    let yaml_content = fs::read_to_string(path)
        .map_err(|e| Error::io(format!("reading config file {}", path.display()), e))?;

    let config: EngineConfig = serde_yaml::from_str(&yaml_content)
        .map_err(|e| Error::Config(format!("Failed to parse YAML config: {e}")))?;

    validate_config(&config).map_err(|e| Error::Config(format!("Invalid config: {e}")))?;

    Ok(config)
}

/// Load the configuration at `path`, or the defaults when no path is given.
pub fn load_or_default(path: Option<&Path>) -> Result<EngineConfig, Error> {
    match path {
        Some(path) => load_config(path),
        None => Ok(EngineConfig::default()),
    }
}
