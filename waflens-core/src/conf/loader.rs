use crate::conf::error::ConfigError;
use crate::conf::types::WaflensConfig;
use std::fs;
use std::path::Path;

pub const DEFAULT_CONFIG_FILE: &str = "waflens.hcl";

pub fn load_config(path: &Path) -> Result<WaflensConfig, ConfigError> {
    let s = fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
    parse_config(&s, path)
}

/// Parse and validate; `origin` is only used in error messages.
pub fn parse_config(s: &str, origin: &Path) -> Result<WaflensConfig, ConfigError> {
    let cfg: WaflensConfig = hcl::from_str(s).map_err(|e| ConfigError::parse(origin, e))?;
    cfg.validate()?;
    Ok(cfg)
}

/// An explicit path must exist. Without one, `waflens.hcl` in the working
/// directory is used when present and built-in defaults otherwise.
pub fn load_or_default(path: Option<&Path>) -> Result<WaflensConfig, ConfigError> {
    match path {
        Some(path) => load_config(path),
        None => {
            let default_path = Path::new(DEFAULT_CONFIG_FILE);
            if default_path.is_file() {
                load_config(default_path)
            } else {
                tracing::debug!("no {DEFAULT_CONFIG_FILE} found, using defaults");
                Ok(WaflensConfig::default())
            }
        }
    }
}
