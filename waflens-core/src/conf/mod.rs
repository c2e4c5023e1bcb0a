mod error;
mod loader;
pub mod types;
mod validate;


pub use error::ConfigError;
pub use loader::{DEFAULT_CONFIG_FILE, load_config, load_or_default, parse_config};
pub use types::{EngineConfig, ViewConfig, WaflensConfig};
pub use validate::validate_header_name;
