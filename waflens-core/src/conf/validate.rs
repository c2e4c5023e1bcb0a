use crate::conf::error::ConfigError;
use crate::conf::types::WaflensConfig;
use http::HeaderName;

impl WaflensConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let engine = &self.engine;

        if engine.sample_threshold == 0 {
            return Err(ConfigError::InvalidSampleThreshold);
        }
        if engine.workers == 0 {
            return Err(ConfigError::InvalidWorkers);
        }
        if engine.timestamp_field.as_str().is_empty() {
            return Err(ConfigError::EmptyPath {
                field: "timestamp_field",
            });
        }
        if engine.header_source.as_str().is_empty() {
            return Err(ConfigError::EmptyPath {
                field: "header_source",
            });
        }

        for name in engine.default_headers.iter().chain(&engine.extra_headers) {
            validate_header_name(name)?;
        }

        Ok(())
    }
}

pub fn validate_header_name(name: &str) -> Result<(), ConfigError> {
    HeaderName::from_bytes(name.trim().as_bytes())
        .map(|_| ())
        .map_err(|_| ConfigError::InvalidHeaderName {
            value: name.to_string(),
        })
}
