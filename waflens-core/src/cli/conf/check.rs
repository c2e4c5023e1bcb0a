use crate::conf::{ConfigError, WaflensConfig, load_config};
use std::path::PathBuf;

pub fn check(path: PathBuf) -> anyhow::Result<()> {
    match load_config(&path) {
        Ok(cfg) => {
            print!("{}", summary(&cfg));
            Ok(())
        }
        Err(err) => {
            if let Some(hint) = config_error_hint(&err) {
                eprintln!("{hint}");
                eprintln!();
            }
            Err(err.into())
        }
    }
}

pub fn summary(cfg: &WaflensConfig) -> String {
    let engine = &cfg.engine;
    let view = &cfg.view;

    let mut out = String::new();
    out.push_str("✔ Config loaded successfully\n");
    out.push_str(&format!("✔ sample threshold: {}\n", engine.sample_threshold));
    out.push_str(&format!("✔ timestamp field: {}\n", engine.timestamp_field));
    out.push_str(&format!(
        "✔ {} header names extracted from {}\n",
        engine.default_headers.len() + engine.extra_headers.len(),
        engine.header_source
    ));
    out.push_str(&format!("✔ {} worker(s)\n", engine.workers));
    out.push_str(&format!(
        "✔ {} default columns, {} excluded\n",
        view.default_columns.len(),
        view.excluded_columns.len()
    ));
    out.push_str(&format!(
        "✔ default sort: {} {}\n",
        view.default_sort.field, view.default_sort.direction
    ));
    out
}

pub fn config_error_hint(err: &ConfigError) -> Option<&'static str> {
    match err {
        ConfigError::Parse { .. } => Some(
            "Settings live in two blocks, `engine` and `view`.\n\
             \n\
             Example:\n\
             \n\
             engine {\n\
             \x20 sample_threshold = 5000\n\
             }",
        ),

        ConfigError::InvalidSampleThreshold => Some(
            "The sample threshold is the number of records scanned when building the\n\
             path catalog for large inputs. It must be at least 1.",
        ),

        ConfigError::InvalidWorkers => Some("At least one worker thread is required."),

        ConfigError::InvalidHeaderName { .. } => Some(
            "Header names may only contain visible ASCII characters without spaces\n\
             or separators, e.g. \"user-agent\" or \"x-forwarded-for\".",
        ),

        _ => None,
    }
}
