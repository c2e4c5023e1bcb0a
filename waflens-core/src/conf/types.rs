use crate::catalog::DEFAULT_SAMPLE_THRESHOLD;
use crate::enrichment::{DEFAULT_HEADER_NAMES, DEFAULT_HEADER_SOURCE};
use crate::filter::DEFAULT_TIMESTAMP_FIELD;
use crate::record::Path;
use crate::sort::SortSpec;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct WaflensConfig {
    pub engine: EngineConfig,
    pub view: ViewConfig,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Collections larger than this are cataloged from a random sample.
    pub sample_threshold: usize,
    pub timestamp_field: Path,
    /// Location of the raw `{name, value}` header list.
    pub header_source: Path,
    pub default_headers: Vec<String>,
    pub extra_headers: Vec<String>,
    /// Background worker threads. Responses from more than one worker may
    /// arrive out of order.
    pub workers: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            sample_threshold: DEFAULT_SAMPLE_THRESHOLD,
            timestamp_field: Path::parse(DEFAULT_TIMESTAMP_FIELD),
            header_source: Path::parse(DEFAULT_HEADER_SOURCE),
            default_headers: DEFAULT_HEADER_NAMES.iter().map(|s| s.to_string()).collect(),
            extra_headers: Vec::new(),
            workers: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewConfig {
    pub default_columns: Vec<String>,
    pub excluded_columns: Vec<String>,
    pub human_time: bool,
    pub default_sort: SortSpec,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self {
            default_columns: [
                "timestamp",
                "action",
                "httpRequest.clientIp",
                "httpRequest.country",
                "httpRequest.uri",
                "header.Host",
                "header.User-Agent",
            ]
            .map(String::from)
            .to_vec(),
            excluded_columns: ["formatVersion", "httpSourceId", "httpSourceName", "webaclId"]
                .map(String::from)
                .to_vec(),
            human_time: false,
            default_sort: SortSpec::default(),
        }
    }
}
