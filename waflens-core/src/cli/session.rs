use crate::conf::{WaflensConfig, load_or_default, validate_header_name};
use crate::coordinator::{Coordinator, ResponseBody};
use crate::engine::ProcessedLogs;
use crate::enrichment::HeaderSet;
use crate::ingest::read_inputs;
use anyhow::{Result, bail};
use std::path::Path;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

const PROGRESS_TICK: Duration = Duration::from_millis(250);

/// Loaded config, a running coordinator and the processed records.
pub(crate) struct Session {
    pub cfg: WaflensConfig,
    pub coordinator: Coordinator,
    pub processed: ProcessedLogs,
    pub headers: HeaderSet,
    pub skipped: usize,
}

impl Session {
    pub fn open(inputs: &[String], headers: &[String], config: Option<&Path>) -> Result<Self> {
        let cfg = load_or_default(config)?;

        let headers: HeaderSet = headers.iter().collect();
        for name in headers.names() {
            validate_header_name(name)?;
        }

        let batch = read_inputs(inputs)?;
        info!(
            records = batch.records.len(),
            skipped = batch.skipped,
            "loaded logs"
        );

        let mut coordinator = Coordinator::spawn(cfg.engine.clone())?;
        let seq = coordinator.process_logs(batch.records, headers.names().to_vec())?;

        let processed = match wait_for(&mut coordinator, seq)? {
            ResponseBody::LogsProcessed(processed) => processed,
            _ => bail!("unexpected response to process_logs"),
        };

        if processed.catalog.is_sampled() {
            warn!(
                sample = cfg.engine.sample_threshold,
                "path catalog built from a sample, some paths may be missing"
            );
        }

        Ok(Self {
            cfg,
            coordinator,
            processed,
            headers,
            skipped: batch.skipped,
        })
    }
}

/// Poll the coordinator until the response for `seq` arrives.
pub(crate) fn wait_for(coordinator: &mut Coordinator, seq: u64) -> Result<ResponseBody> {
    let started = Instant::now();
    loop {
        match coordinator.recv_timeout(PROGRESS_TICK)? {
            Some(response) if response.seq == seq => return Ok(response.body),
            Some(response) => debug!(seq = response.seq, "ignoring unrelated response"),
            None => debug!(
                seq,
                waited_ms = started.elapsed().as_millis() as u64,
                "still processing"
            ),
        }
    }
}
