//! Processing coordinator
//!
//! Runs the two expensive engine stages on background worker threads. The
//! caller submits a [`Request`] and later polls for the matching [`Response`];
//! submitting never blocks.
//!
//! Every request carries a sequence number. A response is handed back only
//! when its number is still the latest one issued for its [`OperationKind`].
//! Anything older is dropped, so a slow response cannot overwrite the result
//! of a newer request even when several workers finish out of order.

mod error;
mod messages;
mod sequence;
mod worker;

#[cfg(test)]
mod tests;

pub use error::CoordinatorError;
pub use messages::{OperationKind, Request, RequestBody, Response, ResponseBody};
pub use sequence::SequenceTracker;

use crate::conf::EngineConfig;
use crate::engine::FilterSortQuery;
use crate::record::Record;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// How often a blocking [`Coordinator::recv`] wakes to check worker liveness.
const LIVENESS_TICK: Duration = Duration::from_millis(100);

pub struct Coordinator {
    requests: Option<mpsc::Sender<Request>>,
    responses: mpsc::Receiver<Response>,
    tracker: SequenceTracker,
    workers: Vec<JoinHandle<()>>,
}

impl Coordinator {
    /// Start `cfg.workers` background threads.
    pub fn spawn(cfg: EngineConfig) -> Result<Self, CoordinatorError> {
        let (request_tx, request_rx) = mpsc::channel::<Request>();
        let (response_tx, response_rx) = mpsc::channel::<Response>();

        let queue = Arc::new(Mutex::new(request_rx));
        let cfg = Arc::new(cfg);
        let count = cfg.workers.max(1);

        let mut workers = Vec::with_capacity(count);
        for id in 0..count {
            let handle = worker::spawn_worker(
                id,
                Arc::clone(&queue),
                response_tx.clone(),
                Arc::clone(&cfg),
            )
            .map_err(CoordinatorError::Spawn)?;
            workers.push(handle);
        }

        debug!(workers = count, "coordinator started");

        Ok(Self {
            requests: Some(request_tx),
            responses: response_rx,
            tracker: SequenceTracker::default(),
            workers,
        })
    }

    /// Enrich `records` with the given extra header names and rebuild the
    /// path catalog. Returns the request's sequence number.
    pub fn process_logs(
        &mut self,
        records: Vec<Record>,
        header_names: Vec<String>,
    ) -> Result<u64, CoordinatorError> {
        self.submit(
            OperationKind::ProcessLogs,
            RequestBody::ProcessLogs {
                records,
                header_names,
            },
        )
    }

    /// Filter, window and sort `records`. Returns the request's sequence number.
    pub fn filter_and_sort(
        &mut self,
        records: Vec<Record>,
        query: FilterSortQuery,
    ) -> Result<u64, CoordinatorError> {
        self.submit(
            OperationKind::FilterAndSort,
            RequestBody::FilterAndSort { records, query },
        )
    }

    fn submit(&mut self, kind: OperationKind, body: RequestBody) -> Result<u64, CoordinatorError> {
        let sender = self.requests.as_ref().ok_or(CoordinatorError::Disconnected)?;

        let seq = self.tracker.issue(kind);
        sender
            .send(Request { seq, body })
            .map_err(|_| CoordinatorError::Disconnected)?;

        debug!(seq, kind = %kind, "request submitted");
        Ok(seq)
    }

    /// True while the latest request of some kind has not been answered.
    pub fn has_pending(&self) -> bool {
        self.tracker.has_pending()
    }

    /// Next current response, without waiting.
    pub fn try_recv(&mut self) -> Result<Option<Response>, CoordinatorError> {
        loop {
            match self.responses.try_recv() {
                Ok(response) => {
                    if let Some(response) = self.accept(response) {
                        return Ok(Some(response));
                    }
                }
                Err(mpsc::TryRecvError::Empty) => {
                    self.check_workers()?;
                    return Ok(None);
                }
                Err(mpsc::TryRecvError::Disconnected) => return Err(CoordinatorError::Disconnected),
            }
        }
    }

    /// Next current response, waiting at most `timeout`.
    pub fn recv_timeout(&mut self, timeout: Duration) -> Result<Option<Response>, CoordinatorError> {
        let deadline = Instant::now() + timeout;
        loop {
            let remaining = deadline.saturating_duration_since(Instant::now());
            match self.responses.recv_timeout(remaining) {
                Ok(response) => {
                    if let Some(response) = self.accept(response) {
                        return Ok(Some(response));
                    }
                }
                Err(mpsc::RecvTimeoutError::Timeout) => {
                    self.check_workers()?;
                    return Ok(None);
                }
                Err(mpsc::RecvTimeoutError::Disconnected) => {
                    return Err(CoordinatorError::Disconnected);
                }
            }
        }
    }

    /// Block until the next current response arrives.
    ///
    /// Fails with [`CoordinatorError::Idle`] when nothing is pending, and with
    /// [`CoordinatorError::WorkerExited`] when a worker died, since its
    /// request will never be answered.
    pub fn recv(&mut self) -> Result<Response, CoordinatorError> {
        loop {
            if !self.tracker.has_pending() {
                return Err(CoordinatorError::Idle);
            }
            match self.responses.recv_timeout(LIVENESS_TICK) {
                Ok(response) => {
                    if let Some(response) = self.accept(response) {
                        return Ok(response);
                    }
                }
                Err(mpsc::RecvTimeoutError::Timeout) => self.check_workers()?,
                Err(mpsc::RecvTimeoutError::Disconnected) => {
                    return Err(CoordinatorError::Disconnected);
                }
            }
        }
    }

    /// Workers only leave their loop once the request channel closes, so a
    /// finished worker while the coordinator is alive has panicked.
    fn check_workers(&self) -> Result<(), CoordinatorError> {
        match self.workers.iter().position(JoinHandle::is_finished) {
            Some(worker) => {
                warn!(worker, "worker exited unexpectedly");
                Err(CoordinatorError::WorkerExited { worker })
            }
            None => Ok(()),
        }
    }

    fn accept(&mut self, response: Response) -> Option<Response> {
        let kind = response.kind();
        if self.tracker.complete(kind, response.seq) {
            Some(response)
        } else {
            debug!(
                seq = response.seq,
                kind = %kind,
                latest = self.tracker.latest(kind),
                "dropping stale response"
            );
            None
        }
    }
}

impl Drop for Coordinator {
    fn drop(&mut self) {
        // Closing the request channel lets every worker leave its loop.
        self.requests.take();
        for handle in self.workers.drain(..) {
            let _ = handle.join();
        }
    }
}
