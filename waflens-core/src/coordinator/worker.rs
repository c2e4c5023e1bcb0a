use crate::conf::EngineConfig;
use crate::coordinator::messages::{Request, RequestBody, Response, ResponseBody};
use crate::engine::{filter_and_sort, process_logs};
use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Instant;
use tracing::{debug, trace};

pub(crate) fn spawn_worker(
    id: usize,
    queue: Arc<Mutex<mpsc::Receiver<Request>>>,
    responses: mpsc::Sender<Response>,
    cfg: Arc<EngineConfig>,
) -> io::Result<JoinHandle<()>> {
    thread::Builder::new()
        .name(format!("waflens-worker-{id}"))
        .spawn(move || {
            trace!(worker = id, "worker started");

            loop {
                // The lock is held only while waiting for the next request.
                let request = {
                    let Ok(rx) = queue.lock() else {
                        break;
                    };
                    match rx.recv() {
                        Ok(request) => request,
                        Err(_) => break,
                    }
                };

                let response = handle(id, request, &cfg);

                // Coordinator is gone; nobody is listening.
                if responses.send(response).is_err() {
                    break;
                }
            }

            trace!(worker = id, "worker stopped");
        })
}

fn handle(worker: usize, request: Request, cfg: &EngineConfig) -> Response {
    let kind = request.kind();
    let seq = request.seq;
    let started = Instant::now();

    let body = match request.body {
        RequestBody::ProcessLogs {
            records,
            header_names,
        } => ResponseBody::LogsProcessed(process_logs(&records, &header_names, cfg)),
        RequestBody::FilterAndSort { records, query } => ResponseBody::FilterSortComplete {
            records: filter_and_sort(&records, &query, cfg),
        },
    };

    debug!(
        worker,
        seq,
        kind = %kind,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "request complete"
    );

    Response { seq, body }
}
