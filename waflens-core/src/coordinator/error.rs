use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoordinatorError {
    #[error("failed to spawn worker thread: {0}")]
    Spawn(#[source] std::io::Error),

    #[error("worker pool disconnected")]
    Disconnected,

    #[error("no request is pending")]
    Idle,

    #[error("worker {worker} exited before answering")]
    WorkerExited { worker: usize },
}
