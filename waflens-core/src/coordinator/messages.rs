use crate::engine::{FilterSortQuery, ProcessedLogs};
use crate::record::Record;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OperationKind {
    ProcessLogs,
    FilterAndSort,
}

impl OperationKind {
    pub const ALL: [OperationKind; 2] = [OperationKind::ProcessLogs, OperationKind::FilterAndSort];

    pub fn as_str(self) -> &'static str {
        match self {
            OperationKind::ProcessLogs => "process_logs",
            OperationKind::FilterAndSort => "filter_and_sort",
        }
    }

    pub(crate) fn index(self) -> usize {
        match self {
            OperationKind::ProcessLogs => 0,
            OperationKind::FilterAndSort => 1,
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct Request {
    pub seq: u64,
    pub body: RequestBody,
}

#[derive(Debug, Clone)]
pub enum RequestBody {
    ProcessLogs {
        records: Vec<Record>,
        header_names: Vec<String>,
    },
    FilterAndSort {
        records: Vec<Record>,
        query: FilterSortQuery,
    },
}

impl Request {
    pub fn kind(&self) -> OperationKind {
        match self.body {
            RequestBody::ProcessLogs { .. } => OperationKind::ProcessLogs,
            RequestBody::FilterAndSort { .. } => OperationKind::FilterAndSort,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Response {
    pub seq: u64,
    pub body: ResponseBody,
}

#[derive(Debug, Clone)]
pub enum ResponseBody {
    LogsProcessed(ProcessedLogs),
    FilterSortComplete { records: Vec<Record> },
}

impl Response {
    pub fn kind(&self) -> OperationKind {
        match self.body {
            ResponseBody::LogsProcessed(_) => OperationKind::ProcessLogs,
            ResponseBody::FilterSortComplete { .. } => OperationKind::FilterAndSort,
        }
    }
}
