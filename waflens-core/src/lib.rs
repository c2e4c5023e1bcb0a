pub mod catalog;
pub mod cli;
pub mod conf;
pub mod coordinator;
pub mod engine;
pub mod enrichment;
pub mod filter;
pub mod group;
pub mod ingest;
pub mod logging;
pub mod record;
pub mod shortcuts;
pub mod sort;
pub mod view;
