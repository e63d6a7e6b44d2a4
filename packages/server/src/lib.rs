// Salone Connect - Jobs API Core
//
// Backend for the jobs section of the citizen-services portal. The core of
// this crate is the job import pipeline: third-party listings arrive in
// heterogeneous shapes, get normalized, deduplicated by (source, external_id),
// scored for completeness, and upserted with a per-batch audit log.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
