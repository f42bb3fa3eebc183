//! File layout, JSON persistence and the routing trace log

mod io;
mod paths;
mod trace;
mod types;

pub use io::{atomic_write, read_json, write_json};
pub use paths::Paths;
pub use trace::{TraceAnalytics, TraceLog, DEFAULT_TRACE_CAP};
pub use types::{truncate_response, TraceEntry};
