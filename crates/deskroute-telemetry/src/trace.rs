//! Bounded trace log mirrored in memory and on disk

use crate::io::{read_json, write_json};
use crate::types::TraceEntry;
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

pub const DEFAULT_TRACE_CAP: usize = 100;

/// Aggregate view over the persisted trace list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceAnalytics {
    pub total: usize,
    pub module_counts: BTreeMap<String, usize>,
    pub average_confidence: Option<f64>,
    pub context_usage_rate: f64,
}

/// Append-only trace log; the oldest entries are evicted past `cap`
#[derive(Debug)]
pub struct TraceLog {
    path: PathBuf,
    cap: usize,
    session: Vec<TraceEntry>,
}

impl TraceLog {
    pub fn new(path: impl Into<PathBuf>, cap: usize) -> Self {
        Self {
            path: path.into(),
            cap: cap.max(1),
            session: Vec::new(),
        }
    }

    /// Record a trace in the session buffer and the persisted file.
    ///
    /// Persistence failures are logged and swallowed so a broken trace file
    /// never blocks a response.
    pub fn log_trace(&mut self, entry: TraceEntry) {
        self.session.push(entry.clone());
        evict_front(&mut self.session, self.cap);

        if let Err(e) = self.persist(entry) {
            tracing::warn!(path = %self.path.display(), error = %e, "failed to save trace log");
        }
    }

    fn persist(&self, entry: TraceEntry) -> std::io::Result<()> {
        let mut traces: Vec<TraceEntry> = read_json(&self.path)?;
        traces.push(entry);
        evict_front(&mut traces, self.cap);
        write_json(&self.path, &traces)
    }

    /// Most recent traces recorded in this process
    pub fn session_traces(&self, limit: usize) -> &[TraceEntry] {
        let start = self.session.len().saturating_sub(limit);
        &self.session[start..]
    }

    /// Most recent traces from the persisted file; read errors yield an empty list
    pub fn persistent_traces(&self, limit: usize) -> Vec<TraceEntry> {
        let mut traces = self.load();
        let start = traces.len().saturating_sub(limit);
        traces.drain(..start);
        traces
    }

    fn load(&self) -> Vec<TraceEntry> {
        match read_json(&self.path) {
            Ok(traces) => traces,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to read trace log");
                Vec::new()
            }
        }
    }

    /// Module usage counts, mean confidence and context-usage rate
    pub fn analytics(&self) -> TraceAnalytics {
        let traces = self.load();
        let total = traces.len();

        let mut module_counts = BTreeMap::new();
        for trace in &traces {
            *module_counts.entry(trace.routed_to.clone()).or_insert(0) += 1;
        }

        let confidences: Vec<f64> = traces.iter().filter_map(|t| t.confidence).collect();
        let average_confidence = if confidences.is_empty() {
            None
        } else {
            Some(confidences.iter().sum::<f64>() / confidences.len() as f64)
        };

        let context_used = traces
            .iter()
            .filter(|t| t.context_used == Some(true))
            .count();
        let context_usage_rate = if total == 0 {
            0.0
        } else {
            context_used as f64 / total as f64
        };

        TraceAnalytics {
            total,
            module_counts,
            average_confidence,
            context_usage_rate,
        }
    }

    /// Case-insensitive substring search over query, response and module
    pub fn search(&self, term: &str) -> Vec<TraceEntry> {
        let needle = term.to_lowercase();
        if needle.trim().is_empty() {
            return Vec::new();
        }
        self.load()
            .into_iter()
            .filter(|t| {
                t.query.to_lowercase().contains(&needle)
                    || t.response.to_lowercase().contains(&needle)
                    || t.routed_to.to_lowercase().contains(&needle)
            })
            .collect()
    }

    pub fn cap(&self) -> usize {
        self.cap
    }
}

fn evict_front<T>(items: &mut Vec<T>, cap: usize) {
    if items.len() > cap {
        let excess = items.len() - cap;
        items.drain(..excess);
    }
}
