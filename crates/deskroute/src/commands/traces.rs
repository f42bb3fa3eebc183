use deskroute_core::Config;
use deskroute_telemetry::{truncate_response, Paths, TraceAnalytics, TraceEntry, TraceLog};

fn format_entry(entry: &TraceEntry) -> String {
    let confidence = entry
        .confidence
        .map(|c| format!(" ({:.2})", c))
        .unwrap_or_default();
    format!(
        "{} [{}{}] {}\n    → {}",
        entry.timestamp,
        entry.routed_to,
        confidence,
        entry.query,
        truncate_response(&entry.response.replace('\n', " "), 80)
    )
}

fn format_stats(analytics: &TraceAnalytics) -> String {
    if analytics.total == 0 {
        return "No traces recorded.".to_string();
    }

    let mut lines = vec![format!("Total traces: {}", analytics.total)];
    lines.push("Module usage:".to_string());
    for (module, count) in &analytics.module_counts {
        lines.push(format!(
            "  {:<32} {:>4} ({:.0}%)",
            module,
            count,
            *count as f64 / analytics.total as f64 * 100.0
        ));
    }
    match analytics.average_confidence {
        Some(avg) => lines.push(format!("Average confidence: {:.2}", avg)),
        None => lines.push("Average confidence: n/a".to_string()),
    }
    lines.push(format!(
        "Context usage: {:.1}%",
        analytics.context_usage_rate * 100.0
    ));
    lines.join("\n")
}

pub fn run(paths: &Paths, limit: usize, stats: bool, search: Option<&str>) -> anyhow::Result<()> {
    let config = Config::load(&paths.config_file());
    let log = TraceLog::new(paths.trace_file(), config.trace_cap);

    if stats {
        println!("{}", format_stats(&log.analytics()));
        return Ok(());
    }

    let entries = match search {
        Some(term) => {
            let mut found = log.search(term);
            let start = found.len().saturating_sub(limit);
            found.drain(..start);
            found
        }
        None => log.persistent_traces(limit),
    };

    if entries.is_empty() {
        println!("No traces");
        return Ok(());
    }

    println!("Recent traces (last {})", entries.len());
    for entry in entries.iter().rev() {
        println!("{}", format_entry(entry));
    }
    Ok(())
}
