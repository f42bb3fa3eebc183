use anyhow::Context;
use chrono::Local;
use deskroute_core::{Priority, TicketFilter, TicketStats, TicketStatus, TicketStore};
use deskroute_telemetry::Paths;

fn build_filter(
    status: Option<&str>,
    priority: Option<&str>,
    search: Option<&str>,
) -> anyhow::Result<TicketFilter> {
    Ok(TicketFilter {
        status: status.map(str::parse::<TicketStatus>).transpose()?,
        priority: priority.map(str::parse::<Priority>).transpose()?,
        search: search.map(str::to_string),
    })
}

fn format_stats(stats: &TicketStats) -> String {
    let mut lines = vec![
        format!("Total tickets: {}", stats.total),
        format!("Open: {}", stats.open),
        format!("High priority: {}", stats.high_priority),
    ];
    for (status, count) in &stats.by_status {
        lines.push(format!("  {:<12} {}", status, count));
    }
    lines.join("\n")
}

pub fn run_list(
    paths: &Paths,
    status: Option<&str>,
    priority: Option<&str>,
    search: Option<&str>,
) -> anyhow::Result<()> {
    let filter = build_filter(status, priority, search)?;
    let tickets = TicketStore::new(paths.tickets_file()).list(&filter);

    if tickets.is_empty() {
        println!("No tickets");
        return Ok(());
    }
    for ticket in &tickets {
        println!("{}", ticket);
    }
    Ok(())
}

pub fn run_stats(paths: &Paths) -> anyhow::Result<()> {
    let stats = TicketStore::new(paths.tickets_file()).stats();
    println!("{}", format_stats(&stats));
    Ok(())
}

pub fn run_close(paths: &Paths, id: &str) -> anyhow::Result<()> {
    let today = Local::now().format("%Y-%m-%d").to_string();
    let ticket = TicketStore::new(paths.tickets_file())
        .update_status(id, TicketStatus::Closed, &today)
        .with_context(|| format!("Failed to close {}", id))?;
    println!("Closed {}", ticket.ticket_id);
    Ok(())
}
