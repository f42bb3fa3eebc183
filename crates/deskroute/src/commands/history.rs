use deskroute_core::{Config, ContextSummary, ConversationStore, ConversationTurn};
use deskroute_telemetry::{truncate_response, Paths};

fn format_turn(turn: &ConversationTurn) -> String {
    format!(
        "{} [{} | satisfaction {:.2}]\n  Q: {}\n  A: {}",
        turn.timestamp,
        turn.intent,
        turn.satisfaction,
        turn.query,
        truncate_response(&turn.response.replace('\n', " "), 100)
    )
}

fn format_summary(user: &str, summary: &ContextSummary) -> String {
    if summary.total_turns == 0 {
        return format!("No history for {}", user);
    }

    let mut lines = vec![
        format!("History summary for {}", user),
        format!("  Turns: {}", summary.total_turns),
    ];
    if let Some(intent) = summary.most_common_intent {
        lines.push(format!("  Most common intent: {}", intent));
    }
    if let Some(avg) = summary.average_satisfaction {
        lines.push(format!("  Average satisfaction: {:.2}", avg));
    }
    for (kind, values) in &summary.entities {
        lines.push(format!("  {:?}: {}", kind, values.join(", ")));
    }
    if !summary.recent_topics.is_empty() {
        lines.push("  Recent topics:".to_string());
        for topic in &summary.recent_topics {
            lines.push(format!("    - {}", topic));
        }
    }
    lines.join("\n")
}

pub fn run(
    paths: &Paths,
    user: &str,
    limit: usize,
    summary: bool,
    search: Option<&str>,
) -> anyhow::Result<()> {
    let config = Config::load(&paths.config_file());
    let store = ConversationStore::new(paths.conversation_file(), config.history_cap);

    if summary {
        println!("{}", format_summary(user, &store.get_context_summary(user)));
        return Ok(());
    }

    if let Some(term) = search {
        let matches = store.search_conversation_history(user, term, limit);
        if matches.is_empty() {
            println!("No turns matching '{}'", term);
            return Ok(());
        }
        for m in &matches {
            println!("({:.1}) {}", m.score, format_turn(&m.turn));
        }
        return Ok(());
    }

    let turns = store.get_conversation_history(user, limit);
    if turns.is_empty() {
        println!("No history for {}", user);
        return Ok(());
    }
    for turn in &turns {
        println!("{}", format_turn(turn));
    }
    Ok(())
}
