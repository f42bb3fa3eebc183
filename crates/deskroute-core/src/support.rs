//! File-backed support ticket collection

use crate::error::{Error, Result};
use crate::types::{Priority, Ticket, TicketStatus};
use deskroute_telemetry::{read_json, write_json};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

const FIRST_TICKET_NUMBER: u64 = 101;
const DEFAULT_ASSIGNEE: &str = "Support Team";

#[derive(Debug, Clone, Default)]
pub struct TicketFilter {
    pub status: Option<TicketStatus>,
    pub priority: Option<Priority>,
    /// Case-insensitive match against id or summary
    pub search: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TicketStats {
    pub total: usize,
    pub open: usize,
    pub high_priority: usize,
    pub by_status: BTreeMap<String, usize>,
}

/// Ticket collection persisted as a JSON list, rewritten wholesale on every change
#[derive(Debug, Clone)]
pub struct TicketStore {
    path: PathBuf,
}

impl TicketStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// All tickets; unreadable files are logged and read as empty
    pub fn load(&self) -> Vec<Ticket> {
        match read_json(&self.path) {
            Ok(tickets) => tickets,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to read tickets");
                Vec::new()
            }
        }
    }

    fn save(&self, tickets: &[Ticket]) -> Result<()> {
        write_json(&self.path, &tickets)?;
        Ok(())
    }

    /// Append a new open ticket and return it
    pub fn create_ticket(&self, summary: &str, priority: Priority, today: &str) -> Result<Ticket> {
        let mut tickets: Vec<Ticket> = read_json(&self.path)?;

        let ticket = Ticket {
            ticket_id: next_ticket_id(&tickets),
            summary: summary.trim().to_string(),
            status: TicketStatus::Open,
            priority,
            created_at: today.to_string(),
            updated_at: today.to_string(),
            assigned_to: DEFAULT_ASSIGNEE.to_string(),
        };

        tickets.push(ticket.clone());
        self.save(&tickets)?;
        tracing::info!(ticket_id = %ticket.ticket_id, priority = %priority, "ticket created");
        Ok(ticket)
    }

    /// First ticket whose id appears (case-insensitively) in the query
    pub fn track_ticket(&self, query: &str) -> Option<Ticket> {
        let lower = query.to_lowercase();
        self.load()
            .into_iter()
            .find(|t| lower.contains(&t.ticket_id.to_lowercase()))
    }

    pub fn get(&self, ticket_id: &str) -> Option<Ticket> {
        self.load()
            .into_iter()
            .find(|t| t.ticket_id.eq_ignore_ascii_case(ticket_id.trim()))
    }

    pub fn list(&self, filter: &TicketFilter) -> Vec<Ticket> {
        let needle = filter
            .search
            .as_deref()
            .map(str::to_lowercase)
            .filter(|s| !s.trim().is_empty());

        self.load()
            .into_iter()
            .filter(|t| filter.status.is_none_or(|s| t.status == s))
            .filter(|t| filter.priority.is_none_or(|p| t.priority == p))
            .filter(|t| {
                needle.as_ref().is_none_or(|n| {
                    t.summary.to_lowercase().contains(n) || t.ticket_id.to_lowercase().contains(n)
                })
            })
            .collect()
    }

    pub fn stats(&self) -> TicketStats {
        let tickets = self.load();
        let mut by_status = BTreeMap::new();
        for t in &tickets {
            *by_status.entry(t.status.to_string()).or_insert(0) += 1;
        }
        TicketStats {
            total: tickets.len(),
            open: tickets
                .iter()
                .filter(|t| t.status == TicketStatus::Open)
                .count(),
            high_priority: tickets
                .iter()
                .filter(|t| t.priority == Priority::High)
                .count(),
            by_status,
        }
    }

    /// Change a ticket's status and stamp `updated_at`
    pub fn update_status(&self, ticket_id: &str, status: TicketStatus, today: &str) -> Result<Ticket> {
        let mut tickets: Vec<Ticket> = read_json(&self.path)?;
        let ticket = tickets
            .iter_mut()
            .find(|t| t.ticket_id.eq_ignore_ascii_case(ticket_id.trim()))
            .ok_or_else(|| Error::TicketNotFound(ticket_id.to_string()))?;

        ticket.status = status;
        ticket.updated_at = today.to_string();
        let updated = ticket.clone();

        self.save(&tickets)?;
        Ok(updated)
    }
}

fn ticket_number(ticket_id: &str) -> Option<u64> {
    let (prefix, number) = ticket_id.split_once('-')?;
    if !prefix.eq_ignore_ascii_case("TCK") {
        return None;
    }
    number.parse().ok()
}

/// `TCK-<n>` with n past both the collection size and the highest id in use
fn next_ticket_id(tickets: &[Ticket]) -> String {
    let by_len = tickets.len() as u64 + FIRST_TICKET_NUMBER;
    let by_max = tickets
        .iter()
        .filter_map(|t| ticket_number(&t.ticket_id))
        .filter_map(|n| n.checked_add(1))
        .max()
        .unwrap_or(FIRST_TICKET_NUMBER);
    format!("TCK-{}", by_len.max(by_max))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn store() -> (tempfile::TempDir, TicketStore) {
        let temp = tempfile::TempDir::new().unwrap();
        let store = TicketStore::new(temp.path().join("tickets.json"));
        (temp, store)
    }

    #[test]
    fn test_first_ticket_id() {
        let (_temp, store) = store();
        let ticket = store
            .create_ticket("invoice mismatch", Priority::Medium, "2024-12-20")
            .unwrap();
        assert_eq!(ticket.ticket_id, "TCK-101");
        assert_eq!(ticket.status, TicketStatus::Open);
        assert_eq!(ticket.assigned_to, "Support Team");
        assert_eq!(store.load().len(), 1);
    }

    #[test]
    fn test_hand_edited_max_id_does_not_overflow() {
        let (_temp, store) = store();
        let edited = Ticket {
            ticket_id: format!("TCK-{}", u64::MAX),
            summary: "imported".to_string(),
            status: TicketStatus::Open,
            priority: Priority::Low,
            created_at: "2024-12-01".to_string(),
            updated_at: "2024-12-01".to_string(),
            assigned_to: "Support Team".to_string(),
        };
        store.save(&[edited.clone()]).unwrap();

        let ticket = store
            .create_ticket("next issue", Priority::Medium, "2024-12-20")
            .unwrap();
        assert_ne!(ticket.ticket_id, edited.ticket_id);
        assert_eq!(ticket.ticket_id, "TCK-102");
    }

    #[test]
    fn test_sequential_ids_never_repeat() {
        let (_temp, store) = store();
        let mut ids = HashSet::new();
        for i in 0..25 {
            let t = store
                .create_ticket(&format!("issue {}", i), Priority::Low, "2024-12-20")
                .unwrap();
            assert!(ids.insert(t.ticket_id), "duplicate id at {}", i);
        }
        assert_eq!(store.load().len(), 25);
    }

    #[test]
    fn test_ids_skip_past_hand_edited_numbers() {
        let (_temp, store) = store();
        let seeded = vec![Ticket {
            ticket_id: "TCK-500".to_string(),
            summary: "seed".to_string(),
            status: TicketStatus::Closed,
            priority: Priority::Low,
            created_at: "2024-01-01".to_string(),
            updated_at: "2024-01-01".to_string(),
            assigned_to: "Support Team".to_string(),
        }];
        store.save(&seeded).unwrap();

        let t = store.create_ticket("next", Priority::High, "2024-12-20").unwrap();
        assert_eq!(t.ticket_id, "TCK-501");
    }

    #[test]
    fn test_track_ticket_case_insensitive() {
        let (_temp, store) = store();
        store.create_ticket("first", Priority::Medium, "2024-12-20").unwrap();
        let found = store.track_ticket("what is the status of tck-101").unwrap();
        assert_eq!(found.summary, "first");
        assert!(store.track_ticket("status of TCK-999").is_none());
    }

    #[test]
    fn test_list_filters_and_stats() {
        let (_temp, store) = store();
        store.create_ticket("GST mismatch", Priority::High, "2024-12-20").unwrap();
        store.create_ticket("download broken", Priority::Low, "2024-12-20").unwrap();
        store
            .update_status("TCK-102", TicketStatus::Closed, "2024-12-21")
            .unwrap();

        let open = store.list(&TicketFilter {
            status: Some(TicketStatus::Open),
            ..Default::default()
        });
        assert_eq!(open.len(), 1);
        assert_eq!(open[0].ticket_id, "TCK-101");

        let searched = store.list(&TicketFilter {
            search: Some("DOWNLOAD".to_string()),
            ..Default::default()
        });
        assert_eq!(searched.len(), 1);
        assert_eq!(searched[0].updated_at, "2024-12-21");

        let stats = store.stats();
        assert_eq!(stats.total, 2);
        assert_eq!(stats.open, 1);
        assert_eq!(stats.high_priority, 1);
        assert_eq!(stats.by_status.get("closed"), Some(&1));
    }

    #[test]
    fn test_update_unknown_ticket() {
        let (_temp, store) = store();
        let err = store
            .update_status("TCK-404", TicketStatus::Closed, "2024-12-21")
            .unwrap_err();
        assert!(matches!(err, Error::TicketNotFound(_)));
    }

    #[test]
    fn test_next_ticket_id_ignores_foreign_ids() {
        let tickets = vec![Ticket {
            ticket_id: "JIRA-9000".to_string(),
            summary: String::new(),
            status: TicketStatus::Open,
            priority: Priority::Medium,
            created_at: String::new(),
            updated_at: String::new(),
            assigned_to: String::new(),
        }];
        assert_eq!(next_ticket_id(&tickets), "TCK-102");
    }
}
