use chrono::{DateTime, Local, TimeZone};
use deskroute_core::TicketStore;
use tempfile::TempDir;

pub struct Fixture {
    pub _temp: TempDir,
    pub tickets: TicketStore,
    pub now: DateTime<Local>,
}

pub fn fixture() -> Fixture {
    let temp = TempDir::new().unwrap();
    let tickets = TicketStore::new(temp.path().join("data").join("tickets.json"));
    let now = Local.with_ymd_and_hms(2024, 12, 20, 14, 5, 9).unwrap();
    Fixture {
        _temp: temp,
        tickets,
        now,
    }
}
