use chrono::{Local, TimeZone};
use criterion::{criterion_group, criterion_main, Criterion};
use deskroute_core::{score_turns, Config, ConversationTurn, TurnContext};
use deskroute_router::{install_fixtures, AppContext, Router};
use deskroute_telemetry::Paths;
use std::hint::black_box;

fn bench_route_faq(c: &mut Criterion) {
    let temp = tempfile::TempDir::new().unwrap();
    let paths = Paths::with_root(temp.path());
    install_fixtures(&paths).unwrap();
    let mut app = AppContext::open(paths);
    let router = Router::new();

    c.bench_function("route_query_faq", |b| {
        b.iter(|| {
            router.route_query(
                &mut app,
                black_box("Why did my GST filing fail?"),
                "Viewer",
                Some("bench"),
            )
        });
    });
}

fn bench_route_action(c: &mut Criterion) {
    let temp = tempfile::TempDir::new().unwrap();
    let paths = Paths::with_root(temp.path());
    install_fixtures(&paths).unwrap();
    let mut app = AppContext::open(paths);
    let router = Router::new();

    c.bench_function("route_query_filter_invoices", |b| {
        b.iter(|| {
            router.route_query(
                &mut app,
                black_box("Filter invoices from IndiSky with status failed for last month"),
                "Manager",
                None,
            )
        });
    });
}

fn bench_score_30_turns(c: &mut Criterion) {
    let config = Config::default();
    let now = Local.with_ymd_and_hms(2024, 12, 20, 12, 0, 0).unwrap();
    let turns: Vec<ConversationTurn> = (0..30)
        .map(|i| ConversationTurn {
            timestamp: (now - chrono::Duration::minutes(i * 20)).to_rfc3339(),
            query: format!("show invoice INV-2024-{:03} from IndiSky", i),
            response: "📊 Found invoices".to_string(),
            context: TurnContext::default(),
            entities: Default::default(),
            intent: Default::default(),
            satisfaction: 0.6,
        })
        .collect();

    c.bench_function("score_30_turns", |b| {
        b.iter(|| score_turns(&turns, black_box("why did INV-2024-007 fail"), now, &config));
    });
}

criterion_group!(
    benches,
    bench_route_faq,
    bench_route_action,
    bench_score_30_turns
);
criterion_main!(benches);
