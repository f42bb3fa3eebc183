use deskroute_router::{install_fixtures, AppContext};
use deskroute_telemetry::Paths;
use tempfile::TempDir;

/// Fresh home with the built-in fixtures installed
pub fn sample_app() -> (TempDir, AppContext) {
    let temp = TempDir::new().unwrap();
    let paths = Paths::with_root(temp.path());
    install_fixtures(&paths).unwrap();
    let app = AppContext::open(paths);
    (temp, app)
}
