use deskroute_core::Config;
use deskroute_router::{install_fixtures, AppContext};
use deskroute_telemetry::Paths;
use tempfile::TempDir;

/// Home directory with the built-in fixtures installed
pub fn installed_home() -> (TempDir, Paths) {
    let temp = TempDir::new().unwrap();
    let paths = Paths::with_root(temp.path());
    install_fixtures(&paths).unwrap();
    (temp, paths)
}

pub fn open_with(paths: &Paths, config: Config) -> AppContext {
    AppContext::with_config(paths.clone(), config)
}
