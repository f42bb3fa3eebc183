use deskroute_router::install_fixtures;
use deskroute_telemetry::Paths;

pub fn run(paths: &Paths) -> anyhow::Result<()> {
    let written = install_fixtures(paths)?;

    println!("✓ deskroute home ready at {}", paths.root().display());
    if written.is_empty() {
        println!("\nAll fixtures already present; nothing overwritten.");
        return Ok(());
    }

    println!("\nFiles created:");
    for path in &written {
        println!("  - {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_init_creates_fixtures() {
        let temp = TempDir::new().unwrap();
        let paths = Paths::with_root(temp.path());

        assert!(run(&paths).is_ok());
        assert!(paths.faqs_file().exists());
        assert!(paths.tickets_file().exists());
        assert!(paths.config_file().exists());
    }

    #[test]
    fn test_init_preserves_existing_tickets() {
        let temp = TempDir::new().unwrap();
        let paths = Paths::with_root(temp.path());
        std::fs::create_dir_all(paths.data_dir()).unwrap();
        std::fs::write(paths.tickets_file(), "[]").unwrap();

        run(&paths).unwrap();
        assert_eq!(std::fs::read_to_string(paths.tickets_file()).unwrap(), "[]");
    }
}
