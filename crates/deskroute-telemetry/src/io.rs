//! JSON file I/O and atomic file operations

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Read a whole JSON document, returning `T::default()` when the file is absent
pub fn read_json<T>(path: &Path) -> std::io::Result<T>
where
    T: for<'de> Deserialize<'de> + Default,
{
    if !path.exists() {
        return Ok(T::default());
    }

    let contents = std::fs::read_to_string(path)?;
    if contents.trim().is_empty() {
        return Ok(T::default());
    }

    let value = serde_json::from_str(&contents)?;
    Ok(value)
}

/// Serialize `value` as pretty JSON and replace `path` atomically
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    atomic_write(path, json.as_bytes())
}

/// Write data atomically using temp file + rename
pub fn atomic_write(path: &Path, data: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let temp_path = path.with_extension("tmp");
    std::fs::write(&temp_path, data)?;
    std::fs::rename(temp_path, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
    struct TestDoc {
        id: u32,
        names: Vec<String>,
    }

    #[test]
    fn test_json_roundtrip() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("nested").join("doc.json");

        let doc = TestDoc {
            id: 7,
            names: vec!["Alice".to_string(), "Bob".to_string()],
        };
        write_json(&path, &doc).unwrap();

        let loaded: TestDoc = read_json(&path).unwrap();
        assert_eq!(loaded, doc);
        assert!(!path.with_extension("tmp").exists());
    }

    #[test]
    fn test_missing_file_reads_default() {
        let temp = tempfile::TempDir::new().unwrap();
        let loaded: Vec<TestDoc> = read_json(&temp.path().join("absent.json")).unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result: std::io::Result<Vec<TestDoc>> = read_json(&path);
        assert!(result.is_err());
    }

    #[test]
    fn test_atomic_write() {
        let temp = tempfile::TempDir::new().unwrap();
        let test_file = temp.path().join("test_atomic.txt");

        let data = b"Hello, world!";
        atomic_write(&test_file, data).unwrap();

        let read_data = std::fs::read(&test_file).unwrap();
        assert_eq!(data, read_data.as_slice());
    }
}
