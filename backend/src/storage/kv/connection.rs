use anyhow::Result;
use log::info;
use std::fs;
use std::path::{Path, PathBuf};

/// Fixed key under which the state blob is stored
pub const SNAPSHOT_FILE: &str = "ticks_and_tokens.json";

/// KvConnection manages the data directory that holds the state blob and
/// the optional child configuration file
#[derive(Clone)]
pub struct KvConnection {
    base_directory: PathBuf,
}

impl KvConnection {
    /// Create a new connection with a base directory
    pub fn new<P: AsRef<Path>>(base_directory: P) -> Result<Self> {
        let base_path = base_directory.as_ref().to_path_buf();

        // Create the base directory if it doesn't exist
        if !base_path.exists() {
            fs::create_dir_all(&base_path)?;
        }

        Ok(Self {
            base_directory: base_path,
        })
    }

    /// Create a new connection in the default data directory
    /// (~/Documents/Ticks and Tokens)
    pub fn new_default() -> Result<Self> {
        let home_dir = std::env::var("HOME")
            .or_else(|_| std::env::var("USERPROFILE"))
            .map_err(|_| anyhow::anyhow!("Could not determine home directory"))?;

        let data_dir = PathBuf::from(home_dir)
            .join("Documents")
            .join("Ticks and Tokens");

        info!("Using data directory: {}", data_dir.display());
        Self::new(data_dir)
    }

    /// The base data directory
    pub fn base_directory(&self) -> &Path {
        &self.base_directory
    }

    /// Path of the state blob file
    pub fn snapshot_file_path(&self) -> PathBuf {
        self.base_directory.join(SNAPSHOT_FILE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_new_creates_missing_directory() {
        let temp_dir = tempdir().unwrap();
        let nested = temp_dir.path().join("data").join("tracker");
        assert!(!nested.exists());

        let conn = KvConnection::new(&nested).unwrap();
        assert!(nested.exists());
        assert_eq!(conn.base_directory(), nested.as_path());
    }

    #[test]
    fn test_snapshot_file_path() {
        let temp_dir = tempdir().unwrap();
        let conn = KvConnection::new(temp_dir.path()).unwrap();
        assert_eq!(
            conn.snapshot_file_path(),
            temp_dir.path().join("ticks_and_tokens.json")
        );
    }
}
