//! Child profile configuration.
//!
//! The set of children is fixed: there is no add/remove-child operation.
//! Profiles come from an optional `children.yaml` in the data directory;
//! when the file is absent the built-in defaults are used. A malformed file
//! is an error so a typo never silently drops a child.

use anyhow::{Context, Result};
use log::info;
use std::fs;
use std::path::Path;

use shared::{ChildProfile, Task};

/// Optional configuration file name, looked up in the data directory
pub const CHILDREN_CONFIG_FILE: &str = "children.yaml";

fn task(id: &str, name: &str, is_extra: bool) -> Task {
    Task {
        id: id.to_string(),
        name: name.to_string(),
        is_extra,
    }
}

/// Built-in child profiles used when no configuration file is present
pub fn default_children() -> Vec<ChildProfile> {
    vec![
        ChildProfile {
            id: "child1".to_string(),
            name: "Alex".to_string(),
            initial_tasks: vec![
                task("make-bed", "Make Bed", false),
                task("brush-teeth", "Brush Teeth", false),
                task("homework", "Homework", false),
                task("practice-piano", "Practice Piano", true),
            ],
        },
        ChildProfile {
            id: "child2".to_string(),
            name: "Jordan".to_string(),
            initial_tasks: vec![
                task("tidy-room", "Tidy Room", false),
                task("brush-teeth-2", "Brush Teeth", false),
                task("read-book", "Read Book", false),
                task("help-chores", "Help with Chores", true),
                task("walk-dog", "Walk Dog", true),
            ],
        },
    ]
}

/// Load child profiles from the data directory, falling back to the
/// built-in defaults when no configuration file exists
pub fn load_children(data_dir: &Path) -> Result<Vec<ChildProfile>> {
    let path = data_dir.join(CHILDREN_CONFIG_FILE);

    if !path.exists() {
        info!("No {} found, using built-in child profiles", CHILDREN_CONFIG_FILE);
        return Ok(default_children());
    }

    let contents = fs::read_to_string(&path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let children: Vec<ChildProfile> = serde_yaml::from_str(&contents)
        .with_context(|| format!("Invalid child configuration in {}", path.display()))?;

    info!("Loaded {} child profiles from {}", children.len(), path.display());
    Ok(children)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_children() {
        let children = default_children();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0].name, "Alex");
        assert_eq!(children[1].name, "Jordan");

        // Task ids are unique within each child
        for child in &children {
            let mut ids: Vec<&str> = child.initial_tasks.iter().map(|t| t.id.as_str()).collect();
            ids.sort();
            ids.dedup();
            assert_eq!(ids.len(), child.initial_tasks.len());
        }
    }

    #[test]
    fn test_load_children_without_file_uses_defaults() {
        let temp_dir = tempdir().unwrap();
        let children = load_children(temp_dir.path()).unwrap();
        assert_eq!(children, default_children());
    }

    #[test]
    fn test_load_children_from_yaml() {
        let temp_dir = tempdir().unwrap();
        let yaml = r#"
- id: child1
  name: Robin
  initialTasks:
    - id: water-plants
      name: Water Plants
      isExtra: false
    - id: feed-cat
      name: Feed Cat
      isExtra: true
"#;
        fs::write(temp_dir.path().join(CHILDREN_CONFIG_FILE), yaml).unwrap();

        let children = load_children(temp_dir.path()).unwrap();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].name, "Robin");
        assert_eq!(children[0].initial_tasks.len(), 2);
        assert!(children[0].initial_tasks[1].is_extra);
    }

    #[test]
    fn test_load_children_rejects_malformed_yaml() {
        let temp_dir = tempdir().unwrap();
        fs::write(temp_dir.path().join(CHILDREN_CONFIG_FILE), ": not valid [").unwrap();

        assert!(load_children(temp_dir.path()).is_err());
    }
}
