use crate::config::toml_config::DiscoverConfig;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Finds every file named `config.file_name` under `root/config.dir`, skipping
/// excluded directories. Paths come back relative to `root`, sorted.
pub fn discover_files(root: &Path, config: &DiscoverConfig) -> Result<Vec<PathBuf>> {
    let start = root.join(&config.dir);
    tracing::debug!("Scanning {} for {}", start.display(), config.file_name);

    let mut files = Vec::new();
    let walker = WalkDir::new(&start)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            !(entry.file_type().is_dir()
                && entry
                    .file_name()
                    .to_str()
                    .is_some_and(|name| config.exclude.iter().any(|ex| ex == name)))
        });

    for entry in walker {
        let entry = entry?;
        if entry.file_type().is_file() && entry.file_name() == config.file_name.as_str() {
            let path = entry.path();
            files.push(path.strip_prefix(root).unwrap_or(path).to_path_buf());
        }
    }

    tracing::info!("📁 Found {} {} files to scan", files.len(), config.file_name);
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_discover_skips_excluded_dirs() {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        for dir in [
            "app/api/subjects/[id]",
            "app/api/fields/[id]",
            "app/api/node_modules/pkg",
            "app/api/.next/cache",
        ] {
            fs::create_dir_all(root.join(dir)).unwrap();
            fs::write(root.join(dir).join("route.ts"), "export {}\n").unwrap();
        }
        fs::write(root.join("app/api/subjects/[id]/page.ts"), "").unwrap();

        let files = discover_files(root, &DiscoverConfig::default()).unwrap();
        assert_eq!(
            files,
            vec![
                PathBuf::from("app/api/fields/[id]/route.ts"),
                PathBuf::from("app/api/subjects/[id]/route.ts"),
            ]
        );
    }

    #[test]
    fn test_discover_missing_dir_is_error() {
        let temp = TempDir::new().unwrap();
        assert!(discover_files(temp.path(), &DiscoverConfig::default()).is_err());
    }
}
