use crate::domain::ports::FileStore;
use crate::utils::error::{PatchError, Result};
use std::fs;
use std::path::{Path, PathBuf};

/// Files on local disk, resolved against `base_path`.
///
/// Content is always read and written as UTF-8 regardless of locale.
#[derive(Debug, Clone)]
pub struct LocalFileStore {
    base_path: PathBuf,
}

impl LocalFileStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        self.base_path.join(path)
    }
}

impl FileStore for LocalFileStore {
    fn exists(&self, path: &Path) -> bool {
        self.resolve(path).is_file()
    }

    fn read_text(&self, path: &Path) -> Result<String> {
        let full_path = self.resolve(path);
        let bytes = fs::read(&full_path).map_err(|source| PatchError::ReadError {
            path: full_path.clone(),
            source,
        })?;

        String::from_utf8(bytes).map_err(|e| PatchError::ReadError {
            path: full_path,
            source: std::io::Error::new(std::io::ErrorKind::InvalidData, e),
        })
    }

    fn write_text(&self, path: &Path, content: &str) -> Result<()> {
        let full_path = self.resolve(path);
        fs::write(&full_path, content.as_bytes())
            .map_err(|source| PatchError::WriteError { path: full_path, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_round_trip_relative_to_base() {
        let temp = TempDir::new().unwrap();
        let store = LocalFileStore::new(temp.path());
        let path = Path::new("route.ts");

        assert!(!store.exists(path));
        fs::write(temp.path().join(path), "export {}\n").unwrap();
        assert!(store.exists(path));

        store.write_text(path, "export const x = 'é'\n").unwrap();
        assert_eq!(store.read_text(path).unwrap(), "export const x = 'é'\n");
    }

    #[test]
    fn test_directory_is_not_a_file() {
        let temp = TempDir::new().unwrap();
        fs::create_dir(temp.path().join("route.ts")).unwrap();
        assert!(!LocalFileStore::new(temp.path()).exists(Path::new("route.ts")));
    }

    #[test]
    fn test_invalid_utf8_is_read_error() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("latin1.ts"), [0x63, 0x61, 0x66, 0xe9]).unwrap();

        let err = LocalFileStore::new(temp.path())
            .read_text(Path::new("latin1.ts"))
            .unwrap_err();
        assert!(matches!(err, PatchError::ReadError { .. }));
    }
}
