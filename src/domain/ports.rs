use crate::utils::error::Result;
use std::borrow::Cow;
use std::path::Path;

/// Where patched files live. Paths are relative to the store's root.
pub trait FileStore {
    fn exists(&self, path: &Path) -> bool;
    fn read_text(&self, path: &Path) -> Result<String>;
    fn write_text(&self, path: &Path, content: &str) -> Result<()>;
}

/// One text substitution pass over a whole file.
pub trait Rewrite {
    fn name(&self) -> &str;
    fn apply<'a>(&self, content: &'a str) -> Cow<'a, str>;
}
