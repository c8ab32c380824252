use crate::core::rewrite::apply_all;
use crate::domain::model::{FileReport, ReportKind, RunSummary};
use crate::domain::ports::{FileStore, Rewrite};
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Default)]
pub struct PatchOptions {
    /// Report `WouldFix` instead of writing.
    pub dry_run: bool,
    /// Turn read/write failures into `Failed` reports instead of stopping.
    pub keep_going: bool,
}

/// Applies a chain of rewrites to a list of files, one file at a time.
pub struct Patcher<S: FileStore> {
    store: S,
    rewrites: Vec<Box<dyn Rewrite>>,
    options: PatchOptions,
}

impl<S: FileStore> Patcher<S> {
    pub fn new(store: S, rewrites: Vec<Box<dyn Rewrite>>) -> Self {
        Self::with_options(store, rewrites, PatchOptions::default())
    }

    pub fn with_options(store: S, rewrites: Vec<Box<dyn Rewrite>>, options: PatchOptions) -> Self {
        Self {
            store,
            rewrites,
            options,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Patches `files` in order, printing one line per file and a final
    /// summary. Without `keep_going` the first read or write error stops the
    /// run; files already written stay written.
    pub fn run(&self, files: &[PathBuf]) -> Result<RunSummary> {
        tracing::info!("🔧 Patching {} files", files.len());
        if self.options.dry_run {
            tracing::info!("🔍 DRY RUN MODE - no file will be written");
        }

        let mut summary = RunSummary::default();
        for path in files {
            let report = match self.patch_file(path) {
                Ok(report) => report,
                Err(e) if self.options.keep_going => {
                    tracing::error!("❌ {}", e);
                    FileReport::new(path, ReportKind::Failed(e.to_string()))
                }
                Err(e) => {
                    tracing::error!("❌ Stopping run: {}", e);
                    return Err(e);
                }
            };
            println!("{}", report);
            summary.push(report);
        }

        println!("\n{}", summary.summary_line());
        Ok(summary)
    }

    pub fn patch_file(&self, path: &Path) -> Result<FileReport> {
        if !self.store.exists(path) {
            tracing::debug!("{} does not exist, skipping", path.display());
            return Ok(FileReport::new(path, ReportKind::NotFound));
        }

        let original = self.store.read_text(path)?;
        let patched = self.transform(&original);

        if patched == original {
            return Ok(FileReport::new(path, ReportKind::NoChange));
        }

        if self.options.dry_run {
            return Ok(FileReport::new(path, ReportKind::WouldFix));
        }

        self.store.write_text(path, &patched)?;
        tracing::debug!("Wrote {} ({} bytes)", path.display(), patched.len());
        Ok(FileReport::new(path, ReportKind::Fixed))
    }

    pub fn transform(&self, original: &str) -> String {
        apply_all(&self.rewrites, original)
    }
}
