use std::fmt;
use std::path::PathBuf;

/// Outcome of patching a single file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReportKind {
    NotFound,
    Fixed,
    NoChange,
    /// Dry run: the file would have been rewritten.
    WouldFix,
    /// Keep-going mode: a read or write failed and the file was skipped.
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    pub path: PathBuf,
    pub kind: ReportKind,
}

impl FileReport {
    pub fn new(path: impl Into<PathBuf>, kind: ReportKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }
}

impl fmt::Display for FileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = self.path.display();
        match &self.kind {
            ReportKind::NotFound => write!(f, "⚠️  File not found: {}", path),
            ReportKind::Fixed => write!(f, "✅ Fixed: {}", path),
            ReportKind::NoChange => write!(f, "ℹ️  No changes needed: {}", path),
            ReportKind::WouldFix => write!(f, "🔍 Would fix: {}", path),
            ReportKind::Failed(reason) => write!(f, "❌ Error processing {}: {}", path, reason),
        }
    }
}

/// Reports of one run, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub reports: Vec<FileReport>,
}

impl RunSummary {
    pub fn push(&mut self, report: FileReport) {
        self.reports.push(report);
    }

    pub fn fixed(&self) -> usize {
        self.count(|k| matches!(k, ReportKind::Fixed))
    }

    pub fn unchanged(&self) -> usize {
        self.count(|k| matches!(k, ReportKind::NoChange))
    }

    pub fn not_found(&self) -> usize {
        self.count(|k| matches!(k, ReportKind::NotFound))
    }

    pub fn would_fix(&self) -> usize {
        self.count(|k| matches!(k, ReportKind::WouldFix))
    }

    pub fn failed(&self) -> usize {
        self.count(|k| matches!(k, ReportKind::Failed(_)))
    }

    pub fn kind_of(&self, path: &std::path::Path) -> Option<&ReportKind> {
        self.reports
            .iter()
            .find(|r| r.path == path)
            .map(|r| &r.kind)
    }

    fn count(&self, pred: impl Fn(&ReportKind) -> bool) -> usize {
        self.reports.iter().filter(|r| pred(&r.kind)).count()
    }

    pub fn summary_line(&self) -> String {
        let mut line = format!(
            "✨ Done! {} fixed, {} unchanged, {} not found",
            self.fixed(),
            self.unchanged(),
            self.not_found()
        );
        if self.would_fix() > 0 {
            line.push_str(&format!(", {} would fix", self.would_fix()));
        }
        if self.failed() > 0 {
            line.push_str(&format!(", {} failed", self.failed()));
        }
        line
    }
}
