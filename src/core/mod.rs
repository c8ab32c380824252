pub mod discover;
pub mod patcher;
pub mod rewrite;

pub use crate::domain::model::{FileReport, ReportKind, RunSummary};
pub use crate::domain::ports::{FileStore, Rewrite};
pub use crate::utils::error::Result;
