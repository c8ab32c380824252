pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;

pub use crate::adapters::local_store::LocalFileStore;
pub use crate::config::toml_config::PatchProfile;
pub use crate::core::patcher::{PatchOptions, Patcher};
pub use crate::domain::model::{FileReport, ReportKind, RunSummary};
pub use crate::utils::error::{PatchError, Result};
