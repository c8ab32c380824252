use super::toml_config::{DiscoverConfig, PatchProfile};
use crate::core::discover::discover_files;
use crate::utils::error::Result;
use crate::utils::validation::{validate_path, Validate};
use clap::Parser;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Parser)]
#[command(name = "async-params-fix")]
#[command(about = "Rewrite route handlers so their params object is awaited")]
pub struct CliConfig {
    /// Files to patch, relative to --root (overrides the profile's list)
    pub files: Vec<String>,

    /// Path to a TOML patch profile
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory that file paths are resolved against
    #[arg(long, default_value = ".")]
    pub root: String,

    /// Scan this directory (under --root) for route files instead of using a list
    #[arg(long)]
    pub discover: Option<String>,

    /// Show which files would change without writing them
    #[arg(long)]
    pub dry_run: bool,

    /// Report read/write failures per file and continue
    #[arg(long)]
    pub keep_going: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl CliConfig {
    pub fn load_profile(&self) -> Result<PatchProfile> {
        match &self.config {
            Some(path) => PatchProfile::from_file(path),
            None => Ok(PatchProfile::default()),
        }
    }

    /// Explicit files, then --discover, then the profile's discovery
    /// section, then the profile's file list.
    pub fn resolve_files(&self, profile: &PatchProfile) -> Result<Vec<PathBuf>> {
        if !self.files.is_empty() {
            return Ok(self.files.iter().map(PathBuf::from).collect());
        }

        let root = Path::new(&self.root);
        if let Some(dir) = &self.discover {
            let config = DiscoverConfig {
                dir: dir.clone(),
                ..profile.migration.discover.clone().unwrap_or_default()
            };
            return discover_files(root, &config);
        }

        if let Some(config) = &profile.migration.discover {
            return discover_files(root, config);
        }

        Ok(profile.migration.files.iter().map(PathBuf::from).collect())
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("root", &self.root)?;
        for file in &self.files {
            validate_path("files", file)?;
        }
        if let Some(dir) = &self.discover {
            validate_path("discover", dir)?;
        }
        Ok(())
    }
}
