use crate::core::rewrite::{HandlerRewrite, SignatureRewrite};
use crate::domain::ports::Rewrite;
use crate::utils::error::{PatchError, Result};
use crate::utils::validation::{compile_pattern, validate_non_empty_string, validate_path, Validate};
use regex::Regex;
use serde::Deserialize;
use std::path::Path;

/// Route files touched by the Next.js 15 async params migration.
pub const DEFAULT_FILES: &[&str] = &[
    "app/api/attempts/[id]/anti-cheat-event/route.ts",
    "app/api/attempts/[id]/resume/route.ts",
    "app/api/attempts/[id]/route.ts",
    "app/api/attempts/[id]/submit/route.ts",
    "app/api/competencies/[id]/route.ts",
    "app/api/education-levels/[id]/route.ts",
    "app/api/exams/[id]/archive/route.ts",
    "app/api/exams/[id]/publish/route.ts",
    "app/api/exams/[id]/submit-validation/route.ts",
    "app/api/exams/[id]/validate/route.ts",
    "app/api/fields/[id]/route.ts",
    "app/api/learning-units/[id]/route.ts",
    "app/api/subjects/[id]/route.ts",
];

/// A migration: which files to patch and the two substitutions to run.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PatchProfile {
    #[serde(default)]
    pub migration: MigrationConfig,
    #[serde(default)]
    pub signature: SignatureConfig,
    #[serde(default)]
    pub handler: HandlerConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MigrationConfig {
    pub name: String,
    pub description: Option<String>,
    pub files: Vec<String>,
    pub discover: Option<DiscoverConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DiscoverConfig {
    pub dir: String,
    pub file_name: String,
    pub exclude: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SignatureConfig {
    pub pattern: String,
    pub replacement: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct HandlerConfig {
    pub span: String,
    pub accessor: String,
    pub awaited_marker: String,
    pub anchor: String,
    pub injection: String,
    pub replacement: String,
}

impl Default for MigrationConfig {
    fn default() -> Self {
        Self {
            name: "nextjs15-async-params".to_string(),
            description: Some("Make route handler params a Promise (Next.js 15)".to_string()),
            files: DEFAULT_FILES.iter().map(|f| f.to_string()).collect(),
            discover: None,
        }
    }
}

impl Default for DiscoverConfig {
    fn default() -> Self {
        Self {
            dir: "app/api".to_string(),
            file_name: "route.ts".to_string(),
            exclude: vec!["node_modules".to_string(), ".next".to_string()],
        }
    }
}

impl Default for SignatureConfig {
    fn default() -> Self {
        Self {
            pattern: r"\{ params \}: \{ params: \{ id: string \} \}".to_string(),
            replacement: "{ params }: { params: Promise<{ id: string }> }".to_string(),
        }
    }
}

impl Default for HandlerConfig {
    fn default() -> Self {
        Self {
            span: r"(?m)export async function (GET|POST|PUT|DELETE|PATCH)\([^)]+\) \{[\s\S]*?^\}"
                .to_string(),
            accessor: "params.id".to_string(),
            awaited_marker: "await params".to_string(),
            anchor: r"try \{\s+".to_string(),
            injection: "const { id } = await params\n        ".to_string(),
            replacement: "id".to_string(),
        }
    }
}

impl MigrationConfig {
    /// Replaces environment variables (e.g. ${PROJECT_ROOT}); unknown ones stay as written.
    fn substitute_env_vars(&mut self, re: &Regex) {
        let expand = |value: &mut String| {
            let expanded = re
                .replace_all(value.as_str(), |caps: &regex::Captures| {
                    let var_name = &caps[1];
                    std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
                })
                .into_owned();
            *value = expanded;
        };

        expand(&mut self.name);
        self.description.iter_mut().for_each(expand);
        self.files.iter_mut().for_each(expand);
        if let Some(discover) = &mut self.discover {
            expand(&mut discover.dir);
            expand(&mut discover.file_name);
            discover.exclude.iter_mut().for_each(expand);
        }
    }
}

impl SignatureConfig {
    pub fn build(&self) -> Result<SignatureRewrite> {
        let pattern = compile_pattern("signature.pattern", &self.pattern)?;
        Ok(SignatureRewrite::new(pattern, self.replacement.clone()))
    }
}

impl HandlerConfig {
    pub fn build(&self) -> Result<HandlerRewrite> {
        validate_non_empty_string("handler.accessor", &self.accessor)?;
        validate_non_empty_string("handler.awaited_marker", &self.awaited_marker)?;
        validate_non_empty_string("handler.replacement", &self.replacement)?;

        Ok(HandlerRewrite {
            span: compile_pattern("handler.span", &self.span)?,
            accessor: self.accessor.clone(),
            awaited_marker: self.awaited_marker.clone(),
            anchor: compile_pattern("handler.anchor", &self.anchor)?,
            injection: self.injection.clone(),
            replacement: self.replacement.clone(),
        })
    }
}

impl PatchProfile {
    /// Loads a profile from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(|source| PatchError::ReadError {
            path: path.as_ref().to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a profile. `${VAR}` references are expanded in the
    /// `[migration]` section only; in `[signature]` and `[handler]` they are
    /// regex replacement syntax and stay verbatim.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let mut profile: Self = toml::from_str(content).map_err(|e| PatchError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })?;

        let re = compile_pattern("env_substitution", r"\$\{([A-Za-z_][A-Za-z0-9_]*)\}")?;
        profile.migration.substitute_env_vars(&re);
        Ok(profile)
    }

    /// The signature pass followed by the handler pass.
    pub fn build_rewrites(&self) -> Result<Vec<Box<dyn Rewrite>>> {
        Ok(vec![
            Box::new(self.signature.build()?),
            Box::new(self.handler.build()?),
        ])
    }
}

impl Validate for PatchProfile {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("migration.name", &self.migration.name)?;

        for file in &self.migration.files {
            validate_path("migration.files", file)?;
        }

        if let Some(discover) = &self.migration.discover {
            validate_path("migration.discover.dir", &discover.dir)?;
            validate_non_empty_string("migration.discover.file_name", &discover.file_name)?;
        }

        self.build_rewrites().map(|_| ())
    }
}
