use crate::error::{Error, Result};
use crate::types::GenerateOptions;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Raw TOML configuration structure
/// This matches the metamap.toml file structure exactly
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawConfig {
    #[serde(default)]
    build: RawBuild,
    #[serde(default)]
    sources: RawSources,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawBuild {
    out_dir: Option<String>,
    base: Option<String>,
    bundle: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawSources {
    page_template: Option<String>,
    page_meta_map: Option<String>,
}

/// Project configuration, possibly partial until merged with CLI flags.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectConfig {
    pub out_dir: Option<PathBuf>,
    pub base: Option<String>,
    /// JSON dump of the bundler's output bundle
    pub bundle: Option<PathBuf>,
    pub page_template: Option<PathBuf>,
    pub page_meta_map: Option<PathBuf>,
}

impl ProjectConfig {
    /// Fill every field from `overrides` that it sets
    pub fn merge(self, overrides: ProjectConfig) -> ProjectConfig {
        ProjectConfig {
            out_dir: overrides.out_dir.or(self.out_dir),
            base: overrides.base.or(self.base),
            bundle: overrides.bundle.or(self.bundle),
            page_template: overrides.page_template.or(self.page_template),
            page_meta_map: overrides.page_meta_map.or(self.page_meta_map),
        }
    }

    pub fn bundle_path(&self) -> Result<&Path> {
        self.bundle.as_deref().ok_or_else(|| missing("build.bundle"))
    }

    /// Check that every generation input is present
    pub fn generate_options(&self) -> Result<GenerateOptions> {
        Ok(GenerateOptions {
            out_dir: self.out_dir.clone().ok_or_else(|| missing("build.out_dir"))?,
            base: self.base.clone().ok_or_else(|| missing("build.base"))?,
            page_template: self
                .page_template
                .clone()
                .ok_or_else(|| missing("sources.page_template"))?,
            page_meta_map: self
                .page_meta_map
                .clone()
                .ok_or_else(|| missing("sources.page_meta_map"))?,
        })
    }
}

fn missing(field: &str) -> Error {
    Error::ConfigParse(format!(
        "'{}' is not set in metamap.toml or on the command line",
        field
    ))
}

/// Parse metamap.toml from a file path
///
/// Relative paths in the file resolve against the file's own directory.
pub fn parse_project_toml<P: AsRef<Path>>(path: P) -> Result<ProjectConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let root = path.parent().unwrap_or_else(|| Path::new(""));
    parse_project_toml_str(&content, root)
}

/// Parse metamap.toml from a string (useful for testing)
pub fn parse_project_toml_str(content: &str, root: &Path) -> Result<ProjectConfig> {
    let raw: RawConfig = toml::from_str(content)?;

    Ok(ProjectConfig {
        out_dir: resolve_path(raw.build.out_dir, root, "build.out_dir")?,
        base: raw.build.base,
        bundle: resolve_path(raw.build.bundle, root, "build.bundle")?,
        page_template: resolve_path(raw.sources.page_template, root, "sources.page_template")?,
        page_meta_map: resolve_path(raw.sources.page_meta_map, root, "sources.page_meta_map")?,
    })
}

/// Resolve a configured path against the config file's directory.
///
/// Absolute paths are kept as written. The built-in template specifier
/// (`builtin:...`) is not a path and passes through untouched.
fn resolve_path(value: Option<String>, root: &Path, field_name: &str) -> Result<Option<PathBuf>> {
    let Some(value) = value else {
        return Ok(None);
    };

    if value.trim().is_empty() {
        return Err(Error::ConfigParse(format!(
            "Empty path in '{}' field",
            field_name
        )));
    }

    let path = Path::new(&value);
    if path.is_absolute() || value.starts_with("builtin:") {
        Ok(Some(path.to_path_buf()))
    } else {
        Ok(Some(root.join(path)))
    }
}
