pub mod build;
pub mod chunks;
pub mod validate;

use anyhow::{Context, Result};
use clap::Args;
use metamap_core::{EntryChunkData, OutputBundle, ProjectConfig, parse_project_toml, reduce_entry_chunks};
use std::path::{Path, PathBuf};

/// Project inputs shared by `build` and `validate`; flags override metamap.toml
#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    /// Path to metamap.toml
    #[arg(short, long, default_value = "metamap.toml")]
    pub config: PathBuf,

    /// JSON dump of the bundler's output bundle
    #[arg(long)]
    pub bundle: Option<PathBuf>,

    /// Output directory for generated pages
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Public base path prepended to asset urls
    #[arg(long)]
    pub base: Option<String>,

    /// Page template (.html file or builtin:default)
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// Page metadata list (.toml or .json)
    #[arg(long)]
    pub pages: Option<PathBuf>,
}

impl ProjectArgs {
    /// Load metamap.toml when present and apply command-line overrides
    pub fn resolve(&self) -> Result<ProjectConfig> {
        let file_config = if self.config.exists() {
            parse_project_toml(&self.config)
                .with_context(|| format!("Failed to parse {}", self.config.display()))?
        } else {
            log::debug!("{} not found, using flags only", self.config.display());
            ProjectConfig::default()
        };

        Ok(file_config.merge(ProjectConfig {
            out_dir: self.out_dir.clone(),
            base: self.base.clone(),
            bundle: self.bundle.clone(),
            page_template: self.template.clone(),
            page_meta_map: self.pages.clone(),
        }))
    }
}

pub fn load_entry_chunks(bundle: &Path) -> Result<Vec<EntryChunkData>> {
    let bundle = OutputBundle::from_path(bundle)
        .with_context(|| format!("Failed to read bundle description {}", bundle.display()))?;
    Ok(reduce_entry_chunks(&bundle))
}
