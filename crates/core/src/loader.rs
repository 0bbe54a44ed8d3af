//! Module loader capability.
//!
//! Page templates and page metadata are authored as source files that need a
//! compile step before they can be used at generation time. A `ModuleLoader`
//! hides that step: it turns a source path into a renderable template or a
//! page list, staging whatever it compiles inside the run's scratch directory.

use crate::error::Result;
use crate::storage::Storage;
use crate::types::PageMetaData;
use std::path::Path;

/// Renders one page's markup from its metadata.
pub trait PageTemplate {
    fn render(&self, props: &PageMetaData) -> Result<String>;
}

/// Adapts a plain function into a `PageTemplate`.
pub struct FnTemplate<F>(pub F);

impl<F> PageTemplate for FnTemplate<F>
where
    F: Fn(&PageMetaData) -> String,
{
    fn render(&self, props: &PageMetaData) -> Result<String> {
        Ok((self.0)(props))
    }
}

pub trait ModuleLoader {
    /// Load the template exported by `source`.
    fn load_template(
        &self,
        source: &Path,
        scratch_dir: &Path,
        storage: &dyn Storage,
    ) -> Result<Box<dyn PageTemplate>>;

    /// Load the `pages` list exported by `source`.
    fn load_pages(
        &self,
        source: &Path,
        scratch_dir: &Path,
        storage: &dyn Storage,
    ) -> Result<Vec<PageMetaData>>;
}

/// Loader that hands out an already-built template and page list,
/// ignoring the source paths.
pub struct StaticModuleLoader<F> {
    template: F,
    pages: Vec<PageMetaData>,
}

impl<F> StaticModuleLoader<F>
where
    F: Fn(&PageMetaData) -> String + Clone + 'static,
{
    pub fn new(template: F, pages: Vec<PageMetaData>) -> Self {
        Self { template, pages }
    }
}

impl<F> ModuleLoader for StaticModuleLoader<F>
where
    F: Fn(&PageMetaData) -> String + Clone + 'static,
{
    fn load_template(
        &self,
        _source: &Path,
        _scratch_dir: &Path,
        _storage: &dyn Storage,
    ) -> Result<Box<dyn PageTemplate>> {
        Ok(Box::new(FnTemplate(self.template.clone())))
    }

    fn load_pages(
        &self,
        _source: &Path,
        _scratch_dir: &Path,
        _storage: &dyn Storage,
    ) -> Result<Vec<PageMetaData>> {
        Ok(self.pages.clone())
    }
}
