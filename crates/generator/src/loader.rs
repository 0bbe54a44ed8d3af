//! File-based module loader.
//!
//! Sources are staged into the run's scratch directory (page lists normalised
//! to a JSON module, templates copied as-is) and the template or page list is
//! then loaded back from the staged file. Only the staged form is ever used.

use crate::components::{BUILTIN_DEFAULT, DefaultPageTemplate};
use crate::template::HandlebarsTemplate;
use metamap_core::{Error, ModuleLoader, PageMetaData, PageTemplate, Result, Storage};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A compiled page-metadata module; `pages` is its only export.
#[derive(Debug, Serialize, Deserialize)]
struct PagesModule {
    pages: Vec<PageMetaData>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonPages {
    List(Vec<PageMetaData>),
    Module(PagesModule),
}

#[derive(Debug, Default, Clone, Copy)]
pub struct FsModuleLoader;

impl ModuleLoader for FsModuleLoader {
    fn load_template(
        &self,
        source: &Path,
        scratch_dir: &Path,
        storage: &dyn Storage,
    ) -> Result<Box<dyn PageTemplate>> {
        if source == Path::new(BUILTIN_DEFAULT) {
            log::debug!("Using built-in page template");
            return Ok(Box::new(DefaultPageTemplate));
        }

        match extension(source).as_deref() {
            Some("html") | Some("htm") | Some("hbs") => {}
            _ => {
                return Err(load_error(
                    source,
                    format!(
                        "unsupported template type, expected an .html/.hbs file or '{}'",
                        BUILTIN_DEFAULT
                    ),
                ));
            }
        }

        let text = read_source(source, storage)?;
        let staged = stage(storage, scratch_dir, source, "template.hbs", &text)?;

        let staged_text = storage.read_to_string(&staged)?;
        let name = staged.to_string_lossy();
        let template = HandlebarsTemplate::compile(&name, &staged_text)
            .map_err(|e| load_error(source, e.to_string()))?;
        log::debug!("Compiled template {} as {}", source.display(), template.name());
        Ok(Box::new(template))
    }

    fn load_pages(
        &self,
        source: &Path,
        scratch_dir: &Path,
        storage: &dyn Storage,
    ) -> Result<Vec<PageMetaData>> {
        let text = read_source(source, storage)?;
        let pages = match extension(source).as_deref() {
            Some("toml") => {
                toml::from_str::<PagesModule>(&text)
                    .map_err(|e| load_error(source, e.to_string()))?
                    .pages
            }
            Some("json") => match serde_json::from_str::<JsonPages>(&text)
                .map_err(|e| load_error(source, format!("expected a pages array or an object with a \"pages\" array: {}", e)))?
            {
                JsonPages::List(pages) => pages,
                JsonPages::Module(module) => module.pages,
            },
            _ => {
                return Err(load_error(
                    source,
                    "unsupported page metadata type, expected a .toml or .json file",
                ));
            }
        };

        let json = serde_json::to_string(&PagesModule { pages })
            .map_err(|e| load_error(source, e.to_string()))?;
        let staged = stage(storage, scratch_dir, source, "pages.json", &json)?;
        let module: PagesModule = serde_json::from_str(&storage.read_to_string(&staged)?)
            .map_err(|e| load_error(source, e.to_string()))?;
        log::debug!("Loaded {} pages from {}", module.pages.len(), source.display());
        Ok(module.pages)
    }
}

fn extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_lowercase)
}

fn load_error(source: &Path, message: impl Into<String>) -> Error {
    Error::ModuleLoad {
        source_path: source.to_path_buf(),
        message: message.into(),
    }
}

fn read_source(source: &Path, storage: &dyn Storage) -> Result<String> {
    storage
        .read_to_string(source)
        .map_err(|e| load_error(source, e.to_string()))
}

/// Write a staged module to `<scratch>/<stem>.<suffix>`
fn stage(
    storage: &dyn Storage,
    scratch_dir: &Path,
    source: &Path,
    suffix: &str,
    content: &str,
) -> Result<PathBuf> {
    let stem = source
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| load_error(source, "source path has no file name"))?;
    let staged = scratch_dir.join(format!("{}.{}", stem, suffix));

    storage.ensure_dir(scratch_dir)?;
    storage.write_file(&staged, content)?;
    Ok(staged)
}
