//! Static page generation over a finished bundle.
//!
//! For every page in the metadata list the template is rendered with the
//! page as props, checked against the structural contracts, matched to its
//! entry chunks and written with the chunks' script, preload and stylesheet
//! tags spliced into `<head>`.

pub mod assets;
pub mod components;
pub mod loader;
pub mod template;

use metamap_core::types::{ENTRY_POINT_FIELD, URL_FIELD};
use metamap_core::{
    EntryChunkData, Error, GenerateOptions, ModuleLoader, PageMetaData, PageTemplate, Result,
    Storage,
};
use metamap_validator::{
    ValidationReport, check_root_anchor, output_relative_url, page_label, required_str,
};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

pub use loader::FsModuleLoader;

/// Every generated document starts with this.
pub const DOCTYPE: &str = "<!DOCTYPE html>";

/// A finished page, ready to be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssembledPage {
    /// Output-relative path, leading separators removed
    pub url: String,
    pub html: String,
    /// Number of entry chunks whose assets were injected
    pub matched_chunks: usize,
}

#[derive(Debug)]
pub struct GenerationReport {
    /// Written files, in page order
    pub pages: Vec<PathBuf>,
    /// Set when the scratch directory could not be removed
    pub cleanup_error: Option<Error>,
}

/// Render and assemble one page.
///
/// Contracts are checked in order: root anchor, `url`, `bundleEntryPoint`,
/// at least one matching entry chunk, a closing head tag.
pub fn assemble_page(
    index: usize,
    page: &PageMetaData,
    template: &dyn PageTemplate,
    chunks: &[EntryChunkData],
    base: &str,
) -> Result<AssembledPage> {
    let label = page_label(index, page);
    let html = template.render(page)?;

    check_root_anchor(&html, &label)?;
    let url = output_relative_url(required_str(page, URL_FIELD, &label)?, &label)?;
    let entry_point = required_str(page, ENTRY_POINT_FIELD, &label)?;

    let matches = assets::matching_chunks(entry_point, chunks);
    if matches.is_empty() {
        return Err(Error::NoMatchingEntryChunk {
            entry_point: entry_point.to_string(),
            page: label,
        });
    }
    log::debug!(
        "{} matched {} entry chunk(s): {}",
        label,
        matches.len(),
        matches
            .iter()
            .map(|c| c.file_name.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    let tags = assets::asset_tags(base, &matches);
    let html = assets::inject_before_head_close(&html, &tags)
        .ok_or(Error::MissingHeadClose { page: label })?;

    Ok(AssembledPage {
        url: url.to_string(),
        html: format!("{}{}", DOCTYPE, html),
        matched_chunks: matches.len(),
    })
}

/// Scratch directory for one run's compiled modules
fn scratch_dir(out_dir: &Path) -> PathBuf {
    out_dir.join(format!(
        "temp-bundle-{}",
        chrono::Utc::now().timestamp_millis()
    ))
}

/// Remove the scratch directory; failures are logged and handed back.
fn cleanup(scratch: &Path, storage: &dyn Storage) -> Option<Error> {
    match storage.remove_dir_all(scratch) {
        Ok(()) => None,
        Err(e) => {
            log::error!("Failed to delete directory {}: {}", scratch.display(), e);
            Some(Error::CleanupFailure {
                path: scratch.to_path_buf(),
                message: e.to_string(),
            })
        }
    }
}

/// Generate one html file per page into `options.out_dir`.
///
/// The first contract violation aborts the run; pages written before it stay
/// on disk. The scratch directory is removed either way.
pub fn generate_html_pages(
    options: &GenerateOptions,
    chunks: &[EntryChunkData],
    loader: &dyn ModuleLoader,
    storage: &dyn Storage,
) -> Result<GenerationReport> {
    storage.ensure_dir(&options.out_dir)?;
    let scratch = scratch_dir(&options.out_dir);

    let result = write_pages(options, chunks, loader, storage, &scratch);
    let cleanup_error = cleanup(&scratch, storage);

    let pages = result?;
    log::info!(
        "Generated {} page(s) into {} ({} storage)",
        pages.len(),
        options.out_dir.display(),
        storage.name()
    );
    Ok(GenerationReport {
        pages,
        cleanup_error,
    })
}

fn write_pages(
    options: &GenerateOptions,
    chunks: &[EntryChunkData],
    loader: &dyn ModuleLoader,
    storage: &dyn Storage,
    scratch: &Path,
) -> Result<Vec<PathBuf>> {
    let template = loader.load_template(&options.page_template, scratch, storage)?;
    let pages = loader.load_pages(&options.page_meta_map, scratch, storage)?;
    log::info!(
        "Assembling {} page(s) against {} entry chunk(s)",
        pages.len(),
        chunks.len()
    );

    let mut written = Vec::with_capacity(pages.len());
    for (index, page) in pages.iter().enumerate() {
        let assembled = assemble_page(index, page, template.as_ref(), chunks, &options.base)?;

        let path = options.out_dir.join(&assembled.url);
        if let Some(parent) = path.parent() {
            storage.ensure_dir(parent)?;
        }
        storage.write_file(&path, &assembled.html)?;
        log::debug!("Wrote {}", path.display());
        written.push(path);
    }
    Ok(written)
}

/// Dry run: assemble every page without writing any, collecting all problems.
///
/// Staged modules go to the system temp directory so `out_dir` is never
/// touched.
pub fn check_pages(
    options: &GenerateOptions,
    chunks: &[EntryChunkData],
    loader: &dyn ModuleLoader,
    storage: &dyn Storage,
) -> ValidationReport {
    let mut report = ValidationReport::new();
    let scratch = std::env::temp_dir().join(format!(
        "metamap-check-{}-{}",
        std::process::id(),
        chrono::Utc::now().timestamp_millis()
    ));

    check_loaded_pages(options, chunks, loader, storage, &scratch, &mut report);
    if let Some(e) = cleanup(&scratch, storage) {
        report.warn(e.to_string());
    }
    report
}

fn check_loaded_pages(
    options: &GenerateOptions,
    chunks: &[EntryChunkData],
    loader: &dyn ModuleLoader,
    storage: &dyn Storage,
    scratch: &Path,
    report: &mut ValidationReport,
) {
    let loaded = loader
        .load_template(&options.page_template, scratch, storage)
        .and_then(|template| {
            let pages = loader.load_pages(&options.page_meta_map, scratch, storage)?;
            Ok((template, pages))
        });
    let (template, pages) = match loaded {
        Ok(loaded) => loaded,
        Err(e) => {
            report.error(e.to_string());
            return;
        }
    };

    report.note(format!(
        "{} page(s), {} entry chunk(s)",
        pages.len(),
        chunks.len()
    ));

    let mut seen: HashMap<&str, usize> = HashMap::new();
    for (index, page) in pages.iter().enumerate() {
        match assemble_page(index, page, template.as_ref(), chunks, &options.base) {
            Ok(assembled) => {
                if assembled.matched_chunks > 1 {
                    report.warn(format!(
                        "{} matches {} entry chunks; assets from all of them are injected",
                        page_label(index, page),
                        assembled.matched_chunks
                    ));
                }
            }
            Err(e) => report.error(e.to_string()),
        }

        if let Some(url) = page.get_str(URL_FIELD).map(|u| u.trim_start_matches(['/', '\\']))
            && let Some(first) = seen.insert(url, index)
        {
            report.warn(format!(
                "pages #{} and #{} both write \"{}\"; the later one wins",
                first + 1,
                index + 1,
                url
            ));
        }
    }
}
