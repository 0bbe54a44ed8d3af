use std::path::PathBuf;
use thiserror::Error;

/// Every failure a generation run can surface.
///
/// All variants except `CleanupFailure` abort the run. Cleanup failures are
/// reported alongside an otherwise successful result.
#[derive(Debug, Error)]
pub enum Error {
    #[error(
        "The page template rendered {page} without an element carrying ' id=\"root\"'. Ensure the template renders an element with id=\"root\"."
    )]
    MissingRootAnchor { page: String },

    #[error("Page metadata for {page} does not contain the required \"{field}\" field")]
    MissingRequiredField { field: &'static str, page: String },

    #[error("Invalid \"{field}\" in page metadata for {page}: {reason}")]
    InvalidField {
        field: &'static str,
        page: String,
        reason: String,
    },

    #[error(
        "\"bundleEntryPoint\" '{entry_point}' set for {page} could not be found in the bundle as an entry point. Ensure it names an existing bundle entry file (ie: \"/src/main.tsx\")."
    )]
    NoMatchingEntryChunk { entry_point: String, page: String },

    #[error("Rendered markup for {page} has no closing </head> tag to inject assets before")]
    MissingHeadClose { page: String },

    #[error("Failed to delete directory {}: {message}", path.display())]
    CleanupFailure { path: PathBuf, message: String },

    #[error("Failed to load module '{}': {message}", source_path.display())]
    ModuleLoad {
        source_path: PathBuf,
        message: String,
    },

    #[error("Failed to render page template: {0}")]
    TemplateRender(String),

    #[error("Manifest parse error: {0}")]
    ManifestParse(String),

    #[error("Configuration parse error: {0}")]
    ConfigParse(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::ConfigParse(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
