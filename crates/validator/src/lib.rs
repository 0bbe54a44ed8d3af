// Structural contracts every page has to satisfy before it is written

use metamap_core::{Error, PageMetaData, Result};
use serde_json::Value;
use std::path::{Component, Path};

/// The DOM anchor the client bundle mounts into.
pub const ROOT_ANCHOR: &str = " id=\"root\"";

/// Label identifying a page in diagnostics: its url when it has one,
/// otherwise its 1-based position in the page list.
pub fn page_label(index: usize, page: &PageMetaData) -> String {
    match page.url().and_then(Value::as_str) {
        Some(url) => format!("\"{}\"", url),
        None => format!("page #{}", index + 1),
    }
}

pub fn check_root_anchor(html: &str, page: &str) -> Result<()> {
    if html.contains(ROOT_ANCHOR) {
        Ok(())
    } else {
        Err(Error::MissingRootAnchor {
            page: page.to_string(),
        })
    }
}

/// Fetch a required string field.
pub fn required_str<'a>(
    meta: &'a PageMetaData,
    field: &'static str,
    page: &str,
) -> Result<&'a str> {
    match meta.get(field) {
        None => Err(Error::MissingRequiredField {
            field,
            page: page.to_string(),
        }),
        Some(Value::String(value)) => Ok(value.as_str()),
        Some(other) => Err(Error::InvalidField {
            field,
            page: page.to_string(),
            reason: format!("expected a string, found {}", other),
        }),
    }
}

/// Resolve `url` against the output directory root.
///
/// Leading separators are dropped so `/about.html` lands at
/// `<out_dir>/about.html`. The result must be non-empty and may not climb
/// out of the output directory.
pub fn output_relative_url<'a>(url: &'a str, page: &str) -> Result<&'a str> {
    let invalid = |reason: &str| Error::InvalidField {
        field: metamap_core::types::URL_FIELD,
        page: page.to_string(),
        reason: format!("{} ('{}')", reason, url),
    };

    let relative = url.trim_start_matches(['/', '\\']);
    if relative.trim().is_empty() {
        return Err(invalid("empty path"));
    }

    if Path::new(relative)
        .components()
        .any(|component| matches!(component, Component::ParentDir | Component::Prefix(_)))
        || relative.split(['/', '\\']).any(|part| part == "..")
    {
        return Err(invalid("parent directory references (..) are not allowed"));
    }

    Ok(relative)
}

/// Outcome of a dry run over every page.
#[derive(Debug, Default)]
pub struct ValidationReport {
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub info: Vec<String>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_ok(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.errors.push(message.into());
    }

    pub fn warn(&mut self, message: impl Into<String>) {
        self.warnings.push(message.into());
    }

    pub fn note(&mut self, message: impl Into<String>) {
        self.info.push(message.into());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_label() {
        let page = PageMetaData::new().with("url", "about/index.html");
        assert_eq!(page_label(0, &page), "\"about/index.html\"");
        assert_eq!(page_label(2, &PageMetaData::new()), "page #3");
        assert_eq!(page_label(0, &PageMetaData::new().with("url", 7)), "page #1");
    }

    #[test]
    fn test_root_anchor() {
        assert!(check_root_anchor(r#"<body><div id="root"></div></body>"#, "p").is_ok());
        let err = check_root_anchor(r#"<body><div id="app"></div></body>"#, "\"index.html\"")
            .unwrap_err();
        assert!(matches!(err, Error::MissingRootAnchor { .. }));
        assert!(err.to_string().contains("\"index.html\""));
    }

    #[test]
    fn test_root_anchor_needs_attribute_form() {
        // Bare text mentioning the id is not an element attribute
        assert!(check_root_anchor("<p>id=\"root\"</p>", "p").is_err());
    }

    #[test]
    fn test_required_str() {
        let page = PageMetaData::new().with("url", "index.html").with("bundleEntryPoint", 3);

        assert_eq!(required_str(&page, "url", "p").unwrap(), "index.html");

        let err = required_str(&page, "title", "p").unwrap_err();
        assert!(matches!(err, Error::MissingRequiredField { field: "title", .. }));

        let err = required_str(&page, "bundleEntryPoint", "p").unwrap_err();
        assert!(matches!(err, Error::InvalidField { field: "bundleEntryPoint", .. }));
        assert!(err.to_string().contains("expected a string"));
    }

    #[test]
    fn test_output_relative_url() {
        assert_eq!(output_relative_url("index.html", "p").unwrap(), "index.html");
        assert_eq!(
            output_relative_url("blog/post/index.html", "p").unwrap(),
            "blog/post/index.html"
        );
        assert_eq!(output_relative_url("./about.html", "p").unwrap(), "./about.html");
        assert_eq!(output_relative_url("/about.html", "p").unwrap(), "about.html");
        assert_eq!(output_relative_url("\\blog\\a.html", "p").unwrap(), "blog\\a.html");

        for bad in ["", "  ", "/", "../index.html", "blog/../../x.html", "/..\\x.html"] {
            let err = output_relative_url(bad, "p").unwrap_err();
            assert!(matches!(err, Error::InvalidField { field: "url", .. }), "{}", bad);
        }
    }

    #[test]
    fn test_report() {
        let mut report = ValidationReport::new();
        report.note("2 pages");
        report.warn("fan-out");
        assert!(report.is_ok());
        report.error("boom");
        assert!(!report.is_ok());
    }
}
