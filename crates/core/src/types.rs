use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Field naming the page's output-relative html path.
pub const URL_FIELD: &str = "url";
/// Field naming the bundle entry point whose assets the page receives.
pub const ENTRY_POINT_FIELD: &str = "bundleEntryPoint";

/// Metadata for one output page.
///
/// The field set is open and owned by the caller: besides `url` and
/// `bundleEntryPoint` any field (title, description, Open Graph data...) is
/// passed through to the template as props. Required fields are checked after
/// render, so a record missing them is still representable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PageMetaData(Map<String, Value>);

impl PageMetaData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field setter
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// String value of a field, `None` when absent or not a string
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn url(&self) -> Option<&Value> {
        self.0.get(URL_FIELD)
    }

    pub fn bundle_entry_point(&self) -> Option<&Value> {
        self.0.get(ENTRY_POINT_FIELD)
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.0
    }
}

impl From<Map<String, Value>> for PageMetaData {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

/// One entry chunk emitted by the bundler, reduced to what page assembly needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryChunkData {
    /// Emitted path of the chunk itself
    pub file_name: String,
    /// Other emitted chunks this one depends on, preloaded in this order
    pub imports: Vec<String>,
    /// Source module paths folded into the chunk; only used for matching
    pub modules: Vec<String>,
    /// Stylesheets pulled in transitively, linked in this order
    pub css: Vec<String>,
}

/// The bundler's description of everything it emitted, keyed by file name.
///
/// Entries keep the order they were recorded in.
#[derive(Debug, Clone, Default)]
pub struct OutputBundle {
    entries: Vec<(String, OutputAsset)>,
}

impl OutputBundle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, file_name: impl Into<String>, asset: OutputAsset) {
        self.entries.push((file_name.into(), asset));
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &OutputAsset)> {
        self.entries.iter().map(|(name, asset)| (name.as_str(), asset))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Parse the JSON dump of an output bundle (an object keyed by file name)
    pub fn from_json_str(content: &str) -> Result<Self> {
        let raw: Map<String, Value> =
            serde_json::from_str(content).map_err(|e| Error::ManifestParse(e.to_string()))?;

        let mut bundle = Self::new();
        for (file_name, descriptor) in raw {
            let asset: OutputAsset = serde_json::from_value(descriptor)
                .map_err(|e| Error::ManifestParse(format!("{}: {}", file_name, e)))?;
            bundle.insert(file_name, asset);
        }
        Ok(bundle)
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json_str(&content)
    }
}

/// A single emitted file, discriminated by its `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OutputAsset {
    Chunk(OutputChunk),
    /// Anything that is not a chunk (static assets, stylesheets, sourcemaps)
    #[serde(other)]
    Asset,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputChunk {
    pub file_name: String,
    #[serde(default)]
    pub is_entry: bool,
    #[serde(default)]
    pub imports: Vec<String>,
    /// Keyed by source module path; the values are rendering stats we ignore
    #[serde(default)]
    pub modules: Map<String, Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vite_metadata: Option<ChunkMetadata>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChunkMetadata {
    #[serde(default)]
    pub imported_css: Vec<String>,
}

/// Caller-supplied inputs of a generation run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    pub out_dir: PathBuf,
    /// URL prefix prepended to every emitted asset reference
    pub base: String,
    pub page_template: PathBuf,
    pub page_meta_map: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_metadata_accessors() {
        let page = PageMetaData::new()
            .with("url", "index.html")
            .with("bundleEntryPoint", "/src/main.tsx")
            .with("views", 3);

        assert_eq!(page.get_str("url"), Some("index.html"));
        assert_eq!(page.bundle_entry_point(), Some(&Value::from("/src/main.tsx")));
        assert_eq!(page.get_str("views"), None);
        assert!(page.contains("views"));
        assert!(!page.contains("title"));
    }

    #[test]
    fn test_page_metadata_keeps_field_order() {
        let page: PageMetaData =
            serde_json::from_str(r#"{"title":"A","url":"a.html","bundleEntryPoint":"/a.ts"}"#)
                .unwrap();
        let keys: Vec<&str> = page.fields().keys().map(String::as_str).collect();
        assert_eq!(keys, ["title", "url", "bundleEntryPoint"]);
    }

    #[test]
    fn test_parse_bundle_preserves_order_and_kinds() {
        let json = r#"{
            "assets/vendor-1.js": {"type": "chunk", "fileName": "assets/vendor-1.js", "isEntry": false, "imports": [], "modules": {}},
            "assets/logo.svg": {"type": "asset", "fileName": "assets/logo.svg"},
            "assets/index-X.js": {
                "type": "chunk",
                "fileName": "assets/index-X.js",
                "isEntry": true,
                "imports": ["assets/vendor-1.js"],
                "modules": {"/src/main.tsx": {"renderedLength": 10}},
                "viteMetadata": {"importedCss": ["assets/index-Y.css"], "importedAssets": []}
            }
        }"#;

        let bundle = OutputBundle::from_json_str(json).unwrap();
        let names: Vec<&str> = bundle.iter().map(|(name, _)| name).collect();
        assert_eq!(
            names,
            ["assets/vendor-1.js", "assets/logo.svg", "assets/index-X.js"]
        );

        assert_eq!(bundle.iter().nth(1).unwrap().1, &OutputAsset::Asset);
        match bundle.iter().nth(2).unwrap().1 {
            OutputAsset::Chunk(chunk) => {
                assert!(chunk.is_entry);
                assert_eq!(chunk.imports, vec!["assets/vendor-1.js"]);
                assert!(chunk.modules.contains_key("/src/main.tsx"));
                assert_eq!(
                    chunk.vite_metadata.as_ref().unwrap().imported_css,
                    vec!["assets/index-Y.css"]
                );
            }
            other => panic!("expected chunk, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_bundle_rejects_missing_type() {
        let json = r#"{"assets/a.js": {"fileName": "assets/a.js"}}"#;
        let err = OutputBundle::from_json_str(json).unwrap_err();
        assert!(matches!(err, Error::ManifestParse(_)));
        assert!(err.to_string().contains("assets/a.js"));
    }

    #[test]
    fn test_parse_bundle_rejects_non_object() {
        assert!(OutputBundle::from_json_str("[1, 2]").is_err());
    }
}
