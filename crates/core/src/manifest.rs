//! Reduces the bundler's output description to the entry chunks pages load.

use crate::types::{EntryChunkData, OutputAsset, OutputBundle};

/// Collect one `EntryChunkData` per entry chunk, in bundle order.
///
/// Non-chunk assets and shared (non-entry) chunks are skipped. A chunk
/// without CSS metadata yields an empty `css` list.
pub fn reduce_entry_chunks(bundle: &OutputBundle) -> Vec<EntryChunkData> {
    let chunks: Vec<EntryChunkData> = bundle
        .iter()
        .filter_map(|(_, asset)| match asset {
            OutputAsset::Chunk(chunk) if chunk.is_entry => Some(chunk),
            _ => None,
        })
        .map(|chunk| EntryChunkData {
            file_name: chunk.file_name.clone(),
            imports: chunk.imports.clone(),
            modules: chunk.modules.keys().cloned().collect(),
            css: chunk
                .vite_metadata
                .as_ref()
                .map(|meta| meta.imported_css.clone())
                .unwrap_or_default(),
        })
        .collect();

    log::debug!(
        "Reduced {} bundle entries to {} entry chunks",
        bundle.len(),
        chunks.len()
    );
    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ChunkMetadata, OutputChunk};
    use serde_json::{Map, Value};

    fn chunk(file_name: &str, is_entry: bool, modules: &[&str]) -> OutputAsset {
        let modules: Map<String, Value> = modules
            .iter()
            .map(|m| (m.to_string(), Value::Object(Map::new())))
            .collect();
        OutputAsset::Chunk(OutputChunk {
            file_name: file_name.to_string(),
            is_entry,
            imports: vec![],
            modules,
            vite_metadata: None,
        })
    }

    #[test]
    fn test_keeps_only_entry_chunks_in_order() {
        let mut bundle = OutputBundle::new();
        bundle.insert("b.js", chunk("b.js", true, &["/src/b.ts"]));
        bundle.insert("shared.js", chunk("shared.js", false, &["/src/shared.ts"]));
        bundle.insert("style.css", OutputAsset::Asset);
        bundle.insert("a.js", chunk("a.js", true, &["/src/a.ts", "/src/util.ts"]));

        let chunks = reduce_entry_chunks(&bundle);
        let names: Vec<&str> = chunks.iter().map(|c| c.file_name.as_str()).collect();
        assert_eq!(names, ["b.js", "a.js"]);
        assert_eq!(chunks[1].modules, vec!["/src/a.ts", "/src/util.ts"]);
    }

    #[test]
    fn test_css_defaults_to_empty() {
        let mut bundle = OutputBundle::new();
        bundle.insert("a.js", chunk("a.js", true, &["/src/a.ts"]));
        assert!(reduce_entry_chunks(&bundle)[0].css.is_empty());
    }

    #[test]
    fn test_extracts_imports_and_css() {
        let mut bundle = OutputBundle::new();
        bundle.insert(
            "assets/index-X.js",
            OutputAsset::Chunk(OutputChunk {
                file_name: "assets/index-X.js".to_string(),
                is_entry: true,
                imports: vec!["assets/react-1.js".to_string(), "assets/util-2.js".to_string()],
                modules: Map::new(),
                vite_metadata: Some(ChunkMetadata {
                    imported_css: vec!["assets/index-Y.css".to_string()],
                }),
            }),
        );

        let chunks = reduce_entry_chunks(&bundle);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].imports, vec!["assets/react-1.js", "assets/util-2.js"]);
        assert_eq!(chunks[0].css, vec!["assets/index-Y.css"]);
    }

    #[test]
    fn test_empty_bundle() {
        assert!(reduce_entry_chunks(&OutputBundle::new()).is_empty());
    }

    #[test]
    fn test_reduces_parsed_dump() {
        let json = r#"{
            "assets/logo.svg": {"type": "asset"},
            "assets/main.js": {"type": "chunk", "fileName": "assets/main.js", "isEntry": true,
                               "imports": [], "modules": {"C:\\app\\src\\main.tsx": {}}}
        }"#;
        let chunks = reduce_entry_chunks(&OutputBundle::from_json_str(json).unwrap());
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].modules, vec!["C:\\app\\src\\main.tsx"]);
    }
}
