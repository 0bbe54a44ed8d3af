//! Entry-chunk matching and asset tag injection.

use metamap_core::EntryChunkData;

/// Closing head tag; asset tags go directly in front of it.
pub const HEAD_CLOSE: &str = "</head>";

/// Replace Windows separators so bundler module ids and authored entry
/// points compare equal.
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Every entry chunk containing a module whose path ends with `entry_point`.
///
/// Suffix matching tolerates absolute module ids (`/home/me/app/src/main.tsx`)
/// against authored entry points (`/src/main.tsx`). Matches keep chunk-list
/// order.
pub fn matching_chunks<'a>(
    entry_point: &str,
    chunks: &'a [EntryChunkData],
) -> Vec<&'a EntryChunkData> {
    let entry_point = normalize_separators(entry_point);
    chunks
        .iter()
        .filter(|chunk| {
            chunk
                .modules
                .iter()
                .any(|module| normalize_separators(module).ends_with(&entry_point))
        })
        .collect()
}

/// Script, preload and stylesheet tags for the matched chunks.
///
/// Each chunk contributes its module script, then one modulepreload per
/// import, then one stylesheet per css file.
pub fn asset_tags(base: &str, chunks: &[&EntryChunkData]) -> String {
    let mut tags = String::new();
    for chunk in chunks {
        tags.push_str(&format!(
            r#"<script type="module" crossorigin src="{}{}"></script>"#,
            base, chunk.file_name
        ));
        for import in &chunk.imports {
            tags.push_str(&format!(
                r#"<link rel="modulepreload" crossorigin href="{}{}">"#,
                base, import
            ));
        }
        for css in &chunk.css {
            tags.push_str(&format!(
                r#"<link rel="stylesheet" crossorigin href="{}{}">"#,
                base, css
            ));
        }
    }
    tags
}

/// Splice `tags` in front of the first `</head>`; `None` when there is none.
pub fn inject_before_head_close(html: &str, tags: &str) -> Option<String> {
    let at = html.find(HEAD_CLOSE)?;
    let mut out = String::with_capacity(html.len() + tags.len());
    out.push_str(&html[..at]);
    out.push_str(tags);
    out.push_str(&html[at..]);
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn chunk(file_name: &str, modules: &[&str], imports: &[&str], css: &[&str]) -> EntryChunkData {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        EntryChunkData {
            file_name: file_name.to_string(),
            imports: owned(imports),
            modules: owned(modules),
            css: owned(css),
        }
    }

    #[test]
    fn test_suffix_match_against_absolute_module_ids() {
        let chunks = vec![
            chunk("a.js", &["/home/me/app/src/main.tsx"], &[], &[]),
            chunk("b.js", &["/home/me/app/src/admin.tsx"], &[], &[]),
        ];
        let matched = matching_chunks("/src/main.tsx", &chunks);
        assert_eq!(matched.len(), 1);
        assert_eq!(matched[0].file_name, "a.js");
    }

    #[test]
    fn test_match_normalizes_separators_on_both_sides() {
        let chunks = vec![chunk("a.js", &["C:\\app\\src\\main.tsx"], &[], &[])];
        assert_eq!(matching_chunks("/src/main.tsx", &chunks).len(), 1);
        assert_eq!(matching_chunks("\\src\\main.tsx", &chunks).len(), 1);

        let chunks = vec![chunk("a.js", &["/app/src/main.tsx"], &[], &[])];
        assert_eq!(matching_chunks("src\\main.tsx", &chunks).len(), 1);
    }

    #[test]
    fn test_no_match_when_not_a_suffix() {
        let chunks = vec![chunk("a.js", &["/src/main.tsx"], &[], &[])];
        assert!(matching_chunks("/src/main.ts", &chunks).is_empty());
        assert!(matching_chunks("/app/src/main.tsx", &chunks).is_empty());
    }

    #[test]
    fn test_multiple_matches_keep_chunk_order() {
        let chunks = vec![
            chunk("first.js", &["/src/shared/main.tsx"], &[], &[]),
            chunk("other.js", &["/src/other.tsx"], &[], &[]),
            chunk("second.js", &["/pkg/main.tsx"], &[], &[]),
        ];
        let names: Vec<&str> = matching_chunks("main.tsx", &chunks)
            .iter()
            .map(|c| c.file_name.as_str())
            .collect();
        assert_eq!(names, ["first.js", "second.js"]);
    }

    #[test]
    fn test_asset_tags_order_and_format() {
        let a = chunk(
            "assets/a.js",
            &[],
            &["assets/vendor.js", "assets/util.js"],
            &["assets/a.css", "assets/theme.css"],
        );
        let b = chunk("assets/b.js", &[], &[], &["assets/b.css"]);

        let tags = asset_tags("/base/", &[&a, &b]);
        let expected = concat!(
            r#"<script type="module" crossorigin src="/base/assets/a.js"></script>"#,
            r#"<link rel="modulepreload" crossorigin href="/base/assets/vendor.js">"#,
            r#"<link rel="modulepreload" crossorigin href="/base/assets/util.js">"#,
            r#"<link rel="stylesheet" crossorigin href="/base/assets/a.css">"#,
            r#"<link rel="stylesheet" crossorigin href="/base/assets/theme.css">"#,
            r#"<script type="module" crossorigin src="/base/assets/b.js"></script>"#,
            r#"<link rel="stylesheet" crossorigin href="/base/assets/b.css">"#,
        );
        assert_eq!(tags, expected);
    }

    #[test]
    fn test_inject_before_head_close() {
        let html = "<html><head><title>x</title></head><body></body></html>";
        assert_eq!(
            inject_before_head_close(html, "<TAGS>").unwrap(),
            "<html><head><title>x</title><TAGS></head><body></body></html>"
        );
        assert_eq!(inject_before_head_close(html, "").unwrap(), html);
        assert!(inject_before_head_close("<div id=\"root\"></div>", "<TAGS>").is_none());
    }
}
