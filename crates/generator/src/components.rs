// Built-in page template rendered with Leptos SSR

use leptos::prelude::*;
use metamap_core::{PageMetaData, PageTemplate, Result};

/// Specifier selecting the built-in template instead of a template file.
pub const BUILTIN_DEFAULT: &str = "builtin:default";

#[component]
fn DefaultPage(title: String, description: String) -> impl IntoView {
    view! {
        <html lang="en">
            <head>
                <title>{title}</title>
                <meta name="description" content=description />
            </head>
            <body>
                <div id="root"></div>
            </body>
        </html>
    }
}

/// Minimal document with a title, a description meta tag and the root anchor.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultPageTemplate;

impl PageTemplate for DefaultPageTemplate {
    fn render(&self, props: &PageMetaData) -> Result<String> {
        let title = props.get_str("title").unwrap_or_default().to_string();
        let description = props.get_str("description").unwrap_or_default().to_string();
        let owner = Owner::new();
        Ok(owner.with(|| view! { <DefaultPage title=title description=description /> }.to_html()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_page_renders_props_and_anchor() {
        let page = PageMetaData::new()
            .with("title", "Hello World")
            .with("description", "Test Description");
        let html = DefaultPageTemplate.render(&page).unwrap();

        assert!(html.contains("<title>Hello World</title>"));
        assert!(html.contains("Test Description"));
        assert!(html.contains(r#"<div id="root"></div>"#));
        assert!(html.contains("</head>"));
    }
}
