//! Handlebars page templates.
//!
//! `{{ title }}` and nested paths like `{{ og.title }}` resolve against the
//! page metadata and are HTML-escaped. Missing and null props render as
//! nothing.

use handlebars::Handlebars;
use metamap_core::{Error, PageMetaData, PageTemplate, Result};

pub struct HandlebarsTemplate {
    registry: Handlebars<'static>,
    name: String,
}

impl HandlebarsTemplate {
    /// Compile `source` under `name`; syntax errors surface here, not at render
    pub fn compile(name: &str, source: &str) -> std::result::Result<Self, handlebars::TemplateError> {
        let mut registry = Handlebars::new();
        registry.register_template_string(name, source)?;
        Ok(Self {
            registry,
            name: name.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PageTemplate for HandlebarsTemplate {
    fn render(&self, props: &PageMetaData) -> Result<String> {
        self.registry
            .render(&self.name, props.fields())
            .map_err(|e| Error::TemplateRender(e.to_string()))
    }
}
