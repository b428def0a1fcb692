//! HTML rendering of package pages.
//!
//! # Responsibilities
//! - `go-import` and `go-source` meta tags for the go tool
//! - Full document redirecting browsers to pkg.go.dev
//!
//! # Design Decisions
//! - Templates compiled once, at server construction
//! - Autoescape is off; every value goes through the `attr` filter so `/`
//!   stays readable in URLs while quotes and brackets are escaped

use std::collections::HashMap;

use tera::{Context, Tera, Value};

use crate::error::Result;
use crate::package::Package;

const HEAD_TEMPLATE: &str = "head";
const DOCUMENT_TEMPLATE: &str = "document";

const HEAD: &str = r#"<meta name="go-import" content="{{ host | attr }}{{ package.path | attr }} {{ package.vcs | attr }} {{ package.repository_url | attr }}">
<meta name="go-source" content="{{ host | attr }}{{ package.path | attr }} {{ package.display | attr }}">"#;

const DOCUMENT: &str = r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
{% include "head" %}
<meta http-equiv="refresh" content="0; url=https://pkg.go.dev/{{ host | attr }}{{ package.path | attr }}/{{ subpath | attr }}">
</head>
<body>
Nothing to see here; <a href="https://pkg.go.dev/{{ host | attr }}{{ package.path | attr }}/{{ subpath | attr }}">see the package on pkg.go.dev</a>.
</body>
</html>
"#;

/// Compiled package page templates.
#[derive(Debug, Clone)]
pub struct PackageTemplates {
    tera: Tera,
}

impl PackageTemplates {
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();
        tera.autoescape_on(vec![]);
        tera.register_filter("attr", escape_attr);
        tera.add_raw_templates(vec![(HEAD_TEMPLATE, HEAD), (DOCUMENT_TEMPLATE, DOCUMENT)])?;

        Ok(Self { tera })
    }

    /// Render the `go-import` and `go-source` meta tags of a package.
    pub fn render_head(&self, package: &Package, host: &str) -> Result<String> {
        let context = Self::context(package, host, "");
        Ok(self.tera.render(HEAD_TEMPLATE, &context)?)
    }

    /// Render the full HTML document of a package.
    pub fn render_document(&self, package: &Package, host: &str, subpath: &str) -> Result<String> {
        let context = Self::context(package, host, subpath);
        Ok(self.tera.render(DOCUMENT_TEMPLATE, &context)?)
    }

    fn context(package: &Package, host: &str, subpath: &str) -> Context {
        let mut context = Context::new();
        context.insert("package", package);
        context.insert("host", host);
        context.insert("subpath", subpath);
        context
    }
}

fn escape_attr(value: &Value, _: &HashMap<String, Value>) -> tera::Result<Value> {
    let raw = tera::try_get_value!("attr", "value", String, value);

    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&#34;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }

    Ok(Value::String(escaped))
}
