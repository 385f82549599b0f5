//! Composition of class and namespace pages.

use tracing::debug;

use crate::{
    error::Result,
    model::{CompoundDef, CompoundKind, MemberCategory},
    resolve::resolve,
    signature::synthesize,
    store::DocumentStore,
    text::{cross_ref, render_description},
};

/// Title of the root namespace page.
const ROOT_TITLE: &str = "API documentation";

/// Settings shared by every page of one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Context {
    /// Qualified name of the namespace that scopes the run.
    root_namespace: String,
    /// Sphinx domain used for directives.
    domain: String,
}

impl Context {
    /// Create a context for `root_namespace` using the PHP domain.
    pub fn new(root_namespace: impl Into<String>) -> Self {
        Self {
            root_namespace: root_namespace.into(),
            domain: "php".to_string(),
        }
    }

    /// Use a different Sphinx domain for directives.
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    /// Qualified name of the root namespace.
    pub fn root_namespace(&self) -> &str {
        &self.root_namespace
    }

    /// Sphinx domain used for directives.
    pub fn domain(&self) -> &str {
        &self.domain
    }

    /// Whether `name` is the root namespace itself.
    pub fn is_root(&self, name: &str) -> bool {
        name == self.root_namespace
    }

    /// The part of `name` below the root namespace, or `None` when `name`
    /// lies outside it. The root itself yields `None` too.
    pub fn relative<'a>(&self, name: &'a str) -> Option<&'a str> {
        name.strip_prefix(self.root_namespace.as_str())
            .and_then(|rest| rest.strip_prefix("::"))
            .filter(|rest| !rest.is_empty())
    }
}

/// A rendered namespace index page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespacePage {
    /// Page title.
    pub title: String,
    /// Complete page text.
    pub text: String,
}

/// Write a title with its `=` underline.
fn heading(output: &mut String, title: &str) {
    output.push_str(title);
    output.push('\n');
    output.push_str(&"=".repeat(title.chars().count()));
    output.push('\n');
}

/// Render the page for a class or interface.
///
/// Public methods come first, then public static methods, each sorted by
/// name and including inherited members where the category allows it.
pub fn render_class_page(
    ctx: &Context,
    store: &dyn DocumentStore,
    compound: &CompoundDef,
    title: &str,
) -> Result<String> {
    let mut output = String::new();
    heading(&mut output, title);
    output.push('\n');

    let description = render_description(&compound.brief, &compound.detailed, "");
    if !description.trim().is_empty() {
        output.push_str(description.trim());
        output.push_str("\n\n");
    }

    let mut extends = Vec::new();
    let mut implements = Vec::new();
    for base in &compound.bases {
        let base_def = store.compound(base.required_refid()?)?;
        if base_def.kind == CompoundKind::Class {
            extends.push(cross_ref("class", base_def.short_name()));
        } else {
            implements.push(cross_ref("interface", base_def.short_name()));
        }
    }

    output.push_str(&format!(
        ":Qualified name: ``{}``\n",
        compound.name.replace("::", "\\")
    ));
    if !extends.is_empty() {
        output.push_str(&format!(":Extends: {}\n", extends.join(", ")));
    }
    if !implements.is_empty() {
        output.push_str(&format!(":Implements: {}\n", implements.join(", ")));
    }
    output.push('\n');

    let declaration = if compound.kind == CompoundKind::Interface {
        "interface"
    } else {
        "class"
    };
    output.push_str(&format!(".. {}:{declaration}:: {title}\n\n", ctx.domain()));

    for (category, directive) in [
        (MemberCategory::PublicFunc, "method"),
        (MemberCategory::PublicStaticFunc, "staticmethod"),
    ] {
        debug!("  {category}:");
        for member in resolve(store, compound, &category)?.sorted() {
            let synthesized = synthesize(&member);
            debug!("    {} {}", synthesized.name, synthesized.signature);
            output.push_str(&format!(
                "  .. {}:{directive}:: {} {}\n\n",
                ctx.domain(),
                synthesized.name,
                synthesized.signature
            ));
            output.push_str(&synthesized.block);
        }
    }

    Ok(output)
}

/// Render the index page of a namespace: a glob table of contents over the
/// namespace's directory followed by its description. Only the root gets the
/// top-level title; a namespace outside the root keeps its qualified name.
pub fn render_namespace_page(ctx: &Context, compound: &CompoundDef) -> NamespacePage {
    let (title, glob) = if ctx.is_root(&compound.name) {
        (ROOT_TITLE.to_string(), "api/*".to_string())
    } else {
        let name = ctx.relative(&compound.name).unwrap_or(&compound.name);
        let last = name.rsplit("::").next().unwrap_or(name);
        (
            format!("{name} namespace"),
            format!("{}/*", last.to_lowercase()),
        )
    };
    let description = render_description(&compound.brief, &compound.detailed, "");

    let mut text = String::new();
    heading(&mut text, &title);
    text.push_str(&format!(
        "\n.. toctree::\n   :glob:\n\n   {glob}\n\n{}\n",
        description.trim()
    ));
    NamespacePage { title, text }
}
