//! Rendering of doxygen mixed content into inline reStructuredText.

use crate::{
    model::{Description, Inline, Markup, Para},
    primitives::is_primitive,
};

/// Opening of the role used for cross-references in running text.
const CLASS_ROLE: &str = ":class:`";

/// Format `name` as a cross-reference using `role`.
pub fn cross_ref(role: &str, name: &str) -> String {
    format!(":{role}:`{name}`")
}

/// Render inline markup. References become `:class:` roles, text passes
/// through untouched.
pub fn render_markup(markup: &Markup) -> String {
    let mut output = String::new();
    for inline in &markup.0 {
        match inline {
            Inline::Text { text } => output.push_str(text),
            Inline::Ref { name, .. } => output.push_str(&cross_ref("class", name)),
        }
    }
    output
}

/// Render paragraphs, separated by blank lines, with every line prefixed
/// by `prefix`. Empty paragraphs are dropped.
pub fn render_paras(paras: &[Para], prefix: &str) -> String {
    let rendered: Vec<String> = paras
        .iter()
        .map(|para| render_markup(&para.content).trim().to_string())
        .filter(|text| !text.is_empty())
        .collect();
    indent(&rendered.join("\n\n"), prefix)
}

/// Render a brief description followed by a detailed one, separated by a
/// blank line when both have content.
pub fn render_description(brief: &Description, detailed: &Description, prefix: &str) -> String {
    [
        render_paras(&brief.paras, prefix),
        render_paras(&detailed.paras, prefix),
    ]
    .into_iter()
    .filter(|text| !text.is_empty())
    .collect::<Vec<_>>()
    .join("\n\n")
}

/// Prefix every non-blank line of `text` with `prefix`.
pub fn indent(text: &str, prefix: &str) -> String {
    text.lines()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{prefix}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// True when `token` is exactly one rendered cross-reference.
pub fn is_reference(token: &str) -> bool {
    token
        .strip_prefix(CLASS_ROLE)
        .and_then(|rest| rest.strip_suffix('`'))
        .is_some_and(|name| !name.is_empty() && !name.contains('`'))
}

/// Strip the markup from a token that is exactly one cross-reference,
/// leaving the bare name. Anything else is returned unchanged.
pub fn unwrap_reference(token: &str) -> &str {
    if is_reference(token) {
        &token[CLASS_ROLE.len()..token.len() - 1]
    } else {
        token
    }
}

/// Render a declared type for use inside a signature or `:param:` header.
pub fn render_type(markup: &Markup) -> String {
    let rendered = render_markup(markup);
    unwrap_reference(rendered.trim()).to_string()
}

/// Present a bare type name in documentation: primitives stay as they are,
/// everything else links to the type's page.
pub fn type_label(name: &str) -> String {
    if name.is_empty() || is_primitive(name) {
        name.to_string()
    } else {
        cross_ref("class", name)
    }
}
