//! Call signatures and documentation blocks for individual members.
//!
//! Three sources feed into each member: the declared parameters, the
//! author's `@param` list (optional), and the `@return` text. There is no
//! structured return type in doxygen's PHP output, so the return type is
//! guessed from the first word of the return text; see [`classify_return`].

use std::collections::HashMap;

use crate::{
    model::{Description, MemberDef, ParamDef, ParamDoc},
    primitives::is_primitive,
    text::{
        is_reference, render_description, render_markup, render_paras, render_type, type_label,
        unwrap_reference,
    },
};

/// Indentation of field list entries (`:param:`, `:returns:`) in a member block.
const FIELD_INDENT: &str = "    ";
/// Indentation of text nested below a field list entry.
const BODY_INDENT: &str = "      ";

/// The rendered pieces of one member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Synthesized {
    /// Short name of the member.
    pub name: String,
    /// Argument list, with ` -> <type>` appended when a return type is known.
    pub signature: String,
    /// Description and field list, indented for nesting below the directive.
    /// Empty when there is nothing to say.
    pub block: String,
}

/// What the return annotation says.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnInfo {
    /// Return type, when the first word of the annotation looks like one.
    pub type_: Option<String>,
    /// Remaining description.
    pub description: String,
}

/// Build the signature and documentation block for `member`.
pub fn synthesize(member: &MemberDef) -> Synthesized {
    let documented = documented_params(&member.detailed);
    let returns = return_info(&member.detailed);

    let mut signature = args_string(member);
    if let Some(type_) = returns.as_ref().and_then(|info| info.type_.as_deref()) {
        signature.push_str(" -> ");
        signature.push_str(type_);
    }

    let mut fields = String::new();
    for param in &member.params {
        let name = param_name(&param.name);
        let mut entry = match documented.get(name) {
            Some(doc) => doc.trim_end().to_string(),
            None => format!(
                "{FIELD_INDENT}:param {}:",
                join_words(&render_type(&param.type_), name)
            ),
        };
        if param.default.is_some() && !ends_sentence(&entry) {
            entry.push('.');
        }
        fields.push_str(&entry);
        fields.push('\n');
        if let Some(default) = &param.default {
            fields.push_str(&format!("{BODY_INDENT}Default: ``{default}``\n"));
        }
    }
    if let Some(info) = &returns {
        fields.push_str(&returns_field(info));
        fields.push('\n');
    }

    let mut block = String::new();
    let description = render_description(&member.brief, &member.detailed, FIELD_INDENT);
    if !description.is_empty() {
        block.push_str(&description);
        block.push_str("\n\n");
    }
    if !fields.is_empty() {
        block.push_str(&fields);
        block.push('\n');
    }

    Synthesized {
        name: member.name.clone(),
        signature,
        block,
    }
}

/// Split declared parameters into the required prefix and the optional
/// suffix. The suffix starts at the first parameter with a default value.
pub fn partition_params(params: &[ParamDef]) -> (&[ParamDef], &[ParamDef]) {
    let split = params
        .iter()
        .position(|param| param.default.is_some())
        .unwrap_or(params.len());
    params.split_at(split)
}

/// Render the argument list of `member` in Sphinx PHP domain form:
/// `(a, b)`, `(a[, b])` or `([a])`. Without declared parameters, the raw
/// argument text is used, falling back to `()`.
pub fn args_string(member: &MemberDef) -> String {
    if member.params.is_empty() {
        return member.args.clone().unwrap_or_else(|| "()".to_string());
    }
    let (required, optional) = partition_params(&member.params);
    let required = param_list(required);
    let optional = param_list(optional);
    match (required.is_empty(), optional.is_empty()) {
        (false, false) => format!("({required}[, {optional}])"),
        (false, true) => format!("({required})"),
        (true, false) => format!("([{optional}])"),
        (true, true) => "()".to_string(),
    }
}

/// Read the return annotation of a detailed description, if there is one.
pub fn return_info(detailed: &Description) -> Option<ReturnInfo> {
    let section = detailed.returns()?;
    Some(classify_return(&render_paras(&section.paras, "")))
}

/// Decide whether rendered return text starts with a type.
///
/// The first whitespace-separated word is taken as the type if it is a
/// primitive keyword or exactly one cross-reference. This misreads
/// descriptions that happen to start with a keyword, e.g. "array of
/// points" yields type `array`.
pub fn classify_return(text: &str) -> ReturnInfo {
    let text = text.trim();
    let (first, rest) = text.split_once(char::is_whitespace).unwrap_or((text, ""));
    if is_primitive(first) || is_reference(first) {
        ReturnInfo {
            type_: Some(unwrap_reference(first).to_string()),
            description: rest.trim().to_string(),
        }
    } else {
        ReturnInfo {
            type_: None,
            description: text.to_string(),
        }
    }
}

/// A parameter name without its `$` sigil.
pub fn param_name(name: &str) -> &str {
    name.strip_prefix('$').unwrap_or(name)
}

/// Pre-rendered `:param:` entries for every parameter the author documented.
fn documented_params(detailed: &Description) -> HashMap<&str, String> {
    let mut documented = HashMap::new();
    for doc in detailed.param_docs() {
        for name in &doc.names {
            let name = param_name(name);
            documented.insert(name, documented_entry(doc, name));
        }
    }
    documented
}

/// The `:param:` entry for one documented name.
fn documented_entry(doc: &ParamDoc, name: &str) -> String {
    let type_ = doc
        .type_label
        .as_ref()
        .map(|label| unwrap_reference(render_markup(label).trim()).to_string())
        .unwrap_or_default();
    let mut entry = format!("{FIELD_INDENT}:param {}:", join_words(&type_, name));
    let description = render_paras(&doc.description, BODY_INDENT);
    if !description.is_empty() {
        entry.push('\n');
        entry.push_str(&description);
    }
    entry
}

/// The `:returns:` field for a return annotation.
fn returns_field(info: &ReturnInfo) -> String {
    let body = match &info.type_ {
        Some(type_) if info.description.is_empty() => type_label(type_),
        Some(type_) => format!("{} -- {}", type_label(type_), info.description),
        None => info.description.clone(),
    };
    let mut lines = body.lines();
    let mut field = format!("{FIELD_INDENT}:returns: {}", lines.next().unwrap_or_default());
    for line in lines {
        field.push('\n');
        if !line.trim().is_empty() {
            field.push_str(BODY_INDENT);
            field.push_str(line);
        }
    }
    field.trim_end().to_string()
}

/// Comma-separated `type name` list for a signature.
fn param_list(params: &[ParamDef]) -> String {
    params
        .iter()
        .map(|param| join_words(&render_type(&param.type_), param_name(&param.name)))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Join a (possibly empty) type and a name with a space.
fn join_words(type_: &str, name: &str) -> String {
    format!("{type_} {name}").trim().to_string()
}

/// Whether an entry already ends in punctuation that can be followed by a
/// `Default:` line.
fn ends_sentence(entry: &str) -> bool {
    entry.ends_with(['.', ':', '!', '?'])
}
