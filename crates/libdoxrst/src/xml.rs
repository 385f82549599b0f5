//! Loading of doxygen XML (`index.xml` and per-compound documents).

use std::rc::Rc;

use roxmltree::{Document, Node};

use crate::{
    error::{DoxRstError, Result},
    model::{
        BaseRef, CompoundDef, CompoundKind, Description, IndexEntry, InnerRef, Inline, Markup,
        MemberCategory, MemberDef, ParamDef, ParamDoc, Para, SectionDef, SimpleSect,
    },
};

/// Elements that are rendered structurally and skipped in running text.
const STRUCTURAL: &[&str] = &["parameterlist", "simplesect"];

/// Parse the doxygen `index.xml` document.
pub fn parse_index(source_name: &str, xml: &str) -> Result<Vec<IndexEntry>> {
    let doc =
        Document::parse(xml).map_err(|e| DoxRstError::malformed(source_name, e.to_string()))?;
    let mut entries = Vec::new();
    for compound in children(doc.root_element(), "compound") {
        let refid = required_attr(compound, "refid", source_name)?;
        let kind = required_attr(compound, "kind", source_name)?;
        let name = child_text(compound, "name").ok_or_else(|| {
            DoxRstError::malformed(source_name, format!("compound {refid} has no name"))
        })?;
        entries.push(IndexEntry {
            refid: refid.to_string(),
            kind: CompoundKind::parse(kind),
            name,
        });
    }
    Ok(entries)
}

/// Parse a compound document (`<refid>.xml`).
pub fn parse_compound(source_name: &str, xml: &str) -> Result<CompoundDef> {
    let doc =
        Document::parse(xml).map_err(|e| DoxRstError::malformed(source_name, e.to_string()))?;
    let root = doc.root_element();
    let def = if root.has_tag_name("compounddef") {
        root
    } else {
        child(root, "compounddef")
            .ok_or_else(|| DoxRstError::malformed(source_name, "no compounddef element"))?
    };

    let id = required_attr(def, "id", source_name)?.to_string();
    let kind = CompoundKind::parse(required_attr(def, "kind", source_name)?);
    let name = child_text(def, "compoundname")
        .ok_or_else(|| DoxRstError::malformed(source_name, "no compoundname element"))?;

    let bases = children(def, "basecompoundref")
        .map(|node| BaseRef {
            refid: node.attribute("refid").map(str::to_string),
            name: text_content(node).trim().to_string(),
        })
        .collect();

    let mut sections = Vec::new();
    for section in children(def, "sectiondef") {
        let category = MemberCategory::parse(required_attr(section, "kind", source_name)?);
        let members = children(section, "memberdef")
            .map(|member| parse_member(member, &name).map(Rc::new))
            .collect::<Result<Vec<_>>>()?;
        sections.push(SectionDef { category, members });
    }

    Ok(CompoundDef {
        id,
        name,
        kind,
        bases,
        sections,
        brief: parse_description(child(def, "briefdescription")),
        detailed: parse_description(child(def, "detaileddescription")),
        inner_classes: parse_inner(def, "innerclass", source_name)?,
        inner_namespaces: parse_inner(def, "innernamespace", source_name)?,
    })
}

/// Read the `innerclass` or `innernamespace` references of a compound.
fn parse_inner(def: Node<'_, '_>, tag: &str, source_name: &str) -> Result<Vec<InnerRef>> {
    children(def, tag)
        .map(|node| {
            Ok(InnerRef {
                refid: required_attr(node, "refid", source_name)?.to_string(),
                name: text_content(node).trim().to_string(),
            })
        })
        .collect()
}

/// Read one `<memberdef>`. A member without a definition is malformed.
fn parse_member(member: Node<'_, '_>, compound: &str) -> Result<MemberDef> {
    let id = member.attribute("id").unwrap_or("?");
    let definition = child_text(member, "definition")
        .map(|text| text.trim().to_string())
        .filter(|text| !text.is_empty())
        .ok_or_else(|| DoxRstError::MalformedMember {
            compound: compound.to_string(),
            member: id.to_string(),
        })?;

    let params = children(member, "param")
        .map(|param| ParamDef {
            name: child_text(param, "declname")
                .or_else(|| child_text(param, "defname"))
                .map(|name| name.trim().to_string())
                .unwrap_or_default(),
            type_: child(param, "type").map(parse_markup).unwrap_or_default(),
            default: child_text(param, "defval").map(|value| value.trim().to_string()),
        })
        .collect();

    Ok(MemberDef {
        id: id.to_string(),
        name: MemberDef::short_name(&definition).to_string(),
        definition,
        params,
        args: child_text(member, "argsstring")
            .map(|args| args.trim().to_string())
            .filter(|args| !args.is_empty()),
        brief: parse_description(child(member, "briefdescription")),
        detailed: parse_description(child(member, "detaileddescription")),
    })
}

/// Read the paragraphs of a brief or detailed description.
fn parse_description(node: Option<Node<'_, '_>>) -> Description {
    Description {
        paras: node
            .map(|node| children(node, "para").map(parse_para).collect())
            .unwrap_or_default(),
    }
}

/// Read a paragraph along with its parameter lists and simple sections.
fn parse_para(para: Node<'_, '_>) -> Para {
    let params = children(para, "parameterlist")
        .filter(|list| list.attribute("kind").is_none_or(|kind| kind == "param"))
        .flat_map(|list| children(list, "parameteritem"))
        .map(parse_param_item)
        .collect();
    let sections = children(para, "simplesect")
        .map(|sect| SimpleSect {
            kind: sect.attribute("kind").unwrap_or_default().to_string(),
            paras: children(sect, "para").map(parse_para).collect(),
        })
        .collect();
    Para {
        content: parse_markup(para),
        params,
        sections,
    }
}

/// Read one documented parameter entry.
fn parse_param_item(item: Node<'_, '_>) -> ParamDoc {
    let mut doc = ParamDoc::default();
    for namelist in children(item, "parameternamelist") {
        for name in children(namelist, "parametername") {
            doc.names.push(text_content(name).trim().to_string());
        }
        if doc.type_label.is_none() {
            doc.type_label = child(namelist, "parametertype")
                .map(parse_markup)
                .filter(|markup| !markup.is_empty());
        }
    }
    doc.description = child(item, "parameterdescription")
        .map(|desc| children(desc, "para").map(parse_para).collect())
        .unwrap_or_default();
    doc
}

/// Flatten mixed content into text runs and references. Unknown inline
/// elements contribute their text; structural blocks are skipped.
fn parse_markup(node: Node<'_, '_>) -> Markup {
    let mut inlines: Vec<Inline> = Vec::new();
    for child in node.children() {
        if child.is_text() {
            push_text(&mut inlines, child.text().unwrap_or_default());
        } else if child.has_tag_name("ref") {
            inlines.push(Inline::Ref {
                refid: child.attribute("refid").unwrap_or_default().to_string(),
                name: text_content(child),
            });
        } else if child.is_element() && !STRUCTURAL.contains(&child.tag_name().name()) {
            push_text(&mut inlines, &text_content(child));
        }
    }
    Markup(inlines)
}

/// Append text, merging with a preceding text run.
fn push_text(inlines: &mut Vec<Inline>, text: &str) {
    if text.is_empty() {
        return;
    }
    if let Some(Inline::Text { text: last }) = inlines.last_mut() {
        last.push_str(text);
    } else {
        inlines.push(Inline::Text {
            text: text.to_string(),
        });
    }
}

/// Child elements of `node` named `tag`.
fn children<'a, 'input: 'a>(
    node: Node<'a, 'input>,
    tag: &'a str,
) -> impl Iterator<Item = Node<'a, 'input>> + 'a {
    node.children().filter(move |child| child.has_tag_name(tag))
}

/// First child element of `node` named `tag`.
fn child<'a, 'input: 'a>(node: Node<'a, 'input>, tag: &str) -> Option<Node<'a, 'input>> {
    node.children().find(|child| child.has_tag_name(tag))
}

/// Text content of the first child element named `tag`.
fn child_text(node: Node<'_, '_>, tag: &str) -> Option<String> {
    child(node, tag).map(text_content)
}

/// All text below `node`, concatenated in document order.
fn text_content(node: Node<'_, '_>) -> String {
    node.descendants()
        .filter(|n| n.is_text())
        .filter_map(|n| n.text())
        .collect()
}

/// Attribute `name` of `node`, or a malformed document error.
fn required_attr<'a>(node: Node<'a, '_>, name: &str, source_name: &str) -> Result<&'a str> {
    node.attribute(name).ok_or_else(|| {
        DoxRstError::malformed(
            source_name,
            format!("<{}> is missing the '{name}' attribute", node.tag_name().name()),
        )
    })
}
