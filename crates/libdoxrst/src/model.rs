//! In-memory shape of the doxygen compound documents.
//!
//! Everything here is built once by the XML loader and never mutated
//! afterwards. Members are shared through `Rc` so resolved member maps can
//! point into compounds loaded from different documents.

use std::{fmt, rc::Rc};

use serde::Serialize;

use crate::error::{DoxRstError, Result};

/// Kind of a compound definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CompoundKind {
    /// A namespace.
    Namespace,
    /// A class (including abstract classes).
    Class,
    /// An interface.
    Interface,
    /// Any other doxygen kind, kept verbatim (trait, file, page, ...).
    Other(String),
}

impl CompoundKind {
    /// Parse the `kind` attribute of a compound.
    pub fn parse(kind: &str) -> Self {
        match kind {
            "namespace" => Self::Namespace,
            "class" => Self::Class,
            "interface" => Self::Interface,
            other => Self::Other(other.to_string()),
        }
    }
}

impl fmt::Display for CompoundKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Namespace => f.write_str("namespace"),
            Self::Class => f.write_str("class"),
            Self::Interface => f.write_str("interface"),
            Self::Other(kind) => f.write_str(kind),
        }
    }
}

/// One piece of mixed-content text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Inline {
    /// Literal text.
    Text {
        /// The text, exactly as extracted.
        text: String,
    },
    /// A cross-reference to another documented entity.
    Ref {
        /// Target reference id.
        refid: String,
        /// Displayed name of the target.
        name: String,
    },
}

/// A run of inline content, e.g. a paragraph body or a declared type.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Markup(pub Vec<Inline>);

impl Markup {
    /// Markup holding a single literal text run.
    pub fn text(text: impl Into<String>) -> Self {
        Self(vec![Inline::Text { text: text.into() }])
    }

    /// Markup holding a single cross-reference.
    pub fn reference(refid: impl Into<String>, name: impl Into<String>) -> Self {
        Self(vec![Inline::Ref {
            refid: refid.into(),
            name: name.into(),
        }])
    }

    /// True when there is no inline content at all.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Author documentation for one or more parameters, from a `parameterlist`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParamDoc {
    /// Documented parameter names; several names may share one description.
    pub names: Vec<String>,
    /// Free-text type label, if the author wrote one.
    pub type_label: Option<Markup>,
    /// Description paragraphs.
    pub description: Vec<Para>,
}

/// A `simplesect` block (`return`, `note`, `see`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SimpleSect {
    /// Doxygen section kind.
    pub kind: String,
    /// Section body.
    pub paras: Vec<Para>,
}

/// A paragraph, with the structured blocks doxygen nests inside it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Para {
    /// Running text of the paragraph.
    pub content: Markup,
    /// Parameter documentation found in this paragraph.
    pub params: Vec<ParamDoc>,
    /// Simple sections found in this paragraph.
    pub sections: Vec<SimpleSect>,
}

impl Para {
    /// A paragraph holding plain text only.
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            content: Markup::text(text),
            ..Self::default()
        }
    }
}

/// A brief or detailed description block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Description {
    /// Paragraphs in document order.
    pub paras: Vec<Para>,
}

impl Description {
    /// True when the description has no paragraphs.
    pub fn is_empty(&self) -> bool {
        self.paras.is_empty()
    }

    /// All parameter documentation entries, in document order.
    pub fn param_docs(&self) -> impl Iterator<Item = &ParamDoc> {
        self.paras.iter().flat_map(|para| para.params.iter())
    }

    /// The first `return` simple section, if any.
    pub fn returns(&self) -> Option<&SimpleSect> {
        self.paras
            .iter()
            .flat_map(|para| para.sections.iter())
            .find(|sect| sect.kind == "return")
    }
}

/// A declared parameter.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ParamDef {
    /// Declared name, as written in the source (may carry a `$` sigil).
    pub name: String,
    /// Declared type; empty for untyped parameters.
    pub type_: Markup,
    /// Default value literal.
    pub default: Option<String>,
}

/// A member (method) of a compound.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct MemberDef {
    /// Doxygen member id.
    pub id: String,
    /// Fully qualified definition string.
    pub definition: String,
    /// Short name: the final `::` segment of the definition.
    pub name: String,
    /// Declared parameters, in order.
    pub params: Vec<ParamDef>,
    /// Raw declared argument text, used when there are no declared params.
    pub args: Option<String>,
    /// Brief description.
    pub brief: Description,
    /// Detailed description, which may hold param docs and a return section.
    pub detailed: Description,
}

impl MemberDef {
    /// Derive the short name from a fully qualified definition.
    pub fn short_name(definition: &str) -> &str {
        definition.rsplit("::").next().unwrap_or(definition)
    }
}

/// Member category of a section, from its doxygen `kind`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "String")]
pub enum MemberCategory {
    /// `public-func`
    PublicFunc,
    /// `public-static-func`
    PublicStaticFunc,
    /// `protected-func`
    ProtectedFunc,
    /// `protected-static-func`
    ProtectedStaticFunc,
    /// `private-func`
    PrivateFunc,
    /// `private-static-func`
    PrivateStaticFunc,
    /// Any other section kind, kept verbatim.
    Other(String),
}

impl MemberCategory {
    /// Parse a section `kind` attribute.
    pub fn parse(kind: &str) -> Self {
        match kind {
            "public-func" => Self::PublicFunc,
            "public-static-func" => Self::PublicStaticFunc,
            "protected-func" => Self::ProtectedFunc,
            "protected-static-func" => Self::ProtectedStaticFunc,
            "private-func" => Self::PrivateFunc,
            "private-static-func" => Self::PrivateStaticFunc,
            other => Self::Other(other.to_string()),
        }
    }

    /// The doxygen section kind for this category.
    pub fn as_str(&self) -> &str {
        match self {
            Self::PublicFunc => "public-func",
            Self::PublicStaticFunc => "public-static-func",
            Self::ProtectedFunc => "protected-func",
            Self::ProtectedStaticFunc => "protected-static-func",
            Self::PrivateFunc => "private-func",
            Self::PrivateStaticFunc => "private-static-func",
            Self::Other(kind) => kind,
        }
    }

    /// Whether members of this category are inherited by subclasses.
    ///
    /// Private members are invisible outside their class, and static members
    /// must be called on the class that declares them.
    pub fn is_inheritable(&self) -> bool {
        let kind = self.as_str();
        !(kind.contains("private") || kind.contains("static"))
    }
}

impl From<MemberCategory> for String {
    fn from(category: MemberCategory) -> Self {
        category.as_str().to_string()
    }
}

impl fmt::Display for MemberCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A bucket of members sharing one category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionDef {
    /// Category of every member in the section.
    pub category: MemberCategory,
    /// Members in declaration order.
    pub members: Vec<Rc<MemberDef>>,
}

/// A direct base class or interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BaseRef {
    /// Reference id of the base; absent for bases outside the documented set.
    pub refid: Option<String>,
    /// Name as written at the reference site.
    pub name: String,
}

impl BaseRef {
    /// The reference id to follow. A base without one has no document, which
    /// is a [`DoxRstError::MissingReference`] naming the base.
    pub fn required_refid(&self) -> Result<&str> {
        self.refid
            .as_deref()
            .ok_or_else(|| DoxRstError::MissingReference(self.name.clone()))
    }
}

/// A reference to a nested class or namespace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InnerRef {
    /// Reference id of the nested compound.
    pub refid: String,
    /// Qualified name of the nested compound.
    pub name: String,
}

/// A namespace, class or interface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompoundDef {
    /// Doxygen compound id.
    pub id: String,
    /// Qualified name, segments joined by `::`.
    pub name: String,
    /// Compound kind.
    pub kind: CompoundKind,
    /// Direct bases in declaration order.
    pub bases: Vec<BaseRef>,
    /// Member sections in declaration order.
    pub sections: Vec<SectionDef>,
    /// Brief description.
    pub brief: Description,
    /// Detailed description.
    pub detailed: Description,
    /// Nested classes (namespaces only).
    pub inner_classes: Vec<InnerRef>,
    /// Nested namespaces (namespaces only).
    pub inner_namespaces: Vec<InnerRef>,
}

impl CompoundDef {
    /// An empty compound of the given kind; mostly useful for building
    /// fixtures by hand.
    pub fn new(id: impl Into<String>, name: impl Into<String>, kind: CompoundKind) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            bases: Vec::new(),
            sections: Vec::new(),
            brief: Description::default(),
            detailed: Description::default(),
            inner_classes: Vec::new(),
            inner_namespaces: Vec::new(),
        }
    }

    /// The last `::` segment of the qualified name.
    pub fn short_name(&self) -> &str {
        self.name.rsplit("::").next().unwrap_or(&self.name)
    }

    /// Members declared directly on this compound in `category`, in
    /// declaration order.
    pub fn members_in<'a>(
        &'a self,
        category: &'a MemberCategory,
    ) -> impl Iterator<Item = &'a Rc<MemberDef>> + 'a {
        self.sections
            .iter()
            .filter(move |section| &section.category == category)
            .flat_map(|section| section.members.iter())
    }
}

/// One compound listed in `index.xml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexEntry {
    /// Reference id of the compound document.
    pub refid: String,
    /// Compound kind.
    pub kind: CompoundKind,
    /// Qualified name.
    pub name: String,
}
