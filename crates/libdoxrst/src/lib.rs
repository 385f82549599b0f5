//! DoxRst generates Sphinx reStructuredText API documentation from doxygen XML.
//!
//! The interesting work happens in two places. The [`resolve`](crate::resolve)
//! module computes the effective members of a class by walking its bases with
//! PHP's visibility rules: locally declared methods shadow inherited ones,
//! while private and static methods are never inherited. The
//! [`signature`](crate::signature) module reconciles the declared parameters,
//! the author's `@param` list and the free-text `@return` annotation into a
//! signature and a field list for each method.
//!
//! Everything else walks the namespace tree and concatenates strings.

mod doxrst;
mod error;
pub mod model;
pub mod page;
pub mod primitives;
pub mod resolve;
pub mod signature;
pub mod store;
pub mod text;
pub mod walk;
pub mod xml;

pub use crate::doxrst::DoxRst;
pub use crate::error::{DoxRstError, Result};
pub use crate::model::{
    BaseRef, CompoundDef, CompoundKind, Description, IndexEntry, InnerRef, Inline, Markup,
    MemberCategory, MemberDef, ParamDef, ParamDoc, Para, SectionDef, SimpleSect,
};
pub use crate::page::{Context, NamespacePage, render_class_page, render_namespace_page};
pub use crate::resolve::{MemberMap, resolve};
pub use crate::signature::{ReturnInfo, Synthesized, classify_return, synthesize};
pub use crate::store::{DocumentStore, MemoryStore, XmlDirectory};
pub use crate::walk::{FsSink, MemorySink, PageSink, WalkSummary, Walker};
