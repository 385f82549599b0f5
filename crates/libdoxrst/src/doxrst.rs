use std::path::PathBuf;

use tracing::info;

use super::{
    error::*,
    page::Context,
    store::{DocumentStore, XmlDirectory},
    walk::{FsSink, WalkSummary, Walker},
};

/// DoxRst turns doxygen XML output for a PHP project into reStructuredText
/// pages for the Sphinx PHP domain.
///
/// One page is written per namespace (a glob table of contents plus the
/// namespace description) and one per class or interface (qualified name,
/// base classes and interfaces, and every public method with its signature,
/// parameters and return value). Every run regenerates the whole tree below
/// the chosen root namespace.
#[derive(Debug, Clone)]
pub struct DoxRst {
    /// Directory holding doxygen's `index.xml` and compound documents.
    xml_dir: PathBuf,

    /// Directory pages are written to.
    out_dir: PathBuf,

    /// Sphinx domain used for directives.
    domain: String,
}

impl Default for DoxRst {
    fn default() -> Self {
        Self::new()
    }
}

impl DoxRst {
    /// Creates a new DoxRst instance reading from `./xml` and writing to the
    /// current directory.
    pub fn new() -> Self {
        Self {
            xml_dir: PathBuf::from("xml"),
            out_dir: PathBuf::from("."),
            domain: "php".to_string(),
        }
    }

    /// Sets the directory doxygen XML is read from.
    pub fn with_xml_dir(mut self, xml_dir: impl Into<PathBuf>) -> Self {
        self.xml_dir = xml_dir.into();
        self
    }

    /// Sets the directory pages are written to.
    pub fn with_out_dir(mut self, out_dir: impl Into<PathBuf>) -> Self {
        self.out_dir = out_dir.into();
        self
    }

    /// Sets the Sphinx domain used for directives.
    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.domain = domain.into();
        self
    }

    /// The run context for `root_namespace`.
    fn context(&self, root_namespace: &str) -> Context {
        Context::new(root_namespace).with_domain(self.domain.clone())
    }

    /// Render `root_namespace` and everything below it into the output
    /// directory.
    ///
    /// # Arguments
    /// * `root_namespace` - Qualified name (`::`-separated) of the namespace that scopes the run
    pub fn render(&self, root_namespace: &str) -> Result<WalkSummary> {
        let ctx = self.context(root_namespace);
        let store = XmlDirectory::new(&self.xml_dir);
        let mut sink = FsSink::new(&self.out_dir);
        let summary = Walker::new(&ctx, &store, &mut sink).run()?;
        info!(
            "Wrote {} namespace and {} class pages to {}",
            summary.namespaces,
            summary.classes,
            self.out_dir.display()
        );
        Ok(summary)
    }

    /// Returns the parsed root namespace compound as pretty-printed JSON.
    ///
    /// # Arguments
    /// * `root_namespace` - Qualified name of the namespace to look up in the index
    pub fn raw_json(&self, root_namespace: &str) -> Result<String> {
        let store = XmlDirectory::new(&self.xml_dir);
        let entry = store.namespace(root_namespace)?;
        let compound = store.compound(&entry.refid)?;
        Ok(serde_json::to_string_pretty(&*compound)?)
    }
}
