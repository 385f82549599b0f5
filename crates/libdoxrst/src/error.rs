use thiserror::Error;

/// Errors produced while loading doxygen XML and rendering pages.
#[derive(Error, Debug)]
pub enum DoxRstError {
    /// A compound reference has no corresponding document.
    #[error("Missing reference: no document for compound '{0}'")]
    MissingReference(String),

    /// The inheritance chain loops back onto itself.
    #[error("Cyclic inheritance: {}", .0.join(" -> "))]
    CyclicInheritance(Vec<String>),

    /// A member lacks the definition string its short name is derived from.
    #[error("Malformed member '{member}' in compound '{compound}': missing definition")]
    MalformedMember {
        /// Compound the member was declared in.
        compound: String,
        /// Member id, or "?" when the id is absent too.
        member: String,
    },

    /// An XML document could not be parsed or lacks required structure.
    #[error("Malformed document {source_name}: {message}")]
    MalformedDocument {
        /// File name or reference id of the document.
        source_name: String,
        /// What was wrong with it.
        message: String,
    },

    /// The requested root namespace is not listed in the index.
    #[error("Namespace not found in index: {0}")]
    NamespaceNotFound(String),

    /// Reading a document or writing a page failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serializing the parsed model failed.
    #[error("Failed to serialize JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl DoxRstError {
    /// Shorthand for a [`DoxRstError::MalformedDocument`].
    pub(crate) fn malformed(source_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::MalformedDocument {
            source_name: source_name.into(),
            message: message.into(),
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DoxRstError>;
