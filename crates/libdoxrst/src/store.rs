//! Access to compound documents by reference id.

use std::{
    cell::RefCell,
    collections::HashMap,
    fs, io,
    path::{Path, PathBuf},
    rc::Rc,
};

use tracing::debug;

use crate::{
    error::{DoxRstError, Result},
    model::{CompoundDef, CompoundKind, IndexEntry},
    xml::{parse_compound, parse_index},
};

/// A source of parsed compound definitions.
pub trait DocumentStore {
    /// Look up the compound with reference id `refid`. A missing document is
    /// a [`DoxRstError::MissingReference`].
    fn compound(&self, refid: &str) -> Result<Rc<CompoundDef>>;

    /// All compounds listed in the index.
    fn index(&self) -> Result<Vec<IndexEntry>>;

    /// The index entry of the namespace called `name`.
    fn namespace(&self, name: &str) -> Result<IndexEntry> {
        self.index()?
            .into_iter()
            .find(|entry| entry.kind == CompoundKind::Namespace && entry.name == name)
            .ok_or_else(|| DoxRstError::NamespaceNotFound(name.to_string()))
    }
}

/// Reads doxygen XML output from a directory: `index.xml` plus one
/// `<refid>.xml` file per compound. Parsed compounds are memoized for the
/// lifetime of the store.
#[derive(Debug)]
pub struct XmlDirectory {
    /// Directory holding the XML files.
    dir: PathBuf,
    /// Compounds parsed so far, by reference id.
    cache: RefCell<HashMap<String, Rc<CompoundDef>>>,
}

impl XmlDirectory {
    /// Create a store reading from `dir`.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// The directory this store reads from.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl DocumentStore for XmlDirectory {
    fn compound(&self, refid: &str) -> Result<Rc<CompoundDef>> {
        if let Some(compound) = self.cache.borrow().get(refid) {
            return Ok(Rc::clone(compound));
        }
        let path = self.dir.join(format!("{refid}.xml"));
        debug!("Opening {}", path.display());
        let xml = fs::read_to_string(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => DoxRstError::MissingReference(refid.to_string()),
            _ => DoxRstError::Io(e),
        })?;
        let compound = Rc::new(parse_compound(&path.display().to_string(), &xml)?);
        self.cache
            .borrow_mut()
            .insert(refid.to_string(), Rc::clone(&compound));
        Ok(compound)
    }

    fn index(&self) -> Result<Vec<IndexEntry>> {
        let path = self.dir.join("index.xml");
        debug!("Opening {}", path.display());
        let xml = fs::read_to_string(&path)?;
        parse_index(&path.display().to_string(), &xml)
    }
}

/// A store held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryStore {
    /// Compounds by reference id.
    compounds: HashMap<String, Rc<CompoundDef>>,
    /// Index entries in insertion order.
    index: Vec<IndexEntry>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a compound, listing it in the index under its own id.
    pub fn insert(&mut self, compound: CompoundDef) {
        self.index.push(IndexEntry {
            refid: compound.id.clone(),
            kind: compound.kind.clone(),
            name: compound.name.clone(),
        });
        self.compounds.insert(compound.id.clone(), Rc::new(compound));
    }

    /// Parse a compound document and add it.
    pub fn insert_xml(&mut self, xml: &str) -> Result<()> {
        let compound = parse_compound("<memory>", xml)?;
        self.insert(compound);
        Ok(())
    }

    /// Builder-style [`Self::insert`].
    pub fn with(mut self, compound: CompoundDef) -> Self {
        self.insert(compound);
        self
    }
}

impl DocumentStore for MemoryStore {
    fn compound(&self, refid: &str) -> Result<Rc<CompoundDef>> {
        self.compounds
            .get(refid)
            .cloned()
            .ok_or_else(|| DoxRstError::MissingReference(refid.to_string()))
    }

    fn index(&self) -> Result<Vec<IndexEntry>> {
        Ok(self.index.clone())
    }
}
