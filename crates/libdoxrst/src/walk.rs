//! The namespace walk that decides which pages exist and where they go.

use std::{
    collections::{BTreeMap, BTreeSet},
    fs,
    path::{Path, PathBuf},
};

use tracing::{debug, info, warn};

use crate::{
    error::Result,
    page::{Context, render_class_page, render_namespace_page},
    store::DocumentStore,
};

/// Directory all pages live under, relative to the output directory.
const API_DIR: &str = "api";

/// Destination for rendered pages. Paths are relative to the output root.
pub trait PageSink {
    /// Make sure the directory `path` exists.
    fn reserve_dir(&mut self, path: &Path) -> Result<()>;

    /// Write a page to `path`.
    fn write_page(&mut self, path: &Path, text: &str) -> Result<()>;
}

/// Writes pages below a directory on disk.
#[derive(Debug, Clone)]
pub struct FsSink {
    /// Output root.
    root: PathBuf,
}

impl FsSink {
    /// Create a sink writing below `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl PageSink for FsSink {
    fn reserve_dir(&mut self, path: &Path) -> Result<()> {
        fs::create_dir_all(self.root.join(path))?;
        Ok(())
    }

    fn write_page(&mut self, path: &Path, text: &str) -> Result<()> {
        let path = self.root.join(path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        debug!("Writing {}", path.display());
        fs::write(path, text)?;
        Ok(())
    }
}

/// Collects pages in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySink {
    /// Reserved directories.
    pub dirs: BTreeSet<PathBuf>,
    /// Pages by path.
    pub pages: BTreeMap<PathBuf, String>,
}

impl MemorySink {
    /// Create an empty sink.
    pub fn new() -> Self {
        Self::default()
    }

    /// The page at `path`, if one was written.
    pub fn page(&self, path: impl AsRef<Path>) -> Option<&str> {
        self.pages.get(path.as_ref()).map(String::as_str)
    }
}

impl PageSink for MemorySink {
    fn reserve_dir(&mut self, path: &Path) -> Result<()> {
        self.dirs.insert(path.to_path_buf());
        Ok(())
    }

    fn write_page(&mut self, path: &Path, text: &str) -> Result<()> {
        self.pages.insert(path.to_path_buf(), text.to_string());
        Ok(())
    }
}

/// Where a namespace's pages go.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespacePaths {
    /// The namespace's own index page.
    pub index: PathBuf,
    /// Directory holding the pages of its members.
    pub dir: PathBuf,
}

/// Compute the output paths for namespace `name`, or `None` when it lies
/// outside the root namespace.
///
/// The index page of `A::B` is `api/a/_b.rst` so that it cannot collide
/// with the directory `api/a/b` holding the namespace's members.
pub fn namespace_paths(ctx: &Context, name: &str) -> Option<NamespacePaths> {
    if ctx.is_root(name) {
        return Some(NamespacePaths {
            index: PathBuf::from(format!("{API_DIR}.rst")),
            dir: PathBuf::from(API_DIR),
        });
    }
    let parts = lowercase_parts(ctx.relative(name)?);
    let (last, parents) = parts.split_last()?;
    let mut dir = PathBuf::from(API_DIR);
    dir.extend(parents);
    let index = dir.join(format!("_{last}.rst"));
    Some(NamespacePaths {
        index,
        dir: dir.join(last),
    })
}

/// Compute the page path for class `name`, or `None` when it lies outside
/// the root namespace.
pub fn class_path(ctx: &Context, name: &str) -> Option<PathBuf> {
    let parts = lowercase_parts(ctx.relative(name)?);
    let mut path = PathBuf::from(API_DIR);
    path.extend(&parts);
    path.set_extension("rst");
    Some(path)
}

/// Lowercased `::` segments of a name relative to the root.
fn lowercase_parts(relative: &str) -> Vec<String> {
    relative.split("::").map(str::to_lowercase).collect()
}

/// Counts of what a walk produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WalkSummary {
    /// Namespace pages written.
    pub namespaces: usize,
    /// Class and interface pages written.
    pub classes: usize,
    /// Namespaces visited but left alone because they are outside the root.
    pub skipped: Vec<String>,
}

/// Walks a namespace tree, rendering each namespace and class it contains.
pub struct Walker<'a> {
    /// Run settings.
    ctx: &'a Context,
    /// Where compounds come from.
    store: &'a dyn DocumentStore,
    /// Where pages go.
    sink: &'a mut dyn PageSink,
    /// Running totals.
    summary: WalkSummary,
}

impl<'a> Walker<'a> {
    /// Create a walker.
    pub fn new(
        ctx: &'a Context,
        store: &'a dyn DocumentStore,
        sink: &'a mut dyn PageSink,
    ) -> Self {
        Self {
            ctx,
            store,
            sink,
            summary: WalkSummary::default(),
        }
    }

    /// Render the root namespace named in the context, found via the index,
    /// and everything below it.
    pub fn run(mut self) -> Result<WalkSummary> {
        let entry = self.store.namespace(self.ctx.root_namespace())?;
        self.render_namespace(&entry.refid, &entry.name)?;
        Ok(self.summary)
    }

    /// Render namespace `name` with reference id `refid`, then recurse into
    /// its classes and namespaces. Namespaces outside the root are skipped.
    pub fn render_namespace(&mut self, refid: &str, name: &str) -> Result<()> {
        info!("Processing namespace {name}");
        debug!("  refid is {refid}");
        let Some(paths) = namespace_paths(self.ctx, name) else {
            info!("  Skipping, not under {}", self.ctx.root_namespace());
            self.summary.skipped.push(name.to_string());
            return Ok(());
        };
        let compound = self.store.compound(refid)?;
        let page = render_namespace_page(self.ctx, &compound);
        debug!("  Page title will be '{}'", page.title);
        debug!("  Page path will be '{}'", paths.index.display());

        self.sink.reserve_dir(&paths.dir)?;
        self.sink.write_page(&paths.index, &page.text)?;
        self.summary.namespaces += 1;

        for class in &compound.inner_classes {
            self.render_class(&class.refid, &class.name)?;
        }
        for namespace in &compound.inner_namespaces {
            self.render_namespace(&namespace.refid, &namespace.name)?;
        }
        Ok(())
    }

    /// Render the page of class or interface `name`.
    pub fn render_class(&mut self, refid: &str, name: &str) -> Result<()> {
        info!("Processing class {name}");
        debug!("  refid is {refid}");
        let Some(path) = class_path(self.ctx, name) else {
            warn!("  Skipping class {name}, not under {}", self.ctx.root_namespace());
            return Ok(());
        };
        let compound = self.store.compound(refid)?;
        let title = compound.short_name().to_string();
        debug!("  Class title will be '{title}'");
        debug!("  Class path will be '{}'", path.display());

        let text = render_class_page(self.ctx, self.store, &compound, &title)?;
        self.sink.write_page(&path, &text)?;
        self.summary.classes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_namespace_paths() {
        let ctx = Context::new("Geometry");
        assert_eq!(
            namespace_paths(&ctx, "Geometry"),
            Some(NamespacePaths {
                index: PathBuf::from("api.rst"),
                dir: PathBuf::from("api"),
            })
        );
        assert_eq!(
            namespace_paths(&ctx, "Geometry::Solid"),
            Some(NamespacePaths {
                index: PathBuf::from("api/_solid.rst"),
                dir: PathBuf::from("api/solid"),
            })
        );
        assert_eq!(
            namespace_paths(&ctx, "Geometry::Solid::Platonic"),
            Some(NamespacePaths {
                index: PathBuf::from("api/solid/_platonic.rst"),
                dir: PathBuf::from("api/solid/platonic"),
            })
        );
        assert_eq!(namespace_paths(&ctx, "Vendor::Geometry"), None);
    }

    #[test]
    fn test_class_path() {
        let ctx = Context::new("Geometry");
        assert_eq!(
            class_path(&ctx, "Geometry::Circle"),
            Some(PathBuf::from("api/circle.rst"))
        );
        assert_eq!(
            class_path(&ctx, "Geometry::Solid::Cube"),
            Some(PathBuf::from("api/solid/cube.rst"))
        );
        assert_eq!(class_path(&ctx, "Vendor::Cube"), None);
    }
}
