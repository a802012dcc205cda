//! Maps request targets to files under the document root.

use std::path::{Component, Path, PathBuf};

use anyhow::Context;

/// Why a target could not be mapped to a path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// Target is empty or does not begin with `/`
    NotAbsolute,
    /// Target climbs above the root or contains a root or prefix component
    Traversal,
    /// Canonical path lies outside the document root (e.g. via a symlink)
    OutsideRoot,
}

#[derive(Debug, Clone)]
pub struct PathResolver {
    root: PathBuf,
    default_index: String,
}

impl PathResolver {
    /// Builds a resolver over `root`.
    ///
    /// Fails unless `root` exists and is a directory. The root is stored in
    /// canonical form so containment checks compare like with like.
    pub fn new(root: impl AsRef<Path>, default_index: impl Into<String>) -> anyhow::Result<Self> {
        let root = root.as_ref();
        let root = root
            .canonicalize()
            .with_context(|| format!("document root {} is not accessible", root.display()))?;

        if !root.is_dir() {
            anyhow::bail!("document root {} is not a directory", root.display());
        }

        Ok(Self {
            root,
            default_index: default_index.into(),
        })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn default_index(&self) -> &str {
        &self.default_index
    }

    /// Joins `target` onto the root.
    ///
    /// A trailing `/` gets the default index appended, then the single
    /// leading `/` is stripped. `.` segments are dropped and `..` removes the
    /// segment before it; a `..` that would climb above the root, or a root
    /// or prefix component, is rejected. Whether the file exists is left to
    /// the caller.
    pub fn resolve(&self, target: &str) -> Result<PathBuf, ResolveError> {
        let relative = target.strip_prefix('/').ok_or(ResolveError::NotAbsolute)?;

        let mut parts = Vec::new();
        for component in Path::new(relative).components() {
            match component {
                Component::Normal(part) => parts.push(part),
                Component::CurDir => {}
                Component::ParentDir => {
                    parts.pop().ok_or(ResolveError::Traversal)?;
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(ResolveError::Traversal);
                }
            }
        }

        let mut path = self.root.clone();
        path.extend(parts);
        if target.ends_with('/') {
            path.push(&self.default_index);
        }

        Ok(path)
    }

    /// Canonicalizes a resolved path and checks it is still under the root.
    ///
    /// Returns `Ok(None)` when the path does not exist.
    pub async fn confine(&self, path: &Path) -> Result<Option<PathBuf>, ResolveError> {
        let canonical = match tokio::fs::canonicalize(path).await {
            Ok(canonical) => canonical,
            Err(_) => return Ok(None),
        };

        if canonical.starts_with(&self.root) {
            Ok(Some(canonical))
        } else {
            Err(ResolveError::OutsideRoot)
        }
    }

    /// Path of a fallback document directly under the root.
    pub fn fallback(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }
}
