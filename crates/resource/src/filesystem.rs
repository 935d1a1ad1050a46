//! Filesystem-based asset provider.
//!
//! Keys are resolved relative to a base directory and may never escape it:
//! absolute keys and keys containing `..` are rejected.

use refcards_traits::{ResourceError, ResourceProvider, SharedResourceData};
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

#[derive(Debug)]
pub struct FilesystemResourceProvider {
    base_path: PathBuf,
    /// Canonicalized base path for containment checks
    canonical_base: Option<PathBuf>,
}

impl FilesystemResourceProvider {
    pub fn new<P: AsRef<Path>>(base_path: P) -> Self {
        let base = base_path.as_ref().to_path_buf();
        // May fail if the directory doesn't exist yet; loads will then report NotFound.
        let canonical = base.canonicalize().ok();
        Self {
            base_path: base,
            canonical_base: canonical,
        }
    }

    /// Splits a file path into a provider rooted at its parent directory and
    /// the key that addresses the file itself.
    ///
    /// Returns `None` if the path has no file name component.
    pub fn for_file<P: AsRef<Path>>(path: P) -> Option<(Self, String)> {
        let path = path.as_ref();
        let file_name = path.file_name()?.to_str()?.to_string();
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        Some((Self::new(parent), file_name))
    }

    pub fn base(&self) -> &Path {
        &self.base_path
    }

    /// Returns `None` if the key would escape the base directory.
    fn resolve_path_safe(&self, key: &str) -> Option<PathBuf> {
        if Path::new(key).is_absolute() {
            return None;
        }
        if Path::new(key)
            .components()
            .any(|c| matches!(c, Component::ParentDir))
        {
            return None;
        }

        let full_path = self.base_path.join(key);

        // Symlinks inside the base may still point outside of it.
        if let Ok(canonical) = full_path.canonicalize()
            && let Some(ref base) = self.canonical_base
        {
            return canonical.starts_with(base).then_some(canonical);
        }

        Some(full_path)
    }
}

impl ResourceProvider for FilesystemResourceProvider {
    fn load(&self, path: &str) -> Result<SharedResourceData, ResourceError> {
        let full_path = self.resolve_path_safe(path).ok_or_else(|| {
            log::warn!("Rejected asset key outside of base directory: {}", path);
            ResourceError::NotFound(format!("{} (outside base directory)", path))
        })?;

        std::fs::read(&full_path).map(Arc::new).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ResourceError::NotFound(path.to_string())
            } else {
                ResourceError::LoadFailed {
                    path: path.to_string(),
                    message: e.to_string(),
                }
            }
        })
    }

    fn name(&self) -> &'static str {
        "FilesystemResourceProvider"
    }
}
