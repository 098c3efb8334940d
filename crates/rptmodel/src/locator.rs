use rptmodel_core::{Error, ErrorOrigin};
use std::{
    collections::BTreeMap,
    fs,
    path::{Path, PathBuf},
};

///
/// ResourceLocator
///
/// Finds and reads documents. `base` is the path of the including
/// document, or `None` for a document opened directly.
///

pub trait ResourceLocator {
    fn locate(&self, file_name: &str, base: Option<&Path>) -> Option<PathBuf>;

    fn read(&self, path: &Path) -> Result<String, Error>;
}

// including document's directory, then the resource path, then as given
fn candidates(
    file_name: &str,
    base: Option<&Path>,
    resource_path: Option<&Path>,
) -> Vec<PathBuf> {
    let file = Path::new(file_name);
    if file.is_absolute() {
        return vec![file.to_path_buf()];
    }

    let mut out = Vec::with_capacity(3);
    if let Some(dir) = base.and_then(Path::parent) {
        out.push(dir.join(file));
    }
    if let Some(dir) = resource_path {
        out.push(dir.join(file));
    }
    if base.is_none() {
        out.push(file.to_path_buf());
    }

    out
}

///
/// FileSystemLocator
///

#[derive(Clone, Debug, Default)]
pub struct FileSystemLocator {
    resource_path: Option<PathBuf>,
}

impl FileSystemLocator {
    #[must_use]
    pub const fn new(resource_path: Option<PathBuf>) -> Self {
        Self { resource_path }
    }
}

impl ResourceLocator for FileSystemLocator {
    fn locate(&self, file_name: &str, base: Option<&Path>) -> Option<PathBuf> {
        candidates(file_name, base, self.resource_path.as_deref())
            .into_iter()
            .find(|path| path.is_file())
            .map(|path| fs::canonicalize(&path).unwrap_or(path))
    }

    fn read(&self, path: &Path) -> Result<String, Error> {
        fs::read_to_string(path).map_err(|err| {
            Error::io(
                ErrorOrigin::Session,
                format!("cannot read '{}': {err}", path.display()),
            )
        })
    }
}

///
/// MemoryLocator
///
/// In-memory documents keyed by path, for embedding and tests.
///

#[derive(Clone, Debug, Default)]
pub struct MemoryLocator {
    files: BTreeMap<PathBuf, String>,
    resource_path: Option<PathBuf>,
}

impl MemoryLocator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_resource_path(mut self, dir: impl Into<PathBuf>) -> Self {
        self.resource_path = Some(dir.into());
        self
    }

    pub fn insert(&mut self, path: impl Into<PathBuf>, source: impl Into<String>) {
        self.files.insert(path.into(), source.into());
    }

    #[must_use]
    pub fn with(mut self, path: impl Into<PathBuf>, source: impl Into<String>) -> Self {
        self.insert(path, source);
        self
    }
}

impl ResourceLocator for MemoryLocator {
    fn locate(&self, file_name: &str, base: Option<&Path>) -> Option<PathBuf> {
        candidates(file_name, base, self.resource_path.as_deref())
            .into_iter()
            .find(|path| self.files.contains_key(path))
    }

    fn read(&self, path: &Path) -> Result<String, Error> {
        self.files.get(path).cloned().ok_or_else(|| {
            Error::not_found(
                ErrorOrigin::Session,
                format!("no document at '{}'", path.display()),
            )
        })
    }
}
