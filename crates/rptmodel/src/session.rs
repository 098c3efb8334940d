use crate::locator::{FileSystemLocator, ResourceLocator};
use rptmodel_config::SessionConfig;
use rptmodel_core::{
    Error, ErrorOrigin,
    handle::ModuleHandle,
    module::{Module, ModuleKind},
    reader::read_module,
    semantic::check_module,
    writer::write_module,
};
use rptmodel_schema::{error::ErrorTree, info::MemberInfo, messages::MessageCatalog};
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

///
/// Design
///
/// An open document together with every library it includes.
///

#[derive(Clone, Debug)]
pub struct Design {
    path: PathBuf,
    module: Module,
}

impl Design {
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub const fn module(&self) -> &Module {
        &self.module
    }

    pub const fn module_mut(&mut self) -> &mut Module {
        &mut self.module
    }

    #[must_use]
    pub fn into_module(self) -> Module {
        self.module
    }

    #[must_use]
    pub const fn handle(&self) -> ModuleHandle<'_> {
        ModuleHandle::new(&self.module)
    }

    #[must_use]
    pub fn check(&self) -> ErrorTree {
        check_module(&self.module)
    }

    /// Serialize the top-level document.
    pub fn write(&self) -> Result<String, Error> {
        write_module(&self.module)
    }
}

///
/// DesignSession
///
/// Opens documents and loads their library inclusion tree.
///

#[derive(Debug)]
pub struct DesignSession<L = FileSystemLocator> {
    config: SessionConfig,
    locator: L,
}

impl DesignSession<FileSystemLocator> {
    #[must_use]
    pub fn new(config: SessionConfig) -> Self {
        let locator = FileSystemLocator::new(config.resource_path.clone());

        Self { config, locator }
    }
}

impl Default for DesignSession<FileSystemLocator> {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

impl<L: ResourceLocator> DesignSession<L> {
    pub const fn with_locator(config: SessionConfig, locator: L) -> Self {
        Self { config, locator }
    }

    #[must_use]
    pub const fn config(&self) -> &SessionConfig {
        &self.config
    }

    #[must_use]
    pub const fn locator(&self) -> &L {
        &self.locator
    }

    /// Open a report design and its libraries.
    pub fn open_design(&self, file: impl AsRef<Path>) -> Result<Design, Error> {
        self.open(file.as_ref(), ModuleKind::Report)
    }

    /// Open a library and the libraries it includes.
    pub fn open_library(&self, file: impl AsRef<Path>) -> Result<Design, Error> {
        self.open(file.as_ref(), ModuleKind::Library)
    }

    /// Open a report design from text. Included libraries are located
    /// relative to `file_name`.
    pub fn open_design_str(&self, file_name: &str, source: &str) -> Result<Design, Error> {
        let path = PathBuf::from(file_name);
        let module = self.read(&path, source, ModuleKind::Report, &mut Vec::new())?;

        self.finish(path, module)
    }

    /// Display name of a reflected member in the configured locale.
    #[must_use]
    pub fn display_name(&self, member: &dyn MemberInfo) -> String {
        member.display_name(MessageCatalog::builtin(), &self.config.locale)
    }

    fn open(&self, file: &Path, kind: ModuleKind) -> Result<Design, Error> {
        let name = file.to_string_lossy();
        let path = self.locator.locate(&name, None).ok_or_else(|| {
            Error::not_found(
                ErrorOrigin::Session,
                format!("document '{}' not found", file.display()),
            )
        })?;

        info!(path = %path.display(), %kind, "opening document");
        let source = self.locator.read(&path)?;
        let module = self.read(&path, &source, kind, &mut Vec::new())?;

        self.finish(path, module)
    }

    fn finish(&self, path: PathBuf, module: Module) -> Result<Design, Error> {
        let errors = check_module(&module);
        if !errors.is_empty() {
            if self.config.strict_semantics {
                return Err(Error::semantic(
                    ErrorOrigin::Session,
                    format!("{}:\n{errors}", path.display()),
                ));
            }
            warn!(
                path = %path.display(),
                errors = errors.len(),
                "document opened with semantic errors"
            );
        }

        Ok(Design { path, module })
    }

    // `stack` holds the inclusion chain leading to `path`
    fn read(
        &self,
        path: &Path,
        source: &str,
        kind: ModuleKind,
        stack: &mut Vec<PathBuf>,
    ) -> Result<Module, Error> {
        let file_name = path.to_string_lossy();
        let mut module = read_module(source, &file_name)?;

        if module.kind() != kind {
            return Err(Error::unsupported(
                ErrorOrigin::Session,
                format!("'{file_name}' is a {}, expected a {kind}", module.kind()),
            ));
        }

        stack.push(path.to_path_buf());
        let loaded = self.load_libraries(&mut module, path, stack);
        stack.pop();
        loaded?;

        Ok(module)
    }

    fn load_libraries(
        &self,
        module: &mut Module,
        path: &Path,
        stack: &mut Vec<PathBuf>,
    ) -> Result<(), Error> {
        let declared: Vec<(String, String)> = module
            .libraries()
            .iter()
            .map(|lib| (lib.file_name.clone(), lib.namespace.clone()))
            .collect();

        for (file_name, namespace) in declared {
            let Some(lib_path) = self.locator.locate(&file_name, Some(path)) else {
                if self.config.strict_semantics {
                    return Err(Error::not_found(
                        ErrorOrigin::Session,
                        format!(
                            "library '{file_name}' included by '{}' not found",
                            path.display()
                        ),
                    ));
                }
                warn!(library = %file_name, including = %path.display(), "library not found");
                continue;
            };

            if stack.contains(&lib_path) {
                let chain = stack
                    .iter()
                    .chain(std::iter::once(&lib_path))
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(" -> ");

                return Err(Error::circular_inclusion(format!(
                    "circular library inclusion: {chain}"
                )));
            }
            if stack.len() > self.config.max_library_depth {
                return Err(Error::unsupported(
                    ErrorOrigin::Session,
                    format!(
                        "library '{file_name}' exceeds the maximum inclusion depth of {}",
                        self.config.max_library_depth
                    ),
                ));
            }

            debug!(
                library = %file_name,
                %namespace,
                path = %lib_path.display(),
                "loading library"
            );
            let source = self.locator.read(&lib_path)?;
            let library = self.read(&lib_path, &source, ModuleKind::Library, stack)?;
            module.attach_library(&namespace, library)?;
        }

        Ok(())
    }
}
