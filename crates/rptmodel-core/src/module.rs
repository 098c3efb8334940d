use crate::{
    MODEL_VERSION,
    element::{DesignElement, ElementId},
    error::{Error, ErrorOrigin, PropertyError},
    structure::{PropertySet, store},
    value::{PropertyValue, validate_name},
};
use derive_more::Display;
use rptmodel_schema::{
    defn::{ElementDefn, PropertyDefn},
    dictionary::builtin::{LIBRARY, REPORT_DESIGN},
    types::NameSpace,
};
use std::{collections::BTreeMap, path::Path, ptr};

/// Module property holding the library declarations.
pub const LIBRARIES_PROPERTY: &str = "libraries";

///
/// ModuleKind
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum ModuleKind {
    #[display("report")]
    Report,
    #[display("library")]
    Library,
}

impl ModuleKind {
    #[must_use]
    pub fn defn(self) -> &'static ElementDefn {
        match self {
            Self::Report => &REPORT_DESIGN,
            Self::Library => &LIBRARY,
        }
    }

    #[must_use]
    pub fn xml_tag(self) -> &'static str {
        self.defn().xml_tag
    }

    #[must_use]
    pub fn from_tag(tag: &str) -> Option<Self> {
        [Self::Report, Self::Library]
            .into_iter()
            .find(|k| k.xml_tag() == tag)
    }
}

///
/// IncludedLibrary
///
/// A library declared by a module. The declaring module owns the loaded
/// library, so inclusion forms a tree.
///

#[derive(Clone, Debug)]
pub struct IncludedLibrary {
    pub file_name: String,
    pub namespace: String,
    module: Option<Module>,
}

impl IncludedLibrary {
    #[must_use]
    pub const fn module(&self) -> Option<&Module> {
        self.module.as_ref()
    }

    #[must_use]
    pub const fn is_loaded(&self) -> bool {
        self.module.is_some()
    }

    /// Namespace derived from a library file name: its stem.
    #[must_use]
    pub fn default_namespace(file_name: &str) -> String {
        Path::new(file_name)
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or(file_name)
            .to_string()
    }
}

///
/// Module
///
/// A report design or a library: module-level properties, named elements
/// and the libraries it includes.
///

#[derive(Clone, Debug)]
pub struct Module {
    kind: ModuleKind,
    file_name: String,
    version: String,
    properties: BTreeMap<&'static str, PropertyValue>,
    elements: Vec<DesignElement>,
    libraries: Vec<IncludedLibrary>,
    next_id: u64,
}

impl Module {
    pub fn new(kind: ModuleKind, file_name: impl Into<String>) -> Self {
        Self {
            kind,
            file_name: file_name.into(),
            version: MODEL_VERSION.to_string(),
            properties: BTreeMap::new(),
            elements: Vec::new(),
            libraries: Vec::new(),
            next_id: 1,
        }
    }

    #[must_use]
    pub const fn kind(&self) -> ModuleKind {
        self.kind
    }

    #[must_use]
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    #[must_use]
    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn set_version(&mut self, version: impl Into<String>) {
        self.version = version.into();
    }

    ///
    /// ELEMENTS
    ///

    /// All elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = &DesignElement> {
        self.elements.iter()
    }

    pub fn elements_in(&self, name_space: NameSpace) -> impl Iterator<Item = &DesignElement> {
        self.elements
            .iter()
            .filter(move |e| e.name_space() == Some(name_space))
    }

    /// Find a local element by name; libraries are not searched.
    #[must_use]
    pub fn find_element(&self, name_space: NameSpace, name: &str) -> Option<&DesignElement> {
        self.elements_in(name_space).find(|e| e.name() == Some(name))
    }

    pub fn find_element_mut(
        &mut self,
        name_space: NameSpace,
        name: &str,
    ) -> Option<&mut DesignElement> {
        self.elements
            .iter_mut()
            .find(|e| e.name_space() == Some(name_space) && e.name() == Some(name))
    }

    #[must_use]
    pub fn element_by_id(&self, id: ElementId) -> Option<&DesignElement> {
        self.elements.iter().find(|e| e.id() == id)
    }

    /// Add a named, concrete element. Names are unique per name space.
    pub fn add_element(&mut self, element: DesignElement) -> Result<ElementId, Error> {
        let defn = element.defn();
        if defn.is_abstract {
            return Err(Error::unsupported(
                ErrorOrigin::Module,
                format!("element definition '{}' is abstract", defn.name),
            ));
        }
        let Some(name_space) = element.name_space() else {
            return Err(Error::unsupported(
                ErrorOrigin::Module,
                format!("element definition '{}' has no name space", defn.name),
            ));
        };
        let Some(name) = element.name() else {
            return Err(Error::semantic(
                ErrorOrigin::Module,
                format!("'{}' element must be named", defn.name),
            ));
        };
        if self.find_element(name_space, name).is_some() {
            return Err(Error::semantic(
                ErrorOrigin::Module,
                format!("duplicate {name_space} name '{name}' in '{}'", self.file_name),
            ));
        }

        self.insert_element(element)
    }

    /// Append without name checks; the reader relies on the semantic check
    /// to report conflicts in loaded documents.
    pub(crate) fn insert_element(
        &mut self,
        mut element: DesignElement,
    ) -> Result<ElementId, Error> {
        let id = element.id();
        if id.is_assigned() && self.element_by_id(id).is_none() {
            self.next_id = self.next_id.max(Self::following_id(id.0)?);
        } else {
            let next = Self::following_id(self.next_id)?;
            element.set_id(ElementId(self.next_id));
            self.next_id = next;
        }

        let id = element.id();
        self.elements.push(element);

        Ok(id)
    }

    fn following_id(id: u64) -> Result<u64, Error> {
        id.checked_add(1).ok_or_else(|| {
            Error::unsupported(
                ErrorOrigin::Module,
                format!("element id {id} leaves no room for further elements"),
            )
        })
    }

    pub fn remove_element(&mut self, id: ElementId) -> Option<DesignElement> {
        let pos = self.elements.iter().position(|e| e.id() == id)?;

        Some(self.elements.remove(pos))
    }

    ///
    /// LIBRARIES
    ///

    #[must_use]
    pub fn libraries(&self) -> &[IncludedLibrary] {
        &self.libraries
    }

    /// Directly included library with `namespace`.
    #[must_use]
    pub fn library(&self, namespace: &str) -> Option<&IncludedLibrary> {
        self.libraries.iter().find(|l| l.namespace == namespace)
    }

    /// Loaded libraries directly included by this module, in inclusion order.
    pub fn loaded_libraries(&self) -> impl Iterator<Item = (&str, &Self)> {
        self.libraries
            .iter()
            .filter_map(|l| l.module().map(|m| (l.namespace.as_str(), m)))
    }

    /// Loaded library reachable under `namespace`: direct inclusions first,
    /// then nested ones depth-first.
    #[must_use]
    pub fn find_library(&self, namespace: &str) -> Option<&Self> {
        if let Some(module) = self.library(namespace).and_then(IncludedLibrary::module) {
            return Some(module);
        }

        self.loaded_libraries()
            .find_map(|(_, lib)| lib.find_library(namespace))
    }

    /// Declare a library. The namespace defaults to the file stem.
    pub fn include_library(
        &mut self,
        file_name: impl Into<String>,
        namespace: Option<String>,
    ) -> Result<(), Error> {
        let file_name = file_name.into();
        let namespace =
            namespace.unwrap_or_else(|| IncludedLibrary::default_namespace(&file_name));
        validate_name(&namespace)?;

        if self.library(&namespace).is_some() {
            return Err(Error::semantic(
                ErrorOrigin::Module,
                format!("library namespace '{namespace}' is already declared"),
            ));
        }
        self.push_library(file_name, namespace);

        Ok(())
    }

    pub(crate) fn push_library(&mut self, file_name: String, namespace: String) {
        self.libraries.push(IncludedLibrary {
            file_name,
            namespace,
            module: None,
        });
    }

    /// Attach the loaded module for a declared library.
    pub fn attach_library(&mut self, namespace: &str, library: Self) -> Result<(), Error> {
        if library.kind != ModuleKind::Library {
            return Err(Error::unsupported(
                ErrorOrigin::Module,
                format!("'{}' is not a library", library.file_name),
            ));
        }

        let slot = self
            .libraries
            .iter_mut()
            .find(|l| l.namespace == namespace)
            .ok_or_else(|| {
                Error::not_found(
                    ErrorOrigin::Module,
                    format!("no library declared with namespace '{namespace}'"),
                )
            })?;
        slot.module = Some(library);

        Ok(())
    }

    /// Drop the declaration (and loaded module) for `namespace`.
    pub fn remove_library(&mut self, namespace: &str) -> Option<IncludedLibrary> {
        let pos = self.libraries.iter().position(|l| l.namespace == namespace)?;

        Some(self.libraries.remove(pos))
    }

    /// Namespace under which this module reaches `target`, walking the
    /// inclusion tree. `None` for the module itself or an unrelated module.
    #[must_use]
    pub fn namespace_of(&self, target: &Self) -> Option<&str> {
        self.loaded_libraries().find_map(|(ns, lib)| {
            if ptr::eq(lib, target) {
                Some(ns)
            } else {
                lib.namespace_of(target)
            }
        })
    }

    /// Whether `target` is this module or one of its (nested) libraries.
    #[must_use]
    pub fn contains(&self, target: &Self) -> bool {
        ptr::eq(self, target) || self.namespace_of(target).is_some()
    }

    /// Module-level value, falling back to the definition default.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<PropertyValue> {
        let prop = self.property_defn(name)?;

        self.properties
            .get(prop.name)
            .cloned()
            .or_else(|| PropertyValue::default_for(prop))
    }

    /// Locally set module properties in definition order.
    pub fn local_values(&self) -> impl Iterator<Item = (&'static PropertyDefn, &PropertyValue)> {
        self.kind
            .defn()
            .all_properties()
            .into_iter()
            .filter_map(|p| self.properties.get(p.name).map(|v| (p, v)))
    }
}

impl PropertySet for Module {
    fn owner_name(&self) -> &str {
        self.kind.defn().name
    }

    fn property_defn(&self, name: &str) -> Option<&'static PropertyDefn> {
        self.kind.defn().property(name)
    }

    fn local_value(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    fn set_property(
        &mut self,
        name: &str,
        value: Option<PropertyValue>,
    ) -> Result<(), PropertyError> {
        if name == LIBRARIES_PROPERTY {
            return Err(PropertyError::Managed {
                property: name.to_string(),
            });
        }

        let defn = self.kind.defn();
        let prop = defn
            .property(name)
            .ok_or_else(|| PropertyError::NotDefined {
                owner: defn.name.to_string(),
                property: name.to_string(),
            })?;

        store(&mut self.properties, prop, value)
    }
}
