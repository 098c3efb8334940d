//! Read-only views over an open module.
//!
//! Every handle carries the *host* module it was obtained from, so element
//! references read through it come back qualified as the host sees them.

mod data_set;
mod join_condition;
mod structure;


pub use data_set::{DataSetHandle, JointDataSetHandle};
pub use join_condition::JoinConditionHandle;
pub use structure::{StructureHandle, StructureIter};

use crate::{
    element::DesignElement,
    module::{IncludedLibrary, Module, ModuleKind},
    resolve::{qualify, qualify_value, resolve_element, resolve_parent},
    semantic::check_module,
    value::{ElementRefValue, PropertyValue},
};
use rptmodel_schema::{error::ErrorTree, info::MethodInfo, types::NameSpace};
use std::borrow::Cow;

///
/// ModuleHandle
///

#[derive(Clone, Copy, Debug)]
pub struct ModuleHandle<'a> {
    module: &'a Module,
}

impl<'a> ModuleHandle<'a> {
    #[must_use]
    pub const fn new(module: &'a Module) -> Self {
        Self { module }
    }

    #[must_use]
    pub const fn module(&self) -> &'a Module {
        self.module
    }

    #[must_use]
    pub fn file_name(&self) -> &'a str {
        self.module.file_name()
    }

    #[must_use]
    pub const fn kind(&self) -> ModuleKind {
        self.module.kind()
    }

    /// Find a data set by plain or namespace-qualified name.
    #[must_use]
    pub fn find_data_set(&self, name: &str) -> Option<DataSetHandle<'a>> {
        self.find_element(NameSpace::DataSet, name)
            .map(DataSetHandle::new)
    }

    /// Find a data source by plain or namespace-qualified name.
    #[must_use]
    pub fn find_data_source(&self, name: &str) -> Option<ElementHandle<'a>> {
        self.find_element(NameSpace::DataSource, name)
    }

    fn find_element(&self, name_space: NameSpace, name: &str) -> Option<ElementHandle<'a>> {
        let reference = ElementRefValue::parse(name);
        let resolved = resolve_element(self.module, &reference, name_space)?;

        Some(ElementHandle::new(self.module, resolved.module, resolved.element))
    }

    /// Data sets defined in this module, in document order.
    pub fn data_sets(&self) -> impl Iterator<Item = DataSetHandle<'a>> + use<'a> {
        let module = self.module;

        module
            .elements_in(NameSpace::DataSet)
            .map(move |e| DataSetHandle::new(ElementHandle::new(module, module, e)))
    }

    /// Data sources defined in this module, in document order.
    pub fn data_sources(&self) -> impl Iterator<Item = ElementHandle<'a>> + use<'a> {
        let module = self.module;

        module
            .elements_in(NameSpace::DataSource)
            .map(move |e| ElementHandle::new(module, module, e))
    }

    #[must_use]
    pub fn libraries(&self) -> &'a [IncludedLibrary] {
        self.module.libraries()
    }

    /// The loaded library reached under `namespace`, viewed on its own.
    #[must_use]
    pub fn library(&self, namespace: &str) -> Option<Self> {
        self.module.find_library(namespace).map(Self::new)
    }

    /// Module-level property with its definition default.
    #[must_use]
    pub fn property(&self, name: &str) -> Option<PropertyValue> {
        self.module.property(name)
    }

    /// Semantic errors of this module and its libraries; empty when clean.
    #[must_use]
    pub fn check(&self) -> ErrorTree {
        check_module(self.module)
    }
}

///
/// ElementHandle
///

#[derive(Clone, Copy, Debug)]
pub struct ElementHandle<'a> {
    host: &'a Module,
    module: &'a Module,
    element: &'a DesignElement,
}

impl<'a> ElementHandle<'a> {
    pub(crate) const fn new(
        host: &'a Module,
        module: &'a Module,
        element: &'a DesignElement,
    ) -> Self {
        Self {
            host,
            module,
            element,
        }
    }

    #[must_use]
    pub const fn element(&self) -> &'a DesignElement {
        self.element
    }

    /// Module that defines this element.
    #[must_use]
    pub const fn module(&self) -> &'a Module {
        self.module
    }

    #[must_use]
    pub const fn host(&self) -> &'a Module {
        self.host
    }

    #[must_use]
    pub fn name(&self) -> Option<&'a str> {
        self.element.name()
    }

    /// Name as seen from the host, e.g. `new_library.Rev`.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        qualify(self.host, self.module, self.name().unwrap_or_default())
    }

    #[must_use]
    pub fn defn_name(&self) -> &'static str {
        self.element.defn().name
    }

    #[must_use]
    pub fn is_kind_of(&self, defn_name: &str) -> bool {
        self.element.defn().is_kind_of(defn_name)
    }

    /// Effective value (local, inherited or default) with element
    /// references qualified for the host.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<PropertyValue> {
        let inherited = self.element.property(self.module, name)?;
        let prop = self.element.defn().property(name)?;

        Some(qualify_value(
            self.host,
            inherited.module,
            prop,
            &inherited.value,
        ))
    }

    /// Scalar value as text.
    #[must_use]
    pub fn text(&self, name: &str) -> Option<String> {
        self.value(name).and_then(|v| v.to_literal())
    }

    /// Structure list `name`, local or inherited, in definition order.
    #[must_use]
    pub fn structures(&self, name: &str) -> StructureIter<'a> {
        match self.element.property(self.module, name) {
            Some(inherited) => match inherited.value {
                Cow::Borrowed(PropertyValue::List(items)) => {
                    StructureIter::new(self.host, inherited.module, items)
                }
                _ => StructureIter::empty(self.host),
            },
            None => StructureIter::empty(self.host),
        }
    }

    /// Scripting hook `name` with its (possibly inherited) script body.
    #[must_use]
    pub fn method(&self, name: &str) -> Option<MethodHandle> {
        let info = self.element.defn().method(name)?;
        let script = self.text(name).filter(|s| !s.is_empty());

        Some(MethodHandle { info, script })
    }

    /// All visible hooks, ancestors first.
    pub fn methods(&self) -> impl Iterator<Item = MethodHandle> + use<'a> {
        let this = *self;

        self.element
            .defn()
            .all_methods()
            .into_iter()
            .filter_map(move |m| this.method(m.name))
    }

    /// The library element this one extends, viewed from the same host.
    #[must_use]
    pub fn extends(&self) -> Option<Self> {
        let parent = resolve_parent(self.module, self.element)?;

        Some(Self::new(self.host, parent.module, parent.element))
    }
}

///
/// MethodHandle
///

#[derive(Clone, Debug)]
pub struct MethodHandle {
    pub info: &'static MethodInfo,
    pub script: Option<String>,
}

impl MethodHandle {
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.info.name
    }

    #[must_use]
    pub const fn has_script(&self) -> bool {
        self.script.is_some()
    }
}
