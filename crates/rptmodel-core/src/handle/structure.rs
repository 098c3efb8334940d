use crate::{
    module::Module,
    resolve::{qualify_value, resolve_element},
    structure::{Structure, StructureValue},
    value::PropertyValue,
};
use rptmodel_schema::dictionary::dictionary;
use std::slice;

use super::ElementHandle;

///
/// StructureHandle
///
/// One structure value read from `module` (where it was written) and viewed
/// from `host`.
///

#[derive(Clone, Copy, Debug)]
pub struct StructureHandle<'a> {
    host: &'a Module,
    module: &'a Module,
    structure: &'a StructureValue,
}

impl<'a> StructureHandle<'a> {
    pub(crate) const fn new(
        host: &'a Module,
        module: &'a Module,
        structure: &'a StructureValue,
    ) -> Self {
        Self {
            host,
            module,
            structure,
        }
    }

    #[must_use]
    pub const fn structure(&self) -> &'a StructureValue {
        self.structure
    }

    #[must_use]
    pub fn struct_name(&self) -> &'static str {
        self.structure.struct_name()
    }

    /// Member value (or its default) with references qualified for the host.
    #[must_use]
    pub fn value(&self, member: &str) -> Option<PropertyValue> {
        let defn = self.structure.defn().member(member)?;
        let value = self.structure.value_or_default(member)?;

        Some(qualify_value(self.host, self.module, defn, &value))
    }

    #[must_use]
    pub fn text(&self, member: &str) -> Option<String> {
        self.value(member).and_then(|v| v.to_literal())
    }

    /// Element referenced by `member`, viewed from the host.
    #[must_use]
    pub fn target(&self, member: &str) -> Option<ElementHandle<'a>> {
        let defn = self.structure.defn().member(member)?;
        let reference = self.structure.get(member)?.as_element_ref()?;
        let name_space = defn.target_name_space(dictionary())?;
        let resolved = resolve_element(self.module, reference, name_space)?;

        Some(ElementHandle::new(self.host, resolved.module, resolved.element))
    }
}

///
/// StructureIter
///
/// Structure items of one list property in definition order. Each call that
/// produces one starts from the beginning.
///

#[derive(Clone, Debug)]
pub struct StructureIter<'a> {
    host: &'a Module,
    module: &'a Module,
    items: slice::Iter<'a, PropertyValue>,
}

impl<'a> StructureIter<'a> {
    pub(crate) fn new(host: &'a Module, module: &'a Module, items: &'a [PropertyValue]) -> Self {
        Self {
            host,
            module,
            items: items.iter(),
        }
    }

    pub(crate) fn empty(host: &'a Module) -> Self {
        Self::new(host, host, &[])
    }
}

impl<'a> Iterator for StructureIter<'a> {
    type Item = StructureHandle<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.items.by_ref().find_map(|item| {
            item.as_structure()
                .map(|s| StructureHandle::new(self.host, self.module, s))
        })
    }
}
