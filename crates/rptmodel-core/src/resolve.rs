//! Reference resolution across the library inclusion tree.
//!
//! Stored references keep exactly what the author wrote. Everything here
//! is recomputed on every call from the current inclusion tree; nothing is
//! cached and nothing is written back.

use crate::{
    element::DesignElement,
    module::Module,
    structure::{PropertySet, Structure, StructureValue},
    value::{ElementRefValue, PropertyValue},
};
use rptmodel_schema::{
    NAMESPACE_SEPARATOR, defn::PropertyDefn, dictionary::dictionary, types::NameSpace,
};
use std::{borrow::Cow, ptr};
use tracing::debug;

///
/// ResolvedElement
///

#[derive(Clone, Copy, Debug)]
pub struct ResolvedElement<'a> {
    /// Module that defines the element.
    pub module: &'a Module,
    pub element: &'a DesignElement,
}

///
/// InheritedValue
///
/// An effective element property value together with the element and
/// module that supplied it, so references can be resolved where they were
/// written.
///

#[derive(Clone, Debug)]
pub struct InheritedValue<'a> {
    pub value: Cow<'a, PropertyValue>,
    pub module: &'a Module,
    pub element: &'a DesignElement,
}

impl InheritedValue<'_> {
    #[must_use]
    pub fn is_default(&self) -> bool {
        matches!(self.value, Cow::Owned(_))
    }
}

/// Resolve `reference` from `module`.
///
/// A qualified reference is looked up in the library reached under its
/// namespace. A plain one is looked up in `module` first, then in its
/// directly included libraries in inclusion order.
#[must_use]
pub fn resolve_element<'a>(
    module: &'a Module,
    reference: &ElementRefValue,
    name_space: NameSpace,
) -> Option<ResolvedElement<'a>> {
    let find = |m: &'a Module| {
        m.find_element(name_space, reference.name())
            .map(|element| ResolvedElement { module: m, element })
    };

    match reference.namespace() {
        Some(ns) => module.find_library(ns).and_then(find),
        None => find(module).or_else(|| module.loaded_libraries().find_map(|(_, lib)| find(lib))),
    }
}

/// Name of `name` (defined in `target`) as seen from `host`.
#[must_use]
pub fn qualify(host: &Module, target: &Module, name: &str) -> String {
    if ptr::eq(host, target) {
        return name.to_string();
    }

    match host.namespace_of(target) {
        Some(ns) => format!("{ns}{NAMESPACE_SEPARATOR}{name}"),
        None => name.to_string(),
    }
}

/// Resolve `reference`, written in `defining`, and render it as seen from
/// `host`. Unresolved references render as written.
#[must_use]
pub fn qualified_reference(
    host: &Module,
    defining: &Module,
    reference: &ElementRefValue,
    name_space: NameSpace,
) -> String {
    match resolve_element(defining, reference, name_space) {
        Some(resolved) => qualify(
            host,
            resolved.module,
            resolved.element.name().unwrap_or(reference.name()),
        ),
        None => {
            debug!(
                reference = %reference,
                module = defining.file_name(),
                %name_space,
                "unresolved element reference"
            );
            reference.to_string()
        }
    }
}

/// Copy of `value` (held by `prop`, written in `defining`) with every
/// element reference rewritten as seen from `host`. Structures and lists
/// are walked member by member.
#[must_use]
pub fn qualify_value(
    host: &Module,
    defining: &Module,
    prop: &PropertyDefn,
    value: &PropertyValue,
) -> PropertyValue {
    match value {
        PropertyValue::ElementRef(reference) => {
            let Some(name_space) = prop.target_name_space(dictionary()) else {
                return value.clone();
            };

            PropertyValue::ElementRef(ElementRefValue::parse(&qualified_reference(
                host, defining, reference, name_space,
            )))
        }
        PropertyValue::List(items) => PropertyValue::List(
            items
                .iter()
                .map(|item| qualify_value(host, defining, prop, item))
                .collect(),
        ),
        PropertyValue::Structure(s) => {
            PropertyValue::Structure(qualify_structure(host, defining, s))
        }
        other => other.clone(),
    }
}

fn qualify_structure(host: &Module, defining: &Module, s: &StructureValue) -> StructureValue {
    let mut out = StructureValue::new(s.defn());

    for (member, value) in s.members() {
        let value = qualify_value(host, defining, member, value);
        // members were checked on the way in; qualification keeps their type
        if let Err(err) = out.set_property(member.name, Some(value)) {
            debug!(member = member.name, %err, "qualified member rejected");
        }
    }

    out
}

/// [`qualify_value`] with host and defining module the same.
#[must_use]
pub fn normalize_references(
    module: &Module,
    prop: &PropertyDefn,
    value: &PropertyValue,
) -> PropertyValue {
    qualify_value(module, module, prop, value)
}

/// The `extends` parent of `element` (living in `module`). The parent must
/// come from an included library and share the element's definition.
#[must_use]
pub fn resolve_parent<'a>(
    module: &'a Module,
    element: &DesignElement,
) -> Option<ResolvedElement<'a>> {
    let reference = element.extends()?;
    let name_space = element.name_space()?;

    // parents are library elements, so a plain name skips the local module
    let parent = match reference.namespace() {
        Some(_) => resolve_element(module, reference, name_space)?,
        None => module.loaded_libraries().find_map(|(_, lib)| {
            lib.find_element(name_space, reference.name())
                .map(|element| ResolvedElement {
                    module: lib,
                    element,
                })
        })?,
    };

    if ptr::eq(parent.module, module) || parent.element.defn().name != element.defn().name {
        return None;
    }

    Some(parent)
}

/// Effective value of property `name` on `element`: local, else inherited
/// through the `extends` chain, else the definition default.
///
/// Parents always live in a strictly nested library, so the walk ends.
#[must_use]
pub fn element_property<'a>(
    module: &'a Module,
    element: &'a DesignElement,
    name: &str,
) -> Option<InheritedValue<'a>> {
    let prop = element.defn().property(name)?;
    let (mut module, mut element) = (module, element);

    loop {
        if let Some(value) = element.local_value(prop.name) {
            return Some(InheritedValue {
                value: Cow::Borrowed(value),
                module,
                element,
            });
        }

        match resolve_parent(module, element) {
            Some(parent) => {
                module = parent.module;
                element = parent.element;
            }
            None => break,
        }
    }

    PropertyValue::default_for(prop).map(|value| InheritedValue {
        value: Cow::Owned(value),
        module,
        element,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        reader::read_module,
        semantic::check_module,
        test_support::{REPORT_XML, library, report_with_library},
    };

    #[test]
    fn plain_reference_falls_back_to_libraries() {
        let report = report_with_library();
        let found = resolve_element(&report, &ElementRefValue::new("Rev"), NameSpace::DataSet)
            .unwrap();

        assert_eq!(found.element.name(), Some("Rev"));
        assert!(!ptr::eq(found.module, &report));
    }

    #[test]
    fn local_element_shadows_library_element() {
        let report = report_with_library();
        let found = resolve_element(
            &report,
            &ElementRefValue::new("Data Set"),
            NameSpace::DataSet,
        )
        .unwrap();

        assert!(ptr::eq(found.module, &report));
    }

    #[test]
    fn qualified_reference_requires_known_namespace() {
        let report = report_with_library();

        assert!(
            resolve_element(
                &report,
                &ElementRefValue::qualified("new_library", "Rev"),
                NameSpace::DataSet
            )
            .is_some()
        );
        assert!(
            resolve_element(
                &report,
                &ElementRefValue::qualified("old_library", "Rev"),
                NameSpace::DataSet
            )
            .is_none()
        );
    }

    #[test]
    fn name_space_is_respected() {
        let report = report_with_library();

        assert!(
            resolve_element(
                &report,
                &ElementRefValue::new("Data Source"),
                NameSpace::DataSet
            )
            .is_none()
        );
    }

    #[test]
    fn qualification_is_relative_to_host() {
        let report = report_with_library();
        let lib = report.find_library("new_library").unwrap();
        let rev = ElementRefValue::new("Rev");

        assert_eq!(
            qualified_reference(&report, lib, &rev, NameSpace::DataSet),
            "new_library.Rev"
        );
        assert_eq!(qualified_reference(lib, lib, &rev, NameSpace::DataSet), "Rev");
        assert_eq!(
            qualified_reference(&report, &report, &ElementRefValue::new("Nope"), NameSpace::DataSet),
            "Nope"
        );
    }

    #[test]
    fn inherited_value_reports_its_defining_module() {
        let report = report_with_library();
        let local = report.find_element(NameSpace::DataSet, "Data Set").unwrap();

        let inherited = element_property(&report, local, "joinConditions").unwrap();
        assert!(!ptr::eq(inherited.module, &report));
        assert!(!inherited.is_default());

        let cached = element_property(&report, local, "cachedRowCount");
        assert!(cached.is_none());
    }

    #[test]
    fn plain_extends_skips_the_element_itself() {
        let xml = REPORT_XML.replace(
            r#"extends="new_library.Data Set""#,
            r#"extends="Data Set""#,
        );
        let mut report = read_module(&xml, "report.rptdesign").unwrap();
        report.attach_library("new_library", library()).unwrap();

        let local = report.find_element(NameSpace::DataSet, "Data Set").unwrap();
        let parent = resolve_parent(&report, local).unwrap();
        assert!(!ptr::eq(parent.module, &report));
        assert_eq!(parent.element.name(), Some("Data Set"));

        assert!(element_property(&report, local, "joinConditions").is_some());
        assert!(check_module(&report).is_empty());
    }
}
