//! Semantic check of a loaded module.
//!
//! Problems are collected into an [`ErrorTree`] and never abort a load.
//! Routes look like `data-sets/Data Set.joinConditions[0].leftDataSet`.

use crate::{
    element::DesignElement,
    module::Module,
    resolve::{resolve_element, resolve_parent},
    structure::{PropertySet, Structure, StructureValue},
    value::{ElementRefValue, PropertyValue},
};
use rptmodel_schema::{
    defn::PropertyDefn, dictionary::dictionary, err, error::ErrorTree, types::NameSpace,
};
use std::collections::BTreeSet;

/// Check `module` and, recursively, every loaded library.
#[must_use]
pub fn check_module(module: &Module) -> ErrorTree {
    let mut errs = ErrorTree::new();

    check_libraries(module, &mut errs);
    for name_space in NameSpace::ALL {
        check_duplicate_names(module, name_space, &mut errs);
    }
    for element in module.elements() {
        errs.merge_for(element_route(element), check_element(module, element));
    }

    errs
}

fn element_route(element: &DesignElement) -> String {
    let slot = element
        .name_space()
        .map_or("elements", |ns| ns.slot_tag());

    format!("{slot}/{}", element.name().unwrap_or("<unnamed>"))
}

fn check_libraries(module: &Module, errs: &mut ErrorTree) {
    let mut seen = BTreeSet::new();

    for lib in module.libraries() {
        if !seen.insert(lib.namespace.as_str()) {
            err!(errs, "duplicate library namespace '{}'", lib.namespace);
        }

        match lib.module() {
            Some(library) => {
                errs.merge_for(format!("library '{}'", lib.namespace), check_module(library));
            }
            None => err!(
                errs,
                "library '{}' ({}) is not loaded",
                lib.namespace,
                lib.file_name
            ),
        }
    }
}

fn check_duplicate_names(module: &Module, name_space: NameSpace, errs: &mut ErrorTree) {
    let mut seen = BTreeSet::new();

    for element in module.elements_in(name_space) {
        match element.name() {
            Some(name) if !seen.insert(name) => {
                err!(errs, "duplicate {name_space} name '{name}'");
            }
            Some(_) => {}
            None => err!(errs, "unnamed '{}' element", element.defn().name),
        }
    }
}

fn check_element(module: &Module, element: &DesignElement) -> ErrorTree {
    let mut errs = ErrorTree::new();

    if let Some(parent) = element.extends() {
        check_extends(module, element, parent, &mut errs);
    }

    for (prop, value) in element.local_values() {
        errs.merge_for(prop.name, check_value(module, prop, value));
    }

    errs
}

fn check_extends(
    module: &Module,
    element: &DesignElement,
    parent: &ElementRefValue,
    errs: &mut ErrorTree,
) {
    if resolve_parent(module, element).is_some() {
        return;
    }

    let found = element
        .name_space()
        .and_then(|ns| resolve_element(module, parent, ns));

    match found {
        None => err!(errs, "extends '{parent}' which cannot be found"),
        Some(target) if std::ptr::eq(target.module, module) => {
            err!(errs, "extends '{parent}' which is not a library element");
        }
        Some(target) => err!(
            errs,
            "extends '{parent}' of kind '{}', expected '{}'",
            target.element.defn().name,
            element.defn().name
        ),
    }
}

fn check_value(module: &Module, prop: &PropertyDefn, value: &PropertyValue) -> ErrorTree {
    let mut errs = ErrorTree::new();

    match value {
        PropertyValue::List(items) => {
            for (i, item) in items.iter().enumerate() {
                errs.merge_for(format!("[{i}]"), check_value(module, prop, item));
            }
        }
        PropertyValue::ElementRef(reference) => check_reference(module, prop, reference, &mut errs),
        PropertyValue::Structure(s) => errs.merge(check_structure(module, s)),
        _ => {}
    }

    errs
}

fn check_structure(module: &Module, s: &StructureValue) -> ErrorTree {
    let mut errs = ErrorTree::new();

    for member in s.defn().members {
        match s.local_value(member.name) {
            Some(value) => errs.merge_for(member.name, check_value(module, member, value)),
            None if member.cardinality.is_required() && member.default.is_none() => {
                errs.add_for(member.name, "required member is not set");
            }
            None => {}
        }
    }

    errs
}

fn check_reference(
    module: &Module,
    prop: &PropertyDefn,
    reference: &ElementRefValue,
    errs: &mut ErrorTree,
) {
    let dict = dictionary();
    let Some(name_space) = prop.target_name_space(dict) else {
        return;
    };

    match resolve_element(module, reference, name_space) {
        None => err!(errs, "unresolved reference '{reference}'"),
        Some(target) if !prop.allows_target(dict, target.element.defn().name) => err!(
            errs,
            "reference '{reference}' targets a '{}', expected one of {:?}",
            target.element.defn().name,
            prop.element_types
        ),
        Some(_) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        module::ModuleKind,
        test_support::{library, report_with_library},
        value::Expression,
    };

    #[test]
    fn fixture_modules_are_clean() {
        assert!(check_module(&library()).is_empty());

        let report = report_with_library();
        let errs = check_module(&report);
        assert!(errs.is_empty(), "{errs}");
    }

    #[test]
    fn unloaded_library_is_reported() {
        let mut report = Module::new(ModuleKind::Report, "r.rptdesign");
        report.include_library("missing.rptlibrary", None).unwrap();

        let text = check_module(&report).to_string();
        assert!(text.contains("library 'missing' (missing.rptlibrary) is not loaded"));
    }

    #[test]
    fn unresolved_structure_reference_has_full_route() {
        let mut report = report_with_library();
        let ds = report
            .find_element_mut(NameSpace::DataSet, "Local Join")
            .unwrap();

        let condition = StructureValue::by_name("JoinCondition")
            .unwrap()
            .with("leftDataSet", ElementRefValue::new("Nope"))
            .unwrap()
            .with("rightDataSet", ElementRefValue::qualified("new_library", "Rev"))
            .unwrap()
            .with("leftExpression", Expression::new("a"))
            .unwrap()
            .with("rightExpression", Expression::new("b"))
            .unwrap();
        ds.set_property(
            "joinConditions",
            Some(PropertyValue::List(vec![condition.into()])),
        )
        .unwrap();

        let flat = check_module(&report).flatten();
        assert_eq!(
            flat,
            vec![(
                "data-sets/Local Join.joinConditions[0].leftDataSet".to_string(),
                "unresolved reference 'Nope'".to_string()
            )]
        );
    }

    #[test]
    fn unresolved_list_item_has_index_route() {
        let mut report = report_with_library();
        let ds = report
            .find_element_mut(NameSpace::DataSet, "Local Join")
            .unwrap();
        ds.set_property(
            "dataSets",
            Some(PropertyValue::List(vec![
                ElementRefValue::qualified("new_library", "Rev").into(),
                ElementRefValue::new("Missing").into(),
            ])),
        )
        .unwrap();

        let flat = check_module(&report).flatten();
        assert_eq!(flat.len(), 1);
        assert_eq!(flat[0].0, "data-sets/Local Join.dataSets[1]");
    }

    #[test]
    fn missing_required_member_is_reported() {
        let mut report = report_with_library();
        let ds = report
            .find_element_mut(NameSpace::DataSet, "Local Join")
            .unwrap();
        let half = StructureValue::by_name("JoinCondition")
            .unwrap()
            .with("leftDataSet", ElementRefValue::qualified("new_library", "Rev"))
            .unwrap();
        ds.set_property("joinConditions", Some(PropertyValue::List(vec![half.into()])))
            .unwrap();

        let routes: Vec<_> = check_module(&report)
            .flatten()
            .into_iter()
            .map(|(route, _)| route)
            .collect();
        assert_eq!(
            routes,
            [
                "data-sets/Local Join.joinConditions[0].leftExpression",
                "data-sets/Local Join.joinConditions[0].rightDataSet",
                "data-sets/Local Join.joinConditions[0].rightExpression",
            ]
        );
    }

    #[test]
    fn bad_extends_is_reported() {
        let mut report = report_with_library();
        let ds = report
            .find_element_mut(NameSpace::DataSet, "Data Set")
            .unwrap();
        ds.set_extends(Some(ElementRefValue::qualified("new_library", "Rev")));

        let text = check_module(&report).to_string();
        assert!(text.contains("extends 'new_library.Rev' of kind 'OdaDataSet'"));
    }
}
