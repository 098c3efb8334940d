//! Dictionary validation orchestration and shared helpers.

pub mod naming;
pub mod reference;

#[cfg(test)]
mod tests;

use crate::{
    defn::{ElementDefn, StructureDefn},
    dictionary::MetaDataDictionary,
    err,
    error::ErrorTree,
    info::MethodInfo,
};
use std::collections::BTreeSet;

/// Run full dictionary validation in a staged, deterministic order.
pub fn validate_dictionary(dict: &MetaDataDictionary) -> Result<(), ErrorTree> {
    // Phase 1: validate each definition (structural + local invariants).
    let mut errors = validate_definitions(dict);

    // Phase 2: enforce dictionary-wide invariants.
    validate_global(dict, &mut errors);

    errors.result()
}

fn validate_definitions(dict: &MetaDataDictionary) -> ErrorTree {
    let mut errs = ErrorTree::new();

    for defn in dict.structures() {
        errs.merge_for(defn.name, validate_structure(dict, defn));
    }
    for defn in dict.elements() {
        errs.merge_for(defn.name, validate_element(dict, defn));
    }

    errs
}

fn validate_global(dict: &MetaDataDictionary, errs: &mut ErrorTree) {
    for duplicate in dict.duplicates() {
        err!(errs, "duplicate registration of {duplicate}");
    }

    naming::validate_xml_tags(dict, errs);
}

fn validate_structure(dict: &MetaDataDictionary, defn: &StructureDefn) -> ErrorTree {
    let mut errs = ErrorTree::new();

    if let Err(msg) = naming::validate_ident(defn.name) {
        errs.add(msg);
    }
    if defn.members.is_empty() {
        err!(errs, "structure has no members");
    }

    let mut seen = BTreeSet::new();
    for member in defn.members {
        if !seen.insert(member.name) {
            err!(errs, "duplicate member '{}'", member.name);
        }
        errs.merge_for(member.name, reference::validate_property(dict, member));
    }

    errs
}

fn validate_element(dict: &MetaDataDictionary, defn: &'static ElementDefn) -> ErrorTree {
    let mut errs = ErrorTree::new();

    if let Err(msg) = naming::validate_ident(defn.name) {
        errs.add(msg);
    }
    if !defn.is_abstract && defn.xml_tag.is_empty() {
        err!(errs, "concrete element has no xml tag");
    }
    if let Some(parent) = defn.parent
        && dict.element(parent.name).is_none()
    {
        err!(errs, "parent '{}' is not registered", parent.name);
    }

    // own properties may not shadow inherited ones
    let mut seen = BTreeSet::new();
    for prop in defn.all_properties() {
        if !seen.insert(prop.name) {
            err!(errs, "property '{}' is declared more than once", prop.name);
        }
    }
    for prop in defn.properties {
        errs.merge_for(prop.name, reference::validate_property(dict, prop));
    }

    let mut methods = BTreeSet::new();
    for method in defn.methods {
        if !methods.insert(method.name) {
            err!(errs, "duplicate method '{}'", method.name);
        }
        errs.merge_for(method.name, validate_method(dict, method));
    }

    errs
}

fn validate_method(dict: &MetaDataDictionary, method: &MethodInfo) -> ErrorTree {
    let mut errs = ErrorTree::new();

    if let Err(msg) = naming::validate_ident(method.name) {
        errs.add(msg);
    }
    if dict.script_type(method.return_type.name).is_none() {
        err!(
            errs,
            "return type '{}' is not registered",
            method.return_type.name
        );
    }

    let mut seen = BTreeSet::new();
    for arg in method.arguments {
        if !seen.insert(arg.name) {
            err!(errs, "duplicate argument '{}'", arg.name);
        }
        if dict.script_type(arg.ty.name).is_none() {
            errs.add_for(
                arg.name,
                format!("argument type '{}' is not registered", arg.ty.name),
            );
        }
    }

    errs
}
