use crate::{
    defn::PropertyDefn,
    dictionary::MetaDataDictionary,
    err,
    error::ErrorTree,
    types::PropertyType,
    validate::naming::validate_ident,
};

/// Check a property descriptor against the dictionary: structure names and
/// reference targets must resolve, choice lists must be usable, and the
/// default literal must fit the type.
pub fn validate_property(dict: &MetaDataDictionary, prop: &PropertyDefn) -> ErrorTree {
    let mut errs = ErrorTree::new();

    if let Err(msg) = validate_ident(prop.name) {
        errs.add(msg);
    }

    match prop.ty {
        PropertyType::Structure => match prop.struct_name {
            Some(name) if dict.structure(name).is_none() => {
                err!(errs, "structure '{name}' is not registered");
            }
            Some(_) => {}
            None => err!(errs, "structure property has no structure name"),
        },
        PropertyType::ElementRef => {
            if prop.element_types.is_empty() {
                err!(errs, "element reference has no target element types");
            }
            for target in prop.element_types {
                if dict.element(target).is_none() {
                    err!(errs, "target element '{target}' is not registered");
                }
            }
            if !prop.element_types.is_empty() && prop.target_name_space(dict).is_none() {
                err!(errs, "reference targets do not belong to a name space");
            }
        }
        PropertyType::Choice => {
            if prop.choices.is_empty() {
                err!(errs, "choice property has no choices");
            }
        }
        _ => {}
    }

    if prop.ty != PropertyType::Structure && prop.struct_name.is_some() {
        err!(errs, "only structure properties may name a structure");
    }
    if prop.ty != PropertyType::ElementRef && !prop.element_types.is_empty() {
        err!(errs, "only element references may name target elements");
    }

    if let Some(default) = prop.default {
        validate_default(prop, default, &mut errs);
    }

    errs
}

fn validate_default(prop: &PropertyDefn, default: &str, errs: &mut ErrorTree) {
    let ok = match prop.ty {
        PropertyType::Choice => prop.allows_choice(default),
        PropertyType::Integer => default.parse::<i64>().is_ok(),
        PropertyType::Float => default.parse::<f64>().is_ok(),
        PropertyType::Boolean => matches!(default, "true" | "false"),
        PropertyType::Structure | PropertyType::ElementRef => false,
        _ => true,
    };

    if !ok {
        err!(errs, "default '{default}' is not valid for type {}", prop.ty);
    }
}
