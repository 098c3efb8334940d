use crate::{
    error::PropertyError,
    structure::Structure,
    value::PropertyValue,
};
use rptmodel_schema::{NAMESPACE_SEPARATOR, defn::PropertyDefn, types::PropertyType};

/// Check `value` against its definition: list shape, item type, allowed
/// choices, structure kind, and name syntax.
pub fn check_value(prop: &PropertyDefn, value: &PropertyValue) -> Result<(), PropertyError> {
    match (prop.is_list(), value) {
        (true, PropertyValue::List(items)) => items.iter().try_for_each(|item| check_item(prop, item)),
        (true, _) => Err(PropertyError::ExpectedList {
            property: prop.name.to_string(),
        }),
        (false, PropertyValue::List(_)) => Err(PropertyError::UnexpectedList {
            property: prop.name.to_string(),
        }),
        (false, item) => check_item(prop, item),
    }
}

fn check_item(prop: &PropertyDefn, value: &PropertyValue) -> Result<(), PropertyError> {
    match (prop.ty, value) {
        (PropertyType::Boolean, PropertyValue::Boolean(_))
        | (PropertyType::Integer, PropertyValue::Integer(_))
        | (PropertyType::Float, PropertyValue::Float(_))
        | (PropertyType::Expression, PropertyValue::Expression(_))
        | (PropertyType::ElementRef, PropertyValue::ElementRef(_)) => Ok(()),

        (PropertyType::Choice, PropertyValue::Choice(choice)) => {
            if prop.allows_choice(choice) {
                Ok(())
            } else {
                Err(PropertyError::InvalidChoice {
                    property: prop.name.to_string(),
                    value: choice.clone(),
                })
            }
        }

        (PropertyType::Name, PropertyValue::String(name)) => validate_name(name),

        (ty, PropertyValue::String(_)) if ty.is_textual() => Ok(()),

        (PropertyType::Structure, PropertyValue::Structure(s)) => {
            let expected = prop.struct_name.unwrap_or_default();
            if s.struct_name() == expected {
                Ok(())
            } else {
                Err(PropertyError::StructureMismatch {
                    property: prop.name.to_string(),
                    expected: expected.to_string(),
                    actual: s.struct_name().to_string(),
                })
            }
        }

        (_, other) => Err(PropertyError::TypeMismatch {
            property: prop.name.to_string(),
            expected: prop.ty,
            actual: other.kind_label(),
        }),
    }
}

/// Element and member names must be non-empty, trimmed, and free of the
/// namespace separator.
pub fn validate_name(name: &str) -> Result<(), PropertyError> {
    let invalid = |reason| PropertyError::InvalidName {
        name: name.to_string(),
        reason,
    };

    if name.is_empty() {
        return Err(invalid("name is empty"));
    }
    if name.trim() != name {
        return Err(invalid("name has surrounding whitespace"));
    }
    if name.contains(NAMESPACE_SEPARATOR) {
        return Err(invalid("name contains the namespace separator"));
    }

    Ok(())
}
