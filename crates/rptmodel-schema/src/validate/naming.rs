use crate::{MAX_NAME_LEN, dictionary::MetaDataDictionary, err, error::ErrorTree};
use std::collections::BTreeMap;

/// Ensure an identifier is non-empty, ASCII, starts with a letter, and only
/// holds letters, digits and underscores.
pub fn validate_ident(ident: &str) -> Result<(), String> {
    if ident.is_empty() {
        return Err("ident is empty".to_string());
    }
    if ident.len() > MAX_NAME_LEN {
        return Err(format!(
            "ident '{ident}' exceeds max length {MAX_NAME_LEN}"
        ));
    }
    if !ident.starts_with(|c: char| c.is_ascii_alphabetic()) {
        return Err(format!("ident '{ident}' must start with a letter"));
    }
    if !ident.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(format!("ident '{ident}' has invalid characters"));
    }

    Ok(())
}

/// Concrete element definitions must use distinct xml tags.
pub(crate) fn validate_xml_tags(dict: &MetaDataDictionary, errs: &mut ErrorTree) {
    let mut by_tag: BTreeMap<&str, &str> = BTreeMap::new();

    for defn in dict.elements().filter(|d| !d.is_abstract) {
        if let Some(prev) = by_tag.insert(defn.xml_tag, defn.name) {
            err!(
                errs,
                "duplicate xml tag '{}' for '{prev}' and '{}'",
                defn.xml_tag,
                defn.name
            );
        }
    }
}
