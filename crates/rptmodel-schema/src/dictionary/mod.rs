pub mod builtin;

use crate::{
    Error,
    defn::{ElementDefn, StructureDefn},
    error::ErrorTree,
    info::ScriptType,
    validate::validate_dictionary,
};
use std::{
    collections::BTreeMap,
    sync::{LazyLock, OnceLock},
};
use thiserror::Error as ThisError;

///
/// BuildError
///

#[derive(Debug, ThisError)]
pub enum BuildError {
    #[error("dictionary validation failed: {0}")]
    Validation(ErrorTree),
}

///
/// DICTIONARY
/// the process-wide built-in dictionary
///

static DICTIONARY: LazyLock<MetaDataDictionary> = LazyLock::new(builtin::build);

static DICTIONARY_CHECKED: OnceLock<Result<(), ErrorTree>> = OnceLock::new();

/// Read the built-in dictionary without validation.
#[must_use]
pub fn dictionary() -> &'static MetaDataDictionary {
    &DICTIONARY
}

/// Read the built-in dictionary, validating it exactly once per process.
pub fn get_dictionary() -> Result<&'static MetaDataDictionary, Error> {
    let dict = dictionary();
    DICTIONARY_CHECKED
        .get_or_init(|| validate_dictionary(dict))
        .clone()
        .map_err(BuildError::Validation)?;

    Ok(dict)
}

///
/// MetaDataDictionary
///
/// Registry of every element definition, structure definition and script
/// type. Registration never fails; duplicate names are recorded and reported
/// by validation.
///

#[derive(Debug, Default)]
pub struct MetaDataDictionary {
    elements: BTreeMap<&'static str, &'static ElementDefn>,
    structures: BTreeMap<&'static str, &'static StructureDefn>,
    script_types: BTreeMap<&'static str, &'static ScriptType>,
    duplicates: Vec<String>,
}

impl MetaDataDictionary {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_element(&mut self, defn: &'static ElementDefn) {
        if self.elements.insert(defn.name, defn).is_some() {
            self.duplicates.push(format!("element '{}'", defn.name));
        }
    }

    pub fn register_structure(&mut self, defn: &'static StructureDefn) {
        if self.structures.insert(defn.name, defn).is_some() {
            self.duplicates.push(format!("structure '{}'", defn.name));
        }
    }

    pub fn register_script_type(&mut self, ty: &'static ScriptType) {
        if self.script_types.insert(ty.name, ty).is_some() {
            self.duplicates.push(format!("script type '{}'", ty.name));
        }
    }

    #[must_use]
    pub fn element(&self, name: &str) -> Option<&'static ElementDefn> {
        self.elements.get(name).copied()
    }

    /// Find the concrete element definition written with `tag`.
    #[must_use]
    pub fn element_by_tag(&self, tag: &str) -> Option<&'static ElementDefn> {
        self.elements
            .values()
            .copied()
            .find(|d| !d.is_abstract && d.xml_tag == tag)
    }

    #[must_use]
    pub fn structure(&self, name: &str) -> Option<&'static StructureDefn> {
        self.structures.get(name).copied()
    }

    #[must_use]
    pub fn script_type(&self, name: &str) -> Option<&'static ScriptType> {
        self.script_types.get(name).copied()
    }

    pub fn elements(&self) -> impl Iterator<Item = &'static ElementDefn> + '_ {
        self.elements.values().copied()
    }

    pub fn structures(&self) -> impl Iterator<Item = &'static StructureDefn> + '_ {
        self.structures.values().copied()
    }

    pub fn script_types(&self) -> impl Iterator<Item = &'static ScriptType> + '_ {
        self.script_types.values().copied()
    }

    #[must_use]
    pub fn duplicates(&self) -> &[String] {
        &self.duplicates
    }
}
