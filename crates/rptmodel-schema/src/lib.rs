//! Metadata layer for rptmodel: property, structure and element definitions,
//! scripting reflection descriptors, localized messages, and the validated
//! built-in dictionary.

pub mod defn;
pub mod dictionary;
pub mod error;
pub mod info;
pub mod messages;
pub mod types;
pub mod validate;

/// Maximum length for element, structure and member identifiers.
pub const MAX_NAME_LEN: usize = 64;

/// Separator between a library namespace and an element name.
pub const NAMESPACE_SEPARATOR: char = '.';

use crate::dictionary::BuildError;
use thiserror::Error as ThisError;

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        defn::{ElementDefn, PropertyDefn, StructureDefn},
        dictionary::{MetaDataDictionary, dictionary},
        err,
        error::ErrorTree,
        info::{ArgumentInfo, ClassInfo, MemberInfo, MethodInfo, ScriptType},
        messages::MessageCatalog,
        types::{Cardinality, NameSpace, PropertyType},
    };
    pub use serde::Serialize;
}

///
/// Error
///

#[derive(Debug, ThisError)]
pub enum Error {
    #[error(transparent)]
    BuildError(#[from] BuildError),
}
