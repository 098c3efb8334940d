//! Runtime object model for rptmodel: property values, structures, design
//! elements, modules with library inclusion, namespace resolution on read,
//! the XML reader/writer and the semantic checker.

// public exports are one module level down
pub mod element;
pub mod error;
pub mod handle;
pub mod module;
pub mod reader;
pub mod resolve;
pub mod semantic;
pub mod structure;
pub mod value;
pub mod writer;

// test
#[cfg(test)]
pub(crate) mod test_support;

pub use error::{Error, ErrorClass, ErrorOrigin, PropertyError};

///
/// CONSTANTS
///

/// Document format version written by [`writer::write_module`].
pub const MODEL_VERSION: &str = "3.2.23";

/// XML namespace of design and library documents.
pub const DESIGN_XMLNS: &str = "urn:rptmodel:design";

///
/// Prelude
///
/// Prelude contains only domain vocabulary.
/// No readers, writers or checkers are re-exported here.
///

pub mod prelude {
    pub use crate::{
        element::{DesignElement, ElementId},
        handle::{
            DataSetHandle, ElementHandle, JoinConditionHandle, JointDataSetHandle, ModuleHandle,
            StructureHandle,
        },
        module::{IncludedLibrary, Module, ModuleKind},
        structure::{PropertySet, Structure, StructureValue},
        value::{ElementRefValue, Expression, ExpressionKind, PropertyValue},
    };
}
