//! Schema descriptors. Definitions are `'static` and registered once in the
//! [`MetaDataDictionary`](crate::dictionary::MetaDataDictionary).

mod element;
mod property;
mod structure;

pub use element::ElementDefn;
pub use property::PropertyDefn;
pub use structure::StructureDefn;
