//! Scripting reflection descriptors.
//!
//! Each descriptor is populated once when the dictionary is built and is
//! immutable afterwards. They adapt a script-visible type or callable into
//! the [`MemberInfo`] capability set used by design-time tooling.

mod argument;
mod class;
mod method;

#[cfg(test)]
mod tests;

pub use argument::ArgumentInfo;
pub use class::{ClassInfo, ScriptType};
pub use method::MethodInfo;

use crate::messages::MessageCatalog;

///
/// MemberInfo
///
/// Capability set shared by reflected arguments and methods. Display names
/// and their resource keys are never absent: without localization metadata
/// both are empty strings.
///

pub trait MemberInfo {
    fn name(&self) -> &str;

    fn display_name_key(&self) -> &str;

    /// Fully qualified name of the underlying script type.
    fn type_name(&self) -> &str;

    /// Metadata adapter for the underlying script type, built on each call.
    fn class_type(&self) -> ClassInfo;

    fn display_name(&self, catalog: &MessageCatalog, locale: &str) -> String {
        catalog.message(self.display_name_key(), locale)
    }
}
