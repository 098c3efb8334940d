use crate::messages::MessageCatalog;
use serde::Serialize;

///
/// ScriptType
/// Descriptor for a type visible to report scripts.
///

#[derive(Debug, Eq, PartialEq, Serialize)]
pub struct ScriptType {
    pub name: &'static str,
    pub qualified_name: &'static str,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name_id: Option<&'static str>,
}

impl ScriptType {
    #[must_use]
    pub const fn new(name: &'static str, qualified_name: &'static str) -> Self {
        Self {
            name,
            qualified_name,
            display_name_id: None,
        }
    }

    #[must_use]
    pub const fn display(mut self, id: &'static str) -> Self {
        self.display_name_id = Some(id);
        self
    }
}

///
/// ClassInfo
/// Lightweight metadata view over a [`ScriptType`].
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ClassInfo {
    ty: &'static ScriptType,
}

impl ClassInfo {
    #[must_use]
    pub const fn new(ty: &'static ScriptType) -> Self {
        Self { ty }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.ty.name
    }

    #[must_use]
    pub const fn qualified_name(&self) -> &'static str {
        self.ty.qualified_name
    }

    #[must_use]
    pub fn display_name_key(&self) -> &'static str {
        self.ty.display_name_id.unwrap_or_default()
    }

    #[must_use]
    pub fn display_name(&self, catalog: &MessageCatalog, locale: &str) -> String {
        catalog.message(self.display_name_key(), locale)
    }

    #[must_use]
    pub const fn script_type(&self) -> &'static ScriptType {
        self.ty
    }
}
