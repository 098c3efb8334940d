use crate::info::{ClassInfo, MemberInfo, ScriptType};
use serde::Serialize;
use std::fmt;

///
/// ArgumentInfo
/// One argument of a scripting method.
///

#[derive(Debug, Serialize)]
pub struct ArgumentInfo {
    pub name: &'static str,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name_id: Option<&'static str>,

    pub ty: &'static ScriptType,
}

impl ArgumentInfo {
    #[must_use]
    pub const fn new(name: &'static str, ty: &'static ScriptType) -> Self {
        Self {
            name,
            display_name_id: None,
            ty,
        }
    }

    #[must_use]
    pub const fn display(mut self, id: &'static str) -> Self {
        self.display_name_id = Some(id);
        self
    }
}

impl MemberInfo for ArgumentInfo {
    fn name(&self) -> &str {
        self.name
    }

    fn display_name_key(&self) -> &str {
        self.display_name_id.unwrap_or_default()
    }

    fn type_name(&self) -> &str {
        self.ty.qualified_name
    }

    fn class_type(&self) -> ClassInfo {
        ClassInfo::new(self.ty)
    }
}

impl fmt::Display for ArgumentInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.trim().is_empty() {
            write!(f, "ArgumentInfo@{}", self.ty.qualified_name)
        } else {
            f.write_str(self.name)
        }
    }
}
