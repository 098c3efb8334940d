use crate::info::{ArgumentInfo, ClassInfo, MemberInfo, ScriptType};
use serde::Serialize;
use std::fmt;

///
/// MethodInfo
///
/// A scripting hook exposed by an element definition. The method's type is
/// its return type; hooks that return nothing use the `void` script type.
///

#[derive(Debug, Serialize)]
pub struct MethodInfo {
    pub name: &'static str,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name_id: Option<&'static str>,

    pub return_type: &'static ScriptType,
    pub arguments: &'static [ArgumentInfo],
}

impl MethodInfo {
    #[must_use]
    pub const fn new(
        name: &'static str,
        return_type: &'static ScriptType,
        arguments: &'static [ArgumentInfo],
    ) -> Self {
        Self {
            name,
            display_name_id: None,
            return_type,
            arguments,
        }
    }

    #[must_use]
    pub const fn display(mut self, id: &'static str) -> Self {
        self.display_name_id = Some(id);
        self
    }

    #[must_use]
    pub fn argument(&self, name: &str) -> Option<&'static ArgumentInfo> {
        self.arguments.iter().find(|a| a.name == name)
    }

    /// Source snippet offered when a script body is created for this hook.
    /// Hooks carry no template yet.
    #[must_use]
    pub const fn code_template(&self) -> &'static str {
        ""
    }

    /// `name(Type arg, ...)` rendering used in listings.
    #[must_use]
    pub fn signature(&self) -> String {
        let args = self
            .arguments
            .iter()
            .map(|a| format!("{} {}", a.ty.name, a.name))
            .collect::<Vec<_>>()
            .join(", ");

        format!("{}({args}) -> {}", self.name, self.return_type.name)
    }
}

impl MemberInfo for MethodInfo {
    fn name(&self) -> &str {
        self.name
    }

    fn display_name_key(&self) -> &str {
        self.display_name_id.unwrap_or_default()
    }

    fn type_name(&self) -> &str {
        self.return_type.qualified_name
    }

    fn class_type(&self) -> ClassInfo {
        ClassInfo::new(self.return_type)
    }
}

impl fmt::Display for MethodInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name.trim().is_empty() {
            write!(f, "MethodInfo@{}", self.return_type.qualified_name)
        } else {
            f.write_str(self.name)
        }
    }
}
