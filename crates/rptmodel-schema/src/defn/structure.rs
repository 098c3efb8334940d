use crate::defn::PropertyDefn;
use serde::Serialize;

///
/// StructureDefn
/// Schema descriptor for one structure kind (ordered members).
///

#[derive(Debug, Serialize)]
pub struct StructureDefn {
    pub name: &'static str,
    pub display_name_id: &'static str,
    pub members: &'static [PropertyDefn],
}

impl StructureDefn {
    #[must_use]
    pub fn member(&self, name: &str) -> Option<&'static PropertyDefn> {
        self.members.iter().find(|m| m.name == name)
    }
}
