use crate::{defn::PropertyDefn, info::MethodInfo, types::NameSpace};
use serde::Serialize;

///
/// ElementDefn
///
/// Schema descriptor for a design element kind. Definitions form a single
/// inheritance chain through `parent`; properties and methods declared on a
/// parent are visible on every descendant.
///

#[derive(Debug, Serialize)]
pub struct ElementDefn {
    pub name: &'static str,
    pub xml_tag: &'static str,
    pub display_name_id: &'static str,

    #[serde(skip)]
    pub parent: Option<&'static Self>,

    pub is_abstract: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name_space: Option<NameSpace>,

    pub properties: &'static [PropertyDefn],
    pub methods: &'static [MethodInfo],
}

impl ElementDefn {
    /// Walk from this definition up to the root of its chain.
    pub fn lineage(&'static self) -> impl Iterator<Item = &'static Self> {
        std::iter::successors(Some(self), |d| d.parent)
    }

    #[must_use]
    pub fn is_kind_of(&'static self, name: &str) -> bool {
        self.lineage().any(|d| d.name == name)
    }

    /// Find a property declared here or on an ancestor.
    #[must_use]
    pub fn property(&'static self, name: &str) -> Option<&'static PropertyDefn> {
        self.lineage()
            .find_map(|d| d.properties.iter().find(|p| p.name == name))
    }

    /// All visible properties, ancestors first.
    #[must_use]
    pub fn all_properties(&'static self) -> Vec<&'static PropertyDefn> {
        let mut chain: Vec<_> = self.lineage().collect();
        chain.reverse();

        chain.into_iter().flat_map(|d| d.properties.iter()).collect()
    }

    #[must_use]
    pub fn method(&'static self, name: &str) -> Option<&'static MethodInfo> {
        self.lineage()
            .find_map(|d| d.methods.iter().find(|m| m.name == name))
    }

    /// All visible scripting methods, ancestors first.
    #[must_use]
    pub fn all_methods(&'static self) -> Vec<&'static MethodInfo> {
        let mut chain: Vec<_> = self.lineage().collect();
        chain.reverse();

        chain.into_iter().flat_map(|d| d.methods.iter()).collect()
    }

    /// Name space inherited from the nearest ancestor that declares one.
    #[must_use]
    pub fn resolved_name_space(&'static self) -> Option<NameSpace> {
        self.lineage().find_map(|d| d.name_space)
    }
}
