use crate::{
    dictionary::MetaDataDictionary,
    types::{Cardinality, NameSpace, PropertyType},
};
use serde::Serialize;

///
/// PropertyDefn
///
/// Descriptor for one element property or structure member.
/// Built with the `const` helpers below so definitions can live in statics.
///

#[derive(Clone, Copy, Debug, Serialize)]
pub struct PropertyDefn {
    pub name: &'static str,
    pub display_name_id: &'static str,
    pub ty: PropertyType,
    pub cardinality: Cardinality,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub struct_name: Option<&'static str>,

    #[serde(default, skip_serializing_if = "<[_]>::is_empty")]
    pub element_types: &'static [&'static str],

    #[serde(default, skip_serializing_if = "<[_]>::is_empty")]
    pub choices: &'static [&'static str],

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<&'static str>,
}

impl PropertyDefn {
    #[must_use]
    pub const fn new(name: &'static str, ty: PropertyType) -> Self {
        Self {
            name,
            display_name_id: "",
            ty,
            cardinality: Cardinality::Opt,
            struct_name: None,
            element_types: &[],
            choices: &[],
            default: None,
        }
    }

    #[must_use]
    pub const fn display(mut self, id: &'static str) -> Self {
        self.display_name_id = id;
        self
    }

    #[must_use]
    pub const fn required(mut self) -> Self {
        self.cardinality = Cardinality::One;
        self
    }

    #[must_use]
    pub const fn many(mut self) -> Self {
        self.cardinality = Cardinality::Many;
        self
    }

    #[must_use]
    pub const fn structure(mut self, struct_name: &'static str) -> Self {
        self.struct_name = Some(struct_name);
        self
    }

    #[must_use]
    pub const fn refs(mut self, element_types: &'static [&'static str]) -> Self {
        self.element_types = element_types;
        self
    }

    #[must_use]
    pub const fn choices(mut self, choices: &'static [&'static str]) -> Self {
        self.choices = choices;
        self
    }

    #[must_use]
    pub const fn default_value(mut self, literal: &'static str) -> Self {
        self.default = Some(literal);
        self
    }

    #[must_use]
    pub const fn is_list(&self) -> bool {
        self.cardinality.is_many()
    }

    #[must_use]
    pub fn allows_choice(&self, value: &str) -> bool {
        self.choices.contains(&value)
    }

    /// Name space searched when resolving a reference held by this property.
    #[must_use]
    pub fn target_name_space(&self, dict: &MetaDataDictionary) -> Option<NameSpace> {
        self.element_types
            .iter()
            .filter_map(|name| dict.element(name))
            .find_map(|defn| defn.resolved_name_space())
    }

    /// Whether an element of definition `element_name` may be referenced.
    #[must_use]
    pub fn allows_target(&self, dict: &MetaDataDictionary, element_name: &str) -> bool {
        dict.element(element_name).is_some_and(|defn| {
            self.element_types
                .iter()
                .any(|allowed| defn.is_kind_of(allowed))
        })
    }
}
