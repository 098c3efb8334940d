use derive_more::{Display, FromStr};
use serde::Serialize;

///
/// Cardinality
///

#[derive(Clone, Copy, Debug, Default, Display, Eq, FromStr, Hash, PartialEq, Serialize)]
pub enum Cardinality {
    #[default]
    One,
    Opt,
    Many,
}

impl Cardinality {
    #[must_use]
    pub const fn is_many(self) -> bool {
        matches!(self, Self::Many)
    }

    #[must_use]
    pub const fn is_required(self) -> bool {
        matches!(self, Self::One)
    }
}

///
/// PropertyType
///
/// Value family of a property or structure member. `Name`, `Script` and
/// `Xml` are textual; they differ in validation and in how they are written.
///

#[derive(Clone, Copy, Debug, Display, Eq, FromStr, Hash, PartialEq, Serialize)]
#[remain::sorted]
pub enum PropertyType {
    Boolean,
    Choice,
    ElementRef,
    Expression,
    Float,
    Integer,
    Name,
    Script,
    String,
    Structure,
    Xml,
}

impl PropertyType {
    /// XML tag used for a single value of this type.
    #[must_use]
    pub const fn xml_tag(self) -> &'static str {
        match self {
            Self::Expression => "expression",
            Self::Script => "method",
            Self::Structure => "structure",
            Self::Xml => "xml-property",
            _ => "property",
        }
    }

    #[must_use]
    pub const fn is_textual(self) -> bool {
        matches!(self, Self::Name | Self::Script | Self::String | Self::Xml)
    }
}

///
/// NameSpace
///
/// Per-module scope in which element names must be unique.
///

#[derive(Clone, Copy, Debug, Display, Eq, FromStr, Hash, Ord, PartialEq, PartialOrd, Serialize)]
pub enum NameSpace {
    DataSource,
    DataSet,
}

impl NameSpace {
    pub const ALL: [Self; 2] = [Self::DataSource, Self::DataSet];

    /// Container tag holding elements of this name space in a module.
    #[must_use]
    pub const fn slot_tag(self) -> &'static str {
        match self {
            Self::DataSource => "data-sources",
            Self::DataSet => "data-sets",
        }
    }

    #[must_use]
    pub fn from_slot_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|ns| ns.slot_tag() == tag)
    }
}
