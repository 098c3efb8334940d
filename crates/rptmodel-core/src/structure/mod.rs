
use crate::{
    error::PropertyError,
    module::Module,
    resolve::normalize_references,
    value::{PropertyValue, check_value},
};
use rptmodel_schema::{
    defn::{PropertyDefn, StructureDefn},
    dictionary::dictionary,
};
use std::collections::BTreeMap;

///
/// PropertySet
///
/// Anything that holds schema-described property values: structures,
/// design elements and modules. Reads never fail; unknown or unset
/// properties are absent.
///

pub trait PropertySet {
    /// Name used in error messages (definition or structure name).
    fn owner_name(&self) -> &str;

    fn property_defn(&self, name: &str) -> Option<&'static PropertyDefn>;

    /// Raw stored value, exactly as written.
    fn local_value(&self, name: &str) -> Option<&PropertyValue>;

    /// Set or clear (`None`) one property. The value is checked against the
    /// property definition before it is stored.
    fn set_property(
        &mut self,
        name: &str,
        value: Option<PropertyValue>,
    ) -> Result<(), PropertyError>;

    /// The locally set value of `prop` within the owning `module`, or `None`
    /// when unset or when `prop` does not belong to this set. Element
    /// references are returned qualified against `module`; nothing is
    /// written back.
    fn local_property(&self, module: &Module, prop: &PropertyDefn) -> Option<PropertyValue> {
        let own = self.property_defn(prop.name)?;
        if own.ty != prop.ty || own.cardinality != prop.cardinality {
            return None;
        }

        self.local_value(own.name)
            .map(|value| normalize_references(module, own, value))
    }
}

///
/// Structure
///
/// A named, schema-described, copyable record held as a property value.
///

pub trait Structure: PropertySet {
    /// Schema key of this structure; never empty.
    fn struct_name(&self) -> &'static str;

    /// Definition of this structure kind, available even when empty.
    fn defn(&self) -> &'static StructureDefn;

    /// A fully independent copy.
    #[must_use]
    fn copy(&self) -> Self
    where
        Self: Sized;
}

///
/// StructureValue
///
/// The single concrete structure type. Member values are owned, so a clone
/// never aliases the original.
///

#[derive(Clone, Debug)]
pub struct StructureValue {
    defn: &'static StructureDefn,
    values: BTreeMap<&'static str, PropertyValue>,
}

impl StructureValue {
    #[must_use]
    pub const fn new(defn: &'static StructureDefn) -> Self {
        Self {
            defn,
            values: BTreeMap::new(),
        }
    }

    /// Build an empty structure by its dictionary name.
    #[must_use]
    pub fn by_name(struct_name: &str) -> Option<Self> {
        dictionary().structure(struct_name).map(Self::new)
    }

    /// Builder form of [`PropertySet::set_property`].
    pub fn with(
        mut self,
        name: &str,
        value: impl Into<PropertyValue>,
    ) -> Result<Self, PropertyError> {
        self.set_property(name, Some(value.into()))?;

        Ok(self)
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&PropertyValue> {
        self.values.get(name)
    }

    /// The stored value, or the member default when unset.
    #[must_use]
    pub fn value_or_default(&self, name: &str) -> Option<PropertyValue> {
        let member = self.defn.member(name)?;

        self.values
            .get(member.name)
            .cloned()
            .or_else(|| PropertyValue::default_for(member))
    }

    /// Set members in definition order.
    pub fn members(&self) -> impl Iterator<Item = (&'static PropertyDefn, &PropertyValue)> {
        self.defn
            .members
            .iter()
            .filter_map(|m| self.values.get(m.name).map(|v| (m, v)))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl PartialEq for StructureValue {
    fn eq(&self, other: &Self) -> bool {
        self.defn.name == other.defn.name && self.values == other.values
    }
}

impl PropertySet for StructureValue {
    fn owner_name(&self) -> &str {
        self.defn.name
    }

    fn property_defn(&self, name: &str) -> Option<&'static PropertyDefn> {
        self.defn.member(name)
    }

    fn local_value(&self, name: &str) -> Option<&PropertyValue> {
        self.values.get(name)
    }

    fn set_property(
        &mut self,
        name: &str,
        value: Option<PropertyValue>,
    ) -> Result<(), PropertyError> {
        let member = self
            .defn
            .member(name)
            .ok_or_else(|| PropertyError::NotDefined {
                owner: self.defn.name.to_string(),
                property: name.to_string(),
            })?;

        store(&mut self.values, member, value)
    }
}

impl Structure for StructureValue {
    fn struct_name(&self) -> &'static str {
        self.defn.name
    }

    fn defn(&self) -> &'static StructureDefn {
        self.defn
    }

    fn copy(&self) -> Self {
        self.clone()
    }
}

/// Check and store one value in a property map; `None` clears it.
pub(crate) fn store(
    values: &mut BTreeMap<&'static str, PropertyValue>,
    prop: &'static PropertyDefn,
    value: Option<PropertyValue>,
) -> Result<(), PropertyError> {
    match value {
        Some(value) => {
            check_value(prop, &value)?;
            values.insert(prop.name, value);
        }
        None => {
            values.remove(prop.name);
        }
    }

    Ok(())
}
