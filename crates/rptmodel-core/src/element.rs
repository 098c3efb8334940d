use crate::{
    error::PropertyError,
    module::Module,
    resolve::{InheritedValue, element_property},
    structure::{PropertySet, store},
    value::{ElementRefValue, PropertyValue, validate_name},
};
use derive_more::Display;
use rptmodel_schema::{
    defn::{ElementDefn, PropertyDefn},
    types::NameSpace,
};
use std::collections::BTreeMap;

///
/// ElementId
///
/// Module-local element identifier. Zero means "not yet assigned".
///

#[derive(Clone, Copy, Debug, Default, Display, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ElementId(pub u64);

impl ElementId {
    #[must_use]
    pub const fn is_assigned(self) -> bool {
        self.0 != 0
    }
}

///
/// DesignElement
///
/// A named element inside a module (a data source or a data set). Only
/// locally set values are stored; inherited values come from the `extends`
/// parent on read.
///

#[derive(Clone, Debug)]
pub struct DesignElement {
    id: ElementId,
    defn: &'static ElementDefn,
    name: Option<String>,
    extends: Option<ElementRefValue>,
    properties: BTreeMap<&'static str, PropertyValue>,
}

impl DesignElement {
    pub fn new(defn: &'static ElementDefn, name: impl Into<String>) -> Result<Self, PropertyError> {
        let name = name.into();
        validate_name(&name)?;

        Ok(Self {
            id: ElementId::default(),
            defn,
            name: Some(name),
            extends: None,
            properties: BTreeMap::new(),
        })
    }

    #[must_use]
    pub const fn id(&self) -> ElementId {
        self.id
    }

    pub(crate) const fn set_id(&mut self, id: ElementId) {
        self.id = id;
    }

    #[must_use]
    pub const fn defn(&self) -> &'static ElementDefn {
        self.defn
    }

    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn set_name(&mut self, name: Option<String>) -> Result<(), PropertyError> {
        if let Some(name) = &name {
            validate_name(name)?;
        }
        self.name = name;

        Ok(())
    }

    #[must_use]
    pub fn name_space(&self) -> Option<NameSpace> {
        self.defn.resolved_name_space()
    }

    #[must_use]
    pub const fn extends(&self) -> Option<&ElementRefValue> {
        self.extends.as_ref()
    }

    pub fn set_extends(&mut self, parent: Option<ElementRefValue>) {
        self.extends = parent;
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

    /// Effective value of `name` for this element living in `module`: the
    /// local value, else the value inherited through `extends`, else the
    /// definition default.
    #[must_use]
    pub fn property<'a>(&'a self, module: &'a Module, name: &str) -> Option<InheritedValue<'a>> {
        element_property(module, self, name)
    }

    /// Locally set values in definition order.
    pub fn local_values(&self) -> impl Iterator<Item = (&'static PropertyDefn, &PropertyValue)> {
        self.defn
            .all_properties()
            .into_iter()
            .filter_map(|p| self.properties.get(p.name).map(|v| (p, v)))
    }
}

impl PropertySet for DesignElement {
    fn owner_name(&self) -> &str {
        self.defn.name
    }

    fn property_defn(&self, name: &str) -> Option<&'static PropertyDefn> {
        self.defn.property(name)
    }

    fn local_value(&self, name: &str) -> Option<&PropertyValue> {
        self.properties.get(name)
    }

    fn set_property(
        &mut self,
        name: &str,
        value: Option<PropertyValue>,
    ) -> Result<(), PropertyError> {
        let prop = self
            .defn
            .property(name)
            .ok_or_else(|| PropertyError::NotDefined {
                owner: self.defn.name.to_string(),
                property: name.to_string(),
            })?;

        store(&mut self.properties, prop, value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Expression;
    use rptmodel_schema::dictionary::builtin::{ODA_DATA_SET, ODA_DATA_SOURCE};

    #[test]
    fn names_are_validated() {
        assert!(DesignElement::new(&ODA_DATA_SET, "Rev").is_ok());
        assert!(DesignElement::new(&ODA_DATA_SET, "lib.Rev").is_err());
        assert!(DesignElement::new(&ODA_DATA_SET, " Rev").is_err());
    }

    #[test]
    fn inherited_properties_are_settable() {
        let mut ds = DesignElement::new(&ODA_DATA_SET, "Rev").unwrap();

        ds.set_property("queryText", Some("select 1".into())).unwrap();
        ds.set_property("dataSource", Some(ElementRefValue::new("Data Source").into()))
            .unwrap();

        let names: Vec<_> = ds.local_values().map(|(p, _)| p.name).collect();
        assert_eq!(names, ["dataSource", "queryText"]);
        assert_eq!(ds.name_space(), Some(NameSpace::DataSet));
    }

    #[test]
    fn unknown_property_is_rejected_and_absent() {
        let mut source = DesignElement::new(&ODA_DATA_SOURCE, "Data Source").unwrap();

        let err = source
            .set_property("onFetch", Some(Expression::new("x").into()))
            .unwrap_err();
        assert!(matches!(err, PropertyError::NotDefined { .. }));
        assert!(source.local_value("onFetch").is_none());
        assert!(source.property_defn("onFetch").is_none());
    }
}
