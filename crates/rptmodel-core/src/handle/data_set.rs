use crate::{
    handle::{ElementHandle, JoinConditionHandle, ModuleHandle, StructureIter},
    value::PropertyValue,
};
use rptmodel_schema::dictionary::builtin::JOINT_DATA_SET;
use std::ops::Deref;

///
/// DataSetHandle
///

#[derive(Clone, Copy, Debug)]
pub struct DataSetHandle<'a>(ElementHandle<'a>);

impl<'a> DataSetHandle<'a> {
    pub(crate) const fn new(element: ElementHandle<'a>) -> Self {
        Self(element)
    }

    /// Data source reference as seen from the host.
    #[must_use]
    pub fn data_source(&self) -> Option<String> {
        self.text("dataSource")
    }

    /// The data source element itself.
    #[must_use]
    pub fn data_source_handle(&self) -> Option<ElementHandle<'a>> {
        let PropertyValue::ElementRef(reference) = self.0.value("dataSource")? else {
            return None;
        };

        ModuleHandle::new(self.host()).find_data_source(&reference.to_string())
    }

    #[must_use]
    pub fn cached_row_count(&self) -> Option<i64> {
        self.value("cachedRowCount").and_then(|v| v.as_integer())
    }

    #[must_use]
    pub fn computed_columns(&self) -> StructureIter<'a> {
        self.structures("computedColumns")
    }

    #[must_use]
    pub fn column_hints(&self) -> StructureIter<'a> {
        self.structures("columnHints")
    }

    #[must_use]
    pub fn filters(&self) -> StructureIter<'a> {
        self.structures("filter")
    }

    #[must_use]
    pub fn param_bindings(&self) -> StructureIter<'a> {
        self.structures("paramBindings")
    }

    #[must_use]
    pub fn result_set(&self) -> StructureIter<'a> {
        self.structures("resultSet")
    }

    #[must_use]
    pub fn as_joint(&self) -> Option<JointDataSetHandle<'a>> {
        self.is_kind_of(JOINT_DATA_SET.name)
            .then_some(JointDataSetHandle(*self))
    }
}

impl<'a> Deref for DataSetHandle<'a> {
    type Target = ElementHandle<'a>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

///
/// JointDataSetHandle
///

#[derive(Clone, Copy, Debug)]
pub struct JointDataSetHandle<'a>(DataSetHandle<'a>);

impl<'a> JointDataSetHandle<'a> {
    /// Joined data sets, qualified for the host.
    #[must_use]
    pub fn data_sets(&self) -> Vec<String> {
        self.value("dataSets")
            .and_then(|v| {
                v.as_list()
                    .map(|items| items.iter().filter_map(PropertyValue::to_literal).collect())
            })
            .unwrap_or_default()
    }

    /// Join conditions in definition order. Every call starts afresh.
    pub fn join_conditions(&self) -> impl Iterator<Item = JoinConditionHandle<'a>> + use<'a> {
        self.structures("joinConditions").map(JoinConditionHandle::new)
    }
}

impl<'a> Deref for JointDataSetHandle<'a> {
    type Target = DataSetHandle<'a>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
