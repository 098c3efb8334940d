//! Built-in definitions: modules, data sources, data sets and the structures
//! they carry.

use crate::{
    defn::{ElementDefn, PropertyDefn, StructureDefn},
    dictionary::MetaDataDictionary,
    info::{ArgumentInfo, MethodInfo, ScriptType},
    types::{NameSpace, PropertyType as T},
};

//
// Script types
//

pub static VOID: ScriptType = ScriptType::new("void", "void");
pub static BOOLEAN: ScriptType = ScriptType::new("boolean", "rptmodel::script::Boolean");

pub static DATA_SET_INSTANCE: ScriptType =
    ScriptType::new("IDataSetInstance", "rptmodel::script::IDataSetInstance")
        .display("Type.IDataSetInstance");

pub static DATA_SOURCE_INSTANCE: ScriptType =
    ScriptType::new("IDataSourceInstance", "rptmodel::script::IDataSourceInstance")
        .display("Type.IDataSourceInstance");

pub static DATA_SET_ROW: ScriptType =
    ScriptType::new("IDataSetRow", "rptmodel::script::IDataSetRow").display("Type.IDataSetRow");

pub static UPDATABLE_DATA_SET_ROW: ScriptType =
    ScriptType::new("IUpdatableDataSetRow", "rptmodel::script::IUpdatableDataSetRow")
        .display("Type.IUpdatableDataSetRow");

pub static REPORT_CONTEXT: ScriptType =
    ScriptType::new("IReportContext", "rptmodel::script::IReportContext")
        .display("Type.IReportContext");

//
// Method arguments
//

static DATA_SET_ARGS: [ArgumentInfo; 2] = [
    ArgumentInfo::new("this", &DATA_SET_INSTANCE).display("Argument.this"),
    ArgumentInfo::new("reportContext", &REPORT_CONTEXT).display("Argument.reportContext"),
];

static DATA_SET_ROW_ARGS: [ArgumentInfo; 3] = [
    ArgumentInfo::new("this", &DATA_SET_INSTANCE).display("Argument.this"),
    ArgumentInfo::new("row", &DATA_SET_ROW).display("Argument.row"),
    ArgumentInfo::new("reportContext", &REPORT_CONTEXT).display("Argument.reportContext"),
];

static SCRIPT_FETCH_ARGS: [ArgumentInfo; 3] = [
    ArgumentInfo::new("this", &DATA_SET_INSTANCE).display("Argument.this"),
    ArgumentInfo::new("row", &UPDATABLE_DATA_SET_ROW).display("Argument.row"),
    ArgumentInfo::new("reportContext", &REPORT_CONTEXT).display("Argument.reportContext"),
];

static DATA_SOURCE_ARGS: [ArgumentInfo; 2] = [
    ArgumentInfo::new("this", &DATA_SOURCE_INSTANCE).display("Argument.this"),
    ArgumentInfo::new("reportContext", &REPORT_CONTEXT).display("Argument.reportContext"),
];

//
// Choice lists
//

pub const JOIN_TYPES: &[&str] = &["inner", "left-out", "right-out", "full-out"];
pub const JOIN_OPERATORS: &[&str] = &["eq"];
pub const COLUMN_DATA_TYPES: &[&str] = &[
    "any",
    "integer",
    "float",
    "decimal",
    "string",
    "date-time",
    "date",
    "time",
    "boolean",
    "blob",
];
pub const FILTER_OPERATORS: &[&str] = &[
    "eq",
    "ne",
    "lt",
    "le",
    "gt",
    "ge",
    "between",
    "not-between",
    "is-null",
    "is-not-null",
    "is-true",
    "is-false",
    "like",
    "match",
];
pub const UNITS: &[&str] = &["in", "cm", "mm", "pt", "pc", "px"];

//
// Structures
//

pub static JOIN_CONDITION: StructureDefn = StructureDefn {
    name: "JoinCondition",
    display_name_id: "Structure.JoinCondition",
    members: &[
        PropertyDefn::new("joinType", T::Choice)
            .display("JoinCondition.joinType")
            .choices(JOIN_TYPES)
            .default_value("inner")
            .required(),
        PropertyDefn::new("joinOperator", T::Choice)
            .display("JoinCondition.joinOperator")
            .choices(JOIN_OPERATORS)
            .default_value("eq")
            .required(),
        PropertyDefn::new("leftDataSet", T::ElementRef)
            .display("JoinCondition.leftDataSet")
            .refs(&["DataSet"])
            .required(),
        PropertyDefn::new("rightDataSet", T::ElementRef)
            .display("JoinCondition.rightDataSet")
            .refs(&["DataSet"])
            .required(),
        PropertyDefn::new("leftExpression", T::Expression)
            .display("JoinCondition.leftExpression")
            .required(),
        PropertyDefn::new("rightExpression", T::Expression)
            .display("JoinCondition.rightExpression")
            .required(),
    ],
};

pub static COMPUTED_COLUMN: StructureDefn = StructureDefn {
    name: "ComputedColumn",
    display_name_id: "Structure.ComputedColumn",
    members: &[
        PropertyDefn::new("name", T::Name).required(),
        PropertyDefn::new("expression", T::Expression),
        PropertyDefn::new("dataType", T::Choice)
            .choices(COLUMN_DATA_TYPES)
            .default_value("any"),
        PropertyDefn::new("aggregateFunction", T::String),
    ],
};

pub static COLUMN_HINT: StructureDefn = StructureDefn {
    name: "ColumnHint",
    display_name_id: "Structure.ColumnHint",
    members: &[
        PropertyDefn::new("columnName", T::Name).required(),
        PropertyDefn::new("alias", T::String),
        PropertyDefn::new("displayName", T::String),
        PropertyDefn::new("helpText", T::String),
    ],
};

pub static FILTER_CONDITION: StructureDefn = StructureDefn {
    name: "FilterCondition",
    display_name_id: "Structure.FilterCondition",
    members: &[
        PropertyDefn::new("operator", T::Choice)
            .choices(FILTER_OPERATORS)
            .default_value("eq")
            .required(),
        PropertyDefn::new("expr", T::Expression).required(),
        PropertyDefn::new("value1", T::Expression),
        PropertyDefn::new("value2", T::Expression),
    ],
};

pub static PARAM_BINDING: StructureDefn = StructureDefn {
    name: "ParamBinding",
    display_name_id: "Structure.ParamBinding",
    members: &[
        PropertyDefn::new("paramName", T::Name).required(),
        PropertyDefn::new("expression", T::Expression),
    ],
};

pub static RESULT_SET_COLUMN: StructureDefn = StructureDefn {
    name: "ResultSetColumn",
    display_name_id: "Structure.ResultSetColumn",
    members: &[
        PropertyDefn::new("position", T::Integer),
        PropertyDefn::new("name", T::Name).required(),
        PropertyDefn::new("dataType", T::Choice)
            .choices(COLUMN_DATA_TYPES)
            .default_value("any"),
    ],
};

pub static INCLUDED_LIBRARY: StructureDefn = StructureDefn {
    name: "IncludedLibrary",
    display_name_id: "Structure.IncludedLibrary",
    members: &[
        PropertyDefn::new("fileName", T::String).required(),
        PropertyDefn::new("namespace", T::Name),
    ],
};

//
// Modules
//

pub static MODULE: ElementDefn = ElementDefn {
    name: "Module",
    xml_tag: "",
    display_name_id: "",
    parent: None,
    is_abstract: true,
    name_space: None,
    properties: &[
        PropertyDefn::new("title", T::String),
        PropertyDefn::new("author", T::String),
        PropertyDefn::new("createdBy", T::String),
        PropertyDefn::new("comments", T::String),
        PropertyDefn::new("units", T::Choice)
            .choices(UNITS)
            .default_value("in"),
        PropertyDefn::new("libraries", T::Structure)
            .structure("IncludedLibrary")
            .many(),
    ],
    methods: &[],
};

pub static REPORT_DESIGN: ElementDefn = ElementDefn {
    name: "ReportDesign",
    xml_tag: "report",
    display_name_id: "Element.ReportDesign",
    parent: Some(&MODULE),
    is_abstract: false,
    name_space: None,
    properties: &[],
    methods: &[],
};

pub static LIBRARY: ElementDefn = ElementDefn {
    name: "Library",
    xml_tag: "library",
    display_name_id: "Element.Library",
    parent: Some(&MODULE),
    is_abstract: false,
    name_space: None,
    properties: &[],
    methods: &[],
};

//
// Data sources
//

pub static DATA_SOURCE: ElementDefn = ElementDefn {
    name: "DataSource",
    xml_tag: "",
    display_name_id: "Element.DataSource",
    parent: None,
    is_abstract: true,
    name_space: Some(NameSpace::DataSource),
    properties: &[
        PropertyDefn::new("beforeOpen", T::Script),
        PropertyDefn::new("afterOpen", T::Script),
        PropertyDefn::new("beforeClose", T::Script),
        PropertyDefn::new("afterClose", T::Script),
    ],
    methods: &[
        MethodInfo::new("beforeOpen", &VOID, &DATA_SOURCE_ARGS).display("Method.beforeOpen"),
        MethodInfo::new("afterOpen", &VOID, &DATA_SOURCE_ARGS).display("Method.afterOpen"),
        MethodInfo::new("beforeClose", &VOID, &DATA_SOURCE_ARGS).display("Method.beforeClose"),
        MethodInfo::new("afterClose", &VOID, &DATA_SOURCE_ARGS).display("Method.afterClose"),
    ],
};

pub static ODA_DATA_SOURCE: ElementDefn = ElementDefn {
    name: "OdaDataSource",
    xml_tag: "oda-data-source",
    display_name_id: "Element.OdaDataSource",
    parent: Some(&DATA_SOURCE),
    is_abstract: false,
    name_space: None,
    properties: &[
        PropertyDefn::new("extensionID", T::String),
        PropertyDefn::new("odaDriverClass", T::String),
        PropertyDefn::new("odaURL", T::String),
        PropertyDefn::new("odaUser", T::String),
    ],
    methods: &[],
};

pub static SCRIPT_DATA_SOURCE: ElementDefn = ElementDefn {
    name: "ScriptDataSource",
    xml_tag: "script-data-source",
    display_name_id: "Element.ScriptDataSource",
    parent: Some(&DATA_SOURCE),
    is_abstract: false,
    name_space: None,
    properties: &[
        PropertyDefn::new("open", T::Script),
        PropertyDefn::new("close", T::Script),
    ],
    methods: &[
        MethodInfo::new("open", &VOID, &DATA_SOURCE_ARGS).display("Method.open"),
        MethodInfo::new("close", &VOID, &DATA_SOURCE_ARGS).display("Method.close"),
    ],
};

//
// Data sets
//

pub static DATA_SET: ElementDefn = ElementDefn {
    name: "DataSet",
    xml_tag: "",
    display_name_id: "Element.DataSet",
    parent: None,
    is_abstract: true,
    name_space: Some(NameSpace::DataSet),
    properties: &[
        PropertyDefn::new("dataSource", T::ElementRef)
            .display("DataSet.dataSource")
            .refs(&["DataSource"]),
        PropertyDefn::new("cachedRowCount", T::Integer),
        PropertyDefn::new("computedColumns", T::Structure)
            .structure("ComputedColumn")
            .many(),
        PropertyDefn::new("columnHints", T::Structure)
            .structure("ColumnHint")
            .many(),
        PropertyDefn::new("filter", T::Structure)
            .structure("FilterCondition")
            .many(),
        PropertyDefn::new("paramBindings", T::Structure)
            .structure("ParamBinding")
            .many(),
        PropertyDefn::new("resultSet", T::Structure)
            .structure("ResultSetColumn")
            .many(),
        PropertyDefn::new("beforeOpen", T::Script),
        PropertyDefn::new("afterOpen", T::Script),
        PropertyDefn::new("onFetch", T::Script),
        PropertyDefn::new("beforeClose", T::Script),
        PropertyDefn::new("afterClose", T::Script),
    ],
    methods: &[
        MethodInfo::new("beforeOpen", &VOID, &DATA_SET_ARGS).display("Method.beforeOpen"),
        MethodInfo::new("afterOpen", &VOID, &DATA_SET_ARGS).display("Method.afterOpen"),
        MethodInfo::new("onFetch", &VOID, &DATA_SET_ROW_ARGS).display("Method.onFetch"),
        MethodInfo::new("beforeClose", &VOID, &DATA_SET_ARGS).display("Method.beforeClose"),
        MethodInfo::new("afterClose", &VOID, &DATA_SET_ARGS).display("Method.afterClose"),
    ],
};

pub static ODA_DATA_SET: ElementDefn = ElementDefn {
    name: "OdaDataSet",
    xml_tag: "oda-data-set",
    display_name_id: "Element.OdaDataSet",
    parent: Some(&DATA_SET),
    is_abstract: false,
    name_space: None,
    properties: &[
        PropertyDefn::new("extensionID", T::String),
        PropertyDefn::new("queryText", T::Xml),
    ],
    methods: &[],
};

pub static SCRIPT_DATA_SET: ElementDefn = ElementDefn {
    name: "ScriptDataSet",
    xml_tag: "script-data-set",
    display_name_id: "Element.ScriptDataSet",
    parent: Some(&DATA_SET),
    is_abstract: false,
    name_space: None,
    properties: &[
        PropertyDefn::new("open", T::Script),
        PropertyDefn::new("fetch", T::Script),
        PropertyDefn::new("close", T::Script),
    ],
    methods: &[
        MethodInfo::new("open", &VOID, &DATA_SET_ARGS).display("Method.open"),
        MethodInfo::new("fetch", &BOOLEAN, &SCRIPT_FETCH_ARGS).display("Method.fetch"),
        MethodInfo::new("close", &VOID, &DATA_SET_ARGS).display("Method.close"),
    ],
};

pub static JOINT_DATA_SET: ElementDefn = ElementDefn {
    name: "JointDataSet",
    xml_tag: "joint-data-set",
    display_name_id: "Element.JointDataSet",
    parent: Some(&DATA_SET),
    is_abstract: false,
    name_space: None,
    properties: &[
        PropertyDefn::new("dataSets", T::ElementRef)
            .display("JointDataSet.dataSets")
            .refs(&["DataSet"])
            .many(),
        PropertyDefn::new("joinConditions", T::Structure)
            .structure("JoinCondition")
            .many(),
    ],
    methods: &[],
};

/// Assemble the built-in dictionary.
pub(crate) fn build() -> MetaDataDictionary {
    let mut dict = MetaDataDictionary::new();

    for ty in [
        &VOID,
        &BOOLEAN,
        &DATA_SET_INSTANCE,
        &DATA_SOURCE_INSTANCE,
        &DATA_SET_ROW,
        &UPDATABLE_DATA_SET_ROW,
        &REPORT_CONTEXT,
    ] {
        dict.register_script_type(ty);
    }

    for defn in [
        &JOIN_CONDITION,
        &COMPUTED_COLUMN,
        &COLUMN_HINT,
        &FILTER_CONDITION,
        &PARAM_BINDING,
        &RESULT_SET_COLUMN,
        &INCLUDED_LIBRARY,
    ] {
        dict.register_structure(defn);
    }

    for defn in [
        &MODULE,
        &REPORT_DESIGN,
        &LIBRARY,
        &DATA_SOURCE,
        &ODA_DATA_SOURCE,
        &SCRIPT_DATA_SOURCE,
        &DATA_SET,
        &ODA_DATA_SET,
        &SCRIPT_DATA_SET,
        &JOINT_DATA_SET,
    ] {
        dict.register_element(defn);
    }

    dict
}
