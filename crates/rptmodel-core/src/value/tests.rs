use crate::{
    error::PropertyError,
    structure::{PropertySet, StructureValue},
    value::{ElementRefValue, Expression, PropertyValue, check_value},
};
use rptmodel_schema::dictionary::builtin::{DATA_SET, JOINT_DATA_SET, JOIN_CONDITION};

#[test]
fn element_ref_parse_splits_at_first_separator() {
    let r = ElementRefValue::parse("new_library.Rev");
    assert_eq!(r.namespace(), Some("new_library"));
    assert_eq!(r.name(), "Rev");
    assert_eq!(r.to_string(), "new_library.Rev");

    let plain = ElementRefValue::parse("Rev");
    assert!(!plain.is_qualified());
    assert_eq!(plain.to_string(), "Rev");

    let leading = ElementRefValue::parse(".Rev");
    assert!(!leading.is_qualified());
    assert_eq!(leading.name(), ".Rev");
}

#[test]
fn literals_parse_by_property_type() {
    let cached = DATA_SET.property("cachedRowCount").unwrap();
    assert_eq!(
        PropertyValue::from_literal(cached, "25").unwrap(),
        PropertyValue::Integer(25)
    );
    assert!(matches!(
        PropertyValue::from_literal(cached, "lots"),
        Err(PropertyError::InvalidLiteral { .. })
    ));

    let source = DATA_SET.property("dataSource").unwrap();
    assert_eq!(
        PropertyValue::from_literal(source, "lib.Data Source").unwrap(),
        PropertyValue::ElementRef(ElementRefValue::qualified("lib", "Data Source"))
    );
}

#[test]
fn definition_defaults_are_parsed() {
    let join_type = JOIN_CONDITION.member("joinType").unwrap();
    assert_eq!(
        PropertyValue::default_for(join_type),
        Some(PropertyValue::Choice("inner".into()))
    );

    let left = JOIN_CONDITION.member("leftDataSet").unwrap();
    assert_eq!(PropertyValue::default_for(left), None);
}

#[test]
fn check_value_enforces_shape_and_type() {
    let data_sets = JOINT_DATA_SET.property("dataSets").unwrap();
    let one = PropertyValue::ElementRef(ElementRefValue::new("Rev"));

    assert!(matches!(
        check_value(data_sets, &one),
        Err(PropertyError::ExpectedList { .. })
    ));
    assert!(check_value(data_sets, &PropertyValue::List(vec![one.clone()])).is_ok());

    let source = DATA_SET.property("dataSource").unwrap();
    assert!(matches!(
        check_value(source, &PropertyValue::List(vec![one])),
        Err(PropertyError::UnexpectedList { .. })
    ));
    assert!(matches!(
        check_value(source, &PropertyValue::Integer(3)),
        Err(PropertyError::TypeMismatch { .. })
    ));
}

#[test]
fn check_value_rejects_unknown_choice_and_wrong_structure() {
    let join_type = JOIN_CONDITION.member("joinType").unwrap();
    assert!(check_value(join_type, &PropertyValue::Choice("left-out".into())).is_ok());
    assert!(matches!(
        check_value(join_type, &PropertyValue::Choice("sideways".into())),
        Err(PropertyError::InvalidChoice { .. })
    ));

    let conditions = JOINT_DATA_SET.property("joinConditions").unwrap();
    let hint = StructureValue::by_name("ColumnHint").unwrap();
    assert!(matches!(
        check_value(conditions, &PropertyValue::List(vec![hint.into()])),
        Err(PropertyError::StructureMismatch { .. })
    ));
}

#[test]
fn names_reject_separator_and_blank() {
    let mut column = StructureValue::by_name("ComputedColumn").unwrap();

    assert!(column.set_property("name", Some("total".into())).is_ok());
    assert!(matches!(
        column.set_property("name", Some("a.b".into())),
        Err(PropertyError::InvalidName { .. })
    ));
    assert!(matches!(
        column.set_property("name", Some("".into())),
        Err(PropertyError::InvalidName { .. })
    ));
}

#[test]
fn scalar_literals_round_trip() {
    let values = [
        PropertyValue::Boolean(true),
        PropertyValue::Integer(-4),
        PropertyValue::Expression(Expression::new("row[\"x\"]")),
        PropertyValue::ElementRef(ElementRefValue::qualified("lib", "Rev")),
    ];
    let literals: Vec<_> = values.iter().filter_map(PropertyValue::to_literal).collect();

    assert_eq!(literals, ["true", "-4", "row[\"x\"]", "lib.Rev"]);
    assert_eq!(PropertyValue::List(vec![]).to_literal(), None);
}
