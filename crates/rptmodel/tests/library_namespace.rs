use rptmodel::{DesignSession, prelude::*};
use std::path::PathBuf;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn open(name: &str) -> Design {
    DesignSession::default()
        .open_design(fixture(name))
        .expect("fixture should open")
}

#[test]
fn inherited_join_condition_is_qualified_with_library_namespace() {
    let design = open("report.rptdesign");
    let handle = design.handle();

    let joint = handle
        .find_data_set("Data Set")
        .and_then(|ds| ds.as_joint())
        .expect("joint data set");
    let conditions: Vec<_> = joint.join_conditions().collect();

    assert_eq!(conditions.len(), 1);
    assert_eq!(
        conditions[0].left_data_set().as_deref(),
        Some("new_library.Rev")
    );
    assert_eq!(
        conditions[0].right_data_set().as_deref(),
        Some("new_library.HistUnitsSales")
    );
    assert_eq!(
        joint.data_sets(),
        ["new_library.Rev", "new_library.HistUnitsSales"]
    );
}

#[test]
fn reads_are_idempotent() {
    let design = open("report.rptdesign");
    let before = design.write().unwrap();

    for _ in 0..3 {
        let joint = design
            .handle()
            .find_data_set("Data Set")
            .and_then(|ds| ds.as_joint())
            .unwrap();
        let condition = joint.join_conditions().next().unwrap();

        assert_eq!(condition.left_data_set().as_deref(), Some("new_library.Rev"));
    }

    // qualification never leaks into the stored values
    assert_eq!(design.write().unwrap(), before);
    let lib = design.module().find_library("new_library").unwrap();
    let joint = ModuleHandle::new(lib)
        .find_data_set("Data Set")
        .and_then(|ds| ds.as_joint())
        .unwrap();
    assert_eq!(
        joint.join_conditions().next().unwrap().left_data_set().as_deref(),
        Some("Rev")
    );
}

#[test]
fn library_opened_alone_keeps_plain_names() {
    let design = DesignSession::default()
        .open_library(fixture("new_library.rptlibrary"))
        .unwrap();

    let joint = design
        .handle()
        .find_data_set("Data Set")
        .and_then(|ds| ds.as_joint())
        .unwrap();
    assert_eq!(
        joint.join_conditions().next().unwrap().right_data_set().as_deref(),
        Some("HistUnitsSales")
    );
}

#[test]
fn nested_library_uses_namespace_of_its_includer() {
    let design = open("nested.rptdesign");
    let handle = design.handle();

    let outer = handle.library("outer").unwrap();
    assert!(outer.library("inner").is_some());

    let joint = handle
        .find_data_set("Data Set")
        .and_then(|ds| ds.as_joint())
        .unwrap();
    let condition = joint.join_conditions().next().unwrap();
    assert_eq!(condition.left_data_set().as_deref(), Some("inner.Rev"));
    assert_eq!(
        joint.extends().map(|p| p.qualified_name()).as_deref(),
        Some("outer.Wrapped")
    );
    assert!(design.check().is_empty());
}
