use crate::{
    DesignSession, ErrorClass, MemoryLocator, config::SessionConfig, core::handle::ModuleHandle,
};
use rptmodel_schema::dictionary::dictionary;

const LIBRARY: &str = include_str!("../tests/fixtures/new_library.rptlibrary");
const REPORT: &str = include_str!("../tests/fixtures/report.rptdesign");

fn include(file_name: &str, namespace: &str) -> String {
    format!(
        r#"<list-property name="libraries"><structure>
            <property name="fileName">{file_name}</property>
            <property name="namespace">{namespace}</property>
        </structure></list-property>"#
    )
}

fn session(locator: MemoryLocator) -> DesignSession<MemoryLocator> {
    DesignSession::with_locator(SessionConfig::default(), locator)
}

fn strict(locator: MemoryLocator) -> DesignSession<MemoryLocator> {
    let config = SessionConfig {
        strict_semantics: true,
        ..SessionConfig::default()
    };

    DesignSession::with_locator(config, locator)
}

#[test]
fn opens_report_with_library_from_memory() {
    let locator = MemoryLocator::new()
        .with("reports/report.rptdesign", REPORT)
        .with("reports/new_library.rptlibrary", LIBRARY);

    let design = session(locator).open_design("reports/report.rptdesign").unwrap();
    let joint = design
        .handle()
        .find_data_set("Data Set")
        .and_then(|ds| ds.as_joint())
        .unwrap();
    let condition = joint.join_conditions().next().unwrap();

    assert_eq!(condition.left_data_set().as_deref(), Some("new_library.Rev"));
    assert_eq!(
        condition.right_data_set().as_deref(),
        Some("new_library.HistUnitsSales")
    );
    assert!(design.check().is_empty());
}

#[test]
fn library_is_found_through_resource_path() {
    let locator = MemoryLocator::new()
        .with_resource_path("shared")
        .with("shared/new_library.rptlibrary", LIBRARY);

    let design = session(locator)
        .open_design_str("reports/report.rptdesign", REPORT)
        .unwrap();

    assert!(design.module().library("new_library").unwrap().is_loaded());
}

#[test]
fn missing_library_is_a_warning_unless_strict() {
    let relaxed = session(MemoryLocator::new())
        .open_design_str("report.rptdesign", REPORT)
        .unwrap();
    assert!(!relaxed.module().library("new_library").unwrap().is_loaded());
    assert!(!relaxed.check().is_empty());

    let err = strict(MemoryLocator::new())
        .open_design_str("report.rptdesign", REPORT)
        .unwrap_err();
    assert_eq!(err.class, ErrorClass::NotFound);
    assert!(err.message.contains("new_library.rptlibrary"));
}

#[test]
fn strict_session_rejects_semantic_errors() {
    let report = r#"<report>
        <data-sets><oda-data-set name="Rev"><property name="dataSource">Nowhere</property></oda-data-set></data-sets>
    </report>"#;

    let design = session(MemoryLocator::new())
        .open_design_str("r.rptdesign", report)
        .unwrap();
    assert_eq!(design.check().len(), 1);

    let err = strict(MemoryLocator::new())
        .open_design_str("r.rptdesign", report)
        .unwrap_err();
    assert_eq!(err.class, ErrorClass::Semantic);
    assert!(err.message.contains("Nowhere"));
}

#[test]
fn circular_inclusion_reports_chain() {
    let a = format!("<library>{}</library>", include("b.rptlibrary", "b"));
    let b = format!("<library>{}</library>", include("a.rptlibrary", "a"));
    let report = format!("<report>{}</report>", include("a.rptlibrary", "a"));

    let locator = MemoryLocator::new()
        .with("a.rptlibrary", a)
        .with("b.rptlibrary", b);
    let err = session(locator)
        .open_design_str("report.rptdesign", &report)
        .unwrap_err();

    assert_eq!(err.class, ErrorClass::CircularInclusion);
    assert!(
        err.message
            .contains("report.rptdesign -> a.rptlibrary -> b.rptlibrary -> a.rptlibrary")
    );
}

#[test]
fn library_including_itself_is_circular() {
    let lib = format!("<library>{}</library>", include("self.rptlibrary", "me"));
    let locator = MemoryLocator::new().with("self.rptlibrary", lib);

    let err = session(locator).open_library("self.rptlibrary").unwrap_err();
    assert_eq!(err.class, ErrorClass::CircularInclusion);
}

#[test]
fn inclusion_depth_is_limited() {
    let mut locator = MemoryLocator::new();
    for level in 0..3 {
        let next = format!("l{}.rptlibrary", level + 1);
        locator.insert(
            format!("l{level}.rptlibrary"),
            format!("<library>{}</library>", include(&next, "next")),
        );
    }
    locator.insert("l3.rptlibrary", "<library/>");
    let report = format!("<report>{}</report>", include("l0.rptlibrary", "l0"));

    let shallow = SessionConfig {
        max_library_depth: 2,
        ..SessionConfig::default()
    };
    let err = DesignSession::with_locator(shallow, locator.clone())
        .open_design_str("r.rptdesign", &report)
        .unwrap_err();
    assert_eq!(err.class, ErrorClass::Unsupported);

    let design = session(locator)
        .open_design_str("r.rptdesign", &report)
        .unwrap();
    assert!(design.module().find_library("next").is_some());
}

#[test]
fn wrong_document_kind_is_rejected() {
    let locator = MemoryLocator::new().with("lib.rptlibrary", LIBRARY);

    let err = session(locator).open_design("lib.rptlibrary").unwrap_err();
    assert_eq!(err.class, ErrorClass::Unsupported);
}

#[test]
fn missing_document_is_not_found() {
    let err = session(MemoryLocator::new())
        .open_design("nothing.rptdesign")
        .unwrap_err();

    assert!(err.is_not_found());
}

#[test]
fn written_design_reopens_identically() {
    let locator = MemoryLocator::new().with("new_library.rptlibrary", LIBRARY);
    let session = session(locator);

    let first = session.open_design_str("report.rptdesign", REPORT).unwrap();
    let text = first.write().unwrap();
    let second = session.open_design_str("report.rptdesign", &text).unwrap();

    assert_eq!(second.write().unwrap(), text);
    assert_eq!(
        ModuleHandle::new(second.module())
            .find_data_set("Local Join")
            .and_then(|ds| ds.as_joint())
            .map(|j| j.data_sets()),
        Some(vec![
            "new_library.Rev".to_string(),
            "new_library.HistUnitsSales".to_string()
        ])
    );
}

#[test]
fn display_names_follow_configured_locale() {
    let method = dictionary()
        .element("OdaDataSet")
        .and_then(|e| e.method("beforeOpen"))
        .unwrap();

    let english = session(MemoryLocator::new());
    assert_eq!(english.display_name(method), "Before Open");

    let german = DesignSession::with_locator(
        SessionConfig {
            locale: "de_CH".to_string(),
            ..SessionConfig::default()
        },
        MemoryLocator::new(),
    );
    assert_eq!(german.display_name(method), "Vor dem Öffnen");
}
