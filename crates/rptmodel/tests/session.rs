use rptmodel::{DesignSession, ErrorClass, config::SessionConfig};
use std::{fs, path::PathBuf};

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures")
}

fn scratch(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("rptmodel-{name}-{}", std::process::id()));
    fs::create_dir_all(&dir).unwrap();

    dir
}

#[test]
fn library_is_found_through_resource_path() {
    let dir = scratch("resource-path");
    let report = dir.join("report.rptdesign");
    fs::copy(fixtures().join("report.rptdesign"), &report).unwrap();

    let config = SessionConfig {
        resource_path: Some(fixtures()),
        strict_semantics: true,
        ..SessionConfig::default()
    };
    let design = DesignSession::new(config).open_design(&report).unwrap();
    assert!(design.module().library("new_library").unwrap().is_loaded());

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn strict_session_fails_on_missing_library() {
    let dir = scratch("missing-library");
    let report = dir.join("report.rptdesign");
    fs::copy(fixtures().join("report.rptdesign"), &report).unwrap();

    let strict = SessionConfig {
        strict_semantics: true,
        ..SessionConfig::default()
    };
    let err = DesignSession::new(strict).open_design(&report).unwrap_err();
    assert_eq!(err.class, ErrorClass::NotFound);

    let design = DesignSession::default().open_design(&report).unwrap();
    assert!(!design.check().is_empty());

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn circular_inclusion_on_disk_is_rejected() {
    let dir = scratch("cycle");
    let include = |file: &str| {
        format!(
            r#"<library><list-property name="libraries"><structure>
                <property name="fileName">{file}</property>
            </structure></list-property></library>"#
        )
    };
    fs::write(dir.join("a.rptlibrary"), include("b.rptlibrary")).unwrap();
    fs::write(dir.join("b.rptlibrary"), include("a.rptlibrary")).unwrap();

    let err = DesignSession::default()
        .open_library(dir.join("a.rptlibrary"))
        .unwrap_err();
    assert_eq!(err.class, ErrorClass::CircularInclusion);

    fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn unreadable_document_is_not_found() {
    let err = DesignSession::default()
        .open_design(fixtures().join("absent.rptdesign"))
        .unwrap_err();

    assert!(err.is_not_found());
}
