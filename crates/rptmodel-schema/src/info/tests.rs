use crate::{
    dictionary::builtin::{DATA_SET, DATA_SET_ROW, REPORT_CONTEXT, VOID},
    info::{ArgumentInfo, ClassInfo, MemberInfo, MethodInfo},
    messages::MessageCatalog,
};

static UNNAMED: ArgumentInfo = ArgumentInfo::new("", &DATA_SET_ROW);
static BLANK_METHOD: MethodInfo = MethodInfo::new("  ", &VOID, &[]);
static PLAIN: ArgumentInfo = ArgumentInfo::new("row", &DATA_SET_ROW);

#[test]
fn display_name_and_key_are_empty_without_localization() {
    let catalog = MessageCatalog::builtin();

    assert_eq!(PLAIN.display_name_key(), "");
    assert_eq!(PLAIN.display_name(catalog, "en"), "");
    assert_eq!(BLANK_METHOD.display_name_key(), "");
    assert_eq!(BLANK_METHOD.display_name(catalog, "de"), "");
}

#[test]
fn blank_names_fall_back_to_object_representation() {
    let arg = UNNAMED.to_string();
    assert_ne!(arg, UNNAMED.name);
    assert_eq!(arg, format!("ArgumentInfo@{}", DATA_SET_ROW.qualified_name));

    let method = BLANK_METHOD.to_string();
    assert_ne!(method, BLANK_METHOD.name);
    assert!(method.starts_with("MethodInfo@"));

    assert_eq!(PLAIN.to_string(), "row");
}

#[test]
fn type_name_is_fully_qualified() {
    assert_eq!(PLAIN.type_name(), DATA_SET_ROW.qualified_name);
    assert!(PLAIN.type_name().contains("::"));
    assert_eq!(BLANK_METHOD.type_name(), VOID.qualified_name);
}

#[test]
fn class_type_wraps_the_script_type_on_every_call() {
    let first = PLAIN.class_type();
    let second = PLAIN.class_type();

    assert_eq!(first, second);
    assert_eq!(first, ClassInfo::new(&DATA_SET_ROW));
    assert_eq!(first.name(), "IDataSetRow");
    assert!(std::ptr::eq(first.script_type(), &DATA_SET_ROW));
}

#[test]
fn builtin_hooks_are_localized() {
    let catalog = MessageCatalog::builtin();
    let before_open = DATA_SET.method("beforeOpen").expect("beforeOpen hook");

    assert_eq!(before_open.display_name_key(), "Method.beforeOpen");
    assert_eq!(before_open.display_name(catalog, "en"), "Before Open");
    assert_eq!(before_open.display_name(catalog, "de_AT"), "Vor dem Öffnen");
    assert_eq!(before_open.code_template(), "");

    let context = before_open
        .argument("reportContext")
        .expect("reportContext argument");
    assert!(std::ptr::eq(context.ty, &REPORT_CONTEXT));
    assert_eq!(context.class_type().display_name(catalog, ""), "Report Context");
}

#[test]
fn signature_lists_argument_types() {
    let on_fetch = DATA_SET.method("onFetch").expect("onFetch hook");

    assert_eq!(
        on_fetch.signature(),
        "onFetch(IDataSetInstance this, IDataSetRow row, IReportContext reportContext) -> void"
    );
}
