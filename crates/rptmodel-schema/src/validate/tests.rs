use crate::{
    defn::{ElementDefn, PropertyDefn, StructureDefn},
    dictionary::{
        MetaDataDictionary,
        builtin::{DATA_SET, JOIN_CONDITION},
        get_dictionary,
    },
    types::PropertyType as T,
    validate::validate_dictionary,
};

static DANGLING: StructureDefn = StructureDefn {
    name: "Dangling",
    display_name_id: "",
    members: &[
        PropertyDefn::new("inner", T::Structure).structure("NoSuchStructure"),
        PropertyDefn::new("target", T::ElementRef).refs(&["NoSuchElement"]),
        PropertyDefn::new("kind", T::Choice),
        PropertyDefn::new("kind", T::String),
    ],
};

static BAD_DEFAULT: StructureDefn = StructureDefn {
    name: "BadDefault",
    display_name_id: "",
    members: &[PropertyDefn::new("count", T::Integer).default_value("many")],
};

static UNTAGGED: ElementDefn = ElementDefn {
    name: "Untagged",
    xml_tag: "",
    display_name_id: "",
    parent: Some(&DATA_SET),
    is_abstract: false,
    name_space: None,
    properties: &[PropertyDefn::new("dataSource", T::String)],
    methods: &[],
};

#[test]
fn builtin_dictionary_is_valid() {
    let dict = get_dictionary().expect("built-in dictionary should validate");

    assert!(dict.structure("JoinCondition").is_some());
    assert!(dict.element_by_tag("joint-data-set").is_some());
    assert!(dict.element_by_tag("").is_none(), "abstract defns have no tag");
}

#[test]
fn dangling_references_are_reported_per_member() {
    let mut dict = MetaDataDictionary::new();
    dict.register_structure(&DANGLING);

    let errs = validate_dictionary(&dict).expect_err("dangling defn must fail");
    let routes: Vec<String> = errs.flatten().into_iter().map(|(r, _)| r).collect();

    assert!(routes.contains(&"Dangling.inner".to_string()));
    assert!(routes.contains(&"Dangling.target".to_string()));
    assert!(routes.contains(&"Dangling.kind".to_string()));
    assert!(routes.contains(&"Dangling".to_string()), "duplicate member");
}

#[test]
fn invalid_defaults_are_rejected() {
    let mut dict = MetaDataDictionary::new();
    dict.register_structure(&BAD_DEFAULT);

    let errs = validate_dictionary(&dict).expect_err("bad default must fail");
    assert!(errs.to_string().contains("default 'many'"));
}

#[test]
fn duplicate_registration_and_shadowing_are_reported() {
    let mut dict = MetaDataDictionary::new();
    dict.register_structure(&JOIN_CONDITION);
    dict.register_structure(&JOIN_CONDITION);
    dict.register_element(&UNTAGGED);

    let errs = validate_dictionary(&dict).expect_err("must fail");
    let text = errs.to_string();

    assert!(text.contains("duplicate registration of structure 'JoinCondition'"));
    assert!(text.contains("concrete element has no xml tag"));
    assert!(text.contains("property 'dataSource' is declared more than once"));
    assert!(text.contains("parent 'DataSet' is not registered"));
}
