//! Reader for `.rptdesign` / `.rptlibrary` documents.
//!
//! Unknown property names are skipped with a warning so documents written
//! by newer tools still open. Unknown element tags are errors.

mod xml;


pub use xml::{XmlNode, parse_document};

use crate::{
    element::{DesignElement, ElementId},
    error::Error,
    module::{IncludedLibrary, LIBRARIES_PROPERTY, Module, ModuleKind},
    structure::{PropertySet, StructureValue},
    value::{ElementRefValue, Expression, ExpressionKind, PropertyValue},
};
use rptmodel_schema::{
    defn::PropertyDefn,
    dictionary::{builtin::INCLUDED_LIBRARY, dictionary},
    types::{NameSpace, PropertyType},
};
use tracing::{debug, warn};

// property value tags
const PROPERTY: &str = "property";
const EXPRESSION: &str = "expression";
const XML_PROPERTY: &str = "xml-property";
const METHOD: &str = "method";
const STRUCTURE: &str = "structure";
const LIST_PROPERTY: &str = "list-property";
const SIMPLE_PROPERTY_LIST: &str = "simple-property-list";
const VALUE: &str = "value";

const PROPERTY_TAGS: [&str; 7] = [
    PROPERTY,
    EXPRESSION,
    XML_PROPERTY,
    METHOD,
    STRUCTURE,
    LIST_PROPERTY,
    SIMPLE_PROPERTY_LIST,
];

/// Read one module document. Libraries are declared but not loaded.
pub fn read_module(source: &str, file_name: &str) -> Result<Module, Error> {
    let root = parse_document(source)
        .map_err(|err| Error::parse(format!("{file_name}: {}", err.message)))?;

    let kind = ModuleKind::from_tag(&root.tag).ok_or_else(|| {
        Error::parse(format!(
            "{file_name}: unknown document root <{}>",
            root.tag
        ))
    })?;

    let mut module = Module::new(kind, file_name);
    if let Some(version) = root.attr("version") {
        module.set_version(version);
    }

    for child in &root.children {
        if let Some(name_space) = NameSpace::from_slot_tag(&child.tag) {
            read_slot(&mut module, name_space, child)?;
        } else if child.attr("name") == Some(LIBRARIES_PROPERTY) {
            read_libraries(&mut module, child)?;
        } else if PROPERTY_TAGS.contains(&child.tag.as_str()) {
            read_property(&mut module, child, file_name)?;
        } else {
            warn!(file = file_name, tag = %child.tag, "skipping unknown module content");
        }
    }

    debug!(
        file = file_name,
        %kind,
        elements = module.elements().count(),
        libraries = module.libraries().len(),
        "module read"
    );

    Ok(module)
}

fn read_libraries(module: &mut Module, node: &XmlNode) -> Result<(), Error> {
    let context = format!("{}: libraries", module.file_name());

    for item in node.children_named(STRUCTURE) {
        let mut lib = StructureValue::new(&INCLUDED_LIBRARY);
        read_properties(&mut lib, item, &context)?;

        let file_name = lib
            .get("fileName")
            .and_then(PropertyValue::as_str)
            .ok_or_else(|| Error::parse(format!("{context}: library without fileName")))?
            .to_string();
        let namespace = lib
            .get("namespace")
            .and_then(PropertyValue::as_str)
            .map_or_else(
                || IncludedLibrary::default_namespace(&file_name),
                str::to_string,
            );

        module.push_library(file_name, namespace);
    }

    Ok(())
}

fn read_slot(module: &mut Module, name_space: NameSpace, slot: &XmlNode) -> Result<(), Error> {
    let dict = dictionary();

    for node in &slot.children {
        let context = format!("{}: <{}>", module.file_name(), node.tag);
        let defn = dict
            .element_by_tag(&node.tag)
            .ok_or_else(|| Error::parse(format!("{context}: unknown element tag")))?;
        if defn.resolved_name_space() != Some(name_space) {
            return Err(Error::parse(format!(
                "{context}: element does not belong in <{}>",
                slot.tag
            )));
        }

        let name = node
            .attr("name")
            .ok_or_else(|| Error::parse(format!("{context}: element has no name")))?;
        let mut element = DesignElement::new(defn, name)
            .map_err(|err| Error::parse(format!("{context}: {err}")))?;

        if let Some(id) = node.attr("id") {
            let id = id
                .parse()
                .map_err(|_| Error::parse(format!("{context}: invalid id '{id}'")))?;
            element.set_id(ElementId(id));
        }
        if let Some(parent) = node.attr("extends") {
            element.set_extends(Some(ElementRefValue::parse(parent)));
        }

        let context = format!("{}: {name}", module.file_name());
        read_properties(&mut element, node, &context)?;
        module
            .insert_element(element)
            .map_err(|err| Error::parse(format!("{context}: {err}")))?;
    }

    Ok(())
}

fn read_properties<S: PropertySet>(
    target: &mut S,
    node: &XmlNode,
    context: &str,
) -> Result<(), Error> {
    for child in &node.children {
        if PROPERTY_TAGS.contains(&child.tag.as_str()) {
            read_property(target, child, context)?;
        } else {
            warn!(context, tag = %child.tag, "skipping unknown content");
        }
    }

    Ok(())
}

fn read_property<S: PropertySet>(
    target: &mut S,
    node: &XmlNode,
    context: &str,
) -> Result<(), Error> {
    let name = node
        .attr("name")
        .ok_or_else(|| Error::parse(format!("{context}: <{}> has no name", node.tag)))?;

    let Some(prop) = target.property_defn(name) else {
        warn!(
            context,
            owner = target.owner_name(),
            property = name,
            "skipping unknown property"
        );
        return Ok(());
    };

    let value = read_value(prop, node, context)?;
    target
        .set_property(prop.name, Some(value))
        .map_err(|err| Error::parse(format!("{context}: {err}")))
}

fn read_value(
    prop: &'static PropertyDefn,
    node: &XmlNode,
    context: &str,
) -> Result<PropertyValue, Error> {
    // token-like values tolerate surrounding whitespace, text keeps it
    let literal = |text: &str| {
        let text = match prop.ty {
            PropertyType::Boolean
            | PropertyType::Choice
            | PropertyType::ElementRef
            | PropertyType::Float
            | PropertyType::Integer => text.trim(),
            _ => text,
        };
        PropertyValue::from_literal(prop, text)
            .map_err(|err| Error::parse(format!("{context}: {err}")))
    };

    match node.tag.as_str() {
        LIST_PROPERTY => node
            .children_named(STRUCTURE)
            .map(|item| read_structure(prop, item, context).map(PropertyValue::Structure))
            .collect::<Result<Vec<_>, _>>()
            .map(PropertyValue::List),

        SIMPLE_PROPERTY_LIST => node
            .children_named(VALUE)
            .map(|item| literal(&item.text))
            .collect::<Result<Vec<_>, _>>()
            .map(PropertyValue::List),

        STRUCTURE => read_structure(prop, node, context).map(PropertyValue::Structure),

        EXPRESSION if prop.ty == PropertyType::Expression => {
            let kind = match node.attr("type") {
                Some(kind) => ExpressionKind::parse(kind).ok_or_else(|| {
                    Error::parse(format!("{context}: unknown expression type '{kind}'"))
                })?,
                None => ExpressionKind::default(),
            };

            Ok(PropertyValue::Expression(Expression {
                text: node.text.clone(),
                kind,
            }))
        }

        _ => literal(&node.text),
    }
}

fn read_structure(
    prop: &PropertyDefn,
    node: &XmlNode,
    context: &str,
) -> Result<StructureValue, Error> {
    let struct_name = prop.struct_name.ok_or_else(|| {
        Error::parse(format!("{context}: property '{}' does not hold structures", prop.name))
    })?;
    let mut structure = StructureValue::by_name(struct_name).ok_or_else(|| {
        Error::parse(format!("{context}: unknown structure '{struct_name}'"))
    })?;

    let context = format!("{context}.{}", prop.name);
    read_properties(&mut structure, node, &context)?;

    Ok(structure)
}
