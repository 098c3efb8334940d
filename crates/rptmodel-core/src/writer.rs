//! Writer for module documents. Output reads back through
//! [`read_module`](crate::reader::read_module) to the same module.

use crate::{
    DESIGN_XMLNS,
    element::DesignElement,
    error::{Error, ErrorOrigin},
    module::{LIBRARIES_PROPERTY, Module},
    structure::StructureValue,
    value::{ExpressionKind, PropertyValue},
};
use quick_xml::{
    Writer,
    events::{BytesCData, BytesDecl, BytesEnd, BytesStart, BytesText, Event},
};
use rptmodel_schema::{
    defn::PropertyDefn,
    types::{NameSpace, PropertyType},
};

type XmlWriter = Writer<Vec<u8>>;

/// Serialize `module`, including its library declarations but not the
/// library documents themselves.
pub fn write_module(module: &Module) -> Result<String, Error> {
    let mut w = Writer::new_with_indent(Vec::new(), b' ', 4);

    emit(&mut w, module).map_err(|err| {
        Error::io(
            ErrorOrigin::Writer,
            format!("{}: {err}", module.file_name()),
        )
    })?;

    String::from_utf8(w.into_inner())
        .map_err(|err| Error::io(ErrorOrigin::Writer, err.to_string()))
}

fn emit(w: &mut XmlWriter, module: &Module) -> std::io::Result<()> {
    w.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;

    let root = module.kind().xml_tag();
    let mut start = BytesStart::new(root);
    start.push_attribute(("xmlns", DESIGN_XMLNS));
    start.push_attribute(("version", module.version()));
    w.write_event(Event::Start(start))?;

    for (prop, value) in module.local_values() {
        write_property(w, prop, value)?;
    }
    write_libraries(w, module)?;

    for name_space in NameSpace::ALL {
        let mut elements = module.elements_in(name_space).peekable();
        if elements.peek().is_none() {
            continue;
        }

        let slot = name_space.slot_tag();
        w.write_event(Event::Start(BytesStart::new(slot)))?;
        for element in elements {
            write_element(w, element)?;
        }
        w.write_event(Event::End(BytesEnd::new(slot)))?;
    }

    w.write_event(Event::End(BytesEnd::new(root)))?;
    w.write_event(Event::Text(BytesText::new("\n")))?;

    Ok(())
}

fn write_libraries(w: &mut XmlWriter, module: &Module) -> std::io::Result<()> {
    if module.libraries().is_empty() {
        return Ok(());
    }

    w.write_event(Event::Start(named("list-property", LIBRARIES_PROPERTY)))?;
    for lib in module.libraries() {
        w.write_event(Event::Start(BytesStart::new("structure")))?;
        text_element(w, "property", "fileName", &lib.file_name)?;
        text_element(w, "property", "namespace", &lib.namespace)?;
        w.write_event(Event::End(BytesEnd::new("structure")))?;
    }
    w.write_event(Event::End(BytesEnd::new("list-property")))?;

    Ok(())
}

fn write_element(w: &mut XmlWriter, element: &DesignElement) -> std::io::Result<()> {
    let tag = element.defn().xml_tag;
    let mut start = BytesStart::new(tag);
    if let Some(name) = element.name() {
        start.push_attribute(("name", name));
    }
    let id = element.id().to_string();
    start.push_attribute(("id", id.as_str()));
    let extends = element.extends().map(ToString::to_string);
    if let Some(parent) = &extends {
        start.push_attribute(("extends", parent.as_str()));
    }

    let mut values = element.local_values().peekable();
    if values.peek().is_none() {
        return w.write_event(Event::Empty(start));
    }

    w.write_event(Event::Start(start))?;
    for (prop, value) in values {
        write_property(w, prop, value)?;
    }
    w.write_event(Event::End(BytesEnd::new(tag)))?;

    Ok(())
}

fn write_property(
    w: &mut XmlWriter,
    prop: &PropertyDefn,
    value: &PropertyValue,
) -> std::io::Result<()> {
    match value {
        PropertyValue::List(items) if prop.ty == PropertyType::Structure => {
            w.write_event(Event::Start(named("list-property", prop.name)))?;
            for item in items.iter().filter_map(PropertyValue::as_structure) {
                write_structure(w, BytesStart::new("structure"), item)?;
            }
            w.write_event(Event::End(BytesEnd::new("list-property")))
        }
        PropertyValue::List(items) => {
            w.write_event(Event::Start(named("simple-property-list", prop.name)))?;
            for item in items.iter().filter_map(PropertyValue::to_literal) {
                w.write_event(Event::Start(BytesStart::new("value")))?;
                w.write_event(Event::Text(BytesText::new(&item)))?;
                w.write_event(Event::End(BytesEnd::new("value")))?;
            }
            w.write_event(Event::End(BytesEnd::new("simple-property-list")))
        }
        PropertyValue::Structure(s) => write_structure(w, named("structure", prop.name), s),
        PropertyValue::Expression(expr) => {
            let mut start = named("expression", prop.name);
            if expr.kind == ExpressionKind::Constant {
                start.push_attribute(("type", "constant"));
            }
            w.write_event(Event::Start(start))?;
            w.write_event(Event::Text(BytesText::new(&expr.text)))?;
            w.write_event(Event::End(BytesEnd::new("expression")))
        }
        other => {
            let text = other.to_literal().unwrap_or_default();
            match prop.ty {
                PropertyType::Script => cdata_element(w, "method", prop.name, &text),
                PropertyType::Xml => cdata_element(w, "xml-property", prop.name, &text),
                _ => text_element(w, "property", prop.name, &text),
            }
        }
    }
}

fn write_structure(
    w: &mut XmlWriter,
    start: BytesStart<'_>,
    s: &StructureValue,
) -> std::io::Result<()> {
    w.write_event(Event::Start(start))?;
    for (member, value) in s.members() {
        write_property(w, member, value)?;
    }
    w.write_event(Event::End(BytesEnd::new("structure")))?;

    Ok(())
}

fn named<'a>(tag: &'a str, name: &'a str) -> BytesStart<'a> {
    let mut start = BytesStart::new(tag);
    start.push_attribute(("name", name));

    start
}

fn text_element(w: &mut XmlWriter, tag: &str, name: &str, text: &str) -> std::io::Result<()> {
    w.write_event(Event::Start(named(tag, name)))?;
    w.write_event(Event::Text(BytesText::new(text)))?;
    w.write_event(Event::End(BytesEnd::new(tag)))?;

    Ok(())
}

// CDATA cannot carry its own terminator
fn cdata_element(w: &mut XmlWriter, tag: &str, name: &str, text: &str) -> std::io::Result<()> {
    if text.contains("]]>") {
        return text_element(w, tag, name, text);
    }

    w.write_event(Event::Start(named(tag, name)))?;
    w.write_event(Event::CData(BytesCData::new(text)))?;
    w.write_event(Event::End(BytesEnd::new(tag)))?;

    Ok(())
}
