use crate::error::Error;
use quick_xml::{Reader, events::BytesStart, events::Event};

///
/// XmlNode
///
/// Minimal element tree built from the event stream. Text and CDATA
/// content of an element is concatenated into `text` exactly as written;
/// whitespace-only text between child elements is dropped.
///

#[derive(Clone, Debug, Default)]
pub struct XmlNode {
    pub tag: String,
    pub attributes: Vec<(String, String)>,
    pub text: String,
    pub children: Vec<Self>,
}

impl XmlNode {
    #[must_use]
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn children_named<'a>(&'a self, tag: &'a str) -> impl Iterator<Item = &'a Self> {
        self.children.iter().filter(move |c| c.tag == tag)
    }
}

/// Parse a whole document into its root element.
pub fn parse_document(source: &str) -> Result<XmlNode, Error> {
    let mut reader = Reader::from_str(source);

    let mut stack: Vec<XmlNode> = Vec::new();
    let mut root = None;

    loop {
        let event = reader.read_event().map_err(|e| {
            Error::parse(format!(
                "xml error at byte {}: {e}",
                reader.buffer_position()
            ))
        })?;

        match event {
            Event::Start(ref e) => stack.push(open_node(e)?),
            Event::Empty(ref e) => {
                let node = open_node(e)?;
                attach(&mut stack, &mut root, node)?;
            }
            Event::End(_) => {
                let node = stack
                    .pop()
                    .ok_or_else(|| Error::parse("unbalanced closing tag"))?;
                attach(&mut stack, &mut root, node)?;
            }
            Event::Text(ref e) => {
                let text = e
                    .unescape()
                    .map_err(|err| Error::parse(format!("bad text content: {err}")))?;
                if let Some(node) = stack.last_mut() {
                    node.text.push_str(&text);
                }
            }
            Event::CData(ref e) => {
                if let Some(node) = stack.last_mut() {
                    node.text.push_str(&String::from_utf8_lossy(e.as_ref()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(Error::parse("unexpected end of document"));
    }

    root.ok_or_else(|| Error::parse("document has no root element"))
}

fn open_node(e: &BytesStart<'_>) -> Result<XmlNode, Error> {
    let tag = String::from_utf8_lossy(e.name().as_ref()).to_string();
    let mut attributes = Vec::new();

    for attr in e.attributes() {
        let attr = attr.map_err(|err| Error::parse(format!("bad attribute on <{tag}>: {err}")))?;
        let key = String::from_utf8_lossy(attr.key.as_ref()).to_string();
        let value = attr
            .unescape_value()
            .map_err(|err| Error::parse(format!("bad attribute '{key}' on <{tag}>: {err}")))?
            .to_string();
        attributes.push((key, value));
    }

    Ok(XmlNode {
        tag,
        attributes,
        ..XmlNode::default()
    })
}

fn attach(
    stack: &mut [XmlNode],
    root: &mut Option<XmlNode>,
    mut node: XmlNode,
) -> Result<(), Error> {
    // indentation around children
    if !node.children.is_empty() && node.text.trim().is_empty() {
        node.text.clear();
    }

    match stack.last_mut() {
        Some(parent) => parent.children.push(node),
        None if root.is_none() => *root = Some(node),
        None => return Err(Error::parse("document has more than one root element")),
    }

    Ok(())
}
