mod check;

#[cfg(test)]
mod tests;

use crate::{error::PropertyError, structure::StructureValue};
use derive_more::Display;
use rptmodel_schema::{NAMESPACE_SEPARATOR, defn::PropertyDefn, types::PropertyType};
use std::fmt;

// re-exports
pub use check::{check_value, validate_name};

///
/// ExpressionKind
///

#[derive(Clone, Copy, Debug, Default, Display, Eq, Hash, PartialEq)]
pub enum ExpressionKind {
    #[default]
    #[display("javascript")]
    Javascript,
    #[display("constant")]
    Constant,
}

impl ExpressionKind {
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "javascript" => Some(Self::Javascript),
            "constant" => Some(Self::Constant),
            _ => None,
        }
    }
}

///
/// Expression
///

#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Expression {
    pub text: String,
    pub kind: ExpressionKind,
}

impl Expression {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: ExpressionKind::Javascript,
        }
    }

    pub fn constant(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            kind: ExpressionKind::Constant,
        }
    }
}

///
/// ElementRefValue
///
/// A reference to a named element exactly as the author wrote it: either a
/// bare name or `namespace.name`. Resolution and qualification happen on read
/// against the inclusion graph; nothing resolved is stored here.
///

#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct ElementRefValue {
    namespace: Option<String>,
    name: String,
}

impl ElementRefValue {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            namespace: None,
            name: name.into(),
        }
    }

    pub fn qualified(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            namespace: Some(namespace.into()),
            name: name.into(),
        }
    }

    /// Split `ns.name` at the first separator. A leading separator is kept
    /// as part of the name.
    #[must_use]
    pub fn parse(literal: &str) -> Self {
        match literal.split_once(NAMESPACE_SEPARATOR) {
            Some((ns, name)) if !ns.is_empty() => Self::qualified(ns, name),
            _ => Self::new(literal),
        }
    }

    #[must_use]
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn is_qualified(&self) -> bool {
        self.namespace.is_some()
    }
}

impl fmt::Display for ElementRefValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.namespace {
            Some(ns) => write!(f, "{ns}{NAMESPACE_SEPARATOR}{}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

///
/// PropertyValue
///
/// Every value owns its data, so cloning a value (or a structure holding
/// values) never shares mutable state with the original.
///

#[derive(Clone, Debug, PartialEq)]
#[remain::sorted]
pub enum PropertyValue {
    Boolean(bool),
    Choice(String),
    ElementRef(ElementRefValue),
    Expression(Expression),
    Float(f64),
    Integer(i64),
    List(Vec<Self>),
    String(String),
    Structure(StructureValue),
}

impl PropertyValue {
    /// Parse one literal for `prop`. List properties parse a single item.
    pub fn from_literal(prop: &PropertyDefn, literal: &str) -> Result<Self, PropertyError> {
        let invalid = || PropertyError::InvalidLiteral {
            property: prop.name.to_string(),
            ty: prop.ty,
            literal: literal.to_string(),
        };

        let value = match prop.ty {
            PropertyType::Boolean => match literal {
                "true" => Self::Boolean(true),
                "false" => Self::Boolean(false),
                _ => return Err(invalid()),
            },
            PropertyType::Integer => Self::Integer(literal.parse().map_err(|_| invalid())?),
            PropertyType::Float => Self::Float(literal.parse().map_err(|_| invalid())?),
            PropertyType::Choice => Self::Choice(literal.to_string()),
            PropertyType::ElementRef => Self::ElementRef(ElementRefValue::parse(literal)),
            PropertyType::Expression => Self::Expression(Expression::new(literal)),
            PropertyType::Structure => return Err(invalid()),
            PropertyType::Name
            | PropertyType::Script
            | PropertyType::String
            | PropertyType::Xml => Self::String(literal.to_string()),
        };

        Ok(value)
    }

    /// The definition default, if it declares one.
    #[must_use]
    pub fn default_for(prop: &PropertyDefn) -> Option<Self> {
        prop.default
            .and_then(|literal| Self::from_literal(prop, literal).ok())
    }

    /// Scalar literal form; `None` for lists and structures.
    #[must_use]
    pub fn to_literal(&self) -> Option<String> {
        match self {
            Self::Boolean(b) => Some(b.to_string()),
            Self::Choice(s) | Self::String(s) => Some(s.clone()),
            Self::ElementRef(r) => Some(r.to_string()),
            Self::Expression(e) => Some(e.text.clone()),
            Self::Float(f) => Some(f.to_string()),
            Self::Integer(i) => Some(i.to_string()),
            Self::List(_) | Self::Structure(_) => None,
        }
    }

    #[must_use]
    pub const fn kind_label(&self) -> &'static str {
        match self {
            Self::Boolean(_) => "boolean",
            Self::Choice(_) => "choice",
            Self::ElementRef(_) => "element reference",
            Self::Expression(_) => "expression",
            Self::Float(_) => "float",
            Self::Integer(_) => "integer",
            Self::List(_) => "list",
            Self::String(_) => "string",
            Self::Structure(_) => "structure",
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Choice(s) | Self::String(s) => Some(s),
            Self::Expression(e) => Some(&e.text),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(i) => Some(*i),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_element_ref(&self) -> Option<&ElementRefValue> {
        match self {
            Self::ElementRef(r) => Some(r),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_expression(&self) -> Option<&Expression> {
        match self {
            Self::Expression(e) => Some(e),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_structure(&self) -> Option<&StructureValue> {
        match self {
            Self::Structure(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_list(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }

    pub const fn as_list_mut(&mut self) -> Option<&mut Vec<Self>> {
        match self {
            Self::List(items) => Some(items),
            _ => None,
        }
    }
}

impl From<bool> for PropertyValue {
    fn from(b: bool) -> Self {
        Self::Boolean(b)
    }
}

impl From<i64> for PropertyValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<f64> for PropertyValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<&str> for PropertyValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for PropertyValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<Expression> for PropertyValue {
    fn from(e: Expression) -> Self {
        Self::Expression(e)
    }
}

impl From<ElementRefValue> for PropertyValue {
    fn from(r: ElementRefValue) -> Self {
        Self::ElementRef(r)
    }
}

impl From<StructureValue> for PropertyValue {
    fn from(s: StructureValue) -> Self {
        Self::Structure(s)
    }
}

impl From<Vec<Self>> for PropertyValue {
    fn from(items: Vec<Self>) -> Self {
        Self::List(items)
    }
}
