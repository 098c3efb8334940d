use derive_more::Display;
use rptmodel_schema::types::PropertyType;
use thiserror::Error as ThisError;

///
/// Error
///
/// Structured model error with a stable class + origin taxonomy.
/// Reads never produce one: unset or unknown values are absent instead.
///

#[derive(Debug, ThisError)]
#[error("{message}")]
pub struct Error {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
        }
    }

    /// Construct a reader-origin parse error.
    pub(crate) fn parse(message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Parse, ErrorOrigin::Reader, message)
    }

    /// Construct a not-found error for a missing document or element.
    pub fn not_found(origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self::new(ErrorClass::NotFound, origin, message)
    }

    /// Construct a session-origin inclusion cycle error.
    pub fn circular_inclusion(message: impl Into<String>) -> Self {
        Self::new(
            ErrorClass::CircularInclusion,
            ErrorOrigin::Session,
            message,
        )
    }

    pub fn io(origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Io, origin, message)
    }

    pub fn semantic(origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Semantic, origin, message)
    }

    pub fn unsupported(origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self::new(ErrorClass::Unsupported, origin, message)
    }

    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self.class, ErrorClass::NotFound)
    }
}

impl From<PropertyError> for Error {
    fn from(err: PropertyError) -> Self {
        Self::semantic(ErrorOrigin::Property, err.to_string())
    }
}

///
/// ErrorClass
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[remain::sorted]
pub enum ErrorClass {
    CircularInclusion,
    Io,
    NotFound,
    Parse,
    Semantic,
    Unsupported,
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Display, Eq, PartialEq)]
#[remain::sorted]
pub enum ErrorOrigin {
    Module,
    Property,
    Reader,
    Resolve,
    Session,
    Writer,
}

///
/// PropertyError
///
/// Rejected property writes. Reads never fail.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum PropertyError {
    #[error("property '{property}' is not defined on '{owner}'")]
    NotDefined { owner: String, property: String },

    #[error("property '{property}' expects {expected}, found {actual}")]
    TypeMismatch {
        property: String,
        expected: PropertyType,
        actual: &'static str,
    },

    #[error("'{value}' is not a valid choice for property '{property}'")]
    InvalidChoice { property: String, value: String },

    #[error("property '{property}' expects structure '{expected}', found '{actual}'")]
    StructureMismatch {
        property: String,
        expected: String,
        actual: String,
    },

    #[error("property '{property}' expects a list value")]
    ExpectedList { property: String },

    #[error("property '{property}' does not accept a list value")]
    UnexpectedList { property: String },

    #[error("invalid literal '{literal}' for property '{property}' of type {ty}")]
    InvalidLiteral {
        property: String,
        ty: PropertyType,
        literal: String,
    },

    #[error("invalid name '{name}': {reason}")]
    InvalidName { name: String, reason: &'static str },

    #[error("property '{property}' is managed by the module and cannot be set directly")]
    Managed { property: String },
}
