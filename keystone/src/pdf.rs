use std::fmt::Display;

use fnv::FnvHashMap;

pub use self::{
    array::Array,
    document::{
        Catalog, Direction, Duplex, InteractiveFormDict, MetadataStreamDictionary, NameDictionary,
        NonFullScreenPageMode, PageLayout, PageMode, ViewerPreferenceEnforce, ViewerPreferences,
    },
    indirect::{IndirectObject, Reference},
    maybe_ref::{
        get_data, get_data_nullable, get_direct_data, get_direct_data_nullable, FromObject, MaybeReference,
        SchemaError, ShouldBeReference,
    },
    name::Name,
    raw_pdf::RawPdf,
    stream::{filter::FilterError, Filters, Stream, StreamDictionary, StreamDictionaryError},
    string::KsString,
    trailer::{Trailer, TrailerError},
    tree::{NameTreeNode, NumberTreeNode, TreeKey, TreeNode, TreeNodeError},
    xref::{CrossReferenceTable, UsedObject},
};

mod array;
pub mod document;
mod indirect;
pub(crate) mod maybe_ref;
mod name;
mod raw_pdf;
pub mod stream;
mod string;
pub(crate) mod trailer;
mod tree;
mod xref;

/// Keys are unique, their order carries no meaning.
pub type Dictionary = FnvHashMap<Name, Object>;

/// Variant tag of an [`Object`], used for type checks and error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Null,
    Bool,
    Integer,
    Real,
    String,
    Name,
    Array,
    Dictionary,
    Stream,
    Reference,
}

impl Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            ObjectKind::Null => "null",
            ObjectKind::Bool => "boolean",
            ObjectKind::Integer => "integer",
            ObjectKind::Real => "real",
            ObjectKind::String => "string",
            ObjectKind::Name => "name",
            ObjectKind::Array => "array",
            ObjectKind::Dictionary => "dictionary",
            ObjectKind::Stream => "stream",
            ObjectKind::Reference => "reference",
        };
        f.write_str(name)
    }
}

/// A PDF primitive.
///
/// References are never followed by the parser. Resolving them needs a
/// cross-reference table, see [`RawPdf::resolve`].
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Null,
    Bool(bool),
    Integer(i64),
    Real(f64),
    String(KsString),
    Name(Name),
    Array(Array),
    Dictionary(Dictionary),
    Stream(Stream),
    Reference(Reference),
}

impl Object {
    pub fn kind(&self) -> ObjectKind {
        match self {
            Object::Null => ObjectKind::Null,
            Object::Bool(_) => ObjectKind::Bool,
            Object::Integer(_) => ObjectKind::Integer,
            Object::Real(_) => ObjectKind::Real,
            Object::String(_) => ObjectKind::String,
            Object::Name(_) => ObjectKind::Name,
            Object::Array(_) => ObjectKind::Array,
            Object::Dictionary(_) => ObjectKind::Dictionary,
            Object::Stream(_) => ObjectKind::Stream,
            Object::Reference(_) => ObjectKind::Reference,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Object::Null)
    }

    pub fn bool(&self) -> Option<bool> {
        if let Object::Bool(b) = self {
            Some(*b)
        } else {
            None
        }
    }

    pub fn integer(&self) -> Option<i64> {
        if let Object::Integer(i) = self {
            Some(*i)
        } else {
            None
        }
    }

    pub fn real(&self) -> Option<f64> {
        if let Object::Real(r) = self {
            Some(*r)
        } else {
            None
        }
    }

    /// Integer or real as a float.
    pub fn number(&self) -> Option<f64> {
        match self {
            Object::Integer(i) => Some(*i as f64),
            Object::Real(r) => Some(*r),
            _ => None,
        }
    }

    pub fn string(&self) -> Option<&KsString> {
        if let Object::String(s) = self {
            Some(s)
        } else {
            None
        }
    }

    pub fn name(&self) -> Option<&Name> {
        if let Object::Name(n) = self {
            Some(n)
        } else {
            None
        }
    }

    pub fn array(&self) -> Option<&Array> {
        if let Object::Array(a) = self {
            Some(a)
        } else {
            None
        }
    }

    pub fn dictionary(&self) -> Option<&Dictionary> {
        if let Object::Dictionary(d) = self {
            Some(d)
        } else {
            None
        }
    }

    pub fn stream(&self) -> Option<&Stream> {
        if let Object::Stream(s) = self {
            Some(s)
        } else {
            None
        }
    }

    pub fn reference(&self) -> Option<&Reference> {
        if let Object::Reference(r) = self {
            Some(r)
        } else {
            None
        }
    }
}

impl Display for Object {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Object::Null => write!(f, "null"),
            Object::Bool(obj) => obj.fmt(f),
            Object::Integer(obj) => obj.fmt(f),
            Object::Real(obj) => obj.fmt(f),
            Object::String(obj) => write!(f, "({})", obj),
            Object::Name(obj) => write!(f, "/{}", obj),
            Object::Array(obj) => obj.fmt(f),
            Object::Dictionary(obj) => {
                write!(f, "<<")?;
                for (key, value) in obj {
                    write!(f, " /{} {}", key, value)?;
                }
                write!(f, " >>")
            }
            Object::Stream(obj) => obj.fmt(f),
            Object::Reference(obj) => obj.fmt(f),
        }
    }
}

impl From<bool> for Object {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Object {
    fn from(v: i64) -> Self {
        Self::Integer(v)
    }
}

impl From<f64> for Object {
    fn from(v: f64) -> Self {
        Self::Real(v)
    }
}

impl From<KsString> for Object {
    fn from(v: KsString) -> Self {
        Self::String(v)
    }
}

impl From<Name> for Object {
    fn from(n: Name) -> Self {
        Self::Name(n)
    }
}

impl From<Vec<Object>> for Object {
    fn from(a: Vec<Object>) -> Self {
        Self::Array(a.into())
    }
}

impl From<Array> for Object {
    fn from(a: Array) -> Self {
        Self::Array(a)
    }
}

impl From<Dictionary> for Object {
    fn from(d: Dictionary) -> Self {
        Self::Dictionary(d)
    }
}

impl From<Stream> for Object {
    fn from(s: Stream) -> Self {
        Self::Stream(s)
    }
}

impl From<Reference> for Object {
    fn from(r: Reference) -> Self {
        Self::Reference(r)
    }
}
