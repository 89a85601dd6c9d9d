//! Typed extraction of dictionary entries that may be indirect.
//!
//! Most entries of document level dictionaries may either hold their value
//! inline or point to it through a [`Reference`]. Extraction never follows
//! references, resolving is an explicit call to
//! [`MaybeReference::resolve`].

use crate::{cursor::ByteCursor, KsError};

use super::{
    stream::StreamDictionaryError,
    tree::{TreeKey, TreeNode, TreeNodeError},
    Array, Dictionary, KsString, Name, Object, ObjectKind, RawPdf, Reference, Stream,
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SchemaError {
    #[error("missing required key `{0}`")]
    MissingKey(String),
    #[error("expected {expected}, found {found}")]
    WrongType { expected: ObjectKind, found: ObjectKind },
    #[error("invalid `{key}`: {source}")]
    InvalidField { key: String, source: Box<SchemaError> },
    #[error("invalid array element {index}: {source}")]
    Heterogeneous { index: usize, source: Box<SchemaError> },
    #[error("{0} is not an allowed value")]
    InvalidEnumValue(Name),
    #[error("expected type {expected}, found {found}")]
    WrongDictionaryType { expected: Name, found: Name },
    #[error(transparent)]
    Tree(#[from] TreeNodeError),
    #[error(transparent)]
    Stream(#[from] StreamDictionaryError),
}

impl SchemaError {
    fn in_field(self, key: &[u8]) -> Self {
        SchemaError::InvalidField {
            key: String::from_utf8_lossy(key).into_owned(),
            source: Box::new(self),
        }
    }
}

/// Fallible conversion of a parsed object into a typed value.
pub trait FromObject: Sized {
    fn from_object(object: &Object) -> Result<Self, SchemaError>;
}

macro_rules! from_variant {
    ($ty:ty, $variant:ident) => {
        impl FromObject for $ty {
            fn from_object(object: &Object) -> Result<Self, SchemaError> {
                match object {
                    Object::$variant(value) => Ok(value.clone()),
                    other => Err(SchemaError::WrongType {
                        expected: ObjectKind::$variant,
                        found: other.kind(),
                    }),
                }
            }
        }
    };
}

from_variant!(bool, Bool);
from_variant!(i64, Integer);
from_variant!(KsString, String);
from_variant!(Name, Name);
from_variant!(Array, Array);
from_variant!(Dictionary, Dictionary);
from_variant!(Stream, Stream);
from_variant!(Reference, Reference);

impl FromObject for f64 {
    fn from_object(object: &Object) -> Result<Self, SchemaError> {
        object.number().ok_or(SchemaError::WrongType {
            expected: ObjectKind::Real,
            found: object.kind(),
        })
    }
}

impl FromObject for Object {
    fn from_object(object: &Object) -> Result<Self, SchemaError> {
        Ok(object.clone())
    }
}

/// Homogeneous arrays.
impl<T: FromObject> FromObject for Vec<T> {
    fn from_object(object: &Object) -> Result<Self, SchemaError> {
        Array::from_object(object)?
            .iter()
            .enumerate()
            .map(|(index, element)| {
                T::from_object(element).map_err(|e| SchemaError::Heterogeneous {
                    index,
                    source: Box::new(e),
                })
            })
            .collect()
    }
}

impl<K: TreeKey> FromObject for TreeNode<K> {
    fn from_object(object: &Object) -> Result<Self, SchemaError> {
        Ok(Self::try_from(&Dictionary::from_object(object)?)?)
    }
}

/// Implements [`FromObject`] for a type built from a dictionary with
/// `TryFrom<&Dictionary, Error = SchemaError>`.
macro_rules! from_dictionary {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl $crate::pdf::FromObject for $ty {
                fn from_object(object: &$crate::pdf::Object) -> Result<Self, $crate::pdf::SchemaError> {
                    Self::try_from(&<$crate::pdf::Dictionary as $crate::pdf::FromObject>::from_object(object)?)
                }
            }
        )+
    };
}
pub(crate) use from_dictionary;

/// Either an inline value or a reference to it.
#[derive(Debug, Clone, PartialEq)]
pub enum MaybeReference<T> {
    Value(T),
    Reference(Reference),
}

/// Used where the value should be indirect but an inline value is
/// tolerated.
pub type ShouldBeReference<T> = MaybeReference<T>;

impl<T> MaybeReference<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            MaybeReference::Value(value) => Some(value),
            MaybeReference::Reference(_) => None,
        }
    }

    pub fn reference(&self) -> Option<&Reference> {
        match self {
            MaybeReference::Value(_) => None,
            MaybeReference::Reference(r) => Some(r),
        }
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, MaybeReference::Reference(_))
    }
}

impl<T: FromObject> MaybeReference<T> {
    /// Returns the inline value or loads the referenced object through the
    /// cross-reference table of `pdf` and converts it.
    pub fn resolve<C: ByteCursor>(self, pdf: &mut RawPdf<C>) -> Result<T, KsError> {
        match self {
            MaybeReference::Value(value) => Ok(value),
            MaybeReference::Reference(r) => pdf.resolve_as(&r),
        }
    }
}

impl<T: FromObject> FromObject for MaybeReference<T> {
    fn from_object(object: &Object) -> Result<Self, SchemaError> {
        match object {
            Object::Reference(r) => Ok(MaybeReference::Reference(*r)),
            other => T::from_object(other).map(MaybeReference::Value),
        }
    }
}

fn present<'a>(dict: &'a Dictionary, key: &[u8]) -> Option<&'a Object> {
    dict.get(key).filter(|o| !o.is_null())
}

/// Required entry, inline or indirect.
pub fn get_data<T: FromObject>(dict: &Dictionary, key: &[u8]) -> Result<MaybeReference<T>, SchemaError> {
    get_data_nullable(dict, key)?.ok_or_else(|| SchemaError::MissingKey(String::from_utf8_lossy(key).into_owned()))
}

/// Optional entry, inline or indirect. A `null` value counts as absent.
pub fn get_data_nullable<T: FromObject>(
    dict: &Dictionary,
    key: &[u8],
) -> Result<Option<MaybeReference<T>>, SchemaError> {
    present(dict, key)
        .map(|o| MaybeReference::from_object(o).map_err(|e| e.in_field(key)))
        .transpose()
}

/// Required entry that must be inline.
pub fn get_direct_data<T: FromObject>(dict: &Dictionary, key: &[u8]) -> Result<T, SchemaError> {
    get_direct_data_nullable(dict, key)?.ok_or_else(|| SchemaError::MissingKey(String::from_utf8_lossy(key).into_owned()))
}

/// Optional entry that must be inline.
pub fn get_direct_data_nullable<T: FromObject>(dict: &Dictionary, key: &[u8]) -> Result<Option<T>, SchemaError> {
    present(dict, key)
        .map(|o| T::from_object(o).map_err(|e| e.in_field(key)))
        .transpose()
}
