//! Document level dictionaries.
//!
//! Each schema object is a validating projection of a [`Dictionary`]:
//! entries are extracted one per line with the helpers of
//! [`maybe_ref`](super::maybe_ref) and nothing is resolved eagerly.

use crate::pdf::{Dictionary, Name, SchemaError};

/// Typed enum over the allowed values of a name entry.
macro_rules! name_enum {
    ($(#[$meta:meta])* $name:ident { $($(#[$variant_meta:meta])* $variant:ident),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$variant_meta])* $variant),+
        }

        impl $name {
            pub fn as_bytes(&self) -> &'static [u8] {
                match self {
                    $($name::$variant => stringify!($variant).as_bytes()),+
                }
            }
        }

        impl TryFrom<&$crate::pdf::Name> for $name {
            type Error = $crate::pdf::SchemaError;

            fn try_from(name: &$crate::pdf::Name) -> Result<Self, Self::Error> {
                $(
                    if name.as_bytes() == stringify!($variant).as_bytes() {
                        return Ok($name::$variant);
                    }
                )+
                Err($crate::pdf::SchemaError::InvalidEnumValue(name.clone()))
            }
        }

        impl $crate::pdf::FromObject for $name {
            fn from_object(object: &$crate::pdf::Object) -> Result<Self, $crate::pdf::SchemaError> {
                Self::try_from(&<$crate::pdf::Name as $crate::pdf::FromObject>::from_object(object)?)
            }
        }
    };
}

pub use self::{
    catalog::Catalog,
    interactive_form::InteractiveFormDict,
    metadata::MetadataStreamDictionary,
    name_dictionary::NameDictionary,
    viewer_preferences::{Direction, Duplex, NonFullScreenPageMode, ViewerPreferenceEnforce, ViewerPreferences},
};

pub mod catalog;
pub mod interactive_form;
pub mod metadata;
pub mod name_dictionary;
pub mod viewer_preferences;

/// Dictionary type names
pub(crate) mod dict_types {
    pub const CATALOG: &[u8] = b"Catalog";
    pub const METADATA: &[u8] = b"Metadata";
    pub const XML: &[u8] = b"XML";
}

pub(crate) const K_TYPE: &[u8] = b"Type";
pub(crate) const K_SUBTYPE: &[u8] = b"Subtype";

/// Checks a required type entry such as `Type` or `Subtype`.
fn require_type(dict: &Dictionary, key: &[u8], expected: &[u8]) -> Result<(), SchemaError> {
    let found = crate::pdf::get_direct_data::<Name>(dict, key)?;
    ensure_type(found, expected)
}

/// Checks `Type` if it is present. A missing `Type` is tolerated.
fn check_optional_type(dict: &Dictionary, expected: &[u8]) -> Result<(), SchemaError> {
    match crate::pdf::get_direct_data_nullable::<Name>(dict, K_TYPE)? {
        Some(found) => ensure_type(found, expected),
        None => {
            log::warn!("Missing dictionary type, expected `{}`", Name::from(expected));
            Ok(())
        }
    }
}

fn ensure_type(found: Name, expected: &[u8]) -> Result<(), SchemaError> {
    if found.as_bytes() != expected {
        log::warn!("Wrong dictionary type `{}`", found);
        return Err(SchemaError::WrongDictionaryType {
            expected: Name::from(expected),
            found,
        });
    }
    Ok(())
}

name_enum! {
    /// Page layout used when the document is opened.
    PageLayout {
        SinglePage,
        OneColumn,
        TwoColumnLeft,
        TwoColumnRight,
        TwoPageLeft,
        TwoPageRight,
    }
}

name_enum! {
    /// How the document is displayed when opened.
    PageMode {
        UseNone,
        UseOutlines,
        UseThumbs,
        FullScreen,
        UseOC,
        UseAttachments,
    }
}
