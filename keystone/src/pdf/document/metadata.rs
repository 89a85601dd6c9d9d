use super::{dict_types, require_type, K_SUBTYPE, K_TYPE};
use crate::pdf::{Dictionary, FromObject, Object, ObjectKind, SchemaError, StreamDictionary};

/// Dictionary of an XML metadata stream.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataStreamDictionary {
    pub stream_dictionary: StreamDictionary,
}

impl TryFrom<&Dictionary> for MetadataStreamDictionary {
    type Error = SchemaError;

    fn try_from(dict: &Dictionary) -> Result<Self, Self::Error> {
        let stream_dictionary = StreamDictionary::try_from(dict)?;
        require_type(dict, K_TYPE, dict_types::METADATA)?;
        require_type(dict, K_SUBTYPE, dict_types::XML)?;

        Ok(Self { stream_dictionary })
    }
}

/// Only stream objects carry metadata.
impl FromObject for MetadataStreamDictionary {
    fn from_object(object: &Object) -> Result<Self, SchemaError> {
        match object {
            Object::Stream(stream) => Self::try_from(&stream.dictionary),
            other => Err(SchemaError::WrongType {
                expected: ObjectKind::Stream,
                found: other.kind(),
            }),
        }
    }
}
