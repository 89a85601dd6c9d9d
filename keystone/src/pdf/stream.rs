use std::{fmt::Display, ops::Range};

use crate::{
    cursor::{ByteCursor, CursorError},
    KsError,
};

use super::{Dictionary, Name, Object, ObjectKind};

pub mod filter;

pub(crate) const K_LENGTH: &[u8] = b"Length";
pub(crate) const K_FILTER: &[u8] = b"Filter";
pub(crate) const K_DECODE_PARMS: &[u8] = b"DecodeParms";
pub(crate) const K_DL: &[u8] = b"DL";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StreamDictionaryError {
    #[error("stream dictionary has no `Length`")]
    MissingLength,
    #[error("stream `Length` must be a direct integer, found a reference")]
    IndirectLength,
    #[error("stream `Length` must be a non-negative integer, found {0}")]
    InvalidLength(ObjectKind),
    #[error("stream `Filter` must be a name or an array of names")]
    InvalidFilter,
    #[error("stream `DecodeParms` must be a dictionary or an array of dictionaries")]
    InvalidDecodeParms,
    #[error("multiple `DecodeParms` for a single filter")]
    MultipleDecodeParmsForSingleFilter,
    #[error("single `DecodeParms` for multiple filters")]
    SingleDecodeParmsForMultipleFilters,
    #[error("{filters} filters but {decode_parms} `DecodeParms`")]
    DecodeParmsCountMismatch { filters: usize, decode_parms: usize },
    #[error("stream `DL` must be a non-negative integer")]
    InvalidDl,
}

/// The `Filter`/`DecodeParms` pair of a stream dictionary.
///
/// A single filter takes at most one parameter dictionary, a filter array
/// takes an array of dictionaries of the same length.
#[derive(Debug, Clone, PartialEq)]
pub enum Filters {
    Single {
        filter: Name,
        decode_parms: Option<Dictionary>,
    },
    Chain {
        filters: Vec<Name>,
        decode_parms: Option<Vec<Dictionary>>,
    },
}

impl Filters {
    /// Filters in the order they are applied when decoding.
    pub fn iter(&self) -> impl Iterator<Item = (&Name, Option<&Dictionary>)> {
        let (filters, decode_parms): (&[Name], Option<&[Dictionary]>) = match self {
            Filters::Single { filter, decode_parms } => {
                (std::slice::from_ref(filter), decode_parms.as_ref().map(std::slice::from_ref))
            }
            Filters::Chain { filters, decode_parms } => (filters.as_slice(), decode_parms.as_deref()),
        };
        filters
            .iter()
            .enumerate()
            .map(move |(index, filter)| (filter, decode_parms.and_then(|parms| parms.get(index))))
    }

    fn from_entries(filter: &Object, decode_parms: Option<&Object>) -> Result<Self, StreamDictionaryError> {
        match filter {
            Object::Name(filter) => {
                let decode_parms = match decode_parms {
                    None | Some(Object::Null) => None,
                    Some(Object::Dictionary(d)) => Some(d.clone()),
                    Some(Object::Array(_)) => return Err(StreamDictionaryError::MultipleDecodeParmsForSingleFilter),
                    Some(_) => return Err(StreamDictionaryError::InvalidDecodeParms),
                };
                Ok(Filters::Single {
                    filter: filter.clone(),
                    decode_parms,
                })
            }
            Object::Array(filters) => {
                let filters = filters
                    .iter()
                    .map(|f| f.name().cloned().ok_or(StreamDictionaryError::InvalidFilter))
                    .collect::<Result<Vec<_>, _>>()?;

                let decode_parms = match decode_parms {
                    None | Some(Object::Null) => None,
                    Some(Object::Array(parms)) => {
                        let parms = parms
                            .iter()
                            .map(|p| p.dictionary().cloned().ok_or(StreamDictionaryError::InvalidDecodeParms))
                            .collect::<Result<Vec<_>, _>>()?;
                        if parms.len() != filters.len() {
                            return Err(StreamDictionaryError::DecodeParmsCountMismatch {
                                filters: filters.len(),
                                decode_parms: parms.len(),
                            });
                        }
                        Some(parms)
                    }
                    Some(Object::Dictionary(_)) => {
                        return Err(StreamDictionaryError::SingleDecodeParmsForMultipleFilters)
                    }
                    Some(_) => return Err(StreamDictionaryError::InvalidDecodeParms),
                };

                Ok(Filters::Chain { filters, decode_parms })
            }
            _ => Err(StreamDictionaryError::InvalidFilter),
        }
    }
}

/// The entries of a stream dictionary that describe the stream data itself.
#[derive(Debug, Clone, PartialEq)]
pub struct StreamDictionary {
    /// Number of bytes between the end-of-line after `stream` and `endstream`.
    pub length: usize,
    pub filters: Option<Filters>,
    /// Hint for the decoded length.
    pub dl: Option<usize>,
}

impl TryFrom<&Dictionary> for StreamDictionary {
    type Error = StreamDictionaryError;

    fn try_from(dict: &Dictionary) -> Result<Self, Self::Error> {
        let length = match dict.get(K_LENGTH).ok_or(StreamDictionaryError::MissingLength)? {
            Object::Integer(length) => {
                usize::try_from(*length).map_err(|_| StreamDictionaryError::InvalidLength(ObjectKind::Integer))?
            }
            Object::Reference(_) => return Err(StreamDictionaryError::IndirectLength),
            other => return Err(StreamDictionaryError::InvalidLength(other.kind())),
        };

        let filters = match dict.get(K_FILTER) {
            Some(filter) => Some(Filters::from_entries(filter, dict.get(K_DECODE_PARMS))?),
            None => {
                if dict.contains_key(K_DECODE_PARMS) {
                    log::warn!("Ignoring `DecodeParms` of a stream without `Filter`");
                }
                None
            }
        };

        let dl = dict
            .get(K_DL)
            .map(|dl| {
                dl.integer()
                    .and_then(|dl| usize::try_from(dl).ok())
                    .ok_or(StreamDictionaryError::InvalidDl)
            })
            .transpose()?;

        Ok(Self { length, filters, dl })
    }
}

/// A stream object. The data is not read while parsing, only its location
/// `[start, end)` in the source is recorded.
///
/// The range is only meaningful for the source the stream was parsed from.
#[derive(Debug, Clone, PartialEq)]
pub struct Stream {
    pub dictionary: Dictionary,
    pub stream_dictionary: StreamDictionary,
    pub start: usize,
    pub end: usize,
}

impl Stream {
    pub fn range(&self) -> Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// Reads the undecoded stream data. The cursor must be over the same
    /// source the stream was parsed from; its position is restored afterwards.
    pub fn raw_data<C: ByteCursor>(&self, cursor: &mut C) -> Result<Vec<u8>, CursorError> {
        let checkpoint = cursor.position();
        cursor.seek_absolute(self.start)?;
        let data = cursor.read(self.len() as isize);
        cursor.seek_absolute(checkpoint)?;
        data
    }

    /// Applies the filter chain to raw stream data.
    pub fn decode(&self, raw: Vec<u8>) -> Result<Vec<u8>, filter::FilterError> {
        let mut data = raw;
        if let Some(filters) = &self.stream_dictionary.filters {
            for (filter, decode_parms) in filters.iter() {
                data = filter::decode(filter, decode_parms, &data)?;
            }
        }
        Ok(data)
    }

    /// Reads and decodes the stream data.
    pub fn decoded_data<C: ByteCursor>(&self, cursor: &mut C) -> Result<Vec<u8>, KsError> {
        let raw = self.raw_data(cursor)?;
        Ok(self.decode(raw)?)
    }
}

impl Display for Stream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "stream [{}..{}]", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{cursor::MemoryCursor, parse::Parser};

    fn dict(input: &[u8]) -> Dictionary {
        Parser::new(MemoryCursor::new(input)).read_dictionary().unwrap()
    }

    #[test]
    fn test_length_only() {
        let sd = StreamDictionary::try_from(&dict(b"<< /Length 12 >>")).unwrap();
        assert_eq!(sd.length, 12);
        assert_eq!(sd.filters, None);
        assert_eq!(sd.dl, None);
    }

    #[test]
    fn test_length_must_be_direct() {
        assert_eq!(
            StreamDictionary::try_from(&dict(b"<< /Length 8 0 R >>")),
            Err(StreamDictionaryError::IndirectLength)
        );
        assert_eq!(
            StreamDictionary::try_from(&dict(b"<< /Filter /FlateDecode >>")),
            Err(StreamDictionaryError::MissingLength)
        );
        assert_eq!(
            StreamDictionary::try_from(&dict(b"<< /Length -1 >>")),
            Err(StreamDictionaryError::InvalidLength(ObjectKind::Integer))
        );
        assert_eq!(
            StreamDictionary::try_from(&dict(b"<< /Length 1.5 >>")),
            Err(StreamDictionaryError::InvalidLength(ObjectKind::Real))
        );
    }

    #[test]
    fn test_single_filter() {
        let sd = StreamDictionary::try_from(&dict(
            b"<< /Length 5 /Filter /FlateDecode /DecodeParms << /Predictor 1 >> /DL 40 >>",
        ))
        .unwrap();
        assert_eq!(sd.dl, Some(40));
        match sd.filters {
            Some(Filters::Single { filter, decode_parms }) => {
                assert_eq!(filter, Name::from("FlateDecode"));
                assert!(decode_parms.is_some());
            }
            other => panic!("unexpected filters {:?}", other),
        }

        let sd = StreamDictionary::try_from(&dict(b"<< /Length 5 /Filter /FlateDecode >>")).unwrap();
        assert!(matches!(sd.filters, Some(Filters::Single { decode_parms: None, .. })));

        let filters = sd.filters.unwrap();
        let mut chain = filters.iter();
        assert_eq!(chain.next(), Some((&Name::from("FlateDecode"), None)));
        assert_eq!(chain.next(), None);
    }

    #[test]
    fn test_filter_array_with_single_decode_parms_fails() {
        assert_eq!(
            StreamDictionary::try_from(&dict(
                b"<< /Length 5 /Filter [/ASCIIHexDecode /FlateDecode] /DecodeParms << /Predictor 1 >> >>"
            )),
            Err(StreamDictionaryError::SingleDecodeParmsForMultipleFilters)
        );
        assert_eq!(
            StreamDictionary::try_from(&dict(
                b"<< /Length 5 /Filter /FlateDecode /DecodeParms [<< /Predictor 1 >>] >>"
            )),
            Err(StreamDictionaryError::MultipleDecodeParmsForSingleFilter)
        );
    }

    #[test]
    fn test_filter_array_with_matching_decode_parms() {
        let sd = StreamDictionary::try_from(&dict(
            b"<< /Length 5 /Filter [/ASCIIHexDecode /FlateDecode] /DecodeParms [<< >> << /Predictor 1 >>] >>",
        ))
        .unwrap();
        let filters = sd.filters.unwrap();
        let chain = filters.iter().collect::<Vec<_>>();
        assert_eq!(chain.len(), 2);
        assert_eq!(chain[0].0, &Name::from("ASCIIHexDecode"));
        assert!(chain[1].1.unwrap().contains_key(&b"Predictor"[..]));
    }

    #[test]
    fn test_filter_shape_errors() {
        assert_eq!(
            StreamDictionary::try_from(&dict(
                b"<< /Length 5 /Filter [/ASCIIHexDecode /FlateDecode] /DecodeParms [<< >>] >>"
            )),
            Err(StreamDictionaryError::DecodeParmsCountMismatch {
                filters: 2,
                decode_parms: 1
            })
        );
        assert_eq!(
            StreamDictionary::try_from(&dict(b"<< /Length 5 /Filter [/FlateDecode 3] >>")),
            Err(StreamDictionaryError::InvalidFilter)
        );
        assert_eq!(
            StreamDictionary::try_from(&dict(b"<< /Length 5 /Filter (FlateDecode) >>")),
            Err(StreamDictionaryError::InvalidFilter)
        );
        assert_eq!(
            StreamDictionary::try_from(&dict(b"<< /Length 5 /Filter [/FlateDecode] /DecodeParms [/Oops] >>")),
            Err(StreamDictionaryError::InvalidDecodeParms)
        );
        assert_eq!(
            StreamDictionary::try_from(&dict(b"<< /Length 5 /DL /Big >>")),
            Err(StreamDictionaryError::InvalidDl)
        );
    }

    #[test]
    fn test_raw_data_restores_cursor() {
        let input = b"<< /Length 5 >>\nstream\nhello\nendstream";
        let mut parser = Parser::new(MemoryCursor::new(&input[..]));
        let stream = match parser.read_object().unwrap() {
            Object::Stream(stream) => stream,
            other => panic!("expected stream, got {:?}", other),
        };
        let mut cursor = parser.into_inner();
        cursor.seek_absolute(2).unwrap();
        assert_eq!(stream.raw_data(&mut cursor), Ok(b"hello".to_vec()));
        assert_eq!(cursor.position(), 2);
        assert_eq!(stream.decode(b"hello".to_vec()), Ok(b"hello".to_vec()));
    }
}
