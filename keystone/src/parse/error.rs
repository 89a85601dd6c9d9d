use crate::{
    cursor::CursorError,
    pdf::{StreamDictionaryError, TrailerError},
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseErrorKind {
    #[error(transparent)]
    Cursor(CursorError),
    #[error("malformed literal `{0}`")]
    MalformedLiteral(String),
    #[error("invalid number `{0}`")]
    InvalidNumber(String),
    #[error("unterminated string")]
    UnterminatedString,
    #[error("invalid escape sequence `{0}`")]
    InvalidEscape(String),
    #[error("invalid hex string: {0}")]
    InvalidHexString(String),
    #[error("invalid name escape `{0}`")]
    InvalidName(String),
    #[error("array is missing `]`")]
    MalformedArray,
    #[error("dictionary is missing `>>` or has a non-name key")]
    MalformedDictionary,
    #[error("unrecognized object starting with byte {0:#04x}")]
    UnrecognizedObject(u8),
    #[error("malformed indirect object header")]
    MalformedIndirectObject,
    #[error("missing keyword `{0}`")]
    MissingKeyword(&'static str),
    #[error("invalid stream dictionary: {0}")]
    InvalidStream(StreamDictionaryError),
    #[error("stream data [{start}, {start} + {length}) exceeds the source")]
    StreamOutOfBounds { start: usize, length: usize },
    #[error("invalid trailer: {0}")]
    InvalidTrailer(TrailerError),
    #[error("no `trailer` keyword found")]
    NoTrailerFound,
    #[error("no `%%EOF` marker at the end of the file")]
    EofMarkerNotFound,
    #[error("invalid startxref `{0}`")]
    StartxrefInvalid(String),
    #[error("invalid cross-reference section: {0}")]
    XrefInvalid(String),
    #[error("invalid `%PDF-` header")]
    InvalidHeader,
    #[error("containers nested deeper than {0} levels")]
    NestingTooDeep(usize),
}

/// A parse failure and the byte position it was detected at.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind} at byte {position}")]
pub struct KsParseError {
    pub position: usize,
    pub kind: ParseErrorKind,
}

impl KsParseError {
    pub fn new(position: usize, kind: ParseErrorKind) -> Self {
        Self { position, kind }
    }
}

impl From<CursorError> for KsParseError {
    fn from(err: CursorError) -> Self {
        let position = match &err {
            CursorError::ShortRead { position, .. } | CursorError::SeekOutOfBounds { position, .. } => *position,
            CursorError::Io { .. } => 0,
        };
        Self::new(position, ParseErrorKind::Cursor(err))
    }
}
