use super::{Dictionary, KsString, Object, Reference};

pub const TRAILER: &[u8] = b"trailer";
pub const K_SIZE: &[u8] = b"Size";
pub const K_PREVIOUS: &[u8] = b"Prev";
pub const K_ROOT: &[u8] = b"Root";
pub const K_INFO: &[u8] = b"Info";
pub const K_ID: &[u8] = b"ID";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TrailerError {
    #[error("trailer `Size` must be a non-negative integer")]
    InvalidSize,
    #[error("trailer has no `Size`")]
    MissingSize,
    #[error("trailer `Root` must be a reference")]
    InvalidRoot,
    #[error("trailer has no `Root`")]
    MissingRoot,
    #[error("trailer `Prev` must be a non-negative integer")]
    InvalidPrevious,
    #[error("trailer `Info` must be a reference")]
    InvalidInfo,
    #[error("trailer has no `Info`")]
    MissingInfo,
    #[error("trailer `ID` must be an array of two strings")]
    InvalidId,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Trailer {
    /// One greater than the highest object number used in the document.
    pub size: usize,

    /// Byte offset of the previous cross-reference section.
    pub previous: Option<usize>,

    /// Reference to the document catalog.
    pub root: Reference,

    /// Reference to the document information dictionary.
    pub info: Reference,

    /// File identifier.
    pub id: Option<[KsString; 2]>,
}

/// Reads only `Prev` of a trailer dictionary.
pub(crate) fn previous_of(dict: &Dictionary) -> Result<Option<usize>, TrailerError> {
    dict.get(K_PREVIOUS)
        .map(|o| {
            o.integer()
                .and_then(|prev| usize::try_from(prev).ok())
                .ok_or(TrailerError::InvalidPrevious)
        })
        .transpose()
}

impl TryFrom<&Dictionary> for Trailer {
    type Error = TrailerError;

    fn try_from(dict: &Dictionary) -> Result<Self, Self::Error> {
        Ok(Trailer {
            size: dict
                .get(K_SIZE)
                .ok_or(TrailerError::MissingSize)?
                .integer()
                .ok_or(TrailerError::InvalidSize)?
                .try_into()
                .map_err(|_| TrailerError::InvalidSize)?,

            previous: previous_of(dict)?,

            root: dict
                .get(K_ROOT)
                .ok_or(TrailerError::MissingRoot)?
                .reference()
                .copied()
                .ok_or(TrailerError::InvalidRoot)?,

            info: dict
                .get(K_INFO)
                .ok_or(TrailerError::MissingInfo)?
                .reference()
                .copied()
                .ok_or(TrailerError::InvalidInfo)?,

            id: dict
                .get(K_ID)
                .map(|o| o.array().ok_or(TrailerError::InvalidId))
                .transpose()?
                .map(|a| match &a[..] {
                    [Object::String(first), Object::String(second)] => Ok([first.clone(), second.clone()]),
                    _ => Err(TrailerError::InvalidId),
                })
                .transpose()?,
        })
    }
}
