use crate::{
    cursor::CursorError,
    parse::error::KsParseError,
    pdf::{FilterError, ObjectKind, Reference, SchemaError, TreeNodeError},
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum KsError {
    #[error(transparent)]
    Cursor(#[from] CursorError),
    #[error(transparent)]
    Parse(#[from] KsParseError),
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Filter(#[from] FilterError),
    #[error("object {0} is not in the cross-reference table")]
    ObjectNotFound(Reference),
    #[error("expected {expected}, found {found}")]
    UnexpectedObject { expected: ObjectKind, found: ObjectKind },
    #[error("cross-reference sections form a cycle at byte {0}")]
    CyclicXref(usize),
}

impl From<std::io::Error> for KsError {
    fn from(err: std::io::Error) -> Self {
        KsError::Cursor(err.into())
    }
}

impl From<TreeNodeError> for KsError {
    fn from(err: TreeNodeError) -> Self {
        KsError::Schema(err.into())
    }
}
