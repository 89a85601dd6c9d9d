use std::{borrow::Borrow, ops::Deref};

/// String object content after escape decoding.
///
/// Literal and hexadecimal strings end up here alike. The bytes are arbitrary
/// octets and not necessarily text.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct KsString(Vec<u8>);

impl KsString {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0[..]
    }
}

impl From<Vec<u8>> for KsString {
    fn from(v: Vec<u8>) -> Self {
        KsString(v)
    }
}

impl From<&[u8]> for KsString {
    fn from(v: &[u8]) -> Self {
        KsString(v.to_vec())
    }
}

impl From<&str> for KsString {
    fn from(s: &str) -> Self {
        KsString(s.as_bytes().to_vec())
    }
}

impl Borrow<[u8]> for KsString {
    fn borrow(&self) -> &[u8] {
        &self.0[..]
    }
}

impl Deref for KsString {
    type Target = Vec<u8>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl std::fmt::Debug for KsString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("KsString")
            .field(&String::from_utf8_lossy(&self.0[..]))
            .finish()
    }
}

impl std::fmt::Display for KsString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", &String::from_utf8_lossy(&self.0[..]))
    }
}
