use std::ops::{Deref, DerefMut};

use super::{Object, ObjectKind};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Array(Vec<Object>);

impl Array {
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Checks that every element has the given kind. On failure the index and
    /// kind of the first offending element are returned.
    pub fn ensure_homogeneous(&self, kind: ObjectKind) -> Result<&Self, (usize, ObjectKind)> {
        match self.iter().enumerate().find(|(_, obj)| obj.kind() != kind) {
            Some((index, obj)) => Err((index, obj.kind())),
            None => Ok(self),
        }
    }
}

impl Deref for Array {
    type Target = Vec<Object>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Array {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl From<Vec<Object>> for Array {
    fn from(objects: Vec<Object>) -> Self {
        Self(objects)
    }
}

impl<const N: usize> From<[Object; N]> for Array {
    fn from(objects: [Object; N]) -> Self {
        Self(objects.into())
    }
}

impl std::fmt::Display for Array {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (index, obj) in self.iter().enumerate() {
            if index > 0 {
                write!(f, " ")?;
            }
            write!(f, "{}", obj)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pdf::Reference;

    #[test]
    fn test_ensure_homogeneous() {
        let refs = Array::from([
            Object::Reference(Reference::new(1, 0)),
            Object::Reference(Reference::new(2, 0)),
        ]);
        assert!(refs.ensure_homogeneous(ObjectKind::Reference).is_ok());

        let mixed = Array::from([Object::Reference(Reference::new(1, 0)), Object::Integer(2)]);
        assert_eq!(
            mixed.ensure_homogeneous(ObjectKind::Reference),
            Err((1, ObjectKind::Integer))
        );

        assert!(Array::new().ensure_homogeneous(ObjectKind::Name).is_ok());
    }

    #[test]
    fn test_display() {
        let array = Array::from([Object::Integer(549), Object::Real(3.14), Object::Bool(false)]);
        assert_eq!(array.to_string(), "[549 3.14 false]");
    }
}
