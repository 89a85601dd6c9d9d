use std::fmt::Display;

use super::Object;

/// An object read from its `<number> <generation> obj` definition.
#[derive(Debug, Clone, PartialEq)]
pub struct IndirectObject {
    pub number: u64,
    pub generation: u64,
    pub object: Object,
}

impl IndirectObject {
    pub fn new(number: u64, generation: u64, object: Object) -> Self {
        Self {
            number,
            generation,
            object,
        }
    }

    pub fn reference(&self) -> Reference {
        Reference::new(self.number, self.generation)
    }
}

impl Display for IndirectObject {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} obj {{ {} }}", self.number, self.generation, self.object)
    }
}

/// Pointer to an indirect object, `<number> <generation> R`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Reference {
    pub(crate) number: u64,
    pub(crate) generation: u64,
}

impl Reference {
    pub const fn new(number: u64, generation: u64) -> Self {
        Self { number, generation }
    }

    pub fn number(&self) -> u64 {
        self.number
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl Display for Reference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} R", self.number, self.generation)
    }
}
