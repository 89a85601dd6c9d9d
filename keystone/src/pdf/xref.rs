use fnv::FnvHashMap;

/// Object offsets of one or more cross-reference sections.
///
/// Only used (`n`) entries are kept. Free entries are not part of the table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CrossReferenceTable(FnvHashMap<u64, UsedObject>);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsedObject {
    /// Number of this object
    pub number: u64,
    /// The position of this object in the pdf file in bytes, starting from the
    /// beginning of the PDF.
    pub byte_offset: usize,
    /// Generation of this object
    pub generation: u64,
}

impl CrossReferenceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an entry. An existing entry for the same object number is
    /// replaced.
    pub fn insert(&mut self, object: UsedObject) -> Option<UsedObject> {
        self.0.insert(object.number, object)
    }

    pub fn get(&self, number: u64) -> Option<&UsedObject> {
        self.0.get(&number)
    }

    pub fn offset(&self, number: u64) -> Option<usize> {
        self.0.get(&number).map(|o| o.byte_offset)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &UsedObject> {
        self.0.values()
    }

    /// Adds the entries of an older revision. Entries already present win.
    pub fn merge_previous(&mut self, older: CrossReferenceTable) {
        for (number, object) in older.0 {
            self.0.entry(number).or_insert(object);
        }
    }
}

impl FromIterator<UsedObject> for CrossReferenceTable {
    fn from_iter<T: IntoIterator<Item = UsedObject>>(iter: T) -> Self {
        let mut table = Self::new();
        for object in iter {
            table.insert(object);
        }
        table
    }
}
