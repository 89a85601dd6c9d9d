use fnv::FnvHashSet;

use super::{
    trailer::previous_of, Catalog, CrossReferenceTable, Dictionary, FromObject, KsString, NameTreeNode, NumberTreeNode,
    Object, ObjectKind, Reference, Stream, Trailer, TreeKey, TreeNode,
};
use crate::{
    cursor::ByteCursor,
    parse::{
        error::{KsParseError, ParseErrorKind},
        Parser,
    },
    KsError,
};

/// A PDF file with its trailer and merged cross-reference table.
///
/// Nothing but the trailer and the xref sections is read when opening,
/// objects are parsed on demand through [`RawPdf::resolve`].
#[derive(Debug)]
pub struct RawPdf<C> {
    parser: Parser<C>,
    version: Option<(u8, u8)>,
    startxref: usize,
    trailer: Trailer,
    xref: CrossReferenceTable,
}

impl<C: ByteCursor> RawPdf<C> {
    /// Reads the header, the last trailer and every cross-reference section
    /// of the `Prev` chain.
    pub fn open(cursor: C) -> Result<Self, KsError> {
        let mut parser = Parser::new(cursor);

        let version = match parser.read_version() {
            Ok(version) => Some(version),
            Err(e) => {
                log::warn!("No valid PDF header: {}", e);
                None
            }
        };

        let (startxref, trailer) = parser.read_trailer()?;
        log::debug!("Found trailer, startxref at byte {}", startxref);

        let xref = read_xref_chain(&mut parser, startxref)?;
        log::debug!("Cross-reference table holds {} objects", xref.len());

        Ok(Self {
            parser,
            version,
            startxref,
            trailer,
            xref,
        })
    }

    /// Version from the `%PDF-M.m` header, if there was a valid one.
    pub fn version(&self) -> Option<(u8, u8)> {
        self.version
    }

    pub fn startxref(&self) -> usize {
        self.startxref
    }

    /// The last trailer of the file.
    pub fn trailer(&self) -> &Trailer {
        &self.trailer
    }

    pub fn xref(&self) -> &CrossReferenceTable {
        &self.xref
    }

    pub fn into_inner(self) -> C {
        self.parser.into_inner()
    }

    /// Parses the indirect object `reference` points to.
    pub fn resolve(&mut self, reference: &Reference) -> Result<Object, KsError> {
        let used = self
            .xref
            .get(reference.number())
            .copied()
            .ok_or(KsError::ObjectNotFound(*reference))?;
        if used.generation != reference.generation() {
            log::warn!(
                "Reference {} resolves to generation {} of the cross-reference table",
                reference,
                used.generation
            );
        }

        let indirect = self.parser.read_indirect_object(used.byte_offset)?;
        if indirect.reference() != *reference {
            log::warn!("Expected object {} at byte {}, found {}", reference, used.byte_offset, indirect.reference());
        }
        log::trace!("Resolved {} at byte {}", reference, used.byte_offset);
        Ok(indirect.object)
    }

    /// Resolves `reference` and converts the object.
    pub fn resolve_as<T: FromObject>(&mut self, reference: &Reference) -> Result<T, KsError> {
        let object = self.resolve(reference)?;
        Ok(T::from_object(&object)?)
    }

    pub fn resolve_dictionary(&mut self, reference: &Reference) -> Result<Dictionary, KsError> {
        match self.resolve(reference)? {
            Object::Dictionary(dict) => Ok(dict),
            other => Err(KsError::UnexpectedObject {
                expected: ObjectKind::Dictionary,
                found: other.kind(),
            }),
        }
    }

    /// The dictionary `Root` of the trailer points to.
    pub fn root(&mut self) -> Result<Dictionary, KsError> {
        let root = self.trailer.root;
        let dict = self.resolve_dictionary(&root)?;
        log::debug!("Resolved root {}", root);
        Ok(dict)
    }

    pub fn catalog(&mut self) -> Result<Catalog, KsError> {
        Ok(Catalog::try_from(&self.root()?)?)
    }

    /// The document information dictionary.
    pub fn info(&mut self) -> Result<Dictionary, KsError> {
        let info = self.trailer.info;
        self.resolve_dictionary(&info)
    }

    /// Looks up `key` in the tree below `node`, resolving kids as needed.
    pub fn lookup<K: TreeKey>(&mut self, node: &TreeNode<K>, key: &K) -> Result<Option<Object>, KsError> {
        node.get(key, &mut |kid| self.resolve_as::<TreeNode<K>>(kid))
    }

    pub fn lookup_name(&mut self, node: &NameTreeNode, key: &KsString) -> Result<Option<Object>, KsError> {
        self.lookup(node, key)
    }

    pub fn lookup_number(&mut self, node: &NumberTreeNode, key: i64) -> Result<Option<Object>, KsError> {
        self.lookup(node, &key)
    }

    /// Reads the data of `stream` and applies its filters.
    pub fn stream_data(&mut self, stream: &Stream) -> Result<Vec<u8>, KsError> {
        stream.decoded_data(self.parser.cursor_mut())
    }
}

/// Walks the `Prev` chain starting at `startxref`. Entries of newer sections
/// shadow those of older ones.
fn read_xref_chain<C: ByteCursor>(parser: &mut Parser<C>, startxref: usize) -> Result<CrossReferenceTable, KsError> {
    let mut visited = FnvHashSet::default();
    let mut xref = CrossReferenceTable::new();
    let mut next = Some(startxref);

    while let Some(at) = next {
        if !visited.insert(at) {
            return Err(KsError::CyclicXref(at));
        }

        let (section, trailer) = parser.read_xref_section(at)?;
        log::debug!("Read xref revision at byte {} with {} objects", at, section.len());
        xref.merge_previous(section);

        next = previous_of(&trailer).map_err(|e| KsParseError::new(at, ParseErrorKind::InvalidTrailer(e)))?;
    }

    Ok(xref)
}
