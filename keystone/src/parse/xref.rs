use super::{
    error::{KsParseError, ParseErrorKind},
    Parser,
};
use crate::{
    cursor::ByteCursor,
    pdf::{trailer::TRAILER, CrossReferenceTable, Dictionary, UsedObject},
};

const XREF: &str = "xref";
const USED: &[u8] = b"n";
const FREE: &[u8] = b"f";

fn xref_invalid(what: &'static str) -> impl Fn(KsParseError) -> KsParseError {
    move |e| KsParseError::new(e.position, ParseErrorKind::XrefInvalid(what.to_owned()))
}

impl<C: ByteCursor> Parser<C> {
    /// Reads the cross-reference section at byte `at`.
    ///
    /// Only this section is read, `Prev` is not followed. Free entries are
    /// skipped. The cursor is left on the `trailer` keyword.
    pub fn read_xref(&mut self, at: usize) -> Result<CrossReferenceTable, KsParseError> {
        self.cursor.seek_absolute(at)?;
        self.expect_keyword(XREF)?;

        let mut table = CrossReferenceTable::new();
        loop {
            self.skip_whitespace()?;
            if self.peek_keyword(TRAILER)? {
                break;
            }
            if self.cursor.eof() {
                return Err(self.error(ParseErrorKind::MissingKeyword("trailer")));
            }

            let first = self.read_unsigned().map_err(xref_invalid("subsection start"))?;
            let count = self.read_unsigned().map_err(xref_invalid("subsection length"))?;
            for index in 0..count {
                let offset = self.read_unsigned().map_err(xref_invalid("entry offset"))?;
                let generation = self.read_unsigned().map_err(xref_invalid("entry generation"))?;
                self.skip_whitespace()?;
                let entry_position = self.position();
                let keyword = self.read_token()?;

                if keyword == FREE {
                    continue;
                }
                if keyword != USED {
                    return Err(KsParseError::new(
                        entry_position,
                        ParseErrorKind::XrefInvalid(format!(
                            "entry type `{}`",
                            String::from_utf8_lossy(&keyword)
                        )),
                    ));
                }

                let number = first
                    .checked_add(index)
                    .ok_or_else(|| self.error(ParseErrorKind::XrefInvalid("object number".to_owned())))?;
                let byte_offset = usize::try_from(offset)
                    .map_err(|_| self.error(ParseErrorKind::XrefInvalid("entry offset".to_owned())))?;
                table.insert(UsedObject {
                    number,
                    byte_offset,
                    generation,
                });
            }
        }

        log::debug!("Read {} used objects from xref at byte {}", table.len(), at);
        Ok(table)
    }

    /// Reads the cross-reference section at byte `at` and the trailer
    /// dictionary that follows it.
    pub fn read_xref_section(&mut self, at: usize) -> Result<(CrossReferenceTable, Dictionary), KsParseError> {
        let table = self.read_xref(at)?;
        let trailer = self.read_trailer_dictionary()?;
        Ok((table, trailer))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cursor::MemoryCursor;

    const SECTION: &[u8] = b"xref
0 3
0000000000 65535 f\r
0000000017 00000 n\r
0000000081 00000 n\r
7 2
0000000331 00002 n 
0000000000 00001 f 
trailer
<< /Size 9 /Root 1 0 R /Info 2 0 R /Prev 1234 >>
startxref
0
%%EOF";

    #[test]
    fn test_read_xref() {
        let mut p = Parser::new(MemoryCursor::new(SECTION));
        let table = p.read_xref(0).unwrap();

        assert_eq!(table.len(), 3);
        assert_eq!(table.get(0), None);
        assert_eq!(table.offset(1), Some(17));
        assert_eq!(table.offset(2), Some(81));
        assert_eq!(
            table.get(7),
            Some(&UsedObject {
                number: 7,
                byte_offset: 331,
                generation: 2
            })
        );
        assert_eq!(table.get(8), None);
        assert!(p.peek_keyword(b"trailer").unwrap());
    }

    #[test]
    fn test_read_xref_section() {
        let mut input = b"%PDF-1.4\n".to_vec();
        input.extend_from_slice(SECTION);
        let mut p = Parser::new(MemoryCursor::new(input));

        let (table, trailer) = p.read_xref_section(9).unwrap();
        assert_eq!(table.len(), 3);
        assert_eq!(trailer.get(&b"Prev"[..]).and_then(|o| o.integer()), Some(1234));
    }

    #[test]
    fn test_empty_xref() {
        let mut p = Parser::new(MemoryCursor::new(&b"xref\ntrailer\n<< >>"[..]));
        let (table, trailer) = p.read_xref_section(0).unwrap();
        assert!(table.is_empty());
        assert!(trailer.is_empty());
    }

    #[test]
    fn test_invalid_xref() {
        let mut p = Parser::new(MemoryCursor::new(&b"1 0 obj"[..]));
        assert_eq!(
            p.read_xref(0),
            Err(KsParseError::new(0, ParseErrorKind::MissingKeyword("xref")))
        );

        let mut p = Parser::new(MemoryCursor::new(&b"xref\n0 1\n0000000000 65535 x\ntrailer"[..]));
        assert_eq!(
            p.read_xref(0).map_err(|e| e.kind),
            Err(ParseErrorKind::XrefInvalid("entry type `x`".to_owned()))
        );

        let mut p = Parser::new(MemoryCursor::new(&b"xref\n0 2\n0000000000 65535 f\ntrailer"[..]));
        assert_eq!(
            p.read_xref(0).map_err(|e| e.kind),
            Err(ParseErrorKind::XrefInvalid("entry offset".to_owned()))
        );

        let mut p = Parser::new(MemoryCursor::new(&b"xref\n0 1\n0000000000 65535 f\n"[..]));
        assert_eq!(
            p.read_xref(0).map_err(|e| e.kind),
            Err(ParseErrorKind::MissingKeyword("trailer"))
        );
    }
}
