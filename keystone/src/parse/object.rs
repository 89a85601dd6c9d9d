use super::{
    error::{KsParseError, ParseErrorKind},
    is_regular, is_whitespace, lex, Parser, MAX_NESTING_DEPTH,
};
use crate::{
    cursor::ByteCursor,
    pdf::{Array, Dictionary, IndirectObject, KsString, Name, Object, Reference, Stream, StreamDictionary},
};

const TRUE_OBJECT: &[u8] = b"true";
const FALSE_OBJECT: &[u8] = b"false";
const NULL_OBJECT: &[u8] = b"null";
const STREAM: &[u8] = b"stream";
const OBJ: &[u8] = b"obj";

fn is_number_byte(chr: u8) -> bool {
    chr.is_ascii_digit() || chr == b'.'
}

impl<C: ByteCursor> Parser<C> {
    /// Reads the object at the cursor. Leading whitespace is skipped.
    pub fn read_object(&mut self) -> Result<Object, KsParseError> {
        self.skip_whitespace()?;
        match self.expect_byte()? {
            b't' | b'f' => self.read_boolean().map(Object::Bool),
            b'n' => self.read_null(),
            b'(' => self.read_literal_string().map(Object::String),
            b'<' => {
                if self.peek_tag(b"<<")? {
                    self.read_dictionary_or_stream()
                } else {
                    self.read_hex_string().map(Object::String)
                }
            }
            b'/' => self.read_name().map(Object::Name),
            b'[' => self.read_array().map(Object::Array),
            b'0'..=b'9' => self.read_number_or_reference(),
            b'+' | b'-' | b'.' => self.read_number(),
            other => Err(self.error(ParseErrorKind::UnrecognizedObject(other))),
        }
    }

    fn read_boolean(&mut self) -> Result<bool, KsParseError> {
        let start = self.position();
        let token = self.read_token()?;
        match &token[..] {
            TRUE_OBJECT => Ok(true),
            FALSE_OBJECT => Ok(false),
            _ => Err(KsParseError::new(
                start,
                ParseErrorKind::MalformedLiteral(String::from_utf8_lossy(&token).into_owned()),
            )),
        }
    }

    fn read_null(&mut self) -> Result<Object, KsParseError> {
        let start = self.position();
        if self.read_token()? == NULL_OBJECT {
            return Ok(Object::Null);
        }
        self.cursor.seek_absolute(start)?;
        Err(self.error(ParseErrorKind::UnrecognizedObject(b'n')))
    }

    /// Reads an integer or a real. The cursor stops before the first byte
    /// that cannot be part of the number.
    pub(crate) fn read_number(&mut self) -> Result<Object, KsParseError> {
        let start = self.position();
        let mut token = vec![self.expect_byte()?];
        self.cursor.seek_relative(1)?;
        token.extend(self.read_while(is_number_byte)?);

        let number = if token.contains(&b'.') {
            lex::real(&token).map(Object::Real)
        } else {
            lex::integer(&token).map(Object::Integer)
        };
        number.ok_or_else(|| {
            KsParseError::new(
                start,
                ParseErrorKind::InvalidNumber(String::from_utf8_lossy(&token).into_owned()),
            )
        })
    }

    /// Reads a number and, if it is followed by `<generation> R`, turns it
    /// into a reference. Otherwise the cursor is rolled back to directly
    /// behind the number.
    fn read_number_or_reference(&mut self) -> Result<Object, KsParseError> {
        let number = self.read_number()?;
        let object_number = match number {
            Object::Integer(n) if n >= 0 => n as u64,
            _ => return Ok(number),
        };

        let checkpoint = self.position();
        match self.read_reference_tail() {
            Ok(Some(generation)) => Ok(Object::Reference(Reference::new(object_number, generation))),
            Ok(None) | Err(_) => {
                log::trace!("No reference after {} at byte {}", object_number, checkpoint);
                self.cursor.seek_absolute(checkpoint)?;
                Ok(number)
            }
        }
    }

    /// `<unsigned> R` after the object number of a reference.
    fn read_reference_tail(&mut self) -> Result<Option<u64>, KsParseError> {
        self.skip_whitespace()?;
        if !self.cursor.peek_byte()?.map_or(false, |chr| chr.is_ascii_digit()) {
            return Ok(None);
        }
        let digits = self.read_while(is_number_byte)?;
        let generation = match lex::unsigned(&digits) {
            Some(generation) => generation,
            None => return Ok(None),
        };
        self.skip_whitespace()?;
        if !self.peek_keyword(b"R")? {
            return Ok(None);
        }
        self.cursor.seek_relative(1)?;
        Ok(Some(generation))
    }

    pub(crate) fn read_literal_string(&mut self) -> Result<KsString, KsParseError> {
        self.cursor.seek_relative(1)?;
        let mut depth = 1usize;
        let mut content = Vec::new();
        loop {
            let chr = self
                .cursor
                .read_byte()?
                .ok_or_else(|| self.error(ParseErrorKind::UnterminatedString))?;
            match chr {
                b'(' => {
                    depth += 1;
                    content.push(chr);
                }
                b')' => {
                    depth -= 1;
                    if depth == 0 {
                        break;
                    }
                    content.push(chr);
                }
                b'\\' => content.push(self.read_escape()?),
                _ => content.push(chr),
            }
        }
        Ok(content.into())
    }

    /// Decodes the escape sequence after a backslash.
    fn read_escape(&mut self) -> Result<u8, KsParseError> {
        let start = self.position() - 1;
        let chr = self
            .cursor
            .read_byte()?
            .ok_or_else(|| self.error(ParseErrorKind::UnterminatedString))?;
        let decoded = match chr {
            b'n' => b'\n',
            b'r' => b'\r',
            b't' => b'\t',
            b'b' => b'\x08',
            b'f' => b'\x0c',
            b'(' | b')' | b'\\' => chr,
            b'0'..=b'7' => {
                self.cursor.seek_relative(-1)?;
                let available = (self.cursor.len() - self.position()).min(3);
                let window = self.cursor.peek(available as isize)?;
                let (remainder, value) = lex::octal_escape(&window).map_err(|_| {
                    KsParseError::new(start, ParseErrorKind::InvalidEscape(format!("\\{}", char::from(chr))))
                })?;
                self.cursor.seek_relative((window.len() - remainder.len()) as isize)?;
                value
            }
            other => {
                return Err(KsParseError::new(
                    start,
                    ParseErrorKind::InvalidEscape(format!("\\{}", char::from(other))),
                ))
            }
        };
        Ok(decoded)
    }

    /// Hex digits between `<` and `>`. Whitespace is ignored, an odd number
    /// of digits is padded with `0`.
    pub(crate) fn read_hex_string(&mut self) -> Result<KsString, KsParseError> {
        self.cursor.seek_relative(1)?;
        let mut digits = Vec::new();
        loop {
            match self.cursor.read_byte()? {
                None => {
                    return Err(self.error(ParseErrorKind::InvalidHexString("missing `>`".to_owned())));
                }
                Some(b'>') => break,
                Some(chr) if is_whitespace(chr) => {}
                Some(chr) if chr.is_ascii_hexdigit() => digits.push(chr),
                Some(chr) => {
                    return Err(KsParseError::new(
                        self.position() - 1,
                        ParseErrorKind::InvalidHexString(format!("unexpected {:?}", char::from(chr))),
                    ));
                }
            }
        }
        if digits.len() % 2 == 1 {
            digits.push(b'0');
        }
        hex::decode(&digits)
            .map(KsString::from)
            .map_err(|e| self.error(ParseErrorKind::InvalidHexString(e.to_string())))
    }

    /// Reads a name up to the next whitespace or delimiter and decodes
    /// `#xx` escapes.
    pub(crate) fn read_name(&mut self) -> Result<Name, KsParseError> {
        self.cursor.seek_relative(1)?;
        let mut name = Vec::new();
        while let Some(chr) = self.cursor.peek_byte()? {
            if !is_regular(chr) {
                break;
            }
            self.cursor.seek_relative(1)?;
            if chr == b'#' {
                let start = self.position() - 1;
                let mut escape = Vec::with_capacity(2);
                while escape.len() < 2 {
                    match self.cursor.peek_byte()? {
                        Some(digit) if is_regular(digit) => {
                            escape.push(digit);
                            self.cursor.seek_relative(1)?;
                        }
                        _ => break,
                    }
                }
                let decoded = hex::decode(&escape).map_err(|_| {
                    KsParseError::new(
                        start,
                        ParseErrorKind::InvalidName(format!("#{}", String::from_utf8_lossy(&escape))),
                    )
                })?;
                name.extend(decoded);
            } else {
                name.push(chr);
            }
        }
        Ok(name.into())
    }

    pub(crate) fn read_array(&mut self) -> Result<Array, KsParseError> {
        self.enter_container()?;
        let array = self.read_array_items();
        self.depth -= 1;
        array
    }

    fn read_array_items(&mut self) -> Result<Array, KsParseError> {
        self.cursor.seek_relative(1)?;
        let mut array = Array::new();
        loop {
            self.skip_whitespace()?;
            match self.cursor.peek_byte()? {
                None => return Err(self.error(ParseErrorKind::MalformedArray)),
                Some(b']') => {
                    self.cursor.seek_relative(1)?;
                    return Ok(array);
                }
                Some(_) => array.push(self.read_object()?),
            }
        }
    }

    /// Reads a dictionary. Leading whitespace is skipped.
    pub(crate) fn read_dictionary(&mut self) -> Result<Dictionary, KsParseError> {
        self.enter_container()?;
        let dictionary = self.read_dictionary_entries();
        self.depth -= 1;
        dictionary
    }

    fn read_dictionary_entries(&mut self) -> Result<Dictionary, KsParseError> {
        self.skip_whitespace()?;
        if !self.peek_tag(b"<<")? {
            return Err(self.error(ParseErrorKind::MalformedDictionary));
        }
        self.cursor.seek_relative(2)?;

        let mut dictionary = Dictionary::default();
        loop {
            self.skip_whitespace()?;
            match self.cursor.peek_byte()? {
                Some(b'/') => {
                    let key = self.read_name()?;
                    let value = self.read_object()?;
                    dictionary.insert(key, value);
                }
                Some(b'>') if self.peek_tag(b">>")? => {
                    self.cursor.seek_relative(2)?;
                    return Ok(dictionary);
                }
                _ => return Err(self.error(ParseErrorKind::MalformedDictionary)),
            }
        }
    }

    fn enter_container(&mut self) -> Result<(), KsParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(self.error(ParseErrorKind::NestingTooDeep(MAX_NESTING_DEPTH)));
        }
        self.depth += 1;
        Ok(())
    }

    fn read_dictionary_or_stream(&mut self) -> Result<Object, KsParseError> {
        let dictionary = self.read_dictionary()?;
        let after_dictionary = self.position();
        self.skip_whitespace()?;
        if self.peek_keyword(STREAM)? {
            return self.read_stream(dictionary).map(Object::Stream);
        }
        self.cursor.seek_absolute(after_dictionary)?;
        Ok(Object::Dictionary(dictionary))
    }

    /// Records the data range of a stream. The cursor must be on the
    /// `stream` keyword and is left at the end of the data.
    fn read_stream(&mut self, dictionary: Dictionary) -> Result<Stream, KsParseError> {
        let stream_dictionary =
            StreamDictionary::try_from(&dictionary).map_err(|e| self.error(ParseErrorKind::InvalidStream(e)))?;
        self.cursor.seek_relative(STREAM.len() as isize)?;

        match self.cursor.peek_byte()? {
            Some(b'\r') => {
                self.cursor.seek_relative(1)?;
                if self.cursor.peek_byte()? == Some(b'\n') {
                    self.cursor.seek_relative(1)?;
                }
            }
            Some(b'\n') => {
                self.cursor.seek_relative(1)?;
            }
            _ => log::warn!("No end-of-line after `stream` at byte {}", self.position()),
        }

        let start = self.position();
        let length = stream_dictionary.length;
        let end = start
            .checked_add(length)
            .filter(|end| *end <= self.cursor.len())
            .ok_or_else(|| self.error(ParseErrorKind::StreamOutOfBounds { start, length }))?;
        self.cursor.seek_absolute(end)?;

        Ok(Stream {
            dictionary,
            stream_dictionary,
            start,
            end,
        })
    }

    /// Reads `<number> <generation> obj` at byte `at` followed by the object.
    pub fn read_indirect_object(&mut self, at: usize) -> Result<IndirectObject, KsParseError> {
        self.cursor.seek_absolute(at)?;
        let malformed = |e: KsParseError| KsParseError::new(e.position, ParseErrorKind::MalformedIndirectObject);
        let number = self.read_unsigned().map_err(malformed)?;
        let generation = self.read_unsigned().map_err(malformed)?;
        self.skip_whitespace()?;
        if !self.peek_keyword(OBJ)? {
            return Err(self.error(ParseErrorKind::MalformedIndirectObject));
        }
        self.cursor.seek_relative(OBJ.len() as isize)?;

        let object = self.read_object()?;
        Ok(IndirectObject::new(number, generation, object))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{cursor::MemoryCursor, pdf::StreamDictionaryError};

    fn parser(input: &[u8]) -> Parser<MemoryCursor<&[u8]>> {
        Parser::new(MemoryCursor::new(input))
    }

    fn object(input: &[u8]) -> Result<Object, KsParseError> {
        parser(input).read_object()
    }

    fn kind(result: Result<Object, KsParseError>) -> ParseErrorKind {
        result.unwrap_err().kind
    }

    #[test]
    fn test_bool_object() {
        assert_eq!(object(b"true "), Ok(Object::Bool(true)));
        assert_eq!(object(b"false]"), Ok(Object::Bool(false)));
        assert_eq!(
            kind(object(b"falsee")),
            ParseErrorKind::MalformedLiteral("falsee".to_owned())
        );
        assert_eq!(kind(object(b"tru ")), ParseErrorKind::MalformedLiteral("tru".to_owned()));
    }

    #[test]
    fn test_null_object() {
        assert_eq!(object(b"null\n"), Ok(Object::Null));
        assert_eq!(object(b"null"), Ok(Object::Null));
        assert_eq!(kind(object(b"nil")), ParseErrorKind::UnrecognizedObject(b'n'));
    }

    #[test]
    fn test_integer_object() {
        assert_eq!(object(b"123 "), Ok(Object::Integer(123)));
        assert_eq!(object(b"-123 "), Ok(Object::Integer(-123)));
        assert_eq!(object(b"+17"), Ok(Object::Integer(17)));
        assert_eq!(object(b"0"), Ok(Object::Integer(0)));
    }

    #[test]
    fn test_real_object() {
        assert_eq!(object(b"123.123 "), Ok(Object::Real(123.123)));
        assert_eq!(object(b"-123.123 "), Ok(Object::Real(-123.123)));
        assert_eq!(object(b"4."), Ok(Object::Real(4.0)));
        assert_eq!(object(b".5"), object(b"0.5"));
        assert_eq!(object(b"-.002"), Ok(Object::Real(-0.002)));
        assert_eq!(kind(object(b"1.2.3")), ParseErrorKind::InvalidNumber("1.2.3".to_owned()));
        assert_eq!(kind(object(b"- 1")), ParseErrorKind::InvalidNumber("-".to_owned()));
        assert_eq!(kind(object(b"d123.123 ")), ParseErrorKind::UnrecognizedObject(b'd'));
    }

    #[test]
    fn test_number_stops_before_terminator() {
        let mut p = parser(b"12/Name");
        assert_eq!(p.read_object(), Ok(Object::Integer(12)));
        assert_eq!(p.position(), 2);
        assert_eq!(p.read_object(), Ok(Object::Name("Name".into())));

        let mut p = parser(b"3.5]");
        assert_eq!(p.read_object(), Ok(Object::Real(3.5)));
        assert_eq!(p.position(), 3);
    }

    #[test]
    fn test_reference_object() {
        let mut p = parser(b"12 0 R /Next");
        assert_eq!(p.read_object(), Ok(Object::Reference(Reference::new(12, 0))));
        assert_eq!(p.position(), 6);

        let mut p = parser(b"7\n\n3\tR]");
        assert_eq!(p.read_object(), Ok(Object::Reference(Reference::new(7, 3))));
        assert_eq!(p.position(), 6);
    }

    #[test]
    fn test_number_without_reference_rolls_back() {
        for input in [
            &b"12 0 obj"[..],
            b"12 0 Rx",
            b"12 /R",
            b"12 1.5 R",
            b"12 -1 R",
            b"12 0",
            b"12 (x)",
            b"12",
        ] {
            let mut p = parser(input);
            assert_eq!(p.read_object(), Ok(Object::Integer(12)), "input {:?}", input);
            assert_eq!(p.position(), 2, "input {:?}", input);
        }

        let mut p = parser(b"-12 0 R");
        assert_eq!(p.read_object(), Ok(Object::Integer(-12)));
        assert_eq!(p.position(), 3);
    }

    #[test]
    fn test_string_object() {
        assert_eq!(object(b"()\n"), Ok(Object::String("".into())));
        assert_eq!(object(b"(a) "), Ok(Object::String("a".into())));
        assert_eq!(object(b"((a)) "), Ok(Object::String("(a)".into())));
        assert_eq!(object(br"((\(a)) "), Ok(Object::String("((a)".into())));
        assert_eq!(object(br"(a\)\)\)) "), Ok(Object::String("a)))".into())));
        assert_eq!(object(br"(abc\n\)\\)"), Ok(Object::String("abc\n)\\".into())));
        assert_eq!(
            object(br"(\t\r\b\f)"),
            Ok(Object::String(KsString::from(&b"\t\r\x08\x0c"[..])))
        );
    }

    #[test]
    fn test_string_octal_escapes() {
        assert_eq!(object(br"(\053)"), Ok(Object::String("+".into())));
        assert_eq!(object(br"(\53x)"), Ok(Object::String("+x".into())));
        assert_eq!(object(br"(\0053)"), Ok(Object::String(KsString::from(&b"\x053"[..]))));
        assert_eq!(object(br"(\7)"), Ok(Object::String(KsString::from(&b"\x07"[..]))));
        assert_eq!(object(br"(\777)"), Ok(Object::String(KsString::from(&b"\xff"[..]))));
    }

    #[test]
    fn test_string_errors() {
        assert_eq!(kind(object(b"(abc")), ParseErrorKind::UnterminatedString);
        assert_eq!(kind(object(b"(a(b)")), ParseErrorKind::UnterminatedString);
        assert_eq!(kind(object(br"(\q)")), ParseErrorKind::InvalidEscape(r"\q".to_owned()));
        assert_eq!(kind(object(br"(\9)")), ParseErrorKind::InvalidEscape(r"\9".to_owned()));
    }

    #[test]
    fn test_hex_string_object() {
        assert_eq!(object(b"<48656C6C6F>"), Ok(Object::String("Hello".into())));
        assert_eq!(object(b"<48 65 6c\n6c 6f>"), Ok(Object::String("Hello".into())));
        assert_eq!(object(b"<>"), Ok(Object::String("".into())));
        assert_eq!(
            object(b"<ABC>"),
            Ok(Object::String(KsString::from(vec![0xab, 0xc0])))
        );
        assert!(matches!(kind(object(b"<4G>")), ParseErrorKind::InvalidHexString(_)));
        assert!(matches!(kind(object(b"<4865")), ParseErrorKind::InvalidHexString(_)));
    }

    #[test]
    fn test_name_object() {
        for input in [
            &b"/Name1 "[..],
            b"/ASomewhatLongerName ",
            b"/A;Name_With-Various***Characters? ",
            b"/1.2 ",
            b"/$$ ",
            b"/@pattern ",
            b"/.notdef ",
        ] {
            let expected = Name::from(&input[1..input.len() - 1]);
            assert_eq!(object(input), Ok(Object::Name(expected)));
        }

        assert_eq!(object(b"/A#20B"), Ok(Object::Name("A B".into())));
        assert_eq!(object(b"/lime#20Green "), Ok(Object::Name("lime Green".into())));
        assert_eq!(
            object(b"/paired#28#29parentheses "),
            Ok(Object::Name("paired()parentheses".into()))
        );
        assert_eq!(object(b"/The_Key_of_F#23_Minor"), Ok(Object::Name("The_Key_of_F#_Minor".into())));
        assert_eq!(object(b"/A#42"), Ok(Object::Name("AB".into())));
        assert_eq!(object(b"/"), Ok(Object::Name("".into())));
        assert_eq!(kind(object(b"/A#zz")), ParseErrorKind::InvalidName("#zz".to_owned()));
        assert_eq!(kind(object(b"/A#4")), ParseErrorKind::InvalidName("#4".to_owned()));
    }

    #[test]
    fn test_name_ends_at_delimiter() {
        let mut p = parser(b"/Type/Catalog(x)");
        assert_eq!(p.read_object(), Ok(Object::Name("Type".into())));
        assert_eq!(p.read_object(), Ok(Object::Name("Catalog".into())));
        assert_eq!(p.read_object(), Ok(Object::String("x".into())));
    }

    #[test]
    fn test_array_object() {
        assert_eq!(
            object(b"[549 3.14 false (Ralph) /SomeName] "),
            Ok(Object::Array(Array::from([
                Object::Integer(549),
                Object::Real(3.14),
                Object::Bool(false),
                Object::String("Ralph".into()),
                Object::Name("SomeName".into())
            ])))
        );
        assert_eq!(object(b"[]"), Ok(Object::Array(Array::new())));
        assert_eq!(
            object(b"[1 2 0 R 3]"),
            Ok(Object::Array(Array::from([
                Object::Integer(1),
                Object::Reference(Reference::new(2, 0)),
                Object::Integer(3)
            ])))
        );
        assert_eq!(
            object(b"[[1][]]"),
            Ok(Object::Array(Array::from([
                Object::Array(Array::from([Object::Integer(1)])),
                Object::Array(Array::new())
            ])))
        );
        assert_eq!(kind(object(b"[1 2")), ParseErrorKind::MalformedArray);
    }

    #[test]
    fn test_dictionary() {
        let expected: Dictionary = [(Name::from("Length"), Object::Integer(93))].into_iter().collect();
        assert_eq!(object(b"<< /Length 93 >> "), Ok(Object::Dictionary(expected)));
        assert_eq!(object(b"<<>>"), Ok(Object::Dictionary(Dictionary::default())));

        let subdictionary: Dictionary = [(Name::from("Item2"), Object::Bool(true))].into_iter().collect();
        let expected: Dictionary = [
            (Name::from("Type"), Object::Name("Example".into())),
            (Name::from("Subtype"), Object::Name("DictionaryExample".into())),
            (Name::from("Version"), Object::Real(0.01)),
            (Name::from("IntegerItem"), Object::Integer(12)),
            (Name::from("StringItem"), Object::String("a string".into())),
            (Name::from("Subdictionary"), Object::Dictionary(subdictionary)),
        ]
        .into_iter()
        .collect();
        assert_eq!(
            object(
                b"<< /Type /Example
        /Subtype /DictionaryExample
        /Version 0.01
        /IntegerItem 12
        /StringItem (a string)
        /Subdictionary <<
        /Item2 true
        >>
        >>
        "
            ),
            Ok(Object::Dictionary(expected))
        );
    }

    #[test]
    fn test_dictionary_errors() {
        assert_eq!(kind(object(b"<< /A 1")), ParseErrorKind::MalformedDictionary);
        assert_eq!(kind(object(b"<< 1 2 >>")), ParseErrorKind::MalformedDictionary);
        assert_eq!(kind(object(b"<< /A 1 > >")), ParseErrorKind::MalformedDictionary);
    }

    #[test]
    fn test_dictionary_not_followed_by_stream() {
        let mut p = parser(b"<< /A 1 >>\nendobj");
        assert!(matches!(p.read_object(), Ok(Object::Dictionary(_))));
        assert_eq!(p.position(), 10);

        let mut p = parser(b"<< /A 1 >> streamer");
        assert!(matches!(p.read_object(), Ok(Object::Dictionary(_))));
        assert_eq!(p.position(), 10);
    }

    #[test]
    fn test_stream_object() {
        for (input, start) in [
            (&b"<< /Length 5 >>\nstream\nhello\nendstream"[..], 23),
            (b"<< /Length 5 >>stream\r\nhello\r\nendstream", 23),
            (b"<</Length 5>> stream\rhello endstream", 21),
        ] {
            let mut p = parser(input);
            match p.read_object() {
                Ok(Object::Stream(stream)) => {
                    assert_eq!(stream.range(), start..start + 5);
                    assert_eq!(&input[stream.range()], b"hello");
                    assert_eq!(stream.stream_dictionary.length, 5);
                }
                other => panic!("expected stream, got {:?}", other),
            }
            assert_eq!(p.position(), start + 5);
        }
    }

    #[test]
    fn test_stream_errors() {
        assert_eq!(
            kind(object(b"<< /Length 50 >>\nstream\nhello\nendstream")),
            ParseErrorKind::StreamOutOfBounds { start: 24, length: 50 }
        );
        assert_eq!(
            kind(object(b"<< /Length 3 0 R >>\nstream\nhello\nendstream")),
            ParseErrorKind::InvalidStream(StreamDictionaryError::IndirectLength)
        );
        assert_eq!(
            kind(object(b"<< >>\nstream\nhello\nendstream")),
            ParseErrorKind::InvalidStream(StreamDictionaryError::MissingLength)
        );
    }

    #[test]
    fn test_unrecognized_object() {
        assert_eq!(
            object(b"  }"),
            Err(KsParseError::new(2, ParseErrorKind::UnrecognizedObject(b'}')))
        );
        assert_eq!(kind(object(b")")), ParseErrorKind::UnrecognizedObject(b')'));
    }

    #[test]
    fn test_indirect_object() {
        let input = b"garbage 4 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj";
        let mut p = parser(input);
        let indirect = p.read_indirect_object(8).unwrap();
        assert_eq!(indirect.reference(), Reference::new(4, 0));
        let dict = indirect.object.dictionary().unwrap();
        assert_eq!(dict.get(&b"Type"[..]), Some(&Object::Name("Catalog".into())));
        assert_eq!(dict.get(&b"Pages"[..]), Some(&Object::Reference(Reference::new(2, 0))));

        let mut p = parser(b"0 0 obj null endobj ");
        assert_eq!(p.read_indirect_object(0), Ok(IndirectObject::new(0, 0, Object::Null)));
    }

    #[test]
    fn test_malformed_indirect_object() {
        assert_eq!(
            kind(parser(b"4 0 <<>>").read_indirect_object(0).map(|o| o.object)),
            ParseErrorKind::MalformedIndirectObject
        );
        assert_eq!(
            kind(parser(b"4 obj <<>>").read_indirect_object(0).map(|o| o.object)),
            ParseErrorKind::MalformedIndirectObject
        );
        assert!(matches!(
            kind(parser(b"4 0 obj").read_indirect_object(9).map(|o| o.object)),
            ParseErrorKind::Cursor(_)
        ));
    }

    fn nested(open: &str, close: &str, depth: usize) -> Vec<u8> {
        format!("{}{}", open.repeat(depth), close.repeat(depth)).into_bytes()
    }

    #[test]
    fn test_nesting_limit() {
        let input = nested("[", "]", MAX_NESTING_DEPTH);
        assert!(matches!(object(&input), Ok(Object::Array(_))));

        let input = nested("[", "]", MAX_NESTING_DEPTH + 1);
        assert_eq!(kind(object(&input)), ParseErrorKind::NestingTooDeep(MAX_NESTING_DEPTH));

        let input = nested("<< /A ", ">>", MAX_NESTING_DEPTH + 1);
        assert_eq!(kind(object(&input)), ParseErrorKind::NestingTooDeep(MAX_NESTING_DEPTH));

        let input = nested("[<< /A ", ">>]", MAX_NESTING_DEPTH);
        assert_eq!(kind(object(&input)), ParseErrorKind::NestingTooDeep(MAX_NESTING_DEPTH));
    }

    #[test]
    fn test_deeply_nested_input() {
        let input = nested("[", "]", 200_000);
        let mut p = parser(&input);
        let err = p.read_object().unwrap_err();
        assert_eq!(err.kind, ParseErrorKind::NestingTooDeep(MAX_NESTING_DEPTH));
        assert_eq!(err.position, MAX_NESTING_DEPTH);

        // depth is released on failure
        p.cursor_mut().seek_absolute(199_999).unwrap();
        assert_eq!(p.read_object(), Ok(Object::Array(Array::new())));
    }
}
