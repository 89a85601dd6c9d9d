use super::{
    error::{KsParseError, ParseErrorKind},
    lex, Parser,
};
use crate::{
    cursor::ByteCursor,
    pdf::{trailer::TRAILER, Dictionary, Trailer},
};

const EOF_MARKER: &[u8] = b"%%EOF";
const TRAILER_DICTIONARY: &[u8] = b"trailer<<";

impl<C: ByteCursor> Parser<C> {
    /// Locates the last trailer of the file by scanning backward from the
    /// end: `%%EOF`, the startxref offset before it and finally the
    /// `trailer` keyword.
    ///
    /// Returns the startxref offset together with the trailer.
    pub fn read_trailer(&mut self) -> Result<(usize, Trailer), KsParseError> {
        self.cursor.seek_end();

        match self.read_reverse_token()? {
            Some(token) if token == EOF_MARKER => {}
            _ => return Err(self.error(ParseErrorKind::EofMarkerNotFound)),
        }

        let startxref_position = self.position();
        let startxref = self
            .read_reverse_token()?
            .ok_or_else(|| self.error(ParseErrorKind::StartxrefInvalid(String::new())))
            .and_then(|token| {
                lex::unsigned(&token)
                    .and_then(|offset| usize::try_from(offset).ok())
                    .ok_or_else(|| {
                        KsParseError::new(
                            startxref_position,
                            ParseErrorKind::StartxrefInvalid(String::from_utf8_lossy(&token).into_owned()),
                        )
                    })
            })?;
        log::debug!("startxref points to byte {}", startxref);

        loop {
            let token = self
                .read_reverse_token()?
                .ok_or_else(|| self.error(ParseErrorKind::NoTrailerFound))?;
            if token == TRAILER || token.starts_with(TRAILER_DICTIONARY) {
                break;
            }
        }

        let keyword_position = self.position();
        self.cursor.seek_relative(TRAILER.len() as isize)?;
        let dictionary = self.read_dictionary()?;
        let trailer = Trailer::try_from(&dictionary)
            .map_err(|e| KsParseError::new(keyword_position, ParseErrorKind::InvalidTrailer(e)))?;

        Ok((startxref, trailer))
    }

    /// Reads the `trailer` keyword and the dictionary following it.
    pub fn read_trailer_dictionary(&mut self) -> Result<Dictionary, KsParseError> {
        self.expect_keyword("trailer")?;
        self.read_dictionary()
    }
}
