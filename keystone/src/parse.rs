//! Recursive descent parser over a [`ByteCursor`].
//!
//! Besides the cursor the parser only tracks how deep it is inside arrays
//! and dictionaries. Every read starts at the current cursor position; on
//! success the cursor is left directly behind what was read.

use crate::cursor::{ByteCursor, CursorError};

use self::error::{KsParseError, ParseErrorKind};

pub mod error;
mod lex;
mod object;
mod trailer;
mod xref;

const HEADER_WINDOW: usize = 16;
/// Arrays and dictionaries nested deeper than this are rejected.
pub const MAX_NESTING_DEPTH: usize = 256;

pub(crate) fn is_whitespace(chr: u8) -> bool {
    matches!(chr, b'\0' | b'\t' | b'\n' | b'\x0c' | b'\r' | b' ')
}

pub(crate) fn is_delimiter(chr: u8) -> bool {
    matches!(
        chr,
        b'(' | b')' | b'<' | b'>' | b'[' | b']' | b'{' | b'}' | b'/' | b'%'
    )
}

pub(crate) fn is_regular(chr: u8) -> bool {
    !is_delimiter(chr) && !is_whitespace(chr)
}

#[derive(Debug, Clone)]
pub struct Parser<C> {
    cursor: C,
    depth: usize,
}

impl<C: ByteCursor> Parser<C> {
    pub fn new(cursor: C) -> Self {
        Self { cursor, depth: 0 }
    }

    pub fn cursor(&self) -> &C {
        &self.cursor
    }

    pub fn cursor_mut(&mut self) -> &mut C {
        &mut self.cursor
    }

    pub fn into_inner(self) -> C {
        self.cursor
    }

    pub fn position(&self) -> usize {
        self.cursor.position()
    }

    pub(crate) fn error(&self, kind: ParseErrorKind) -> KsParseError {
        KsParseError::new(self.cursor.position(), kind)
    }

    /// Next byte. Fails at the end of the source.
    pub(crate) fn expect_byte(&mut self) -> Result<u8, KsParseError> {
        self.cursor.peek_byte()?.ok_or_else(|| {
            CursorError::ShortRead {
                position: self.cursor.position(),
                requested: 1,
                available: 0,
            }
            .into()
        })
    }

    /// Byte before the cursor, `None` at the start of the source.
    pub(crate) fn peek_back_byte(&mut self) -> Result<Option<u8>, KsParseError> {
        if self.cursor.position() == 0 {
            return Ok(None);
        }
        Ok(self.cursor.peek(-1)?.first().copied())
    }

    /// Skips whitespace and comments.
    pub fn skip_whitespace(&mut self) -> Result<(), KsParseError> {
        while let Some(chr) = self.cursor.peek_byte()? {
            if is_whitespace(chr) {
                self.cursor.seek_relative(1)?;
            } else if chr == b'%' {
                while let Some(chr) = self.cursor.peek_byte()? {
                    if chr == b'\r' || chr == b'\n' {
                        break;
                    }
                    self.cursor.seek_relative(1)?;
                }
            } else {
                break;
            }
        }
        Ok(())
    }

    /// `true` if the next bytes are `tag`. Never moves the cursor.
    pub(crate) fn peek_tag(&mut self, tag: &[u8]) -> Result<bool, KsParseError> {
        if self.cursor.len().saturating_sub(self.cursor.position()) < tag.len() {
            return Ok(false);
        }
        Ok(self.cursor.peek(tag.len() as isize)? == tag)
    }

    /// `true` if the next bytes are `keyword` followed by a non-regular byte
    /// or the end of the source.
    pub(crate) fn peek_keyword(&mut self, keyword: &[u8]) -> Result<bool, KsParseError> {
        if !self.peek_tag(keyword)? {
            return Ok(false);
        }
        let after = self.cursor.position() + keyword.len();
        if after == self.cursor.len() {
            return Ok(true);
        }
        let checkpoint = self.cursor.position();
        self.cursor.seek_absolute(after)?;
        let next = self.cursor.peek_byte();
        self.cursor.seek_absolute(checkpoint)?;
        Ok(next?.map_or(true, |chr| !is_regular(chr)))
    }

    /// Skips whitespace and consumes `keyword`.
    pub(crate) fn expect_keyword(&mut self, keyword: &'static str) -> Result<(), KsParseError> {
        self.skip_whitespace()?;
        if !self.peek_keyword(keyword.as_bytes())? {
            return Err(self.error(ParseErrorKind::MissingKeyword(keyword)));
        }
        self.cursor.seek_relative(keyword.len() as isize)?;
        Ok(())
    }

    /// Reads the run of regular bytes at the cursor. Empty if the cursor is
    /// not on a regular byte.
    pub(crate) fn read_token(&mut self) -> Result<Vec<u8>, KsParseError> {
        self.read_while(is_regular)
    }

    pub(crate) fn read_while(&mut self, predicate: impl Fn(u8) -> bool) -> Result<Vec<u8>, KsParseError> {
        let mut token = Vec::new();
        while let Some(chr) = self.cursor.peek_byte()? {
            if !predicate(chr) {
                break;
            }
            token.push(chr);
            self.cursor.seek_relative(1)?;
        }
        Ok(token)
    }

    /// Reads the whitespace separated token that ends before the cursor and
    /// leaves the cursor at its first byte. `None` if only whitespace is left
    /// before the cursor.
    pub(crate) fn read_reverse_token(&mut self) -> Result<Option<Vec<u8>>, KsParseError> {
        while let Some(chr) = self.peek_back_byte()? {
            if !is_whitespace(chr) {
                break;
            }
            self.cursor.seek_relative(-1)?;
        }

        let mut token = Vec::new();
        while let Some(chr) = self.peek_back_byte()? {
            if is_whitespace(chr) {
                break;
            }
            token.push(chr);
            self.cursor.seek_relative(-1)?;
        }

        if token.is_empty() {
            return Ok(None);
        }
        token.reverse();
        Ok(Some(token))
    }

    /// Skips whitespace and reads an unsigned decimal integer.
    pub(crate) fn read_unsigned(&mut self) -> Result<u64, KsParseError> {
        self.skip_whitespace()?;
        let start = self.cursor.position();
        let digits = self.read_while(|chr| chr.is_ascii_digit())?;
        lex::unsigned(&digits).ok_or_else(|| {
            KsParseError::new(
                start,
                ParseErrorKind::InvalidNumber(String::from_utf8_lossy(&digits).into_owned()),
            )
        })
    }

    /// Reads the `%PDF-M.m` header at the start of the source. The cursor is
    /// left behind the version.
    pub fn read_version(&mut self) -> Result<(u8, u8), KsParseError> {
        self.cursor.seek_absolute(0)?;
        let window = self.cursor.peek(HEADER_WINDOW.min(self.cursor.len()) as isize)?;
        let (remainder, version) =
            lex::version(&window).map_err(|_| KsParseError::new(0, ParseErrorKind::InvalidHeader))?;
        self.cursor.seek_absolute(window.len() - remainder.len())?;
        Ok(version)
    }
}
