//! Seekable byte sources.
//!
//! The parser never touches a file or a buffer directly. Everything goes
//! through a [`ByteCursor`]: a single position over a source of known length
//! that can be read forward and backward. Backward reads are needed for the
//! trailer, which is located by scanning from the end of the file.

use std::ops::Range;

pub use self::{memory::MemoryCursor, reader::ReaderCursor};

mod memory;
mod reader;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CursorError {
    #[error("short read at byte {position}: requested {requested} bytes, {available} available")]
    ShortRead {
        position: usize,
        requested: isize,
        available: usize,
    },
    #[error("seek to byte {position} is beyond the end of the source ({len} bytes)")]
    SeekOutOfBounds { position: usize, len: usize },
    #[error("io error ({kind:?}): {message}")]
    Io {
        kind: std::io::ErrorKind,
        message: String,
    },
}

impl From<std::io::Error> for CursorError {
    fn from(err: std::io::Error) -> Self {
        CursorError::Io {
            kind: err.kind(),
            message: err.to_string(),
        }
    }
}

/// A movable position over a byte source.
///
/// A negative length passed to [`ByteCursor::peek`] or [`ByteCursor::read`]
/// addresses the bytes that end at the current position. `read` leaves the
/// cursor after the returned bytes when reading forward and before them when
/// reading backward.
///
/// One cursor must only be driven by one parse at a time. Independent parses
/// over the same source each need their own cursor.
pub trait ByteCursor {
    /// Total number of bytes in the source.
    fn len(&self) -> usize;

    fn position(&self) -> usize;

    /// Moves the cursor without any bounds check. Use
    /// [`ByteCursor::seek_absolute`] instead.
    fn set_position(&mut self, position: usize);

    /// Returns `|n|` bytes without moving the cursor. A short read is an
    /// error, the source is never silently truncated.
    fn peek(&mut self, n: isize) -> Result<Vec<u8>, CursorError>;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(&mut self, n: isize) -> Result<Vec<u8>, CursorError> {
        let bytes = self.peek(n)?;
        if n < 0 {
            self.set_position(self.position() - bytes.len());
        } else {
            self.set_position(self.position() + bytes.len());
        }
        Ok(bytes)
    }

    fn seek_absolute(&mut self, position: usize) -> Result<usize, CursorError> {
        if position > self.len() {
            return Err(CursorError::SeekOutOfBounds {
                position,
                len: self.len(),
            });
        }
        self.set_position(position);
        Ok(position)
    }

    fn seek_relative(&mut self, n: isize) -> Result<usize, CursorError> {
        let current = self.position();
        let target = if n < 0 {
            current.checked_sub(n.unsigned_abs())
        } else {
            current.checked_add(n.unsigned_abs())
        };
        match target {
            Some(position) => self.seek_absolute(position),
            None => Err(CursorError::SeekOutOfBounds {
                position: current,
                len: self.len(),
            }),
        }
    }

    fn seek_end(&mut self) -> usize {
        let len = self.len();
        self.set_position(len);
        len
    }

    /// `true` exactly when the cursor sits at the end of the source.
    fn eof(&self) -> bool {
        self.position() >= self.len()
    }

    /// Next byte without moving, `None` at the end of the source.
    fn peek_byte(&mut self) -> Result<Option<u8>, CursorError> {
        if self.eof() {
            return Ok(None);
        }
        Ok(self.peek(1)?.first().copied())
    }

    fn read_byte(&mut self) -> Result<Option<u8>, CursorError> {
        let byte = self.peek_byte()?;
        if byte.is_some() {
            self.set_position(self.position() + 1);
        }
        Ok(byte)
    }
}

/// Byte range addressed by a signed read of `n` bytes at `position`.
pub(crate) fn window(position: usize, len: usize, n: isize) -> Result<Range<usize>, CursorError> {
    let count = n.unsigned_abs();
    let range = if n < 0 {
        position.checked_sub(count).map(|start| start..position)
    } else {
        position
            .checked_add(count)
            .filter(|end| *end <= len)
            .map(|end| position..end)
    };

    range.ok_or(CursorError::ShortRead {
        position,
        requested: n,
        available: if n < 0 { position } else { len.saturating_sub(position) },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window() {
        assert_eq!(window(2, 10, 3), Ok(2..5));
        assert_eq!(window(5, 10, -3), Ok(2..5));
        assert_eq!(window(10, 10, 0), Ok(10..10));
        assert!(matches!(
            window(8, 10, 3),
            Err(CursorError::ShortRead {
                position: 8,
                requested: 3,
                available: 2
            })
        ));
        assert!(matches!(window(1, 10, -2), Err(CursorError::ShortRead { available: 1, .. })));
    }
}
