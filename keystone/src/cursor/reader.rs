use std::io::{Read, Seek, SeekFrom};

use super::{window, ByteCursor, CursorError};

/// Cursor over any seekable reader, typically a [`std::fs::File`].
///
/// Every peek is a positioned read on the underlying reader. The length is
/// discovered once, when the cursor is created.
#[derive(Debug)]
pub struct ReaderCursor<R> {
    inner: R,
    len: usize,
    position: usize,
}

impl<R: Read + Seek> ReaderCursor<R> {
    pub fn new(mut inner: R) -> Result<Self, CursorError> {
        let len = inner.seek(SeekFrom::End(0))?;
        let len = usize::try_from(len).map_err(|_| CursorError::SeekOutOfBounds {
            position: usize::MAX,
            len: usize::MAX,
        })?;

        Ok(Self {
            inner,
            len,
            position: 0,
        })
    }

    pub fn into_inner(self) -> R {
        self.inner
    }
}

impl<R: Read + Seek> ByteCursor for ReaderCursor<R> {
    fn len(&self) -> usize {
        self.len
    }

    fn position(&self) -> usize {
        self.position
    }

    fn set_position(&mut self, position: usize) {
        self.position = position;
    }

    fn peek(&mut self, n: isize) -> Result<Vec<u8>, CursorError> {
        let range = window(self.position, self.len, n)?;
        let mut buf = vec![0; range.len()];
        if buf.is_empty() {
            return Ok(buf);
        }

        self.inner.seek(SeekFrom::Start(range.start as u64))?;
        let mut filled = 0;
        while filled < buf.len() {
            match self.inner.read(&mut buf[filled..]) {
                Ok(0) => {
                    return Err(CursorError::ShortRead {
                        position: range.start,
                        requested: n,
                        available: filled,
                    })
                }
                Ok(count) => filled += count,
                Err(err) if err.kind() == std::io::ErrorKind::Interrupted => {}
                Err(err) => return Err(err.into()),
            }
        }

        Ok(buf)
    }
}
