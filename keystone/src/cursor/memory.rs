use super::{window, ByteCursor, CursorError};

/// Cursor over bytes that are already in memory.
///
/// Cloning the cursor gives a second, independent position over the same
/// data when `B` is a shared buffer (for example `&[u8]`).
#[derive(Debug, Clone)]
pub struct MemoryCursor<B> {
    data: B,
    position: usize,
}

impl<B: AsRef<[u8]>> MemoryCursor<B> {
    pub fn new(data: B) -> Self {
        Self { data, position: 0 }
    }

    pub fn bytes(&self) -> &[u8] {
        self.data.as_ref()
    }

    pub fn into_inner(self) -> B {
        self.data
    }
}

impl<B: AsRef<[u8]>> ByteCursor for MemoryCursor<B> {
    fn len(&self) -> usize {
        self.data.as_ref().len()
    }

    fn position(&self) -> usize {
        self.position
    }

    fn set_position(&mut self, position: usize) {
        self.position = position;
    }

    fn peek(&mut self, n: isize) -> Result<Vec<u8>, CursorError> {
        let range = window(self.position, self.len(), n)?;
        Ok(self.data.as_ref()[range].to_vec())
    }

    fn peek_byte(&mut self) -> Result<Option<u8>, CursorError> {
        Ok(self.data.as_ref().get(self.position).copied())
    }
}
