use std::{
    fs::File,
    io::{Read, Seek},
};

use cursor::{MemoryCursor, ReaderCursor};
use pdf::RawPdf;

pub use error::KsError;

pub mod cursor;
mod error;
pub mod parse;
pub mod pdf;

/// Read a PDF file into memory and open it.
pub fn read_file(file_path: &std::path::Path) -> Result<RawPdf<MemoryCursor<Vec<u8>>>, KsError> {
    let mut input_file = File::open(file_path)?;
    let mut buf = Vec::new();
    input_file.read_to_end(&mut buf)?;

    RawPdf::open(MemoryCursor::new(buf))
}

/// Open a PDF through a seekable reader. Objects are read from `reader`
/// when they are resolved.
pub fn open<R: Read + Seek>(reader: R) -> Result<RawPdf<ReaderCursor<R>>, KsError> {
    RawPdf::open(ReaderCursor::new(reader)?)
}
