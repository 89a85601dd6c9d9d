//! Stream filters.
//!
//! Only the filters without parameters beyond the defaults are decoded.
//! Everything else fails with [`FilterError::Unsupported`].

use std::io::Read;

use flate2::read::ZlibDecoder;

use crate::pdf::{Dictionary, Name};

const K_FLATE_DECODE: &[u8] = b"FlateDecode";
const K_ASCII_HEX_DECODE: &[u8] = b"ASCIIHexDecode";
const K_PREDICTOR: &[u8] = b"Predictor";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FilterError {
    #[error("unsupported filter {0}")]
    Unsupported(Name),
    #[error("unsupported predictor {0} for {1}")]
    UnsupportedPredictor(i64, Name),
    #[error("corrupt {filter} data: {message}")]
    Corrupt { filter: Name, message: String },
}

/// Decodes `data` with a single filter.
pub fn decode(filter: &Name, decode_parms: Option<&Dictionary>, data: &[u8]) -> Result<Vec<u8>, FilterError> {
    match filter.as_bytes() {
        K_FLATE_DECODE => {
            if let Some(predictor) = decode_parms.and_then(|parms| parms.get(K_PREDICTOR)).and_then(|p| p.integer()) {
                if predictor > 1 {
                    return Err(FilterError::UnsupportedPredictor(predictor, filter.clone()));
                }
            }
            flate_decode(data).map_err(|message| FilterError::Corrupt {
                filter: filter.clone(),
                message,
            })
        }
        K_ASCII_HEX_DECODE => ascii_hex_decode(data).map_err(|message| FilterError::Corrupt {
            filter: filter.clone(),
            message,
        }),
        _ => Err(FilterError::Unsupported(filter.clone())),
    }
}

fn flate_decode(data: &[u8]) -> Result<Vec<u8>, String> {
    let mut decoder = ZlibDecoder::new(data);
    let mut output = Vec::new();
    decoder.read_to_end(&mut output).map_err(|e| e.to_string())?;
    Ok(output)
}

fn ascii_hex_decode(data: &[u8]) -> Result<Vec<u8>, String> {
    let mut digits: Vec<u8> = data
        .iter()
        .copied()
        .take_while(|c| *c != b'>')
        .filter(|c| !crate::parse::is_whitespace(*c))
        .collect();
    if digits.len() % 2 == 1 {
        digits.push(b'0');
    }
    hex::decode(digits).map_err(|e| e.to_string())
}
