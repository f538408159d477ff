//! Store Codec Module
//!
//! Converts between the in-memory map and the length-prefixed file format.
//!
//! # Format
//! ```text
//! token := <decimal length> "\n" <raw bytes>
//! file  := (key-token value-token)*
//! ```
//! No escaping is needed since every token carries its own length.

use std::collections::HashMap;

use thiserror::Error;

// == Parse Error ==
/// Reasons a buffer can fail to parse.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// No newline terminating a length header
    #[error("Bad file: no newline")]
    TruncatedHeader,

    /// Header text is not a non-negative integer
    #[error("Bad file: no length")]
    InvalidLength,

    /// Declared length runs past the end of the buffer
    #[error("Bad file: insufficient contents")]
    InsufficientData,
}

// == Encode ==
/// Serializes entries into a single buffer, key token then value token per entry.
pub fn encode<'a, I>(entries: I) -> Vec<u8>
where
    I: IntoIterator<Item = (&'a [u8], &'a [u8])>,
{
    let mut buf = Vec::new();
    for (key, value) in entries {
        write_token(&mut buf, key);
        write_token(&mut buf, value);
    }
    buf
}

fn write_token(buf: &mut Vec<u8>, token: &[u8]) {
    buf.extend_from_slice(token.len().to_string().as_bytes());
    buf.push(b'\n');
    buf.extend_from_slice(token);
}

// == Parse Contents ==
/// Parses `contents` into `store`, overwriting existing keys.
///
/// Best effort: parsing stops at the first malformed token and returns the
/// error, but pairs inserted before that point are left in `store`.
pub fn parse_contents(
    mut contents: &[u8],
    store: &mut HashMap<Vec<u8>, Vec<u8>>,
) -> Result<(), ParseError> {
    while !contents.is_empty() {
        let key = next_token(&mut contents)?;
        let value = next_token(&mut contents)?;
        store.insert(key.to_vec(), value.to_vec());
    }
    Ok(())
}

/// Splits one token off the front of `contents`.
fn next_token<'a>(contents: &mut &'a [u8]) -> Result<&'a [u8], ParseError> {
    let newline = contents
        .iter()
        .position(|&b| b == b'\n')
        .ok_or(ParseError::TruncatedHeader)?;
    let length = parse_length(&contents[..newline])?;

    let rest = &contents[newline + 1..];
    if (rest.len() as u64) < length {
        return Err(ParseError::InsufficientData);
    }
    // length <= rest.len() here, so the cast cannot truncate
    let (token, rest) = rest.split_at(length as usize);
    *contents = rest;
    Ok(token)
}

fn parse_length(header: &[u8]) -> Result<u64, ParseError> {
    std::str::from_utf8(header)
        .ok()
        .map(|s| s.trim_matches(|c: char| c.is_ascii_whitespace()))
        .filter(|s| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|s| s.parse::<u64>().ok())
        .ok_or(ParseError::InvalidLength)
}
