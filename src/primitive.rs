//! Little-endian fixed-width primitive reads/writes and NUL-terminated
//! string handling, shared by the decoder and encoder.

use crate::error::{Error, Result};

fn need(buffer: &[u8], position: usize, len: usize) -> Result<()> {
    if buffer.len() < position + len {
        return Err(Error::invalid_bson(format!(
            "unexpected end of buffer: need {} bytes at position {}, have {}",
            len,
            position,
            buffer.len().saturating_sub(position)
        )));
    }
    Ok(())
}

pub fn read_i32(buffer: &[u8], position: &mut usize) -> Result<i32> {
    need(buffer, *position, 4)?;
    let bytes: [u8; 4] = buffer[*position..*position + 4].try_into().unwrap();
    *position += 4;
    Ok(i32::from_le_bytes(bytes))
}

pub fn read_u32(buffer: &[u8], position: &mut usize) -> Result<u32> {
    need(buffer, *position, 4)?;
    let bytes: [u8; 4] = buffer[*position..*position + 4].try_into().unwrap();
    *position += 4;
    Ok(u32::from_le_bytes(bytes))
}

pub fn read_i64(buffer: &[u8], position: &mut usize) -> Result<i64> {
    need(buffer, *position, 8)?;
    let bytes: [u8; 8] = buffer[*position..*position + 8].try_into().unwrap();
    *position += 8;
    Ok(i64::from_le_bytes(bytes))
}

pub fn read_f64(buffer: &[u8], position: &mut usize) -> Result<f64> {
    need(buffer, *position, 8)?;
    let bytes: [u8; 8] = buffer[*position..*position + 8].try_into().unwrap();
    *position += 8;
    Ok(f64::from_le_bytes(bytes))
}

pub fn read_u8(buffer: &[u8], position: &mut usize) -> Result<u8> {
    need(buffer, *position, 1)?;
    let b = buffer[*position];
    *position += 1;
    Ok(b)
}

pub fn read_bytes<'a>(buffer: &'a [u8], position: &mut usize, len: usize) -> Result<&'a [u8]> {
    need(buffer, *position, len)?;
    let slice = &buffer[*position..*position + len];
    *position += len;
    Ok(slice)
}

/// Reads a NUL-terminated UTF-8 key or pattern, advancing past the NUL.
pub fn read_cstring(buffer: &[u8], position: &mut usize) -> Result<String> {
    let start = *position;
    let nul = buffer[start..]
        .iter()
        .position(|&b| b == 0)
        .ok_or_else(|| Error::invalid_bson("unterminated cstring: no NUL byte found"))?;
    let span = &buffer[start..start + nul];
    let s = simdutf8::basic::from_utf8(span)
        .map_err(|_| Error::invalid_bson("invalid UTF-8 in cstring"))?
        .to_owned();
    *position = start + nul + 1;
    Ok(s)
}

/// Reads a BSON string: `i32 length_including_nul` + UTF-8 bytes + NUL.
pub fn read_string(buffer: &[u8], position: &mut usize) -> Result<String> {
    let len = read_i32(buffer, position)?;
    if len <= 0 {
        return Err(Error::invalid_bson(format!("invalid string length {len}")));
    }
    let len = len as usize;
    need(buffer, *position, len)?;
    let span = &buffer[*position..*position + len];
    if span[len - 1] != 0 {
        return Err(Error::invalid_bson("string is not NUL-terminated"));
    }
    let s = simdutf8::basic::from_utf8(&span[..len - 1])
        .map_err(|_| Error::invalid_bson("invalid UTF-8 in string"))?
        .to_owned();
    *position += len;
    Ok(s)
}

pub fn write_i32(buf: &mut Vec<u8>, v: i32) {
    buf.extend_from_slice(&v.to_le_bytes());
}

pub fn write_u32(buf: &mut Vec<u8>, v: u32) {
    buf.extend_from_slice(&v.to_le_bytes());
}

pub fn write_i64(buf: &mut Vec<u8>, v: i64) {
    buf.extend_from_slice(&v.to_le_bytes());
}

pub fn write_f64(buf: &mut Vec<u8>, v: f64) {
    buf.extend_from_slice(&v.to_le_bytes());
}

/// Writes a NUL-terminated UTF-8 string. When `check_null` is set, rejects
/// interior NUL bytes with `InvalidDocument`; always rejects non-UTF-8 input
/// (statically impossible here since the input is `&str`, kept for symmetry
/// with the spec's stated contract).
pub fn write_cstring(buf: &mut Vec<u8>, s: &str, check_null: bool) -> Result<()> {
    if check_null && s.as_bytes().contains(&0) {
        return Err(Error::invalid_document(
            "keys and regex patterns must not contain a NUL character",
        ));
    }
    buf.extend_from_slice(s.as_bytes());
    buf.push(0);
    Ok(())
}

/// Writes a BSON string: `i32 length_including_nul` + UTF-8 bytes + NUL.
pub fn write_string(buf: &mut Vec<u8>, s: &str) {
    let len = s.len() + 1;
    write_i32(buf, len as i32);
    buf.extend_from_slice(s.as_bytes());
    buf.push(0);
}
