// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Binary encoding primitives: varint lengths and fixed-width little-endian fields.
//!
//! Every table in the index is built from three pieces. Atlas entries are
//! 8-byte signed offsets. Keyed entries are runs of 4-byte keys. Strings are
//! UTF-8 bytes behind a 7-bit varint length, the same layout a `BinaryWriter`
//! style "write string" primitive produces, so the string table stays readable
//! by other tooling.
//!
//! # References
//!
//! - **Varint (LEB128)**: Little-endian base-128 variable-length integer encoding.
//!   See DWARF4 §7.6 "Variable Length Data" and the Protocol Buffers encoding
//!   guide: <https://protobuf.dev/programming-guides/encoding/>

use std::io::{self, Write};

/// Maximum varint length for a 32-bit string length prefix.
pub const MAX_VARINT_BYTES: usize = 5;

/// Width of one atlas entry.
pub const ATLAS_ENTRY_SIZE: u64 = 8;

/// Width of a key or count field in a keyed table entry.
pub const KEY_SIZE: u64 = 4;

// ============================================================================
// VARINT ENCODING
// ============================================================================

/// Encode a varint to bytes
pub fn encode_varint(mut value: u32, buf: &mut Vec<u8>) {
    loop {
        let byte = (value & 0x7F) as u8;
        value >>= 7;
        if value == 0 {
            buf.push(byte);
            break;
        } else {
            buf.push(byte | 0x80);
        }
    }
}

/// Decode a varint from bytes, returning (value, bytes_consumed)
///
/// Returns an error if:
/// - Buffer is empty
/// - Varint exceeds MAX_VARINT_BYTES (malformed input)
pub fn decode_varint(bytes: &[u8]) -> io::Result<(u32, usize)> {
    if bytes.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "Empty buffer for varint",
        ));
    }

    let mut result: u64 = 0;
    let mut shift = 0;
    let mut i = 0;

    while i < bytes.len() && i < MAX_VARINT_BYTES {
        let byte = bytes[i];
        result |= ((byte & 0x7F) as u64) << shift;
        i += 1;
        if byte & 0x80 == 0 {
            return u32::try_from(result).map(|v| (v, i)).map_err(|_| {
                io::Error::new(io::ErrorKind::InvalidData, "Varint overflows 32 bits")
            });
        }
        shift += 7;
    }

    if i >= MAX_VARINT_BYTES {
        Err(io::Error::new(
            io::ErrorKind::InvalidData,
            "Varint exceeds maximum length (possible corruption)",
        ))
    } else {
        Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "Incomplete varint",
        ))
    }
}

// ============================================================================
// STRING ENTRIES
// ============================================================================

/// Encode a length-prefixed string entry.
pub fn encode_string(value: &str, buf: &mut Vec<u8>) -> io::Result<()> {
    let len = u32::try_from(value.len()).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("String of {} bytes is too long to encode", value.len()),
        )
    })?;
    encode_varint(len, buf);
    buf.extend_from_slice(value.as_bytes());
    Ok(())
}

/// Decode a length-prefixed string entry, returning (string, bytes_consumed).
pub fn decode_string(bytes: &[u8]) -> io::Result<(String, usize)> {
    let (len, pos) = decode_varint(bytes)?;
    let end = pos.checked_add(len as usize).ok_or_else(|| {
        io::Error::new(io::ErrorKind::InvalidData, "String length causes overflow")
    })?;
    if end > bytes.len() {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            format!("Truncated string (expected {} bytes)", len),
        ));
    }
    let value = String::from_utf8(bytes[pos..end].to_vec())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    Ok((value, end))
}

// ============================================================================
// FIXED-WIDTH FIELDS
// ============================================================================

/// Write one atlas entry (8-byte little-endian signed offset).
pub fn write_offset<W: Write>(out: &mut W, offset: u64) -> io::Result<()> {
    let offset = i64::try_from(offset).map_err(|_| {
        io::Error::new(io::ErrorKind::InvalidInput, "Data offset exceeds i64 range")
    })?;
    out.write_all(&offset.to_le_bytes())
}

/// Decode one atlas entry. Negative offsets are corruption.
pub fn decode_offset(bytes: [u8; 8]) -> io::Result<u64> {
    let offset = i64::from_le_bytes(bytes);
    u64::try_from(offset).map_err(|_| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Negative atlas offset {}", offset),
        )
    })
}

/// Write a 4-byte little-endian key or count.
pub fn write_u32<W: Write>(out: &mut W, value: u32) -> io::Result<()> {
    out.write_all(&value.to_le_bytes())
}

/// Encode a keyed entry: key, count, then `count` member keys.
pub fn encode_keyed_entry(key: u32, members: &[u32], buf: &mut Vec<u8>) -> io::Result<()> {
    let count = u32::try_from(members.len()).map_err(|_| {
        io::Error::new(io::ErrorKind::InvalidInput, "Keyed entry has too many members")
    })?;
    buf.extend_from_slice(&key.to_le_bytes());
    buf.extend_from_slice(&count.to_le_bytes());
    for member in members {
        buf.extend_from_slice(&member.to_le_bytes());
    }
    Ok(())
}
