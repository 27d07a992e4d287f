// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/celare

//! Byte-level utilities shared by both container formats.
//!
//! Everything on the wire is big-endian with fixed widths. Writers are
//! width-checked: a value that does not fit its declared field is rejected
//! with [`StegoError::FieldOverflow`] instead of being silently truncated.
//! Readers consume from a byte iterator (the lazy pixel extractor on the
//! image path) and report [`StegoError::UnexpectedEof`] when it runs dry.

use crate::stego::error::StegoError;

/// CRC-32 (IEEE 802.3): polynomial `0xEDB88320`, init and final XOR
/// `0xFFFFFFFF`. Both container formats store this value big-endian.
pub fn crc32(bytes: &[u8]) -> u32 {
    crc32fast::hash(bytes)
}

/// Append a `u16` big-endian.
pub fn put_u16(buf: &mut Vec<u8>, value: u16) {
    buf.extend_from_slice(&value.to_be_bytes());
}

/// Append a `u32` big-endian.
pub fn put_u32(buf: &mut Vec<u8>, value: u32) {
    buf.extend_from_slice(&value.to_be_bytes());
}

/// Append a `u64` big-endian.
pub fn put_u64(buf: &mut Vec<u8>, value: u64) {
    buf.extend_from_slice(&value.to_be_bytes());
}

/// Narrow a length to `u16`, rejecting values wider than the field.
pub fn be_u16(value: usize) -> Result<u16, StegoError> {
    u16::try_from(value).map_err(|_| StegoError::FieldOverflow)
}

/// Narrow a length to `u32`, rejecting values wider than the field.
pub fn be_u32(value: usize) -> Result<u32, StegoError> {
    u32::try_from(value).map_err(|_| StegoError::FieldOverflow)
}

/// Read exactly `N` bytes from the source.
pub fn read_array<const N: usize>(
    src: &mut impl Iterator<Item = u8>,
) -> Result<[u8; N], StegoError> {
    let mut out = [0u8; N];
    for slot in &mut out {
        *slot = src.next().ok_or(StegoError::UnexpectedEof)?;
    }
    Ok(out)
}

/// Read exactly `len` bytes from the source into an owned buffer.
pub fn read_vec(
    src: &mut impl Iterator<Item = u8>,
    len: usize,
) -> Result<Vec<u8>, StegoError> {
    let mut out = Vec::with_capacity(len);
    for _ in 0..len {
        out.push(src.next().ok_or(StegoError::UnexpectedEof)?);
    }
    Ok(out)
}

/// Read a big-endian `u16`.
pub fn read_u16(src: &mut impl Iterator<Item = u8>) -> Result<u16, StegoError> {
    Ok(u16::from_be_bytes(read_array(src)?))
}

/// Read a big-endian `u32`.
pub fn read_u32(src: &mut impl Iterator<Item = u8>) -> Result<u32, StegoError> {
    Ok(u32::from_be_bytes(read_array(src)?))
}

/// Read a big-endian `u64`.
pub fn read_u64(src: &mut impl Iterator<Item = u8>) -> Result<u64, StegoError> {
    Ok(u64::from_be_bytes(read_array(src)?))
}
