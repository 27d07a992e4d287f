// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/celare

//! EMOJ container: build and parse the text-carrier container.
//!
//! Simpler than STEGFILE: the body is UTF-8 text (sealed when encrypted),
//! so there is no name/mime/size metadata, and the CRC covers only the
//! body. The outer channel (chat apps, clipboards) is already coarse, so
//! the header carries no CRC of its own.
//!
//! ```text
//! [4 bytes ] magic "EMOJ"
//! [1 byte  ] version (1)
//! [1 byte  ] flags (only bit 0, ENCRYPTED, is consulted)
//! [1 byte  ] salt_len + salt   (0 when not encrypted)
//! [1 byte  ] iv_len   + iv    (0 when not encrypted)
//! [4 bytes ] data_len (BE u32)
//! [4 bytes ] crc (BE u32, CRC-32 of body only)
//! [N bytes ] body (AES-GCM-sealed when encrypted, raw text bytes otherwise)
//! ```

use crate::bytes;
use crate::stego::error::StegoError;
use crate::stego::FLAG_ENCRYPTED;

/// Container magic.
pub const MAGIC: [u8; 4] = *b"EMOJ";
/// Current container version.
pub const VERSION: u8 = 1;

/// A parsed EMOJ container.
#[derive(Debug)]
pub struct ParsedEmoji {
    /// Container flags byte.
    pub flags: u8,
    /// KDF salt; empty when not encrypted.
    pub salt: Vec<u8>,
    /// AES-GCM IV; empty when not encrypted.
    pub iv: Vec<u8>,
    /// Body bytes, CRC-verified.
    pub body: Vec<u8>,
}

/// Fixed container overhead: magic(4) + version(1) + flags(1) + salt_len(1)
/// + iv_len(1) + data_len(4) + crc(4), before salt/iv bytes.
pub const FIXED_OVERHEAD: usize = 4 + 1 + 1 + 1 + 1 + 4 + 4;

/// Build an EMOJ container around a body.
///
/// When `flags` carries `ENCRYPTED`, `salt` and `iv` must be non-empty.
///
/// # Errors
/// - [`StegoError::MissingCryptoParams`]: encrypted without salt or iv.
/// - [`StegoError::FieldOverflow`]: salt/iv longer than 255 bytes, or a
///   body longer than a u32 can count.
pub fn build(body: &[u8], flags: u8, salt: &[u8], iv: &[u8]) -> Result<Vec<u8>, StegoError> {
    if flags & FLAG_ENCRYPTED != 0 && (salt.is_empty() || iv.is_empty()) {
        return Err(StegoError::MissingCryptoParams);
    }
    let salt_len = u8::try_from(salt.len()).map_err(|_| StegoError::FieldOverflow)?;
    let iv_len = u8::try_from(iv.len()).map_err(|_| StegoError::FieldOverflow)?;
    let data_len = bytes::be_u32(body.len())?;

    let mut out = Vec::with_capacity(FIXED_OVERHEAD + salt.len() + iv.len() + body.len());
    out.extend_from_slice(&MAGIC);
    out.push(VERSION);
    out.push(flags);
    out.push(salt_len);
    out.extend_from_slice(salt);
    out.push(iv_len);
    out.extend_from_slice(iv);
    bytes::put_u32(&mut out, data_len);
    bytes::put_u32(&mut out, bytes::crc32(body));
    out.extend_from_slice(body);
    Ok(out)
}

/// Parse an EMOJ container from extracted bytes.
///
/// # Errors
/// - [`StegoError::BadMagic`]: the bytes do not start with `EMOJ`. The
///   reveal pipeline answers this by reading the bytes as plain text.
/// - [`StegoError::UnsupportedVersion`]: unknown version byte.
/// - [`StegoError::MalformedHeader`]: salt/iv/data_len overrun the input.
/// - [`StegoError::PayloadCorrupt`]: body CRC mismatch.
pub fn parse(data: &[u8]) -> Result<ParsedEmoji, StegoError> {
    let mut src = data.iter().copied();

    let magic: [u8; 4] = bytes::read_array(&mut src).map_err(|_| StegoError::BadMagic)?;
    if magic != MAGIC {
        return Err(StegoError::BadMagic);
    }

    let [version] = bytes::read_array(&mut src).map_err(|_| StegoError::MalformedHeader)?;
    if version != VERSION {
        return Err(StegoError::UnsupportedVersion(version));
    }
    let [flags] = bytes::read_array(&mut src).map_err(|_| StegoError::MalformedHeader)?;

    let [salt_len] = bytes::read_array(&mut src).map_err(|_| StegoError::MalformedHeader)?;
    let salt =
        bytes::read_vec(&mut src, salt_len as usize).map_err(|_| StegoError::MalformedHeader)?;
    let [iv_len] = bytes::read_array(&mut src).map_err(|_| StegoError::MalformedHeader)?;
    let iv = bytes::read_vec(&mut src, iv_len as usize).map_err(|_| StegoError::MalformedHeader)?;

    let data_len =
        bytes::read_u32(&mut src).map_err(|_| StegoError::MalformedHeader)? as usize;
    let stored_crc = bytes::read_u32(&mut src).map_err(|_| StegoError::MalformedHeader)?;
    let body = bytes::read_vec(&mut src, data_len).map_err(|_| StegoError::MalformedHeader)?;

    if bytes::crc32(&body) != stored_crc {
        return Err(StegoError::PayloadCorrupt);
    }

    Ok(ParsedEmoji { flags, salt, iv, body })
}
