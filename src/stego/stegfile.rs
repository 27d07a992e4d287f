// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/celare

//! STEGFILE container: build and parse the image-carrier header.
//!
//! The container wraps the (possibly compressed, possibly encrypted) body
//! before it is bit-packed into pixel channels:
//!
//! ```text
//! [8 bytes ] magic "STEGFILE"
//! [1 byte  ] version (1)
//! [1 byte  ] flags
//! [2 bytes ] name_len (BE u16)   + name  (UTF-8)
//! [2 bytes ] mime_len (BE u16)   + mime  (UTF-8)
//! [8 bytes ] orig_size (BE u64, payload length before compression/encryption)
//! -- only when flags & ENCRYPTED --
//! [2 bytes ] salt_len (BE u16, 16 for conformant writers) + salt
//! [1 byte  ] kdf_id (0x01 = PBKDF2-HMAC-SHA-256)
//! [4 bytes ] iterations (BE u32)
//! [1 byte  ] iv_len (12 for conformant writers) + iv
//! ----------------------------------
//! [4 bytes ] header_crc (BE u32, CRC-32 of everything above)
//! [4 bytes ] body_size (BE u32)  -- after the CRC, not covered by it
//! [N bytes ] body
//! ```
//!
//! The parser consumes a byte iterator (the lazy pixel extractor) and
//! buffers what it reads, so the header CRC is always verified. It leaves
//! the source positioned at the first body byte.

use crate::bytes;
use crate::stego::error::StegoError;
use crate::stego::FLAG_ENCRYPTED;

/// Container magic.
pub const MAGIC: [u8; 8] = *b"STEGFILE";
/// Marker of the retired pre-1.0 container. Detected and refused.
const LEGACY_MAGIC: [u8; 4] = *b"STEG";
/// Current container version.
pub const VERSION: u8 = 1;
/// KDF identifier for PBKDF2-HMAC-SHA-256, the only KDF of version 1.
pub const KDF_PBKDF2_SHA256: u8 = 0x01;

/// Crypto parameters carried in an encrypted header.
///
/// Conformant writers emit a 16-byte salt and a 12-byte IV; the parser
/// stores whatever lengths the wire declares and leaves validation to the
/// decryption step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CryptoParams {
    pub salt: Vec<u8>,
    pub iterations: u32,
    pub iv: Vec<u8>,
}

/// A parsed STEGFILE header.
#[derive(Debug)]
pub struct ParsedHeader {
    /// Payload file name.
    pub name: String,
    /// Payload MIME type.
    pub mime: String,
    /// Payload length before compression/encryption.
    pub original_size: u64,
    /// Container flags byte.
    pub flags: u8,
    /// Present exactly when `flags & ENCRYPTED`.
    pub crypto: Option<CryptoParams>,
    /// Length of the body that follows the header.
    pub body_size: u32,
    /// Total header bytes consumed, including the CRC and `body_size` fields.
    pub header_len: usize,
}

/// Exact header size for the given field lengths.
///
/// Counts everything the carrier spends before the body, including the
/// 4-byte `body_size` field that sits between the CRC and the body. The
/// capacity estimator uses this same formula, so both sides of the wire
/// agree byte for byte.
pub const fn header_overhead(name_len: usize, mime_len: usize, encrypted: bool) -> usize {
    // magic(8) + version(1) + flags(1) + name_len(2) + mime_len(2)
    // + orig_size(8) + crc(4) + body_size(4)
    let fixed = 8 + 1 + 1 + 2 + 2 + 8 + 4 + 4;
    // salt_len(2) + salt(16) + kdf_id(1) + iterations(4) + iv_len(1) + iv(12)
    let crypto = if encrypted { 2 + 16 + 1 + 4 + 1 + 12 } else { 0 };
    fixed + crypto + name_len + mime_len
}

/// Build a STEGFILE header (everything up to and including `header_crc`).
///
/// The caller appends `body_size` and the body itself. When `flags`
/// carries `ENCRYPTED`, `crypto` is required.
///
/// # Errors
/// - [`StegoError::MissingCryptoParams`] if `ENCRYPTED` is set without params.
/// - [`StegoError::FieldOverflow`] if name, mime, salt or iv exceed their
///   wire widths.
pub fn build_header(
    name: &str,
    mime: &str,
    original_size: u64,
    flags: u8,
    crypto: Option<&CryptoParams>,
) -> Result<Vec<u8>, StegoError> {
    let encrypted = flags & FLAG_ENCRYPTED != 0;
    let mut header = Vec::with_capacity(header_overhead(name.len(), mime.len(), encrypted));

    header.extend_from_slice(&MAGIC);
    header.push(VERSION);
    header.push(flags);
    bytes::put_u16(&mut header, bytes::be_u16(name.len())?);
    header.extend_from_slice(name.as_bytes());
    bytes::put_u16(&mut header, bytes::be_u16(mime.len())?);
    header.extend_from_slice(mime.as_bytes());
    bytes::put_u64(&mut header, original_size);

    if encrypted {
        let params = crypto.ok_or(StegoError::MissingCryptoParams)?;
        bytes::put_u16(&mut header, bytes::be_u16(params.salt.len())?);
        header.extend_from_slice(&params.salt);
        header.push(KDF_PBKDF2_SHA256);
        bytes::put_u32(&mut header, params.iterations);
        let iv_len = u8::try_from(params.iv.len()).map_err(|_| StegoError::FieldOverflow)?;
        header.push(iv_len);
        header.extend_from_slice(&params.iv);
    }

    let crc = bytes::crc32(&header);
    bytes::put_u32(&mut header, crc);
    Ok(header)
}

/// Records every byte pulled through it, for the header CRC check.
struct Tee<'a, I: Iterator<Item = u8>> {
    inner: &'a mut I,
    seen: Vec<u8>,
}

impl<I: Iterator<Item = u8>> Iterator for Tee<'_, I> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        let byte = self.inner.next()?;
        self.seen.push(byte);
        Some(byte)
    }
}

/// Parse a STEGFILE header from a byte stream.
///
/// On success the source is positioned at the first body byte; the caller
/// reads `body_size` more bytes from it.
///
/// # Errors
/// - [`StegoError::BadMagic`]: the stream does not start with `STEGFILE`
///   (including streams too short to hold the magic at all). The reveal
///   loop answers this by trying the next `(depth, alpha)` configuration.
/// - [`StegoError::LegacyFormat`]: retired `STEG` marker; fatal.
/// - [`StegoError::UnsupportedVersion`], [`StegoError::MalformedHeader`],
///   [`StegoError::UnknownKdf`], [`StegoError::HeaderCrcFailed`],
///   [`StegoError::UnexpectedEof`]: fatal header defects.
pub fn parse_stream(src: &mut impl Iterator<Item = u8>) -> Result<ParsedHeader, StegoError> {
    let magic: [u8; 8] = match bytes::read_array(src) {
        Ok(m) => m,
        // Too short for any container: treat as "not this configuration".
        Err(_) => return Err(StegoError::BadMagic),
    };
    if magic != MAGIC {
        if magic[..4] == LEGACY_MAGIC && magic[4] != b'F' {
            return Err(StegoError::LegacyFormat);
        }
        return Err(StegoError::BadMagic);
    }

    let mut tee = Tee { inner: src, seen: Vec::with_capacity(64) };

    let [version] = bytes::read_array(&mut tee)?;
    if version != VERSION {
        return Err(StegoError::UnsupportedVersion(version));
    }
    let [flags] = bytes::read_array(&mut tee)?;

    let name_len = bytes::read_u16(&mut tee)? as usize;
    let name = read_utf8(&mut tee, name_len)?;
    let mime_len = bytes::read_u16(&mut tee)? as usize;
    let mime = read_utf8(&mut tee, mime_len)?;
    let original_size = bytes::read_u64(&mut tee)?;

    let crypto = if flags & FLAG_ENCRYPTED != 0 {
        let salt_len = bytes::read_u16(&mut tee)? as usize;
        let salt = bytes::read_vec(&mut tee, salt_len).map_err(|_| StegoError::MalformedHeader)?;
        let [kdf_id] = bytes::read_array(&mut tee)?;
        if kdf_id != KDF_PBKDF2_SHA256 {
            return Err(StegoError::UnknownKdf(kdf_id));
        }
        let iterations = bytes::read_u32(&mut tee)?;
        let [iv_len] = bytes::read_array(&mut tee)?;
        let iv =
            bytes::read_vec(&mut tee, iv_len as usize).map_err(|_| StegoError::MalformedHeader)?;
        Some(CryptoParams { salt, iterations, iv })
    } else {
        None
    };

    // The CRC covers magic..iv; the tee saw everything after the magic.
    let mut crc_input = Vec::with_capacity(8 + tee.seen.len());
    crc_input.extend_from_slice(&magic);
    crc_input.extend_from_slice(&tee.seen);
    let computed_crc = bytes::crc32(&crc_input);

    let stored_crc = bytes::read_u32(src)?;
    if stored_crc != computed_crc {
        return Err(StegoError::HeaderCrcFailed);
    }

    let body_size = bytes::read_u32(src)?;
    let header_len = crc_input.len() + 4 + 4;

    Ok(ParsedHeader {
        name,
        mime,
        original_size,
        flags,
        crypto,
        body_size,
        header_len,
    })
}

/// Read a length-prefixed UTF-8 field. A length that overruns the stream
/// or bytes that are not UTF-8 are both a malformed header.
fn read_utf8(src: &mut impl Iterator<Item = u8>, len: usize) -> Result<String, StegoError> {
    let raw = bytes::read_vec(src, len).map_err(|_| StegoError::MalformedHeader)?;
    String::from_utf8(raw).map_err(|_| StegoError::MalformedHeader)
}
