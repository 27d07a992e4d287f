// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/celare

//! Error types for the steganography pipeline.
//!
//! [`StegoError`] covers all failure modes from carrier extraction through
//! container parsing, decryption and decompression. The reveal pipeline
//! treats exactly one kind as recoverable: `BadMagic`, which the image
//! auto-detection loop answers by trying the next `(depth, alpha)`
//! configuration. Everything else is fatal to the request.

use core::fmt;

/// Errors that can occur during steganographic hiding or revealing.
#[derive(Debug)]
pub enum StegoError {
    /// The carrier does not begin with a known container magic.
    BadMagic,
    /// The carrier begins with the retired `STEG` marker; not supported.
    LegacyFormat,
    /// The container version byte is unknown.
    UnsupportedVersion(u8),
    /// A length field overruns the remaining bytes, or name/mime is not UTF-8.
    MalformedHeader,
    /// The header declares a key-derivation function we do not implement.
    UnknownKdf(u8),
    /// STEGFILE header CRC mismatch.
    HeaderCrcFailed,
    /// Body CRC mismatch, or the decrypted body failed to decompress.
    PayloadCorrupt,
    /// AES-GCM rejected the body (wrong password or tampered data).
    AuthFailed,
    /// The framed blob does not fit the carrier.
    CapacityExceeded { needed: usize, available: usize },
    /// An encrypted operation was requested without a password.
    MissingPassword,
    /// The framer was asked to build an encrypted header without salt/iv/iterations.
    MissingCryptoParams,
    /// The text carrier contains no zero-width characters.
    NoHiddenData,
    /// The pixel stream ran out before the container was complete.
    UnexpectedEof,
    /// A value does not fit its declared wire width.
    FieldOverflow,
    /// LSB depth outside the supported `1..=4` range.
    InvalidDepth(u8),
    /// Revealed text bytes are not valid UTF-8.
    InvalidUtf8,
    /// The RGBA buffer length does not match `width * height * 4`.
    CarrierMismatch { expected: usize, actual: usize },
    /// The PNG adapter could not decode or encode the carrier image.
    InvalidImage(image::ImageError),
}

impl fmt::Display for StegoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BadMagic => write!(f, "no hidden container found in carrier"),
            Self::LegacyFormat => write!(f, "legacy STEG container is not supported"),
            Self::UnsupportedVersion(v) => write!(f, "unsupported container version {v}"),
            Self::MalformedHeader => write!(f, "malformed container header"),
            Self::UnknownKdf(id) => write!(f, "unknown KDF id {id:#04x}"),
            Self::HeaderCrcFailed => write!(f, "header CRC mismatch"),
            Self::PayloadCorrupt => write!(f, "payload corrupted (CRC or decompression failure)"),
            Self::AuthFailed => write!(f, "decryption failed (wrong password or tampered data)"),
            Self::CapacityExceeded { needed, available } => {
                write!(f, "payload needs {needed} bytes but carrier holds {available}")
            }
            Self::MissingPassword => write!(f, "a password is required for this carrier"),
            Self::MissingCryptoParams => {
                write!(f, "encrypted header requested without crypto parameters")
            }
            Self::NoHiddenData => write!(f, "text contains no hidden data"),
            Self::UnexpectedEof => write!(f, "carrier ended before the container was complete"),
            Self::FieldOverflow => write!(f, "value does not fit its wire field"),
            Self::InvalidDepth(d) => write!(f, "LSB depth {d} outside supported range 1..=4"),
            Self::InvalidUtf8 => write!(f, "revealed text is not valid UTF-8"),
            Self::CarrierMismatch { expected, actual } => {
                write!(f, "RGBA buffer is {actual} bytes, dimensions require {expected}")
            }
            Self::InvalidImage(e) => write!(f, "invalid carrier image: {e}"),
        }
    }
}

impl std::error::Error for StegoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidImage(e) => Some(e),
            _ => None,
        }
    }
}

impl From<image::ImageError> for StegoError {
    fn from(e: image::ImageError) -> Self {
        Self::InvalidImage(e)
    }
}
