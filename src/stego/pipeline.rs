// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/celare

//! Hide/reveal pipelines for both carriers.
//!
//! Image hide: payload → [gzip] → [AES-GCM] → STEGFILE header + body_size
//! + body → LSB embed. Image reveal inverts the chain, but the carrier
//! stores no record of the embedding depth or channel set (those govern
//! how the carrier is read in the first place), so reveal trial-decodes
//! the configurations in the canonical order `(1,RGB), (1,RGBA), (2,RGB),
//! …, (4,RGBA)`. A wrong configuration yields noise that fails the magic
//! check, so the first accepted header wins.
//!
//! Emoji hide: a plain message is woven into cover graphemes as raw UTF-8
//! bytes; an encrypted message is sealed and wrapped in an EMOJ container
//! first. Emoji reveal extracts the byte stream, tries the container
//! parser, and falls back to the plain-text reading when the bytes are
//! structurally not a container.
//!
//! Compression is opportunistic: the gzipped form is kept only when
//! strictly smaller, otherwise the `COMPRESSED` flag stays clear.
//!
//! Every call owns its buffers exclusively and touches no shared state,
//! so independent operations may run concurrently from any number of
//! threads. A caller that no longer wants a result simply abandons the
//! call (runs it on a thread or task it controls and drops the handle);
//! nothing persists between calls.

use crate::bytes;
use crate::carrier::pixel::{self, PixelBuffer};
use crate::carrier::text::{self, Theme};
use crate::stego::crypto::{self, DEFAULT_ITERATIONS, IV_LEN};
use crate::stego::emoji;
use crate::stego::error::StegoError;
use crate::stego::stegfile::{self, CryptoParams};
use crate::stego::{FLAG_COMPRESSED, FLAG_ENCRYPTED, FLAG_IS_AUDIO, FLAG_IS_IMAGE};

/// A payload to hide: file name, MIME type and content bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Payload {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Options for the image hide pipeline.
#[derive(Debug, Clone)]
pub struct HideOptions {
    /// Seal the body with a password-derived AES-256-GCM key.
    pub encrypt: bool,
    /// Try gzip; keep it only when strictly smaller.
    pub compress: bool,
    /// Low bits used per channel, `1..=4`.
    pub depth: u8,
    /// Also embed into the alpha channel (+33% capacity, fragile against
    /// alpha-stripping tools).
    pub use_alpha: bool,
}

impl Default for HideOptions {
    fn default() -> Self {
        Self { encrypt: false, compress: true, depth: 1, use_alpha: false }
    }
}

/// Options for the emoji hide pipeline.
#[derive(Debug, Clone, Default)]
pub struct EmojiOptions {
    /// Seal the message with a password-derived AES-256-GCM key.
    pub encrypt: bool,
    /// Cover grapheme theme.
    pub theme: Theme,
    /// Cover graphemes for [`Theme::Custom`]; split on extended grapheme
    /// cluster boundaries. Empty falls back to the mixed built-in theme.
    pub custom_cover: Option<String>,
}

/// A payload recovered from an image carrier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealedPayload {
    pub name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
    /// Payload length before compression/encryption, as recorded on hide.
    pub original_size: u64,
    pub was_encrypted: bool,
    pub was_compressed: bool,
}

/// A message recovered from a text carrier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevealedText {
    pub text: String,
    pub was_encrypted: bool,
}

/// Informational flag hints derived from the MIME prefix. Never consulted
/// when decoding.
fn mime_flags(mime: &str) -> u8 {
    if mime.starts_with("image/") {
        FLAG_IS_IMAGE
    } else if mime.starts_with("audio/") {
        FLAG_IS_AUDIO
    } else {
        0
    }
}

/// Hide a payload in a raster carrier.
///
/// # Errors
/// - [`StegoError::InvalidDepth`]: `opts.depth` outside `1..=4`.
/// - [`StegoError::MissingPassword`]: `opts.encrypt` without a password.
/// - [`StegoError::FieldOverflow`]: name/mime/body exceed their wire widths.
/// - [`StegoError::CapacityExceeded`]: framed blob larger than the carrier.
pub fn hide_image(
    mut image: PixelBuffer,
    payload: &Payload,
    password: Option<&str>,
    opts: &HideOptions,
) -> Result<PixelBuffer, StegoError> {
    pixel::check_depth(opts.depth)?;

    let mut flags = mime_flags(&payload.mime);
    let original_size = payload.bytes.len() as u64;
    let mut body = payload.bytes.clone();

    if opts.compress {
        let packed = crypto::compress(&body);
        if packed.len() < body.len() {
            body = packed;
            flags |= FLAG_COMPRESSED;
        }
    }

    let mut params = None;
    if opts.encrypt {
        let password = password.ok_or(StegoError::MissingPassword)?;
        let salt = crypto::salt();
        let iv = crypto::iv();
        let key = crypto::derive_key(password, &salt, DEFAULT_ITERATIONS);
        body = crypto::seal(&key, &iv, &body);
        flags |= FLAG_ENCRYPTED;
        params = Some(CryptoParams {
            salt: salt.to_vec(),
            iterations: DEFAULT_ITERATIONS,
            iv: iv.to_vec(),
        });
    }

    let mut blob = stegfile::build_header(
        &payload.name,
        &payload.mime,
        original_size,
        flags,
        params.as_ref(),
    )?;
    bytes::put_u32(&mut blob, bytes::be_u32(body.len())?);
    blob.extend_from_slice(&body);

    pixel::embed(&mut image, &blob, opts.depth, opts.use_alpha)?;
    Ok(image)
}

/// Reveal a payload from a raster carrier, auto-detecting depth and
/// channel set.
///
/// # Errors
/// - [`StegoError::BadMagic`]: no configuration produced a container.
/// - [`StegoError::LegacyFormat`]: the carrier holds a retired pre-1.0
///   container; refused.
/// - [`StegoError::MissingPassword`]: encrypted carrier, no password.
/// - [`StegoError::AuthFailed`]: wrong password or tampered body.
/// - [`StegoError::UnexpectedEof`]: carrier truncated mid-body.
pub fn reveal_image(
    image: &PixelBuffer,
    password: Option<&str>,
) -> Result<RevealedPayload, StegoError> {
    for depth in 1..=4u8 {
        for use_alpha in [false, true] {
            let mut stream = pixel::extract(image, depth, use_alpha)?;
            match stegfile::parse_stream(&mut stream) {
                Ok(header) => return finish_reveal_image(header, &mut stream, password),
                Err(StegoError::BadMagic) => continue,
                Err(e) => return Err(e),
            }
        }
    }
    Err(StegoError::BadMagic)
}

fn finish_reveal_image(
    header: stegfile::ParsedHeader,
    stream: &mut impl Iterator<Item = u8>,
    password: Option<&str>,
) -> Result<RevealedPayload, StegoError> {
    let mut body = bytes::read_vec(stream, header.body_size as usize)?;
    let was_encrypted = header.flags & FLAG_ENCRYPTED != 0;
    let was_compressed = header.flags & FLAG_COMPRESSED != 0;

    if was_encrypted {
        let password = password.ok_or(StegoError::MissingPassword)?;
        let params = header.crypto.as_ref().ok_or(StegoError::MalformedHeader)?;
        let iv: [u8; IV_LEN] =
            params.iv.as_slice().try_into().map_err(|_| StegoError::MalformedHeader)?;
        let key = crypto::derive_key(password, &params.salt, params.iterations);
        body = crypto::open(&key, &iv, &body)?;
    }
    if was_compressed {
        body = crypto::decompress(&body)?;
    }

    Ok(RevealedPayload {
        name: header.name,
        mime: header.mime,
        bytes: body,
        original_size: header.original_size,
        was_encrypted,
        was_compressed,
    })
}

/// Hide a message in emoji text.
///
/// Plain messages are woven in as raw UTF-8 bytes; encrypted messages are
/// sealed and wrapped in an EMOJ container (which carries salt, IV and a
/// body CRC) first.
///
/// # Errors
/// [`StegoError::MissingPassword`]: `opts.encrypt` without a password.
pub fn hide_emoji(
    message: &str,
    password: Option<&str>,
    opts: &EmojiOptions,
) -> Result<String, StegoError> {
    let body = if opts.encrypt {
        let password = password.ok_or(StegoError::MissingPassword)?;
        let salt = crypto::salt();
        let iv = crypto::iv();
        let key = crypto::derive_key(password, &salt, DEFAULT_ITERATIONS);
        let sealed = crypto::seal(&key, &iv, message.as_bytes());
        emoji::build(&sealed, FLAG_ENCRYPTED, &salt, &iv)?
    } else {
        message.as_bytes().to_vec()
    };

    let pool = text::cover_pool(opts.theme, opts.custom_cover.as_deref());
    Ok(text::weave(&body, &pool, &mut rand::thread_rng()))
}

/// Reveal a message from emoji text.
///
/// # Errors
/// - [`StegoError::NoHiddenData`]: no zero-width characters present.
/// - [`StegoError::MissingPassword`]: encrypted container, no password.
/// - [`StegoError::AuthFailed`]: wrong password or tampered container.
/// - [`StegoError::PayloadCorrupt`]: container body CRC mismatch.
/// - [`StegoError::InvalidUtf8`]: hidden bytes are not UTF-8 text.
pub fn reveal_emoji(text_in: &str, password: Option<&str>) -> Result<RevealedText, StegoError> {
    let raw = text::extract(text_in)?;

    match emoji::parse(&raw) {
        Ok(parsed) => {
            let was_encrypted = parsed.flags & FLAG_ENCRYPTED != 0;
            let body = if was_encrypted {
                let password = password.ok_or(StegoError::MissingPassword)?;
                let iv: [u8; IV_LEN] = parsed
                    .iv
                    .as_slice()
                    .try_into()
                    .map_err(|_| StegoError::MalformedHeader)?;
                // The EMOJ header carries no iteration count; both sides
                // use the pipeline default.
                let key = crypto::derive_key(password, &parsed.salt, DEFAULT_ITERATIONS);
                crypto::open(&key, &iv, &parsed.body)?
            } else {
                parsed.body
            };
            let text = String::from_utf8(body).map_err(|_| StegoError::InvalidUtf8)?;
            Ok(RevealedText { text, was_encrypted })
        }
        // Structurally not a container: read the bytes as plain text. A
        // CRC or AEAD failure means it *was* a container and surfaces.
        Err(StegoError::BadMagic)
        | Err(StegoError::UnsupportedVersion(_))
        | Err(StegoError::MalformedHeader) => {
            let text = String::from_utf8(raw).map_err(|_| StegoError::InvalidUtf8)?;
            Ok(RevealedText { text, was_encrypted: false })
        }
        Err(e) => Err(e),
    }
}
