// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/celare

//! Cryptographic and compression primitives for payload bodies.
//!
//! The body of a container is transformed in two optional stages before
//! framing:
//!
//! - **Compression**: DEFLATE in gzip framing. Opportunistic: the
//!   orchestrator keeps the compressed form only when it is strictly
//!   smaller than the input, otherwise the `COMPRESSED` flag stays clear.
//! - **Encryption**: AES-256-GCM with a key derived from the user password
//!   via PBKDF2-HMAC-SHA-256. The random salt, the iteration count and the
//!   random 96-bit IV travel in the container header; the 128-bit
//!   authentication tag is appended to the ciphertext, so a sealed body is
//!   always `plaintext_len + 16` bytes.
//!
//! Derived keys ride in [`Zeroizing`] so they are wiped on drop.

use aes_gcm::aead::Aead;
use aes_gcm::{Aes256Gcm, KeyInit, Nonce};
use flate2::read::GzDecoder;
use flate2::write::GzEncoder;
use flate2::Compression;
use rand::RngCore;
use std::io::{Read, Write};
use zeroize::Zeroizing;

use crate::stego::error::StegoError;

/// AES-GCM IV length in bytes (96 bits).
pub const IV_LEN: usize = 12;
/// PBKDF2 salt length in bytes.
pub const SALT_LEN: usize = 16;
/// AES-GCM authentication tag length in bytes.
pub const TAG_LEN: usize = 16;
/// Default PBKDF2 iteration count written by the hide pipeline.
pub const DEFAULT_ITERATIONS: u32 = 200_000;

/// Generate a fresh random salt.
pub fn salt() -> [u8; SALT_LEN] {
    let mut out = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut out);
    out
}

/// Generate a fresh random AES-GCM IV.
pub fn iv() -> [u8; IV_LEN] {
    let mut out = [0u8; IV_LEN];
    rand::thread_rng().fill_bytes(&mut out);
    out
}

/// Derive a 256-bit AES key from a password via PBKDF2-HMAC-SHA-256.
///
/// Both sides of the wire must agree on `salt` and `iterations`; the hide
/// pipeline writes them into the container header so the reveal side can
/// reproduce the key.
pub fn derive_key(password: &str, salt: &[u8], iterations: u32) -> Zeroizing<[u8; 32]> {
    let mut key = Zeroizing::new([0u8; 32]);
    pbkdf2::pbkdf2_hmac::<sha2::Sha256>(password.as_bytes(), salt, iterations, &mut *key);
    key
}

/// Encrypt a body with AES-256-GCM.
///
/// Returns `ciphertext || tag`; the result is `plaintext.len() + 16` bytes.
pub fn seal(key: &[u8; 32], iv: &[u8; IV_LEN], plaintext: &[u8]) -> Vec<u8> {
    let cipher = Aes256Gcm::new_from_slice(key).expect("valid key length");
    cipher
        .encrypt(Nonce::from_slice(iv), plaintext)
        .expect("AES-GCM encrypt should not fail")
}

/// Decrypt a sealed body with AES-256-GCM.
///
/// Returns [`StegoError::AuthFailed`] when the tag does not verify; this
/// is the single error for both a wrong password and a tampered body.
pub fn open(key: &[u8; 32], iv: &[u8; IV_LEN], sealed: &[u8]) -> Result<Vec<u8>, StegoError> {
    let cipher = Aes256Gcm::new_from_slice(key).expect("valid key length");
    cipher
        .decrypt(Nonce::from_slice(iv), sealed)
        .map_err(|_| StegoError::AuthFailed)
}

/// Compress bytes with DEFLATE in gzip framing.
pub fn compress(bytes: &[u8]) -> Vec<u8> {
    let mut encoder = GzEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(bytes).expect("gzip write to Vec should not fail");
    encoder.finish().expect("gzip finish should not fail")
}

/// Decompress gzip-framed bytes.
///
/// Runs only after the container's CRC or AEAD check accepted the body, so
/// a failure here means corruption: [`StegoError::PayloadCorrupt`].
pub fn decompress(bytes: &[u8]) -> Result<Vec<u8>, StegoError> {
    let mut out = Vec::new();
    GzDecoder::new(bytes)
        .read_to_end(&mut out)
        .map_err(|_| StegoError::PayloadCorrupt)?;
    Ok(out)
}
