// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/celare

//! Image-carrier capacity estimation.
//!
//! Computes how many payload bytes fit a carrier before anything is
//! embedded, using the same header-size formula the framer uses, so an
//! estimate of N guarantees a hide of N bytes succeeds and N+1 fails.
//! The 16-byte AEAD tag is charged separately from the header because the
//! container's `body_size` field already counts it inside the body.

use crate::bytes;
use crate::carrier::pixel;
use crate::stego::crypto::TAG_LEN;
use crate::stego::error::StegoError;
use crate::stego::stegfile;

/// Capacity report for a carrier/configuration pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityEstimate {
    /// Carrier bytes spent on the container header, CRC and `body_size`.
    pub header_size: usize,
    /// Payload bytes that fit after header (and AEAD tag, when encrypting).
    pub payload_capacity: u64,
    /// True when the estimate counts the alpha channel. Alpha raises
    /// capacity by a third, but any tool that strips or flattens alpha
    /// destroys the payload; surface this to the user before hiding.
    pub alpha_fragile: bool,
}

/// Estimate payload capacity for an image carrier.
///
/// # Errors
/// - [`StegoError::InvalidDepth`]: depth outside `1..=4`.
/// - [`StegoError::FieldOverflow`]: name or mime longer than a u16 length
///   field can declare.
pub fn estimate_capacity(
    width: u32,
    height: u32,
    depth: u8,
    use_alpha: bool,
    encrypt: bool,
    name: &str,
    mime: &str,
) -> Result<CapacityEstimate, StegoError> {
    pixel::check_depth(depth)?;
    bytes::be_u16(name.len())?;
    bytes::be_u16(mime.len())?;

    let header_size = stegfile::header_overhead(name.len(), mime.len(), encrypt);
    let tag = if encrypt { TAG_LEN } else { 0 };
    let available = pixel::bytes_available(width, height, depth, use_alpha);
    let payload_capacity = available.saturating_sub((header_size + tag) as u64);

    Ok(CapacityEstimate { header_size, payload_capacity, alpha_fragile: use_alpha })
}
