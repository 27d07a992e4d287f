// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/celare

//! Container framing and hide/reveal orchestration.
//!
//! Two container formats share one pipeline:
//!
//! - **STEGFILE** (`stegfile`): the image-carrier container. Carries file
//!   name, MIME type, original size, optional crypto parameters and a
//!   header CRC; the body follows a `body_size` field.
//! - **EMOJ** (`emoji`): the text-carrier container. Carries only crypto
//!   parameters and a body CRC.
//!
//! The pipeline (`pipeline`) sequences compression, encryption, framing
//! and carrier embedding, and the inverse, including `(depth, alpha)`
//! auto-detection for image reveals. `capacity` predicts how much payload
//! a carrier holds. Every operation is a pure request/response call that
//! owns its buffers; nothing is shared between calls, so independent
//! operations may run concurrently without coordination.

pub mod capacity;
pub mod crypto;
pub mod emoji;
pub mod error;
mod pipeline;
pub mod stegfile;

pub use error::StegoError;

/// Flags bit: body is AES-256-GCM sealed.
pub const FLAG_ENCRYPTED: u8 = 0x01;
/// Flags bit: body is gzip-compressed.
pub const FLAG_COMPRESSED: u8 = 0x02;
/// Flags bit: payload MIME looks like an image. Informational only.
pub const FLAG_IS_IMAGE: u8 = 0x04;
/// Flags bit: payload MIME looks like audio. Informational only.
pub const FLAG_IS_AUDIO: u8 = 0x08;

pub use capacity::{estimate_capacity, CapacityEstimate};
pub use pipeline::{
    hide_emoji, hide_image, reveal_emoji, reveal_image, EmojiOptions, HideOptions, Payload,
    RevealedPayload, RevealedText,
};
