// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/celare

//! # celare-core
//!
//! Pure-Rust steganography engine for hiding arbitrary payloads inside
//! everyday carriers. Two carrier families are supported:
//!
//! - **Images**: the payload is framed in a STEGFILE container and
//!   streamed into the low bits of RGBA pixel channels (configurable
//!   depth, optional alpha). Reveal auto-detects the embedding
//!   configuration by trial-parsing the canonical `(depth, channels)`
//!   order.
//! - **Emoji text**: the payload rides in invisible zero-width code
//!   points woven between visible cover emoji, optionally wrapped in an
//!   EMOJ container when encrypted.
//!
//! Payloads are optionally gzip-compressed (kept only when smaller) and
//! optionally sealed with AES-256-GCM under a PBKDF2-HMAC-SHA-256
//! password-derived key. All processing is client-side and
//! request-scoped; the engine holds no state between calls.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use celare_core::{hide_image, reveal_image, HideOptions, Payload, PixelBuffer};
//!
//! let carrier = celare_core::host::decode_png(&std::fs::read("cover.png").unwrap()).unwrap();
//! let payload = Payload {
//!     name: "note.txt".into(),
//!     mime: "text/plain".into(),
//!     bytes: b"meet at dawn".to_vec(),
//! };
//! let opts = HideOptions { encrypt: true, ..HideOptions::default() };
//! let stego = hide_image(carrier, &payload, Some("passphrase"), &opts).unwrap();
//! let revealed = reveal_image(&stego, Some("passphrase")).unwrap();
//! assert_eq!(revealed.bytes, b"meet at dawn");
//! ```

pub mod bytes;
pub mod carrier;
pub mod host;
pub mod stego;

pub use carrier::pixel::PixelBuffer;
pub use carrier::text::Theme;
pub use host::{PixelSink, PixelSource, TextExchange};
pub use stego::{
    estimate_capacity, hide_emoji, hide_image, reveal_emoji, reveal_image, CapacityEstimate,
    EmojiOptions, HideOptions, Payload, RevealedPayload, RevealedText, StegoError,
};
