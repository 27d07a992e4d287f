// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/celare

//! Carrier codecs: the bit-level transport under the container formats.
//!
//! Two carriers are supported:
//!
//! - **Pixels** (`pixel`): a framed blob is streamed into the low bits of
//!   RGBA channels at a configurable depth, and read back through a lazy
//!   byte stream.
//! - **Text** (`text`): bytes become invisible zero-width code points,
//!   interleaved with visible cover emoji so the result survives casual
//!   inspection.
//!
//! Neither codec knows anything about container layout; they move opaque
//! bytes and leave all validation to the framers.

pub mod pixel;
pub mod text;

pub use pixel::{LsbStream, PixelBuffer};
pub use text::Theme;
