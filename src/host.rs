// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/celare

//! Contracts between the engine and its host, plus a PNG adapter.
//!
//! The engine never touches files, clipboards or image containers itself;
//! the host supplies pixels and text through these traits and gets them
//! back the same way. A sink must be lossless: every low bit of every
//! channel survives, and alpha is preserved whenever it carries payload.
//!
//! The PNG adapter is the reference implementation of the pixel
//! contracts, built on the `image` crate. PNG is lossless RGBA8, so it
//! satisfies the bit-exactness requirement as-is.

use std::io::Cursor;

use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageReader};

use crate::carrier::pixel::PixelBuffer;
use crate::stego::error::StegoError;

/// Supplies an owned RGBA carrier from whatever container the host chose.
pub trait PixelSource {
    fn read_pixels(&mut self) -> Result<PixelBuffer, StegoError>;
}

/// Accepts a carrier and returns a lossless encoding of it.
///
/// Implementations must not quantize, must preserve every low bit of
/// every channel, and must not strip alpha.
pub trait PixelSink {
    fn write_pixels(&mut self, image: &PixelBuffer) -> Result<Vec<u8>, StegoError>;
}

/// Text in/out seam for emoji mode (clipboard, chat box, file).
pub trait TextExchange {
    fn submit(&mut self, text: &str) -> Result<(), StegoError>;
    fn retrieve(&mut self) -> Result<String, StegoError>;
}

/// Decode any `image`-supported container into an RGBA carrier.
pub fn decode_png(bytes: &[u8]) -> Result<PixelBuffer, StegoError> {
    let img = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| StegoError::InvalidImage(image::ImageError::IoError(e)))?
        .decode()?;
    let rgba = img.to_rgba8();
    let (width, height) = (rgba.width(), rgba.height());
    PixelBuffer::from_rgba(width, height, rgba.into_raw())
}

/// Encode a carrier as a PNG, bit-exact and alpha-preserving.
pub fn encode_png(image: &PixelBuffer) -> Result<Vec<u8>, StegoError> {
    let mut out = Cursor::new(Vec::new());
    PngEncoder::new(&mut out).write_image(
        image.data(),
        image.width(),
        image.height(),
        ExtendedColorType::Rgba8,
    )?;
    Ok(out.into_inner())
}

/// A PNG byte buffer acting as both carrier source and sink.
#[derive(Debug, Clone, Default)]
pub struct PngCarrier {
    bytes: Vec<u8>,
}

impl PngCarrier {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// The current PNG bytes (updated by `write_pixels`).
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }
}

impl PixelSource for PngCarrier {
    fn read_pixels(&mut self) -> Result<PixelBuffer, StegoError> {
        decode_png(&self.bytes)
    }
}

impl PixelSink for PngCarrier {
    fn write_pixels(&mut self, image: &PixelBuffer) -> Result<Vec<u8>, StegoError> {
        self.bytes = encode_png(image)?;
        Ok(self.bytes.clone())
    }
}
