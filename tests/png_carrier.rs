// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/celare

//! Full-stack test through the PNG host adapter: hide, serialize to PNG,
//! reload, reveal. PNG is lossless RGBA8, so every embedded bit must
//! survive the trip, including bits in the alpha channel.

use celare_core::host::{encode_png, PixelSink, PixelSource, PngCarrier};
use celare_core::{hide_image, reveal_image, HideOptions, Payload, PixelBuffer};

fn cover(width: u32, height: u32) -> PixelBuffer {
    let mut data = Vec::with_capacity(width as usize * height as usize * 4);
    for i in 0..width as usize * height as usize * 4 {
        data.push((i * 53 % 249) as u8);
    }
    PixelBuffer::from_rgba(width, height, data).unwrap()
}

#[test]
fn hide_survives_png_serialization() {
    let payload = Payload {
        name: "letter.txt".into(),
        mime: "text/plain".into(),
        bytes: b"dear reader, nothing here is what it seems".to_vec(),
    };
    let opts = HideOptions { compress: false, depth: 1, ..HideOptions::default() };
    let stego = hide_image(cover(48, 48), &payload, None, &opts).unwrap();

    let mut carrier = PngCarrier::default();
    carrier.write_pixels(&stego).unwrap();
    assert!(!carrier.as_bytes().is_empty());

    let reloaded = carrier.read_pixels().unwrap();
    assert_eq!(reloaded, stego);

    let got = reveal_image(&reloaded, None).unwrap();
    assert_eq!(got.name, "letter.txt");
    assert_eq!(got.bytes, payload.bytes);
}

#[test]
fn alpha_bits_survive_png() {
    let payload = Payload {
        name: "a.bin".into(),
        mime: "application/octet-stream".into(),
        bytes: (0u8..200).collect(),
    };
    let opts = HideOptions { compress: false, depth: 2, use_alpha: true, ..HideOptions::default() };
    let stego = hide_image(cover(40, 40), &payload, None, &opts).unwrap();

    let mut carrier = PngCarrier::new(encode_png(&stego).unwrap());
    let reloaded = carrier.read_pixels().unwrap();
    let got = reveal_image(&reloaded, None).unwrap();
    assert_eq!(got.bytes, payload.bytes);
}
