// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/celare

//! Round-trip integration tests for the image hide/reveal pipeline.

use celare_core::carrier::pixel;
use celare_core::stego::stegfile;
use celare_core::{
    hide_image, reveal_image, HideOptions, Payload, PixelBuffer, StegoError,
};

/// Deterministic cover image with non-trivial channel values.
fn cover(width: u32, height: u32) -> PixelBuffer {
    let mut data = Vec::with_capacity(width as usize * height as usize * 4);
    for i in 0..width as usize * height as usize * 4 {
        data.push((i * 37 % 251) as u8);
    }
    PixelBuffer::from_rgba(width, height, data).unwrap()
}

fn payload(name: &str, mime: &str, bytes: &[u8]) -> Payload {
    Payload { name: name.into(), mime: mime.into(), bytes: bytes.to_vec() }
}

/// Pseudorandom bytes that gzip cannot shrink.
fn incompressible(len: usize) -> Vec<u8> {
    let mut state = 0x2545_F491u32;
    (0..len)
        .map(|_| {
            state = state.wrapping_mul(0x0019_660D).wrapping_add(0x3C6E_F35F);
            (state >> 24) as u8
        })
        .collect()
}

#[test]
fn roundtrip_plain_all_configurations() {
    let p = payload("data.bin", "application/octet-stream", &incompressible(64));
    for depth in 1..=4u8 {
        for use_alpha in [false, true] {
            let opts =
                HideOptions { encrypt: false, compress: false, depth, use_alpha };
            let stego = hide_image(cover(48, 48), &p, None, &opts).unwrap();
            let got = reveal_image(&stego, None).unwrap();
            assert_eq!(got.name, p.name, "depth {depth}, alpha {use_alpha}");
            assert_eq!(got.mime, p.mime);
            assert_eq!(got.bytes, p.bytes);
            assert_eq!(got.original_size, 64);
            assert!(!got.was_encrypted);
            assert!(!got.was_compressed);
        }
    }
}

#[test]
fn roundtrip_encrypted_all_configurations() {
    let p = payload("s.bin", "application/octet-stream", &incompressible(48));
    for depth in 1..=4u8 {
        for use_alpha in [false, true] {
            let opts = HideOptions { encrypt: true, compress: false, depth, use_alpha };
            let stego = hide_image(cover(64, 64), &p, Some("hunter2"), &opts).unwrap();
            let got = reveal_image(&stego, Some("hunter2")).unwrap();
            assert_eq!(got.bytes, p.bytes, "depth {depth}, alpha {use_alpha}");
            assert_eq!(got.original_size, 48);
            assert!(got.was_encrypted);
            assert!(!got.was_compressed);
        }
    }
}

#[test]
fn wrong_password_is_auth_failed() {
    // Password "pw" hides bytes 0x00..0x0F; "px" must never yield
    // plaintext.
    let p = payload("k", "application/octet-stream", &(0u8..16).collect::<Vec<_>>());
    let opts = HideOptions { encrypt: true, compress: false, ..HideOptions::default() };
    let stego = hide_image(cover(64, 64), &p, Some("pw"), &opts).unwrap();

    let ok = reveal_image(&stego, Some("pw")).unwrap();
    assert_eq!(ok.bytes, (0u8..16).collect::<Vec<_>>());

    assert!(matches!(
        reveal_image(&stego, Some("px")),
        Err(StegoError::AuthFailed)
    ));
}

#[test]
fn encrypted_reveal_without_password() {
    let p = payload("x", "text/plain", b"secret");
    let opts = HideOptions { encrypt: true, ..HideOptions::default() };
    let stego = hide_image(cover(64, 64), &p, Some("pw"), &opts).unwrap();
    assert!(matches!(
        reveal_image(&stego, None),
        Err(StegoError::MissingPassword)
    ));
}

#[test]
fn encrypt_without_password_rejected_on_hide() {
    let p = payload("x", "text/plain", b"secret");
    let opts = HideOptions { encrypt: true, ..HideOptions::default() };
    assert!(matches!(
        hide_image(cover(64, 64), &p, None, &opts),
        Err(StegoError::MissingPassword)
    ));
}

#[test]
fn compression_kept_only_when_smaller() {
    // Repetitive text shrinks: the COMPRESSED flag must be set.
    let compressible = payload("a.txt", "text/plain", &b"tick tock ".repeat(100));
    let opts = HideOptions { compress: true, ..HideOptions::default() };
    let got = reveal_image(
        &hide_image(cover(64, 64), &compressible, None, &opts).unwrap(),
        None,
    )
    .unwrap();
    assert!(got.was_compressed);
    assert_eq!(got.bytes, compressible.bytes);
    assert_eq!(got.original_size, 1000);

    // Pseudorandom bytes do not shrink: the flag must stay clear.
    let noisy = payload("b.bin", "application/octet-stream", &incompressible(200));
    let got = reveal_image(
        &hide_image(cover(64, 64), &noisy, None, &opts).unwrap(),
        None,
    )
    .unwrap();
    assert!(!got.was_compressed);
    assert_eq!(got.bytes, noisy.bytes);
}

#[test]
fn empty_payload_roundtrip() {
    // Name "a", mime "text/plain", empty content.
    let p = payload("a", "text/plain", b"");
    let opts = HideOptions { compress: false, ..HideOptions::default() };
    let stego = hide_image(cover(16, 16), &p, None, &opts).unwrap();

    // The wire prefix is fixed: magic, version 1, flags 0, name "a",
    // mime_len 10.
    let extracted: Vec<u8> = pixel::extract(&stego, 1, false).unwrap().take(15).collect();
    assert_eq!(
        extracted,
        [0x53, 0x54, 0x45, 0x47, 0x46, 0x49, 0x4C, 0x45, 0x01, 0x00, 0x00, 0x01, 0x61, 0x00, 0x0A]
    );

    let got = reveal_image(&stego, None).unwrap();
    assert_eq!(got.name, "a");
    assert_eq!(got.mime, "text/plain");
    assert!(got.bytes.is_empty());
    assert_eq!(got.original_size, 0);
}

#[test]
fn body_bytes_sit_after_header_and_size() {
    // Depth 2, RGB, no crypto: the four payload bytes appear verbatim
    // right after the header and the 4-byte body size.
    let p = payload("n", "m", &[0xDE, 0xAD, 0xBE, 0xEF]);
    let opts = HideOptions { encrypt: false, compress: false, depth: 2, use_alpha: false };
    let stego = hide_image(cover(16, 16), &p, None, &opts).unwrap();

    let skip = stegfile::header_overhead(1, 1, false);
    let body: Vec<u8> = pixel::extract(&stego, 2, false).unwrap().skip(skip).take(4).collect();
    assert_eq!(body, [0xDE, 0xAD, 0xBE, 0xEF]);
}

#[test]
fn mime_hint_flags_are_informational() {
    let p = payload("pic.png", "image/png", &incompressible(16));
    let opts = HideOptions { compress: false, ..HideOptions::default() };
    let stego = hide_image(cover(32, 32), &p, None, &opts).unwrap();
    // The IS_IMAGE bit rides in the flags byte (offset 9) and must not
    // disturb decoding.
    let flags = pixel::extract(&stego, 1, false).unwrap().nth(9).unwrap();
    assert_eq!(flags, 0x04);
    assert_eq!(reveal_image(&stego, None).unwrap().bytes, p.bytes);
}

#[test]
fn plain_hide_is_deterministic_and_idempotent() {
    let p = payload("d", "text/plain", b"same bits in, same bits out");
    let opts = HideOptions { compress: false, ..HideOptions::default() };
    let once = hide_image(cover(32, 32), &p, None, &opts).unwrap();
    let twice = hide_image(once.clone(), &p, None, &opts).unwrap();
    assert_eq!(once, twice);
}

#[test]
fn clean_image_has_no_container() {
    assert!(matches!(
        reveal_image(&cover(32, 32), None),
        Err(StegoError::BadMagic)
    ));
}

#[test]
fn legacy_marker_is_refused() {
    // An old-format carrier starts with "STEG" but not "STEGF".
    let mut img = cover(32, 32);
    pixel::embed(&mut img, b"STEGv0 legacy payload....", 1, false).unwrap();
    assert!(matches!(
        reveal_image(&img, None),
        Err(StegoError::LegacyFormat)
    ));
}

#[test]
fn oversized_payload_is_capacity_exceeded() {
    // 4x4 RGB at depth 1 holds 6 bytes; the header alone needs more.
    let p = payload("big", "application/octet-stream", &incompressible(100));
    let opts = HideOptions { compress: false, ..HideOptions::default() };
    assert!(matches!(
        hide_image(cover(4, 4), &p, None, &opts),
        Err(StegoError::CapacityExceeded { .. })
    ));
}

#[test]
fn reveal_survives_unicode_metadata() {
    let p = payload("übersicht 📄.pdf", "application/pdf", &incompressible(32));
    let opts = HideOptions { compress: false, depth: 3, ..HideOptions::default() };
    let got = reveal_image(&hide_image(cover(48, 48), &p, None, &opts).unwrap(), None).unwrap();
    assert_eq!(got.name, "übersicht 📄.pdf");
    assert_eq!(got.mime, "application/pdf");
}

#[test]
fn compressed_and_encrypted_together() {
    let p = payload("log.txt", "text/plain", &b"all work and no play ".repeat(200));
    let opts = HideOptions { encrypt: true, compress: true, depth: 2, use_alpha: true };
    let stego = hide_image(cover(64, 64), &p, Some("pass"), &opts).unwrap();
    let got = reveal_image(&stego, Some("pass")).unwrap();
    assert!(got.was_encrypted);
    assert!(got.was_compressed);
    assert_eq!(got.bytes, p.bytes);
    assert_eq!(got.original_size, 4200);
}
