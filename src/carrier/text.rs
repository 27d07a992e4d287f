// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only
// https://github.com/cgaffga/celare

//! Zero-width codec for text carriers.
//!
//! Exactly two code points carry information: `U+200B` (ZERO WIDTH SPACE)
//! is bit 0 and `U+200C` (ZERO WIDTH NON-JOINER) is bit 1. Every other
//! code point is transparent cover, so the hidden bytes survive being
//! pasted into and copied out of most chat surfaces.
//!
//! Encoding interleaves the invisible bit string with visible cover emoji
//! drawn from a theme, chunk by chunk, so the output looks like an
//! ordinary emoji message. Covers are split on extended grapheme cluster
//! boundaries; code-point splitting would tear apart ZWJ sequences,
//! skin-tone modifiers and flags.
//!
//! Decoding is the tolerant inverse: scan the text, keep only the two
//! carrier code points in encounter order, truncate stray bits to a
//! whole number of bytes and reassemble MSB-first.

use rand::Rng;
use unicode_segmentation::UnicodeSegmentation;

use crate::stego::error::StegoError;

/// ZERO WIDTH SPACE, carrying bit 0.
pub const BIT_ZERO: char = '\u{200B}';
/// ZERO WIDTH NON-JOINER, carrying bit 1.
pub const BIT_ONE: char = '\u{200C}';

/// Minimum number of visible cover graphemes per message.
const MIN_COVERS: usize = 12;
/// One cover grapheme per this many hidden bytes, above the minimum.
const BYTES_PER_COVER: usize = 16;

/// Built-in cover themes, plus `Custom` for a caller-supplied set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    Faces,
    Animals,
    Symbols,
    /// Superset of the three built-in lists.
    #[default]
    Mixed,
    /// Caller-supplied grapheme list; falls back to `Mixed` when empty.
    Custom,
}

const FACES: &[&str] = &[
    "😀", "😅", "😂", "🙂", "😉", "😍", "🤔", "😎", "🥳", "😴", "🤯", "🥹", "😇", "🤗", "😜",
    "🫠",
];

const ANIMALS: &[&str] = &[
    "🐶", "🐱", "🦊", "🐼", "🦉", "🐢", "🦋", "🐙", "🦜", "🐳", "🦔", "🐝", "🦩", "🐸", "🦥",
    "🐧",
];

const SYMBOLS: &[&str] = &[
    "✨", "🌈", "🔥", "🌊", "🍀", "🌙", "⭐", "🎈", "🎵", "⚡", "🧩", "🎯", "🪐", "🌻", "🍉",
    "🏳️‍🌈", "👩🏽‍🚀", "👍🏾",
];

/// The cover graphemes for a theme.
///
/// `Custom` splits the caller's string into extended grapheme clusters and
/// drops whitespace; an empty result falls back to `Mixed`.
pub fn cover_pool(theme: Theme, custom: Option<&str>) -> Vec<&str> {
    match theme {
        Theme::Faces => FACES.to_vec(),
        Theme::Animals => ANIMALS.to_vec(),
        Theme::Symbols => SYMBOLS.to_vec(),
        Theme::Mixed => FACES.iter().chain(ANIMALS).chain(SYMBOLS).copied().collect(),
        Theme::Custom => {
            let list: Vec<&str> = custom
                .unwrap_or("")
                .graphemes(true)
                .filter(|g| !g.trim().is_empty())
                .collect();
            if list.is_empty() {
                cover_pool(Theme::Mixed, None)
            } else {
                list
            }
        }
    }
}

/// Convert bytes to the invisible bit characters, MSB-first per byte.
fn to_invisible(body: &[u8]) -> Vec<char> {
    let mut out = Vec::with_capacity(body.len() * 8);
    for &byte in body {
        for bit_pos in (0..8).rev() {
            out.push(if (byte >> bit_pos) & 1 == 0 { BIT_ZERO } else { BIT_ONE });
        }
    }
    out
}

/// Interleave hidden bytes with random cover graphemes from the pool.
///
/// Uses `E = max(12, ceil(len / 16))` covers; the invisible string is cut
/// into `E` chunks of `ceil(bits / E)` characters, each appended after its
/// cover. Rounding leftovers trail the final cover.
pub fn weave(body: &[u8], pool: &[&str], rng: &mut impl Rng) -> String {
    let covers = MIN_COVERS.max(body.len().div_ceil(BYTES_PER_COVER));
    let invisible = to_invisible(body);
    let chunk = invisible.len().div_ceil(covers);

    let mut out = String::with_capacity(invisible.len() * 3 + covers * 4);
    let mut cursor = 0;
    for _ in 0..covers {
        out.push_str(pool[rng.gen_range(0..pool.len())]);
        let end = invisible.len().min(cursor + chunk);
        out.extend(&invisible[cursor..end]);
        cursor = end;
    }
    out.extend(&invisible[cursor..]);
    out
}

/// Recover hidden bytes from arbitrary text.
///
/// Collects the two carrier code points in encounter order, ignores
/// everything else, truncates to a whole number of bytes and reassembles
/// MSB-first.
///
/// # Errors
/// [`StegoError::NoHiddenData`] when the text contains no carrier code
/// points at all.
pub fn extract(text: &str) -> Result<Vec<u8>, StegoError> {
    let mut bits = Vec::new();
    for ch in text.chars() {
        match ch {
            BIT_ZERO => bits.push(0u8),
            BIT_ONE => bits.push(1u8),
            _ => {}
        }
    }
    if bits.is_empty() {
        return Err(StegoError::NoHiddenData);
    }

    // Tolerant salvage: drop stray trailing bits.
    bits.truncate(bits.len() - bits.len() % 8);

    let mut out = Vec::with_capacity(bits.len() / 8);
    for chunk in bits.chunks_exact(8) {
        let mut byte = 0u8;
        for &bit in chunk {
            byte = (byte << 1) | bit;
        }
        out.push(byte);
    }
    Ok(out)
}
