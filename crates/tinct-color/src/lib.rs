//! # tinct-color — color primitives for the tinct ramp engine
//!
//! One tagged [`Color`] value covers both working spaces (OKLCH and HSL):
//! space-labeled components plus a cached sRGB-clipped byte triple. All
//! conversion math is pure functions; every constructed color is already
//! in gamut, so bytes/hex and contrast measurement are always legal.
//!
//! ```text
//!   OKLCH ↔ Oklab ↔ Linear sRGB ↔ sRGB (bytes, hex)
//!   HSL ↔ sRGB
//! ```
//!
//! Parsing ([`parse`], [`parse_as`]) accepts hex, `rgb()`, bare triplets,
//! `hsl()`, `oklch()` and CSS named colors. Contrast ([`contrast`]) is
//! WCAG 2.1 relative luminance.

// Single-char math variables are standard in color science.
#![allow(clippy::many_single_char_names)]
// Hue/lightness/chroma variable names are inherently similar.
#![allow(clippy::similar_names)]

pub mod color;
pub mod contrast;
mod named;
pub mod parse;

pub use color::{Color, Space};
pub use parse::{parse, parse_as, ParseError};
