//! # tinct-ramp — Accessible Color Ramp Engine
//!
//! Turns one base color into a light-mode and a dark-mode 11-step scale
//! with WCAG-validated text pairings. The base color survives generation
//! byte-for-byte at its anchor shade in the default-mode ramp; every
//! other shade is derived, de-duplicated, and contrast-checked.
//!
//! # Pipeline
//!
//! ```text
//! base Color + Options (space, anchor mode, vibrancy)
//!     │
//!     ▼
//! classify.rs: grayscale / pure poles / hue-profile routing
//!     │
//!     ▼
//! generate.rs: raw 11-shade ramps (ladder interpolation, neutral
//!              tables, dark-mode hue profiles, vibrancy boost)
//!     │
//!     ▼
//! enforce.rs:  per-shade text color + WCAG AA contrast
//!     │
//!     ▼
//! resolve.rs:  pair-wide hex de-duplication (deterministic, seeded
//!              fallback)
//!     │
//!     ▼
//! adjust.rs:   terminal forcing, dark-100 repositioning, minimum
//!              lightness separation, final uniqueness sweep
//!     │
//!     ▼
//! pair.rs:     re-measured swatches assembled into a RampPair
//! ```
//!
//! # Color Space
//!
//! Generation runs in OKLCH (perceptually uniform) by default, or HSL on
//! request; dark-mode ramps for profiled hue bands are always built in
//! HSL. Every shade carries its clipped sRGB bytes, and all equality is
//! on those bytes.

// Hue/lightness/chroma variable names are inherently similar.
#![allow(clippy::similar_names)]
// Small integer-to-float casts (loop indices, attempt levels).
#![allow(clippy::cast_precision_loss)]

mod adjust;
pub mod classify;
pub mod enforce;
pub mod export;
pub mod generate;
pub mod pair;
pub mod profile;
mod resolve;
pub mod scale;

pub use classify::{classify, Classification};
pub use pair::{ContrastWarning, Options};
pub use profile::HueProfile;
pub use scale::{Mode, Ramp, RampPair, Scale, Swatch, TextColor};
