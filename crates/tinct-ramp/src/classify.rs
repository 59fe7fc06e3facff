//! Base-color classification — routes generation to its special branches.
//!
//! Grayscale and pure white/black inputs must never acquire spurious hue
//! or saturation, so they bypass interpolation entirely; hue-band matches
//! divert dark-mode generation to their [`HueProfile`]. Everything else
//! takes the generic path.

use tinct_color::{Color, Space};

use crate::profile::{self, HueProfile};

/// Chroma below this is grayscale in the OKLCH working space.
const GRAYSCALE_EPSILON_OKLCH: f32 = 0.01;
/// Saturation below this is grayscale in the HSL working space.
const GRAYSCALE_EPSILON_HSL: f32 = 0.04;

/// What the classifier learned about a base color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub is_grayscale: bool,
    pub is_pure_white: bool,
    pub is_pure_black: bool,
    /// The hue band covering the base's HSL hue, if any. Always `None`
    /// for grayscale input.
    pub profile: Option<&'static HueProfile>,
}

/// Classify a base color.
///
/// Grayscale is judged against the color's own working space epsilon;
/// pure white/black are exact clipped-byte matches (and also count as
/// grayscale). The profile lookup uses the HSL hue derived from the
/// clipped bytes, regardless of working space.
#[must_use]
pub fn classify(color: Color) -> Classification {
    let epsilon = match color.space() {
        Space::Oklch => GRAYSCALE_EPSILON_OKLCH,
        Space::Hsl => GRAYSCALE_EPSILON_HSL,
    };
    let is_pure_white = color.rgb8() == [255, 255, 255];
    let is_pure_black = color.rgb8() == [0, 0, 0];
    let is_grayscale = color.chroma() < epsilon || is_pure_white || is_pure_black;

    let profile = if is_grayscale {
        None
    } else {
        profile::lookup(color.in_space(Space::Hsl).hue())
    };

    Classification {
        is_grayscale,
        is_pure_white,
        is_pure_black,
        profile,
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
