//! Hue profiles — declarative dark-mode overrides for problem hues.
//!
//! Certain hue bands (deep blues, purples, reds) go muddy or neon when a
//! dark ramp is built by generic lightness interpolation: the sRGB gamut
//! is thin there and perceived brightness drifts with hue. Each band gets
//! a saturation clamp and an explicit lightness-by-scale table instead.
//! Adding or tuning a band is a data edit, not a logic change.
//!
//! Bands are denominated in HSL hue degrees and may wrap through 0°/360°.

/// A hue band with its dark-mode generation overrides.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HueProfile {
    pub name: &'static str,
    /// Band start in HSL degrees (inclusive).
    pub hue_min: f32,
    /// Band end in HSL degrees (inclusive). When `hue_min > hue_max` the
    /// band wraps through 0°/360°.
    pub hue_max: f32,
    /// Saturation clamp applied across the whole dark ramp. The minimum
    /// also becomes the ramp's perturbation floor.
    pub min_saturation: f32,
    pub max_saturation: f32,
    /// HSL lightness per scale in dark presentation order (Scale 50 first,
    /// ascending to the near-white 950).
    pub lightness_by_scale: [f32; 11],
}

/// The static band table. Consulted only for dark-mode generation.
///
/// Adjacent-entry gaps in every lightness table stay at or above twice
/// the continuity deltas, so anchoring the exact base inside a table
/// never collapses a pair below its minimum spacing.
pub const PROFILES: &[HueProfile] = &[
    HueProfile {
        name: "red",
        hue_min: 350.0,
        hue_max: 30.0,
        min_saturation: 0.42,
        max_saturation: 0.92,
        lightness_by_scale: [
            0.100, 0.145, 0.210, 0.290, 0.390, 0.500, 0.610, 0.710, 0.810, 0.910, 0.960,
        ],
    },
    HueProfile {
        name: "blue",
        hue_min: 205.0,
        hue_max: 255.0,
        min_saturation: 0.35,
        max_saturation: 0.90,
        lightness_by_scale: [
            0.110, 0.150, 0.215, 0.300, 0.400, 0.510, 0.620, 0.720, 0.820, 0.915, 0.965,
        ],
    },
    HueProfile {
        name: "purple",
        hue_min: 255.0,
        hue_max: 290.0,
        min_saturation: 0.40,
        max_saturation: 0.85,
        lightness_by_scale: [
            0.120, 0.160, 0.225, 0.310, 0.410, 0.520, 0.630, 0.730, 0.825, 0.920, 0.970,
        ],
    },
    HueProfile {
        name: "magenta",
        hue_min: 290.0,
        hue_max: 340.0,
        min_saturation: 0.38,
        max_saturation: 0.88,
        lightness_by_scale: [
            0.105, 0.150, 0.215, 0.295, 0.395, 0.505, 0.615, 0.715, 0.815, 0.910, 0.960,
        ],
    },
];

/// Look up the band covering an HSL hue, if any.
#[must_use]
pub fn lookup(hue: f32) -> Option<&'static HueProfile> {
    let hue = tinct_color::color::normalize_hue(hue);
    PROFILES.iter().find(|p| {
        if p.hue_min <= p.hue_max {
            (p.hue_min..=p.hue_max).contains(&hue)
        } else {
            // Wrapping band, e.g. red's 350° → 30°.
            hue >= p.hue_min || hue <= p.hue_max
        }
    })
}

// ─── Tests ───────────────────────────────────────────────────────────────────
