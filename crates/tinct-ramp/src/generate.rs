//! Raw ramp generation — one 11-shade sequence per mode, pre-accessibility.
//!
//! The generic path interpolates along a uniform lightness ladder between
//! a near-white and a near-black pole, holding hue and a working
//! chroma/saturation constant. The default-mode ramp interpolates in two
//! segments through the exact base color so the anchor shade reproduces
//! the input byte-for-byte; the secondary ramp is a single pass that only
//! reports its nearest scale. Grayscale input takes fixed neutral tables;
//! dark ramps for banded hues take their [`HueProfile`] instead.

use tinct_color::{Color, Space};

use crate::classify::{self, Classification};
use crate::scale::{Mode, Scale};

// ─── Tuned constants ─────────────────────────────────────────────────────────
//
// Empirically tuned; frozen for behavioral compatibility.

/// Near-white interpolation pole per working space.
const LIGHT_POLE_OKLCH: f32 = 0.985;
const LIGHT_POLE_HSL: f32 = 0.965;
/// Near-black interpolation pole per working space.
const DARK_POLE_OKLCH: f32 = 0.22;
const DARK_POLE_HSL: f32 = 0.16;

/// Neutral lightness-by-scale, light presentation (Scale 50 lightest).
const NEUTRAL_LIGHT: [f32; 11] = [
    0.985, 0.93, 0.85, 0.76, 0.66, 0.55, 0.44, 0.34, 0.25, 0.17, 0.10,
];
/// Neutral lightness-by-scale, reversed for dark presentation.
const NEUTRAL_DARK: [f32; 11] = [
    0.10, 0.15, 0.23, 0.32, 0.42, 0.53, 0.64, 0.75, 0.85, 0.92, 0.97,
];

/// Vibrancy chroma-compression factors by OKLCH hue family. Purples clip
/// out of sRGB early, so they get the least headroom; reds the most.
const COMPRESSION_PURPLE: f32 = 0.45;
const COMPRESSION_RED: f32 = 0.85;
const COMPRESSION_DEFAULT: f32 = 0.70;

/// Vibrancy bias endpoints: the per-shade boost grows from the light end
/// toward the dark end, where shades read as less colorful.
const LIGHT_POLE_BIAS: f32 = 0.05;
const DARK_POLE_BIAS: f32 = 0.15;

// ─── Output ──────────────────────────────────────────────────────────────────

/// A raw (pre-accessibility) shade sequence.
#[derive(Debug, Clone)]
pub struct RawRamp {
    /// Shades in canonical scale order.
    pub colors: [Color; Scale::COUNT],
    pub anchor: Scale,
    /// The working space the shades were built in. Differs from the
    /// pipeline space only on the hue-profile path (always HSL).
    pub space: Space,
    /// Hue-profile saturation minimum, when the profile path was taken.
    pub saturation_floor: Option<f32>,
}

// ─── Ladder ──────────────────────────────────────────────────────────────────

/// The interpolation poles (near-white, near-black) for a working space.
const fn poles(space: Space) -> (f32, f32) {
    match space {
        Space::Oklch => (LIGHT_POLE_OKLCH, DARK_POLE_OKLCH),
        Space::Hsl => (LIGHT_POLE_HSL, DARK_POLE_HSL),
    }
}

/// The mode's lightness ladder: 11 uniform steps in canonical scale
/// order. Light mode runs light→dark; dark mode is reversed.
pub(crate) fn ladder(mode: Mode, space: Space) -> [f32; Scale::COUNT] {
    let (light, dark) = poles(space);
    let (from, to) = match mode {
        Mode::Light => (light, dark),
        Mode::Dark => (dark, light),
    };
    let mut out = [0.0; Scale::COUNT];
    for (i, slot) in out.iter_mut().enumerate() {
        let t = i as f32 / (Scale::COUNT - 1) as f32;
        *slot = (to - from).mul_add(t, from);
    }
    out
}

/// Index of the entry nearest `lightness`, ties to the earlier scale.
fn nearest_index(table: &[f32; Scale::COUNT], lightness: f32) -> usize {
    let mut best = 0;
    let mut best_dist = f32::MAX;
    for (i, l) in table.iter().enumerate() {
        let dist = (l - lightness).abs();
        if dist < best_dist {
            best_dist = dist;
            best = i;
        }
    }
    best
}

// ─── Generation ──────────────────────────────────────────────────────────────

/// Produce the raw shade sequence for one mode.
///
/// `is_default` marks the ramp that must reproduce the exact base color
/// at its anchor scale. `vibrancy` (0–100) only affects chroma-bearing
/// input on the OKLCH generic path.
#[must_use]
pub fn generate(base: Color, mode: Mode, is_default: bool, space: Space, vibrancy: u8) -> RawRamp {
    debug_assert_eq!(base.space(), space, "base must be parsed into the pipeline space");
    let class = classify::classify(base);

    if class.is_grayscale {
        return generate_neutral(base, mode, is_default, space, &class);
    }
    if mode == Mode::Dark {
        if let Some(profile) = class.profile {
            return generate_profiled(base, is_default, profile);
        }
    }
    generate_generic(base, mode, is_default, space, vibrancy)
}

/// The generic interpolation path.
fn generate_generic(base: Color, mode: Mode, is_default: bool, space: Space, vibrancy: u8) -> RawRamp {
    let lad = ladder(mode, space);
    let anchor_idx = nearest_index(&lad, base.lightness());

    // Pole shades hold the base hue and chroma; construction clips them
    // to whatever the gamut allows at the pole lightnesses.
    let (light_l, dark_l) = poles(space);
    let light_pole = Color::new(space, light_l, base.chroma(), base.hue());
    let dark_pole = Color::new(space, dark_l, base.chroma(), base.hue());
    let (start, end) = match mode {
        Mode::Light => (light_pole, dark_pole),
        Mode::Dark => (dark_pole, light_pole),
    };

    let mut colors = Vec::with_capacity(Scale::COUNT);
    if is_default {
        // Two segments through the exact base: start → base over
        // anchor_idx+1 steps, then base → end over the rest.
        for i in 0..=anchor_idx {
            let t = if anchor_idx == 0 { 1.0 } else { i as f32 / anchor_idx as f32 };
            colors.push(start.mix(&base, t));
        }
        for i in anchor_idx + 1..Scale::COUNT {
            let t = (i - anchor_idx) as f32 / (Scale::COUNT - 1 - anchor_idx) as f32;
            colors.push(base.mix(&end, t));
        }
    } else {
        // Secondary ramp: one pass, the base is not injected.
        for i in 0..Scale::COUNT {
            colors.push(start.mix(&end, i as f32 / (Scale::COUNT - 1) as f32));
        }
    }

    let mut colors = finish(colors, &start, &end);
    if is_default {
        // Interpolation lands on the base's components; overwrite with the
        // value itself so the anchor bytes are exactly the input's.
        colors[anchor_idx] = base;
    }
    boost_chroma(
        &mut colors,
        base,
        mode,
        is_default.then_some(anchor_idx),
        space,
        vibrancy,
    );

    RawRamp {
        colors,
        anchor: Scale::ALL[anchor_idx],
        space,
        saturation_floor: None,
    }
}

/// Per-shade vibrancy boost, OKLCH generic path only.
///
/// Each shade asks for its boosted chroma and construction clips at that
/// shade's own lightness, so the boost shows wherever the gamut has
/// headroom and is a no-op where it doesn't. Lightness is untouched. The
/// bias grows toward the dark end; the exact-base anchor is left alone.
fn boost_chroma(
    colors: &mut [Color; Scale::COUNT],
    base: Color,
    mode: Mode,
    anchor: Option<usize>,
    space: Space,
    vibrancy: u8,
) {
    if space != Space::Oklch || vibrancy == 0 {
        return;
    }
    let vib = f32::from(vibrancy.min(100)) / 100.0;
    let boost = vib.mul_add(compression_factor(base.hue()), 1.0);
    for (i, slot) in colors.iter_mut().enumerate() {
        if anchor == Some(i) {
            continue;
        }
        let toward_dark = match mode {
            Mode::Light => i as f32 / (Scale::COUNT - 1) as f32,
            Mode::Dark => 1.0 - i as f32 / (Scale::COUNT - 1) as f32,
        };
        let bias = vib.mul_add(
            (DARK_POLE_BIAS - LIGHT_POLE_BIAS).mul_add(toward_dark, LIGHT_POLE_BIAS),
            1.0,
        );
        *slot = slot.with_chroma(slot.chroma() * boost * bias);
    }
}

/// Grayscale / pure-white / pure-black path: fixed neutral tables, zero
/// chroma, hue 0.
fn generate_neutral(
    base: Color,
    mode: Mode,
    is_default: bool,
    space: Space,
    class: &Classification,
) -> RawRamp {
    let table = match mode {
        Mode::Light => &NEUTRAL_LIGHT,
        Mode::Dark => &NEUTRAL_DARK,
    };

    // Pure inputs pin to their terminal scale; other grays anchor at the
    // nearest table lightness. The neutral tables are ordered, so both
    // reduce to a nearest-lightness search.
    let anchor_idx = if class.is_pure_white {
        nearest_index(table, 1.0)
    } else if class.is_pure_black {
        nearest_index(table, 0.0)
    } else {
        nearest_index(table, base.lightness())
    };

    let mut colors = [base; Scale::COUNT];
    for (slot, l) in colors.iter_mut().zip(table.iter()) {
        *slot = Color::new(space, *l, 0.0, 0.0);
    }
    if is_default {
        colors[anchor_idx] = base;
    }

    RawRamp {
        colors,
        anchor: Scale::ALL[anchor_idx],
        space,
        saturation_floor: None,
    }
}

/// Dark-mode hue-profile path: explicit lightness table and saturation
/// clamp, always in HSL.
fn generate_profiled(base: Color, is_default: bool, profile: &crate::profile::HueProfile) -> RawRamp {
    let hsl_base = base.in_space(Space::Hsl);
    let saturation = hsl_base
        .saturation()
        .clamp(profile.min_saturation, profile.max_saturation);

    let anchor_idx = nearest_index(&profile.lightness_by_scale, hsl_base.lightness());

    let mut colors = [hsl_base; Scale::COUNT];
    for (slot, l) in colors.iter_mut().zip(profile.lightness_by_scale.iter()) {
        *slot = Color::hsl(hsl_base.hue(), saturation, *l);
    }
    if is_default {
        colors[anchor_idx] = hsl_base;
    }

    RawRamp {
        colors,
        anchor: Scale::ALL[anchor_idx],
        space: Space::Hsl,
        saturation_floor: Some(profile.min_saturation),
    }
}

/// Vibrancy compression factor for an OKLCH hue.
fn compression_factor(hue: f32) -> f32 {
    if (260.0..330.0).contains(&hue) {
        COMPRESSION_PURPLE
    } else if hue < 45.0 || hue >= 345.0 {
        COMPRESSION_RED
    } else {
        COMPRESSION_DEFAULT
    }
}

/// Defensive structural check: anything but exactly 11 shades falls back
/// to a uniform start→end interpolation instead of raising.
fn finish(colors: Vec<Color>, start: &Color, end: &Color) -> [Color; Scale::COUNT] {
    match <[Color; Scale::COUNT]>::try_from(colors) {
        Ok(array) => array,
        Err(bad) => {
            log::warn!(
                "ramp assembly produced {} shades instead of {}; falling back to uniform interpolation",
                bad.len(),
                Scale::COUNT
            );
            let mut out = [*start; Scale::COUNT];
            for (i, slot) in out.iter_mut().enumerate() {
                let t = i as f32 / (Scale::COUNT - 1) as f32;
                *slot = start.mix(end, t);
            }
            out
        }
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn oklch_base(r: u8, g: u8, b: u8) -> Color {
        Color::from_rgb8(Space::Oklch, r, g, b)
    }

    fn lightnesses(raw: &RawRamp) -> Vec<f32> {
        raw.colors.iter().map(|c| c.lightness()).collect()
    }

    // ── Ladder ───────────────────────────────────────────────────────────

    #[test]
    fn ladder_spans_the_poles() {
        let l = ladder(Mode::Light, Space::Oklch);
        assert!((l[0] - LIGHT_POLE_OKLCH).abs() < 1e-6);
        assert!((l[10] - DARK_POLE_OKLCH).abs() < 1e-6);
        assert!(l.windows(2).all(|w| w[0] > w[1]), "light ladder descends");

        let d = ladder(Mode::Dark, Space::Hsl);
        assert!((d[0] - DARK_POLE_HSL).abs() < 1e-6);
        assert!((d[10] - LIGHT_POLE_HSL).abs() < 1e-6);
        assert!(d.windows(2).all(|w| w[0] < w[1]), "dark ladder ascends");
    }

    #[test]
    fn nearest_index_ties_to_earlier() {
        let table = [0.9, 0.7, 0.5, 0.3, 0.1, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0];
        // 0.8 is equidistant from 0.9 and 0.7.
        assert_eq!(nearest_index(&table, 0.8), 0);
        assert_eq!(nearest_index(&table, 0.55), 2);
    }

    // ── Generic path ─────────────────────────────────────────────────────

    #[test]
    fn default_ramp_passes_through_exact_base() {
        let base = oklch_base(0x34, 0x6B, 0x9C);
        let raw = generate(base, Mode::Light, true, Space::Oklch, 0);
        assert_eq!(raw.colors[raw.anchor.index()].rgb8(), base.rgb8());
    }

    #[test]
    fn secondary_ramp_does_not_inject_base() {
        // A base lightness chosen between ladder entries: the single-pass
        // ramp holds ladder lightnesses, so the base bytes cannot appear.
        let base = Color::oklch(0.57, 0.11, 150.0);
        let raw = generate(base, Mode::Light, false, Space::Oklch, 0);
        assert!(
            raw.colors.iter().all(|c| c.rgb8() != base.rgb8()),
            "secondary ramp reproduced the base exactly"
        );
    }

    #[test]
    fn light_ramp_descends_dark_ramp_ascends() {
        let base = oklch_base(0x34, 0x6B, 0x9C);
        let light = generate(base, Mode::Light, true, Space::Oklch, 0);
        let ll = lightnesses(&light);
        assert!(ll.windows(2).all(|w| w[0] > w[1]), "light: {ll:?}");

        // Green avoids the dark-mode hue profiles, keeping the generic path.
        let green = oklch_base(0x2E, 0x8B, 0x57);
        let dark = generate(green, Mode::Dark, false, Space::Oklch, 0);
        let dl = lightnesses(&dark);
        assert!(dl.windows(2).all(|w| w[0] < w[1]), "dark: {dl:?}");
    }

    #[test]
    fn hue_held_constant_across_generic_ramp() {
        let base = oklch_base(0x2E, 0x8B, 0x57);
        let raw = generate(base, Mode::Light, true, Space::Oklch, 0);
        for c in &raw.colors {
            assert!(
                tinct_color::color::hue_diff(c.hue(), base.hue()) < 1.0,
                "hue drifted: {} vs {}",
                c.hue(),
                base.hue()
            );
        }
    }

    #[test]
    fn anchor_tracks_base_lightness() {
        // Near-white base anchors near Scale 50 in light mode.
        let light = generate(Color::oklch(0.95, 0.03, 90.0), Mode::Light, true, Space::Oklch, 0);
        assert!(light.anchor.index() <= 1, "anchor was {:?}", light.anchor);

        // The same base anchors near 950 in dark mode (ladder reversed).
        let dark = generate(Color::oklch(0.95, 0.03, 90.0), Mode::Dark, true, Space::Oklch, 0);
        assert!(dark.anchor.index() >= 9, "anchor was {:?}", dark.anchor);
    }

    // ── Neutral path ─────────────────────────────────────────────────────

    #[test]
    fn gray_uses_neutral_tables() {
        let gray = oklch_base(0x80, 0x80, 0x80);
        let raw = generate(gray, Mode::Light, true, Space::Oklch, 0);
        for (c, l) in raw.colors.iter().zip(NEUTRAL_LIGHT.iter()) {
            if c.rgb8() == gray.rgb8() {
                continue; // the anchored exact input
            }
            assert!((c.lightness() - l).abs() < 1e-6);
            assert!(c.chroma() < 1e-4, "neutral shade acquired chroma");
            assert!(c.hue().abs() < 1e-6, "neutral shade acquired hue");
        }
    }

    #[test]
    fn gray_ignores_vibrancy() {
        let gray = oklch_base(0x80, 0x80, 0x80);
        let plain = generate(gray, Mode::Light, true, Space::Oklch, 0);
        let boosted = generate(gray, Mode::Light, true, Space::Oklch, 100);
        assert_eq!(
            plain.colors.map(|c| c.rgb8()),
            boosted.colors.map(|c| c.rgb8())
        );
    }

    #[test]
    fn pure_white_anchors_at_light_50() {
        let white = oklch_base(255, 255, 255);
        let raw = generate(white, Mode::Light, true, Space::Oklch, 0);
        assert_eq!(raw.anchor, Scale::S50);
        assert_eq!(raw.colors[0].rgb8(), [255, 255, 255]);
    }

    #[test]
    fn pure_black_anchors_at_darkest_scale() {
        let black = oklch_base(0, 0, 0);
        let light = generate(black, Mode::Light, true, Space::Oklch, 0);
        assert_eq!(light.anchor, Scale::S950);
        let dark = generate(black, Mode::Dark, true, Space::Oklch, 0);
        assert_eq!(dark.anchor, Scale::S50);
    }

    #[test]
    fn white_dark_ramp_950_is_near_white_not_white() {
        let white = oklch_base(255, 255, 255);
        let raw = generate(white, Mode::Dark, false, Space::Oklch, 0);
        let top = raw.colors[10];
        assert!(top.lightness() >= 0.95);
        assert_ne!(top.rgb8(), [255, 255, 255]);
    }

    // ── Profile path ─────────────────────────────────────────────────────

    #[test]
    fn banded_hue_dark_ramp_uses_profile() {
        let navy = oklch_base(0x17, 0x25, 0x54);
        let raw = generate(navy, Mode::Dark, false, Space::Oklch, 0);
        assert_eq!(raw.space, Space::Hsl);
        let floor = raw.saturation_floor.expect("profile floor");
        for c in &raw.colors {
            assert!(
                c.saturation() >= floor - 1e-6,
                "shade below band floor: {}",
                c.saturation()
            );
        }
        assert!(raw.colors[10].lightness() >= 0.95);
        assert!(raw.colors[10].lightness() > raw.colors[9].lightness());
    }

    #[test]
    fn banded_hue_light_ramp_stays_generic() {
        let navy = oklch_base(0x17, 0x25, 0x54);
        let raw = generate(navy, Mode::Light, true, Space::Oklch, 0);
        assert_eq!(raw.space, Space::Oklch);
        assert_eq!(raw.saturation_floor, None);
    }

    #[test]
    fn profiled_default_ramp_injects_exact_base() {
        let navy = oklch_base(0x17, 0x25, 0x54);
        let raw = generate(navy, Mode::Dark, true, Space::Oklch, 0);
        assert_eq!(raw.colors[raw.anchor.index()].rgb8(), navy.rgb8());
    }

    // ── Vibrancy ─────────────────────────────────────────────────────────

    #[test]
    fn compression_factors_by_hue_family() {
        assert!((compression_factor(290.0) - COMPRESSION_PURPLE).abs() < 1e-6);
        assert!((compression_factor(29.0) - COMPRESSION_RED).abs() < 1e-6);
        assert!((compression_factor(350.0) - COMPRESSION_RED).abs() < 1e-6);
        assert!((compression_factor(150.0) - COMPRESSION_DEFAULT).abs() < 1e-6);
    }

    #[test]
    fn vibrancy_boosts_chroma_where_gamut_allows() {
        // A mid-saturation teal has sRGB headroom at most lightnesses.
        let base = Color::oklch(0.62, 0.09, 195.0);
        let plain = generate(base, Mode::Light, true, Space::Oklch, 0);
        let boosted = generate(base, Mode::Light, true, Space::Oklch, 100);
        let sum = |r: &RawRamp| r.colors.iter().map(|c| f64::from(c.chroma())).sum::<f64>();
        assert!(
            sum(&boosted) > sum(&plain) + 0.05,
            "boost invisible: {} vs {}",
            sum(&boosted),
            sum(&plain)
        );
    }

    #[test]
    fn boost_never_reduces_any_shade() {
        // Boosted chroma clips back to at most the gamut limit at each
        // shade's own lightness, never below the unboosted value.
        for rgb in [[0xFF, 0x00, 0x00], [0x34, 0x6B, 0x9C], [0x2E, 0x8B, 0x57]] {
            let base = oklch_base(rgb[0], rgb[1], rgb[2]);
            let plain = generate(base, Mode::Light, true, Space::Oklch, 0);
            let boosted = generate(base, Mode::Light, true, Space::Oklch, 100);
            for (p, b) in plain.colors.iter().zip(boosted.colors.iter()) {
                assert!(
                    b.chroma() >= p.chroma() - 1e-6,
                    "{rgb:?}: boost reduced chroma {} -> {}",
                    p.chroma(),
                    b.chroma()
                );
            }
        }
    }

    #[test]
    fn hsl_space_ignores_vibrancy() {
        let base = Color::from_rgb8(Space::Hsl, 0x2E, 0x8B, 0x57);
        let plain = generate(base, Mode::Light, true, Space::Hsl, 0);
        let boosted = generate(base, Mode::Light, true, Space::Hsl, 100);
        assert_eq!(
            plain.colors.map(|c| c.rgb8()),
            boosted.colors.map(|c| c.rgb8()),
            "vibrancy must not touch the HSL pipeline"
        );
    }

    #[test]
    fn vibrancy_never_leaves_gamut() {
        // Construction clips; chroma must match what the bytes round-trip to.
        let base = oklch_base(0xFF, 0x00, 0x00);
        let boosted = generate(base, Mode::Light, true, Space::Oklch, 100);
        for c in &boosted.colors {
            let [r, g, b] = c.rgb8();
            let rt = Color::from_rgb8(Space::Oklch, r, g, b);
            assert!(
                (rt.chroma() - c.chroma()).abs() < 0.02,
                "shade out of gamut: stored {} round-trips to {}",
                c.chroma(),
                rt.chroma()
            );
        }
    }
}
