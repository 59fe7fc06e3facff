//! Structural adjustment — the post-resolution cleanup pass.
//!
//! Collision resolution and contrast enforcement move individual shades
//! without regard for their neighbors, so this pass restores ramp-wide
//! structure: terminal dark shades forced light enough to read as a
//! near-white end, the dark 100 shade repositioned off the uniform grid,
//! minimum adjacent lightness separation re-established, light-mode 950
//! kept visually darker than 900, and any hex collisions reintroduced by
//! those moves swept away without disturbing the lightness ordering.

use std::collections::HashSet;

use tinct_color::contrast::contrast_vs_white;
use tinct_color::Color;

use crate::scale::{Mode, Scale};

/// Minimum lightness separation per adjacent scale pair (50/100 first).
/// Tight at the compressed ends, widest through the mid-tones.
pub(crate) const MIN_DELTAS: [f32; 10] = [
    0.015, 0.02, 0.03, 0.04, 0.05, 0.05, 0.04, 0.03, 0.02, 0.015,
];

/// Hard ceiling for separation pushes; pure white stays reserved.
const LIGHTNESS_CEILING: f32 = 0.995;
/// Dark-mode terminal shade floors.
const DARK_900_FLOOR: f32 = 0.90;
const DARK_950_FLOOR: f32 = 0.95;
/// Dark 100 sits a third of the way from 50 to 200.
const DARK_100_FRACTION: f32 = 0.33;
/// And keeps at least this far from both neighbors.
const DARK_100_MIN_SEP: f32 = 0.015;
/// Light-mode 950-vs-900 contrast repair: attempts and darkening step.
const CONTRAST_FIX_ATTEMPTS: u32 = 8;
const CONTRAST_FIX_STEP: f32 = 0.01;

/// Everything the adjuster must know beyond the shades themselves.
pub(crate) struct AdjustContext {
    /// The default-mode anchor shade, never moved.
    pub anchor: (Mode, usize),
    pub is_grayscale: bool,
    /// Per-ramp saturation minima (light, dark).
    pub floors: (Option<f32>, Option<f32>),
}

impl AdjustContext {
    fn is_anchor(&self, mode: Mode, index: usize) -> bool {
        self.anchor == (mode, index)
    }
}

/// Run the full adjustment pass over a ramp pair in place.
pub(crate) fn adjust(
    light: &mut [Color; Scale::COUNT],
    dark: &mut [Color; Scale::COUNT],
    ctx: &AdjustContext,
) {
    let pivot = |mode: Mode| (ctx.anchor.0 == mode).then_some(ctx.anchor.1);
    reposition_dark_100(dark, ctx);
    force_dark_terminals(dark, ctx);
    separate(light, Mode::Light, pivot(Mode::Light));
    separate(dark, Mode::Dark, pivot(Mode::Dark));
    order_light_950_contrast(light, ctx);
    uniqueness_sweep(light, dark, ctx);
}

/// Dark 100 moves off the uniform grid, a third of the way from 50 to
/// 200. The compressed dark end otherwise reads as three near-identical
/// shades.
fn reposition_dark_100(dark: &mut [Color; Scale::COUNT], ctx: &AdjustContext) {
    if ctx.is_anchor(Mode::Dark, 1) {
        return;
    }
    let lo = dark[0].lightness();
    let hi = dark[2].lightness();
    let window = hi - lo;
    if window <= 0.0 {
        return; // separation pass will untangle the ordering first
    }
    let target = if window < 2.0 * DARK_100_MIN_SEP {
        window.mul_add(0.5, lo)
    } else {
        window
            .mul_add(DARK_100_FRACTION, lo)
            .clamp(lo + DARK_100_MIN_SEP, hi - DARK_100_MIN_SEP)
    };
    dark[1] = dark[1].with_lightness(target);
}

/// The dark ramp's light end must read near-white: 900 at or above 0.90,
/// 950 at or above 0.95 (strict ordering restored by the separation
/// pass).
fn force_dark_terminals(dark: &mut [Color; Scale::COUNT], ctx: &AdjustContext) {
    if !ctx.is_anchor(Mode::Dark, 9) && dark[9].lightness() < DARK_900_FLOOR {
        dark[9] = dark[9].with_lightness(DARK_900_FLOOR);
    }
    if !ctx.is_anchor(Mode::Dark, 10) && dark[10].lightness() < DARK_950_FLOOR {
        dark[10] = dark[10].with_lightness(DARK_950_FLOOR);
    }
}

/// Re-establish minimum adjacent separation.
///
/// The walk radiates outward from `pivot` (the shade that must not
/// move — the anchor when this ramp holds it, the dark terminal
/// otherwise): shades lighter than the pivot are pushed up, shades
/// darker are pushed down, so the pivot itself is never displaced.
fn separate(colors: &mut [Color; Scale::COUNT], mode: Mode, pivot: Option<usize>) {
    let p = pivot.unwrap_or(match mode {
        Mode::Light => Scale::COUNT - 1,
        Mode::Dark => 0,
    });
    // The ceiling binds the whole ramp, not only shades this pass moves.
    // The pivot is exempt so an exact near-white base survives.
    for (i, c) in colors.iter_mut().enumerate() {
        if i != p && c.lightness() > LIGHTNESS_CEILING {
            *c = c.with_lightness(LIGHTNESS_CEILING);
        }
    }
    match mode {
        Mode::Light => {
            // Index 10 is darkest; lighter shades sit at lower indices.
            for i in (0..p).rev() {
                let min_l = colors[i + 1].lightness() + MIN_DELTAS[i];
                if colors[i].lightness() < min_l {
                    colors[i] = colors[i].with_lightness(min_l.min(LIGHTNESS_CEILING));
                }
            }
            for i in p + 1..Scale::COUNT {
                let max_l = colors[i - 1].lightness() - MIN_DELTAS[i - 1];
                if colors[i].lightness() > max_l {
                    colors[i] = colors[i].with_lightness(max_l.max(0.0));
                }
            }
        }
        Mode::Dark => {
            for i in p + 1..Scale::COUNT {
                let min_l = colors[i - 1].lightness() + MIN_DELTAS[i - 1];
                if colors[i].lightness() < min_l {
                    colors[i] = colors[i].with_lightness(min_l.min(LIGHTNESS_CEILING));
                }
            }
            for i in (0..p).rev() {
                let max_l = colors[i + 1].lightness() - MIN_DELTAS[i];
                if colors[i].lightness() > max_l {
                    colors[i] = colors[i].with_lightness(max_l.max(0.0));
                }
            }
        }
    }
}

/// Light-mode 950 must contrast more strongly against white than 900
/// does; perceived-luminance drift with hue can invert that even when
/// lightness is ordered. Darken 950 in small steps until the ordering
/// holds.
fn order_light_950_contrast(light: &mut [Color; Scale::COUNT], ctx: &AdjustContext) {
    if ctx.is_anchor(Mode::Light, 10) {
        return;
    }
    for _ in 0..CONTRAST_FIX_ATTEMPTS {
        if contrast_vs_white(light[10]) > contrast_vs_white(light[9]) {
            return;
        }
        light[10] = light[10].with_lightness(light[10].lightness() - CONTRAST_FIX_STEP);
    }
}

/// Final pair-wide uniqueness pass. Lightness structure is settled, so
/// collisions are repaired chroma-first, then hue, then hairline
/// lightness moves that stay inside the neighbor gap.
fn uniqueness_sweep(
    light: &mut [Color; Scale::COUNT],
    dark: &mut [Color; Scale::COUNT],
    ctx: &AdjustContext,
) {
    let mut seen: HashSet<[u8; 3]> = HashSet::with_capacity(2 * Scale::COUNT);
    let anchor_hex = match ctx.anchor.0 {
        Mode::Light => light[ctx.anchor.1].rgb8(),
        Mode::Dark => dark[ctx.anchor.1].rgb8(),
    };
    seen.insert(anchor_hex);

    for i in 0..Scale::COUNT {
        for mode in [Mode::Light, Mode::Dark] {
            if ctx.is_anchor(mode, i) {
                continue;
            }
            let (ramp, floor) = match mode {
                Mode::Light => (&mut *light, ctx.floors.0),
                Mode::Dark => (&mut *dark, ctx.floors.1),
            };
            if seen.contains(&ramp[i].rgb8()) {
                if let Some(fixed) = repair(ramp, i, floor, ctx.is_grayscale, &seen) {
                    ramp[i] = fixed;
                } else {
                    log::warn!(
                        "unresolvable hex collision left at {mode:?} index {i} ({})",
                        ramp[i].hex()
                    );
                }
            }
            seen.insert(ramp[i].rgb8());
        }
    }
}

/// Candidate search for one colliding shade. Returns the first variant
/// with an unclaimed hex whose lightness keeps strict ordering against
/// its immediate neighbors.
fn repair(
    ramp: &[Color; Scale::COUNT],
    i: usize,
    floor: Option<f32>,
    is_grayscale: bool,
    seen: &HashSet<[u8; 3]>,
) -> Option<Color> {
    let c = ramp[i];

    if !is_grayscale {
        for k in 1..=10_u32 {
            let delta = 0.004 * k as f32;
            for dir in [-1.0_f32, 1.0] {
                let chroma = c.chroma() + dir * delta;
                if chroma < floor.unwrap_or(0.0) {
                    continue;
                }
                let cand = c.with_chroma(chroma);
                if !seen.contains(&cand.rgb8()) {
                    return Some(cand);
                }
            }
        }
        for k in 1..=8_u32 {
            let delta = 0.7 * k as f32;
            for dir in [-1.0_f32, 1.0] {
                let cand = c.shift_hue(dir * delta);
                if !seen.contains(&cand.rgb8()) {
                    return Some(cand);
                }
            }
        }
    }

    // Hairline lightness moves: a candidate must sit on the same side of
    // each existing neighbor as the current shade does.
    let prev = (i > 0).then(|| ramp[i - 1].lightness());
    let next = (i + 1 < Scale::COUNT).then(|| ramp[i + 1].lightness());
    let keeps_order = |l: f32| {
        [prev, next].into_iter().flatten().all(|n| {
            (l - n).signum() == (c.lightness() - n).signum() && (l - n).abs() > 1e-4
        })
    };
    for k in 1..=20_u32 {
        let delta = 0.001 * k as f32;
        for dir in [-1.0_f32, 1.0] {
            let l = c.lightness() + dir * delta;
            if !keeps_order(l) {
                continue;
            }
            let cand = c.with_lightness(l);
            if !seen.contains(&cand.rgb8()) {
                return Some(cand);
            }
        }
    }
    None
}

// ─── Tests ───────────────────────────────────────────────────────────────────
