//! Hex-collision resolution across a ramp pair.
//!
//! Both ramps are walked in a fixed order — the protected anchor shade
//! first, then each scale light-before-dark — and any shade whose clipped
//! hex was already claimed is perturbed until it lands on an unclaimed
//! one. Perturbation escalates from tiny lightness moves through
//! desaturation to small hue shifts, all deterministic; a seeded PRNG
//! band search plus a lightness micro-sweep guarantees termination. The
//! pass is the identity on an already-unique pair.

use std::collections::HashSet;

use tinct_color::Color;

use crate::scale::{Mode, Scale};

/// Deterministic perturbation attempts before the randomized fallback.
const MAX_ATTEMPTS: u32 = 10;
/// Lightness step per attempt level.
const LIGHTNESS_STEP: f32 = 0.008;
/// Chroma retention for early (1–3) and late (4+) attempts.
const DESAT_SLIGHT: f32 = 0.985;
const DESAT_STRONG: f32 = 0.95;
/// Hue degrees per attempt level past 6.
const HUE_STEP: f32 = 1.5;
/// Half-width of the randomized lightness band.
const BAND_HALF_WIDTH: f32 = 0.035;
/// Draws from the band before the exhaustive micro-sweep.
const MAX_DRAWS: u32 = 32;
/// Micro-sweep lightness increment.
const SWEEP_STEP: f32 = 0.002;

/// Resolve hex collisions in place across a ramp pair.
///
/// `protected` names the default-mode anchor shade, which claims its hex
/// first and is never moved. `floors` are the per-ramp saturation minima
/// (light, dark); grayscale pairs are perturbed in lightness only.
pub(crate) fn resolve(
    light: &mut [Color; Scale::COUNT],
    dark: &mut [Color; Scale::COUNT],
    floors: (Option<f32>, Option<f32>),
    protected: (Mode, usize),
    is_grayscale: bool,
) {
    let mut seen: HashSet<[u8; 3]> = HashSet::with_capacity(2 * Scale::COUNT);

    let anchor_hex = match protected.0 {
        Mode::Light => light[protected.1].rgb8(),
        Mode::Dark => dark[protected.1].rgb8(),
    };
    seen.insert(anchor_hex);

    for i in 0..Scale::COUNT {
        for mode in [Mode::Light, Mode::Dark] {
            if (mode, i) == protected {
                continue;
            }
            let (slot, floor) = match mode {
                Mode::Light => (&mut light[i], floors.0),
                Mode::Dark => (&mut dark[i], floors.1),
            };
            if seen.contains(&slot.rgb8()) {
                *slot = displace(*slot, i, mode, floor, is_grayscale, &seen);
            }
            seen.insert(slot.rgb8());
        }
    }
}

/// Perturbation direction for a scale position: away from the ramp
/// midpoint, so light shades stay light and dark shades stay dark.
/// Light ramps get lighter below the midpoint; dark ramps are flipped.
fn direction(index: usize, mode: Mode) -> f32 {
    let toward_light = index <= Scale::COUNT / 2;
    match mode {
        Mode::Light => {
            if toward_light {
                1.0
            } else {
                -1.0
            }
        }
        Mode::Dark => {
            if toward_light {
                -1.0
            } else {
                1.0
            }
        }
    }
}

/// Find an unclaimed hex for one colliding shade.
fn displace(
    color: Color,
    index: usize,
    mode: Mode,
    floor: Option<f32>,
    is_grayscale: bool,
    seen: &HashSet<[u8; 3]>,
) -> Color {
    let dir = direction(index, mode);
    for attempt in 1..=MAX_ATTEMPTS {
        let candidate = perturb(color, attempt, dir, floor, is_grayscale);
        if !seen.contains(&candidate.rgb8()) {
            log::debug!(
                "hex collision at {mode:?} index {index} resolved on attempt {attempt} ({} -> {})",
                color.hex(),
                candidate.hex()
            );
            return candidate;
        }
    }
    last_resort(color, index, mode, seen)
}

/// One deterministic perturbation; magnitude grows with the attempt
/// level.
fn perturb(color: Color, attempt: u32, dir: f32, floor: Option<f32>, is_grayscale: bool) -> Color {
    let level = attempt as f32;

    let mut c = color.with_lightness(LIGHTNESS_STEP.mul_add(level * dir, color.lightness()));
    if is_grayscale {
        // Grays must stay gray: lightness is the only degree of freedom.
        return c;
    }

    let retain = if attempt <= 3 { DESAT_SLIGHT } else { DESAT_STRONG };
    c = c.with_chroma((c.chroma() * retain).max(floor.unwrap_or(0.0)));
    if attempt > 6 {
        let shift = HUE_STEP * (attempt - 6) as f32 * dir;
        c = c.shift_hue(shift);
    }
    c
}

/// Randomized band search, then an exhaustive lightness sweep. The sweep
/// visits far more distinct byte lightnesses than a pair can occupy, so
/// an unclaimed hex always exists within range.
fn last_resort(color: Color, index: usize, mode: Mode, seen: &HashSet<[u8; 3]>) -> Color {
    let mut rng = Xorshift32::new(seed(color, index, mode));
    let center = color.lightness();

    for _ in 0..MAX_DRAWS {
        let l = rng
            .range_f32(center - BAND_HALF_WIDTH, center + BAND_HALF_WIDTH)
            .clamp(0.0, 1.0);
        let candidate = color.with_lightness(l);
        if !seen.contains(&candidate.rgb8()) {
            log::debug!(
                "hex collision at {mode:?} index {index} resolved by band search"
            );
            return candidate;
        }
    }

    for step in 1..=500_u32 {
        let offset = SWEEP_STEP * step as f32;
        for dir in [1.0_f32, -1.0] {
            let l = (center + dir * offset).clamp(0.0, 1.0);
            let candidate = color.with_lightness(l);
            if !seen.contains(&candidate.rgb8()) {
                log::debug!(
                    "hex collision at {mode:?} index {index} resolved by lightness sweep"
                );
                return candidate;
            }
        }
    }

    // 1000 sweep candidates against at most 21 claimed hexes; not reached.
    color
}

/// Stable per-shade seed from the clipped bytes, scale position and mode.
fn seed(color: Color, index: usize, mode: Mode) -> u32 {
    let [r, g, b] = color.rgb8();
    let mut s = (u32::from(r) << 16) | (u32::from(g) << 8) | u32::from(b);
    #[allow(clippy::cast_possible_truncation)]
    {
        s ^= (index as u32).wrapping_mul(0x9E37);
    }
    if mode == Mode::Dark {
        s ^= 0x8000_0000;
    }
    s
}

/// Minimal xorshift PRNG, plenty for tie-breaking.
struct Xorshift32 {
    state: u32,
}

impl Xorshift32 {
    fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 0xBAD5_EED5 } else { seed },
        }
    }

    fn next_u32(&mut self) -> u32 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        self.state
    }

    fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        let unit = self.next_u32() as f32 / u32::MAX as f32;
        (max - min).mul_add(unit, min)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tinct_color::Space;

    fn ramp_of(ls: [f32; Scale::COUNT]) -> [Color; Scale::COUNT] {
        ls.map(|l| Color::oklch(l, 0.1, 220.0))
    }

    fn all_unique(light: &[Color; Scale::COUNT], dark: &[Color; Scale::COUNT]) -> bool {
        let mut seen = HashSet::new();
        light.iter().chain(dark.iter()).all(|c| seen.insert(c.rgb8()))
    }

    #[test]
    fn unique_pair_is_untouched() {
        let mut light = ramp_of([
            0.98, 0.90, 0.82, 0.74, 0.66, 0.58, 0.50, 0.42, 0.34, 0.28, 0.22,
        ]);
        let mut dark = ramp_of([
            0.12, 0.18, 0.25, 0.32, 0.39, 0.46, 0.53, 0.60, 0.68, 0.76, 0.86,
        ]);
        let before_l = light.map(|c| c.rgb8());
        let before_d = dark.map(|c| c.rgb8());
        resolve(&mut light, &mut dark, (None, None), (Mode::Light, 5), false);
        assert_eq!(light.map(|c| c.rgb8()), before_l);
        assert_eq!(dark.map(|c| c.rgb8()), before_d);
    }

    #[test]
    fn collision_is_resolved_and_anchor_keeps_its_hex() {
        let mut light = ramp_of([
            0.98, 0.90, 0.82, 0.74, 0.66, 0.58, 0.50, 0.42, 0.34, 0.28, 0.22,
        ]);
        let mut dark = light;
        dark.reverse();
        let anchor_hex = light[5].rgb8();
        resolve(&mut light, &mut dark, (None, None), (Mode::Light, 5), false);
        assert!(all_unique(&light, &dark));
        assert_eq!(light[5].rgb8(), anchor_hex);
    }

    #[test]
    fn resolution_is_deterministic() {
        let build = || {
            let mut light = ramp_of([
                0.98, 0.90, 0.82, 0.74, 0.66, 0.58, 0.50, 0.42, 0.34, 0.28, 0.22,
            ]);
            let mut dark = light;
            dark.reverse();
            resolve(&mut light, &mut dark, (None, None), (Mode::Light, 5), false);
            (light.map(|c| c.rgb8()), dark.map(|c| c.rgb8()))
        };
        assert_eq!(build(), build());
    }

    #[test]
    fn resolved_pair_is_a_fixed_point() {
        let mut light = ramp_of([
            0.98, 0.90, 0.82, 0.74, 0.66, 0.58, 0.50, 0.42, 0.34, 0.28, 0.22,
        ]);
        let mut dark = light;
        dark.reverse();
        resolve(&mut light, &mut dark, (None, None), (Mode::Light, 5), false);
        let (snap_l, snap_d) = (light.map(|c| c.rgb8()), dark.map(|c| c.rgb8()));
        resolve(&mut light, &mut dark, (None, None), (Mode::Light, 5), false);
        assert_eq!(light.map(|c| c.rgb8()), snap_l);
        assert_eq!(dark.map(|c| c.rgb8()), snap_d);
    }

    #[test]
    fn grayscale_perturbation_stays_gray() {
        let gray = |l: f32| Color::new(Space::Oklch, l, 0.0, 0.0);
        let mut light = [
            gray(0.98),
            gray(0.90),
            gray(0.82),
            gray(0.74),
            gray(0.66),
            gray(0.58),
            gray(0.50),
            gray(0.42),
            gray(0.34),
            gray(0.28),
            gray(0.22),
        ];
        let mut dark = light;
        dark.reverse();
        resolve(&mut light, &mut dark, (None, None), (Mode::Light, 5), true);
        assert!(all_unique(&light, &dark));
        for c in light.iter().chain(dark.iter()) {
            let [r, g, b] = c.rgb8();
            assert!(r == g && g == b, "gray shade drifted: {:?}", c.rgb8());
        }
    }

    #[test]
    fn saturation_floor_is_respected() {
        let floor = 0.35;
        let sat = |l: f32| Color::hsl(226.0, 0.5, l);
        let mut light: [Color; Scale::COUNT] = [
            sat(0.98),
            sat(0.90),
            sat(0.82),
            sat(0.74),
            sat(0.66),
            sat(0.58),
            sat(0.50),
            sat(0.42),
            sat(0.34),
            sat(0.28),
            sat(0.22),
        ];
        let mut dark = light;
        dark.reverse();
        resolve(
            &mut light,
            &mut dark,
            (Some(floor), Some(floor)),
            (Mode::Light, 5),
            false,
        );
        assert!(all_unique(&light, &dark));
        for c in light.iter().chain(dark.iter()) {
            assert!(c.saturation() >= floor - 1e-6, "below floor: {}", c.saturation());
        }
    }

    #[test]
    fn xorshift_is_reproducible() {
        let mut a = Xorshift32::new(42);
        let mut b = Xorshift32::new(42);
        for _ in 0..16 {
            assert_eq!(a.next_u32(), b.next_u32());
        }
        let v = Xorshift32::new(7).range_f32(0.2, 0.4);
        assert!((0.2..=0.4).contains(&v));
    }
}
