//! The tagged two-space `Color` value and its conversion math.
//!
//! A `Color` is immutable: constructors clamp and gamut-clip the incoming
//! components, then cache the sRGB byte triple. Every transform
//! (`with_lightness`, `mix`, …) builds a fresh value through the same
//! clipping path, so a `Color` in hand is always displayable and its hex
//! is always legal. Two colors are equal iff their cached bytes match —
//! that is the engine's collision test.
//!
//! Conversion pipeline:
//!
//!   OKLCH ↔ Oklab ↔ Linear sRGB ↔ sRGB     (Björn Ottosson's matrices)
//!   HSL ↔ sRGB                              (CSS piecewise formulas)

use std::fmt;
use std::hash::{Hash, Hasher};

// ─── Space ───────────────────────────────────────────────────────────────────

/// The working color space a [`Color`]'s components are expressed in.
///
/// The second component means chroma (0.0 to ~0.37) under `Oklch` and
/// saturation (0.0 to 1.0) under `Hsl`. Lightness is 0.0–1.0 and hue is
/// degrees in both.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Space {
    /// Perceptually uniform OKLCH. The default working space.
    #[default]
    Oklch,
    /// Classic HSL, used by the hue-profile dark ramps.
    Hsl,
}

// ─── Color ───────────────────────────────────────────────────────────────────

/// An immutable, gamut-clipped color in one of the two working spaces.
///
/// Components are space-tagged: `(lightness, chroma-or-saturation, hue)`.
/// The sRGB byte triple is computed once at construction and cached;
/// equality and hashing use only the cache, so "same color" means "same
/// `#RRGGBB`".
#[derive(Clone, Copy)]
pub struct Color {
    space: Space,
    l: f32,
    c: f32,
    h: f32,
    rgb: [u8; 3],
}

impl Color {
    // ─── Constructors ────────────────────────────────────────────────────

    /// Create a color from working-space components.
    ///
    /// Lightness is clamped to 0.0–1.0, hue normalized to [0, 360).
    /// OKLCH chroma is reduced (binary search) until the color fits the
    /// sRGB gamut; HSL saturation is clamped to 0.0–1.0.
    #[must_use]
    pub fn new(space: Space, l: f32, c: f32, h: f32) -> Self {
        let l = l.clamp(0.0, 1.0);
        let h = normalize_hue(h);
        match space {
            Space::Oklch => {
                let c = clip_oklch_chroma(l, c.max(0.0), h);
                let (r, g, b) = oklch_to_srgb(l, c, h);
                let rgb = [
                    to_u8(r.clamp(0.0, 1.0)),
                    to_u8(g.clamp(0.0, 1.0)),
                    to_u8(b.clamp(0.0, 1.0)),
                ];
                Self { space, l, c, h, rgb }
            }
            Space::Hsl => {
                let c = c.clamp(0.0, 1.0);
                let (r, g, b) = hsl_to_srgb(h, c, l);
                let rgb = [to_u8(r), to_u8(g), to_u8(b)];
                Self { space, l, c, h, rgb }
            }
        }
    }

    /// Create a color from OKLCH values (lightness, chroma, hue degrees).
    #[must_use]
    pub fn oklch(l: f32, c: f32, h: f32) -> Self {
        Self::new(Space::Oklch, l, c, h)
    }

    /// Create a color from HSL values in CSS argument order
    /// (hue degrees, saturation 0.0–1.0, lightness 0.0–1.0).
    #[must_use]
    pub fn hsl(h: f32, s: f32, l: f32) -> Self {
        Self::new(Space::Hsl, l, s, h)
    }

    /// Create a color from 8-bit sRGB values, deriving components in the
    /// requested working space.
    ///
    /// The byte triple is stored exactly as given — byte-level round trips
    /// through this constructor are lossless, which is what makes "the
    /// exact input hex" a meaningful anchor guarantee.
    #[must_use]
    pub fn from_rgb8(space: Space, r: u8, g: u8, b: u8) -> Self {
        let rf = f32::from(r) / 255.0;
        let gf = f32::from(g) / 255.0;
        let bf = f32::from(b) / 255.0;
        let (l, c, h) = match space {
            Space::Oklch => srgb_to_oklch(rf, gf, bf),
            Space::Hsl => {
                let (h, s, l) = srgb_to_hsl(rf, gf, bf);
                (l, s, h)
            }
        };
        Self { space, l, c, h, rgb: [r, g, b] }
    }

    // ─── Accessors ───────────────────────────────────────────────────────

    /// The working space this color's components live in.
    #[inline]
    #[must_use]
    pub const fn space(self) -> Space {
        self.space
    }

    /// Lightness, 0.0 to 1.0 (post-clipping).
    #[inline]
    #[must_use]
    pub const fn lightness(self) -> f32 {
        self.l
    }

    /// Chroma (OKLCH) or saturation (HSL), post-clipping.
    #[inline]
    #[must_use]
    pub const fn chroma(self) -> f32 {
        self.c
    }

    /// Saturation — alias for [`chroma`](Self::chroma) when reading HSL
    /// colors.
    #[inline]
    #[must_use]
    pub const fn saturation(self) -> f32 {
        self.c
    }

    /// Hue angle in degrees, [0, 360).
    #[inline]
    #[must_use]
    pub const fn hue(self) -> f32 {
        self.h
    }

    /// The cached sRGB byte triple.
    #[inline]
    #[must_use]
    pub const fn rgb8(self) -> [u8; 3] {
        self.rgb
    }

    /// Uppercase `#RRGGBB` rendering of the cached bytes.
    #[must_use]
    pub fn hex(self) -> String {
        let [r, g, b] = self.rgb;
        format!("#{r:02X}{g:02X}{b:02X}")
    }

    /// Whether this color has no visible chroma/saturation.
    #[inline]
    #[must_use]
    pub fn is_achromatic(self) -> bool {
        self.c.abs() < 1e-5
    }

    // ─── Transforms ──────────────────────────────────────────────────────
    //
    // All return a freshly clipped value; the receiver is never mutated.

    /// Replace lightness, keeping chroma/saturation and hue.
    #[must_use]
    pub fn with_lightness(self, l: f32) -> Self {
        Self::new(self.space, l, self.c, self.h)
    }

    /// Replace chroma/saturation, keeping lightness and hue.
    #[must_use]
    pub fn with_chroma(self, c: f32) -> Self {
        Self::new(self.space, self.l, c, self.h)
    }

    /// Replace the hue angle, keeping lightness and chroma/saturation.
    #[must_use]
    pub fn with_hue(self, h: f32) -> Self {
        Self::new(self.space, self.l, self.c, h)
    }

    /// Shift the hue by `degrees` (wraps around 360°).
    #[must_use]
    pub fn shift_hue(self, degrees: f32) -> Self {
        self.with_hue(self.h + degrees)
    }

    /// Re-derive this color's components in another working space.
    ///
    /// The byte triple is preserved exactly; only the component
    /// representation changes. Identity when `space` already matches.
    #[must_use]
    pub fn in_space(self, space: Space) -> Self {
        if self.space == space {
            return self;
        }
        let [r, g, b] = self.rgb;
        Self::from_rgb8(space, r, g, b)
    }

    /// Interpolate toward `other` in the shared working space.
    ///
    /// `t` = 0.0 returns `self`, `t` = 1.0 returns `other`. Hue takes the
    /// shortest path around the wheel; an achromatic endpoint adopts the
    /// other endpoint's hue. Both colors must be in the same space.
    #[must_use]
    pub fn mix(self, other: &Self, t: f32) -> Self {
        debug_assert_eq!(self.space, other.space, "mix requires a shared space");
        let t = t.clamp(0.0, 1.0);
        let inv_t = 1.0 - t;

        let h = if self.is_achromatic() {
            other.h
        } else if other.is_achromatic() {
            self.h
        } else {
            interpolate_hue(self.h, other.h, t)
        };

        Self::new(
            self.space,
            self.l.mul_add(inv_t, other.l * t),
            self.c.mul_add(inv_t, other.c * t),
            h,
        )
    }
}

impl PartialEq for Color {
    fn eq(&self, other: &Self) -> bool {
        self.rgb == other.rgb
    }
}

impl Eq for Color {}

impl Hash for Color {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rgb.hash(state);
    }
}

impl fmt::Debug for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.space {
            Space::Oklch => write!(
                f,
                "Color::oklch({:.4}, {:.4}, {:.1}) /* {} */",
                self.l,
                self.c,
                self.h,
                self.hex()
            ),
            Space::Hsl => write!(
                f,
                "Color::hsl({:.1}, {:.4}, {:.4}) /* {} */",
                self.h,
                self.c,
                self.l,
                self.hex()
            ),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.hex())
    }
}

// ─── Hue Helpers ─────────────────────────────────────────────────────────────

/// Normalize a hue angle to the range [0, 360).
#[inline]
#[must_use]
pub fn normalize_hue(h: f32) -> f32 {
    let h = h % 360.0;
    if h < 0.0 { h + 360.0 } else { h }
}

/// Absolute hue difference (shortest arc on the color wheel).
#[inline]
#[must_use]
pub fn hue_diff(a: f32, b: f32) -> f32 {
    let d = (a - b).abs() % 360.0;
    if d > 180.0 { 360.0 - d } else { d }
}

/// Interpolate between two hue angles taking the shortest path.
#[inline]
fn interpolate_hue(h1: f32, h2: f32, t: f32) -> f32 {
    let diff = h2 - h1;
    let diff = if diff > 180.0 {
        diff - 360.0
    } else if diff < -180.0 {
        diff + 360.0
    } else {
        diff
    };
    normalize_hue(diff.mul_add(t, h1))
}

// ─── OKLCH ↔ Oklab ──────────────────────────────────────────────────────────

/// Convert OKLCH chroma and hue to Oklab a, b components.
#[inline]
fn oklch_to_oklab_ab(c: f32, h: f32) -> (f32, f32) {
    let h_rad = h.to_radians();
    (c * h_rad.cos(), c * h_rad.sin())
}

/// Convert Oklab a, b components to OKLCH chroma and hue.
#[inline]
fn oklab_ab_to_oklch(a: f32, b: f32) -> (f32, f32) {
    let c = a.hypot(b);
    // Byte-derived grays carry ~1e-8 of matrix noise; treat them as
    // achromatic so their hue is a stable 0.
    let h = if c < 1e-6 {
        0.0 // Achromatic — hue is undefined, default to 0
    } else {
        let h = b.atan2(a).to_degrees();
        if h < 0.0 { h + 360.0 } else { h }
    };
    (c, h)
}

// ─── Oklab ↔ Linear sRGB ────────────────────────────────────────────────────
//
// The Oklab ↔ Linear sRGB conversion goes through an intermediate LMS
// (Long, Medium, Short cone response) space. The matrices are from Björn
// Ottosson's original specification.

/// Convert Oklab (L, a, b) to linear sRGB (may be out of range).
#[inline]
fn oklab_to_linear_srgb(l_ok: f32, a: f32, b: f32) -> (f32, f32, f32) {
    // Oklab → LMS (cube roots)
    let l_ = 0.215_803_76f32.mul_add(b, 0.396_337_78f32.mul_add(a, l_ok));
    let m_ = 0.063_854_17f32.mul_add(-b, 0.105_561_346f32.mul_add(-a, l_ok));
    let s_ = 1.291_485_5f32.mul_add(-b, 0.089_484_18f32.mul_add(-a, l_ok));

    // Undo cube root
    let l = l_ * l_ * l_;
    let m = m_ * m_ * m_;
    let s = s_ * s_ * s_;

    // LMS → Linear sRGB
    let r = 0.230_969_94f32.mul_add(s, 4.076_741_7f32.mul_add(l, -(3.307_711_6 * m)));
    let g = 0.341_319_38f32.mul_add(-s, (-1.268_438f32).mul_add(l, 2.609_757_4 * m));
    let bl = 1.707_614_7f32.mul_add(s, (-0.004_196_086_3f32).mul_add(l, -(0.703_418_6 * m)));

    (r, g, bl)
}

/// Convert linear sRGB to Oklab (L, a, b).
#[inline]
fn linear_srgb_to_oklab(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    // Linear sRGB → LMS
    let l = 0.051_445_995f32.mul_add(b, 0.412_221_47f32.mul_add(r, 0.536_332_55 * g));
    let m = 0.107_396_96f32.mul_add(b, 0.211_903_5f32.mul_add(r, 0.680_699_5 * g));
    let s = 0.629_978_7f32.mul_add(b, 0.088_302_46f32.mul_add(r, 0.281_718_84 * g));

    // Cube root (LMS → Oklab intermediate)
    let l_ = l.cbrt();
    let m_ = m.cbrt();
    let s_ = s.cbrt();

    let l_ok = 0.004_072_047f32.mul_add(-s_, 0.210_454_26f32.mul_add(l_, 0.793_617_8 * m_));
    let a = 0.450_593_7f32.mul_add(s_, 1.977_998_5f32.mul_add(l_, -(2.428_592_2 * m_)));
    let b_ok = 0.808_675_77f32.mul_add(-s_, 0.025_904_037f32.mul_add(l_, 0.782_771_77 * m_));

    (l_ok, a, b_ok)
}

// ─── Linear sRGB ↔ sRGB (Gamma) ─────────────────────────────────────────────

/// Convert a single linear sRGB component to sRGB (apply gamma).
#[inline]
#[must_use]
pub fn linear_to_srgb(c: f32) -> f32 {
    if c <= 0.003_130_8 {
        c * 12.92
    } else {
        1.055f32.mul_add(c.powf(1.0 / 2.4), -0.055)
    }
}

/// Convert a single sRGB component to linear sRGB (remove gamma).
#[inline]
#[must_use]
pub fn srgb_to_linear(c: f32) -> f32 {
    if c <= 0.040_45 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

// ─── Composite Conversions ───────────────────────────────────────────────────

/// Convert sRGB (0.0–1.0) → OKLCH.
fn srgb_to_oklch(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let lr = srgb_to_linear(r);
    let lg = srgb_to_linear(g);
    let lb = srgb_to_linear(b);
    let (l, a, b_ok) = linear_srgb_to_oklab(lr, lg, lb);
    let (c, h) = oklab_ab_to_oklch(a, b_ok);
    (l, c, h)
}

/// Convert OKLCH → sRGB (0.0–1.0, may be out of gamut).
fn oklch_to_srgb(l: f32, c: f32, h: f32) -> (f32, f32, f32) {
    let (a, b) = oklch_to_oklab_ab(c, h);
    let (lr, lg, lb) = oklab_to_linear_srgb(l, a, b);
    (linear_to_srgb(lr), linear_to_srgb(lg), linear_to_srgb(lb))
}

/// Whether the OKLCH triple maps inside the sRGB cube.
fn oklch_in_srgb_gamut(l: f32, c: f32, h: f32) -> bool {
    let (r, g, b) = oklch_to_srgb(l, c, h);
    (0.0..=1.0).contains(&r) && (0.0..=1.0).contains(&g) && (0.0..=1.0).contains(&b)
}

/// Reduce chroma until the OKLCH triple fits the sRGB gamut.
///
/// Binary search for the maximum in-gamut chroma, preserving lightness
/// and hue.
fn clip_oklch_chroma(l: f32, c: f32, h: f32) -> f32 {
    if oklch_in_srgb_gamut(l, c, h) {
        return c;
    }

    let mut lo: f32 = 0.0;
    let mut hi: f32 = c;
    for _ in 0..16 {
        let mid = (lo + hi) * 0.5;
        if oklch_in_srgb_gamut(l, mid, h) {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    lo
}

// ─── HSL ↔ sRGB ─────────────────────────────────────────────────────────────
//
// CSS piecewise formulas, with saturation and lightness as 0.0–1.0
// fractions. Always in gamut by construction.

/// Convert HSL (hue degrees, saturation 0–1, lightness 0–1) → sRGB (0–1).
fn hsl_to_srgb(h: f32, s: f32, l: f32) -> (f32, f32, f32) {
    if s <= 0.0 {
        return (l, l, l);
    }

    let h = normalize_hue(h);
    let c = (1.0 - 2.0f32.mul_add(l, -1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let (r, g, b) = match h as u32 {
        0..=59 => (c, x, 0.0),
        60..=119 => (x, c, 0.0),
        120..=179 => (0.0, c, x),
        180..=239 => (0.0, x, c),
        240..=299 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };

    (r + m, g + m, b + m)
}

/// Convert sRGB (0.0–1.0) → HSL (hue degrees, saturation 0–1, lightness 0–1).
fn srgb_to_hsl(r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let delta = max - min;

    let mut h = if delta < 1e-7 {
        0.0
    } else if (max - r).abs() < 1e-7 {
        60.0 * (((g - b) / delta) % 6.0)
    } else if (max - g).abs() < 1e-7 {
        60.0 * ((b - r) / delta + 2.0)
    } else {
        60.0 * ((r - g) / delta + 4.0)
    };
    if h < 0.0 {
        h += 360.0;
    }

    let l = (max + min) / 2.0;
    let s = if delta < 1e-7 {
        0.0
    } else {
        delta / (1.0 - 2.0f32.mul_add(l, -1.0).abs())
    };

    (h, s, l)
}

/// Convert a float (0.0–1.0) to a u8 (0–255) with correct rounding.
#[inline]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn to_u8(v: f32) -> u8 {
    // Safe: clamp guarantees 0.0 <= value <= 255.0 before truncation.
    v.mul_add(255.0, 0.5).clamp(0.0, 255.0) as u8
}

// ─── Tests ───────────────────────────────────────────────────────────────────
