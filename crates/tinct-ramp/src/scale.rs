//! Core value types: the 11-step scale, swatches, ramps and ramp pairs.

use tinct_color::contrast::{contrast_vs_black, contrast_vs_white};
use tinct_color::{Color, Space};

// ─── Scale ───────────────────────────────────────────────────────────────────

/// One of the 11 fixed shade steps, loosely modeled on a Tailwind-style
/// scale. Fixed cardinality — never added to or removed from at runtime.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Scale {
    S50,
    S100,
    S200,
    S300,
    S400,
    S500,
    S600,
    S700,
    S800,
    S900,
    S950,
}

impl Scale {
    /// How many scales a ramp holds.
    pub const COUNT: usize = 11;

    /// All scales in canonical ascending order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::S50,
        Self::S100,
        Self::S200,
        Self::S300,
        Self::S400,
        Self::S500,
        Self::S600,
        Self::S700,
        Self::S800,
        Self::S900,
        Self::S950,
    ];

    /// The numeric identifier (50, 100, …, 950).
    #[must_use]
    pub const fn value(self) -> u16 {
        match self {
            Self::S50 => 50,
            Self::S100 => 100,
            Self::S200 => 200,
            Self::S300 => 300,
            Self::S400 => 400,
            Self::S500 => 500,
            Self::S600 => 600,
            Self::S700 => 700,
            Self::S800 => 800,
            Self::S900 => 900,
            Self::S950 => 950,
        }
    }

    /// Position in canonical order, 0 to 10.
    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::S50 => 0,
            Self::S100 => 1,
            Self::S200 => 2,
            Self::S300 => 3,
            Self::S400 => 4,
            Self::S500 => 5,
            Self::S600 => 6,
            Self::S700 => 7,
            Self::S800 => 8,
            Self::S900 => 9,
            Self::S950 => 10,
        }
    }

    /// The scale at a canonical-order position.
    #[must_use]
    pub const fn from_index(index: usize) -> Option<Self> {
        if index < Self::COUNT {
            Some(Self::ALL[index])
        } else {
            None
        }
    }

    /// The scale with a given numeric identifier.
    #[must_use]
    pub fn from_value(value: u16) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.value() == value)
    }
}

// ─── Mode ────────────────────────────────────────────────────────────────────

/// Which theme rendering a ramp targets.
///
/// Light ramps run light→dark with ascending scale; dark ramps are
/// reversed (Scale 950 is the near-white end).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Mode {
    #[default]
    Light,
    Dark,
}

impl Mode {
    /// The other mode.
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Display name matching the export schema's theme keys.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Light => "Light",
            Self::Dark => "Dark",
        }
    }
}

// ─── TextColor ───────────────────────────────────────────────────────────────

/// The text color chosen for a swatch — exactly black or white.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextColor {
    Black,
    White,
}

impl TextColor {
    /// WCAG contrast of this text color against a background.
    #[must_use]
    pub fn contrast_against(self, bg: Color) -> f64 {
        match self {
            Self::Black => contrast_vs_black(bg),
            Self::White => contrast_vs_white(bg),
        }
    }

    /// sRGB bytes of this text color.
    #[must_use]
    pub const fn rgb8(self) -> [u8; 3] {
        match self {
            Self::Black => [0, 0, 0],
            Self::White => [255, 255, 255],
        }
    }

    /// The lightness pole this text color reads best against.
    ///
    /// White text wants dark backgrounds (pole 0.0); black text wants
    /// light ones (pole 1.0).
    #[must_use]
    pub const fn favored_background_pole(self) -> f32 {
        match self {
            Self::Black => 1.0,
            Self::White => 0.0,
        }
    }
}

// ─── Swatch ──────────────────────────────────────────────────────────────────

/// One shade of a ramp: background color, chosen text color, and the
/// measured contrast between them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Swatch {
    pub scale: Scale,
    pub background: Color,
    pub text: TextColor,
    /// Contrast ratio truncated to 2 decimals for display stability.
    pub contrast_ratio: f64,
    /// Whether the raw ratio reached the 4.5:1 AA minimum.
    pub meets_minimum: bool,
}

// ─── Ramp ────────────────────────────────────────────────────────────────────

/// An 11-shade sequence derived from one base color for one mode.
///
/// Invariants (enforced by the pipeline, checkable via the helpers):
/// exactly 11 swatches in canonical scale order, strictly monotonic
/// background lightness in the mode's direction, no two swatches sharing
/// a background hex.
#[derive(Clone, Debug, PartialEq)]
pub struct Ramp {
    pub(crate) mode: Mode,
    pub(crate) space: Space,
    pub(crate) swatches: [Swatch; Scale::COUNT],
    /// Hue-profile saturation minimum; perturbation never desaturates a
    /// shade below this.
    pub(crate) saturation_floor: Option<f32>,
}

impl Ramp {
    #[inline]
    #[must_use]
    pub const fn mode(&self) -> Mode {
        self.mode
    }

    /// The working space this ramp's shades were generated in.
    #[inline]
    #[must_use]
    pub const fn space(&self) -> Space {
        self.space
    }

    #[inline]
    #[must_use]
    pub const fn saturation_floor(&self) -> Option<f32> {
        self.saturation_floor
    }

    /// The swatch at a scale.
    #[inline]
    #[must_use]
    pub const fn swatch(&self, scale: Scale) -> &Swatch {
        &self.swatches[scale.index()]
    }

    /// All 11 swatches in canonical scale order.
    #[inline]
    #[must_use]
    pub const fn swatches(&self) -> &[Swatch; Scale::COUNT] {
        &self.swatches
    }

    /// Whether background lightness is strictly monotonic in this mode's
    /// direction (light: descending with ascending scale; dark: ascending).
    #[must_use]
    pub fn is_monotonic(&self) -> bool {
        self.swatches.windows(2).all(|w| {
            let (a, b) = (w[0].background.lightness(), w[1].background.lightness());
            match self.mode {
                Mode::Light => a > b,
                Mode::Dark => a < b,
            }
        })
    }

    /// Whether no two swatches share a background hex.
    #[must_use]
    pub fn has_unique_hexes(&self) -> bool {
        let mut seen = std::collections::HashSet::new();
        self.swatches.iter().all(|s| seen.insert(s.background.rgb8()))
    }
}

// ─── RampPair ────────────────────────────────────────────────────────────────

/// The light-mode and dark-mode ramps generated together from the same
/// base color.
///
/// Invariants: no background hex appears in both ramps; the base color
/// equals (or is the nearest accessibility-adjusted variant of) the
/// background at its declared anchor scale in the default-mode ramp.
#[derive(Clone, Debug, PartialEq)]
pub struct RampPair {
    pub(crate) light: Ramp,
    pub(crate) dark: Ramp,
    pub(crate) base: Color,
    pub(crate) anchor_light: Scale,
    pub(crate) anchor_dark: Scale,
}

impl RampPair {
    #[inline]
    #[must_use]
    pub const fn light(&self) -> &Ramp {
        &self.light
    }

    #[inline]
    #[must_use]
    pub const fn dark(&self) -> &Ramp {
        &self.dark
    }

    /// The ramp for a mode.
    #[inline]
    #[must_use]
    pub const fn ramp(&self, mode: Mode) -> &Ramp {
        match mode {
            Mode::Light => &self.light,
            Mode::Dark => &self.dark,
        }
    }

    /// The parsed base color (in the pipeline's working space).
    #[inline]
    #[must_use]
    pub const fn base(&self) -> Color {
        self.base
    }

    /// The scale where a ramp sits closest to (or reproduces) the base.
    #[inline]
    #[must_use]
    pub const fn anchor(&self, mode: Mode) -> Scale {
        match mode {
            Mode::Light => self.anchor_light,
            Mode::Dark => self.anchor_dark,
        }
    }

    /// Whether no background hex appears twice across both ramps.
    #[must_use]
    pub fn has_unique_hexes(&self) -> bool {
        let mut seen = std::collections::HashSet::new();
        self.light
            .swatches
            .iter()
            .chain(self.dark.swatches.iter())
            .all(|s| seen.insert(s.background.rgb8()))
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_scales_in_order() {
        assert_eq!(Scale::ALL.len(), 11);
        for (i, s) in Scale::ALL.iter().enumerate() {
            assert_eq!(s.index(), i);
            assert_eq!(Scale::from_index(i), Some(*s));
            assert_eq!(Scale::from_value(s.value()), Some(*s));
        }
        assert!(Scale::ALL.windows(2).all(|w| w[0].value() < w[1].value()));
    }

    #[test]
    fn out_of_range_lookups() {
        assert_eq!(Scale::from_index(11), None);
        assert_eq!(Scale::from_value(150), None);
        assert_eq!(Scale::from_value(0), None);
    }

    #[test]
    fn mode_opposites() {
        assert_eq!(Mode::Light.opposite(), Mode::Dark);
        assert_eq!(Mode::Dark.opposite(), Mode::Light);
        assert_eq!(Mode::Light.name(), "Light");
    }

    #[test]
    fn text_color_contrast_matches_poles() {
        let dark_bg = Color::from_rgb8(Space::Oklch, 20, 20, 20);
        assert!(TextColor::White.contrast_against(dark_bg) > 15.0);
        assert!(TextColor::Black.contrast_against(dark_bg) < 2.0);
    }
}
