//! The generation pipeline: one base color in, a light/dark ramp pair out.
//!
//! Stages run in a fixed order — classify, generate both raw ramps,
//! enforce per-shade contrast, resolve hex collisions, structural
//! adjustment, then a final measure-only pass so every swatch reports
//! the contrast of the shade that actually ships.

use tinct_color::Color;
use tinct_color::Space;

use crate::adjust::{self, AdjustContext};
use crate::classify;
use crate::enforce;
use crate::generate;
use crate::resolve;
use crate::scale::{Mode, Ramp, RampPair, Scale, Swatch};

// ─── Options ─────────────────────────────────────────────────────────────────

/// Pipeline knobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Options {
    /// Working color space for generation and interpolation.
    pub space: Space,
    /// Which mode's ramp reproduces the base color exactly at its anchor.
    pub anchor: Mode,
    /// Chroma boost, 0–100. Zero leaves the base's chroma untouched.
    pub vibrancy: u8,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            space: Space::Oklch,
            anchor: Mode::Light,
            vibrancy: 0,
        }
    }
}

// ─── Warnings ────────────────────────────────────────────────────────────────

/// A swatch that finished the pipeline below the AA minimum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ContrastWarning {
    pub mode: Mode,
    pub scale: Scale,
    /// The truncated ratio the swatch actually achieved.
    pub ratio: f64,
}

// ─── Pipeline ────────────────────────────────────────────────────────────────

impl RampPair {
    /// Generate the light and dark ramps for a base color.
    ///
    /// Deterministic: the same base and options always produce the same
    /// pair.
    #[must_use]
    pub fn generate(base: Color, options: &Options) -> Self {
        let base = base.in_space(options.space);
        let class = classify::classify(base);

        let raw_light = generate::generate(
            base,
            Mode::Light,
            options.anchor == Mode::Light,
            options.space,
            options.vibrancy,
        );
        let raw_dark = generate::generate(
            base,
            Mode::Dark,
            options.anchor == Mode::Dark,
            options.space,
            options.vibrancy,
        );

        let mut light_colors = raw_light.colors;
        let mut dark_colors = raw_dark.colors;
        for i in 0..Scale::COUNT {
            light_colors[i] = enforce::enforce(Scale::ALL[i], light_colors[i]).background;
            dark_colors[i] = enforce::enforce(Scale::ALL[i], dark_colors[i]).background;
        }

        let anchor_index = match options.anchor {
            Mode::Light => raw_light.anchor.index(),
            Mode::Dark => raw_dark.anchor.index(),
        };
        let protected = (options.anchor, anchor_index);
        let floors = (raw_light.saturation_floor, raw_dark.saturation_floor);

        resolve::resolve(
            &mut light_colors,
            &mut dark_colors,
            floors,
            protected,
            class.is_grayscale,
        );
        adjust::adjust(
            &mut light_colors,
            &mut dark_colors,
            &AdjustContext {
                anchor: protected,
                is_grayscale: class.is_grayscale,
                floors,
            },
        );

        // Adjustment may have moved backgrounds after enforcement ran, so
        // text choice and ratios are re-measured from the final shades.
        let light = Ramp {
            mode: Mode::Light,
            space: raw_light.space,
            swatches: measure_all(&light_colors),
            saturation_floor: raw_light.saturation_floor,
        };
        let dark = Ramp {
            mode: Mode::Dark,
            space: raw_dark.space,
            swatches: measure_all(&dark_colors),
            saturation_floor: raw_dark.saturation_floor,
        };

        Self {
            light,
            dark,
            base,
            anchor_light: raw_light.anchor,
            anchor_dark: raw_dark.anchor,
        }
    }

    /// Every swatch that ended below the AA minimum, light ramp first.
    #[must_use]
    pub fn contrast_warnings(&self) -> Vec<ContrastWarning> {
        let collect = |ramp: &Ramp| {
            ramp.swatches
                .iter()
                .filter(|s| !s.meets_minimum)
                .map(|s| ContrastWarning {
                    mode: ramp.mode,
                    scale: s.scale,
                    ratio: s.contrast_ratio,
                })
                .collect::<Vec<_>>()
        };
        let mut warnings = collect(&self.light);
        warnings.extend(collect(&self.dark));
        warnings
    }
}

fn measure_all(colors: &[Color; Scale::COUNT]) -> [Swatch; Scale::COUNT] {
    std::array::from_fn(|i| enforce::measure(Scale::ALL[i], colors[i]))
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Color {
        Color::from_rgb8(Space::Oklch, 0x34, 0x6B, 0x9C)
    }

    #[test]
    fn pipeline_produces_structured_pair() {
        let pair = RampPair::generate(base(), &Options::default());
        assert!(pair.light().is_monotonic());
        assert!(pair.dark().is_monotonic());
        assert!(pair.has_unique_hexes());
    }

    #[test]
    fn default_anchor_reproduces_base_bytes() {
        let pair = RampPair::generate(base(), &Options::default());
        let anchor = pair.anchor(Mode::Light);
        assert_eq!(
            pair.light().swatch(anchor).background.rgb8(),
            base().rgb8()
        );
    }

    #[test]
    fn dark_anchor_option_moves_the_exact_copy() {
        let opts = Options {
            anchor: Mode::Dark,
            ..Options::default()
        };
        // Green stays on the generic dark path (no hue profile).
        let green = Color::from_rgb8(Space::Oklch, 0x2E, 0x8B, 0x57);
        let pair = RampPair::generate(green, &opts);
        let anchor = pair.anchor(Mode::Dark);
        assert_eq!(pair.dark().swatch(anchor).background.rgb8(), green.rgb8());
    }

    #[test]
    fn no_warnings_at_the_aa_threshold() {
        for rgb in [[0x34, 0x6B, 0x9C], [0x80, 0x80, 0x80], [0xFF, 0x00, 0x00]] {
            let c = Color::from_rgb8(Space::Oklch, rgb[0], rgb[1], rgb[2]);
            let pair = RampPair::generate(c, &Options::default());
            assert!(
                pair.contrast_warnings().is_empty(),
                "warnings for {rgb:?}: {:?}",
                pair.contrast_warnings()
            );
        }
    }

    #[test]
    fn generation_is_deterministic() {
        let a = RampPair::generate(base(), &Options::default());
        let b = RampPair::generate(base(), &Options::default());
        assert_eq!(a, b);
    }

    #[test]
    fn hsl_space_option_flows_through() {
        let opts = Options {
            space: Space::Hsl,
            ..Options::default()
        };
        let pair = RampPair::generate(Color::from_rgb8(Space::Hsl, 0x2E, 0x8B, 0x57), &opts);
        assert_eq!(pair.light().space(), Space::Hsl);
        assert!(pair.light().is_monotonic());
    }
}
