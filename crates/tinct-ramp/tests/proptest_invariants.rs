//! Property-based invariant tests for the ramp pipeline.
//!
//! Verifies:
//! 1. Determinism: same base + options → byte-identical pair
//! 2. Cardinality: both ramps always hold exactly 11 swatches in order
//! 3. Uniqueness: no hex appears twice across the 22 swatches
//! 4. Monotonicity: background lightness strictly ordered per ramp
//! 5. Anchor fidelity: the default-mode ramp reproduces the base bytes
//! 6. Contrast honesty: meets_minimum agrees with the reported ratio
//! 7. Grayscale purity: gray bases yield gray shades in both ramps
//! 8. Export roundtrip: any pair's paired document survives JSON

use proptest::prelude::*;
use tinct_color::{Color, Space};
use tinct_ramp::export::{self, Format};
use tinct_ramp::{Mode, Options, RampPair, Scale};

// ── Strategy helpers ──────────────────────────────────────────────────

fn arb_rgb() -> impl Strategy<Value = [u8; 3]> {
    [any::<u8>(), any::<u8>(), any::<u8>()]
}

fn arb_space() -> impl Strategy<Value = Space> {
    prop_oneof![Just(Space::Oklch), Just(Space::Hsl)]
}

fn arb_options() -> impl Strategy<Value = Options> {
    (arb_space(), any::<bool>(), 0u8..=100).prop_map(|(space, dark_anchor, vibrancy)| Options {
        space,
        anchor: if dark_anchor { Mode::Dark } else { Mode::Light },
        vibrancy,
    })
}

fn pair_for(rgb: [u8; 3], options: &Options) -> RampPair {
    let base = Color::from_rgb8(options.space, rgb[0], rgb[1], rgb[2]);
    RampPair::generate(base, options)
}

// ── Properties ────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn determinism(rgb in arb_rgb(), options in arb_options()) {
        let a = pair_for(rgb, &options);
        let b = pair_for(rgb, &options);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn cardinality_and_order(rgb in arb_rgb(), options in arb_options()) {
        let pair = pair_for(rgb, &options);
        for ramp in [pair.light(), pair.dark()] {
            prop_assert_eq!(ramp.swatches().len(), Scale::COUNT);
            for (swatch, scale) in ramp.swatches().iter().zip(Scale::ALL) {
                prop_assert_eq!(swatch.scale, scale);
            }
        }
    }

    #[test]
    fn hex_uniqueness(rgb in arb_rgb(), options in arb_options()) {
        let pair = pair_for(rgb, &options);
        prop_assert!(pair.has_unique_hexes());
    }

    #[test]
    fn lightness_monotonicity(rgb in arb_rgb(), options in arb_options()) {
        let pair = pair_for(rgb, &options);
        prop_assert!(pair.light().is_monotonic());
        prop_assert!(pair.dark().is_monotonic());
    }

    #[test]
    fn anchor_fidelity(rgb in arb_rgb(), options in arb_options()) {
        let pair = pair_for(rgb, &options);
        let mode = options.anchor;
        let anchor = pair.anchor(mode);
        prop_assert_eq!(pair.ramp(mode).swatch(anchor).background.rgb8(), rgb);
    }

    #[test]
    fn contrast_honesty(rgb in arb_rgb(), options in arb_options()) {
        let pair = pair_for(rgb, &options);
        for ramp in [pair.light(), pair.dark()] {
            for swatch in ramp.swatches() {
                // The truncated ratio can sit a hair under the raw value,
                // never more than 0.01 away.
                if swatch.meets_minimum {
                    prop_assert!(swatch.contrast_ratio >= 4.5 - 0.01);
                } else {
                    prop_assert!(swatch.contrast_ratio < 4.5);
                }
            }
        }
    }

    #[test]
    fn grayscale_purity(v in any::<u8>(), options in arb_options()) {
        let pair = pair_for([v, v, v], &options);
        for ramp in [pair.light(), pair.dark()] {
            for swatch in ramp.swatches() {
                let [r, g, b] = swatch.background.rgb8();
                prop_assert!(r == g && g == b, "gray base produced {:?}", swatch.background);
            }
        }
    }

    #[test]
    fn paired_export_roundtrip(rgb in arb_rgb()) {
        let pair = pair_for(rgb, &Options::default());
        let doc = export::export(&pair, "c", "collection", Format::Paired);
        let back = export::import(&doc.to_json().unwrap()).unwrap();
        prop_assert_eq!(back, doc);
    }
}
