//! Per-swatch contrast enforcement.
//!
//! Each shade gets the better of black or white text; if the pairing
//! still misses the minimum ratio, the background lightness is nudged
//! toward the text color's favored pole in shrinking steps. At the WCAG
//! AA threshold one of the two poles always clears 4.5:1 for any sRGB
//! background, so the nudge loop is a safety net for callers raising the
//! bar via [`enforce_with`].

use tinct_color::contrast::{truncate_ratio, AA_NORMAL_TEXT};
use tinct_color::Color;

use crate::scale::{Scale, Swatch, TextColor};

/// Maximum lightness nudges before forcing the background.
const MAX_NUDGES: u32 = 20;
/// Fraction of the remaining pole distance covered per nudge.
const NUDGE_FRACTION: f32 = 0.1;
/// Forced background lightness when white text still fails.
const FORCED_DARK_LIGHTNESS: f32 = 0.25;
/// Forced background lightness when black text still fails.
const FORCED_LIGHT_LIGHTNESS: f32 = 0.90;

/// Pick the better text color for a background. Black wins ties.
#[must_use]
pub fn pick_text(background: Color) -> TextColor {
    let black = TextColor::Black.contrast_against(background);
    let white = TextColor::White.contrast_against(background);
    if white > black {
        TextColor::White
    } else {
        TextColor::Black
    }
}

/// Measure a background as-is: text choice, truncated ratio, AA flag.
/// Never alters the background.
#[must_use]
pub fn measure(scale: Scale, background: Color) -> Swatch {
    let text = pick_text(background);
    let ratio = text.contrast_against(background);
    Swatch {
        scale,
        background,
        text,
        contrast_ratio: truncate_ratio(ratio),
        meets_minimum: ratio >= AA_NORMAL_TEXT,
    }
}

/// Enforce the WCAG AA normal-text minimum on one shade.
#[must_use]
pub fn enforce(scale: Scale, background: Color) -> Swatch {
    enforce_with(scale, background, AA_NORMAL_TEXT)
}

/// Enforce an arbitrary minimum ratio on one shade.
///
/// The text color is re-picked after every nudge; the best pairing seen
/// is kept, so an unreachable ratio degrades to the closest attempt with
/// `meets_minimum` false rather than an arbitrary endpoint.
#[must_use]
pub fn enforce_with(scale: Scale, background: Color, min_ratio: f64) -> Swatch {
    let mut bg = background;
    let mut text = pick_text(bg);
    let mut ratio = text.contrast_against(bg);

    let mut best = (bg, text, ratio);

    let mut nudges = 0;
    while ratio < min_ratio && nudges < MAX_NUDGES {
        let pole = text.favored_background_pole();
        let step = (pole - bg.lightness()) * NUDGE_FRACTION;
        bg = bg.with_lightness(bg.lightness() + step);
        text = pick_text(bg);
        ratio = text.contrast_against(bg);
        if ratio > best.2 {
            best = (bg, text, ratio);
        }
        nudges += 1;
    }

    if ratio < min_ratio {
        // Last resort: jump to a known-good lightness for the text color.
        let forced_l = match text {
            TextColor::White => FORCED_DARK_LIGHTNESS,
            TextColor::Black => FORCED_LIGHT_LIGHTNESS,
        };
        let forced = bg.with_lightness(forced_l);
        let forced_text = pick_text(forced);
        let forced_ratio = forced_text.contrast_against(forced);
        if forced_ratio > best.2 {
            best = (forced, forced_text, forced_ratio);
        }
        let (bg, text, ratio) = best;
        return Swatch {
            scale,
            background: bg,
            text,
            contrast_ratio: truncate_ratio(ratio),
            meets_minimum: ratio >= min_ratio,
        };
    }

    Swatch {
        scale,
        background: bg,
        text,
        contrast_ratio: truncate_ratio(ratio),
        meets_minimum: true,
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use tinct_color::Space;

    fn bg(r: u8, g: u8, b: u8) -> Color {
        Color::from_rgb8(Space::Oklch, r, g, b)
    }

    #[test]
    fn dark_background_gets_white_text() {
        assert_eq!(pick_text(bg(10, 10, 30)), TextColor::White);
    }

    #[test]
    fn light_background_gets_black_text() {
        assert_eq!(pick_text(bg(240, 240, 230)), TextColor::Black);
    }

    #[test]
    fn tie_falls_to_black() {
        // Equal contrast both ways is only possible in theory, so drive
        // the branch directly: white must strictly beat black to win.
        let mid = bg(0x77, 0x77, 0x77);
        let black = TextColor::Black.contrast_against(mid);
        let white = TextColor::White.contrast_against(mid);
        let picked = pick_text(mid);
        if (black - white).abs() < f64::EPSILON {
            assert_eq!(picked, TextColor::Black);
        } else if white > black {
            assert_eq!(picked, TextColor::White);
        } else {
            assert_eq!(picked, TextColor::Black);
        }
    }

    #[test]
    fn aa_holds_without_moving_any_background() {
        // Every sRGB background clears 4.5:1 against its better pole, so
        // AA enforcement must be the identity on the background.
        for v in (0..=255).step_by(5) {
            #[allow(clippy::cast_possible_truncation)]
            let c = bg(v as u8, v as u8, v as u8);
            let s = enforce(Scale::S500, c);
            assert_eq!(s.background.rgb8(), c.rgb8(), "moved at gray {v}");
            assert!(s.meets_minimum);
            assert!(s.contrast_ratio >= 4.5, "ratio {} at gray {v}", s.contrast_ratio);
        }
    }

    #[test]
    fn measure_reports_without_modifying() {
        let c = bg(0x34, 0x6B, 0x9C);
        let s = measure(Scale::S600, c);
        assert_eq!(s.background.rgb8(), c.rgb8());
        assert_eq!(s.text, pick_text(c));
        assert!(s.meets_minimum);
    }

    #[test]
    fn raised_threshold_nudges_toward_pole() {
        // 7:1 is unreachable for this mid-tone without moving it.
        let c = bg(0x80, 0x80, 0x80);
        let before = pick_text(c).contrast_against(c);
        assert!(before < 7.0);

        let s = enforce_with(Scale::S500, c, 7.0);
        assert!(s.contrast_ratio > truncate_ratio(before));
        assert_ne!(s.background.rgb8(), c.rgb8());
        // Nudging moves lightness only.
        assert!((s.background.chroma() - c.chroma()).abs() < 1e-6);
    }

    #[test]
    fn unreachable_threshold_keeps_best_and_flags() {
        let c = bg(0x80, 0x80, 0x80);
        let s = enforce_with(Scale::S500, c, 25.0);
        assert!(!s.meets_minimum);
        // Best-so-far must beat the untouched pairing.
        let untouched = pick_text(c).contrast_against(c);
        assert!(s.contrast_ratio >= truncate_ratio(untouched));
    }

    #[test]
    fn ratio_is_truncated_not_rounded() {
        let s = measure(Scale::S500, bg(0x34, 0x6B, 0x9C));
        let raw = s.text.contrast_against(s.background);
        assert!((s.contrast_ratio - (raw * 100.0).floor() / 100.0).abs() < 1e-9);
    }
}
