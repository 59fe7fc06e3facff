//! WCAG 2.1 relative luminance and contrast ratio.
//!
//! Measurement always happens on the clipped sRGB bytes, never on
//! working-space components — a color that has not been through gamut
//! clipping has no defined luminance. Ratios are computed in f64;
//! [`truncate_ratio`] drops (never rounds) to 2 decimals for display
//! stability.

use crate::color::Color;

/// WCAG AA minimum contrast ratio for normal text.
pub const AA_NORMAL_TEXT: f64 = 4.5;

/// Channel linearization threshold from the WCAG 2.1 formula.
const LINEAR_THRESHOLD: f64 = 0.039_28;

/// Linearize one sRGB channel (0.0–1.0) per WCAG 2.1.
#[inline]
fn linearize(c: f64) -> f64 {
    if c <= LINEAR_THRESHOLD {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// Compute the relative luminance of a color per WCAG 2.1.
///
/// L = 0.2126 · `R_lin` + 0.7152 · `G_lin` + 0.0722 · `B_lin`, over the
/// cached sRGB bytes. Returns a value in [0.0, 1.0].
#[must_use]
pub fn relative_luminance(color: Color) -> f64 {
    let [r, g, b] = color.rgb8();
    let r_lin = linearize(f64::from(r) / 255.0);
    let g_lin = linearize(f64::from(g) / 255.0);
    let b_lin = linearize(f64::from(b) / 255.0);
    0.2126f64.mul_add(r_lin, 0.7152f64.mul_add(g_lin, 0.0722 * b_lin))
}

/// Compute the WCAG 2.1 contrast ratio between two colors.
///
/// (`L_lighter` + 0.05) / (`L_darker` + 0.05), in [1.0, 21.0]. The result
/// is >= 1.0 regardless of argument order.
#[must_use]
pub fn contrast_ratio(a: Color, b: Color) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);
    let (lighter, darker) = if la >= lb { (la, lb) } else { (lb, la) };
    (lighter + 0.05) / (darker + 0.05)
}

/// Contrast ratio of a background against pure black text.
#[must_use]
pub fn contrast_vs_black(bg: Color) -> f64 {
    (relative_luminance(bg) + 0.05) / 0.05
}

/// Contrast ratio of a background against pure white text.
#[must_use]
pub fn contrast_vs_white(bg: Color) -> f64 {
    1.05 / (relative_luminance(bg) + 0.05)
}

/// Truncate a contrast ratio to 2 decimal places for display.
///
/// Truncation, not rounding: 4.499 must never present as the passing
/// "4.50". Threshold comparisons use the raw ratio.
#[must_use]
pub fn truncate_ratio(ratio: f64) -> f64 {
    (ratio * 100.0).trunc() / 100.0
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Space;

    fn rgb(r: u8, g: u8, b: u8) -> Color {
        Color::from_rgb8(Space::Oklch, r, g, b)
    }

    fn approx_eq(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    // ── Relative luminance ──────────────────────────────────────────

    #[test]
    fn luminance_black_is_zero() {
        let lum = relative_luminance(rgb(0, 0, 0));
        assert!(approx_eq(lum, 0.0, 0.001), "black luminance: {lum}");
    }

    #[test]
    fn luminance_white_is_one() {
        let lum = relative_luminance(rgb(255, 255, 255));
        assert!(approx_eq(lum, 1.0, 0.001), "white luminance: {lum}");
    }

    #[test]
    fn luminance_pure_red() {
        // Red contributes its 0.2126 weight.
        let lum = relative_luminance(rgb(255, 0, 0));
        assert!(approx_eq(lum, 0.2126, 0.001), "red luminance: {lum}");
    }

    #[test]
    fn luminance_pure_green() {
        let lum = relative_luminance(rgb(0, 255, 0));
        assert!(approx_eq(lum, 0.7152, 0.001), "green luminance: {lum}");
    }

    // ── Contrast ratio ──────────────────────────────────────────────

    #[test]
    fn contrast_black_white_is_21() {
        let ratio = contrast_ratio(rgb(0, 0, 0), rgb(255, 255, 255));
        assert!(approx_eq(ratio, 21.0, 0.01), "b/w contrast: {ratio}");
    }

    #[test]
    fn contrast_same_color_is_1() {
        let c = rgb(120, 80, 200);
        assert!(approx_eq(contrast_ratio(c, c), 1.0, 0.001));
    }

    #[test]
    fn contrast_is_symmetric() {
        let a = rgb(204, 51, 77);
        let b = rgb(26, 26, 102);
        assert!(approx_eq(contrast_ratio(a, b), contrast_ratio(b, a), 0.0001));
    }

    #[test]
    fn pole_helpers_match_general_formula() {
        let bg = rgb(23, 37, 84);
        assert!(approx_eq(contrast_vs_black(bg), contrast_ratio(bg, rgb(0, 0, 0)), 1e-9));
        assert!(approx_eq(
            contrast_vs_white(bg),
            contrast_ratio(bg, rgb(255, 255, 255)),
            1e-9
        ));
    }

    #[test]
    fn every_background_has_a_readable_pole() {
        // The worse of black/white text bottoms out near 4.58:1 at
        // relative luminance ~0.179 — always above the 4.5 AA floor.
        for v in (0u8..=255).step_by(5) {
            let bg = rgb(v, v, v);
            let best = contrast_vs_black(bg).max(contrast_vs_white(bg));
            assert!(best > 4.5, "gray {v}: best pole contrast {best}");
        }
    }

    // ── Truncation ──────────────────────────────────────────────────

    #[test]
    fn truncation_never_rounds_up() {
        assert!(approx_eq(truncate_ratio(4.499_9), 4.49, 1e-9));
        assert!(approx_eq(truncate_ratio(4.5), 4.5, 1e-9));
        assert!(approx_eq(truncate_ratio(20.999_9), 20.99, 1e-9));
    }
}
