//! Input color parsing — hex, `rgb()`, bare triplets, `hsl()`, `oklch()`
//! and CSS named colors.
//!
//! Parsing is case-insensitive and tolerates surrounding whitespace.
//! Invalid input yields a typed [`ParseError`]; callers at the boundary
//! keep their last valid color instead of propagating it.

use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;

use crate::color::{Color, Space};
use crate::named;

/// Why a color string failed to parse.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The input was empty or whitespace-only.
    #[error("empty color string")]
    Empty,

    /// Hex-shaped input with bad length or non-hex digits.
    #[error("invalid hex color `{0}`")]
    InvalidHex(String),

    /// A numeric channel fell outside its legal range.
    #[error("channel out of range in `{0}`")]
    ChannelOutOfRange(String),

    /// A functional notation (`rgb(...)`, `hsl(...)`, `oklch(...)`) that
    /// did not match its grammar.
    #[error("malformed {notation} notation `{input}`")]
    Malformed {
        notation: &'static str,
        input: String,
    },

    /// Input matching no known form or named color.
    #[error("unrecognized color `{0}`")]
    Unrecognized(String),
}

// Patterns are literals; construction cannot fail at runtime.
static RGB_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^rgb\(\s*(\d{1,3})[\s,]+(\d{1,3})[\s,]+(\d{1,3})\s*\)$")
        .expect("rgb pattern")
});
static TRIPLET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{1,3})[\s,]+(\d{1,3})[\s,]+(\d{1,3})$").expect("triplet pattern")
});
static HSL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^hsl\(\s*([0-9]*\.?[0-9]+)[\s,]+([0-9]*\.?[0-9]+)(%?)[\s,]+([0-9]*\.?[0-9]+)(%?)\s*\)$",
    )
    .expect("hsl pattern")
});
static OKLCH_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^oklch\(\s*([0-9]*\.?[0-9]+)(%?)[\s,]+([0-9]*\.?[0-9]+)[\s,]+([0-9]*\.?[0-9]+)\s*\)$",
    )
    .expect("oklch pattern")
});

/// Parse a color string into the default OKLCH working space.
///
/// # Errors
///
/// Returns a [`ParseError`] describing why the input is not a color.
pub fn parse(input: &str) -> Result<Color, ParseError> {
    parse_as(input, Space::Oklch)
}

/// Parse a color string, deriving components in the requested space.
///
/// Accepted forms: 3/6-digit hex (with or without `#`), `rgb(r, g, b)`,
/// a bare `r g b` / `r, g, b` triplet, `hsl(h, s%, l%)` (percent signs
/// optional, fractions accepted), `oklch(l c h)`, and CSS named colors.
///
/// # Errors
///
/// Returns a [`ParseError`] describing why the input is not a color.
pub fn parse_as(input: &str, space: Space) -> Result<Color, ParseError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ParseError::Empty);
    }
    let lower = trimmed.to_ascii_lowercase();

    if lower.starts_with("rgb(") {
        return parse_rgb(&lower, trimmed, space);
    }
    if lower.starts_with("hsl(") {
        return parse_hsl(&lower, trimmed, space);
    }
    if lower.starts_with("oklch(") {
        return parse_oklch(&lower, trimmed, space);
    }

    if let Some([r, g, b]) = named::lookup(&lower) {
        return Ok(Color::from_rgb8(space, r, g, b));
    }

    if let Some(result) = parse_hex(trimmed, space) {
        return result;
    }

    if let Some(caps) = TRIPLET_RE.captures(trimmed) {
        let r = channel(&caps[1], trimmed)?;
        let g = channel(&caps[2], trimmed)?;
        let b = channel(&caps[3], trimmed)?;
        return Ok(Color::from_rgb8(space, r, g, b));
    }

    Err(ParseError::Unrecognized(trimmed.to_owned()))
}

// ─── Form Parsers ────────────────────────────────────────────────────────────

/// Hex form: `#RGB`, `#RRGGBB`, with or without `#`.
///
/// Returns `None` when the input is not hex-shaped at all (so the caller
/// can try the remaining forms), `Some(Err)` when it is hex-shaped but
/// invalid.
fn parse_hex(input: &str, space: Space) -> Option<Result<Color, ParseError>> {
    let had_hash = input.starts_with('#');
    let digits = input.strip_prefix('#').unwrap_or(input);

    let all_hex = !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_hexdigit());
    if !had_hash && !(all_hex && matches!(digits.len(), 3 | 6)) {
        return None;
    }
    if !all_hex || !matches!(digits.len(), 3 | 6) {
        return Some(Err(ParseError::InvalidHex(input.to_owned())));
    }

    let bytes = digits.as_bytes();
    let color = if digits.len() == 3 {
        let r = hex_digit(bytes[0]);
        let g = hex_digit(bytes[1]);
        let b = hex_digit(bytes[2]);
        Color::from_rgb8(space, r << 4 | r, g << 4 | g, b << 4 | b)
    } else {
        let r = hex_digit(bytes[0]) << 4 | hex_digit(bytes[1]);
        let g = hex_digit(bytes[2]) << 4 | hex_digit(bytes[3]);
        let b = hex_digit(bytes[4]) << 4 | hex_digit(bytes[5]);
        Color::from_rgb8(space, r, g, b)
    };
    Some(Ok(color))
}

/// Decode one ASCII hex digit already known to be valid.
#[inline]
const fn hex_digit(c: u8) -> u8 {
    match c {
        b'0'..=b'9' => c - b'0',
        b'a'..=b'f' => c - b'a' + 10,
        _ => c - b'A' + 10,
    }
}

fn parse_rgb(lower: &str, original: &str, space: Space) -> Result<Color, ParseError> {
    let caps = RGB_RE.captures(lower).ok_or_else(|| ParseError::Malformed {
        notation: "rgb",
        input: original.to_owned(),
    })?;
    let r = channel(&caps[1], original)?;
    let g = channel(&caps[2], original)?;
    let b = channel(&caps[3], original)?;
    Ok(Color::from_rgb8(space, r, g, b))
}

fn parse_hsl(lower: &str, original: &str, space: Space) -> Result<Color, ParseError> {
    let caps = HSL_RE.captures(lower).ok_or_else(|| ParseError::Malformed {
        notation: "hsl",
        input: original.to_owned(),
    })?;
    let h: f32 = caps[1].parse().map_err(|_| ParseError::Malformed {
        notation: "hsl",
        input: original.to_owned(),
    })?;
    let s = fraction(&caps[2], !caps[3].is_empty(), original)?;
    let l = fraction(&caps[4], !caps[5].is_empty(), original)?;
    // Components land in HSL; re-derive for an OKLCH pipeline.
    Ok(Color::hsl(h, s, l).in_space(space))
}

fn parse_oklch(lower: &str, original: &str, space: Space) -> Result<Color, ParseError> {
    let caps = OKLCH_RE.captures(lower).ok_or_else(|| ParseError::Malformed {
        notation: "oklch",
        input: original.to_owned(),
    })?;
    let l = fraction(&caps[1], !caps[2].is_empty(), original)?;
    let c: f32 = caps[3].parse().map_err(|_| ParseError::Malformed {
        notation: "oklch",
        input: original.to_owned(),
    })?;
    let h: f32 = caps[4].parse().map_err(|_| ParseError::Malformed {
        notation: "oklch",
        input: original.to_owned(),
    })?;
    Ok(Color::oklch(l, c, h).in_space(space))
}

/// Parse a 0–255 integer channel.
fn channel(digits: &str, original: &str) -> Result<u8, ParseError> {
    digits
        .parse::<u8>()
        .map_err(|_| ParseError::ChannelOutOfRange(original.to_owned()))
}

/// Parse a 0..=1 fraction that may also be written as a percentage.
///
/// An explicit `%` always divides by 100; without it, values above 1.0
/// are treated as percentages for tolerance (`hsl(220, 60, 40)`).
fn fraction(digits: &str, percent: bool, original: &str) -> Result<f32, ParseError> {
    let v: f32 = digits.parse().map_err(|_| ParseError::ChannelOutOfRange(original.to_owned()))?;
    let v = if percent || v > 1.0 { v / 100.0 } else { v };
    if !(0.0..=1.0).contains(&v) {
        return Err(ParseError::ChannelOutOfRange(original.to_owned()));
    }
    Ok(v)
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn hex_six_digit() {
        assert_eq!(parse("#172554").unwrap().hex(), "#172554");
        assert_eq!(parse("172554").unwrap().hex(), "#172554");
    }

    #[test]
    fn hex_three_digit_expands() {
        assert_eq!(parse("#f80").unwrap().hex(), "#FF8800");
        assert_eq!(parse("F80").unwrap().hex(), "#FF8800");
    }

    #[test]
    fn hex_invalid() {
        assert!(matches!(parse("#12345"), Err(ParseError::InvalidHex(_))));
        assert!(matches!(parse("#xyz"), Err(ParseError::InvalidHex(_))));
    }

    #[test]
    fn rgb_functional() {
        assert_eq!(parse("rgb(255, 128, 0)").unwrap().hex(), "#FF8000");
        assert_eq!(parse("RGB(255 128 0)").unwrap().hex(), "#FF8000");
    }

    #[test]
    fn rgb_channel_out_of_range() {
        assert!(matches!(
            parse("rgb(300, 0, 0)"),
            Err(ParseError::ChannelOutOfRange(_))
        ));
    }

    #[test]
    fn bare_triplet() {
        assert_eq!(parse("23 37 84").unwrap().hex(), "#172554");
        assert_eq!(parse("23, 37, 84").unwrap().hex(), "#172554");
    }

    #[test]
    fn hsl_percent_and_fraction_agree() {
        let a = parse("hsl(226, 57%, 21%)").unwrap();
        let b = parse("hsl(226, 0.57, 0.21)").unwrap();
        let c = parse("hsl(226, 57, 21)").unwrap();
        assert_eq!(a, b);
        assert_eq!(a, c);
    }

    #[test]
    fn hsl_into_hsl_space_keeps_components() {
        let c = parse_as("hsl(226, 57%, 21%)", Space::Hsl).unwrap();
        assert_eq!(c.space(), Space::Hsl);
        assert!((c.hue() - 226.0).abs() < 0.5, "hue was {}", c.hue());
        assert!((c.saturation() - 0.57).abs() < 0.01);
    }

    #[test]
    fn oklch_functional() {
        let c = parse("oklch(0.63 0.26 29.2)").unwrap();
        assert_eq!(c.space(), Space::Oklch);
        assert!((c.lightness() - 0.63).abs() < 0.001);
        // Percentage lightness means the same thing.
        let pct = parse("oklch(63% 0.26 29.2)").unwrap();
        assert_eq!(c, pct);
    }

    #[test]
    fn named_colors() {
        assert_eq!(parse("rebeccapurple").unwrap().hex(), "#663399");
        assert_eq!(parse("  White  ").unwrap().hex(), "#FFFFFF");
    }

    #[test]
    fn empty_and_garbage() {
        assert_eq!(parse("   "), Err(ParseError::Empty));
        assert!(matches!(parse("not-a-color"), Err(ParseError::Unrecognized(_))));
        assert!(matches!(
            parse("hsl(what)"),
            Err(ParseError::Malformed { notation: "hsl", .. })
        ));
    }

    #[test]
    fn working_space_is_honored() {
        let oklch = parse_as("#FF0000", Space::Oklch).unwrap();
        let hsl = parse_as("#FF0000", Space::Hsl).unwrap();
        assert_eq!(oklch.space(), Space::Oklch);
        assert_eq!(hsl.space(), Space::Hsl);
        assert_eq!(oklch, hsl, "same bytes in either space");
    }
}
