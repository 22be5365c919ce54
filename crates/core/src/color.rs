//! Color conversion between HEX, RGB, and HSL
//!
//! Every textual input is reduced to an RGB triplet and the HSL view is always
//! derived from that triplet, so all three representations of a [`Color`] agree
//! up to the truncation applied when HSL is scaled to integers.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Smallest number of shades/tints a palette can hold
pub const MIN_PALETTE_COUNT: usize = 1;
/// Largest number of shades/tints a palette can hold
pub const MAX_PALETTE_COUNT: usize = 20;
/// Palette size used when the caller does not pick one
pub const DEFAULT_PALETTE_COUNT: usize = 5;

static RGB_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"rgb\((\d+),\s*(\d+),\s*(\d+)\)").unwrap());

static HSL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"hsl\((\d+),\s*(\d+)%,\s*(\d+)%\)").unwrap());

/// Red, green and blue channels in `0..=255`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Canonical uppercase `#RRGGBB`
    pub fn to_hex(&self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }

    /// Lowercase `#rrggbb`, the form palette entries use
    pub fn to_hex_lower(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    fn map(self, f: impl Fn(u8) -> u8) -> Self {
        Self::new(f(self.r), f(self.g), f(self.b))
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

/// Hue in degrees (`0..360`), saturation and lightness in percent (`0..=100`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hsl {
    pub h: u16,
    pub s: u8,
    pub l: u8,
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({}, {}%, {}%)", self.h, self.s, self.l)
    }
}

/// A color with its RGB and HSL representations precomputed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    rgb: Rgb,
    hsl: Hsl,
}

impl Color {
    /// Build a color from its channels, deriving the HSL view.
    pub fn from_rgb(rgb: Rgb) -> Self {
        Self {
            rgb,
            hsl: derive_hsl(rgb),
        }
    }

    pub fn rgb(&self) -> Rgb {
        self.rgb
    }

    pub fn hsl(&self) -> Hsl {
        self.hsl
    }

    /// Uppercase `#RRGGBB`
    pub fn hex(&self) -> String {
        self.rgb.to_hex()
    }
}

/// Textual color notations recognized by [`parse_and_normalize`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorFormat {
    Hex,
    Rgb,
    Hsl,
    Unrecognized,
}

impl ColorFormat {
    /// Classify an input by its literal prefix.
    pub fn detect(input: &str) -> Self {
        if input.starts_with('#') {
            ColorFormat::Hex
        } else if input.starts_with("rgb") {
            ColorFormat::Rgb
        } else if input.starts_with("hsl") {
            ColorFormat::Hsl
        } else {
            ColorFormat::Unrecognized
        }
    }
}

/// A color rendered in all three notations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorConversion {
    pub hex: String,
    pub rgb: String,
    pub hsl: String,
}

impl From<&Color> for ColorConversion {
    fn from(color: &Color) -> Self {
        Self {
            hex: color.hex(),
            rgb: color.rgb().to_string(),
            hsl: color.hsl().to_string(),
        }
    }
}

/// Shades (toward black) and tints (toward white) of a base color.
///
/// Index 0 of each list holds the subtlest change from the base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Palette {
    pub shades: Vec<String>,
    pub tints: Vec<String>,
}

fn invalid_hex() -> Error {
    Error::InvalidColor("Invalid HEX color".to_string())
}

/// Parse a color written as `#RGB`, `#RRGGBB`, `rgb(r, g, b)` or `hsl(h, s%, l%)`.
///
/// Surrounding whitespace is ignored.
pub fn parse_and_normalize(input: &str) -> Result<Color> {
    let input = input.trim();

    match ColorFormat::detect(input) {
        ColorFormat::Hex => hex_to_hsl(input),
        ColorFormat::Rgb => parse_rgb(input),
        ColorFormat::Hsl => parse_hsl(input),
        ColorFormat::Unrecognized => Err(Error::InvalidFormat(
            "Invalid color format. Use HEX, RGB, or HSL".to_string(),
        )),
    }
}

/// Parse a HEX color (with or without the leading `#`) and derive its HSL view.
pub fn hex_to_hsl(hex: &str) -> Result<Color> {
    let digits = hex.trim_start_matches('#');

    let expanded: String = match digits.len() {
        3 => digits.chars().flat_map(|c| [c, c]).collect(),
        6 => digits.to_string(),
        _ => return Err(invalid_hex()),
    };

    if !expanded.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid_hex());
    }

    let channel = |start: usize| {
        u8::from_str_radix(&expanded[start..start + 2], 16).map_err(|_| invalid_hex())
    };

    Ok(Color::from_rgb(Rgb::new(channel(0)?, channel(2)?, channel(4)?)))
}

/// Build a color from RGB channels.
pub fn rgb_to_hex(r: u8, g: u8, b: u8) -> Color {
    Color::from_rgb(Rgb::new(r, g, b))
}

/// Convert HSL (hue in degrees, saturation and lightness in percent) to a color.
///
/// Channels are floored after scaling to `0..=255`. Saturation or lightness
/// above 100% push a channel out of range and fail with [`Error::InvalidColor`].
pub fn hsl_to_rgb(h: u32, s: u32, l: u32) -> Result<Color> {
    let h = f64::from(h) / 360.0;
    let s = f64::from(s) / 100.0;
    let l = f64::from(l) / 100.0;

    let (r, g, b) = if s == 0.0 {
        (l, l, l)
    } else {
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        (
            hue_to_rgb(p, q, h + 1.0 / 3.0),
            hue_to_rgb(p, q, h),
            hue_to_rgb(p, q, h - 1.0 / 3.0),
        )
    };

    let rgb = Rgb::new(scale_channel(r)?, scale_channel(g)?, scale_channel(b)?);

    // Round-trip through HEX so the HSL view is re-derived from the channels.
    hex_to_hsl(&rgb.to_hex_lower())
}

/// Derive `count` shades and `count` tints from `base`.
///
/// Step `i` (1-based) blends by `i / (count + 1)`; the black and white
/// endpoints themselves are excluded from the blend.
pub fn palette(base: &Color, count: usize) -> Result<Palette> {
    validate_palette_count(count)?;

    let rgb = base.rgb();
    let steps = (count + 1) as f64;

    let factors = (1..=count).map(|i| i as f64 / steps);

    let shades = factors
        .clone()
        .map(|factor| {
            rgb.map(|c| (f64::from(c) * (1.0 - factor)).floor() as u8)
                .to_hex_lower()
        })
        .collect();

    let tints = factors
        .map(|factor| {
            rgb.map(|c| (f64::from(c) + f64::from(255 - c) * factor).floor() as u8)
                .to_hex_lower()
        })
        .collect();

    Ok(Palette { shades, tints })
}

/// Parse `input` and render it in every notation.
pub fn convert_color(input: &str) -> Result<ColorConversion> {
    parse_and_normalize(input).map(|color| ColorConversion::from(&color))
}

/// Parse `base_color` and derive its palette.
pub fn generate_palette(base_color: &str, count: usize) -> Result<Palette> {
    validate_palette_count(count)?;
    let base = parse_and_normalize(base_color)?;
    palette(&base, count)
}

fn validate_palette_count(count: usize) -> Result<()> {
    if !(MIN_PALETTE_COUNT..=MAX_PALETTE_COUNT).contains(&count) {
        return Err(Error::Validation(format!(
            "Palette count must be between {MIN_PALETTE_COUNT} and {MAX_PALETTE_COUNT}, got {count}"
        )));
    }
    Ok(())
}

fn parse_rgb(input: &str) -> Result<Color> {
    let caps = RGB_PATTERN
        .captures(input)
        .ok_or_else(|| Error::InvalidFormat("Invalid RGB format".to_string()))?;

    let channel = |idx: usize| -> Result<u8> {
        caps[idx].parse::<u8>().map_err(|_| {
            Error::InvalidColor(format!(
                "Invalid RGB color: channel {} is out of range 0-255",
                &caps[idx]
            ))
        })
    };

    let rgb = Rgb::new(channel(1)?, channel(2)?, channel(3)?);

    hex_to_hsl(&rgb.to_hex_lower())
}

fn parse_hsl(input: &str) -> Result<Color> {
    let caps = HSL_PATTERN
        .captures(input)
        .ok_or_else(|| Error::InvalidFormat("Invalid HSL format".to_string()))?;

    let component = |idx: usize| -> Result<u32> {
        caps[idx]
            .parse::<u32>()
            .map_err(|_| Error::InvalidColor(format!("Invalid HSL component: {}", &caps[idx])))
    };

    hsl_to_rgb(component(1)?, component(2)?, component(3)?)
}

/// Standard normalized-RGB to HSL, truncating each component after scaling.
fn derive_hsl(rgb: Rgb) -> Hsl {
    let r = f64::from(rgb.r) / 255.0;
    let g = f64::from(rgb.g) / 255.0;
    let b = f64::from(rgb.b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    let (h, s) = if max == min {
        (0.0, 0.0)
    } else {
        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };

        let h = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        (h / 6.0, s)
    };

    Hsl {
        h: (h * 360.0) as u16,
        s: (s * 100.0) as u8,
        l: (l * 100.0) as u8,
    }
}

fn hue_to_rgb(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 1.0 / 2.0 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

fn scale_channel(value: f64) -> Result<u8> {
    let scaled = (value * 255.0).floor();
    if !(0.0..=255.0).contains(&scaled) {
        return Err(Error::InvalidColor(
            "Invalid HSL color: saturation and lightness must not exceed 100%".to_string(),
        ));
    }
    Ok(scaled as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hsl_of(input: &str) -> String {
        parse_and_normalize(input).unwrap().hsl().to_string()
    }

    // ============================================================================
    // ColorFormat::detect tests
    // ============================================================================

    #[test]
    fn test_detect_formats() {
        assert_eq!(ColorFormat::detect("#fff"), ColorFormat::Hex);
        assert_eq!(ColorFormat::detect("rgb(1, 2, 3)"), ColorFormat::Rgb);
        assert_eq!(ColorFormat::detect("hsl(1, 2%, 3%)"), ColorFormat::Hsl);
        assert_eq!(ColorFormat::detect("red"), ColorFormat::Unrecognized);
        assert_eq!(ColorFormat::detect(""), ColorFormat::Unrecognized);
    }

    // ============================================================================
    // HEX parsing tests
    // ============================================================================

    #[test]
    fn test_hex_primary_red() {
        let color = parse_and_normalize("#FF0000").unwrap();
        assert_eq!(color.rgb(), Rgb::new(255, 0, 0));
        assert_eq!(color.hsl(), Hsl { h: 0, s: 100, l: 50 });
        assert_eq!(color.hex(), "#FF0000");
    }

    #[test]
    fn test_hex_black_and_white() {
        assert_eq!(hsl_of("#000000"), "hsl(0, 0%, 0%)");
        assert_eq!(hsl_of("#FFFFFF"), "hsl(0, 0%, 100%)");
    }

    #[test]
    fn test_hex_green_and_blue_hues() {
        assert_eq!(hsl_of("#00FF00"), "hsl(120, 100%, 50%)");
        assert_eq!(hsl_of("#0000FF"), "hsl(240, 100%, 50%)");
        assert_eq!(hsl_of("#FFFF00"), "hsl(60, 100%, 50%)");
    }

    #[test]
    fn test_hex_truncates_instead_of_rounding() {
        // Saturation is 69.9..%, lightness 53.1..%
        assert_eq!(hsl_of("#3498db"), "hsl(204, 69%, 53%)");
        assert_eq!(hsl_of("#FFA500"), "hsl(38, 100%, 50%)");
    }

    #[test]
    fn test_hex_shorthand_is_expanded() {
        let color = parse_and_normalize("#abc").unwrap();
        assert_eq!(color.hex(), "#AABBCC");
        assert_eq!(color.hsl().to_string(), "hsl(210, 25%, 73%)");
    }

    #[test]
    fn test_hex_output_is_uppercase() {
        assert_eq!(parse_and_normalize("#3498db").unwrap().hex(), "#3498DB");
    }

    #[test]
    fn test_input_is_trimmed() {
        assert_eq!(parse_and_normalize("  #fff \n").unwrap().hex(), "#FFFFFF");
    }

    #[test]
    fn test_hex_invalid_length() {
        assert!(matches!(
            parse_and_normalize("#12345"),
            Err(Error::InvalidColor(_))
        ));
        assert!(matches!(parse_and_normalize("#"), Err(Error::InvalidColor(_))));
    }

    #[test]
    fn test_hex_invalid_digits() {
        assert!(matches!(
            parse_and_normalize("#ggg"),
            Err(Error::InvalidColor(_))
        ));
        assert!(matches!(
            parse_and_normalize("#12345z"),
            Err(Error::InvalidColor(_))
        ));
    }

    #[test]
    fn test_hex_non_ascii_is_rejected() {
        assert!(matches!(
            parse_and_normalize("#ééé"),
            Err(Error::InvalidColor(_))
        ));
    }

    #[test]
    fn test_unrecognized_prefix() {
        assert!(matches!(
            parse_and_normalize("red"),
            Err(Error::InvalidFormat(_))
        ));
    }

    // ============================================================================
    // RGB parsing tests
    // ============================================================================

    #[test]
    fn test_rgb_string() {
        let color = parse_and_normalize("rgb(52, 152, 219)").unwrap();
        assert_eq!(color.hex(), "#3498DB");
        assert_eq!(color.hsl().to_string(), "hsl(204, 69%, 53%)");
    }

    #[test]
    fn test_rgb_without_spaces() {
        assert_eq!(
            parse_and_normalize("rgb(255,255,0)").unwrap().hex(),
            "#FFFF00"
        );
    }

    #[test]
    fn test_rgb_bad_pattern() {
        assert!(matches!(
            parse_and_normalize("rgb(1, 2)"),
            Err(Error::InvalidFormat(_))
        ));
        assert!(matches!(
            parse_and_normalize("rgba(1, 2, 3, 0.5)"),
            Err(Error::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_rgb_channel_out_of_range() {
        assert!(matches!(
            parse_and_normalize("rgb(300, 0, 0)"),
            Err(Error::InvalidColor(_))
        ));
        assert!(matches!(
            parse_and_normalize("rgb(99999999999, 0, 0)"),
            Err(Error::InvalidColor(_))
        ));
    }

    #[test]
    fn test_rgb_to_hex() {
        let color = rgb_to_hex(255, 165, 0);
        assert_eq!(color.hex(), "#FFA500");
        assert_eq!(color.rgb().to_string(), "rgb(255, 165, 0)");
    }

    // ============================================================================
    // HSL parsing tests
    // ============================================================================

    #[test]
    fn test_hsl_string() {
        let color = parse_and_normalize("hsl(204, 70%, 53%)").unwrap();
        assert_eq!(color.hex(), "#3397DB");
        assert_eq!(color.hsl().to_string(), "hsl(204, 69%, 52%)");
    }

    #[test]
    fn test_hsl_channels_are_floored() {
        assert_eq!(
            parse_and_normalize("hsl(120, 100%, 25%)").unwrap().hex(),
            "#007F00"
        );
        assert_eq!(
            parse_and_normalize("hsl(300, 50%, 75%)").unwrap().hex(),
            "#DF9FDF"
        );
    }

    #[test]
    fn test_hsl_achromatic() {
        let color = parse_and_normalize("hsl(0, 0%, 50%)").unwrap();
        assert_eq!(color.rgb(), Rgb::new(127, 127, 127));
    }

    #[test]
    fn test_hsl_hue_above_360_wraps() {
        assert_eq!(
            parse_and_normalize("hsl(400, 50%, 50%)").unwrap().hex(),
            "#BF943F"
        );
    }

    #[test]
    fn test_hsl_saturation_above_100_is_invalid() {
        assert!(matches!(
            parse_and_normalize("hsl(0, 150%, 50%)"),
            Err(Error::InvalidColor(_))
        ));
        assert!(matches!(
            parse_and_normalize("hsl(0, 0%, 150%)"),
            Err(Error::InvalidColor(_))
        ));
    }

    #[test]
    fn test_hsl_bad_pattern() {
        assert!(matches!(
            parse_and_normalize("hsl(0, 100, 50)"),
            Err(Error::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_round_trip_through_hsl() {
        for hex in [
            "#FF0000", "#00FF00", "#0000FF", "#FFFFFF", "#000000", "#808080", "#FFFF00",
            "#00FFFF", "#FF00FF",
        ] {
            let original = parse_and_normalize(hex).unwrap();
            let hsl = original.hsl();
            let back = hsl_to_rgb(u32::from(hsl.h), u32::from(hsl.s), u32::from(hsl.l)).unwrap();

            let (a, b) = (original.rgb(), back.rgb());
            for (x, y) in [(a.r, b.r), (a.g, b.g), (a.b, b.b)] {
                assert!(x.abs_diff(y) <= 1, "{hex} came back as {}", back.hex());
            }
        }
    }

    // ============================================================================
    // Palette tests
    // ============================================================================

    #[test]
    fn test_palette_grey() {
        let result = generate_palette("#808080", 3).unwrap();
        assert_eq!(result.shades, vec!["#606060", "#404040", "#202020"]);
        assert_eq!(result.tints, vec!["#9f9f9f", "#bfbfbf", "#dfdfdf"]);
    }

    #[test]
    fn test_palette_strictly_monotonic_and_distinct_from_base() {
        let result = generate_palette("#808080", 3).unwrap();
        let level = |hex: &str| parse_and_normalize(hex).unwrap().rgb().r;

        let shades: Vec<u8> = result.shades.iter().map(|h| level(h.as_str())).collect();
        let tints: Vec<u8> = result.tints.iter().map(|h| level(h.as_str())).collect();

        assert!(shades.windows(2).all(|w| w[0] > w[1]));
        assert!(tints.windows(2).all(|w| w[0] < w[1]));
        assert!(shades.iter().all(|&v| v < 0x80));
        assert!(tints.iter().all(|&v| v > 0x80));
    }

    #[test]
    fn test_palette_single_step() {
        let result = generate_palette("#FF0000", 1).unwrap();
        assert_eq!(result.shades, vec!["#7f0000"]);
        assert_eq!(result.tints, vec!["#ff7f7f"]);
    }

    #[test]
    fn test_palette_color() {
        let result = generate_palette("#3498db", 4).unwrap();
        assert_eq!(
            result.shades,
            vec!["#2979af", "#1f5b83", "#143c57", "#0a1e2b"]
        );
        assert_eq!(
            result.tints,
            vec!["#5cace2", "#85c1e9", "#add5f0", "#d6eaf7"]
        );
    }

    #[test]
    fn test_palette_accepts_any_notation() {
        assert_eq!(
            generate_palette("rgb(128, 128, 128)", 3).unwrap(),
            generate_palette("#808080", 3).unwrap()
        );
    }

    #[test]
    fn test_palette_count_bounds() {
        assert!(matches!(
            generate_palette("#808080", 0),
            Err(Error::Validation(_))
        ));
        assert!(matches!(
            generate_palette("#808080", 21),
            Err(Error::Validation(_))
        ));
        assert_eq!(generate_palette("#808080", 20).unwrap().shades.len(), 20);
    }

    #[test]
    fn test_palette_invalid_base() {
        assert!(matches!(
            generate_palette("blue", 3),
            Err(Error::InvalidFormat(_))
        ));
    }

    // ============================================================================
    // convert_color tests
    // ============================================================================

    #[test]
    fn test_convert_color_renders_all_notations() {
        let conversion = convert_color("#FF0000").unwrap();
        assert_eq!(
            conversion,
            ColorConversion {
                hex: "#FF0000".to_string(),
                rgb: "rgb(255, 0, 0)".to_string(),
                hsl: "hsl(0, 100%, 50%)".to_string(),
            }
        );
    }

    #[test]
    fn test_convert_color_serializes_flat() {
        let json = serde_json::to_value(convert_color("#000").unwrap()).unwrap();
        assert_eq!(json["hex"], "#000000");
        assert_eq!(json["rgb"], "rgb(0, 0, 0)");
        assert_eq!(json["hsl"], "hsl(0, 0%, 0%)");
    }
}
