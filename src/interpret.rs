//! Recognizes external color encodings.
//!
//! Matchers run in a fixed priority order and the first one that accepts the
//! input wins. Out-of-range numbers are clamped rather than rejected.

use crate::constants::CHANNEL_MAX;
use crate::error::ColorParseError;
use crate::format::ColorFormat;
use crate::input::{ColorInput, ColorRecord};
use crate::math;

/// The components an encoding actually carries.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Components {
    /// 8-bit channels from hex, `rgb()`, arrays and `{r,g,b}` records.
    Rgb([u8; 3]),
    /// Native HSV from `{h,s,v}` records, or HSL converted to HSV.
    Hsv { h: f64, s: f64, v: f64 },
}

/// A successfully recognized color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interpretation {
    pub components: Components,
    pub alpha: f64,
    pub format: ColorFormat,
}

impl Interpretation {
    fn rgb(rgb: [u8; 3], alpha: f64, format: ColorFormat) -> Self {
        Self {
            components: Components::Rgb(rgb),
            alpha: math::clamp_unit(alpha),
            format,
        }
    }

    fn hsv(h: f64, s: f64, v: f64, alpha: f64, format: ColorFormat) -> Self {
        Self {
            components: Components::Hsv {
                h: math::normalize_hue(h),
                s: math::clamp_unit(s),
                v: math::clamp_unit(v),
            },
            alpha: math::clamp_unit(alpha),
            format,
        }
    }
}

type Matcher = fn(&ColorInput) -> Option<Interpretation>;

/// Priority order. Records are tried as RGB before HSV.
const MATCHERS: [Matcher; 6] = [
    match_hex,
    match_css_rgb,
    match_css_hsl,
    match_sequence,
    match_rgb_record,
    match_hsv_record,
];

/// Classify and parse `input`.
///
/// The result depends on nothing but the input itself.
pub fn interpret(input: &ColorInput) -> Result<Interpretation, ColorParseError> {
    MATCHERS
        .iter()
        .find_map(|matcher| matcher(input))
        .ok_or_else(|| ColorParseError::not_recognized(input))
}

fn finite(x: f64) -> Option<f64> {
    x.is_finite().then_some(x)
}

fn parse_number(token: &str) -> Option<f64> {
    token.trim().parse::<f64>().ok().and_then(finite)
}

fn channel(x: f64) -> u8 {
    math::to_channel(x)
}

fn match_hex(input: &ColorInput) -> Option<Interpretation> {
    let hex = input.as_text()?.trim().strip_prefix('#')?;
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => {
            let mut rgb = [0u8; 3];
            for (slot, digit) in rgb.iter_mut().zip(hex.chars()) {
                // nibble duplication: 0xa -> 0xaa
                *slot = digit.to_digit(16)? as u8 * 17;
            }
            Some(Interpretation::rgb(rgb, 1.0, ColorFormat::Hex6))
        }
        6 => Some(Interpretation::rgb(
            [byte(0)?, byte(2)?, byte(4)?],
            1.0,
            ColorFormat::Hex6,
        )),
        8 => Some(Interpretation::rgb(
            [byte(0)?, byte(2)?, byte(4)?],
            byte(6)? as f64 / CHANNEL_MAX,
            ColorFormat::Hex8,
        )),
        _ => None,
    }
}

/// Split `name(a, b, ...)` into its arguments, matching `name`
/// case-insensitively. The parenthesis must follow the name directly.
fn function_args<'a>(text: &'a str, name: &str) -> Option<Vec<&'a str>> {
    let text = text.trim();
    let open = text.find('(')?;
    if !text[..open].eq_ignore_ascii_case(name) {
        return None;
    }
    let body = text[open + 1..].strip_suffix(')')?;
    Some(body.split(',').map(str::trim).collect())
}

/// One `rgb()` channel as a `0–255` real plus whether it was a percentage.
fn css_channel(token: &str) -> Option<(f64, bool)> {
    match token.strip_suffix('%') {
        Some(percent) => Some((parse_number(percent)? / 100.0 * CHANNEL_MAX, true)),
        None => Some((parse_number(token)?, false)),
    }
}

fn css_rgb_channels(tokens: &[&str]) -> Option<([u8; 3], bool)> {
    let mut rgb = [0u8; 3];
    let mut percents = [false; 3];
    for ((slot, percent), token) in rgb.iter_mut().zip(percents.iter_mut()).zip(tokens) {
        let (value, is_percent) = css_channel(token)?;
        *slot = channel(value);
        *percent = is_percent;
    }
    // CSS does not allow mixing numbers and percentages
    if percents.iter().any(|p| *p != percents[0]) {
        return None;
    }
    Some((rgb, percents[0]))
}

fn match_css_rgb(input: &ColorInput) -> Option<Interpretation> {
    let text = input.as_text()?;
    if let Some(args) = function_args(text, "rgb") {
        if args.len() != 3 {
            return None;
        }
        let (rgb, percent) = css_rgb_channels(&args)?;
        return Some(Interpretation::rgb(rgb, 1.0, ColorFormat::CssRgb { percent }));
    }

    let args = function_args(text, "rgba")?;
    if args.len() != 4 {
        return None;
    }
    let (rgb, percent) = css_rgb_channels(&args[..3])?;
    let alpha = parse_number(args[3])?;
    Some(Interpretation::rgb(rgb, alpha, ColorFormat::CssRgba { percent }))
}

fn percentage(token: &str) -> Option<f64> {
    Some(parse_number(token.strip_suffix('%')?)? / 100.0)
}

fn hsl_components(tokens: &[&str]) -> Option<(f64, f64, f64)> {
    let h = parse_number(tokens[0])?;
    let s_hsl = math::clamp_unit(percentage(tokens[1])?);
    let l = math::clamp_unit(percentage(tokens[2])?);
    let (s, v) = math::hsl_to_hsv(s_hsl, l);
    Some((h, s, v))
}

fn match_css_hsl(input: &ColorInput) -> Option<Interpretation> {
    let text = input.as_text()?;
    if let Some(args) = function_args(text, "hsl") {
        if args.len() != 3 {
            return None;
        }
        let (h, s, v) = hsl_components(&args)?;
        return Some(Interpretation::hsv(h, s, v, 1.0, ColorFormat::CssHsl));
    }

    let args = function_args(text, "hsla")?;
    if args.len() != 4 {
        return None;
    }
    let (h, s, v) = hsl_components(&args[..3])?;
    let alpha = parse_number(args[3])?;
    Some(Interpretation::hsv(h, s, v, alpha, ColorFormat::CssHsla))
}

fn match_sequence(input: &ColorInput) -> Option<Interpretation> {
    let values = input.as_sequence()?;
    if values.iter().any(|x| !x.is_finite()) {
        return None;
    }
    match *values {
        [r, g, b] => Some(Interpretation::rgb(
            [channel(r), channel(g), channel(b)],
            1.0,
            ColorFormat::RgbArray,
        )),
        [r, g, b, a] => Some(Interpretation::rgb(
            [channel(r), channel(g), channel(b)],
            a,
            ColorFormat::RgbaArray,
        )),
        _ => None,
    }
}

/// Reads `keys` from the record. `None` if any key is missing or not finite.
fn record_fields<const N: usize>(record: &ColorRecord, keys: [&str; N]) -> Option<[f64; N]> {
    let mut out = [0.0; N];
    for (slot, key) in out.iter_mut().zip(keys) {
        *slot = finite(*record.get(key)?)?;
    }
    Some(out)
}

/// The optional alpha key: absent is fine, present but not finite is not.
fn record_alpha(record: &ColorRecord) -> Option<(f64, bool)> {
    match record.get("a") {
        Some(a) => Some((finite(*a)?, true)),
        None => Some((1.0, false)),
    }
}

fn match_rgb_record(input: &ColorInput) -> Option<Interpretation> {
    let record = input.as_record()?;
    if ["h", "s", "v"].iter().any(|key| record.contains_key(*key)) {
        return None;
    }
    let [r, g, b] = record_fields(record, ["r", "g", "b"])?;
    let (a, alpha) = record_alpha(record)?;
    Some(Interpretation::rgb(
        [channel(r), channel(g), channel(b)],
        a,
        ColorFormat::RgbRecord { alpha },
    ))
}

fn match_hsv_record(input: &ColorInput) -> Option<Interpretation> {
    let record = input.as_record()?;
    let [h, s, v] = record_fields(record, ["h", "s", "v"])?;
    let (a, alpha) = record_alpha(record)?;
    Some(Interpretation::hsv(h, s, v, a, ColorFormat::HsvRecord { alpha }))
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use pretty_assertions::assert_eq;

    fn parse(input: impl Into<ColorInput>) -> Interpretation {
        interpret(&input.into()).expect("recognized color")
    }

    fn rejects(input: impl Into<ColorInput>) {
        let input = input.into();
        assert!(interpret(&input).is_err(), "{input:?} should not be recognized");
    }

    #[test]
    fn hex_forms() {
        assert_eq!(
            parse("#22aaff"),
            Interpretation::rgb([0x22, 0xaa, 0xff], 1.0, ColorFormat::Hex6)
        );
        assert_eq!(parse("#2af"), parse("#22aaff"));
        assert_eq!(parse("#2AF"), parse("#22aaff"));

        let with_alpha = parse("#ff000080");
        assert_eq!(with_alpha.components, Components::Rgb([255, 0, 0]));
        assert_eq!(with_alpha.format, ColorFormat::Hex8);
        assert_relative_eq!(with_alpha.alpha, 128.0 / 255.0);

        rejects("#12");
        rejects("#12345");
        rejects("#gggggg");
        rejects("ff0000");
    }

    #[test]
    fn css_rgb_clamps_out_of_range_channels() {
        let parsed = parse("rgb(300,-10,128)");
        assert_eq!(parsed.components, Components::Rgb([255, 0, 128]));
        assert_eq!(parsed.format, ColorFormat::CssRgb { percent: false });
        assert_eq!(parsed.alpha, 1.0);

        let parsed = parse("RGBA( 10 , 20 , 30 , 1.5 )");
        assert_eq!(parsed.components, Components::Rgb([10, 20, 30]));
        assert_eq!(parsed.alpha, 1.0);
        assert_eq!(parsed.format, ColorFormat::CssRgba { percent: false });
    }

    #[test]
    fn css_rgb_percentages() {
        let parsed = parse("rgb(100%, 50%, 0%)");
        assert_eq!(parsed.components, Components::Rgb([255, 128, 0]));
        assert_eq!(parsed.format, ColorFormat::CssRgb { percent: true });

        rejects("rgb(100%, 50, 0%)");
    }

    #[test]
    fn css_rgb_arity_is_strict() {
        rejects("rgb(1,2)");
        rejects("rgb(1,2,3,0.5)");
        rejects("rgba(1,2,3)");
        rejects("rgb(1,2,3");
        rejects("rgb(a,b,c)");
        rejects("rgb(NaN,0,0)");
    }

    #[test]
    fn function_name_must_touch_the_parenthesis() {
        rejects("rgb (1,2,3)");
        rejects("rgba\t(1,2,3,0.5)");
        rejects("hsl (120,100%,50%)");
        assert_eq!(parse("  rgb(1,2,3)  ").components, Components::Rgb([1, 2, 3]));
    }

    #[test]
    fn hsl_is_converted_to_hsv() {
        let parsed = parse("hsl(120, 100%, 50%)");
        assert_eq!(parsed.format, ColorFormat::CssHsl);
        let Components::Hsv { h, s, v } = parsed.components else {
            panic!("hsl should interpret as hsv, got {parsed:?}");
        };
        assert_relative_eq!(h, 120.0);
        assert_relative_eq!(s, 1.0);
        assert_relative_eq!(v, 1.0);

        let parsed = parse("hsla(480, 50%, 25%, 0.25)");
        assert_eq!(parsed.format, ColorFormat::CssHsla);
        assert_eq!(parsed.alpha, 0.25);
        let Components::Hsv { h, s, v } = parsed.components else {
            panic!("hsla should interpret as hsv, got {parsed:?}");
        };
        assert_relative_eq!(h, 120.0);
        assert_relative_eq!(v, 0.375);
        assert_relative_eq!(s, 2.0 / 3.0);

        rejects("hsl(120, 100, 50%)");
    }

    #[test]
    fn sequences() {
        let parsed = parse([255.0, 0.0, 0.0]);
        assert_eq!(parsed.format, ColorFormat::RgbArray);
        assert_eq!(parsed.components, Components::Rgb([255, 0, 0]));

        let parsed = parse([10.4, 300.0, -1.0, 0.5]);
        assert_eq!(parsed.format, ColorFormat::RgbaArray);
        assert_eq!(parsed.components, Components::Rgb([10, 255, 0]));
        assert_eq!(parsed.alpha, 0.5);

        rejects([1.0, 2.0]);
        rejects([1.0, 2.0, 3.0, 4.0, 5.0]);
        rejects([f64::NAN, 0.0, 0.0]);
    }

    #[test]
    fn rgb_records_win_only_without_hsv_keys() {
        let parsed = parse(ColorInput::record([("r", 1.0), ("g", 2.0), ("b", 3.0)]));
        assert_eq!(parsed.format, ColorFormat::RgbRecord { alpha: false });
        assert_eq!(parsed.components, Components::Rgb([1, 2, 3]));

        let parsed = parse(ColorInput::record([("r", 1.0), ("g", 2.0), ("b", 3.0), ("a", 0.2)]));
        assert_eq!(parsed.format, ColorFormat::RgbRecord { alpha: true });
        assert_eq!(parsed.alpha, 0.2);

        let mixed = ColorInput::record([
            ("r", 1.0),
            ("g", 2.0),
            ("b", 3.0),
            ("h", 90.0),
            ("s", 0.5),
            ("v", 0.5),
        ]);
        assert_eq!(parse(mixed).format, ColorFormat::HsvRecord { alpha: false });
    }

    #[test]
    fn hsv_records() {
        let parsed = parse(ColorInput::record([("h", -30.0), ("s", 2.0), ("v", 0.5), ("a", 0.5)]));
        assert_eq!(parsed.format, ColorFormat::HsvRecord { alpha: true });
        assert_eq!(
            parsed.components,
            Components::Hsv {
                h: 330.0,
                s: 1.0,
                v: 0.5
            }
        );

        rejects(ColorInput::record([("h", 1.0), ("s", 0.5)]));
        rejects(ColorInput::record([("h", 1.0), ("s", 0.5), ("v", 0.5), ("a", f64::INFINITY)]));
        rejects(ColorInput::record([("x", 1.0)]));
    }

    #[test]
    fn unrecognized_text() {
        rejects("");
        rejects("red");
        rejects("hsv(1,2,3)");
        rejects("linear-gradient(#fff, #000)");

        let error = interpret(&ColorInput::from("red")).unwrap_err();
        assert_eq!(error.to_string(), r#"not a recognized color value: Text("red")"#);
    }
}
