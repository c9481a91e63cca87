//! ColorState: the canonical color value behind a binding.
//!
//! Stores HSV + alpha as the canonical representation with 8-bit RGB kept in
//! sync on every write. Remembers the format it was last supplied in so it
//! can be written back in the same shape.

use std::fmt;

use crate::constants::{CHANNEL_MAX, CSS_DECIMALS};
use crate::error::ColorParseError;
use crate::format::ColorFormat;
use crate::input::ColorInput;
use crate::interpret::{interpret, Components, Interpretation};
use crate::math;

/// HSV color with alpha, plus the derived RGB channels.
///
/// Every setter leaves both representations consistent. None of them touch
/// the remembered [`ColorFormat`].
#[derive(Debug, Clone, PartialEq)]
pub struct ColorState {
    h: f64,
    s: f64,
    v: f64,
    a: f64,
    rgb: [u8; 3],
    format: ColorFormat,
}

impl Default for ColorState {
    fn default() -> Self {
        Self {
            h: 0.0,
            s: 0.0,
            v: 0.5,
            a: 1.0,
            rgb: [128, 128, 128],
            format: ColorFormat::Hex6,
        }
    }
}

impl ColorState {
    /// Hue in degrees, `[0, 360)`.
    pub fn h(&self) -> f64 {
        self.h
    }
    /// Saturation, `0.0–1.0`.
    pub fn s(&self) -> f64 {
        self.s
    }
    /// Value, `0.0–1.0`.
    pub fn v(&self) -> f64 {
        self.v
    }
    /// Alpha, `0.0–1.0`.
    pub fn a(&self) -> f64 {
        self.a
    }
    pub fn r(&self) -> u8 {
        self.rgb[0]
    }
    pub fn g(&self) -> u8 {
        self.rgb[1]
    }
    pub fn b(&self) -> u8 {
        self.rgb[2]
    }
    pub fn rgb(&self) -> [u8; 3] {
        self.rgb
    }
    /// The format used by [`to_original`](Self::to_original).
    pub fn format(&self) -> ColorFormat {
        self.format
    }

    /// Packed `0xRRGGBB`.
    pub fn hex(&self) -> u32 {
        let [r, g, b] = self.rgb;
        (r as u32) << 16 | (g as u32) << 8 | b as u32
    }
}

impl ColorState {
    /// Create from any supported encoding.
    pub fn from_input(input: &ColorInput) -> Result<Self, ColorParseError> {
        let mut state = Self::default();
        state.set_input(input)?;
        Ok(state)
    }

    /// Create from HSV + alpha, remembering `format` for output.
    pub fn from_hsva(h: f64, s: f64, v: f64, a: f64, format: ColorFormat) -> Self {
        let mut state = Self {
            format,
            ..Self::default()
        };
        state.set_hsv(h, s, v);
        state.set_a(a);
        state
    }

    /// Replace the color and its format with a newly interpreted value.
    /// Encodings without alpha keep the current alpha.
    ///
    /// On failure the state is left untouched.
    pub fn set_input(&mut self, input: &ColorInput) -> Result<(), ColorParseError> {
        let interpretation = interpret(input)?;
        self.apply(&interpretation);
        Ok(())
    }

    /// Adopt an interpretation, including its format. Alpha is only taken
    /// from encodings that carry it.
    pub(crate) fn apply(&mut self, interpretation: &Interpretation) {
        match interpretation.components {
            Components::Rgb(rgb) => {
                self.rgb = rgb;
                self.recompute_hsv();
            }
            Components::Hsv { h, s, v } => {
                self.h = h;
                self.s = s;
                self.v = v;
                self.recompute_rgb();
            }
        }
        if interpretation.format.has_alpha() {
            self.a = interpretation.alpha;
        }
        self.format = interpretation.format;
    }

    /// Whether `interpretation` carries exactly the components this state
    /// already holds. Only the components the encoding provides are
    /// compared: channels for RGB encodings, h/s/v for HSV ones, and alpha
    /// only when the encoding has it.
    pub(crate) fn agrees_with(&self, interpretation: &Interpretation, epsilon: f64) -> bool {
        let close = |x: f64, y: f64| (x - y).abs() <= epsilon;
        let components_agree = match interpretation.components {
            Components::Rgb(rgb) => rgb == self.rgb,
            Components::Hsv { h, s, v } => close(h, self.h) && close(s, self.s) && close(v, self.v),
        };
        let alpha_agrees =
            !interpretation.format.has_alpha() || close(interpretation.alpha, self.a);
        components_agree && alpha_agrees
    }

    fn recompute_rgb(&mut self) {
        let [r, g, b] = math::hsv_to_rgb(self.h, self.s, self.v);
        self.rgb = [math::to_channel(r), math::to_channel(g), math::to_channel(b)];
    }

    /// Greys have no hue, so the previous hue is kept for them.
    fn recompute_hsv(&mut self) {
        let [r, g, b] = self.rgb.map(f64::from);
        let (h, s, v) = math::rgb_to_hsv(r, g, b);
        if let Some(h) = h {
            self.h = h;
        }
        self.s = s;
        self.v = v;
    }
}

fn ignore_nan(component: &str, x: f64) -> Option<f64> {
    if x.is_nan() {
        log::warn!("ignoring NaN for color component {component}");
        None
    } else {
        Some(x)
    }
}

// Setters: clamp, then reconcile the other basis.
impl ColorState {
    pub fn set_h(&mut self, h: f64) {
        if let Some(h) = ignore_nan("h", h).filter(|h| h.is_finite()) {
            self.h = math::normalize_hue(h);
            self.recompute_rgb();
        }
    }

    pub fn set_s(&mut self, s: f64) {
        if let Some(s) = ignore_nan("s", s) {
            self.s = math::clamp_unit(s);
            self.recompute_rgb();
        }
    }

    pub fn set_v(&mut self, v: f64) {
        if let Some(v) = ignore_nan("v", v) {
            self.v = math::clamp_unit(v);
            self.recompute_rgb();
        }
    }

    /// Set saturation and value together, as the 2D field does.
    pub fn set_sv(&mut self, s: f64, v: f64) {
        if let (Some(s), Some(v)) = (ignore_nan("s", s), ignore_nan("v", v)) {
            self.s = math::clamp_unit(s);
            self.v = math::clamp_unit(v);
            self.recompute_rgb();
        }
    }

    pub fn set_hsv(&mut self, h: f64, s: f64, v: f64) {
        self.set_h(h);
        self.set_sv(s, v);
    }

    pub fn set_a(&mut self, a: f64) {
        if let Some(a) = ignore_nan("a", a) {
            self.a = math::clamp_unit(a);
        }
    }

    pub fn set_r(&mut self, r: f64) {
        self.set_channel(0, "r", r);
    }

    pub fn set_g(&mut self, g: f64) {
        self.set_channel(1, "g", g);
    }

    pub fn set_b(&mut self, b: f64) {
        self.set_channel(2, "b", b);
    }

    pub fn set_rgb(&mut self, rgb: [u8; 3]) {
        self.rgb = rgb;
        self.recompute_hsv();
    }

    /// Set from packed `0xRRGGBB`; bits above 24 are ignored.
    pub fn set_hex(&mut self, hex: u32) {
        self.set_rgb([(hex >> 16) as u8, (hex >> 8) as u8, hex as u8]);
    }

    fn set_channel(&mut self, index: usize, name: &str, x: f64) {
        if let Some(x) = ignore_nan(name, x) {
            self.rgb[index] = math::to_channel(x);
            self.recompute_hsv();
        }
    }
}

// Rendering.
impl ColorState {
    /// Write the color back in the shape it was supplied in.
    ///
    /// Shapes without alpha drop it, even if it was edited.
    pub fn to_original(&self) -> ColorInput {
        let [r, g, b] = self.rgb.map(f64::from);
        match self.format {
            ColorFormat::RgbArray => ColorInput::Sequence(vec![r, g, b]),
            ColorFormat::RgbaArray => ColorInput::Sequence(vec![r, g, b, self.a]),
            ColorFormat::RgbRecord { alpha } => {
                let mut fields = vec![("r", r), ("g", g), ("b", b)];
                if alpha {
                    fields.push(("a", self.a));
                }
                ColorInput::record(fields)
            }
            ColorFormat::HsvRecord { alpha } => {
                let mut fields = vec![("h", self.h), ("s", self.s), ("v", self.v)];
                if alpha {
                    fields.push(("a", self.a));
                }
                ColorInput::record(fields)
            }
            ColorFormat::Hex6
            | ColorFormat::Hex8
            | ColorFormat::CssRgb { .. }
            | ColorFormat::CssRgba { .. }
            | ColorFormat::CssHsl
            | ColorFormat::CssHsla => ColorInput::Text(self.render_text(self.format)),
        }
    }

    /// `#rrggbb`, lowercase.
    pub fn to_hex_string(&self) -> String {
        let [r, g, b] = self.rgb;
        format!("#{r:02x}{g:02x}{b:02x}")
    }

    /// `rgba(r,g,b,a)`.
    pub fn to_rgba_string(&self) -> String {
        let [r, g, b] = self.rgb;
        format!("rgba({r},{g},{b},{})", css_number(self.a))
    }

    fn render_text(&self, format: ColorFormat) -> String {
        let [r, g, b] = self.rgb;
        match format {
            ColorFormat::Hex8 => {
                format!("{}{:02x}", self.to_hex_string(), math::to_channel(self.a * CHANNEL_MAX))
            }
            ColorFormat::CssRgb { percent: false } => format!("rgb({r},{g},{b})"),
            ColorFormat::CssRgb { percent: true } => {
                let [r, g, b] = self.rgb.map(percent_of_channel);
                format!("rgb({r},{g},{b})")
            }
            ColorFormat::CssRgba { percent: false } => self.to_rgba_string(),
            ColorFormat::CssRgba { percent: true } => {
                let [r, g, b] = self.rgb.map(percent_of_channel);
                format!("rgba({r},{g},{b},{})", css_number(self.a))
            }
            ColorFormat::CssHsl | ColorFormat::CssHsla => {
                let (s, l) = math::hsv_to_hsl(self.s, self.v);
                let (h, s, l) = (css_number(self.h), css_number(s * 100.0), css_number(l * 100.0));
                if format == ColorFormat::CssHsla {
                    format!("hsla({h},{s}%,{l}%,{})", css_number(self.a))
                } else {
                    format!("hsl({h},{s}%,{l}%)")
                }
            }
            ColorFormat::Hex6
            | ColorFormat::RgbArray
            | ColorFormat::RgbaArray
            | ColorFormat::RgbRecord { .. }
            | ColorFormat::HsvRecord { .. } => self.to_hex_string(),
        }
    }
}

fn css_number(x: f64) -> String {
    math::format_number(x, CSS_DECIMALS)
}

fn percent_of_channel(channel: u8) -> String {
    format!("{}%", css_number(channel as f64 / CHANNEL_MAX * 100.0))
}

/// Text rendering: the remembered format for textual formats, otherwise
/// hex for opaque colors and `rgba()` for translucent ones.
impl fmt::Display for ColorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.format.is_textual() {
            f.write_str(&self.render_text(self.format))
        } else if self.a < 1.0 {
            f.write_str(&self.to_rgba_string())
        } else {
            f.write_str(&self.to_hex_string())
        }
    }
}
