//! What a renderer needs to draw the picker, without drawing anything.

use crate::color::ColorState;
use crate::format::ColorFormat;
use crate::interaction::{knob_position, DragField};
use crate::math;

/// Snapshot of the picker's visual state for one color.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayModel {
    /// Contents of the text field.
    pub text: String,
    /// Gray level (0 or 255) for text and knob borders drawn over the color.
    pub contrast: u8,
    /// The color without alpha, for the 2D knob fill.
    pub knob_fill: String,
    /// Fully saturated, full-value hue behind the saturation/value field.
    pub field_hue: String,
    /// The color with alpha, for swatches and the text field background.
    pub swatch: String,
    /// Normalized knob center on the saturation/value field.
    pub sv_knob: (f64, f64),
    /// Normalized knob height on the hue strip.
    pub hue_knob: f64,
    /// Normalized knob height on the alpha strip.
    #[cfg(feature = "alpha")]
    pub alpha_knob: f64,
}

impl DisplayModel {
    pub fn of(state: &ColorState) -> Self {
        let [r, g, b] = state.rgb();
        let pure_hue = ColorState::from_hsva(state.h(), 1.0, 1.0, 1.0, ColorFormat::Hex6);
        Self {
            text: state.to_string(),
            contrast: math::contrast_flip(r, g, b),
            knob_fill: state.to_hex_string(),
            field_hue: pure_hue.to_hex_string(),
            swatch: state.to_rgba_string(),
            sv_knob: knob_position(DragField::SaturationValue, state),
            hue_knob: knob_position(DragField::Hue, state).1,
            #[cfg(feature = "alpha")]
            alpha_knob: knob_position(DragField::Alpha, state).1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use pretty_assertions::assert_eq;

    use crate::input::ColorInput;

    #[test]
    fn dark_translucent_blue() {
        let color = ColorState::from_input(&ColorInput::from("rgba(0,0,128,0.5)")).expect("rgba");
        let display = DisplayModel::of(&color);

        assert_eq!(display.text, "rgba(0,0,128,0.5)");
        assert_eq!(display.contrast, 255);
        assert_eq!(display.knob_fill, "#000080");
        assert_eq!(display.field_hue, "#0000ff");
        assert_eq!(display.swatch, "rgba(0,0,128,0.5)");
        assert_eq!(display.sv_knob.0, 1.0);
        assert!((display.sv_knob.1 - (1.0 - 128.0 / 255.0)).abs() < 1e-12);
        assert!((display.hue_knob - 1.0 / 3.0).abs() < 1e-12);
        #[cfg(feature = "alpha")]
        assert_eq!(display.alpha_knob, 0.5);
    }

    #[test]
    fn light_colors_get_dark_text() {
        let color = ColorState::from_input(&ColorInput::from([250.0, 250.0, 200.0])).expect("array");
        let display = DisplayModel::of(&color);
        assert_eq!(display.contrast, 0);
        assert_eq!(display.text, "#fafac8");
    }
}
