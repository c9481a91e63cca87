//! Encoding tags remembered for format-preserving output.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// The shape a color was last supplied in.
///
/// Each variant carries what is needed to regenerate the exact shape, so
/// rendering is total over all variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ColorFormat {
    /// `#rrggbb`. Also the tag for `#rgb`, which is re-emitted in long form.
    #[default]
    Hex6,
    /// `#rrggbbaa`.
    Hex8,
    /// `rgb(r,g,b)`, with channels as integers or percentages.
    CssRgb { percent: bool },
    /// `rgba(r,g,b,a)`.
    CssRgba { percent: bool },
    /// `hsl(h,s%,l%)`.
    CssHsl,
    /// `hsla(h,s%,l%,a)`.
    CssHsla,
    /// `[r, g, b]`.
    RgbArray,
    /// `[r, g, b, a]`.
    RgbaArray,
    /// `{r, g, b}` with an optional `a`.
    RgbRecord { alpha: bool },
    /// `{h, s, v}` with an optional `a`.
    HsvRecord { alpha: bool },
}

impl ColorFormat {
    /// Whether the format renders to a string.
    pub fn is_textual(self) -> bool {
        matches!(
            self,
            Self::Hex6
                | Self::Hex8
                | Self::CssRgb { .. }
                | Self::CssRgba { .. }
                | Self::CssHsl
                | Self::CssHsla
        )
    }

    /// Whether the rendered value includes alpha.
    pub fn has_alpha(self) -> bool {
        match self {
            Self::Hex8 | Self::CssRgba { .. } | Self::CssHsla | Self::RgbaArray => true,
            Self::RgbRecord { alpha } | Self::HsvRecord { alpha } => alpha,
            Self::Hex6 | Self::CssRgb { .. } | Self::CssHsl | Self::RgbArray => false,
        }
    }
}
