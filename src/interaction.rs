//! Pointer-to-component mapping for the picker's drag fields.
//!
//! Fields have their origin at the top-left, while value, hue and alpha grow
//! upwards, so the vertical axis is inverted everywhere.

use crate::color::ColorState;
use crate::constants::{ALPHA_DECIMALS, HUE_RANGE};
#[cfg(feature = "alpha")]
use crate::math;

/// Which draggable field a session is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DragField {
    /// 2D field: x → saturation, y → value.
    SaturationValue,
    /// Vertical hue strip.
    Hue,
    /// Vertical alpha strip.
    #[cfg(feature = "alpha")]
    Alpha,
}

/// A field's rectangle in the pointer's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldBounds {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl FieldBounds {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// From the edges of a bounding rectangle.
    pub fn from_edges(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self::new(left, top, right - left, bottom - top)
    }

    /// Map a pointer position into `[0, 1] × [0, 1]`, clamping positions
    /// outside the field to the nearest edge. Degenerate axes map to 0.
    pub fn normalize(&self, x: f64, y: f64) -> (f64, f64) {
        (
            normalize_axis(x - self.left, self.width),
            normalize_axis(y - self.top, self.height),
        )
    }

    /// Inverse of [`normalize`](Self::normalize) for in-range positions.
    pub fn locate(&self, nx: f64, ny: f64) -> (f64, f64) {
        (self.left + nx * self.width, self.top + ny * self.height)
    }
}

fn normalize_axis(offset: f64, extent: f64) -> f64 {
    if extent > 0.0 && offset.is_finite() {
        (offset / extent).clamp(0.0, 1.0)
    } else {
        0.0
    }
}

/// Apply an already normalized position to `state`.
///
/// Vertical strips ignore `nx`.
pub fn apply_normalized(field: DragField, state: &mut ColorState, nx: f64, ny: f64, alpha_decimals: u32) {
    let nx = nx.clamp(0.0, 1.0);
    let ny = ny.clamp(0.0, 1.0);
    match field {
        DragField::SaturationValue => state.set_sv(nx, 1.0 - ny),
        DragField::Hue => state.set_h((1.0 - ny) * HUE_RANGE),
        #[cfg(feature = "alpha")]
        DragField::Alpha => state.set_a(math::round_to(1.0 - ny, alpha_decimals)),
    }
    #[cfg(not(feature = "alpha"))]
    let _ = alpha_decimals;
}

/// Where a field's knob sits for `state`, in normalized field coordinates.
///
/// Vertical strips report `x = 0.5`.
pub fn knob_position(field: DragField, state: &ColorState) -> (f64, f64) {
    match field {
        DragField::SaturationValue => (state.s(), 1.0 - state.v()),
        DragField::Hue => (0.5, 1.0 - state.h() / HUE_RANGE),
        #[cfg(feature = "alpha")]
        DragField::Alpha => (0.5, 1.0 - state.a()),
    }
}

/// One press-drag-release gesture on a field.
///
/// The bounds are captured when the gesture starts and reused for every
/// sample, so layout changes mid-drag do not make the knob jump.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSession {
    field: DragField,
    bounds: FieldBounds,
    alpha_decimals: u32,
    samples: usize,
}

impl DragSession {
    pub fn new(field: DragField, bounds: FieldBounds) -> Self {
        Self {
            field,
            bounds,
            alpha_decimals: ALPHA_DECIMALS,
            samples: 0,
        }
    }

    #[must_use]
    pub fn with_alpha_decimals(mut self, decimals: u32) -> Self {
        self.alpha_decimals = decimals;
        self
    }

    pub fn field(&self) -> DragField {
        self.field
    }

    pub fn bounds(&self) -> FieldBounds {
        self.bounds
    }

    /// Number of samples applied so far.
    pub fn samples(&self) -> usize {
        self.samples
    }

    /// Map a raw pointer position onto `state` and return the updated color.
    pub fn apply<'s>(&mut self, state: &'s mut ColorState, x: f64, y: f64) -> &'s ColorState {
        let (nx, ny) = self.bounds.normalize(x, y);
        apply_normalized(self.field, state, nx, ny, self.alpha_decimals);
        self.samples += 1;
        state
    }
}
