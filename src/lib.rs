//! # hsv-binding
//!
//! The color model behind an HSV color picker, without the widget.
//!
//! A [`Binding`] reads a color from the host in any supported encoding (hex,
//! `rgb()`/`rgba()`, `hsl()`/`hsla()`, number arrays, `{r,g,b}` and
//! `{h,s,v}` records), lets pointer drags and text entry edit it in HSV, and
//! writes every change back in the encoding the host used.
//!
//! ## Usage
//!
//! ```rust
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! use hsv_binding::{Binding, ColorInput, DragField, FieldBounds};
//!
//! let value = Rc::new(RefCell::new(ColorInput::from("#ff0000")));
//! let mut binding = Binding::new(value.clone()).unwrap();
//!
//! // Drag to the vertical middle of a 100×100 saturation/value field.
//! let field = FieldBounds::new(0.0, 0.0, 100.0, 100.0);
//! binding.begin_drag(DragField::SaturationValue, field, 100.0, 50.0).unwrap();
//! binding.end_drag().unwrap();
//!
//! assert_eq!(*value.borrow(), ColorInput::from("#800000"));
//! ```

mod binding;
mod color;
mod constants;
mod display;
mod error;
mod format;
mod input;
mod interaction;
mod interpret;
mod math;
#[cfg(feature = "floem")]
mod signal;

pub use binding::{
    Binding, BindingConfig, DragState, EventPropagation, PointerEvent, ValueAccessor,
};
pub use color::ColorState;
pub use display::DisplayModel;
pub use error::{ColorParseError, DragError};
pub use format::ColorFormat;
pub use input::{ColorInput, ColorRecord};
pub use interaction::{apply_normalized, knob_position, DragField, DragSession, FieldBounds};
pub use interpret::{interpret, Components, Interpretation};
