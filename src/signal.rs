//! Floem integration: a reactive signal as the bound value.

use floem::reactive::{RwSignal, SignalGet, SignalUpdate};

use crate::binding::ValueAccessor;
use crate::input::ColorInput;

/// Reads are untracked so polling the value from an event handler does not
/// subscribe the caller to it.
impl ValueAccessor for RwSignal<ColorInput> {
    fn get(&self) -> ColorInput {
        SignalGet::get_untracked(self)
    }

    fn set(&mut self, value: ColorInput) {
        SignalUpdate::set(self, value);
    }
}
