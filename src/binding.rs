//! Binding: keeps a [`ColorState`] in sync with an external value and turns
//! pointer gestures and text entry into live updates and commits.

use std::cell::RefCell;
use std::rc::Rc;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::color::ColorState;
use crate::constants::{ALPHA_DECIMALS, RECONCILE_EPSILON};
use crate::display::DisplayModel;
use crate::error::{ColorParseError, DragError};
use crate::input::ColorInput;
use crate::interaction::{DragField, DragSession, FieldBounds};
use crate::interpret::interpret;

/// Read/write access to the host's color value.
pub trait ValueAccessor {
    fn get(&self) -> ColorInput;
    fn set(&mut self, value: ColorInput);
}

/// A value shared with the host on the same thread.
impl ValueAccessor for Rc<RefCell<ColorInput>> {
    fn get(&self) -> ColorInput {
        self.borrow().clone()
    }

    fn set(&mut self, value: ColorInput) {
        *self.borrow_mut() = value;
    }
}

/// Runtime tuning for a [`Binding`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize), serde(default))]
pub struct BindingConfig {
    /// Tolerance for h/s/v/a when deciding whether a re-read external value
    /// differs from the live color. RGB channels are always compared exactly.
    pub reconcile_epsilon: f64,
    /// Decimal places kept by alpha drags.
    pub alpha_decimals: u32,
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            reconcile_epsilon: RECONCILE_EPSILON,
            alpha_decimals: ALPHA_DECIMALS,
        }
    }
}

/// Pointer input in the fields' shared coordinate space. Mouse and touch
/// produce the same events.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Down {
        field: DragField,
        bounds: FieldBounds,
        x: f64,
        y: f64,
    },
    Move {
        x: f64,
        y: f64,
    },
    Up,
    /// Window or focus loss. Ends a drag like a release.
    FocusLost,
}

/// Whether [`Binding::handle_event`] consumed an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventPropagation {
    Stop,
    Continue,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DragState {
    Idle,
    Dragging(DragSession),
}

type LiveListener = Box<dyn FnMut(&ColorState)>;
type CommitListener = Box<dyn FnMut(&ColorInput)>;

/// Owns the live color for one external value.
pub struct Binding<A: ValueAccessor> {
    accessor: A,
    color: ColorState,
    drag: DragState,
    text: String,
    config: BindingConfig,
    on_live_update: Option<LiveListener>,
    on_commit: Option<CommitListener>,
}

impl<A: ValueAccessor> Binding<A> {
    /// Bind to `accessor`, which must currently hold a recognizable color.
    pub fn new(accessor: A) -> Result<Self, ColorParseError> {
        Self::with_config(accessor, BindingConfig::default())
    }

    pub fn with_config(accessor: A, config: BindingConfig) -> Result<Self, ColorParseError> {
        let color = ColorState::from_input(&accessor.get())?;
        let text = color.to_string();
        Ok(Self {
            accessor,
            color,
            drag: DragState::Idle,
            text,
            config,
            on_live_update: None,
            on_commit: None,
        })
    }

    /// Called after every drag sample and every accepted edit.
    pub fn on_live_update(&mut self, listener: impl FnMut(&ColorState) + 'static) {
        self.on_live_update = Some(Box::new(listener));
    }

    /// Called once per finished drag and once per accepted discrete edit,
    /// with the value written to the host.
    pub fn on_commit(&mut self, listener: impl FnMut(&ColorInput) + 'static) {
        self.on_commit = Some(Box::new(listener));
    }

    pub fn color(&self) -> &ColorState {
        &self.color
    }

    pub fn accessor(&self) -> &A {
        &self.accessor
    }

    pub fn into_accessor(self) -> A {
        self.accessor
    }

    pub fn config(&self) -> BindingConfig {
        self.config
    }

    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.drag, DragState::Dragging(_))
    }

    /// Current contents of the text field.
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn display(&self) -> DisplayModel {
        DisplayModel {
            text: self.text.clone(),
            ..DisplayModel::of(&self.color)
        }
    }

    /// Re-read the external value and adopt it if it differs from the live
    /// color. Returns whether it was adopted.
    ///
    /// Agreeing values leave the live color untouched, which keeps HSV
    /// components that would not survive a trip through 8-bit RGB.
    pub fn refresh(&mut self) -> bool {
        let external = self.accessor.get();
        let adopted = match interpret(&external) {
            Ok(interpretation) => {
                if self.color.agrees_with(&interpretation, self.config.reconcile_epsilon) {
                    false
                } else {
                    log::debug!("adopting external color {external:?}");
                    self.color.apply(&interpretation);
                    true
                }
            }
            Err(err) => {
                log::debug!("keeping live color: {err}");
                false
            }
        };
        if !self.is_dragging() {
            self.text = self.color.to_string();
        }
        if adopted {
            self.notify_live();
        }
        adopted
    }

    /// Apply a discrete edit such as a numeric entry, then write, notify and
    /// commit.
    pub fn edit(&mut self, f: impl FnOnce(&mut ColorState)) -> ColorInput {
        self.refresh();
        f(&mut self.color);
        let value = self.write();
        self.notify_live();
        self.notify_commit(&value);
        value
    }

    /// Start a drag on `field` and apply the press position right away, so a
    /// click without movement already edits.
    pub fn begin_drag(
        &mut self,
        field: DragField,
        bounds: FieldBounds,
        x: f64,
        y: f64,
    ) -> Result<&ColorState, DragError> {
        if let DragState::Dragging(session) = self.drag {
            return Err(contract_violation(DragError::AlreadyDragging(session.field())));
        }
        self.refresh();
        log::debug!("drag started on {field:?}");
        let session = DragSession::new(field, bounds).with_alpha_decimals(self.config.alpha_decimals);
        self.drag = DragState::Dragging(session);
        self.sample(x, y)
    }

    /// Apply one pointer move of the active drag.
    pub fn drag_to(&mut self, x: f64, y: f64) -> Result<&ColorState, DragError> {
        if !self.is_dragging() {
            return Err(contract_violation(DragError::NotDragging));
        }
        self.sample(x, y)
    }

    /// Finish the active drag and commit the final value.
    pub fn end_drag(&mut self) -> Result<ColorInput, DragError> {
        let DragState::Dragging(session) = self.drag else {
            return Err(contract_violation(DragError::NotDragging));
        };
        self.drag = DragState::Idle;
        log::debug!(
            "drag on {:?} finished after {} samples",
            session.field(),
            session.samples()
        );
        let value = self.color.to_original();
        self.text = self.color.to_string();
        self.notify_commit(&value);
        Ok(value)
    }

    fn sample(&mut self, x: f64, y: f64) -> Result<&ColorState, DragError> {
        let DragState::Dragging(ref mut session) = self.drag else {
            return Err(DragError::NotDragging);
        };
        session.apply(&mut self.color, x, y);
        log::trace!("drag sample -> {}", self.color);
        self.write();
        self.notify_live();
        Ok(&self.color)
    }

    /// Dispatch a pointer event. Moves and releases outside of a drag are
    /// ignored, as is focus loss.
    pub fn handle_event(&mut self, event: PointerEvent) -> Result<EventPropagation, DragError> {
        match event {
            PointerEvent::Down { field, bounds, x, y } => {
                self.begin_drag(field, bounds, x, y)?;
                Ok(EventPropagation::Stop)
            }
            PointerEvent::Move { x, y } => {
                if self.is_dragging() {
                    self.sample(x, y)?;
                    Ok(EventPropagation::Stop)
                } else {
                    Ok(EventPropagation::Continue)
                }
            }
            PointerEvent::Up | PointerEvent::FocusLost => {
                if self.is_dragging() {
                    self.end_drag()?;
                }
                Ok(EventPropagation::Continue)
            }
        }
    }

    /// Replace the text field contents without interpreting them.
    pub fn edit_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Interpret the text field (on Enter or blur). On success the color and
    /// its format are replaced and committed; otherwise the text reverts and
    /// nothing changes.
    pub fn commit_text(&mut self) -> Result<ColorInput, ColorParseError> {
        let typed = ColorInput::Text(self.text.clone());
        match interpret(&typed) {
            Ok(interpretation) => {
                log::debug!("text entry accepted: {}", self.text);
                self.color.apply(&interpretation);
                let value = self.write();
                self.notify_live();
                self.notify_commit(&value);
                Ok(value)
            }
            Err(err) => {
                log::warn!("text entry rejected: {err}");
                self.text = self.color.to_string();
                Err(err)
            }
        }
    }

    /// Copy the text rendering to the system clipboard.
    #[cfg(feature = "clipboard")]
    pub fn copy_to_clipboard(&self) -> Result<(), arboard::Error> {
        let mut clipboard = arboard::Clipboard::new()?;
        clipboard.set_text(self.color.to_string())
    }

    fn write(&mut self) -> ColorInput {
        let value = self.color.to_original();
        self.accessor.set(value.clone());
        self.text = self.color.to_string();
        value
    }

    fn notify_live(&mut self) {
        if let Some(listener) = &mut self.on_live_update {
            listener(&self.color);
        }
    }

    fn notify_commit(&mut self, value: &ColorInput) {
        if let Some(listener) = &mut self.on_commit {
            listener(value);
        }
    }
}

/// Misuse of the drag API. Panics in debug builds, reported as an error
/// otherwise.
fn contract_violation(error: DragError) -> DragError {
    log::warn!("drag contract violated: {error}");
    if cfg!(debug_assertions) {
        panic!("drag contract violated: {error}");
    }
    error
}
