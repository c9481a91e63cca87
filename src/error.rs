//! Error types.

use thiserror::Error;

use crate::interaction::DragField;

/// A value that matches none of the supported color encodings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ColorParseError {
    #[error("not a recognized color value: {input}")]
    NotRecognized { input: String },
}

impl ColorParseError {
    pub(crate) fn not_recognized(input: impl std::fmt::Debug) -> Self {
        Self::NotRecognized {
            input: format!("{input:?}"),
        }
    }
}

/// Drag calls that do not match the pointer's press/release sequence.
///
/// These only happen when events are wired up incorrectly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DragError {
    #[error("a drag on the {0:?} field is already in progress")]
    AlreadyDragging(DragField),
    #[error("no drag is in progress")]
    NotDragging,
}
