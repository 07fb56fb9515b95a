//! Error types reported by the segmented switch.
//!
//! Selection errors never escape the infallible public setters; they exist so
//! the `try_*` variants and style validation can explain what was rejected.

use thiserror::Error;

/// Errors produced when a request cannot be applied to the switch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SwitchError {
    /// A selection targeted an index outside `0..count`.
    #[error("segment index {index} is out of range for {count} segment(s)")]
    IndexOutOfRange {
        /// The requested index; negative when a tap landed left of the
        /// control.
        index: isize,
        /// The number of segments at the time of the request.
        count: usize,
    },
    /// A style value is negative or not finite.
    #[error("invalid style value for `{field}`: {value}")]
    InvalidStyle {
        /// Name of the offending style field.
        field: &'static str,
        /// The rejected value.
        value: f32,
    },
}

/// Checks that `index` addresses one of `count` segments.
pub(crate) fn check_index(index: isize, count: usize) -> Result<usize, SwitchError> {
    usize::try_from(index)
        .ok()
        .filter(|&index| index < count)
        .ok_or(SwitchError::IndexOutOfRange { index, count })
}
