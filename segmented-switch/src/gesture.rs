//! Translation of host gesture events into selection commands.
//!
//! ## Usage
//!
//! The host's gesture recognisers report taps and pans as [`GestureEvent`]s.
//! [`SegmentedSwitch::handle_gesture`](crate::SegmentedSwitch::handle_gesture)
//! runs them through a [`GestureInterpreter`] and answers with a
//! [`GestureDisposition`]; an ignored gesture should be offered to the next
//! responder (for example an enclosing scroll view).

use crate::geometry::{Point, Rect, Size, index_at, slice_width};

/// Gesture input reported by the host toolkit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureEvent {
    /// A tap at `position`, in the control's coordinates.
    Tap {
        /// Contact point.
        position: Point,
    },
    /// A pan started at `position`.
    DragBegan {
        /// Initial contact point.
        position: Point,
    },
    /// The pan moved by `delta` since the previous event.
    DragMoved {
        /// Translation since the last `DragBegan` or `DragMoved`.
        delta: Point,
    },
    /// The pan ended normally.
    DragEnded,
    /// The host cancelled the pan.
    DragCancelled,
    /// The host's recogniser failed mid-pan.
    DragFailed,
}

/// Whether the switch handled a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureDisposition {
    /// The switch acted on the event.
    Consumed,
    /// The event should fall through to the next responder.
    Ignored,
}

/// State the interpreter needs to resolve an event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureContext {
    /// Size of the control.
    pub container: Size,
    /// Number of segments.
    pub count: usize,
    /// Current (live) indicator bounds.
    pub indicator: Rect,
    /// Whether the switch accepts input.
    pub enabled: bool,
}

/// Selection command resolved from a gesture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GestureCommand {
    /// Jump to a segment.
    Select {
        /// Segment under the tap; may be negative or past the last segment.
        index: isize,
        /// Whether the jump animates.
        animated: bool,
    },
    /// Start dragging the indicator.
    BeginDrag,
    /// Move the indicator.
    MoveDrag {
        /// Horizontal translation in points.
        delta_x: f32,
        /// Width of one segment slice.
        slice_width: f32,
    },
    /// Release the indicator and settle on the nearest segment.
    EndDrag,
}

/// Tracks whether the current pan belongs to the switch.
///
/// A pan is captured only when it begins on the indicator. Moves and ends of
/// a pan that was not captured are ignored, so the rest of that gesture can
/// go to another responder.
#[derive(Debug, Clone, Default)]
pub struct GestureInterpreter {
    drag_captured: bool,
}

impl GestureInterpreter {
    /// Creates an interpreter with no pan in progress.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a captured pan is in progress.
    pub fn is_tracking_drag(&self) -> bool {
        self.drag_captured
    }

    /// Forgets any captured pan.
    pub fn reset(&mut self) {
        self.drag_captured = false;
    }

    /// Resolves `event` into a command, or `None` when it is not for the
    /// switch.
    pub fn interpret(
        &mut self,
        event: GestureEvent,
        context: &GestureContext,
    ) -> Option<GestureCommand> {
        let interactive = context.enabled && context.count > 0;
        match event {
            GestureEvent::Tap { position } => {
                if !interactive {
                    return None;
                }
                let index = index_at(context.container, position.x, context.count)?;
                Some(GestureCommand::Select {
                    index,
                    animated: false,
                })
            }
            GestureEvent::DragBegan { position } => {
                self.drag_captured = interactive && context.indicator.contains(position);
                self.drag_captured.then_some(GestureCommand::BeginDrag)
            }
            GestureEvent::DragMoved { delta } => {
                self.drag_captured.then(|| GestureCommand::MoveDrag {
                    delta_x: delta.x,
                    slice_width: slice_width(context.container, context.count),
                })
            }
            GestureEvent::DragEnded | GestureEvent::DragCancelled | GestureEvent::DragFailed => {
                std::mem::take(&mut self.drag_captured).then_some(GestureCommand::EndDrag)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::indicator_bounds;

    fn context(position: f32) -> GestureContext {
        let container = Size::new(300.0, 40.0);
        GestureContext {
            container,
            count: 3,
            indicator: indicator_bounds(container, position, 3, 2.0),
            enabled: true,
        }
    }

    #[test]
    fn test_tap_resolves_slice() {
        let mut interpreter = GestureInterpreter::new();
        let ctx = context(0.0);
        assert_eq!(
            interpreter.interpret(
                GestureEvent::Tap {
                    position: Point::new(50.0, 20.0)
                },
                &ctx
            ),
            Some(GestureCommand::Select {
                index: 0,
                animated: false
            })
        );
        assert_eq!(
            interpreter.interpret(
                GestureEvent::Tap {
                    position: Point::new(250.0, 20.0)
                },
                &ctx
            ),
            Some(GestureCommand::Select {
                index: 2,
                animated: false
            })
        );
    }

    #[test]
    fn test_tap_outside_keeps_raw_index() {
        let mut interpreter = GestureInterpreter::new();
        let ctx = context(1.0);
        let tap = |x: f32| GestureEvent::Tap {
            position: Point::new(x, 20.0),
        };
        assert_eq!(
            interpreter.interpret(tap(-150.0), &ctx),
            Some(GestureCommand::Select {
                index: -2,
                animated: false
            })
        );
        assert_eq!(
            interpreter.interpret(tap(-0.5), &ctx),
            Some(GestureCommand::Select {
                index: -1,
                animated: false
            })
        );
        assert_eq!(interpreter.interpret(tap(f32::NAN), &ctx), None);
    }

    #[test]
    fn test_drag_outside_indicator_is_ignored() {
        let mut interpreter = GestureInterpreter::new();
        let ctx = context(0.0);
        let begin = GestureEvent::DragBegan {
            position: Point::new(150.0, 20.0),
        };
        assert_eq!(interpreter.interpret(begin, &ctx), None);
        let moved = GestureEvent::DragMoved {
            delta: Point::new(30.0, 0.0),
        };
        assert_eq!(interpreter.interpret(moved, &ctx), None);
        assert_eq!(interpreter.interpret(GestureEvent::DragEnded, &ctx), None);
    }

    #[test]
    fn test_captured_drag_sequence() {
        let mut interpreter = GestureInterpreter::new();
        let ctx = context(0.0);
        let begin = GestureEvent::DragBegan {
            position: Point::new(50.0, 20.0),
        };
        assert_eq!(
            interpreter.interpret(begin, &ctx),
            Some(GestureCommand::BeginDrag)
        );
        assert!(interpreter.is_tracking_drag());
        let moved = GestureEvent::DragMoved {
            delta: Point::new(12.0, 4.0),
        };
        assert_eq!(
            interpreter.interpret(moved, &ctx),
            Some(GestureCommand::MoveDrag {
                delta_x: 12.0,
                slice_width: 100.0
            })
        );
        assert_eq!(
            interpreter.interpret(GestureEvent::DragCancelled, &ctx),
            Some(GestureCommand::EndDrag)
        );
        assert!(!interpreter.is_tracking_drag());
        assert_eq!(interpreter.interpret(GestureEvent::DragFailed, &ctx), None);
    }

    #[test]
    fn test_disabled_or_empty_switch_ignores_input() {
        let mut interpreter = GestureInterpreter::new();
        let disabled = GestureContext {
            enabled: false,
            ..context(0.0)
        };
        let tap = GestureEvent::Tap {
            position: Point::new(50.0, 20.0),
        };
        assert_eq!(interpreter.interpret(tap, &disabled), None);

        let empty = GestureContext {
            count: 0,
            indicator: Rect::ZERO,
            ..context(0.0)
        };
        assert_eq!(interpreter.interpret(tap, &empty), None);
        let begin = GestureEvent::DragBegan {
            position: Point::ZERO,
        };
        assert_eq!(interpreter.interpret(begin, &empty), None);
    }
}
