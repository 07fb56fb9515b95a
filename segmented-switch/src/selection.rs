//! Selection state machine.
//!
//! The machine owns the authoritative selected index and the transient drag
//! position, and decides which notifications a transition produces. It never
//! touches geometry or timers: every transition returns a [`Transition`]
//! describing the events to emit and the settle to perform, and the owning
//! control applies it.
//!
//! # Phases
//!
//! ```text
//!            select / drag_end              animation done
//!   Idle ─────────────────────────▶ Settling ──────────────▶ Idle
//!    │  ▲                               │
//!    │  └──── non-animated settle ──────┘ (drag_begin abandons)
//!    ▼                                  ▼
//!   Dragging ◀────────── drag_begin ────┘
//! ```
//!
//! # Notifications
//!
//! - [`SwitchEvent::WillMove`] fires whenever a settle target is chosen, even
//!   when it equals the current index or is out of range.
//! - [`SwitchEvent::ValueChanged`] fires at settle start, and only when the
//!   target differs from the index that was active when the gesture began.
//! - [`SwitchEvent::DidMove`] fires once the settle completes.

use smallvec::SmallVec;

use crate::{
    error::{SwitchError, check_index},
    geometry::{clamp_position, settle_index},
};

/// Snapshot of the selection owned by [`SelectionMachine`].
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct SelectionState {
    /// The selected segment. Always `< count` when there is at least one
    /// segment, `0` otherwise.
    pub selected_index: usize,
    /// Continuous indicator position in segment units while a drag is
    /// active, `None` otherwise.
    pub drag_offset: Option<f32>,
}

/// Notifications produced by selection transitions, in emission order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwitchEvent {
    /// A settle target was chosen. Out-of-range requests, including
    /// negative ones, are announced too.
    WillMove(isize),
    /// The selected index changed relative to the start of the gesture.
    ValueChanged(usize),
    /// The indicator came to rest on the segment.
    DidMove(usize),
}

/// Current phase of the machine.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub enum Phase {
    /// The indicator rests on the selected index.
    #[default]
    Idle,
    /// The indicator follows a drag.
    Dragging {
        /// Selected index when the drag began.
        origin_index: usize,
        /// Indicator position when the drag began.
        start_position: f32,
        /// Accumulated horizontal translation in points.
        translation: f32,
    },
    /// The indicator is animating toward `to_index`.
    Settling {
        /// Position the settle started from.
        from_position: f32,
        /// Segment being settled on.
        to_index: usize,
    },
}

/// A settle the owner has to carry out.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SettleRequest {
    /// Live indicator position when the settle was requested.
    pub from: f32,
    /// Segment to settle on.
    pub target: usize,
    /// Whether to animate; `false` means the indicator jumps and the settle
    /// is already complete.
    pub animated: bool,
}

/// Result of a transition.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Transition {
    /// Events to emit, in order.
    pub events: SmallVec<[SwitchEvent; 3]>,
    /// Settle to perform, if any.
    pub settle: Option<SettleRequest>,
    /// Why the request was not applied, if it was rejected.
    pub rejected: Option<SwitchError>,
}

impl Transition {
    /// `true` when the transition neither emits events nor settles.
    pub fn is_empty(&self) -> bool {
        self.events.is_empty() && self.settle.is_none() && self.rejected.is_none()
    }
}

/// Outcome of [`SelectionMachine::drag_begin`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragStart {
    /// There is nothing to drag.
    Rejected,
    /// The drag started. Carries the target of a settle that was abandoned
    /// to make room for it.
    Started {
        /// Target of the in-flight settle that will never complete.
        abandoned_settle: Option<usize>,
    },
}

/// Authoritative owner of [`SelectionState`].
#[derive(Debug, Clone, Default)]
pub struct SelectionMachine {
    state: SelectionState,
    phase: Phase,
    count: usize,
}

impl SelectionMachine {
    /// Creates an idle machine for `count` segments.
    ///
    /// `initial_index` is clamped into range.
    pub fn new(count: usize, initial_index: usize) -> Self {
        Self {
            state: SelectionState {
                selected_index: initial_index.min(count.saturating_sub(1)),
                drag_offset: None,
            },
            phase: Phase::Idle,
            count,
        }
    }

    /// Current snapshot.
    pub fn state(&self) -> SelectionState {
        self.state
    }

    /// Selected index.
    pub fn selected_index(&self) -> usize {
        self.state.selected_index
    }

    /// Current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Number of segments.
    pub fn count(&self) -> usize {
        self.count
    }

    /// Whether a drag is active.
    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, Phase::Dragging { .. })
    }

    /// Whether a settle animation is in flight.
    pub fn is_settling(&self) -> bool {
        matches!(self.phase, Phase::Settling { .. })
    }

    /// Resets the machine for a new segment count.
    ///
    /// Any drag or settle is dropped without notifications. The selection is
    /// kept when still valid and falls back to `0` otherwise.
    pub fn set_count(&mut self, count: usize) {
        self.count = count;
        self.phase = Phase::Idle;
        self.state.drag_offset = None;
        if self.state.selected_index >= count {
            self.state.selected_index = 0;
        }
    }

    /// Requests a settle on `target` (tap or programmatic selection).
    ///
    /// `live_position` is where the indicator currently is. `WillMove` is
    /// always emitted; an out-of-range target stops there and the transition
    /// carries the rejection.
    pub fn select(&mut self, target: isize, live_position: f32, animated: bool) -> Transition {
        let mut transition = Transition::default();
        transition.events.push(SwitchEvent::WillMove(target));

        let target = match check_index(target, self.count) {
            Ok(target) => target,
            Err(err) => {
                transition.rejected = Some(err);
                return transition;
            }
        };

        let origin = match self.phase {
            Phase::Dragging { origin_index, .. } => origin_index,
            _ => self.state.selected_index,
        };
        self.settle_to(&mut transition, target, origin, live_position, animated);
        transition
    }

    /// Starts following a drag from `live_position`.
    ///
    /// Whether the contact point hits the indicator is decided by the
    /// gesture layer before calling this. A settle in flight is abandoned:
    /// its target stays selected but it never reports `DidMove`.
    pub fn drag_begin(&mut self, live_position: f32) -> DragStart {
        if self.count == 0 {
            return DragStart::Rejected;
        }
        let abandoned_settle = match self.phase {
            Phase::Settling { to_index, .. } => Some(to_index),
            _ => None,
        };
        let start_position = clamp_position(live_position, self.count);
        self.phase = Phase::Dragging {
            origin_index: self.state.selected_index,
            start_position,
            translation: 0.0,
        };
        self.state.drag_offset = Some(start_position);
        DragStart::Started { abandoned_settle }
    }

    /// Feeds a horizontal translation delta in points.
    ///
    /// Returns the new live position, clamped so the indicator never crosses
    /// the inset boundary, or `None` when no drag is active.
    pub fn drag_move(&mut self, delta_x: f32, slice_width: f32) -> Option<f32> {
        let Phase::Dragging {
            start_position,
            translation,
            ..
        } = &mut self.phase
        else {
            return None;
        };
        if delta_x.is_finite() {
            *translation += delta_x;
        }
        let position = if slice_width > 0.0 {
            clamp_position(*start_position + *translation / slice_width, self.count)
        } else {
            *start_position
        };
        self.state.drag_offset = Some(position);
        Some(position)
    }

    /// Ends the drag and settles on the segment nearest the indicator.
    ///
    /// Cancelled and failed drags end the same way; there is no silent
    /// revert.
    pub fn drag_end(&mut self) -> Transition {
        let Phase::Dragging { origin_index, .. } = self.phase else {
            return Transition::default();
        };
        let position = self
            .state
            .drag_offset
            .unwrap_or(self.state.selected_index as f32);
        let target = settle_index(position, self.count);

        let mut transition = Transition::default();
        transition.events.push(SwitchEvent::WillMove(target as isize));
        self.settle_to(&mut transition, target, origin_index, position, true);
        transition
    }

    /// Completes the settle on `target`.
    ///
    /// Stale completions (for a settle that was superseded or abandoned)
    /// produce an empty transition.
    pub fn finish_settle(&mut self, target: usize) -> Transition {
        let mut transition = Transition::default();
        if let Phase::Settling { to_index, .. } = self.phase
            && to_index == target
        {
            self.phase = Phase::Idle;
            transition.events.push(SwitchEvent::DidMove(target));
        }
        transition
    }

    fn settle_to(
        &mut self,
        transition: &mut Transition,
        target: usize,
        origin: usize,
        from: f32,
        animated: bool,
    ) {
        self.state.selected_index = target;
        self.state.drag_offset = None;
        if target != origin {
            transition.events.push(SwitchEvent::ValueChanged(target));
        }

        transition.settle = Some(SettleRequest {
            from,
            target,
            animated,
        });
        if animated {
            self.phase = Phase::Settling {
                from_position: from,
                to_index: target,
            };
        } else {
            self.phase = Phase::Idle;
            transition.events.push(SwitchEvent::DidMove(target));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn events(transition: &Transition) -> Vec<SwitchEvent> {
        transition.events.to_vec()
    }

    #[test]
    fn test_new_clamps_initial_index() {
        assert_eq!(SelectionMachine::new(3, 7).selected_index(), 2);
        assert_eq!(SelectionMachine::new(0, 4).selected_index(), 0);
    }

    #[test]
    fn test_immediate_select_emits_all_events() {
        let mut machine = SelectionMachine::new(3, 0);
        let transition = machine.select(2, 0.0, false);
        assert_eq!(
            events(&transition),
            vec![
                SwitchEvent::WillMove(2),
                SwitchEvent::ValueChanged(2),
                SwitchEvent::DidMove(2)
            ]
        );
        assert_eq!(machine.phase(), Phase::Idle);
        assert_eq!(machine.selected_index(), 2);
    }

    #[test]
    fn test_reselect_does_not_fire_value_changed() {
        let mut machine = SelectionMachine::new(3, 1);
        let transition = machine.select(1, 1.0, false);
        assert_eq!(
            events(&transition),
            vec![SwitchEvent::WillMove(1), SwitchEvent::DidMove(1)]
        );
    }

    #[test]
    fn test_out_of_range_only_fires_will_move() {
        let mut machine = SelectionMachine::new(3, 1);
        let transition = machine.select(99, 1.0, false);
        assert_eq!(events(&transition), vec![SwitchEvent::WillMove(99)]);
        assert_eq!(transition.settle, None);
        assert_eq!(
            transition.rejected,
            Some(SwitchError::IndexOutOfRange { index: 99, count: 3 })
        );
        assert_eq!(machine.selected_index(), 1);
    }

    #[test]
    fn test_negative_target_only_fires_will_move() {
        let mut machine = SelectionMachine::new(3, 1);
        let transition = machine.select(-2, 1.0, true);
        assert_eq!(events(&transition), vec![SwitchEvent::WillMove(-2)]);
        assert_eq!(transition.settle, None);
        assert_eq!(machine.selected_index(), 1);
        assert_eq!(machine.phase(), Phase::Idle);
    }

    #[test]
    fn test_animated_select_defers_did_move() {
        let mut machine = SelectionMachine::new(3, 0);
        let transition = machine.select(1, 0.0, true);
        assert_eq!(
            events(&transition),
            vec![SwitchEvent::WillMove(1), SwitchEvent::ValueChanged(1)]
        );
        assert_eq!(
            machine.phase(),
            Phase::Settling {
                from_position: 0.0,
                to_index: 1
            }
        );
        assert!(machine.is_settling());
        assert_eq!(
            events(&machine.finish_settle(1)),
            vec![SwitchEvent::DidMove(1)]
        );
        assert!(!machine.is_settling());
        assert!(machine.finish_settle(1).is_empty());
    }

    #[test]
    fn test_superseded_settle_completion_is_stale() {
        let mut machine = SelectionMachine::new(3, 0);
        machine.select(1, 0.0, true);
        machine.select(2, 0.4, true);
        assert!(machine.finish_settle(1).is_empty());
        assert_eq!(
            events(&machine.finish_settle(2)),
            vec![SwitchEvent::DidMove(2)]
        );
    }

    #[test]
    fn test_drag_round_trip_is_debounced() {
        let mut machine = SelectionMachine::new(3, 1);
        assert_eq!(
            machine.drag_begin(1.0),
            DragStart::Started {
                abandoned_settle: None
            }
        );
        assert_eq!(machine.drag_move(0.0, 100.0), Some(1.0));
        let transition = machine.drag_end();
        assert_eq!(events(&transition), vec![SwitchEvent::WillMove(1)]);
        assert_eq!(machine.selected_index(), 1);
        assert_eq!(machine.state().drag_offset, None);
    }

    #[test]
    fn test_drag_out_and_back_is_debounced() {
        let mut machine = SelectionMachine::new(3, 0);
        machine.drag_begin(0.0);
        machine.drag_move(180.0, 100.0);
        machine.drag_move(-175.0, 100.0);
        let transition = machine.drag_end();
        assert_eq!(events(&transition), vec![SwitchEvent::WillMove(0)]);
    }

    #[test]
    fn test_drag_move_clamps_to_range() {
        let mut machine = SelectionMachine::new(3, 0);
        machine.drag_begin(0.0);
        assert_eq!(machine.drag_move(-50.0, 100.0), Some(0.0));
        assert_eq!(machine.drag_move(1000.0, 100.0), Some(2.0));
        assert_eq!(machine.state().drag_offset, Some(2.0));
    }

    #[test]
    fn test_drag_move_accumulates_unclamped_translation() {
        let mut machine = SelectionMachine::new(3, 0);
        machine.drag_begin(0.0);
        machine.drag_move(-80.0, 100.0);
        assert_eq!(machine.drag_move(130.0, 100.0), Some(0.5));
    }

    #[test]
    fn test_drag_end_settles_on_nearest() {
        let mut machine = SelectionMachine::new(3, 0);
        machine.drag_begin(0.0);
        machine.drag_move(160.0, 100.0);
        let transition = machine.drag_end();
        assert_eq!(
            events(&transition),
            vec![SwitchEvent::WillMove(2), SwitchEvent::ValueChanged(2)]
        );
        assert_eq!(
            transition.settle,
            Some(SettleRequest {
                from: 1.6,
                target: 2,
                animated: true
            })
        );
    }

    #[test]
    fn test_drag_begin_abandons_settle() {
        let mut machine = SelectionMachine::new(3, 0);
        machine.select(2, 0.0, true);
        assert_eq!(
            machine.drag_begin(1.2),
            DragStart::Started {
                abandoned_settle: Some(2)
            }
        );
        assert!(machine.is_dragging());
        assert!(machine.finish_settle(2).is_empty());
        let transition = machine.drag_end();
        assert_eq!(
            events(&transition),
            vec![SwitchEvent::WillMove(1), SwitchEvent::ValueChanged(1)]
        );
    }

    #[test]
    fn test_zero_segments_are_inert() {
        let mut machine = SelectionMachine::new(0, 0);
        assert_eq!(machine.drag_begin(0.0), DragStart::Rejected);
        assert_eq!(machine.drag_move(20.0, 0.0), None);
        assert!(machine.drag_end().is_empty());
        let transition = machine.select(0, 0.0, false);
        assert_eq!(events(&transition), vec![SwitchEvent::WillMove(0)]);
        assert!(transition.rejected.is_some());
    }

    #[test]
    fn test_set_count_resets() {
        let mut machine = SelectionMachine::new(4, 3);
        machine.drag_begin(3.0);
        machine.set_count(2);
        assert_eq!(machine.selected_index(), 0);
        assert_eq!(machine.phase(), Phase::Idle);
        assert_eq!(machine.state().drag_offset, None);

        let mut machine = SelectionMachine::new(4, 1);
        machine.set_count(2);
        assert_eq!(machine.selected_index(), 1);
    }
}
