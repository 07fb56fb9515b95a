//! The segmented switch control.
//!
//! ## Usage
//!
//! Create a [`SegmentedSwitch`], give it a size with
//! [`layout`](SegmentedSwitch::layout), forward host gestures to
//! [`handle_gesture`](SegmentedSwitch::handle_gesture) and call
//! [`tick`](SegmentedSwitch::tick) on every display frame while
//! [`needs_frame`](SegmentedSwitch::needs_frame) is `true`.
//!
//! ```
//! use std::time::Duration;
//!
//! use segmented_switch::{GestureEvent, Point, SegmentedSwitch, Size};
//!
//! let mut switch = SegmentedSwitch::new(["Day", "Week", "Month"]);
//! switch.on_value_changed(|| println!("selection changed"));
//! switch.layout(Size::new(300.0, 40.0));
//!
//! switch.handle_gesture(GestureEvent::Tap {
//!     position: Point::new(250.0, 20.0),
//! });
//! assert_eq!(switch.selected_index(), 2);
//!
//! switch.set_selected_index(1, true);
//! while switch.needs_frame() {
//!     switch.tick(Duration::from_millis(16));
//! }
//! assert_eq!(switch.indicator_bounds().x, 102.0);
//! ```

use std::time::Duration;

use tracing::{debug, trace, warn};

use crate::{
    animation::{Animator, SpringCurve},
    callback::{Callback, CallbackWith},
    error::SwitchError,
    geometry::{Rect, Size, indicator_bounds},
    gesture::{
        GestureCommand, GestureContext, GestureDisposition, GestureEvent, GestureInterpreter,
    },
    labels::{
        ClipRegion, LabelPair, LabelPairSet, LabelStyle, MonospaceMeasurer, TextMeasurer,
    },
    render::{DrawCommand, FrameParts, build_frame},
    selection::{DragStart, Phase, SelectionMachine, SelectionState, SwitchEvent, Transition},
    style::{Color, FontSpec, SwitchStyle, sanitize_non_negative},
};

/// One selectable option.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Display text.
    pub text: String,
}

impl<S: Into<String>> From<S> for Segment {
    fn from(text: S) -> Self {
        Self { text: text.into() }
    }
}

/// A pill-shaped row of mutually exclusive segments with a sliding
/// indicator.
///
/// The switch owns its label pairs, selection state machine, animator and
/// gesture interpreter. Indicator geometry is never stored on its own: every
/// mutation recomputes it from the container size, inset and live position,
/// and re-derives the highlight clip in the same step.
pub struct SegmentedSwitch {
    segments: Vec<Segment>,
    style: SwitchStyle,
    size: Size,
    labels: LabelPairSet,
    selection: SelectionMachine,
    animator: Animator,
    gestures: GestureInterpreter,
    indicator: Rect,
    measurer: Box<dyn TextMeasurer + Send + Sync>,
    on_will_move: CallbackWith<isize>,
    on_did_move: CallbackWith<usize>,
    on_value_changed: Callback,
}

impl std::fmt::Debug for SegmentedSwitch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SegmentedSwitch")
            .field("segments", &self.segments)
            .field("size", &self.size)
            .field("selection", &self.selection)
            .field("indicator", &self.indicator)
            .finish_non_exhaustive()
    }
}

impl SegmentedSwitch {
    /// Creates a switch with the default style, selecting the first segment.
    pub fn new<I, S>(texts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::build(texts, SwitchStyle::default())
    }

    /// Creates a switch with a custom style.
    pub fn with_style<I, S>(texts: I, style: SwitchStyle) -> Result<Self, SwitchError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        style.validate()?;
        Ok(Self::build(texts, style))
    }

    /// Replaces the text measurer used to place labels.
    pub fn with_measurer<M>(mut self, measurer: M) -> Self
    where
        M: TextMeasurer + Send + Sync + 'static,
    {
        self.measurer = Box::new(measurer);
        self.relayout();
        self
    }

    fn build<I, S>(texts: I, style: SwitchStyle) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let segments: Vec<Segment> = texts.into_iter().map(Segment::from).collect();
        let texts: Vec<&str> = segments.iter().map(|s| s.text.as_str()).collect();
        let labels = LabelPairSet::new(&texts, &dim_style(&style), &highlight_style(&style));
        let animator = Animator::new(SpringCurve::from_style(&style));
        let selection = SelectionMachine::new(segments.len(), 0);

        let mut switch = Self {
            segments,
            style,
            size: Size::ZERO,
            labels,
            selection,
            animator,
            gestures: GestureInterpreter::new(),
            indicator: Rect::ZERO,
            measurer: Box::new(MonospaceMeasurer::default()),
            on_will_move: CallbackWith::default(),
            on_did_move: CallbackWith::default(),
            on_value_changed: Callback::default(),
        };
        switch.relayout();
        switch
    }

    // Segments

    /// Replaces every segment.
    ///
    /// Label pairs are rebuilt, any drag or settle is dropped without
    /// notifications, and the selection falls back to `0` when it no longer
    /// exists.
    pub fn set_segments<I, S>(&mut self, texts: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.segments = texts.into_iter().map(Segment::from).collect();
        let texts: Vec<&str> = self.segments.iter().map(|s| s.text.as_str()).collect();
        self.labels.rebuild(
            &texts,
            &dim_style(&self.style),
            &highlight_style(&self.style),
        );
        if let Some(target) = self.animator.cancel() {
            debug!(target, "settle dropped by segment replacement");
        }
        self.gestures.reset();
        self.selection.set_count(self.segments.len());
        debug!(
            count = self.segments.len(),
            selected = self.selection.selected_index(),
            "segments replaced"
        );
        self.relayout();
    }

    /// The segment texts, in order.
    pub fn segments(&self) -> Vec<String> {
        self.segments.iter().map(|s| s.text.clone()).collect()
    }

    /// Number of segments.
    pub fn segment_count(&self) -> usize {
        self.segments.len()
    }

    // Selection

    /// The selected segment.
    pub fn selected_index(&self) -> usize {
        self.selection.selected_index()
    }

    /// Snapshot of the selection, including the live drag position.
    pub fn selection_state(&self) -> SelectionState {
        self.selection.state()
    }

    /// Phase of the selection state machine.
    pub fn phase(&self) -> Phase {
        self.selection.phase()
    }

    /// Selects `index`, with the same notifications as a tap.
    ///
    /// `on_will_move` always fires. An out-of-range index, negative or past
    /// the last segment, changes nothing else.
    pub fn set_selected_index(&mut self, index: isize, animated: bool) {
        // Out-of-range requests are already logged by `select`.
        let _ = self.select(index, animated);
    }

    /// Like [`set_selected_index`](Self::set_selected_index) but reports an
    /// out-of-range index.
    pub fn try_set_selected_index(
        &mut self,
        index: isize,
        animated: bool,
    ) -> Result<(), SwitchError> {
        self.select(index, animated)
    }

    fn select(&mut self, index: isize, animated: bool) -> Result<(), SwitchError> {
        let live = self.live_position();
        let transition = self.selection.select(index, live, animated);
        let rejected = transition.rejected.clone();
        self.apply(transition);
        match rejected {
            Some(err) => {
                debug!(%err, "selection ignored");
                Err(err)
            }
            None => Ok(()),
        }
    }

    // Input

    /// Feeds a host gesture event.
    ///
    /// Returns [`GestureDisposition::Ignored`] when the event is not for the
    /// switch, such as a pan that did not start on the indicator.
    pub fn handle_gesture(&mut self, event: GestureEvent) -> GestureDisposition {
        let context = GestureContext {
            container: self.size,
            count: self.segments.len(),
            indicator: self.indicator,
            enabled: self.style.enabled,
        };
        let Some(command) = self.gestures.interpret(event, &context) else {
            return GestureDisposition::Ignored;
        };

        match command {
            GestureCommand::Select { index, animated } => {
                let _ = self.select(index, animated);
            }
            GestureCommand::BeginDrag => {
                let live = self.live_position();
                match self.selection.drag_begin(live) {
                    DragStart::Rejected => {
                        self.gestures.reset();
                        return GestureDisposition::Ignored;
                    }
                    DragStart::Started { abandoned_settle } => {
                        if let Some(target) = abandoned_settle {
                            self.animator.cancel();
                            debug!(target, position = live, "settle abandoned by drag");
                        }
                        self.set_indicator_position(self.live_position());
                    }
                }
            }
            GestureCommand::MoveDrag {
                delta_x,
                slice_width,
            } => {
                if let Some(position) = self.selection.drag_move(delta_x, slice_width) {
                    trace!(delta_x, position, "drag moved");
                    self.set_indicator_position(position);
                }
            }
            GestureCommand::EndDrag => {
                let transition = self.selection.drag_end();
                self.apply(transition);
            }
        }
        GestureDisposition::Consumed
    }

    // Layout and frames

    /// Lays the switch out at `size`.
    pub fn layout(&mut self, size: Size) {
        self.size = size;
        self.relayout();
    }

    /// Current size.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Advances the settle animation by `elapsed`.
    ///
    /// Returns whether another frame is needed.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn tick(&mut self, elapsed: Duration) -> bool {
        let Some(frame) = self.animator.tick(elapsed) else {
            return false;
        };
        trace!(position = frame.position, target = frame.target, "settle tick");
        self.set_indicator_position(frame.position);

        if frame.finished {
            debug!(target = frame.target, "settle finished");
            let transition = self.selection.finish_settle(frame.target);
            self.apply(transition);
        }
        self.animator.is_running()
    }

    /// Whether a settle animation is waiting for frames.
    pub fn needs_frame(&self) -> bool {
        self.animator.is_running()
    }

    /// Current indicator bounds.
    pub fn indicator_bounds(&self) -> Rect {
        self.indicator
    }

    /// Clip applied to the highlighted labels.
    pub fn clip_region(&self) -> ClipRegion {
        self.labels.clip()
    }

    /// Label pairs, in segment order.
    pub fn label_pairs(&self) -> &[LabelPair] {
        self.labels.pairs()
    }

    /// Effective corner radius.
    pub fn corner_radius(&self) -> f32 {
        self.style.resolved_corner_radius(self.size.height)
    }

    /// Draw commands for the current frame, back to front.
    pub fn draw_commands(&self) -> Vec<DrawCommand> {
        build_frame(&FrameParts {
            bounds: Rect::from_size(self.size),
            indicator: self.indicator,
            corner_radius: self.corner_radius(),
            background: self.style.background_color,
            indicator_color: self.style.selected_background_color,
            labels: &self.labels,
        })
    }

    // Events

    /// Called with the target whenever a settle target is chosen, including
    /// out-of-range targets.
    pub fn on_will_move(&mut self, callback: impl Into<CallbackWith<isize>>) {
        self.on_will_move = callback.into();
    }

    /// Called with the target when the indicator comes to rest.
    pub fn on_did_move(&mut self, callback: impl Into<CallbackWith<usize>>) {
        self.on_did_move = callback.into();
    }

    /// Called when a gesture changes the selected index.
    pub fn on_value_changed(&mut self, callback: impl Into<Callback>) {
        self.on_value_changed = callback.into();
    }

    // Style

    /// Current style.
    pub fn style(&self) -> &SwitchStyle {
        &self.style
    }

    /// Sets the track color.
    pub fn set_background_color(&mut self, color: Color) {
        self.style.background_color = color;
    }

    /// Sets the indicator color.
    pub fn set_selected_background_color(&mut self, color: Color) {
        self.style.selected_background_color = color;
    }

    /// Sets the dim label color.
    pub fn set_title_color(&mut self, color: Color) {
        self.style.title_color = color;
        self.labels.set_dim_color(color);
    }

    /// Sets the highlighted label color.
    pub fn set_selected_title_color(&mut self, color: Color) {
        self.style.selected_title_color = color;
        self.labels.set_highlight_color(color);
    }

    /// Sets the dim label font.
    pub fn set_title_font(&mut self, font: FontSpec) {
        self.labels.set_dim_font(&font);
        self.style.title_font = font;
    }

    /// Sets the highlighted label font.
    ///
    /// Labels are measured with this font, so their frames are re-placed.
    pub fn set_selected_title_font(&mut self, font: FontSpec) {
        self.labels.set_highlight_font(&font);
        self.style.selected_title_font = font;
        self.labels
            .layout(self.size, self.style.indicator_inset, self.measurer.as_ref());
    }

    /// Sets the gap between the indicator and its slice edges.
    pub fn set_indicator_inset(&mut self, inset: f32) {
        self.style.indicator_inset = sanitized("indicator_inset", inset);
        self.relayout();
    }

    /// Sets the corner radius; `None` restores half the height.
    pub fn set_corner_radius(&mut self, radius: Option<f32>) {
        self.style.corner_radius = radius.map(|r| sanitized("corner_radius", r));
        self.set_indicator_position(self.live_position());
    }

    /// Sets the settle animation duration.
    pub fn set_animation_duration(&mut self, duration: Duration) {
        self.style.animation_duration = duration;
        self.animator.set_curve(SpringCurve::from_style(&self.style));
    }

    /// Sets the settle spring damping ratio.
    pub fn set_animation_damping(&mut self, damping: f32) {
        self.style.animation_damping = sanitized("animation_damping", damping);
        self.animator.set_curve(SpringCurve::from_style(&self.style));
    }

    /// Sets the settle spring initial velocity.
    pub fn set_animation_velocity(&mut self, velocity: f32) {
        self.style.animation_velocity = if velocity.is_finite() {
            velocity
        } else {
            warn!(velocity, "non-finite animation velocity replaced with 0");
            0.0
        };
        self.animator.set_curve(SpringCurve::from_style(&self.style));
    }

    /// Enables or disables gesture input.
    ///
    /// Disabling mid-drag releases the indicator as if the drag ended.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.style.enabled = enabled;
        if !enabled && self.gestures.is_tracking_drag() {
            self.gestures.reset();
            let transition = self.selection.drag_end();
            self.apply(transition);
        }
    }

    /// Whether gesture input is accepted.
    pub fn is_enabled(&self) -> bool {
        self.style.enabled
    }

    // Internals

    /// Where the indicator is right now, in segment units.
    fn live_position(&self) -> f32 {
        let selected = self.selection.selected_index() as f32;
        match self.selection.phase() {
            Phase::Idle => selected,
            Phase::Dragging { .. } => self.selection.state().drag_offset.unwrap_or(selected),
            Phase::Settling { to_index, .. } => {
                self.animator.position().unwrap_or(to_index as f32)
            }
        }
    }

    /// Recomputes the indicator at `position` and the clip that follows it.
    fn set_indicator_position(&mut self, position: f32) {
        self.indicator = indicator_bounds(
            self.size,
            position,
            self.segments.len(),
            self.style.indicator_inset,
        );
        let radius = self.corner_radius();
        self.labels.update_clip(self.indicator, radius);
    }

    fn relayout(&mut self) {
        self.labels
            .layout(self.size, self.style.indicator_inset, self.measurer.as_ref());
        self.set_indicator_position(self.live_position());
    }

    /// Emits a transition's events and performs its settle.
    ///
    /// `WillMove` goes out before the indicator moves; the remaining events
    /// follow the geometry update.
    fn apply(&mut self, transition: Transition) {
        let (leading, trailing): (Vec<SwitchEvent>, Vec<SwitchEvent>) = transition
            .events
            .into_iter()
            .partition(|event| matches!(event, SwitchEvent::WillMove(_)));
        leading.into_iter().for_each(|event| self.emit(event));

        if let Some(settle) = transition.settle {
            if settle.animated {
                debug!(from = settle.from, target = settle.target, "settle started");
                self.animator.start(settle.from, settle.target);
            } else {
                if let Some(target) = self.animator.cancel() {
                    debug!(target, "settle superseded by immediate selection");
                }
                self.set_indicator_position(settle.target as f32);
            }
        }

        trailing.into_iter().for_each(|event| self.emit(event));
    }

    fn emit(&self, event: SwitchEvent) {
        trace!(?event, "switch event");
        match event {
            SwitchEvent::WillMove(index) => self.on_will_move.call(index),
            SwitchEvent::ValueChanged(_) => self.on_value_changed.call(),
            SwitchEvent::DidMove(index) => self.on_did_move.call(index),
        }
    }
}

fn dim_style(style: &SwitchStyle) -> LabelStyle {
    LabelStyle {
        color: style.title_color,
        font: style.title_font.clone(),
    }
}

fn highlight_style(style: &SwitchStyle) -> LabelStyle {
    LabelStyle {
        color: style.selected_title_color,
        font: style.selected_title_font.clone(),
    }
}

fn sanitized(field: &'static str, value: f32) -> f32 {
    match sanitize_non_negative(value) {
        Some(replacement) => {
            warn!(field, value, replacement, "style value out of range");
            replacement
        }
        None => value,
    }
}
