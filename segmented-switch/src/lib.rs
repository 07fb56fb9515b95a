//! A pill-shaped segmented switch control.
//!
//! The switch shows a row of mutually exclusive text segments and a sliding
//! indicator over the selected one. The indicator can be tapped to a segment,
//! dragged, or moved programmatically, and settles with a damped spring.
//! Labels under the indicator are drawn a second time in a highlight style,
//! clipped to the indicator, so the highlight appears to travel with it.
//!
//! The crate is toolkit agnostic. The host feeds sizes, gesture events and
//! frame ticks in, and paints the [`DrawCommand`]s that come out.
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//!
//! use segmented_switch::{
//!     Color, GestureEvent, Point, SegmentedSwitch, Size, SwitchStyle,
//! };
//!
//! let style = SwitchStyle::default()
//!     .background_color(Color::from_rgb(0.1, 0.1, 0.12))
//!     .indicator_inset(3.0);
//! let mut switch = SegmentedSwitch::with_style(["Off", "Auto", "On"], style)?;
//! switch.on_did_move(|index: usize| println!("settled on {index}"));
//! switch.layout(Size::new(240.0, 36.0));
//!
//! let grab = switch.indicator_bounds().center();
//! switch.handle_gesture(GestureEvent::DragBegan { position: grab });
//! switch.handle_gesture(GestureEvent::DragMoved {
//!     delta: Point::new(90.0, 0.0),
//! });
//! switch.handle_gesture(GestureEvent::DragEnded);
//! assert_eq!(switch.selected_index(), 1);
//!
//! while switch.tick(Duration::from_millis(16)) {}
//! # Ok::<(), segmented_switch::SwitchError>(())
//! ```
#![deny(missing_docs, clippy::unwrap_used)]

pub mod animation;
pub mod callback;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod labels;
pub mod render;
pub mod selection;
pub mod style;
pub mod switch;

pub use crate::{
    animation::{AnimationFrame, Animator, SpringCurve},
    callback::{Callback, CallbackWith},
    error::SwitchError,
    geometry::{Point, Rect, Size},
    gesture::{GestureDisposition, GestureEvent},
    labels::{ClipRegion, LabelPair, LabelStyle, MonospaceMeasurer, TextMeasurer},
    render::DrawCommand,
    selection::{Phase, SelectionState, SwitchEvent},
    style::{Color, FontSpec, SegmentedSwitchDefaults, SwitchStyle},
    switch::{Segment, SegmentedSwitch},
};
