//! Dim and highlighted label layers.
//!
//! ## Usage
//!
//! Each segment owns a [`LabelPair`]: a dim label drawn on the track and a
//! highlighted label drawn over the indicator. Both sit at the same frame; the
//! highlighted one is only visible inside the [`ClipRegion`], which the owner
//! re-derives from the indicator bounds every time those change.

use smallvec::SmallVec;

use crate::{
    geometry::{Rect, Size, indicator_bounds, label_bounds, segment_bounds},
    style::{Color, FontSpec},
};

/// Extra width offered to the measurer beyond the indicator width, so text
/// that fits exactly is not wrapped by the host's measuring routine.
const MEASURE_SLACK: f32 = 5.0;

/// External text measurement.
///
/// The host's text system implements this; the switch only needs a size for
/// each label.
pub trait TextMeasurer {
    /// Size of `text` rendered with `font`, fitting within `max` when
    /// possible.
    fn measure(&self, text: &str, font: &FontSpec, max: Size) -> Size;
}

/// Approximate measurer for headless use: every character advances by a
/// fixed fraction of the font size and lines are `line_height` times the
/// font size tall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasurer {
    /// Advance per character, as a fraction of the font size.
    pub advance: f32,
    /// Line height, as a fraction of the font size.
    pub line_height: f32,
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self {
            advance: 0.5,
            line_height: 1.25,
        }
    }
}

impl TextMeasurer for MonospaceMeasurer {
    fn measure(&self, text: &str, font: &FontSpec, max: Size) -> Size {
        let width = text.chars().count() as f32 * font.size * self.advance;
        let height = font.size * self.line_height;
        Size::new(width.min(max.width), height.min(max.height))
    }
}

/// Color and font of one label layer.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelStyle {
    /// Text color.
    pub color: Color,
    /// Font request.
    pub font: FontSpec,
}

/// The two text elements of one segment.
#[derive(Debug, Clone, PartialEq)]
pub struct LabelPair {
    segment_index: usize,
    text: String,
    dim: LabelStyle,
    highlight: LabelStyle,
    frame: Rect,
}

impl LabelPair {
    /// Segment this pair belongs to.
    pub fn segment_index(&self) -> usize {
        self.segment_index
    }

    /// Displayed text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Style of the dim label.
    pub fn dim_style(&self) -> &LabelStyle {
        &self.dim
    }

    /// Style of the highlighted label.
    pub fn highlight_style(&self) -> &LabelStyle {
        &self.highlight
    }

    /// Frame of the dim label.
    pub fn dim_bounds(&self) -> Rect {
        self.frame
    }

    /// Frame of the highlighted label; always equal to
    /// [`dim_bounds`](Self::dim_bounds).
    pub fn highlight_bounds(&self) -> Rect {
        self.frame
    }
}

/// Rounded clip applied to the highlighted layer.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct ClipRegion {
    /// Clip rectangle, equal to the indicator bounds.
    pub rect: Rect,
    /// Corner radius of the clip.
    pub corner_radius: f32,
}

/// All label pairs of a switch plus the highlight clip.
#[derive(Debug, Clone, Default)]
pub struct LabelPairSet {
    pairs: SmallVec<[LabelPair; 4]>,
    clip: ClipRegion,
}

impl LabelPairSet {
    /// Builds one pair per text.
    pub fn new<S: AsRef<str>>(texts: &[S], dim: &LabelStyle, highlight: &LabelStyle) -> Self {
        let mut set = Self::default();
        set.rebuild(texts, dim, highlight);
        set
    }

    /// Discards every pair and builds new ones. Frames start empty until the
    /// next [`layout`](Self::layout).
    pub fn rebuild<S: AsRef<str>>(
        &mut self,
        texts: &[S],
        dim: &LabelStyle,
        highlight: &LabelStyle,
    ) {
        self.pairs = texts
            .iter()
            .enumerate()
            .map(|(segment_index, text)| LabelPair {
                segment_index,
                text: text.as_ref().to_owned(),
                dim: dim.clone(),
                highlight: highlight.clone(),
                frame: Rect::ZERO,
            })
            .collect();
    }

    /// The pairs, in segment order.
    pub fn pairs(&self) -> &[LabelPair] {
        &self.pairs
    }

    /// Number of pairs.
    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    /// Whether there are no pairs.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Sets the dim label color on every pair.
    pub fn set_dim_color(&mut self, color: Color) {
        self.pairs.iter_mut().for_each(|pair| pair.dim.color = color);
    }

    /// Sets the highlighted label color on every pair.
    pub fn set_highlight_color(&mut self, color: Color) {
        self.pairs
            .iter_mut()
            .for_each(|pair| pair.highlight.color = color);
    }

    /// Sets the dim label font on every pair.
    pub fn set_dim_font(&mut self, font: &FontSpec) {
        self.pairs
            .iter_mut()
            .for_each(|pair| pair.dim.font = font.clone());
    }

    /// Sets the highlighted label font on every pair.
    pub fn set_highlight_font(&mut self, font: &FontSpec) {
        self.pairs
            .iter_mut()
            .for_each(|pair| pair.highlight.font = font.clone());
    }

    /// Places every pair centred in its slice.
    ///
    /// Text is measured with the highlighted font and limited to the
    /// indicator's width and height, so both layers share one frame.
    pub fn layout(&mut self, container: Size, inset: f32, measurer: &dyn TextMeasurer) {
        let count = self.pairs.len();
        let indicator = indicator_bounds(container, 0.0, count, inset);
        let max_width = indicator.width;
        let max_height = indicator.height;
        for pair in self.pairs.iter_mut() {
            let slice = segment_bounds(container, pair.segment_index, count);
            let measured = measurer.measure(
                &pair.text,
                &pair.highlight.font,
                Size::new(max_width + MEASURE_SLACK, max_height),
            );
            pair.frame = label_bounds(slice, measured, max_width, max_height);
        }
    }

    /// Re-derives the highlight clip from the indicator bounds.
    pub fn update_clip(&mut self, indicator: Rect, corner_radius: f32) {
        self.clip = ClipRegion {
            rect: indicator,
            corner_radius,
        };
    }

    /// Current highlight clip.
    pub fn clip(&self) -> ClipRegion {
        self.clip
    }

    /// Part of a highlighted label that is currently visible.
    pub fn visible_highlight(&self, segment_index: usize) -> Option<Rect> {
        self.pairs
            .get(segment_index)
            .and_then(|pair| pair.frame.intersection(&self.clip.rect))
    }
}
