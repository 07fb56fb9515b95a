//! Draw commands describing one frame of the switch.
//!
//! The switch does not own a renderer. [`SegmentedSwitch::draw_commands`]
//! lists what to paint, back to front, and the host translates each command
//! into its own drawing API.
//!
//! [`SegmentedSwitch::draw_commands`]: crate::SegmentedSwitch::draw_commands

use crate::{
    geometry::Rect,
    labels::{ClipRegion, LabelPairSet},
    style::{Color, FontSpec},
};

/// A single drawing instruction.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    /// A filled rounded rectangle.
    RoundedRect {
        /// Bounds of the shape.
        rect: Rect,
        /// Corner radius.
        corner_radius: f32,
        /// Fill color.
        color: Color,
    },
    /// A text run laid out in `rect`.
    Text {
        /// Segment the text belongs to.
        segment_index: usize,
        /// The text.
        text: String,
        /// Frame of the text.
        rect: Rect,
        /// Text color.
        color: Color,
        /// Font request.
        font: FontSpec,
    },
    /// Restrict subsequent commands to a rounded rectangle.
    PushClip(ClipRegion),
    /// Drop the most recent clip.
    PopClip,
}

/// Inputs for [`build_frame`].
pub(crate) struct FrameParts<'a> {
    pub bounds: Rect,
    pub indicator: Rect,
    pub corner_radius: f32,
    pub background: Color,
    pub indicator_color: Color,
    pub labels: &'a LabelPairSet,
}

/// Track, dim labels, indicator, then the highlighted labels clipped to the
/// indicator.
pub(crate) fn build_frame(parts: &FrameParts<'_>) -> Vec<DrawCommand> {
    let pairs = parts.labels.pairs();
    let mut commands = Vec::with_capacity(pairs.len() * 2 + 4);

    commands.push(DrawCommand::RoundedRect {
        rect: parts.bounds,
        corner_radius: parts.corner_radius,
        color: parts.background,
    });
    commands.extend(pairs.iter().map(|pair| DrawCommand::Text {
        segment_index: pair.segment_index(),
        text: pair.text().to_owned(),
        rect: pair.dim_bounds(),
        color: pair.dim_style().color,
        font: pair.dim_style().font.clone(),
    }));

    if pairs.is_empty() {
        return commands;
    }

    commands.push(DrawCommand::RoundedRect {
        rect: parts.indicator,
        corner_radius: parts.corner_radius,
        color: parts.indicator_color,
    });
    commands.push(DrawCommand::PushClip(parts.labels.clip()));
    commands.extend(pairs.iter().map(|pair| DrawCommand::Text {
        segment_index: pair.segment_index(),
        text: pair.text().to_owned(),
        rect: pair.highlight_bounds(),
        color: pair.highlight_style().color,
        font: pair.highlight_style().font.clone(),
    }));
    commands.push(DrawCommand::PopClip);
    commands
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::labels::LabelStyle;

    fn label_set(texts: &[&str]) -> LabelPairSet {
        let dim = LabelStyle {
            color: Color::WHITE,
            font: FontSpec::default(),
        };
        let highlight = LabelStyle {
            color: Color::BLACK,
            font: FontSpec::default(),
        };
        LabelPairSet::new(texts, &dim, &highlight)
    }

    #[test]
    fn test_frame_order() {
        let labels = label_set(&["A", "B"]);
        let commands = build_frame(&FrameParts {
            bounds: Rect::new(0.0, 0.0, 200.0, 40.0),
            indicator: Rect::new(2.0, 2.0, 96.0, 36.0),
            corner_radius: 20.0,
            background: Color::BLACK,
            indicator_color: Color::WHITE,
            labels: &labels,
        });
        assert_eq!(commands.len(), 8);
        assert!(matches!(
            commands[0],
            DrawCommand::RoundedRect { color, .. } if color == Color::BLACK
        ));
        assert!(matches!(
            &commands[1],
            DrawCommand::Text { color, .. } if *color == Color::WHITE
        ));
        assert!(matches!(
            commands[3],
            DrawCommand::RoundedRect { color, .. } if color == Color::WHITE
        ));
        assert!(matches!(commands[4], DrawCommand::PushClip(_)));
        assert!(matches!(
            &commands[6],
            DrawCommand::Text { segment_index: 1, color, .. } if *color == Color::BLACK
        ));
        assert_eq!(commands[7], DrawCommand::PopClip);
    }

    #[test]
    fn test_empty_switch_draws_track_only() {
        let labels = label_set(&[]);
        let commands = build_frame(&FrameParts {
            bounds: Rect::new(0.0, 0.0, 200.0, 40.0),
            indicator: Rect::ZERO,
            corner_radius: 20.0,
            background: Color::BLACK,
            indicator_color: Color::WHITE,
            labels: &labels,
        });
        assert_eq!(commands.len(), 1);
    }
}
