//! Layout math for the segmented switch.
//!
//! Every function in this module is pure: the same container size, segment
//! count, position and inset always produce the same rectangles. Nothing here
//! is cached, so callers recompute geometry whenever an input changes.
//!
//! # Coordinate System
//!
//! - Origin (0, 0) at the top-left corner of the control
//! - X-axis increases to the right
//! - Y-axis increases downward
//! - Units are logical points; fractional values are allowed so that a
//!   dragged indicator can sit between two segments
//!
//! A segment count of zero is valid and yields [`Rect::ZERO`] everywhere.

/// A 2D position in logical points.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Point {
    /// The x coordinate
    pub x: f32,
    /// The y coordinate
    pub y: f32,
}

impl Point {
    /// A constant representing the zero position (0, 0).
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Creates a new position.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// A 2D size in logical points.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Size {
    /// The width dimension
    pub width: f32,
    /// The height dimension
    pub height: f32,
}

impl Size {
    /// A constant representing zero size.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Creates a new size.
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// An axis-aligned rectangle in logical points.
#[derive(Debug, Default, Clone, Copy, PartialEq)]
pub struct Rect {
    /// The x-coordinate of the top-left corner
    pub x: f32,
    /// The y-coordinate of the top-left corner
    pub y: f32,
    /// The width of the rectangle
    pub width: f32,
    /// The height of the rectangle
    pub height: f32,
}

impl Rect {
    /// A constant representing a zero rectangle (0×0 at position (0, 0)).
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Creates a new rectangle.
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle at the origin covering `size`.
    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    /// The right edge (`x + width`).
    pub fn max_x(&self) -> f32 {
        self.x + self.width
    }

    /// The bottom edge (`y + height`).
    pub fn max_y(&self) -> f32 {
        self.y + self.height
    }

    /// The centre point.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Check if a point is inside the rectangle.
    ///
    /// The left and top edges are inclusive, the right and bottom edges are
    /// exclusive, so adjacent rectangles never both claim a point.
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x && point.x < self.max_x() && point.y >= self.y && point.y < self.max_y()
    }

    /// Gets the intersection of this rectangle with another rectangle.
    ///
    /// If the rectangles do not intersect, returns `None`.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let x1 = self.x.max(other.x);
        let y1 = self.y.max(other.y);
        let x2 = self.max_x().min(other.max_x());
        let y2 = self.max_y().min(other.max_y());

        if x1 < x2 && y1 < y2 {
            Some(Self::new(x1, y1, x2 - x1, y2 - y1))
        } else {
            None
        }
    }
}

/// Width of one segment slice, or `0.0` when there are no segments.
pub fn slice_width(container: Size, count: usize) -> f32 {
    if count == 0 {
        return 0.0;
    }
    container.width / count as f32
}

/// Returns slice `index` of the container split into `count` equal slices.
pub fn segment_bounds(container: Size, index: usize, count: usize) -> Rect {
    if count == 0 {
        return Rect::ZERO;
    }
    let slice = slice_width(container, count);
    Rect::new(index as f32 * slice, 0.0, slice, container.height)
}

/// Clamps a continuous indicator position into `[0, count - 1]`.
///
/// Non-finite positions collapse to the first segment.
pub fn clamp_position(position: f32, count: usize) -> f32 {
    if count == 0 || !position.is_finite() {
        return 0.0;
    }
    position.clamp(0.0, (count - 1) as f32)
}

/// Computes the indicator rectangle for a possibly fractional `position`.
///
/// The indicator is one slice wide minus `inset` on both sides and sits
/// `inset` below the top edge. `position` is clamped so the indicator never
/// leaves the container's inset boundary.
pub fn indicator_bounds(container: Size, position: f32, count: usize, inset: f32) -> Rect {
    if count == 0 {
        return Rect::ZERO;
    }
    let slice = slice_width(container, count);
    let position = clamp_position(position, count);
    Rect::new(
        inset + position * slice,
        inset,
        (slice - inset * 2.0).max(0.0),
        (container.height - inset * 2.0).max(0.0),
    )
}

/// Inverse of [`indicator_bounds`] on the x axis: the continuous position of
/// an indicator whose left edge sits at `indicator_x`.
pub fn position_of(container: Size, indicator_x: f32, count: usize, inset: f32) -> f32 {
    let slice = slice_width(container, count);
    if slice <= 0.0 {
        return 0.0;
    }
    clamp_position((indicator_x - inset) / slice, count)
}

/// Centres measured text inside a segment slice.
///
/// The text is clamped to `max_width` x `max_height` and its origin is
/// floor-rounded so both label layers land on whole points.
pub fn label_bounds(slice: Rect, measured: Size, max_width: f32, max_height: f32) -> Rect {
    let width = measured.width.min(max_width).max(0.0);
    let height = measured.height.min(max_height).max(0.0);
    let x = (slice.x + (slice.width - width) / 2.0).floor();
    let y = (slice.y + (slice.height - height) / 2.0).floor();
    Rect::new(x, y, width, height)
}

/// Index of the slice under `x`, as a tap would resolve it:
/// `floor(x / slice_width)`.
///
/// The result is not clamped. A point left of the leading edge maps to a
/// negative index and a point past the trailing edge to one `>= count`;
/// callers treat both as out of range. Returns `None` when there is no slice
/// to hit or `x` is not finite.
pub fn index_at(container: Size, x: f32, count: usize) -> Option<isize> {
    let slice = slice_width(container, count);
    if slice <= 0.0 || !x.is_finite() {
        return None;
    }
    Some((x / slice).floor() as isize)
}

/// Index of the slice containing the indicator's centre, clamped to the
/// valid range.
pub fn nearest_index(container: Size, indicator: Rect, count: usize) -> usize {
    match index_at(container, indicator.center().x, count) {
        Some(index) => index.clamp(0, count as isize - 1) as usize,
        None => 0,
    }
}

/// Index of the segment whose centre is nearest a continuous position.
///
/// Equivalent to [`nearest_index`] evaluated on the indicator at `position`,
/// without needing a container size.
pub fn settle_index(position: f32, count: usize) -> usize {
    if count == 0 {
        return 0;
    }
    ((clamp_position(position, count) + 0.5).floor() as usize).min(count - 1)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    const CONTAINER: Size = Size::new(300.0, 40.0);

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_segment_bounds_three_slices() {
        assert_eq!(
            segment_bounds(CONTAINER, 0, 3),
            Rect::new(0.0, 0.0, 100.0, 40.0)
        );
        assert_eq!(
            segment_bounds(CONTAINER, 2, 3),
            Rect::new(200.0, 0.0, 100.0, 40.0)
        );
    }

    #[test]
    fn test_zero_segments_are_degenerate() {
        assert_eq!(segment_bounds(CONTAINER, 0, 0), Rect::ZERO);
        assert_eq!(indicator_bounds(CONTAINER, 0.0, 0, 2.0), Rect::ZERO);
        assert_eq!(nearest_index(CONTAINER, Rect::ZERO, 0), 0);
        assert_eq!(index_at(CONTAINER, 120.0, 0), None);
    }

    #[test]
    fn test_indicator_bounds_at_last_index() {
        let rect = indicator_bounds(CONTAINER, 2.0, 3, 2.0);
        assert!(approx(rect.x, 202.0));
        assert!(approx(rect.y, 2.0));
        assert!(approx(rect.width, 96.0));
        assert!(approx(rect.height, 36.0));
    }

    #[test]
    fn test_indicator_position_is_clamped() {
        let left = indicator_bounds(CONTAINER, -3.0, 3, 2.0);
        let right = indicator_bounds(CONTAINER, 7.5, 3, 2.0);
        assert!(approx(left.x, 2.0));
        assert!(approx(right.x, 202.0));
        assert!(approx(indicator_bounds(CONTAINER, f32::NAN, 3, 2.0).x, 2.0));
    }

    #[test]
    fn test_fractional_position() {
        let rect = indicator_bounds(CONTAINER, 0.5, 3, 2.0);
        assert!(approx(rect.x, 52.0));
        assert!(approx(position_of(CONTAINER, rect.x, 3, 2.0), 0.5));
    }

    #[test]
    fn test_oversized_inset_collapses_indicator() {
        let rect = indicator_bounds(Size::new(30.0, 10.0), 0.0, 3, 8.0);
        assert_eq!(rect.width, 0.0);
        assert_eq!(rect.height, 0.0);
    }

    #[test]
    fn test_label_bounds_centres_and_floors() {
        let slice = Rect::new(100.0, 0.0, 100.0, 40.0);
        let rect = label_bounds(slice, Size::new(41.0, 21.0), 96.0, 36.0);
        assert_eq!(rect, Rect::new(129.0, 9.0, 41.0, 21.0));
    }

    #[test]
    fn test_label_bounds_clamps_wide_text() {
        let slice = Rect::new(0.0, 0.0, 100.0, 40.0);
        let rect = label_bounds(slice, Size::new(180.0, 20.0), 96.0, 36.0);
        assert_eq!(rect.width, 96.0);
        assert_eq!(rect.x, 2.0);
    }

    #[test]
    fn test_tap_index_resolution() {
        assert_eq!(index_at(CONTAINER, 50.0, 3), Some(0));
        assert_eq!(index_at(CONTAINER, 250.0, 3), Some(2));
        assert_eq!(index_at(CONTAINER, 300.0, 3), Some(3));
        assert_eq!(index_at(CONTAINER, -4.0, 3), Some(-1));
        assert_eq!(index_at(CONTAINER, -150.0, 3), Some(-2));
        assert_eq!(index_at(CONTAINER, f32::NAN, 3), None);
        assert_eq!(index_at(CONTAINER, f32::NEG_INFINITY, 3), None);
    }

    #[test]
    fn test_nearest_index_uses_center() {
        let rect = indicator_bounds(CONTAINER, 1.49, 3, 2.0);
        assert_eq!(nearest_index(CONTAINER, rect, 3), 1);
        let rect = indicator_bounds(CONTAINER, 1.51, 3, 2.0);
        assert_eq!(nearest_index(CONTAINER, rect, 3), 2);
    }

    #[test]
    fn test_settle_index_matches_nearest_index() {
        for step in 0..=40 {
            let position = step as f32 * 0.05 + 0.01;
            let rect = indicator_bounds(CONTAINER, position, 3, 2.0);
            assert_eq!(
                settle_index(position, 3),
                nearest_index(CONTAINER, rect, 3),
                "position {position}"
            );
        }
        assert_eq!(settle_index(9.0, 3), 2);
        assert_eq!(settle_index(-1.0, 3), 0);
    }

    #[test]
    fn test_rect_contains_and_intersection() {
        let rect = Rect::new(10.0, 10.0, 20.0, 20.0);
        assert!(rect.contains(Point::new(10.0, 10.0)));
        assert!(!rect.contains(Point::new(30.0, 15.0)));

        let other = Rect::new(20.0, 0.0, 50.0, 15.0);
        assert_eq!(
            rect.intersection(&other),
            Some(Rect::new(20.0, 10.0, 10.0, 5.0))
        );
        assert_eq!(rect.intersection(&Rect::new(40.0, 40.0, 1.0, 1.0)), None);
    }

    proptest! {
        #[test]
        fn slices_partition_the_width(
            width in 1.0f32..2000.0,
            height in 1.0f32..200.0,
            count in 1usize..12,
        ) {
            let container = Size::new(width, height);
            let mut total = 0.0;
            let mut expected_x = 0.0;
            for index in 0..count {
                let slice = segment_bounds(container, index, count);
                prop_assert!((slice.x - expected_x).abs() < 1e-2);
                prop_assert!((slice.width - width / count as f32).abs() < 1e-3);
                total += slice.width;
                expected_x = slice.max_x();
            }
            prop_assert!((total - width).abs() < 1e-2);
        }

        #[test]
        fn indicator_stays_inside_inset_frame(
            width in 30.0f32..2000.0,
            height in 10.0f32..200.0,
            count in 1usize..12,
            inset_fraction in 0.0f32..0.45,
            position in -5.0f32..20.0,
        ) {
            let container = Size::new(width, height);
            let slice = slice_width(container, count);
            let inset = inset_fraction * slice.min(height);
            let rect = indicator_bounds(container, position, count, inset);
            let tolerance = 1e-2;
            prop_assert!(rect.x >= inset - tolerance);
            prop_assert!(rect.y >= inset - tolerance);
            prop_assert!(rect.max_x() <= width - inset + tolerance);
            prop_assert!(rect.max_y() <= height - inset + tolerance);
        }
    }
}
