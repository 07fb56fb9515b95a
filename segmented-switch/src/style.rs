//! Colors, fonts and the configurable look of the switch.
//!
//! ## Usage
//!
//! Start from [`SwitchStyle::default`] and override fields with the generated
//! setters, then hand the style to
//! [`SegmentedSwitch::with_style`](crate::SegmentedSwitch::with_style).

use std::time::Duration;

use derive_setters::Setters;

use crate::error::SwitchError;

/// A color in the sRGB color space with an alpha component.
///
/// Values are stored as `f32`s, typically in the range `[0.0, 1.0]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
    /// Alpha channel
    pub a: f32,
}

impl Color {
    /// Fully transparent black.
    pub const TRANSPARENT: Color = Color::new(0.0, 0.0, 0.0, 0.0);
    /// Opaque black.
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    /// Opaque white.
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);

    /// Creates a new `Color` from four `f32` values (red, green, blue, alpha).
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Creates a new opaque `Color` from three `f32` values.
    #[inline]
    pub const fn from_rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Creates a new `Color` from four `u8` values (red, green, blue, alpha).
    #[inline]
    pub fn from_rgba_u8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: a as f32 / 255.0,
        }
    }

    /// Returns a copy of this color with a different alpha.
    #[inline]
    pub fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// Converts the color to an array of `[f32; 4]`.
    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Color {
    #[inline]
    fn default() -> Self {
        Self::TRANSPARENT
    }
}

impl From<[u8; 3]> for Color {
    #[inline]
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::from_rgba_u8(r, g, b, 255)
    }
}

/// A font request passed through to the host's text system.
///
/// The switch never rasterises text; the family and size only travel to the
/// [`TextMeasurer`](crate::labels::TextMeasurer) and the draw commands.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSpec {
    /// Font family name.
    pub family: String,
    /// Point size.
    pub size: f32,
}

impl FontSpec {
    /// Creates a font request.
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }
}

impl Default for FontSpec {
    fn default() -> Self {
        Self::new(
            SegmentedSwitchDefaults::FONT_FAMILY,
            SegmentedSwitchDefaults::FONT_SIZE,
        )
    }
}

/// Defaults for [`SwitchStyle`].
pub struct SegmentedSwitchDefaults;

impl SegmentedSwitchDefaults {
    /// Track color behind the dim labels.
    pub const BACKGROUND_COLOR: Color = Color::BLACK;
    /// Indicator color.
    pub const SELECTED_BACKGROUND_COLOR: Color = Color::WHITE;
    /// Dim label color.
    pub const TITLE_COLOR: Color = Color::WHITE;
    /// Highlighted label color.
    pub const SELECTED_TITLE_COLOR: Color = Color::BLACK;
    /// Font family used for both label layers.
    pub const FONT_FAMILY: &'static str = "HelveticaNeue";
    /// Font size used for both label layers.
    pub const FONT_SIZE: f32 = 18.0;
    /// Gap between the indicator and its slice edges.
    pub const INDICATOR_INSET: f32 = 2.0;
    /// Settle animation duration.
    pub const ANIMATION_DURATION: Duration = Duration::from_millis(300);
    /// Settle spring damping ratio.
    pub const ANIMATION_DAMPING: f32 = 0.75;
    /// Settle spring initial velocity, in segment distances per second.
    pub const ANIMATION_VELOCITY: f32 = 0.0;
}

/// Visual and motion configuration for the switch.
#[derive(Debug, Clone, PartialEq, Setters)]
pub struct SwitchStyle {
    /// Track color.
    pub background_color: Color,
    /// Indicator color.
    pub selected_background_color: Color,
    /// Color of the dim labels drawn on the track.
    pub title_color: Color,
    /// Color of the highlighted labels drawn over the indicator.
    pub selected_title_color: Color,
    /// Font of the dim labels.
    #[setters(into)]
    pub title_font: FontSpec,
    /// Font of the highlighted labels.
    #[setters(into)]
    pub selected_title_font: FontSpec,
    /// Gap between the indicator and the edges of its slice.
    pub indicator_inset: f32,
    /// Corner radius of the track, indicator and clip region.
    ///
    /// `None` resolves to half the container height, producing a pill.
    #[setters(strip_option)]
    pub corner_radius: Option<f32>,
    /// Settle animation duration.
    pub animation_duration: Duration,
    /// Settle spring damping ratio.
    pub animation_damping: f32,
    /// Settle spring initial velocity.
    pub animation_velocity: f32,
    /// Whether the switch reacts to gestures.
    pub enabled: bool,
}

impl Default for SwitchStyle {
    fn default() -> Self {
        Self {
            background_color: SegmentedSwitchDefaults::BACKGROUND_COLOR,
            selected_background_color: SegmentedSwitchDefaults::SELECTED_BACKGROUND_COLOR,
            title_color: SegmentedSwitchDefaults::TITLE_COLOR,
            selected_title_color: SegmentedSwitchDefaults::SELECTED_TITLE_COLOR,
            title_font: FontSpec::default(),
            selected_title_font: FontSpec::default(),
            indicator_inset: SegmentedSwitchDefaults::INDICATOR_INSET,
            corner_radius: None,
            animation_duration: SegmentedSwitchDefaults::ANIMATION_DURATION,
            animation_damping: SegmentedSwitchDefaults::ANIMATION_DAMPING,
            animation_velocity: SegmentedSwitchDefaults::ANIMATION_VELOCITY,
            enabled: true,
        }
    }
}

impl SwitchStyle {
    /// Rejects values the layout and animation math cannot use.
    pub fn validate(&self) -> Result<(), SwitchError> {
        non_negative("indicator_inset", self.indicator_inset)?;
        if let Some(radius) = self.corner_radius {
            non_negative("corner_radius", radius)?;
        }
        non_negative("animation_damping", self.animation_damping)?;
        finite("animation_velocity", self.animation_velocity)?;
        non_negative("title_font.size", self.title_font.size)?;
        non_negative("selected_title_font.size", self.selected_title_font.size)?;
        Ok(())
    }

    /// Corner radius for a container of the given height.
    pub fn resolved_corner_radius(&self, container_height: f32) -> f32 {
        self.corner_radius
            .unwrap_or((container_height / 2.0).max(0.0))
    }
}

fn finite(field: &'static str, value: f32) -> Result<f32, SwitchError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SwitchError::InvalidStyle { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<f32, SwitchError> {
    match finite(field, value)? {
        v if v >= 0.0 => Ok(v),
        _ => Err(SwitchError::InvalidStyle { field, value }),
    }
}

/// Clamps a style value into a usable range, returning the replacement when
/// the input had to be changed.
pub(crate) fn sanitize_non_negative(value: f32) -> Option<f32> {
    if value.is_finite() && value >= 0.0 {
        None
    } else if value.is_nan() || value < 0.0 {
        Some(0.0)
    } else {
        Some(f32::MAX)
    }
}
