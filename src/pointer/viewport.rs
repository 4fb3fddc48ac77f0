//! Screen-space extents the indicator is clamped into.
use bevy::prelude::*;

/// Inclusive scalar range along one screen axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f32,
    pub max: f32,
}

impl AxisRange {
    pub const fn new(min: f32, max: f32) -> Self {
        Self { min, max }
    }

    /// Length of the range; negative when the range is inverted.
    pub fn span(&self) -> f32 {
        self.max - self.min
    }

    /// Boundary-inclusive containment.
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamps `value` into the range without panicking on inverted ranges.
    pub fn clamp(&self, value: f32) -> f32 {
        value.max(self.min).min(self.max)
    }

    fn midpoint(&self) -> f32 {
        (self.min + self.max) * 0.5
    }
}

/// Distances reserved along each screen edge by other layout elements.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ViewportInsets {
    pub top: f32,
    pub bottom: f32,
    pub left: f32,
    pub right: f32,
}

/// Region of the screen the indicator may occupy, in bottom-left-origin,
/// y-up screen pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportExtent {
    pub width: AxisRange,
    pub height: AxisRange,
    pub center: Vec2,
}

impl ViewportExtent {
    /// Builds an extent from explicit ranges, centering between them.
    pub fn new(width: AxisRange, height: AxisRange) -> Self {
        Self {
            width,
            height,
            center: Vec2::new(width.midpoint(), height.midpoint()),
        }
    }

    /// Computes the extent for a screen, shrunk by layout insets and by
    /// `edge_margin` so a clamped indicator stays fully visible.
    pub fn from_screen(screen_size: Vec2, insets: ViewportInsets, edge_margin: Vec2) -> Self {
        let width = AxisRange::new(
            insets.left + edge_margin.x,
            screen_size.x - insets.right - edge_margin.x,
        );
        let height = AxisRange::new(
            insets.bottom + edge_margin.y,
            screen_size.y - insets.top - edge_margin.y,
        );
        Self::new(width, height)
    }

    /// True when the point lies inside both ranges, edges included.
    pub fn contains(&self, point: Vec2) -> bool {
        self.width.contains(point.x) && self.height.contains(point.y)
    }

    /// Clamps each axis independently.
    pub fn clamp(&self, point: Vec2) -> Vec2 {
        Vec2::new(self.width.clamp(point.x), self.height.clamp(point.y))
    }

    /// True when both spans are at least twice the indicator footprint.
    pub fn fits(&self, footprint: Vec2) -> bool {
        self.height.span() >= 2.0 * footprint.y && self.width.span() >= 2.0 * footprint.x
    }
}

/// Current viewport extent and full screen size, refreshed every fixed tick.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct MainViewport {
    pub extent: Option<ViewportExtent>,
    pub screen_size: Option<Vec2>,
}

impl MainViewport {
    pub fn refresh(&mut self, screen_size: Option<Vec2>, insets: ViewportInsets, edge_margin: Vec2) {
        self.screen_size = screen_size;
        self.extent = screen_size.map(|size| ViewportExtent::from_screen(size, insets, edge_margin));
    }
}
