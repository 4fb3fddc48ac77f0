//! Applies pointer output to the indicator's UI node.
use bevy::prelude::*;

use super::state::IndicatorSink;

/// Writes visibility, position, and rotation into a UI node.
///
/// Pointer output is in bottom-left-origin, y-up screen pixels; UI layout is
/// top-left-origin and y-down, so both position and rotation are flipped here.
pub struct UiIndicatorSink<'a> {
    node: &'a mut Node,
    transform: &'a mut UiTransform,
    visibility: &'a mut Visibility,
    screen_height: f32,
    footprint: Vec2,
}

impl<'a> UiIndicatorSink<'a> {
    pub fn new(
        node: &'a mut Node,
        transform: &'a mut UiTransform,
        visibility: &'a mut Visibility,
        screen_height: f32,
        footprint: Vec2,
    ) -> Self {
        Self {
            node,
            transform,
            visibility,
            screen_height,
            footprint,
        }
    }
}

impl IndicatorSink for UiIndicatorSink<'_> {
    fn set_visible(&mut self, visible: bool) {
        *self.visibility = if visible {
            Visibility::Visible
        } else {
            Visibility::Hidden
        };
    }

    fn set_position(&mut self, position: Vec2) {
        let top_left = ui_top_left(position, self.screen_height, self.footprint);
        self.node.left = Val::Px(top_left.x);
        self.node.top = Val::Px(top_left.y);
    }

    fn set_rotation(&mut self, degrees: f32) {
        self.transform.rotation = Rot2::degrees(-degrees);
    }
}

/// Top-left corner of a node of size `footprint` centered on a y-up screen point.
pub fn ui_top_left(position: Vec2, screen_height: f32, footprint: Vec2) -> Vec2 {
    Vec2::new(
        position.x - footprint.x * 0.5,
        screen_height - position.y - footprint.y * 0.5,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn centers_node_and_flips_vertical_axis() {
        let footprint = Vec2::new(40.0, 20.0);
        assert_eq!(
            ui_top_left(Vec2::new(700.0, 300.0), 600.0, footprint),
            Vec2::new(680.0, 290.0)
        );
        assert_eq!(
            ui_top_left(Vec2::new(20.0, 590.0), 600.0, footprint),
            Vec2::new(0.0, 0.0)
        );
    }

    #[test]
    fn sink_writes_node_fields() {
        let mut node = Node::default();
        let mut transform = UiTransform::default();
        let mut visibility = Visibility::Hidden;
        let mut sink = UiIndicatorSink::new(
            &mut node,
            &mut transform,
            &mut visibility,
            600.0,
            Vec2::splat(40.0),
        );

        sink.set_visible(true);
        sink.set_position(Vec2::new(400.0, 300.0));
        sink.set_rotation(90.0);

        assert_eq!(visibility, Visibility::Visible);
        assert_eq!(node.left, Val::Px(380.0));
        assert_eq!(node.top, Val::Px(280.0));
        assert!((transform.rotation.as_degrees() + 90.0).abs() < 1e-3);
    }
}
