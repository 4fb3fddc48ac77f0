//! Visibility classification and screen geometry for the off-screen pointer.
//!
//! [`PointerState`] is evaluated once per fixed tick. It turns a target world
//! position, the current viewport extent, and a camera-side
//! [`ProjectionSource`] into a visibility flag, an anchored screen position,
//! and a rotation, and pushes them into an [`IndicatorSink`].
use std::fmt;

use bevy::prelude::*;

use super::{angle::angle_from_direction, projection::ProjectionSource, viewport::ViewportExtent};

/// Authoritative classification of the pointer for the current tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerVisualState {
    /// No target, pointer disabled, or collaborators missing.
    #[default]
    Hidden,
    /// Target is on screen and in plain sight; no indicator needed.
    OnScreenHidden,
    /// Target is outside the viewport or behind the camera.
    OffScreen,
    /// Target is on screen but geometry blocks the line of sight.
    Obscured,
}

impl PointerVisualState {
    pub fn is_visible(self) -> bool {
        matches!(self, Self::OffScreen | Self::Obscured)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Hidden => "hidden",
            Self::OnScreenHidden => "on-screen",
            Self::OffScreen => "off-screen",
            Self::Obscured => "obscured",
        }
    }
}

impl fmt::Display for PointerVisualState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Overlay element that displays the indicator.
pub trait IndicatorSink {
    fn set_visible(&mut self, visible: bool);
    /// Position in bottom-left-origin, y-up screen pixels.
    fn set_position(&mut self, position: Vec2);
    /// Counter-clockwise rotation in degrees.
    fn set_rotation(&mut self, degrees: f32);
}

/// Everything the engine reads at the start of a tick.
///
/// The target position is resolved once by the caller and stays fixed for
/// the rest of the tick.
#[derive(Debug, Clone, Copy)]
pub struct PointerInput {
    pub target: Option<Vec3>,
    pub enabled: bool,
    pub viewport: ViewportExtent,
}

/// Why a tick left the previous output untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    ViewportTooSmall,
    ProjectionUnavailable,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ViewportTooSmall => write!(f, "viewport smaller than twice the indicator"),
            Self::ProjectionUnavailable => write!(f, "target projection unavailable"),
        }
    }
}

/// Result of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    Updated(PointerVisualState),
    Skipped(SkipReason),
}

/// Per-indicator state machine.
#[derive(Debug, Clone)]
pub struct PointerState {
    footprint: Vec2,
    state: PointerVisualState,
    visible: bool,
    anchored_position: Vec2,
    rotation_degrees: f32,
    last_projection: Option<Vec3>,
}

impl PointerState {
    /// Creates a hidden pointer whose indicator occupies `footprint` pixels.
    pub fn new(footprint: Vec2) -> Self {
        Self {
            footprint,
            state: PointerVisualState::Hidden,
            visible: false,
            anchored_position: Vec2::ZERO,
            rotation_degrees: 0.0,
            last_projection: None,
        }
    }

    pub fn footprint(&self) -> Vec2 {
        self.footprint
    }

    #[cfg_attr(not(any(test, feature = "pointer_debug")), allow(dead_code))]
    pub fn visual_state(&self) -> PointerVisualState {
        self.state
    }

    #[cfg_attr(not(any(test, feature = "pointer_debug")), allow(dead_code))]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[cfg_attr(not(any(test, feature = "pointer_debug")), allow(dead_code))]
    pub fn anchored_position(&self) -> Vec2 {
        self.anchored_position
    }

    /// Only meaningful while visible.
    #[cfg_attr(not(any(test, feature = "pointer_debug")), allow(dead_code))]
    pub fn rotation_degrees(&self) -> f32 {
        self.rotation_degrees
    }

    /// Raw projection of the target from the last evaluated tick.
    #[cfg_attr(not(feature = "pointer_debug"), allow(dead_code))]
    pub fn last_projection(&self) -> Option<Vec3> {
        self.last_projection
    }

    /// Runs one tick of classification and pushes the result into `sink`.
    pub fn tick<P, S>(&mut self, input: &PointerInput, projection: &mut P, sink: &mut S) -> TickOutcome
    where
        P: ProjectionSource + ?Sized,
        S: IndicatorSink + ?Sized,
    {
        let Some(target) = input.target.filter(|_| input.enabled) else {
            self.hide(PointerVisualState::Hidden, sink);
            return TickOutcome::Updated(self.state);
        };

        let viewport = &input.viewport;
        if !viewport.fits(self.footprint) {
            return TickOutcome::Skipped(SkipReason::ViewportTooSmall);
        }

        let Some(screen) = projection.project_to_screen(target) else {
            return TickOutcome::Skipped(SkipReason::ProjectionUnavailable);
        };
        self.last_projection = Some(screen);

        let raw = screen.truncate();
        let behind = screen.z < 0.0;

        if behind || !viewport.contains(raw) {
            let used = if behind {
                reflect_through_screen(raw, projection.screen_size())
            } else {
                raw
            };
            self.show(
                PointerVisualState::OffScreen,
                viewport.clamp(used),
                rotation_toward_center(viewport, used),
                sink,
            );
        } else if projection.is_occluded(target) {
            self.show(
                PointerVisualState::Obscured,
                raw,
                rotation_toward_center(viewport, raw),
                sink,
            );
        } else {
            self.hide(PointerVisualState::OnScreenHidden, sink);
        }

        TickOutcome::Updated(self.state)
    }

    /// Forces the pointer hidden when its collaborators are not wired up.
    pub fn fail_closed<S: IndicatorSink + ?Sized>(&mut self, sink: &mut S) {
        self.hide(PointerVisualState::Hidden, sink);
    }

    fn show<S: IndicatorSink + ?Sized>(
        &mut self,
        state: PointerVisualState,
        position: Vec2,
        rotation_degrees: f32,
        sink: &mut S,
    ) {
        self.transition(state);
        self.anchored_position = position;
        self.rotation_degrees = rotation_degrees;
        sink.set_position(position);
        sink.set_rotation(rotation_degrees);
        self.set_visible(state.is_visible(), sink);
    }

    fn hide<S: IndicatorSink + ?Sized>(&mut self, state: PointerVisualState, sink: &mut S) {
        self.transition(state);
        self.set_visible(state.is_visible(), sink);
    }

    fn transition(&mut self, next: PointerVisualState) {
        if self.state != next {
            debug!("Off-screen pointer state: {} -> {}", self.state, next);
            self.state = next;
        }
    }

    fn set_visible<S: IndicatorSink + ?Sized>(&mut self, visible: bool, sink: &mut S) {
        if self.visible == visible {
            return;
        }
        info!("Off-screen pointer visibility: {}", visible);
        self.visible = visible;
        sink.set_visible(visible);
    }
}

/// Undoes the mirroring a perspective projection applies to points behind the camera.
///
/// Uses the full screen size rather than the inset viewport.
fn reflect_through_screen(position: Vec2, screen_size: Vec2) -> Vec2 {
    screen_size - position
}

/// A reflected behind-camera point can land exactly on the center; the zero
/// direction then yields a rotation of 0.
fn rotation_toward_center(viewport: &ViewportExtent, position: Vec2) -> f32 {
    angle_from_direction((viewport.center - position).normalize_or_zero())
}
