//! Systems spawning the indicator and running the pointer engine each fixed tick.
use bevy::{
    picking::mesh_picking::ray_cast::MeshRayCast, prelude::*, window::PrimaryWindow,
};

use super::{
    components::{OffScreenPointer, PointerCamera, PointerTarget},
    config::PointerSettings,
    errors::PointerFault,
    projection::{CameraProjection, ProjectionSource},
    sink::UiIndicatorSink,
    state::{IndicatorSink, PointerInput, PointerVisualState, TickOutcome},
    viewport::{MainViewport, ViewportExtent},
};

#[cfg(feature = "pointer_debug")]
use super::components::PointerDebugText;

const POINTER_Z_INDEX: i32 = 100;
const TOGGLE_KEY: KeyCode = KeyCode::Tab;

/// Spawns the hidden indicator node: a body with a tip on its +X side.
pub fn spawn_pointer_icon(mut commands: Commands, settings: Res<PointerSettings>) {
    let footprint = settings.footprint;

    commands
        .spawn((
            Name::new("OffScreenPointer"),
            Node {
                position_type: PositionType::Absolute,
                width: Val::Px(footprint.x),
                height: Val::Px(footprint.y),
                ..default()
            },
            BackgroundColor(settings.body_color),
            UiTransform::default(),
            Visibility::Hidden,
            ZIndex(POINTER_Z_INDEX),
            OffScreenPointer::new(footprint),
        ))
        .with_children(|parent| {
            parent.spawn((
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Percent(60.0),
                    top: Val::Percent(40.0),
                    width: Val::Percent(40.0),
                    height: Val::Percent(20.0),
                    ..default()
                },
                BackgroundColor(settings.tip_color),
            ));
        });

    info!(
        "Off-screen pointer spawned ({:.0}x{:.0}px)",
        footprint.x, footprint.y
    );
}

/// Recomputes the viewport extent from the primary window and configured insets.
pub fn refresh_main_viewport(
    settings: Res<PointerSettings>,
    window_query: Query<&Window, With<PrimaryWindow>>,
    mut viewport: ResMut<MainViewport>,
) {
    let screen_size = window_query
        .single()
        .ok()
        .map(|window| Vec2::new(window.width(), window.height()));
    viewport.refresh(screen_size, settings.insets, settings.edge_margin());
}

/// Classifies the current target and updates the indicator node.
#[allow(clippy::type_complexity)]
pub fn update_offscreen_pointer(
    slot: Res<PointerTarget>,
    viewport: Res<MainViewport>,
    camera_query: Query<(Entity, &Camera, &GlobalTransform), With<PointerCamera>>,
    target_query: Query<&GlobalTransform>,
    mut ray_cast: MeshRayCast,
    mut pointer_query: Query<(
        &mut OffScreenPointer,
        &mut Node,
        &mut UiTransform,
        &mut Visibility,
    )>,
) {
    let Ok((mut pointer, mut node, mut ui_transform, mut visibility)) = pointer_query.single_mut()
    else {
        return; // Indicator not spawned yet
    };

    // Read the slot once; selection changes land on the next tick.
    let slot = *slot;
    let screen_height = viewport.screen_size.map_or(0.0, |size| size.y);
    let footprint = pointer.state().footprint();
    let mut sink = UiIndicatorSink::new(
        &mut node,
        &mut ui_transform,
        &mut visibility,
        screen_height,
        footprint,
    );

    let occlusion_ignores = slot.target().unwrap_or(Entity::PLACEHOLDER);
    let projection = camera_query
        .single()
        .ok()
        .and_then(|(camera_entity, camera, camera_transform)| {
            CameraProjection::new(
                camera,
                camera_entity,
                camera_transform,
                occlusion_ignores,
                &mut ray_cast,
            )
        });

    let resolved = resolve_tick_inputs(&slot, viewport.extent, projection, |entity| {
        target_query
            .get(entity)
            .ok()
            .map(|transform| transform.translation())
    });

    if let TickOutcome::Skipped(reason) = drive_pointer(&mut pointer, resolved, &mut sink) {
        trace!("Off-screen pointer tick skipped: {}", reason);
    }
}

/// Collaborators gathered for one tick.
struct TickInputs<P> {
    input: PointerInput,
    projection: P,
    target_fault: Option<PointerFault>,
}

/// Checks the viewport, then the camera, then resolves the target position.
///
/// A missing viewport or camera is a fault that hides the pointer. A target
/// that can no longer be located is treated as absent.
fn resolve_tick_inputs<P>(
    slot: &PointerTarget,
    extent: Option<ViewportExtent>,
    projection: Option<P>,
    locate: impl FnOnce(Entity) -> Option<Vec3>,
) -> Result<TickInputs<P>, PointerFault> {
    let viewport = extent.ok_or(PointerFault::ViewportMissing)?;
    let projection = projection.ok_or(PointerFault::CameraMissing)?;

    let mut target_fault = None;
    let target = slot
        .target()
        .filter(|_| slot.is_enabled())
        .and_then(|entity| {
            let position = locate(entity);
            if position.is_none() {
                target_fault = Some(PointerFault::TargetDespawned(entity));
            }
            position
        });

    Ok(TickInputs {
        input: PointerInput {
            target,
            enabled: slot.is_enabled(),
            viewport,
        },
        projection,
        target_fault,
    })
}

/// Ticks the engine, or forces it hidden when collaborators are missing.
fn drive_pointer<P, S>(
    pointer: &mut OffScreenPointer,
    resolved: Result<TickInputs<P>, PointerFault>,
    sink: &mut S,
) -> TickOutcome
where
    P: ProjectionSource,
    S: IndicatorSink,
{
    match resolved {
        Err(fault) => {
            report_fault(pointer, Some(fault));
            pointer.state_mut().fail_closed(sink);
            TickOutcome::Updated(PointerVisualState::Hidden)
        }
        Ok(TickInputs {
            input,
            mut projection,
            target_fault,
        }) => {
            report_fault(pointer, target_fault);
            pointer.state_mut().tick(&input, &mut projection, sink)
        }
    }
}

/// Logs fault changes only, so a persistent fault does not spam every tick.
fn report_fault(pointer: &mut OffScreenPointer, fault: Option<PointerFault>) {
    if !pointer.record_fault(fault) {
        return;
    }

    match fault {
        Some(fault) if fault.is_wiring_fault() => warn!("Off-screen pointer hidden: {}", fault),
        Some(fault) => debug!("Off-screen pointer target treated as absent: {}", fault),
        None => debug!("Off-screen pointer collaborators available"),
    }
}

/// Enables or disables the pointer, standing in for a view-mode switch.
pub fn toggle_pointer_enabled(keyboard: Res<ButtonInput<KeyCode>>, mut slot: ResMut<PointerTarget>) {
    if !keyboard.just_pressed(TOGGLE_KEY) {
        return;
    }

    let enabled = !slot.is_enabled();
    slot.set_enabled(enabled);
    info!(
        "Off-screen pointer {}",
        if enabled { "enabled" } else { "disabled" }
    );
}

#[cfg(feature = "pointer_debug")]
pub fn spawn_pointer_debug_text(mut commands: Commands) {
    commands.spawn((
        Name::new("PointerDebugText"),
        Text::new(""),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(12.0),
            bottom: Val::Px(12.0),
            ..default()
        },
        ZIndex(POINTER_Z_INDEX + 1),
        PointerDebugText,
    ));
}

#[cfg(feature = "pointer_debug")]
pub fn update_pointer_debug_text(
    slot: Res<PointerTarget>,
    viewport: Res<MainViewport>,
    pointer_query: Query<&OffScreenPointer>,
    mut text_query: Query<&mut Text, With<PointerDebugText>>,
) {
    let (Ok(pointer), Ok(mut text)) = (pointer_query.single(), text_query.single_mut()) else {
        return;
    };

    let state = pointer.state();
    let screen = viewport
        .screen_size
        .map_or_else(|| "n/a".to_string(), |size| format!("{:.0}x{:.0}", size.x, size.y));
    let projected = state.last_projection().map_or_else(
        || "n/a".to_string(),
        |pos| format!("({:.0}, {:.0}, {:.2})", pos.x, pos.y, pos.z),
    );

    text.0 = format!(
        "screen: {}\nenabled: {} | target: {:?}\nstate: {}\nprojected: {}\nanchored: ({:.0}, {:.0}) @ {:.1} deg",
        screen,
        slot.is_enabled(),
        slot.target(),
        state.visual_state(),
        projected,
        state.anchored_position().x,
        state.anchored_position().y,
        state.rotation_degrees(),
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pointer::viewport::AxisRange;

    const FOOTPRINT: Vec2 = Vec2::new(40.0, 40.0);
    const TARGET: Vec3 = Vec3::new(2.0, 0.5, -6.0);

    /// Projects every point to the same screen position.
    struct FixedProjection(Vec3);

    impl ProjectionSource for FixedProjection {
        fn project_to_screen(&self, _world: Vec3) -> Option<Vec3> {
            Some(self.0)
        }

        fn is_occluded(&mut self, _world: Vec3) -> bool {
            false
        }

        fn screen_size(&self) -> Vec2 {
            Vec2::new(800.0, 600.0)
        }
    }

    #[derive(Default)]
    struct RecordingSink {
        visibility: Vec<bool>,
    }

    impl IndicatorSink for RecordingSink {
        fn set_visible(&mut self, visible: bool) {
            self.visibility.push(visible);
        }

        fn set_position(&mut self, _position: Vec2) {}

        fn set_rotation(&mut self, _degrees: f32) {}
    }

    fn extent() -> Option<ViewportExtent> {
        Some(ViewportExtent::new(
            AxisRange::new(100.0, 700.0),
            AxisRange::new(50.0, 550.0),
        ))
    }

    fn aimed_slot() -> PointerTarget {
        let mut slot = PointerTarget::default();
        slot.set_target(Entity::PLACEHOLDER);
        slot
    }

    fn off_screen() -> Option<FixedProjection> {
        Some(FixedProjection(Vec3::new(900.0, 300.0, 5.0)))
    }

    fn no_camera() -> Option<FixedProjection> {
        None
    }

    /// Pointer already showing an off-screen target.
    fn visible_pointer(sink: &mut RecordingSink) -> OffScreenPointer {
        let mut pointer = OffScreenPointer::new(FOOTPRINT);
        let resolved = resolve_tick_inputs(&aimed_slot(), extent(), off_screen(), |_| Some(TARGET));
        let outcome = drive_pointer(&mut pointer, resolved, sink);
        assert_eq!(outcome, TickOutcome::Updated(PointerVisualState::OffScreen));
        pointer
    }

    #[test]
    fn missing_viewport_is_reported_before_camera() {
        let resolved = resolve_tick_inputs(&aimed_slot(), None, off_screen(), |_| Some(TARGET));
        assert_eq!(resolved.err(), Some(PointerFault::ViewportMissing));

        let resolved = resolve_tick_inputs(&aimed_slot(), None, no_camera(), |_| Some(TARGET));
        assert_eq!(resolved.err(), Some(PointerFault::ViewportMissing));
    }

    #[test]
    fn missing_camera_is_a_fault() {
        let resolved = resolve_tick_inputs(&aimed_slot(), extent(), no_camera(), |_| Some(TARGET));
        assert_eq!(resolved.err(), Some(PointerFault::CameraMissing));
    }

    #[test]
    fn unlocatable_target_is_treated_as_absent() {
        let Ok(inputs) = resolve_tick_inputs(&aimed_slot(), extent(), off_screen(), |_| None) else {
            panic!("collaborators are available");
        };
        assert_eq!(inputs.input.target, None);
        assert_eq!(
            inputs.target_fault,
            Some(PointerFault::TargetDespawned(Entity::PLACEHOLDER))
        );
    }

    #[test]
    fn disabled_slot_skips_target_lookup() {
        let mut slot = aimed_slot();
        slot.set_enabled(false);

        let Ok(inputs) = resolve_tick_inputs(&slot, extent(), off_screen(), |_| -> Option<Vec3> {
            panic!("target looked up while disabled")
        }) else {
            panic!("collaborators are available");
        };
        assert_eq!(inputs.input.target, None);
        assert!(!inputs.input.enabled);
        assert_eq!(inputs.target_fault, None);
    }

    #[test]
    fn missing_camera_hides_visible_pointer() {
        let mut sink = RecordingSink::default();
        let mut pointer = visible_pointer(&mut sink);

        let resolved = resolve_tick_inputs(&aimed_slot(), extent(), no_camera(), |_| Some(TARGET));
        let outcome = drive_pointer(&mut pointer, resolved, &mut sink);

        assert_eq!(outcome, TickOutcome::Updated(PointerVisualState::Hidden));
        assert_eq!(pointer.state().visual_state(), PointerVisualState::Hidden);
        assert_eq!(sink.visibility, vec![true, false]);
        assert!(!pointer.record_fault(Some(PointerFault::CameraMissing)));
    }

    #[test]
    fn missing_viewport_hides_visible_pointer() {
        let mut sink = RecordingSink::default();
        let mut pointer = visible_pointer(&mut sink);

        let resolved = resolve_tick_inputs(&aimed_slot(), None, off_screen(), |_| Some(TARGET));
        drive_pointer(&mut pointer, resolved, &mut sink);

        assert_eq!(pointer.state().visual_state(), PointerVisualState::Hidden);
        assert_eq!(sink.visibility, vec![true, false]);
        assert!(!pointer.record_fault(Some(PointerFault::ViewportMissing)));
    }

    #[test]
    fn despawned_target_hides_pointer_and_recovers() {
        let mut sink = RecordingSink::default();
        let mut pointer = visible_pointer(&mut sink);

        let resolved = resolve_tick_inputs(&aimed_slot(), extent(), off_screen(), |_| None);
        let outcome = drive_pointer(&mut pointer, resolved, &mut sink);
        assert_eq!(outcome, TickOutcome::Updated(PointerVisualState::Hidden));

        let resolved = resolve_tick_inputs(&aimed_slot(), extent(), off_screen(), |_| Some(TARGET));
        let outcome = drive_pointer(&mut pointer, resolved, &mut sink);

        assert_eq!(outcome, TickOutcome::Updated(PointerVisualState::OffScreen));
        assert_eq!(sink.visibility, vec![true, false, true]);
        assert!(!pointer.record_fault(None));
    }
}
