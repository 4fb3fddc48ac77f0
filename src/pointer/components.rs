//! Components and resources exposed by the pointer module.
use bevy::prelude::*;

use super::{errors::PointerFault, state::PointerState};

/// Single-writer slot the selection collaborator uses to aim the pointer.
///
/// Read once at the start of each fixed tick.
#[derive(Resource, Debug, Clone, Copy)]
pub struct PointerTarget {
    target: Option<Entity>,
    enabled: bool,
}

impl PointerTarget {
    pub fn new(enabled: bool) -> Self {
        Self {
            target: None,
            enabled,
        }
    }

    pub fn target(&self) -> Option<Entity> {
        self.target
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_target(&mut self, target: Entity) {
        self.target = Some(target);
    }

    pub fn clear_target(&mut self) {
        self.target = None;
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }
}

impl Default for PointerTarget {
    fn default() -> Self {
        Self::new(true)
    }
}

/// Marker for the camera the pointer projects through.
#[derive(Component, Debug, Default)]
pub struct PointerCamera;

/// The indicator UI node and the state machine driving it.
#[derive(Component, Debug)]
pub struct OffScreenPointer {
    state: PointerState,
    last_fault: Option<PointerFault>,
}

impl OffScreenPointer {
    pub fn new(footprint: Vec2) -> Self {
        Self {
            state: PointerState::new(footprint),
            last_fault: None,
        }
    }

    pub fn state(&self) -> &PointerState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut PointerState {
        &mut self.state
    }

    /// Records the current fault; returns true when it differs from the last one.
    pub fn record_fault(&mut self, fault: Option<PointerFault>) -> bool {
        if self.last_fault == fault {
            return false;
        }
        self.last_fault = fault;
        true
    }
}

/// Text overlay showing the pointer's internal state.
#[cfg(feature = "pointer_debug")]
#[derive(Component, Debug, Default)]
pub struct PointerDebugText;
