//! Collaborator faults the pointer adapter can run into.
use std::fmt;

use bevy::prelude::Entity;

/// Reasons the pointer could not be evaluated against the scene this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerFault {
    /// No single camera carries the pointer camera marker, or it has no viewport yet.
    CameraMissing,
    /// No primary window to derive the viewport extent from.
    ViewportMissing,
    /// The selected target entity no longer has a transform.
    TargetDespawned(Entity),
}

impl PointerFault {
    /// Faults that force the indicator hidden rather than treating the target as absent.
    pub fn is_wiring_fault(&self) -> bool {
        matches!(self, Self::CameraMissing | Self::ViewportMissing)
    }
}

impl fmt::Display for PointerFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CameraMissing => write!(f, "pointer camera unavailable"),
            Self::ViewportMissing => write!(f, "primary window unavailable"),
            Self::TargetDespawned(entity) => write!(f, "target {:?} has no transform", entity),
        }
    }
}

impl std::error::Error for PointerFault {}
