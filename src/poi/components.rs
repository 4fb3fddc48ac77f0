//! Point-of-interest components and the active selection resource.
use std::fmt;

use bevy::prelude::*;

/// Identifier shown to the user and bound to the number keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Component)]
pub struct PoiId(u32);

impl PoiId {
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    #[cfg_attr(not(test), allow(dead_code))]
    pub fn value(&self) -> u32 {
        self.0
    }
}

impl fmt::Display for PoiId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "POI-{:04}", self.0)
    }
}

/// A selectable anchor in the world.
#[derive(Component, Debug, Clone)]
pub struct PointOfInterest {
    pub id: PoiId,
    pub label: String,
}

impl PointOfInterest {
    pub fn new(id: PoiId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }
}

/// Tracks which point of interest is currently selected, if any.
#[derive(Resource, Debug, Default)]
pub struct PoiSelection {
    active: Option<PoiId>,
}

impl PoiSelection {
    #[cfg_attr(not(test), allow(dead_code))]
    pub fn active(&self) -> Option<PoiId> {
        self.active
    }

    pub fn is_active(&self, id: PoiId) -> bool {
        self.active == Some(id)
    }

    /// Selects `id`; returns false when it was already the active selection.
    pub fn select(&mut self, id: PoiId) -> bool {
        if self.is_active(id) {
            return false;
        }
        self.active = Some(id);
        true
    }

    /// Clears the selection, returning what was selected.
    pub fn deselect(&mut self) -> Option<PoiId> {
        self.active.take()
    }
}
