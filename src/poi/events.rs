//! Messages driving point-of-interest selection.
use bevy::prelude::Message;

use super::components::PoiId;

/// Request from input (or any other collaborator) to change the selection.
#[derive(Message, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PoiSelectionRequest {
    Select(PoiId),
    Deselect,
}
