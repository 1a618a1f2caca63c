use crate::{
    annotations::store::AnnotationId,
    core::geo::PixelPoint,
    surface::MarkerId,
};
use serde::{Deserialize, Serialize};

/// Interaction events reported by a map surface
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SurfaceEvent {
    /// Click/tap on the base image away from any marker
    Click { pixel: PixelPoint },
    /// Click/tap on a marker
    MarkerClicked { marker: MarkerId },
    /// A marker was dropped at a new position
    MarkerDragged { marker: MarkerId, pixel: PixelPoint },
    /// The user dismissed a marker's popup
    PopupClosed { marker: MarkerId },
    /// A popup finished rendering and its controls are live
    PopupRendered { marker: MarkerId },
}

/// User-facing controls, independent of any UI toolkit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Control {
    /// Arm or disarm placement mode
    TogglePlacing,
    /// Remove every annotation (asks for confirmation)
    ClearAll,
    /// Request a one-shot location fix
    LocateMe,
    /// Commit the open editor
    Save { title: String, description: String },
    /// Delete the annotation open in the editor
    Delete,
    /// Open the editor for an existing annotation
    Edit(AnnotationId),
    /// Close the editor or leave placement mode without changes
    Cancel,
}

/// What a control or surface event ended up doing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlOutcome {
    Applied,
    /// Nothing to do in the current state
    Ignored,
    /// The user backed out of a destructive action
    ConfirmationDeclined,
    /// A recoverable failure; logged, and raised as a notice when the user can act on it
    Failed,
}
