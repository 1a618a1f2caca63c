//! Contract for the rendering layer that displays the campus map
//!
//! A surface draws the base image, markers and popups and reports user
//! interaction back as [`SurfaceEvent`](crate::input::SurfaceEvent)s. It only
//! ever holds [`MarkerId`]s; annotation text lives in the store.

pub mod headless;
pub mod image;
pub mod marker;
pub mod popup;

pub use headless::RecordingSurface;
pub use image::ImageOverlay;
pub use marker::{Marker, MarkerLayer, MarkerStyle};
pub use popup::PopupContent;

use crate::{annotations::store::AnnotationId, core::geo::PixelPoint};
use serde::{Deserialize, Serialize};

/// Non-owning handle to something drawn on the surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum MarkerId {
    Annotation(AnnotationId),
    /// The single device-position marker
    LiveLocation,
}

impl MarkerId {
    pub fn annotation(&self) -> Option<AnnotationId> {
        match self {
            MarkerId::Annotation(id) => Some(*id),
            MarkerId::LiveLocation => None,
        }
    }
}

impl std::fmt::Display for MarkerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MarkerId::Annotation(id) => write!(f, "{id}"),
            MarkerId::LiveLocation => write!(f, "live-location"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoticeLevel {
    Info,
    Warning,
    Error,
}

/// A short, non-fatal message shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn info(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Info,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.level, self.message)
    }
}

/// Rendering and interaction collaborator
pub trait MapSurface {
    /// Displays the base image with its pan and zoom limits
    fn set_image(&mut self, overlay: &ImageOverlay);

    /// Centers the view on a pixel
    fn pan_to(&mut self, pixel: PixelPoint);

    fn place_marker(&mut self, marker: MarkerId, pixel: PixelPoint, style: MarkerStyle);

    fn move_marker(&mut self, marker: MarkerId, pixel: PixelPoint);

    fn remove_marker(&mut self, marker: MarkerId);

    /// Removes every annotation marker, keeping the live-location marker
    fn clear_annotation_markers(&mut self);

    /// Attaches (or replaces) and opens the popup bound to a marker
    fn show_popup(&mut self, marker: MarkerId, content: PopupContent);

    fn close_popup(&mut self, marker: MarkerId);

    /// Reflects placement mode on the toggle control and cursor
    fn set_placement_armed(&mut self, armed: bool);

    fn notify(&mut self, notice: Notice);
}

/// Answers yes/no questions before destructive actions
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Always answers with a fixed value
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

impl Confirm for FixedAnswer {
    fn confirm(&mut self, _prompt: &str) -> bool {
        self.0
    }
}
