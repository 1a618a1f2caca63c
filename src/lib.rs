//! # campusmap
//!
//! Core of a campus-map annotator: converts GPS fixes into pixels on a fixed
//! map image through a fitted affine transform, and manages user annotations
//! on that image through a small editing state machine.
//!
//! Rendering is left to a [`MapSurface`] implementation; the library ships a
//! headless [`RecordingSurface`] and the `campusmap-app` crate an egui one.

pub mod annotations;
pub mod core;
pub mod input;
pub mod location;
pub mod prelude;
pub mod surface;
pub use crate::core::constants;

// Re-export public API
pub use core::{
    bounds::PixelBounds,
    builder::CampusMapBuilder,
    config::CampusMapConfig,
    geo::{GeoPoint, PixelPoint},
    map::CampusMap,
    transform::{AffineGeoTransform, Correspondence, TransformCoefficients},
};

pub use annotations::{
    Annotation, AnnotationEditSession, AnnotationId, AnnotationStore, EditSessionState,
};

pub use input::{Control, ControlOutcome, SurfaceEvent};

pub use location::{LocationError, LocationProvider};

pub use surface::{ImageOverlay, MapSurface, MarkerId, Notice, RecordingSurface};

/// Result type used throughout the library
pub type Result<T> = std::result::Result<T, MapError>;

/// Common error types
#[derive(Debug, thiserror::Error)]
pub enum MapError {
    #[error("degenerate transform: determinant {det:e} is too close to zero")]
    DegenerateTransform { det: f64 },

    #[error("need at least 3 correspondences to fit a transform, got {found}")]
    InsufficientCorrespondences { found: usize },

    #[error("no annotation with id {0}")]
    RecordNotFound(AnnotationId),

    #[error("location unavailable: {0}")]
    LocationUnavailable(#[from] LocationError),

    #[error("Invalid coordinates: {0}")]
    InvalidCoordinates(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[cfg(feature = "image-probe")]
    #[error("Image error: {0}")]
    Image(#[from] ::image::ImageError),
}

/// Error type alias for convenience
pub type Error = MapError;
