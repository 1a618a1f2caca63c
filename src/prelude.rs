//! Prelude module for common campusmap types and traits
//!
//! This module re-exports the most commonly used types, traits, and functions
//! for easy importing with `use campusmap::prelude::*;`

pub use crate::core::{
    bounds::PixelBounds,
    builder::CampusMapBuilder,
    config::{CampusMapConfig, ImageConfig, TransformSource, ViewerConfig},
    geo::{GeoPoint, PixelPoint},
    map::CampusMap,
    transform::{AffineGeoTransform, Correspondence, TransformCoefficients},
};

pub use crate::annotations::{
    Annotation, AnnotationEditSession, AnnotationId, AnnotationStore, Confirmation, EditBuffer,
    EditSessionState, SessionEvent,
};

pub use crate::input::{Control, ControlOutcome, SurfaceEvent};

pub use crate::location::{
    request_fix, FixRequest, FixResponder, FixResult, FixedLocationProvider, LiveLocation,
    LocationError, LocationProvider, ScriptedLocationProvider, UnavailableLocationProvider,
};

pub use crate::surface::{
    Confirm, FixedAnswer, ImageOverlay, MapSurface, Marker, MarkerId, MarkerLayer, MarkerStyle,
    Notice, NoticeLevel, PopupContent, RecordingSurface,
};

pub use crate::{Error as MapError, Result};

pub use fxhash::{FxHashMap as HashMap, FxHashSet as HashSet};
