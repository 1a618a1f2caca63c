//! Campus constants and viewer defaults.
//! Keeping them in a single place makes it easier to re-survey the map.

use crate::core::{
    geo::{GeoPoint, PixelPoint},
    transform::{Correspondence, TransformCoefficients},
};

/// Inverse-fit coefficients for the old-campus map image.
///
/// Solved offline from [`CAMPUS_CORRESPONDENCES`]; `det` is roughly -4.03e-11.
pub const CAMPUS_COEFFICIENTS: TransformCoefficients = TransformCoefficients {
    a: 7.465e-6,
    b: -7.26e-7,
    c: 114.364542,
    d: -3.337e-7,
    e: -5.363e-6,
    f: 34.815141,
};

/// Surveyed (pixel, geo) pairs the campus coefficients were fitted from.
pub const CAMPUS_CORRESPONDENCES: [Correspondence; 3] = [
    Correspondence {
        pixel: PixelPoint { x: 317.0, y: 491.0 },
        geo: GeoPoint {
            latitude: 34.81240259618643,
            longitude: 114.36655304465421,
        },
    },
    Correspondence {
        pixel: PixelPoint { x: 801.0, y: 1227.0 },
        geo: GeoPoint {
            latitude: 34.80829714447449,
            longitude: 114.36962937077953,
        },
    },
    Correspondence {
        pixel: PixelPoint { x: 1269.0, y: 518.0 },
        geo: GeoPoint {
            latitude: 34.811939923108035,
            longitude: 114.37364180580198,
        },
    },
];

/// Relative tolerance below which a transform determinant counts as zero.
pub const DET_EPSILON: f64 = 1e-9;

/// Most zoomed-out level the viewer allows.
pub const DEFAULT_MIN_ZOOM: f64 = -2.0;

/// Most zoomed-in level the viewer allows.
pub const DEFAULT_MAX_ZOOM: f64 = 3.0;

/// How far past the image edges panning may go, as a fraction of its size.
pub const DEFAULT_BOUNDS_PADDING: f64 = 0.5;

/// Prompt shown before every annotation is wiped.
pub const CLEAR_ALL_PROMPT: &str = "Remove all annotations?";

/// Popup heading attached to the live-location marker.
pub const LIVE_LOCATION_LABEL: &str = "You are here";
