//! Configuration for a campus map session
//!
//! Everything that differs between deployments (which image, how it is
//! georeferenced, viewer limits) lives in [`CampusMapConfig`], which can be
//! loaded from JSON or assembled in code.

use crate::{
    core::{
        constants::{
            CAMPUS_COEFFICIENTS, DEFAULT_BOUNDS_PADDING, DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM,
        },
        geo::GeoPoint,
        transform::{AffineGeoTransform, Correspondence, TransformCoefficients},
    },
    surface::image::ImageOverlay,
    MapError, Result,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default base-image file name
pub const DEFAULT_IMAGE_PATH: &str = "Map_of_Old_Campus.jpg";

/// How the GPS-to-pixel transform is obtained
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransformSource {
    /// Use already-solved coefficients
    Coefficients(TransformCoefficients),
    /// Fit coefficients from surveyed points at startup
    Correspondences { points: Vec<Correspondence> },
}

impl TransformSource {
    pub fn build(&self) -> Result<AffineGeoTransform> {
        match self {
            TransformSource::Coefficients(coefficients) => AffineGeoTransform::new(*coefficients),
            TransformSource::Correspondences { points } => AffineGeoTransform::fit(points),
        }
    }
}

impl Default for TransformSource {
    fn default() -> Self {
        TransformSource::Coefficients(CAMPUS_COEFFICIENTS)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    pub path: Option<PathBuf>,
    /// Pixel size; read from the file header when absent
    pub size: Option<(u32, u32)>,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            path: Some(PathBuf::from(DEFAULT_IMAGE_PATH)),
            size: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Fraction of the image size the view may pan past each edge
    pub bounds_padding: f64,
}

impl ViewerConfig {
    /// Checks zoom limits and padding
    pub fn validate(&self) -> Result<()> {
        if !(self.min_zoom.is_finite() && self.max_zoom.is_finite()) {
            return Err(MapError::Config("zoom limits must be finite".to_string()));
        }
        if self.min_zoom > self.max_zoom {
            return Err(MapError::Config(format!(
                "min_zoom {} exceeds max_zoom {}",
                self.min_zoom, self.max_zoom
            )));
        }
        if !(self.bounds_padding >= 0.0 && self.bounds_padding.is_finite()) {
            return Err(MapError::Config(format!(
                "bounds_padding must be a non-negative number, got {}",
                self.bounds_padding
            )));
        }
        Ok(())
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
            bounds_padding: DEFAULT_BOUNDS_PADDING,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CampusMapConfig {
    pub image: ImageConfig,
    pub transform: TransformSource,
    pub viewer: ViewerConfig,
    /// Ask before clearing every annotation
    pub confirm_clear_all: bool,
    /// Position reported by the locate control on hosts without a sensor
    pub simulated_fix: Option<GeoPoint>,
}

impl Default for CampusMapConfig {
    fn default() -> Self {
        Self {
            image: ImageConfig::default(),
            transform: TransformSource::default(),
            viewer: ViewerConfig::default(),
            confirm_clear_all: true,
            simulated_fix: None,
        }
    }
}

impl CampusMapConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::info!("loaded campus map config from {}", path.display());
        Ok(config)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks viewer limits, image settings and the transform source
    pub fn validate(&self) -> Result<()> {
        self.viewer.validate()?;

        match (&self.image.path, self.image.size) {
            (_, Some((width, height))) if width == 0 || height == 0 => {
                return Err(MapError::Config(format!(
                    "image size {}x{} has a zero dimension",
                    width, height
                )));
            }
            (None, None) => {
                return Err(MapError::Config(
                    "image needs either a path or an explicit size".to_string(),
                ));
            }
            _ => {}
        }

        if let Some(fix) = &self.simulated_fix {
            if !fix.is_valid() {
                return Err(MapError::InvalidCoordinates(format!(
                    "simulated fix {} is out of range",
                    fix
                )));
            }
        }

        self.transform.build().map(|_| ())
    }

    pub fn build_transform(&self) -> Result<AffineGeoTransform> {
        self.transform.build()
    }

    /// Sizes the base image, probing the file header when no size is given
    pub fn image_overlay(&self) -> Result<ImageOverlay> {
        let overlay = match (self.image.size, &self.image.path) {
            (Some((width, height)), path) => {
                let overlay = ImageOverlay::new(width, height);
                match path {
                    Some(path) => overlay.with_path(path),
                    None => overlay,
                }
            }
            (None, Some(path)) => Self::probe(path)?,
            (None, None) => {
                return Err(MapError::Config(
                    "image needs either a path or an explicit size".to_string(),
                ))
            }
        };

        Ok(overlay
            .with_padding(self.viewer.bounds_padding)
            .with_zoom_limits(self.viewer.min_zoom, self.viewer.max_zoom))
    }

    #[cfg(feature = "image-probe")]
    fn probe(path: &Path) -> Result<ImageOverlay> {
        ImageOverlay::from_image_file(path)
    }

    #[cfg(not(feature = "image-probe"))]
    fn probe(path: &Path) -> Result<ImageOverlay> {
        Err(MapError::Config(format!(
            "no size configured for {} and image probing is disabled",
            path.display()
        )))
    }
}
