//! Fluent construction of a [`CampusMap`]
//!
//! Explicit parts (transform, overlay) take precedence over whatever the
//! optional [`CampusMapConfig`] would produce.

use crate::{
    core::{
        config::CampusMapConfig,
        map::CampusMap,
        transform::{AffineGeoTransform, Correspondence, TransformCoefficients},
    },
    surface::{image::ImageOverlay, MapSurface},
    Result,
};

/// Builder for creating and configuring CampusMap instances
#[derive(Debug, Default)]
pub struct CampusMapBuilder {
    /// Base configuration
    config: CampusMapConfig,
    /// Already-validated transform overriding the configured source
    transform: Option<AffineGeoTransform>,
    /// Overlay overriding the configured image settings
    overlay: Option<ImageOverlay>,
    /// Surveyed points to fit at build time
    correspondences: Option<Vec<Correspondence>>,
    /// Zoom limits set explicitly, applied to an explicit overlay too
    zoom_limits: Option<(f64, f64)>,
    confirm_clear_all: Option<bool>,
}

impl CampusMapBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: CampusMapConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_transform(mut self, transform: AffineGeoTransform) -> Self {
        self.transform = Some(transform);
        self
    }

    /// Uses fixed coefficients; they are validated in [`build`](Self::build)
    pub fn with_coefficients(mut self, coefficients: TransformCoefficients) -> Self {
        self.config.transform = crate::core::config::TransformSource::Coefficients(coefficients);
        self.transform = None;
        self.correspondences = None;
        self
    }

    /// Fits the transform from surveyed points in [`build`](Self::build)
    pub fn with_correspondences(mut self, correspondences: Vec<Correspondence>) -> Self {
        self.correspondences = Some(correspondences);
        self.transform = None;
        self
    }

    pub fn with_overlay(mut self, overlay: ImageOverlay) -> Self {
        self.overlay = Some(overlay);
        self
    }

    /// Sets the base-image size, skipping the file probe
    pub fn with_image_size(mut self, width: u32, height: u32) -> Self {
        self.config.image.size = Some((width, height));
        self
    }

    pub fn with_zoom_limits(mut self, min_zoom: f64, max_zoom: f64) -> Self {
        self.config.viewer.min_zoom = min_zoom;
        self.config.viewer.max_zoom = max_zoom;
        self.zoom_limits = Some((min_zoom, max_zoom));
        self
    }

    pub fn with_confirm_clear_all(mut self, confirm: bool) -> Self {
        self.confirm_clear_all = Some(confirm);
        self
    }

    /// Validates everything and shows the base image on `surface`
    pub fn build<S: MapSurface>(self, surface: S) -> Result<CampusMap<S>> {
        let transform = match (self.transform, &self.correspondences) {
            (Some(transform), _) => transform,
            (None, Some(points)) => AffineGeoTransform::fit(points)?,
            (None, None) => self.config.build_transform()?,
        };

        let overlay = match self.overlay {
            Some(overlay) => {
                self.config.viewer.validate()?;
                match self.zoom_limits {
                    Some((min_zoom, max_zoom)) => overlay.with_zoom_limits(min_zoom, max_zoom),
                    None => overlay,
                }
            }
            None => {
                self.config.validate()?;
                self.config.image_overlay()?
            }
        };

        let mut map = CampusMap::new(transform, overlay, surface);
        map.set_confirm_clear_all(
            self.confirm_clear_all
                .unwrap_or(self.config.confirm_clear_all),
        );
        log::info!(
            "campus map ready ({}x{} image)",
            map.overlay().width(),
            map.overlay().height()
        );
        Ok(map)
    }
}
