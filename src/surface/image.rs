use crate::core::{
    bounds::PixelBounds,
    constants::{DEFAULT_BOUNDS_PADDING, DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM},
    geo::PixelPoint,
};
use std::path::{Path, PathBuf};

/// The base map image and the limits a surface applies while showing it
#[derive(Debug, Clone, PartialEq)]
pub struct ImageOverlay {
    path: Option<PathBuf>,
    bounds: PixelBounds,
    max_bounds: PixelBounds,
    min_zoom: f64,
    max_zoom: f64,
}

impl ImageOverlay {
    /// Overlay for an image of the given size with default limits
    pub fn new(width: u32, height: u32) -> Self {
        let bounds = PixelBounds::from_size(width as f64, height as f64);
        Self {
            path: None,
            bounds,
            max_bounds: bounds.pad(DEFAULT_BOUNDS_PADDING),
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
        }
    }

    /// Reads the image header to size the overlay
    #[cfg(feature = "image-probe")]
    pub fn from_image_file(path: impl AsRef<Path>) -> crate::Result<Self> {
        let path = path.as_ref();
        let (width, height) = ::image::image_dimensions(path)?;
        log::info!("base image {} is {}x{}", path.display(), width, height);
        Ok(Self::new(width, height).with_path(path))
    }

    pub fn with_path(mut self, path: impl AsRef<Path>) -> Self {
        self.path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Panning may extend `ratio` of the image size past each edge.
    ///
    /// Negative or non-finite ratios are treated as zero.
    pub fn with_padding(mut self, ratio: f64) -> Self {
        let ratio = if ratio.is_finite() { ratio.max(0.0) } else { 0.0 };
        self.max_bounds = self.bounds.pad(ratio);
        self
    }

    pub fn with_zoom_limits(mut self, min_zoom: f64, max_zoom: f64) -> Self {
        self.min_zoom = min_zoom.min(max_zoom);
        self.max_zoom = max_zoom.max(min_zoom);
        self
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn bounds(&self) -> &PixelBounds {
        &self.bounds
    }

    pub fn max_bounds(&self) -> &PixelBounds {
        &self.max_bounds
    }

    pub fn width(&self) -> f64 {
        self.bounds.width()
    }

    pub fn height(&self) -> f64 {
        self.bounds.height()
    }

    pub fn zoom_limits(&self) -> (f64, f64) {
        (self.min_zoom, self.max_zoom)
    }

    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.clamp(self.min_zoom, self.max_zoom)
    }

    /// Keeps a requested view center inside the padded bounds
    pub fn clamp_center(&self, center: PixelPoint) -> PixelPoint {
        self.max_bounds.clamp(center)
    }

    pub fn contains(&self, pixel: &PixelPoint) -> bool {
        self.bounds.contains(pixel)
    }

    /// Flips an image row for surfaces whose y axis grows upward
    pub fn to_surface_y(&self, y: f64) -> f64 {
        self.bounds.max.y - y
    }
}
