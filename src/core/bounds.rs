use crate::core::geo::PixelPoint;
use serde::{Deserialize, Serialize};

/// Represents a bounding box in base-image pixel coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PixelBounds {
    pub min: PixelPoint,
    pub max: PixelPoint,
}

impl PixelBounds {
    /// Creates new bounds from two points
    pub fn new(min: PixelPoint, max: PixelPoint) -> Self {
        Self { min, max }
    }

    /// Creates bounds from individual coordinates
    pub fn from_coords(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self::new(PixelPoint::new(min_x, min_y), PixelPoint::new(max_x, max_y))
    }

    /// Bounds covering a whole image of the given size, anchored at the origin
    pub fn from_size(width: f64, height: f64) -> Self {
        Self::from_coords(0.0, 0.0, width, height)
    }

    /// Gets the width of the bounds
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Gets the height of the bounds
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Gets the center point of the bounds
    pub fn center(&self) -> PixelPoint {
        PixelPoint::new(
            (self.min.x + self.max.x) / 2.0,
            (self.min.y + self.max.y) / 2.0,
        )
    }

    /// Checks if the bounds contain a point
    pub fn contains(&self, point: &PixelPoint) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
    }

    /// Returns bounds grown on every side by `ratio` of the current extent.
    ///
    /// A ratio of 0.5 doubles both width and height around the same center.
    pub fn pad(&self, ratio: f64) -> PixelBounds {
        let dx = self.width() * ratio;
        let dy = self.height() * ratio;
        PixelBounds::from_coords(
            self.min.x - dx,
            self.min.y - dy,
            self.max.x + dx,
            self.max.y + dy,
        )
    }

    /// Clamps a point into the bounds
    pub fn clamp(&self, point: PixelPoint) -> PixelPoint {
        PixelPoint::new(
            point.x.clamp(self.min.x, self.max.x),
            point.y.clamp(self.min.y, self.max.y),
        )
    }
}
