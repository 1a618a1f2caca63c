use crate::core::{
    geo::{GeoPoint, PixelPoint},
    transform::AffineGeoTransform,
};

/// Where the device was last seen
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiveLocationMarker {
    pub fix: GeoPoint,
    pub position: PixelPoint,
    /// Fixes applied since the marker was created
    pub updates: u32,
}

/// What applying a fix did to the marker
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LiveLocationUpdate {
    Created(PixelPoint),
    Moved(PixelPoint),
}

impl LiveLocationUpdate {
    pub fn position(&self) -> PixelPoint {
        match self {
            LiveLocationUpdate::Created(p) | LiveLocationUpdate::Moved(p) => *p,
        }
    }
}

/// Holds at most one live-location marker, updated in place
#[derive(Debug, Clone, Default)]
pub struct LiveLocation {
    marker: Option<LiveLocationMarker>,
}

impl LiveLocation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn marker(&self) -> Option<&LiveLocationMarker> {
        self.marker.as_ref()
    }

    /// Projects a fix onto the image and creates or moves the marker
    pub fn apply_fix(
        &mut self,
        transform: &AffineGeoTransform,
        fix: GeoPoint,
    ) -> LiveLocationUpdate {
        let position = transform.to_pixel(fix);
        match &mut self.marker {
            Some(marker) => {
                marker.fix = fix;
                marker.position = position;
                marker.updates += 1;
                LiveLocationUpdate::Moved(position)
            }
            None => {
                self.marker = Some(LiveLocationMarker {
                    fix,
                    position,
                    updates: 0,
                });
                LiveLocationUpdate::Created(position)
            }
        }
    }

    /// Re-projects the stored fix after the transform changed
    pub fn reproject(&mut self, transform: &AffineGeoTransform) -> Option<PixelPoint> {
        let marker = self.marker.as_mut()?;
        marker.position = transform.to_pixel(marker.fix);
        Some(marker.position)
    }
}
