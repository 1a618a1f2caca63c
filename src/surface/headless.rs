use crate::{
    core::geo::PixelPoint,
    surface::{
        image::ImageOverlay,
        marker::{Marker, MarkerLayer, MarkerStyle},
        popup::PopupContent,
        MapSurface, MarkerId, Notice,
    },
};

/// A surface that renders nothing and remembers what it was asked to show.
///
/// Useful for tests, scripted sessions, and hosts that only need the
/// controller's bookkeeping.
#[derive(Debug, Default)]
pub struct RecordingSurface {
    overlay: Option<ImageOverlay>,
    markers: MarkerLayer,
    center: Option<PixelPoint>,
    pans: usize,
    placement_armed: bool,
    notices: Vec<Notice>,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn overlay(&self) -> Option<&ImageOverlay> {
        self.overlay.as_ref()
    }

    pub fn marker(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.get(id)
    }

    pub fn markers(&self) -> &MarkerLayer {
        &self.markers
    }

    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Open popup bound to `id`, if any
    pub fn open_popup(&self, id: MarkerId) -> Option<&PopupContent> {
        self.markers.get(id).and_then(|m| m.open_popup())
    }

    /// Last pan target
    pub fn center(&self) -> Option<PixelPoint> {
        self.center
    }

    pub fn pan_count(&self) -> usize {
        self.pans
    }

    pub fn is_placement_armed(&self) -> bool {
        self.placement_armed
    }

    pub fn notices(&self) -> &[Notice] {
        &self.notices
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }
}

impl MapSurface for RecordingSurface {
    fn set_image(&mut self, overlay: &ImageOverlay) {
        self.center = Some(overlay.bounds().center());
        self.overlay = Some(overlay.clone());
    }

    fn pan_to(&mut self, pixel: PixelPoint) {
        let center = match &self.overlay {
            Some(overlay) => overlay.clamp_center(pixel),
            None => pixel,
        };
        self.center = Some(center);
        self.pans += 1;
    }

    fn place_marker(&mut self, marker: MarkerId, pixel: PixelPoint, style: MarkerStyle) {
        self.markers.place(marker, pixel, style);
    }

    fn move_marker(&mut self, marker: MarkerId, pixel: PixelPoint) {
        if !self.markers.move_to(marker, pixel) {
            log::warn!("move of unknown marker {}", marker);
        }
    }

    fn remove_marker(&mut self, marker: MarkerId) {
        self.markers.remove(marker);
    }

    fn clear_annotation_markers(&mut self) {
        self.markers.clear_annotations();
    }

    fn show_popup(&mut self, marker: MarkerId, content: PopupContent) {
        if !self.markers.show_popup(marker, content) {
            log::warn!("popup for unknown marker {}", marker);
        }
    }

    fn close_popup(&mut self, marker: MarkerId) {
        self.markers.close_popup(marker);
    }

    fn set_placement_armed(&mut self, armed: bool) {
        self.placement_armed = armed;
    }

    fn notify(&mut self, notice: Notice) {
        self.notices.push(notice);
    }
}
