use crate::{
    core::geo::PixelPoint,
    prelude::HashMap,
    surface::{popup::PopupContent, MarkerId},
};

/// Per-marker display options
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkerStyle {
    pub draggable: bool,
    /// Hover text
    pub tooltip: Option<String>,
}

impl MarkerStyle {
    /// Annotation markers can be dragged to refine their position
    pub fn annotation() -> Self {
        Self {
            draggable: true,
            tooltip: None,
        }
    }

    pub fn live_location(tooltip: &str) -> Self {
        Self {
            draggable: false,
            tooltip: Some(tooltip.to_string()),
        }
    }
}

/// A marker as a surface keeps it
#[derive(Debug, Clone, PartialEq)]
pub struct Marker {
    id: MarkerId,
    position: PixelPoint,
    style: MarkerStyle,
    popup: Option<PopupContent>,
    popup_open: bool,
}

impl Marker {
    pub fn new(id: MarkerId, position: PixelPoint, style: MarkerStyle) -> Self {
        Self {
            id,
            position,
            style,
            popup: None,
            popup_open: false,
        }
    }

    pub fn id(&self) -> MarkerId {
        self.id
    }

    pub fn position(&self) -> PixelPoint {
        self.position
    }

    pub fn set_position(&mut self, position: PixelPoint) {
        self.position = position;
    }

    pub fn style(&self) -> &MarkerStyle {
        &self.style
    }

    pub fn popup(&self) -> Option<&PopupContent> {
        self.popup.as_ref()
    }

    /// The popup content if it is currently open
    pub fn open_popup(&self) -> Option<&PopupContent> {
        self.popup.as_ref().filter(|_| self.popup_open)
    }

    pub fn bind_popup(&mut self, content: PopupContent) {
        self.popup = Some(content);
        self.popup_open = true;
    }

    pub fn close_popup(&mut self) {
        self.popup_open = false;
    }
}

/// Marker bookkeeping shared by surface implementations
#[derive(Debug, Default)]
pub struct MarkerLayer {
    markers: HashMap<MarkerId, Marker>,
}

impl MarkerLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a marker, replacing any marker with the same id
    pub fn place(&mut self, id: MarkerId, position: PixelPoint, style: MarkerStyle) {
        self.markers.insert(id, Marker::new(id, position, style));
    }

    /// Moves a marker; returns false when it does not exist
    pub fn move_to(&mut self, id: MarkerId, position: PixelPoint) -> bool {
        match self.markers.get_mut(&id) {
            Some(marker) => {
                marker.set_position(position);
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, id: MarkerId) -> Option<Marker> {
        self.markers.remove(&id)
    }

    pub fn clear_annotations(&mut self) {
        self.markers
            .retain(|id, _| matches!(id, MarkerId::LiveLocation));
    }

    /// Binds and opens a popup; returns false when the marker does not exist
    pub fn show_popup(&mut self, id: MarkerId, content: PopupContent) -> bool {
        match self.markers.get_mut(&id) {
            Some(marker) => {
                marker.bind_popup(content);
                true
            }
            None => false,
        }
    }

    pub fn close_popup(&mut self, id: MarkerId) {
        if let Some(marker) = self.markers.get_mut(&id) {
            marker.close_popup();
        }
    }

    pub fn get(&self, id: MarkerId) -> Option<&Marker> {
        self.markers.get(&id)
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Markers sorted by id so drawing order is stable
    pub fn markers(&self) -> Vec<&Marker> {
        let mut markers: Vec<&Marker> = self.markers.values().collect();
        markers.sort_by_key(|m| m.id());
        markers
    }

    /// Topmost marker within `radius` pixels of `point`
    pub fn hit_test(&self, point: PixelPoint, radius: f64) -> Option<MarkerId> {
        self.markers
            .values()
            .map(|m| (m.id(), m.position().distance_to(&point)))
            .filter(|(_, distance)| *distance <= radius)
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(id, _)| id)
    }
}
