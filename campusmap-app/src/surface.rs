//! egui rendering of the campus map
//!
//! [`EguiSurface`] keeps the drawable state the controller pushes into it and
//! turns pointer input into [`SurfaceEvent`]s and [`Control`]s each frame.

use campusmap::prelude::*;
use egui::{Align2, Color32, FontId, Pos2, Rect, Sense, Stroke, TextureHandle, Ui, Vec2};
use std::collections::VecDeque;

/// Marker radius in screen points
const MARKER_RADIUS: f32 = 7.0;
const MAX_NOTICES: usize = 4;

/// What the user did during one frame
#[derive(Debug, Default)]
pub struct FrameInput {
    pub events: Vec<SurfaceEvent>,
    pub controls: Vec<Control>,
}

/// Marker being dragged and where it started
#[derive(Debug, Clone, Copy)]
struct MarkerDrag {
    marker: MarkerId,
    origin: PixelPoint,
}

pub struct EguiSurface {
    overlay: Option<ImageOverlay>,
    texture: Option<TextureHandle>,
    markers: MarkerLayer,
    /// Image pixel shown at the middle of the view
    center: PixelPoint,
    zoom: f64,
    placement_armed: bool,
    notices: VecDeque<Notice>,
    /// Local copy of the open editor's fields while the user types
    draft: Option<(MarkerId, EditBuffer)>,
    drag: Option<MarkerDrag>,
    /// Image pixel under the pointer
    hover: Option<PixelPoint>,
}

impl Default for EguiSurface {
    fn default() -> Self {
        Self {
            overlay: None,
            texture: None,
            markers: MarkerLayer::new(),
            center: PixelPoint::default(),
            zoom: -1.0,
            placement_armed: false,
            notices: VecDeque::new(),
            draft: None,
            drag: None,
            hover: None,
        }
    }
}

impl EguiSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_texture(&mut self, texture: TextureHandle) {
        self.texture = Some(texture);
    }

    pub fn is_placement_armed(&self) -> bool {
        self.placement_armed
    }

    pub fn notices(&self) -> impl Iterator<Item = &Notice> {
        self.notices.iter()
    }

    pub fn hover(&self) -> Option<PixelPoint> {
        self.hover
    }

    pub fn dismiss_notice(&mut self, index: usize) {
        self.notices.remove(index);
    }

    fn scale(&self) -> f64 {
        2f64.powf(self.zoom)
    }

    fn to_screen(&self, rect: Rect, pixel: PixelPoint) -> Pos2 {
        let scale = self.scale();
        rect.center()
            + Vec2::new(
                ((pixel.x - self.center.x) * scale) as f32,
                ((pixel.y - self.center.y) * scale) as f32,
            )
    }

    fn to_pixel(&self, rect: Rect, pos: Pos2) -> PixelPoint {
        let scale = self.scale();
        let offset = pos - rect.center();
        PixelPoint::new(
            self.center.x + offset.x as f64 / scale,
            self.center.y + offset.y as f64 / scale,
        )
    }

    fn marker_at(&self, rect: Rect, pos: Pos2) -> Option<MarkerId> {
        let radius = MARKER_RADIUS as f64 / self.scale();
        self.markers.hit_test(self.to_pixel(rect, pos), radius)
    }

    /// Draws the map and collects this frame's interaction
    pub fn show(&mut self, ui: &mut Ui) -> FrameInput {
        let mut input = FrameInput::default();
        let (rect, response) = ui.allocate_exact_size(ui.available_size(), Sense::click_and_drag());
        let painter = ui.painter_at(rect);

        painter.rect_filled(rect, 0.0, Color32::from_rgb(230, 230, 230));
        if let (Some(texture), Some(overlay)) = (&self.texture, &self.overlay) {
            let bounds = overlay.bounds();
            let image_rect = Rect::from_two_pos(
                self.to_screen(rect, bounds.min),
                self.to_screen(rect, bounds.max),
            );
            painter.image(
                texture.id(),
                image_rect,
                Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                Color32::WHITE,
            );
        }

        self.hover = response.hover_pos().map(|pos| self.to_pixel(rect, pos));

        if response.hovered() {
            let scroll = ui.input(|i| i.raw_scroll_delta.y);
            if scroll.abs() > 0.1 {
                let zoom = self.zoom + scroll as f64 * 0.002;
                self.zoom = match &self.overlay {
                    Some(overlay) => overlay.clamp_zoom(zoom),
                    None => zoom,
                };
            }
        }

        if response.drag_started() {
            self.drag = response
                .interact_pointer_pos()
                .and_then(|pos| self.marker_at(rect, pos))
                .and_then(|marker| self.markers.get(marker))
                .filter(|m| m.style().draggable)
                .map(|m| MarkerDrag {
                    marker: m.id(),
                    origin: m.position(),
                });
        }

        if response.dragged() {
            match (self.drag, response.interact_pointer_pos()) {
                (Some(drag), Some(pos)) => {
                    let pixel = self.to_pixel(rect, pos);
                    self.markers.move_to(drag.marker, pixel);
                }
                _ => {
                    let delta = response.drag_delta();
                    let scale = self.scale();
                    let center = PixelPoint::new(
                        self.center.x - delta.x as f64 / scale,
                        self.center.y - delta.y as f64 / scale,
                    );
                    self.center = match &self.overlay {
                        Some(overlay) => overlay.clamp_center(center),
                        None => center,
                    };
                }
            }
        }

        if response.drag_released() {
            if let Some(drag) = self.drag.take() {
                let pixel = self
                    .markers
                    .get(drag.marker)
                    .map_or(drag.origin, |m| m.position());
                input.events.push(SurfaceEvent::MarkerDragged {
                    marker: drag.marker,
                    pixel,
                });
            }
        }

        if response.clicked() {
            if let Some(pos) = response.interact_pointer_pos() {
                let event = match self.marker_at(rect, pos) {
                    Some(marker) => SurfaceEvent::MarkerClicked { marker },
                    None => SurfaceEvent::Click {
                        pixel: self.to_pixel(rect, pos),
                    },
                };
                input.events.push(event);
            }
        }

        self.paint_markers(&painter, rect);
        self.show_popups(ui.ctx(), rect, &mut input);

        if self.placement_armed {
            painter.text(
                rect.left_bottom() + Vec2::new(10.0, -10.0),
                Align2::LEFT_BOTTOM,
                "Click on the map to place an annotation",
                FontId::proportional(14.0),
                Color32::from_gray(40),
            );
        }

        input
    }

    fn paint_markers(&self, painter: &egui::Painter, rect: Rect) {
        for marker in self.markers.markers() {
            let pos = self.to_screen(rect, marker.position());
            let fill = match marker.id() {
                MarkerId::LiveLocation => Color32::from_rgb(30, 110, 230),
                MarkerId::Annotation(_) => Color32::from_rgb(220, 60, 50),
            };
            painter.circle(pos, MARKER_RADIUS, fill, Stroke::new(2.0, Color32::WHITE));
            if let Some(tooltip) = &marker.style().tooltip {
                painter.text(
                    pos + Vec2::new(MARKER_RADIUS + 4.0, 0.0),
                    Align2::LEFT_CENTER,
                    tooltip,
                    FontId::proportional(12.0),
                    Color32::from_gray(20),
                );
            }
        }
    }

    fn show_popups(&mut self, ctx: &egui::Context, rect: Rect, input: &mut FrameInput) {
        let open: Vec<(MarkerId, PixelPoint, PopupContent)> = self
            .markers
            .markers()
            .into_iter()
            .filter_map(|m| m.open_popup().map(|p| (m.id(), m.position(), p.clone())))
            .collect();

        for (marker, position, content) in open {
            let anchor = self.to_screen(rect, position) + Vec2::new(0.0, -MARKER_RADIUS - 4.0);
            let mut keep_open = true;
            egui::Window::new(popup_title(&content))
                .id(egui::Id::new(("popup", marker.to_string())))
                .open(&mut keep_open)
                .collapsible(false)
                .resizable(false)
                .pivot(Align2::CENTER_BOTTOM)
                .fixed_pos(anchor)
                .show(ctx, |ui| match &content {
                    PopupContent::Editor { .. } => self.editor_ui(ui, marker, input),
                    PopupContent::Summary { title, description } => {
                        ui.strong(title);
                        ui.label(description);
                        if let Some(id) = marker.annotation() {
                            if ui.button("Edit").clicked() {
                                input.controls.push(Control::Edit(id));
                            }
                        }
                    }
                    PopupContent::Label(text) => {
                        ui.label(text);
                    }
                });

            if !keep_open {
                self.markers.close_popup(marker);
                input.events.push(SurfaceEvent::PopupClosed { marker });
            }
        }
    }

    fn editor_ui(&mut self, ui: &mut Ui, marker: MarkerId, input: &mut FrameInput) {
        let Some((_, buffer)) = self.draft.as_mut().filter(|(m, _)| *m == marker) else {
            return;
        };
        ui.label("Title");
        ui.text_edit_singleline(&mut buffer.title);
        ui.label("Description");
        ui.text_edit_multiline(&mut buffer.description);
        ui.horizontal(|ui| {
            if ui.button("Save").clicked() {
                input.controls.push(Control::Save {
                    title: buffer.title.clone(),
                    description: buffer.description.clone(),
                });
            }
            if ui.button("Delete").clicked() {
                input.controls.push(Control::Delete);
            }
        });
    }
}

fn popup_title(content: &PopupContent) -> &str {
    match content {
        PopupContent::Editor { .. } => "Annotation",
        PopupContent::Summary { .. } => "Annotation details",
        PopupContent::Label(_) => "Location",
    }
}

impl MapSurface for EguiSurface {
    fn set_image(&mut self, overlay: &ImageOverlay) {
        self.center = overlay.bounds().center();
        self.zoom = overlay.clamp_zoom(self.zoom);
        self.overlay = Some(overlay.clone());
    }

    fn pan_to(&mut self, pixel: PixelPoint) {
        self.center = match &self.overlay {
            Some(overlay) => overlay.clamp_center(pixel),
            None => pixel,
        };
    }

    fn place_marker(&mut self, marker: MarkerId, pixel: PixelPoint, style: MarkerStyle) {
        self.markers.place(marker, pixel, style);
    }

    fn move_marker(&mut self, marker: MarkerId, pixel: PixelPoint) {
        self.markers.move_to(marker, pixel);
    }

    fn remove_marker(&mut self, marker: MarkerId) {
        self.markers.remove(marker);
        if self.draft.as_ref().is_some_and(|(m, _)| *m == marker) {
            self.draft = None;
        }
    }

    fn clear_annotation_markers(&mut self) {
        self.markers.clear_annotations();
        self.draft = None;
    }

    fn show_popup(&mut self, marker: MarkerId, content: PopupContent) {
        if let PopupContent::Editor { title, description } = &content {
            self.draft = Some((marker, EditBuffer::new(title.clone(), description.clone())));
        }
        if !self.markers.show_popup(marker, content) {
            log::warn!("popup for unknown marker {}", marker);
        }
    }

    fn close_popup(&mut self, marker: MarkerId) {
        self.markers.close_popup(marker);
        if self.draft.as_ref().is_some_and(|(m, _)| *m == marker) {
            self.draft = None;
        }
    }

    fn set_placement_armed(&mut self, armed: bool) {
        self.placement_armed = armed;
    }

    fn notify(&mut self, notice: Notice) {
        log::info!("notice: {}", notice);
        if self.notices.len() == MAX_NOTICES {
            self.notices.pop_front();
        }
        self.notices.push_back(notice);
    }
}
