//! The campus map controller
//!
//! [`CampusMap`] owns the transform, the annotation store, the edit session and
//! the live-location state, and mirrors every change onto a [`MapSurface`].
//! Hosts feed it user controls, surface events and location fixes one at a
//! time; it never blocks except while awaiting a requested fix.

use crate::{
    annotations::{
        session::{AnnotationEditSession, Confirmation, EditSessionState, SessionEvent},
        store::{AnnotationId, AnnotationStore},
    },
    core::{
        config::CampusMapConfig,
        constants::{CLEAR_ALL_PROMPT, LIVE_LOCATION_LABEL},
        geo::{GeoPoint, PixelPoint},
        transform::{AffineGeoTransform, Correspondence},
    },
    input::events::{Control, ControlOutcome, SurfaceEvent},
    location::{request_fix, FixResult, LiveLocation, LiveLocationUpdate, LocationProvider},
    surface::{
        image::ImageOverlay, Confirm, MapSurface, MarkerId, MarkerStyle, Notice, PopupContent,
    },
    MapError, Result,
};

pub struct CampusMap<S: MapSurface> {
    transform: AffineGeoTransform,
    overlay: ImageOverlay,
    store: AnnotationStore,
    session: AnnotationEditSession,
    live: LiveLocation,
    surface: S,
    confirm_clear_all: bool,
}

impl<S: MapSurface> CampusMap<S> {
    /// Creates a controller and shows the base image on the surface
    pub fn new(transform: AffineGeoTransform, overlay: ImageOverlay, mut surface: S) -> Self {
        surface.set_image(&overlay);
        Self {
            transform,
            overlay,
            store: AnnotationStore::new(),
            session: AnnotationEditSession::new(),
            live: LiveLocation::new(),
            surface,
            confirm_clear_all: true,
        }
    }

    pub fn from_config(config: &CampusMapConfig, surface: S) -> Result<Self> {
        crate::core::builder::CampusMapBuilder::new()
            .with_config(config.clone())
            .build(surface)
    }

    pub(crate) fn set_confirm_clear_all(&mut self, confirm: bool) {
        self.confirm_clear_all = confirm;
    }

    /// Whether clear-all asks for confirmation first
    pub fn confirms_clear_all(&self) -> bool {
        self.confirm_clear_all
    }

    pub fn transform(&self) -> &AffineGeoTransform {
        &self.transform
    }

    pub fn overlay(&self) -> &ImageOverlay {
        &self.overlay
    }

    pub fn store(&self) -> &AnnotationStore {
        &self.store
    }

    pub fn session(&self) -> &AnnotationEditSession {
        &self.session
    }

    pub fn state(&self) -> EditSessionState {
        self.session.state()
    }

    pub fn live_location(&self) -> &LiveLocation {
        &self.live
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Projects a GPS position onto the base image
    pub fn to_pixel(&self, geo: GeoPoint) -> PixelPoint {
        self.transform.to_pixel(geo)
    }

    /// Swaps in a new transform and re-projects the live-location marker
    pub fn set_transform(&mut self, transform: AffineGeoTransform) {
        self.transform = transform;
        if let Some(position) = self.live.reproject(&self.transform) {
            self.surface.move_marker(MarkerId::LiveLocation, position);
        }
        log::info!("transform updated (det = {:e})", transform.determinant());
    }

    /// Refits the transform from surveyed points.
    ///
    /// A degenerate survey leaves the current transform in place.
    pub fn refit(&mut self, correspondences: &[Correspondence]) -> Result<()> {
        match AffineGeoTransform::fit(correspondences) {
            Ok(transform) => {
                self.set_transform(transform);
                Ok(())
            }
            Err(e) => {
                log::warn!("rejected transform refit: {}", e);
                self.surface
                    .notify(Notice::error(format!("Calibration rejected: {e}")));
                Err(e)
            }
        }
    }

    /// Applies any control except [`Control::LocateMe`], which needs a sensor
    /// (see [`CampusMap::locate`] and [`CampusMap::dispatch`]).
    pub fn apply(&mut self, control: Control, confirm: &mut dyn Confirm) -> ControlOutcome {
        match control {
            Control::TogglePlacing => self.toggle_placing(),
            Control::ClearAll => self.clear_all(confirm),
            Control::Save { title, description } => self.save(&title, &description),
            Control::Delete => self.delete(),
            Control::Edit(id) => self.edit(id),
            Control::Cancel => self.cancel(),
            Control::LocateMe => {
                log::debug!("locate control needs a location provider; ignored");
                ControlOutcome::Ignored
            }
        }
    }

    /// Applies any control, consulting `provider` for [`Control::LocateMe`]
    pub async fn dispatch(
        &mut self,
        control: Control,
        confirm: &mut dyn Confirm,
        provider: &dyn LocationProvider,
    ) -> ControlOutcome {
        match control {
            Control::LocateMe => self.locate(provider).await,
            other => self.apply(other, confirm),
        }
    }

    pub fn toggle_placing(&mut self) -> ControlOutcome {
        let events = self.session.toggle_placing();
        self.render(events);
        ControlOutcome::Applied
    }

    /// Commits the open editor; without one this is a no-op
    pub fn save(&mut self, title: &str, description: &str) -> ControlOutcome {
        let Some(id) = self.session.editing() else {
            return ControlOutcome::Ignored;
        };
        match self.session.save(&mut self.store, title, description) {
            Ok(events) => {
                self.render(events);
                ControlOutcome::Applied
            }
            Err(e) => self.drop_stale_editor(id, e),
        }
    }

    /// Commits whatever the edit buffer holds
    pub fn save_buffer(&mut self) -> ControlOutcome {
        let buffer = self.session.buffer().cloned().unwrap_or_default();
        self.save(&buffer.title, &buffer.description)
    }

    /// Updates the edit buffer as the user types
    pub fn edit_buffer(&mut self, title: &str, description: &str) -> ControlOutcome {
        match self.session.buffer_mut() {
            Some(buffer) => {
                buffer.title = title.to_string();
                buffer.description = description.to_string();
                ControlOutcome::Applied
            }
            None => ControlOutcome::Ignored,
        }
    }

    pub fn delete(&mut self) -> ControlOutcome {
        let Some(id) = self.session.editing() else {
            return ControlOutcome::Ignored;
        };
        match self.session.delete(&mut self.store) {
            Ok(events) => {
                self.render(events);
                ControlOutcome::Applied
            }
            Err(e) => self.drop_stale_editor(id, e),
        }
    }

    /// Opens the editor for an existing annotation
    pub fn edit(&mut self, id: AnnotationId) -> ControlOutcome {
        match self.session.reopen(&self.store, id) {
            Ok(events) => {
                self.render(events);
                ControlOutcome::Applied
            }
            Err(e) => {
                log::warn!("cannot edit {}: {}", id, e);
                let events = self.session.cancel();
                self.render(events);
                self.surface.remove_marker(MarkerId::Annotation(id));
                self.surface
                    .notify(Notice::warning("That annotation no longer exists."));
                ControlOutcome::Failed
            }
        }
    }

    pub fn cancel(&mut self) -> ControlOutcome {
        let events = self.session.cancel();
        if events.is_empty() {
            return ControlOutcome::Ignored;
        }
        self.render(events);
        ControlOutcome::Applied
    }

    /// Removes every annotation after asking `confirm` (unless disabled)
    pub fn clear_all(&mut self, confirm: &mut dyn Confirm) -> ControlOutcome {
        let confirmation = if self.confirm_clear_all {
            Confirmation::from(confirm.confirm(CLEAR_ALL_PROMPT))
        } else {
            Confirmation::Confirmed
        };

        let events = self.session.clear_all(&mut self.store, confirmation);
        if events.is_empty() {
            log::debug!("clear-all declined");
            return ControlOutcome::ConfirmationDeclined;
        }
        self.render(events);
        ControlOutcome::Applied
    }

    /// Routes an interaction reported by the surface
    pub fn handle_event(&mut self, event: SurfaceEvent) -> ControlOutcome {
        match event {
            SurfaceEvent::Click { pixel } => self.on_click(pixel),
            SurfaceEvent::MarkerClicked { marker } => self.on_marker_clicked(marker),
            SurfaceEvent::MarkerDragged { marker, pixel } => self.on_marker_dragged(marker, pixel),
            SurfaceEvent::PopupClosed { marker } => {
                if marker.annotation().is_some() && marker.annotation() == self.session.editing() {
                    self.cancel()
                } else {
                    ControlOutcome::Ignored
                }
            }
            SurfaceEvent::PopupRendered { marker } => self.on_popup_rendered(marker),
        }
    }

    /// Requests one fix and moves the live-location marker to it
    pub async fn locate(&mut self, provider: &dyn LocationProvider) -> ControlOutcome {
        let result = request_fix(provider).await;
        self.apply_fix(result)
    }

    /// Applies the answer to a location request
    pub fn apply_fix(&mut self, result: FixResult) -> ControlOutcome {
        let fix = match result {
            Ok(fix) if fix.is_valid() => fix,
            Ok(fix) => {
                log::warn!("ignoring out-of-range fix {}", fix);
                self.surface
                    .notify(Notice::error(format!("Received an invalid position {fix}.")));
                return ControlOutcome::Failed;
            }
            Err(reason) => {
                let err = MapError::LocationUnavailable(reason);
                log::warn!("{}", err);
                self.surface
                    .notify(Notice::warning(format!("Could not get your position: {err}")));
                return ControlOutcome::Failed;
            }
        };

        let update = self.live.apply_fix(&self.transform, fix);
        let position = update.position();
        match update {
            LiveLocationUpdate::Created(_) => {
                self.surface.place_marker(
                    MarkerId::LiveLocation,
                    position,
                    MarkerStyle::live_location(LIVE_LOCATION_LABEL),
                );
                self.surface.show_popup(
                    MarkerId::LiveLocation,
                    PopupContent::Label(LIVE_LOCATION_LABEL.to_string()),
                );
            }
            LiveLocationUpdate::Moved(_) => {
                self.surface.move_marker(MarkerId::LiveLocation, position);
            }
        }
        self.surface.pan_to(position);
        log::info!("live location {} -> {}", fix, position);

        if !self.overlay.contains(&position) {
            self.surface
                .notify(Notice::info("Your position is outside the campus map."));
        }
        ControlOutcome::Applied
    }

    fn on_click(&mut self, pixel: PixelPoint) -> ControlOutcome {
        if !pixel.is_finite() {
            log::warn!("ignoring click at non-finite position");
            return ControlOutcome::Ignored;
        }
        let events = self.session.on_surface_click(&mut self.store, pixel);
        if events.is_empty() {
            return ControlOutcome::Ignored;
        }
        self.render(events);
        ControlOutcome::Applied
    }

    /// Described annotations show their summary first; blank ones open the editor
    fn on_marker_clicked(&mut self, marker: MarkerId) -> ControlOutcome {
        let id = match marker {
            MarkerId::Annotation(id) => id,
            MarkerId::LiveLocation => {
                self.surface.show_popup(
                    MarkerId::LiveLocation,
                    PopupContent::Label(LIVE_LOCATION_LABEL.to_string()),
                );
                return ControlOutcome::Applied;
            }
        };

        if self.session.editing() == Some(id) {
            return ControlOutcome::Ignored;
        }

        let described = self
            .store
            .get(id)
            .ok()
            .filter(|annotation| annotation.is_described())
            .map(PopupContent::summary);
        let Some(summary) = described else {
            return self.edit(id);
        };
        let events = self.session.cancel();
        self.render(events);
        self.surface.show_popup(marker, summary);
        ControlOutcome::Applied
    }

    /// Binds the live edit buffer into an editor popup once its controls exist
    fn on_popup_rendered(&mut self, marker: MarkerId) -> ControlOutcome {
        let editing = marker.annotation().filter(|id| self.session.editing() == Some(*id));
        match (editing, self.session.buffer()) {
            (Some(_), Some(buffer)) => {
                log::debug!("binding editor controls for {}", marker);
                self.surface.show_popup(marker, PopupContent::editor(buffer));
                ControlOutcome::Applied
            }
            _ => ControlOutcome::Ignored,
        }
    }

    fn on_marker_dragged(&mut self, marker: MarkerId, pixel: PixelPoint) -> ControlOutcome {
        let id = match marker {
            MarkerId::Annotation(id) => id,
            MarkerId::LiveLocation => {
                if let Some(live) = self.live.marker() {
                    self.surface.move_marker(MarkerId::LiveLocation, live.position);
                }
                return ControlOutcome::Ignored;
            }
        };

        match self.store.reposition(id, pixel) {
            Ok(()) => {
                log::debug!("moved {} to {}", id, pixel);
                ControlOutcome::Applied
            }
            Err(e) => {
                log::warn!("drag of stale marker: {}", e);
                self.surface.remove_marker(marker);
                ControlOutcome::Failed
            }
        }
    }

    /// The editor's record vanished underneath it: close the view, nothing more
    fn drop_stale_editor(&mut self, id: AnnotationId, error: MapError) -> ControlOutcome {
        log::warn!("closing editor: {}", error);
        let marker = MarkerId::Annotation(id);
        self.surface.close_popup(marker);
        self.surface.remove_marker(marker);
        ControlOutcome::Failed
    }

    fn render(&mut self, events: Vec<SessionEvent>) {
        for event in events {
            match event {
                SessionEvent::PlacementArmed(armed) => self.surface.set_placement_armed(armed),
                SessionEvent::Placed(annotation) => self.surface.place_marker(
                    MarkerId::Annotation(annotation.id),
                    annotation.position,
                    MarkerStyle::annotation(),
                ),
                SessionEvent::EditorOpened { id, buffer } => self
                    .surface
                    .show_popup(MarkerId::Annotation(id), PopupContent::editor(&buffer)),
                SessionEvent::EditorClosed(id) => {
                    self.surface.close_popup(MarkerId::Annotation(id))
                }
                SessionEvent::Saved(annotation) => self.surface.show_popup(
                    MarkerId::Annotation(annotation.id),
                    PopupContent::summary(&annotation),
                ),
                SessionEvent::Deleted(id) => self.surface.remove_marker(MarkerId::Annotation(id)),
                SessionEvent::Cleared(count) => {
                    self.surface.clear_annotation_markers();
                    log::info!("cleared {} annotations", count);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        core::constants::CAMPUS_COEFFICIENTS,
        location::LocationError,
        surface::{FixedAnswer, RecordingSurface},
    };

    fn campus_map() -> CampusMap<RecordingSurface> {
        CampusMap::new(
            AffineGeoTransform::new(CAMPUS_COEFFICIENTS).unwrap(),
            ImageOverlay::new(1600, 1300),
            RecordingSurface::new(),
        )
    }

    fn place(map: &mut CampusMap<RecordingSurface>, x: f64, y: f64) -> AnnotationId {
        map.toggle_placing();
        map.handle_event(SurfaceEvent::Click {
            pixel: PixelPoint::new(x, y),
        });
        map.session().editing().unwrap()
    }

    #[test]
    fn test_new_shows_image() {
        let map = campus_map();
        assert_eq!(map.surface().overlay().unwrap().width(), 1600.0);
        assert_eq!(map.state(), EditSessionState::Idle);
    }

    #[test]
    fn test_placement_mirrors_to_surface() {
        let mut map = campus_map();
        map.toggle_placing();
        assert!(map.surface().is_placement_armed());

        map.handle_event(SurfaceEvent::Click {
            pixel: PixelPoint::new(100.0, 200.0),
        });
        let id = map.session().editing().unwrap();
        let marker = map.surface().marker(MarkerId::Annotation(id)).unwrap();
        assert_eq!(marker.position(), PixelPoint::new(100.0, 200.0));
        assert!(marker.style().draggable);
        assert!(!map.surface().is_placement_armed());
        assert!(map
            .surface()
            .open_popup(MarkerId::Annotation(id))
            .unwrap()
            .is_editor());
    }

    #[test]
    fn test_click_while_idle_is_ignored() {
        let mut map = campus_map();
        let outcome = map.handle_event(SurfaceEvent::Click {
            pixel: PixelPoint::new(1.0, 1.0),
        });
        assert_eq!(outcome, ControlOutcome::Ignored);
        assert!(map.store().is_empty());
    }

    #[test]
    fn test_save_shows_summary() {
        let mut map = campus_map();
        let id = place(&mut map, 10.0, 10.0);

        assert_eq!(map.save("Library", "Main library"), ControlOutcome::Applied);
        assert_eq!(
            map.surface().open_popup(MarkerId::Annotation(id)),
            Some(&PopupContent::Summary {
                title: "Library".to_string(),
                description: "Main library".to_string()
            })
        );
    }

    #[test]
    fn test_save_without_editor_is_ignored() {
        let mut map = campus_map();
        assert_eq!(map.save("x", "y"), ControlOutcome::Ignored);
        assert_eq!(map.delete(), ControlOutcome::Ignored);
        assert_eq!(map.cancel(), ControlOutcome::Ignored);
    }

    #[test]
    fn test_marker_click_on_described_annotation_shows_summary() {
        let mut map = campus_map();
        let id = place(&mut map, 10.0, 10.0);
        map.save("Gate", "East gate");
        map.surface_mut().close_popup(MarkerId::Annotation(id));

        map.handle_event(SurfaceEvent::MarkerClicked {
            marker: MarkerId::Annotation(id),
        });
        assert_eq!(map.state(), EditSessionState::Idle);
        assert!(matches!(
            map.surface().open_popup(MarkerId::Annotation(id)),
            Some(PopupContent::Summary { .. })
        ));

        assert_eq!(map.edit(id), ControlOutcome::Applied);
        assert_eq!(map.state(), EditSessionState::Editing(id));
    }

    #[test]
    fn test_marker_click_on_blank_annotation_opens_editor() {
        let mut map = campus_map();
        let id = place(&mut map, 10.0, 10.0);
        map.cancel();

        map.handle_event(SurfaceEvent::MarkerClicked {
            marker: MarkerId::Annotation(id),
        });
        assert_eq!(map.state(), EditSessionState::Editing(id));
    }

    #[test]
    fn test_popup_closed_cancels_editor() {
        let mut map = campus_map();
        let id = place(&mut map, 10.0, 10.0);
        map.edit_buffer("draft", "never saved");

        let outcome = map.handle_event(SurfaceEvent::PopupClosed {
            marker: MarkerId::Annotation(id),
        });
        assert_eq!(outcome, ControlOutcome::Applied);
        assert_eq!(map.state(), EditSessionState::Idle);
        assert_eq!(map.store().get(id).unwrap().title, "");
    }

    #[test]
    fn test_popup_rendered_rebinds_editor_buffer() {
        let mut map = campus_map();
        let id = place(&mut map, 10.0, 10.0);
        map.edit_buffer("Lab", "Physics");

        let outcome = map.handle_event(SurfaceEvent::PopupRendered {
            marker: MarkerId::Annotation(id),
        });
        assert_eq!(outcome, ControlOutcome::Applied);
        assert_eq!(
            map.surface().open_popup(MarkerId::Annotation(id)),
            Some(&PopupContent::Editor {
                title: "Lab".to_string(),
                description: "Physics".to_string()
            })
        );

        map.cancel();
        let outcome = map.handle_event(SurfaceEvent::PopupRendered {
            marker: MarkerId::Annotation(id),
        });
        assert_eq!(outcome, ControlOutcome::Ignored);
    }

    #[test]
    fn test_drag_persists_position() {
        let mut map = campus_map();
        let id = place(&mut map, 10.0, 10.0);

        let outcome = map.handle_event(SurfaceEvent::MarkerDragged {
            marker: MarkerId::Annotation(id),
            pixel: PixelPoint::new(50.0, 60.0),
        });
        assert_eq!(outcome, ControlOutcome::Applied);
        assert_eq!(
            map.store().get(id).unwrap().position,
            PixelPoint::new(50.0, 60.0)
        );
    }

    #[test]
    fn test_delete_removes_marker() {
        let mut map = campus_map();
        let id = place(&mut map, 10.0, 10.0);

        assert_eq!(map.delete(), ControlOutcome::Applied);
        assert!(map.surface().marker(MarkerId::Annotation(id)).is_none());
        assert!(map.store().is_empty());
    }

    #[test]
    fn test_edit_missing_annotation_notifies() {
        let mut map = campus_map();
        assert_eq!(map.edit(AnnotationId(42)), ControlOutcome::Failed);
        assert_eq!(map.state(), EditSessionState::Idle);
        assert_eq!(map.surface().notices().len(), 1);
    }

    #[test]
    fn test_edit_missing_annotation_closes_open_editor() {
        let mut map = campus_map();
        let a = place(&mut map, 10.0, 10.0);
        map.edit_buffer("typed", "draft");

        assert_eq!(map.edit(AnnotationId(a.0 + 1)), ControlOutcome::Failed);
        assert_eq!(map.state(), EditSessionState::Idle);
        assert!(map.surface().open_popup(MarkerId::Annotation(a)).is_none());
        assert!(map.surface().marker(MarkerId::Annotation(a)).is_some());
    }

    #[test]
    fn test_edit_missing_annotation_disarms_placement() {
        let mut map = campus_map();
        map.toggle_placing();

        assert_eq!(map.edit(AnnotationId(42)), ControlOutcome::Failed);
        assert_eq!(map.state(), EditSessionState::Idle);
        assert!(!map.surface().is_placement_armed());
    }

    #[test]
    fn test_clear_all_confirmation() {
        let mut map = campus_map();
        place(&mut map, 1.0, 1.0);
        map.save("a", "b");
        place(&mut map, 2.0, 2.0);

        assert_eq!(
            map.clear_all(&mut FixedAnswer(false)),
            ControlOutcome::ConfirmationDeclined
        );
        assert_eq!(map.store().len(), 2);

        assert_eq!(map.clear_all(&mut FixedAnswer(true)), ControlOutcome::Applied);
        assert!(map.store().is_empty());
        assert_eq!(map.surface().marker_count(), 0);
        assert_eq!(map.state(), EditSessionState::Idle);
    }

    #[test]
    fn test_clear_all_without_prompt_when_disabled() {
        let mut map = campus_map();
        map.set_confirm_clear_all(false);
        place(&mut map, 1.0, 1.0);

        assert!(!map.confirms_clear_all());
        assert_eq!(map.clear_all(&mut FixedAnswer(false)), ControlOutcome::Applied);
        assert!(map.store().is_empty());
    }

    #[test]
    fn test_apply_fix_creates_then_moves_live_marker() {
        let mut map = campus_map();

        map.apply_fix(Ok(GeoPoint::new(34.81, 114.367)));
        map.apply_fix(Ok(GeoPoint::new(34.811, 114.368)));

        assert_eq!(map.surface().marker_count(), 1);
        assert_eq!(map.surface().pan_count(), 2);
        let live = map.live_location().marker().unwrap();
        assert_eq!(
            map.surface().marker(MarkerId::LiveLocation).unwrap().position(),
            live.position
        );
    }

    #[test]
    fn test_failed_fix_keeps_marker_and_notifies() {
        let mut map = campus_map();
        map.apply_fix(Ok(GeoPoint::new(34.81, 114.367)));
        let before = map.live_location().marker().copied();

        let outcome = map.apply_fix(Err(LocationError::PermissionDenied));
        assert_eq!(outcome, ControlOutcome::Failed);
        assert_eq!(map.live_location().marker().copied(), before);
        assert_eq!(map.surface().notices().len(), 1);
    }

    #[test]
    fn test_clear_all_keeps_live_location_marker() {
        let mut map = campus_map();
        map.apply_fix(Ok(GeoPoint::new(34.81, 114.367)));
        place(&mut map, 1.0, 1.0);

        map.clear_all(&mut FixedAnswer(true));
        assert!(map.surface().marker(MarkerId::LiveLocation).is_some());
    }

    #[test]
    fn test_live_marker_drag_snaps_back() {
        let mut map = campus_map();
        map.apply_fix(Ok(GeoPoint::new(34.81, 114.367)));
        let home = map.live_location().marker().unwrap().position;

        let outcome = map.handle_event(SurfaceEvent::MarkerDragged {
            marker: MarkerId::LiveLocation,
            pixel: PixelPoint::new(0.0, 0.0),
        });
        assert_eq!(outcome, ControlOutcome::Ignored);
        assert_eq!(
            map.surface().marker(MarkerId::LiveLocation).unwrap().position(),
            home
        );
    }

    #[test]
    fn test_refit_rejects_degenerate_survey() {
        let mut map = campus_map();
        let before = *map.transform();
        let collinear = [
            Correspondence::new(PixelPoint::new(0.0, 0.0), GeoPoint::new(34.80, 114.36)),
            Correspondence::new(PixelPoint::new(1.0, 1.0), GeoPoint::new(34.81, 114.37)),
            Correspondence::new(PixelPoint::new(2.0, 2.0), GeoPoint::new(34.82, 114.38)),
        ];

        assert!(map.refit(&collinear).is_err());
        assert_eq!(map.transform(), &before);
        assert_eq!(map.surface().notices().len(), 1);
    }
}
