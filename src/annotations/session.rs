//! Add/edit/delete flow for a single annotation at a time
//!
//! The session never owns annotation data. It remembers which record is being
//! edited and a scratch [`EditBuffer`] for the popup fields; every commit goes
//! through the [`AnnotationStore`] passed in by the caller. Each transition
//! returns the [`SessionEvent`]s a rendering layer needs to mirror it.

use crate::{
    annotations::store::{Annotation, AnnotationId, AnnotationStore},
    core::geo::PixelPoint,
    Result,
};

/// Which step of the annotation flow is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditSessionState {
    #[default]
    Idle,
    /// The next surface click creates an annotation
    Placing,
    Editing(AnnotationId),
}

/// Unsaved popup fields
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EditBuffer {
    pub title: String,
    pub description: String,
}

impl EditBuffer {
    pub fn new(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
        }
    }

    fn from_record(annotation: &Annotation) -> Self {
        Self::new(annotation.title.clone(), annotation.description.clone())
    }
}

/// Whether the user agreed to a destructive action
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Declined,
}

impl From<bool> for Confirmation {
    fn from(confirmed: bool) -> Self {
        if confirmed {
            Confirmation::Confirmed
        } else {
            Confirmation::Declined
        }
    }
}

/// Observable consequence of a session transition
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// The placement control changed its armed state
    PlacementArmed(bool),
    /// A new record was created by a placement click
    Placed(Annotation),
    /// The editor popup opened for a record with these field values
    EditorOpened {
        id: AnnotationId,
        buffer: EditBuffer,
    },
    /// The editor closed without committing
    EditorClosed(AnnotationId),
    Saved(Annotation),
    Deleted(AnnotationId),
    /// Every record was removed
    Cleared(usize),
}

#[derive(Debug, Clone, Default)]
pub struct AnnotationEditSession {
    state: EditSessionState,
    buffer: Option<EditBuffer>,
}

impl AnnotationEditSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> EditSessionState {
        self.state
    }

    pub fn is_placing(&self) -> bool {
        self.state == EditSessionState::Placing
    }

    /// Id of the record currently open in the editor
    pub fn editing(&self) -> Option<AnnotationId> {
        match self.state {
            EditSessionState::Editing(id) => Some(id),
            _ => None,
        }
    }

    pub fn buffer(&self) -> Option<&EditBuffer> {
        self.buffer.as_ref()
    }

    /// Scratch fields for the open editor, typed into by the user
    pub fn buffer_mut(&mut self) -> Option<&mut EditBuffer> {
        self.buffer.as_mut()
    }

    /// Arms or disarms placement mode.
    ///
    /// Arming from the editor closes it without saving.
    pub fn toggle_placing(&mut self) -> Vec<SessionEvent> {
        match self.state {
            EditSessionState::Placing => {
                self.state = EditSessionState::Idle;
                vec![SessionEvent::PlacementArmed(false)]
            }
            _ => {
                let mut events = self.exit_current();
                self.state = EditSessionState::Placing;
                events.push(SessionEvent::PlacementArmed(true));
                log::debug!("placement armed");
                events
            }
        }
    }

    /// Handles a click on empty surface; only acts while placing
    pub fn on_surface_click(
        &mut self,
        store: &mut AnnotationStore,
        position: PixelPoint,
    ) -> Vec<SessionEvent> {
        if self.state != EditSessionState::Placing {
            return Vec::new();
        }

        let annotation = store.add(position);
        let id = annotation.id;
        let buffer = EditBuffer::from_record(&annotation);

        self.state = EditSessionState::Editing(id);
        self.buffer = Some(buffer.clone());

        vec![
            SessionEvent::PlacementArmed(false),
            SessionEvent::Placed(annotation),
            SessionEvent::EditorOpened { id, buffer },
        ]
    }

    /// Opens the editor on an existing record with its persisted values.
    ///
    /// Any unsaved buffer from a previous edit is dropped. If the record no
    /// longer exists the lookup error is returned and the session is left as
    /// it was; callers leave it with [`cancel`](Self::cancel).
    pub fn reopen(
        &mut self,
        store: &AnnotationStore,
        id: AnnotationId,
    ) -> Result<Vec<SessionEvent>> {
        let annotation = store.get(id)?;
        let mut events = if self.state == EditSessionState::Editing(id) {
            Vec::new()
        } else {
            self.exit_current()
        };

        let buffer = EditBuffer::from_record(annotation);
        self.state = EditSessionState::Editing(id);
        self.buffer = Some(buffer.clone());
        events.push(SessionEvent::EditorOpened { id, buffer });
        Ok(events)
    }

    /// Commits the given fields to the record being edited and returns to idle
    pub fn save(
        &mut self,
        store: &mut AnnotationStore,
        title: &str,
        description: &str,
    ) -> Result<Vec<SessionEvent>> {
        let Some(id) = self.editing() else {
            return Ok(Vec::new());
        };
        self.reset();

        store.update(id, title, description)?;
        let saved = store.get(id)?.clone();
        log::debug!("saved {} as {:?}", id, saved.title);
        Ok(vec![SessionEvent::Saved(saved)])
    }

    /// Commits whatever is in the edit buffer
    pub fn save_buffer(&mut self, store: &mut AnnotationStore) -> Result<Vec<SessionEvent>> {
        let buffer = self.buffer.clone().unwrap_or_default();
        self.save(store, &buffer.title, &buffer.description)
    }

    /// Deletes the record being edited and returns to idle
    pub fn delete(&mut self, store: &mut AnnotationStore) -> Result<Vec<SessionEvent>> {
        let Some(id) = self.editing() else {
            return Ok(Vec::new());
        };
        self.reset();

        store.remove(id)?;
        log::debug!("deleted {}", id);
        Ok(vec![SessionEvent::Deleted(id)])
    }

    /// Leaves placing or editing without committing anything
    pub fn cancel(&mut self) -> Vec<SessionEvent> {
        self.exit_current()
    }

    /// Wipes every record once the user has confirmed
    pub fn clear_all(
        &mut self,
        store: &mut AnnotationStore,
        confirmation: Confirmation,
    ) -> Vec<SessionEvent> {
        if confirmation == Confirmation::Declined {
            return Vec::new();
        }

        let mut events = self.exit_current();
        let removed = store.clear();
        events.push(SessionEvent::Cleared(removed));
        events
    }

    fn exit_current(&mut self) -> Vec<SessionEvent> {
        let events = match self.state {
            EditSessionState::Idle => Vec::new(),
            EditSessionState::Placing => vec![SessionEvent::PlacementArmed(false)],
            EditSessionState::Editing(id) => vec![SessionEvent::EditorClosed(id)],
        };
        self.reset();
        events
    }

    fn reset(&mut self) {
        self.state = EditSessionState::Idle;
        self.buffer = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MapError;

    fn placed(session: &mut AnnotationEditSession, store: &mut AnnotationStore) -> AnnotationId {
        session.toggle_placing();
        session.on_surface_click(store, PixelPoint::new(10.0, 20.0));
        session.editing().unwrap()
    }

    #[test]
    fn test_toggle_placing_round_trip() {
        let mut session = AnnotationEditSession::new();

        assert_eq!(session.toggle_placing(), vec![SessionEvent::PlacementArmed(true)]);
        assert!(session.is_placing());

        assert_eq!(session.toggle_placing(), vec![SessionEvent::PlacementArmed(false)]);
        assert_eq!(session.state(), EditSessionState::Idle);
    }

    #[test]
    fn test_click_while_idle_is_ignored() {
        let mut session = AnnotationEditSession::new();
        let mut store = AnnotationStore::new();

        assert!(session
            .on_surface_click(&mut store, PixelPoint::new(1.0, 1.0))
            .is_empty());
        assert!(store.is_empty());
    }

    #[test]
    fn test_placement_click_opens_editor() {
        let mut session = AnnotationEditSession::new();
        let mut store = AnnotationStore::new();
        session.toggle_placing();

        let events = session.on_surface_click(&mut store, PixelPoint::new(100.0, 200.0));
        let id = session.editing().unwrap();

        assert_eq!(events.len(), 3);
        assert_eq!(events[0], SessionEvent::PlacementArmed(false));
        assert!(matches!(&events[1], SessionEvent::Placed(a) if a.id == id));
        assert_eq!(
            events[2],
            SessionEvent::EditorOpened {
                id,
                buffer: EditBuffer::default()
            }
        );
        assert_eq!(store.get(id).unwrap().position, PixelPoint::new(100.0, 200.0));
    }

    #[test]
    fn test_save_commits_and_goes_idle() {
        let mut session = AnnotationEditSession::new();
        let mut store = AnnotationStore::new();
        let id = placed(&mut session, &mut store);

        let events = session.save(&mut store, "Library", "Main library").unwrap();

        assert_eq!(session.state(), EditSessionState::Idle);
        assert!(session.buffer().is_none());
        assert!(matches!(&events[..], [SessionEvent::Saved(a)] if a.title == "Library"));
        assert_eq!(store.get(id).unwrap().description, "Main library");
    }

    #[test]
    fn test_save_buffer_uses_typed_fields() {
        let mut session = AnnotationEditSession::new();
        let mut store = AnnotationStore::new();
        let id = placed(&mut session, &mut store);

        if let Some(buffer) = session.buffer_mut() {
            buffer.title = "Gym".to_string();
            buffer.description = "Sports hall".to_string();
        }
        session.save_buffer(&mut store).unwrap();

        assert_eq!(store.get(id).unwrap().title, "Gym");
    }

    #[test]
    fn test_save_on_missing_record_resets_to_idle() {
        let mut session = AnnotationEditSession::new();
        let mut store = AnnotationStore::new();
        let id = placed(&mut session, &mut store);
        store.remove(id).unwrap();

        let err = session.save(&mut store, "a", "b").unwrap_err();
        assert!(matches!(err, MapError::RecordNotFound(missing) if missing == id));
        assert_eq!(session.state(), EditSessionState::Idle);
    }

    #[test]
    fn test_delete_removes_record() {
        let mut session = AnnotationEditSession::new();
        let mut store = AnnotationStore::new();
        let id = placed(&mut session, &mut store);

        assert_eq!(
            session.delete(&mut store).unwrap(),
            vec![SessionEvent::Deleted(id)]
        );
        assert!(store.get(id).is_err());
        assert_eq!(session.state(), EditSessionState::Idle);
    }

    #[test]
    fn test_save_and_delete_outside_editor_are_no_ops() {
        let mut session = AnnotationEditSession::new();
        let mut store = AnnotationStore::new();

        assert!(session.save(&mut store, "a", "b").unwrap().is_empty());
        assert!(session.delete(&mut store).unwrap().is_empty());
    }

    #[test]
    fn test_reopen_other_record_discards_unsaved_buffer() {
        let mut session = AnnotationEditSession::new();
        let mut store = AnnotationStore::new();
        let a = placed(&mut session, &mut store);
        session.save(&mut store, "A", "first").unwrap();
        let b = placed(&mut session, &mut store);
        session.save(&mut store, "B", "second").unwrap();

        session.reopen(&store, a).unwrap();
        session.buffer_mut().unwrap().title = "unsaved".to_string();

        let events = session.reopen(&store, b).unwrap();
        assert_eq!(
            events,
            vec![
                SessionEvent::EditorClosed(a),
                SessionEvent::EditorOpened {
                    id: b,
                    buffer: EditBuffer::new("B", "second"),
                },
            ]
        );
        assert_eq!(session.state(), EditSessionState::Editing(b));
        assert_eq!(store.get(a).unwrap().title, "A");
    }

    #[test]
    fn test_reopen_missing_record_keeps_current_editor() {
        let mut session = AnnotationEditSession::new();
        let mut store = AnnotationStore::new();
        let id = placed(&mut session, &mut store);
        session.buffer_mut().unwrap().title = "typed".to_string();

        assert!(session.reopen(&store, AnnotationId(id.0 + 1)).is_err());
        assert_eq!(session.state(), EditSessionState::Editing(id));
        assert_eq!(session.buffer().unwrap().title, "typed");

        assert_eq!(session.cancel(), vec![SessionEvent::EditorClosed(id)]);
        assert_eq!(session.state(), EditSessionState::Idle);
    }

    #[test]
    fn test_arming_from_editor_closes_it() {
        let mut session = AnnotationEditSession::new();
        let mut store = AnnotationStore::new();
        let id = placed(&mut session, &mut store);

        assert_eq!(
            session.toggle_placing(),
            vec![
                SessionEvent::EditorClosed(id),
                SessionEvent::PlacementArmed(true)
            ]
        );
        assert!(session.is_placing());
    }

    #[test]
    fn test_clear_all_requires_confirmation() {
        let mut session = AnnotationEditSession::new();
        let mut store = AnnotationStore::new();
        placed(&mut session, &mut store);
        placed(&mut session, &mut store);

        assert!(session
            .clear_all(&mut store, Confirmation::Declined)
            .is_empty());
        assert_eq!(store.len(), 2);
        assert!(session.editing().is_some());

        let events = session.clear_all(&mut store, Confirmation::Confirmed);
        assert_eq!(events.last(), Some(&SessionEvent::Cleared(2)));
        assert!(store.is_empty());
        assert_eq!(session.state(), EditSessionState::Idle);
    }
}
