use crate::{core::geo::PixelPoint, MapError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::{SystemTime, UNIX_EPOCH};

/// Identifier of an annotation, unique for the lifetime of its store
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AnnotationId(pub u64);

impl std::fmt::Display for AnnotationId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "annotation-{}", self.0)
    }
}

/// A user-created labelled point of interest on the base image
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Annotation {
    pub id: AnnotationId,
    pub position: PixelPoint,
    pub title: String,
    pub description: String,
}

impl Annotation {
    fn new(id: AnnotationId, position: PixelPoint) -> Self {
        Self {
            id,
            position,
            title: String::new(),
            description: String::new(),
        }
    }

    /// Whether both text fields have been filled in
    pub fn is_described(&self) -> bool {
        !self.title.is_empty() && !self.description.is_empty()
    }
}

/// Hands out time-based ids that never repeat.
///
/// Ids start from the wall clock in milliseconds, like the marker ids of a
/// browser map, but are bumped past the last issued value so two placements
/// inside the same millisecond (or a clock step backwards) cannot collide.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: u64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn next_id(&mut self) -> AnnotationId {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        self.last = now.max(self.last + 1);
        AnnotationId(self.last)
    }
}

/// Sole owner of annotation records
#[derive(Debug, Clone, Default)]
pub struct AnnotationStore {
    records: BTreeMap<AnnotationId, Annotation>,
    ids: IdGenerator,
}

impl AnnotationStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty-titled record at `position` and returns a copy of it
    pub fn add(&mut self, position: PixelPoint) -> Annotation {
        let id = self.ids.next_id();
        let annotation = Annotation::new(id, position);
        self.records.insert(id, annotation.clone());
        log::debug!("added {} at {}", id, position);
        annotation
    }

    /// Replaces title and description; the position is left untouched
    pub fn update(&mut self, id: AnnotationId, title: &str, description: &str) -> Result<()> {
        let record = self
            .records
            .get_mut(&id)
            .ok_or(MapError::RecordNotFound(id))?;
        record.title = title.to_string();
        record.description = description.to_string();
        Ok(())
    }

    /// Moves a record after its marker was dragged
    pub fn reposition(&mut self, id: AnnotationId, position: PixelPoint) -> Result<()> {
        let record = self
            .records
            .get_mut(&id)
            .ok_or(MapError::RecordNotFound(id))?;
        record.position = position;
        Ok(())
    }

    /// Deletes a record permanently and returns it
    pub fn remove(&mut self, id: AnnotationId) -> Result<Annotation> {
        self.records.remove(&id).ok_or(MapError::RecordNotFound(id))
    }

    pub fn get(&self, id: AnnotationId) -> Result<&Annotation> {
        self.records.get(&id).ok_or(MapError::RecordNotFound(id))
    }

    pub fn contains(&self, id: AnnotationId) -> bool {
        self.records.contains_key(&id)
    }

    /// Removes every record, returning how many were dropped.
    ///
    /// The id generator is kept, so ids issued before the wipe stay retired.
    pub fn clear(&mut self) -> usize {
        let count = self.records.len();
        self.records.clear();
        count
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in id (creation) order
    pub fn iter(&self) -> impl Iterator<Item = &Annotation> {
        self.records.values()
    }

    pub fn ids(&self) -> Vec<AnnotationId> {
        self.records.keys().copied().collect()
    }
}
