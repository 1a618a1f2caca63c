use crate::annotations::{session::EditBuffer, store::Annotation};
use serde::{Deserialize, Serialize};

/// What a marker's popup shows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PopupContent {
    /// Title/description fields with save and delete buttons
    Editor { title: String, description: String },
    /// Read-only title and description with an edit button
    Summary { title: String, description: String },
    /// Plain text label
    Label(String),
}

impl PopupContent {
    pub fn editor(buffer: &EditBuffer) -> Self {
        PopupContent::Editor {
            title: buffer.title.clone(),
            description: buffer.description.clone(),
        }
    }

    pub fn summary(annotation: &Annotation) -> Self {
        PopupContent::Summary {
            title: annotation.title.clone(),
            description: annotation.description.clone(),
        }
    }

    pub fn is_editor(&self) -> bool {
        matches!(self, PopupContent::Editor { .. })
    }

    /// First line shown in the popup
    pub fn heading(&self) -> &str {
        match self {
            PopupContent::Editor { title, .. } | PopupContent::Summary { title, .. } => title,
            PopupContent::Label(text) => text,
        }
    }
}
