pub mod session;
pub mod store;

pub use session::{AnnotationEditSession, Confirmation, EditBuffer, EditSessionState, SessionEvent};
pub use store::{Annotation, AnnotationId, AnnotationStore, IdGenerator};
