pub mod events;

pub use events::{Control, ControlOutcome, SurfaceEvent};
