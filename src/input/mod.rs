pub mod events;
pub mod handler;

// Re-export the essential types
pub use events::MapSearchEvent;
pub use handler::{apply_event, ViewportChange};
