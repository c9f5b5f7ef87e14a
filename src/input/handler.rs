use crate::{core::viewport::Viewport, input::events::MapSearchEvent};

/// What an event did to the viewport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewportChange {
    pub moved: bool,
    pub zoomed: bool,
}

impl ViewportChange {
    fn between(before: &Viewport, after: &Viewport) -> Self {
        Self {
            moved: before.center() != after.center(),
            zoomed: before.zoom() != after.zoom(),
        }
    }

    pub fn is_changed(&self) -> bool {
        self.moved || self.zoomed
    }

    /// Clusters depend on zoom (and listings), never on the center
    pub fn requires_recluster(&self) -> bool {
        self.zoomed
    }

    /// Any change shifts marker positions
    pub fn requires_reproject(&self) -> bool {
        self.is_changed()
    }
}

/// Applies one event to the viewport. Every transition is synchronous and
/// total; a failed location request leaves the viewport as it was.
pub fn apply_event(viewport: &mut Viewport, event: &MapSearchEvent) -> ViewportChange {
    let before = *viewport;

    match event {
        MapSearchEvent::Pan { center } | MapSearchEvent::LocationSearchResolved { center } => {
            viewport.pan_to(*center);
        }
        MapSearchEvent::ZoomIn => viewport.zoom_in(),
        MapSearchEvent::ZoomOut => viewport.zoom_out(),
        MapSearchEvent::LocateSucceeded { position } => viewport.locate(*position),
        MapSearchEvent::LocateFailed { error } => {
            log::warn!("Could not determine current location: {}", error);
        }
        MapSearchEvent::ClusterClicked { center } => viewport.focus_cluster(*center),
    }

    let change = ViewportChange::between(&before, viewport);
    if change.is_changed() {
        log::debug!(
            "viewport -> ({:.4}, {:.4}) z{}",
            viewport.latitude(),
            viewport.longitude(),
            viewport.zoom()
        );
    }
    change
}
