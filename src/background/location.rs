//! Device location requests
//!
//! "Use my location" is the one asynchronous step of map search. The
//! provider runs on the async runtime and posts its outcome to a channel;
//! the session drains that channel on its own thread, so the viewport is
//! only ever touched synchronously.

use crate::prelude::Arc;
use crate::runtime::{self, AsyncHandle};
use crate::{core::geo::LatLng, input::events::MapSearchEvent, traits::LocationProvider, LocationError};
use crossbeam_channel::{bounded, Receiver, TryRecvError};

/// Result delivered by the location provider
pub type LocationOutcome = std::result::Result<LatLng, LocationError>;

impl From<LocationOutcome> for MapSearchEvent {
    fn from(outcome: LocationOutcome) -> Self {
        match outcome {
            Ok(position) => MapSearchEvent::LocateSucceeded { position },
            Err(error) => MapSearchEvent::LocateFailed { error },
        }
    }
}

/// An in-flight location lookup.
///
/// Dropping the request abandons it: the task is cancelled and a late
/// answer is discarded.
pub struct LocationRequest {
    receiver: Receiver<LocationOutcome>,
    handle: Box<dyn AsyncHandle>,
    delivered: bool,
}

impl LocationRequest {
    pub fn spawn(provider: Arc<dyn LocationProvider>) -> Self {
        let (sender, receiver) = bounded(1);
        let handle = runtime::spawn(async move {
            let outcome = provider.current_location().await;
            if sender.send(outcome).is_err() {
                log::debug!("location answer arrived after the request was abandoned");
            }
        });

        Self {
            receiver,
            handle,
            delivered: false,
        }
    }

    /// Takes the outcome if the provider has answered. Yields at most one
    /// outcome per request.
    pub fn try_take(&mut self) -> Option<LocationOutcome> {
        if self.delivered {
            return None;
        }

        match self.receiver.try_recv() {
            Ok(outcome) => {
                self.delivered = true;
                Some(outcome)
            }
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => {
                self.delivered = true;
                Some(Err(LocationError::Other(
                    "location task ended without an answer".to_string(),
                )))
            }
        }
    }

    pub fn is_delivered(&self) -> bool {
        self.delivered
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for LocationRequest {
    fn drop(&mut self) {
        if !self.delivered {
            self.handle.cancel();
        }
    }
}
