//! One-shot device positioning and the live-location marker

pub mod live;
pub mod providers;

pub use live::{LiveLocation, LiveLocationMarker, LiveLocationUpdate};
pub use providers::{FixedLocationProvider, ScriptedLocationProvider, UnavailableLocationProvider};

use crate::core::geo::GeoPoint;
use async_trait::async_trait;
use futures::channel::oneshot;

/// Why a position request produced no fix
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocationError {
    #[error("permission to read the device location was denied")]
    PermissionDenied,
    #[error("position unavailable: {0}")]
    PositionUnavailable(String),
    #[error("timed out waiting for a position")]
    Timeout,
    #[error("this host has no location sensor")]
    Unsupported,
    #[error("the location request was dropped without an answer")]
    Dropped,
}

pub type FixResult = std::result::Result<GeoPoint, LocationError>;

/// Pending answer to a single position request
#[derive(Debug)]
pub struct FixRequest {
    receiver: oneshot::Receiver<FixResult>,
}

/// The sensor's half of a request; answering consumes it
#[derive(Debug)]
pub struct FixResponder {
    sender: oneshot::Sender<FixResult>,
}

impl FixRequest {
    pub fn new() -> (FixRequest, FixResponder) {
        let (sender, receiver) = oneshot::channel();
        (FixRequest { receiver }, FixResponder { sender })
    }

    /// Waits for the answer; a responder dropped unanswered yields `Dropped`
    pub async fn wait(self) -> FixResult {
        self.receiver.await.unwrap_or(Err(LocationError::Dropped))
    }
}

impl FixResponder {
    pub fn respond(self, result: FixResult) {
        if self.sender.send(result).is_err() {
            log::debug!("location answer arrived after the request was abandoned");
        }
    }

    pub fn succeed(self, fix: GeoPoint) {
        self.respond(Ok(fix));
    }

    pub fn fail(self, error: LocationError) {
        self.respond(Err(error));
    }
}

/// A device position sensor answering one-shot requests
#[async_trait]
pub trait LocationProvider: Send + Sync {
    /// Starts a request; the answer may be sent now or from another task
    async fn request(&self, responder: FixResponder);
}

/// Issues a single request and waits for its answer
pub async fn request_fix(provider: &dyn LocationProvider) -> FixResult {
    let (request, responder) = FixRequest::new();
    provider.request(responder).await;
    request.wait().await
}
