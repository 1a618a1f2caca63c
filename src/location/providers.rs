use crate::{
    core::geo::GeoPoint,
    location::{FixResponder, FixResult, LocationError, LocationProvider},
};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Always reports the same position; stands in for hosts without a sensor
#[derive(Debug, Clone, Copy)]
pub struct FixedLocationProvider {
    fix: GeoPoint,
}

impl FixedLocationProvider {
    pub fn new(fix: GeoPoint) -> Self {
        Self { fix }
    }
}

#[async_trait]
impl LocationProvider for FixedLocationProvider {
    async fn request(&self, responder: FixResponder) {
        responder.succeed(self.fix);
    }
}

/// Always fails with the same reason
#[derive(Debug, Clone)]
pub struct UnavailableLocationProvider {
    reason: LocationError,
}

impl UnavailableLocationProvider {
    pub fn new(reason: LocationError) -> Self {
        Self { reason }
    }
}

impl Default for UnavailableLocationProvider {
    fn default() -> Self {
        Self::new(LocationError::Unsupported)
    }
}

#[async_trait]
impl LocationProvider for UnavailableLocationProvider {
    async fn request(&self, responder: FixResponder) {
        responder.fail(self.reason.clone());
    }
}

/// Replays a queue of answers, one per request, then reports `Unsupported`
#[derive(Debug, Default)]
pub struct ScriptedLocationProvider {
    answers: Mutex<VecDeque<FixResult>>,
}

impl ScriptedLocationProvider {
    pub fn new(answers: impl IntoIterator<Item = FixResult>) -> Self {
        Self {
            answers: Mutex::new(answers.into_iter().collect()),
        }
    }

    pub fn remaining(&self) -> usize {
        self.answers.lock().map(|a| a.len()).unwrap_or(0)
    }
}

#[async_trait]
impl LocationProvider for ScriptedLocationProvider {
    async fn request(&self, responder: FixResponder) {
        let next = match self.answers.lock() {
            Ok(mut answers) => answers.pop_front(),
            Err(_) => None,
        };
        responder.respond(next.unwrap_or(Err(LocationError::Unsupported)));
    }
}
