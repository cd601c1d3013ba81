//! Shared loading flag and single error slot.

use counsel_common::ChatError;
use tracing::warn;

/// Request bookkeeping shared by every operation kind.
///
/// `loading` is derived from the number of outstanding requests so that
/// overlapping requests cannot clear it early.
#[derive(Debug, Default)]
pub struct RequestStatus {
    in_flight: usize,
    error: Option<String>,
}

impl RequestStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn loading(&self) -> bool {
        self.in_flight > 0
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// A request is being issued: count it and clear the last error.
    pub fn begin(&mut self) {
        self.in_flight += 1;
        self.error = None;
    }

    /// A request completed, whatever the outcome.
    pub fn finish(&mut self) {
        self.in_flight = self.in_flight.saturating_sub(1);
    }

    /// Surface a failure, replacing any previous error.
    pub fn fail(&mut self, err: &ChatError) {
        warn!(error = %err, cause = %err.api_error(), "request failed");
        self.error = Some(err.to_string());
    }
}
