//! Exchange observation hooks
//!
//! The terminal reports every exchange to an injected observer instead of
//! logging from inside the protocol path, so integrations decide where
//! payload-level records go.

use tracing::{info, warn};

use crate::error::Error;

/// Callbacks invoked around each request/response exchange
///
/// Every method defaults to a no-op; implementors override only what they
/// need.
pub trait ExchangeObserver: Send + Sync {
    /// Called with the joined outbound payload once the frame is written
    fn request_sent(&self, payload: &[u8]) {
        let _ = payload;
    }

    /// Called with the validated response data
    fn response_received(&self, data: &[u8]) {
        let _ = data;
    }

    /// Called when an exchange fails, before the error reaches the caller
    fn exchange_failed(&self, error: &Error) {
        let _ = error;
    }
}

/// Observer that discards every event
pub struct NoopObserver;

impl ExchangeObserver for NoopObserver {}

/// Observer that records payloads through `tracing`
///
/// Payloads are hex-encoded in full. Field contents may carry cardholder
/// data; route these log lines accordingly.
pub struct LogObserver;

impl ExchangeObserver for LogObserver {
    fn request_sent(&self, payload: &[u8]) {
        info!("POS input: {}", hex::encode(payload));
    }

    fn response_received(&self, data: &[u8]) {
        info!("PED output: {}", hex::encode(data));
    }

    fn exchange_failed(&self, error: &Error) {
        warn!("Exchange failed: {}", error);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_methods_are_noops() {
        struct Silent;
        impl ExchangeObserver for Silent {}

        let observer = Silent;
        observer.request_sent(b"123");
        observer.response_received(b"456");
        observer.exchange_failed(&Error::NotConnected);
    }
}
