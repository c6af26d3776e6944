//! Recording publisher

use furrow_core::DataHash;
use furrow_transport::{Publication, Publisher, TransportError, TransportResult};
use parking_lot::Mutex;

/// [`Publisher`] that keeps every publication instead of sending it
#[derive(Debug, Default)]
pub struct RecordingPublisher {
    published: Mutex<Vec<Publication>>,
    failing: bool,
}

impl RecordingPublisher {
    /// Publisher that accepts everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Publisher whose every publish fails (publications are still recorded)
    pub fn failing() -> Self {
        Self {
            published: Mutex::new(Vec::new()),
            failing: true,
        }
    }

    /// Publications in arrival order
    pub fn published(&self) -> Vec<Publication> {
        self.published.lock().clone()
    }

    /// Publications keyed by `data_hash`
    pub fn published_for(&self, data_hash: &DataHash) -> Vec<Publication> {
        self.published
            .lock()
            .iter()
            .filter(|p| p.key == *data_hash)
            .cloned()
            .collect()
    }
}

impl Publisher for RecordingPublisher {
    fn publish(&self, publication: Publication) -> TransportResult<()> {
        self.published.lock().push(publication);
        if self.failing {
            return Err(TransportError::Closed);
        }
        Ok(())
    }
}
