//! LatestArtifactStore - single guarded slot shared by the polling task and
//! the HTTP handlers
//!
//! Every operation replaces or clones the whole value under one mutex, so a
//! reader sees either the previous artifact or the new one, never a mix. The
//! lock is only held for a pointer swap or an `Arc` clone.

use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use bytes::Bytes;
use chrono::{DateTime, Local};
use tracing::debug;

/// The most recent published capture
#[derive(Debug, Clone, PartialEq)]
pub struct PublishedArtifact {
    /// Encoded image
    pub body: Bytes,
    /// MIME type reported by the encoder that produced `body`
    pub content_type: &'static str,
    /// Wall-clock instant of the capture
    pub captured_at: DateTime<Local>,
    /// Lossless file written for the same capture
    pub source: PathBuf,
    /// Starts at 1, incremented on every publication; stamped by the store
    pub sequence: u64,
}

#[derive(Debug, Default)]
struct Slot {
    latest: Option<Arc<PublishedArtifact>>,
    sequence: u64,
}

/// Cloneable handle to the publication slot
#[derive(Debug, Clone, Default)]
pub struct LatestArtifactStore {
    inner: Arc<Mutex<Slot>>,
}

impl LatestArtifactStore {
    pub fn new() -> Self {
        Self::default()
    }

    // A panicking writer cannot leave the slot half-written: the value is
    // swapped in one assignment.
    fn lock(&self) -> MutexGuard<'_, Slot> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Stamp the next sequence number on `artifact` and replace the slot;
    /// returns the number
    pub fn put(&self, mut artifact: PublishedArtifact) -> u64 {
        let mut slot = self.lock();
        slot.sequence += 1;
        let sequence = slot.sequence;
        artifact.sequence = sequence;
        slot.latest = Some(Arc::new(artifact));
        drop(slot);

        debug!(sequence, "Artifact published");
        sequence
    }

    /// Build an artifact from encoded bytes and `put` it
    pub fn publish(
        &self,
        body: Bytes,
        content_type: &'static str,
        captured_at: DateTime<Local>,
        source: PathBuf,
    ) -> u64 {
        self.put(PublishedArtifact {
            body,
            content_type,
            captured_at,
            source,
            sequence: 0,
        })
    }

    /// Current artifact, `None` before the first publication
    pub fn get(&self) -> Option<Arc<PublishedArtifact>> {
        self.lock().latest.clone()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().latest.is_none()
    }

    /// Sequence number of the latest publication (0 = none yet)
    pub fn sequence(&self) -> u64 {
        self.lock().sequence
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    fn artifact(fill: u8, len: usize) -> PublishedArtifact {
        PublishedArtifact {
            body: Bytes::from(vec![fill; len]),
            content_type: "image/jpeg",
            captured_at: Local::now(),
            source: PathBuf::from(format!("/tmp/capture_{fill}.png")),
            sequence: 0,
        }
    }

    #[test]
    fn test_empty_before_first_put() {
        let store = LatestArtifactStore::new();
        assert!(store.get().is_none());
        assert!(store.is_empty());
        assert_eq!(store.sequence(), 0);
    }

    #[test]
    fn test_get_returns_last_put() {
        let store = LatestArtifactStore::new();
        let a = artifact(1, 16);
        assert_eq!(store.put(a.clone()), 1);
        let got = store.get().unwrap();
        assert_eq!(got.body, a.body);
        assert_eq!(got.source, a.source);
        assert_eq!(*store.get().unwrap(), *got);

        let b = artifact(2, 8);
        store.put(b.clone());
        let got = store.get().unwrap();
        assert_eq!(got.body, b.body);
        assert_eq!(got.sequence, 2);
        assert_eq!(store.sequence(), 2);
    }

    fn publish(store: &LatestArtifactStore, body: &'static [u8], kind: &'static str) -> u64 {
        store.publish(Bytes::from_static(body), kind, Local::now(), "b.png".into())
    }

    #[test]
    fn test_publish_increments_sequence() {
        let store = LatestArtifactStore::new();
        let s1 = publish(&store, b"one", "image/jpeg");
        let s2 = publish(&store, b"two", "image/png");
        assert_eq!((s1, s2), (1, 2));

        let latest = store.get().unwrap();
        assert_eq!(latest.sequence, 2);
        assert_eq!(&latest.body[..], b"two");
        assert_eq!(latest.content_type, "image/png");
        assert_eq!(latest.source, PathBuf::from("b.png"));
    }

    #[test]
    fn test_put_ignores_caller_sequence() {
        let store = LatestArtifactStore::new();
        publish(&store, b"one", "image/jpeg");
        publish(&store, b"two", "image/jpeg");

        let stale = PublishedArtifact {
            sequence: 1,
            ..artifact(3, 4)
        };
        assert_eq!(store.put(stale), 3);
        assert_eq!(store.get().unwrap().sequence, store.sequence());
        assert_eq!(store.sequence(), 3);
    }

    #[test]
    fn test_clones_share_slot() {
        let store = LatestArtifactStore::new();
        let reader = store.clone();
        store.put(artifact(7, 4));
        assert!(!reader.is_empty());
    }

    #[test]
    fn test_concurrent_readers_never_see_torn_value() {
        const OLD_LEN: usize = 4096;
        const NEW_LEN: usize = 1024;

        let store = LatestArtifactStore::new();
        store.put(artifact(0xAA, OLD_LEN));

        let readers: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                thread::spawn(move || {
                    for _ in 0..2000 {
                        let seen = store.get().unwrap();
                        let ok = match seen.sequence {
                            1 => seen.body.len() == OLD_LEN && seen.body.iter().all(|&b| b == 0xAA),
                            2 => seen.body.len() == NEW_LEN && seen.body.iter().all(|&b| b == 0x55),
                            _ => false,
                        };
                        assert!(ok, "torn read at sequence {}", seen.sequence);
                    }
                })
            })
            .collect();

        let writer = {
            let store = store.clone();
            thread::spawn(move || store.put(artifact(0x55, NEW_LEN)))
        };

        writer.join().unwrap();
        for r in readers {
            r.join().unwrap();
        }
        assert_eq!(store.get().unwrap().sequence, 2);
    }
}
