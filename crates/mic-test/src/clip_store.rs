//! Published test recordings, addressable by id.
//!
//! A clip lives here from the moment a recording finishes until its session
//! releases it (new recording, retry, or page closed). The HTTP layer only
//! reads.

use std::{
    collections::HashMap,
    fmt,
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use axum::body::Bytes;
use mic_test_core::audio::Clip;
use serde::Serialize;
use tracing::{debug, error};
use uuid::Uuid;

/// Id of a published clip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ClipId(Uuid);

impl ClipId {
    /// Fresh random id.
    pub(crate) fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Path the clip is served from.
    pub(crate) fn url(&self) -> String {
        format!("/mic-test/clips/{}", self.0)
    }
}

impl From<Uuid> for ClipId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

impl fmt::Display for ClipId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Shared map of live clips. Cheap to clone.
#[derive(Debug, Clone, Default)]
pub struct ClipStore {
    clips: Arc<RwLock<HashMap<ClipId, Bytes>>>,
}

impl ClipStore {
    /// Publish a clip under a fresh id.
    pub(crate) fn insert(&self, clip: Clip) -> ClipId {
        let id = ClipId::new();
        let wav = Bytes::from(clip.into_wav());
        debug!(clip_id = %id, wav_bytes = wav.len(), "Clip published");
        self.write().insert(id, wav);
        id
    }

    /// WAV bytes of a live clip.
    pub(crate) fn get(&self, id: ClipId) -> Option<Bytes> {
        self.read().get(&id).cloned()
    }

    /// Withdraw a clip. Returns whether it was live.
    pub(crate) fn remove(&self, id: ClipId) -> bool {
        let removed = self.write().remove(&id).is_some();
        debug!(clip_id = %id, removed, "Clip released");
        removed
    }

    /// Number of live clips.
    pub(crate) fn len(&self) -> usize {
        self.read().len()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<ClipId, Bytes>> {
        self.clips.read().unwrap_or_else(|e| {
            error!("Clip store lock poisoned, recovering: {}", e);
            e.into_inner()
        })
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<ClipId, Bytes>> {
        self.clips.write().unwrap_or_else(|e| {
            error!("Clip store lock poisoned, recovering: {}", e);
            e.into_inner()
        })
    }
}
