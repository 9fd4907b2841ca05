//! Active call registry.
//!
//! Only one call is bridged at a time. Every inbound media-stream upgrade
//! must first obtain a [`CallSlot`]; the slot is released when its last
//! clone is dropped, which happens once the relay for that call has ended.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use dashmap::DashMap;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

/// Number of calls that may be bridged concurrently.
pub const MAX_ACTIVE_CALLS: usize = 1;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    /// Another call already holds the only slot
    #[error("A call is already active ({active} of {capacity} slots in use)")]
    AlreadyActive { active: usize, capacity: usize },
}

/// Bookkeeping for one admitted call.
#[derive(Debug, Clone)]
pub struct ActiveCall {
    pub admitted_at: Instant,
}

#[derive(Debug)]
struct RegistryInner {
    capacity: usize,
    active: AtomicUsize,
    calls: DashMap<String, ActiveCall>,
}

/// Admission control for bridged calls.
#[derive(Debug, Clone)]
pub struct SessionRegistry {
    inner: Arc<RegistryInner>,
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::with_capacity(MAX_ACTIVE_CALLS)
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: Arc::new(RegistryInner {
                capacity,
                active: AtomicUsize::new(0),
                calls: DashMap::new(),
            }),
        }
    }

    /// Reserve a slot for a new call, assigning it a fresh session id.
    pub fn try_admit(&self) -> Result<CallSlot, RegistryError> {
        let capacity = self.inner.capacity;
        self.inner
            .active
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |active| {
                (active < capacity).then_some(active + 1)
            })
            .map_err(|active| RegistryError::AlreadyActive { active, capacity })?;

        let session_id = Uuid::new_v4().to_string();
        self.inner.calls.insert(
            session_id.clone(),
            ActiveCall {
                admitted_at: Instant::now(),
            },
        );
        debug!(session_id = %session_id, "Call slot acquired");

        Ok(CallSlot {
            guard: Arc::new(SlotGuard {
                session_id,
                registry: self.inner.clone(),
            }),
        })
    }

    pub fn active_count(&self) -> usize {
        self.inner.active.load(Ordering::Acquire)
    }

    pub fn is_active(&self, session_id: &str) -> bool {
        self.inner.calls.contains_key(session_id)
    }

    pub fn capacity(&self) -> usize {
        self.inner.capacity
    }
}

#[derive(Debug)]
struct SlotGuard {
    session_id: String,
    registry: Arc<RegistryInner>,
}

impl Drop for SlotGuard {
    fn drop(&mut self) {
        let call = self.registry.calls.remove(&self.session_id);
        self.registry.active.fetch_sub(1, Ordering::AcqRel);
        if let Some((_, call)) = call {
            debug!(
                session_id = %self.session_id,
                held_ms = call.admitted_at.elapsed().as_millis() as u64,
                "Call slot released"
            );
        }
    }
}

/// Admission ticket for one call.
///
/// Cloning shares the same slot; the slot is freed with the last clone.
#[derive(Debug, Clone)]
pub struct CallSlot {
    guard: Arc<SlotGuard>,
}

impl CallSlot {
    pub fn session_id(&self) -> &str {
        &self.guard.session_id
    }
}
