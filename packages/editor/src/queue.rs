//! # Write Queue
//!
//! Orders writes per container. A write locks every container it changes in
//! the store: the submitted one and, for a relocation, the container the node
//! left. Newer writes touching a locked container wait until the store
//! answers, and never overtake an older waiting write on the same container.
//! Waiting orderings for the same container collapse into the newest one,
//! since each ordering lists the complete child set.

use crate::{EditorError, WriteId, WriteRequest};
use chrono::Utc;
use outline_model::BlockId;
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;

/// A write plus what the host must refetch once it lands
#[derive(Debug, Clone, PartialEq)]
pub struct QueuedWrite {
    pub request: WriteRequest,
    /// Containers whose children change in the store, submitted one first
    pub touched: Vec<BlockId>,
    pub refresh_sections: Vec<BlockId>,
}

/// Result of adding a write to the queue
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Enqueued {
    pub id: WriteId,
    /// Waiting write folded into this one
    pub superseded: Option<WriteId>,
}

#[derive(Debug, Default)]
pub struct WriteQueue {
    next_seq: u64,
    /// Not yet handed to the host, in issue order
    waiting: Vec<QueuedWrite>,
    /// Handed to the host, keyed by id
    in_flight: BTreeMap<WriteId, QueuedWrite>,
    locks: HashMap<BlockId, WriteId>,
    /// In-flight writes whose answer no longer matters
    ignored: HashSet<WriteId>,
}

impl WriteQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(
        &mut self,
        container_id: BlockId,
        ordered_child_ids: Vec<BlockId>,
        source_container_id: Option<BlockId>,
        refresh_sections: Vec<BlockId>,
    ) -> Enqueued {
        self.next_seq += 1;
        let id = WriteId::new(self.next_seq);

        let mut touched = vec![container_id.clone()];
        touched.extend(source_container_id.filter(|source| source != &container_id));

        let mut write = QueuedWrite {
            request: WriteRequest {
                id,
                container_id,
                ordered_child_ids,
                created_at: Utc::now(),
            },
            touched,
            refresh_sections,
        };

        let superseded = self
            .waiting
            .iter()
            .position(|queued| queued.request.container_id == write.request.container_id)
            .map(|index| self.waiting.remove(index));

        if let Some(old) = &superseded {
            merge_into(&mut write.touched, &old.touched);
            merge_into(&mut write.refresh_sections, &old.refresh_sections);
            debug!(
                container = %write.request.container_id,
                superseded = %old.request.id,
                by = %id,
                "[WriteQueue] Coalesced waiting write"
            );
        }

        self.waiting.push(write);
        Enqueued {
            id,
            superseded: superseded.map(|old| old.request.id),
        }
    }

    /// Hand out every waiting write whose containers are all free, locking them
    pub fn take_ready(&mut self) -> Vec<WriteRequest> {
        let mut ready = Vec::new();
        let mut still_waiting = Vec::new();
        // Containers claimed by an older write that stays waiting
        let mut held = HashSet::new();

        for write in std::mem::take(&mut self.waiting) {
            let blocked = write
                .touched
                .iter()
                .any(|container| self.locks.contains_key(container) || held.contains(container));
            if blocked {
                held.extend(write.touched.iter().cloned());
                still_waiting.push(write);
                continue;
            }
            for container in &write.touched {
                self.locks.insert(container.clone(), write.request.id);
            }
            ready.push(write.request.clone());
            self.in_flight.insert(write.request.id, write);
        }

        self.waiting = still_waiting;
        ready
    }

    /// Settle an in-flight write and unlock its containers
    pub fn resolve(&mut self, id: WriteId) -> Result<QueuedWrite, EditorError> {
        let write = self
            .in_flight
            .remove(&id)
            .ok_or(EditorError::UnknownWrite(id))?;
        for container in &write.touched {
            if self.locks.get(container) == Some(&id) {
                self.locks.remove(container);
            }
        }
        Ok(write)
    }

    /// Drop waiting writes issued after `after` and ignore in-flight ones
    ///
    /// Returns the ids of the dropped waiting writes.
    pub fn discard_after(&mut self, after: WriteId) -> Vec<WriteId> {
        let mut discarded = Vec::new();
        self.waiting.retain(|write| {
            let keep = write.request.id < after;
            if !keep {
                discarded.push(write.request.id);
            }
            keep
        });
        let late = self.in_flight.range(after..).map(|(&id, _)| id);
        self.ignored.extend(late);
        discarded
    }

    /// Whether an answer for `id` should be dropped on the floor
    pub fn take_ignored(&mut self, id: WriteId) -> bool {
        self.ignored.remove(&id)
    }

    pub fn is_locked(&self, container_id: &BlockId) -> bool {
        self.locks.contains_key(container_id)
    }

    /// A write for `container_id` is waiting or in flight
    pub fn has_pending(&self, container_id: &BlockId) -> bool {
        self.is_locked(container_id)
            || self
                .waiting
                .iter()
                .any(|write| write.touched.contains(container_id))
    }

    /// Every container touched by a waiting or in-flight write
    pub fn pending_containers(&self) -> impl Iterator<Item = &BlockId> {
        self.locks
            .keys()
            .chain(self.waiting.iter().flat_map(|write| write.touched.iter()))
    }

    pub fn waiting_count(&self) -> usize {
        self.waiting.len()
    }

    pub fn in_flight_count(&self) -> usize {
        self.in_flight.len()
    }

    pub fn clear(&mut self) {
        self.waiting.clear();
        self.ignored.extend(self.in_flight.keys().copied());
        self.in_flight.clear();
        self.locks.clear();
    }
}

fn merge_into(into: &mut Vec<BlockId>, from: &[BlockId]) {
    for id in from {
        if !into.contains(id) {
            into.push(id.clone());
        }
    }
}
