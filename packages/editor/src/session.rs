//! # Outline Editor Session
//!
//! One author's view of the outline: the optimistic tree, the gesture in
//! progress and the writes that still wait for the store.
//!
//! The session never awaits. Committed moves turn into [`WriteRequest`]s
//! handed out by [`OutlineEditor::take_ready_writes`]; the host performs them
//! and reports back through [`OutlineEditor::resolve_write`].
//! [`OutlineEditor::flush`] does both against a [`PersistenceGateway`].

use crate::drag::{ActiveDrag, DragEvent, DragGhost, DragPhase};
use crate::queue::WriteQueue;
use crate::rollback::{RollbackController, SaveStatus};
use crate::{EditorError, GatewayError, PersistenceGateway, WriteId, WriteRequest};
use futures::future::join_all;
use outline_model::{BlockId, OutlineNode, OutlineTree};
use outline_planner::{
    apply_move, can_move, compute_drop_move, compute_step_move, Direction, MoveOutcome, MoveStrategy, MoveTarget,
};
use tracing::{debug, info, warn};

/// How a write answer was handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WriteResolution {
    /// The store accepted the ordering; the host should refetch these sections
    Confirmed { refresh_sections: Vec<BlockId> },
    /// The store refused; the tree is back at its pre-move state
    RolledBack { discarded: Vec<WriteId> },
    /// Answer to a write made obsolete by an earlier failure or a rehydration
    Ignored,
}

#[derive(Debug)]
pub struct OutlineEditor {
    tree: OutlineTree,
    phase: DragPhase,
    drag: Option<ActiveDrag>,
    queue: WriteQueue,
    rollback: RollbackController,
    /// Confirmed sections still waiting for their other writes to settle
    deferred_refresh: Vec<BlockId>,
}

impl OutlineEditor {
    pub fn new(tree: OutlineTree) -> Self {
        Self {
            tree,
            phase: DragPhase::Idle,
            drag: None,
            queue: WriteQueue::new(),
            rollback: RollbackController::new(),
            deferred_refresh: Vec::new(),
        }
    }

    pub fn tree(&self) -> &OutlineTree {
        &self.tree
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn active_drag(&self) -> Option<&ActiveDrag> {
        self.drag.as_ref()
    }

    pub fn ghost(&self) -> Option<&DragGhost> {
        self.drag.as_ref().map(|drag| &drag.ghost)
    }

    /// Container marked as the drop destination
    pub fn highlighted(&self) -> Option<&BlockId> {
        self.drag.as_ref().and_then(|drag| drag.highlight.as_ref())
    }

    pub fn save_status(&self) -> Option<SaveStatus> {
        self.rollback.status()
    }

    /// Writes issued but not yet answered
    pub fn pending_count(&self) -> usize {
        self.queue.waiting_count() + self.queue.in_flight_count()
    }

    pub fn can_move(&self, id: &BlockId, direction: Direction) -> bool {
        self.phase.is_idle() && can_move(&self.tree, id, direction)
    }

    /// Begin dragging `id`
    ///
    /// Returns `false` without changing anything when the node is unknown or
    /// not draggable.
    pub fn drag_start(&mut self, id: &BlockId) -> Result<bool, EditorError> {
        let next = self.phase.next(DragEvent::Start)?;
        let Some((_, node)) = self.tree.get(id) else {
            return Ok(false);
        };
        if !node.is_draggable() {
            debug!(node = %id, "[DragSession] Refused drag of pinned node");
            return Ok(false);
        }

        self.drag = Some(ActiveDrag::new(node, self.tree.clone()));
        self.phase = next;
        debug!(node = %id, "[DragSession] Drag started");
        Ok(true)
    }

    /// Pointer moved over `over_id`
    ///
    /// A move into another container is previewed on the tree right away; a
    /// reorder within the current container only moves the highlight.
    pub fn drag_over(&mut self, over_id: &BlockId, below_midpoint: bool) -> Result<Option<MoveTarget>, EditorError> {
        let next = self.phase.next(DragEvent::Over)?;
        let drag = self.drag.as_mut().ok_or(EditorError::InvalidTransition {
            phase: self.phase,
            event: DragEvent::Over.name(),
        })?;
        self.phase = next;
        drag.pending = None;

        let Some(target) = compute_drop_move(&self.tree, &drag.active_id, over_id, below_midpoint) else {
            return Ok(None);
        };
        match target.strategy {
            MoveStrategy::Relocate => {
                let outcome = apply_move(&self.tree, &target)?;
                debug!(
                    node = %target.node_id,
                    container = %outcome.container_id,
                    index = target.to_index,
                    "[DragSession] Previewing relocation"
                );
                drag.highlight = Some(outcome.container_id);
                self.tree = outcome.tree;
            }
            MoveStrategy::Reorder => {
                drag.highlight = self.tree.container_id(&target.to_container);
                drag.pending = Some(target.clone());
            }
        }
        Ok(Some(target))
    }

    /// Drop the dragged node
    ///
    /// Commits when the tree differs from its pre-drag state and returns the
    /// id of the resulting write.
    pub fn drag_end(&mut self) -> Result<Option<WriteId>, EditorError> {
        self.phase = self.phase.next(DragEvent::End)?;
        let Some(drag) = self.drag.take() else {
            self.phase = DragPhase::Idle;
            return Ok(None);
        };

        let result = self.finish_drop(&drag);
        self.phase = self.phase.next(DragEvent::Settle)?;
        result
    }

    fn finish_drop(&mut self, drag: &ActiveDrag) -> Result<Option<WriteId>, EditorError> {
        if let Some(target) = &drag.pending {
            match apply_move(&self.tree, target) {
                Ok(outcome) => self.tree = outcome.tree,
                Err(err) => {
                    warn!(node = %drag.active_id, %err, "[DragSession] Drop failed, restoring pre-drag tree");
                    self.tree = drag.snapshot.clone();
                    return Err(err.into());
                }
            }
        }

        if self.tree == drag.snapshot {
            debug!(node = %drag.active_id, "[DragSession] Dropped in place");
            return Ok(None);
        }
        self.commit_drag(drag).map(Some)
    }

    /// Abort the drag and put the pre-drag tree back
    pub fn drag_cancel(&mut self) -> Result<(), EditorError> {
        self.phase = self.phase.next(DragEvent::Cancel)?;
        if let Some(drag) = self.drag.take() {
            debug!(node = %drag.active_id, "[DragSession] Drag cancelled");
            self.tree = drag.snapshot;
        }
        self.phase = self.phase.next(DragEvent::Settle)?;
        Ok(())
    }

    /// Move `id` one position, crossing containers at the edges
    pub fn step_move(&mut self, id: &BlockId, direction: Direction) -> Result<Option<WriteId>, EditorError> {
        let next = self.phase.next(DragEvent::KeyboardMove)?;
        let Some(target) = compute_step_move(&self.tree, id, direction) else {
            debug!(node = %id, ?direction, "[DragSession] No step move available");
            return Ok(None);
        };

        let outcome = apply_move(&self.tree, &target)?;
        self.phase = next;
        let snapshot = std::mem::replace(&mut self.tree, outcome.tree.clone());
        let write = self.commit(&outcome, snapshot);

        self.phase = self.phase.next(DragEvent::Settle)?;
        Ok(Some(write))
    }

    /// Writes whose container is free, to be performed by the host
    pub fn take_ready_writes(&mut self) -> Vec<WriteRequest> {
        self.queue.take_ready()
    }

    /// Report the store's answer for a write handed out earlier
    pub fn resolve_write(
        &mut self,
        id: WriteId,
        result: Result<(), GatewayError>,
    ) -> Result<WriteResolution, EditorError> {
        let ignored = self.queue.take_ignored(id);
        let write = match self.queue.resolve(id) {
            Ok(write) => write,
            Err(_) if ignored => return Ok(WriteResolution::Ignored),
            Err(err) => return Err(err),
        };
        if ignored {
            debug!(write = %id, "[WriteQueue] Ignoring answer to obsolete write");
            return Ok(WriteResolution::Ignored);
        }

        match result {
            Ok(()) => {
                self.rollback.confirm(id);
                let container_id = &write.request.container_id;
                if container_id == &self.tree.id && !self.queue.has_pending(container_id) {
                    self.tree.reorder_sections(&write.request.ordered_child_ids);
                }

                let mut candidates = write.refresh_sections.clone();
                for section in std::mem::take(&mut self.deferred_refresh) {
                    if !candidates.contains(&section) {
                        candidates.push(section);
                    }
                }
                let (busy, refresh_sections): (Vec<_>, Vec<_>) =
                    candidates.into_iter().partition(|section| self.section_has_pending(section));
                if !busy.is_empty() {
                    debug!(write = %id, deferred = busy.len(), "[WriteQueue] Deferring refresh of busy sections");
                }
                self.deferred_refresh = busy;

                info!(
                    write = %id,
                    container = %write.request.container_id,
                    "[WriteQueue] Ordering saved"
                );
                Ok(WriteResolution::Confirmed { refresh_sections })
            }
            Err(error) => {
                let Some(snapshot) = self.rollback.fail(id) else {
                    return Err(EditorError::UnknownWrite(id));
                };
                let discarded = self.queue.discard_after(snapshot.since);
                for later in &discarded {
                    self.rollback.discard(*later);
                }
                if let Some(drag) = self.drag.take() {
                    warn!(node = %drag.active_id, "[DragSession] Drag aborted by rollback");
                    self.phase = DragPhase::Idle;
                }
                warn!(
                    write = %id,
                    container = %write.request.container_id,
                    %error,
                    discarded = discarded.len(),
                    "[WriteQueue] Ordering rejected, rolling back"
                );
                self.tree = snapshot.tree;
                Ok(WriteResolution::RolledBack { discarded })
            }
        }
    }

    /// Perform every ready write through `gateway` until the queue drains
    pub async fn flush<G>(&mut self, gateway: &G) -> Result<Vec<(WriteId, WriteResolution)>, EditorError>
    where
        G: PersistenceGateway + ?Sized,
    {
        let mut resolutions = Vec::new();
        loop {
            let ready = self.take_ready_writes();
            if ready.is_empty() {
                break;
            }
            let results = join_all(
                ready
                    .iter()
                    .map(|write| gateway.submit(&write.container_id, &write.ordered_child_ids)),
            )
            .await;
            for (write, result) in ready.iter().zip(results) {
                let resolution = self.resolve_write(write.id, result)?;
                resolutions.push((write.id, resolution));
            }
        }
        Ok(resolutions)
    }

    /// Swap in confirmed section copies fetched from the store
    ///
    /// Sections with a write still waiting or in flight keep their optimistic
    /// local copy. Returns how many sections were replaced.
    pub fn replace_sections(&mut self, sections: impl IntoIterator<Item = OutlineNode>) -> Result<usize, EditorError> {
        let (busy, quiet): (Vec<_>, Vec<_>) = sections
            .into_iter()
            .partition(|section| self.section_has_pending(&section.id));
        for section in &busy {
            debug!(section = %section.id, "[WriteQueue] Keeping local copy of busy section");
        }
        Ok(self.tree.replace_sections(quiet)?)
    }

    /// A pending write changes a container inside `section_id`
    fn section_has_pending(&self, section_id: &BlockId) -> bool {
        self.queue.pending_containers().any(|container| {
            container == section_id
                || self
                    .tree
                    .find_container(container)
                    .and_then(|path| self.tree.section_id_of(&path))
                    .as_ref()
                    == Some(section_id)
        })
    }

    /// Replace the tree wholesale, dropping every optimistic state
    pub fn rehydrate(&mut self, tree: OutlineTree) {
        if self.pending_count() > 0 || self.drag.is_some() {
            warn!(
                pending = self.pending_count(),
                "[DragSession] Rehydrating over optimistic state"
            );
        }
        self.tree = tree;
        self.drag = None;
        self.phase = DragPhase::Idle;
        self.queue.clear();
        self.rollback.clear();
        self.deferred_refresh.clear();
    }

    fn commit_drag(&mut self, drag: &ActiveDrag) -> Result<WriteId, EditorError> {
        let node_id = &drag.active_id;
        let (path, _) = self
            .tree
            .get(node_id)
            .ok_or_else(|| EditorError::NodeNotFound(node_id.clone()))?;
        let container = path
            .parent()
            .ok_or_else(|| EditorError::NodeNotFound(node_id.clone()))?;
        let container_id = self
            .tree
            .container_id(&container)
            .ok_or_else(|| EditorError::NodeNotFound(node_id.clone()))?;
        let ordered_child_ids = self
            .tree
            .ordered_child_ids(&container)
            .ok_or_else(|| EditorError::NodeNotFound(node_id.clone()))?;

        let before = drag.snapshot.find(node_id);
        let source_container_id = before
            .as_ref()
            .and_then(|p| p.parent())
            .and_then(|source| drag.snapshot.container_id(&source));

        let mut refresh_sections = Vec::new();
        if !container.is_root() {
            let sections = [
                self.tree.section_id_of(&path),
                before.and_then(|p| drag.snapshot.section_id_of(&p)),
            ];
            for section in sections.into_iter().flatten() {
                if !refresh_sections.contains(&section) {
                    refresh_sections.push(section);
                }
            }
        }

        info!(
            node = %node_id,
            container = %container_id,
            "[DragSession] Drop committed"
        );
        Ok(self.enqueue(
            container_id,
            ordered_child_ids,
            source_container_id,
            refresh_sections,
            drag.snapshot.clone(),
        ))
    }

    fn commit(&mut self, outcome: &MoveOutcome, snapshot: OutlineTree) -> WriteId {
        info!(
            node = %outcome.target.node_id,
            container = %outcome.container_id,
            index = outcome.landed_at.index().unwrap_or_default(),
            "[DragSession] Step move committed"
        );
        self.enqueue(
            outcome.container_id.clone(),
            outcome.ordered_child_ids.clone(),
            outcome.source_container_id.clone(),
            outcome.affected_sections(),
            snapshot,
        )
    }

    fn enqueue(
        &mut self,
        container_id: BlockId,
        ordered_child_ids: Vec<BlockId>,
        source_container_id: Option<BlockId>,
        refresh_sections: Vec<BlockId>,
        snapshot: OutlineTree,
    ) -> WriteId {
        let enqueued = self
            .queue
            .enqueue(container_id, ordered_child_ids, source_container_id, refresh_sections);
        self.rollback.record(enqueued.id, snapshot);
        if let Some(superseded) = enqueued.superseded {
            self.rollback.supersede(superseded, enqueued.id);
        }
        enqueued.id
    }
}
