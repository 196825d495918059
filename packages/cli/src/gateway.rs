//! Outline index file standing in for the content store.

use async_trait::async_trait;
use outline_editor::{GatewayError, PersistenceGateway};
use outline_model::{BlockId, OutlineNode, OutlineTree};
use std::path::{Path, PathBuf};
use tokio::sync::Mutex;
use tracing::{debug, info};

pub struct FileGateway {
    path: PathBuf,
    pretty: bool,
    /// Serializes read-modify-write cycles on the file
    lock: Mutex<()>,
}

impl FileGateway {
    pub fn new(path: impl Into<PathBuf>, pretty: bool) -> Self {
        Self {
            path: path.into(),
            pretty,
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<OutlineTree, GatewayError> {
        let json = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| GatewayError::Unavailable(format!("{}: {}", self.path.display(), e)))?;
        OutlineTree::from_outline_index(&json).map_err(|e| GatewayError::Rejected(e.to_string()))
    }

    async fn save(&self, tree: &OutlineTree) -> Result<(), GatewayError> {
        let json = tree
            .to_outline_index_json(self.pretty)
            .map_err(|e| GatewayError::Rejected(e.to_string()))?;
        tokio::fs::write(&self.path, json)
            .await
            .map_err(|e| GatewayError::Unavailable(format!("{}: {}", self.path.display(), e)))
    }

    /// Current copies of the given sections, in the order they were asked for
    pub async fn fetch_sections(&self, ids: &[BlockId]) -> Result<Vec<OutlineNode>, GatewayError> {
        let tree = self.load().await?;
        let sections = ids
            .iter()
            .filter_map(|id| tree.sections().iter().find(|s| &s.id == id))
            .map(|section| section.as_ref().clone())
            .collect();
        Ok(sections)
    }
}

#[async_trait]
impl PersistenceGateway for FileGateway {
    async fn submit(&self, container_id: &BlockId, ordered_child_ids: &[BlockId]) -> Result<(), GatewayError> {
        let _guard = self.lock.lock().await;

        let mut tree = self.load().await?;
        tree.set_child_order(container_id, ordered_child_ids)
            .map_err(|e| GatewayError::Rejected(e.to_string()))?;
        debug!(container = %container_id, children = ordered_child_ids.len(), "[FileGateway] Writing ordering");
        self.save(&tree).await?;

        info!(container = %container_id, path = %self.path.display(), "[FileGateway] Ordering stored");
        Ok(())
    }
}
