//! Binding registry - in-memory index over the durable state
//!
//! The registry exclusively owns the in-memory binding sets and is the
//! single writer to the store. Mutations snapshot the full state under
//! the write lock and hand it to a dedicated persist task over a FIFO
//! channel, so saves always apply in mutation order. A failed or timed
//! out save is logged and the in-memory state stays authoritative.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{mpsc, oneshot, RwLock};

use crate::application::errors::RegistryError;
use crate::domain::entities::{Binding, FullState};
use crate::domain::traits::BindingStore;

type PersistMsg = (FullState, Option<oneshot::Sender<()>>);

pub struct Registry {
    bindings: Arc<RwLock<FullState>>,
    persist_tx: mpsc::UnboundedSender<PersistMsg>,
}

impl Registry {
    /// Create a registry persisting to `store`. Must be called inside a
    /// tokio runtime; the persist task is spawned here.
    pub fn new(store: Arc<dyn BindingStore>, save_timeout: Duration) -> Self {
        let (persist_tx, persist_rx) = mpsc::unbounded_channel();
        tokio::spawn(persist_loop(store, persist_rx, save_timeout));

        Self {
            bindings: Arc::new(RwLock::new(BTreeMap::new())),
            persist_tx,
        }
    }

    /// Replace the in-memory content wholesale from a store load.
    /// Called once at startup; does not persist.
    pub async fn rehydrate(&self, state: FullState) {
        let mut bindings = self.bindings.write().await;
        *bindings = state;
    }

    /// Register a binding. Fails when its (scope, anchor, trigger) key is
    /// already present; otherwise appends to the anchor's set in display
    /// order and schedules a persist.
    pub async fn add(&self, binding: Binding) -> Result<(), RegistryError> {
        let mut bindings = self.bindings.write().await;

        let anchors = bindings.entry(binding.scope_id.clone()).or_default();
        let set = anchors.entry(binding.anchor_id.clone()).or_default();
        if set.iter().any(|b| b.trigger_id == binding.trigger_id) {
            return Err(RegistryError::Duplicate {
                scope_id: binding.scope_id,
                anchor_id: binding.anchor_id,
                trigger_id: binding.trigger_id,
            });
        }
        set.push(binding);

        self.schedule_persist(&bindings);
        Ok(())
    }

    /// Remove a binding, returning it. Empty anchor and scope containers
    /// are dropped so the serialized form stays tidy.
    pub async fn remove(
        &self,
        scope_id: &str,
        anchor_id: &str,
        trigger_id: &str,
    ) -> Result<Binding, RegistryError> {
        let not_found = || RegistryError::NotFound {
            anchor_id: anchor_id.to_string(),
            trigger_id: trigger_id.to_string(),
        };

        let mut bindings = self.bindings.write().await;

        let anchors = bindings.get_mut(scope_id).ok_or_else(not_found)?;
        let set = anchors.get_mut(anchor_id).ok_or_else(not_found)?;
        let pos = set
            .iter()
            .position(|b| b.trigger_id == trigger_id)
            .ok_or_else(not_found)?;
        let removed = set.remove(pos);

        if set.is_empty() {
            anchors.remove(anchor_id);
        }
        if anchors.is_empty() {
            bindings.remove(scope_id);
        }

        self.schedule_persist(&bindings);
        Ok(removed)
    }

    /// Pure read: find the binding a trigger activation refers to.
    /// Anchor identifiers are unique across scopes on every platform this
    /// models, so no scope argument is needed.
    pub async fn lookup(&self, anchor_id: &str, trigger_id: &str) -> Option<Binding> {
        let bindings = self.bindings.read().await;
        bindings
            .values()
            .filter_map(|anchors| anchors.get(anchor_id))
            .flat_map(|set| set.iter())
            .find(|b| b.trigger_id == trigger_id)
            .cloned()
    }

    /// All bindings of an anchor in insertion (display) order; empty when
    /// the anchor is unknown.
    pub async fn list_by_anchor(&self, anchor_id: &str) -> Vec<Binding> {
        let bindings = self.bindings.read().await;
        bindings
            .values()
            .filter_map(|anchors| anchors.get(anchor_id))
            .next()
            .cloned()
            .unwrap_or_default()
    }

    /// Copy of the full in-memory state.
    pub async fn snapshot(&self) -> FullState {
        self.bindings.read().await.clone()
    }

    /// Total number of bindings across all scopes.
    pub async fn len(&self) -> usize {
        let bindings = self.bindings.read().await;
        bindings
            .values()
            .flat_map(|anchors| anchors.values())
            .map(|set| set.len())
            .sum()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Wait until every persist scheduled so far has been attempted.
    /// Useful before shutdown and in tests; the FIFO channel guarantees
    /// earlier snapshots are written first.
    pub async fn flush(&self) {
        let (ack_tx, ack_rx) = oneshot::channel();
        let state = self.bindings.read().await.clone();
        if self.persist_tx.send((state, Some(ack_tx))).is_ok() {
            let _ = ack_rx.await;
        }
    }

    fn schedule_persist(&self, state: &FullState) {
        if self.persist_tx.send((state.clone(), None)).is_err() {
            tracing::warn!("Persist task is gone; keeping state in memory only");
        }
    }
}

async fn persist_loop(
    store: Arc<dyn BindingStore>,
    mut rx: mpsc::UnboundedReceiver<PersistMsg>,
    save_timeout: Duration,
) {
    while let Some((state, ack)) = rx.recv().await {
        match tokio::time::timeout(save_timeout, store.save(&state)).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => {
                tracing::warn!("Persist failed, serving from memory: {}", e);
            }
            Err(_) => {
                tracing::warn!("Persist timed out after {:?}, serving from memory", save_timeout);
            }
        }
        if let Some(ack) = ack {
            let _ = ack.send(());
        }
    }
}
