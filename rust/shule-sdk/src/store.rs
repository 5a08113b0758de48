//! Authoritative client-side copy of one entity collection.
//!
//! The store fetches the full collection on screen mount, then patches
//! itself from each mutation's own echoed response. Removal waits for
//! backend confirmation; nothing is removed optimistically.

use crate::entity::{EntityId, Resource};
use crate::error::ClientError;
use crate::transport::{FormField, Method, RequestBody, Transport};
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    Loaded,
    Created,
    Updated,
    Removed,
}

/// Broadcast after every successful store mutation so views re-derive.
#[derive(Debug, Clone)]
pub struct StoreEvent {
    pub op: StoreOp,
    pub id: Option<EntityId>,
}

pub struct ResourceStore<T: Resource> {
    rows: Arc<RwLock<Vec<T>>>,
    transport: Arc<dyn Transport>,
    events_tx: broadcast::Sender<StoreEvent>,
}

impl<T: Resource> ResourceStore<T> {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        let (events_tx, _) = broadcast::channel(1000);
        Self {
            rows: Arc::new(RwLock::new(Vec::new())),
            transport,
            events_tx,
        }
    }

    pub fn transport(&self) -> Arc<dyn Transport> {
        self.transport.clone()
    }

    /// Fetches the full collection without touching local state. Screens
    /// pair this with [`replace`](Self::replace) so a response landing
    /// after unmount can be discarded instead of applied.
    pub async fn fetch(&self) -> Result<Vec<T>, ClientError> {
        let value = self
            .transport
            .request(Method::Get, T::ENDPOINT, RequestBody::Empty)
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    /// Replaces the contents wholesale.
    pub async fn replace(&self, rows: Vec<T>) {
        let count = rows.len();
        *self.rows.write().await = rows;
        tracing::debug!("{}: replaced with {} rows", T::ENDPOINT, count);
        let _ = self.events_tx.send(StoreEvent {
            op: StoreOp::Loaded,
            id: None,
        });
    }

    /// Full refetch-and-replace. Re-callable as a manual refresh.
    ///
    /// A mutation resolving after a concurrent `load` wins in the local
    /// sequence; there is no sequence-number guard, so the orderings are
    /// whatever the network delivers. The backend is ground truth on the
    /// next load.
    pub async fn load(&self) -> Result<usize, ClientError> {
        let rows = self.fetch().await?;
        let count = rows.len();
        self.replace(rows).await;
        Ok(count)
    }

    /// POSTs a draft; the echoed entity is appended at the end of the
    /// sequence (arrival order, never re-sorted).
    pub async fn create(&self, draft: Value) -> Result<T, ClientError> {
        let value = self
            .transport
            .request(Method::Post, T::ENDPOINT, RequestBody::Json(draft))
            .await?;
        self.absorb_created(value).await
    }

    /// Multipart variant of [`create`](Self::create) for resources saved
    /// with uploads.
    pub async fn create_multipart(&self, fields: Vec<FormField>) -> Result<T, ClientError> {
        let value = self
            .transport
            .request(Method::Post, T::ENDPOINT, RequestBody::Multipart(fields))
            .await?;
        self.absorb_created(value).await
    }

    async fn absorb_created(&self, value: Value) -> Result<T, ClientError> {
        let created: T = serde_json::from_value(value)?;
        self.rows.write().await.push(created.clone());
        tracing::debug!("{}: created {}", T::ENDPOINT, created.id());
        let _ = self.events_tx.send(StoreEvent {
            op: StoreOp::Created,
            id: Some(created.id()),
        });
        Ok(created)
    }

    /// PUTs a draft against one id; the echoed entity replaces its match
    /// in place (position unchanged). An id absent from the local
    /// sequence is a tolerated no-op: nothing changes locally, and the
    /// echoed entity is still returned so the caller can surface it.
    pub async fn update(&self, id: &EntityId, draft: Value) -> Result<T, ClientError> {
        let path = format!("{}/{}", T::ENDPOINT, id);
        let value = self
            .transport
            .request(Method::Put, &path, RequestBody::Json(draft))
            .await?;
        self.absorb_updated(value).await
    }

    /// Multipart variant of [`update`](Self::update).
    pub async fn update_multipart(
        &self,
        id: &EntityId,
        fields: Vec<FormField>,
    ) -> Result<T, ClientError> {
        let path = format!("{}/{}", T::ENDPOINT, id);
        let value = self
            .transport
            .request(Method::Put, &path, RequestBody::Multipart(fields))
            .await?;
        self.absorb_updated(value).await
    }

    async fn absorb_updated(&self, value: Value) -> Result<T, ClientError> {
        let updated: T = serde_json::from_value(value)?;
        let id = updated.id();
        let mut rows = self.rows.write().await;
        let slot = rows.iter_mut().find(|row| row.id() == id);
        let patched = match slot {
            Some(slot) => {
                *slot = updated.clone();
                true
            }
            None => false,
        };
        drop(rows);
        if patched {
            let _ = self.events_tx.send(StoreEvent {
                op: StoreOp::Updated,
                id: Some(id),
            });
        } else {
            tracing::debug!("{}: update echo for absent id {}", T::ENDPOINT, id);
        }
        Ok(updated)
    }

    /// DELETEs one id and removes the match only after the backend
    /// acknowledges. An absent id changes nothing.
    pub async fn remove(&self, id: &EntityId) -> Result<(), ClientError> {
        let path = format!("{}/{}", T::ENDPOINT, id);
        self.transport
            .request(Method::Delete, &path, RequestBody::Empty)
            .await?;
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|row| row.id() != *id);
        let removed = rows.len() != before;
        drop(rows);
        if removed {
            let _ = self.events_tx.send(StoreEvent {
                op: StoreOp::Removed,
                id: Some(id.clone()),
            });
        }
        Ok(())
    }

    pub async fn snapshot(&self) -> Vec<T> {
        self.rows.read().await.clone()
    }

    pub async fn get(&self, id: &EntityId) -> Option<T> {
        self.rows.read().await.iter().find(|row| row.id() == *id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }

    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events_tx.subscribe()
    }
}

impl<T: Resource> Clone for ResourceStore<T> {
    fn clone(&self) -> Self {
        Self {
            rows: self.rows.clone(),
            transport: self.transport.clone(),
            events_tx: self.events_tx.clone(),
        }
    }
}
