use super::command::TtlCommand;
use crate::domains::error::ActorError;
use crate::types::Callback;
use chrono::{DateTime, Utc};
use std::time::Duration;
use tokio::sync::mpsc::Sender;

/// Cloneable handle to a running [`TtlActor`](super::TtlActor).
pub struct TtlQueueManager<K, V>(pub(crate) Sender<TtlCommand<K, V>>);

impl<K, V> Clone for TtlQueueManager<K, V> {
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<K, V> TtlQueueManager<K, V> {
    pub async fn add(&self, key: K, value: V, ttl: Duration) -> Result<Option<V>, ActorError> {
        let (callback, rx) = Callback::create();
        self.0.send(TtlCommand::Add { key, value, ttl, callback }).await?;
        rx.recv().await
    }

    /// Same read-with-touch contract as [`TtlHeap::get_and_refresh`](crate::TtlHeap::get_and_refresh).
    pub async fn get_and_refresh(&self, key: K, ttl: Duration) -> Result<Option<V>, ActorError> {
        let (callback, rx) = Callback::create();
        self.0.send(TtlCommand::GetAndRefresh { key, ttl, callback }).await?;
        rx.recv().await
    }

    pub async fn peek(&self, key: K) -> Result<Option<V>, ActorError> {
        let (callback, rx) = Callback::create();
        self.0.send(TtlCommand::Peek { key, callback }).await?;
        rx.recv().await
    }

    pub async fn delete(&self, key: K) -> Result<Option<V>, ActorError> {
        let (callback, rx) = Callback::create();
        self.0.send(TtlCommand::Delete { key, callback }).await?;
        rx.recv().await
    }

    pub async fn delete_expired(&self, as_of: DateTime<Utc>) -> Result<usize, ActorError> {
        let (callback, rx) = Callback::create();
        self.0.send(TtlCommand::DeleteExpired { as_of, callback }).await?;
        rx.recv().await
    }

    pub async fn len(&self) -> Result<usize, ActorError> {
        let (callback, rx) = Callback::create();
        self.0.send(TtlCommand::Len(callback)).await?;
        rx.recv().await
    }

    /// Asks the actor to stop. Commands queued before this one are still applied.
    pub async fn stop(&self) -> Result<(), ActorError> {
        self.0.send(TtlCommand::StopSentinel).await?;
        Ok(())
    }
}
