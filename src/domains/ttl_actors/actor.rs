use super::command::TtlCommand;
use super::manager::TtlQueueManager;
use crate::config::SweeperConfig;
use crate::domains::clock::{SystemClock, TClock};
use crate::domains::queues::TtlHeap;
use std::hash::Hash;
use std::time::Duration;
use tokio::sync::mpsc::{self, Receiver, WeakSender};
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info};

/// Owns a [`TtlHeap`] on its own task. Commands are applied one at a time in arrival order, so
/// the heap never sees concurrent access, and a background task asks for a sweep every
/// `sweep_interval`.
pub struct TtlActor<K, V, C = SystemClock> {
    pub(crate) heap: TtlHeap<K, V, C>,
}

impl<K, V, C> TtlActor<K, V, C>
where
    K: Eq + Hash + Clone + Send + 'static,
    V: Clone + Send + 'static,
    C: TClock + Send + 'static,
{
    pub fn run(config: &SweeperConfig, heap: TtlHeap<K, V, C>) -> TtlQueueManager<K, V> {
        let (outbox, inbox) = mpsc::channel(config.mailbox_size);
        tokio::spawn(Self { heap }.handle(inbox));
        tokio::spawn(Self::background_sweep_actor(config.sweep_interval, outbox.downgrade()));

        TtlQueueManager(outbox)
    }

    // Keeps nudging the actor to drop whatever has expired. Holds only a weak handle so the
    // mailbox closes once the last manager is dropped; ends when the actor is gone.
    async fn background_sweep_actor(
        period: Duration,
        outbox: WeakSender<TtlCommand<K, V>>,
    ) -> anyhow::Result<()> {
        let mut cleanup_interval = interval(period);
        cleanup_interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            cleanup_interval.tick().await;
            let Some(outbox) = outbox.upgrade() else {
                debug!("every ttl queue manager dropped; sweeper exiting");
                return Ok(());
            };
            outbox
                .send(TtlCommand::Sweep)
                .await
                .map_err(|_| anyhow::anyhow!("ttl actor stopped"))?;
        }
    }

    pub(crate) async fn handle(mut self, mut inbox: Receiver<TtlCommand<K, V>>) -> Self {
        info!("ttl actor started");
        while let Some(cmd) = inbox.recv().await {
            match cmd {
                TtlCommand::Add { key, value, ttl, callback } => {
                    callback.send(self.heap.add(key, value, ttl));
                },
                TtlCommand::GetAndRefresh { key, ttl, callback } => {
                    callback.send(self.heap.get_and_refresh(&key, ttl).cloned());
                },
                TtlCommand::Peek { key, callback } => {
                    callback.send(self.heap.peek(&key).cloned());
                },
                TtlCommand::Delete { key, callback } => {
                    callback.send(self.heap.delete(&key));
                },
                TtlCommand::DeleteExpired { as_of, callback } => {
                    callback.send(self.heap.delete_expired(as_of));
                },
                TtlCommand::Sweep => {
                    self.heap.delete_expired_now();
                },
                TtlCommand::Len(callback) => callback.send(self.heap.len()),
                TtlCommand::StopSentinel => break,
            }
        }
        debug!(remaining = self.heap.len(), "ttl actor stopped");
        self
    }
}
