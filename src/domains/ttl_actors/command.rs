use crate::types::Callback;
use chrono::{DateTime, Utc};
use std::time::Duration;

pub(crate) enum TtlCommand<K, V> {
    Add { key: K, value: V, ttl: Duration, callback: Callback<Option<V>> },
    GetAndRefresh { key: K, ttl: Duration, callback: Callback<Option<V>> },
    Peek { key: K, callback: Callback<Option<V>> },
    Delete { key: K, callback: Callback<Option<V>> },
    DeleteExpired { as_of: DateTime<Utc>, callback: Callback<usize> },
    // sent by the background sweeper, evaluated against the heap's own clock
    Sweep,
    Len(Callback<usize>),
    StopSentinel,
}
