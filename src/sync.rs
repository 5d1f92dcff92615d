//! Fire-and-forget persistence.
//!
//! Local state is updated before a write is handed to the [`Writer`]; the
//! outcome of the write is only ever reported, never applied back.

use std::{
    future::Future,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
};

use parking_lot::Mutex;
use tokio::task::JoinSet;
use tracing::{error, info};

use crate::error::Result;

#[derive(Debug, Default)]
pub struct Writer {
    pending: Mutex<JoinSet<()>>,
    failures: Arc<AtomicUsize>,
}

impl Writer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `write` on the runtime and return immediately.
    ///
    /// Writes start in call order; their completion order is up to the store.
    /// A failure is logged and counted, nothing else.
    pub fn spawn<F>(&self, what: impl Into<String>, write: F)
    where
        F: Future<Output = Result<()>> + Send + 'static,
    {
        let what = what.into();
        let failures = self.failures.clone();
        let mut pending = self.pending.lock();
        // reap finished writes
        while pending.try_join_next().is_some() {}
        pending.spawn(async move {
            match write.await {
                Ok(()) => info!("{} persisted", what),
                Err(e) => {
                    failures.fetch_add(1, Ordering::Relaxed);
                    error!("{} failed: {}", what, e);
                }
            }
        });
    }

    /// Resolves once every write spawned so far has finished.
    ///
    /// The writes are detached from the writer right away, so the returned
    /// future borrows nothing. Dropping it unpolled aborts them.
    pub fn flush(&self) -> impl Future<Output = ()> + Send + 'static {
        let mut pending = std::mem::take(&mut *self.pending.lock());
        async move { while pending.join_next().await.is_some() {} }
    }

    /// Number of writes that have failed since start.
    pub fn failures(&self) -> usize {
        self.failures.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::Error,
        store::{Collection, StoreOp},
    };

    #[tokio::test]
    async fn test_failures_are_counted_not_raised() {
        let writer = Writer::new();
        writer.spawn("save doubt d1", async { Ok(()) });
        writer.spawn("save doubt d2", async {
            Err(Error::persistence(
                Collection::Doubts,
                StoreOp::Set,
                anyhow::anyhow!("unreachable"),
            ))
        });
        writer.spawn("save doubt d3", async { Ok(()) });
        writer.flush().await;
        assert_eq!(writer.failures(), 1);
    }

    #[tokio::test]
    async fn test_flush_waits_for_slow_writes() {
        let writer = Writer::new();
        let done = Arc::new(AtomicUsize::new(0));
        for i in 0..4u64 {
            let done = done.clone();
            writer.spawn(format!("write {i}"), async move {
                tokio::time::sleep(std::time::Duration::from_millis(5 * (4 - i))).await;
                done.fetch_add(1, Ordering::SeqCst);
                Ok(())
            });
        }
        writer.flush().await;
        assert_eq!(done.load(Ordering::SeqCst), 4);
        writer.flush().await;
    }
}
