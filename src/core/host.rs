//! Host lifecycle integration for deferred completion
//!
//! Serverless hosts may freeze or tear down the process once a response has
//! been returned. Hosts that offer a "keep running after response" call are
//! modelled by [`WaitUntil`]; the logger registers each delivery with it
//! instead of awaiting the delivery itself.

use async_trait::async_trait;
use futures_util::future::BoxFuture;
use std::fmt;
use std::sync::Arc;

/// Host capability that keeps a background task alive past the response
///
/// # Example
///
/// ```
/// use async_trait::async_trait;
/// use futures_util::future::BoxFuture;
/// use loki_batch_logger::WaitUntil;
/// use std::sync::Mutex;
///
/// /// Collects deliveries and drives them after the response is sent
/// struct AfterResponse {
///     pending: Mutex<Vec<BoxFuture<'static, ()>>>,
/// }
///
/// #[async_trait]
/// impl WaitUntil for AfterResponse {
///     async fn wait_until(&self, task: BoxFuture<'static, ()>) {
///         self.pending.lock().unwrap().push(task);
///     }
/// }
/// ```
#[async_trait]
pub trait WaitUntil: Send + Sync {
    /// Register `task`; resolves once the host has accepted it
    async fn wait_until(&self, task: BoxFuture<'static, ()>);
}

/// Hook that spawns each delivery on the current tokio runtime
///
/// `flush` then returns as soon as the batch is handed off. Requires a
/// running tokio runtime when `flush` is polled.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSpawn;

#[async_trait]
impl WaitUntil for TokioSpawn {
    async fn wait_until(&self, task: BoxFuture<'static, ()>) {
        tokio::spawn(task);
    }
}

/// Execution environment the logger runs in, chosen at construction
#[derive(Clone, Default)]
pub enum HostLifecycle {
    /// `flush` awaits delivery itself
    #[default]
    None,
    /// `flush` hands delivery to the host and returns after registration
    WaitUntil(Arc<dyn WaitUntil>),
}

impl HostLifecycle {
    pub fn wait_until<W: WaitUntil + 'static>(hook: W) -> Self {
        HostLifecycle::WaitUntil(Arc::new(hook))
    }

    pub fn has_hook(&self) -> bool {
        matches!(self, HostLifecycle::WaitUntil(_))
    }

    /// Run `delivery` under this lifecycle
    pub(crate) async fn complete(&self, delivery: BoxFuture<'static, ()>) {
        match self {
            HostLifecycle::None => delivery.await,
            HostLifecycle::WaitUntil(hook) => hook.wait_until(delivery).await,
        }
    }
}

impl fmt::Debug for HostLifecycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HostLifecycle::None => write!(f, "HostLifecycle::None"),
            HostLifecycle::WaitUntil(_) => write!(f, "HostLifecycle::WaitUntil(..)"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicBool, Ordering};

    struct CollectingHost {
        tasks: Mutex<Vec<BoxFuture<'static, ()>>>,
    }

    #[async_trait]
    impl WaitUntil for CollectingHost {
        async fn wait_until(&self, task: BoxFuture<'static, ()>) {
            self.tasks.lock().push(task);
        }
    }

    #[tokio::test]
    async fn test_none_runs_delivery_inline() {
        let ran = Arc::new(AtomicBool::new(false));
        let ran_clone = Arc::clone(&ran);

        HostLifecycle::None
            .complete(Box::pin(async move {
                ran_clone.store(true, Ordering::SeqCst);
            }))
            .await;

        assert!(ran.load(Ordering::SeqCst));
    }

    #[tokio::test]
    async fn test_tokio_spawn_runs_in_background() {
        let (tx, rx) = tokio::sync::oneshot::channel();
        HostLifecycle::wait_until(TokioSpawn)
            .complete(Box::pin(async move {
                let _ = tx.send(7);
            }))
            .await;
        assert_eq!(rx.await.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_hook_receives_delivery() {
        let host = Arc::new(CollectingHost {
            tasks: Mutex::new(Vec::new()),
        });
        let lifecycle = HostLifecycle::WaitUntil(host.clone());
        assert!(lifecycle.has_hook());

        let ran = Arc::new(AtomicBool::new(false));
        let ran_clone = Arc::clone(&ran);
        lifecycle
            .complete(Box::pin(async move {
                ran_clone.store(true, Ordering::SeqCst);
            }))
            .await;

        // Registered but not yet driven by the host
        assert!(!ran.load(Ordering::SeqCst));
        let task = host.tasks.lock().pop().expect("task registered");
        task.await;
        assert!(ran.load(Ordering::SeqCst));
    }
}
