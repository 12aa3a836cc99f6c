use parking_lot::Mutex;
use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::AbortHandle;
use tracing::debug;

/// One-shot delayed tasks keyed by `K`. At most one task is pending per key;
/// a pending task can be cancelled until it starts running.
pub struct DelayedTasks<K> {
    pending: Arc<Mutex<HashMap<K, AbortHandle>>>,
}

impl<K> Default for DelayedTasks<K> {
    fn default() -> Self {
        Self {
            pending: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

impl<K> DelayedTasks<K>
where
    K: Eq + Hash + Clone + std::fmt::Debug + Send + 'static,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Run `task` after `delay`. Returns false, without scheduling, when a
    /// task for `key` is already pending.
    pub fn schedule<F>(&self, key: K, delay: Duration, task: F) -> bool
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let mut pending = self.pending.lock();
        if pending.contains_key(&key) {
            debug!("Task for {:?} already scheduled", key);
            return false;
        }

        let registry = Arc::clone(&self.pending);
        let task_key = key.clone();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            // Once running, the task is no longer cancellable
            registry.lock().remove(&task_key);
            task.await;
        });

        pending.insert(key, handle.abort_handle());
        true
    }

    /// Cancel the pending task for `key`. Returns whether one was pending.
    pub fn cancel(&self, key: &K) -> bool {
        match self.pending.lock().remove(key) {
            Some(handle) => {
                handle.abort();
                debug!("Cancelled scheduled task for {:?}", key);
                true
            }
            None => false,
        }
    }

    pub fn is_pending(&self, key: &K) -> bool {
        self.pending.lock().contains_key(key)
    }

    pub fn pending_count(&self) -> usize {
        self.pending.lock().len()
    }

    /// Abort everything, used on shutdown
    pub fn cancel_all(&self) {
        for (_, handle) in self.pending.lock().drain() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn counter_task(counter: &Arc<AtomicUsize>) -> impl Future<Output = ()> + Send + 'static {
        let counter = Arc::clone(counter);
        async move {
            counter.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[tokio::test]
    async fn test_task_runs_after_delay() {
        let tasks = DelayedTasks::new();
        let counter = Arc::new(AtomicUsize::new(0));

        assert!(tasks.schedule(1u64, Duration::from_millis(20), counter_task(&counter)));
        assert!(tasks.is_pending(&1));
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
        assert!(!tasks.is_pending(&1));
    }

    #[tokio::test]
    async fn test_duplicate_schedule_is_ignored() {
        let tasks = DelayedTasks::new();
        let counter = Arc::new(AtomicUsize::new(0));

        assert!(tasks.schedule(7u64, Duration::from_millis(20), counter_task(&counter)));
        assert!(!tasks.schedule(7u64, Duration::from_millis(20), counter_task(&counter)));
        assert_eq!(tasks.pending_count(), 1);

        tokio::time::sleep(Duration::from_millis(150)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_cancel_prevents_run() {
        let tasks = DelayedTasks::new();
        let counter = Arc::new(AtomicUsize::new(0));

        tasks.schedule(3u64, Duration::from_millis(30), counter_task(&counter));
        assert!(tasks.cancel(&3));
        assert!(!tasks.cancel(&3));

        tokio::time::sleep(Duration::from_millis(120)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);

        // The key is free again
        assert!(tasks.schedule(3u64, Duration::from_millis(1), counter_task(&counter)));
    }

    #[tokio::test]
    async fn test_cancel_all() {
        let tasks = DelayedTasks::new();
        let counter = Arc::new(AtomicUsize::new(0));
        for key in 0..3u64 {
            tasks.schedule(key, Duration::from_millis(30), counter_task(&counter));
        }
        tasks.cancel_all();
        assert_eq!(tasks.pending_count(), 0);

        tokio::time::sleep(Duration::from_millis(120)).await;
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }
}
