//! Task manager for the async fetches.
//!
//! Each fetch runs as a tokio task identified by a [`TaskKey`]. Tasks with
//! the same key are mutually exclusive: spawning a new one aborts the
//! predecessor, so at most one request per endpoint is in flight. An aborted
//! task never sends its settle action; anything that still slips through is
//! discarded by the reducer's key check.

use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::{AbortHandle, JoinHandle};

use crate::action::Action;

/// Identifies a task for cancellation and replacement.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct TaskKey(String);

impl TaskKey {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl From<&'static str> for TaskKey {
    fn from(s: &'static str) -> Self {
        Self::new(s)
    }
}

impl From<String> for TaskKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Manages fetch task lifecycle with automatic same-key cancellation.
///
/// Completed tasks send their resulting [`Action`] back to the main loop over
/// the action channel.
pub struct TaskManager {
    tasks: HashMap<TaskKey, AbortHandle>,
    action_tx: mpsc::UnboundedSender<Action>,
}

impl TaskManager {
    pub fn new(action_tx: mpsc::UnboundedSender<Action>) -> Self {
        Self {
            tasks: HashMap::new(),
            action_tx,
        }
    }

    /// Spawn a task, aborting any existing task with the same key.
    ///
    /// The future resolves to the action to dispatch when the task settles.
    /// If the task is aborted before completion, no action is sent.
    pub fn spawn<F>(&mut self, key: impl Into<TaskKey>, future: F) -> &mut Self
    where
        F: Future<Output = Action> + Send + 'static,
    {
        let key = key.into();
        self.cancel(&key);

        let tx = self.action_tx.clone();
        let handle: JoinHandle<()> = tokio::spawn(async move {
            let action = future.await;
            let _ = tx.send(action);
        });

        self.tasks.insert(key, handle.abort_handle());
        self
    }

    /// Spawn with debounce - waits for `duration` before executing.
    ///
    /// Re-spawning the same key before the duration expires aborts the
    /// predecessor and resets the timer, so a burst of coordinate nudges
    /// collapses into a single request.
    pub fn debounce<F>(
        &mut self,
        key: impl Into<TaskKey>,
        duration: Duration,
        future: F,
    ) -> &mut Self
    where
        F: Future<Output = Action> + Send + 'static,
    {
        let key = key.into();
        self.cancel(&key);

        let tx = self.action_tx.clone();
        let handle: JoinHandle<()> = tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            let action = future.await;
            let _ = tx.send(action);
        });

        self.tasks.insert(key, handle.abort_handle());
        self
    }

    /// Abort a task by key. No-op when nothing is running under it.
    pub fn cancel(&mut self, key: &TaskKey) {
        if let Some(handle) = self.tasks.remove(key) {
            handle.abort();
        }
    }

    /// Abort all running tasks (shutdown).
    pub fn cancel_all(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }

    pub fn is_running(&self, key: &TaskKey) -> bool {
        self.tasks.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

impl Drop for TaskManager {
    fn drop(&mut self) {
        for (_, handle) in self.tasks.drain() {
            handle.abort();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn spawn_sends_the_settle_action() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        tasks.spawn("alerts", async { Action::AlertsFetch });

        let action = tokio::time::timeout(Duration::from_millis(100), rx.recv())
            .await
            .expect("timeout")
            .expect("channel closed");
        assert_eq!(action, Action::AlertsFetch);
    }

    #[tokio::test]
    async fn same_key_spawn_aborts_the_predecessor() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        tasks.spawn("gridpoint", async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            Action::LatitudeSet(1.0)
        });
        tasks.spawn("gridpoint", async { Action::LatitudeSet(2.0) });

        let action = tokio::time::timeout(Duration::from_millis(200), rx.recv())
            .await
            .expect("timeout")
            .expect("channel closed");
        assert_eq!(action, Action::LatitudeSet(2.0));

        // The aborted task must never settle.
        let extra = tokio::time::timeout(Duration::from_millis(150), rx.recv()).await;
        assert!(extra.is_err());
    }

    #[tokio::test]
    async fn debounce_coalesces_bursts() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        tasks.debounce("gridpoint", Duration::from_millis(50), async {
            Action::LatitudeSet(1.0)
        });
        tokio::time::sleep(Duration::from_millis(20)).await;
        tasks.debounce("gridpoint", Duration::from_millis(50), async {
            Action::LatitudeSet(2.0)
        });

        let action = tokio::time::timeout(Duration::from_millis(200), rx.recv())
            .await
            .expect("timeout")
            .expect("channel closed");
        assert_eq!(action, Action::LatitudeSet(2.0));
    }

    #[tokio::test]
    async fn cancel_prevents_settlement() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        tasks.spawn("forecast", async {
            tokio::time::sleep(Duration::from_millis(100)).await;
            Action::Refresh
        });
        assert!(tasks.is_running(&TaskKey::new("forecast")));

        tasks.cancel(&TaskKey::new("forecast"));
        assert!(!tasks.is_running(&TaskKey::new("forecast")));

        let result = tokio::time::timeout(Duration::from_millis(150), rx.recv()).await;
        assert!(result.is_err() || result.unwrap().is_none());
    }

    #[tokio::test]
    async fn cancel_all_drains_the_registry() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let mut tasks = TaskManager::new(tx);

        tasks.spawn("a", async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Action::Tick
        });
        tasks.spawn("b", async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Action::Tick
        });
        assert_eq!(tasks.len(), 2);

        tasks.cancel_all();
        assert!(tasks.is_empty());
    }
}
