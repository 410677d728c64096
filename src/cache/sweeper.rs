//! Background eviction of expired cache entries
//!
//! Reads never return expired data regardless of this task; the sweeper only
//! reclaims memory held by entries nobody asked for again.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, info};

use super::store::CacheStore;

/// Configuration for the sweep loop
#[derive(Debug, Clone)]
pub struct SweepConfig {
    /// Interval between sweeps
    pub interval: Duration,
    /// Whether the sweeper runs at all
    pub enabled: bool,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(60),
            enabled: true,
        }
    }
}

/// Handle for stopping the background sweeper
pub struct SweepHandle {
    shutdown_tx: mpsc::Sender<()>,
    task: Option<tokio::task::JoinHandle<()>>,
}

impl SweepHandle {
    /// Spawns the sweep task on the current tokio runtime
    ///
    /// With `enabled = false` nothing is spawned and the handle is inert.
    pub fn spawn(store: Arc<CacheStore>, config: SweepConfig) -> Self {
        let (shutdown_tx, mut shutdown_rx) = mpsc::channel::<()>(1);

        if !config.enabled {
            return Self {
                shutdown_tx,
                task: None,
            };
        }

        let task = tokio::spawn(async move {
            let mut interval = tokio::time::interval(config.interval);
            // Skip the first tick (immediate)
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        let evicted = store.purge_expired();
                        if evicted > 0 {
                            info!(evicted, "swept expired cache entries");
                        } else {
                            debug!("cache sweep found nothing to evict");
                        }
                    }
                    _ = shutdown_rx.recv() => {
                        break;
                    }
                }
            }
        });

        Self {
            shutdown_tx,
            task: Some(task),
        }
    }

    /// Whether a sweep task was spawned
    pub fn is_running(&self) -> bool {
        self.task.as_ref().is_some_and(|task| !task.is_finished())
    }

    /// Stops the sweep task and waits for it to exit
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
        if let Some(task) = self.task {
            let _ = task.await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_sweep_config_default() {
        let config = SweepConfig::default();
        assert_eq!(config.interval, Duration::from_secs(60));
        assert!(config.enabled);
    }

    #[tokio::test]
    async fn test_disabled_sweeper_spawns_nothing() {
        let store = Arc::new(CacheStore::new());
        let handle = SweepHandle::spawn(
            store,
            SweepConfig {
                enabled: false,
                ..Default::default()
            },
        );

        assert!(!handle.is_running());
        handle.shutdown().await;
    }

    #[tokio::test]
    async fn test_sweeper_evicts_expired_entries() {
        let store = Arc::new(CacheStore::new());
        store.set("livescores:inplay", json!([]), Duration::from_millis(10));
        store.set("team:1", json!(1), Duration::from_secs(3600));

        let handle = SweepHandle::spawn(
            store.clone(),
            SweepConfig {
                interval: Duration::from_millis(20),
                enabled: true,
            },
        );
        assert!(handle.is_running());

        tokio::time::sleep(Duration::from_millis(100)).await;
        handle.shutdown().await;

        // Nothing left for a manual purge if the sweeper already ran
        assert_eq!(store.purge_expired(), 0);
        assert_eq!(store.list_keys(), vec!["team:1".to_string()]);
    }
}
