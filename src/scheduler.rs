use std::sync::Arc;

use tokio::sync::RwLock;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use crate::analyzer::DexAnalyzer;

/// Drives the analyzer with two independent periodic loops: a frequent
/// analysis refresh and a slower recommended-venue rotation. Each loop can be
/// stopped on its own; stopping only suppresses future ticks, in-flight work
/// runs to completion.
pub struct RefreshScheduler {
    analyzer: Arc<DexAnalyzer>,
    analysis_running: Arc<RwLock<bool>>,
    rotation_running: Arc<RwLock<bool>>,
}

impl RefreshScheduler {
    pub fn new(analyzer: Arc<DexAnalyzer>) -> Self {
        Self {
            analyzer,
            analysis_running: Arc::new(RwLock::new(false)),
            rotation_running: Arc::new(RwLock::new(false)),
        }
    }

    pub async fn start(&self) {
        self.start_analysis().await;
        self.start_rotation().await;
    }

    /// Starts the analysis loop. The first refresh runs immediately so the
    /// store fills without waiting a full interval. Overlapping ticks are
    /// dropped by the analyzer's refresh guard.
    pub async fn start_analysis(&self) {
        let mut running = self.analysis_running.write().await;
        if *running {
            warn!("analysis loop is already running");
            return;
        }
        *running = true;
        drop(running);

        let interval = self.analyzer.config().analysis_interval;
        info!("starting analysis loop with {:?} interval", interval);

        let analyzer = Arc::clone(&self.analyzer);
        let running = Arc::clone(&self.analysis_running);
        tokio::spawn(async move {
            loop {
                {
                    let run = running.read().await;
                    if !*run {
                        info!("analysis loop stopped");
                        break;
                    }
                }

                if !analyzer.refresh().await {
                    debug!("analysis tick dropped, refresh still in flight");
                }
                sleep(interval).await;
            }
        });
    }

    /// Starts the rotation loop. Sleeps a full interval before the first
    /// rotation; the initial recommendation set at construction stands until
    /// then.
    pub async fn start_rotation(&self) {
        let mut running = self.rotation_running.write().await;
        if *running {
            warn!("rotation loop is already running");
            return;
        }
        *running = true;
        drop(running);

        let interval = self.analyzer.config().rotation_interval;
        info!("starting rotation loop with {:?} interval", interval);

        let analyzer = Arc::clone(&self.analyzer);
        let running = Arc::clone(&self.rotation_running);
        tokio::spawn(async move {
            loop {
                sleep(interval).await;

                {
                    let run = running.read().await;
                    if !*run {
                        info!("rotation loop stopped");
                        break;
                    }
                }

                analyzer.rotate_recommended().await;
            }
        });
    }

    pub async fn stop(&self) {
        self.stop_analysis().await;
        self.stop_rotation().await;
    }

    pub async fn stop_analysis(&self) {
        *self.analysis_running.write().await = false;
        info!("analysis loop stop requested");
    }

    pub async fn stop_rotation(&self) {
        *self.rotation_running.write().await = false;
        info!("rotation loop stop requested");
    }

    pub async fn is_running(&self) -> bool {
        *self.analysis_running.read().await || *self.rotation_running.read().await
    }
}
