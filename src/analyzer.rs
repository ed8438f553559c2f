use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use futures::future;
use rand::Rng;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, warn};

use crate::connector::VenueConnector;
use crate::registry::VenueRegistry;
use crate::scoring;
use crate::store::AnalysisStore;
use crate::types::{AnalysisRecord, AnalyzerError, VenueConfig};

#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    pub analysis_interval: Duration,
    pub rotation_interval: Duration,
    /// Half-width of the random perturbation applied to each score, in
    /// percentage points. Zero disables the noise for deterministic runs.
    pub market_variation_band: f64,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            analysis_interval: Duration::from_secs(30),
            rotation_interval: Duration::from_secs(3600),
            market_variation_band: 0.5,
        }
    }
}

/// Maintains ranked profitability snapshots across all active venues and
/// designates exactly one of them as recommended.
///
/// An explicit object with a caller-owned lifecycle: nothing is spawned at
/// construction, the [`crate::scheduler::RefreshScheduler`] drives it.
pub struct DexAnalyzer {
    registry: VenueRegistry,
    store: AnalysisStore,
    connector: Arc<dyn VenueConnector>,
    config: AnalyzerConfig,
    current_recommended: RwLock<Option<String>>,
    last_rotation: RwLock<Option<DateTime<Utc>>>,
    // At-most-one-concurrent-refresh guard. Regular ticks try_lock and drop
    // on contention; a rotation's forced refresh waits on it instead.
    refresh_lock: Mutex<()>,
}

impl DexAnalyzer {
    pub fn new(
        registry: VenueRegistry,
        connector: Arc<dyn VenueConnector>,
        config: AnalyzerConfig,
    ) -> Self {
        let initial = registry.active_venues().first().map(|v| v.name.clone());
        Self {
            registry,
            store: AnalysisStore::new(),
            connector,
            config,
            current_recommended: RwLock::new(initial),
            last_rotation: RwLock::new(None),
            refresh_lock: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    /// Full refresh across all active venues. Returns `false` without doing
    /// any work when another refresh is already in flight (dropped tick, no
    /// queueing).
    pub async fn refresh(&self) -> bool {
        let Ok(_guard) = self.refresh_lock.try_lock() else {
            debug!("refresh already in progress, dropping tick");
            return false;
        };
        self.run_refresh().await;
        true
    }

    /// Refresh that waits for any in-flight refresh to finish first. Used for
    /// the post-rotation refresh, which must not be dropped.
    pub async fn refresh_blocking(&self) {
        let _guard = self.refresh_lock.lock().await;
        self.run_refresh().await;
    }

    async fn run_refresh(&self) {
        let venues = self.registry.active_venues();
        if venues.is_empty() {
            debug!("no active venues, refresh is a no-op");
            return;
        }

        let recommended = self.current_recommended.read().await.clone();
        let computations = venues
            .iter()
            .map(|venue| self.compute_record(venue, recommended.as_deref()));
        let results = future::join_all(computations).await;

        let mut refreshed = 0usize;
        for (venue, result) in venues.iter().zip(results) {
            match result {
                Ok(record) => {
                    self.store.upsert(record);
                    refreshed += 1;
                }
                Err(e) => {
                    warn!(
                        "analysis for {} failed, keeping previous snapshot: {}",
                        venue.name, e
                    );
                }
            }
        }
        debug!("refresh complete: {}/{} venues updated", refreshed, venues.len());
    }

    async fn compute_record(
        &self,
        venue: &VenueConfig,
        recommended: Option<&str>,
    ) -> Result<AnalysisRecord, AnalyzerError> {
        let connection = self.connector.connect(&venue.endpoint).await?;
        debug!(
            "{}: endpoint {} at block {}",
            venue.name, connection.endpoint, connection.head_block
        );

        let variation = scoring::market_variation(self.config.market_variation_band);
        let fee = scoring::fee_rate(&venue.name);
        let score = scoring::venue_score(fee, venue.chain_id, variation);

        let price = scoring::BASE_PRICE_USD * (1.0 + variation / 100.0);
        let liquidity = scoring::liquidity_baseline(&venue.name) * (1.0 + variation / 50.0);
        let volume = scoring::volume_baseline(&venue.name) * (1.0 + variation / 25.0);

        Ok(AnalysisRecord {
            venue_name: venue.name.clone(),
            price_native: price,
            price_display: format!("${:.4}", price),
            liquidity_display: scoring::format_magnitude(liquidity),
            volume_24h_display: scoring::format_magnitude(volume),
            fee_rate: scoring::format_percent(fee),
            price_impact: scoring::format_percent(scoring::price_impact(liquidity)),
            gas_fee_display: scoring::gas_fee_display(venue.chain_id).to_string(),
            profitability: scoring::format_profitability(score),
            is_recommended: recommended == Some(venue.name.as_str()),
            last_updated: Utc::now(),
        })
    }

    /// Picks a new recommended venue uniformly at random among active venues
    /// (re-selecting the current one is allowed), then forces a refresh so
    /// the designation is visible without waiting for the next analysis tick.
    pub async fn rotate_recommended(&self) {
        let active = self.registry.active_venues();
        if active.is_empty() {
            warn!("rotation skipped: no active venues");
            return;
        }

        let pick = {
            let mut rng = rand::thread_rng();
            active[rng.gen_range(0..active.len())].name.clone()
        };
        info!("rotating recommended venue to {}", pick);

        *self.current_recommended.write().await = Some(pick.clone());
        *self.last_rotation.write().await = Some(Utc::now());

        // Sweep stale flags under the refresh guard. An in-flight refresh
        // read the previous designation and would re-flag it after an
        // unguarded sweep; a venue that then fails the forced refresh keeps
        // its old record, which must not carry a second recommended flag.
        let _guard = self.refresh_lock.lock().await;
        self.store.clear_recommended_except(&pick);
        self.run_refresh().await;
    }

    /// Records ranked by parsed profitability, best first. Equal scores keep
    /// their snapshot order (accepted don't-care).
    pub fn top_n(&self, n: usize) -> Vec<AnalysisRecord> {
        if n == 0 {
            return Vec::new();
        }
        let mut records = self.store.get_all();
        records.sort_by(|a, b| {
            let pa = scoring::parse_profitability(&a.profitability);
            let pb = scoring::parse_profitability(&b.profitability);
            pb.partial_cmp(&pa).unwrap_or(std::cmp::Ordering::Equal)
        });
        records.truncate(n);
        records
    }

    /// The single top-ranked record, or `None` while the store is still
    /// empty ("analyzing" state, not an error).
    pub fn recommended(&self) -> Option<AnalysisRecord> {
        self.top_n(1).into_iter().next()
    }

    pub fn all(&self) -> Vec<AnalysisRecord> {
        self.store.get_all()
    }

    pub fn by_name(&self, venue_name: &str) -> Option<AnalysisRecord> {
        self.store.get(venue_name)
    }

    pub async fn current_recommended_venue(&self) -> Option<String> {
        self.current_recommended.read().await.clone()
    }

    pub async fn last_rotation_time(&self) -> Option<DateTime<Utc>> {
        *self.last_rotation.read().await
    }
}
