//! # Wholesaler Directory
//!
//! Loads the supplier's connected wholesalers with a small amount of
//! resilience: a couple of delayed retries, then a cached snapshot.
//!
//! ```text
//! attempt 1 ──fail──▶ sleep ──▶ attempt 2 ──fail──▶ sleep ──▶ attempt 3
//!                                                                │
//!                                            fail ◀──────────────┘
//!                                             │
//!                               cached snapshot? ──yes──▶ serve stale + warn
//!                                             │
//!                                             no ──▶ error
//! ```
//!
//! Auth failures short-circuit: a dead session is not retried and never
//! served from cache.

use std::sync::Arc;
use std::time::Duration;

use tracing::{instrument, warn};

use tradelink_api::WholesalersApi;
use tradelink_core::Wholesaler;

use crate::cache::{keys, OfflineCache};
use crate::error::{FlowError, FlowResult};
use crate::notify::NotificationSink;

/// Retries after the initial attempt.
const RETRY_ATTEMPTS: u32 = 2;
/// Fixed delay between attempts.
const RETRY_DELAY: Duration = Duration::from_millis(1500);

// =============================================================================
// Directory
// =============================================================================

pub struct WholesalerDirectory {
    api: Arc<dyn WholesalersApi>,
    cache: Arc<dyn OfflineCache>,
    notifier: Arc<dyn NotificationSink>,
    wholesalers: Vec<Wholesaler>,
    stale: bool,
}

impl WholesalerDirectory {
    pub fn new(
        api: Arc<dyn WholesalersApi>,
        cache: Arc<dyn OfflineCache>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            api,
            cache,
            notifier,
            wholesalers: Vec::new(),
            stale: false,
        }
    }

    pub fn wholesalers(&self) -> &[Wholesaler] {
        &self.wholesalers
    }

    /// Whether the current list came from the offline cache.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    /// Loads the wholesaler list, retrying transient failures and
    /// falling back to the last cached snapshot.
    #[instrument(skip(self))]
    pub async fn load(&mut self) -> FlowResult<&[Wholesaler]> {
        let mut last_err = None;

        for attempt in 0..=RETRY_ATTEMPTS {
            if attempt > 0 {
                tokio::time::sleep(RETRY_DELAY).await;
            }
            match self.api.list_wholesalers().await {
                Ok(wholesalers) => {
                    if let Ok(json) = serde_json::to_string(&wholesalers) {
                        self.cache.put(keys::WHOLESALER_SNAPSHOT, json);
                    }
                    self.wholesalers = wholesalers;
                    self.stale = false;
                    return Ok(&self.wholesalers);
                }
                Err(err) if err.is_auth() => {
                    self.notifier.error(&err.to_string());
                    return Err(err.into());
                }
                Err(err) => {
                    warn!(attempt, error = %err, "wholesaler fetch failed");
                    last_err = Some(err);
                }
            }
        }

        if let Some(cached) = self.restore_from_cache() {
            self.wholesalers = cached;
            self.stale = true;
            self.notifier
                .warning("Could not reach the server; showing the last saved wholesaler list");
            return Ok(&self.wholesalers);
        }

        let err = FlowError::from(match last_err {
            Some(err) => err,
            // Unreachable with RETRY_ATTEMPTS >= 0, but the type demands it.
            None => tradelink_api::ApiError::Transport("no attempt was made".to_string()),
        });
        self.notifier
            .error(&format!("Failed to load wholesalers: {err}"));
        Err(err)
    }

    fn restore_from_cache(&self) -> Option<Vec<Wholesaler>> {
        let json = self.cache.get(keys::WHOLESALER_SNAPSHOT)?;
        serde_json::from_str(&json).ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    use async_trait::async_trait;
    use tradelink_api::{ApiError, ApiResult};

    use crate::cache::MemoryCache;
    use crate::notify::{RecordingNotifier, Severity};

    fn wholesaler(id: &str, name: &str) -> Wholesaler {
        Wholesaler {
            id: id.to_string(),
            business_name: name.to_string(),
            email: None,
            phone: None,
        }
    }

    /// Fails the first `failures` calls, then serves the list.
    struct FlakyWholesalers {
        calls: AtomicU32,
        failures: u32,
        error: fn() -> ApiError,
        wholesalers: Mutex<Vec<Wholesaler>>,
    }

    impl FlakyWholesalers {
        fn new(failures: u32, wholesalers: Vec<Wholesaler>) -> Self {
            Self {
                calls: AtomicU32::new(0),
                failures,
                error: || ApiError::Transport("connection reset".into()),
                wholesalers: Mutex::new(wholesalers),
            }
        }
    }

    #[async_trait]
    impl WholesalersApi for FlakyWholesalers {
        async fn list_wholesalers(&self) -> ApiResult<Vec<Wholesaler>> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                return Err((self.error)());
            }
            Ok(self.wholesalers.lock().unwrap().clone())
        }
    }

    fn directory(
        api: Arc<FlakyWholesalers>,
        cache: Arc<MemoryCache>,
    ) -> (WholesalerDirectory, Arc<RecordingNotifier>) {
        let notifier = Arc::new(RecordingNotifier::new());
        (
            WholesalerDirectory::new(api, cache, notifier.clone()),
            notifier,
        )
    }

    #[tokio::test(start_paused = true)]
    async fn transient_failures_are_retried() {
        let api = Arc::new(FlakyWholesalers::new(
            2,
            vec![wholesaler("w1", "Nakuru Wholesale")],
        ));
        let (mut dir, notifier) = directory(api.clone(), Arc::new(MemoryCache::new()));

        let list = dir.load().await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(api.calls.load(Ordering::SeqCst), 3);
        assert!(!dir.is_stale());
        assert!(notifier.of(Severity::Error).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn exhausted_retries_fall_back_to_cache() {
        let cache = Arc::new(MemoryCache::new());

        // First load succeeds and seeds the cache.
        let healthy = Arc::new(FlakyWholesalers::new(
            0,
            vec![wholesaler("w1", "Eldoret Grain Co")],
        ));
        let (mut dir, _) = directory(healthy, cache.clone());
        dir.load().await.unwrap();

        // Next session: every attempt fails, the snapshot serves.
        let dead = Arc::new(FlakyWholesalers::new(u32::MAX, vec![]));
        let (mut dir, notifier) = directory(dead.clone(), cache);

        let list = dir.load().await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0].business_name, "Eldoret Grain Co");
        assert!(dir.is_stale());
        assert_eq!(dead.calls.load(Ordering::SeqCst), 3);
        assert_eq!(notifier.of(Severity::Warning).len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn no_cache_means_the_error_surfaces() {
        let dead = Arc::new(FlakyWholesalers::new(u32::MAX, vec![]));
        let (mut dir, notifier) = directory(dead, Arc::new(MemoryCache::new()));

        let err = dir.load().await.unwrap_err();
        assert!(matches!(err, FlowError::Api(ApiError::Transport(_))));
        assert_eq!(notifier.of(Severity::Error).len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn auth_failures_are_not_retried() {
        let api = Arc::new(FlakyWholesalers {
            calls: AtomicU32::new(0),
            failures: u32::MAX,
            error: || ApiError::Unauthorized,
            wholesalers: Mutex::new(vec![]),
        });
        let (mut dir, _) = directory(api.clone(), Arc::new(MemoryCache::new()));

        let err = dir.load().await.unwrap_err();
        assert!(err.is_auth());
        assert_eq!(api.calls.load(Ordering::SeqCst), 1);
    }
}
