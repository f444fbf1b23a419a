use std::sync::Arc;
use std::time::Duration;

use tokio::sync::RwLock;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, error, info, instrument};

use crate::brawl::{BrawlClient, BrawlerInfo};
use crate::error::AppError;

/// Autocomplete suggestions per response.
pub const MAX_SUGGESTIONS: usize = 10;

/// Every released brawler, shared between commands and the refresh task.
#[derive(Debug, Clone, Default)]
pub struct BrawlerCatalog {
    brawlers: Arc<RwLock<Vec<BrawlerInfo>>>,
}

impl BrawlerCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn replace(&self, brawlers: Vec<BrawlerInfo>) {
        *self.brawlers.write().await = brawlers;
    }

    pub async fn len(&self) -> usize {
        self.brawlers.read().await.len()
    }

    pub async fn find(&self, id: u32) -> Option<BrawlerInfo> {
        self.brawlers
            .read()
            .await
            .iter()
            .find(|brawler| brawler.id == id)
            .cloned()
    }

    /// Case-insensitive substring search in catalog order. An empty query
    /// returns the first entries.
    pub async fn search(&self, query: &str) -> Vec<BrawlerInfo> {
        let query = query.trim().to_lowercase();

        self.brawlers
            .read()
            .await
            .iter()
            .filter(|brawler| query.is_empty() || brawler.name.to_lowercase().contains(&query))
            .take(MAX_SUGGESTIONS)
            .cloned()
            .collect()
    }

    #[instrument(skip(self, brawl))]
    pub async fn refresh(&self, brawl: &BrawlClient, catalog_url: &str) -> Result<usize, AppError> {
        let brawlers = brawl.get_brawler_catalog(catalog_url).await?;
        let count = brawlers.len();

        self.replace(brawlers).await;
        debug!(count, "📚 Brawler catalog refreshed");

        Ok(count)
    }
}

/// Refreshes the catalog forever. A failed refresh keeps the previous list.
pub async fn start_polling(
    catalog: BrawlerCatalog,
    brawl: BrawlClient,
    catalog_url: String,
    interval_secs: u64,
) {
    let mut interval = interval(Duration::from_secs(interval_secs));
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    info!(interval_secs, "📚 Brawler catalog poller started");

    loop {
        interval.tick().await;

        if let Err(e) = catalog.refresh(&brawl, &catalog_url).await {
            let kept = catalog.len().await;
            error!(error = ?e, kept, "📚 ❌ Brawler catalog refresh failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;

    use super::*;
    use crate::brawl::client_for_tests;

    fn brawler(id: u32, name: &str) -> BrawlerInfo {
        BrawlerInfo {
            id,
            name: name.to_string(),
        }
    }

    async fn catalog() -> BrawlerCatalog {
        let catalog = BrawlerCatalog::new();
        catalog
            .replace(
                (0..15)
                    .map(|i| brawler(16000000 + i, &format!("Brawler {i}")))
                    .chain([brawler(16000100, "Shelly"), brawler(16000101, "Spike")])
                    .collect(),
            )
            .await;
        catalog
    }

    #[tokio::test]
    async fn empty_query_lists_first_suggestions() {
        let results = catalog().await.search("").await;

        assert_eq!(results.len(), MAX_SUGGESTIONS);
        assert_eq!(results[0].name, "Brawler 0");
    }

    #[tokio::test]
    async fn search_is_case_insensitive() {
        let results = catalog().await.search("sH").await;

        assert_eq!(results, vec![brawler(16000100, "Shelly")]);
    }

    #[tokio::test]
    async fn search_caps_results() {
        assert_eq!(catalog().await.search("brawler").await.len(), MAX_SUGGESTIONS);
    }

    #[tokio::test]
    async fn find_by_id() {
        let catalog = catalog().await;

        assert_eq!(catalog.find(16000101).await, Some(brawler(16000101, "Spike")));
        assert_eq!(catalog.find(1).await, None);
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_list() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/brawlers");
                then.status(500);
            })
            .await;

        let catalog = catalog().await;
        let res = catalog
            .refresh(&client_for_tests(&server), &server.url("/brawlers"))
            .await;

        assert!(res.is_err());
        assert_eq!(catalog.len().await, 17);
    }

    #[tokio::test]
    async fn refresh_replaces_list() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/brawlers");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(r#"{"list":[{"id":1,"name":"Colt"}]}"#);
            })
            .await;

        let catalog = catalog().await;
        let count = catalog
            .refresh(&client_for_tests(&server), &server.url("/brawlers"))
            .await
            .unwrap();

        assert_eq!(count, 1);
        assert_eq!(catalog.search("").await, vec![brawler(1, "Colt")]);
    }

    #[tokio::test]
    async fn poller_runs_on_a_spawned_task() {
        let server = MockServer::start_async().await;
        let failing = server
            .mock_async(|when, then| {
                when.method(GET).path("/brawlers");
                then.status(503);
            })
            .await;

        let catalog = catalog().await;
        let task = tokio::spawn(start_polling(
            catalog.clone(),
            client_for_tests(&server),
            server.url("/brawlers"),
            3600,
        ));

        for _ in 0..50 {
            if failing.hits_async().await > 0 {
                break;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        task.abort();

        assert_eq!(failing.hits_async().await, 1);
        assert_eq!(catalog.len().await, 17);
    }
}
