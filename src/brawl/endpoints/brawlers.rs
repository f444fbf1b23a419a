use crate::brawl::client::BrawlClient;
use crate::brawl::types::{BrawlerCatalogDto, BrawlerInfo};
use crate::error::AppError;

impl BrawlClient {
    /// Fetch every released brawler from the public catalog
    pub async fn get_brawler_catalog(&self, catalog_url: &str) -> Result<Vec<BrawlerInfo>, AppError> {
        let catalog: BrawlerCatalogDto = self.get_public(catalog_url).await?;
        Ok(catalog.list)
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;

    use crate::brawl::client::tests::client;
    use crate::brawl::types::BrawlerInfo;

    #[tokio::test]
    async fn catalog_lists_brawlers() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path("/v1/brawlers");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(r#"{"list":[{"id":16000000,"name":"Shelly","rarity":{"name":"Starting"}},{"id":16000001,"name":"Colt"}]}"#);
            })
            .await;

        let catalog = client(&server)
            .get_brawler_catalog(&server.url("/v1/brawlers"))
            .await
            .unwrap();

        assert_eq!(
            catalog,
            vec![
                BrawlerInfo {
                    id: 16000000,
                    name: "Shelly".to_string()
                },
                BrawlerInfo {
                    id: 16000001,
                    name: "Colt".to_string()
                },
            ]
        );
    }
}
