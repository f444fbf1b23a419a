use crate::brawl::client::BrawlClient;
use crate::brawl::tag;
use crate::brawl::types::{BattleLogDto, BattleLogEntry};
use crate::error::AppError;

impl BrawlClient {
    /// Get a player's recent battles, newest first
    pub async fn get_battle_log(&self, player_tag: &str) -> Result<Vec<BattleLogEntry>, AppError> {
        let url = self.url(&format!("/players/{}/battlelog", tag::encode(player_tag)));

        let log: BattleLogDto = self.get(&url).await?;
        Ok(log.items)
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;

    use crate::brawl::client::tests::client;
    use crate::error::AppError;

    #[tokio::test]
    async fn get_battle_log_returns_items() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path_contains("/battlelog");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(
                        r##"{"items":[{"battleTime":"20240512T184501.000Z","battle":{"mode":"heist","type":"ranked","result":"defeat","teams":[[{"tag":"#A","name":"a","brawler":{"id":1,"name":"X","trophies":500}}],[{"tag":"#B","name":"b","brawler":{"id":2,"name":"Y","trophies":510}}]]}}],"paging":{"cursors":{}}}"##,
                    );
            })
            .await;

        let items = client(&server).get_battle_log("#A").await.unwrap();

        assert_eq!(items.len(), 1);
        assert_eq!(items[0].battle.result.as_deref(), Some("defeat"));
    }

    #[tokio::test]
    async fn unknown_tag_is_not_found() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path_contains("/battlelog");
                then.status(404)
                    .header("content-type", "application/json")
                    .body(r#"{"reason":"notFound"}"#);
            })
            .await;

        let res = client(&server).get_battle_log("#NOPE").await;

        assert!(matches!(res, Err(AppError::BrawlApi { status: 404, .. })));
    }
}
