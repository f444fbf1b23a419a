use crate::brawl::client::BrawlClient;
use crate::brawl::tag;
use crate::brawl::types::PlayerDto;
use crate::error::AppError;

impl BrawlClient {
    /// Get a player's profile and brawler roster by tag
    pub async fn get_player(&self, player_tag: &str) -> Result<PlayerDto, AppError> {
        let url = self.url(&format!("/players/{}", tag::encode(player_tag)));

        self.get(&url).await
    }
}

#[cfg(test)]
mod tests {
    use httpmock::prelude::*;

    use crate::brawl::client::tests::client;

    const PLAYER: &str = r##"{
        "tag": "#2PP0Q8",
        "name": "Vreezy",
        "nameColor": "0xffffffff",
        "icon": { "id": 28000000 },
        "trophies": 25000,
        "highestTrophies": 26012,
        "expLevel": 180,
        "expPoints": 160000,
        "3vs3Victories": 9000,
        "soloVictories": 700,
        "duoVictories": 800,
        "club": { "tag": "#CLUB", "name": "Planos" },
        "brawlers": [
            { "id": 16000000, "name": "SHELLY", "power": 11, "rank": 30, "trophies": 1000, "highestTrophies": 1100, "gears": [], "starPowers": [], "gadgets": [] },
            { "id": 16000001, "name": "COLT", "power": 9, "rank": 20, "trophies": 600, "highestTrophies": 650, "gears": [], "starPowers": [], "gadgets": [] }
        ]
    }"##;

    #[tokio::test]
    async fn get_player_parses_profile() {
        let server = MockServer::start_async().await;
        let mock = server
            .mock_async(|when, then| {
                when.method(GET).path_contains("/players/").path_contains("2PP0Q8");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(PLAYER);
            })
            .await;

        let player = client(&server).get_player("#2ppoq8").await.unwrap();

        mock.assert_async().await;
        assert_eq!(player.name, "Vreezy");
        assert_eq!(player.trio_victories, 9000);
        assert_eq!(player.club_name(), "Planos");
        assert_eq!(player.roster().len(), 2);
        assert_eq!(player.roster()[1].trophies, 600);
    }

    #[tokio::test]
    async fn player_without_club() {
        let body = PLAYER.replace(r##""club": { "tag": "#CLUB", "name": "Planos" },"##, r#""club": {},"#);
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(GET).path_contains("/players/");
                then.status(200)
                    .header("content-type", "application/json")
                    .body(body);
            })
            .await;

        let player = client(&server).get_player("2PP0Q8").await.unwrap();

        assert_eq!(player.club_name(), "No Club");
    }
}
