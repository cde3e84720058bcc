//! Endpoint methods: build the query, GET, map the body.

use super::client::OpenDota;
use super::filters::{cursor_query, PlayerMatchesFilter, PublicMatchesFilter};
use super::types::{
    Hero, HeroStats, Match, ParsedMatch, PlayerMatch, PlayerProfile, ProMatch, PublicMatch,
};
use crate::core::QueryParams;
use crate::ids::{AccountId, MatchId};
use crate::response::Payload;
use crate::Result;

impl OpenDota {
    /// `GET matches/{match_id}`
    pub async fn get_match(&self, match_id: impl Into<MatchId>) -> Result<Payload<Match>> {
        let match_id = match_id.into();
        self.fetch(&format!("matches/{match_id}"), &QueryParams::new()).await
    }

    /// `GET publicMatches`
    pub async fn get_public_matches(
        &self,
        filter: &PublicMatchesFilter,
    ) -> Result<Payload<Vec<PublicMatch>>> {
        self.fetch("publicMatches", &filter.to_query()).await
    }

    /// `GET proMatches`, newest first, paged with `less_than_match_id`.
    pub async fn get_pro_matches(
        &self,
        less_than_match_id: Option<MatchId>,
    ) -> Result<Payload<Vec<ProMatch>>> {
        self.fetch("proMatches", &cursor_query(less_than_match_id)).await
    }

    /// `GET parsedMatches`, paged with `less_than_match_id`.
    pub async fn get_parsed_matches(
        &self,
        less_than_match_id: Option<MatchId>,
    ) -> Result<Payload<Vec<ParsedMatch>>> {
        self.fetch("parsedMatches", &cursor_query(less_than_match_id)).await
    }

    /// `GET players/{account_id}`
    pub async fn get_player(
        &self,
        account_id: impl Into<AccountId>,
    ) -> Result<Payload<PlayerProfile>> {
        let account_id = account_id.into();
        self.fetch(&format!("players/{account_id}"), &QueryParams::new()).await
    }

    /// `GET players/{account_id}/matches`
    pub async fn get_player_matches(
        &self,
        account_id: impl Into<AccountId>,
        filter: &PlayerMatchesFilter,
    ) -> Result<Payload<Vec<PlayerMatch>>> {
        let account_id = account_id.into();
        self.fetch(&format!("players/{account_id}/matches"), &filter.to_query()).await
    }

    /// `GET heroes`
    pub async fn get_heroes(&self) -> Result<Payload<Vec<Hero>>> {
        self.fetch("heroes", &QueryParams::new()).await
    }

    /// `GET heroStats`
    pub async fn get_hero_stats(&self) -> Result<Payload<Vec<HeroStats>>> {
        self.fetch("heroStats", &QueryParams::new()).await
    }
}
