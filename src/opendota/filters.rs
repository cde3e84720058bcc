//! Query filters for the list endpoints.
//!
//! Every field is optional. Unset fields are left out of the request
//! entirely; OpenDota applies its own defaults for them.

use crate::core::QueryParams;
use crate::ids::{AccountId, HeroId, MatchId};

/// Filters for `publicMatches`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PublicMatchesFilter {
    /// Matches with average MMR ascending from this value.
    pub mmr_ascending: Option<u32>,
    /// Matches with average MMR descending from this value.
    pub mmr_descending: Option<u32>,
    /// Cursor: only matches with a lower ID.
    pub less_than_match_id: Option<MatchId>,
}

impl PublicMatchesFilter {
    pub fn mmr_ascending(mut self, mmr: u32) -> Self {
        self.mmr_ascending = Some(mmr);
        self
    }

    pub fn mmr_descending(mut self, mmr: u32) -> Self {
        self.mmr_descending = Some(mmr);
        self
    }

    pub fn less_than_match_id(mut self, id: impl Into<MatchId>) -> Self {
        self.less_than_match_id = Some(id.into());
        self
    }

    pub fn to_query(&self) -> QueryParams {
        let mut q = QueryParams::new();
        q.push_opt("mmr_ascending", self.mmr_ascending)
            .push_opt("mmr_descending", self.mmr_descending)
            .push_opt("less_than_match_id", self.less_than_match_id);
        q
    }
}

/// Filters for `players/{account_id}/matches`.
///
/// # Examples
///
/// ```rust
/// use opendota::opendota::filters::PlayerMatchesFilter;
///
/// let filter = PlayerMatchesFilter::default().limit(20).win(true).hero_id(1u32);
/// let q = filter.to_query();
///
/// assert_eq!(q.get("limit"), Some("20"));
/// assert_eq!(q.get("win"), Some("1"));
/// assert!(!q.contains("offset"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlayerMatchesFilter {
    /// Number of matches to return (OpenDota's default is 20).
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    /// `true` for wins only, `false` for losses only.
    pub win: Option<bool>,
    pub patch: Option<u32>,
    pub game_mode: Option<u32>,
    pub lobby_type: Option<u32>,
    pub region: Option<u32>,
    /// Only matches from the last N days.
    pub date: Option<u32>,
    pub lane_role: Option<u32>,
    pub hero_id: Option<HeroId>,
    /// `true` for Radiant, `false` for Dire.
    pub is_radiant: Option<bool>,
    pub included_account_id: Vec<AccountId>,
    pub excluded_account_id: Vec<AccountId>,
    /// Heroes on the player's team.
    pub with_hero_id: Vec<HeroId>,
    /// Heroes on the opposing team.
    pub against_hero_id: Vec<HeroId>,
    /// `false` includes non-standard game modes.
    pub significant: Option<bool>,
    /// Only matches with at least this many parsed players.
    pub having: Option<u32>,
    /// Field to sort descending by, e.g. `kills`.
    pub sort: Option<String>,
}

impl PlayerMatchesFilter {
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn win(mut self, win: bool) -> Self {
        self.win = Some(win);
        self
    }

    pub fn patch(mut self, patch: u32) -> Self {
        self.patch = Some(patch);
        self
    }

    pub fn game_mode(mut self, mode: u32) -> Self {
        self.game_mode = Some(mode);
        self
    }

    pub fn lobby_type(mut self, lobby: u32) -> Self {
        self.lobby_type = Some(lobby);
        self
    }

    pub fn region(mut self, region: u32) -> Self {
        self.region = Some(region);
        self
    }

    pub fn date(mut self, days: u32) -> Self {
        self.date = Some(days);
        self
    }

    pub fn lane_role(mut self, role: u32) -> Self {
        self.lane_role = Some(role);
        self
    }

    pub fn hero_id(mut self, hero: impl Into<HeroId>) -> Self {
        self.hero_id = Some(hero.into());
        self
    }

    pub fn is_radiant(mut self, radiant: bool) -> Self {
        self.is_radiant = Some(radiant);
        self
    }

    pub fn include_account(mut self, id: impl Into<AccountId>) -> Self {
        self.included_account_id.push(id.into());
        self
    }

    pub fn exclude_account(mut self, id: impl Into<AccountId>) -> Self {
        self.excluded_account_id.push(id.into());
        self
    }

    pub fn with_hero(mut self, hero: impl Into<HeroId>) -> Self {
        self.with_hero_id.push(hero.into());
        self
    }

    pub fn against_hero(mut self, hero: impl Into<HeroId>) -> Self {
        self.against_hero_id.push(hero.into());
        self
    }

    pub fn significant(mut self, significant: bool) -> Self {
        self.significant = Some(significant);
        self
    }

    pub fn having(mut self, having: u32) -> Self {
        self.having = Some(having);
        self
    }

    pub fn sort(mut self, field: impl Into<String>) -> Self {
        self.sort = Some(field.into());
        self
    }

    pub fn to_query(&self) -> QueryParams {
        let mut q = QueryParams::new();
        q.push_opt("limit", self.limit)
            .push_opt("offset", self.offset)
            .push_opt("win", self.win.map(flag))
            .push_opt("patch", self.patch)
            .push_opt("game_mode", self.game_mode)
            .push_opt("lobby_type", self.lobby_type)
            .push_opt("region", self.region)
            .push_opt("date", self.date)
            .push_opt("lane_role", self.lane_role)
            .push_opt("hero_id", self.hero_id)
            .push_opt("is_radiant", self.is_radiant.map(flag))
            .push_list("included_account_id", &self.included_account_id)
            .push_list("excluded_account_id", &self.excluded_account_id)
            .push_list("with_hero_id", &self.with_hero_id)
            .push_list("against_hero_id", &self.against_hero_id)
            .push_opt("significant", self.significant.map(flag))
            .push_opt("having", self.having)
            .push_opt("sort", self.sort.as_deref());
        q
    }
}

/// OpenDota takes booleans as 0/1.
fn flag(on: bool) -> u8 {
    u8::from(on)
}

/// Query for endpoints that only take the `less_than_match_id` cursor.
pub fn cursor_query(less_than_match_id: Option<MatchId>) -> QueryParams {
    let mut q = QueryParams::new();
    q.push_opt("less_than_match_id", less_than_match_id);
    q
}
