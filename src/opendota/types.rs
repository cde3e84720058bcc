//! Records mirrored from OpenDota's JSON responses.
//!
//! Unknown upstream fields are ignored. Optional fields default to `None`,
//! counters to zero and lists to empty, so a record parses as long as the
//! identifying fields are present.

use crate::ids::{AccountId, HeroId, MatchId};
use serde::{de::Error, Deserialize, Deserializer, Serialize};


/// Player slots below this value are on the Radiant side.
pub const DIRE_SLOT_START: u16 = 128;

/// Team hero lists come back either as a JSON array or, from older
/// endpoints, as a comma separated string.
fn de_hero_list<'de, D>(deserializer: D) -> Result<Vec<HeroId>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawHeroList {
        List(Vec<HeroId>),
        Csv(String),
        Missing(()),
    }

    match RawHeroList::deserialize(deserializer)? {
        RawHeroList::List(ids) => Ok(ids),
        RawHeroList::Csv(s) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(|s| s.parse::<u32>().map(HeroId).map_err(D::Error::custom))
            .collect(),
        RawHeroList::Missing(()) => Ok(Vec::new()),
    }
}

/// OpenDota sends `null` for stats it does not know; read it as the
/// type's default (zero, or an empty list).
fn de_null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Full match detail from `matches/{match_id}`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Match {
    pub match_id: MatchId,
    /// Seconds.
    pub duration: u32,
    pub radiant_win: bool,
    #[serde(default)]
    pub start_time: Option<i64>,
    #[serde(default)]
    pub game_mode: Option<u32>,
    #[serde(default)]
    pub lobby_type: Option<u32>,
    #[serde(default)]
    pub radiant_score: Option<u32>,
    #[serde(default)]
    pub dire_score: Option<u32>,
    #[serde(default)]
    pub patch: Option<u32>,
    #[serde(default)]
    pub region: Option<u32>,
    #[serde(default, deserialize_with = "de_null_as_default")]
    pub players: Vec<MatchPlayer>,
}

impl Match {
    pub fn winner(&self) -> Side {
        if self.radiant_win {
            Side::Radiant
        } else {
            Side::Dire
        }
    }

    /// Participants on one side of the map.
    pub fn players_on(&self, side: Side) -> impl Iterator<Item = &MatchPlayer> {
        self.players
            .iter()
            .filter(move |p| p.side() == Some(side))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    Radiant,
    Dire,
}

/// One participant inside a [`Match`].
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct MatchPlayer {
    /// `None` for anonymous profiles.
    #[serde(default)]
    pub account_id: Option<AccountId>,
    #[serde(default)]
    pub player_slot: Option<u16>,
    #[serde(default)]
    pub hero_id: Option<HeroId>,
    #[serde(default)]
    pub personaname: Option<String>,
    #[serde(default, deserialize_with = "de_null_as_default")]
    pub kills: u32,
    #[serde(default, deserialize_with = "de_null_as_default")]
    pub deaths: u32,
    #[serde(default, deserialize_with = "de_null_as_default")]
    pub assists: u32,
    #[serde(default, deserialize_with = "de_null_as_default")]
    pub last_hits: u32,
    #[serde(default, deserialize_with = "de_null_as_default")]
    pub denies: u32,
    #[serde(default, deserialize_with = "de_null_as_default")]
    pub gold_per_min: u32,
    #[serde(default, deserialize_with = "de_null_as_default")]
    pub xp_per_min: u32,
    #[serde(default, deserialize_with = "de_null_as_default")]
    pub hero_damage: u64,
    #[serde(default, deserialize_with = "de_null_as_default")]
    pub tower_damage: u64,
    #[serde(default, deserialize_with = "de_null_as_default")]
    pub hero_healing: u64,
    #[serde(default, deserialize_with = "de_null_as_default")]
    pub level: u32,
    #[serde(default, deserialize_with = "de_null_as_default")]
    pub net_worth: u64,
}

impl MatchPlayer {
    pub fn side(&self) -> Option<Side> {
        self.player_slot.map(slot_side)
    }

    pub fn is_radiant(&self) -> bool {
        self.side() == Some(Side::Radiant)
    }

    /// (kills + assists) / max(deaths, 1)
    pub fn kda(&self) -> f64 {
        (self.kills + self.assists) as f64 / self.deaths.max(1) as f64
    }
}

fn slot_side(slot: u16) -> Side {
    if slot < DIRE_SLOT_START {
        Side::Radiant
    } else {
        Side::Dire
    }
}

/// Row from `publicMatches`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PublicMatch {
    pub match_id: MatchId,
    #[serde(default)]
    pub match_seq_num: Option<u64>,
    #[serde(default)]
    pub radiant_win: Option<bool>,
    #[serde(default)]
    pub start_time: Option<i64>,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub lobby_type: Option<u32>,
    #[serde(default)]
    pub game_mode: Option<u32>,
    #[serde(default)]
    pub avg_rank_tier: Option<u32>,
    #[serde(default)]
    pub num_rank_tier: Option<u32>,
    #[serde(default)]
    pub cluster: Option<u32>,
    #[serde(default, deserialize_with = "de_hero_list")]
    pub radiant_team: Vec<HeroId>,
    #[serde(default, deserialize_with = "de_hero_list")]
    pub dire_team: Vec<HeroId>,
}

/// Row from `proMatches`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProMatch {
    pub match_id: MatchId,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub start_time: Option<i64>,
    #[serde(default)]
    pub radiant_team_id: Option<u64>,
    #[serde(default)]
    pub radiant_name: Option<String>,
    #[serde(default)]
    pub dire_team_id: Option<u64>,
    #[serde(default)]
    pub dire_name: Option<String>,
    #[serde(default)]
    pub leagueid: Option<u32>,
    #[serde(default)]
    pub league_name: Option<String>,
    #[serde(default)]
    pub series_id: Option<u64>,
    #[serde(default)]
    pub series_type: Option<u32>,
    #[serde(default)]
    pub radiant_score: Option<u32>,
    #[serde(default)]
    pub dire_score: Option<u32>,
    #[serde(default)]
    pub radiant_win: Option<bool>,
}

/// Row from `parsedMatches`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ParsedMatch {
    pub match_id: MatchId,
}

/// Response of `players/{account_id}`.
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct PlayerProfile {
    /// Missing for accounts OpenDota has never seen.
    #[serde(default)]
    pub profile: Option<Profile>,
    #[serde(default)]
    pub rank_tier: Option<u32>,
    #[serde(default)]
    pub leaderboard_rank: Option<u32>,
}

impl PlayerProfile {
    pub fn account_id(&self) -> Option<AccountId> {
        self.profile.as_ref().map(|p| p.account_id)
    }

    pub fn persona_name(&self) -> Option<&str> {
        self.profile.as_ref().and_then(|p| p.personaname.as_deref())
    }
}

/// Steam profile block nested in [`PlayerProfile`].
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Profile {
    pub account_id: AccountId,
    #[serde(default)]
    pub personaname: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub plus: Option<bool>,
    #[serde(default)]
    pub steamid: Option<String>,
    #[serde(default)]
    pub avatarfull: Option<String>,
    #[serde(default)]
    pub profileurl: Option<String>,
    #[serde(default)]
    pub loccountrycode: Option<String>,
}

/// Row from `players/{account_id}/matches`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlayerMatch {
    pub match_id: MatchId,
    #[serde(default)]
    pub player_slot: Option<u16>,
    #[serde(default)]
    pub radiant_win: Option<bool>,
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub game_mode: Option<u32>,
    #[serde(default)]
    pub lobby_type: Option<u32>,
    #[serde(default)]
    pub hero_id: Option<HeroId>,
    #[serde(default)]
    pub start_time: Option<i64>,
    #[serde(default)]
    pub version: Option<u32>,
    #[serde(default, deserialize_with = "de_null_as_default")]
    pub kills: u32,
    #[serde(default, deserialize_with = "de_null_as_default")]
    pub deaths: u32,
    #[serde(default, deserialize_with = "de_null_as_default")]
    pub assists: u32,
    #[serde(default)]
    pub average_rank: Option<u32>,
    #[serde(default)]
    pub leaver_status: Option<u32>,
    #[serde(default)]
    pub party_size: Option<u32>,
}

impl PlayerMatch {
    /// Whether the player's side won. `None` if either half is unknown.
    pub fn won(&self) -> Option<bool> {
        let side = slot_side(self.player_slot?);
        let radiant_win = self.radiant_win?;
        Some((side == Side::Radiant) == radiant_win)
    }
}

/// Entry from `heroes`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Hero {
    pub id: HeroId,
    /// Internal name, e.g. `npc_dota_hero_antimage`.
    pub name: String,
    pub localized_name: String,
    #[serde(default)]
    pub primary_attr: Option<String>,
    #[serde(default)]
    pub attack_type: Option<String>,
    #[serde(default, deserialize_with = "de_null_as_default")]
    pub roles: Vec<String>,
    #[serde(default)]
    pub legs: Option<u32>,
}

/// Entry from `heroStats`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HeroStats {
    pub id: HeroId,
    pub name: String,
    pub localized_name: String,
    #[serde(default)]
    pub primary_attr: Option<String>,
    #[serde(default)]
    pub attack_type: Option<String>,
    #[serde(default, deserialize_with = "de_null_as_default")]
    pub roles: Vec<String>,
    #[serde(default)]
    pub img: Option<String>,
    #[serde(default)]
    pub icon: Option<String>,
    #[serde(default)]
    pub base_health: Option<f64>,
    #[serde(default)]
    pub base_mana: Option<f64>,
    #[serde(default)]
    pub base_armor: Option<f64>,
    #[serde(default)]
    pub base_attack_min: Option<u32>,
    #[serde(default)]
    pub base_attack_max: Option<u32>,
    #[serde(default)]
    pub move_speed: Option<u32>,
    #[serde(default, deserialize_with = "de_null_as_default")]
    pub pro_pick: u32,
    #[serde(default, deserialize_with = "de_null_as_default")]
    pub pro_win: u32,
    #[serde(default, deserialize_with = "de_null_as_default")]
    pub pro_ban: u32,
    #[serde(default, deserialize_with = "de_null_as_default")]
    pub turbo_picks: u32,
    #[serde(default, deserialize_with = "de_null_as_default")]
    pub turbo_wins: u32,
}

impl HeroStats {
    /// Share of professional picks that won; `None` with no picks.
    pub fn pro_win_rate(&self) -> Option<f64> {
        (self.pro_pick > 0).then(|| self.pro_win as f64 / self.pro_pick as f64)
    }

    pub fn turbo_win_rate(&self) -> Option<f64> {
        (self.turbo_picks > 0).then(|| self.turbo_wins as f64 / self.turbo_picks as f64)
    }
}
