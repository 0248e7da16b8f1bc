//! LoL Esports persisted-gateway wire types: serde shapes for deserializing
//! raw responses. Every field is optional; the resolvers decide which absences
//! are fatal. Mapping into the clean domain types lives beside each resolver.

use serde::Deserialize;

/// Every gateway response is wrapped in `{"data": {...}}`.
#[derive(Debug, Deserialize)]
pub struct Envelope<T> {
    pub data: Option<T>,
}

// ---------------------------------------------------------------------------
// getLive / getSchedule
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct ScheduleData {
    pub schedule: Option<WireSchedule>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireSchedule {
    pub events: Option<Vec<WireEvent>>,
    pub pages: Option<WirePages>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WirePages {
    pub older: Option<String>,
    pub newer: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WireEvent {
    pub id: Option<String>,
    pub start_time: Option<String>, // ISO 8601, "Z" suffixed
    pub state: Option<String>,      // "unstarted" | "inProgress" | "completed"
    #[serde(rename = "type")]
    pub event_type: Option<String>, // "show" | "match"
    pub block_name: Option<String>,
    pub league: Option<WireLeague>,
    #[serde(rename = "match")]
    pub match_info: Option<WireMatch>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireMatch {
    pub id: Option<String>,
    pub teams: Option<Vec<WireMatchTeam>>,
    pub strategy: Option<WireStrategy>,
    pub games: Option<Vec<WireGame>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireMatchTeam {
    pub id: Option<String>,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub code: Option<String>,
    pub image: Option<String>,
    pub result: Option<WireResult>,
    pub record: Option<WireRecord>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WireResult {
    pub outcome: Option<String>,
    pub game_wins: Option<u32>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireRecord {
    pub wins: Option<u32>,
    pub losses: Option<u32>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireStrategy {
    #[serde(rename = "type")]
    pub kind: Option<String>, // "bestOf"
    pub count: Option<u32>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireGame {
    pub id: Option<String>,
    pub number: Option<u32>,
    pub state: Option<String>,
}

// ---------------------------------------------------------------------------
// getLeagues / getTournamentsForLeague
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct LeaguesData {
    pub leagues: Option<Vec<WireLeague>>,
}

/// Shared by getLeagues, getTournamentsForLeague (which only fills `id` and
/// `tournaments`) and the `league` block embedded in events.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WireLeague {
    pub id: Option<String>,
    pub slug: Option<String>,
    pub name: Option<String>,
    pub region: Option<String>,
    pub image: Option<String>,
    pub priority: Option<i64>,
    pub display_priority: Option<WireDisplayPriority>,
    pub tournaments: Option<Vec<WireTournament>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireDisplayPriority {
    pub position: Option<i64>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WireTournament {
    pub id: Option<String>,
    pub slug: Option<String>,
    pub start_date: Option<String>, // "2023-06-01"
    pub end_date: Option<String>,
}

// ---------------------------------------------------------------------------
// getStandings
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct StandingsData {
    pub standings: Option<Vec<WireStanding>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireStanding {
    /// Tournament slug, e.g. "lcs_summer_2023".
    pub slug: Option<String>,
    pub stages: Option<Vec<WireStage>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireStage {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub sections: Option<Vec<WireSection>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireSection {
    pub name: Option<String>,
    pub rankings: Option<Vec<WireRanking>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireRanking {
    pub ordinal: Option<u32>,
    /// One team per slot in practice; ties share an ordinal across slots.
    pub teams: Option<Vec<WireMatchTeam>>,
}

// ---------------------------------------------------------------------------
// getTeams
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct TeamsData {
    pub teams: Option<Vec<WireTeam>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WireTeam {
    pub id: Option<String>,
    pub slug: Option<String>,
    pub name: Option<String>,
    pub code: Option<String>,
    pub image: Option<String>,
    pub home_league: Option<WireHomeLeague>,
    pub players: Option<Vec<WirePlayer>>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireHomeLeague {
    pub name: Option<String>,
    pub region: Option<String>,
}

#[derive(Debug, Deserialize, Default, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WirePlayer {
    pub id: Option<String>,
    pub summoner_name: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub image: Option<String>,
    pub role: Option<String>,
}

// ---------------------------------------------------------------------------
// getEventList
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Default, Clone)]
pub struct EventListData {
    pub esports: Option<WireEventList>,
}

#[derive(Debug, Deserialize, Default, Clone)]
pub struct WireEventList {
    pub events: Option<Vec<WireEvent>>,
}
