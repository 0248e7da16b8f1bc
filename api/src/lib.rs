pub mod catalog;
pub mod client;
pub mod events;
pub mod regions;
pub mod standings;
pub mod teams;
pub mod tournaments;
pub mod upstream;
pub mod wire;

#[cfg(test)]
pub(crate) mod testing;

use chrono::{DateTime, NaiveDate, Utc};

// ---------------------------------------------------------------------------
// Domain types, independent of the gateway wire format
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct League {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub region: String,
    /// Lower sorts first. Leagues without any priority get `i64::MAX`.
    pub priority: i64,
    pub image: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tournament {
    pub id: String,
    /// Carries the timeframe token, e.g. "lcs_summer_2023".
    pub slug: String,
    pub league_id: String,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

/// Tournaments as returned by the league lookup: grouped under their league.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeagueTournaments {
    pub league_id: String,
    pub tournaments: Vec<Tournament>,
}

/// The two shapes a tournament lookup can hand back. Which one is decided
/// where the lookup happens, never by probing the payload downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TournamentSet {
    Flat(Vec<Tournament>),
    Nested(Vec<LeagueTournaments>),
}

impl TournamentSet {
    pub fn is_empty(&self) -> bool {
        match self {
            TournamentSet::Flat(tournaments) => tournaments.is_empty(),
            TournamentSet::Nested(leagues) => leagues.iter().all(|l| l.tournaments.is_empty()),
        }
    }

    /// Discovery order is preserved: league by league, then API order.
    pub fn into_flat(self) -> Vec<Tournament> {
        match self {
            TournamentSet::Flat(tournaments) => tournaments,
            TournamentSet::Nested(leagues) => {
                leagues.into_iter().flat_map(|l| l.tournaments).collect()
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Standing {
    /// Title-cased tournament slug, e.g. "Lcs Summer 2023".
    pub season: String,
    pub rankings: Vec<Ranking>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ranking {
    pub ordinal: u32, // 1-based
    pub team: TeamRecord,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamRecord {
    pub code: String,
    pub name: String,
    pub slug: String,
    pub wins: u32,
    pub losses: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EventKind {
    Show,
    #[default]
    Match,
}

impl EventKind {
    pub fn label(&self) -> &'static str {
        match self {
            EventKind::Show => "show",
            EventKind::Match => "match",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EventState {
    #[default]
    Unstarted,
    InProgress,
    Completed,
}

/// A scheduled, live or finished broadcast slot. Live events, schedule rows
/// and upcoming events all normalize into this type.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Event {
    pub id: String,
    pub kind: EventKind,
    pub state: EventState,
    pub start_time: Option<DateTime<Utc>>,
    pub block_name: Option<String>,
    pub league: EventLeague,
    pub detail: Option<MatchDetail>, // None for shows
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventLeague {
    pub id: Option<String>,
    pub name: String,
    pub slug: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchDetail {
    pub id: String,
    pub teams: Vec<MatchTeam>,
    pub games: Vec<GameSlot>,
    pub best_of: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchTeam {
    pub code: String,
    pub name: String,
    pub game_wins: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GameSlot {
    pub number: u32,
    pub state: GameState,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum GameState {
    #[default]
    Unstarted,
    InProgress,
    Completed,
    Unneeded,
}

/// Team code the gateway uses for a bracket slot that has not been decided.
pub const TBD_CODE: &str = "TBD";

impl Event {
    /// Status line shown while this event is live.
    pub fn presence_label(&self) -> String {
        match (&self.kind, &self.detail) {
            (EventKind::Match, Some(detail)) if !detail.teams.is_empty() => detail
                .teams
                .iter()
                .map(|t| t.code.as_str())
                .collect::<Vec<_>>()
                .join(" vs "),
            (kind, _) => format!("Pre-{}", kind.label()),
        }
    }

    /// A match is resolved once no slot is a "TBD" placeholder. Shows have no
    /// teams and count as resolved.
    pub fn is_resolved(&self) -> bool {
        match &self.detail {
            Some(detail) => {
                !detail.teams.is_empty()
                    && detail.teams.iter().all(|t| !t.code.eq_ignore_ascii_case(TBD_CODE))
            }
            None => self.kind == EventKind::Show,
        }
    }

    /// Number of the game currently being played, if any.
    pub fn current_game(&self) -> Option<u32> {
        self.detail
            .as_ref()?
            .games
            .iter()
            .find(|g| g.state == GameState::InProgress)
            .map(|g| g.number)
    }

    /// "T1 2 - 1 GEN" for two-team matches.
    pub fn scoreline(&self) -> Option<String> {
        let detail = self.detail.as_ref()?;
        let [home, away] = detail.teams.as_slice() else {
            return None;
        };
        Some(format!("{} {} - {} {}", home.code, home.game_wins, away.game_wins, away.code))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Team {
    pub id: String,
    pub slug: String,
    pub name: String,
    pub code: String,
    pub image: String,
    pub home_league: Option<HomeLeague>,
    pub roster: Vec<Player>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HomeLeague {
    pub name: String,
    pub region: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Player {
    pub id: String,
    pub summoner_name: String,
    pub full_name: String,
    pub role: Role,
    pub image: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Role {
    Top,
    Jungle,
    Mid,
    Bottom,
    Support,
    #[default]
    Fill,
}

impl Role {
    pub fn parse(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            "top" => Role::Top,
            "jungle" => Role::Jungle,
            "mid" | "middle" => Role::Mid,
            "bottom" | "adc" => Role::Bottom,
            "support" => Role::Support,
            _ => Role::Fill,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Top => "Top",
            Role::Jungle => "Jungle",
            Role::Mid => "Mid",
            Role::Bottom => "Bottom",
            Role::Support => "Support",
            Role::Fill => "Fill",
        }
    }
}
