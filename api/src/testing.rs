//! In-memory `Upstream` used by the resolver tests.

use crate::client::{ApiError, ApiResult};
use crate::upstream::{EventListQuery, Upstream};
use crate::wire::{
    WireEvent, WireLeague, WireMatch, WireMatchTeam, WireRanking, WireRecord, WireSchedule,
    WireSection, WireStage, WireStanding, WireTeam, WireTournament,
};
use std::collections::HashMap;
use std::sync::Mutex;

#[derive(Default)]
pub struct FakeUpstream {
    pub live: Vec<WireEvent>,
    pub schedule: WireSchedule,
    pub leagues: Vec<WireLeague>,
    /// League id -> tournaments, answered in request order.
    pub tournaments: Vec<(String, Vec<WireTournament>)>,
    /// Tournament id -> standing, answered in request order.
    pub standings: HashMap<String, WireStanding>,
    pub teams: Vec<WireTeam>,
    pub event_list: Vec<WireEvent>,
    pub fail_standings: bool,
    pub(crate) calls: Mutex<Vec<String>>,
}

impl FakeUpstream {
    pub fn calls(&self, op: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| c.as_str() == op).count()
    }

    fn record(&self, op: &str) {
        self.calls.lock().unwrap().push(op.to_owned());
    }
}

impl Upstream for FakeUpstream {
    async fn get_live(&self) -> ApiResult<Vec<WireEvent>> {
        self.record("live");
        Ok(self.live.clone())
    }

    async fn get_schedule(&self, _league_id: Option<&str>, _page: Option<&str>) -> ApiResult<WireSchedule> {
        self.record("schedule");
        Ok(self.schedule.clone())
    }

    async fn get_leagues(&self) -> ApiResult<Vec<WireLeague>> {
        self.record("leagues");
        Ok(self.leagues.clone())
    }

    async fn get_tournaments(&self, league_ids: &[String]) -> ApiResult<Vec<WireLeague>> {
        self.record("tournaments");
        Ok(league_ids
            .iter()
            .filter_map(|id| self.tournaments.iter().find(|(league, _)| league == id))
            .map(|(league, tournaments)| WireLeague {
                id: Some(league.clone()),
                tournaments: Some(tournaments.clone()),
                ..Default::default()
            })
            .collect())
    }

    async fn get_standings(&self, tournament_ids: &[String]) -> ApiResult<Vec<WireStanding>> {
        self.record("standings");
        if self.fail_standings {
            return Err(ApiError::InvalidParameter("standings disabled".into()));
        }
        Ok(tournament_ids
            .iter()
            .filter_map(|id| self.standings.get(id).cloned())
            .collect())
    }

    async fn get_team(&self, slug: &str) -> ApiResult<Vec<WireTeam>> {
        self.record("team");
        Ok(self
            .teams
            .iter()
            .filter(|t| t.slug.as_deref() == Some(slug))
            .cloned()
            .collect())
    }

    async fn get_event_list(&self, _query: &EventListQuery) -> ApiResult<Vec<WireEvent>> {
        self.record("event_list");
        Ok(self.event_list.clone())
    }
}

// ---------------------------------------------------------------------------
// Wire fixtures
// ---------------------------------------------------------------------------

pub fn league(id: &str, name: &str, slug: &str, priority: i64) -> WireLeague {
    WireLeague {
        id: Some(id.into()),
        name: Some(name.into()),
        slug: Some(slug.into()),
        region: Some("region".into()),
        priority: Some(priority),
        ..Default::default()
    }
}

pub fn tournament(id: &str, slug: &str) -> WireTournament {
    WireTournament {
        id: Some(id.into()),
        slug: Some(slug.into()),
        start_date: Some("2023-06-01".into()),
        end_date: Some("2023-08-20".into()),
    }
}

/// (ordinal, code, name, slug, wins, losses)
pub type Row<'a> = (u32, &'a str, &'a str, &'a str, u32, u32);

pub fn standing(slug: &str, rows: &[Row]) -> WireStanding {
    let rankings = rows
        .iter()
        .map(|&(ordinal, code, name, team_slug, wins, losses)| WireRanking {
            ordinal: Some(ordinal),
            teams: Some(vec![WireMatchTeam {
                code: Some(code.into()),
                name: Some(name.into()),
                slug: Some(team_slug.into()),
                record: Some(WireRecord { wins: Some(wins), losses: Some(losses) }),
                ..Default::default()
            }]),
        })
        .collect();
    WireStanding {
        slug: Some(slug.into()),
        stages: Some(vec![WireStage {
            name: Some("Regular Season".into()),
            slug: Some("regular_season".into()),
            sections: Some(vec![WireSection {
                name: Some("Regular Season".into()),
                rankings: Some(rankings),
            }]),
        }]),
    }
}

pub fn match_event(id: &str, league_name: &str, codes: [&str; 2]) -> WireEvent {
    WireEvent {
        id: Some(id.into()),
        event_type: Some("match".into()),
        state: Some("unstarted".into()),
        start_time: Some("2023-10-19T08:00:00Z".into()),
        block_name: Some("Swiss Stage".into()),
        league: Some(WireLeague {
            id: Some("98767975604431411".into()),
            name: Some(league_name.into()),
            slug: Some(league_name.to_lowercase()),
            ..Default::default()
        }),
        match_info: Some(WireMatch {
            id: Some(format!("m{id}")),
            teams: Some(
                codes
                    .iter()
                    .map(|code| WireMatchTeam {
                        code: Some((*code).into()),
                        name: Some(format!("Team {code}")),
                        ..Default::default()
                    })
                    .collect(),
            ),
            ..Default::default()
        }),
    }
}
