//! Scripted `Upstream` for the monitor, scheduler and command tests.

use lolesports_api::client::{ApiError, ApiResult};
use lolesports_api::regions;
use lolesports_api::upstream::{EventListQuery, Upstream};
use lolesports_api::wire::{
    WireEvent, WireLeague, WireMatch, WireMatchTeam, WireRanking, WireRecord, WireSchedule,
    WireSection, WireStage, WireStanding, WireTeam, WireTournament,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

#[derive(Default)]
struct Script {
    /// One entry per `get_live` call; an exhausted script means nothing live.
    live: VecDeque<ApiResult<Vec<WireEvent>>>,
    live_calls: usize,
    upcoming: Vec<WireEvent>,
    /// Upcoming lookups still to fail before `upcoming` is served.
    event_list_errors: usize,
    event_queries: Vec<EventListQuery>,
    schedule: WireSchedule,
    leagues: Vec<WireLeague>,
    tournaments: Vec<(String, Vec<WireTournament>)>,
    standings: Vec<(String, WireStanding)>,
}

/// Cheap to clone; clones share one script.
#[derive(Clone, Default)]
pub struct ScriptedUpstream {
    script: Arc<Mutex<Script>>,
}

impl ScriptedUpstream {
    fn script(&self) -> std::sync::MutexGuard<'_, Script> {
        self.script.lock().unwrap()
    }

    pub fn push_live(&self, events: Vec<WireEvent>) {
        self.script().live.push_back(Ok(events));
    }

    pub fn push_live_error(&self) {
        self.script()
            .live
            .push_back(Err(ApiError::Missing("events", "scripted".into())));
    }

    pub fn live_calls(&self) -> usize {
        self.script().live_calls
    }

    pub fn set_upcoming(&self, events: Vec<WireEvent>) {
        self.script().upcoming = events;
    }

    pub fn push_event_list_error(&self) {
        self.script().event_list_errors += 1;
    }

    pub fn event_list_calls(&self) -> usize {
        self.script().event_queries.len()
    }

    pub fn last_event_query(&self) -> Option<EventListQuery> {
        self.script().event_queries.last().cloned()
    }

    pub fn set_schedule(&self, events: Vec<WireEvent>) {
        self.script().schedule = WireSchedule { events: Some(events), pages: None };
    }

    pub fn set_leagues(&self, leagues: Vec<WireLeague>) {
        self.script().leagues = leagues;
    }

    pub fn add_tournaments(&self, league_id: &str, tournaments: Vec<WireTournament>) {
        self.script().tournaments.push((league_id.to_owned(), tournaments));
    }

    pub fn add_standing(&self, tournament_id: &str, standing: WireStanding) {
        self.script().standings.push((tournament_id.to_owned(), standing));
    }
}

impl Upstream for ScriptedUpstream {
    async fn get_live(&self) -> ApiResult<Vec<WireEvent>> {
        let mut script = self.script();
        script.live_calls += 1;
        script.live.pop_front().unwrap_or(Ok(Vec::new()))
    }

    async fn get_schedule(&self, _league_id: Option<&str>, _page: Option<&str>) -> ApiResult<WireSchedule> {
        Ok(self.script().schedule.clone())
    }

    async fn get_leagues(&self) -> ApiResult<Vec<WireLeague>> {
        Ok(self.script().leagues.clone())
    }

    async fn get_tournaments(&self, league_ids: &[String]) -> ApiResult<Vec<WireLeague>> {
        let script = self.script();
        Ok(league_ids
            .iter()
            .filter_map(|id| script.tournaments.iter().find(|(league, _)| league == id))
            .map(|(league, tournaments)| WireLeague {
                id: Some(league.clone()),
                tournaments: Some(tournaments.clone()),
                ..Default::default()
            })
            .collect())
    }

    async fn get_standings(&self, tournament_ids: &[String]) -> ApiResult<Vec<WireStanding>> {
        let script = self.script();
        Ok(tournament_ids
            .iter()
            .filter_map(|id| script.standings.iter().find(|(t, _)| t == id))
            .map(|(_, standing)| standing.clone())
            .collect())
    }

    async fn get_team(&self, _slug: &str) -> ApiResult<Vec<WireTeam>> {
        Ok(Vec::new())
    }

    async fn get_event_list(&self, query: &EventListQuery) -> ApiResult<Vec<WireEvent>> {
        let mut script = self.script();
        script.event_queries.push(query.clone());
        if script.event_list_errors > 0 {
            script.event_list_errors -= 1;
            return Err(ApiError::Missing("events", "scripted".into()));
        }
        Ok(script.upcoming.clone())
    }
}

// ---------------------------------------------------------------------------
// Wire fixtures
// ---------------------------------------------------------------------------

pub fn league_id(key: &str) -> String {
    regions::league_id(key).unwrap().to_owned()
}

fn event_league(name: &str) -> WireLeague {
    WireLeague {
        id: Some(league_id(name)),
        name: Some(name.into()),
        slug: Some(name.to_lowercase()),
        ..Default::default()
    }
}

pub fn show(id: &str, league: &str) -> WireEvent {
    WireEvent {
        id: Some(id.into()),
        event_type: Some("show".into()),
        state: Some("inProgress".into()),
        start_time: Some("2023-10-19T07:00:00Z".into()),
        league: Some(event_league(league)),
        ..Default::default()
    }
}

pub fn match_event(id: &str, league: &str, codes: [&str; 2]) -> WireEvent {
    WireEvent {
        id: Some(id.into()),
        event_type: Some("match".into()),
        state: Some("unstarted".into()),
        start_time: Some("2023-10-19T08:00:00Z".into()),
        block_name: Some("Knockouts".into()),
        league: Some(event_league(league)),
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
    WireTournament { id: Some(id.into()), slug: Some(slug.into()), ..Default::default() }
}

/// Regular-season standing listing `(code, slug)` pairs in rank order, all 0-0.
pub fn standing(slug: &str, teams: &[(&str, &str)]) -> WireStanding {
    let rankings = teams
        .iter()
        .zip(1..)
        .map(|(&(code, team_slug), ordinal)| WireRanking {
            ordinal: Some(ordinal),
            teams: Some(vec![WireMatchTeam {
                code: Some(code.into()),
                name: Some(format!("Team {code}")),
                slug: Some(team_slug.into()),
                record: Some(WireRecord { wins: Some(0), losses: Some(0) }),
                ..Default::default()
            }]),
        })
        .collect();
    WireStanding {
        slug: Some(slug.into()),
        stages: Some(vec![WireStage {
            sections: Some(vec![WireSection { rankings: Some(rankings), ..Default::default() }]),
            ..Default::default()
        }]),
    }
}
