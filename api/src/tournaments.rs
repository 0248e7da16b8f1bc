use crate::client::ApiResult;
use crate::upstream::Upstream;
use crate::wire::{WireLeague, WireTournament};
use crate::{LeagueTournaments, Tournament, TournamentSet};
use chrono::NaiveDate;
use log::debug;
use std::collections::HashMap;
use std::sync::Mutex;

/// The one place that decides whether a tournament belongs to a timeframe.
/// Tokens are matched as substrings of the slug ("summer_2023" matches
/// "lcs_summer_2023"), so a token can match several tournaments.
pub fn timeframe_matches(slug: &str, timeframe: &str) -> bool {
    slug.contains(timeframe)
}

/// Keep the tournaments whose slug carries `timeframe`, in their given order.
/// An empty result is a valid answer.
pub fn match_by_timeframe(tournaments: &[Tournament], timeframe: &str) -> Vec<Tournament> {
    tournaments
        .iter()
        .filter(|t| timeframe_matches(&t.slug, timeframe))
        .cloned()
        .collect()
}

pub fn tournament_ids(set: &TournamentSet) -> Vec<String> {
    match set {
        TournamentSet::Flat(tournaments) => tournaments.iter().map(|t| t.id.clone()).collect(),
        TournamentSet::Nested(leagues) => leagues
            .iter()
            .flat_map(|l| &l.tournaments)
            .map(|t| t.id.clone())
            .collect(),
    }
}

type CurrentKey = (String, String);

/// Tournament lookups for one caller. The "current tournament" answer is
/// remembered for as long as the resolver lives and is never invalidated;
/// build a new resolver to see fresh data.
pub struct TournamentResolver<'a, U> {
    upstream: &'a U,
    current: Mutex<HashMap<CurrentKey, Option<String>>>,
}

impl<'a, U: Upstream> TournamentResolver<'a, U> {
    pub fn new(upstream: &'a U) -> Self {
        Self { upstream, current: Mutex::new(HashMap::new()) }
    }

    /// Tournaments grouped by league, or flattened and filtered when a
    /// timeframe is given.
    pub async fn fetch_tournaments(
        &self,
        league_ids: &[String],
        timeframe: Option<&str>,
    ) -> ApiResult<TournamentSet> {
        let nested: Vec<LeagueTournaments> = self
            .upstream
            .get_tournaments(league_ids)
            .await?
            .into_iter()
            .map(map_league_tournaments)
            .collect();

        let Some(timeframe) = timeframe else {
            return Ok(TournamentSet::Nested(nested));
        };
        let all = TournamentSet::Nested(nested).into_flat();
        let matched = match_by_timeframe(&all, timeframe);
        debug!("{} of {} tournaments match {timeframe:?}", matched.len(), all.len());
        Ok(TournamentSet::Flat(matched))
    }

    /// Id of the most recent tournament of `league_id` within `timeframe`.
    /// Relies on the gateway listing tournaments oldest first.
    ///
    /// Two concurrent first calls may both hit the network; either result is
    /// kept.
    pub async fn current_tournament_id(
        &self,
        league_id: &str,
        timeframe: &str,
    ) -> ApiResult<Option<String>> {
        let key = (league_id.to_owned(), timeframe.to_owned());
        if let Some(cached) = self.cached(&key) {
            return Ok(cached);
        }

        let set = self
            .fetch_tournaments(&[league_id.to_owned()], Some(timeframe))
            .await?;
        let current = tournament_ids(&set).pop();

        self.current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(key, current.clone());
        Ok(current)
    }

    fn cached(&self, key: &CurrentKey) -> Option<Option<String>> {
        self.current
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(key)
            .cloned()
    }
}

// ---------------------------------------------------------------------------
// Mapping: wire league/tournaments -> LeagueTournaments
// ---------------------------------------------------------------------------

fn map_league_tournaments(w: WireLeague) -> LeagueTournaments {
    let league_id = w.id.unwrap_or_default();
    let tournaments = w
        .tournaments
        .unwrap_or_default()
        .into_iter()
        .filter_map(|t| map_tournament(t, &league_id))
        .collect();
    LeagueTournaments { league_id, tournaments }
}

/// Tournaments without an id or slug cannot be matched or queried; skip them.
fn map_tournament(w: WireTournament, league_id: &str) -> Option<Tournament> {
    let parse_date = |s: Option<String>| {
        s.and_then(|d| NaiveDate::parse_from_str(&d, "%Y-%m-%d").ok())
    };
    Some(Tournament {
        id: w.id?,
        slug: w.slug?,
        league_id: league_id.to_owned(),
        start_date: parse_date(w.start_date),
        end_date: parse_date(w.end_date),
    })
}
