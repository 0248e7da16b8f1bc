use crate::client::ApiResult;
use crate::upstream::{EventListQuery, Upstream};
use crate::wire::{WireEvent, WireGame, WireMatch};
use crate::{Event, EventKind, EventLeague, EventState, GameSlot, GameState, MatchDetail, MatchTeam};
use chrono::{DateTime, Utc};
use log::debug;

/// Most upcoming events a single answer will carry.
pub const UPCOMING_LIMIT: usize = 10;

/// One page of the league schedule.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schedule {
    pub events: Vec<Event>,
    pub older: Option<String>,
    pub newer: Option<String>,
}

/// Everything live right now, in gateway order. Empty when nothing is on.
pub async fn live_events<U: Upstream>(upstream: &U) -> ApiResult<Vec<Event>> {
    let events = map_events(upstream.get_live().await?);
    debug!("{} live events", events.len());
    Ok(events)
}

/// Match events of one schedule page; pre-shows are left out.
pub async fn schedule<U: Upstream>(
    upstream: &U,
    league_id: Option<&str>,
    page_token: Option<&str>,
) -> ApiResult<Schedule> {
    let raw = upstream.get_schedule(league_id, page_token).await?;
    let events = map_events(raw.events.unwrap_or_default())
        .into_iter()
        .filter(|e| e.kind == EventKind::Match)
        .collect();
    let pages = raw.pages.unwrap_or_default();
    Ok(Schedule { events, older: pages.older, newer: pages.newer })
}

/// Unstarted matches for a league set or a team, in gateway order.
pub async fn upcoming<U: Upstream>(upstream: &U, query: &EventListQuery) -> ApiResult<Vec<Event>> {
    let events: Vec<Event> = map_events(upstream.get_event_list(query).await?)
        .into_iter()
        .filter(|e| e.kind == EventKind::Match && e.state == EventState::Unstarted)
        .collect();
    debug!("{} upcoming events for {query:?}", events.len());
    Ok(events)
}

/// The first `limit` (at most [`UPCOMING_LIMIT`]) events whose teams are all
/// known.
pub fn resolved_upcoming(events: &[Event], limit: usize) -> Vec<Event> {
    events
        .iter()
        .filter(|e| e.is_resolved())
        .take(limit.min(UPCOMING_LIMIT))
        .cloned()
        .collect()
}

/// Index of the event starting nearest to `now`, before or after. Events
/// without a start time are never picked.
pub fn closest_event_index(events: &[Event], now: DateTime<Utc>) -> Option<usize> {
    events
        .iter()
        .enumerate()
        .filter_map(|(i, e)| e.start_time.map(|t| (i, (t - now).abs())))
        .min_by_key(|&(_, distance)| distance)
        .map(|(i, _)| i)
}

/// Rotate so the event closest to `now` comes first, keeping the cyclic
/// order of the rest.
pub fn rotate_to_closest(mut events: Vec<Event>, now: DateTime<Utc>) -> Vec<Event> {
    if let Some(i) = closest_event_index(&events, now) {
        events.rotate_left(i);
    }
    events
}

// ---------------------------------------------------------------------------
// Mapping: wire event -> Event
// ---------------------------------------------------------------------------

fn map_events(raw: Vec<WireEvent>) -> Vec<Event> {
    raw.into_iter().filter_map(map_event).collect()
}

/// Events without an id cannot be tracked and are dropped.
pub fn map_event(w: WireEvent) -> Option<Event> {
    let kind = match w.event_type.as_deref() {
        Some("show") => EventKind::Show,
        _ => EventKind::Match,
    };
    let state = match w.state.as_deref() {
        Some("inProgress") => EventState::InProgress,
        Some("completed") => EventState::Completed,
        _ => EventState::Unstarted,
    };
    let start_time = w
        .start_time
        .as_deref()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|t| t.with_timezone(&Utc));
    let league = w
        .league
        .map(|l| EventLeague {
            id: l.id,
            name: l.name.unwrap_or_default(),
            slug: l.slug.unwrap_or_default(),
        })
        .unwrap_or_default();

    Some(Event {
        id: w.id?,
        kind,
        state,
        start_time,
        block_name: w.block_name,
        league,
        detail: w.match_info.map(map_match),
    })
}

fn map_match(w: WireMatch) -> MatchDetail {
    let teams = w
        .teams
        .unwrap_or_default()
        .into_iter()
        .map(|t| MatchTeam {
            code: t.code.unwrap_or_default(),
            name: t.name.unwrap_or_default(),
            game_wins: t.result.and_then(|r| r.game_wins).unwrap_or(0),
        })
        .collect();
    MatchDetail {
        id: w.id.unwrap_or_default(),
        teams,
        games: w.games.unwrap_or_default().into_iter().filter_map(map_game).collect(),
        best_of: w.strategy.and_then(|s| s.count),
    }
}

fn map_game(w: WireGame) -> Option<GameSlot> {
    let state = match w.state.as_deref() {
        Some("inProgress") => GameState::InProgress,
        Some("completed") => GameState::Completed,
        Some("unneeded") => GameState::Unneeded,
        _ => GameState::Unstarted,
    };
    Some(GameSlot { number: w.number?, state })
}
