use crate::client::ApiResult;
use crate::wire::{WireEvent, WireLeague, WireSchedule, WireStanding, WireTeam};
use std::future::Future;

/// Selector for the event-list lookup: either a set of leagues or one team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventListQuery {
    Leagues(Vec<String>),
    Team(String),
}

/// The gateway operations everything else is built on. Payloads come back
/// decoded but un-normalized; the resolvers own the mapping.
///
/// No retries happen behind this trait: a failure is reported once and the
/// caller decides whether it is fatal.
pub trait Upstream: Send + Sync {
    fn get_live(&self) -> impl Future<Output = ApiResult<Vec<WireEvent>>> + Send;

    fn get_schedule(
        &self,
        league_id: Option<&str>,
        page_token: Option<&str>,
    ) -> impl Future<Output = ApiResult<WireSchedule>> + Send;

    fn get_leagues(&self) -> impl Future<Output = ApiResult<Vec<WireLeague>>> + Send;

    /// One entry per requested league, each carrying its `tournaments`.
    fn get_tournaments(
        &self,
        league_ids: &[String],
    ) -> impl Future<Output = ApiResult<Vec<WireLeague>>> + Send;

    fn get_standings(
        &self,
        tournament_ids: &[String],
    ) -> impl Future<Output = ApiResult<Vec<WireStanding>>> + Send;

    fn get_team(&self, slug: &str) -> impl Future<Output = ApiResult<Vec<WireTeam>>> + Send;

    fn get_event_list(
        &self,
        query: &EventListQuery,
    ) -> impl Future<Output = ApiResult<Vec<WireEvent>>> + Send;
}
