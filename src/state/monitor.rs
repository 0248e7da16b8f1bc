use crate::state::messages::MonitorAction;
use log::{debug, info, warn};
use lolesports_api::client::ApiResult;
use lolesports_api::events::{self, UPCOMING_LIMIT};
use lolesports_api::upstream::{EventListQuery, Upstream};
use lolesports_api::{Event, EventKind};

/// Whether an event that is still live gets announced again on later ticks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ReannouncePolicy {
    /// Matches are re-announced every tick; shows only once.
    #[default]
    WhileMatch,
    Once,
}

impl ReannouncePolicy {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "match" | "while-match" => Some(ReannouncePolicy::WhileMatch),
            "once" => Some(ReannouncePolicy::Once),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    pub reannounce: ReannouncePolicy,
    /// Upnext league context when the ended event carried no league id.
    pub upnext_leagues: Vec<String>,
    pub upnext_limit: usize,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            reannounce: ReannouncePolicy::default(),
            upnext_leagues: lolesports_api::regions::INTERNATIONAL.map(String::from).to_vec(),
            upnext_limit: UPCOMING_LIMIT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorPhase {
    Idle,
    LiveAnnounced,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonitorState {
    pub current_event_id: Option<String>,
    /// Set when a live event ends; cleared once upnext has been settled.
    pub pending_upnext: bool,
    pub upnext_sent: bool,
    /// League of the last live event, used to look up what comes next.
    pub league_context: Option<String>,
}

impl MonitorState {
    pub fn phase(&self) -> MonitorPhase {
        if self.current_event_id.is_some() {
            MonitorPhase::LiveAnnounced
        } else {
            MonitorPhase::Idle
        }
    }
}

/// The live-event state machine. One `tick` per poll; the state is only
/// changed from inside `tick`.
pub struct LiveMonitor<U> {
    upstream: U,
    config: MonitorConfig,
    state: MonitorState,
}

impl<U: Upstream> LiveMonitor<U> {
    pub fn new(upstream: U, config: MonitorConfig) -> Self {
        Self { upstream, config, state: MonitorState::default() }
    }

    pub fn state(&self) -> &MonitorState {
        &self.state
    }

    /// Poll once. Fails only when the live query fails, and then before any
    /// state has changed.
    pub async fn tick(&mut self) -> ApiResult<Vec<MonitorAction>> {
        let live = events::live_events(&self.upstream).await?;
        let mut actions = Vec::new();

        match live.into_iter().next() {
            Some(event) => {
                let is_new = self.state.current_event_id.as_deref() != Some(event.id.as_str());
                let repeat = !is_new
                    && self.config.reannounce == ReannouncePolicy::WhileMatch
                    && event.kind == EventKind::Match;

                if is_new {
                    info!("live: {} {} ({})", event.league.name, event.kind.label(), event.id);
                    self.state = MonitorState {
                        current_event_id: Some(event.id.clone()),
                        league_context: event.league.id.clone(),
                        ..Default::default()
                    };
                }
                if is_new || repeat {
                    actions.push(announce(&event));
                }
            }
            None => {
                if let Some(ended) = self.state.current_event_id.take() {
                    info!("live event {ended} ended");
                    self.state.pending_upnext = true;
                    self.state.upnext_sent = false;
                    actions.push(MonitorAction::Clear);
                }
                if self.state.pending_upnext
                    && let Some(upnext) = self.settle_upnext().await
                {
                    actions.push(upnext);
                }
            }
        }
        Ok(actions)
    }

    /// Look for what comes after the event that just ended. Stays pending on
    /// failure or while every upcoming match still has a TBD slot.
    async fn settle_upnext(&mut self) -> Option<MonitorAction> {
        let leagues = match &self.state.league_context {
            Some(id) => vec![id.clone()],
            None => self.config.upnext_leagues.clone(),
        };
        let upcoming = match events::upcoming(&self.upstream, &EventListQuery::Leagues(leagues)).await {
            Ok(upcoming) => upcoming,
            Err(e) => {
                warn!("upnext lookup failed, retrying next tick: {e}");
                return None;
            }
        };

        if upcoming.is_empty() {
            debug!("no upcoming events, upnext settled");
            self.mark_upnext_sent();
            return None;
        }
        let resolved = events::resolved_upcoming(&upcoming, self.config.upnext_limit);
        if resolved.is_empty() {
            debug!("{} upcoming events, none resolved yet", upcoming.len());
            return None;
        }
        self.mark_upnext_sent();
        Some(MonitorAction::Upnext { events: resolved })
    }

    fn mark_upnext_sent(&mut self) {
        self.state.pending_upnext = false;
        self.state.upnext_sent = true;
    }
}

fn announce(event: &Event) -> MonitorAction {
    MonitorAction::Announce {
        event_id: event.id.clone(),
        kind: event.kind,
        league: event.league.name.clone(),
        presence: event.presence_label(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::testing::{self, ScriptedUpstream};

    fn monitor(upstream: ScriptedUpstream, reannounce: ReannouncePolicy) -> LiveMonitor<ScriptedUpstream> {
        LiveMonitor::new(upstream, MonitorConfig { reannounce, ..Default::default() })
    }

    fn is_announce(action: &MonitorAction, id: &str) -> bool {
        matches!(action, MonitorAction::Announce { event_id, .. } if event_id == id)
    }

    #[tokio::test]
    async fn show_is_announced_once_then_cleared_then_upnext_once() {
        let upstream = ScriptedUpstream::default();
        upstream.push_live(vec![]);
        upstream.push_live(vec![testing::show("A", "Worlds")]);
        upstream.push_live(vec![testing::show("A", "Worlds")]);
        upstream.push_live(vec![]);
        upstream.push_live(vec![]);
        upstream.set_upcoming(vec![testing::match_event("U1", "Worlds", ["T1", "WBG"])]);
        let mut monitor = monitor(upstream.clone(), ReannouncePolicy::WhileMatch);

        assert!(monitor.tick().await.unwrap().is_empty());

        let second = monitor.tick().await.unwrap();
        assert_eq!(second.len(), 1);
        assert!(is_announce(&second[0], "A"));
        assert_eq!(monitor.state().phase(), MonitorPhase::LiveAnnounced);

        assert!(monitor.tick().await.unwrap().is_empty());

        let fourth = monitor.tick().await.unwrap();
        assert_eq!(fourth.len(), 2);
        assert_eq!(fourth[0], MonitorAction::Clear);
        let MonitorAction::Upnext { events } = &fourth[1] else {
            panic!("expected upnext, got {:?}", fourth[1]);
        };
        assert_eq!(events[0].id, "U1");

        assert!(monitor.tick().await.unwrap().is_empty());
        assert_eq!(monitor.state().phase(), MonitorPhase::Idle);
        assert!(monitor.state().upnext_sent);
        assert_eq!(upstream.event_list_calls(), 1);
    }

    #[tokio::test]
    async fn matches_reannounce_every_tick_shows_do_not() {
        let upstream = ScriptedUpstream::default();
        upstream.push_live(vec![testing::match_event("A", "LCK", ["T1", "GEN"])]);
        upstream.push_live(vec![testing::match_event("A", "LCK", ["T1", "GEN"])]);
        let mut matches = monitor(upstream, ReannouncePolicy::WhileMatch);
        for _ in 0..2 {
            let actions = matches.tick().await.unwrap();
            assert_eq!(actions.len(), 1);
            let MonitorAction::Announce { presence, kind, .. } = &actions[0] else {
                panic!("expected announce");
            };
            assert_eq!(presence, "T1 vs GEN");
            assert_eq!(*kind, EventKind::Match);
        }

        let upstream = ScriptedUpstream::default();
        upstream.push_live(vec![testing::show("B", "LCK")]);
        upstream.push_live(vec![testing::show("B", "LCK")]);
        let mut shows = monitor(upstream, ReannouncePolicy::WhileMatch);
        let first = shows.tick().await.unwrap();
        assert!(matches!(&first[0], MonitorAction::Announce { presence, .. } if presence == "Pre-show"));
        assert!(shows.tick().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn once_policy_never_repeats_matches() {
        let upstream = ScriptedUpstream::default();
        upstream.push_live(vec![testing::match_event("A", "LCK", ["T1", "GEN"])]);
        upstream.push_live(vec![testing::match_event("A", "LCK", ["T1", "GEN"])]);
        let mut monitor = monitor(upstream, ReannouncePolicy::Once);
        assert_eq!(monitor.tick().await.unwrap().len(), 1);
        assert!(monitor.tick().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn a_different_event_is_announced_without_a_clear() {
        let upstream = ScriptedUpstream::default();
        upstream.push_live(vec![testing::show("A", "LEC")]);
        upstream.push_live(vec![testing::match_event("B", "LEC", ["G2", "FNC"])]);
        let mut monitor = monitor(upstream, ReannouncePolicy::Once);
        monitor.tick().await.unwrap();
        let actions = monitor.tick().await.unwrap();
        assert_eq!(actions.len(), 1);
        assert!(is_announce(&actions[0], "B"));
        assert_eq!(monitor.state().current_event_id.as_deref(), Some("B"));
    }

    #[tokio::test]
    async fn upnext_waits_for_resolved_teams() {
        let upstream = ScriptedUpstream::default();
        upstream.push_live(vec![testing::match_event("A", "Worlds", ["T1", "BLG"])]);
        for _ in 0..3 {
            upstream.push_live(vec![]);
        }
        upstream.set_upcoming(vec![testing::match_event("F", "Worlds", ["TBD", "TBD"])]);
        let mut monitor = monitor(upstream.clone(), ReannouncePolicy::Once);

        monitor.tick().await.unwrap();
        assert_eq!(monitor.tick().await.unwrap(), vec![MonitorAction::Clear]);
        assert!(monitor.state().pending_upnext);
        assert!(monitor.tick().await.unwrap().is_empty());

        upstream.set_upcoming(vec![
            testing::match_event("S", "Worlds", ["T1", "WBG"]),
            testing::match_event("F", "Worlds", ["T1", "TBD"]),
        ]);
        let actions = monitor.tick().await.unwrap();
        assert!(matches!(&actions[..], [MonitorAction::Upnext { events }] if events.len() == 1));
        assert!(!monitor.state().pending_upnext);
    }

    #[tokio::test]
    async fn empty_upcoming_list_settles_without_action() {
        let upstream = ScriptedUpstream::default();
        upstream.push_live(vec![testing::show("A", "MSI")]);
        upstream.push_live(vec![]);
        upstream.push_live(vec![]);
        let mut monitor = monitor(upstream.clone(), ReannouncePolicy::Once);

        monitor.tick().await.unwrap();
        assert_eq!(monitor.tick().await.unwrap(), vec![MonitorAction::Clear]);
        assert!(monitor.state().upnext_sent);
        assert!(monitor.tick().await.unwrap().is_empty());
        assert_eq!(upstream.event_list_calls(), 1);
    }

    #[tokio::test]
    async fn failed_upnext_lookup_is_retried_on_the_next_idle_tick() {
        let upstream = ScriptedUpstream::default();
        upstream.push_live(vec![testing::show("A", "Worlds")]);
        upstream.push_live(vec![]);
        upstream.push_event_list_error();
        upstream.set_upcoming(vec![testing::match_event("U1", "Worlds", ["T1", "WBG"])]);
        let mut monitor = monitor(upstream.clone(), ReannouncePolicy::Once);

        monitor.tick().await.unwrap();
        assert_eq!(monitor.tick().await.unwrap(), vec![MonitorAction::Clear]);
        assert!(monitor.state().pending_upnext);
        assert!(!monitor.state().upnext_sent);
        assert_eq!(upstream.event_list_calls(), 1);

        let actions = monitor.tick().await.unwrap();
        assert!(matches!(&actions[..], [MonitorAction::Upnext { events }] if events.len() == 1));
        assert!(monitor.state().upnext_sent);

        assert!(monitor.tick().await.unwrap().is_empty());
        assert_eq!(upstream.event_list_calls(), 2);
    }

    #[tokio::test]
    async fn failed_live_query_leaves_state_alone() {
        let upstream = ScriptedUpstream::default();
        upstream.push_live(vec![testing::show("A", "MSI")]);
        upstream.push_live_error();
        upstream.push_live(vec![testing::show("A", "MSI")]);
        let mut monitor = monitor(upstream, ReannouncePolicy::Once);

        monitor.tick().await.unwrap();
        let before = monitor.state().clone();
        assert!(monitor.tick().await.is_err());
        assert_eq!(monitor.state(), &before);
        assert!(monitor.tick().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn upnext_uses_the_ended_event_league() {
        let upstream = ScriptedUpstream::default();
        upstream.push_live(vec![testing::show("A", "LCK")]);
        upstream.push_live(vec![]);
        let mut monitor = monitor(upstream.clone(), ReannouncePolicy::Once);
        monitor.tick().await.unwrap();
        monitor.tick().await.unwrap();
        assert_eq!(
            upstream.last_event_query(),
            Some(EventListQuery::Leagues(vec![testing::league_id("LCK")]))
        );
    }

    #[test]
    fn reannounce_policy_parsing() {
        assert_eq!(ReannouncePolicy::parse("MATCH"), Some(ReannouncePolicy::WhileMatch));
        assert_eq!(ReannouncePolicy::parse("once"), Some(ReannouncePolicy::Once));
        assert_eq!(ReannouncePolicy::parse("always"), None);
    }
}
