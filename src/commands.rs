use crate::state::app_settings::AppSettings;
use chrono::Utc;
use log::error;
use lolesports_api::catalog::LeagueCatalog;
use lolesports_api::client::ApiResult;
use lolesports_api::events::{self, UPCOMING_LIMIT};
use lolesports_api::standings::StandingsAggregator;
use lolesports_api::upstream::{EventListQuery, Upstream};
use lolesports_api::{Event, EventState, League, regions, teams};

pub const SOMETHING_WENT_WRONG: &str = "Something went wrong.";
pub const NOTHING_FOUND: &str = "Nothing found.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeagueFilter {
    All,
    Major,
    Popular,
    Primary,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    Leagues(LeagueFilter),
    /// `region` is a region key or `major` for every major league.
    Standings { region: String, timeframe: String },
    Team { code: String, region: String, timeframe: String },
    Upnext(UpnextTarget),
    Schedule(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpnextTarget {
    /// The leagues the monitor uses for its own upnext alerts.
    Configured,
    Region(String),
    /// A team code (or slug) from the region's standings in `timeframe`.
    Team { team: String, region: String, timeframe: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Cli {
    Watch,
    Query(Query),
    Help,
    Version,
}

pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Cli, String> {
    let args: Vec<String> = args.into_iter().collect();
    let words: Vec<&str> = args.iter().map(String::as_str).collect();
    let query = match words.as_slice() {
        [] | ["watch"] => return Ok(Cli::Watch),
        ["-h" | "--help" | "help"] => return Ok(Cli::Help),
        ["-V" | "--version"] => return Ok(Cli::Version),
        ["leagues"] => Query::Leagues(LeagueFilter::All),
        ["leagues", filter] => Query::Leagues(match *filter {
            "all" => LeagueFilter::All,
            "major" => LeagueFilter::Major,
            "popular" => LeagueFilter::Popular,
            "primary" => LeagueFilter::Primary,
            other => return Err(format!("Unknown league filter: {other}")),
        }),
        ["standings", region, timeframe] => Query::Standings {
            region: region.to_string(),
            timeframe: timeframe.to_string(),
        },
        ["team", code, region, timeframe] => Query::Team {
            code: code.to_string(),
            region: region.to_string(),
            timeframe: timeframe.to_string(),
        },
        ["upnext"] => Query::Upnext(UpnextTarget::Configured),
        ["upnext", region] => Query::Upnext(UpnextTarget::Region(region.to_string())),
        ["upnext", team, region, timeframe] => Query::Upnext(UpnextTarget::Team {
            team: team.to_string(),
            region: region.to_string(),
            timeframe: timeframe.to_string(),
        }),
        ["schedule", region] => Query::Schedule(region.to_string()),
        _ => return Err(format!("Unknown arguments: {}", words.join(" "))),
    };
    Ok(Cli::Query(query))
}

/// Answer one query. `Ok(None)` means the lookups worked but found nothing.
pub async fn run_query<U: Upstream>(
    upstream: &U,
    settings: &AppSettings,
    query: &Query,
) -> ApiResult<Option<String>> {
    let catalog = LeagueCatalog::new(upstream, &settings.catalog);
    match query {
        Query::Leagues(filter) => {
            let leagues = match filter {
                LeagueFilter::All => catalog.fetch_leagues(true).await?,
                LeagueFilter::Major => catalog.major_leagues().await?,
                LeagueFilter::Popular | LeagueFilter::Primary => {
                    let Some(tiers) = catalog.tiers().await? else {
                        return Ok(None);
                    };
                    if *filter == LeagueFilter::Popular { tiers.popular() } else { tiers.primary() }
                }
            };
            Ok(lines(leagues.iter().map(render_league_line)))
        }
        Query::Standings { region, timeframe } => {
            let league_ids = if region.eq_ignore_ascii_case("major") {
                catalog.major_leagues().await?.into_iter().map(|l| l.id).collect()
            } else {
                vec![regions::league_id(region)?.to_owned()]
            };
            StandingsAggregator::new(upstream)
                .display_standings(&league_ids, timeframe)
                .await
        }
        Query::Team { code, region, timeframe } => {
            let league_id = regions::league_id(region)?;
            let team = teams::find_team(upstream, league_id, timeframe, code).await?;
            Ok(team.as_ref().map(teams::render_team))
        }
        Query::Upnext(target) => {
            let query = match target {
                UpnextTarget::Configured => {
                    EventListQuery::Leagues(settings.monitor.upnext_leagues.clone())
                }
                UpnextTarget::Region(region) => {
                    EventListQuery::Leagues(vec![regions::league_id(region)?.to_owned()])
                }
                UpnextTarget::Team { team, region, timeframe } => {
                    let league_id = regions::league_id(region)?;
                    let directory = teams::team_directory(upstream, league_id, timeframe).await?;
                    let Some(directory) = directory else {
                        return Ok(None);
                    };
                    EventListQuery::Team(directory.resolve(team)?.to_owned())
                }
            };
            let upcoming = events::upcoming(upstream, &query).await?;
            let shown = events::resolved_upcoming(&upcoming, UPCOMING_LIMIT);
            Ok(lines(shown.iter().map(render_event_line)))
        }
        Query::Schedule(region) => {
            let league_id = regions::league_id(region)?;
            let schedule = events::schedule(upstream, Some(league_id), None).await?;
            let events = events::rotate_to_closest(schedule.events, Utc::now());
            Ok(lines(events.iter().map(render_event_line)))
        }
    }
}

/// What the user sees. Errors never leak details; those go to the log.
pub fn outcome_text(result: ApiResult<Option<String>>) -> String {
    match result {
        Ok(Some(text)) => text,
        Ok(None) => NOTHING_FOUND.to_owned(),
        Err(e) => {
            error!("query failed: {e}");
            SOMETHING_WENT_WRONG.to_owned()
        }
    }
}

pub fn render_league_line(league: &League) -> String {
    format!("{} ({}) {}", league.name, league.slug, league.region)
}

/// "2023-10-19 08:00 UTC  Worlds  T1 vs WBG  (Knockouts)"
pub fn render_event_line(event: &Event) -> String {
    let when = event
        .start_time
        .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "time TBD".to_owned());
    let mut line = format!("{when}  {}  {}", event.league.name, event.presence_label());
    if let Some(score) = event.scoreline().filter(|_| event.state != EventState::Unstarted) {
        line = format!("{line}  [{score}]");
    }
    if let Some(block) = &event.block_name {
        line = format!("{line}  ({block})");
    }
    line
}

fn lines(rendered: impl Iterator<Item = String>) -> Option<String> {
    let rendered: Vec<String> = rendered.collect();
    if rendered.is_empty() { None } else { Some(rendered.join("\n")) }
}
