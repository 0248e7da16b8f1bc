use crate::client::{ApiError, ApiResult};
use crate::standings::StandingsAggregator;
use crate::tournaments::TournamentResolver;
use crate::upstream::Upstream;
use crate::wire::{WirePlayer, WireTeam};
use crate::{HomeLeague, Player, Role, Standing, Team};
use log::debug;

/// Team code (lowercase) -> team slug, in first-seen order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamDirectory {
    entries: Vec<(String, String)>,
}

impl TeamDirectory {
    pub fn from_standings(standings: &[Standing]) -> Self {
        let mut directory = Self::default();
        for ranking in standings.iter().flat_map(|s| &s.rankings) {
            directory.insert(&ranking.team.code, &ranking.team.slug);
        }
        directory
    }

    /// A code seen again keeps its position and takes the new slug.
    pub fn insert(&mut self, code: &str, slug: &str) {
        let code = code.to_lowercase();
        match self.entries.iter_mut().find(|(c, _)| *c == code) {
            Some(entry) => entry.1 = slug.to_owned(),
            None => self.entries.push((code, slug.to_owned())),
        }
    }

    pub fn sort(&mut self) {
        self.entries.sort_by(|a, b| a.0.cmp(&b.0));
    }

    pub fn slug(&self, code: &str) -> Option<&str> {
        let code = code.to_lowercase();
        self.entries.iter().find(|(c, _)| *c == code).map(|(_, s)| s.as_str())
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(c, _)| c.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Accepts either a team code or a slug already in the directory.
    pub fn resolve(&self, code_or_slug: &str) -> ApiResult<&str> {
        let wanted = code_or_slug.trim();
        self.slug(wanted)
            .or_else(|| {
                self.entries
                    .iter()
                    .find(|(_, s)| s.eq_ignore_ascii_case(wanted))
                    .map(|(_, s)| s.as_str())
            })
            .ok_or_else(|| ApiError::InvalidParameter(format!("unknown team {wanted:?}")))
    }
}

/// Team by slug, with its roster. `Ok(None)` when the gateway knows no such
/// team.
pub async fn fetch_team<U: Upstream>(upstream: &U, slug: &str) -> ApiResult<Option<Team>> {
    let team = upstream
        .get_team(slug)
        .await?
        .into_iter()
        .find(|t| t.slug.as_deref() == Some(slug))
        .map(map_team);
    Ok(team)
}

/// Teams of the league's current tournament in `timeframe`. `Ok(None)` when
/// the league has no tournament there.
pub async fn team_directory<U: Upstream>(
    upstream: &U,
    league_id: &str,
    timeframe: &str,
) -> ApiResult<Option<TeamDirectory>> {
    let resolver = TournamentResolver::new(upstream);
    let Some(tournament_id) = resolver.current_tournament_id(league_id, timeframe).await? else {
        debug!("no {timeframe:?} tournament for league {league_id}");
        return Ok(None);
    };
    let directory = StandingsAggregator::new(upstream)
        .team_mapping(&[tournament_id], false)
        .await?;
    Ok(Some(directory))
}

/// Code -> slug through `team_directory`, then the team itself.
pub async fn find_team<U: Upstream>(
    upstream: &U,
    league_id: &str,
    timeframe: &str,
    code: &str,
) -> ApiResult<Option<Team>> {
    let Some(directory) = team_directory(upstream, league_id, timeframe).await? else {
        return Ok(None);
    };
    let slug = directory.resolve(code)?;
    fetch_team(upstream, slug).await
}

pub fn render_team(team: &Team) -> String {
    let mut lines = vec![match &team.home_league {
        Some(home) => format!("{} ({}) - {} {}", team.name, team.code, home.name, home.region),
        None => format!("{} ({})", team.name, team.code),
    }];
    lines.extend(team.roster.iter().map(|p| {
        if p.full_name.is_empty() {
            format!("{}: {}", p.role.label(), p.summoner_name)
        } else {
            format!("{}: {} ({})", p.role.label(), p.summoner_name, p.full_name)
        }
    }));
    lines.join("\n")
}

// ---------------------------------------------------------------------------
// Mapping: wire team -> Team
// ---------------------------------------------------------------------------

fn map_team(w: WireTeam) -> Team {
    let mut roster: Vec<Player> = w.players.unwrap_or_default().into_iter().map(map_player).collect();
    roster.sort_by_key(|p| p.role as u8);
    Team {
        id: w.id.unwrap_or_default(),
        slug: w.slug.unwrap_or_default(),
        name: w.name.unwrap_or_default(),
        code: w.code.unwrap_or_default(),
        image: w.image.unwrap_or_default(),
        home_league: w.home_league.map(|h| HomeLeague {
            name: h.name.unwrap_or_default(),
            region: h.region.unwrap_or_default(),
        }),
        roster,
    }
}

fn map_player(w: WirePlayer) -> Player {
    let full_name = [w.first_name, w.last_name]
        .into_iter()
        .flatten()
        .filter(|n| !n.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    Player {
        id: w.id.unwrap_or_default(),
        summoner_name: w.summoner_name.unwrap_or_default(),
        full_name,
        role: w.role.as_deref().map(Role::parse).unwrap_or_default(),
        image: w.image.unwrap_or_default(),
    }
}
