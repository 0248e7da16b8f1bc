use crate::client::{ApiError, ApiResult};
use crate::teams::TeamDirectory;
use crate::tournaments::{TournamentResolver, match_by_timeframe, tournament_ids};
use crate::upstream::Upstream;
use crate::wire::{WireRanking, WireStanding};
use crate::{Ranking, Standing, TeamRecord, TournamentSet};
use log::debug;

/// Builds standings and the code -> slug directory out of standings payloads.
pub struct StandingsAggregator<'a, U> {
    upstream: &'a U,
}

impl<'a, U: Upstream> StandingsAggregator<'a, U> {
    pub fn new(upstream: &'a U) -> Self {
        Self { upstream }
    }

    /// One `Standing` per payload, in the order the gateway returns them.
    /// Only the regular season is read: stage 0, section 0.
    pub async fn fetch_standings(&self, tournament_ids: &[String]) -> ApiResult<Vec<Standing>> {
        if tournament_ids.is_empty() {
            return Ok(Vec::new());
        }
        let raw = self.upstream.get_standings(tournament_ids).await?;
        debug!("{} standings for {} tournaments", raw.len(), tournament_ids.len());
        raw.into_iter()
            .enumerate()
            .map(|(i, w)| {
                let fallback = tournament_ids.get(i).map(String::as_str).unwrap_or_default();
                map_standing(w, fallback)
            })
            .collect()
    }

    /// Team code (lowercase) -> team slug, from the standings of the given
    /// tournaments. Tournaments are processed in order and a later slug for
    /// the same code replaces the earlier one.
    pub async fn team_mapping(&self, tournament_ids: &[String], sorted: bool) -> ApiResult<TeamDirectory> {
        let standings = self.fetch_standings(tournament_ids).await?;
        let mut directory = TeamDirectory::from_standings(&standings);
        if sorted {
            directory.sort();
        }
        Ok(directory)
    }

    /// leagues -> tournaments -> timeframe filter -> standings -> text.
    /// `Ok(None)` when nothing matches.
    pub async fn display_standings(
        &self,
        league_ids: &[String],
        timeframe: &str,
    ) -> ApiResult<Option<String>> {
        let tournaments = TournamentResolver::new(self.upstream)
            .fetch_tournaments(league_ids, None)
            .await?
            .into_flat();
        let matched = match_by_timeframe(&tournaments, timeframe);
        let ids = tournament_ids(&TournamentSet::Flat(matched));
        let standings = self.fetch_standings(&ids).await?;
        if standings.is_empty() {
            return Ok(None);
        }
        Ok(Some(render_standings(&standings)))
    }
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

pub fn render_ranking(ranking: &Ranking) -> String {
    let team = &ranking.team;
    format!("{}. {} ({}): {}-{}", ranking.ordinal, team.name, team.code, team.wins, team.losses)
}

/// Season header, then one line per ranking. Seasons are separated by a
/// blank line.
pub fn render_standings(standings: &[Standing]) -> String {
    standings
        .iter()
        .map(|standing| {
            std::iter::once(standing.season.clone())
                .chain(standing.rankings.iter().map(render_ranking))
                .collect::<Vec<_>>()
                .join("\n")
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

// ---------------------------------------------------------------------------
// Mapping: wire standing -> Standing
// ---------------------------------------------------------------------------

/// "lcs_summer_2023" -> "Lcs Summer 2023"
pub fn season_label(slug: &str) -> String {
    slug.split('_')
        .filter(|part| !part.is_empty())
        .map(to_title_case)
        .collect::<Vec<_>>()
        .join(" ")
}

fn to_title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
    }
}

fn map_standing(w: WireStanding, fallback_slug: &str) -> ApiResult<Standing> {
    let slug = w.slug.unwrap_or_else(|| fallback_slug.to_owned());
    let stage = w
        .stages
        .and_then(|stages| stages.into_iter().next())
        .ok_or_else(|| ApiError::MalformedStanding(format!("{slug}: no stages")))?;
    let section = stage
        .sections
        .and_then(|sections| sections.into_iter().next())
        .ok_or_else(|| ApiError::MalformedStanding(format!("{slug}: stage 0 has no sections")))?;

    let rankings = section
        .rankings
        .unwrap_or_default()
        .into_iter()
        .map(|r| map_ranking(r, &slug))
        .collect::<ApiResult<Vec<_>>>()?;

    Ok(Standing { season: season_label(&slug), rankings })
}

fn map_ranking(w: WireRanking, slug: &str) -> ApiResult<Ranking> {
    let ordinal = w
        .ordinal
        .ok_or_else(|| ApiError::MalformedStanding(format!("{slug}: ranking without ordinal")))?;
    let team = w
        .teams
        .and_then(|teams| teams.into_iter().next())
        .ok_or_else(|| ApiError::MalformedStanding(format!("{slug}: ranking {ordinal} has no team")))?;
    let record = team.record.unwrap_or_default();
    Ok(Ranking {
        ordinal,
        team: TeamRecord {
            code: team.code.unwrap_or_default(),
            name: team.name.unwrap_or_default(),
            slug: team.slug.unwrap_or_default(),
            wins: record.wins.unwrap_or(0),
            losses: record.losses.unwrap_or(0),
        },
    })
}
