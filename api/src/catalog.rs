use crate::client::ApiResult;
use crate::upstream::Upstream;
use crate::wire::WireLeague;
use crate::League;
use log::debug;

/// Leagues below this priority are the major circuits.
pub const MAJOR_PRIORITY_CEILING: i64 = 202;
/// Leagues from the major ceiling up to (excluding) this one are minor.
pub const MINOR_PRIORITY_CEILING: i64 = 1000;

/// Tiering data that has changed over the life of the league list. Kept as
/// configuration so a new season only means new values, not new code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogRules {
    /// Second-tier leagues promoted next to the majors, matched by name.
    pub semi_league_names: Vec<String>,
    /// League names dropped from the minor tier.
    pub minor_exclusions: Vec<String>,
    pub international_slug: String,
}

impl Default for CatalogRules {
    fn default() -> Self {
        Self {
            semi_league_names: vec!["PCS".into(), "VCS".into()],
            minor_exclusions: Vec::new(),
            international_slug: "worlds".into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    Major,
    Semi,
    Minor,
    International,
    Other,
}

/// Every league lands in exactly one bucket.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeagueTiers {
    pub major: Vec<League>,
    pub semi: Vec<League>,
    pub minor: Vec<League>,
    pub international: Vec<League>,
    pub other: Vec<League>,
}

impl LeagueTiers {
    pub fn popular(&self) -> Vec<League> {
        self.major.iter().chain(&self.semi).cloned().collect()
    }

    pub fn primary(&self) -> Vec<League> {
        self.major
            .iter()
            .chain(&self.semi)
            .chain(&self.minor)
            .chain(&self.international)
            .cloned()
            .collect()
    }
}

impl CatalogRules {
    pub fn is_semi(&self, league: &League) -> bool {
        self.semi_league_names.iter().any(|n| n.eq_ignore_ascii_case(&league.name))
    }

    /// Precedence: semi (by name), major, international, minor, other.
    pub fn tier(&self, league: &League) -> Tier {
        if self.is_semi(league) {
            Tier::Semi
        } else if league.priority < MAJOR_PRIORITY_CEILING {
            Tier::Major
        } else if league.slug == self.international_slug {
            Tier::International
        } else if league.priority < MINOR_PRIORITY_CEILING
            && !self.minor_exclusions.iter().any(|n| n.eq_ignore_ascii_case(&league.name))
        {
            Tier::Minor
        } else {
            Tier::Other
        }
    }

    /// Bucket `leagues` by tier, keeping their relative order inside each
    /// bucket. Returns `None` when any configured semi league is missing.
    pub fn classify(&self, leagues: &[League]) -> Option<LeagueTiers> {
        let mut tiers = LeagueTiers::default();
        for league in leagues {
            let bucket = match self.tier(league) {
                Tier::Major => &mut tiers.major,
                Tier::Semi => &mut tiers.semi,
                Tier::Minor => &mut tiers.minor,
                Tier::International => &mut tiers.international,
                Tier::Other => &mut tiers.other,
            };
            bucket.push(league.clone());
        }

        let all_semi_found = self
            .semi_league_names
            .iter()
            .all(|name| tiers.semi.iter().any(|l| l.name.eq_ignore_ascii_case(name)));
        if !all_semi_found {
            debug!("semi leagues {:?} not in league list", self.semi_league_names);
            return None;
        }
        Some(tiers)
    }

    /// The display order: majors by priority, then the semi leagues in their
    /// incoming relative order, then everything else by priority.
    pub fn sort(&self, leagues: Vec<League>) -> Vec<League> {
        let (semi, mut rest): (Vec<League>, Vec<League>) =
            leagues.into_iter().partition(|l| self.is_semi(l));
        rest.sort_by_key(|l| l.priority);
        let majors_end = rest.partition_point(|l| l.priority < MAJOR_PRIORITY_CEILING);
        let tail = rest.split_off(majors_end);
        rest.extend(semi);
        rest.extend(tail);
        rest
    }
}

/// League list lookups and tiering.
pub struct LeagueCatalog<'a, U> {
    upstream: &'a U,
    rules: &'a CatalogRules,
}

impl<'a, U: Upstream> LeagueCatalog<'a, U> {
    pub fn new(upstream: &'a U, rules: &'a CatalogRules) -> Self {
        Self { upstream, rules }
    }

    pub async fn fetch_leagues(&self, sorted: bool) -> ApiResult<Vec<League>> {
        let leagues: Vec<League> = self
            .upstream
            .get_leagues()
            .await?
            .into_iter()
            .map(map_league)
            .collect();
        debug!("fetched {} leagues", leagues.len());
        Ok(if sorted { self.rules.sort(leagues) } else { leagues })
    }

    /// Sorted league list bucketed into tiers; `Ok(None)` when the semi
    /// leagues cannot be found.
    pub async fn tiers(&self) -> ApiResult<Option<LeagueTiers>> {
        let leagues = self.fetch_leagues(true).await?;
        Ok(self.rules.classify(&leagues))
    }

    /// Major leagues in sorted order. Decided by priority alone, so a
    /// missing semi league does not empty this list.
    pub async fn major_leagues(&self) -> ApiResult<Vec<League>> {
        let leagues = self.fetch_leagues(true).await?;
        Ok(leagues.into_iter().filter(|l| self.rules.tier(l) == Tier::Major).collect())
    }
}

// ---------------------------------------------------------------------------
// Mapping: wire league -> League
// ---------------------------------------------------------------------------

fn map_league(w: WireLeague) -> League {
    let priority = w
        .priority
        .or_else(|| w.display_priority.as_ref().and_then(|d| d.position))
        .unwrap_or(i64::MAX);
    League {
        id: w.id.unwrap_or_default(),
        name: w.name.unwrap_or_default(),
        slug: w.slug.unwrap_or_default(),
        region: w.region.unwrap_or_default(),
        priority,
        image: w.image.unwrap_or_default(),
    }
}
