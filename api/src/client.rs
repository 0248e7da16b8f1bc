use crate::upstream::{EventListQuery, Upstream};
use crate::wire::{
    Envelope, EventListData, LeaguesData, ScheduleData, StandingsData, TeamsData, WireEvent,
    WireLeague, WireSchedule, WireStanding, WireTeam,
};
use log::debug;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;

pub type ApiResult<T> = Result<T, ApiError>;

pub const DEFAULT_LOCALE: &str = "en-US";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Connection settings for the gateway. Both the base URL and the key must be
/// supplied by the caller; there is no built-in default for either.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: String,
    pub locale: String,
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            locale: DEFAULT_LOCALE.to_owned(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// The base URL must be absolute with an http(s) scheme.
    pub fn check_base_url(&self) -> ApiResult<Url> {
        let url = Url::parse(&self.base_url)
            .map_err(|e| ApiError::InvalidParameter(format!("base url {:?}: {e}", self.base_url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ApiError::InvalidParameter(format!(
                "base url {:?}: expected http or https",
                self.base_url
            )));
        }
        Ok(url)
    }
}

/// LoL Esports persisted-gateway client.
#[derive(Debug, Clone)]
pub struct LolEsportsApi {
    client: Client,
    config: ApiConfig,
}

#[derive(Debug)]
pub enum ApiError {
    Network(reqwest::Error, String),
    Api(reqwest::Error, String),
    Parsing(serde_json::Error, String),
    /// The response decoded but an expected key was absent.
    Missing(&'static str, String),
    MalformedStanding(String),
    InvalidParameter(String),
}

impl ApiError {
    /// Transport, status and decoding failures, as opposed to payload-shape
    /// and caller errors.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            ApiError::Network(..) | ApiError::Api(..) | ApiError::Parsing(..) | ApiError::Missing(..)
        )
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e, url) => write!(f, "Network error for {url}: {e}"),
            ApiError::Api(e, url) => write!(f, "API error for {url}: {e}"),
            ApiError::Parsing(e, url) => write!(f, "Parse error for {url}: {e}"),
            ApiError::Missing(key, url) => write!(f, "Missing `{key}` in response from {url}"),
            ApiError::MalformedStanding(msg) => write!(f, "Malformed standing: {msg}"),
            ApiError::InvalidParameter(msg) => write!(f, "Invalid parameter: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ApiError::Network(e, _) | ApiError::Api(e, _) => Some(e),
            ApiError::Parsing(e, _) => Some(e),
            _ => None,
        }
    }
}

impl LolEsportsApi {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            client: Client::builder()
                .user_agent(concat!("lolbot/", env!("CARGO_PKG_VERSION")))
                .build()
                .unwrap_or_default(),
            config,
        }
    }

    /// Build `{base}/{endpoint}?hl={locale}&...`. Values are percent-encoded,
    /// so id lists go over the wire as `a%2Cb%2Cc`.
    fn endpoint(&self, endpoint: &str, params: &[(&str, &str)]) -> ApiResult<Url> {
        let base = format!("{}/{endpoint}", self.config.base_url.trim_end_matches('/'));
        let query = std::iter::once(("hl", self.config.locale.as_str())).chain(params.iter().copied());
        Url::parse_with_params(&base, query)
            .map_err(|e| ApiError::InvalidParameter(format!("base url {base:?}: {e}")))
    }

    async fn get<T: DeserializeOwned>(&self, url: Url) -> ApiResult<T> {
        let label = url.to_string();
        debug!("GET {label}");
        let response = self
            .client
            .get(url)
            .header("x-api-key", self.config.api_key.as_str())
            .timeout(self.config.timeout)
            .send()
            .await
            .map_err(|e| ApiError::Network(e, label.clone()))?;

        let body = response
            .error_for_status()
            .map_err(|e| ApiError::Api(e, label.clone()))?
            .text()
            .await
            .map_err(|e| ApiError::Network(e, label.clone()))?;

        serde_json::from_str(&body).map_err(|e| ApiError::Parsing(e, label))
    }

    /// Fetch and unwrap the `data` envelope every gateway response carries.
    async fn get_data<T: DeserializeOwned>(&self, url: Url) -> ApiResult<(T, String)> {
        let label = url.to_string();
        let envelope: Envelope<T> = self.get(url).await?;
        let data = envelope.data.ok_or_else(|| ApiError::Missing("data", label.clone()))?;
        Ok((data, label))
    }
}

impl Upstream for LolEsportsApi {
    async fn get_live(&self) -> ApiResult<Vec<WireEvent>> {
        let url = self.endpoint("getLive", &[])?;
        let (data, label) = self.get_data::<ScheduleData>(url).await?;
        let schedule = data.schedule.ok_or_else(|| ApiError::Missing("schedule", label.clone()))?;
        schedule.events.ok_or(ApiError::Missing("events", label))
    }

    async fn get_schedule(
        &self,
        league_id: Option<&str>,
        page_token: Option<&str>,
    ) -> ApiResult<WireSchedule> {
        let mut params = Vec::new();
        if let Some(id) = league_id {
            params.push(("leagueId", check_id("league", id)?));
        }
        if let Some(token) = page_token {
            params.push(("pageToken", token));
        }
        let url = self.endpoint("getSchedule", &params)?;
        let (data, label) = self.get_data::<ScheduleData>(url).await?;
        data.schedule.ok_or(ApiError::Missing("schedule", label))
    }

    async fn get_leagues(&self) -> ApiResult<Vec<WireLeague>> {
        let url = self.endpoint("getLeagues", &[])?;
        let (data, label) = self.get_data::<LeaguesData>(url).await?;
        data.leagues.ok_or(ApiError::Missing("leagues", label))
    }

    async fn get_tournaments(&self, league_ids: &[String]) -> ApiResult<Vec<WireLeague>> {
        let ids = join_ids("league", league_ids)?;
        let url = self.endpoint("getTournamentsForLeague", &[("leagueId", ids.as_str())])?;
        let (data, label) = self.get_data::<LeaguesData>(url).await?;
        data.leagues.ok_or(ApiError::Missing("leagues", label))
    }

    async fn get_standings(&self, tournament_ids: &[String]) -> ApiResult<Vec<WireStanding>> {
        let ids = join_ids("tournament", tournament_ids)?;
        let url = self.endpoint("getStandings", &[("tournamentId", ids.as_str())])?;
        let (data, label) = self.get_data::<StandingsData>(url).await?;
        data.standings.ok_or(ApiError::Missing("standings", label))
    }

    async fn get_team(&self, slug: &str) -> ApiResult<Vec<WireTeam>> {
        let slug = check_slug(slug)?;
        let url = self.endpoint("getTeams", &[("id", slug)])?;
        let (data, label) = self.get_data::<TeamsData>(url).await?;
        data.teams.ok_or(ApiError::Missing("teams", label))
    }

    async fn get_event_list(&self, query: &EventListQuery) -> ApiResult<Vec<WireEvent>> {
        let url = match query {
            EventListQuery::Leagues(ids) => {
                let ids = join_ids("league", ids)?;
                self.endpoint("getEventList", &[("leagueId", ids.as_str())])?
            }
            EventListQuery::Team(slug) => {
                self.endpoint("getEventList", &[("teamId", check_slug(slug)?)])?
            }
        };
        let (data, label) = self.get_data::<EventListData>(url).await?;
        let list = data.esports.ok_or_else(|| ApiError::Missing("esports", label.clone()))?;
        list.events.ok_or(ApiError::Missing("events", label))
    }
}

// ---------------------------------------------------------------------------
// Parameter validation, done before any request is issued
// ---------------------------------------------------------------------------

fn check_id<'a>(kind: &str, id: &'a str) -> ApiResult<&'a str> {
    if !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit()) {
        Ok(id)
    } else {
        Err(ApiError::InvalidParameter(format!("{kind} id {id:?} is not numeric")))
    }
}

/// Comma-join an id list of any length.
fn join_ids(kind: &str, ids: &[String]) -> ApiResult<String> {
    if ids.is_empty() {
        return Err(ApiError::InvalidParameter(format!("no {kind} ids given")));
    }
    for id in ids {
        check_id(kind, id)?;
    }
    Ok(ids.join(","))
}

fn check_slug(slug: &str) -> ApiResult<&str> {
    let valid = !slug.is_empty()
        && slug
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-');
    if valid {
        Ok(slug)
    } else {
        Err(ApiError::InvalidParameter(format!("team slug {slug:?}")))
    }
}
