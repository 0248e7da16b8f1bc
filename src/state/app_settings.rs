use crate::state::monitor::{MonitorConfig, ReannouncePolicy};
use anyhow::{Context, bail};
use lolesports_api::catalog::CatalogRules;
use lolesports_api::client::ApiConfig;
use std::time::Duration;

pub const DEFAULT_POLL_SECS: u64 = 120;

#[derive(Debug, Clone)]
pub struct AppSettings {
    pub api: ApiConfig,
    pub poll_interval: Duration,
    pub monitor: MonitorConfig,
    pub catalog: CatalogRules,
}

impl AppSettings {
    /// Read settings from the process environment (after `.env` is applied).
    pub fn load() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(get: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let get = |key: &str| get(key).map(|v| v.trim().to_owned()).filter(|v| !v.is_empty());
        let required = |key: &str| get(key).with_context(|| format!("{key} must be set"));

        let mut api = ApiConfig::new(required("LOLBOT_API_BASE")?, required("LOLBOT_API_KEY")?);
        api.check_base_url().context("LOLBOT_API_BASE")?;
        if let Some(locale) = get("LOLBOT_LOCALE") {
            api.locale = locale;
        }

        let poll_secs = match get("LOLBOT_POLL_SECS") {
            Some(v) => v.parse::<u64>().with_context(|| format!("LOLBOT_POLL_SECS={v:?}"))?,
            None => DEFAULT_POLL_SECS,
        };
        if poll_secs == 0 {
            bail!("LOLBOT_POLL_SECS must be positive");
        }

        let mut monitor = MonitorConfig::default();
        if let Some(v) = get("LOLBOT_REANNOUNCE") {
            monitor.reannounce = ReannouncePolicy::parse(&v)
                .with_context(|| format!("LOLBOT_REANNOUNCE={v:?}, expected `match` or `once`"))?;
        }
        if let Some(v) = get("LOLBOT_UPNEXT_LEAGUES") {
            monitor.upnext_leagues = split_list(&v);
        }

        let mut catalog = CatalogRules::default();
        if let Some(v) = get("LOLBOT_SEMI_LEAGUES") {
            catalog.semi_league_names = split_list(&v);
        }
        if let Some(v) = get("LOLBOT_MINOR_EXCLUSIONS") {
            catalog.minor_exclusions = split_list(&v);
        }
        if let Some(v) = get("LOLBOT_INTERNATIONAL_SLUG") {
            catalog.international_slug = v;
        }

        Ok(Self { api, poll_interval: Duration::from_secs(poll_secs), monitor, catalog })
    }
}

fn split_list(v: &str) -> Vec<String> {
    v.split(',').map(str::trim).filter(|s| !s.is_empty()).map(String::from).collect()
}
