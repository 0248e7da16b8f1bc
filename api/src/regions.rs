//! Known region keys and the league ids they stand for.

use crate::client::{ApiError, ApiResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    pub key: &'static str,
    pub league_id: &'static str,
    /// Shown in the short region pickers.
    pub popular: bool,
}

const fn region(key: &'static str, league_id: &'static str, popular: bool) -> Region {
    Region { key, league_id, popular }
}

pub const WORLDS_ID: &str = "98767975604431411";
pub const MSI_ID: &str = "98767991325878492";

/// Default league context for international queries.
pub const INTERNATIONAL: [&str; 2] = [WORLDS_ID, MSI_ID];

pub const REGIONS: &[Region] = &[
    region("LCS", "98767991299243165", true),
    region("LEC", "98767991302996019", true),
    region("LCK", "98767991310872058", true),
    region("LPL", "98767991314006698", true),
    region("VCS", "107213827295848783", true),
    region("PCS", "104366947889790212", true),
    region("TCL", "98767991343597634", true),
    region("CBLOL", "98767991332355509", true),
    region("LLA", "101382741235120470", true),
    region("LCO", "105709090213554609", true),
    region("LJL", "98767991349978712", true),
    region("LCL", "98767991355908944", true),
    region("WORLDS", WORLDS_ID, true),
    region("MSI", MSI_ID, true),
    region("ALL_STAR_EVENT", "98767991295297326", false),
    region("HITPOINT_MASTERS", "105266106309666619", false),
    region("ESPORTS_BALKAN_LEAGUE", "105266111679554379", false),
    region("GREEK_LEGENDS_LEAGUE", "105266108767593290", false),
    region("ARABIAN_LEAGUE", "109545772895506419", false),
    region("LCK_ACADEMY", "108203770023880322", false),
    region("LCK_CHALLENGERS", "98767991335774713", false),
    region("LJL_ACADEMY", "106827757669296909", false),
    region("PRIME_LEAGUE", "105266091639104326", false),
    region("NORTH_REGIONAL_LEAGUE", "110371976858004491", false),
    region("CBLOL_ACADEMY", "105549980953490846", false),
    region("SUPERLIGA", "105266074488398661", false),
    region("EMEA_MASTERS", "100695891328981122", false),
    region("PG_NATIONALS", "105266094998946936", false),
    region("LIGA_PORTUGUESA", "105266101075764040", false),
    region("ELITE_SERIES", "107407335299756365", false),
    region("NLC", "105266098308571975", false),
    region("LA_LIGUE_FRANCAISE", "105266103462388553", false),
    region("SOUTH_REGIONAL_LEAGUE", "110372322609949919", false),
    region("COLLEGE_CHAMPIONSHIP", "107898214974993351", false),
    region("LCS_CHALLENGERS_QUALIFIERS", "109518549825754242", false),
    region("LCS_CHALLENGERS", "109511549831443335", false),
    region("ULTRALIGA", "105266088231437431", false),
    region("TFT_RISING_LEGENDS", "108001239847565215", false),
];

/// Look a region up by key. Case and `-`/`_`/space separators are ignored.
pub fn find(key: &str) -> ApiResult<&'static Region> {
    let wanted = normalize(key);
    REGIONS
        .iter()
        .find(|r| r.key == wanted)
        .ok_or_else(|| ApiError::InvalidParameter(format!("unknown region {key:?}")))
}

pub fn league_id(key: &str) -> ApiResult<&'static str> {
    find(key).map(|r| r.league_id)
}

pub fn popular() -> impl Iterator<Item = &'static Region> {
    REGIONS.iter().filter(|r| r.popular)
}

fn normalize(key: &str) -> String {
    key.trim()
        .chars()
        .map(|c| if c == '-' || c == ' ' { '_' } else { c.to_ascii_uppercase() })
        .collect()
}
