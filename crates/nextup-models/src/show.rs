use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::episode::Episode;
use crate::network::Network;

/// One tracked (or search-result) show. `id` is the provider's integer id in
/// decimal string form and never changes once assigned. Equality is over all
/// fields, not just `id`, because downstream change detection relies on it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShowRecord {
    pub id: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub poster_url: Option<Url>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub backdrop_url: Option<Url>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_air_date: Option<NaiveDate>,
    /// `None` means detail has never been fetched. A show whose detail fetch
    /// returned no upcoming episode has `Some(detail)` with
    /// `next_episode: None` - the two are distinct states.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<ShowDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ShowDetail {
    pub seasons: u32,
    pub in_production: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_episode: Option<Episode>,
    /// Network order is whatever the provider sent; it carries no meaning but
    /// is preserved.
    pub networks: Vec<Network>,
}
