//! TMDB wire shapes and their normalization into `ShowRecord` values.
//!
//! Normalization rules:
//! - dates are `yyyy-MM-dd` in a fixed calendar; anything unparseable or
//!   absent becomes `None`, never an error
//! - image paths are relative; the full URL is image base + path, and a
//!   missing or empty path yields `None` rather than an empty-string URL
//! - the provider's integer id becomes the record's string identity

use chrono::NaiveDate;
use nextup_models::{Episode, Network, ShowDetail, ShowRecord};
use serde::Deserialize;
use url::Url;

#[derive(Debug, Deserialize)]
pub(crate) struct SearchEnvelope {
    pub results: Vec<SearchEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct SearchEntry {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub first_air_date: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct DetailEntry {
    pub id: i64,
    pub in_production: bool,
    pub name: String,
    #[serde(default)]
    pub next_episode_to_air: Option<EpisodeEntry>,
    #[serde(default)]
    pub networks: Vec<NetworkEntry>,
    pub number_of_seasons: u32,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub backdrop_path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct EpisodeEntry {
    #[serde(default)]
    pub air_date: Option<String>,
    pub episode_number: u32,
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub overview: String,
    #[serde(default)]
    pub production_code: String,
    pub season_number: u32,
    #[serde(default)]
    pub still_path: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct NetworkEntry {
    pub name: String,
    pub id: i64,
    #[serde(default)]
    pub logo_path: Option<String>,
    #[serde(default)]
    pub origin_country: String,
}

pub(crate) fn parse_air_date(raw: Option<&str>) -> Option<NaiveDate> {
    raw.and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
}

pub(crate) fn image_url(image_base: &str, path: Option<&str>) -> Option<Url> {
    let path = path?;
    if path.is_empty() {
        return None;
    }
    Url::parse(&format!("{image_base}{path}")).ok()
}

pub(crate) fn record_from_search(entry: SearchEntry, image_base: &str) -> ShowRecord {
    ShowRecord {
        id: entry.id.to_string(),
        name: entry.name,
        poster_url: image_url(image_base, entry.poster_path.as_deref()),
        backdrop_url: image_url(image_base, entry.backdrop_path.as_deref()),
        first_air_date: parse_air_date(entry.first_air_date.as_deref()),
        detail: None,
    }
}

pub(crate) fn record_from_detail(entry: DetailEntry, image_base: &str) -> ShowRecord {
    let detail = ShowDetail {
        seasons: entry.number_of_seasons,
        in_production: entry.in_production,
        next_episode: entry
            .next_episode_to_air
            .map(|e| episode_from_entry(e, image_base)),
        networks: entry
            .networks
            .into_iter()
            .map(|n| network_from_entry(n, image_base))
            .collect(),
    };

    ShowRecord {
        id: entry.id.to_string(),
        name: entry.name,
        poster_url: image_url(image_base, entry.poster_path.as_deref()),
        backdrop_url: image_url(image_base, entry.backdrop_path.as_deref()),
        first_air_date: None,
        detail: Some(detail),
    }
}

fn episode_from_entry(entry: EpisodeEntry, image_base: &str) -> Episode {
    Episode {
        id: entry.id.to_string(),
        name: entry.name,
        episode_number: entry.episode_number,
        season: entry.season_number,
        air_date: parse_air_date(entry.air_date.as_deref()),
        thumbnail_url: image_url(image_base, entry.still_path.as_deref()),
    }
}

fn network_from_entry(entry: NetworkEntry, image_base: &str) -> Network {
    Network {
        id: entry.id.to_string(),
        name: entry.name,
        logo_url: image_url(image_base, entry.logo_path.as_deref()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::DEFAULT_IMAGE_BASE;

    const SEARCH_BODY: &str = r#"{
        "page": 1,
        "results": [
            {
                "id": 97546,
                "name": "Ted Lasso",
                "poster_path": "/oX7QdfiQEbyvIvpKgJHRCgbrLdK.jpg",
                "backdrop_path": null,
                "first_air_date": "2020-08-14"
            },
            {
                "id": 79696,
                "name": "Manifest",
                "poster_path": "",
                "first_air_date": "not-a-date"
            }
        ]
    }"#;

    #[test]
    fn search_entries_normalize_ids_and_urls() {
        let envelope: SearchEnvelope = serde_json::from_str(SEARCH_BODY).unwrap();
        let records: Vec<_> = envelope
            .results
            .into_iter()
            .map(|e| record_from_search(e, DEFAULT_IMAGE_BASE))
            .collect();

        assert_eq!(records[0].id, "97546");
        assert_eq!(
            records[0].poster_url.as_ref().unwrap().as_str(),
            "https://image.tmdb.org/t/p/w500/oX7QdfiQEbyvIvpKgJHRCgbrLdK.jpg"
        );
        assert!(records[0].backdrop_url.is_none());
        assert_eq!(
            records[0].first_air_date,
            NaiveDate::from_ymd_opt(2020, 8, 14)
        );
        assert!(records[0].detail.is_none());

        // Empty poster path and malformed date both degrade to None.
        assert_eq!(records[1].id, "79696");
        assert!(records[1].poster_url.is_none());
        assert!(records[1].first_air_date.is_none());
    }

    #[test]
    fn detail_entry_always_yields_detail() {
        let body = r#"{
            "id": 97546,
            "in_production": true,
            "name": "Ted Lasso",
            "next_episode_to_air": {
                "air_date": "2021-07-23",
                "episode_number": 1,
                "id": 2891253,
                "name": "Goodbye Earl",
                "overview": "",
                "production_code": "",
                "season_number": 2,
                "still_path": null
            },
            "networks": [
                {"name": "Apple TV+", "id": 2552, "logo_path": "/4KAy34EHvRM25Ih8wb82AuGU7zJ.png", "origin_country": "US"}
            ],
            "number_of_seasons": 2,
            "poster_path": "/oX7QdfiQEbyvIvpKgJHRCgbrLdK.jpg"
        }"#;

        let entry: DetailEntry = serde_json::from_str(body).unwrap();
        let record = record_from_detail(entry, DEFAULT_IMAGE_BASE);
        let detail = record.detail.expect("detail fetch always carries detail");

        assert_eq!(record.id, "97546");
        assert_eq!(detail.seasons, 2);
        assert!(detail.in_production);
        assert_eq!(detail.networks.len(), 1);
        assert_eq!(detail.networks[0].id, "2552");

        let episode = detail.next_episode.unwrap();
        assert_eq!(episode.id, "2891253");
        assert_eq!(episode.season, 2);
        assert_eq!(episode.air_date, NaiveDate::from_ymd_opt(2021, 7, 23));
        assert!(episode.thumbnail_url.is_none());
    }

    #[test]
    fn detail_without_next_episode_is_valid() {
        let body = r#"{
            "id": 79696,
            "in_production": false,
            "name": "Manifest",
            "next_episode_to_air": null,
            "networks": [],
            "number_of_seasons": 3
        }"#;

        let entry: DetailEntry = serde_json::from_str(body).unwrap();
        let record = record_from_detail(entry, DEFAULT_IMAGE_BASE);
        let detail = record.detail.unwrap();

        assert!(!detail.in_production);
        assert!(detail.next_episode.is_none());
        assert!(detail.networks.is_empty());
    }

    #[test]
    fn air_date_parsing_edge_cases() {
        assert_eq!(
            parse_air_date(Some("2021-06-25")),
            NaiveDate::from_ymd_opt(2021, 6, 25)
        );
        assert!(parse_air_date(Some("")).is_none());
        assert!(parse_air_date(Some("06/25/2021")).is_none());
        assert!(parse_air_date(Some("2021-13-40")).is_none());
        assert!(parse_air_date(None).is_none());
    }

    #[test]
    fn image_url_edge_cases() {
        assert!(image_url(DEFAULT_IMAGE_BASE, None).is_none());
        assert!(image_url(DEFAULT_IMAGE_BASE, Some("")).is_none());
        assert_eq!(
            image_url(DEFAULT_IMAGE_BASE, Some("/a.jpg")).unwrap().as_str(),
            "https://image.tmdb.org/t/p/w500/a.jpg"
        );
    }
}
