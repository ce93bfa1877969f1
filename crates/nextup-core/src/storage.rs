use anyhow::{Context, Result};
use nextup_models::ShowRecord;
use std::path::PathBuf;
use tracing::{debug, info, warn};

/// Persistence gateway for the watchlist: one JSON file, loaded at startup
/// and saved best-effort. Neither direction surfaces an error to the caller;
/// a failed load degrades to an empty watchlist and a failed save is logged.
pub struct WatchlistStorage {
    path: PathBuf,
}

impl WatchlistStorage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn load(&self) -> Vec<ShowRecord> {
        if !self.path.exists() {
            debug!(path = %self.path.display(), "no persisted watchlist, starting empty");
            return Vec::new();
        }

        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "failed to read watchlist file");
                return Vec::new();
            }
        };

        match serde_json::from_str::<Vec<ShowRecord>>(&content) {
            Ok(shows) => {
                info!(count = shows.len(), "loaded persisted watchlist");
                shows
            }
            Err(e) => {
                // Keep the unreadable file around for inspection instead of
                // silently overwriting it on the next save.
                let backup = self.path.with_extension("json.bak");
                if let Err(backup_err) = std::fs::rename(&self.path, &backup) {
                    warn!(error = %backup_err, "failed to back up corrupt watchlist file");
                }
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "watchlist file is corrupt, starting empty"
                );
                Vec::new()
            }
        }
    }

    pub fn save(&self, shows: &[ShowRecord]) {
        match self.try_save(shows) {
            Ok(()) => debug!(count = shows.len(), "saved watchlist"),
            Err(e) => warn!(path = %self.path.display(), error = %e, "failed to save watchlist"),
        }
    }

    fn try_save(&self, shows: &[ShowRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(shows).context("serializing watchlist")?;

        // Atomic write: temp file in the same directory, then rename.
        let temp_path = self.path.with_extension("json.tmp");
        std::fs::write(&temp_path, json)
            .with_context(|| format!("writing {}", temp_path.display()))?;
        std::fs::rename(&temp_path, &self.path)
            .with_context(|| format!("renaming into {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use nextup_models::{Episode, Network, ShowDetail};
    use url::Url;

    fn sample_watchlist() -> Vec<ShowRecord> {
        vec![
            // Full detail, including networks and a dated next episode.
            ShowRecord {
                id: "97546".to_string(),
                name: "Ted Lasso".to_string(),
                poster_url: Some(
                    Url::parse("https://image.tmdb.org/t/p/w500/oX7QdfiQEbyvIvpKgJHRCgbrLdK.jpg")
                        .unwrap(),
                ),
                backdrop_url: None,
                first_air_date: NaiveDate::from_ymd_opt(2020, 8, 14),
                detail: Some(ShowDetail {
                    seasons: 2,
                    in_production: true,
                    next_episode: Some(Episode {
                        id: "2891253".to_string(),
                        name: "Goodbye Earl".to_string(),
                        episode_number: 1,
                        season: 2,
                        air_date: NaiveDate::from_ymd_opt(2021, 7, 23),
                        thumbnail_url: Some(
                            Url::parse("https://image.tmdb.org/t/p/w500/still.jpg").unwrap(),
                        ),
                    }),
                    networks: vec![Network {
                        id: "2552".to_string(),
                        name: "Apple TV+".to_string(),
                        logo_url: None,
                    }],
                }),
            },
            // Detail never fetched.
            ShowRecord {
                id: "79696".to_string(),
                name: "Manifest".to_string(),
                poster_url: None,
                backdrop_url: None,
                first_air_date: None,
                detail: None,
            },
            // Episode without a thumbnail.
            ShowRecord {
                id: "98161".to_string(),
                name: "Home Before Dark".to_string(),
                poster_url: None,
                backdrop_url: None,
                first_air_date: None,
                detail: Some(ShowDetail {
                    seasons: 2,
                    in_production: true,
                    next_episode: Some(Episode {
                        id: "3031348".to_string(),
                        name: "Fighting His Ghost".to_string(),
                        episode_number: 3,
                        season: 2,
                        air_date: NaiveDate::from_ymd_opt(2021, 6, 25),
                        thumbnail_url: None,
                    }),
                    networks: Vec::new(),
                }),
            },
        ]
    }

    #[test]
    fn save_then_load_round_trips_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let storage = WatchlistStorage::new(dir.path().join("watchlist.json"));

        let watchlist = sample_watchlist();
        storage.save(&watchlist);

        assert_eq!(storage.load(), watchlist);
    }

    #[test]
    fn load_missing_file_returns_empty() {
        let dir = tempfile::tempdir().unwrap();
        let storage = WatchlistStorage::new(dir.path().join("missing.json"));
        assert!(storage.load().is_empty());
    }

    #[test]
    fn load_corrupt_file_backs_up_and_returns_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("watchlist.json");
        std::fs::write(&path, "{ not json").unwrap();

        let storage = WatchlistStorage::new(path.clone());
        assert!(storage.load().is_empty());
        assert!(!path.exists());
        assert!(path.with_extension("json.bak").exists());
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let storage = WatchlistStorage::new(dir.path().join("data").join("watchlist.json"));

        storage.save(&sample_watchlist());
        assert_eq!(storage.load().len(), 3);
    }
}
