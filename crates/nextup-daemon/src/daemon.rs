use anyhow::{Context, Result};
use nextup_config::{Config, PathManager};
use nextup_core::{WatchlistStorage, WatchlistStore};
use nextup_tmdb::TmdbClient;
use std::sync::Arc;
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::info;

/// Composition root: builds the one store instance, wires it to the TMDB
/// client and the on-disk watchlist, and drives scheduled refreshes until
/// ctrl-c. The store itself has no locking; the mutex here is what makes it
/// shareable with the scheduler job.
pub async fn run(
    paths: PathManager,
    schedule_override: Option<String>,
    no_startup_refresh: bool,
) -> Result<()> {
    paths.ensure_directories()?;

    let config_file = paths.config_file();
    let config = Config::load_from_file(&config_file)
        .with_context(|| format!("loading config from {}", config_file.display()))?;
    config.validate()?;

    let provider = TmdbClient::with_endpoints(
        config.tmdb.api_key.clone(),
        &config.tmdb.api_base,
        &config.tmdb.image_base,
    );

    let storage = Arc::new(WatchlistStorage::new(paths.watchlist_file()));
    let mut store = WatchlistStore::new(Arc::new(provider));
    store.replace(storage.load());

    let mut observer = store.subscribe();
    tokio::spawn(async move {
        while observer.changed().await.is_ok() {
            let snapshot = observer.borrow().clone();
            match snapshot.first() {
                Some(next) => info!(
                    tracked = snapshot.len(),
                    up_next = %next.name,
                    "watchlist updated"
                ),
                None => info!("watchlist updated: empty"),
            }
        }
    });

    let store = Arc::new(Mutex::new(store));

    let schedule = schedule_override.unwrap_or_else(|| config.refresh.schedule.clone());
    let run_on_startup = !no_startup_refresh && config.refresh.run_on_startup;

    if run_on_startup {
        info!("running startup refresh");
        refresh_and_save(&store, &storage).await;
    }

    let scheduler = JobScheduler::new().await?;
    let job_store = store.clone();
    let job_storage = storage.clone();
    let job = Job::new_async(schedule.as_str(), move |_uuid, _lock| {
        let store = job_store.clone();
        let storage = job_storage.clone();
        Box::pin(async move {
            info!("starting scheduled refresh");
            refresh_and_save(&store, &storage).await;
        })
    })
    .with_context(|| format!("invalid refresh schedule '{schedule}'"))?;

    scheduler.add(job).await?;
    scheduler.start().await?;
    info!(schedule = %schedule, "refresh scheduler started");

    tokio::signal::ctrl_c().await?;
    info!("shutting down, saving watchlist");
    let store = store.lock().await;
    storage.save(store.shows());

    Ok(())
}

async fn refresh_and_save(store: &Arc<Mutex<WatchlistStore>>, storage: &Arc<WatchlistStorage>) {
    let mut store = store.lock().await;
    store.refresh().await;
    storage.save(store.shows());
}
