use chrono::NaiveDate;
use nextup_models::ShowRecord;
use std::cmp::Ordering;

/// Watchlist comparator: cancelled shows sort after everything else, and the
/// rest order by next-episode air date ascending. A show whose detail has
/// never been fetched counts as still in production; a show without a dated
/// next episode sorts last within the in-production partition. Cancelled
/// shows compare equal so a stable sort keeps their prior relative order.
pub fn compare(a: &ShowRecord, b: &ShowRecord) -> Ordering {
    match (is_cancelled(a), is_cancelled(b)) {
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (true, true) => Ordering::Equal,
        (false, false) => next_air_date(a).cmp(&next_air_date(b)),
    }
}

fn is_cancelled(show: &ShowRecord) -> bool {
    show.detail.as_ref().map_or(false, |d| !d.in_production)
}

fn next_air_date(show: &ShowRecord) -> NaiveDate {
    show.detail
        .as_ref()
        .and_then(|d| d.next_episode.as_ref())
        .and_then(|e| e.air_date)
        .unwrap_or(NaiveDate::MAX)
}
