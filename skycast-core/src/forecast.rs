//! Reduction of the 3-hourly forecast feed into per-day views.

use std::collections::HashSet;

use crate::model::{DailySummary, ForecastEntry, HourlyForecast};

/// Number of days shown in the daily strip.
pub const MAX_DAYS: usize = 5;

/// The part of a timestamp before the first space (`YYYY-MM-DD`).
pub fn day_key(date: &str) -> &str {
    date.split_once(' ').map(|(day, _)| day).unwrap_or(date)
}

/// One summary per calendar day, taken from the first sample seen for that day.
///
/// Days keep the order in which they first appear and the result is capped at
/// [`MAX_DAYS`]. Later samples of an already-seen day are ignored.
pub fn daily_summaries(entries: &[ForecastEntry]) -> Vec<DailySummary> {
    let mut seen = HashSet::new();

    entries
        .iter()
        .filter(|entry| seen.insert(day_key(&entry.date)))
        .take(MAX_DAYS)
        .map(|entry| DailySummary {
            date: day_key(&entry.date).to_string(),
            temperature_c: entry.temperature_c,
            icon: entry.icon.clone(),
        })
        .collect()
}

/// Entries whose timestamp starts with `day`, in source order.
pub fn entries_for_day<'a>(entries: &'a [ForecastEntry], day: &str) -> Vec<&'a ForecastEntry> {
    entries.iter().filter(|entry| entry.date.starts_with(day)).collect()
}

impl HourlyForecast {
    pub fn for_day(&self, day: &str) -> Vec<&ForecastEntry> {
        entries_for_day(&self.entries, day)
    }
}
