use chrono::{Duration, NaiveDate};
use tracing::debug;

use crate::model::day_info::{DayInfo, DayWindow};
use crate::model::set::{SetRecord, DATE_DISPLAY_FORMAT};

/// First date of a `days`-long window ending on `today` (inclusive).
pub fn window_start(today: NaiveDate, days: u32) -> NaiveDate {
    today - Duration::days(days.saturating_sub(1) as i64)
}

/// Groups `records` into one bucket per date of the window ending `today` and computes progress
/// against `target` for each of them.
///
/// With `skip_leading`, days without any sets before the first active day are dropped and
/// counted in [`DayWindow::skipped`]. When no day has sets the result is empty.
pub fn build_day_window(
    records: &[SetRecord],
    today: NaiveDate,
    days: u32,
    target: u32,
    skip_leading: bool,
) -> DayWindow {
    let start = window_start(today, days);
    let mut buckets: Vec<Vec<SetRecord>> = vec![Vec::new(); days as usize];

    for record in records {
        let offset = (record.date() - start).num_days();
        if offset < 0 || offset >= days as i64 {
            continue;
        }
        buckets[offset as usize].push(record.clone());
    }

    let skipped = if skip_leading {
        buckets.iter().take_while(|sets| sets.is_empty()).count()
    } else {
        0
    };
    debug!(%start, %today, skipped, "bucketed sets");

    let active = &buckets[skipped..];
    let target_reps = u64::from(target);
    let mut prev_behind: u64 = 0;
    let mut infos = Vec::with_capacity(active.len());

    for (i, sets) in active.iter().enumerate() {
        let date = start + Duration::days((skipped + i) as i64);
        let num_reps: u64 = sets.iter().map(|s| u64::from(s.quantity)).sum();
        let to_go = target_reps.saturating_sub(num_reps);
        let extra = num_reps.saturating_sub(target_reps);

        // The last day's shortfall counts as behind too; the report shows it next to to_go.
        let behind = (to_go + prev_behind).saturating_sub(extra);

        infos.push(DayInfo {
            date,
            date_string: date.format(DATE_DISPLAY_FORMAT).to_string(),
            sets: sets.clone(),
            num_sets: sets.len(),
            num_reps,
            target,
            to_go,
            extra,
            behind,
        });

        prev_behind = behind;
    }

    DayWindow {
        requested_days: days as usize,
        skipped,
        days: infos,
    }
}
