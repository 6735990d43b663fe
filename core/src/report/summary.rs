use crate::model::day_info::{DayInfo, DayWindow};

pub const NOTHING_TO_REPORT: &str = "Nothing to report (no sets recorded)";

/// Renders one line per day followed by a totals line.
///
/// An empty window renders as a single [`NOTHING_TO_REPORT`] line.
pub fn render_report(window: &DayWindow) -> String {
    if window.is_empty() {
        return format!("{}\n", NOTHING_TO_REPORT);
    }

    let mut lines = Vec::with_capacity(window.days.len() + 2);

    if window.skipped > 0 {
        let plural = if window.skipped == 1 { "" } else { "s" };
        lines.push(format!("Skipped {} day{} with no recorded sets", window.skipped, plural));
    }

    let total_sets = window.total_sets();
    let total_reps = window.total_reps();

    let date_width = window.days.iter().map(|d| d.date_string.chars().count()).max().unwrap_or(0);
    let sets_width = total_sets.to_string().len() + 2;
    let reps_width = total_reps.to_string().len() + 2;

    for (i, info) in window.days.iter().enumerate() {
        let previous = if i > 0 { window.days.get(i - 1) } else { None };
        let message = if i == window.days.len() - 1 {
            final_day_message(info, previous)
        } else {
            day_message(info)
        };
        lines.push(format!(
            "{:<date_width$}{:>sets_width$} sets{:>reps_width$} reps  {}",
            info.date_string, info.num_sets, info.num_reps, message,
        ));
    }

    lines.push(format!(
        "{:<date_width$}{:>sets_width$} sets{:>reps_width$} reps",
        "Total", total_sets, total_reps,
    ));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn day_message(info: &DayInfo) -> String {
    if info.to_go > 0 {
        return format!("{} not done", info.to_go);
    }
    format!("Done{}!", extra_suffix(info.extra))
}

fn final_day_message(info: &DayInfo, previous: Option<&DayInfo>) -> String {
    match (info.to_go, info.behind) {
        (0, 0) => {
            let carried = previous.map(|p| p.behind).unwrap_or(0);
            let done = if carried > 0 { "Caught up" } else { "Done" };
            format!("{}{}!", done, extra_suffix(info.extra.saturating_sub(carried)))
        }
        (to_go, 0) => format!("{} to go", to_go),
        (0, behind) => format!("{} behind", behind),
        (to_go, behind) => format!("{} to go + {} behind", to_go, behind),
    }
}

fn extra_suffix(extra: u64) -> String {
    if extra > 0 {
        format!(" + {} extra", extra)
    } else {
        String::new()
    }
}
