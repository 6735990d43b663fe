use tracing::debug;
use unicode_width::UnicodeWidthStr;

use crate::model::day_info::DayInfo;

/// Shading levels from lightest to full; the last two are both a full cell.
pub const BLOCKS: [&str; 8] = ["▁", "▂", "▃", "▅", "▆", "▇", "█", "█"];
pub const FULL_BLOCK: &str = BLOCKS[BLOCKS.len() - 1];
pub const EMPTY_BLOCK: &str = " ";

const AXIS_LABEL: &str = " Reps ";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TerminalSize {
    pub width: u16,
    pub height: u16,
}

/// Where the renderer learns how wide the output may be.
pub trait TerminalSizeProvider {
    fn terminal_size(&self) -> TerminalSize;
}

impl TerminalSizeProvider for TerminalSize {
    fn terminal_size(&self) -> TerminalSize {
        *self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartOptions {
    /// Widest column to try; shrinks down to 1 to fit the terminal.
    pub column_width: usize,
    pub column_height: usize,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            column_width: 3,
            column_height: 25,
        }
    }
}

/// A rendered chart: `rows[row][column]`, top row first, label column first.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartGrid {
    pub rows: Vec<Vec<&'static str>>,
    pub column_width: usize,
}

impl ChartGrid {
    pub fn num_columns(&self) -> usize {
        self.rows.first().map(|r| r.len()).unwrap_or(0)
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }
}

/// Lays out one bar per day, scaled so a full column means `target` reps.
///
/// `requested_days` pads the chart with empty columns when the window was trimmed.
pub fn build_chart(
    days: &[DayInfo],
    requested_days: usize,
    target: u32,
    terminal: &impl TerminalSizeProvider,
    options: ChartOptions,
) -> ChartGrid {
    let num_columns = requested_days.max(days.len()) + 1;
    let width = terminal.terminal_size().width as usize;

    let mut column_width = options.column_width.max(1);
    while num_columns * column_width > width && column_width > 1 {
        column_width -= 1;
    }

    let target = target.max(1) as usize;
    // Small targets get one row per rep.
    let column_height = if target <= options.column_height {
        target
    } else {
        options.column_height.max(1)
    };
    let reps_per_row = target / column_height;
    debug!(num_columns, column_width, column_height, reps_per_row, "chart layout");

    let mut columns: Vec<Vec<&'static str>> = Vec::with_capacity(num_columns);
    columns.push(label_column(column_height));

    for info in days {
        let reps = info.num_reps.min(target as u64) as usize;
        columns.push(day_column(reps, reps_per_row, column_height));
    }
    for _ in days.len()..requested_days {
        columns.push(vec![EMPTY_BLOCK; column_height]);
    }

    let rows = (0..column_height)
        .map(|row| columns.iter().map(|column| column[row]).collect())
        .collect();

    ChartGrid { rows, column_width }
}

fn label_column(height: usize) -> Vec<&'static str> {
    let mut column = vec!["|"; height];
    column[height - 1] = ">";

    let label: Vec<&'static str> = AXIS_LABEL
        .char_indices()
        .map(|(i, c)| &AXIS_LABEL[i..i + c.len_utf8()])
        .collect();
    // May start above the chart when it is shorter than the label.
    let label_pos = (height / 2) as isize - (label.len() / 2) as isize;
    for (offset, piece) in label.iter().enumerate() {
        let row = label_pos + offset as isize;
        if row >= 0 && (row as usize) < height {
            column[row as usize] = *piece;
        }
    }
    column
}

/// `reps` is already capped at the target.
fn day_column(reps: usize, reps_per_row: usize, height: usize) -> Vec<&'static str> {
    let cutoff = (reps / reps_per_row).min(height);
    let remainder = reps % reps_per_row;

    let mut column = vec![EMPTY_BLOCK; height];
    for cell in column.iter_mut().skip(height - cutoff) {
        *cell = FULL_BLOCK;
    }
    if remainder > 0 && cutoff < height {
        column[height - cutoff - 1] = partial_block(remainder, reps_per_row);
    }
    column
}

/// Glyph for a partly filled cell, rounding half to even.
pub fn partial_block(remainder: usize, reps_per_row: usize) -> &'static str {
    let level = (remainder as f64 / reps_per_row as f64 * BLOCKS.len() as f64).round_ties_even();
    BLOCKS[(level as usize).min(BLOCKS.len() - 1)]
}

/// Renders the grid followed by its caption and, when there is room, the day numbers.
pub fn render_chart(
    days: &[DayInfo],
    requested_days: usize,
    target: u32,
    terminal: &impl TerminalSizeProvider,
    options: ChartOptions,
) -> String {
    let grid = build_chart(days, requested_days, target, terminal, options);
    let column_width = grid.column_width;
    let chart_width = grid.num_columns() * column_width;
    let mut out = String::new();

    for row in &grid.rows {
        for cell in row {
            out.push_str(&pad_cell(cell, column_width));
        }
        out.push('\n');
    }

    out.push_str(&format!("{:-^chart_width$}", caption(days.len())));
    out.push('\n');

    if column_width >= 3 {
        for i in 0..grid.num_columns() {
            let label = if i == 0 { String::new() } else { i.to_string() };
            out.push_str(&pad_cell(&label, column_width));
        }
        out.push('\n');
    }

    out
}

pub fn caption(num_days: usize) -> String {
    if num_days == 1 {
        " Past 1 day ".to_string()
    } else {
        format!(" Past {} days ", num_days)
    }
}

fn pad_cell(cell: &str, width: usize) -> String {
    let padding = width.saturating_sub(cell.width());
    format!("{}{}", cell, " ".repeat(padding))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    const WIDE: TerminalSize = TerminalSize { width: 200, height: 50 };

    fn day(offset: i64, num_reps: u64, target: u32) -> DayInfo {
        let date = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap() + Duration::days(offset);
        DayInfo {
            date,
            date_string: date.format("%d %b %Y").to_string(),
            sets: Vec::new(),
            num_sets: 1,
            num_reps,
            target,
            to_go: (target as u64).saturating_sub(num_reps),
            extra: num_reps.saturating_sub(target as u64),
            behind: 0,
        }
    }

    fn column(grid: &ChartGrid, index: usize) -> Vec<&'static str> {
        grid.rows.iter().map(|row| row[index]).collect()
    }

    #[test]
    fn test_row_and_column_counts() {
        let days = vec![day(0, 40, 100), day(1, 100, 100)];
        let grid = build_chart(&days, 5, 100, &WIDE, ChartOptions::default());

        assert_eq!(grid.height(), 25);
        assert_eq!(grid.num_columns(), 6);
        assert_eq!(grid.column_width, 3);
        assert!(grid.rows.iter().all(|row| row.len() == 6));
        // Padding columns for trimmed days are blank.
        assert!(column(&grid, 5).iter().all(|c| *c == EMPTY_BLOCK));
    }

    #[test]
    fn test_full_rows_and_partial_glyph() {
        let days = vec![day(0, 4, 100), day(1, 2, 100), day(2, 150, 100)];
        let grid = build_chart(&days, 3, 100, &WIDE, ChartOptions::default());

        let one_row = column(&grid, 1);
        assert_eq!(one_row[24], FULL_BLOCK);
        assert!(one_row[..24].iter().all(|c| *c == EMPTY_BLOCK));

        let partial = column(&grid, 2);
        assert_eq!(partial[24], BLOCKS[4]);
        assert!(partial[..24].iter().all(|c| *c == EMPTY_BLOCK));

        // Reps beyond the target are capped at a full column.
        assert!(column(&grid, 3).iter().all(|c| *c == FULL_BLOCK));
    }

    #[test]
    fn test_partial_glyph_sits_above_solid_rows() {
        let days = vec![day(0, 10, 100)];
        let grid = build_chart(&days, 1, 100, &WIDE, ChartOptions::default());
        let bar = column(&grid, 1);

        assert_eq!(&bar[23..], &[FULL_BLOCK, FULL_BLOCK]);
        assert_eq!(bar[22], BLOCKS[4]);
        assert!(bar[..22].iter().all(|c| *c == EMPTY_BLOCK));
    }

    #[test]
    fn test_small_target_uses_one_row_per_rep() {
        let days = vec![day(0, 3, 10)];
        let grid = build_chart(&days, 1, 10, &WIDE, ChartOptions::default());

        assert_eq!(grid.height(), 10);
        let bar = column(&grid, 1);
        assert_eq!(bar.iter().filter(|c| **c == FULL_BLOCK).count(), 3);
    }

    #[test]
    fn test_uneven_target_never_overflows_column() {
        // 30 reps over 25 rows is one rep per row, so a full day would need 30 rows.
        let days = vec![day(0, 30, 30)];
        let grid = build_chart(&days, 1, 30, &WIDE, ChartOptions::default());

        assert_eq!(grid.height(), 25);
        assert!(column(&grid, 1).iter().all(|c| *c == FULL_BLOCK));
    }

    #[test]
    fn test_partial_block_rounding() {
        assert_eq!(partial_block(2, 4), BLOCKS[4]);
        assert_eq!(partial_block(1, 16), BLOCKS[0]);
        assert_eq!(partial_block(3, 16), BLOCKS[2]);
        assert_eq!(partial_block(19, 20), BLOCKS[7]);
    }

    #[test]
    fn test_label_column() {
        let grid = build_chart(&[], 0, 100, &WIDE, ChartOptions::default());
        let label = column(&grid, 0);

        assert_eq!(label[24], ">");
        assert_eq!(label[9..15].concat(), " Reps ");
        assert!(label[..9].iter().all(|c| *c == "|"));
        assert!(label[15..24].iter().all(|c| *c == "|"));
    }

    #[test]
    fn test_label_truncated_on_short_chart() {
        let grid = build_chart(&[], 0, 4, &WIDE, ChartOptions::default());
        assert_eq!(column(&grid, 0).concat(), "Reps");
    }

    #[test]
    fn test_column_width_shrinks_to_fit() {
        let days: Vec<DayInfo> = (0..30).map(|i| day(i, 50, 100)).collect();

        let narrow = TerminalSize { width: 80, height: 24 };
        assert_eq!(build_chart(&days, 30, 100, &narrow, ChartOptions::default()).column_width, 2);

        let tiny = TerminalSize { width: 10, height: 24 };
        assert_eq!(build_chart(&days, 30, 100, &tiny, ChartOptions::default()).column_width, 1);
    }

    #[test]
    fn test_caption() {
        assert_eq!(caption(1), " Past 1 day ");
        assert_eq!(caption(7), " Past 7 days ");
    }

    #[test]
    fn test_render_footer() {
        let days = vec![day(0, 100, 100)];
        let options = ChartOptions { column_width: 3, column_height: 8 };
        let out = render_chart(&days, 4, 100, &WIDE, options);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "|  █           ");
        assert_eq!(lines[7], ">  █           ");
        assert_eq!(lines[8], "- Past 1 day --");
        assert_eq!(lines[9], "   1  2  3  4  ");
    }

    #[test]
    fn test_render_without_day_numbers_when_narrow() {
        let days = vec![day(0, 100, 100), day(1, 50, 100)];
        let narrow = TerminalSize { width: 4, height: 24 };
        let options = ChartOptions { column_width: 3, column_height: 4 };
        let out = render_chart(&days, 2, 100, &narrow, options);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 5);
        assert_eq!(lines[0], "R█ ");
        assert_eq!(lines[4], " Past 2 days ");
    }
}
