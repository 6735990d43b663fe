mod logging;
mod prompt;
mod terminal;

use std::io::{BufRead, Write};

use anyhow::Result;
use chrono::{Local, NaiveDate, NaiveDateTime};
use clap::Parser;
use settracker_core::{
    expand_file_name, parse_date, parse_time, render_chart, render_report, ChartOptions,
    FileSetRepository, SetGroup, SetRepository, SetService, Settings,
};
use tracing::{error, level_filters::LevelFilter};

use crate::prompt::{positive_int, Console};
use crate::terminal::ConsoleTerminal;

/// Keep track of sets of rep(etition)s.
///
/// This can be used for tracking sets of exercises or sets of any other repetitive activity.
/// Sets are grouped together by day. Adding a set (`settracker 10 pushups`) shows a progress
/// report of the last 30 days; `settracker -r` shows the report without adding a set.
#[derive(Parser)]
#[command(name = "settracker", version)]
struct Cli {
    /// Number of reps done in set; if not specified, will be prompted for
    #[arg(value_parser = clap::value_parser!(u32).range(1..))]
    quantity: Option<u32>,
    /// Set group [env: SET_TRACKER_DEFAULT_GROUP]
    group: Option<String>,
    /// Set store file; relative names resolve against SET_TRACKER_BASE_DIR or the current dir
    #[arg(short, long)]
    file_name: Option<String>,
    /// Date set was done: YYYY-MM-DD, today, yesterday or -Nd [today]
    #[arg(short, long)]
    date: Option<String>,
    /// Time set was done in HH:MM format (24-hour clock) [now]
    #[arg(short, long)]
    time: Option<String>,
    /// Daily target repetitions [env: SET_TRACKER_DEFAULT_TARGET_REPS, default: 100]
    #[arg(short = 'T', long, value_parser = clap::value_parser!(u32).range(1..))]
    target_reps: Option<u32>,
    /// Only show report (skip adding a set)
    #[arg(short, long)]
    report_only: bool,
    /// Only show chart in report (implies -r)
    #[arg(short, long)]
    chart_only: bool,
    /// Don't show chart when reporting (implies -r)
    #[arg(short = 'C', long)]
    no_chart: bool,
    /// Number of days to include in report
    #[arg(
        short = 'D',
        long,
        default_value_t = settracker_core::config::DEFAULT_DAYS,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    days: u32,
    /// Answer yes to every confirmation
    #[arg(short, long)]
    yes: bool,
    /// Enable verbose logging on stderr
    #[arg(long)]
    log: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::enable_logging(cli.log.then_some(LevelFilter::TRACE))?;

    run(cli).inspect_err(|e| {
        error!("Error running settracker {e:?}");
    })
}

fn run(cli: Cli) -> Result<()> {
    let settings = Settings::from_env()?;
    let file_path = expand_file_name(cli.file_name.as_deref(), &settings)?;
    let now = Local::now().naive_local();
    let date_time = resolve_date_time(cli.date.as_deref(), cli.time.as_deref(), now)?;
    let target_reps = cli.target_reps.unwrap_or(settings.default_target_reps);
    let report_only = cli.report_only || cli.chart_only || cli.no_chart;
    let mut console = Console::stdio(cli.yes);

    println!("Database file: {}", file_path.display());

    let repo = if file_path.is_file() {
        FileSetRepository::open(&file_path)?
    } else if console.confirm("Database file does not exist. Create?")? {
        FileSetRepository::create(&file_path)?
    } else {
        return abort();
    };
    let service = SetService::new(repo);

    let group = match cli.group.clone().or(settings.default_group) {
        Some(name) => get_or_add_group(&service, &mut console, &name)?,
        None => choose_group(&service, &mut console)?,
    };
    let Some(group) = group else {
        return abort();
    };

    if !report_only {
        let quantity = match cli.quantity {
            Some(quantity) => quantity,
            None => console.prompt("Number of reps:", positive_int, None)?,
        };

        println!("Set group: {}", group.name);
        println!("Target reps: {}", target_reps);

        let display = date_time.format(settracker_core::model::set::DATETIME_DISPLAY_FORMAT);
        if !console.confirm(&format!("Add set of {} reps for {}?", quantity, display))? {
            return abort();
        }
        let new_set = service.add_set(&group, quantity, date_time)?;
        println!("Added {} reps", new_set.quantity);
    }

    print_report(&service, &group, &cli, target_reps, now.date())
}

fn print_report<R: SetRepository>(
    service: &SetService<R>,
    group: &SetGroup,
    cli: &Cli,
    target_reps: u32,
    today: NaiveDate,
) -> Result<()> {
    let window = service.day_window(group, cli.days, target_reps, today)?;

    if !cli.chart_only || window.is_empty() {
        print!("{}", render_report(&window));
    }
    if window.is_empty() || cli.no_chart {
        return Ok(());
    }
    if !cli.chart_only {
        println!();
    }

    let chart = render_chart(
        &window.days,
        window.requested_days,
        target_reps,
        &ConsoleTerminal,
        ChartOptions::default(),
    );
    print!("{}", chart);
    Ok(())
}

fn resolve_date_time(
    date: Option<&str>,
    time: Option<&str>,
    now: NaiveDateTime,
) -> Result<NaiveDateTime> {
    let date = match date {
        Some(value) => parse_date(value, now.date())?,
        None => now.date(),
    };
    let time = match time {
        Some(value) => parse_time(value, now.time())?,
        None => now.time(),
    };
    Ok(date.and_time(time))
}

/// Looks up a group by name, offering to create it when missing.
fn get_or_add_group<R, I, W, E>(
    service: &SetService<R>,
    console: &mut Console<I, W, E>,
    name: &str,
) -> Result<Option<SetGroup>>
where
    R: SetRepository,
    I: BufRead,
    W: Write,
    E: Write,
{
    if let Some(group) = service.find_group(name)? {
        return Ok(Some(group));
    }
    if console.confirm(&format!("Set group \"{}\" does not exist. Create?", name))? {
        return Ok(Some(service.add_group(name)?));
    }
    Ok(None)
}

fn choose_group<R, I, W, E>(
    service: &SetService<R>,
    console: &mut Console<I, W, E>,
) -> Result<Option<SetGroup>>
where
    R: SetRepository,
    I: BufRead,
    W: Write,
    E: Write,
{
    let groups = service.groups()?;
    let default = groups.first().map(|g| g.name.clone());
    if !groups.is_empty() {
        let names: Vec<&str> = groups.iter().map(|g| g.name.as_str()).collect();
        println!("Set groups: {}", names.join(", "));
    }

    let message = match &default {
        Some(name) => format!("Set group [{}]:", name),
        None => "Set group:".to_string(),
    };
    let name = console.prompt(&message, |s| Ok(s.to_string()), default)?;
    get_or_add_group(service, console, &name)
}

fn abort() -> Result<()> {
    println!("Aborted");
    Ok(())
}
