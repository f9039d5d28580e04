use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use miette::IntoDiagnostic;
use nurse_roster_view::components::{nurse_api::MyScheduleOutcome, NurseApiHandle};
use nurse_roster_view::error::{other_error, RosterResult};
use nurse_roster_view::schedule::{
    parse_freeform_schedule, parse_full_schedule, DayOrder, ScheduleView, ViewOptions, WeekFilter,
};
use nurse_roster_view::startup;
use serde_json::{Map, Value};
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Roster view - show nurse schedules from the roster backend
#[derive(Parser)]
#[command(name = "roster-view")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Show your own schedule, next week only
    roster-view my-schedule --week next

    # Show every nurse, ordered by date
    roster-view full-schedule --order date

    # Parse a saved schedule text offline
    roster-view parse schedule.txt --today 2024-01-17")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Which days to show: all, current or next
    #[arg(long, global = true)]
    week: Option<WeekFilter>,

    /// Day ordering: weekday or date
    #[arg(long, global = true)]
    order: Option<DayOrder>,

    /// Reference date for the current week (defaults to today)
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Parse a schedule saved to a file
    Parse {
        /// Schedule text, or JSON table rows with --tabular
        file: PathBuf,

        /// Treat the file as the JSON full schedule table
        #[arg(long)]
        tabular: bool,
    },

    /// Fetch and show your own schedule
    MySchedule,

    /// Fetch and show the full schedule of every nurse (admin)
    FullSchedule,

    /// Show the logged-in nurse
    Status,
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    startup::init_logging()?;

    let cli = Cli::parse();
    let config = startup::load_config()?;

    let options = ViewOptions::new(
        cli.week.unwrap_or(config.view.week_filter),
        cli.order.unwrap_or(config.view.day_order),
        cli.today
            .unwrap_or_else(|| chrono::Local::now().date_naive()),
    );

    match cli.command {
        Commands::Parse { file, tabular } => {
            let content = fs::read_to_string(&file).into_diagnostic()?;
            let views: Vec<ScheduleView> = if tabular {
                let rows = table_rows(&content)?;
                parse_full_schedule(&rows)
                    .iter()
                    .map(|record| record.render(&options))
                    .collect()
            } else {
                vec![parse_freeform_schedule(&content).render(&options)]
            };
            print_views(&views, cli.json)?;
        }
        Commands::MySchedule => {
            let api = NurseApiHandle::new(&config)?;
            match api.my_schedule().await? {
                MyScheduleOutcome::Pending(message) => {
                    info!("Schedule pending: {}", message);
                    println!("Schedule pending: no schedule data available yet.");
                }
                MyScheduleOutcome::Ready(record) => {
                    print_views(&[record.render(&options)], cli.json)?;
                }
            }
            api.shutdown().await?;
        }
        Commands::FullSchedule => {
            let api = NurseApiHandle::new(&config)?;
            let records = api.full_schedule().await?;
            if records.is_empty() {
                println!("No schedule data available");
            } else {
                let views: Vec<ScheduleView> =
                    records.iter().map(|record| record.render(&options)).collect();
                print_views(&views, cli.json)?;
            }
            api.shutdown().await?;
        }
        Commands::Status => {
            let api = NurseApiHandle::new(&config)?;
            let status = api.fetch_status().await?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&status).into_diagnostic()?);
            } else {
                println!(
                    "{} ({}){} - {}",
                    status.nurse_name,
                    status.nurse_id,
                    if status.is_admin { " [admin]" } else { "" },
                    status.status
                );
            }
            api.shutdown().await?;
        }
    }

    Ok(())
}

/// Accepts one nurse object, an array of them, or the whole
/// `{"schedule": [...]}` response
fn table_rows(content: &str) -> RosterResult<Vec<Map<String, Value>>> {
    let value: Value = serde_json::from_str(content)?;

    let rows = match value {
        Value::Object(mut map) => match map.remove("schedule") {
            Some(Value::Array(rows)) => rows,
            Some(_) => return Err(other_error("'schedule' must be an array")),
            None => vec![Value::Object(map)],
        },
        Value::Array(rows) => rows,
        _ => return Err(other_error("expected a JSON object or array")),
    };

    rows.into_iter()
        .map(|row| match row {
            Value::Object(map) => Ok(map),
            _ => Err(other_error("every schedule row must be a JSON object")),
        })
        .collect()
}

fn print_views(views: &[ScheduleView], json: bool) -> RosterResult<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(views)?);
        return Ok(());
    }

    for view in views {
        println!("{}", view);
    }
    Ok(())
}
