use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use coachbook::components::availability::DayOfWeek;
use coachbook::components::DataService;
use coachbook::error::not_found_error;
use coachbook::startup;
use coachbook::utils::time::{date_range, today_in, week_containing};
use tracing::info;

/// Coach availability and booking tools
#[derive(Debug, Parser)]
#[command(name = "coachbook", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// List bookable slots for a coach on a date
    Slots {
        #[arg(long)]
        coach: String,
        /// Date in YYYY-MM-DD format
        #[arg(long)]
        date: NaiveDate,
    },
    /// Show which days a coach takes bookings, with slot counts
    Calendar {
        #[arg(long)]
        coach: String,
        /// First day to show; defaults to the start of the current week
        #[arg(long)]
        from: Option<NaiveDate>,
        #[arg(long, default_value_t = 7)]
        days: u32,
    },
    /// List coaches for a sport, optionally only those available on a weekday
    Coaches {
        #[arg(long)]
        sport: String,
        #[arg(long)]
        day: Option<DayOfWeek>,
    },
}

#[tokio::main]
async fn main() -> miette::Result<()> {
    let cli = Cli::parse();

    // Load configuration and initialize logging
    let config = startup::load_config()?;
    startup::init_logging(&config.log_filter)?;

    info!("Starting coachbook");

    let service = startup::build_service(&config).await?;

    match cli.command {
        Command::Slots { coach, date } => print_slots(&service, &coach, date).await,
        Command::Calendar { coach, from, days } => {
            let from = match from {
                Some(from) => from,
                None => week_containing(today_in(config.timezone()?)).0,
            };
            print_calendar(&service, &coach, from, days).await
        }
        Command::Coaches { sport, day } => print_coaches(&service, &sport, day).await,
    }
}

async fn print_slots(service: &DataService, coach_id: &str, date: NaiveDate) -> miette::Result<()> {
    let coach = service
        .user(coach_id)
        .await?
        .ok_or_else(|| not_found_error("users", coach_id))?;

    let slots = service.bookable_slots(coach_id, date).await?;
    println!("{} on {} ({})", coach.name, date, DayOfWeek::from_date(date));

    if slots.is_empty() {
        println!("  No time slots available for this day.");
    }
    for slot in slots {
        println!("  {}", slot);
    }

    Ok(())
}

async fn print_calendar(
    service: &DataService,
    coach_id: &str,
    from: NaiveDate,
    days: u32,
) -> miette::Result<()> {
    for date in date_range(from, days) {
        let weekday = DayOfWeek::from_date(date);
        if service.is_day_disabled_for(coach_id, date).await? {
            println!("{} {}  unavailable", date, weekday);
            continue;
        }

        let slots = service.bookable_slots(coach_id, date).await?;
        println!("{} {}  {} slot(s)", date, weekday, slots.len());
    }

    Ok(())
}

async fn print_coaches(service: &DataService, sport: &str, day: Option<DayOfWeek>) -> miette::Result<()> {
    match day {
        Some(day) => {
            for entry in service.available_coaches(sport, day).await? {
                let blocks: Vec<&str> = entry
                    .availability
                    .time_blocks
                    .iter()
                    .map(|b| b.name.as_str())
                    .collect();
                println!("{} ({})  {}", entry.coach.name, entry.coach.id, blocks.join(", "));
            }
        }
        None => {
            for coach in service.coaches_in_sport(sport).await? {
                println!("{} ({})", coach.name, coach.id);
            }
        }
    }

    Ok(())
}
