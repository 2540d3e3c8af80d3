use chrono::NaiveDate;
use clap::{CommandFactory, Parser, Subcommand};
use ritual_core::YearMonth;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;

#[derive(Parser)]
#[command(name = "ritual", version, about = "Ritual habit tracker CLI")]
struct Cli {
    /// Treat this date as today (YYYY-MM-DD)
    #[arg(long, global = true)]
    today: Option<NaiveDate>,
    /// Month to display (YYYY-MM), defaults to today's month
    #[arg(long, global = true)]
    month: Option<YearMonth>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Habit management
    Habit {
        #[command(subcommand)]
        action: commands::habit::HabitAction,
    },
    /// Mark or inspect days of the displayed month
    Day {
        #[command(subcommand)]
        action: commands::day::DayAction,
    },
    /// Whole-month operations
    Month {
        #[command(subcommand)]
        action: commands::month::MonthAction,
    },
    /// Active habit, streak and month progress
    Status,
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Generate a shell completion script
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env("RITUAL_LOG").unwrap_or_else(|_| EnvFilter::new("ritual=warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact().with_writer(std::io::stderr))
        .init();
}

fn main() {
    init_tracing();

    let cli = Cli::parse();
    let ctx = commands::Context {
        today: cli
            .today
            .unwrap_or_else(|| chrono::Local::now().date_naive()),
        month: cli.month,
    };

    let result = match cli.command {
        Commands::Habit { action } => commands::habit::run(&ctx, action),
        Commands::Day { action } => commands::day::run(&ctx, action),
        Commands::Month { action } => commands::month::run(&ctx, action),
        Commands::Status => commands::status::run(&ctx),
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            commands::completions::run(shell, &mut Cli::command())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
