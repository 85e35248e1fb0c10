mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::dashboard::DashboardArgs;
use commands::loan::{EmiArgs, ScheduleArgs};

/// EMI and loan amortisation calculations
#[derive(Parser)]
#[command(
    name = "loancalc",
    version,
    about = "EMI and loan amortisation calculations",
    long_about = "A CLI for computing equated monthly instalments (EMI) and month-by-month \
                  amortisation schedules with decimal precision, plus an interactive \
                  dashboard for exploring a loan."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Calculate the equated monthly instalment for a loan
    Emi(EmiArgs),
    /// Build the month-by-month amortisation schedule
    Schedule(ScheduleArgs),
    /// Interactive loan dashboard (reads commands line by line)
    Dashboard(DashboardArgs),
    /// Describe this application
    About,
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn fail(e: Box<dyn std::error::Error>) -> ! {
    eprintln!("{}: {}", "error".red().bold(), e);
    process::exit(1);
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Emi(args) => commands::loan::run_emi(args),
        Commands::Schedule(args) => commands::loan::run_schedule(args),
        Commands::Dashboard(args) => {
            if let Err(e) = commands::dashboard::run_dashboard(args) {
                fail(e);
            }
            return;
        }
        Commands::About => {
            if let Err(e) = commands::dashboard::print_about() {
                fail(e.into());
            }
            return;
        }
        Commands::Version => {
            println!("loancalc {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => fail(e),
    }
}
