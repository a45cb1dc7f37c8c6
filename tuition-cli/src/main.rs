//! Tuition CLI
//!
//! Command-line interface for the Tuition Payment API.

use anyhow::Result;
use clap::{Parser, Subcommand};

use tuition_client::TuitionClient;
use tuition_types::Month;

#[derive(Parser)]
#[command(name = "tuition")]
#[command(author, version, about = "Tuition Payment API CLI client", long_about = None)]
struct Cli {
    /// Base URL of the Tuition Payment API
    #[arg(
        long,
        env = "TUITION_API_URL",
        default_value = "http://localhost:3000"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Payment operations
    Payment {
        #[command(subcommand)]
        action: PaymentCommands,
    },
    /// Bulk deletion of payments
    Delete {
        #[command(subcommand)]
        action: DeleteCommands,
    },
    /// Check API health
    Health,
}

#[derive(Subcommand)]
enum PaymentCommands {
    /// Pay a tuition fee for one month
    Create {
        #[arg(long)]
        student: String,
        #[arg(long)]
        tuition: String,
        /// Month name, e.g. JANUARY
        #[arg(long, value_parser = parse_month)]
        month: Month,
        /// Defaults to the server's current year
        #[arg(long)]
        year: Option<i32>,
        /// Amount in smallest currency unit
        #[arg(long)]
        amount: i64,
    },
    /// List students who paid a tuition for a month
    List {
        #[arg(long)]
        tuition: String,
        #[arg(long, value_parser = parse_month)]
        month: Month,
        #[arg(long)]
        year: Option<i32>,
    },
}

#[derive(Subcommand)]
enum DeleteCommands {
    /// Delete every payment for a tuition
    Tuition {
        /// Tuition ID
        id: String,
    },
    /// Delete every payment made by a student
    Student {
        /// Student ID
        id: String,
    },
}

fn parse_month(s: &str) -> std::result::Result<Month, String> {
    s.parse()
        .map_err(|_| format!("Unknown month: {}. Use a name like JANUARY", s))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let client = TuitionClient::new(&cli.api_url);

    match cli.command {
        Commands::Health => {
            let healthy = client.health().await?;
            if healthy {
                println!("✓ API is healthy");
            } else {
                println!("✗ API is not healthy");
                std::process::exit(1);
            }
        }

        Commands::Payment { action } => match action {
            PaymentCommands::Create {
                student,
                tuition,
                month,
                year,
                amount,
            } => {
                let payment = client
                    .create_payment(&student, &tuition, month, year, amount)
                    .await?;
                println!("{}", serde_json::to_string_pretty(&payment)?);
            }
            PaymentCommands::List {
                tuition,
                month,
                year,
            } => {
                let student_ids = client.list_paying_students(&tuition, month, year).await?;
                println!("{}", serde_json::to_string_pretty(&student_ids)?);
            }
        },

        Commands::Delete { action } => match action {
            DeleteCommands::Tuition { id } => {
                client.delete_by_tuition(&id).await?;
                println!("✓ Payments for tuition {} deleted", id);
            }
            DeleteCommands::Student { id } => {
                client.delete_by_student(&id).await?;
                println!("✓ Payments by student {} deleted", id);
            }
        },
    }

    Ok(())
}
