//! Atrium Control - CLI client for the Atrium portal daemon

mod client;
mod commands;
mod display;

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "atriumctl")]
#[command(about = "Atrium - Tenant portal for property management", long_about = None)]
#[command(version)]
struct Cli {
    /// Daemon base URL
    #[arg(long, default_value = "http://127.0.0.1:7810")]
    url: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show daemon health
    Status,

    /// Register a tenant
    Register {
        #[arg(long)]
        email: String,
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        unit: String,
        #[arg(long)]
        building: String,
        #[arg(long)]
        phone: Option<String>,
    },

    /// Sign a tenant in
    Login {
        #[arg(long)]
        email: String,
        #[arg(long)]
        unit: String,
    },

    /// Submit a maintenance/incident/service/visitor request
    Submit {
        /// Request type, e.g. "Room Maintenance" or "Incident Report"
        #[arg(long = "type")]
        request_type: String,
        #[arg(long)]
        category: String,
        #[arg(long)]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long)]
        floor: i32,
        #[arg(long)]
        unit: String,
        #[arg(long, default_value = "Property 1")]
        property: String,
        #[arg(long)]
        building: Option<String>,
        #[arg(long)]
        phone: String,
        /// Photo reference, repeatable
        #[arg(long = "photo")]
        photos: Vec<String>,
    },

    /// List submitted tickets, newest first
    List,

    /// Update a ticket's status
    SetStatus {
        #[arg(long)]
        ticket: String,
        /// Open, Assigned, or Resolved
        #[arg(long)]
        status: String,
    },

    /// Show building announcements
    Announcements,

    /// Show the building contact directory
    Contacts,

    /// Ask the building assistant a question
    Chat {
        message: String,
    },

    /// Export records as CSV
    Export {
        /// "tenants" or "requests"
        what: String,
        /// Output path (defaults to a dated filename in the current directory)
        #[arg(long)]
        out: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = client::PortalClient::new(cli.url);

    match cli.command {
        Commands::Status => commands::status(&client).await,
        Commands::Register {
            email,
            first_name,
            last_name,
            unit,
            building,
            phone,
        } => commands::register(&client, email, first_name, last_name, unit, building, phone).await,
        Commands::Login { email, unit } => commands::login(&client, email, unit).await,
        Commands::Submit {
            request_type,
            category,
            title,
            description,
            floor,
            unit,
            property,
            building,
            phone,
            photos,
        } => {
            commands::submit(
                &client,
                commands::SubmitArgs {
                    request_type,
                    category,
                    title,
                    description,
                    floor,
                    unit,
                    property,
                    building,
                    phone,
                    photos,
                },
            )
            .await
        }
        Commands::List => commands::list(&client).await,
        Commands::SetStatus { ticket, status } => {
            commands::set_status(&client, ticket, status).await
        }
        Commands::Announcements => commands::announcements(&client).await,
        Commands::Contacts => commands::contacts(&client).await,
        Commands::Chat { message } => commands::chat(&client, message).await,
        Commands::Export { what, out } => commands::export(&client, what, out).await,
    }
}
