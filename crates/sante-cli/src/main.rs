use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod app;
mod commands;
mod prompt;

#[derive(Parser)]
#[command(name = "sante")]
#[command(about = "Sante - daily symptom check-in", long_about = None)]
struct Cli {
    /// Override the backend base URL (staging, local development)
    #[arg(long, global = true)]
    api_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Register this device with an email address
    Login {
        email: String,
    },
    /// Sign out and wipe stored credentials
    Logout,
    /// Answer the one-time health profile questionnaire
    Profile,
    /// Run today's symptom check-in
    Checkin,
    /// Show your profile and report history
    Status,
    /// Manage the friend list
    Friends {
        #[command(subcommand)]
        action: FriendsAction,
    },
    /// Configure the daily reminder
    Reminder {
        /// Reminder time as HH:MM, or "off" to clear it
        time: String,
    },
}

#[derive(Subcommand)]
enum FriendsAction {
    /// List the people sharing their reports with you
    List,
    /// Stop sharing with a friend
    Remove { id: i64 },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let context = app::AppContext::init(cli.api_url)?;

    match cli.command {
        Commands::Login { email } => commands::account::login(&context, email).await,
        Commands::Logout => commands::account::logout(&context).await,
        Commands::Profile => commands::profile::run(&context).await,
        Commands::Checkin => commands::checkin::run(&context).await,
        Commands::Status => commands::status::run(&context).await,
        Commands::Friends { action } => match action {
            FriendsAction::List => commands::friends::list(&context).await,
            FriendsAction::Remove { id } => commands::friends::remove(&context, id).await,
        },
        Commands::Reminder { time } => commands::reminder::run(&context, &time).await,
    }
}
