use anyhow::Result;
use clap::{Parser, Subcommand};

mod cli;

/// mealplanner - meal planning API
#[derive(Parser)]
#[command(name = "mealplanner")]
#[command(about = "Recipes, meal plans and grocery lists over a JSON API", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Server host address (overrides config file)
        #[arg(long)]
        host: Option<String>,

        /// Server port (overrides config file)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Run database migrations
    Migrate,
    /// Manage user accounts
    User {
        #[command(subcommand)]
        command: UserCommands,
    },
}

#[derive(Subcommand)]
enum UserCommands {
    /// Grant admin access, revoke it, or suspend an account
    SetRole {
        email: String,
        #[arg(value_enum)]
        role: cli::user::Role,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = mealplanner::config::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    mealplanner::observability::init_observability(
        "mealplanner",
        env!("CARGO_PKG_VERSION"),
        &config.observability.log_level,
    )?;

    match cli.command {
        Commands::Serve { host, port } => cli::server::serve(config, host, port).await,
        Commands::Migrate => cli::server::migrate(config).await,
        Commands::User {
            command: UserCommands::SetRole { email, role },
        } => cli::user::set_role(config, email, role).await,
    }
}
