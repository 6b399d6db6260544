//! J-Flix CLI
//!
//! Command-line client for the J-Flix movie catalogue.

use std::path::PathBuf;

use anyhow::{Context as _, Result};
use clap::{Parser, Subcommand};

use jflix_core::Config;

mod commands;
mod logging;
mod output;
mod prompt;

use commands::profile::ProfileEdits;
use commands::Context;
use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "jflix")]
#[command(about = "J-Flix - Browse movies and keep a list of favorites")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Use this config file instead of the default
    #[arg(long = "config", global = true, value_name = "PATH")]
    config_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account
    Register {
        username: String,
        #[arg(short, long)]
        email: String,
        /// Birthday as YYYY-MM-DD
        #[arg(short, long)]
        birthday: Option<String>,
        /// Password (prompted for when omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Log in and store the session
    Login {
        username: String,
        /// Password (prompted for when omitted)
        #[arg(long)]
        password: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// List movies
    #[command(alias = "ls")]
    Movies {
        /// Only show favorites
        #[arg(short, long)]
        favorites: bool,
    },
    /// Show a movie
    Movie { title: String },
    /// Show a director
    Director { name: String },
    /// Show a genre
    Genre { name: String },
    /// Add or remove a movie from favorites
    #[command(alias = "fav")]
    Favorite {
        /// Movie id or title
        movie: String,
    },
    /// Show or edit the user profile
    Profile {
        #[command(subcommand)]
        command: Option<ProfileCommands>,
    },
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
    /// Show API endpoint and login status
    Status,
}

#[derive(Subcommand)]
enum ProfileCommands {
    /// Show the profile
    Show {
        /// Use the stored record without asking the server
        #[arg(long)]
        cached: bool,
    },
    /// Fetch the profile from the server
    Refresh,
    /// Change profile fields (prompts when no flags are given)
    Edit {
        #[arg(long)]
        username: Option<String>,
        #[arg(long)]
        email: Option<String>,
        /// Birthday as YYYY-MM-DD
        #[arg(long)]
        birthday: Option<String>,
        /// New password
        #[arg(long, conflicts_with = "change_password")]
        password: Option<String>,
        /// Prompt for a new password
        #[arg(long)]
        change_password: bool,
    },
    /// Delete the account
    Delete {
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (api_url, data_dir, request_timeout_secs, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let output = Output::new(OutputFormat::from_flags(cli.json, cli.quiet));

    if let Err(e) = run(cli, &output).await {
        if output.is_json() {
            println!(
                "{}",
                serde_json::json!({"status": "error", "message": e.to_string()})
            );
        } else {
            eprintln!("Error: {:#}", e);
        }
        std::process::exit(1);
    }
}

async fn run(cli: Cli, output: &Output) -> Result<()> {
    // Config commands work even when the config file is broken
    if let Commands::Config { command } = &cli.command {
        logging::init(None, cli.verbose);
        return handle_config_command(command.clone(), cli.config_file.as_ref(), output);
    }

    let config = Config::load_with_cli_override(cli.config_file.as_ref())
        .context("Failed to load configuration")?;
    logging::init(Some(&config), cli.verbose);

    let ctx = Context::new(config)?;

    match cli.command {
        Commands::Register {
            username,
            email,
            birthday,
            password,
        } => commands::account::register(&ctx, username, email, birthday, password, output).await,
        Commands::Login { username, password } => {
            commands::account::login(&ctx, username, password, output).await
        }
        Commands::Logout => commands::account::logout(&ctx, output),
        Commands::Movies { favorites } => commands::movies::list(&ctx, favorites, output).await,
        Commands::Movie { title } => commands::movies::show(&ctx, title, output).await,
        Commands::Director { name } => commands::movies::director(&ctx, name, output).await,
        Commands::Genre { name } => commands::movies::genre(&ctx, name, output).await,
        Commands::Favorite { movie } => commands::movies::favorite(&ctx, movie, output).await,
        Commands::Profile { command } => handle_profile_command(command, &ctx, output).await,
        Commands::Config { .. } => unreachable!(), // Handled above
        Commands::Status => commands::status::show(&ctx, output),
    }
}

async fn handle_profile_command(
    command: Option<ProfileCommands>,
    ctx: &Context,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ProfileCommands::Show { cached }) => commands::profile::show(ctx, cached, output).await,
        None => commands::profile::show(ctx, false, output).await,
        Some(ProfileCommands::Refresh) => commands::profile::refresh(ctx, output).await,
        Some(ProfileCommands::Edit {
            username,
            email,
            birthday,
            password,
            change_password,
        }) => {
            let edits = ProfileEdits {
                username,
                email,
                birthday,
                password,
                change_password,
            };
            commands::profile::edit(ctx, edits, output).await
        }
        Some(ProfileCommands::Delete { yes }) => commands::profile::delete(ctx, yes, output).await,
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}
