//! Director registry CLI
//!
//! Usage:
//! ```bash
//! director init --seed
//! director assign --company FUTA --business-unit Sales --class C100 --account jdoe
//! director list --company FUTA
//! director accounts --company FUTE
//! director unassign --company FUTA --class C100
//! ```

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

mod commands;
mod db;

use commands::{assign, list};

/// Director - assign directors to business-unit classes
#[derive(Parser)]
#[command(name = "director")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Database file path
    #[arg(long, default_value = "data/director.db", global = true)]
    pub db: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize database schema
    Init {
        /// Force re-initialization (drops existing data)
        #[arg(long)]
        force: bool,
        /// Load demo business units, classes and directory accounts
        #[arg(long)]
        seed: bool,
    },

    /// Show database status
    Status,

    /// Assign a director to a class
    Assign {
        /// Company code (FUTA, FUTE, FUTI)
        #[arg(long)]
        company: String,
        /// Business unit label
        #[arg(long)]
        business_unit: String,
        /// Class identifier
        #[arg(long)]
        class: String,
        /// Domain account, with or without namespace prefix
        #[arg(long)]
        account: String,
    },

    /// List director assignments
    List {
        /// Only this company
        #[arg(long)]
        company: Option<String>,
    },

    /// List directory accounts of a company
    Accounts {
        #[arg(long)]
        company: String,
    },

    /// Remove the director of a class
    Unassign {
        #[arg(long)]
        company: String,
        #[arg(long)]
        class: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let cli = Cli::parse();

    // Ensure data directory exists
    if let Some(parent) = cli.db.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).ok();
        }
    }

    match cli.command {
        Commands::Init { force, seed } => {
            db::init_database(&cli.db, force, seed).await?;
            println!("✅ Database initialized at {:?}", cli.db);
        }

        Commands::Status => {
            db::show_status(&cli.db).await?;
        }

        Commands::Assign {
            company,
            business_unit,
            class,
            account,
        } => {
            assign::assign(&cli.db, &company, &business_unit, &class, &account).await?;
        }

        Commands::List { company } => {
            list::list_directors(&cli.db, company.as_deref()).await?;
        }

        Commands::Accounts { company } => {
            list::list_accounts(&cli.db, &company).await?;
        }

        Commands::Unassign { company, class } => {
            assign::unassign(&cli.db, &company, &class).await?;
        }
    }

    Ok(())
}
