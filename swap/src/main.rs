use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};

use swap::config::RuntimeConfig;
use swap::render::{render_collection, render_report};
use swap::service::SwapService;
use swap::store::SqliteStore;

#[derive(Parser, Debug)]
#[command(author, version, about = "Sticker exchange between club members", long_about = None)]
struct Args {
    /// Runtime config file
    #[arg(short, long, default_value = "swap.toml")]
    config: PathBuf,

    /// Database URL, overrides the config file
    #[arg(short, long)]
    database: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add a member
    Register { name: String },
    /// Show a member's needs and duplicates
    Show { name: String },
    /// Replace a member's needs and/or duplicates, e.g. --needs "4, 10, 55"
    Save {
        name: String,
        #[arg(long)]
        needs: Option<String>,
        #[arg(long)]
        duplicates: Option<String>,
    },
    /// Who can trade with this member
    Report {
        name: String,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// List every member
    Members,
    /// Dump every collection as JSON
    Export {
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Load collections from a JSON export
    Import { file: PathBuf },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::try_init().unwrap_or_default();
    let args = Args::parse();

    let mut config = RuntimeConfig::from_toml(&args.config);
    if let Some(url) = args.database {
        config.database_url = url;
    }
    let store = SqliteStore::connect(&config)
        .await
        .with_context(|| format!("failed to open collection store {}", config.database_url))?;
    let service = SwapService::new(store);

    match args.command {
        Command::Register { name } => {
            let member = service.register(&name).await?;
            println!("{} is registered", member);
        }
        Command::Show { name } => {
            let (member, collection) = service.collection(&name).await?;
            print!("{}", render_collection(&member, &collection));
        }
        Command::Save {
            name,
            needs,
            duplicates,
        } => {
            let outcome = service
                .update(&name, needs.as_deref(), duplicates.as_deref())
                .await
                .context("failed to save collection, previous one is unchanged")?;
            for token in outcome
                .rejected_needs
                .iter()
                .chain(&outcome.rejected_duplicates)
            {
                eprintln!("skipped {:?}: not an item number", token);
            }
            print!("{}", render_collection(&outcome.member, &outcome.collection));
        }
        Command::Report { name, json } => {
            let report = service.report(&name).await?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                print!("{}", render_report(&report));
            }
        }
        Command::Members => {
            for member in service.members().await? {
                println!("{}", member);
            }
        }
        Command::Export { output } => match output {
            Some(path) => {
                let count = service
                    .export_to_file(&path)
                    .await
                    .with_context(|| format!("failed to export to {}", path.display()))?;
                println!("exported {} members to {}", count, path.display());
            }
            None => {
                let snapshot = service.export().await?;
                println!("{}", serde_json::to_string_pretty(&snapshot)?);
            }
        },
        Command::Import { file } => {
            let count = service
                .import_from_file(&file)
                .await
                .with_context(|| format!("failed to import {}", file.display()))?;
            println!("imported {} members", count);
        }
    }
    Ok(())
}
