use crate::load_config::load_config;
use crate::patterns::rules;
use crate::pipeline::{run_pipeline, EntityKind};
use crate::source::DirectoryProvider;
use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI for justmc-data: extract the Creative+ data package from cached sources.
#[derive(Parser)]
#[clap(
    name = "justmc-data",
    version,
    about = "Extract actions, events, game values and their icons from JustMC Creative+ sources"
)]
pub struct Cli {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the extraction pipeline and write the data and icon collections
    Extract {
        /// Path to an optional YAML config file
        #[clap(long)]
        config: Option<PathBuf>,
        /// Only extract one kind of entity
        #[clap(long, value_enum)]
        only: Option<EntityKind>,
    },
    /// List the extraction rule table
    Rules,
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    tracing::info!("trace_initialised");

    match cli.command {
        Commands::Extract { config, only } => {
            let config = load_config(config)?;
            let sources = DirectoryProvider::new(&config.cache_dir);
            let patches = DirectoryProvider::new(&config.patches_dir);

            println!("Extraction starting...");
            let report = run_pipeline(&config, &sources, &patches, only).await;
            println!("Extraction complete.\nReport:");
            println!("{report}");

            if report.diagnostics.has_errors() {
                anyhow::bail!(
                    "extraction finished with {} error(s)",
                    report.diagnostics.count(crate::diagnostics::Severity::Error)
                );
            }
            Ok(())
        }
        Commands::Rules => {
            for rule in rules::all() {
                match rule.boundary() {
                    Some(boundary) => {
                        println!("{:<28} {}  (until {boundary})", rule.name, rule.pattern())
                    }
                    None => println!("{:<28} {}", rule.name, rule.pattern()),
                }
            }
            Ok(())
        }
    }
}
